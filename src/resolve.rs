//! Fuzzy station name resolution.
//!
//! Scoring is deliberately self-contained so results are reproducible:
//! a query and a station name are lowercased and split into alphanumeric
//! tokens, each query token is matched against the name token it is closest
//! to by edit distance (with a prefix rule so "sq" matches "square"), and the
//! final score is the mean of those per-token similarities, in `[0, 1]`.

use std::cmp::Ordering;

use crate::error::NoMatchError;
use crate::network::{Network, StationId};

/// Minimum score for `resolve` to accept a candidate.
pub const SCORE_THRESHOLD: f64 = 0.6;

/// Minimum score for a candidate to appear in `rank` suggestions.
const SUGGESTION_FLOOR: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub station: StationId,
    pub score: f64,
}

/// Resolve a free-text query to the best-matching station.
///
/// An exact case-insensitive full-name match short-circuits regardless of
/// scoring. Otherwise the highest-scoring station wins; ties break on smaller
/// whole-name edit distance, then lexically smaller name. Deterministic for a
/// fixed network: stations are scanned in the dataset's declared order and
/// replaced only on a strictly better key.
pub fn resolve(network: &Network, query: &str) -> Result<StationId, NoMatchError> {
    let query_tokens = tokenize(query);
    let query_norm = query_tokens.join(" ");

    let no_match = || NoMatchError {
        query: query.to_owned(),
    };

    if query_tokens.is_empty() {
        return Err(no_match());
    }

    let mut best: Option<(StationId, f64, usize, &str)> = None;
    for (index, station) in network.stations().iter().enumerate() {
        let name_tokens = tokenize(&station.name);
        let name_norm = name_tokens.join(" ");
        if name_norm == query_norm {
            return Ok(StationId(index));
        }

        let score = score_tokens(&query_tokens, &name_tokens);
        let distance = levenshtein(&query_norm, &name_norm);
        let better = match best {
            None => true,
            Some((_, best_score, best_distance, best_name)) => {
                match score.partial_cmp(&best_score) {
                    Some(Ordering::Greater) => true,
                    Some(Ordering::Equal) => match distance.cmp(&best_distance) {
                        Ordering::Less => true,
                        Ordering::Equal => station.name.as_str() < best_name,
                        Ordering::Greater => false,
                    },
                    _ => false,
                }
            }
        };
        if better {
            best = Some((StationId(index), score, distance, &station.name));
        }
    }

    match best {
        Some((station, score, _, _)) if score >= SCORE_THRESHOLD => Ok(station),
        _ => Err(no_match()),
    }
}

/// Ranked candidates for interactive suggestion, best first.
///
/// Same ordering key as `resolve`, but without the acceptance threshold;
/// only candidates below the suggestion floor are dropped.
pub fn rank(network: &Network, query: &str, limit: usize) -> Vec<Candidate> {
    let query_tokens = tokenize(query);
    if query_tokens.is_empty() {
        return Vec::new();
    }
    let query_norm = query_tokens.join(" ");

    let mut scored: Vec<(Candidate, usize, &str)> = network
        .stations()
        .iter()
        .enumerate()
        .filter_map(|(index, station)| {
            let name_tokens = tokenize(&station.name);
            let score = score_tokens(&query_tokens, &name_tokens);
            (score >= SUGGESTION_FLOOR).then(|| {
                let distance = levenshtein(&query_norm, &name_tokens.join(" "));
                (
                    Candidate {
                        station: StationId(index),
                        score,
                    },
                    distance,
                    station.name.as_str(),
                )
            })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.0.score
            .partial_cmp(&a.0.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
            .then_with(|| a.2.cmp(b.2))
    });
    scored.truncate(limit);
    scored.into_iter().map(|(candidate, _, _)| candidate).collect()
}

/// Lowercased maximal alphanumeric runs.
fn tokenize(s: &str) -> Vec<String> {
    s.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Mean over query tokens of the best similarity against any name token.
fn score_tokens(query: &[String], name: &[String]) -> f64 {
    if query.is_empty() || name.is_empty() {
        return 0.0;
    }
    let total: f64 = query
        .iter()
        .map(|q| {
            name.iter()
                .map(|t| token_similarity(q, t))
                .fold(0.0, f64::max)
        })
        .sum();
    total / query.len() as f64
}

/// Similarity of one query token against one name token, in `[0, 1]`.
///
/// The prefix rule compares the query token against the name token truncated
/// to the query's length, so abbreviations score as written-out words.
fn token_similarity(query: &str, token: &str) -> f64 {
    let query_len = query.chars().count();
    let token_len = token.chars().count();
    let longest = query_len.max(token_len);
    if longest == 0 {
        return 0.0;
    }

    let full = 1.0 - levenshtein(query, token) as f64 / longest as f64;
    if token_len > query_len {
        let head: String = token.chars().take(query_len).collect();
        let prefix = 1.0 - levenshtein(query, &head) as f64 / query_len as f64;
        full.max(prefix)
    } else {
        full
    }
}

/// Classic char-level edit distance, single-row DP.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut previous_diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous_diagonal + usize::from(ca != cb);
            previous_diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(row[j + 1] + 1);
        }
    }
    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn network(names: &[&str]) -> Network {
        let stations: Vec<String> = names
            .iter()
            .enumerate()
            .map(|(i, name)| format!(r#"{{ "id": "s{i}", "name": "{name}" }}"#))
            .collect();
        let json = format!(
            r#"{{ "stations": [{}], "lines": [] }}"#,
            stations.join(",")
        );
        let dataset: Dataset = serde_json::from_str(&json).unwrap();
        Network::build(dataset).unwrap()
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("tims", "times"), 1);
    }

    #[test]
    fn exact_match_any_case_wins_over_fuzzy() {
        let net = network(&["Parkside", "Park"]);
        let resolved = resolve(&net, "PARK").unwrap();
        assert_eq!(net.station(resolved).name, "Park");
    }

    #[test]
    fn exact_match_ignores_punctuation() {
        let net = network(&["42 St - Port Authority"]);
        let resolved = resolve(&net, "42 st port authority").unwrap();
        assert_eq!(resolved, StationId(0));
    }

    #[test]
    fn misspelled_abbreviated_query_resolves() {
        let net = network(&["Times Square", "Union Square", "Grand Central"]);
        let resolved = resolve(&net, "Tims Sq").unwrap();
        assert_eq!(net.station(resolved).name, "Times Square");
    }

    #[test]
    fn nonsense_query_is_rejected() {
        let net = network(&["Times Square", "Union Square", "Grand Central"]);
        let err = resolve(&net, "Xyzzy123").unwrap_err();
        assert_eq!(err.query, "Xyzzy123");
    }

    #[test]
    fn empty_query_is_rejected() {
        let net = network(&["Times Square"]);
        assert!(resolve(&net, "  --  ").is_err());
    }

    #[test]
    fn ties_break_lexically() {
        // Both names score identically against the query; the lexically
        // smaller one must win, regardless of declared order.
        let net = network(&["Canap", "Canal"]);
        let resolved = resolve(&net, "Cana").unwrap();
        assert_eq!(net.station(resolved).name, "Canal");
    }

    #[test]
    fn resolve_is_deterministic() {
        let net = network(&["Times Square", "Union Square", "Herald Square"]);
        let first = resolve(&net, "sqare").unwrap();
        for _ in 0..10 {
            assert_eq!(resolve(&net, "sqare").unwrap(), first);
        }
    }

    #[test]
    fn rank_orders_best_first() {
        let net = network(&["Times Square", "Union Square", "Grand Central"]);
        let candidates = rank(&net, "Tims Sq", 2);
        assert_eq!(candidates.len(), 2);
        assert_eq!(net.station(candidates[0].station).name, "Times Square");
        assert!(candidates[0].score > candidates[1].score);
    }

    #[test]
    fn rank_drops_noise() {
        let net = network(&["Times Square", "Union Square"]);
        assert!(rank(&net, "qqqqqqqq", 5).is_empty());
    }
}
