use std::io::{self, BufRead, Write};

use crate::network::{Network, StationId};
use crate::resolve;

const SUGGESTION_LIMIT: usize = 5;

/// Prompt on stdin until a query fuzzy-resolves to a station.
///
/// Unmatched queries print ranked suggestions and re-prompt. Returns `None`
/// when input is exhausted before anything resolves.
pub fn select_station(network: &Network, label: &str) -> io::Result<Option<StationId>> {
    let stdin = io::stdin();
    select_from(network, label, &mut stdin.lock(), &mut io::stdout())
}

fn select_from<R, W>(
    network: &Network,
    label: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<StationId>>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{label}: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        match resolve::resolve(network, query) {
            Ok(station) => {
                writeln!(output, "{label}: {}", network.station(station).name)?;
                return Ok(Some(station));
            }
            Err(err) => {
                writeln!(output, "{err}")?;
                let suggestions = resolve::rank(network, query, SUGGESTION_LIMIT);
                if !suggestions.is_empty() {
                    writeln!(output, "Did you mean:")?;
                    for candidate in suggestions {
                        writeln!(output, "  {}", network.station(candidate.station).name)?;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn network() -> Network {
        let dataset: Dataset = serde_json::from_str(
            r#"{
                "stations": [
                    { "id": "ts", "name": "Times Square" },
                    { "id": "us", "name": "Union Square" }
                ],
                "lines": [ { "id": "L", "stations": ["ts", "us"] } ]
            }"#,
        )
        .unwrap();
        Network::build(dataset).unwrap()
    }

    #[test]
    fn reprompts_until_a_query_resolves() {
        let net = network();
        let mut input = "Xyzzy123\nTims Sq\n".as_bytes();
        let mut output = Vec::new();

        let station = select_from(&net, "Start station", &mut input, &mut output)
            .unwrap()
            .unwrap();

        assert_eq!(net.station(station).name, "Times Square");
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("no station matches \"Xyzzy123\""));
        assert!(transcript.contains("Start station: Times Square"));
    }

    #[test]
    fn skips_blank_lines() {
        let net = network();
        let mut input = "\n   \nUnion Square\n".as_bytes();
        let mut output = Vec::new();

        let station = select_from(&net, "End station", &mut input, &mut output)
            .unwrap()
            .unwrap();
        assert_eq!(net.station(station).name, "Union Square");
    }

    #[test]
    fn eof_yields_none() {
        let net = network();
        let mut input = "".as_bytes();
        let mut output = Vec::new();

        let station = select_from(&net, "Start station", &mut input, &mut output).unwrap();
        assert!(station.is_none());
    }
}
