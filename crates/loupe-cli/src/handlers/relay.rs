//! Relay command handler
//!
//! Reads one JSON [`Request`] per line and answers each with one JSON
//! [`Response`] line. Blank lines are skipped; malformed lines get an error
//! response and the loop carries on.

use std::io::{BufRead, Write};

use loupe::{Document, Request, Response, Session};
use tracing::{debug, info, warn};

use crate::commands::RelayArgs;
use crate::config::CliConfig;
use crate::error::CliResult;

/// Answer requests from `reader` until end of input
pub fn relay<R: BufRead, W: Write>(
    document: &Document,
    session: &mut Session,
    reader: R,
    mut writer: W,
) -> CliResult<usize> {
    let mut handled = 0;
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => session.handle(document, request),
            Err(e) => {
                warn!(error = %e, "malformed request");
                Response::error(format!("Malformed request: {e}"))
            }
        };
        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        handled += 1;
    }
    debug!(handled, "relay input closed");
    Ok(handled)
}

/// Run the relay loop over stdin/stdout
pub fn execute_relay(config: &CliConfig, args: &RelayArgs) -> CliResult<()> {
    let document = Document::from_path(&args.html)?;
    let mut session = Session::new(config.inspector.clone());
    info!(html = %args.html.display(), "relay started");
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    relay(&document, &mut session, stdin.lock(), stdout.lock())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use loupe::InspectorConfig;
    use serde_json::Value;

    fn run(input: &str) -> Vec<Value> {
        let doc = Document::parse("<label>Name <input></label><a href='/'>Home</a>");
        let mut session = Session::new(InspectorConfig::default());
        let mut out = Vec::new();
        relay(&doc, &mut session, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_one_response_per_request() {
        let replies = run(concat!(
            "{\"action\":\"startValidate\",\"language\":\"js\"}\n",
            "\n",
            "{\"action\":\"validateLocator\",\"code\":\"page.getByRole('link', { name: 'Home' })\"}\n",
            "{\"action\":\"getStatus\"}\n",
        ));
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0]["mode"], "validate");
        assert_eq!(replies[1]["count"], 1);
        assert_eq!(replies[1]["syntax"], "javascript");
        assert_eq!(replies[2]["isActive"], true);
    }

    #[test]
    fn test_malformed_request_keeps_going() {
        let replies = run("not json\n{\"action\":\"stop\"}\n");
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0]["success"], false);
        assert!(replies[0]["error"]
            .as_str()
            .unwrap()
            .starts_with("Malformed request"));
        assert_eq!(replies[1]["success"], true);
    }

    #[test]
    fn test_generate_over_relay() {
        let replies = run("{\"action\":\"generate\",\"selector\":\"input\"}\n");
        assert_eq!(replies[0]["element"]["tagName"], "INPUT");
        assert_eq!(
            replies[0]["strategies"][0]["code"],
            r#"page.getByRole(AriaRole.TEXTBOX, new Page.GetByRoleOptions().setName("Name"))"#
        );
    }
}
