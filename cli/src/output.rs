//! Terminal rendition of a submission outcome.

use guichet::SubmissionOutcome;

/// Prints one outcome.
///
/// - default: the raw markdown output (or the failure text on stderr);
/// - `html`: the same markup the results region holds;
/// - `json`: the outcome as one JSON object on stdout, failures included.
pub fn print_outcome(outcome: &SubmissionOutcome, html: bool, json: bool) {
    if json {
        let line = serde_json::to_string(outcome)
            .unwrap_or_else(|_| r#"{"status":"connection_error"}"#.to_string());
        println!("{line}");
        return;
    }
    if html {
        println!("{}", outcome.to_html());
        return;
    }
    if outcome.is_success() {
        println!("{}", outcome.text());
    } else {
        eprintln!("{}", outcome.text());
    }
}
