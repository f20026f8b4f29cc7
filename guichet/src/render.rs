//! Markdown rendering and result/error markup.
//!
//! The markdown collaborator is `pulldown-cmark`, consumed as
//! `markdown -> html`. Its output is trusted as-is, and error `detail` text is
//! interpolated without HTML escaping; deployments that render untrusted agent
//! output must sanitize downstream (see DESIGN.md).

use pulldown_cmark::{html, Options, Parser};

/// Rendered in place of a missing `output` field on a success response.
pub const NO_OUTPUT_FALLBACK: &str = "Aucun résultat textuel.";

/// Rendered when a failure response carries no `detail` field.
pub const UNKNOWN_ERROR_DETAIL: &str = "Erreur inconnue";

/// Converts markdown text to HTML (tables and strikethrough enabled).
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Error-styled paragraph for an application failure.
pub fn error_html(detail: &str) -> String {
    format!(r#"<p class="text-danger">Erreur: {detail}</p>"#)
}

/// Error-styled paragraph for a connection-level failure.
pub fn connection_error_html(description: &str) -> String {
    format!(r#"<p class="text-danger">Erreur de connexion: {description}</p>"#)
}
