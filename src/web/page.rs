// ============================================================
// Layer 1 — Page Renderer
// ============================================================
// Renders the single page of the application: one input per
// schema column (label and tooltip from the feature catalog),
// and, after a POST, the result string or the error string.
//
// Every piece of text that reaches the page — labels, submitted
// values, result strings — goes through escape_html().

use std::fmt::Write;

use crate::application::predict_use_case::Verdict;
use crate::data::catalog;
use crate::domain::input::RawFields;
use crate::domain::schema::{ColumnKind, FeatureSchema};

const STYLE: &str = "\
body { font-family: sans-serif; max-width: 760px; margin: 2em auto; color: #1d2330; }
h1 { font-size: 1.6em; }
.field { display: flex; justify-content: space-between; margin: 0.4em 0; }
.field label { flex: 1; cursor: help; }
.field input { flex: 0 0 14em; }
.result { margin-top: 1.5em; padding: 0.8em; border-radius: 6px; background: #e7f3ea; }
.result.error { background: #f8e3e3; }
";

/// Escape the five HTML-significant characters
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&'  => out.push_str("&amp;"),
            '<'  => out.push_str("&lt;"),
            '>'  => out.push_str("&gt;"),
            '"'  => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c    => out.push(c),
        }
    }
    out
}

/// Render the page.
///
/// `values` are echoed back into the inputs; `verdict` is None on GET.
pub fn render(
    schema:  &FeatureSchema,
    values:  &RawFields,
    verdict: Option<&Verdict>,
) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Exoplanet Candidate Screener</title>\n");
    let _ = write!(html, "<style>{STYLE}</style>\n</head>\n<body>\n");
    html.push_str("<h1>Kepler Object of Interest Screener</h1>\n");
    html.push_str("<form method=\"post\" action=\"/\">\n");

    for column in schema.columns() {
        let name    = escape_html(&column.name);
        let label   = escape_html(catalog::label_for(&column.name));
        let tooltip = escape_html(catalog::tooltip_for(&column.name));
        let value   = escape_html(values.get(&column.name).unwrap_or(""));
        let inputmode = match column.kind {
            ColumnKind::Numeric     => " inputmode=\"decimal\"",
            ColumnKind::Categorical => "",
        };
        let _ = writeln!(
            html,
            "<div class=\"field\"><label for=\"{name}\" title=\"{tooltip}\">{label}</label>\
             <input type=\"text\"{inputmode} id=\"{name}\" name=\"{name}\" value=\"{value}\"></div>"
        );
    }

    html.push_str("<button type=\"submit\">Predict</button>\n</form>\n");

    if let Some(verdict) = verdict {
        let (class, text) = match verdict {
            Ok(text)  => ("result", text),
            Err(text) => ("result error", text),
        };
        let _ = writeln!(
            html,
            "<div class=\"{class}\" id=\"prediction\">{}</div>",
            escape_html(text)
        );
    }

    html.push_str("</body>\n</html>\n");
    html
}
