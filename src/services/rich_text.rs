//! Conversion of JSON text components into `§`-coded plain text.
//!
//! Written books store each page as a component such as
//! `{"text": "", "extra": [{"text": "Hi", "color": "gold", "bold": true}]}`.
//! Every segment of `extra` becomes its style codes followed by its text;
//! the root `text` comes last. Anything that is not a JSON object is kept
//! as is.

use serde_json::Value;

use crate::models::Document;
use crate::rendering::colors;
use crate::rendering::text::FORMAT_MARKER;

/// Typed stand-in for the formatting marker.
pub const MARKER_ESCAPE: &str = "@@";

/// Normalize every page and replace `@@` with `§`.
pub fn normalize(document: &Document) -> Document {
    document
        .pages()
        .iter()
        .map(|page| normalize_page(page).replace(MARKER_ESCAPE, &FORMAT_MARKER.to_string()))
        .collect::<Vec<_>>()
        .into()
}

/// Flatten one page. Non-JSON pages are returned unchanged.
pub fn normalize_page(page: &str) -> String {
    match serde_json::from_str::<Value>(page) {
        Ok(Value::Object(root)) => {
            let mut out = String::new();
            if let Some(extra) = root.get("extra").and_then(Value::as_array) {
                for segment in extra {
                    push_segment(&mut out, segment);
                }
            }
            if let Some(text) = root.get("text").and_then(Value::as_str) {
                out.push_str(text);
            }
            out
        }
        _ => page.to_string(),
    }
}

fn push_segment(out: &mut String, segment: &Value) {
    let flag = |key: &str| segment.get(key).and_then(Value::as_bool).unwrap_or(false);
    if flag("bold") {
        out.push(FORMAT_MARKER);
        out.push('l');
    }
    if flag("italic") {
        out.push(FORMAT_MARKER);
        out.push('o');
    }
    if let Some(code) = segment
        .get("color")
        .and_then(Value::as_str)
        .and_then(colors::formatting_code)
    {
        out.push(FORMAT_MARKER);
        out.push(code);
    }
    match segment {
        Value::String(text) => out.push_str(text),
        _ => {
            if let Some(text) = segment.get("text").and_then(Value::as_str) {
                out.push_str(text);
            }
        }
    }
}
