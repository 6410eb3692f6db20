//! Turns raw model output into prospect rows.
//!
//! The model is told to answer with bare JSON but routinely wraps it in
//! Markdown fences or adds a sentence around it. Parsing is tolerant of both:
//! fences are stripped, the outermost `{ ... }` span is taken, and every
//! company entry is normalized to the fixed fourteen columns.

use serde_json::{Number, Value};

use crate::error::{INVALID_JSON_MESSAGE, ProspectError};
use crate::prospect::{HEADERS, ProspectRow, STATUS_TO_CONTACT};

const FENCE: &str = "```";
const FENCE_LANG: &str = "json";

/// Removes every code fence marker, an optional `json` tag after it and the
/// whitespace that follows. The result is trimmed.
pub fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];

        if rest
            .get(..FENCE_LANG.len())
            .is_some_and(|tag| tag.eq_ignore_ascii_case(FENCE_LANG))
        {
            rest = &rest[FENCE_LANG.len()..];
        }
        rest = rest.trim_start();
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// Returns the span from the first `{` to the last `}`, if any.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Cell text for a raw JSON value.
///
/// Lists are joined with `,` after converting each element the same way, so
/// a list of brands reads `Hunter,Rain Bird`. Whole floats drop their
/// fraction (`1.0` is `1`). Objects keep their compact JSON text.
pub fn value_to_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_to_cell(n),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| value_to_cell(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        Some(other) => other.to_string(),
    }
}

fn number_to_cell(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

/// Normalizes one `companies` entry.
fn row_from_value(company: &Value) -> ProspectRow {
    let mut row = ProspectRow::default();
    if let Value::Object(fields) = company {
        for header in HEADERS {
            if let Some(slot) = row.field_mut(header) {
                *slot = value_to_cell(fields.get(header));
            }
        }
    }
    if row.status.is_empty() {
        row.status = STATUS_TO_CONTACT.to_string();
    }
    row
}

/// Parses model output into rows. An absent or null `companies` key is an
/// empty list, not an error.
pub fn parse_companies(text: &str) -> Result<Vec<ProspectRow>, ProspectError> {
    let cleaned = strip_code_fences(text);
    let Some(span) = extract_json_object(&cleaned) else {
        tracing::warn!(len = text.len(), "No JSON object in model output");
        return Err(ProspectError::Parse(INVALID_JSON_MESSAGE.to_string()));
    };

    let parsed: Value = serde_json::from_str(span).map_err(|e| {
        tracing::warn!(error = %e, "Model output is not valid JSON");
        ProspectError::Parse(format!("Risposta di Gemini non interpretabile: {e}"))
    })?;

    match parsed.get("companies") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(companies)) => Ok(companies.iter().map(row_from_value).collect()),
        Some(_) => Err(ProspectError::Parse(
            "Risposta di Gemini non interpretabile: 'companies' non è una lista".to_string(),
        )),
    }
}
