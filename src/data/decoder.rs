// ============================================================
// Layer 4 — Request Body Decoder
// ============================================================
// Turns a request body into RawFields, whatever the wire
// encoding. Two encodings are accepted on the same endpoint:
//
//   application/x-www-form-urlencoded   → what the HTML form posts
//   application/json                    → a flat object of fields
//
// A missing content type is treated as form-encoded, which is
// what browsers and `curl -d` send.
//
// JSON values are flattened to the raw text a form would have
// carried: strings as-is, numbers and booleans via their textual
// form, null as "not submitted". Nested arrays and objects have
// no form equivalent and are rejected.

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::domain::input::RawFields;

/// Wire encoding of a request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Form,
    Json,
}

impl BodyEncoding {
    /// Pick the encoding from a Content-Type header value.
    /// Parameters such as `; charset=utf-8` are ignored.
    pub fn from_content_type(content_type: Option<&str>) -> Result<Self> {
        let Some(ct) = content_type else {
            return Ok(BodyEncoding::Form);
        };
        let mime = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match mime.as_str() {
            "" | "application/x-www-form-urlencoded" => Ok(BodyEncoding::Form),
            "application/json" => Ok(BodyEncoding::Json),
            m if m.ends_with("+json") => Ok(BodyEncoding::Json),
            other => bail!("Unsupported content type '{other}'"),
        }
    }
}

/// Decode a body given its Content-Type header value
pub fn decode_body(content_type: Option<&str>, body: &[u8]) -> Result<RawFields> {
    match BodyEncoding::from_content_type(content_type)? {
        BodyEncoding::Form => decode_form(body),
        BodyEncoding::Json => decode_json(body),
    }
}

/// Decode an urlencoded body. Later duplicates overwrite earlier ones.
pub fn decode_form(body: &[u8]) -> Result<RawFields> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .context("Cannot decode form body")?;
    Ok(pairs.into_iter().collect())
}

/// Decode a JSON object body into raw text fields
pub fn decode_json(body: &[u8]) -> Result<RawFields> {
    let value: Value = serde_json::from_slice(body).context("Cannot decode JSON body")?;
    let Value::Object(map) = value else {
        bail!("JSON body must be an object of field values");
    };

    let mut raw = RawFields::new();
    for (name, value) in map {
        match value {
            Value::Null => {}
            Value::String(s) => raw.insert(name, s),
            Value::Number(n) => raw.insert(name, n.to_string()),
            Value::Bool(b)   => raw.insert(name, b.to_string()),
            Value::Array(_) | Value::Object(_) => {
                bail!("Field '{name}' must be a plain value, not a list or object")
            }
        }
    }
    Ok(raw)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_body() {
        let raw = decode_body(
            Some("application/x-www-form-urlencoded"),
            b"koi_period=9.48&koi_tce_delivname=q1_q17_dr25_tce&note=a+b%21",
        )
        .unwrap();
        assert_eq!(raw.get("koi_period"), Some("9.48"));
        assert_eq!(raw.get("koi_tce_delivname"), Some("q1_q17_dr25_tce"));
        assert_eq!(raw.get("note"), Some("a b!"));
    }

    #[test]
    fn test_missing_content_type_is_form() {
        let raw = decode_body(None, b"a=1").unwrap();
        assert_eq!(raw.get("a"), Some("1"));
    }

    #[test]
    fn test_json_body_flattens_scalars() {
        let raw = decode_body(
            Some("application/json; charset=utf-8"),
            br#"{"koi_period": 9.48, "koi_prad": "2.26", "flag": true, "gone": null}"#,
        )
        .unwrap();
        assert_eq!(raw.get("koi_period"), Some("9.48"));
        assert_eq!(raw.get("koi_prad"),   Some("2.26"));
        assert_eq!(raw.get("flag"),       Some("true"));
        assert_eq!(raw.get("gone"),       None);
    }

    #[test]
    fn test_json_rejects_nested_values() {
        let err = decode_json(br#"{"koi_period": [1, 2]}"#).unwrap_err();
        assert!(err.to_string().contains("koi_period"));
    }

    #[test]
    fn test_json_rejects_non_object() {
        assert!(decode_json(b"[1, 2, 3]").is_err());
        assert!(decode_json(b"{not json").is_err());
    }

    #[test]
    fn test_unsupported_content_type() {
        assert!(decode_body(Some("text/csv"), b"a,b").is_err());
    }
}
