//! Lenient field parsing for hand-entered application data.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Years of experience from free text such as `"5 years"` or `"about 3"`.
///
/// Takes the first run of ASCII digits; text without digits yields 0 and very long runs
/// saturate instead of failing.
pub fn parse_experience_years(text: &str) -> u32 {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return 0;
    }

    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// Loose truthiness used for document presence: a stored file reference, a non-empty
/// plan text, `true`, `"yes"` or a non-zero number all count as present.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(text) => parse_bool_text(text).unwrap_or(!text.trim().is_empty()),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn parse_bool_text(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" | "" => Some(false),
        _ => None,
    }
}

pub(crate) fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => Ok(number.as_f64()),
        Some(Value::String(text)) => {
            let trimmed = text.trim().replace(',', "");
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("'{text}' is not a number")))
        }
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a number, found {other}"
        ))),
    }
}

pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text).filter(|value| !value.trim().is_empty())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected text, found {other}"
        ))),
    }
}

pub(crate) fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(Value::String(text)) => parse_bool_text(&text)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("'{text}' is not a yes/no value"))),
        Some(value) => Ok(Some(is_truthy(&value))),
    }
}

pub(crate) fn presence<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|value| is_truthy(&value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn experience_takes_first_digit_run() {
        assert_eq!(parse_experience_years("5 years"), 5);
        assert_eq!(parse_experience_years("over 12 years, 3 in retail"), 12);
        assert_eq!(parse_experience_years("  7"), 7);
        assert_eq!(parse_experience_years("0 years"), 0);
    }

    #[test]
    fn experience_without_digits_is_zero() {
        assert_eq!(parse_experience_years("several years"), 0);
        assert_eq!(parse_experience_years(""), 0);
        assert_eq!(parse_experience_years("ten"), 0);
    }

    #[test]
    fn experience_saturates_on_overflow() {
        assert_eq!(parse_experience_years("99999999999999999999 years"), u32::MAX);
    }

    #[test]
    fn truthiness_follows_stored_document_shapes() {
        assert!(is_truthy(&json!("https://drive.example/plan.pdf")));
        assert!(is_truthy(&json!({ "file_id": "abc" })));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("yes")));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!("no")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&Value::Null));
    }
}
