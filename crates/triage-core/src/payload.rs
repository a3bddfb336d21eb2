use crate::errors::SchemaError;
use crate::model::CheckPayload;

/// Validate a check-endpoint response body against the fixed shape
/// `{probable_conditions: string[], recommendations: string, disclaimer: string}`.
///
/// Shape violations are reported field by field; an empty conditions list is
/// a valid shape (a refusal looks exactly like that).
pub fn parse_payload(value: &serde_json::Value) -> Result<CheckPayload, SchemaError> {
    let obj = value
        .as_object()
        .ok_or_else(|| SchemaError("payload is not a JSON object".into()))?;

    let conditions = obj
        .get("probable_conditions")
        .ok_or_else(|| SchemaError("missing field probable_conditions".into()))?;
    let conditions = conditions
        .as_array()
        .ok_or_else(|| SchemaError("probable_conditions is not an array".into()))?;
    let mut probable_conditions = Vec::with_capacity(conditions.len());
    for (i, c) in conditions.iter().enumerate() {
        let s = c.as_str().ok_or_else(|| {
            SchemaError(format!("probable_conditions[{}] is not a string", i))
        })?;
        probable_conditions.push(s.to_string());
    }

    let recommendations = string_field(obj, "recommendations")?;
    let disclaimer = string_field(obj, "disclaimer")?;

    Ok(CheckPayload {
        probable_conditions,
        recommendations,
        disclaimer,
    })
}

fn string_field(
    obj: &serde_json::Map<String, serde_json::Value>,
    name: &str,
) -> Result<String, SchemaError> {
    obj.get(name)
        .ok_or_else(|| SchemaError(format!("missing field {}", name)))?
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| SchemaError(format!("{} is not a string", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_payload_parses() {
        let v = json!({
            "probable_conditions": ["Influenza", "Common Cold"],
            "recommendations": "rest; fluids; see a doctor",
            "disclaimer": "for educational purposes only"
        });
        let p = parse_payload(&v).unwrap();
        assert_eq!(p.probable_conditions.len(), 2);
    }

    #[test]
    fn empty_conditions_is_valid_shape() {
        let v = json!({
            "probable_conditions": [],
            "recommendations": "I can only help with medical questions.",
            "disclaimer": "for educational purposes only"
        });
        assert!(parse_payload(&v).is_ok());
    }

    #[test]
    fn missing_recommendations_is_schema_error() {
        let v = json!({
            "probable_conditions": ["Influenza"],
            "disclaimer": "note"
        });
        let err = parse_payload(&v).unwrap_err();
        assert!(err.to_string().contains("recommendations"));
    }

    #[test]
    fn non_string_condition_is_schema_error() {
        let v = json!({
            "probable_conditions": ["Influenza", 42],
            "recommendations": "rest",
            "disclaimer": "note"
        });
        assert!(parse_payload(&v).is_err());
    }
}
