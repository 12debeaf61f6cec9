use serde_json::Value;

/// A sensor entry field that is present but cannot be coerced to a number.
#[derive(Debug, PartialEq, Eq)]
pub struct MalformedReading;

/// Coerces one field of a raw sensor entry.
///
/// Mirrors the ingestion contract: an absent field defaults to `0.0`, a JSON
/// number or a numeric string is accepted, anything else is malformed. What
/// the caller does with a malformed entry differs per endpoint: the bulk
/// uploads skip the entry, smart upload aborts the whole request.
fn reading_field(entry: &Value, key: &str) -> Result<f64, MalformedReading> {
    match entry.get(key) {
        None => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or(MalformedReading),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| MalformedReading),
        Some(_) => Err(MalformedReading),
    }
}

/// Extracts `(temperature, humidity, speed)` from a raw sensor entry.
/// Entries that are not JSON objects are malformed.
pub fn reading_values(entry: &Value) -> Result<(f64, f64, f64), MalformedReading> {
    if !entry.is_object() {
        return Err(MalformedReading);
    }
    Ok((
        reading_field(entry, "temperature")?,
        reading_field(entry, "humidity")?,
        reading_field(entry, "speed")?,
    ))
}

/// Pulls the `sensors` array out of a bulk-upload group, defaulting to empty.
pub fn group_sensors(group: &Value) -> &[Value] {
    group
        .get("sensors")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::reading_values;
    use serde_json::json;

    #[test]
    fn numbers_and_numeric_strings_are_accepted() {
        let entry = json!({"temperature": 21.5, "humidity": "48.2", "speed": 3});
        assert_eq!(reading_values(&entry).unwrap(), (21.5, 48.2, 3.0));
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let entry = json!({"temperature": 21.5});
        assert_eq!(reading_values(&entry).unwrap(), (21.5, 0.0, 0.0));
    }

    #[test]
    fn non_numeric_values_are_malformed() {
        assert!(reading_values(&json!({"temperature": "hot"})).is_err());
        assert!(reading_values(&json!({"humidity": null})).is_err());
        assert!(reading_values(&json!({"speed": [1.0]})).is_err());
    }

    #[test]
    fn non_object_entries_are_malformed() {
        assert!(reading_values(&json!("x")).is_err());
        assert!(reading_values(&json!(42)).is_err());
        assert!(reading_values(&json!([{"temperature": 21.0}])).is_err());
    }
}
