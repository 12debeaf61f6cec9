use validator::ValidationErrors;

/// Flattens `validator` errors into a single semicolon-separated message.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Rounds to the given number of decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(23.456, 1), 23.5);
        assert_eq!(round_to(23.454, 2), 23.45);
        assert_eq!(round_to(20.0, 2), 20.0);
    }
}
