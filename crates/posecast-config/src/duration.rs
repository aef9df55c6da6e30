use std::time::Duration;

/// Parse a human-readable duration such as `"2s"` or `"15m"`
///
/// # Errors
///
/// Returns an error naming the offending value when it cannot be parsed
pub fn parse_duration(value: &str) -> anyhow::Result<Duration> {
    duration_str::parse(value).map_err(|e| anyhow::anyhow!("invalid duration '{value}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seconds_and_minutes() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_duration("soon").unwrap_err();
        assert!(err.to_string().contains("'soon'"));
    }
}
