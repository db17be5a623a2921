// Formatting and parsing helpers shared by the engine's adapters.
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// Parses a price or volume field delivered as text, e.g. `"2001.55"`.
pub fn parse_decimal(s: &str) -> Result<f64> {
    let value = f64::from_str(s.trim())
        .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))?;
    if !value.is_finite() {
        return Err(anyhow!("Non-finite decimal '{}'", s));
    }
    Ok(value)
}

/// Converts epoch seconds into a UTC instant.
pub fn parse_epoch_secs(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| anyhow!("Epoch seconds out of range: {}", secs))
}

pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_decimal_simple() {
        assert_eq!(parse_decimal("123.45").unwrap(), 123.45);
        assert_eq!(parse_decimal(" 2000 ").unwrap(), 2000.0);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!(parse_decimal("NOT_A_NUMBER").is_err());
        assert!(parse_decimal("NaN").is_err());
        assert!(parse_decimal("").is_err());
    }

    #[test]
    fn test_parse_epoch_secs() {
        let dt = parse_epoch_secs(1_700_000_000).unwrap();
        assert_eq!(dt.year(), 2023);
        assert_eq!(dt.month(), 11);
        assert_eq!(dt.day(), 14);
        assert_eq!(dt.hour(), 22);
        assert_eq!(dt.minute(), 13);
    }

    #[test]
    fn test_format_price_two_decimals() {
        assert_eq!(format_price(2000.0), "2000.00");
        assert_eq!(format_price(1999.987), "1999.99");
    }

    #[test]
    fn test_format_timestamp() {
        let dt = parse_epoch_secs(1_700_000_000).unwrap();
        assert_eq!(format_timestamp(&dt), "14/11/2023 22:13:20 UTC");
    }
}
