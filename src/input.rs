//! Input boundary
//!
//! Raw form or command-line values are parsed into typed values here and
//! nowhere else. Delimited strings never travel past this module.

use std::collections::BTreeMap;

use crate::error::{ProgressionError, Result};
use crate::progression::TitleType;

/// Split a comma-separated field into trimmed, non-empty items
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_integer(raw: &str, what: &str) -> Result<u64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return Ok(value);
    }
    let all_digits = !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit());
    let reason = match trimmed.parse::<f64>() {
        _ if all_digits => "is out of range",
        Ok(v) if v < 0.0 => "must not be negative",
        Ok(_) => "must be a whole number",
        Err(_) => "is not a number",
    };
    Err(ProgressionError::invalid(format!("{} {:?} {}", what, raw, reason)))
}

/// Parse a non-negative XP amount
pub fn parse_xp(raw: &str) -> Result<u64> {
    parse_integer(raw, "XP amount")
}

/// Parse a level, which starts at 1
pub fn parse_level(raw: &str) -> Result<u32> {
    let value = parse_integer(raw, "level")?;
    match u32::try_from(value) {
        Ok(0) => Err(ProgressionError::invalid("level must be at least 1")),
        Ok(level) => Ok(level),
        Err(_) => Err(ProgressionError::invalid(format!("level {} is out of range", value))),
    }
}

/// Convert a signed XP value coming from an external system
pub fn xp_from_signed(value: i64) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| ProgressionError::invalid(format!("XP amount {} must not be negative", value)))
}

/// Parse `title=xp` pairs such as `creator=600, breaker=40`
pub fn parse_title_xp(raw: &str) -> Result<BTreeMap<TitleType, u64>> {
    let mut title_xp: BTreeMap<TitleType, u64> = BTreeMap::new();
    for item in parse_tag_list(raw) {
        let (name, amount) = item.split_once('=').ok_or_else(|| {
            ProgressionError::invalid(format!("expected title=xp, got {:?}", item))
        })?;
        let title: TitleType = name.trim().parse()?;
        if title == TitleType::Architect {
            return Err(ProgressionError::invalid("architect is derived and takes no XP of its own"));
        }
        let xp = parse_xp(amount)?;
        let entry = title_xp.entry(title).or_insert(0);
        *entry = entry.saturating_add(xp);
    }
    Ok(title_xp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_list() {
        assert_eq!(parse_tag_list("rust, tokio,,  axum "), vec!["rust", "tokio", "axum"]);
        assert!(parse_tag_list("").is_empty());
        assert!(parse_tag_list(" , ,").is_empty());
    }

    #[test]
    fn test_parse_xp() {
        assert_eq!(parse_xp("250"), Ok(250));
        assert_eq!(parse_xp(" 7 "), Ok(7));
        assert!(parse_xp("-5").unwrap_err().is_invalid_argument());
        assert!(parse_xp("2.5").unwrap_err().is_invalid_argument());
        assert!(parse_xp("lots").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_parse_xp_out_of_range() {
        let err = parse_xp("99999999999999999999999").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("out of range"), "unexpected message: {}", err);
        assert!(parse_xp("2.0").unwrap_err().to_string().contains("whole number"));
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("3"), Ok(3));
        assert!(parse_level("0").is_err());
        assert!(parse_level("1.5").is_err());
        assert!(parse_level("99999999999").is_err());
    }

    #[test]
    fn test_xp_from_signed() {
        assert_eq!(xp_from_signed(10), Ok(10));
        assert!(xp_from_signed(-1).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_parse_title_xp() {
        let parsed = parse_title_xp("creator=600, breaker=40, creator=10").unwrap();
        assert_eq!(parsed.get(&TitleType::Creator), Some(&610));
        assert_eq!(parsed.get(&TitleType::Breaker), Some(&40));

        assert!(parse_title_xp("creator").is_err());
        assert!(parse_title_xp("wizard=5").is_err());
        assert!(parse_title_xp("architect=5").is_err());
    }

    #[test]
    fn test_parse_title_xp_saturates() {
        let max = u64::MAX.to_string();
        let parsed = parse_title_xp(&format!("explorer={}, explorer=10", max)).unwrap();
        assert_eq!(parsed.get(&TitleType::Explorer), Some(&u64::MAX));
    }
}
