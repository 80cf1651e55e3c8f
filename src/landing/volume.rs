//! Volume validation.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Largest volume a single submission may report.
pub const MAX_VOLUME: f64 = 500.0;

/// Unsigned decimal, ASCII digits only.
static VOLUME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("volume pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq)]
pub enum VolumeError {
    /// Not a plain decimal number.
    Malformed(String),
    /// Parsed but above [`MAX_VOLUME`].
    TooLarge(f64),
}

impl fmt::Display for VolumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(raw) => write!(f, "volume {raw:?} is not a decimal number"),
            Self::TooLarge(value) => write!(f, "volume {value} exceeds {MAX_VOLUME}"),
        }
    }
}

impl std::error::Error for VolumeError {}

/// A validated volume. The text is kept exactly as typed for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    text: String,
    value: f64,
}

impl Volume {
    pub fn parse(raw: &str) -> Result<Self, VolumeError> {
        if !VOLUME_PATTERN.is_match(raw) {
            return Err(VolumeError::Malformed(raw.to_string()));
        }

        let value: f64 = raw
            .parse()
            .map_err(|_| VolumeError::Malformed(raw.to_string()))?;

        if value > MAX_VOLUME {
            return Err(VolumeError::TooLarge(value));
        }

        Ok(Self {
            text: raw.to_string(),
            value,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_decimals() {
        for raw in ["0", "200", "12.5", "500", "500.0", "007"] {
            let volume = Volume::parse(raw).unwrap();
            assert_eq!(volume.as_str(), raw);
        }
        assert_eq!(Volume::parse("12.5").unwrap().value(), 12.5);
    }

    #[test]
    fn test_rejects_malformed() {
        for raw in ["", "abc", "-5", "+5", "1e3", "12.", ".5", "1.2.3", "1,5", " 5", "٣"] {
            assert!(
                matches!(Volume::parse(raw), Err(VolumeError::Malformed(_))),
                "{raw:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_rejects_above_limit() {
        assert_eq!(Volume::parse("600"), Err(VolumeError::TooLarge(600.0)));
        assert!(matches!(Volume::parse("500.01"), Err(VolumeError::TooLarge(_))));
    }
}
