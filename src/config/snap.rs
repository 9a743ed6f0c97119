use crate::domain::snap::EDGE_THRESHOLD;
use thiserror::Error;

/// Tunables for edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapConfig {
    /// Distance in device pixels from an edge at which snapping engages
    pub edge_threshold: i32,
}

impl SnapConfig {
    pub const DEFAULT_EDGE_THRESHOLD: i32 = EDGE_THRESHOLD;
    pub const MIN_EDGE_THRESHOLD: i32 = 0;
    pub const MAX_EDGE_THRESHOLD: i32 = 64;

    /// Creates a configuration, rejecting thresholds outside the supported range
    pub fn new(edge_threshold: i32) -> Result<Self, SnapConfigError> {
        if !(Self::MIN_EDGE_THRESHOLD..=Self::MAX_EDGE_THRESHOLD).contains(&edge_threshold) {
            return Err(SnapConfigError::ThresholdOutOfRange {
                value: edge_threshold,
                min: Self::MIN_EDGE_THRESHOLD,
                max: Self::MAX_EDGE_THRESHOLD,
            });
        }
        Ok(Self { edge_threshold })
    }

    pub fn sanitize_threshold(value: i32) -> i32 {
        value.clamp(Self::MIN_EDGE_THRESHOLD, Self::MAX_EDGE_THRESHOLD)
    }

    /// Builds a configuration from an optional textual threshold
    ///
    /// Missing values fall back to the default. Values that parse but are out
    /// of range are clamped; values that do not parse are an error.
    pub fn from_threshold_str(value: Option<&str>) -> Result<Self, SnapConfigError> {
        let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Ok(Self::default());
        };
        let parsed: i32 = raw
            .parse()
            .map_err(|_| SnapConfigError::InvalidThreshold(raw.to_string()))?;
        Self::new(Self::sanitize_threshold(parsed))
    }
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            edge_threshold: Self::DEFAULT_EDGE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapConfigError {
    #[error("Edge threshold {value} is outside the supported range {min}..={max}")]
    ThresholdOutOfRange { value: i32, min: i32, max: i32 },
    #[error("Edge threshold '{0}' is not a number")]
    InvalidThreshold(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_four_pixels() {
        assert_eq!(SnapConfig::default().edge_threshold, 4);
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(SnapConfig::new(0).is_ok());
        assert!(SnapConfig::new(64).is_ok());
        assert_eq!(
            SnapConfig::new(-1),
            Err(SnapConfigError::ThresholdOutOfRange { value: -1, min: 0, max: 64 })
        );
        assert!(SnapConfig::new(65).is_err());
    }

    #[test]
    fn threshold_string_parsing() {
        assert_eq!(SnapConfig::from_threshold_str(None), Ok(SnapConfig::default()));
        assert_eq!(SnapConfig::from_threshold_str(Some("  ")), Ok(SnapConfig::default()));
        assert_eq!(SnapConfig::from_threshold_str(Some(" 8 ")).unwrap().edge_threshold, 8);
        assert_eq!(SnapConfig::from_threshold_str(Some("500")).unwrap().edge_threshold, 64);
        assert_eq!(
            SnapConfig::from_threshold_str(Some("wide")),
            Err(SnapConfigError::InvalidThreshold("wide".to_string()))
        );
    }
}
