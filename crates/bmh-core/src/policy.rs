//! Packing policy.
//!
//! [`PackingPolicy`] is the validated form used by the glyph builder.
//! [`PolicyConfig`] is the loose, serializable form read from configuration
//! files and command-line flags; converting it is where conflicting options
//! are rejected.

use serde::{Deserialize, Serialize};

use crate::error::{Axis, PolicyError};
use crate::grid::DEFAULT_THRESHOLD;
use crate::pack::Orientation;

/// Sizing of one glyph axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sizing {
    /// Every glyph uses this many pixels.
    Fixed(u32),
    /// Glyphs are trimmed to their ink.
    Variable,
}

impl Sizing {
    /// Whether glyphs are trimmed on this axis.
    pub fn is_variable(&self) -> bool {
        matches!(self, Sizing::Variable)
    }
}

/// Validated packing configuration for one font job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingPolicy {
    /// Horizontal sizing.
    pub width: Sizing,
    /// Vertical sizing.
    pub height: Sizing,
    /// Byte layout.
    pub orientation: Orientation,
    /// Added to every glyph's y offset.
    pub y_offset_base: u32,
    /// Intensities below this value are ink.
    pub threshold: u8,
}

impl PackingPolicy {
    /// Fixed-size glyphs of `width` x `height` pixels, row-major.
    pub fn fixed(width: u32, height: u32) -> Self {
        Self {
            width: Sizing::Fixed(width),
            height: Sizing::Fixed(height),
            orientation: Orientation::RowMajor,
            y_offset_base: 0,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Variable-width glyphs of fixed `height` pixels, row-major.
    pub fn variable_width(height: u32) -> Self {
        Self {
            width: Sizing::Variable,
            ..Self::fixed(1, height)
        }
    }

    /// Sets the byte orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the height sizing.
    pub fn with_height(mut self, height: Sizing) -> Self {
        self.height = height;
        self
    }

    /// Sets the width sizing.
    pub fn with_width(mut self, width: Sizing) -> Self {
        self.width = width;
        self
    }

    /// Sets the y offset base.
    pub fn with_y_offset_base(mut self, y_offset_base: u32) -> Self {
        self.y_offset_base = y_offset_base;
        self
    }

    /// Sets the darkness threshold.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Check values that cannot produce a usable font.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.width == Sizing::Fixed(0) {
            return Err(PolicyError::ZeroFixedSize(Axis::Width));
        }
        if self.height == Sizing::Fixed(0) {
            return Err(PolicyError::ZeroFixedSize(Axis::Height));
        }
        if self.threshold == 0 {
            return Err(PolicyError::ZeroThreshold);
        }
        Ok(())
    }
}

/// Serializable packing options as they appear in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Trim glyphs horizontally.
    #[serde(default)]
    pub variable_width: bool,

    /// Fixed glyph width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_width: Option<u32>,

    /// Trim glyphs vertically.
    #[serde(default)]
    pub variable_height: bool,

    /// Fixed glyph height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_height: Option<u32>,

    /// Orientation name (`row_major`, `column_major`, `rotated`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,

    /// Added to every glyph's y offset.
    #[serde(default)]
    pub y_offset_base: u32,

    /// Darkness threshold (default 127).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,
}

impl PolicyConfig {
    /// Resolve against the nominal glyph box of a job.
    ///
    /// Axes that are neither variable nor explicitly fixed take the nominal
    /// size.
    pub fn resolve(&self, nominal_width: u32, nominal_height: u32) -> Result<PackingPolicy, PolicyError> {
        let width = sizing(Axis::Width, self.variable_width, self.fixed_width, nominal_width)?;
        let height = sizing(Axis::Height, self.variable_height, self.fixed_height, nominal_height)?;
        let orientation = match &self.orientation {
            Some(name) => name.parse()?,
            None => Orientation::default(),
        };

        let policy = PackingPolicy {
            width,
            height,
            orientation,
            y_offset_base: self.y_offset_base,
            threshold: self.threshold.unwrap_or(DEFAULT_THRESHOLD),
        };
        policy.validate()?;
        Ok(policy)
    }
}

fn sizing(axis: Axis, variable: bool, fixed: Option<u32>, nominal: u32) -> Result<Sizing, PolicyError> {
    match (variable, fixed) {
        (true, Some(fixed)) => Err(PolicyError::ConflictingSizing { axis, fixed }),
        (true, None) => Ok(Sizing::Variable),
        (false, Some(fixed)) => Ok(Sizing::Fixed(fixed)),
        (false, None) => Ok(Sizing::Fixed(nominal)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_resolves_to_nominal_box() {
        let policy = PolicyConfig::default().resolve(24, 32).unwrap();
        assert_eq!(policy, PackingPolicy::fixed(24, 32));
    }

    #[test]
    fn test_variable_width_with_fixed_width_is_rejected() {
        let config = PolicyConfig {
            variable_width: true,
            fixed_width: Some(12),
            ..Default::default()
        };
        assert_eq!(
            config.resolve(24, 32),
            Err(PolicyError::ConflictingSizing {
                axis: Axis::Width,
                fixed: 12
            })
        );
    }

    #[test]
    fn test_variable_height_with_fixed_height_is_rejected() {
        let config = PolicyConfig {
            variable_height: true,
            fixed_height: Some(16),
            ..Default::default()
        };
        assert!(matches!(
            config.resolve(12, 16),
            Err(PolicyError::ConflictingSizing {
                axis: Axis::Height,
                ..
            })
        ));
    }

    #[test]
    fn test_zero_sizes_and_threshold_rejected() {
        let zero_width = PolicyConfig {
            fixed_width: Some(0),
            ..Default::default()
        };
        assert_eq!(
            zero_width.resolve(8, 8),
            Err(PolicyError::ZeroFixedSize(Axis::Width))
        );

        let zero_threshold = PolicyConfig {
            threshold: Some(0),
            ..Default::default()
        };
        assert_eq!(zero_threshold.resolve(8, 8), Err(PolicyError::ZeroThreshold));
    }

    #[test]
    fn test_rotated_orientation() {
        let config = PolicyConfig {
            variable_width: true,
            orientation: Some("rotated".to_string()),
            y_offset_base: 2,
            ..Default::default()
        };
        let policy = config.resolve(12, 16).unwrap();
        assert_eq!(policy.orientation, Orientation::ColumnMajor);
        assert_eq!(policy.width, Sizing::Variable);
        assert_eq!(policy.height, Sizing::Fixed(16));
        assert_eq!(policy.y_offset_base, 2);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{"variable_width": true, "threshold": 100}"#;
        let config: PolicyConfig = serde_json::from_str(json).unwrap();
        let policy = config.resolve(6, 8).unwrap();
        assert_eq!(policy.threshold, 100);
        assert!(policy.width.is_variable());
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let json = r#"{"variable_widht": true}"#;
        assert!(serde_json::from_str::<PolicyConfig>(json).is_err());
    }
}
