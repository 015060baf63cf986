// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee configuration.

use core::fmt;

/// Tunables for one marquee row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MarqueeConfig {
    /// Scroll speed in pixels per second.
    pub base_speed: f64,
    /// Speed multiplier applied while the pointer hovers the row, in `[0, 1]`.
    ///
    /// Hovering slows the row down rather than stopping it; `0.0` stops it.
    pub hover_slow_factor: f64,
    /// Loop even when the content fits inside the container.
    pub force_loop: bool,
    /// Master switch. When `false` the row never animates.
    pub auto_loop: bool,
}

impl MarqueeConfig {
    /// Default scroll speed, in pixels per second.
    pub const DEFAULT_SPEED: f64 = 30.0;
    /// Default hover multiplier.
    pub const DEFAULT_HOVER_SLOW_FACTOR: f64 = 0.25;

    /// Creates a configuration with the given speed and default settings
    /// otherwise.
    #[must_use]
    pub fn with_speed(base_speed: f64) -> Self {
        Self {
            base_speed,
            ..Self::default()
        }
    }

    /// Sets the hover multiplier.
    #[must_use]
    pub fn hover_slow_factor(mut self, factor: f64) -> Self {
        self.hover_slow_factor = factor;
        self
    }

    /// Sets whether content loops even when it fits.
    #[must_use]
    pub fn force_loop(mut self, force_loop: bool) -> Self {
        self.force_loop = force_loop;
        self
    }

    /// Sets the master enable switch.
    #[must_use]
    pub fn auto_loop(mut self, auto_loop: bool) -> Self {
        self.auto_loop = auto_loop;
        self
    }

    /// Checks that speeds are finite and in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_speed.is_finite() || self.base_speed < 0.0 {
            return Err(ConfigError::InvalidSpeed(self.base_speed));
        }
        if !(0.0..=1.0).contains(&self.hover_slow_factor) {
            return Err(ConfigError::InvalidHoverSlowFactor(self.hover_slow_factor));
        }
        Ok(())
    }

    /// Speed after applying the hover multiplier.
    #[must_use]
    pub fn effective_speed(&self, hovering: bool) -> f64 {
        if hovering {
            self.base_speed * self.hover_slow_factor
        } else {
            self.base_speed
        }
    }
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            base_speed: Self::DEFAULT_SPEED,
            hover_slow_factor: Self::DEFAULT_HOVER_SLOW_FACTOR,
            force_loop: false,
            auto_loop: true,
        }
    }
}

/// Error returned when a [`MarqueeConfig`] is out of range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The base speed was negative, NaN or infinite.
    InvalidSpeed(f64),
    /// The hover multiplier was outside `[0, 1]` or NaN.
    InvalidHoverSlowFactor(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpeed(speed) => {
                write!(f, "marquee speed must be finite and non-negative, got {speed}")
            }
            Self::InvalidHoverSlowFactor(factor) => {
                write!(f, "hover slow factor must be within [0, 1], got {factor}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::{ConfigError, MarqueeConfig};

    #[test]
    fn defaults_are_valid() {
        let config = MarqueeConfig::default();
        assert_eq!(config.base_speed, 30.0);
        assert_eq!(config.hover_slow_factor, 0.25);
        assert!(config.auto_loop);
        assert!(!config.force_loop);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn builder_sets_fields() {
        let config = MarqueeConfig::with_speed(25.0)
            .hover_slow_factor(0.5)
            .force_loop(true)
            .auto_loop(false);
        assert_eq!(config.base_speed, 25.0);
        assert_eq!(config.hover_slow_factor, 0.5);
        assert!(config.force_loop);
        assert!(!config.auto_loop);
    }

    #[test]
    fn rejects_bad_speeds() {
        for speed in [-1.0, f64::NAN, f64::INFINITY] {
            let err = MarqueeConfig::with_speed(speed).validate().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidSpeed(_)));
        }
        assert_eq!(MarqueeConfig::with_speed(0.0).validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_hover_factors() {
        for factor in [-0.1, 1.5, f64::NAN] {
            let err = MarqueeConfig::default()
                .hover_slow_factor(factor)
                .validate()
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidHoverSlowFactor(_)));
        }
        assert_eq!(
            MarqueeConfig::default().hover_slow_factor(0.0).validate(),
            Ok(())
        );
    }

    #[test]
    fn hovering_scales_speed() {
        let config = MarqueeConfig::with_speed(25.0);
        assert_eq!(config.effective_speed(false), 25.0);
        assert_eq!(config.effective_speed(true), 6.25);
    }

    #[test]
    fn errors_describe_the_value() {
        let msg = ConfigError::InvalidHoverSlowFactor(2.0).to_string();
        assert_eq!(msg, "hover slow factor must be within [0, 1], got 2");
    }
}
