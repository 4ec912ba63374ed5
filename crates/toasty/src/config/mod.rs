//! Manager configuration: defaults, validation, loading from string settings.

pub mod defaults;
pub mod validation;

use std::time::Duration;

use crate::animator::{DEFAULT_FRAME_INTERVAL, DEFAULT_TRANSITION};
use crate::surface::OverlayOptions;
use crate::toast::types::{Position, ShowMode, ToastDuration};
use crate::{Result, ToastError};

use defaults::{
    TOAST_ANIMATION_MS, TOAST_DEFAULT_DURATION, TOAST_DEFAULT_MODE, TOAST_DEFAULT_POSITION,
    TOAST_FRAME_INTERVAL_MS, TOAST_MARGIN, TOAST_OVERLAY_PASSTHROUGH, get_default,
    get_description,
};
use validation::{MAX_ANIMATION_MS, MAX_MARGIN, validate_setting};

const SETTING_KEYS: [&str; 7] = [
    TOAST_MARGIN,
    TOAST_ANIMATION_MS,
    TOAST_FRAME_INTERVAL_MS,
    TOAST_DEFAULT_DURATION,
    TOAST_DEFAULT_POSITION,
    TOAST_DEFAULT_MODE,
    TOAST_OVERLAY_PASSTHROUGH,
];

/// Runtime configuration of a [`ToastManager`](crate::ToastManager).
#[derive(Debug, Clone)]
pub struct ToastConfig {
    /// Inset from the surface edges and the anchored safe area.
    pub margin: f32,
    /// Length of entry and exit transitions.
    pub transition: Duration,
    pub frame_interval: Duration,
    pub default_duration: ToastDuration,
    pub default_position: Position,
    pub default_mode: ShowMode,
    pub overlay: OverlayOptions,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            margin: 20.0,
            transition: DEFAULT_TRANSITION,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            default_duration: ToastDuration::Short,
            default_position: Position::Top,
            default_mode: ShowMode::Immediate,
            overlay: OverlayOptions::default(),
        }
    }
}

impl ToastConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the edge margin, clamped to the range [`set`](Self::set)
    /// accepts. A non-finite margin is ignored.
    pub fn with_margin(mut self, margin: f32) -> Self {
        if margin.is_finite() {
            self.margin = margin.clamp(0.0, MAX_MARGIN);
        }
        self
    }

    /// Builder: set the transition length, capped at the longest
    /// [`set`](Self::set) accepts.
    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition.min(Duration::from_millis(MAX_ANIMATION_MS));
        self
    }

    /// Builder: set the default display duration.
    pub fn with_default_duration(mut self, duration: ToastDuration) -> Self {
        self.default_duration = duration;
        self
    }

    /// Builder: set the default anchor edge.
    pub fn with_default_position(mut self, position: Position) -> Self {
        self.default_position = position;
        self
    }

    /// Builder: set the default admission mode.
    pub fn with_default_mode(mut self, mode: ShowMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Apply one string setting, rejecting unknown keys and invalid values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |reason: String| ToastError::InvalidSetting {
            key: key.to_string(),
            reason,
        };
        if get_default(key).is_none() {
            return Err(invalid("unknown setting".into()));
        }
        let value = value.trim();
        validate_setting(key, value).map_err(invalid)?;

        match key {
            TOAST_MARGIN => {
                self.margin = value.parse().map_err(|_| invalid("not a number".into()))?
            }
            TOAST_ANIMATION_MS => self.transition = parse_millis(value, self.transition),
            TOAST_FRAME_INTERVAL_MS => {
                self.frame_interval = parse_millis(value, self.frame_interval)
            }
            TOAST_DEFAULT_DURATION => {
                self.default_duration = ToastDuration::from_str_setting(value)?
            }
            TOAST_DEFAULT_POSITION => {
                self.default_position = Position::from_str_setting(value)
                    .ok_or_else(|| invalid("expected top or bottom".into()))?
            }
            TOAST_DEFAULT_MODE => {
                self.default_mode = ShowMode::from_str_setting(value)
                    .ok_or_else(|| invalid("expected immediate or queued".into()))?
            }
            TOAST_OVERLAY_PASSTHROUGH => self.overlay.pass_through = value == "true",
            _ => {}
        }
        Ok(())
    }

    /// Load configuration from string settings looked up by key (see
    /// [`defaults`]). Missing keys use their default; invalid values are
    /// logged and replaced by the default.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        for key in SETTING_KEYS {
            let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            if let Err(e) = config.set(key, &value) {
                tracing::warn!(
                    key,
                    value = %value,
                    error = %e,
                    expected = get_description(key).unwrap_or_default(),
                    "Invalid toast setting, using default"
                );
            }
        }
        config
    }
}

fn parse_millis(s: &str, default: Duration) -> Duration {
    s.parse::<u64>().map(Duration::from_millis).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_load_without_settings_matches_default() {
        let config = ToastConfig::load(|_| None);
        let defaults = ToastConfig::default();
        assert_eq!(config.margin, defaults.margin);
        assert_eq!(config.transition, Duration::from_millis(300));
        assert_eq!(config.frame_interval, Duration::from_millis(16));
        assert_eq!(config.default_duration, ToastDuration::Short);
        assert_eq!(config.default_position, Position::Top);
        assert_eq!(config.default_mode, ShowMode::Immediate);
        assert!(config.overlay.pass_through);
    }

    #[test]
    fn test_load_reads_values() {
        let config = ToastConfig::load(lookup(&[
            (TOAST_MARGIN, "12"),
            (TOAST_ANIMATION_MS, "150"),
            (TOAST_DEFAULT_DURATION, "4.5"),
            (TOAST_DEFAULT_POSITION, "bottom"),
            (TOAST_DEFAULT_MODE, "queued"),
            (TOAST_OVERLAY_PASSTHROUGH, "false"),
        ]));
        assert_eq!(config.margin, 12.0);
        assert_eq!(config.transition, Duration::from_millis(150));
        assert_eq!(config.default_duration, ToastDuration::Custom(4.5));
        assert_eq!(config.default_position, Position::Bottom);
        assert_eq!(config.default_mode, ShowMode::Queued);
        assert!(!config.overlay.pass_through);
    }

    #[test]
    fn test_load_replaces_invalid_values_with_defaults() {
        let config = ToastConfig::load(lookup(&[
            (TOAST_MARGIN, "-5"),
            (TOAST_DEFAULT_DURATION, "-1"),
            (TOAST_DEFAULT_POSITION, "middle"),
            (TOAST_FRAME_INTERVAL_MS, "  "),
        ]));
        assert_eq!(config.margin, 20.0);
        assert_eq!(config.default_duration, ToastDuration::Short);
        assert_eq!(config.default_position, Position::Top);
        assert_eq!(config.frame_interval, Duration::from_millis(16));
    }

    #[test]
    fn test_set_applies_valid_value() {
        let mut config = ToastConfig::default();
        config.set(TOAST_DEFAULT_POSITION, " bottom ").unwrap();
        config.set(TOAST_ANIMATION_MS, "0").unwrap();
        assert_eq!(config.default_position, Position::Bottom);
        assert!(config.transition.is_zero());
    }

    #[test]
    fn test_set_rejects_invalid_value() {
        let mut config = ToastConfig::default();
        let err = config.set(TOAST_FRAME_INTERVAL_MS, "0").unwrap_err();
        assert!(matches!(
            err,
            ToastError::InvalidSetting { ref key, .. } if key == TOAST_FRAME_INTERVAL_MS
        ));
        assert_eq!(config.frame_interval, Duration::from_millis(16));

        assert!(matches!(
            config.set("TOAST_COLOR", "red"),
            Err(ToastError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_builder_chain() {
        let config = ToastConfig::new()
            .with_margin(8.0)
            .with_transition(Duration::ZERO)
            .with_default_duration(ToastDuration::Long)
            .with_default_position(Position::Bottom)
            .with_default_mode(ShowMode::Queued);
        assert_eq!(config.margin, 8.0);
        assert!(config.transition.is_zero());
        assert_eq!(config.default_duration, ToastDuration::Long);
        assert_eq!(config.default_position, Position::Bottom);
        assert_eq!(config.default_mode, ShowMode::Queued);
    }

    #[test]
    fn test_builders_clamp_to_accepted_range() {
        let config = ToastConfig::new()
            .with_margin(-5.0)
            .with_transition(Duration::from_secs(10));
        assert_eq!(config.margin, 0.0);
        assert_eq!(config.transition, Duration::from_secs(5));

        let config = ToastConfig::new().with_margin(500.0);
        assert_eq!(config.margin, 200.0);

        let config = ToastConfig::new().with_margin(f32::NAN);
        assert_eq!(config.margin, 20.0);
    }
}
