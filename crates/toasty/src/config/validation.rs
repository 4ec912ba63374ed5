//! Setting value validation.

use super::defaults::{
    TOAST_ANIMATION_MS, TOAST_DEFAULT_DURATION, TOAST_DEFAULT_MODE, TOAST_DEFAULT_POSITION,
    TOAST_FRAME_INTERVAL_MS, TOAST_MARGIN, TOAST_OVERLAY_PASSTHROUGH,
};
use crate::toast::types::{Position, ShowMode, ToastDuration};

/// Largest accepted edge margin, in points.
pub const MAX_MARGIN: f32 = 200.0;
/// Longest accepted transition, in milliseconds.
pub const MAX_ANIMATION_MS: u64 = 5000;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        TOAST_MARGIN => {
            let v: f32 = value.parse().map_err(|_| "must be a number")?;
            if !(0.0..=MAX_MARGIN).contains(&v) {
                return Err(format!("must be between 0 and {MAX_MARGIN}"));
            }
        }
        TOAST_ANIMATION_MS => validate_int_range(value, 0, MAX_ANIMATION_MS as i64)?,
        TOAST_FRAME_INTERVAL_MS => validate_int_range(value, 1, 1000)?,
        TOAST_DEFAULT_DURATION => {
            ToastDuration::from_str_setting(value).map_err(|e| e.to_string())?;
        }
        TOAST_DEFAULT_POSITION => {
            if Position::from_str_setting(value).is_none() {
                return Err("must be 'top' or 'bottom'".into());
            }
        }
        TOAST_DEFAULT_MODE => {
            if ShowMode::from_str_setting(value).is_none() {
                return Err("must be 'immediate' or 'queued'".into());
            }
        }
        TOAST_OVERLAY_PASSTHROUGH => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
