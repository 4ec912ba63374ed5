//! Setting keys understood by [`ToastConfig::load`](super::ToastConfig::load)
//! and their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

pub const TOAST_MARGIN: &str = "TOAST_MARGIN";
pub const TOAST_ANIMATION_MS: &str = "TOAST_ANIMATION_MS";
pub const TOAST_FRAME_INTERVAL_MS: &str = "TOAST_FRAME_INTERVAL_MS";
pub const TOAST_DEFAULT_DURATION: &str = "TOAST_DEFAULT_DURATION";
pub const TOAST_DEFAULT_POSITION: &str = "TOAST_DEFAULT_POSITION";
pub const TOAST_DEFAULT_MODE: &str = "TOAST_DEFAULT_MODE";
pub const TOAST_OVERLAY_PASSTHROUGH: &str = "TOAST_OVERLAY_PASSTHROUGH";

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    (
        TOAST_MARGIN,
        "20",
        "Distance in points between a toast and the surface edges",
    ),
    (
        TOAST_ANIMATION_MS,
        "300",
        "Length of the entry and exit transitions in milliseconds",
    ),
    (
        TOAST_FRAME_INTERVAL_MS,
        "16",
        "Milliseconds between animation frames",
    ),
    (
        TOAST_DEFAULT_DURATION,
        "short",
        "Display duration when none is given: short, average, long or seconds",
    ),
    (
        TOAST_DEFAULT_POSITION,
        "top",
        "Anchor edge when none is given: top or bottom",
    ),
    (
        TOAST_DEFAULT_MODE,
        "immediate",
        "Admission mode when none is given: immediate or queued",
    ),
    (
        TOAST_OVERLAY_PASSTHROUGH,
        "true",
        "Whether the shared overlay lets taps through to the content below",
    ),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

/// Human-readable description of a setting key, or `None` if not defined.
pub fn get_description(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.description)
}
