//! Toast value types: identity, content, style, timing and placement.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Result, ToastError};

/// Process-unique identifier for a toast request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToastId(u64);

impl ToastId {
    /// Allocate the next identifier.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Text shown by a toast. The core never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ToastContent {
    Plain(String),
    Rich(Vec<Segment>),
}

impl ToastContent {
    /// Concatenated text of all segments, for logging and accessibility.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Rich(segments) => segments.iter().map(Segment::text).collect(),
        }
    }
}

impl From<&str> for ToastContent {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

impl From<String> for ToastContent {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

impl From<Vec<Segment>> for ToastContent {
    fn from(value: Vec<Segment>) -> Self {
        Self::Rich(value)
    }
}

/// One run of rich text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Segment {
    Text(String),
    Bold(String),
    Colored { text: String, rgb: u32 },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Bold(text) => text,
            Self::Colored { text, .. } => text,
        }
    }
}

/// Visual style, passed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastStyle {
    #[default]
    Info,
    Success,
    Error,
}

/// Colours and shape hints a renderer applies for a [`ToastStyle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StylePalette {
    /// Background colour as 0xRRGGBB.
    pub background: u32,
    pub text: u32,
    pub shadow: u32,
    pub shadow_opacity: f32,
    pub shadow_radius: f32,
    pub corner_radius: f32,
    /// Label inset as (vertical, horizontal).
    pub padding: (f32, f32),
}

impl ToastStyle {
    pub fn palette(self) -> StylePalette {
        let (background, text, shadow) = match self {
            Self::Info => (0xFFFFFF, 0x808080, 0x000000),
            Self::Success => (0x5EC498, 0xFFFFFF, 0x193621),
            Self::Error => (0xC44D4D, 0xFFFFFF, 0x361919),
        };
        StylePalette {
            background,
            text,
            shadow,
            shadow_opacity: 0.5,
            shadow_radius: 10.0,
            corner_radius: 10.0,
            padding: (8.0, 16.0),
        }
    }
}

/// How long a toast stays on screen once its entry transition finishes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastDuration {
    /// 2 seconds.
    #[default]
    Short,
    /// 4 seconds.
    Average,
    /// 8 seconds.
    Long,
    /// Seconds; must be positive and finite.
    Custom(f64),
}

impl ToastDuration {
    /// Build a validated custom duration.
    pub fn custom(secs: f64) -> Result<Self> {
        let duration = Self::Custom(secs);
        duration.validate()?;
        Ok(duration)
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Custom(secs) if !(secs.is_finite() && secs > 0.0) => {
                Err(ToastError::InvalidDuration(secs))
            }
            _ => Ok(()),
        }
    }

    /// Display time. Invalid custom values map to zero; call
    /// [`validate`](Self::validate) first. Custom values too large for a
    /// [`Duration`] saturate.
    pub fn length(&self) -> Duration {
        match *self {
            Self::Short => Duration::from_secs(2),
            Self::Average => Duration::from_secs(4),
            Self::Long => Duration::from_secs(8),
            Self::Custom(secs) if secs.is_finite() && secs > 0.0 => {
                Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
            }
            Self::Custom(_) => Duration::ZERO,
        }
    }

    /// Parse `short`, `average`, `long` or a number of seconds.
    pub fn from_str_setting(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "average" => Ok(Self::Average),
            "long" => Ok(Self::Long),
            other => {
                let secs: f64 = other.parse().map_err(|_| ToastError::InvalidSetting {
                    key: "duration".into(),
                    reason: format!("'{other}' is not short, average, long or seconds"),
                })?;
                Self::custom(secs)
            }
        }
    }
}

/// Edge a toast is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Top,
    Bottom,
}

impl Position {
    pub fn from_str_setting(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// How a new toast is admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowMode {
    /// Tear down the current toast without an exit transition, drop the
    /// queue and show this one next.
    #[default]
    Immediate,
    /// Wait behind everything already queued.
    Queued,
}

impl ShowMode {
    pub fn from_str_setting(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "immediate" | "instantly" => Some(Self::Immediate),
            "queued" | "queue" => Some(Self::Queued),
            _ => None,
        }
    }
}
