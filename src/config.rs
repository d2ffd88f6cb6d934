use serde::{Deserialize, Serialize};

use crate::effects::border::DEFAULT_BORDER_SECS;
use crate::effects::marquee::{MarqueeDirection, MarqueeSpeed};
use crate::effects::spotlight::{DEFAULT_SPOTLIGHT_FILL, MIN_SPOTLIGHT_DIAMETER};
use crate::error::Result;
use crate::viewport::Breakpoints;

const BUNDLED_CONFIG: &str = include_str!("../site.toml");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub viewport: Breakpoints,
    #[serde(default)]
    pub spotlight: SpotlightSection,
    #[serde(default)]
    pub marquee: MarqueeSection,
    #[serde(default)]
    pub border: BorderSection,
    #[serde(default)]
    pub monitor: MonitorConfig,
}

impl SiteConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// The configuration compiled into the bundle from `site.toml`.
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_CONFIG)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Console log level: "error", "warn", "info", "debug" or "trace"
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Force reduced motion on or off instead of following the browser
    #[serde(default)]
    pub reduced_motion: Option<bool>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            reduced_motion: None,
        }
    }
}

impl GeneralConfig {
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Form-processing endpoint that accepts a JSON POST
    #[serde(default = "default_contact_endpoint")]
    pub endpoint: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: default_contact_endpoint(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotlightSection {
    #[serde(default = "default_spotlight_fill")]
    pub fill: String,
    /// Gradient diameter in pixels; values below the minimum are clamped
    #[serde(default = "default_spotlight_size")]
    pub size: f64,
}

impl Default for SpotlightSection {
    fn default() -> Self {
        Self {
            fill: default_spotlight_fill(),
            size: default_spotlight_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarqueeSection {
    #[serde(default)]
    pub direction: MarqueeDirection,
    #[serde(default)]
    pub speed: MarqueeSpeed,
    #[serde(default = "default_true")]
    pub pause_on_hover: bool,
}

impl Default for MarqueeSection {
    fn default() -> Self {
        Self {
            direction: MarqueeDirection::default(),
            speed: MarqueeSpeed::default(),
            pause_on_hover: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorderSection {
    /// Seconds for one trip of the highlight around the border
    #[serde(default = "default_border_secs")]
    pub duration_secs: f64,
}

impl Default for BorderSection {
    fn default() -> Self {
        Self {
            duration_secs: default_border_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Frames per second below which rendering is reported as slow
    #[serde(default = "default_fps_threshold")]
    pub fps_threshold: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            fps_threshold: default_fps_threshold(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_contact_endpoint() -> String {
    "https://formspree.io/f/xrbadjdd".to_string()
}

fn default_spotlight_fill() -> String {
    DEFAULT_SPOTLIGHT_FILL.to_string()
}

fn default_spotlight_size() -> f64 {
    MIN_SPOTLIGHT_DIAMETER
}

fn default_border_secs() -> f64 {
    DEFAULT_BORDER_SECS
}

fn default_fps_threshold() -> f64 {
    45.0
}

fn default_true() -> bool {
    true
}
