use ratatui::style::Color;
use serde::Deserialize;

use crate::{coordinates::Lla, projection::ProjectionKind};

/// Configuration for the application.
#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sky: SkyConfig,
    pub meteor_showers: MeteorShowersConfig,
}

/// Configuration for the sky widget.
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkyConfig {
    pub observer: ObserverConfig,
    pub projection: ProjectionKind,

    /// The time step to advance or rewind, in minutes.
    pub time_delta_min: i64,

    pub grid_color: Color,
    pub horizon_color: Color,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            observer: ObserverConfig::default(),
            projection: ProjectionKind::default(),
            time_delta_min: 60,
            grid_color: Color::DarkGray,
            horizon_color: Color::Gray,
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObserverConfig {
    /// Display name. Looked up from the position when omitted.
    pub name: Option<String>,
    pub position: Lla,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            name: Some("Taipei".into()),
            position: Lla::new(25.033, 121.5654, 0.0),
        }
    }
}

/// Configuration for the meteor shower overlay.
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeteorShowersConfig {
    /// Whether radiants are shown when the application starts.
    pub show_on_startup: bool,
    pub label_color: Color,
}

impl Default for MeteorShowersConfig {
    fn default() -> Self {
        Self {
            show_on_startup: false,
            label_color: Color::Rgb(0xff, 0xff, 0x99),
        }
    }
}
