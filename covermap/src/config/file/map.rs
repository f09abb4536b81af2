use serde::{Deserialize, Serialize};

use crate::config::file::{
    ConfigExtras, ConfigFileError, ConfigFileResult, UnrecognizedKeys, UnrecognizedValues,
};

/// Okotoks, Alberta
pub const DEFAULT_CENTER: [f64; 2] = [-113.9817, 50.7256];
pub const DEFAULT_ZOOM: f64 = 13.0;
pub const MAX_ZOOM: f64 = 24.0;
pub const DEFAULT_TITLE: &str = "NAMP Assets Demo";

/// Initial view of the map page.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Page title
    pub title: Option<String>,
    /// `[longitude, latitude]` the map is centered on when the page loads
    pub center: Option<[f64; 2]>,
    /// Zoom level when the page loads
    pub zoom: Option<f64>,

    #[serde(flatten, skip_serializing)]
    pub unrecognized: UnrecognizedValues,
}

impl MapConfig {
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    #[must_use]
    pub fn center(&self) -> [f64; 2] {
        self.center.unwrap_or(DEFAULT_CENTER)
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom.unwrap_or(DEFAULT_ZOOM)
    }
}

impl ConfigExtras for MapConfig {
    fn finalize(&mut self) -> ConfigFileResult<()> {
        let zoom = self.zoom();
        if !(0.0..=MAX_ZOOM).contains(&zoom) {
            return Err(ConfigFileError::InvalidZoom(zoom));
        }
        let [lng, lat] = self.center();
        if !(-180.0..=180.0).contains(&lng) || !(-90.0..=90.0).contains(&lat) {
            return Err(ConfigFileError::InvalidCenter(lng, lat));
        }
        Ok(())
    }

    fn get_unrecognized_keys(&self) -> UnrecognizedKeys {
        self.unrecognized.keys().cloned().collect()
    }
}
