// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::models::LatLng;

const DEFAULT_DATA_PATH: &str = "data/workouts.json";
const DEFAULT_MAP_ZOOM: u8 = 13;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the durable workout store
    pub data_path: PathBuf,
    /// Zoom level used when centering the map on a workout
    pub map_zoom: u8,
    /// Position to center on at startup when geolocation is unavailable
    pub home: Option<LatLng>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            map_zoom: DEFAULT_MAP_ZOOM,
            home: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; missing ones fall back to defaults. A
    /// variable that is present but unparseable is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let data_path = env::var("MAPFIT_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH));

        let map_zoom = match env::var("MAPFIT_MAP_ZOOM") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("MAPFIT_MAP_ZOOM"))?,
            Err(_) => DEFAULT_MAP_ZOOM,
        };

        let home = match (env::var("MAPFIT_HOME_LAT"), env::var("MAPFIT_HOME_LNG")) {
            (Ok(lat), Ok(lng)) => Some(LatLng(
                lat.parse()
                    .map_err(|_| ConfigError::Invalid("MAPFIT_HOME_LAT"))?,
                lng.parse()
                    .map_err(|_| ConfigError::Invalid("MAPFIT_HOME_LNG"))?,
            )),
            _ => None,
        };

        Ok(Self {
            data_path,
            map_zoom,
            home,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_path, PathBuf::from("data/workouts.json"));
        assert_eq!(config.map_zoom, 13);
        assert!(config.home.is_none());
    }
}
