//! Configuration for document-open index construction

pub use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use crate::spatial::{Aabb, SpatialIndex};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// World volume and subdivision floor for a level's spatial index.
///
/// Loaded once on document open; the world bounds never change for the
/// lifetime of the index built from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSettings {
    /// Minimum world corner
    pub world_min: [f32; 3],
    /// Maximum world corner
    pub world_max: [f32; 3],
    /// Node subdivision floor; nodes never get smaller than this
    pub min_cell_size: f32,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            world_min: [-8192.0; 3],
            world_max: [8192.0; 3],
            min_cell_size: 64.0,
        }
    }
}

impl IndexSettings {
    /// Check that the settings describe a buildable index.
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] when a coordinate is not finite, the world
    /// volume is empty or inverted on an axis, or the cell floor is not
    /// strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for axis in 0..3 {
            let (min, max) = (self.world_min[axis], self.world_max[axis]);
            if !min.is_finite() || !max.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "world bounds must be finite, got [{min}, {max}]"
                )));
            }
            if min >= max {
                return Err(ConfigError::Invalid(format!(
                    "world bounds are empty or inverted on axis {axis}: [{min}, {max}]"
                )));
            }
        }
        if !self.min_cell_size.is_finite() || self.min_cell_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "cell floor must be a positive number, got {}",
                self.min_cell_size
            )));
        }
        Ok(())
    }

    /// The world volume as a box
    pub fn world_bounds(&self) -> Aabb {
        Aabb::new(Vec3::from(self.world_min), Vec3::from(self.world_max))
    }

    /// Build a spatial index from validated settings.
    ///
    /// # Errors
    /// Propagates [`IndexSettings::validate`] failures.
    pub fn build_index<T: PartialEq>(&self) -> Result<SpatialIndex<T>, ConfigError> {
        self.validate()?;
        Ok(SpatialIndex::new(self.world_bounds(), self.min_cell_size))
    }
}

impl Config for IndexSettings {}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Settings that cannot produce a valid index
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_build_an_index() {
        let settings = IndexSettings::default();
        let index: SpatialIndex<i32> = settings.build_index().unwrap();
        assert_eq!(*index.world_bounds(), Aabb::cube(-8192.0, 8192.0));
        assert!((index.min_cell_size() - 64.0).abs() < f32::EPSILON);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let settings = IndexSettings {
            world_min: [128.0, -128.0, -128.0],
            world_max: [-128.0, 128.0, 128.0],
            ..IndexSettings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
        assert!(settings.build_index::<i32>().is_err());
    }

    #[test]
    fn non_positive_cell_floor_is_rejected() {
        let settings = IndexSettings {
            min_cell_size: 0.0,
            ..IndexSettings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let settings = IndexSettings {
            world_min: [-128.0; 3],
            world_max: [128.0; 3],
            min_cell_size: 32.0,
        };
        let serialized = toml::to_string_pretty(&settings).unwrap();
        let parsed: IndexSettings = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn settings_save_and_load_through_a_file() {
        let settings = IndexSettings {
            world_min: [-256.0; 3],
            world_max: [256.0; 3],
            min_cell_size: 16.0,
        };
        let path = std::env::temp_dir().join("brushwork_index_settings.toml");
        let path = path.to_str().unwrap();

        settings.save_to_file(path).unwrap();
        let loaded = IndexSettings::load_from_file(path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = std::env::temp_dir().join("brushwork_index_settings.yaml");
        std::fs::write(&path, "min_cell_size: 32").unwrap();

        let error = IndexSettings::load_from_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(error, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_file_reports_an_io_error() {
        let error =
            IndexSettings::load_from_file("/nonexistent/brushwork_settings.toml").unwrap_err();
        assert!(matches!(error, ConfigError::Io(_)));
    }
}
