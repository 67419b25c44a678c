use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for a single character. Loaded once and handed to the
/// controller at spawn; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub sprint_speed: f32,
    pub sneak_speed: f32,
    pub slow_speed: f32,

    pub glide_speed: f32,
    /// Divisor applied to the right axis while gliding. Must be at least 1.
    pub slide_value: f32,
    /// Seconds the character stays slippery after touching oil.
    pub oil_timer: f32,

    pub max_jump_count: u32,
    pub launch_velocity: f32,

    pub dash_max_count: u32,
    pub dash_velocity: f32,

    pub base_turn_rate: f32,
    pub base_look_up_rate: f32,

    pub camera: CameraConfig,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            sprint_speed: 1200.0,
            sneak_speed: 200.0,
            slow_speed: 100.0,

            glide_speed: 2000.0,
            slide_value: 2.0,
            oil_timer: 1.5,

            max_jump_count: 1,
            launch_velocity: 500.0,

            dash_max_count: 1,
            dash_velocity: 10000.0,

            base_turn_rate: 45.0,
            base_look_up_rate: 45.0,

            camera: CameraConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub arm_length: f32,
    pub aim_arm_length: f32,
    pub arm_pitch_degrees: f32,

    pub zoom_step: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            arm_length: 400.0,
            aim_arm_length: 200.0,
            arm_pitch_degrees: -15.0,

            zoom_step: 20.0,
            zoom_min: 150.0,
            zoom_max: 400.0,
        }
    }
}

impl CharacterConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&source)?;
        log::info!("Loaded character config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let speeds = [
            ("sprint_speed", self.sprint_speed),
            ("sneak_speed", self.sneak_speed),
            ("slow_speed", self.slow_speed),
            ("glide_speed", self.glide_speed),
            ("launch_velocity", self.launch_velocity),
            ("dash_velocity", self.dash_velocity),
        ];
        for (field, value) in speeds {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("expected a non-negative number, got {value}")));
            }
        }

        if self.slide_value.is_nan() || self.slide_value < 1.0 {
            return Err(invalid(
                "slide_value",
                format!("must be at least 1, got {}", self.slide_value),
            ));
        }

        if self.oil_timer.is_nan() || self.oil_timer < 0.0 {
            return Err(invalid(
                "oil_timer",
                format!("must not be negative, got {}", self.oil_timer),
            ));
        }

        self.camera.validate()
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zoom_step.is_nan() || self.zoom_step <= 0.0 {
            return Err(invalid(
                "camera.zoom_step",
                format!("must be positive, got {}", self.zoom_step),
            ));
        }

        if self.zoom_min.is_nan() || self.zoom_max.is_nan() || self.zoom_min >= self.zoom_max {
            return Err(invalid(
                "camera.zoom_min",
                format!(
                    "must be below zoom_max ({} >= {})",
                    self.zoom_min, self.zoom_max
                ),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CharacterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sprint_speed, 1200.0);
        assert_eq!(config.sneak_speed, 200.0);
        assert_eq!(config.slow_speed, 100.0);
        assert_eq!(config.glide_speed, 2000.0);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = CharacterConfig::from_toml_str(
            r#"
            sprint_speed = 900.0
            dash_max_count = 2

            [camera]
            zoom_step = 10.0
            "#,
        )
        .unwrap();

        assert_eq!(config.sprint_speed, 900.0);
        assert_eq!(config.dash_max_count, 2);
        assert_eq!(config.sneak_speed, 200.0);
        assert_eq!(config.camera.zoom_step, 10.0);
        assert_eq!(config.camera.zoom_max, 400.0);
    }

    #[test]
    fn rejects_slide_value_below_one() {
        let err = CharacterConfig::from_toml_str("slide_value = 0.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "slide_value",
                ..
            }
        ));
    }

    #[test]
    fn rejects_nan_tunables() {
        let config = CharacterConfig {
            slide_value: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "slide_value",
                ..
            })
        ));

        let mut config = CharacterConfig::default();
        config.camera.zoom_min = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "camera.zoom_min",
                ..
            })
        ));
    }

    #[test]
    fn rejects_inverted_zoom_range() {
        let err = CharacterConfig::from_toml_str(
            r#"
            [camera]
            zoom_min = 500.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "camera.zoom_min",
                ..
            }
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = CharacterConfig::from_toml_str("sprint_speed = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = CharacterConfig::load("/nonexistent/character.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
