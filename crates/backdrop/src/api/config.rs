use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Tuning parameters for the particle field, provided by the host.
///
/// Every field has a default, so a host may pass a partial JSON object
/// (or `{}`) and only override what it cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles in the population (default: 70).
    pub particle_count: usize,
    /// Maximum distance between two particles for a connecting line (default: 180).
    pub connection_distance: f32,
    /// Distance within which the pointer repels particles (default: 250).
    pub interaction_radius: f32,
    /// Initial velocity is drawn from [-max_speed, max_speed) per axis (default: 0.15).
    pub max_speed: f32,
    /// Smallest particle radius (default: 1.0).
    pub min_radius: f32,
    /// Largest particle radius, exclusive (default: 2.5).
    pub max_radius: f32,
    /// Lowest particle opacity (default: 0.3).
    pub min_opacity: f32,
    /// Highest particle opacity, exclusive (default: 0.8).
    pub max_opacity: f32,
    /// Repulsion scale applied to the normalized pointer direction (default: 0.6).
    pub repulsion: f32,
    /// Fraction of the repulsion blended into velocity each frame (default: 0.05).
    pub velocity_blend: f32,
    /// Alpha multiplier for connecting lines (default: 0.2).
    pub connection_alpha: f32,
    /// Stroke width of connecting lines (default: 0.5).
    pub line_width: f32,
    /// Pointer position before the first move event, far off-surface (default: [-1000, -1000]).
    pub idle_pointer: [f32; 2],
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 70,
            connection_distance: 180.0,
            interaction_radius: 250.0,
            max_speed: 0.15,
            min_radius: 1.0,
            max_radius: 2.5,
            min_opacity: 0.3,
            max_opacity: 0.8,
            repulsion: 0.6,
            velocity_blend: 0.05,
            connection_alpha: 0.2,
            line_width: 0.5,
            idle_pointer: [-1000.0, -1000.0],
        }
    }
}

impl FieldConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to a JSON string.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check that every parameter is usable by the simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("connection_distance", self.connection_distance),
            ("interaction_radius", self.interaction_radius),
            ("max_speed", self.max_speed),
            ("min_radius", self.min_radius),
            ("max_radius", self.max_radius),
            ("min_opacity", self.min_opacity),
            ("max_opacity", self.max_opacity),
            ("repulsion", self.repulsion),
            ("velocity_blend", self.velocity_blend),
            ("connection_alpha", self.connection_alpha),
            ("line_width", self.line_width),
            ("idle_pointer", self.idle_pointer[0]),
            ("idle_pointer", self.idle_pointer[1]),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, "must be finite"));
            }
        }

        if self.connection_distance <= 0.0 {
            return Err(ConfigError::invalid("connection_distance", "must be positive"));
        }
        if self.interaction_radius <= 0.0 {
            return Err(ConfigError::invalid("interaction_radius", "must be positive"));
        }
        if self.max_speed < 0.0 {
            return Err(ConfigError::invalid("max_speed", "must not be negative"));
        }
        if self.min_radius <= 0.0 {
            return Err(ConfigError::invalid("min_radius", "must be positive"));
        }
        if self.max_radius < self.min_radius {
            return Err(ConfigError::invalid("max_radius", "must be >= min_radius"));
        }
        if !(0.0..=1.0).contains(&self.min_opacity) || !(0.0..=1.0).contains(&self.max_opacity) {
            return Err(ConfigError::invalid("opacity", "must be within [0, 1]"));
        }
        if self.max_opacity < self.min_opacity {
            return Err(ConfigError::invalid("max_opacity", "must be >= min_opacity"));
        }
        if self.line_width < 0.0 {
            return Err(ConfigError::invalid("line_width", "must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count, 70);
        assert_eq!(config.connection_distance, 180.0);
        assert_eq!(config.interaction_radius, 250.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = FieldConfig::from_json(r#"{ "particle_count": 12 }"#).unwrap();
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.max_speed, 0.15);
        assert_eq!(config.idle_pointer, [-1000.0, -1000.0]);
    }

    #[test]
    fn empty_object_is_default() {
        let config = FieldConfig::from_json("{}").unwrap();
        assert_eq!(config, FieldConfig::default());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = FieldConfig::from_json("{ particle_count: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_inverted_radius_range() {
        let err = FieldConfig::from_json(r#"{ "min_radius": 3.0, "max_radius": 1.0 }"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "max_radius"),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn rejects_non_positive_thresholds() {
        let config = FieldConfig {
            connection_distance: 0.0,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());

        let config = FieldConfig {
            interaction_radius: -5.0,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_values() {
        let config = FieldConfig {
            repulsion: f32::NAN,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn json_round_trip_preserves_overrides() {
        let config = FieldConfig {
            particle_count: 5,
            line_width: 1.5,
            ..FieldConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(FieldConfig::from_json(&json).unwrap(), config);
    }
}
