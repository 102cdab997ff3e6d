//! Configuration validation with domain checks.

use crate::error::ConfigError;

use super::{Config, FilterConfig};

impl FilterConfig {
    /// Validate that every filter parameter is finite and inside its
    /// documented domain. The pipeline refuses to run on anything else.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("filter.edge_threshold", self.edge_threshold),
            ("filter.highlight_threshold", self.highlight_threshold),
            ("filter.shadow_threshold", self.shadow_threshold),
            ("filter.desaturation", self.desaturation),
            ("filter.contrast", self.contrast),
            ("filter.brightness", self.brightness),
            ("filter.edge_sharpness", self.edge_sharpness),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be a finite number"
                )));
            }
        }

        if self.edge_threshold < 0.0 {
            return Err(ConfigError::ValidationError(
                "filter.edge_threshold must be >= 0".into(),
            ));
        }
        if !(0.0..=255.0).contains(&self.highlight_threshold) {
            return Err(ConfigError::ValidationError(
                "filter.highlight_threshold must be between 0 and 255".into(),
            ));
        }
        if !(0.0..=255.0).contains(&self.shadow_threshold) {
            return Err(ConfigError::ValidationError(
                "filter.shadow_threshold must be between 0 and 255".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.desaturation) {
            return Err(ConfigError::ValidationError(
                "filter.desaturation must be between 0.0 and 1.0".into(),
            ));
        }
        if self.contrast <= 0.0 {
            return Err(ConfigError::ValidationError(
                "filter.contrast must be > 0".into(),
            ));
        }
        if self.brightness <= 0.0 {
            return Err(ConfigError::ValidationError(
                "filter.brightness must be > 0".into(),
            ));
        }
        if self.edge_sharpness <= 0.0 {
            return Err(ConfigError::ValidationError(
                "filter.edge_sharpness must be > 0".into(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.filter.validate()?;

        if self.processing.max_dimension < 3 {
            return Err(ConfigError::ValidationError(
                "processing.max_dimension must be >= 3".into(),
            ));
        }
        if self.processing.jpeg_quality == 0 || self.processing.jpeg_quality > 100 {
            return Err(ConfigError::ValidationError(
                "processing.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.limits.decode_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.decode_timeout_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}
