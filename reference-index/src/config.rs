use serde::{Deserialize, Serialize};

/// A territory with no standard-classified cells that must still appear as
/// a selectable state in the exception-recording flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    /// State name to force-insert
    pub primary_state: String,

    /// Scale recorded for the synthetic entry
    pub map_scale: String,
}

impl Territory {
    pub fn new(primary_state: &str, map_scale: &str) -> Self {
        Self {
            primary_state: primary_state.to_string(),
            map_scale: map_scale.to_string(),
        }
    }
}

/// Configuration for building the secondary (GNIS cell) index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryIndexConfig {
    /// Only rows whose `cell_type` starts with this prefix are indexed, so
    /// GNIS cell ids stay unique per scale / state / cell combination
    pub standard_cell_type_prefix: String,

    /// Fallback target scale when a closest-scale lookup is handed a value
    /// that does not parse as an integer
    pub default_target_scale: i64,

    /// Territories force-inserted with empty cell and GNIS fields
    pub territories: Vec<Territory>,
}

impl Default for SecondaryIndexConfig {
    fn default() -> Self {
        Self {
            standard_cell_type_prefix: "Standard".to_string(),
            default_target_scale: 24000,
            territories: vec![
                Territory::new("American Samoa", "24000"),
                Territory::new("Guam", "24000"),
                Territory::new("Federated States of Micronesia", "25000"),
                Territory::new("Northern Mariana Islands", "25000"),
                Territory::new("Republic of Palau", "25000"),
            ],
        }
    }
}

impl SecondaryIndexConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.standard_cell_type_prefix.is_empty() {
            return Err("standard_cell_type_prefix must not be empty".into());
        }

        if self.default_target_scale <= 0 {
            return Err("default_target_scale must be positive".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_is_valid() {
        let config = SecondaryIndexConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_target_scale, 24000);
        assert_eq!(config.territories.len(), 5);
    }

    #[test]
    fn empty_prefix_is_rejected() {
        let mut config = SecondaryIndexConfig::default();
        config.standard_cell_type_prefix.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_positive_default_scale_is_rejected() {
        let mut config = SecondaryIndexConfig::default();
        config.default_target_scale = 0;
        assert!(config.validate().is_err());
    }
}
