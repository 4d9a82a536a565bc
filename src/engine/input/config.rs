// Input mapper configuration

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "snex-react-input-mapper";

/// Configuration for an `InputMapper`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    /// Key the mapping is persisted under
    pub storage_key: String,

    /// Where the controller diagram comes from (path or URL)
    pub diagram_source: String,
}

impl MapperConfig {
    /// Create a configuration with the default storage key
    pub fn new(diagram_source: impl Into<String>) -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            diagram_source: diagram_source.into(),
        }
    }

    /// Persist under a different storage key
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_storage_key() {
        let config = MapperConfig::new("controller.svg");
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.diagram_source, "controller.svg");
    }

    #[test]
    fn test_with_storage_key() {
        let config = MapperConfig::new("controller.svg").with_storage_key("player-2");
        assert_eq!(config.storage_key, "player-2");
    }
}
