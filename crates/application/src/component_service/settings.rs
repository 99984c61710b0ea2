use recordstep_core::{AppResult, NonEmptyString};

/// Component name reported when none is configured.
pub const DEFAULT_COMPONENT_NAME: &str = "template_component";

/// Component version reported when none is configured.
pub const DEFAULT_COMPONENT_VERSION: &str = "v1.0.0";

/// Search filter used for the configuration pre-fetch.
pub const DEFAULT_CONFIG_FILTER: &str = "component_config";

/// Identity and lookup settings injected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSettings {
    name: String,
    version: String,
    config_filter: String,
}

impl ComponentSettings {
    /// Creates settings with a validated name and version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?.into(),
            version: NonEmptyString::new(version)?.into(),
            config_filter: DEFAULT_CONFIG_FILTER.to_owned(),
        })
    }

    /// Replaces the configuration search filter.
    pub fn with_config_filter(mut self, filter: impl Into<String>) -> AppResult<Self> {
        self.config_filter = NonEmptyString::new(filter)?.into();
        Ok(self)
    }

    /// Returns the component name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the component version.
    #[must_use]
    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    /// Returns the configuration search filter.
    #[must_use]
    pub fn config_filter(&self) -> &str {
        self.config_filter.as_str()
    }
}

impl Default for ComponentSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_COMPONENT_NAME.to_owned(),
            version: DEFAULT_COMPONENT_VERSION.to_owned(),
            config_filter: DEFAULT_CONFIG_FILTER.to_owned(),
        }
    }
}
