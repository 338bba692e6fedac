//! Configuration loading and management

use crate::core::AccessPolicy;
use crate::core::error::ConfigError;
use crate::query::QueryState;
use crate::query::state::DEFAULT_PAGE_SIZE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every resource path is appended to
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Configuration for one list screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Resource name of the record type (e.g., "products")
    pub resource: String,

    /// Rows per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Initial sort, `field` or `field:asc|desc`
    #[serde(default)]
    pub sort: Option<String>,

    /// Overrides the record type's searchable fields
    #[serde(default)]
    pub search_fields: Option<Vec<String>>,

    /// Access policy (`public`, `authenticated`, `admin_only`, `role:a,b`, ...)
    #[serde(default)]
    pub access: Option<String>,
}

impl ScreenConfig {
    pub fn new(resource: &str) -> Self {
        Self {
            resource: resource.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            search_fields: None,
            access: None,
        }
    }

    /// Initial query state for the screen
    pub fn initial_state(&self) -> Result<QueryState, ConfigError> {
        let mut state = QueryState::new(self.page_size);
        if let Some(sort) = &self.sort {
            state.parse_sort(sort)?;
        }
        Ok(state)
    }

    /// Access policy for the screen, `authenticated` when unset
    pub fn access_policy(&self) -> AccessPolicy {
        self.access
            .as_deref()
            .map(AccessPolicy::parse_policy)
            .unwrap_or(AccessPolicy::Authenticated)
    }
}

/// Complete console configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,

    /// Per-screen settings
    #[serde(default)]
    pub screens: Vec<ScreenConfig>,
}

impl ConsoleConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the screens cannot work with
    pub fn validate(&self) -> Result<()> {
        for screen in &self.screens {
            if screen.page_size == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "page_size".to_string(),
                    value: "0".to_string(),
                    message: format!("screen '{}' needs at least one row", screen.resource),
                }
                .into());
            }
            screen
                .initial_state()
                .with_context(|| format!("invalid sort for screen '{}'", screen.resource))?;
        }
        Ok(())
    }

    /// Find the settings of a screen
    pub fn screen(&self, resource: &str) -> Option<&ScreenConfig> {
        self.screens.iter().find(|s| s.resource == resource)
    }

    /// Settings of a screen, falling back to defaults when unconfigured
    pub fn screen_or_default(&self, resource: &str) -> ScreenConfig {
        self.screen(resource)
            .cloned()
            .unwrap_or_else(|| ScreenConfig::new(resource))
    }

    /// Create a default configuration with one screen per record type
    pub fn default_config() -> Self {
        let mut users = ScreenConfig::new("users");
        users.access = Some("admin_only".to_string());

        let mut purchase_orders = ScreenConfig::new("purchase-orders");
        purchase_orders.sort = Some("created_at:desc".to_string());

        Self {
            api: ApiConfig::default(),
            screens: vec![
                ScreenConfig::new("products"),
                ScreenConfig::new("vendors"),
                ScreenConfig::new("warehouses"),
                ScreenConfig::new("venues"),
                ScreenConfig::new("events"),
                purchase_orders,
                ScreenConfig::new("requests"),
                ScreenConfig::new("orders"),
                ScreenConfig::new("returns"),
                users,
            ],
        }
    }
}
