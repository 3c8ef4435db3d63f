use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::catalog;
use crate::error::RecipeError;

/// Top-level configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Recipe API connection settings
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// API key (can also be set via SPOONACULAR_API_KEY)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for proxies or test servers)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl ApiConfig {
    /// Key from config first, then the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("SPOONACULAR_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Which endpoint `search` goes to
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    ByIngredients,
    ByFreeText,
}

impl SearchMode {
    /// What to show before anything has been searched in this mode
    pub fn prompt(&self) -> &'static str {
        match self {
            SearchMode::ByIngredients => "Select at least one ingredient or spice to search.",
            SearchMode::ByFreeText => "Enter a dish name to search.",
        }
    }
}

/// Workflow variant flags
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Number of recipes requested per search
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Whether selected spices are part of the query
    #[serde(default = "default_true")]
    pub include_spices: bool,
    #[serde(default)]
    pub search_mode: SearchMode,
    /// Exact label matching when toggling items
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            include_spices: true,
            search_mode: SearchMode::default(),
            case_sensitive: true,
        }
    }
}

/// Text export settings
#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Directory exported recipes are written to
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,
    /// Prefix instruction steps with their number
    #[serde(default)]
    pub number_steps: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
            number_steps: false,
        }
    }
}

/// Items offered for selection
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_ingredients")]
    pub ingredients: Vec<String>,
    #[serde(default = "default_spices")]
    pub spices: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            ingredients: default_ingredients(),
            spices: default_spices(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_ingredients() -> Vec<String> {
    catalog::INGREDIENTS.iter().map(|s| s.to_string()).collect()
}

fn default_spices() -> Vec<String> {
    catalog::SPICES.iter().map(|s| s.to_string()).collect()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_MIXER__ prefix
    /// 2. recipe-mixer.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_MIXER__SEARCH__PAGE_SIZE
    pub fn load() -> Result<Self, RecipeError> {
        let config = load_config()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RecipeError> {
        if self.search.page_size == 0 || self.search.page_size > 100 {
            return Err(RecipeError::InvalidInput(format!(
                "search.page_size must be between 1 and 100, got {}",
                self.search.page_size
            )));
        }
        if self.api.timeout == 0 {
            return Err(RecipeError::InvalidInput(
                "api.timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

/// Read `recipe-mixer.toml` (optional) and `RECIPE_MIXER__*` variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-mixer").required(false))
        // Use double underscore for nested: RECIPE_MIXER__API__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_MIXER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_base_url(), "https://api.spoonacular.com");
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_page_size(), 5);
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.search.page_size, 5);
        assert!(config.search.include_spices);
        assert!(config.search.case_sensitive);
        assert_eq!(config.search.search_mode, SearchMode::ByIngredients);
        assert!(!config.export.number_steps);
        assert_eq!(config.catalog.ingredients.len(), catalog::INGREDIENTS.len());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                r#"
                [api]
                api_key = "abc"

                [search]
                page_size = 4
                include_spices = false
                search_mode = "by_free_text"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.api.api_key.as_deref(), Some("abc"));
        assert_eq!(config.api.base_url, "https://api.spoonacular.com");
        assert_eq!(config.search.page_size, 4);
        assert!(!config.search.include_spices);
        assert_eq!(config.search.search_mode, SearchMode::ByFreeText);
        assert!(config.search.case_sensitive);
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = AppConfig::default();
        config.search.page_size = 0;
        assert!(matches!(
            config.validate(),
            Err(RecipeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_configured_key_wins() {
        let api = ApiConfig {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };
        assert_eq!(api.resolve_api_key().as_deref(), Some("from-config"));
    }

    #[test]
    fn test_search_mode_prompts_differ() {
        assert_eq!(
            SearchMode::ByIngredients.prompt(),
            "Select at least one ingredient or spice to search."
        );
        assert_eq!(SearchMode::ByFreeText.prompt(), "Enter a dish name to search.");
    }

    // Both cases live in one test since the process environment is shared
    // between test threads.
    #[test]
    fn test_load_config_defaults_and_env_overrides() {
        let ours: Vec<String> = std::env::vars()
            .map(|(k, _)| k)
            .filter(|k| k.starts_with("RECIPE_MIXER__"))
            .collect();
        for key in &ours {
            std::env::remove_var(key);
        }

        let config = load_config().unwrap();
        assert_eq!(config.search.page_size, 5);
        assert!(config.search.include_spices);
        assert_eq!(config.api.base_url, "https://api.spoonacular.com");
        assert_eq!(config.api.timeout, 30);

        std::env::set_var("RECIPE_MIXER__SEARCH__PAGE_SIZE", "4");
        std::env::set_var("RECIPE_MIXER__SEARCH__INCLUDE_SPICES", "false");
        let result = load_config();
        std::env::remove_var("RECIPE_MIXER__SEARCH__PAGE_SIZE");
        std::env::remove_var("RECIPE_MIXER__SEARCH__INCLUDE_SPICES");

        let config = result.unwrap();
        assert_eq!(config.search.page_size, 4);
        assert!(!config.search.include_spices);
        assert!(config.search.case_sensitive);
    }
}
