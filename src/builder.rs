use std::time::Duration;

use crate::api::{RecipeApi, SpoonacularClient};
use crate::config::{ApiConfig, AppConfig, SearchMode};
use crate::error::RecipeError;
use crate::export::ExportOptions;
use crate::workflow::{RecipeWorkflow, WorkflowOptions};

/// Builder for configuring a [`RecipeWorkflow`]
#[derive(Default)]
pub struct WorkflowBuilder {
    api: Option<Box<dyn RecipeApi>>,
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    page_size: Option<u32>,
    include_spices: Option<bool>,
    search_mode: Option<SearchMode>,
    case_sensitive: Option<bool>,
    number_steps: Option<bool>,
}

impl WorkflowBuilder {
    /// Start from loaded configuration; later calls override it
    ///
    /// # Example
    /// ```
    /// use recipe_mixer::{AppConfig, RecipeWorkflow};
    ///
    /// let builder = RecipeWorkflow::builder()
    ///     .config(&AppConfig::default())
    ///     .api_key("your-api-key");
    /// ```
    pub fn config(mut self, config: &AppConfig) -> Self {
        self.api_key = config.api.resolve_api_key().or(self.api_key);
        self.base_url = Some(config.api.base_url.clone());
        self.timeout = Some(Duration::from_secs(config.api.timeout));
        self.page_size = Some(config.search.page_size);
        self.include_spices = Some(config.search.include_spices);
        self.search_mode = Some(config.search.search_mode);
        self.case_sensitive = Some(config.search.case_sensitive);
        self.number_steps = Some(config.export.number_steps);
        self
    }

    /// Use a custom API implementation instead of the HTTP client
    pub fn api(mut self, api: Box<dyn RecipeApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Set the API key passed with every request
    ///
    /// # Example
    /// ```
    /// use recipe_mixer::RecipeWorkflow;
    ///
    /// let builder = RecipeWorkflow::builder().api_key("your-api-key");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_mixer::RecipeWorkflow;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeWorkflow::builder()
    ///     .api_key("your-api-key")
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Number of recipes requested per search
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn include_spices(mut self, include: bool) -> Self {
        self.include_spices = Some(include);
        self
    }

    pub fn search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = Some(mode);
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }

    pub fn number_steps(mut self, number: bool) -> Self {
        self.number_steps = Some(number);
        self
    }

    /// Build the workflow
    ///
    /// # Errors
    /// Returns `RecipeError` if:
    /// - No API implementation was given and no API key is available
    /// - The page size is outside 1..=100
    /// - The timeout is zero
    /// - The HTTP client cannot be created
    pub fn build(self) -> Result<RecipeWorkflow, RecipeError> {
        let defaults = WorkflowOptions::default();
        let options = WorkflowOptions {
            page_size: self.page_size.unwrap_or(defaults.page_size),
            include_spices: self.include_spices.unwrap_or(defaults.include_spices),
            search_mode: self.search_mode.unwrap_or(defaults.search_mode),
            case_sensitive: self.case_sensitive.unwrap_or(defaults.case_sensitive),
            export: ExportOptions {
                number_steps: self.number_steps.unwrap_or(defaults.export.number_steps),
            },
        };

        if !(1..=100).contains(&options.page_size) {
            return Err(RecipeError::BuilderError(format!(
                "Page size must be between 1 and 100, got {}",
                options.page_size
            )));
        }

        if self.timeout == Some(Duration::ZERO) {
            return Err(RecipeError::BuilderError(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        let api: Box<dyn RecipeApi> = match self.api {
            Some(api) => api,
            None => {
                let api_key = self
                    .api_key
                    .or_else(|| std::env::var("SPOONACULAR_API_KEY").ok())
                    .filter(|k| !k.trim().is_empty())
                    .ok_or(RecipeError::MissingApiKey)?;
                let api_defaults = ApiConfig::default();
                let base_url = self.base_url.unwrap_or(api_defaults.base_url);
                let timeout = self
                    .timeout
                    .unwrap_or(Duration::from_secs(api_defaults.timeout));
                Box::new(SpoonacularClient::with_base_url(api_key, base_url, timeout)?)
            }
        };

        Ok(RecipeWorkflow::new(api, options))
    }
}

impl RecipeWorkflow {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use recipe_mixer::RecipeWorkflow;
    ///
    /// let builder = RecipeWorkflow::builder();
    /// ```
    pub fn builder() -> WorkflowBuilder {
        WorkflowBuilder::default()
    }
}
