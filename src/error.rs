use thiserror::Error;

/// Errors that can occur while searching, fetching or exporting recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Request could not be sent or the response body could not be read
    #[error("Failed to fetch from recipe API: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Recipe API answered with a non-success status
    #[error("Recipe API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    /// Response body was not the JSON shape we expect
    #[error("Failed to decode recipe API response: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// Writing an exported recipe failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// No API key in config or environment
    #[error("No API key found. Set api.api_key in recipe-mixer.toml or SPOONACULAR_API_KEY")]
    MissingApiKey,

    /// Caller passed a value the workflow cannot use
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Export requested before any recipe detail was fetched
    #[error("No recipe detail loaded; fetch a recipe before exporting")]
    NoDetail,
}

impl RecipeError {
    /// Whether retrying the same action may succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RecipeError::FetchError(_) | RecipeError::ApiError { .. } | RecipeError::DecodeError(_)
        )
    }
}
