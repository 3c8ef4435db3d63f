mod spoonacular;

pub use spoonacular::SpoonacularClient;

use crate::error::RecipeError;
use crate::model::{RecipeDetail, RecipeSummary};
use async_trait::async_trait;

/// Remote recipe database the workflow searches
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Get the backend name (e.g., "spoonacular")
    fn api_name(&self) -> &str;

    /// Recipes using the given items; `items` are sent comma-joined
    async fn search_by_ingredients(
        &self,
        items: &[String],
        number: u32,
    ) -> Result<Vec<RecipeSummary>, RecipeError>;

    /// Full record for one recipe
    async fn recipe_information(&self, recipe_id: u64) -> Result<RecipeDetail, RecipeError>;

    /// Free-text search; hits carry their detail inline
    async fn search_text(&self, query: &str, number: u32)
        -> Result<Vec<RecipeSummary>, RecipeError>;

    /// Random suggestions; hits carry their detail inline
    async fn random(&self, number: u32) -> Result<Vec<RecipeSummary>, RecipeError>;
}
