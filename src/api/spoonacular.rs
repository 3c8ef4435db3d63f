use crate::api::RecipeApi;
use crate::config::ApiConfig;
use crate::error::RecipeError;
use crate::model::{RecipeDetail, RecipeSummary};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("recipe-mixer/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct ComplexSearchResponse {
    #[serde(default)]
    results: Vec<RecipeDetail>,
}

#[derive(Deserialize)]
struct RandomResponse {
    #[serde(default)]
    recipes: Vec<RecipeDetail>,
}

pub struct SpoonacularClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SpoonacularClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self, RecipeError> {
        let api_key = config.resolve_api_key().ok_or(RecipeError::MissingApiKey)?;
        Self::with_base_url(api_key, config.base_url.clone(), Duration::from_secs(config.timeout))
    }

    pub fn with_base_url(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, RecipeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(SpoonacularClient {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RecipeError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RecipeError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RecipeApi for SpoonacularClient {
    fn api_name(&self) -> &str {
        "spoonacular"
    }

    async fn search_by_ingredients(
        &self,
        items: &[String],
        number: u32,
    ) -> Result<Vec<RecipeSummary>, RecipeError> {
        self.get(
            "/recipes/findByIngredients",
            &[("ingredients", items.join(",")), ("number", number.to_string())],
        )
        .await
    }

    async fn recipe_information(&self, recipe_id: u64) -> Result<RecipeDetail, RecipeError> {
        self.get(&format!("/recipes/{}/information", recipe_id), &[])
            .await
    }

    async fn search_text(
        &self,
        query: &str,
        number: u32,
    ) -> Result<Vec<RecipeSummary>, RecipeError> {
        let response: ComplexSearchResponse = self
            .get(
                "/recipes/complexSearch",
                &[
                    ("query", query.to_string()),
                    ("number", number.to_string()),
                    ("addRecipeInformation", "true".to_string()),
                ],
            )
            .await?;

        Ok(response.results.into_iter().map(RecipeSummary::from).collect())
    }

    async fn random(&self, number: u32) -> Result<Vec<RecipeSummary>, RecipeError> {
        let response: RandomResponse = self
            .get("/recipes/random", &[("number", number.to_string())])
            .await?;

        Ok(response.recipes.into_iter().map(RecipeSummary::from).collect())
    }
}
