use log::{debug, error, info, warn};
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::api::RecipeApi;
use crate::config::SearchMode;
use crate::error::RecipeError;
use crate::export::{export_to_file, ExportOptions, TextSink};
use crate::model::{RecipeDetail, RecipeSummary, ResultList};
use crate::selection::{SelectionSet, Toggle};
use crate::state::{Applied, Ticket, WorkflowState};

/// Variant flags for one workflow instance
#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    pub page_size: u32,
    pub include_spices: bool,
    pub search_mode: SearchMode,
    pub case_sensitive: bool,
    pub export: ExportOptions,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            page_size: 5,
            include_spices: true,
            search_mode: SearchMode::ByIngredients,
            case_sensitive: true,
            export: ExportOptions::default(),
        }
    }
}

/// Outcome of a search-like operation that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Nothing to search for; no request made
    Skipped,
    /// Result list replaced with `count` recipes
    Applied { count: usize },
    /// A newer search finished first; this response was dropped
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailStatus {
    Applied,
    Stale,
}

/// Selection, search, detail and export for one user session
pub struct RecipeWorkflow {
    api: Box<dyn RecipeApi>,
    options: WorkflowOptions,
    state: Mutex<WorkflowState>,
}

impl RecipeWorkflow {
    pub fn new(api: Box<dyn RecipeApi>, options: WorkflowOptions) -> Self {
        let state = WorkflowState::new(options.case_sensitive);
        Self {
            api,
            options,
            state: Mutex::new(state),
        }
    }

    pub fn options(&self) -> &WorkflowOptions {
        &self.options
    }

    pub fn api_name(&self) -> &str {
        self.api.api_name()
    }

    pub async fn toggle_ingredient(&self, item: &str) -> Toggle {
        self.state.lock().await.toggle_ingredient(item)
    }

    pub async fn toggle_spice(&self, item: &str) -> Toggle {
        self.state.lock().await.toggle_spice(item)
    }

    pub async fn clear_selections(&self) {
        self.state.lock().await.clear_selections();
    }

    /// Query used by `search` in free-text mode
    pub async fn set_query(&self, query: impl Into<String>) {
        self.state.lock().await.query = query.into();
    }

    pub async fn query(&self) -> String {
        self.state.lock().await.query.clone()
    }

    pub async fn ingredients(&self) -> SelectionSet {
        self.state.lock().await.ingredients.clone()
    }

    pub async fn spices(&self) -> SelectionSet {
        self.state.lock().await.spices.clone()
    }

    pub async fn results(&self) -> ResultList {
        self.state.lock().await.results().clone()
    }

    pub async fn detail(&self) -> Option<RecipeDetail> {
        self.state.lock().await.detail().cloned()
    }

    /// Run a search in the configured mode
    ///
    /// By ingredients, the combined selection is sent comma-joined. An empty
    /// selection is a no-op that leaves the current results untouched. On
    /// failure the previous results stay in place and the error is returned
    /// so the caller can offer a retry.
    pub async fn search(&self) -> Result<SearchStatus, RecipeError> {
        match self.options.search_mode {
            SearchMode::ByIngredients => self.search_by_ingredients().await,
            SearchMode::ByFreeText => {
                let query = self.query().await;
                self.search_text(&query).await
            }
        }
    }

    async fn search_by_ingredients(&self) -> Result<SearchStatus, RecipeError> {
        let (items, ticket) = {
            let mut state = self.state.lock().await;
            let items = state.combined(self.options.include_spices);
            if items.is_empty() {
                debug!("Search skipped: nothing selected");
                return Ok(SearchStatus::Skipped);
            }
            (items, state.begin_search())
        };

        info!("Searching recipes for {}", items.join(","));
        let result = self
            .api
            .search_by_ingredients(&items, self.options.page_size)
            .await;
        self.finish_search(ticket, result).await
    }

    /// Free-text search; a blank query is a no-op
    pub async fn search_text(&self, query: &str) -> Result<SearchStatus, RecipeError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Search skipped: empty query");
            return Ok(SearchStatus::Skipped);
        }

        let ticket = self.state.lock().await.begin_search();
        info!("Searching recipes matching '{}'", query);
        let result = self.api.search_text(query, self.options.page_size).await;
        self.finish_search(ticket, result).await
    }

    /// Replace the results with random suggestions
    pub async fn suggest(&self) -> Result<SearchStatus, RecipeError> {
        let ticket = self.state.lock().await.begin_search();
        info!("Fetching {} random recipes", self.options.page_size);
        let result = self.api.random(self.options.page_size).await;
        self.finish_search(ticket, result).await
    }

    async fn finish_search(
        &self,
        ticket: Ticket,
        result: Result<Vec<RecipeSummary>, RecipeError>,
    ) -> Result<SearchStatus, RecipeError> {
        let summaries = match result {
            Ok(summaries) => summaries,
            Err(e) => {
                if !self.state.lock().await.is_current(ticket) {
                    debug!("Ignoring failure of superseded search #{}: {}", ticket.seq, e);
                    return Ok(SearchStatus::Stale);
                }
                error!("Error fetching recipes: {}", e);
                return Err(e);
            }
        };

        let count = summaries.len();
        match self.state.lock().await.finish_search(ticket, summaries) {
            Applied::Yes => {
                debug!("Result list replaced with {} recipes", count);
                Ok(SearchStatus::Applied { count })
            }
            Applied::Stale => {
                debug!("Dropping stale search response #{}", ticket.seq);
                Ok(SearchStatus::Stale)
            }
        }
    }

    /// Fetch one recipe's detail. Always hits the API; nothing is cached.
    pub async fn fetch_detail(&self, recipe_id: u64) -> Result<DetailStatus, RecipeError> {
        let ticket = {
            let mut state = self.state.lock().await;
            if !state.results().contains(recipe_id) {
                warn!("Recipe {} is not in the current results", recipe_id);
            }
            state.begin_detail()
        };

        let detail = match self.api.recipe_information(recipe_id).await {
            Ok(detail) => detail,
            Err(e) => {
                if !self.state.lock().await.is_current(ticket) {
                    debug!("Ignoring failure of superseded detail fetch for {}: {}", recipe_id, e);
                    return Ok(DetailStatus::Stale);
                }
                error!("Error fetching the recipe details for {}: {}", recipe_id, e);
                return Err(e);
            }
        };

        match self.state.lock().await.finish_detail(ticket, detail) {
            Applied::Yes => Ok(DetailStatus::Applied),
            Applied::Stale => {
                debug!("Dropping stale detail response for {}", recipe_id);
                Ok(DetailStatus::Stale)
            }
        }
    }

    /// Export the currently shown detail through `sink`
    pub async fn export_detail(&self, sink: &dyn TextSink) -> Result<PathBuf, RecipeError> {
        let detail = self.detail().await.ok_or(RecipeError::NoDetail)?;
        export_to_file(&detail, sink, &self.options.export).await
    }

    /// Export a result card without fetching its detail first
    pub async fn export_summary(
        &self,
        recipe_id: u64,
        sink: &dyn TextSink,
    ) -> Result<PathBuf, RecipeError> {
        let detail = self
            .state
            .lock()
            .await
            .results()
            .find(recipe_id)
            .map(RecipeSummary::to_detail)
            .ok_or_else(|| {
                RecipeError::InvalidInput(format!(
                    "Recipe {} is not in the current results",
                    recipe_id
                ))
            })?;
        export_to_file(&detail, sink, &self.options.export).await
    }
}
