//! Pick ingredients and spices, find recipes that use them, look one up and
//! download it as a text file.
//!
//! ```no_run
//! # use recipe_mixer::{DirectorySink, RecipeWorkflow};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let workflow = RecipeWorkflow::builder().api_key("your-api-key").build()?;
//! workflow.toggle_ingredient("egg").await;
//! workflow.toggle_spice("salt").await;
//! workflow.search().await?;
//!
//! if let Some(first) = workflow.results().await.summaries().first() {
//!     workflow.fetch_detail(first.id).await?;
//!     workflow.export_detail(&DirectorySink::new(".")).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod selection;
pub mod state;
pub mod workflow;

pub use api::{RecipeApi, SpoonacularClient};
pub use builder::WorkflowBuilder;
pub use config::{AppConfig, SearchMode};
pub use error::RecipeError;
pub use export::{
    export_filename, export_to_file, format_export, DirectorySink, ExportOptions, TextSink,
};
pub use model::{
    IngredientDescriptor, InstructionBlock, InstructionStep, RecipeDetail, RecipeSummary,
    ResultList,
};
pub use selection::{SelectionSet, Toggle};
pub use workflow::{DetailStatus, RecipeWorkflow, SearchStatus, WorkflowOptions};
