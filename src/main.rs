use clap::{Parser, Subcommand};
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;

use recipe_mixer::{
    format_export, AppConfig, DirectorySink, RecipeError, RecipeWorkflow, ResultList,
    SearchMode, Toggle,
};

#[derive(Parser)]
#[command(name = "recipe-mixer")]
#[command(version)]
#[command(about = "Find recipes for the ingredients you have and download them as text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the ingredients and spices you can pick from
    Catalog,

    /// Search recipes by selected ingredients and spices
    Search {
        /// Ingredient to include (repeatable)
        #[arg(short, long = "ingredient")]
        ingredients: Vec<String>,

        /// Spice to include (repeatable)
        #[arg(short, long = "spice")]
        spices: Vec<String>,

        /// Number of recipes to request
        #[arg(short, long)]
        number: Option<u32>,

        /// Also print the first recipe in full
        #[arg(long)]
        details: bool,
    },

    /// Search recipes by free text, e.g. a dish name
    Find {
        query: String,

        #[arg(short, long)]
        number: Option<u32>,
    },

    /// Show a few random recipes
    Random {
        #[arg(short, long)]
        number: Option<u32>,
    },

    /// Print one recipe as text
    Show {
        id: u64,

        /// Prefix steps with their number
        #[arg(long)]
        numbered: bool,
    },

    /// Save one recipe as <title>.txt
    Download {
        id: u64,

        /// Target directory (defaults to export.directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        #[arg(long)]
        numbered: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), RecipeError> {
    let config = AppConfig::load()?;
    debug!(
        "Using {} with page size {}",
        config.api.base_url, config.search.page_size
    );

    match cli.command {
        Commands::Catalog => {
            println!("Ingredients:");
            for item in &config.catalog.ingredients {
                println!("  {}", item);
            }
            println!("\nSpices:");
            for item in &config.catalog.spices {
                println!("  {}", item);
            }
        }

        Commands::Search {
            ingredients,
            spices,
            number,
            details,
        } => {
            let workflow = build_workflow(&config, number, SearchMode::ByIngredients, false)?;
            for item in &ingredients {
                if workflow.toggle_ingredient(item).await == Toggle::Ignored {
                    eprintln!("Ignoring blank ingredient");
                }
            }
            for item in &spices {
                if workflow.toggle_spice(item).await == Toggle::Ignored {
                    eprintln!("Ignoring blank spice");
                }
            }

            workflow.search().await?;
            let results = workflow.results().await;
            print_results(&results, SearchMode::ByIngredients);

            if details {
                if let Some(first) = results.summaries().first() {
                    workflow.fetch_detail(first.id).await?;
                    if let Some(detail) = workflow.detail().await {
                        println!();
                        print!("{}", format_export(&detail, &workflow.options().export));
                    }
                }
            }
        }

        Commands::Find { query, number } => {
            let workflow = build_workflow(&config, number, SearchMode::ByFreeText, false)?;
            workflow.set_query(query).await;
            workflow.search().await?;
            print_results(&workflow.results().await, SearchMode::ByFreeText);
        }

        Commands::Random { number } => {
            let workflow = build_workflow(&config, number, config.search.search_mode, false)?;
            workflow.suggest().await?;
            print_results(&workflow.results().await, workflow.options().search_mode);
        }

        Commands::Show { id, numbered } => {
            let workflow = build_workflow(&config, None, config.search.search_mode, numbered)?;
            workflow.fetch_detail(id).await?;
            let detail = workflow.detail().await.ok_or(RecipeError::NoDetail)?;
            print!("{}", format_export(&detail, &workflow.options().export));
        }

        Commands::Download { id, dir, numbered } => {
            let workflow = build_workflow(&config, None, config.search.search_mode, numbered)?;
            workflow.fetch_detail(id).await?;
            let sink = DirectorySink::new(dir.unwrap_or_else(|| config.export.directory.clone()));
            let path = workflow.export_detail(&sink).await?;
            println!("Saved {}", path.display());
        }
    }

    Ok(())
}

fn build_workflow(
    config: &AppConfig,
    number: Option<u32>,
    mode: SearchMode,
    numbered: bool,
) -> Result<RecipeWorkflow, RecipeError> {
    let mut builder = RecipeWorkflow::builder().config(config).search_mode(mode);
    if let Some(number) = number {
        builder = builder.page_size(number);
    }
    if numbered {
        builder = builder.number_steps(true);
    }
    builder.build()
}

fn print_results(results: &ResultList, mode: SearchMode) {
    match results {
        ResultList::NotSearched => println!("{}", mode.prompt()),
        ResultList::Ready(list) if list.is_empty() => {
            println!("No results found. Please try a different search.")
        }
        ResultList::Ready(list) => {
            for recipe in list {
                println!("{:>8}  {}", recipe.id, recipe.title);
            }
        }
    }
}
