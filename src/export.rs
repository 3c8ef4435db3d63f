//! Plain-text "download recipe" export.
//!
//! The API hands back records whose fields come and go depending on the
//! endpoint, so every fallback between them lives here:
//!
//! * ingredients: `extendedIngredients`, then the used and missed lists of a
//!   by-ingredients hit, then a placeholder
//! * instructions: analyzed steps, then the raw `instructions` text with its
//!   HTML removed, then a placeholder

use async_trait::async_trait;
use log::info;
use scraper::{Html, Node};
use std::path::PathBuf;

use crate::error::RecipeError;
use crate::model::{IngredientDescriptor, RecipeDetail};

pub const NO_INGREDIENTS: &str = "No ingredients details available.";
pub const NO_INSTRUCTIONS: &str = "No instructions available.";

const BLOCK_TAGS: &[&str] = &[
    "br", "p", "div", "li", "ol", "ul", "h1", "h2", "h3", "h4", "h5", "h6", "tr",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Prefix analyzed steps with "<number>. "
    pub number_steps: bool,
}

/// Destination for exported text files
#[async_trait]
pub trait TextSink: Send + Sync {
    /// Persist `contents` under `filename`, returning where it ended up
    async fn save(&self, filename: &str, contents: &str) -> Result<PathBuf, RecipeError>;
}

/// Writes exports into a directory, creating it when missing
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl TextSink for DirectorySink {
    async fn save(&self, filename: &str, contents: &str) -> Result<PathBuf, RecipeError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(filename);
        tokio::fs::write(&path, contents).await?;
        Ok(path)
    }
}

/// Render a recipe as the downloadable text document
pub fn format_export(detail: &RecipeDetail, options: &ExportOptions) -> String {
    let ingredients = ingredient_lines(detail);
    let instructions = instruction_lines(detail, options);

    // The title must stay on one line
    let title = detail.title.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = format!("Recipe: {}\n\nIngredients:\n", title);
    if ingredients.is_empty() {
        out.push_str(NO_INGREDIENTS);
        out.push('\n');
    } else {
        for line in &ingredients {
            out.push_str("- ");
            out.push_str(line);
            out.push('\n');
        }
    }

    out.push_str("\nInstructions:\n");
    if instructions.is_empty() {
        out.push_str(NO_INSTRUCTIONS);
        out.push('\n');
    } else {
        for line in &instructions {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}

fn ingredient_lines(detail: &RecipeDetail) -> Vec<String> {
    let texts = |list: &[IngredientDescriptor]| -> Vec<String> {
        list.iter()
            .map(|i| i.display_text().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    };

    if let Some(extended) = detail.extended_ingredients.as_deref() {
        let lines = texts(extended);
        if !lines.is_empty() {
            return lines;
        }
    }

    let mut lines = texts(detail.used_ingredients.as_deref().unwrap_or_default());
    lines.extend(texts(detail.missed_ingredients.as_deref().unwrap_or_default()));
    lines
}

fn instruction_lines(detail: &RecipeDetail, options: &ExportOptions) -> Vec<String> {
    let steps: Vec<String> = detail
        .analyzed_instructions
        .iter()
        .flatten()
        .flat_map(|block| block.steps.iter())
        .filter(|s| !s.step.trim().is_empty())
        .map(|s| {
            if options.number_steps {
                format!("{}. {}", s.number, s.step.trim())
            } else {
                s.step.trim().to_string()
            }
        })
        .collect();

    if !steps.is_empty() {
        return steps;
    }

    detail
        .instructions
        .as_deref()
        .map(strip_html)
        .unwrap_or_default()
}

/// Text content of an HTML fragment, one line per block element
fn strip_html(raw: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(raw);
    let mut text = String::new();

    for node in fragment.root_element().descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if BLOCK_TAGS.contains(&e.name()) => text.push('\n'),
            _ => {}
        }
    }

    text.lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|l| !l.is_empty())
        .collect()
}

/// File name for an exported recipe: whitespace runs become `_`
pub fn export_filename(title: &str) -> String {
    let stem = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(['/', '\\'], "_");

    if stem.is_empty() {
        "recipe.txt".to_string()
    } else {
        format!("{}.txt", stem)
    }
}

/// Format `detail` and hand it to `sink`
pub async fn export_to_file(
    detail: &RecipeDetail,
    sink: &dyn TextSink,
    options: &ExportOptions,
) -> Result<PathBuf, RecipeError> {
    let contents = format_export(detail, options);
    let filename = export_filename(&detail.title);
    let path = sink.save(&filename, &contents).await?;
    info!("Saved recipe {} to {}", detail.id, path.display());
    Ok(path)
}
