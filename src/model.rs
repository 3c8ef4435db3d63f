use serde::{Deserialize, Deserializer, Serialize};

/// The API sends `null` for scalars it has no value for; read those as the
/// type's default just like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// An ingredient line as the recipe API describes it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDescriptor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Free-text form, e.g. "2 large eggs, beaten"
    #[serde(default, deserialize_with = "null_as_default")]
    pub original: String,
}

impl IngredientDescriptor {
    /// Text used when listing the ingredient; falls back to the bare name
    pub fn display_text(&self) -> &str {
        if self.original.trim().is_empty() {
            &self.name
        } else {
            &self.original
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionStep {
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub step: String,
}

/// One group of analyzed steps. Most recipes have a single unnamed block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<InstructionStep>,
}

/// Full recipe record. Every list is optional because the API leaves
/// fields out depending on the endpoint and the recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default)]
    pub extended_ingredients: Option<Vec<IngredientDescriptor>>,
    #[serde(default)]
    pub analyzed_instructions: Option<Vec<InstructionBlock>>,
    /// Raw instructions, frequently HTML
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub used_ingredients: Option<Vec<IngredientDescriptor>>,
    #[serde(default)]
    pub missed_ingredients: Option<Vec<IngredientDescriptor>>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// A search hit. `detail` is filled when the endpoint already returned the
/// full record (free-text search, random suggestions).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub used_ingredients: Vec<IngredientDescriptor>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missed_ingredients: Vec<IngredientDescriptor>,
    #[serde(skip)]
    pub detail: Option<RecipeDetail>,
}

impl RecipeSummary {
    pub fn new(id: u64, title: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            image: image.into(),
            ..Default::default()
        }
    }

    /// Detail to export straight from a result card, without a detail fetch
    pub fn to_detail(&self) -> RecipeDetail {
        if let Some(detail) = &self.detail {
            return detail.clone();
        }

        let non_empty = |list: &Vec<IngredientDescriptor>| {
            if list.is_empty() {
                None
            } else {
                Some(list.clone())
            }
        };

        RecipeDetail {
            id: self.id,
            title: self.title.clone(),
            image: self.image.clone(),
            used_ingredients: non_empty(&self.used_ingredients),
            missed_ingredients: non_empty(&self.missed_ingredients),
            ..Default::default()
        }
    }
}

impl From<RecipeDetail> for RecipeSummary {
    fn from(detail: RecipeDetail) -> Self {
        RecipeSummary {
            id: detail.id,
            title: detail.title.clone(),
            image: detail.image.clone(),
            used_ingredients: detail.used_ingredients.clone().unwrap_or_default(),
            missed_ingredients: detail.missed_ingredients.clone().unwrap_or_default(),
            detail: Some(detail),
        }
    }
}

/// What the results area should show
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultList {
    /// Nothing searched yet; show the initial prompt
    #[default]
    NotSearched,
    /// A search completed; an empty list means "no results"
    Ready(Vec<RecipeSummary>),
}

impl ResultList {
    pub fn summaries(&self) -> &[RecipeSummary] {
        match self {
            ResultList::NotSearched => &[],
            ResultList::Ready(list) => list,
        }
    }

    pub fn is_searched(&self) -> bool {
        matches!(self, ResultList::Ready(_))
    }

    pub fn contains(&self, recipe_id: u64) -> bool {
        self.summaries().iter().any(|s| s.id == recipe_id)
    }

    pub fn find(&self, recipe_id: u64) -> Option<&RecipeSummary> {
        self.summaries().iter().find(|s| s.id == recipe_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_find_by_ingredients_payload() {
        let json = r#"[{
            "id": 641803,
            "title": "Easy & Delish! ~ Apple Crumble ~",
            "image": "https://img.spoonacular.com/recipes/641803-312x231.jpg",
            "imageType": "jpg",
            "usedIngredientCount": 1,
            "missedIngredientCount": 2,
            "missedIngredients": [
                {"id": 1001, "name": "butter", "original": "1 1/2 sticks butter", "amount": 1.5}
            ],
            "usedIngredients": [
                {"id": 9003, "name": "apples", "original": "3 apples"}
            ],
            "likes": 1
        }]"#;

        let hits: Vec<RecipeSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 641803);
        assert_eq!(hits[0].missed_ingredients[0].original, "1 1/2 sticks butter");
        assert_eq!(hits[0].used_ingredients[0].name, "apples");
        assert!(hits[0].detail.is_none());
    }

    #[test]
    fn test_detail_tolerates_missing_fields() {
        let detail: RecipeDetail = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(detail.id, 7);
        assert_eq!(detail.title, "");
        assert!(detail.extended_ingredients.is_none());
        assert!(detail.analyzed_instructions.is_none());
        assert!(detail.instructions.is_none());
    }

    #[test]
    fn test_detail_null_lists_are_none() {
        let detail: RecipeDetail = serde_json::from_str(
            r#"{"id": 7, "title": "Toast", "extendedIngredients": null, "instructions": null}"#,
        )
        .unwrap();
        assert!(detail.extended_ingredients.is_none());
        assert!(detail.instructions.is_none());
    }

    #[test]
    fn test_null_scalars_read_as_defaults() {
        let json = r#"{
            "id": 1,
            "title": "T",
            "image": null,
            "extendedIngredients": [
                {"id": null, "name": null, "original": "1 cup rice"}
            ],
            "analyzedInstructions": [
                {"name": null, "steps": [
                    {"number": null, "step": null},
                    {"number": 2, "step": "Boil"}
                ]}
            ]
        }"#;

        let detail: RecipeDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.image, "");
        let ingredients = detail.extended_ingredients.unwrap();
        assert_eq!(ingredients[0].id, 0);
        assert_eq!(ingredients[0].name, "");
        assert_eq!(ingredients[0].display_text(), "1 cup rice");
        let blocks = detail.analyzed_instructions.unwrap();
        assert_eq!(blocks[0].name, "");
        assert_eq!(blocks[0].steps[0], InstructionStep::default());
        assert_eq!(blocks[0].steps[1].step, "Boil");

        let hits: Vec<RecipeSummary> = serde_json::from_str(
            r#"[{"id": 2, "title": null, "image": null, "usedIngredients": null}]"#,
        )
        .unwrap();
        assert_eq!(hits[0].title, "");
        assert!(hits[0].used_ingredients.is_empty());
    }

    #[test]
    fn test_summary_from_detail_keeps_inline_detail() {
        let detail = RecipeDetail {
            id: 3,
            title: "Pancakes".to_string(),
            image: "p.jpg".to_string(),
            instructions: Some("Fry.".to_string()),
            ..Default::default()
        };
        let summary = RecipeSummary::from(detail.clone());
        assert_eq!(summary.title, "Pancakes");
        assert_eq!(summary.to_detail(), detail);
    }

    #[test]
    fn test_to_detail_without_inline_uses_hit_ingredients() {
        let mut summary = RecipeSummary::new(9, "Omelette", "u");
        summary.missed_ingredients.push(IngredientDescriptor {
            id: 1,
            name: "chives".to_string(),
            original: "a few chives".to_string(),
        });
        let detail = summary.to_detail();
        assert_eq!(detail.title, "Omelette");
        assert!(detail.used_ingredients.is_none());
        assert_eq!(detail.missed_ingredients.unwrap().len(), 1);
    }

    #[test]
    fn test_display_text_falls_back_to_name() {
        let ingredient = IngredientDescriptor {
            id: 1,
            name: "salt".to_string(),
            original: "  ".to_string(),
        };
        assert_eq!(ingredient.display_text(), "salt");
    }

    #[test]
    fn test_result_list_states() {
        let empty = ResultList::Ready(vec![]);
        assert!(empty.is_searched());
        assert!(!ResultList::NotSearched.is_searched());
        assert_ne!(empty, ResultList::NotSearched);

        let list = ResultList::Ready(vec![RecipeSummary::new(1, "Omelette", "u")]);
        assert!(list.contains(1));
        assert!(!list.contains(2));
        assert_eq!(list.find(1).map(|s| s.title.as_str()), Some("Omelette"));
    }
}
