use serde::{Deserialize, Serialize};

/// Recipes requested from a free-form ingredient list.
pub const INGREDIENT_SEARCH_RESULTS: u32 = 5;

/// Recipes requested when recommending from the fridge contents.
pub const RECOMMENDATION_RESULTS: u32 = 10;

/// Recipes requested by a complex search.
pub const COMPLEX_SEARCH_RESULTS: u32 = 3;

/// Query parameters of the recipe search page. Every field is optional.
/// Missing fields are sent upstream as empty strings; intolerances go
/// through `intolerance_list`, which drops blank entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeSearch {
    pub recipe: String,
    pub cuisine: String,
    pub diet: String,
    pub intolerances: String,
    pub recipe_type: String,
}

impl RecipeSearch {
    /// Intolerances normalised to a comma-separated list without blanks.
    pub fn intolerance_list(&self) -> String {
        self.intolerances
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Parse a comma-separated list of numeric recipe ids, keeping only valid ones.
pub fn parse_ids(ids: &str) -> Vec<u64> {
    ids.split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intolerance_list_drops_blanks() {
        let search = RecipeSearch {
            intolerances: "dairy, ,gluten,".into(),
            ..Default::default()
        };
        assert_eq!(search.intolerance_list(), "dairy,gluten");
        assert_eq!(RecipeSearch::default().intolerance_list(), "");
    }

    #[test]
    fn search_deserializes_partial_query() {
        let search: RecipeSearch =
            serde_json::from_str(r#"{"recipe":"pasta","recipe_type":"main course"}"#).unwrap();
        assert_eq!(search.recipe, "pasta");
        assert_eq!(search.recipe_type, "main course");
        assert!(search.cuisine.is_empty());
    }

    #[test]
    fn parse_ids_skips_garbage() {
        assert_eq!(parse_ids("715538, 716429,abc,,12"), vec![715538, 716429, 12]);
        assert!(parse_ids("").is_empty());
    }
}
