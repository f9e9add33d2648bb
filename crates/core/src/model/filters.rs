use crate::model::recipe::{Difficulty, Recipe, Region};

/// Optional criteria for recipe listings.
///
/// Lives in the domain layer so every storage backend applies identical
/// semantics: region and difficulty are equality matches, the query is a
/// case-insensitive substring match on the title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    query: Option<String>,
    region: Option<Region>,
    difficulty: Option<Difficulty>,
}

impl SearchFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = if query.trim().is_empty() {
            None
        } else {
            Some(query)
        };
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    #[must_use]
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.region.is_none() && self.difficulty.is_none()
    }

    /// Returns true if the recipe satisfies every present criterion.
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(region) = self.region {
            if recipe.region() != region {
                return false;
            }
        }
        if let Some(difficulty) = self.difficulty {
            if recipe.difficulty() != difficulty {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let title = recipe.title().to_lowercase();
            if !title.contains(&query.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::RecipeId;
    use crate::time::fixed_now;

    fn recipe(title: &str, region: Region, difficulty: Difficulty) -> Recipe {
        Recipe::new(
            RecipeId::random(),
            title,
            "",
            region,
            difficulty,
            30,
            2,
            None,
            Vec::new(),
            Vec::new(),
            None,
            false,
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn empty_filters_match_everything() {
        let filters = SearchFilters::new();
        assert!(filters.is_empty());
        assert!(filters.matches(&recipe("Soto Ayam", Region::Jawa, Difficulty::Easy)));
    }

    #[test]
    fn title_query_is_case_insensitive_substring() {
        let filters = SearchFilters::new().with_query("soto");
        assert!(filters.matches(&recipe("Soto Banjar", Region::Kalimantan, Difficulty::Medium)));
        assert!(!filters.matches(&recipe("Gudeg", Region::Jawa, Difficulty::Hard)));
    }

    #[test]
    fn region_and_difficulty_are_equality_matches() {
        let filters = SearchFilters::new()
            .with_region(Region::Sumatra)
            .with_difficulty(Difficulty::Hard);
        assert!(filters.matches(&recipe("Rendang", Region::Sumatra, Difficulty::Hard)));
        assert!(!filters.matches(&recipe("Rendang", Region::Sumatra, Difficulty::Easy)));
        assert!(!filters.matches(&recipe("Rendang", Region::Jawa, Difficulty::Hard)));
    }

    #[test]
    fn blank_query_is_dropped() {
        let filters = SearchFilters::new().with_query("   ");
        assert!(filters.is_empty());
    }
}
