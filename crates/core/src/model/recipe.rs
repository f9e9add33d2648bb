use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::ids::RecipeId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecipeError {
    #[error("recipe title cannot be empty")]
    EmptyTitle,

    #[error("cooking time must be > 0 minutes")]
    ZeroCookingTime,

    #[error("servings must be > 0")]
    ZeroServings,

    #[error("ingredient {index} is empty")]
    EmptyIngredient { index: usize },

    #[error("step {index} is empty")]
    EmptyStep { index: usize },

    #[error("unknown region code: {0}")]
    UnknownRegion(String),

    #[error("unknown difficulty code: {0}")]
    UnknownDifficulty(String),
}

//
// ─── REGION & DIFFICULTY ───────────────────────────────────────────────────────
//

/// Indonesian region a recipe originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Jawa,
    Sumatra,
    Sulawesi,
    Kalimantan,
    Other,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Jawa,
        Region::Sumatra,
        Region::Sulawesi,
        Region::Kalimantan,
        Region::Other,
    ];

    /// Storage code, as used by the backing database.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Region::Jawa => "jawa",
            Region::Sumatra => "sumatra",
            Region::Sulawesi => "sulawesi",
            Region::Kalimantan => "kalimantan",
            Region::Other => "other",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Region::Jawa => "Jawa",
            Region::Sumatra => "Sumatra",
            Region::Sulawesi => "Sulawesi",
            Region::Kalimantan => "Kalimantan",
            Region::Other => "Lainnya",
        }
    }

    /// Parse a storage code back into a region.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::UnknownRegion` for unrecognized codes.
    pub fn from_code(code: &str) -> Result<Self, RecipeError> {
        match code {
            "jawa" => Ok(Region::Jawa),
            "sumatra" => Ok(Region::Sumatra),
            "sulawesi" => Ok(Region::Sulawesi),
            "kalimantan" => Ok(Region::Kalimantan),
            "other" => Ok(Region::Other),
            _ => Err(RecipeError::UnknownRegion(code.to_owned())),
        }
    }
}

/// How demanding a recipe is to cook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Storage code (Indonesian, matching the original data set).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Difficulty::Easy => "mudah",
            Difficulty::Medium => "sedang",
            Difficulty::Hard => "sulit",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Mudah",
            Difficulty::Medium => "Sedang",
            Difficulty::Hard => "Sulit",
        }
    }

    /// Parse a storage code back into a difficulty.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::UnknownDifficulty` for unrecognized codes.
    pub fn from_code(code: &str) -> Result<Self, RecipeError> {
        match code {
            "mudah" => Ok(Difficulty::Easy),
            "sedang" => Ok(Difficulty::Medium),
            "sulit" => Ok(Difficulty::Hard),
            _ => Err(RecipeError::UnknownDifficulty(code.to_owned())),
        }
    }
}

//
// ─── RECIPE ────────────────────────────────────────────────────────────────────
//

/// A traditional recipe with its ordered cooking steps.
///
/// Recipes are created and owned externally; the cooking tracker only ever
/// reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    id: RecipeId,
    title: String,
    description: String,
    region: Region,
    difficulty: Difficulty,
    cooking_time_minutes: u32,
    servings: u32,
    image_url: Option<Url>,
    ingredients: Vec<String>,
    steps: Vec<String>,
    cultural_story: Option<String>,
    is_premium: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Creates a new recipe, validating title, timings and list entries.
    ///
    /// A recipe with zero steps is legal (the tracker must cope with it),
    /// but any step or ingredient that is present must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError` if validation fails.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RecipeId,
        title: impl Into<String>,
        description: impl Into<String>,
        region: Region,
        difficulty: Difficulty,
        cooking_time_minutes: u32,
        servings: u32,
        image_url: Option<Url>,
        ingredients: Vec<String>,
        steps: Vec<String>,
        cultural_story: Option<String>,
        is_premium: bool,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RecipeError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(RecipeError::EmptyTitle);
        }
        if cooking_time_minutes == 0 {
            return Err(RecipeError::ZeroCookingTime);
        }
        if servings == 0 {
            return Err(RecipeError::ZeroServings);
        }
        for (index, ingredient) in ingredients.iter().enumerate() {
            if ingredient.trim().is_empty() {
                return Err(RecipeError::EmptyIngredient { index });
            }
        }
        for (index, step) in steps.iter().enumerate() {
            if step.trim().is_empty() {
                return Err(RecipeError::EmptyStep { index });
            }
        }

        let cultural_story = cultural_story
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());

        Ok(Self {
            id,
            title: title.trim().to_owned(),
            description: description.into(),
            region,
            difficulty,
            cooking_time_minutes,
            servings,
            image_url,
            ingredients,
            steps,
            cultural_story,
            is_premium,
            created_at,
            updated_at: created_at,
        })
    }

    /// Rehydrates a recipe from storage, re-running validation.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError` if the persisted data no longer validates.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: RecipeId,
        title: String,
        description: String,
        region: Region,
        difficulty: Difficulty,
        cooking_time_minutes: u32,
        servings: u32,
        image_url: Option<Url>,
        ingredients: Vec<String>,
        steps: Vec<String>,
        cultural_story: Option<String>,
        is_premium: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, RecipeError> {
        let mut recipe = Self::new(
            id,
            title,
            description,
            region,
            difficulty,
            cooking_time_minutes,
            servings,
            image_url,
            ingredients,
            steps,
            cultural_story,
            is_premium,
            created_at,
        )?;
        recipe.updated_at = updated_at;
        Ok(recipe)
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> RecipeId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn region(&self) -> Region {
        self.region
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn cooking_time_minutes(&self) -> u32 {
        self.cooking_time_minutes
    }

    #[must_use]
    pub fn servings(&self) -> u32 {
        self.servings
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&Url> {
        self.image_url.as_ref()
    }

    #[must_use]
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Ordered cooking steps. May be empty.
    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn cultural_story(&self) -> Option<&str> {
        self.cultural_story.as_deref()
    }

    #[must_use]
    pub fn is_premium(&self) -> bool {
        self.is_premium
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
