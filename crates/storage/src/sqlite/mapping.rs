use nusantara_core::model::{
    Difficulty, ProgressRecord, ProgressStatus, Recipe, RecipeId, Region, Subscription, UserId,
    UserProfile,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use url::Url;
use uuid::Uuid;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn parse_uuid(field: &'static str, raw: &str) -> Result<Uuid, StorageError> {
    raw.parse::<Uuid>()
        .map_err(|_| StorageError::Serialization(format!("invalid {field}: {raw}")))
}

pub(crate) fn recipe_id_from_text(raw: &str) -> Result<RecipeId, StorageError> {
    Ok(RecipeId::new(parse_uuid("recipe_id", raw)?))
}

pub(crate) fn user_id_from_text(raw: &str) -> Result<UserId, StorageError> {
    Ok(UserId::new(parse_uuid("user_id", raw)?))
}

/// Serialize a list column as a JSON array.
pub(crate) fn list_to_json(items: &[String]) -> Result<String, StorageError> {
    serde_json::to_string(items).map_err(ser)
}

fn list_from_json(field: &'static str, raw: &str) -> Result<Vec<String>, StorageError> {
    serde_json::from_str(raw)
        .map_err(|_| StorageError::Serialization(format!("invalid {field} json")))
}

pub(crate) fn map_recipe_row(row: &SqliteRow) -> Result<Recipe, StorageError> {
    let id = recipe_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?;

    let region_code: String = row.try_get("region").map_err(ser)?;
    let region = Region::from_code(&region_code).map_err(ser)?;

    let difficulty_code: String = row.try_get("difficulty").map_err(ser)?;
    let difficulty = Difficulty::from_code(&difficulty_code).map_err(ser)?;

    let cooking_time_i64: i64 = row.try_get("cooking_time_minutes").map_err(ser)?;
    let cooking_time = u32::try_from(cooking_time_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid cooking_time: {cooking_time_i64}")))?;

    let servings_i64: i64 = row.try_get("servings").map_err(ser)?;
    let servings = u32::try_from(servings_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid servings: {servings_i64}")))?;

    let image_url = row
        .try_get::<Option<String>, _>("image_url")
        .map_err(ser)?
        .map(|raw| Url::parse(&raw))
        .transpose()
        .map_err(ser)?;

    let ingredients = list_from_json(
        "ingredients",
        &row.try_get::<String, _>("ingredients").map_err(ser)?,
    )?;
    let steps = list_from_json("steps", &row.try_get::<String, _>("steps").map_err(ser)?)?;

    Recipe::from_persisted(
        id,
        row.try_get("title").map_err(ser)?,
        row.try_get("description").map_err(ser)?,
        region,
        difficulty,
        cooking_time,
        servings,
        image_url,
        ingredients,
        steps,
        row.try_get("cultural_story").map_err(ser)?,
        row.try_get::<i64, _>("is_premium").map_err(ser)? != 0,
        row.try_get("created_at").map_err(ser)?,
        row.try_get("updated_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_progress_row(row: &SqliteRow) -> Result<ProgressRecord, StorageError> {
    let user_id = user_id_from_text(&row.try_get::<String, _>("user_id").map_err(ser)?)?;
    let recipe_id = recipe_id_from_text(&row.try_get::<String, _>("recipe_id").map_err(ser)?)?;

    let status_code: String = row.try_get("status").map_err(ser)?;
    let status = ProgressStatus::from_code(&status_code).map_err(ser)?;

    let percentage: f64 = row.try_get("progress_percentage").map_err(ser)?;

    let rating = row
        .try_get::<Option<i64>, _>("rating")
        .map_err(ser)?
        .map(|value| {
            u8::try_from(value)
                .map_err(|_| StorageError::Serialization(format!("invalid rating: {value}")))
        })
        .transpose()?;

    #[allow(clippy::cast_possible_truncation)]
    ProgressRecord::from_persisted(
        user_id,
        recipe_id,
        percentage as f32,
        status,
        rating,
        row.try_get("created_at").map_err(ser)?,
        row.try_get("updated_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_profile_row(row: &SqliteRow) -> Result<UserProfile, StorageError> {
    let id = user_id_from_text(&row.try_get::<String, _>("id").map_err(ser)?)?;

    let subscription_code: String = row.try_get("subscription").map_err(ser)?;
    let subscription = Subscription::from_code(&subscription_code).map_err(ser)?;

    Ok(UserProfile::from_persisted(
        id,
        row.try_get("full_name").map_err(ser)?,
        row.try_get("bio").map_err(ser)?,
        subscription,
        row.try_get("created_at").map_err(ser)?,
        row.try_get("updated_at").map_err(ser)?,
    ))
}
