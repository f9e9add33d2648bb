use std::sync::Arc;

use nusantara_core::model::{Difficulty, ProgressStatus, Recipe, RecipeId, Region, UserId};
use nusantara_core::time::fixed_clock;
use services::{AppServices, AuthUser, CookingTracker};
use storage::repository::{RecipeRepository, Storage};

fn sample_recipe(steps: usize) -> Recipe {
    let step_names = ["Siapkan bumbu", "Tumis hingga harum", "Masukkan santan", "Masak hingga matang"];
    Recipe::new(
        RecipeId::random(),
        "Opor Ayam",
        "Ayam dimasak dalam kuah santan",
        Region::Jawa,
        Difficulty::Medium,
        60,
        4,
        None,
        vec!["Ayam kampung".into(), "Santan kental".into()],
        step_names.iter().take(steps).map(|s| (*s).to_string()).collect(),
        Some("Hidangan lebaran yang umum di Jawa.".into()),
        false,
        fixed_clock().now(),
    )
    .expect("valid recipe")
}

async fn services_with_recipe(recipe: &Recipe) -> AppServices {
    let storage = Storage::in_memory();
    storage
        .recipes
        .upsert_recipe(recipe)
        .await
        .expect("store recipe");
    AppServices::from_storage(&storage, fixed_clock())
}

async fn flush(tracker: &mut CookingTracker) {
    if let Some(handle) = tracker.last_persist() {
        handle.await.expect("persist task");
    }
}

#[tokio::test]
async fn partial_cooking_persists_attempted() {
    let recipe = sample_recipe(4);
    let app = services_with_recipe(&recipe).await;
    let user_id = UserId::random();
    app.auth()
        .sign_in(AuthUser::new(user_id, "budi@example.com", Some("Budi".into())));

    let mut tracker = app.start_cooking(recipe.id()).await.expect("start cooking");
    tracker.toggle_step(0).expect("toggle");
    flush(&mut tracker).await;
    tracker.toggle_step(2).expect("toggle");
    flush(&mut tracker).await;

    assert!((tracker.progress().percentage - 50.0).abs() < f32::EPSILON);

    let records = app.progress().list_for_user(user_id).await.expect("list");
    assert_eq!(records.len(), 1);
    assert!((records[0].progress_percentage() - 50.0).abs() < f32::EPSILON);
    assert_eq!(records[0].status(), ProgressStatus::Attempted);
}

#[tokio::test]
async fn finishing_every_step_persists_completed() {
    let recipe = sample_recipe(4);
    let app = services_with_recipe(&recipe).await;
    let user_id = UserId::random();
    app.auth()
        .sign_in(AuthUser::new(user_id, "budi@example.com", None));

    let mut tracker = app.start_cooking(recipe.id()).await.expect("start cooking");
    for index in 0..4 {
        tracker.toggle_step(index).expect("toggle");
        flush(&mut tracker).await;
    }

    assert!(tracker.progress().is_complete);

    let record = app
        .progress()
        .list_for_user(user_id)
        .await
        .expect("list")
        .into_iter()
        .next()
        .expect("record");
    assert!((record.progress_percentage() - 100.0).abs() < f32::EPSILON);
    assert_eq!(record.status(), ProgressStatus::Completed);
}

#[tokio::test]
async fn signed_out_cooking_never_writes() {
    let recipe = sample_recipe(4);
    let app = services_with_recipe(&recipe).await;

    let mut tracker = app.start_cooking(recipe.id()).await.expect("start cooking");
    tracker.toggle_step(0).expect("toggle");
    tracker.toggle_step(1).expect("toggle");

    assert!(tracker.last_persist().is_none());
    assert_eq!(tracker.progress().completed_steps, 2);
}

#[tokio::test]
async fn unchecking_back_to_zero_persists_bookmarked() {
    let recipe = sample_recipe(4);
    let app = services_with_recipe(&recipe).await;
    let user_id = UserId::random();
    app.auth()
        .sign_in(AuthUser::new(user_id, "budi@example.com", None));

    let mut tracker = app.start_cooking(recipe.id()).await.expect("start cooking");
    assert!(tracker.toggle_step(1).expect("toggle"));
    flush(&mut tracker).await;
    assert!(!tracker.toggle_step(1).expect("toggle"));
    flush(&mut tracker).await;

    assert_eq!(tracker.progress().completed_steps, 0);

    let record = app
        .progress()
        .list_for_user(user_id)
        .await
        .expect("list")
        .into_iter()
        .next()
        .expect("record");
    assert!((record.progress_percentage() - 0.0).abs() < f32::EPSILON);
    assert_eq!(record.status(), ProgressStatus::Bookmarked);
}

#[tokio::test]
async fn unknown_recipe_cannot_start() {
    let recipe = sample_recipe(4);
    let app = services_with_recipe(&recipe).await;

    let err = app.start_cooking(RecipeId::random()).await.unwrap_err();
    assert!(matches!(
        err,
        services::RecipeServiceError::RecipeNotFound(_)
    ));
}
