use nusantara_core::model::{
    Difficulty, ProgressRecord, ProgressStatus, Recipe, RecipeId, Region, SearchFilters,
    Subscription, UserId, UserProfile,
};
use nusantara_core::time::fixed_now;
use storage::repository::{
    BookmarkRepository, ProfileRepository, ProgressRepository, RecipeRepository, StorageError,
};
use storage::sqlite::SqliteRepository;

fn build_recipe(title: &str, region: Region, difficulty: Difficulty, premium: bool) -> Recipe {
    Recipe::new(
        RecipeId::random(),
        title,
        "desc",
        region,
        difficulty,
        60,
        4,
        Some(url::Url::parse("https://example.com/img.jpg").unwrap()),
        vec!["santan".into(), "serai".into()],
        vec!["Tumis bumbu.".into(), "Masak hingga matang.".into()],
        Some("cerita".into()),
        premium,
        fixed_now(),
    )
    .unwrap()
}

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_recipe_roundtrip() {
    let repo = connect("memdb_recipe_roundtrip").await;

    let recipe = build_recipe("Rendang", Region::Sumatra, Difficulty::Hard, false);
    repo.upsert_recipe(&recipe).await.unwrap();

    let fetched = repo.get_recipe(recipe.id()).await.unwrap().unwrap();
    assert_eq!(fetched, recipe);

    assert!(repo.get_recipe(RecipeId::random()).await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_list_applies_filters() {
    let repo = connect("memdb_list_filters").await;

    repo.upsert_recipe(&build_recipe("Rendang", Region::Sumatra, Difficulty::Hard, false))
        .await
        .unwrap();
    repo.upsert_recipe(&build_recipe("Gudeg", Region::Jawa, Difficulty::Medium, false))
        .await
        .unwrap();
    repo.upsert_recipe(&build_recipe("Soto Banjar", Region::Kalimantan, Difficulty::Easy, true))
        .await
        .unwrap();

    let by_region = repo
        .list_recipes(&SearchFilters::new().with_region(Region::Jawa), 10)
        .await
        .unwrap();
    assert_eq!(by_region.len(), 1);
    assert_eq!(by_region[0].title(), "Gudeg");

    let by_query = repo
        .list_recipes(&SearchFilters::new().with_query("SOTO"), 10)
        .await
        .unwrap();
    assert_eq!(by_query.len(), 1);
    assert_eq!(by_query[0].title(), "Soto Banjar");

    let featured = repo.featured_recipes(10).await.unwrap();
    assert_eq!(featured.len(), 2);
    assert!(featured.iter().all(|r| !r.is_premium()));
}

#[tokio::test]
async fn sqlite_bookmark_membership() {
    let repo = connect("memdb_bookmarks").await;

    let recipe = build_recipe("Pecel", Region::Jawa, Difficulty::Easy, false);
    repo.upsert_recipe(&recipe).await.unwrap();
    let user = UserId::random();

    assert!(!repo.is_bookmarked(user, recipe.id()).await.unwrap());

    repo.add_bookmark(user, recipe.id(), fixed_now()).await.unwrap();
    assert!(repo.is_bookmarked(user, recipe.id()).await.unwrap());

    let err = repo
        .add_bookmark(user, recipe.id(), fixed_now())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict));

    let listed = repo.list_bookmarked_recipes(user).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), recipe.id());

    repo.remove_bookmark(user, recipe.id()).await.unwrap();
    assert!(!repo.is_bookmarked(user, recipe.id()).await.unwrap());
}

#[tokio::test]
async fn sqlite_progress_upsert_keeps_created_at() {
    let repo = connect("memdb_progress").await;

    let recipe = build_recipe("Coto", Region::Sulawesi, Difficulty::Medium, false);
    repo.upsert_recipe(&recipe).await.unwrap();
    let user = UserId::random();
    let created = fixed_now();

    let first = ProgressRecord::new(user, recipe.id(), 50.0, None, created).unwrap();
    repo.upsert_progress(&first).await.unwrap();

    let later = created + chrono::Duration::hours(2);
    let second = ProgressRecord::new(user, recipe.id(), 100.0, Some(5), later).unwrap();
    repo.upsert_progress(&second).await.unwrap();

    let stored = repo.get_progress(user, recipe.id()).await.unwrap().unwrap();
    assert_eq!(stored.created_at(), created);
    assert_eq!(stored.updated_at(), later);
    assert_eq!(stored.status(), ProgressStatus::Completed);
    assert_eq!(stored.rating(), Some(5));

    let listed = repo.list_progress(user).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn sqlite_profile_roundtrip() {
    let repo = connect("memdb_profiles").await;

    let user = UserId::random();
    let profile = UserProfile::new(
        user,
        Some("Siti Rahma".into()),
        Some("Suka masakan Padang".into()),
        Subscription::Free,
        fixed_now(),
    );
    repo.upsert_profile(&profile).await.unwrap();

    let fetched = repo.get_profile(user).await.unwrap().unwrap();
    assert_eq!(fetched, profile);

    let updated = profile.with_details(
        Some("Siti R.".into()),
        None,
        fixed_now() + chrono::Duration::days(1),
    );
    repo.upsert_profile(&updated).await.unwrap();

    let fetched = repo.get_profile(user).await.unwrap().unwrap();
    assert_eq!(fetched.full_name(), Some("Siti R."));
    assert_eq!(fetched.bio(), None);
}
