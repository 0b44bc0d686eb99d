//! Integration tests for share links.

use chrono::{Duration, Utc};
use gridplan_db::is_unique_violation;
use gridplan_db::models::layout::CreateLayout;
use gridplan_db::models::user::CreateUser;
use gridplan_db::repositories::{LayoutRepo, ShareRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        role: "user".to_string(),
    }
}

fn new_layout(name: &str) -> CreateLayout {
    CreateLayout {
        name: name.to_string(),
        description: None,
        grid_x: 4,
        grid_y: 4,
        width_mm: 168.0,
        depth_mm: 168.0,
        spacer_horizontal: "none".to_string(),
        spacer_vertical: "none".to_string(),
        is_public: false,
        placed_items: vec![],
        ref_image_placements: vec![],
    }
}

async fn seed(pool: &PgPool, username: &str) -> (i64, i64) {
    let user = UserRepo::create(pool, &new_user(username)).await.unwrap();
    let layout = LayoutRepo::create(pool, user.id, &new_layout("Shared"))
        .await
        .unwrap();
    (user.id, layout.id)
}

// ---------------------------------------------------------------------------
// Test: insert and slug lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_and_find_by_slug(pool: PgPool) {
    let (user_id, layout_id) = seed(&pool, "sharer").await;

    let expires = Utc::now() + Duration::days(7);
    let share = ShareRepo::insert(&pool, layout_id, "abc123xyz789", user_id, Some(expires))
        .await
        .unwrap();
    assert_eq!(share.slug, "abc123xyz789");
    assert_eq!(share.view_count, 0);

    let found = ShareRepo::find_by_slug(&pool, "abc123xyz789")
        .await
        .unwrap()
        .expect("slug should resolve");
    assert_eq!(found.id, share.id);
    assert_eq!(found.layout_id, layout_id);

    assert!(ShareRepo::find_by_slug(&pool, "nosuchslug00")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: slug collisions surface as classified unique violations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_slug_is_unique_violation(pool: PgPool) {
    let (user_id, layout_id) = seed(&pool, "colluder").await;

    ShareRepo::insert(&pool, layout_id, "samesameslug", user_id, None)
        .await
        .unwrap();
    let err = ShareRepo::insert(&pool, layout_id, "samesameslug", user_id, None)
        .await
        .expect_err("second insert with the same slug must fail");

    assert!(is_unique_violation(&err, Some("uq_shared_projects_slug")));
    assert!(!is_unique_violation(&err, Some("uq_users_username")));
}

// ---------------------------------------------------------------------------
// Test: view counter and listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_view_count_increments(pool: PgPool) {
    let (user_id, layout_id) = seed(&pool, "viewer").await;

    let share = ShareRepo::insert(&pool, layout_id, "countmeplease", user_id, None)
        .await
        .unwrap();

    assert_eq!(
        ShareRepo::increment_view_count(&pool, share.id).await.unwrap(),
        1
    );
    assert_eq!(
        ShareRepo::increment_view_count(&pool, share.id).await.unwrap(),
        2
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_for_layout_and_delete(pool: PgPool) {
    let (user_id, layout_id) = seed(&pool, "lister").await;

    let first = ShareRepo::insert(&pool, layout_id, "firstslug001", user_id, None)
        .await
        .unwrap();
    ShareRepo::insert(&pool, layout_id, "secondslug02", user_id, None)
        .await
        .unwrap();

    let shares = ShareRepo::list_for_layout(&pool, layout_id).await.unwrap();
    assert_eq!(shares.len(), 2);

    assert!(ShareRepo::delete(&pool, first.id).await.unwrap());
    assert!(!ShareRepo::delete(&pool, first.id).await.unwrap());

    let shares = ShareRepo::list_for_layout(&pool, layout_id).await.unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].slug, "secondslug02");
}

// ---------------------------------------------------------------------------
// Test: deleting the layout removes its share links
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_layout_delete_cascades_to_shares(pool: PgPool) {
    let (user_id, layout_id) = seed(&pool, "cascade").await;

    ShareRepo::insert(&pool, layout_id, "doomedslug99", user_id, None)
        .await
        .unwrap();
    LayoutRepo::delete(&pool, layout_id).await.unwrap();

    assert!(ShareRepo::find_by_slug(&pool, "doomedslug99")
        .await
        .unwrap()
        .is_none());
}
