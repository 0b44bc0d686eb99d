//! Integration tests for the reference image registry and broken-reference
//! placement behaviour.

use gridplan_db::models::layout::{CreateLayout, RefImagePlacementInput};
use gridplan_db::models::ref_image::CreateRefImage;
use gridplan_db::models::user::CreateUser;
use gridplan_db::repositories::{LayoutRepo, RefImageRepo, UserRepo};
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

fn new_image(name: &str, size: i64) -> CreateRefImage {
    CreateRefImage {
        name: name.to_string(),
        url: format!("/uploads/{name}.png"),
        size_bytes: size,
    }
}

fn layout_with_placement(ref_image_id: i64) -> CreateLayout {
    CreateLayout {
        name: "Traced".to_string(),
        description: None,
        grid_x: 4,
        grid_y: 4,
        width_mm: 168.0,
        depth_mm: 168.0,
        spacer_horizontal: "none".to_string(),
        spacer_vertical: "none".to_string(),
        is_public: false,
        placed_items: vec![],
        ref_image_placements: vec![RefImagePlacementInput {
            ref_image_id: Some(ref_image_id),
            name: "photo".to_string(),
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            opacity: 0.7,
            scale: 1.0,
            is_locked: false,
            rotation: 0,
        }],
    }
}

// ---------------------------------------------------------------------------
// Test: register, list, delete returns the row
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_and_delete(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("uploader")).await.unwrap();

    let image = RefImageRepo::create(&pool, owner.id, &new_image("drawer", 4_096))
        .await
        .unwrap();
    assert_eq!(image.owner_id, owner.id);
    assert_eq!(image.size_bytes, 4_096);

    let listed = RefImageRepo::list_by_owner(&pool, owner.id).await.unwrap();
    assert_eq!(listed.len(), 1);

    let deleted = RefImageRepo::delete(&pool, image.id)
        .await
        .unwrap()
        .expect("delete returns the removed row");
    assert_eq!(deleted.size_bytes, 4_096);

    assert!(RefImageRepo::find_by_id(&pool, image.id)
        .await
        .unwrap()
        .is_none());
    assert!(RefImageRepo::delete(&pool, image.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: deleting an image breaks placements without dropping them
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_image_delete_nulls_placement_reference(pool: PgPool) {
    let owner = UserRepo::create(&pool, &new_user("tracer")).await.unwrap();

    let image = RefImageRepo::create(&pool, owner.id, &new_image("sketch", 1_024))
        .await
        .unwrap();
    let layout = LayoutRepo::create(&pool, owner.id, &layout_with_placement(image.id))
        .await
        .unwrap();

    // With the image alive, the placement resolves a display URL.
    let detail = LayoutRepo::fetch_detail(&pool, layout.clone()).await.unwrap();
    assert_eq!(detail.ref_image_placements.len(), 1);
    assert_eq!(detail.ref_image_placements[0].ref_image_id, Some(image.id));
    assert_eq!(
        detail.ref_image_placements[0].image_url.as_deref(),
        Some("/uploads/sketch.png")
    );

    RefImageRepo::delete(&pool, image.id).await.unwrap();

    // The placement survives with a null reference and no URL.
    let detail = LayoutRepo::fetch_detail(&pool, layout).await.unwrap();
    assert_eq!(detail.ref_image_placements.len(), 1);
    assert_eq!(detail.ref_image_placements[0].ref_image_id, None);
    assert_eq!(detail.ref_image_placements[0].image_url, None);
    assert_eq!(detail.ref_image_placements[0].name, "photo");
}
