//! Integration tests for customer profiles, favorites and reviews

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::Utc;
use common::{print_test_header, price, TestShop};
use sea_orm::{ActiveModelTrait, Set};
use shop_service::contract::model::{
    CustomerUpdate, FavoriteDraft, NewCustomer, OwnedFilter, ReviewDraft, ReviewFilter,
};
use shop_service::contract::{PageRequest, ShopError};
use shop_service::infra::storage::entity::customer::review;

fn review_draft(product_id: i64, rating: i32) -> ReviewDraft {
    ReviewDraft {
        customer_id: None,
        product_id,
        rating,
        comment: Some("Comfortable from day one".to_string()),
    }
}

#[tokio::test]
async fn test_one_review_per_customer_and_product() {
    print_test_header(
        "test_one_review_per_customer_and_product",
        &[
            "Verify a customer reviews a product at most once",
            "Ratings outside 1..=5 are rejected before storage",
        ],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let bob = shop.customer("bob").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;

    println!("📝 Stage 1: First review is accepted");
    let first = shop
        .service
        .create_review(&alice.ctx, review_draft(boots.id, 5))
        .await
        .expect("First review succeeds");
    assert_eq!(first.customer_id, alice.profile.id);

    println!("📝 Stage 2: Second review of the same product conflicts");
    let second = shop
        .service
        .create_review(&alice.ctx, review_draft(boots.id, 3))
        .await;
    assert!(matches!(second, Err(ShopError::Conflict { .. })));

    println!("📝 Stage 3: Another customer may still review it");
    shop.service
        .create_review(&bob.ctx, review_draft(boots.id, 4))
        .await
        .expect("Bob's review succeeds");

    println!("📝 Stage 4: Out-of-range rating");
    let sandals = shop.product("Sandals", price(5900)).await;
    let too_high = shop
        .service
        .create_review(&alice.ctx, review_draft(sandals.id, 6))
        .await;
    let Err(ShopError::Validation { fields }) = too_high else {
        panic!("expected validation error, got {too_high:?}");
    };
    assert_eq!(fields["rating"], vec!["must be between 1 and 5"]);

    let reviews = shop
        .service
        .list_reviews(
            ReviewFilter {
                product: Some(boots.id),
                ..ReviewFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(reviews.total, 2);
    println!("✅ Review uniqueness and rating bounds enforced");
}

#[tokio::test]
async fn test_rating_check_constraint_guards_storage() {
    print_test_header(
        "test_rating_check_constraint_guards_storage",
        &["Verify the database rejects a rating of 6 written past the service"],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;

    let raw = review::ActiveModel {
        customer_id: Set(alice.profile.id),
        product_id: Set(boots.id),
        rating: Set(6),
        comment: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&*shop.db)
    .await;
    assert!(raw.is_err(), "CHECK constraint must reject the row");
    println!("✅ Storage refuses out-of-range ratings");
}

#[tokio::test]
async fn test_only_the_author_edits_a_review() {
    print_test_header(
        "test_only_the_author_edits_a_review",
        &["Verify reviews are public to read and private to change"],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let bob = shop.customer("bob").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;

    let review = shop
        .service
        .create_review(&alice.ctx, review_draft(boots.id, 4))
        .await
        .unwrap();

    let public = shop.service.get_review(review.id).await.unwrap();
    assert_eq!(public.rating, 4);

    let hijack = shop
        .service
        .update_review(&bob.ctx, review.id, review_draft(boots.id, 1))
        .await;
    assert!(matches!(hijack, Err(ShopError::Forbidden { .. })));

    let delete = shop.service.delete_review(&bob.ctx, review.id).await;
    assert!(matches!(delete, Err(ShopError::Forbidden { .. })));

    let edited = shop
        .service
        .update_review(&alice.ctx, review.id, review_draft(boots.id, 2))
        .await
        .expect("Author may edit");
    assert_eq!(edited.rating, 2);
    println!("✅ Review ownership respected");
}

#[tokio::test]
async fn test_favorites_are_scoped_to_their_owner() {
    print_test_header(
        "test_favorites_are_scoped_to_their_owner",
        &[
            "Verify customers only see their own favorites",
            "Staff see every customer's favorites",
        ],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let bob = shop.customer("bob").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;

    let favorite = shop
        .service
        .create_favorite(
            &alice.ctx,
            FavoriteDraft {
                customer_id: None,
                product_id: boots.id,
            },
        )
        .await
        .unwrap();

    let again = shop
        .service
        .create_favorite(
            &alice.ctx,
            FavoriteDraft {
                customer_id: None,
                product_id: boots.id,
            },
        )
        .await;
    assert!(matches!(again, Err(ShopError::Conflict { .. })));

    let for_alice = shop
        .service
        .create_favorite(
            &bob.ctx,
            FavoriteDraft {
                customer_id: Some(alice.profile.id),
                product_id: boots.id,
            },
        )
        .await;
    assert!(matches!(for_alice, Err(ShopError::Forbidden { .. })));

    let page = PageRequest::default();
    let peek = shop.service.get_favorite(&bob.ctx, favorite.id).await;
    assert!(matches!(peek, Err(ShopError::NotFound { .. })));

    let filtered = shop
        .service
        .list_favorites(
            &bob.ctx,
            OwnedFilter {
                customer: Some(alice.profile.id),
                product: None,
            },
            page,
        )
        .await
        .unwrap();
    assert_eq!(filtered.total, 0);

    let mine = shop.service.my_favorites(&alice.ctx, page).await.unwrap();
    assert_eq!(mine.total, 1);

    let all = shop
        .service
        .list_favorites(&shop.staff, OwnedFilter::default(), page)
        .await
        .unwrap();
    assert_eq!(all.total, 1);
    println!("✅ Favorites visible to owner and staff only");
}

#[tokio::test]
async fn test_customer_profile_lifecycle() {
    print_test_header(
        "test_customer_profile_lifecycle",
        &[
            "Verify registration, self-service profile, staff edits and deletion",
            "Deleting a customer removes its login",
        ],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    assert_eq!(alice.profile.loyalty_points, 0);
    assert_eq!(alice.profile.account.username, "alice");

    println!("📝 Stage 1: Duplicate username is a conflict");
    let duplicate = shop
        .service
        .register_customer(NewCustomer {
            last_name: "Other".to_string(),
            first_name: "Alice".to_string(),
            email: "other@mail.test".to_string(),
            username: "alice".to_string(),
            password: "another-pass".to_string(),
            phone: None,
            gender: None,
        })
        .await;
    assert!(matches!(duplicate, Err(ShopError::Conflict { .. })));

    println!("📝 Stage 2: Profile endpoints");
    let me = shop.service.my_profile(&alice.ctx).await.unwrap();
    assert_eq!(me.id, alice.profile.id);

    let staff_me = shop.service.my_profile(&shop.staff).await;
    assert!(matches!(staff_me, Err(ShopError::NotFound { .. })));

    let not_staff = shop.service.get_customer(&alice.ctx, alice.profile.id).await;
    assert!(matches!(not_staff, Err(ShopError::Forbidden { .. })));

    let updated = shop
        .service
        .update_customer(
            &shop.staff,
            alice.profile.id,
            CustomerUpdate {
                last_name: "Martin".to_string(),
                first_name: "Alice".to_string(),
                phone: Some("+33600000000".to_string()),
                gender: Some("F".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.last_name, "Martin");
    assert_eq!(updated.loyalty_points, 0);

    println!("📝 Stage 3: Delete removes the account as well");
    shop.service
        .delete_customer(&shop.staff, alice.profile.id)
        .await
        .unwrap();
    let login = shop
        .service
        .login("alice", common::CUSTOMER_PASSWORD)
        .await;
    assert!(matches!(login, Err(ShopError::Unauthorized { .. })));
    println!("✅ Customer lifecycle complete");
}
