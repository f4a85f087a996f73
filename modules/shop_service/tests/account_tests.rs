//! Integration tests for login, token lifecycle and account administration

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{print_test_header, TestShop, CUSTOMER_PASSWORD, STAFF_PASSWORD};
use chrono::NaiveDate;
use shop_service::contract::model::{AccountUpdate, NewAccount, StaffProfileChanges};
use shop_service::contract::{AuthContext, PageRequest, ShopError};

fn new_account(username: &str, is_superuser: bool) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        email: format!("{username}@shop.test"),
        first_name: String::new(),
        last_name: String::new(),
        password: "initial-pass".to_string(),
        is_staff: true,
        is_superuser,
        profile: StaffProfileChanges::default(),
    }
}

#[tokio::test]
async fn test_login_and_token_lifecycle() {
    print_test_header(
        "test_login_and_token_lifecycle",
        &[
            "Verify credentials yield an access/refresh pair",
            "Refresh tokens mint access tokens but never authenticate requests",
        ],
    );

    let shop = TestShop::new().await;
    shop.customer("alice").await;

    println!("📝 Stage 1: Wrong password and unknown user look the same");
    let wrong = shop.service.login("alice", "not-the-password").await;
    let unknown = shop.service.login("nobody", "whatever").await;
    assert_eq!(wrong.clone().unwrap_err(), unknown.unwrap_err());
    assert!(matches!(wrong, Err(ShopError::Unauthorized { .. })));

    println!("📝 Stage 2: Pair issued, both kinds verify");
    let pair = shop
        .service
        .login("alice", CUSTOMER_PASSWORD)
        .await
        .expect("Login succeeds");
    shop.service.verify_token(&pair.access).unwrap();
    shop.service.verify_token(&pair.refresh).unwrap();
    assert!(shop.service.verify_token("garbage.token.value").is_err());

    println!("📝 Stage 3: Only access tokens authenticate");
    let ctx = shop.service.authenticate(&pair.access).await.unwrap();
    assert!(!ctx.is_staff);
    let with_refresh = shop.service.authenticate(&pair.refresh).await;
    assert!(matches!(with_refresh, Err(ShopError::Unauthorized { .. })));

    println!("📝 Stage 4: Refresh mints a working access token");
    let access = shop.service.refresh_token(&pair.refresh).await.unwrap();
    let refreshed = shop.service.authenticate(&access).await.unwrap();
    assert_eq!(refreshed.account_id, ctx.account_id);

    let access_as_refresh = shop.service.refresh_token(&pair.access).await;
    assert!(matches!(access_as_refresh, Err(ShopError::Unauthorized { .. })));

    let me = shop.service.current_account(&ctx).await.unwrap();
    assert_eq!(me.username, "alice");
    assert!(me.last_login.is_some());
    println!("✅ Token lifecycle behaves");
}

#[tokio::test]
async fn test_deactivated_account_loses_access_immediately() {
    print_test_header(
        "test_deactivated_account_loses_access_immediately",
        &["Verify privileges are read from the account, not from the token"],
    );

    let shop = TestShop::new().await;
    let clerk = shop
        .service
        .create_account(&shop.staff, new_account("clerk", false))
        .await
        .unwrap();
    let pair = shop.service.login("clerk", "initial-pass").await.unwrap();

    shop.service
        .update_account(
            &shop.staff,
            clerk.account.id,
            AccountUpdate {
                is_active: Some(false),
                ..AccountUpdate::default()
            },
        )
        .await
        .unwrap();

    let stale = shop.service.authenticate(&pair.access).await;
    assert!(matches!(stale, Err(ShopError::Unauthorized { .. })));
    let relogin = shop.service.login("clerk", "initial-pass").await;
    assert!(matches!(relogin, Err(ShopError::Unauthorized { .. })));
    println!("✅ Deactivation takes effect on the next request");
}

#[tokio::test]
async fn test_account_administration_privileges() {
    print_test_header(
        "test_account_administration_privileges",
        &[
            "Verify staff manage accounts, customers cannot",
            "Only superusers create superusers",
        ],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let page = PageRequest::default();

    let anonymous = shop
        .service
        .list_accounts(&AuthContext::anonymous(), page)
        .await;
    assert!(matches!(anonymous, Err(ShopError::Unauthorized { .. })));

    let customer = shop.service.list_accounts(&alice.ctx, page).await;
    assert!(matches!(customer, Err(ShopError::Forbidden { .. })));

    let accounts = shop.service.list_accounts(&shop.staff, page).await.unwrap();
    assert_eq!(accounts.total, 2);

    let superuser = shop
        .service
        .create_account(&shop.staff, new_account("root2", true))
        .await;
    assert!(matches!(superuser, Err(ShopError::Forbidden { .. })));

    let bad_email = shop
        .service
        .create_account(
            &shop.staff,
            NewAccount {
                email: "not-an-email".to_string(),
                ..new_account("clerk", false)
            },
        )
        .await;
    let Err(ShopError::Validation { fields }) = bad_email else {
        panic!("expected validation error, got {bad_email:?}");
    };
    assert!(fields.contains_key("email"));

    shop.service
        .update_account(
            &shop.staff,
            shop.staff.account_id.unwrap(),
            AccountUpdate {
                password: Some("rotated-pass".to_string()),
                ..AccountUpdate::default()
            },
        )
        .await
        .unwrap();
    assert!(shop.service.login("backoffice", STAFF_PASSWORD).await.is_err());
    assert!(shop.service.login("backoffice", "rotated-pass").await.is_ok());
    println!("✅ Account administration guarded");
}

#[tokio::test]
async fn test_staff_profile_follows_the_account() {
    print_test_header(
        "test_staff_profile_follows_the_account",
        &[
            "Verify created accounts get a staff profile with a default matricule",
            "Profile fields are set on creation and changed through account updates",
        ],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;

    println!("📝 Stage 1: Default profile");
    let clerk = shop
        .service
        .create_account(&shop.staff, new_account("clerk", false))
        .await
        .unwrap();
    let profile = clerk.profile.expect("profile created with the account");
    assert_eq!(profile.matricule, format!("MAT{}", clerk.account.id));
    assert!(profile.skills.is_empty());
    assert_eq!(profile.hire_date, None);

    println!("📝 Stage 2: Profile given at creation");
    let buyer = shop
        .service
        .create_account(
            &shop.staff,
            NewAccount {
                profile: StaffProfileChanges {
                    matricule: Some("EMP-042".to_string()),
                    job_title: Some("Buyer".to_string()),
                    hire_date: NaiveDate::from_ymd_opt(2023, 9, 1),
                    skills: Some(vec!["sourcing".to_string(), "leather".to_string()]),
                    ..StaffProfileChanges::default()
                },
                ..new_account("buyer", false)
            },
        )
        .await
        .unwrap();
    let fetched = shop
        .service
        .get_account(&shop.staff, buyer.account.id)
        .await
        .unwrap();
    let profile = fetched.profile.expect("profile is nested in the detail");
    assert_eq!(profile.matricule, "EMP-042");
    assert_eq!(profile.job_title, "Buyer");
    assert_eq!(profile.skills, vec!["sourcing", "leather"]);
    assert_eq!(profile.hire_date, NaiveDate::from_ymd_opt(2023, 9, 1));

    println!("📝 Stage 3: Matricules are unique, the account is not left behind");
    let clash = shop
        .service
        .create_account(
            &shop.staff,
            NewAccount {
                profile: StaffProfileChanges {
                    matricule: Some("EMP-042".to_string()),
                    ..StaffProfileChanges::default()
                },
                ..new_account("twin", false)
            },
        )
        .await;
    assert!(matches!(clash, Err(ShopError::Conflict { .. })));
    assert!(shop.service.login("twin", "initial-pass").await.is_err());

    let blank = shop
        .service
        .create_account(
            &shop.staff,
            NewAccount {
                profile: StaffProfileChanges {
                    matricule: Some("  ".to_string()),
                    ..StaffProfileChanges::default()
                },
                ..new_account("blank", false)
            },
        )
        .await;
    let Err(ShopError::Validation { fields }) = blank else {
        panic!("expected validation error, got {blank:?}");
    };
    assert!(fields.contains_key("profile.matricule"));

    println!("📝 Stage 4: Update changes only the given fields");
    let updated = shop
        .service
        .update_account(
            &shop.staff,
            clerk.account.id,
            AccountUpdate {
                profile: Some(StaffProfileChanges {
                    job_title: Some("Warehouse clerk".to_string()),
                    skills: Some(vec!["forklift".to_string()]),
                    ..StaffProfileChanges::default()
                }),
                ..AccountUpdate::default()
            },
        )
        .await
        .unwrap();
    let profile = updated.profile.unwrap();
    assert_eq!(profile.job_title, "Warehouse clerk");
    assert_eq!(profile.skills, vec!["forklift"]);
    assert_eq!(profile.matricule, format!("MAT{}", clerk.account.id));

    println!("📝 Stage 5: Customer accounts have none until one is set");
    let customer_account = alice.profile.account.id;
    let bare = shop
        .service
        .get_account(&shop.staff, customer_account)
        .await
        .unwrap();
    assert!(bare.profile.is_none());
    let untouched = shop
        .service
        .update_account(
            &shop.staff,
            customer_account,
            AccountUpdate {
                first_name: Some("Alicia".to_string()),
                ..AccountUpdate::default()
            },
        )
        .await
        .unwrap();
    assert!(untouched.profile.is_none());
    assert_eq!(untouched.account.first_name, "Alicia");
    println!("✅ Staff profile managed with its account");
}
