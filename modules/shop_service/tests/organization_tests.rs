//! Integration tests for poles, services, teams, memberships and roles

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{print_test_header, TestShop};
use shop_service::contract::model::{
    Pole, PoleCode, PoleDraft, Role, RoleAssignmentDraft, RoleFilter, ServiceUnitDraft,
    TeamDraft, UnitRef,
};
use shop_service::contract::{AuthContext, PageRequest, ShopError};

async fn pole(shop: &TestShop, code: PoleCode) -> Pole {
    shop.service
        .create_pole(
            &shop.staff,
            PoleDraft {
                name: format!("Pole {code}"),
                code,
                description: String::new(),
                responsible_id: None,
                active: true,
            },
        )
        .await
        .expect("Failed to create pole")
}

fn assignment(account_id: i64, role: Role, pole_id: Option<i64>) -> RoleAssignmentDraft {
    RoleAssignmentDraft {
        account_id,
        role,
        pole_id,
        service_id: None,
        team_id: None,
        active: true,
    }
}

#[tokio::test]
async fn test_clients_roles_require_clients_pole() {
    print_test_header(
        "test_clients_roles_require_clients_pole",
        &[
            "Verify CLIENTS-pole roles can only be assigned within the CLIENTS pole",
            "Other roles are free of that rule",
        ],
    );

    let shop = TestShop::new().await;
    let staff_id = shop.staff.account_id.unwrap();
    let clients = pole(&shop, PoleCode::Clients).await;
    let products = pole(&shop, PoleCode::Products).await;

    println!("📝 Stage 1: Reviews manager in the PRODUCTS pole is rejected");
    let wrong_pole = shop
        .service
        .assign_role(
            &shop.staff,
            assignment(staff_id, Role::GestionnaireAvis, Some(products.id)),
        )
        .await;
    let Err(ShopError::Validation { fields }) = wrong_pole else {
        panic!("expected validation error, got {wrong_pole:?}");
    };
    assert!(fields.contains_key("role"));

    println!("📝 Stage 2: Same role without any pole is rejected");
    let no_pole = shop
        .service
        .assign_role(&shop.staff, assignment(staff_id, Role::ResponsableCrm, None))
        .await;
    assert!(matches!(no_pole, Err(ShopError::Validation { .. })));

    println!("📝 Stage 3: CLIENTS pole accepts it, other roles need no pole");
    let assigned = shop
        .service
        .assign_role(
            &shop.staff,
            assignment(staff_id, Role::GestionnaireAvis, Some(clients.id)),
        )
        .await
        .expect("CLIENTS pole assignment succeeds");
    assert_eq!(assigned.role, Role::GestionnaireAvis);

    shop.service
        .assign_role(&shop.staff, assignment(staff_id, Role::Manager, None))
        .await
        .expect("Organization-wide role needs no pole");

    let unknown_pole = shop
        .service
        .assign_role(
            &shop.staff,
            assignment(staff_id, Role::DirecteurClients, Some(9_999)),
        )
        .await;
    let Err(ShopError::Validation { fields }) = unknown_pole else {
        panic!("expected validation error, got {unknown_pole:?}");
    };
    assert!(fields.contains_key("pole_id"));

    let in_clients = shop
        .service
        .list_roles(
            &shop.staff,
            RoleFilter {
                pole: Some(clients.id),
                ..RoleFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(in_clients.total, 1);
    println!("✅ Role scope enforced");
}

#[tokio::test]
async fn test_role_assigned_once_per_scope() {
    print_test_header(
        "test_role_assigned_once_per_scope",
        &[
            "Verify an organization-wide role cannot be held twice by one account",
            "The same role in a different scope is a separate assignment",
        ],
    );

    let shop = TestShop::new().await;
    let staff_id = shop.staff.account_id.unwrap();
    let clients = pole(&shop, PoleCode::Clients).await;

    println!("📝 Stage 1: Global role twice");
    let first = shop
        .service
        .assign_role(&shop.staff, assignment(staff_id, Role::Admin, None))
        .await
        .expect("First assignment succeeds");
    let second = shop
        .service
        .assign_role(&shop.staff, assignment(staff_id, Role::Admin, None))
        .await;
    assert!(matches!(second, Err(ShopError::Conflict { .. })));

    println!("📝 Stage 2: Same role scoped to a pole");
    let scoped = shop
        .service
        .assign_role(
            &shop.staff,
            assignment(staff_id, Role::Admin, Some(clients.id)),
        )
        .await
        .expect("Pole-scoped assignment is distinct");

    println!("📝 Stage 3: Updating into an existing scope conflicts");
    let clash = shop
        .service
        .update_role(&shop.staff, scoped.id, assignment(staff_id, Role::Admin, None))
        .await;
    assert!(matches!(clash, Err(ShopError::Conflict { .. })));

    let unchanged = shop
        .service
        .update_role(&shop.staff, first.id, assignment(staff_id, Role::Admin, None))
        .await
        .expect("Saving an assignment onto itself is fine");
    assert_eq!(unchanged.id, first.id);
    println!("✅ Role assignments unique per scope");
}

#[tokio::test]
async fn test_pole_codes_are_unique() {
    print_test_header(
        "test_pole_codes_are_unique",
        &["Verify each pole code exists at most once"],
    );

    let shop = TestShop::new().await;
    pole(&shop, PoleCode::Commandes).await;
    let duplicate = shop
        .service
        .create_pole(
            &shop.staff,
            PoleDraft {
                name: "Orders again".to_string(),
                code: PoleCode::Commandes,
                description: String::new(),
                responsible_id: None,
                active: true,
            },
        )
        .await;
    assert!(matches!(duplicate, Err(ShopError::Conflict { .. })));

    let anonymous = shop
        .service
        .list_poles(&AuthContext::anonymous(), PageRequest::default())
        .await;
    assert!(matches!(anonymous, Err(ShopError::Unauthorized { .. })));
    println!("✅ Pole codes unique, listing requires login");
}

#[tokio::test]
async fn test_service_and_team_membership() {
    print_test_header(
        "test_service_and_team_membership",
        &["Verify accounts join and leave services and teams"],
    );

    let shop = TestShop::new().await;
    let staff_id = shop.staff.account_id.unwrap();
    let alice = shop.customer("alice").await;
    let orders_pole = pole(&shop, PoleCode::Commandes).await;

    let logistics = shop
        .service
        .create_service(
            &shop.staff,
            ServiceUnitDraft {
                name: "Logistics".to_string(),
                description: "Shipping and returns".to_string(),
                pole_id: orders_pole.id,
                responsible_id: Some(staff_id),
                active: true,
            },
        )
        .await
        .unwrap();
    let warehouse = shop
        .service
        .create_team(
            &shop.staff,
            TeamDraft {
                name: "Warehouse".to_string(),
                description: String::new(),
                service_id: logistics.id,
                responsible_id: None,
                active: true,
            },
        )
        .await
        .unwrap();

    println!("📝 Stage 1: Join the service and the team");
    let service_unit = UnitRef::Service(logistics.id);
    let team_unit = UnitRef::Team(warehouse.id);
    let joined = shop
        .service
        .add_member(&shop.staff, service_unit, staff_id)
        .await
        .unwrap();
    assert_eq!(joined.unit, service_unit);
    shop.service
        .add_member(&shop.staff, team_unit, alice.profile.account.id)
        .await
        .unwrap();

    let service_members = shop
        .service
        .list_members(&shop.staff, service_unit)
        .await
        .unwrap();
    assert_eq!(service_members.len(), 1);
    assert_eq!(service_members[0].account_id, staff_id);

    println!("📝 Stage 2: Leave the team");
    shop.service
        .remove_member(&shop.staff, team_unit, alice.profile.account.id)
        .await
        .unwrap();
    assert!(shop
        .service
        .list_members(&shop.staff, team_unit)
        .await
        .unwrap()
        .is_empty());

    let twice = shop
        .service
        .remove_member(&shop.staff, team_unit, alice.profile.account.id)
        .await;
    assert!(matches!(twice, Err(ShopError::NotFound { .. })));

    let missing_team = shop
        .service
        .list_members(&shop.staff, UnitRef::Team(9_999))
        .await;
    assert!(matches!(missing_team, Err(ShopError::NotFound { .. })));
    println!("✅ Membership managed per unit");
}
