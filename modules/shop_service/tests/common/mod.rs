//! Common test utilities: in-memory shop with staff, customers and a small catalog

#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use shop_service::contract::model::{
    Customer, NewAccount, NewCustomer, Product, ProductDraft, PromoCode, PromoCodeDraft,
    StaffProfileChanges,
};
use shop_service::contract::AuthContext;
use shop_service::domain::Service;
use shop_service::{Config, ShopServiceModule};
use std::sync::Arc;

pub const STAFF_PASSWORD: &str = "back-office-pass";
pub const CUSTOMER_PASSWORD: &str = "s3cret-customer";

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

/// Money literal with two decimals, e.g. `price(39900)` is 399.00
pub fn price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// A registered customer together with its authenticated context
#[derive(Debug, Clone)]
pub struct TestCustomer {
    pub profile: Customer,
    pub ctx: AuthContext,
}

/// Fully migrated shop backed by a private in-memory SQLite database
pub struct TestShop {
    pub module: ShopServiceModule,
    pub service: Arc<Service>,
    pub db: Arc<DatabaseConnection>,
    pub staff: AuthContext,
}

impl TestShop {
    pub async fn new() -> Self {
        // One connection: every pooled connection would otherwise open its own empty database
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(options)
            .await
            .expect("Failed to open in-memory database");

        let module = ShopServiceModule::new(Config {
            jwt_secret: "integration-test-secret".to_string(),
            ..Config::default()
        });
        module.migrate(&db).await.expect("Failed to migrate");

        let db = Arc::new(db);
        module.init(db.clone()).expect("Failed to init module");
        let service = module.service().expect("Service should be initialized");

        service
            .create_account(
                &AuthContext::superuser(0),
                NewAccount {
                    username: "backoffice".to_string(),
                    email: "backoffice@shop.test".to_string(),
                    first_name: "Back".to_string(),
                    last_name: "Office".to_string(),
                    password: STAFF_PASSWORD.to_string(),
                    is_staff: true,
                    is_superuser: false,
                    profile: StaffProfileChanges::default(),
                },
            )
            .await
            .expect("Failed to create staff account");
        let staff = login(&service, "backoffice", STAFF_PASSWORD).await;

        Self {
            module,
            service,
            db,
            staff,
        }
    }

    /// Self-register a customer and log it in
    pub async fn customer(&self, username: &str) -> TestCustomer {
        let profile = self
            .service
            .register_customer(NewCustomer {
                last_name: "Durand".to_string(),
                first_name: username.to_string(),
                email: format!("{username}@mail.test"),
                username: username.to_string(),
                password: CUSTOMER_PASSWORD.to_string(),
                phone: None,
                gender: None,
            })
            .await
            .expect("Failed to register customer");
        let ctx = login(&self.service, username, CUSTOMER_PASSWORD).await;
        TestCustomer { profile, ctx }
    }

    pub async fn product(&self, name: &str, price: Decimal) -> Product {
        self.service
            .create_product(
                &self.staff,
                ProductDraft {
                    name: name.to_string(),
                    price,
                    description: Some(format!("{name} description")),
                    sole_type: Some("rubber".to_string()),
                    raw_materials: Some(serde_json::json!({ "upper": "leather" })),
                    origin: Some("Portugal".to_string()),
                    category_ids: Vec::new(),
                },
            )
            .await
            .expect("Failed to create product")
    }

    pub async fn promo_code(&self, code: &str, rate: Decimal) -> PromoCode {
        self.service
            .create_promo_code(
                &self.staff,
                PromoCodeDraft {
                    code: code.to_string(),
                    rate,
                    order_id: None,
                    start_date: None,
                    end_date: None,
                    active: true,
                },
            )
            .await
            .expect("Failed to create promo code")
    }
}

/// Log in and resolve the access token the way the REST layer does
pub async fn login(service: &Service, username: &str, password: &str) -> AuthContext {
    let tokens = service
        .login(username, password)
        .await
        .expect("Login should succeed");
    service
        .authenticate(&tokens.access)
        .await
        .expect("Fresh access token should authenticate")
}
