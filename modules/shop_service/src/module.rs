//! Module declaration and lifecycle: init, migrate, REST registration

use crate::config::Config;
use crate::contract::OrderWorkflowApi;
use crate::domain::{Repositories, Service};
use crate::infra::auth::{Argon2Hasher, JwtAuthority};
use crate::infra::storage::repositories::{
    SeaOrmAccountRepository, SeaOrmCatalogRepository, SeaOrmCustomerRepository,
    SeaOrmOrderRepository, SeaOrmOrganizationRepository,
};
use anyhow::{anyhow, Result};
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shop service module
pub struct ShopServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
    client: RwLock<Option<Arc<dyn OrderWorkflowApi>>>,
}

impl Default for ShopServiceModule {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ShopServiceModule {
    pub fn new(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            service: RwLock::new(None),
            client: RwLock::new(None),
        }
    }

    /// Build repositories, auth adapters, the domain service and the native client
    pub fn init(&self, db: Arc<DatabaseConnection>) -> Result<()> {
        let cfg = self.config.read().clone();
        if cfg.jwt_secret == "change-me" {
            tracing::warn!("jwt_secret is the built-in default; set shop.jwt_secret");
        }

        let repos = Repositories {
            accounts: Arc::new(SeaOrmAccountRepository::new(db.clone())),
            catalog: Arc::new(SeaOrmCatalogRepository::new(db.clone())),
            customers: Arc::new(SeaOrmCustomerRepository::new(db.clone())),
            orders: Arc::new(SeaOrmOrderRepository::new(db.clone())),
            organization: Arc::new(SeaOrmOrganizationRepository::new(db)),
        };
        let tokens = Arc::new(JwtAuthority::from_config(&cfg));
        let passwords = Arc::new(Argon2Hasher::new());

        let service = Arc::new(Service::new(repos, tokens, passwords, cfg));
        *self.service.write() = Some(service.clone());

        let client: Arc<dyn OrderWorkflowApi> =
            Arc::new(crate::api::native::NativeClient::new(service));
        *self.client.write() = Some(client);

        tracing::info!("Shop service initialized with native client");
        Ok(())
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Shop service migrations completed");
        Ok(())
    }

    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow!("Service not initialized"))
    }

    /// In-process order workflow client
    pub fn client(&self) -> Result<Arc<dyn OrderWorkflowApi>> {
        self.client
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow!("Service not initialized"))
    }

    /// Mount the `/api` routes on `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;

        tracing::info!("Registering shop service REST routes");
        crate::api::rest::routes::register_routes(router, service)
    }
}
