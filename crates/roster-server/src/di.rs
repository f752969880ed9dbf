//! Dependency injection module using Shaku.
//!
//! Two modules, one per storage backend:
//! - `PostgresModule`: PostgreSQL pool and repository
//! - `InMemoryModule`: process-local repository, no database

use roster_config::DatabaseConfig;
use roster_core::RosterResult;
use roster_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, InMemoryUserRepository,
    PgUserRepository, UserRepository,
};
use roster_service::{UserService, UserServiceImpl};
use shaku::{module, HasComponent};
use std::sync::Arc;

// ============================================================================
// Shaku Module Definitions
// ============================================================================

// PostgreSQL-backed module:
// - Database pool and repository
// - User service
module! {
    pub PostgresModule {
        components = [
            DatabasePool,
            PgUserRepository,
            UserServiceImpl,
        ],
        providers = [],
    }
}

// In-memory module for the `memory` backend and tests.
module! {
    pub InMemoryModule {
        components = [
            InMemoryUserRepository,
            UserServiceImpl,
        ],
        providers = [],
    }
}

// ============================================================================
// Module Builders
// ============================================================================

/// Connects to PostgreSQL and builds the module around the pool.
pub async fn build_postgres_module(db_config: &DatabaseConfig) -> RosterResult<Arc<PostgresModule>> {
    let db_pool = DatabasePool::connect(db_config).await?;

    let module = PostgresModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.into_inner(),
        })
        .build();

    Ok(Arc::new(module))
}

/// Builds the in-memory module.
#[must_use]
pub fn build_in_memory_module() -> Arc<InMemoryModule> {
    Arc::new(InMemoryModule::builder().build())
}

// ============================================================================
// Resolver Traits
// ============================================================================

/// Trait for resolving services from modules.
pub trait ServiceResolver {
    /// Resolves the user service from the module.
    fn user_service(&self) -> Arc<dyn UserService>;
}

impl ServiceResolver for PostgresModule {
    fn user_service(&self) -> Arc<dyn UserService> {
        self.resolve()
    }
}

impl ServiceResolver for InMemoryModule {
    fn user_service(&self) -> Arc<dyn UserService> {
        self.resolve()
    }
}

/// Trait for resolving the repository from modules.
pub trait RepositoryResolver {
    /// Resolves the user repository from the module.
    fn user_repository(&self) -> Arc<dyn UserRepository>;
}

impl RepositoryResolver for PostgresModule {
    fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.resolve()
    }
}

impl RepositoryResolver for InMemoryModule {
    fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.resolve()
    }
}

/// Trait for resolving the database pool from modules that have one.
pub trait DatabaseResolver {
    /// Resolves the database pool from the module.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl DatabaseResolver for PostgresModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_service::CreateUserRequest;

    #[test]
    fn test_module_types_exist() {
        fn _assert_service_resolver<T: ServiceResolver>() {}
        fn _assert_repository_resolver<T: RepositoryResolver>() {}
        fn _assert_database_resolver<T: DatabaseResolver>() {}

        _assert_service_resolver::<PostgresModule>();
        _assert_service_resolver::<InMemoryModule>();
        _assert_repository_resolver::<PostgresModule>();
        _assert_repository_resolver::<InMemoryModule>();
        _assert_database_resolver::<PostgresModule>();
    }

    #[tokio::test]
    async fn test_in_memory_module_shares_repository() {
        let module = build_in_memory_module();
        let service = module.user_service();

        service
            .create(CreateUserRequest::new("Ada", "Lovelace", "ada@x.com"))
            .await
            .unwrap();

        let stored = module.user_repository().find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].email, "ada@x.com");
    }
}
