//! # Roster Repository
//!
//! Data access for users.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>
//! PgUserRepository | InMemoryUserRepository
//!   ↓
//! PostgreSQL (sqlx)  | BTreeMap behind a mutex
//! ```

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod traits;

pub use memory::InMemoryUserRepository;
pub use pool::*;
pub use postgres::PgUserRepository;
pub use traits::*;
