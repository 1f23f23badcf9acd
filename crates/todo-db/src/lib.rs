//! # todo-db
//!
//! Storage layer implementing the repository traits of `todo-core`.
//!
//! ## Overview
//!
//! - Connection pool management and schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Entity <-> model mappers
//! - PostgreSQL repositories for users, role grants, and sessions
//! - In-memory repositories for the todo resource and for tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use todo_db::{create_pool, run_migrations, PgSessionRepository, PoolConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!     let sessions = PgSessionRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemorySessionRepository, MemoryTodoRepository, MemoryUserStore};
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{PgSessionRepository, PgUserRepository, PgUserRoleRepository};
