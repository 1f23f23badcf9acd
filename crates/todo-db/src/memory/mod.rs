//! In-memory repository implementations
//!
//! Used for the todo resource and for running the whole service without a
//! database (tests, local demos). Locks are never held across an `.await`.

mod sessions;
mod todos;
mod users;

pub use sessions::MemorySessionRepository;
pub use todos::MemoryTodoRepository;
pub use users::MemoryUserStore;
