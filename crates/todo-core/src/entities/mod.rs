//! Domain entities - core business objects

mod session;
mod todo;
mod user;

pub use session::{Session, SessionState};
pub use todo::Todo;
pub use user::User;
