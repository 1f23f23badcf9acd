//! Value objects - immutable types that represent domain concepts

mod roles;
mod snowflake;

pub use roles::{Role, RoleParseError, RoleSet};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
