//! Role name rows -> RoleSet

use todo_core::value_objects::{Role, RoleSet};
use tracing::warn;

/// Fold stored role names into a set
///
/// Unknown names are skipped. The table has a CHECK constraint, so this only
/// happens if the schema and the enum drift apart.
pub fn role_set_from_names<I, S>(names: I) -> RoleSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| match name.as_ref().parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                warn!(error = %e, "Ignoring unknown role row");
                None
            }
        })
        .collect()
}
