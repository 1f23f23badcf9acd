use todo_common::AuthFailure;
use todo_core::RoleSet;

/// Role-based access check
pub struct RoleGate;

impl RoleGate {
    /// Allow when `granted` shares a role with `required`
    ///
    /// An empty `required` set means the route has no role requirement.
    pub fn authorize(granted: RoleSet, required: RoleSet) -> Result<(), AuthFailure> {
        if required.is_empty() || granted.grants_any(required) {
            Ok(())
        } else {
            Err(AuthFailure::Forbidden)
        }
    }
}
