//! Session entity <-> model mapper

use todo_core::entities::Session;
use todo_core::value_objects::Snowflake;

use crate::models::SessionModel;

impl From<SessionModel> for Session {
    fn from(model: SessionModel) -> Self {
        Session {
            session_id: model.session_id,
            user_id: Snowflake::new(model.user_id),
            issued_at: model.issued_at,
            expires_at: model.expires_at,
            revoked: model.revoked,
            revoked_at: model.revoked_at,
            replaced_by: model.replaced_by,
        }
    }
}
