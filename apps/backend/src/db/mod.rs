pub mod txn;

use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Centralized helper to access the database connection from AppState.
///
/// Returns `AppError::DbUnavailable` if the state was built without a database.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state
        .db()
        .ok_or_else(|| AppError::db_unavailable("database is not configured"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::game::GameSettings;
    use crate::errors::ErrorCode;

    #[test]
    fn test_require_db_without_db() {
        let app_state = AppState::without_db(GameSettings::default());

        let err = require_db(&app_state).unwrap_err();
        assert!(matches!(err, AppError::DbUnavailable { .. }));
        assert_eq!(err.code(), ErrorCode::DbUnavailable);
    }
}
