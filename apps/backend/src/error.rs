use thiserror::Error;
use tracing::error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;

/// Coarse classification a request-handling layer maps onto its own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The request was understood but rejected by a game rule
    Invalid,
    NotFound,
    Forbidden,
    Conflict,
    /// Infrastructure failure or broken invariant; never caused by the caller
    Internal,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Forbidden: {detail}")]
    Forbidden { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Forbidden { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Forbidden { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Db { detail }
            | AppError::DbUnavailable { detail }
            | AppError::Internal { detail, .. }
            | AppError::Config { detail } => detail,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Validation { .. } => ErrorCategory::Invalid,
            AppError::NotFound { .. } => ErrorCategory::NotFound,
            AppError::Forbidden { .. } => ErrorCategory::Forbidden,
            AppError::Conflict { .. } => ErrorCategory::Conflict,
            AppError::Db { .. }
            | AppError::DbUnavailable { .. }
            | AppError::Internal { .. }
            | AppError::Config { .. } => ErrorCategory::Internal,
        }
    }

    /// True for expected domain outcomes the caller can recover from.
    pub fn is_domain(&self) -> bool {
        self.category() != ErrorCategory::Internal
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Forbidden {
            code: ErrorCode::InaccessibleAuthentication,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable(detail: impl Into<String>) -> Self {
        Self::DbUnavailable {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidPosition => ErrorCode::InvalidPosition,
                    ValidationKind::GameNotArrival => ErrorCode::GameNotArrival,
                    ValidationKind::Other(_) => ErrorCode::ValidationError,
                };
                AppError::invalid(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::AlreadyInProgress => ErrorCode::AlreadyInProgress,
                    ConflictKind::AlreadyExistsNearby => ErrorCode::AlreadyExistsNearby,
                    ConflictKind::GameAlreadyFinished => ErrorCode::GameAlreadyFinished,
                    ConflictKind::ResultAlreadyRecorded => ErrorCode::ResultAlreadyRecorded,
                    ConflictKind::Other(ref name) if name == "UniqueViolation" => {
                        ErrorCode::UniqueViolation
                    }
                    ConflictKind::Other(ref name) if name == "FkViolation" => {
                        ErrorCode::FkViolation
                    }
                    ConflictKind::Other(_) => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::GameResult => ErrorCode::GameResultNotExist,
                    NotFoundKind::Place => ErrorCode::NoPlaceAvailable,
                    NotFoundKind::Destination => ErrorCode::CanNotFindPlace,
                    NotFoundKind::Other(_) => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Forbidden(detail) => AppError::forbidden(detail),
            DomainError::Infra(kind, detail) => {
                // Infra failures are defects from the caller's point of view.
                error!(kind = ?kind, detail = %detail, "infrastructure failure");
                match kind {
                    InfraErrorKind::DbUnavailable => AppError::db_unavailable(detail),
                    InfraErrorKind::DataCorruption => AppError::Internal {
                        code: ErrorCode::DataCorruption,
                        detail,
                    },
                    InfraErrorKind::Other(_) => AppError::db(detail),
                }
            }
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(DomainError::from(e))
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_not_found_maps_to_specific_codes() {
        let cases = [
            (NotFoundKind::Player, ErrorCode::PlayerNotFound),
            (NotFoundKind::Game, ErrorCode::GameNotFound),
            (NotFoundKind::GameResult, ErrorCode::GameResultNotExist),
            (NotFoundKind::Place, ErrorCode::NoPlaceAvailable),
            (NotFoundKind::Destination, ErrorCode::CanNotFindPlace),
        ];
        for (kind, code) in cases {
            let err = AppError::from(DomainError::not_found(kind, "missing"));
            assert_eq!(err.code(), code);
            assert_eq!(err.category(), ErrorCategory::NotFound);
            assert!(err.is_domain());
        }
    }

    #[test]
    fn ownership_mismatch_is_forbidden() {
        let err = AppError::from(DomainError::forbidden("not yours"));
        assert_eq!(err.code(), ErrorCode::InaccessibleAuthentication);
        assert_eq!(err.category(), ErrorCategory::Forbidden);
    }

    #[test]
    fn game_not_arrival_is_a_recoverable_rejection() {
        let err = AppError::from(DomainError::validation(
            ValidationKind::GameNotArrival,
            "too far",
        ));
        assert_eq!(err.code(), ErrorCode::GameNotArrival);
        assert_eq!(err.category(), ErrorCategory::Invalid);
        assert!(err.is_domain());
    }

    #[test]
    fn infra_errors_are_internal() {
        let err = AppError::from(DomainError::infra(
            InfraErrorKind::DbUnavailable,
            "down",
        ));
        assert_eq!(err.code(), ErrorCode::DbUnavailable);
        assert!(!err.is_domain());

        let err = AppError::from(DomainError::infra(
            InfraErrorKind::DataCorruption,
            "bad row",
        ));
        assert_eq!(err.code(), ErrorCode::DataCorruption);
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn detail_is_preserved() {
        let err = AppError::conflict(ErrorCode::AlreadyInProgress, "round 7 is active");
        assert_eq!(err.detail(), "round 7 is active");
        assert_eq!(err.to_string(), "Conflict: round 7 is active");
    }
}
