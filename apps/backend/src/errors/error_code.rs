//! Error codes for the Waymark backend.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! a request-handling layer puts on the wire.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Ownership
    /// The game belongs to another player
    InaccessibleAuthentication,

    // Request Validation
    /// Latitude or longitude out of range
    InvalidPosition,
    /// Arrival claimed too far from the destination
    GameNotArrival,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Player not found (or not active)
    PlayerNotFound,
    /// Game not found
    GameNotFound,
    /// No result has been recorded for the game yet
    GameResultNotExist,
    /// Recommender found no candidate place in the radius
    NoPlaceAvailable,
    /// Game creation could not obtain a destination
    CanNotFindPlace,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Player already has a game in progress
    AlreadyInProgress,
    /// Another place is registered too close
    AlreadyExistsNearby,
    /// Game is already DONE
    GameAlreadyFinished,
    /// A result already exists for the game
    ResultAlreadyRecorded,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Unique constraint violation not attributable to a domain rule
    UniqueViolation,
    /// Foreign key constraint violation
    FkViolation,
    /// Internal error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InaccessibleAuthentication => "INACCESSIBLE_AUTHENTICATION",

            Self::InvalidPosition => "INVALID_POSITION",
            Self::GameNotArrival => "GAME_NOT_ARRIVAL",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::GameResultNotExist => "GAME_RESULT_NOT_EXIST",
            Self::NoPlaceAvailable => "NO_PLACE_AVAILABLE",
            Self::CanNotFindPlace => "CAN_NOT_FIND_PLACE",
            Self::NotFound => "NOT_FOUND",

            Self::AlreadyInProgress => "ALREADY_IN_PROGRESS",
            Self::AlreadyExistsNearby => "ALREADY_EXISTS_NEARBY",
            Self::GameAlreadyFinished => "GAME_ALREADY_FINISHED",
            Self::ResultAlreadyRecorded => "RESULT_ALREADY_RECORDED",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
