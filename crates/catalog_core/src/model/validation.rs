//! Field-level validation errors and shared limits.

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Maximum title length (in characters) for games and genres.
pub const TITLE_MAX_CHARS: usize = 200;
/// Maximum game description length (in characters).
pub const DESCRIPTION_MAX_CHARS: usize = 2000;
/// Maximum username length (in characters).
pub const USERNAME_MAX_CHARS: usize = 200;
/// Maximum password length (in characters).
pub const PASSWORD_MAX_CHARS: usize = 200;
/// How far into the future a release date may be set, in days.
pub const RELEASE_HORIZON_DAYS: i64 = 365;
/// Earliest accepted release year. Keeps dates inside four-digit RFC 3339.
pub const EARLIEST_RELEASE_YEAR: i32 = 1;
/// Lowest accepted rating value.
pub const RATING_MIN: i32 = 1;
/// Highest accepted rating value.
pub const RATING_MAX: i32 = 5;

/// Validation failure raised by entity constructors and update methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty or whitespace-only.
    TitleEmpty,
    /// Title exceeds [`TITLE_MAX_CHARS`].
    TitleTooLong { actual: usize },
    /// Description exceeds [`DESCRIPTION_MAX_CHARS`].
    DescriptionTooLong { actual: usize },
    /// Release date is beyond the [`RELEASE_HORIZON_DAYS`] horizon.
    ReleaseDateTooFar,
    /// Release date falls before year [`EARLIEST_RELEASE_YEAR`].
    ReleaseDateTooEarly,
    /// A required identity is the nil UUID. Carries the field name.
    NilId(&'static str),
    UsernameEmpty,
    UsernameTooLong { actual: usize },
    PasswordEmpty,
    PasswordTooLong { actual: usize },
    /// Role text is not one of `user|admin`.
    InvalidRole(String),
    /// Rating is outside `RATING_MIN..=RATING_MAX`.
    RatingOutOfRange(i32),
}

impl ValidationError {
    /// Name of the offending field, for callers shaping error responses.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TitleEmpty | Self::TitleTooLong { .. } => "title",
            Self::DescriptionTooLong { .. } => "description",
            Self::ReleaseDateTooFar | Self::ReleaseDateTooEarly => "release_date",
            Self::NilId(field) => field,
            Self::UsernameEmpty | Self::UsernameTooLong { .. } => "username",
            Self::PasswordEmpty | Self::PasswordTooLong { .. } => "password",
            Self::InvalidRole(_) => "user_role",
            Self::RatingOutOfRange(_) => "rating",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleEmpty => write!(f, "title is required"),
            Self::TitleTooLong { actual } => write!(
                f,
                "title must be at most {TITLE_MAX_CHARS} characters, got {actual}"
            ),
            Self::DescriptionTooLong { actual } => write!(
                f,
                "description must be at most {DESCRIPTION_MAX_CHARS} characters, got {actual}"
            ),
            Self::ReleaseDateTooFar => write!(
                f,
                "release date cannot be more than {RELEASE_HORIZON_DAYS} days in the future"
            ),
            Self::ReleaseDateTooEarly => write!(
                f,
                "release date cannot be before year {EARLIEST_RELEASE_YEAR}"
            ),
            Self::NilId(field) => write!(f, "{field} must not be the nil uuid"),
            Self::UsernameEmpty => write!(f, "username is required"),
            Self::UsernameTooLong { actual } => write!(
                f,
                "username must be at most {USERNAME_MAX_CHARS} characters, got {actual}"
            ),
            Self::PasswordEmpty => write!(f, "password is required"),
            Self::PasswordTooLong { actual } => write!(
                f,
                "password must be at most {PASSWORD_MAX_CHARS} characters, got {actual}"
            ),
            Self::InvalidRole(value) => {
                write!(f, "unsupported user role `{value}`; expected user|admin")
            }
            Self::RatingOutOfRange(value) => write!(
                f,
                "rating must be between {RATING_MIN} and {RATING_MAX}, got {value}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Rejects the nil UUID for a required identity field.
pub fn require_id(id: Uuid, field: &'static str) -> Result<Uuid, ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::NilId(field));
    }
    Ok(id)
}

/// Validates a game or genre title as given.
pub(crate) fn check_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::TitleEmpty);
    }
    let actual = title.chars().count();
    if actual > TITLE_MAX_CHARS {
        return Err(ValidationError::TitleTooLong { actual });
    }
    Ok(())
}

pub(crate) fn check_rating(rating: i32) -> Result<i32, ValidationError> {
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange(rating));
    }
    Ok(rating)
}
