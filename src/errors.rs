use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for repository operations.
///
/// Each kind describes a category of failure so callers can react precisely:
/// argument-shape problems, bad identifiers, swallowed index failures and so on.
///
/// # Examples
///
/// ```rust,ignore
/// use baserepo::errors::{RepoError, ErrorKind, RepoResult};
///
/// fn example() -> RepoResult<()> {
///     Err(RepoError::new("pipeline must be an array", ErrorKind::TypeMismatch))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// An argument was present but had the wrong shape or type
    TypeMismatch,
    /// The provided identifier value is not a valid ObjectId
    InvalidId,
    /// Error while rewriting or interpreting a filter document
    FilterError,
    /// Error reported by the collection while creating an index
    IndexingError,
    /// Error while extracting metadata from a schema description
    ValidationError,
    /// The operation is not valid in the current context
    InvalidOperation,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::TypeMismatch => write!(f, "Type mismatch"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::FilterError => write!(f, "Filter error"),
            ErrorKind::IndexingError => write!(f, "Indexing error"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom repository error type.
///
/// `RepoError` carries the error message, its [ErrorKind], an optional cause and
/// a captured backtrace. Argument-shape errors always name the offending
/// parameter, the actual type received and the expected type(s) in the message.
#[derive(Clone)]
pub struct RepoError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<RepoError>>,
    backtrace: Backtrace,
}

impl RepoError {
    /// Creates a new `RepoError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        RepoError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Backtrace::new(),
        }
    }

    /// Creates a new `RepoError` with a cause error attached.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: RepoError) -> Self {
        RepoError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&RepoError> {
        self.cause.as_deref()
    }
}

/// Builds the canonical argument-shape error for a wrongly typed parameter.
///
/// The message names the parameter, the type actually received and the
/// expected type(s), e.g. `Param "id" is of type null! Type object-id or
/// string expected`.
pub fn type_mismatch(param: &str, actual: &str, expected: &str) -> RepoError {
    RepoError::new(
        &format!(
            "Param \"{}\" is of type {}! Type {} expected",
            param, actual, expected
        ),
        ErrorKind::TypeMismatch,
    )
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for repository operations.
///
/// `RepoResult<T>` is shorthand for `Result<T, RepoError>`. All fallible
/// operations in this crate return this type.
pub type RepoResult<T> = Result<T, RepoError>;

impl From<String> for RepoError {
    fn from(msg: String) -> Self {
        RepoError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for RepoError {
    fn from(msg: &str) -> Self {
        RepoError::new(msg, ErrorKind::InternalError)
    }
}
