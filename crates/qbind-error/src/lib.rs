use thiserror::Error;

/// Primary error type for qbind operations.
///
/// Every variant is a caller-side programming error or a configuration
/// problem: the lexer itself never fails, so nothing here describes
/// malformed SQL text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    // === Count Errors ===
    /// A query contains more `?` placeholders than supplied arguments.
    #[error("number of bind-vars exceeds arguments")]
    BindVarsExceedArguments { arguments: usize },

    /// Arguments were left over after every `?` placeholder was consumed.
    #[error("number of bind-vars less than number arguments")]
    BindVarsLessThanArguments { bind_vars: usize, arguments: usize },

    // === Expansion Errors ===
    /// The argument bound to an `IN (?)` placeholder flattened to nothing.
    #[error("empty slice passed to 'in' query")]
    EmptyInExpansion { position: usize },

    // === Type Errors ===
    /// A struct-like argument exposed a field of an unsupported shape.
    #[error("type mismatch for field {field}: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// A binding tag has no leading identifier.
    #[error("invalid bind tag: {tag:?}")]
    InvalidBindTag { tag: String },

    // === Configuration Errors ===
    /// The dialect name is not one of the known placeholder styles.
    #[error("unknown bind dialect: {name}")]
    UnknownDialect { name: String },

    /// A configuration value was rejected.
    #[error("invalid configuration: {detail}")]
    InvalidConfig { detail: String },
}

/// Coarse classification of a [`BindError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Placeholder/argument counts disagree.
    CountMismatch,
    /// An `IN` clause argument expanded to zero values.
    EmptyExpansion,
    /// An argument value has an unsupported shape.
    Type,
    /// Configuration could not be applied.
    Config,
}

impl BindError {
    /// Map this error to its coarse kind.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::BindVarsExceedArguments { .. } | Self::BindVarsLessThanArguments { .. } => {
                ErrorKind::CountMismatch
            }
            Self::EmptyInExpansion { .. } => ErrorKind::EmptyExpansion,
            Self::TypeMismatch { .. } | Self::InvalidBindTag { .. } => ErrorKind::Type,
            Self::UnknownDialect { .. } | Self::InvalidConfig { .. } => ErrorKind::Config,
        }
    }

    /// Whether the error points at the call site rather than configuration.
    ///
    /// Caller errors are never worth retrying: the same arguments will fail
    /// the same way.
    pub const fn is_caller_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Config)
    }

    /// Human-friendly suggestion for fixing this error.
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::BindVarsExceedArguments { .. } => {
                Some("Pass one argument for every `?` placeholder in the query")
            }
            Self::BindVarsLessThanArguments { .. } => {
                Some("Remove extra arguments or add the missing `?` placeholders")
            }
            Self::EmptyInExpansion { .. } => {
                Some("Handle empty collections before building an IN (...) query")
            }
            Self::InvalidBindTag { .. } => {
                Some("Start the bind tag with a column name, e.g. `name; option`")
            }
            Self::UnknownDialect { .. } => Some("Use one of: question, dollar, named, at"),
            Self::TypeMismatch { .. } | Self::InvalidConfig { .. } => None,
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(detail: impl Into<String>) -> Self {
        Self::InvalidConfig {
            detail: detail.into(),
        }
    }
}

/// Result type alias using `BindError`.
pub type Result<T> = std::result::Result<T, BindError>;
