use stratus_types::EntityKind;

/// Boxed error from an external collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from account, container, and object operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The entity being created already exists.
    #[error("{kind} already exists: {name}")]
    EntityAlreadyExists { kind: EntityKind, name: String },

    /// The entity being read, changed, or deleted does not exist.
    #[error("{kind} does not exist: {name}")]
    EntityDoesNotExist { kind: EntityKind, name: String },

    /// A container still holds objects and cannot be deleted.
    #[error("container not empty: {name}")]
    ContainerNotEmpty { name: String },

    /// Any other failure, typically from an external collaborator.
    #[error("command failed: {reason}")]
    CommandFailed {
        reason: String,
        #[source]
        source: Option<BoxError>,
    },
}

/// Classification of a [`StoreError`]. Callers branch on this, never on
/// message text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EntityAlreadyExists,
    EntityDoesNotExist,
    ContainerNotEmpty,
    GenericCommandFailure,
}

impl StoreError {
    pub fn already_exists(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::EntityAlreadyExists {
            kind,
            name: name.into(),
        }
    }

    pub fn does_not_exist(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::EntityDoesNotExist {
            kind,
            name: name.into(),
        }
    }

    pub fn command_failed(reason: impl Into<String>) -> Self {
        Self::CommandFailed {
            reason: reason.into(),
            source: None,
        }
    }

    /// Wrap a collaborator failure.
    pub fn command_failed_with(reason: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::CommandFailed {
            reason: reason.into(),
            source: Some(source.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::EntityAlreadyExists { .. } => ErrorKind::EntityAlreadyExists,
            StoreError::EntityDoesNotExist { .. } => ErrorKind::EntityDoesNotExist,
            StoreError::ContainerNotEmpty { .. } => ErrorKind::ContainerNotEmpty,
            StoreError::CommandFailed { .. } => ErrorKind::GenericCommandFailure,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors loading an [`AccountConfig`](crate::AccountConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl From<ConfigError> for StoreError {
    fn from(err: ConfigError) -> Self {
        StoreError::command_failed_with("account configuration", err)
    }
}
