use thiserror::Error;

pub type CompileResult<T> = std::result::Result<T, CompileError>;

/// Error type filters are allowed to fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which calling convention a filter was registered or used with.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Text,
    Ast,
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Ast => write!(f, "ast"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("unknown filter \"{name}\"")]
    UnknownFilter { name: String },

    #[error("unknown ast filter \"{name}\"")]
    UnknownAstFilter { name: String },

    #[error("filter \"{name}\" is registered as a {registered} filter but was used as a {used} filter")]
    FilterKindMismatch {
        name: String,
        registered: FilterKind,
        used: FilterKind,
    },

    #[error("unknown conditional kind \"{kind}\"")]
    UnknownConditional { kind: String },

    /// An error raised by a filter implementation, passed through untouched.
    #[error(transparent)]
    Filter(BoxError),
}

impl CompileError {
    pub(crate) fn unknown_filter(name: &str, kind: FilterKind) -> Self {
        match kind {
            FilterKind::Text => Self::UnknownFilter {
                name: name.to_string(),
            },
            FilterKind::Ast => Self::UnknownAstFilter {
                name: name.to_string(),
            },
        }
    }
}
