use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForYouError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown {kind} `{id}`")]
    UnknownEntity { kind: EntityKind, id: String },
    #[error("duplicate {kind} id `{id}` in catalog")]
    DuplicateId { kind: EntityKind, id: String },
    #[error("route `{0}` is already registered")]
    DuplicateRoute(String),
    #[error("no destination registered for route `{0}`")]
    UnknownRoute(String),
    #[error("cannot save interests: nothing is followed")]
    NothingSelected,
    #[error("configuration directory is unavailable")]
    NoConfigDir,
    #[error("provider task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type ForYouResult<T> = Result<T, ForYouError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Topic,
    Author,
    NewsResource,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Topic => "topic",
            EntityKind::Author => "author",
            EntityKind::NewsResource => "news resource",
        };
        f.write_str(name)
    }
}
