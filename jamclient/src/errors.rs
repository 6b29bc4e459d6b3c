use crate::types::{NodeSubType, NodeType};
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T, E = ApiError> = std::result::Result<T, E>;

/// Errors raised while decoding a node's flat-key metadata.
///
/// These always indicate format drift or data corruption on the remote side
/// and are never retried.
#[derive(Error, Debug)]
pub enum MetaError {
    /// A `link`-prefixed key carries no parseable numeric group index.
    #[error("link key {key:?} has no parseable numeric index")]
    MalformedKey { key: String },

    /// A metadata value does not have the type the encoding mandates.
    #[error("metadata field {key:?} is not {expected}")]
    TypeMismatch { key: String, expected: &'static str },
}

/// Errors that can occur while retrieving nodes from the API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("upstream returned {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("upstream retries exceeded")]
    RetriesExceeded,

    #[error("could not parse node body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("malformed game metadata: {0}")]
    Meta(#[from] MetaError),

    #[error("no game found for slug {0:?}")]
    GameNotFound(String),

    #[error("node {id} missing from response envelope")]
    MissingNode { id: i64 },

    /// The upstream answered with a node other than the one requested.
    /// A correctness violation on the retrieval layer, never retried.
    #[error("requested node {requested} but upstream returned node {got}")]
    IdentityMismatch { requested: i64, got: i64 },

    #[error("node {id} is not a game (type {node_type:?}, subtype {subtype:?})")]
    NotAGame {
        id: i64,
        node_type: NodeType,
        subtype: NodeSubType,
    },

    /// Retrieval failure for a single author, wrapped with its id
    #[error("could not load author {id}: {source}")]
    Author {
        id: i64,
        #[source]
        source: Box<ApiError>,
    },

    #[error("author task failed: {0}")]
    TaskJoin(String),
}
