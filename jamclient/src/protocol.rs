//! Wire types for the node API.
//!
//! Every node endpoint wraps its payload in a one-element `node` array:
//!
//! ```json
//! {
//!   "node": [
//!     {
//!       "id": 235120,
//!       "type": "item",
//!       "subtype": "game",
//!       "subsubtype": "jam",
//!       "name": "Starship",
//!       "meta": { "author": [18827], "link-1": "https://..." }
//!     }
//!   ]
//! }
//! ```
//!
//! `meta` stays a raw [`Value`] here; converting it into typed records is a
//! second, explicit phase (see [`crate::meta`]).

use crate::types::{NodeSubType, NodeType, SubmissionType};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Response of the `walk/` slug-resolution endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct WalkResponse {
    /// Id of the node the walked path resolved to; 0 when nothing matched.
    #[serde(default)]
    pub node_id: i64,
}

/// Envelope common to all node endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeResponse<T> {
    #[serde(default)]
    pub node: Vec<T>,
}

impl<T> NodeResponse<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    pub fn from_bytes(bytes: &Bytes) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

impl<T> NodeResponse<T> {
    /// Unwraps the one-element envelope.
    pub fn into_node(self) -> Option<T> {
        self.node.into_iter().next()
    }
}

/// Raw body of a game node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameNode {
    pub id: i64,
    pub parent: i64,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub subtype: NodeSubType,
    pub subsubtype: SubmissionType,
    pub name: String,
    pub path: String,
    pub body: String,
    /// Flat-key metadata, decoded by [`crate::meta::decode_game_meta`].
    pub meta: Value,
    pub published: Option<DateTime<Utc>>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

/// Raw body of an author (user) node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthorNode {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub body: String,
    /// Decoded tolerantly by [`crate::meta::AuthorMeta`].
    pub meta: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn game_node_envelope_decodes() {
        let bytes = Bytes::from(
            serde_json::to_vec(&json!({
                "node": [{
                    "id": 235120,
                    "type": "item",
                    "subtype": "game",
                    "subsubtype": "jam",
                    "name": "Starship",
                    "path": "/events/ludum-dare/48/starship",
                    "body": "a game",
                    "published": "2021-04-27T01:02:38Z",
                    "meta": { "author": [18827] }
                }]
            }))
            .unwrap(),
        );

        let node = NodeResponse::<GameNode>::from_bytes(&bytes)
            .unwrap()
            .into_node()
            .unwrap();

        assert_eq!(node.id, 235120);
        assert_eq!(node.node_type, NodeType::Item);
        assert_eq!(node.subtype, NodeSubType::Game);
        assert_eq!(node.subsubtype, SubmissionType::Jam);
        assert!(node.published.is_some());
        assert!(node.meta.is_object());
    }

    #[test]
    fn absent_fields_take_defaults() {
        let bytes = Bytes::from(serde_json::to_vec(&json!({ "node": [{ "id": 5 }] })).unwrap());

        let node = NodeResponse::<AuthorNode>::from_bytes(&bytes)
            .unwrap()
            .into_node()
            .unwrap();

        assert_eq!(node.id, 5);
        assert_eq!(node.name, "");
        assert!(node.meta.is_null());
    }

    #[test]
    fn empty_envelope_yields_no_node() {
        let bytes = Bytes::from_static(b"{}");

        let response = NodeResponse::<AuthorNode>::from_bytes(&bytes).unwrap();

        assert!(response.into_node().is_none());
    }

    #[test]
    fn walk_response_defaults_to_zero() {
        let missing: WalkResponse = serde_json::from_str("{}").unwrap();
        let found: WalkResponse = serde_json::from_value(json!({ "node_id": 311 })).unwrap();

        assert_eq!(missing.node_id, 0);
        assert_eq!(found.node_id, 311);
    }
}
