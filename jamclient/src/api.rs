//! High-level game retrieval.

use crate::authors::fetch_authors;
use crate::client::{NodeClient, NodeFetcher};
use crate::config::Config;
use crate::errors::ApiError;
use crate::meta::{self, GameMeta};
use crate::protocol::{GameNode, NodeResponse};
use crate::types::{Game, NodeSubType, NodeType};
use std::sync::Arc;

/// Client facade: resolves a game slug within the configured event and
/// assembles the full record, authors included.
pub struct Api {
    client: Arc<NodeClient>,
    config: Config,
}

impl Api {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let client = Arc::new(NodeClient::new(&config.api)?);

        Ok(Api { client, config })
    }

    /// Retrieves one game by its slug.
    ///
    /// Any retrieval failure along the way is fatal to the whole call; a
    /// walk that resolves to nothing is [`ApiError::GameNotFound`].
    pub async fn get_game(&self, name: &str) -> Result<Game, ApiError> {
        let event = &self.config.event;
        let walk = self
            .client
            .walk_event_game(&event.slug, event.number, name)
            .await?;

        if walk.node_id <= 0 {
            return Err(ApiError::GameNotFound(name.to_owned()));
        }

        let raw = self.client.fetch_node(walk.node_id).await?;
        let node = NodeResponse::<GameNode>::from_bytes(&raw)?
            .into_node()
            .ok_or(ApiError::MissingNode { id: walk.node_id })?;

        if node.id != walk.node_id {
            return Err(ApiError::IdentityMismatch {
                requested: walk.node_id,
                got: node.id,
            });
        }

        if node.node_type != NodeType::Item || node.subtype != NodeSubType::Game {
            return Err(ApiError::NotAGame {
                id: node.id,
                node_type: node.node_type,
                subtype: node.subtype,
            });
        }

        // The API serializes an empty metadata map as an empty array.
        let meta = match node.meta.as_object() {
            Some(raw_meta) => meta::decode_game_meta(raw_meta)?,
            None => GameMeta::default(),
        };

        tracing::debug!(
            game = node.id,
            authors = meta.author_ids.len(),
            links = meta.links.len(),
            "resolved game node"
        );

        let fetcher: Arc<dyn NodeFetcher> = self.client.clone();
        let authors =
            fetch_authors(fetcher, &meta.author_ids, self.config.api.max_in_flight).await?;

        Ok(Game {
            id: node.id,
            name: node.name,
            path: node.path,
            body: node.body,
            submission_type: node.subsubtype,
            cover: meta.cover,
            authors,
            links: meta.links,
            published: node.published,
            created: node.created,
            modified: node.modified,
        })
    }
}
