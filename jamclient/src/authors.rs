//! Concurrent retrieval of author nodes.

use crate::client::NodeFetcher;
use crate::errors::ApiError;
use crate::meta::AuthorMeta;
use crate::protocol::{AuthorNode, NodeResponse};
use crate::types::Author;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Retrieves the given author nodes and returns them in input order.
///
/// One task per id, never more than `max_in_flight` outstanding. Each task
/// reports the position it was spawned for, so the result is index-aligned
/// with `ids` no matter when responses arrive. The first failure aborts
/// every outstanding task, joins them all, and becomes the overall error;
/// no partial list escapes. `max_in_flight == 1` degenerates to a strictly
/// sequential fetch.
pub async fn fetch_authors(
    fetcher: Arc<dyn NodeFetcher>,
    ids: &[i64],
    max_in_flight: usize,
) -> Result<Vec<Author>, ApiError> {
    let limit = max_in_flight.max(1);

    let mut join_set: JoinSet<Result<(usize, Author), ApiError>> = JoinSet::new();
    let mut pending = ids.iter().copied().enumerate();
    let mut resolved: Vec<Option<Author>> = Vec::with_capacity(ids.len());
    resolved.resize_with(ids.len(), || None);

    loop {
        while join_set.len() < limit {
            let Some((position, id)) = pending.next() else {
                break;
            };

            let fetcher = Arc::clone(&fetcher);
            join_set.spawn(async move {
                let author = fetch_author(fetcher.as_ref(), id).await?;
                Ok((position, author))
            });
        }

        let Some(join_result) = join_set.join_next().await else {
            break;
        };

        let result = join_result.unwrap_or_else(|e| Err(ApiError::TaskJoin(e.to_string())));

        match result {
            Ok((position, author)) => resolved[position] = Some(author),
            Err(error) => {
                join_set.abort_all();
                while join_set.join_next().await.is_some() {}
                return Err(error);
            }
        }
    }

    Ok(resolved
        .into_iter()
        .map(|slot| slot.expect("every spawned position joins exactly once"))
        .collect())
}

/// Fetches and decodes one author node, verifying its identity.
async fn fetch_author(fetcher: &dyn NodeFetcher, id: i64) -> Result<Author, ApiError> {
    let wrap = |source: ApiError| ApiError::Author {
        id,
        source: Box::new(source),
    };

    let raw = fetcher.fetch_node(id).await.map_err(wrap)?;
    let response = NodeResponse::<AuthorNode>::from_bytes(&raw)
        .map_err(|e| wrap(ApiError::Body(e)))?;
    let node = response.into_node().ok_or(ApiError::MissingNode { id })?;

    if node.id != id {
        return Err(ApiError::IdentityMismatch {
            requested: id,
            got: node.id,
        });
    }

    let meta = AuthorMeta::from_value(&node.meta);

    Ok(Author {
        id,
        name: node.name,
        path: node.path,
        body: node.body,
        avatar: meta.avatar,
    })
}
