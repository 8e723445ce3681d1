use crate::feddit::types::ResourceId;
use crate::feddit::CommentSource;
use crate::FedditError;

/// Resolves a forum title to its Feddit id
///
/// Lists every forum (one round-trip, nothing cached) and returns the id of the first
/// one whose title equals `name` ignoring case. Transport failures are not retried.
///
/// # Returns
///
/// * `Ok(ResourceId)` - Id of the matching forum
/// * `Err(FedditError::ForumNotFound)` - No title matches
/// * `Err(_)` - The forum listing could not be fetched
pub async fn resolve_forum_id<S>(source: &S, name: &str) -> Result<ResourceId, FedditError>
where
    S: CommentSource + ?Sized,
{
    tracing::info!("Fetching ID for subfeddit '{}'", name);

    let forums = source.list_forums().await.map_err(|e| {
        tracing::error!("Failed to fetch subfeddits from Feddit: {}", e);
        e
    })?;

    tracing::debug!(
        "Available subfeddits: {:?}",
        forums.iter().map(|f| f.title.as_str()).collect::<Vec<_>>()
    );

    let wanted = name.to_lowercase();
    match forums.into_iter().find(|f| f.title.to_lowercase() == wanted) {
        Some(forum) => Ok(forum.id),
        None => {
            tracing::warn!("No matching subfeddit found for name: '{}'", name);
            Err(FedditError::ForumNotFound {
                name: name.to_string(),
            })
        }
    }
}
