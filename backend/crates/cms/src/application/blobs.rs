//! Best-effort blob cleanup

use crate::domain::services::BlobStore;

/// Destroy each blob, logging failures instead of returning them.
/// Returns how many were destroyed.
pub async fn destroy_all<S, I>(blobs: &S, public_ids: I) -> usize
where
    S: BlobStore,
    I: IntoIterator<Item = String>,
{
    let mut destroyed = 0;
    for public_id in public_ids {
        match blobs.destroy(&public_id).await {
            Ok(()) => destroyed += 1,
            Err(e) => {
                tracing::warn!(public_id = %public_id, error = %e, "Blob cleanup failed");
            }
        }
    }
    destroyed
}
