use crate::ports::playlist_provider::PlaylistProvider;
use crate::services::playlist_algebra::error::SetAlgebraError;
use crate::services::playlist_algebra::fetch::fetch_playlist_tracks;
use crate::services::playlist_algebra::materializer::{NewPlaylistSummary, materialize};
use crate::services::playlist_algebra::set_ops::SetOperation;

/// Everything needed to combine two playlists into a new one.
#[derive(Debug, Clone)]
pub struct SetOperationRequest {
    pub token: String,
    pub first_playlist: String,
    pub second_playlist: String,
    pub operation: SetOperation,
    /// Name of the new playlist; a placeholder is generated when blank.
    pub name: Option<String>,
    /// Owner of the new playlist; defaults to the token's user.
    pub owner: Option<String>,
}

pub struct SetAlgebraService<P: PlaylistProvider> {
    provider: P,
}

impl<P: PlaylistProvider> SetAlgebraService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Fetch both playlists, apply the operation and create a playlist with
    /// the result.
    ///
    /// The two fetches run concurrently and are only combined once both have
    /// succeeded. Any failure aborts the run; nothing is retried.
    #[tracing::instrument(
        skip_all,
        fields(
            operation = %request.operation,
            first = %request.first_playlist,
            second = %request.second_playlist
        )
    )]
    pub async fn run(
        &self,
        request: &SetOperationRequest,
    ) -> Result<NewPlaylistSummary, SetAlgebraError> {
        let (first, second) = futures::try_join!(
            fetch_playlist_tracks(&self.provider, &request.first_playlist, &request.token),
            fetch_playlist_tracks(&self.provider, &request.second_playlist, &request.token),
        )?;

        let tracks = request.operation.apply(&first, &second);
        tracing::debug!(
            "{} of {} and {} tracks produced {} tracks",
            request.operation,
            first.items.len(),
            second.items.len(),
            tracks.len()
        );

        if tracks.is_empty() {
            return Err(SetAlgebraError::EmptyResult {
                operation: request.operation,
            });
        }

        let summary = materialize(
            &self.provider,
            &request.token,
            request.owner.as_deref(),
            &tracks,
            request.name.as_deref(),
        )
        .await?;

        tracing::info!(
            "Created playlist '{}' ({}) with {} tracks",
            summary.name,
            summary.href,
            summary.tracks
        );

        Ok(summary)
    }
}
