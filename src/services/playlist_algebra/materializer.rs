use serde::{Deserialize, Serialize};

use crate::ports::playlist_provider::{PlaylistProvider, Track};
use crate::services::playlist_algebra::error::SetAlgebraError;
use crate::services::playlist_algebra::name::resolve_playlist_name;

/// Summary of a playlist created from a set operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlaylistSummary {
    pub name: String,
    /// Provider id of the created playlist.
    pub href: String,
    /// Number of tracks attached to the playlist.
    pub tracks: usize,
}

fn track_uris(tracks: &[Track]) -> Result<Vec<String>, SetAlgebraError> {
    tracks
        .iter()
        .map(|track| match track.uri.as_deref() {
            Some(uri) if !uri.is_empty() => Ok(uri.to_string()),
            _ => Err(SetAlgebraError::MissingTrackUri {
                track_id: track.id.clone(),
            }),
        })
        .collect()
}

/// Creates a playlist owned by `owner_hint` (or the token's user when no
/// owner is given) and fills it with `tracks` in a single batch.
///
/// Every track must carry a uri; this is checked before anything is created
/// on the provider. A failure after the playlist was created leaves it in
/// place, partially populated.
#[tracing::instrument(skip(provider, token, tracks), fields(track_count = tracks.len()))]
pub async fn materialize<P: PlaylistProvider + ?Sized>(
    provider: &P,
    token: &str,
    owner_hint: Option<&str>,
    tracks: &[Track],
    requested_name: Option<&str>,
) -> Result<NewPlaylistSummary, SetAlgebraError> {
    let uris = track_uris(tracks)?;

    let user_id = match owner_hint.filter(|owner| !owner.trim().is_empty()) {
        Some(owner) => owner.to_string(),
        None => provider.who_am_i(token).await?,
    };

    let name = resolve_playlist_name(requested_name);
    let playlist_id = provider.create_playlist(&user_id, &name, token).await?;
    tracing::info!("Created playlist '{}' ({}) for {}", name, playlist_id, user_id);

    provider
        .add_tracks(&playlist_id, &uris, token)
        .await
        .map_err(|error| {
            tracing::error!(
                "Playlist {} was created but adding {} tracks failed: {}",
                playlist_id,
                uris.len(),
                error
            );
            SetAlgebraError::from(error)
        })?;

    Ok(NewPlaylistSummary {
        name,
        href: playlist_id,
        tracks: uris.len(),
    })
}
