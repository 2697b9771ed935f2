use crate::ports::playlist_provider::{PlaylistProvider, PlaylistSnapshot};
use crate::services::playlist_algebra::error::SetAlgebraError;

/// Fetch one playlist's tracks. A single request/response translation: no
/// retries, and paging is left to the provider.
#[tracing::instrument(skip(provider, token))]
pub async fn fetch_playlist_tracks<P: PlaylistProvider + ?Sized>(
    provider: &P,
    playlist_id: &str,
    token: &str,
) -> Result<PlaylistSnapshot, SetAlgebraError> {
    let snapshot = provider
        .get_tracks(playlist_id, token)
        .await
        .map_err(|error| {
            tracing::warn!("Failed to fetch playlist {}: {}", playlist_id, error);
            SetAlgebraError::from(error)
        })?;

    tracing::debug!(
        "Fetched {} tracks from playlist {}",
        snapshot.items.len(),
        snapshot.reference
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::playlist_provider::{MockPlaylistProvider, ProviderError, Track};

    #[tokio::test]
    async fn test_fetch_playlist_tracks() {
        let mut provider = MockPlaylistProvider::new();
        provider
            .expect_get_tracks()
            .times(1)
            .returning(|playlist_id, token| {
                assert_eq!(playlist_id, "pl1");
                assert_eq!(token, "Bearer abc");
                Ok(PlaylistSnapshot {
                    reference: "https://api.spotify.com/v1/playlists/pl1/tracks".into(),
                    items: vec![Track {
                        id: "t1".into(),
                        name: "Track 1".into(),
                        uri: Some("spotify:track:t1".into()),
                    }],
                })
            });

        let snapshot = fetch_playlist_tracks(&provider, "pl1", "Bearer abc")
            .await
            .unwrap();

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].id, "t1");
    }

    #[tokio::test]
    async fn test_fetch_playlist_tracks_surfaces_provider_status() {
        let mut provider = MockPlaylistProvider::new();
        provider.expect_get_tracks().returning(|_, _| {
            Err(ProviderError::Status {
                status: 401,
                message: "The access token expired".into(),
            })
        });

        let result = fetch_playlist_tracks(&provider, "pl1", "token").await;

        assert_eq!(
            result.unwrap_err(),
            SetAlgebraError::Provider {
                status: 401,
                message: "The access token expired".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_playlist_tracks_transport_error() {
        let mut provider = MockPlaylistProvider::new();
        provider
            .expect_get_tracks()
            .returning(|_, _| Err(ProviderError::Transport("timed out".into())));

        let result = fetch_playlist_tracks(&provider, "pl1", "token").await;

        assert!(matches!(result, Err(SetAlgebraError::Transport(_))));
    }
}
