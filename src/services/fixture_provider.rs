use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::ports::playlist_provider::{
    PlaylistProvider, PlaylistSnapshot, ProviderError, ProviderFactory, Track,
};

/// A playlist served by the fixture provider, as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistFixture {
    pub id: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Playlist created through the fixture provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPlaylist {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub uris: Vec<String>,
}

/// In-memory `PlaylistProvider` serving playlists from config fixtures.
///
/// Playlists it creates only live as long as the instance, which is one
/// request when handed out by `FixtureProviderFactory`.
pub struct FixturePlaylistProvider {
    user_id: String,
    playlists: Arc<HashMap<String, Vec<Track>>>,
    created: Mutex<Vec<CreatedPlaylist>>,
}

impl FixturePlaylistProvider {
    pub fn new(user_id: String, playlists: Arc<HashMap<String, Vec<Track>>>) -> Self {
        Self {
            user_id,
            playlists,
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn created_playlists(&self) -> Vec<CreatedPlaylist> {
        self.created
            .lock()
            .map(|created| created.clone())
            .unwrap_or_default()
    }

    fn check_token(token: &str) -> Result<(), ProviderError> {
        if token.trim().is_empty() {
            return Err(ProviderError::Status {
                status: 401,
                message: "No token provided".to_string(),
            });
        }
        Ok(())
    }

    fn with_created<T>(
        &self,
        f: impl FnOnce(&mut Vec<CreatedPlaylist>) -> Result<T, ProviderError>,
    ) -> Result<T, ProviderError> {
        let mut created = self
            .created
            .lock()
            .map_err(|_| ProviderError::Transport("Fixture provider state poisoned".to_string()))?;
        f(&mut created)
    }
}

#[async_trait::async_trait]
impl PlaylistProvider for FixturePlaylistProvider {
    async fn get_tracks(
        &self,
        playlist_id: &str,
        token: &str,
    ) -> Result<PlaylistSnapshot, ProviderError> {
        Self::check_token(token)?;

        let items = self
            .playlists
            .get(playlist_id)
            .cloned()
            .ok_or_else(|| ProviderError::Status {
                status: 404,
                message: format!("Playlist {} not found", playlist_id),
            })?;

        Ok(PlaylistSnapshot {
            reference: format!("fixture:playlist:{}", playlist_id),
            items,
        })
    }

    async fn who_am_i(&self, token: &str) -> Result<String, ProviderError> {
        Self::check_token(token)?;
        Ok(self.user_id.clone())
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        token: &str,
    ) -> Result<String, ProviderError> {
        Self::check_token(token)?;

        self.with_created(|created| {
            let id = format!("fixture-playlist-{}", created.len() + 1);
            created.push(CreatedPlaylist {
                id: id.clone(),
                owner: user_id.to_string(),
                name: name.to_string(),
                uris: Vec::new(),
            });
            Ok(id)
        })
    }

    async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        token: &str,
    ) -> Result<(), ProviderError> {
        Self::check_token(token)?;

        self.with_created(|created| {
            let playlist = created
                .iter_mut()
                .find(|playlist| playlist.id == playlist_id)
                .ok_or_else(|| ProviderError::Status {
                    status: 404,
                    message: format!("Playlist {} not found", playlist_id),
                })?;
            playlist.uris.extend_from_slice(uris);
            Ok(())
        })
    }
}

/// Hands out a fresh `FixturePlaylistProvider` per request over the same
/// read-only fixtures.
pub struct FixtureProviderFactory {
    user_id: String,
    playlists: Arc<HashMap<String, Vec<Track>>>,
}

impl FixtureProviderFactory {
    pub fn new(user_id: String, fixtures: Vec<PlaylistFixture>) -> Self {
        let playlists = fixtures
            .into_iter()
            .map(|fixture| (fixture.id, fixture.tracks))
            .collect();

        Self {
            user_id,
            playlists: Arc::new(playlists),
        }
    }
}

impl ProviderFactory for FixtureProviderFactory {
    fn connect(&self) -> Result<Box<dyn PlaylistProvider>, ProviderError> {
        Ok(Box::new(FixturePlaylistProvider::new(
            self.user_id.clone(),
            self.playlists.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::playlist_algebra::{SetAlgebraService, SetOperation, SetOperationRequest};

    fn track(id: &str) -> Track {
        Track {
            id: id.into(),
            name: format!("Track {}", id),
            uri: Some(format!("spotify:track:{}", id)),
        }
    }

    fn fixtures() -> Vec<PlaylistFixture> {
        vec![
            PlaylistFixture {
                id: "a".into(),
                tracks: vec![track("1"), track("2")],
            },
            PlaylistFixture {
                id: "b".into(),
                tracks: vec![track("2"), track("3")],
            },
        ]
    }

    fn provider() -> FixturePlaylistProvider {
        let factory = FixtureProviderFactory::new("demo".into(), fixtures());
        FixturePlaylistProvider::new(factory.user_id.clone(), factory.playlists.clone())
    }

    #[tokio::test]
    async fn test_get_tracks() {
        let snapshot = provider().get_tracks("a", "token").await.unwrap();

        assert_eq!(snapshot.reference, "fixture:playlist:a");
        assert_eq!(snapshot.items, vec![track("1"), track("2")]);
    }

    #[tokio::test]
    async fn test_unknown_playlist_is_not_found() {
        let error = provider().get_tracks("zzz", "token").await.unwrap_err();

        assert!(matches!(error, ProviderError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_empty_token_is_unauthorized() {
        let error = provider().who_am_i(" ").await.unwrap_err();

        assert!(matches!(error, ProviderError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_create_and_fill_playlist() {
        let provider = provider();
        let id = provider
            .create_playlist("demo", "Mix", "token")
            .await
            .unwrap();
        provider
            .add_tracks(&id, &["spotify:track:9".to_string()], "token")
            .await
            .unwrap();

        assert_eq!(
            provider.created_playlists(),
            vec![CreatedPlaylist {
                id: "fixture-playlist-1".into(),
                owner: "demo".into(),
                name: "Mix".into(),
                uris: vec!["spotify:track:9".into()],
            }]
        );
    }

    #[tokio::test]
    async fn test_add_tracks_to_unknown_playlist() {
        let error = provider()
            .add_tracks("nope", &[], "token")
            .await
            .unwrap_err();

        assert!(matches!(error, ProviderError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_each_connection_starts_clean() {
        let factory = FixtureProviderFactory::new("demo".into(), fixtures());
        let request = SetOperationRequest {
            token: "token".into(),
            first_playlist: "a".into(),
            second_playlist: "b".into(),
            operation: SetOperation::Union,
            name: None,
            owner: None,
        };

        let first = SetAlgebraService::new(factory.connect().unwrap())
            .run(&request)
            .await
            .unwrap();
        let second = SetAlgebraService::new(factory.connect().unwrap())
            .run(&request)
            .await
            .unwrap();

        assert_eq!(first.href, "fixture-playlist-1");
        assert_eq!(second.href, "fixture-playlist-1");
        assert_eq!(first.tracks, 4);
    }
}
