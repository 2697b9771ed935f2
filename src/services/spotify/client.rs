use std::time::Duration;

use url::Url;

use crate::ports::playlist_provider::{
    PlaylistProvider, PlaylistSnapshot, ProviderError, ProviderFactory, Track,
};
use crate::spotify_rs::client::{SpotifyApiError, SpotifyClient};

impl From<SpotifyApiError> for ProviderError {
    fn from(error: SpotifyApiError) -> Self {
        match error {
            SpotifyApiError::Status { status, message } => ProviderError::Status { status, message },
            other => ProviderError::Transport(other.to_string()),
        }
    }
}

/// Live `PlaylistProvider` talking to the Spotify Web API.
pub struct SpotifyHttpAdapter {
    client: reqwest::Client,
    api_url: Url,
}

impl SpotifyHttpAdapter {
    pub fn new(client: reqwest::Client, api_url: Url) -> Self {
        Self { client, api_url }
    }

    fn spotify(&self, token: &str) -> SpotifyClient {
        SpotifyClient::new(self.client.clone(), self.api_url.clone(), token)
    }
}

#[async_trait::async_trait]
impl PlaylistProvider for SpotifyHttpAdapter {
    #[tracing::instrument(skip(self, token))]
    async fn get_tracks(
        &self,
        playlist_id: &str,
        token: &str,
    ) -> Result<PlaylistSnapshot, ProviderError> {
        let playlist = self.spotify(token).get_playlist_tracks(playlist_id).await?;

        let items = playlist
            .tracks
            .into_iter()
            .filter_map(|track| {
                Some(Track {
                    id: track.id?,
                    name: track.name,
                    uri: track.uri,
                })
            })
            .collect();

        Ok(PlaylistSnapshot {
            reference: playlist.href,
            items,
        })
    }

    #[tracing::instrument(skip_all)]
    async fn who_am_i(&self, token: &str) -> Result<String, ProviderError> {
        let user = self.spotify(token).get_current_user().await?;
        Ok(user.id)
    }

    #[tracing::instrument(skip(self, token))]
    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        token: &str,
    ) -> Result<String, ProviderError> {
        let playlist = self.spotify(token).create_playlist(user_id, name).await?;
        Ok(playlist.id)
    }

    #[tracing::instrument(skip(self, uris, token), fields(uri_count = uris.len()))]
    async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        token: &str,
    ) -> Result<(), ProviderError> {
        self.spotify(token)
            .add_tracks_to_playlist(playlist_id, uris)
            .await?;
        Ok(())
    }
}

/// Builds a new HTTP client for every request from immutable settings.
#[derive(Debug, Clone)]
pub struct SpotifyProviderFactory {
    api_url: Url,
    timeout: Duration,
}

impl SpotifyProviderFactory {
    pub fn new(api_url: Url, timeout: Duration) -> Self {
        Self { api_url, timeout }
    }
}

impl ProviderFactory for SpotifyProviderFactory {
    fn connect(&self) -> Result<Box<dyn PlaylistProvider>, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|error| {
                ProviderError::Transport(format!("Failed to build http client: {}", error))
            })?;

        Ok(Box::new(SpotifyHttpAdapter::new(client, self.api_url.clone())))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        http::StatusCode,
        routing::{get, post},
    };
    use serde_json::json;

    use super::*;
    use crate::services::playlist_algebra::{
        SetAlgebraError, SetAlgebraService, SetOperation, SetOperationRequest,
    };

    async fn spawn_fake_spotify(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&base_url).unwrap()
    }

    fn fake_spotify() -> Router {
        Router::new()
            .route(
                "/v1/playlists/first/tracks",
                get(|| async {
                    Json(json!({
                        "items": [
                            {"track": {"id": "1", "name": "One", "uri": "spotify:track:1"}},
                            {"track": {"id": "2", "name": "Two", "uri": "spotify:track:2"}}
                        ],
                        "next": null
                    }))
                }),
            )
            .route(
                "/v1/playlists/second/tracks",
                get(|| async {
                    Json(json!({
                        "items": [
                            {"track": {"id": "2", "name": "Two", "uri": "spotify:track:2"}},
                            {"track": {"id": "3", "name": "Three", "uri": "spotify:track:3"}}
                        ],
                        "next": null
                    }))
                }),
            )
            .route(
                "/v1/playlists/missing/tracks",
                get(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"error": {"status": 404, "message": "Not found."}})),
                    )
                }),
            )
            .route("/v1/me", get(|| async { Json(json!({"id": "jacob"})) }))
            .route(
                "/v1/users/jacob/playlists",
                post(|| async {
                    (
                        StatusCode::CREATED,
                        Json(json!({"id": "created", "name": "whatever"})),
                    )
                }),
            )
            .route(
                "/v1/playlists/created/tracks",
                post(|| async { (StatusCode::CREATED, Json(json!({"snapshot_id": "s1"}))) }),
            )
    }

    fn request(first: &str, second: &str) -> SetOperationRequest {
        SetOperationRequest {
            token: "Bearer abc".into(),
            first_playlist: first.into(),
            second_playlist: second.into(),
            operation: SetOperation::Intersection,
            name: Some("Common ground".into()),
            owner: None,
        }
    }

    #[tokio::test]
    async fn test_intersection_against_fake_spotify() {
        let api_url = spawn_fake_spotify(fake_spotify()).await;
        let factory = SpotifyProviderFactory::new(api_url, Duration::from_secs(5));

        let service = SetAlgebraService::new(factory.connect().unwrap());
        let summary = service.run(&request("first", "second")).await.unwrap();

        assert_eq!(summary.name, "Common ground");
        assert_eq!(summary.href, "created");
        assert_eq!(summary.tracks, 1);
    }

    #[tokio::test]
    async fn test_missing_playlist_keeps_spotify_status() {
        let api_url = spawn_fake_spotify(fake_spotify()).await;
        let factory = SpotifyProviderFactory::new(api_url, Duration::from_secs(5));

        let service = SetAlgebraService::new(factory.connect().unwrap());
        let error = service
            .run(&request("missing", "second"))
            .await
            .unwrap_err();

        assert_eq!(
            error,
            SetAlgebraError::Provider {
                status: 404,
                message: "Not found.".into()
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_spotify_is_transport_error() {
        // Nothing listens on the discard port
        let factory = SpotifyProviderFactory::new(
            Url::parse("http://127.0.0.1:9").unwrap(),
            Duration::from_secs(2),
        );
        let provider = factory.connect().unwrap();

        let error = provider.who_am_i("abc").await.unwrap_err();

        assert!(matches!(error, ProviderError::Transport(_)));
    }
}
