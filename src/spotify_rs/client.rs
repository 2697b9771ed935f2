use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::spotify_rs::types::{
    AddTracksBody, CreatePlaylistBody, SpotifyErrorResponse, SpotifyPage, SpotifyPlaylist,
    SpotifyPlaylistTrackObject, SpotifyPlaylistTracks, SpotifySnapshotResponse, SpotifyUser,
};

pub const SPOTIFY_API_URL: &str = "https://api.spotify.com";

/// Spotify rejects more uris than this in a single add request.
pub const MAX_URIS_PER_REQUEST: usize = 100;

const PLAYLIST_TRACKS_PAGE_SIZE: &str = "100";

#[derive(Debug, thiserror::Error)]
pub enum SpotifyApiError {
    #[error("Spotify returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Failed to send http request: {0}")]
    FailedToSendRequest(reqwest::Error),
    #[error("Failed to parse response: {0}")]
    FailedToParseResponse(reqwest::Error),
    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Spotify Web API client scoped to one access token
pub struct SpotifyClient {
    access_token: String,
    api_url: Url,
    client: reqwest::Client,
}

impl SpotifyClient {
    /// `access_token` may be passed straight from an `Authorization` header;
    /// a leading `Bearer ` is dropped.
    pub fn new(client: reqwest::Client, mut api_url: Url, access_token: &str) -> Self {
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        let access_token = access_token.trim();
        let access_token = access_token
            .strip_prefix("Bearer ")
            .unwrap_or(access_token)
            .trim()
            .to_string();

        Self {
            access_token,
            api_url,
            client,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, SpotifyApiError> {
        Ok(self.api_url.join(path)?)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SpotifyApiError> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(SpotifyApiError::FailedToSendRequest)?;

        check_status(response)
            .await?
            .json::<T>()
            .await
            .map_err(SpotifyApiError::FailedToParseResponse)
    }

    /// Get the current user's profile
    pub async fn get_current_user(&self) -> Result<SpotifyUser, SpotifyApiError> {
        let url = self.endpoint("v1/me")?;
        self.send(self.client.get(url)).await
    }

    /// Get all tracks in a playlist, following `next` links.
    ///
    /// Removed tracks and local files come back without an id and are skipped.
    pub async fn get_playlist_tracks(
        &self,
        playlist_id: &str,
    ) -> Result<SpotifyPlaylistTracks, SpotifyApiError> {
        let mut first_page = self.endpoint(&format!(
            "v1/playlists/{}/tracks",
            urlencoding::encode(playlist_id)
        ))?;
        first_page
            .query_pairs_mut()
            .append_pair("limit", PLAYLIST_TRACKS_PAGE_SIZE);

        let href = first_page.to_string();
        let mut tracks = Vec::new();
        let mut next_url = Some(href.clone());

        while let Some(url) = next_url {
            let page: SpotifyPage<SpotifyPlaylistTrackObject> =
                self.send(self.client.get(&url)).await?;

            for item in page.items {
                match item.track {
                    Some(track) if track.id.is_some() => tracks.push(track),
                    Some(track) => {
                        tracing::debug!("Skipping track without id: {}", track.name)
                    }
                    None => tracing::debug!("Skipping removed track in playlist {}", playlist_id),
                }
            }
            next_url = page.next;
        }

        Ok(SpotifyPlaylistTracks { href, tracks })
    }

    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<SpotifyPlaylist, SpotifyApiError> {
        let url = self.endpoint(&format!(
            "v1/users/{}/playlists",
            urlencoding::encode(user_id)
        ))?;

        self.send(self.client.post(url).json(&CreatePlaylistBody { name }))
            .await
    }

    /// Add `uris` to a playlist, split into as many requests as the API limit
    /// requires. Stops at the first failing request.
    pub async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), SpotifyApiError> {
        let url = self.endpoint(&format!(
            "v1/playlists/{}/tracks",
            urlencoding::encode(playlist_id)
        ))?;

        for chunk in uris.chunks(MAX_URIS_PER_REQUEST) {
            let snapshot: SpotifySnapshotResponse = self
                .send(self.client.post(url.clone()).json(&AddTracksBody { uris: chunk }))
                .await?;
            tracing::debug!(
                "Added {} tracks to {} (snapshot {})",
                chunk.len(),
                playlist_id,
                snapshot.snapshot_id
            );
        }

        Ok(())
    }
}

/// Turn a non-success response into `SpotifyApiError::Status`, using
/// Spotify's error envelope when the body has one.
async fn check_status(response: Response) -> Result<Response, SpotifyApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<SpotifyErrorResponse>(&body) {
        Ok(error_response) => error_response.error.message,
        Err(_) if !body.trim().is_empty() => body,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };

    Err(SpotifyApiError::Status {
        status: status.as_u16(),
        message,
    })
}
