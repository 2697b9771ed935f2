use serde::{Deserialize, Serialize};

/// Decoupled representation of a track returned by a playlist provider.
///
/// `id` is the only field the set operations look at; `uri` is what gets
/// attached when the track is added to a new playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
}

/// Point-in-time copy of a playlist's tracks, in provider order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSnapshot {
    /// Opaque provider handle the snapshot was fetched from.
    pub reference: String,
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status.
    #[error("Provider returned {status}: {message}")]
    Status { status: u16, message: String },
    /// The provider could not be reached or its response could not be decoded.
    #[error("Failed to talk to provider: {0}")]
    Transport(String),
}

/// Port trait wrapping the remote playlist capabilities used by the set
/// algebra services.
///
/// Implementations live in `services::spotify::client` (production),
/// `services::fixture_provider` (config-seeded fixtures) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PlaylistProvider: Send + Sync {
    async fn get_tracks(
        &self,
        playlist_id: &str,
        token: &str,
    ) -> Result<PlaylistSnapshot, ProviderError>;

    /// Id of the user owning `token`.
    async fn who_am_i(&self, token: &str) -> Result<String, ProviderError>;

    /// Creates an empty playlist and returns its provider id.
    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        token: &str,
    ) -> Result<String, ProviderError>;

    async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        token: &str,
    ) -> Result<(), ProviderError>;
}

#[async_trait::async_trait]
impl<P: PlaylistProvider + ?Sized> PlaylistProvider for Box<P> {
    async fn get_tracks(
        &self,
        playlist_id: &str,
        token: &str,
    ) -> Result<PlaylistSnapshot, ProviderError> {
        (**self).get_tracks(playlist_id, token).await
    }

    async fn who_am_i(&self, token: &str) -> Result<String, ProviderError> {
        (**self).who_am_i(token).await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        token: &str,
    ) -> Result<String, ProviderError> {
        (**self).create_playlist(user_id, name, token).await
    }

    async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
        token: &str,
    ) -> Result<(), ProviderError> {
        (**self).add_tracks(playlist_id, uris, token).await
    }
}

/// Hands out a fresh provider for every request so no client state is
/// shared between concurrent requests. Selected once at startup.
pub trait ProviderFactory: Send + Sync {
    fn connect(&self) -> Result<Box<dyn PlaylistProvider>, ProviderError>;
}
