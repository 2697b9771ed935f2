use serde::{Deserialize, Serialize};

/// Spotify user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyUser {
    pub id: String,
}

/// Spotify playlist as returned when one is created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
}

/// Spotify track from API.
///
/// `id` is null for local files, which can't be matched or re-added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlaylistTrackObject {
    pub track: Option<SpotifyTrack>,
}

/// One page of a paginated Spotify listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPage<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

/// All tracks of a playlist, pages already followed
#[derive(Debug, Clone)]
pub struct SpotifyPlaylistTracks {
    pub href: String,
    pub tracks: Vec<SpotifyTrack>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistBody<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTracksBody<'a> {
    pub uris: &'a [String],
}

/// Error envelope Spotify sends with non-success statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyErrorResponse {
    pub error: SpotifyErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyErrorBody {
    pub status: u16,
    pub message: String,
}

/// Response to adding tracks to a playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifySnapshotResponse {
    pub snapshot_id: String,
}
