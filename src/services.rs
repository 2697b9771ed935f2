pub mod fixture_provider;
pub mod playlist_algebra;
pub mod spotify;

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use url::Url;

use crate::config::{Config, ProviderKind};
use crate::ports::playlist_provider::ProviderFactory;
use crate::services::fixture_provider::FixtureProviderFactory;
use crate::services::spotify::client::SpotifyProviderFactory;

/// Pick the playlist provider once, from configuration.
pub fn provider_factory(config: &Config) -> Result<Arc<dyn ProviderFactory>> {
    match config.provider.kind {
        ProviderKind::Spotify => {
            let api_url = Url::parse(&config.spotify.api_url)
                .wrap_err_with(|| format!("Invalid Spotify API url: {}", config.spotify.api_url))?;
            tracing::info!("Using Spotify provider at {}", api_url);
            Ok(Arc::new(SpotifyProviderFactory::new(
                api_url,
                Duration::from_secs(config.spotify.timeout_secs),
            )))
        }
        ProviderKind::Mock => {
            tracing::info!(
                "Using mock provider with {} fixture playlists",
                config.mock.playlists.len()
            );
            Ok(Arc::new(FixtureProviderFactory::new(
                config.mock.user_id.clone(),
                config.mock.playlists.clone(),
            )))
        }
    }
}
