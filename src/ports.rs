pub mod playlist_provider;
