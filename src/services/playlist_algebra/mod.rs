//! Set algebra over two provider playlists: fetch both, combine them by track
//! id and materialize the result as a new playlist.

pub mod error;
pub mod fetch;
pub mod materializer;
pub mod name;
pub mod orchestrator;
pub mod set_ops;

pub use error::SetAlgebraError;
pub use materializer::NewPlaylistSummary;
pub use orchestrator::{SetAlgebraService, SetOperationRequest};
pub use set_ops::SetOperation;
