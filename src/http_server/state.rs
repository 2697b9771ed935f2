use std::sync::Arc;

use crate::ports::playlist_provider::ProviderFactory;

pub struct AppState {
    /// Read-only; every request connects its own provider.
    pub providers: Arc<dyn ProviderFactory>,
}
