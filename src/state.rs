use std::sync::Arc;

use crate::auth::verifier::TokenVerifier;
use crate::db::repository::ResourceStore;

/// Shared application state, built once in `main` and injected into
/// every handler. The store handle is the only cross-request resource.
#[derive(Clone)]
pub struct AppState {
    pub resources: Arc<dyn ResourceStore>,
    pub verifier: Arc<dyn TokenVerifier>,
}
