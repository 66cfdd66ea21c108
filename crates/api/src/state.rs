use std::sync::Arc;

use mentora_authsvc::AuthServiceClient;

use crate::config::ServerConfig;
use crate::retrieval::Retriever;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// One instance per process, constructed in `main` and passed explicitly —
/// cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mentora_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Client for the external auth service (proxy + session introspection).
    pub auth_client: Arc<AuthServiceClient>,
    /// Retrieval collaborator for `/api/query`.
    pub retriever: Arc<dyn Retriever>,
}
