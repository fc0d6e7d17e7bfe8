use std::sync::Arc;

use axum::Router;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use labsite::api::routes::build_router;
use labsite::auth::verifier::{StaticTokenVerifier, TokenVerifier};
use labsite::db::repository::{MongoResourceStore, ResourceStore};
use labsite::db::store::DocumentStore;
use labsite::state::AppState;

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const SUBADMIN_TOKEN: &str = "test-subadmin-token";

/// Holds the running MongoDB container and the wired router.
///
/// The container is kept alive for as long as this struct lives and is
/// cleaned up automatically on drop. Every test gets a fresh store, so
/// serial numbers always start at 1.
pub struct TestEnv {
    _mongo: ContainerAsync<Mongo>,
    pub router: Router,
    pub resources: Arc<dyn ResourceStore>,
}

impl TestEnv {
    pub async fn start() -> Self {
        let mongo_container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");
        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}", mongo_port);

        let store = DocumentStore::connect(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let resources: Arc<dyn ResourceStore> = Arc::new(MongoResourceStore::new(store));
        let verifier: Arc<dyn TokenVerifier> = Arc::new(StaticTokenVerifier::new(
            ADMIN_TOKEN.to_string(),
            SUBADMIN_TOKEN.to_string(),
        ));

        let router = build_router(AppState {
            resources: resources.clone(),
            verifier,
        });

        Self {
            _mongo: mongo_container,
            router,
            resources,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder().build(self.router.clone())
    }

    /// Helper: create a resource via the API as admin, returning the
    /// stored document from the response.
    pub async fn create(
        &self,
        server: &axum_test::TestServer,
        kind: &str,
        body: serde_json::Value,
    ) -> serde_json::Value {
        let response = server
            .post(&format!("/api/resources/{}", kind))
            .authorization_bearer(ADMIN_TOKEN)
            .json(&body)
            .await;
        response.json::<serde_json::Value>()["data"].clone()
    }
}
