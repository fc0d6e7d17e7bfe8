/// Runtime configuration read from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub bind_addr: String,
    pub admin_token: String,
    pub subadmin_token: String,
    /// Seed demo content at startup (for local development).
    pub seed_demo: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            mongodb_uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            bind_addr: std::env::var("LABSITE_BIND_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
            admin_token: std::env::var("LABSITE_ADMIN_TOKEN")
                .unwrap_or_else(|_| "dev-admin-token".to_string()),
            subadmin_token: std::env::var("LABSITE_SUBADMIN_TOKEN")
                .unwrap_or_else(|_| "dev-subadmin-token".to_string()),
            seed_demo: std::env::var("LABSITE_SEED_DEMO")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}
