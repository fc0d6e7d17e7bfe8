pub mod api {
    pub mod aggregates;
    pub mod errors;
    pub mod resources;
    pub mod routes;
}
pub mod auth {
    pub mod models;
    pub mod verifier;
}
pub mod config;
pub mod db {
    pub mod repository;
    pub mod serial;
    pub mod store;
}
pub mod error;
pub mod schema {
    pub mod catalog;
    pub mod fields;
}
pub mod seeder;
pub mod state;
