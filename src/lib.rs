pub mod api;
pub mod config;
pub mod cors;
pub mod errors;
pub mod models;
pub mod store;
pub mod validation;

pub use api::router::build as router;
pub use api::{ApiServer, AppState};
pub use config::Config;
pub use models::{Genre, Movie, MoviePatch, NewMovie};
pub use store::MovieStore;
pub use validation::Schema;
