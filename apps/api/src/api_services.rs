mod database;
mod notifications;
mod sessions;
mod state_builder;

pub use database::connect_and_migrate;
pub use notifications::build_membership_notifiers;
pub use sessions::build_postgres_session_layer;
pub use state_builder::{AccessRepositories, build_app_state};
