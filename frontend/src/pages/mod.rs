mod projects;
mod repository;
mod run_details;
mod settings;

pub use projects::{ProjectRepositories, Projects};
pub use repository::RepositoryDetails;
pub use run_details::RunDetails;
pub use settings::SettingsPage;
