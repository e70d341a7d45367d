//! runhub-core: models and decision logic of the runhub console.
//!
//! Everything here is target independent: the same code runs inside the
//! wasm32 console and in the native development server, so the rules for
//! what the console shows are tested without a browser.

pub mod actions;
pub mod api;
pub mod auth;
pub mod breadcrumbs;
pub mod error;
pub mod format;
pub mod models;
pub mod notify;
pub mod routes;
pub mod status;

pub use actions::{ActionOutcome, ActionState, RunAction};
pub use auth::{AuthGate, AuthView};
pub use error::{ApiError, RunhubError};
pub use models::{Breadcrumb, JobHead, RepoHead, RepoInfo, Run, RunHead, User};
pub use status::{RunStatus, StatusIndicator};
