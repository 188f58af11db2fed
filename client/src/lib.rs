//! Client side of the email auto-responder: session, backend API and the
//! actions behind each page. Nothing here depends on the renderer.

pub mod api;
pub mod auth;
pub mod callback;
pub mod config;
pub mod dashboard;
pub mod drafts;
pub mod error;
pub mod guard;
pub mod in_flight;
pub mod notice;
pub mod session;
pub mod settings;

#[cfg(test)]
mod testing;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ActionError, ApiError, FormError};
pub use in_flight::InFlight;
pub use notice::{Notice, Severity};
pub use session::{Session, TokenStore};
