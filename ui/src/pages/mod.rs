mod dashboard;
mod drafts;
mod gmail_callback;
mod login;
mod not_found;
mod register;
mod settings;

pub use dashboard::Dashboard;
pub use drafts::{DraftDetail, Drafts};
pub use gmail_callback::GmailCallback;
pub use login::Login;
pub use not_found::NotFound;
pub use register::Register;
pub use settings::Settings;
