use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Requires a session.
    Protected,
    /// Login and registration; pointless once signed in.
    PublicOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Dashboard,
}

impl Redirect {
    pub fn path(self) -> &'static str {
        match self {
            Redirect::Login => "/login",
            Redirect::Dashboard => "/dashboard",
        }
    }
}

pub fn redirect_for(access: Access, session: &Session) -> Option<Redirect> {
    match (access, session.is_authenticated()) {
        (Access::Protected, false) => Some(Redirect::Login),
        (Access::PublicOnly, true) => Some(Redirect::Dashboard),
        _ => None,
    }
}
