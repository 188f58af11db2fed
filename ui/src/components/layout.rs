use autoreply_client::guard::{self, Access};
use autoreply_client::{ApiClient, ClientConfig, Session};
use dioxus::prelude::*;

use crate::Route;

/// Root layout. Builds the API client once the router is available so a 401
/// anywhere can send the user back to the login page.
#[component]
pub fn Shell() -> Element {
    let session = use_context::<Session>();
    let nav = navigator();

    use_context_provider(move || {
        ApiClient::new(ClientConfig::default(), session).on_unauthorized(move || {
            tracing::warn!("session rejected by server, returning to login");
            nav.replace(Route::Login {});
        })
    });

    rsx! {
        Outlet::<Route> {}
    }
}

#[component]
pub fn Protected() -> Element {
    guarded(Access::Protected)
}

#[component]
pub fn PublicOnly() -> Element {
    guarded(Access::PublicOnly)
}

fn guarded(access: Access) -> Element {
    let session = use_context::<Session>();
    let nav = navigator();
    let redirect = guard::redirect_for(access, &session);

    use_effect(move || {
        if let Some(target) = redirect {
            nav.replace(Route::from(target));
        }
    });

    match redirect {
        Some(_) => rsx! {},
        None => rsx! {
            Outlet::<Route> {}
        },
    }
}
