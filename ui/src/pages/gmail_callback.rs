use autoreply_client::ApiClient;
use autoreply_client::callback::{self, CallbackStatus};
use dioxus::prelude::*;

use crate::Route;
use crate::browser;

/// Landing page for the provider redirect when it points at the app directly.
#[component]
pub fn GmailCallback(code: String, error: String) -> Element {
    let api = use_context::<ApiClient>();
    let nav = navigator();

    let mut status = use_signal(|| CallbackStatus::Processing);

    use_effect(move || {
        let api = api.clone();
        let code = code.clone();
        let error = error.clone();
        spawn(async move {
            let outcome = callback::finalize(&api, &code, &error).await;
            let delay = outcome.redirect_delay();
            status.set(outcome);

            if let Some(delay) = delay {
                browser::sleep(delay).await;
                nav.replace(Route::Dashboard {});
            }
        });
    });

    let current = status();
    let (icon, tone) = match &current {
        CallbackStatus::Processing => ("…", "text-gray-700"),
        CallbackStatus::Connected => ("✓", "text-green-700"),
        CallbackStatus::Failed(_) => ("✗", "text-red-700"),
    };

    rsx! {
        div {
            class: "container mx-auto px-4 py-16 max-w-md",
            div {
                class: "bg-white border border-gray-200 rounded-lg p-8 shadow-sm text-center",
                div {
                    class: "text-4xl mb-4 {tone}",
                    "{icon}"
                }
                p {
                    class: "{tone}",
                    "{current.message()}"
                }
                if let CallbackStatus::Failed(_) = current {
                    p {
                        class: "text-sm text-gray-500 mt-2",
                        "Redirecting to the dashboard..."
                    }
                }
            }
        }
    }
}
