use autoreply_client::{ApiClient, InFlight, auth};
use autoreply_types::LoginRequest;
use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn Login() -> Element {
    let api = use_context::<ApiClient>();
    let nav = navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(InFlight::default);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        if !submitting.write().begin() {
            return;
        }

        let api = api.clone();
        let request = LoginRequest {
            email: email(),
            password: password(),
        };
        spawn(async move {
            error.set(None);

            match auth::log_in(&api, &request).await {
                Ok(()) => {
                    nav.push(Route::Dashboard {});
                }
                Err(err) => {
                    error.set(Some(format!("Login failed: {err}")));
                }
            }
            submitting.write().finish();
        });
    };

    rsx! {
        div {
            class: "container mx-auto px-4 py-16 max-w-md",
            div {
                class: "bg-white border border-gray-200 rounded-lg p-8 shadow-sm",
                h1 {
                    class: "text-3xl font-bold mb-8 text-center",
                    "Email Auto Responder"
                }
                if let Some(err) = error() {
                    div {
                        class: "bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded mb-4",
                        "{err}"
                    }
                }
                form {
                    class: "space-y-4",
                    onsubmit,
                    label {
                        class: "block text-sm text-gray-600",
                        "Email"
                        input {
                            class: "w-full border border-gray-300 rounded p-2 mt-1",
                            r#type: "email",
                            required: true,
                            value: "{email}",
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                    label {
                        class: "block text-sm text-gray-600",
                        "Password"
                        input {
                            class: "w-full border border-gray-300 rounded p-2 mt-1",
                            r#type: "password",
                            required: true,
                            value: "{password}",
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }
                    button {
                        class: "w-full bg-blue-600 text-white py-2 rounded disabled:opacity-50",
                        r#type: "submit",
                        disabled: submitting().is_active(),
                        if submitting().is_active() { "Logging in..." } else { "Login" }
                    }
                }
                Link {
                    class: "block text-center text-sm text-blue-700 mt-4 hover:underline",
                    to: Route::Register {},
                    "Don't have an account? Register"
                }
            }
        }
    }
}
