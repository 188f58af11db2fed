use autoreply_client::config::{NOTICE_CLEAR_DELAY, PROFILE_RELOAD_DELAY};
use autoreply_client::settings::{self, OAuthOutcome, WHATSAPP_COMMANDS};
use autoreply_client::{ApiClient, InFlight, Notice};
use autoreply_types::{Tone, UserProfile};
use dioxus::prelude::*;

use crate::Route;
use crate::browser;
use crate::components::{NavBar, NoticeBanner};

async fn load_profile(
    api: ApiClient,
    mut profile: Signal<Option<UserProfile>>,
    mut gmail_connected: Signal<bool>,
    mut notice: Signal<Option<Notice>>,
    mut loading: Signal<bool>,
) {
    loading.set(true);
    match api.profile().await {
        Ok(loaded) => {
            gmail_connected.set(loaded.gmail_connected);
            profile.set(Some(loaded));
        }
        Err(err) => notice.set(Some(Notice::failure("Failed to load profile settings", err))),
    }
    loading.set(false);
}

#[component]
pub fn Settings(gmail: String, error: String) -> Element {
    let api = use_context::<ApiClient>();

    let mut profile = use_signal(|| Option::<UserProfile>::None);
    let mut gmail_connected = use_signal(|| false);
    let mut notice = use_signal(|| Option::<Notice>::None);
    let loading = use_signal(|| true);
    let mut saving = use_signal(InFlight::default);
    let mut checking = use_signal(InFlight::default);
    let mut connecting = use_signal(InFlight::default);
    let mut disconnecting = use_signal(InFlight::default);

    let load_api = api.clone();
    use_effect(move || {
        spawn(load_profile(load_api.clone(), profile, gmail_connected, notice, loading));
    });

    // The backend sends the provider redirect back here with `gmail=connected` or `error=<code>`.
    let oauth_api = api.clone();
    use_effect(move || {
        let Some(outcome) = OAuthOutcome::from_query(&gmail, &error) else {
            return;
        };
        notice.set(Some(outcome.notice()));
        browser::replace_url("/settings");

        if outcome == OAuthOutcome::Connected {
            tracing::info!("gmail authorization completed");
            gmail_connected.set(true);
            let api = oauth_api.clone();
            spawn(async move {
                browser::sleep(PROFILE_RELOAD_DELAY).await;
                load_profile(api, profile, gmail_connected, notice, loading).await;
            });
        } else {
            tracing::warn!(?outcome, "gmail authorization failed");
        }
    });

    let save_api = api.clone();
    let on_save = move |_: MouseEvent| {
        let Some(current) = profile() else {
            return;
        };
        if !saving.write().begin() {
            return;
        }
        let api = save_api.clone();
        spawn(async move {
            notice.set(None);
            match settings::save_profile(&api, &current).await {
                Ok(saved) => {
                    profile.set(Some(saved));
                    let done = Notice::success("Settings saved successfully!");
                    notice.set(Some(done.clone()));
                    saving.write().finish();

                    browser::sleep(NOTICE_CLEAR_DELAY).await;
                    if notice() == Some(done) {
                        notice.set(None);
                    }
                }
                Err(err) => {
                    notice.set(Some(Notice::failure("Failed to save settings", err)));
                    saving.write().finish();
                }
            }
        });
    };

    let connect_api = api.clone();
    let on_connect = move |_: MouseEvent| {
        if !connecting.write().begin() {
            return;
        }
        let api = connect_api.clone();
        spawn(async move {
            notice.set(None);
            match settings::connect_gmail(&api).await {
                // Stays claimed while the browser leaves the page.
                Ok(url) => browser::redirect_to(&url),
                Err(err) => {
                    notice.set(Some(Notice::failure("Failed to start Gmail connection", err)));
                    connecting.write().finish();
                }
            }
        });
    };

    let disconnect_api = api.clone();
    let on_disconnect = move |_: MouseEvent| {
        if !disconnecting.write().begin() {
            return;
        }
        let api = disconnect_api.clone();
        spawn(async move {
            match settings::disconnect_gmail(&api, browser::confirm).await {
                Ok(true) => {
                    gmail_connected.set(false);
                    notice.set(Some(Notice::success("Gmail disconnected successfully")));
                    load_profile(api, profile, gmail_connected, notice, loading).await;
                }
                Ok(false) => {}
                Err(err) => notice.set(Some(Notice::failure("Failed to disconnect Gmail", err))),
            }
            disconnecting.write().finish();
        });
    };

    let check_api = api.clone();
    let on_check = move |_: MouseEvent| {
        if !checking.write().begin() {
            return;
        }
        let api = check_api.clone();
        spawn(async move {
            match settings::gmail_status(&api).await {
                Ok(status) => {
                    gmail_connected.set(status.connected);
                    let message = match (status.connected, status.email) {
                        (true, Some(email)) => format!("Gmail is connected as {email}."),
                        (true, None) => "Gmail is connected.".to_string(),
                        (false, _) => "Gmail is not connected.".to_string(),
                    };
                    notice.set(Some(Notice::info(message)));
                }
                Err(err) => notice.set(Some(Notice::failure("Failed to check Gmail status", err))),
            }
            checking.write().finish();
        });
    };

    let Some(current) = profile() else {
        return rsx! {
            NavBar { title: "Settings", back: Route::Dashboard {} }
            div {
                class: "container mx-auto px-4 py-8 max-w-3xl",
                NoticeBanner { notice }
                if loading() {
                    div {
                        class: "text-center py-8",
                        "Loading settings..."
                    }
                }
            }
        };
    };

    let whatsapp = current.whatsapp_number.clone().unwrap_or_default();
    let preferences = current.email_preferences.clone();

    rsx! {
        NavBar { title: "Settings", back: Route::Dashboard {} }
        div {
            class: "container mx-auto px-4 py-8 max-w-3xl space-y-6",
            NoticeBanner { notice }

            section {
                class: "bg-white border border-gray-200 rounded-lg p-6 shadow-sm",
                h2 {
                    class: "text-xl font-semibold mb-4",
                    "Account Information"
                }
                label {
                    class: "block text-sm text-gray-600 mb-4",
                    "Name"
                    input {
                        class: "w-full border border-gray-300 rounded p-2 mt-1",
                        value: "{current.name}",
                        oninput: move |evt: FormEvent| {
                            if let Some(profile) = &mut *profile.write() {
                                profile.name = evt.value();
                            }
                        },
                    }
                }
                label {
                    class: "block text-sm text-gray-600",
                    "Email"
                    input {
                        class: "w-full border border-gray-200 bg-gray-100 rounded p-2 mt-1",
                        value: "{current.email}",
                        disabled: true,
                    }
                    span {
                        class: "text-xs text-gray-500",
                        "Email cannot be changed"
                    }
                }
            }

            section {
                class: "bg-white border border-gray-200 rounded-lg p-6 shadow-sm",
                h2 {
                    class: "text-xl font-semibold mb-4",
                    "Gmail Connection"
                }
                if gmail_connected() {
                    div {
                        class: "text-green-700 font-semibold mb-1",
                        "Gmail Connected"
                    }
                    div {
                        class: "text-sm text-gray-500 mb-4",
                        "Account: {current.email}"
                    }
                    div {
                        class: "flex gap-2",
                        button {
                            class: "border border-red-600 text-red-700 px-4 py-2 rounded disabled:opacity-50",
                            disabled: disconnecting().is_active(),
                            onclick: on_disconnect,
                            if disconnecting().is_active() { "Disconnecting..." } else { "Disconnect Gmail" }
                        }
                        button {
                            class: "border border-gray-400 px-4 py-2 rounded disabled:opacity-50",
                            disabled: checking().is_active(),
                            onclick: on_check,
                            "Check status"
                        }
                    }
                } else {
                    div {
                        class: "text-red-700 font-semibold mb-1",
                        "Gmail Not Connected"
                    }
                    div {
                        class: "text-sm text-gray-500 mb-4",
                        "Connect your Gmail account to start scanning emails"
                    }
                    div {
                        class: "flex gap-2",
                        button {
                            class: "bg-blue-600 text-white px-4 py-2 rounded disabled:opacity-50",
                            disabled: connecting().is_active(),
                            onclick: on_connect,
                            if connecting().is_active() { "Connecting..." } else { "Connect Gmail Account" }
                        }
                        button {
                            class: "border border-gray-400 px-4 py-2 rounded disabled:opacity-50",
                            disabled: checking().is_active(),
                            onclick: on_check,
                            "Check status"
                        }
                    }
                }
            }

            section {
                class: "bg-white border border-gray-200 rounded-lg p-6 shadow-sm",
                h2 {
                    class: "text-xl font-semibold mb-4",
                    "WhatsApp Notifications"
                }
                label {
                    class: "block text-sm text-gray-600",
                    "WhatsApp Number"
                    input {
                        class: "w-full border border-gray-300 rounded p-2 mt-1",
                        placeholder: "+1234567890",
                        value: "{whatsapp}",
                        oninput: move |evt: FormEvent| {
                            if let Some(profile) = &mut *profile.write() {
                                profile.whatsapp_number = Some(evt.value());
                            }
                        },
                    }
                    span {
                        class: "text-xs text-gray-500",
                        "Include the country code. Draft approval requests are sent to this number."
                    }
                }
                div {
                    class: "bg-blue-50 border border-blue-200 rounded p-4 mt-4 text-sm text-blue-900",
                    div {
                        class: "font-semibold mb-1",
                        "WhatsApp commands"
                    }
                    ul {
                        for (command, effect) in WHATSAPP_COMMANDS {
                            li {
                                code { "{command}" }
                                " to {effect}"
                            }
                        }
                    }
                }
            }

            section {
                class: "bg-white border border-gray-200 rounded-lg p-6 shadow-sm",
                h2 {
                    class: "text-xl font-semibold mb-4",
                    "Email Preferences"
                }
                label {
                    class: "block text-sm text-gray-600 mb-4",
                    "Reply Tone"
                    select {
                        class: "w-full border border-gray-300 rounded p-2 mt-1",
                        onchange: move |evt: FormEvent| {
                            if let Ok(tone) = evt.value().parse::<Tone>() {
                                if let Some(profile) = &mut *profile.write() {
                                    profile.email_preferences.tone = tone;
                                }
                            }
                        },
                        for tone in Tone::ALL {
                            option {
                                value: tone.as_str(),
                                selected: tone == preferences.tone,
                                "{tone.label()}"
                            }
                        }
                    }
                }
                label {
                    class: "block text-sm text-gray-600 mb-4",
                    "Sign-off"
                    input {
                        class: "w-full border border-gray-300 rounded p-2 mt-1",
                        placeholder: "Best regards, Sincerely, Thanks",
                        value: "{preferences.sign_off}",
                        oninput: move |evt: FormEvent| {
                            if let Some(profile) = &mut *profile.write() {
                                profile.email_preferences.sign_off = evt.value();
                            }
                        },
                    }
                }
                label {
                    class: "block text-sm text-gray-600",
                    "Email Signature"
                    textarea {
                        class: "w-full border border-gray-300 rounded p-2 mt-1 h-24",
                        value: "{preferences.signature}",
                        oninput: move |evt: FormEvent| {
                            if let Some(profile) = &mut *profile.write() {
                                profile.email_preferences.signature = evt.value();
                            }
                        },
                    }
                    span {
                        class: "text-xs text-gray-500",
                        "Added at the end of every generated reply"
                    }
                }
            }

            button {
                class: "w-full bg-blue-600 text-white py-3 rounded disabled:opacity-50",
                disabled: saving().is_active(),
                onclick: on_save,
                if saving().is_active() { "Saving..." } else { "Save Settings" }
            }
        }
    }
}
