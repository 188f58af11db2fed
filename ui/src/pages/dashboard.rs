use autoreply_client::config::STATS_REFRESH_DELAY;
use autoreply_client::dashboard::{self, AutoScanControl, INTERVAL_CHOICES};
use autoreply_client::{ApiClient, InFlight, Notice, auth};
use autoreply_types::{DashboardStats, ScanPeriod, TimelineEntry};
use dioxus::prelude::*;

use crate::Route;
use crate::browser;
use crate::components::{NavBar, NoticeBanner, StatCard};

fn format_last_run(control: &AutoScanControl) -> String {
    control
        .settings()
        .and_then(|settings| settings.last_run_at)
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string())
}

async fn refresh_stats(
    api: ApiClient,
    mut stats: Signal<Option<DashboardStats>>,
    mut notice: Signal<Option<Notice>>,
) {
    match api.dashboard_stats().await {
        Ok(fresh) => stats.set(Some(fresh)),
        Err(err) => notice.set(Some(Notice::failure("Failed to load stats", err))),
    }
}

#[component]
pub fn Dashboard() -> Element {
    let api = use_context::<ApiClient>();
    let nav = navigator();

    let mut stats = use_signal(|| Option::<DashboardStats>::None);
    let mut timeline = use_signal(Vec::<TimelineEntry>::new);
    let mut control = use_signal(AutoScanControl::default);
    let mut notice = use_signal(|| Option::<Notice>::None);
    let mut loading = use_signal(|| true);
    let mut scanning = use_signal(InFlight::default);
    let mut period = use_signal(ScanPeriod::default);

    let load_api = api.clone();
    use_effect(move || {
        let api = load_api.clone();
        spawn(async move {
            loading.set(true);
            let loaded = dashboard::load(&api).await;

            match loaded.stats {
                Ok(fresh) => stats.set(Some(fresh)),
                Err(err) => notice.set(Some(Notice::failure("Failed to load stats", err))),
            }
            match loaded.auto_scan {
                Ok(settings) => control.set(AutoScanControl::new(Some(settings))),
                Err(err) => notice.set(Some(Notice::failure("Failed to load auto scan settings", err))),
            }
            match loaded.timeline {
                Ok(entries) => timeline.set(entries),
                Err(err) => tracing::warn!(error = %err, "activity timeline unavailable"),
            }
            loading.set(false);
        });
    });

    let scan_api = api.clone();
    let on_scan = move |_: MouseEvent| {
        if !scanning.write().begin() {
            return;
        }
        let api = scan_api.clone();
        let period = period();
        spawn(async move {
            notice.set(None);
            let result = dashboard::scan(&api, period).await;
            scanning.write().finish();

            match result {
                Ok(result) => {
                    notice.set(Some(dashboard::scan_notice(&result)));
                    browser::sleep(STATS_REFRESH_DELAY).await;
                    refresh_stats(api, stats, notice).await;
                }
                Err(err) => notice.set(Some(Notice::failure("Failed to scan", err))),
            }
        });
    };

    let toggle_api = api.clone();
    let on_toggle = move |_: MouseEvent| {
        if !control.write().begin() {
            return;
        }
        let api = toggle_api.clone();
        spawn(async move {
            let result = dashboard::toggle_auto_scan(&api).await;
            let outcome = control.write().settle(result);
            notice.set(Some(outcome));
        });
    };

    let interval_api = api.clone();
    let on_interval = move |evt: FormEvent| {
        let Ok(minutes) = evt.value().parse::<u32>() else {
            return;
        };
        if !control.write().begin() {
            return;
        }
        let api = interval_api.clone();
        spawn(async move {
            let result = dashboard::change_interval(&api, minutes).await;
            let outcome = control.write().settle_interval(result);
            notice.set(Some(outcome));
        });
    };

    let logout_api = api.clone();
    let on_logout = move |_: MouseEvent| {
        auth::log_out(&logout_api);
        nav.push(Route::Login {});
    };

    if loading() {
        return rsx! {
            div {
                class: "text-center py-8",
                "Loading dashboard..."
            }
        };
    }

    let current = stats().unwrap_or_default();
    let approval_rate = current.approval_rate();
    let control_state = control();
    let mode = control_state.mode();
    let busy = control_state.is_busy();
    let interval = control_state
        .settings()
        .map(|settings| settings.interval_minutes)
        .unwrap_or(INTERVAL_CHOICES[2]);
    let last_run = format_last_run(&control_state);

    rsx! {
        NavBar {
            title: "Email Auto Responder",
            Link {
                class: "hover:underline",
                to: Route::Settings { gmail: String::new(), error: String::new() },
                "Settings"
            }
            button {
                class: "hover:underline",
                onclick: on_logout,
                "Logout"
            }
        }
        div {
            class: "container mx-auto px-4 py-8",
            NoticeBanner { notice }

            if !current.gmail_connected {
                div {
                    class: "bg-yellow-100 border border-yellow-400 text-yellow-800 px-4 py-3 rounded mb-4",
                    "Gmail is not connected. "
                    Link {
                        class: "underline",
                        to: Route::Settings { gmail: String::new(), error: String::new() },
                        "Connect it in Settings"
                    }
                    " to start scanning."
                }
            }

            div {
                class: "grid grid-cols-1 sm:grid-cols-2 md:grid-cols-4 gap-4 mb-8",
                StatCard { label: "Pending Drafts", value: "{current.pending_drafts}" }
                StatCard { label: "Sent", value: "{current.sent_drafts}" }
                StatCard { label: "Rejected", value: "{current.rejected_drafts}" }
                StatCard { label: "Approval Rate", value: "{approval_rate}%" }
            }

            div {
                class: "bg-white border border-gray-200 rounded-lg p-6 shadow-sm mb-8",
                h2 {
                    class: "text-xl font-semibold mb-4",
                    "This Week"
                }
                div {
                    class: "flex gap-8 text-gray-700",
                    span { "Drafts created: {current.this_week.drafts_created}" }
                    span { "Emails sent: {current.this_week.emails_sent}" }
                    span { "Drafts rejected: {current.this_week.drafts_rejected}" }
                    span { "All time: {current.total_drafts}" }
                }
            }

            div {
                class: "bg-white border border-gray-200 rounded-lg p-6 shadow-sm mb-8",
                h2 {
                    class: "text-xl font-semibold mb-4",
                    "Quick Actions"
                }
                div {
                    class: "flex flex-wrap items-center gap-4",
                    select {
                        class: "border border-gray-300 rounded p-2",
                        disabled: scanning().is_active(),
                        onchange: move |evt: FormEvent| {
                            if let Ok(selected) = evt.value().parse::<ScanPeriod>() {
                                period.set(selected);
                            }
                        },
                        for option_period in ScanPeriod::ALL {
                            option {
                                value: option_period.as_str(),
                                selected: option_period == period(),
                                "{option_period.label()}"
                            }
                        }
                    }
                    button {
                        class: "bg-blue-600 text-white px-4 py-2 rounded disabled:opacity-50",
                        disabled: scanning().is_active(),
                        onclick: on_scan,
                        if scanning().is_active() { "Scanning..." } else { "Scan Inbox" }
                    }
                    Link {
                        class: "border border-blue-600 text-blue-700 px-4 py-2 rounded",
                        to: Route::Drafts {},
                        "View Drafts ({current.pending_drafts})"
                    }
                }
            }

            div {
                class: "bg-white border border-gray-200 rounded-lg p-6 shadow-sm mb-8",
                h2 {
                    class: "text-xl font-semibold mb-4",
                    "Scan Mode: {mode.label()}"
                }
                div {
                    class: "flex flex-wrap items-center gap-4",
                    button {
                        class: "bg-gray-800 text-white px-4 py-2 rounded disabled:opacity-50",
                        disabled: busy,
                        onclick: on_toggle,
                        if busy { "Saving..." } else { "Switch mode" }
                    }
                    label {
                        class: "text-gray-700",
                        "Check every "
                        select {
                            class: "border border-gray-300 rounded p-2",
                            disabled: busy,
                            onchange: on_interval,
                            for minutes in INTERVAL_CHOICES {
                                option {
                                    value: "{minutes}",
                                    selected: minutes == interval,
                                    "{minutes} minutes"
                                }
                            }
                        }
                    }
                    span {
                        class: "text-sm text-gray-500",
                        "Last automatic scan: {last_run}"
                    }
                }
            }

            if !timeline().is_empty() {
                div {
                    class: "bg-white border border-gray-200 rounded-lg p-6 shadow-sm",
                    h2 {
                        class: "text-xl font-semibold mb-4",
                        "Last 7 Days"
                    }
                    table {
                        class: "w-full text-left text-gray-700",
                        thead {
                            tr {
                                th { "Date" }
                                th { "Created" }
                                th { "Sent" }
                                th { "Rejected" }
                            }
                        }
                        tbody {
                            for entry in timeline().iter() {
                                tr {
                                    key: "{entry.date}",
                                    td { "{entry.date}" }
                                    td { "{entry.created}" }
                                    td { "{entry.sent}" }
                                    td { "{entry.rejected}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
