use autoreply_client::{Notice, Severity};
use dioxus::prelude::*;

fn banner_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "bg-green-100 border border-green-400 text-green-800",
        Severity::Info => "bg-blue-100 border border-blue-400 text-blue-800",
        Severity::Error => "bg-red-100 border border-red-400 text-red-700",
    }
}

/// Shows the current notice, if any, with a dismiss button.
#[component]
pub fn NoticeBanner(notice: Signal<Option<Notice>>) -> Element {
    let mut notice = notice;
    let Some(current) = notice() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "{banner_class(current.severity)} px-4 py-3 rounded mb-4 flex justify-between items-start",
            role: "alert",
            span { "{current.message}" }
            button {
                class: "ml-4 font-bold",
                onclick: move |_| notice.set(None),
                "×"
            }
        }
    }
}
