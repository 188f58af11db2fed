use autoreply_client::drafts::{self, DraftBoard, EditBuffer};
use autoreply_client::{ApiClient, Notice};
use autoreply_types::{DraftFilter, DraftId, DraftStatus, ScanPeriod};
use dioxus::prelude::*;

use crate::Route;
use crate::components::{DraftCard, EditDialog, NavBar, NoticeBanner};

/// Status choices for the list view. `None` shows every status.
const STATUS_CHOICES: [(Option<DraftStatus>, &str); 5] = [
    (Some(DraftStatus::Pending), "Pending"),
    (Some(DraftStatus::Sent), "Sent"),
    (Some(DraftStatus::Edited), "Edited"),
    (Some(DraftStatus::Rejected), "Rejected"),
    (None, "All"),
];

fn status_value(status: Option<DraftStatus>) -> &'static str {
    status.map(DraftStatus::as_str).unwrap_or("all")
}

#[component]
pub fn Drafts() -> Element {
    let api = use_context::<ApiClient>();

    let mut board = use_signal(DraftBoard::default);
    let mut notice = use_signal(|| Option::<Notice>::None);
    let editing = use_signal(|| Option::<EditBuffer>::None);
    let mut loading = use_signal(|| true);
    let mut period = use_signal(|| ScanPeriod::Week);
    let mut status = use_signal(|| Some(DraftStatus::Pending));

    // Re-runs whenever the period or status filter changes. Only the load for
    // the latest filter lands on the board.
    use_effect(move || {
        let filter = DraftFilter {
            status: status(),
            period: Some(period()),
        };
        board.write().request(filter);
        loading.set(true);

        let api = api.clone();
        spawn(async move {
            let result = drafts::load(&api, filter).await;
            if !board.peek().is_current(filter) {
                return;
            }
            match result {
                Ok(list) => {
                    board.write().fill(filter, list);
                }
                Err(err) => notice.set(Some(Notice::failure("Failed to load drafts", err))),
            }
            loading.set(false);
        });
    });

    let count = board.read().len();
    let heading = match status() {
        Some(DraftStatus::Pending) => format!("Pending Drafts ({count})"),
        Some(other) => format!("{} Drafts ({count})", capitalize(other.as_str())),
        None => format!("All Drafts ({count})"),
    };
    let cards = board.read().drafts().to_vec();

    rsx! {
        NavBar { title: heading, back: Route::Dashboard {} }
        div {
            class: "container mx-auto px-4 py-8 max-w-3xl",
            NoticeBanner { notice }

            div {
                class: "flex gap-4 mb-6",
                select {
                    class: "border border-gray-300 rounded p-2",
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
                select {
                    class: "border border-gray-300 rounded p-2",
                    onchange: move |evt: FormEvent| {
                        let value = evt.value();
                        status.set(value.parse::<DraftStatus>().ok());
                    },
                    for (choice, label) in STATUS_CHOICES {
                        option {
                            value: status_value(choice),
                            selected: choice == status(),
                            "{label}"
                        }
                    }
                }
            }

            if loading() {
                div {
                    class: "text-center py-8",
                    "Loading drafts..."
                }
            } else if cards.is_empty() {
                div {
                    class: "bg-white border border-gray-200 rounded-lg p-6 text-center text-gray-500",
                    "No drafts here"
                }
            } else {
                div {
                    class: "space-y-4",
                    for draft in cards {
                        DraftCard {
                            key: "{draft.id}",
                            draft: draft.clone(),
                            board,
                            notice,
                            editing,
                            compact: true,
                        }
                    }
                }
            }
        }
        EditDialog { board, notice, editing }
    }
}

/// A single draft, usually opened from a link in a WhatsApp notification.
#[component]
pub fn DraftDetail(id: String) -> Element {
    let api = use_context::<ApiClient>();

    let mut board = use_signal(DraftBoard::default);
    let mut notice = use_signal(|| Option::<Notice>::None);
    let editing = use_signal(|| Option::<EditBuffer>::None);
    let mut loading = use_signal(|| true);

    let draft_id = DraftId::new(id);
    let load_id = draft_id.clone();
    use_effect(move || {
        let api = api.clone();
        let id = load_id.clone();
        spawn(async move {
            loading.set(true);
            match api.draft(&id).await {
                Ok(draft) => board.set(DraftBoard::single(draft)),
                Err(err) => notice.set(Some(Notice::failure("Failed to load draft", err))),
            }
            loading.set(false);
        });
    });

    let draft = board.read().get(&draft_id).cloned();

    rsx! {
        NavBar { title: "Draft", back: Route::Drafts {} }
        div {
            class: "container mx-auto px-4 py-8 max-w-3xl",
            NoticeBanner { notice }

            if loading() {
                div {
                    class: "text-center py-8",
                    "Loading draft..."
                }
            } else if let Some(draft) = draft {
                DraftCard {
                    draft,
                    board,
                    notice,
                    editing,
                }
            } else {
                div {
                    class: "bg-white border border-gray-200 rounded-lg p-6 text-center text-gray-500",
                    "This draft could not be found."
                }
            }
        }
        EditDialog { board, notice, editing }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
