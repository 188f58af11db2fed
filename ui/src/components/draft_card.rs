use autoreply_client::drafts::{self, DraftAction, DraftBoard, EditBuffer};
use autoreply_client::{ApiClient, Notice};
use autoreply_types::{Draft, DraftId, DraftStatus};
use dioxus::prelude::*;

use crate::Route;
use crate::browser;

fn format_date(datetime: &chrono::DateTime<chrono::Utc>) -> String {
    datetime.format("%Y-%m-%d %H:%M").to_string()
}

fn status_class(status: DraftStatus) -> &'static str {
    match status {
        DraftStatus::Pending => "bg-yellow-100 text-yellow-800",
        DraftStatus::Sent => "bg-green-100 text-green-800",
        DraftStatus::Edited => "bg-blue-100 text-blue-800",
        DraftStatus::Rejected => "bg-gray-200 text-gray-700",
    }
}

fn approve(api: ApiClient, mut board: Signal<DraftBoard>, mut notice: Signal<Option<Notice>>, id: DraftId) {
    if !board.write().begin(&id) {
        return;
    }
    spawn(async move {
        let result = drafts::approve(&api, &id).await;
        let outcome = board.write().settle(&id, DraftAction::Approve, result);
        notice.set(Some(outcome));
    });
}

fn reject(api: ApiClient, mut board: Signal<DraftBoard>, mut notice: Signal<Option<Notice>>, id: DraftId) {
    if !board.write().begin(&id) {
        return;
    }
    spawn(async move {
        match drafts::reject(&api, &id, browser::confirm).await {
            Ok(None) => board.write().cancel(&id),
            Ok(Some(draft)) => {
                let outcome = board.write().settle(&id, DraftAction::Reject, Ok(draft));
                notice.set(Some(outcome));
            }
            Err(err) => {
                let outcome = board.write().settle(&id, DraftAction::Reject, Err(err));
                notice.set(Some(outcome));
            }
        }
    });
}

/// One draft with its original message, proposed reply and actions.
#[component]
pub fn DraftCard(
    draft: Draft,
    board: Signal<DraftBoard>,
    notice: Signal<Option<Notice>>,
    editing: Signal<Option<EditBuffer>>,
    #[props(default)] compact: bool,
) -> Element {
    let api = use_context::<ApiClient>();
    let mut editing = editing;

    let busy = board.read().is_busy(&draft.id);
    let actionable = draft.is_pending();
    let original = if compact {
        drafts::preview(&draft.original_body)
    } else {
        draft.original_body.clone()
    };

    let approve_api = api.clone();
    let approve_id = draft.id.clone();
    let reject_id = draft.id.clone();
    let edit_draft = draft.clone();

    rsx! {
        div {
            class: "bg-white border border-gray-200 rounded-lg p-6 shadow-sm",
            div {
                class: "flex justify-between items-start mb-2",
                div {
                    div {
                        class: "text-sm text-gray-600",
                        "From: {draft.sender()}"
                    }
                    if compact {
                        Link {
                            class: "text-xl font-semibold text-gray-900 hover:underline",
                            to: Route::DraftDetail { id: draft.id.to_string() },
                            "{draft.subject}"
                        }
                    } else {
                        h2 {
                            class: "text-xl font-semibold text-gray-900",
                            "{draft.subject}"
                        }
                    }
                }
                div {
                    class: "text-right",
                    span {
                        class: "text-xs uppercase px-2 py-1 rounded {status_class(draft.status)}",
                        "{draft.status}"
                    }
                    div {
                        class: "text-sm text-gray-500 mt-1",
                        "{format_date(&draft.created_at)}"
                    }
                }
            }
            div {
                class: "text-sm text-gray-500 mt-3",
                "Original message"
            }
            div {
                class: "text-gray-700 whitespace-pre-wrap mb-3",
                "{original}"
            }
            div {
                class: "text-sm text-gray-500",
                "Proposed reply"
            }
            div {
                class: "text-gray-800 whitespace-pre-wrap bg-gray-100 rounded p-3 mb-4",
                "{draft.draft_body}"
            }
            if actionable {
                div {
                    class: "flex gap-2",
                    button {
                        class: "bg-green-600 text-white px-4 py-2 rounded disabled:opacity-50",
                        disabled: busy,
                        onclick: move |_: MouseEvent| approve(approve_api.clone(), board, notice, approve_id.clone()),
                        if busy { "Working..." } else { "Approve & Send" }
                    }
                    button {
                        class: "border border-blue-600 text-blue-700 px-4 py-2 rounded disabled:opacity-50",
                        disabled: busy,
                        onclick: move |_: MouseEvent| editing.set(Some(EditBuffer::open(&edit_draft))),
                        "Edit"
                    }
                    button {
                        class: "border border-red-600 text-red-700 px-4 py-2 rounded disabled:opacity-50",
                        disabled: busy,
                        onclick: move |_: MouseEvent| reject(api.clone(), board, notice, reject_id.clone()),
                        "Reject"
                    }
                }
            }
        }
    }
}

/// Editor for the reply currently being rewritten. Hidden when nothing is open.
#[component]
pub fn EditDialog(
    board: Signal<DraftBoard>,
    notice: Signal<Option<Notice>>,
    editing: Signal<Option<EditBuffer>>,
) -> Element {
    let api = use_context::<ApiClient>();
    let mut board = board;
    let mut notice = notice;
    let mut editing = editing;

    let Some(buffer) = editing() else {
        return rsx! {};
    };
    let busy = board.read().is_busy(&buffer.draft_id);
    let can_send = buffer.can_send() && !busy;

    let send = move |_: MouseEvent| {
        let Some(buffer) = editing() else {
            return;
        };
        if !buffer.can_send() || !board.write().begin(&buffer.draft_id) {
            return;
        }
        let api = api.clone();
        spawn(async move {
            let result = drafts::send_edit(&api, &buffer).await;
            let sent = result.is_ok();
            let outcome = board
                .write()
                .settle(&buffer.draft_id, DraftAction::Edit, result);
            notice.set(Some(outcome));
            if sent {
                editing.set(None);
            }
        });
    };

    rsx! {
        div {
            class: "fixed inset-0 bg-black bg-opacity-40 flex items-center justify-center",
            div {
                class: "bg-white rounded-lg shadow-lg p-6 w-full max-w-2xl",
                h2 {
                    class: "text-xl font-semibold mb-4",
                    "Edit reply"
                }
                textarea {
                    class: "w-full border border-gray-300 rounded p-2 h-64",
                    value: "{buffer.text}",
                    oninput: move |evt: FormEvent| {
                        if let Some(buffer) = &mut *editing.write() {
                            buffer.text = evt.value();
                        }
                    },
                }
                if !buffer.can_send() {
                    div {
                        class: "text-sm text-red-600 mt-1",
                        "Reply text cannot be empty"
                    }
                }
                div {
                    class: "flex justify-end gap-2 mt-4",
                    button {
                        class: "px-4 py-2 rounded",
                        disabled: busy,
                        onclick: move |_: MouseEvent| editing.set(None),
                        "Cancel"
                    }
                    button {
                        class: "bg-blue-600 text-white px-4 py-2 rounded disabled:opacity-50",
                        disabled: !can_send,
                        onclick: send,
                        if busy { "Sending..." } else { "Send Edited Reply" }
                    }
                }
            }
        }
    }
}
