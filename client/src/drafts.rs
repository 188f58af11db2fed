use std::collections::HashSet;

use autoreply_types::{Draft, DraftFilter, DraftId};

use crate::api::ApiClient;
use crate::error::{ActionError, ApiError, FormError};
use crate::notice::Notice;

pub const PREVIEW_CHARS: usize = 200;

pub const REJECT_PROMPT: &str = "Reject this draft? The reply will not be sent.";

/// The first [`PREVIEW_CHARS`] characters of a message body.
pub fn preview(body: &str) -> String {
    match body.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftAction {
    Approve,
    Reject,
    Edit,
}

/// Drafts on screen plus the ids with a request in flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftBoard {
    drafts: Vec<Draft>,
    filter: DraftFilter,
    in_flight: HashSet<DraftId>,
}

impl DraftBoard {
    pub fn new(filter: DraftFilter, drafts: Vec<Draft>) -> Self {
        Self {
            drafts,
            filter,
            in_flight: HashSet::new(),
        }
    }

    /// A deep-linked draft. Updates replace it instead of removing it.
    pub fn single(draft: Draft) -> Self {
        Self::new(DraftFilter::default(), vec![draft])
    }

    /// Switches to `filter` and empties the board until its drafts arrive.
    pub fn request(&mut self, filter: DraftFilter) {
        *self = Self::new(filter, Vec::new());
    }

    /// Whether a load for `filter` is still wanted.
    pub fn is_current(&self, filter: DraftFilter) -> bool {
        self.filter == filter
    }

    /// Shows drafts loaded for `filter`. Returns false, leaving the board
    /// untouched, when the filter has changed since the load started.
    pub fn fill(&mut self, filter: DraftFilter, drafts: Vec<Draft>) -> bool {
        if !self.is_current(filter) {
            tracing::debug!(?filter, "discarding drafts for a replaced filter");
            return false;
        }
        self.drafts = drafts;
        true
    }

    pub fn drafts(&self) -> &[Draft] {
        &self.drafts
    }

    pub fn filter(&self) -> DraftFilter {
        self.filter
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn get(&self, id: &DraftId) -> Option<&Draft> {
        self.drafts.iter().find(|draft| &draft.id == id)
    }

    pub fn is_busy(&self, id: &DraftId) -> bool {
        self.in_flight.contains(id)
    }

    /// Marks `id` in flight. Returns false if it already was.
    pub fn begin(&mut self, id: &DraftId) -> bool {
        self.in_flight.insert(id.clone())
    }

    pub fn cancel(&mut self, id: &DraftId) {
        self.in_flight.remove(id);
    }

    pub fn settle(
        &mut self,
        id: &DraftId,
        action: DraftAction,
        result: Result<Draft, ActionError>,
    ) -> Notice {
        self.in_flight.remove(id);
        match result {
            Ok(updated) => {
                let notice = success_notice(action, &updated);
                self.apply(updated);
                notice
            }
            Err(err) => Notice::failure(failure_context(action), err),
        }
    }

    fn apply(&mut self, updated: Draft) {
        if self.filter.is_pending_only() && !updated.is_pending() {
            self.drafts.retain(|draft| draft.id != updated.id);
        } else if let Some(slot) = self.drafts.iter_mut().find(|draft| draft.id == updated.id) {
            *slot = updated;
        }
    }
}

fn success_notice(action: DraftAction, draft: &Draft) -> Notice {
    match action {
        DraftAction::Approve => Notice::success(format!("Reply sent to {}.", draft.sender_email)),
        DraftAction::Edit => {
            Notice::success(format!("Edited reply sent to {}.", draft.sender_email))
        }
        DraftAction::Reject => Notice::success("Draft rejected. No reply was sent."),
    }
}

fn failure_context(action: DraftAction) -> &'static str {
    match action {
        DraftAction::Approve => "Failed to send reply",
        DraftAction::Edit => "Failed to send edited reply",
        DraftAction::Reject => "Failed to reject draft",
    }
}

pub async fn load(api: &ApiClient, filter: DraftFilter) -> Result<Vec<Draft>, ApiError> {
    let drafts = api.list_drafts(filter).await?;
    tracing::debug!(count = drafts.len(), "drafts loaded");
    Ok(drafts)
}

pub async fn approve(api: &ApiClient, id: &DraftId) -> Result<Draft, ActionError> {
    Ok(api.approve_draft(id).await?)
}

/// Rejects after `confirm` agrees. A declined confirmation sends nothing and yields `None`.
pub async fn reject(
    api: &ApiClient,
    id: &DraftId,
    confirm: impl FnOnce(&str) -> bool,
) -> Result<Option<Draft>, ActionError> {
    if !confirm(REJECT_PROMPT) {
        return Ok(None);
    }
    Ok(Some(api.reject_draft(id).await?))
}

/// Reply text being edited for one draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub draft_id: DraftId,
    pub text: String,
}

impl EditBuffer {
    pub fn open(draft: &Draft) -> Self {
        Self {
            draft_id: draft.id.clone(),
            text: draft.draft_body.clone(),
        }
    }

    pub fn can_send(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

pub async fn send_edit(api: &ApiClient, buffer: &EditBuffer) -> Result<Draft, ActionError> {
    if !buffer.can_send() {
        return Err(FormError::EmptyReply.into());
    }
    Ok(api.edit_draft(&buffer.draft_id, &buffer.text).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::testing::{MockBackend, draft_json};
    use autoreply_types::{DraftStatus, ScanPeriod};

    fn draft(id: &str, status: &str) -> Draft {
        serde_json::from_str(&draft_json(id, status)).unwrap()
    }

    fn envelope(id: &str, status: &str) -> String {
        format!(r#"{{"draft":{}}}"#, draft_json(id, status))
    }

    #[tokio::test]
    async fn test_approve_posts_once_and_removes_from_pending_list() {
        let backend = MockBackend::start()
            .with("POST", "/email/drafts/D1/approve", 200, &envelope("D1", "sent"))
            .await;
        let api = backend.client(Session::in_memory());
        let mut board = DraftBoard::new(
            DraftFilter::pending(ScanPeriod::Week),
            vec![draft("D1", "pending"), draft("D2", "pending")],
        );
        let id = DraftId::new("D1");

        assert!(board.begin(&id));
        assert!(board.is_busy(&id));
        let result = approve(&api, &id).await;
        let notice = board.settle(&id, DraftAction::Approve, result);

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].uri, "/email/drafts/D1/approve");

        assert_eq!(board.len(), 1);
        assert!(board.get(&id).is_none());
        assert!(!board.is_busy(&id));
        assert_eq!(notice.message, "Reply sent to alice@example.com.");
    }

    #[test]
    fn test_second_action_on_busy_draft_is_refused() {
        let mut board = DraftBoard::single(draft("D1", "pending"));
        let id = DraftId::new("D1");
        assert!(board.begin(&id));
        assert!(!board.begin(&id));
        board.cancel(&id);
        assert!(board.begin(&id));
    }

    #[tokio::test]
    async fn test_declined_reject_sends_nothing() {
        let backend = MockBackend::start()
            .with("POST", "/email/drafts/D1/reject", 200, &envelope("D1", "rejected"))
            .await;
        let api = backend.client(Session::in_memory());

        let mut prompt = String::new();
        let outcome = reject(&api, &DraftId::new("D1"), |message| {
            prompt = message.to_string();
            false
        })
        .await
        .unwrap();

        assert_eq!(outcome, None);
        assert_eq!(prompt, REJECT_PROMPT);
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_reject_updates_single_view_in_place() {
        let backend = MockBackend::start()
            .with("POST", "/email/drafts/D1/reject", 200, &envelope("D1", "rejected"))
            .await;
        let api = backend.client(Session::in_memory());
        let mut board = DraftBoard::single(draft("D1", "pending"));
        let id = DraftId::new("D1");

        board.begin(&id);
        let result = reject(&api, &id, |_| true).await.map(Option::unwrap);
        board.settle(&id, DraftAction::Reject, result);

        assert_eq!(board.get(&id).map(|d| d.status), Some(DraftStatus::Rejected));
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_edit_cannot_be_sent() {
        let backend = MockBackend::start().await;
        let api = backend.client(Session::in_memory());
        let mut buffer = EditBuffer::open(&draft("D1", "pending"));
        assert!(buffer.can_send());

        buffer.text = " \n\t ".to_string();
        assert!(!buffer.can_send());

        let err = send_edit(&api, &buffer).await.unwrap_err();
        assert_eq!(err, ActionError::Form(FormError::EmptyReply));
        assert!(backend.requests().is_empty());

        buffer.text = "Thanks, see you then.".to_string();
        assert!(buffer.can_send());
    }

    #[tokio::test]
    async fn test_failed_action_keeps_draft() {
        let backend = MockBackend::start()
            .with("POST", "/email/drafts/D1/approve", 502, r#"{"error":"Gmail send failed"}"#)
            .await;
        let api = backend.client(Session::in_memory());
        let mut board = DraftBoard::new(
            DraftFilter::pending(ScanPeriod::Day),
            vec![draft("D1", "pending")],
        );
        let id = DraftId::new("D1");

        board.begin(&id);
        let notice = board.settle(&id, DraftAction::Approve, approve(&api, &id).await);

        assert_eq!(board.len(), 1);
        assert!(notice.is_error());
        assert_eq!(notice.message, "Failed to send reply: Gmail send failed");
    }

    #[test]
    fn test_late_load_for_replaced_filter_is_ignored() {
        let week = DraftFilter::pending(ScanPeriod::Week);
        let sent = DraftFilter {
            status: Some(DraftStatus::Sent),
            period: Some(ScanPeriod::Week),
        };
        let mut board = DraftBoard::default();

        board.request(week);
        board.request(sent);

        assert!(board.fill(sent, vec![draft("S1", "sent")]));
        assert!(!board.fill(week, vec![draft("P1", "pending"), draft("P2", "pending")]));

        assert_eq!(board.filter(), sent);
        assert_eq!(board.len(), 1);
        assert!(board.get(&DraftId::new("S1")).is_some());
        assert!(!board.is_current(week));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let short = "hello";
        assert_eq!(preview(short), "hello");

        let long = "é".repeat(PREVIEW_CHARS + 5);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), PREVIEW_CHARS + 3);
    }
}
