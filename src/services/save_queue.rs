//! Editor save queue - serializes rapid edits into at most one in-flight save
//!
//! Every edit produces a full replacement document. The queue is a single
//! latest-value slot: an edit that arrives while a save is in flight simply
//! overwrites whatever was waiting, so intermediate states are never
//! transmitted. The flush is an explicit drain loop guarded by an in-flight
//! flag, which gives two guarantees by construction: at most one save
//! request is outstanding at any instant, and the queue never grows beyond
//! one entry. Releasing the flag re-checks the slot, so an edit that lost
//! the claim race mid-release is drained rather than stranded.
//!
//! A failed save surfaces the error state and keeps the last known-good
//! in-memory content; the failed value is not re-queued, but edits that
//! arrived during the failed request still flush.

use crate::domain::content::SiteContent;
use crate::domain::defaults::default_content;
use crate::io::api_client::ContentApi;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Queue status as observed by the editor UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueStatus {
    Idle,
    Loading,
    Saving,
    Error,
}

impl QueueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueStatus::Idle => "idle",
            QueueStatus::Loading => "loading",
            QueueStatus::Saving => "saving",
            QueueStatus::Error => "error",
        }
    }
}

struct QueueState {
    status: QueueStatus,
    error: Option<String>,
}

pub struct SaveQueue {
    api: Arc<dyn ContentApi>,
    content: Mutex<SiteContent>,
    state: Mutex<QueueState>,
    /// Latest-value slot; older pending values are discarded, not replayed
    pending: Mutex<Option<SiteContent>>,
    saving: AtomicBool,
    editing: AtomicBool,
}

impl SaveQueue {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self {
            api,
            content: Mutex::new(default_content()),
            state: Mutex::new(QueueState { status: QueueStatus::Idle, error: None }),
            pending: Mutex::new(None),
            saving: AtomicBool::new(false),
            editing: AtomicBool::new(false),
        }
    }

    /// Current in-memory document
    pub fn content(&self) -> SiteContent {
        self.content.lock().clone()
    }

    pub fn status(&self) -> QueueStatus {
        self.state.lock().status
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.load(Ordering::SeqCst)
    }

    fn set_state(&self, status: QueueStatus, error: Option<String>) {
        let mut state = self.state.lock();
        state.status = status;
        state.error = error;
    }

    /// Fetch the current document from the server. On failure the stale
    /// in-memory content is retained and the status moves to Error.
    pub async fn load(&self) {
        self.set_state(QueueStatus::Loading, None);
        match self.api.load().await {
            Ok(content) => {
                *self.content.lock() = content;
                self.set_state(QueueStatus::Idle, None);
                debug!("content_loaded");
            }
            Err(e) => {
                warn!(error = %e, "content_load_failed");
                self.set_state(QueueStatus::Error, Some(e.to_string()));
            }
        }
    }

    /// Toggle editing mode. Turning it off discards any pending edit and
    /// forces a Saving status back to Idle; an already in-flight request
    /// runs to completion but nothing further is flushed.
    pub fn set_editing(&self, editing: bool) {
        self.editing.store(editing, Ordering::SeqCst);
        if !editing {
            let discarded = self.pending.lock().take().is_some();
            if discarded {
                info!("pending_edit_discarded");
            }
            let mut state = self.state.lock();
            if state.status == QueueStatus::Saving {
                state.status = QueueStatus::Idle;
            }
        }
    }

    /// Apply an updater to the current document and schedule a save.
    /// Outside editing mode the document changes in memory only.
    pub async fn apply_edit<F>(&self, updater: F)
    where
        F: FnOnce(&SiteContent) -> SiteContent,
    {
        let next = {
            let mut content = self.content.lock();
            let next = updater(&*content);
            *content = next.clone();
            next
        };

        if self.editing.load(Ordering::SeqCst) {
            *self.pending.lock() = Some(next);
            self.flush().await;
        }
    }

    /// Drain the pending slot. Returns immediately when editing is off, a
    /// save is already in flight, or nothing is pending.
    pub async fn flush(&self) {
        if !self.editing.load(Ordering::SeqCst) {
            *self.pending.lock() = None;
            return;
        }
        if self.pending.lock().is_none() {
            return;
        }
        // Claim the in-flight flag; whoever loses the race leaves the work
        // to the current holder's drain loop.
        if self.saving.swap(true, Ordering::SeqCst) {
            return;
        }

        self.drain().await;
        self.release_claim().await;
    }

    /// Save pending values until the slot is empty. Caller holds the
    /// in-flight flag.
    async fn drain(&self) {
        loop {
            if !self.editing.load(Ordering::SeqCst) {
                *self.pending.lock() = None;
                break;
            }

            let Some(next) = self.pending.lock().take() else {
                break;
            };

            self.set_state(QueueStatus::Saving, None);
            match self.api.save(&next).await {
                Ok(saved) => {
                    *self.content.lock() = saved;
                    self.set_state(QueueStatus::Idle, None);
                    debug!("content_save_flushed");
                }
                Err(e) => {
                    // The failed value is dropped; newer pending edits (if
                    // any) are still attempted on the next iteration.
                    warn!(error = %e, "content_save_failed");
                    self.set_state(QueueStatus::Error, Some(e.to_string()));
                }
            }
        }
    }

    /// Release the in-flight flag, then re-check the slot. An edit whose
    /// flush lost the claim race while the drain was emptying out would
    /// otherwise sit in the slot unsaved until the next edit arrives.
    async fn release_claim(&self) {
        loop {
            self.saving.store(false, Ordering::SeqCst);

            if !self.editing.load(Ordering::SeqCst) || self.pending.lock().is_none() {
                return;
            }
            if self.saving.swap(true, Ordering::SeqCst) {
                return;
            }
            self.drain().await;
        }
    }

    /// Discard pending state and re-run the initial load, abandoning any
    /// unsaved local edits.
    pub async fn reload(&self) {
        *self.pending.lock() = None;
        self.saving.store(false, Ordering::SeqCst);
        self.load().await;
    }
}
