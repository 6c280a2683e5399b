//! Sync controller — orchestrates the three API round trips and owns all
//! shared mutable state: the record store, the view state, and the cached
//! filtered view.
//!
//! # Execution model
//!
//! Every state mutation happens on the UI thread. A network operation is
//! spawned onto the tokio handle and reports back with [`SyncEvent`]s over an
//! unbounded channel; the UI loop calls [`SyncController::pump`] once per
//! tick to apply whatever has arrived. The three round trips are the only
//! suspension points in the system.
//!
//! There is no mutual exclusion across overlapping operations beyond the
//! per-form busy flag: while a write is in flight its triggering control is
//! disabled, and the flag is cleared on every completion arm. A mutation's
//! reconciling reload runs inside the same task, after that mutation's own
//! response — so its events always arrive in order. No ordering is
//! guaranteed between two independently triggered mutations.

use std::sync::Arc;

use backroom_core::{
    apply_filters, paginate, Product, ProductPayload, RecordStore, RenderModel, SortField,
    ViewSnapshot, ViewState,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::client::CatalogApi;
use crate::error::ApiError;

// ---------------------------------------------------------------------------
// Events and statuses
// ---------------------------------------------------------------------------

/// Which operation triggered a full fetch of the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Initial load or explicit reload.
    Manual,
    /// Reconciling fetch after a successful update.
    AfterUpdate,
    /// Reconciling fetch after a successful create.
    AfterCreate,
}

/// Completion message from a spawned network task.
#[derive(Debug)]
pub enum SyncEvent {
    Loaded {
        result: Result<Vec<Product>, ApiError>,
        origin: LoadOrigin,
    },
    Updated(Result<Box<Product>, ApiError>),
    Created(Result<Box<Product>, ApiError>),
}

/// Shell-facing notification produced by [`SyncController::pump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The store was replaced; cursors into the old view are stale.
    StoreRefreshed,
    /// An update round trip (including its reconcile) finished successfully.
    UpdateSucceeded,
    /// A create round trip finished successfully; the create form resets.
    CreateSucceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPhase {
    InProgress,
    Success,
    Error,
}

/// A transient human-readable status line for one of the two forms.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub phase: StatusPhase,
    pub message: String,
}

impl StatusLine {
    fn in_progress(message: &str) -> Self {
        Self { phase: StatusPhase::InProgress, message: message.to_string() }
    }

    fn success(message: &str) -> Self {
        Self { phase: StatusPhase::Success, message: message.to_string() }
    }

    fn error(message: String) -> Self {
        Self { phase: StatusPhase::Error, message }
    }
}

// ---------------------------------------------------------------------------
// SyncController
// ---------------------------------------------------------------------------

pub struct SyncController {
    client: Arc<dyn CatalogApi>,
    handle: Handle,
    tx: UnboundedSender<SyncEvent>,
    rx: UnboundedReceiver<SyncEvent>,

    store: RecordStore,
    view: ViewState,
    /// Filter+sort result cached so page moves only re-slice.
    filtered: Vec<Product>,

    /// Set when the last fetch failed; rendered in place of the table rows.
    load_error: Option<String>,
    loading: bool,
    save_busy: bool,
    create_busy: bool,
    detail_status: Option<StatusLine>,
    create_status: Option<StatusLine>,
}

impl SyncController {
    pub fn new(client: Arc<dyn CatalogApi>, handle: Handle, page_size: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            handle,
            tx,
            rx,
            store: RecordStore::new(),
            view: ViewState::new(page_size),
            filtered: Vec::new(),
            load_error: None,
            loading: false,
            save_busy: false,
            create_busy: false,
            detail_status: None,
            create_status: None,
        }
    }

    // ── Network operations ─────────────────────────────────────────────────

    /// Fetch the full record set. Ignored while a fetch is already in
    /// flight.
    pub fn load_all(&mut self) {
        if self.loading {
            return;
        }
        self.loading = true;
        tracing::debug!("sync: load_all started");

        let client = self.client.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let result = client.list_products().await;
            let _ = tx.send(SyncEvent::Loaded { result, origin: LoadOrigin::Manual });
        });
    }

    /// PUT a full replacement of one record's editable fields. On success
    /// the returned record is spliced into the store for immediate feedback,
    /// then a reconciling fetch runs in the same task.
    pub fn update(&mut self, id: u64, payload: ProductPayload) {
        if self.save_busy {
            return;
        }
        self.save_busy = true;
        self.detail_status = Some(StatusLine::in_progress("Updating…"));
        tracing::debug!(id, "sync: update started");

        let client = self.client.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            match client.update_product(id, &payload).await {
                Ok(updated) => {
                    let _ = tx.send(SyncEvent::Updated(Ok(Box::new(updated))));
                    let result = client.list_products().await;
                    let _ = tx.send(SyncEvent::Loaded { result, origin: LoadOrigin::AfterUpdate });
                }
                Err(err) => {
                    let _ = tx.send(SyncEvent::Updated(Err(err)));
                }
            }
        });
    }

    /// POST a new record. On success a reconciling fetch runs in the same
    /// task.
    pub fn create(&mut self, payload: ProductPayload) {
        if self.create_busy {
            return;
        }
        self.create_busy = true;
        self.create_status = Some(StatusLine::in_progress("Creating…"));
        tracing::debug!(title = %payload.title, "sync: create started");

        let client = self.client.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            match client.create_product(&payload).await {
                Ok(created) => {
                    let _ = tx.send(SyncEvent::Created(Ok(Box::new(created))));
                    let result = client.list_products().await;
                    let _ = tx.send(SyncEvent::Loaded { result, origin: LoadOrigin::AfterCreate });
                }
                Err(err) => {
                    let _ = tx.send(SyncEvent::Created(Err(err)));
                }
            }
        });
    }

    // ── Event pump ─────────────────────────────────────────────────────────

    /// Drain and apply all completion events that arrived since the last
    /// tick. Returns the notices the shell reacts to.
    pub fn pump(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            self.apply(event, &mut notices);
        }
        notices
    }

    fn apply(&mut self, event: SyncEvent, notices: &mut Vec<Notice>) {
        match event {
            SyncEvent::Loaded { result: Ok(records), origin } => {
                tracing::debug!(count = records.len(), ?origin, "sync: loaded");
                self.store.replace_all(records);
                self.view.page = 1;
                self.load_error = None;
                self.refilter();
                notices.push(Notice::StoreRefreshed);
                match origin {
                    LoadOrigin::Manual => self.loading = false,
                    LoadOrigin::AfterUpdate => {
                        self.detail_status = Some(StatusLine::success("Update saved"));
                        self.save_busy = false;
                        notices.push(Notice::UpdateSucceeded);
                    }
                    LoadOrigin::AfterCreate => {
                        self.create_status = Some(StatusLine::success("Product created"));
                        self.create_busy = false;
                        notices.push(Notice::CreateSucceeded);
                    }
                }
            }
            SyncEvent::Loaded { result: Err(err), origin } => {
                tracing::debug!(%err, ?origin, "sync: load failed");
                // Store and view state stay at their last known-good value.
                match origin {
                    LoadOrigin::Manual => {
                        self.load_error = Some(err.to_string());
                        self.loading = false;
                    }
                    // A failed reconcile surfaces next to the form that
                    // triggered it, not as a table-level error.
                    LoadOrigin::AfterUpdate => {
                        self.detail_status = Some(StatusLine::error(err.to_string()));
                        self.save_busy = false;
                    }
                    LoadOrigin::AfterCreate => {
                        self.create_status = Some(StatusLine::error(err.to_string()));
                        self.create_busy = false;
                    }
                }
            }
            SyncEvent::Updated(Ok(updated)) => {
                tracing::debug!(id = updated.id, "sync: update response spliced");
                // Optimistic feedback; the reconciling fetch that follows
                // this event supersedes it.
                self.store.splice(*updated);
                self.refilter();
            }
            SyncEvent::Updated(Err(err)) => {
                tracing::debug!(%err, "sync: update failed");
                self.detail_status = Some(StatusLine::error(err.to_string()));
                self.save_busy = false;
            }
            SyncEvent::Created(Ok(created)) => {
                tracing::debug!(id = created.id, "sync: create response received");
                // Nothing to splice; the reconciling fetch brings it in.
            }
            SyncEvent::Created(Err(err)) => {
                tracing::debug!(%err, "sync: create failed");
                self.create_status = Some(StatusLine::error(err.to_string()));
                self.create_busy = false;
            }
        }
    }

    // ── View-state mutators ────────────────────────────────────────────────

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.view.set_search(search);
        self.refilter();
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.view.toggle_sort(field);
        self.refilter();
    }

    pub fn clear_sort(&mut self) {
        self.view.clear_sort();
        self.refilter();
    }

    /// Only re-slices; the cached filter/sort result is untouched.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.view.set_page_size(page_size);
    }

    /// Only re-slices; the cached filter/sort result is untouched.
    pub fn next_page(&mut self) {
        let total_pages = self.filtered.len().div_ceil(self.view.page_size).max(1);
        self.view.next_page(total_pages);
    }

    /// Only re-slices; the cached filter/sort result is untouched.
    pub fn prev_page(&mut self) {
        self.view.prev_page();
    }

    fn refilter(&mut self) {
        self.filtered = apply_filters(self.store.records(), &self.view);
    }

    // ── Read access ────────────────────────────────────────────────────────

    /// The current page of the filtered view.
    pub fn snapshot(&self) -> ViewSnapshot {
        paginate(&self.filtered, self.view.page, self.view.page_size)
    }

    /// Projection of the current snapshot for the display surface.
    pub fn render_model(&self) -> RenderModel {
        RenderModel::project(&self.snapshot(), &self.view, self.load_error.as_deref())
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn records(&self) -> &[Product] {
        self.store.records()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True while an update round trip (plus its reconcile) is in flight;
    /// the save control is disabled for exactly this duration.
    pub fn save_busy(&self) -> bool {
        self.save_busy
    }

    pub fn create_busy(&self) -> bool {
        self.create_busy
    }

    pub fn detail_status(&self) -> Option<&StatusLine> {
        self.detail_status.as_ref()
    }

    pub fn create_status(&self) -> Option<&StatusLine> {
        self.create_status.as_ref()
    }

    /// Clear the detail-form status, e.g. when the form is (re)opened.
    pub fn reset_detail_status(&mut self) {
        self.detail_status = None;
    }

    pub fn reset_create_status(&mut self) {
        self.create_status = None;
    }
}
