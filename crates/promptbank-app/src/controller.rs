//! Application state controller.
//!
//! [`App`] owns the single [`AppState`] and is the only thing that mutates
//! it, one [`Intent`] at a time. Presentation reads `&AppState` snapshots.
//!
//! Mutations never patch the local record list: every successful create,
//! update or delete is followed by a full reload from the store.

use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use promptbank_core::defaults;
use promptbank_core::{
    derive_categories, sort_prompts, CatalogFilter, Prompt, PromptFields, RecordStore, SortOption,
};

use crate::admin_gate::{AdminGate, GateOutcome};
use crate::clipboard::Clipboard;
use crate::toast::{Toast, ToastKind};

// =============================================================================
// STATE
// =============================================================================

/// Whether the form creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Holds the record being edited so its `id` and `created_at` can be
    /// sent back unchanged.
    Edit(Prompt),
}

/// A form field the user can type into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Category,
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub mode: FormMode,
    pub draft: PromptFields,
    /// Set while a submit is outstanding; blocks re-entrant submits.
    pub submitting: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub password: String,
}

/// Everything the presentation layer can see.
#[derive(Debug, Clone)]
pub struct AppState {
    pub records: Vec<Prompt>,
    pub loading: bool,
    pub error: Option<String>,
    pub filter: CatalogFilter,
    pub sort: Option<SortOption>,
    pub is_admin: bool,
    /// Open login prompt, if any.
    pub login: Option<LoginState>,
    /// Id of the record shown in the detail view.
    pub detail: Option<String>,
    pub form: Option<FormState>,
    /// Id awaiting delete confirmation.
    pub pending_delete: Option<String>,
    pub toast: Option<Toast>,
    pub demo_mode: bool,
}

impl AppState {
    pub(crate) fn new(demo_mode: bool) -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            error: None,
            filter: CatalogFilter::default(),
            sort: None,
            is_admin: false,
            login: None,
            detail: None,
            form: None,
            pending_delete: None,
            toast: None,
            demo_mode,
        }
    }

    /// Records passing the current filter, in display order.
    pub fn visible(&self) -> Vec<&Prompt> {
        let mut visible = self.filter.apply(&self.records);
        if let Some(sort) = self.sort {
            sort_prompts(&mut visible, sort);
        }
        visible
    }

    /// "All" plus the distinct categories of the loaded records.
    pub fn categories(&self) -> Vec<String> {
        derive_categories(&self.records)
    }

    pub fn find(&self, id: &str) -> Option<&Prompt> {
        self.records.iter().find(|p| p.id == id)
    }

    /// Record in the detail view, if it is still loaded.
    pub fn detail_record(&self) -> Option<&Prompt> {
        self.detail.as_deref().and_then(|id| self.find(id))
    }
}

// =============================================================================
// INTENTS
// =============================================================================

/// A named user action. Every state change goes through one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Fetch the full list from the store.
    Load,
    SetSearch(String),
    SetCategory(String),
    SetSort(Option<SortOption>),
    /// One tap on the logo; enough quick taps open the login prompt.
    LogoTap,
    SetPassword(String),
    SubmitLogin,
    CloseLogin,
    Logout,
    OpenDetail(String),
    CloseDetail,
    /// Copy a record's body to the clipboard.
    Copy(String),
    OpenCreateForm,
    OpenEditForm(String),
    EditField(FormField, String),
    SubmitForm,
    CloseForm,
    RequestDelete(String),
    ConfirmDelete,
    CancelDelete,
    DismissToast,
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct App {
    store: Arc<dyn RecordStore>,
    clipboard: Arc<dyn Clipboard>,
    admin_password: String,
    gate: AdminGate,
    state: AppState,
}

impl App {
    pub fn new(
        store: Arc<dyn RecordStore>,
        clipboard: Arc<dyn Clipboard>,
        admin_password: impl Into<String>,
    ) -> Self {
        let demo_mode = store.is_mock();
        Self {
            store,
            clipboard,
            admin_password: admin_password.into(),
            gate: AdminGate::default(),
            state: AppState::new(demo_mode),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply one intent.
    pub async fn dispatch(&mut self, intent: Intent) {
        debug!(?intent, "dispatch");
        match intent {
            Intent::Load => self.load().await,
            Intent::SetSearch(text) => self.state.filter.search = text,
            Intent::SetCategory(category) => self.state.filter.category = category,
            Intent::SetSort(sort) => self.state.sort = sort,
            Intent::LogoTap => self.logo_tap(),
            Intent::SetPassword(password) => {
                if let Some(login) = self.state.login.as_mut() {
                    login.password = password;
                }
            }
            Intent::SubmitLogin => self.submit_login(),
            Intent::CloseLogin => self.state.login = None,
            Intent::Logout => self.logout(),
            Intent::OpenDetail(id) => {
                if self.state.find(&id).is_some() {
                    self.state.detail = Some(id);
                }
            }
            Intent::CloseDetail => self.state.detail = None,
            Intent::Copy(id) => self.copy(&id).await,
            Intent::OpenCreateForm => self.open_form(None),
            Intent::OpenEditForm(id) => self.open_form(Some(&id)),
            Intent::EditField(field, value) => {
                if let Some(form) = self.state.form.as_mut() {
                    match field {
                        FormField::Title => form.draft.title = value,
                        FormField::Category => form.draft.category = value,
                        FormField::Body => form.draft.body = value,
                    }
                }
            }
            Intent::SubmitForm => self.submit_form().await,
            Intent::CloseForm => self.state.form = None,
            Intent::RequestDelete(id) => self.request_delete(id),
            Intent::ConfirmDelete => self.confirm_delete().await,
            Intent::CancelDelete => self.state.pending_delete = None,
            Intent::DismissToast => self.state.toast = None,
        }
    }

    /// Advance timers: expire the toast and the logo-tap burst. Returns
    /// true when anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.gate.tick(now);
        match &self.state.toast {
            Some(toast) if toast.is_expired(now) => {
                self.state.toast = None;
                true
            }
            _ => false,
        }
    }

    fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.state.toast = Some(Toast::new(message, kind, Instant::now()));
    }

    #[instrument(skip(self), fields(subsystem = "app", component = "controller", op = "load"))]
    async fn load(&mut self) {
        self.state.loading = true;
        self.state.error = None;
        match self.store.list_all().await {
            Ok(records) => {
                info!(result_count = records.len(), "Prompts loaded");
                self.state.records = records;
            }
            Err(e) => {
                error!(error = %e, "Failed to load prompts");
                self.state.error = Some(defaults::LOAD_FAILED_MESSAGE.to_string());
            }
        }
        self.state.loading = false;
    }

    fn logo_tap(&mut self) {
        if let GateOutcome::Reveal = self.gate.tap(Instant::now()) {
            debug!("Admin gate revealed login prompt");
            self.state.login = Some(LoginState::default());
        }
    }

    fn submit_login(&mut self) {
        let Some(login) = self.state.login.as_ref() else {
            debug!("Login submitted without an open prompt");
            return;
        };
        if login.password == self.admin_password {
            self.state.is_admin = true;
            self.state.login = None;
            info!("Admin mode enabled");
            self.show_toast("Welcome, Admin!", ToastKind::Success);
        } else {
            warn!("Admin login rejected");
            self.show_toast("Invalid password", ToastKind::Error);
        }
    }

    fn logout(&mut self) {
        self.state.is_admin = false;
        self.state.form = None;
        self.state.pending_delete = None;
        self.show_toast("Logged out successfully", ToastKind::Success);
    }

    fn require_admin(&mut self) -> bool {
        if !self.state.is_admin {
            self.show_toast("Admin access required", ToastKind::Error);
        }
        self.state.is_admin
    }

    async fn copy(&mut self, id: &str) {
        let Some(body) = self.state.find(id).map(|p| p.body.clone()) else {
            return;
        };
        match self.clipboard.write_text(&body).await {
            Ok(()) => self.show_toast("Prompt copied to clipboard!", ToastKind::Success),
            Err(e) => {
                warn!(error = %e, "Clipboard write failed");
                self.show_toast("Failed to copy", ToastKind::Error);
            }
        }
    }

    fn open_form(&mut self, edit_id: Option<&str>) {
        if !self.require_admin() {
            return;
        }
        let form = match edit_id {
            None => FormState {
                mode: FormMode::Create,
                draft: PromptFields::default(),
                submitting: false,
            },
            Some(id) => {
                let Some(record) = self.state.find(id).cloned() else {
                    return;
                };
                FormState {
                    draft: record.fields(),
                    mode: FormMode::Edit(record),
                    submitting: false,
                }
            }
        };
        self.state.form = Some(form);
    }

    #[instrument(skip(self), fields(subsystem = "app", component = "controller", op = "submit_form"))]
    async fn submit_form(&mut self) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        if form.submitting {
            debug!("Submit ignored while another is outstanding");
            return;
        }
        let missing = form.draft.missing_fields();
        if !missing.is_empty() {
            let message = format!("Please fill in: {}", missing.join(", "));
            self.show_toast(message, ToastKind::Error);
            return;
        }

        form.submitting = true;
        let (mode, draft) = (form.mode.clone(), form.draft.clone());

        let (result, success_message) = match mode {
            FormMode::Create => (
                self.store.create(draft).await,
                "Prompt created successfully",
            ),
            FormMode::Edit(original) => (
                self.store.update(original.with_fields(draft)).await,
                "Prompt updated successfully",
            ),
        };

        match result {
            Ok(()) => {
                info!("Form submitted");
                self.state.form = None;
                self.show_toast(success_message, ToastKind::Success);
                self.load().await;
            }
            Err(e) => {
                error!(error = %e, "Form submit failed");
                self.show_toast("Operation failed", ToastKind::Error);
            }
        }

        if let Some(form) = self.state.form.as_mut() {
            form.submitting = false;
        }
    }

    fn request_delete(&mut self, id: String) {
        if !self.require_admin() {
            return;
        }
        if self.state.find(&id).is_some() {
            self.state.pending_delete = Some(id);
        }
    }

    #[instrument(skip(self), fields(subsystem = "app", component = "controller", op = "delete"))]
    async fn confirm_delete(&mut self) {
        let Some(id) = self.state.pending_delete.take() else {
            return;
        };
        match self.store.delete(&id).await {
            Ok(()) => {
                info!(prompt_id = %id, "Prompt deleted");
                self.show_toast("Prompt deleted", ToastKind::Success);
            }
            Err(e) => {
                error!(prompt_id = %id, error = %e, "Delete failed");
                self.show_toast("Failed to delete", ToastKind::Error);
            }
        }
        // The store may have changed either way.
        self.load().await;
    }
}
