//! Form session
//!
//! Drives one edit interaction over a single interface record: navigation
//! across visible fields, editor sessions, validation and submission.

use nmstate_rs::{InterfaceRecord, StateProvider};

use crate::bridges::BridgeSet;
use crate::constants::{RESULT_NO_CHANGE, RESULT_OK};
use crate::editors::FieldEditor;
use crate::errors::format_validation_errors;
use crate::form::Form;
use crate::key::Key;
use crate::pipeline::{self, ApplyOutcome};
use crate::render::{Emphasis, Renderer};
use crate::validators::validator_for;

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Browsing,
    /// An editor session is active on the current field
    Editing,
    /// A submission is in flight
    Submitting,
}

/// What the caller should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    None,
    /// The user left the form
    Cancelled,
    /// The provider accepted a change; interface and bridge lists are stale
    ReloadRequested,
}

/// Status line content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Names of the fields that failed validation at submit time
    Validation(Vec<String>),
    NoChange,
    Applied,
    /// Provider text, verbatim
    ProviderError(String),
}

impl Status {
    pub fn text(&self) -> String {
        match self {
            Status::Validation(names) => format_validation_errors(names),
            Status::NoChange => RESULT_NO_CHANGE.to_string(),
            Status::Applied => RESULT_OK.to_string(),
            Status::ProviderError(message) => message.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Validation(_) | Status::ProviderError(_))
    }
}

impl From<&ApplyOutcome> for Status {
    fn from(outcome: &ApplyOutcome) -> Self {
        match outcome {
            ApplyOutcome::NoChange => Status::NoChange,
            ApplyOutcome::Applied(_) => Status::Applied,
            ApplyOutcome::Failed { message, .. } => Status::ProviderError(message.clone()),
        }
    }
}

/// An open edit form
#[derive(Debug)]
pub struct FormSession {
    record: InterfaceRecord,
    form: Form,
    bridges: BridgeSet,
    state: ControllerState,
    /// The last commit attempt in the current editor session was rejected
    edit_error: bool,
    status: Option<Status>,
    last_outcome: Option<ApplyOutcome>,
}

/// Open a form over a snapshot of `record`
pub fn open_form(record: &InterfaceRecord, bridges: BridgeSet) -> FormSession {
    FormSession::open(record.clone(), bridges)
}

impl FormSession {
    pub fn open(record: InterfaceRecord, bridges: BridgeSet) -> Self {
        let form = Form::from_record(&record);
        tracing::debug!("Opened form for {}", record.name);
        Self {
            record,
            form,
            bridges,
            state: ControllerState::Browsing,
            edit_error: false,
            status: None,
            last_outcome: None,
        }
    }

    pub fn record(&self) -> &InterfaceRecord {
        &self.record
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn bridges(&self) -> &BridgeSet {
        &self.bridges
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_browsing(&self) -> bool {
        self.state == ControllerState::Browsing
    }

    pub fn has_edit_error(&self) -> bool {
        self.edit_error
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Outcome of the last submission that reached the provider, once
    pub fn take_outcome(&mut self) -> Option<ApplyOutcome> {
        self.last_outcome.take()
    }

    /// Feed one key to the session
    pub fn handle_key(&mut self, key: Key, provider: &dyn StateProvider) -> SessionEvent {
        match self.state {
            ControllerState::Browsing => self.handle_browsing_key(key, provider),
            ControllerState::Editing => {
                self.handle_editing_key(key);
                SessionEvent::None
            }
            // Submission runs to completion inside a single key
            ControllerState::Submitting => SessionEvent::None,
        }
    }

    fn handle_browsing_key(&mut self, key: Key, provider: &dyn StateProvider) -> SessionEvent {
        match key {
            Key::Up => self.form.move_up(),
            Key::Down => self.form.move_down(),
            Key::Esc => {
                tracing::debug!("Form for {} cancelled", self.record.name);
                return SessionEvent::Cancelled;
            }
            Key::Enter => return self.activate(provider),
            _ => {}
        }
        SessionEvent::None
    }

    fn activate(&mut self, provider: &dyn StateProvider) -> SessionEvent {
        self.status = None;
        let Some(field) = self.form.current_mut() else {
            return SessionEvent::None;
        };

        if field.is_action() {
            return self.submit(provider);
        }

        if field.editor.has_session() {
            field.editor.begin_edit();
            self.edit_error = false;
            self.state = ControllerState::Editing;
        } else if let FieldEditor::Toggle(toggle) = &mut field.editor {
            toggle.toggle();
            field.commit();
            self.form.refresh_visibility();
        }
        SessionEvent::None
    }

    fn handle_editing_key(&mut self, key: Key) {
        let Some(field) = self.form.current_mut() else {
            self.state = ControllerState::Browsing;
            return;
        };

        match key {
            Key::Esc => {
                field.reset_editor();
                self.finish_edit();
            }
            Key::Enter => {
                let candidate = field.editor.value();
                if validator_for(field.kind)(&candidate) {
                    field.commit();
                    self.finish_edit();
                    self.form.refresh_visibility();
                } else {
                    tracing::debug!("Rejected value for {}: {:?}", field.name, candidate);
                    self.edit_error = true;
                }
            }
            _ => {
                field.editor.handle_input(key);
                self.edit_error = false;
            }
        }
    }

    fn finish_edit(&mut self) {
        self.edit_error = false;
        self.state = ControllerState::Browsing;
    }

    fn submit(&mut self, provider: &dyn StateProvider) -> SessionEvent {
        self.state = ControllerState::Submitting;

        let failed: Vec<String> = self
            .form
            .visible_fields()
            .filter(|f| !validator_for(f.kind)(&f.value))
            .map(|f| f.name.clone())
            .collect();

        if !failed.is_empty() {
            tracing::info!("Validation failed for {}: {:?}", self.record.name, failed);
            self.status = Some(Status::Validation(failed));
            self.state = ControllerState::Browsing;
            return SessionEvent::None;
        }

        let proposed = self.form.visible_values();
        let outcome = pipeline::submit(&self.record, &proposed, &mut self.bridges, provider);
        self.status = Some(Status::from(&outcome));
        self.state = ControllerState::Browsing;

        let event = if outcome.is_success() {
            self.reload(provider);
            SessionEvent::ReloadRequested
        } else {
            SessionEvent::None
        };

        if outcome.reached_provider() {
            self.last_outcome = Some(outcome);
        }
        event
    }

    /// Re-read the record and bridges after the provider accepted a change
    fn reload(&mut self, provider: &dyn StateProvider) {
        let state = match provider.snapshot() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Failed to reload {}: {}", self.record.name, e);
                return;
            }
        };

        if let Some(record) = state.interfaces.into_iter().find(|i| i.name == self.record.name) {
            self.record = record;
        }
        self.bridges = BridgeSet::new(state.bridges);
    }

    /// Emit draw intents for the visible fields and the status line
    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.clear();

        for (position, field, selected) in self.form.iter_visible() {
            let emphasis = match (selected, self.state) {
                (false, _) => Emphasis::Normal,
                (true, ControllerState::Editing) if self.edit_error => Emphasis::Error,
                (true, ControllerState::Editing) => Emphasis::Editing,
                (true, _) => Emphasis::Selected,
            };
            field.editor.show(renderer, position, &field.name, emphasis);
        }

        if let Some(status) = &self.status {
            let emphasis = if status.is_error() {
                Emphasis::Error
            } else {
                Emphasis::Normal
            };
            renderer.draw_status(&status.text(), emphasis);
        }

        renderer.refresh();
    }
}
