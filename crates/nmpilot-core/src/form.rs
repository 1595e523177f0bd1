//! Form model
//!
//! An ordered set of field descriptors built from an interface record,
//! plus the cursor into the currently visible subset.

use std::collections::BTreeMap;

use nmstate_rs::{InterfaceRecord, InterfaceState};

use crate::constants::fields;
use crate::editors::FieldEditor;
use crate::selection::SelectableList;
use crate::visibility::visible_fields;

/// Kind of a form field; decides its editor, encoding and validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Bool,
    StateBool,
    Ipv4Address,
    BridgeName,
    ApplyButton,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Bool => "bool",
            FieldKind::StateBool => "state_bool",
            FieldKind::Ipv4Address => "ipv4address",
            FieldKind::BridgeName => "bridge_name",
            FieldKind::ApplyButton => "apply_button",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(FieldKind::Text),
            "bool" => Some(FieldKind::Bool),
            "state_bool" => Some(FieldKind::StateBool),
            "ipv4address" => Some(FieldKind::Ipv4Address),
            "bridge_name" => Some(FieldKind::BridgeName),
            "apply_button" => Some(FieldKind::ApplyButton),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value of a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    /// The apply button; it has no value of its own
    Action,
}

impl FieldValue {
    pub fn text(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean reading of the value; anything but `Bool(true)` is false
    pub fn as_bool(&self) -> bool {
        matches!(self, FieldValue::Bool(true))
    }
}

/// Field name to value
pub type FieldMap = BTreeMap<String, FieldValue>;

/// One field of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    /// Last committed value
    pub value: FieldValue,
    pub editor: FieldEditor,
}

impl FieldDescriptor {
    pub fn new(name: &str, kind: FieldKind, value: FieldValue) -> Self {
        let editor = FieldEditor::for_kind(kind, &value);
        Self {
            name: name.to_string(),
            kind,
            value,
            editor,
        }
    }

    pub fn is_action(&self) -> bool {
        self.kind == FieldKind::ApplyButton
    }

    /// Discard uncommitted editor changes
    pub fn reset_editor(&mut self) {
        self.editor = FieldEditor::for_kind(self.kind, &self.value);
    }

    /// Copy the editor's value into the descriptor
    pub fn commit(&mut self) {
        self.value = self.editor.value();
    }
}

/// Serialize the editable attributes of a record as form values
///
/// This is also the "current state" the change detector compares against.
pub fn record_values(record: &InterfaceRecord) -> FieldMap {
    let dhcp = record.ipv4.enabled && record.ipv4.dhcp;
    let address = match record.state {
        InterfaceState::Up => record.ipv4.first_ip().unwrap_or_default(),
        InterfaceState::Down => "",
    };

    FieldMap::from([
        (fields::STATE.to_string(), FieldValue::text(record.state.as_str())),
        (fields::IPV4_DHCP.to_string(), FieldValue::Bool(dhcp)),
        (fields::IPV4_ADDRESS.to_string(), FieldValue::text(address)),
        (
            fields::BRIDGE.to_string(),
            FieldValue::Bool(!record.controller.is_empty()),
        ),
        (
            fields::BRIDGE_NAME.to_string(),
            FieldValue::text(&record.controller),
        ),
    ])
}

/// Build the full field set for a record, in display order
pub fn describe_record(record: &InterfaceRecord) -> Vec<FieldDescriptor> {
    let mut values = record_values(record);
    let mut take = |name: &str| values.remove(name).unwrap_or(FieldValue::Action);

    vec![
        FieldDescriptor::new(fields::STATE, FieldKind::StateBool, take(fields::STATE)),
        FieldDescriptor::new(fields::IPV4_DHCP, FieldKind::Bool, take(fields::IPV4_DHCP)),
        FieldDescriptor::new(
            fields::IPV4_ADDRESS,
            FieldKind::Ipv4Address,
            take(fields::IPV4_ADDRESS),
        ),
        FieldDescriptor::new(fields::BRIDGE, FieldKind::Bool, take(fields::BRIDGE)),
        FieldDescriptor::new(
            fields::BRIDGE_NAME,
            FieldKind::BridgeName,
            take(fields::BRIDGE_NAME),
        ),
        FieldDescriptor::new(fields::APPLY, FieldKind::ApplyButton, FieldValue::Action),
    ]
}

/// Field descriptors plus the cursor into the visible ones
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FieldDescriptor>,
    /// Indices into `fields`, in display order
    visible: SelectableList<usize>,
}

impl Form {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        let mut form = Self {
            fields,
            visible: SelectableList::empty(),
        };
        form.refresh_visibility();
        form
    }

    pub fn from_record(record: &InterfaceRecord) -> Self {
        Self::new(describe_record(record))
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Committed values of every non-action field
    pub fn values(&self) -> FieldMap {
        self.fields
            .iter()
            .filter(|f| !f.is_action())
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Committed values of the visible non-action fields
    pub fn visible_values(&self) -> FieldMap {
        self.visible_fields()
            .filter(|f| !f.is_action())
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.visible.items().iter().map(|&i| &self.fields[i])
    }

    pub fn visible_names(&self) -> Vec<&str> {
        self.visible_fields().map(|f| f.name.as_str()).collect()
    }

    /// Visible fields with their position and whether the cursor is on them
    pub fn iter_visible(&self) -> impl Iterator<Item = (usize, &FieldDescriptor, bool)> {
        self.visible
            .iter_with_selection()
            .map(|(pos, &i, selected)| (pos, &self.fields[i], selected))
    }

    pub fn position(&self) -> usize {
        self.visible.selected_index()
    }

    pub fn current(&self) -> Option<&FieldDescriptor> {
        self.visible.selected().map(|&i| &self.fields[i])
    }

    pub fn current_mut(&mut self) -> Option<&mut FieldDescriptor> {
        let index = *self.visible.selected()?;
        self.fields.get_mut(index)
    }

    pub fn move_up(&mut self) {
        self.visible.select_prev();
    }

    pub fn move_down(&mut self) {
        self.visible.select_next();
    }

    /// Recompute the visible subset from committed values
    ///
    /// The position index is kept and clamped into the new range.
    pub fn refresh_visibility(&mut self) {
        let values = self.values();
        let indices = visible_fields(&values)
            .iter()
            .filter_map(|name| self.fields.iter().position(|f| f.name == *name))
            .collect();
        self.visible.update_items(indices);
    }
}
