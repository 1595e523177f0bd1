//! Field editors
//!
//! One small input state machine per field kind. [`FieldEditor`] is the
//! closed set the form dispatches over.

use crate::constants::TEXT_FIELD_CAPACITY;
use crate::errors::InvalidChoice;
use crate::form::{FieldKind, FieldValue};
use crate::key::Key;
use crate::render::{Emphasis, FieldView, Renderer};

/// Single-line text input with a cursor and a fixed capacity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    value: String,
    /// Cursor position in characters, `0..=len`
    cursor_pos: usize,
    width: usize,
}

impl TextField {
    pub fn new(value: &str) -> Self {
        Self::with_width(value, TEXT_FIELD_CAPACITY)
    }

    pub fn with_width(value: &str, width: usize) -> Self {
        Self {
            value: value.to_string(),
            cursor_pos: 0,
            width,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Replace the value and put the cursor at its end
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor_pos = self.len();
    }

    /// Place the cursor at the end of the value
    pub fn begin_edit(&mut self) {
        self.cursor_pos = self.len();
    }

    pub fn handle_input(&mut self, key: Key) {
        match key {
            Key::Left => self.cursor_pos = self.cursor_pos.saturating_sub(1),
            Key::Right => {
                if self.cursor_pos < self.len() {
                    self.cursor_pos += 1;
                }
            }
            Key::Backspace => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                    let at = self.byte_index(self.cursor_pos);
                    self.value.remove(at);
                }
            }
            Key::Delete => {
                if self.cursor_pos < self.len() {
                    let at = self.byte_index(self.cursor_pos);
                    self.value.remove(at);
                }
            }
            _ => {
                if let Some(c) = key.printable() {
                    if self.len() < self.width {
                        let at = self.byte_index(self.cursor_pos);
                        self.value.insert(at, c);
                        self.cursor_pos += 1;
                    }
                }
            }
        }
    }
}

/// Boolean switch, committed on every toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToggleField {
    value: bool,
}

impl ToggleField {
    pub fn new(value: bool) -> Self {
        Self { value }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }

    pub fn toggle(&mut self) {
        self.value = !self.value;
    }

    pub fn display(&self) -> &'static str {
        if self.value { "[X] ON" } else { "[ ] OFF" }
    }
}

/// Options offered by the interface state radio
pub const STATE_OPTIONS: [&str; 2] = ["UP", "DOWN"];

/// Two-state radio over [`STATE_OPTIONS`]
///
/// # Examples
///
/// ```
/// use nmpilot_core::editors::ChoiceField;
/// use nmpilot_core::Key;
///
/// let mut choice = ChoiceField::with_value("up").unwrap();
/// choice.handle_input(Key::Right);
/// assert_eq!(choice.value(), "down");
/// assert!(ChoiceField::with_value("sideways").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChoiceField {
    selected_index: usize,
}

impl ChoiceField {
    pub fn with_value(value: &str) -> Result<Self, InvalidChoice> {
        let mut field = Self::default();
        field.set_value(value)?;
        Ok(field)
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Lower-cased name of the selected option
    pub fn value(&self) -> String {
        STATE_OPTIONS[self.selected_index].to_lowercase()
    }

    pub fn set_value(&mut self, value: &str) -> Result<(), InvalidChoice> {
        match STATE_OPTIONS
            .iter()
            .position(|o| o.eq_ignore_ascii_case(value))
        {
            Some(index) => {
                self.selected_index = index;
                Ok(())
            }
            None => Err(InvalidChoice {
                value: value.to_string(),
                options: STATE_OPTIONS.join(", "),
            }),
        }
    }

    pub fn handle_input(&mut self, key: Key) {
        match key {
            Key::Left => self.selected_index = self.selected_index.saturating_sub(1),
            Key::Right => {
                if self.selected_index + 1 < STATE_OPTIONS.len() {
                    self.selected_index += 1;
                }
            }
            _ => {}
        }
    }

    pub fn display(&self) -> String {
        STATE_OPTIONS
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let mark = if i == self.selected_index { '*' } else { ' ' };
                format!("({mark}) {option}")
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    /// Column of the selection mark within [`display`](Self::display)
    pub fn mark_column(&self) -> usize {
        STATE_OPTIONS[..self.selected_index]
            .iter()
            .map(|o| o.len() + 6)
            .sum::<usize>()
            + 1
    }
}

/// Signal produced by activating an [`ActionTrigger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitRequested;

/// The apply button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionTrigger;

impl ActionTrigger {
    pub fn activate(&self) -> SubmitRequested {
        SubmitRequested
    }
}

/// Editor attached to a field descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEditor {
    Text(TextField),
    Toggle(ToggleField),
    Choice(ChoiceField),
    Action(ActionTrigger),
}

impl FieldEditor {
    /// Build the editor for `kind`, mirroring `value`
    ///
    /// # Panics
    ///
    /// Panics when a state field carries something other than `up`/`down`.
    pub fn for_kind(kind: FieldKind, value: &FieldValue) -> Self {
        match kind {
            FieldKind::Text | FieldKind::Ipv4Address | FieldKind::BridgeName => {
                FieldEditor::Text(TextField::new(value.as_text().unwrap_or_default()))
            }
            FieldKind::Bool => FieldEditor::Toggle(ToggleField::new(value.as_bool())),
            FieldKind::StateBool => {
                let choice = ChoiceField::with_value(value.as_text().unwrap_or_default())
                    .unwrap_or_else(|e| panic!("state field: {e}"));
                FieldEditor::Choice(choice)
            }
            FieldKind::ApplyButton => FieldEditor::Action(ActionTrigger),
        }
    }

    /// The in-progress value in the descriptor's encoding
    pub fn value(&self) -> FieldValue {
        match self {
            FieldEditor::Text(t) => FieldValue::Text(t.value().to_string()),
            FieldEditor::Toggle(t) => FieldValue::Bool(t.value()),
            FieldEditor::Choice(c) => FieldValue::Text(c.value()),
            FieldEditor::Action(_) => FieldValue::Action,
        }
    }

    /// Route a key to the editor; keys it does not know are ignored
    pub fn handle_input(&mut self, key: Key) {
        match self {
            FieldEditor::Text(t) => t.handle_input(key),
            FieldEditor::Choice(c) => c.handle_input(key),
            FieldEditor::Toggle(_) | FieldEditor::Action(_) => {}
        }
    }

    /// Whether this editor runs an edit session (Enter/Escape cycle)
    pub fn has_session(&self) -> bool {
        matches!(self, FieldEditor::Text(_) | FieldEditor::Choice(_))
    }

    pub fn begin_edit(&mut self) {
        if let FieldEditor::Text(t) = self {
            t.begin_edit();
        }
    }

    pub fn display(&self) -> String {
        match self {
            FieldEditor::Text(t) => t.value().to_string(),
            FieldEditor::Toggle(t) => t.display().to_string(),
            FieldEditor::Choice(c) => c.display(),
            FieldEditor::Action(_) => String::new(),
        }
    }

    /// Cursor column while editing
    pub fn cursor(&self) -> Option<usize> {
        match self {
            FieldEditor::Text(t) => Some(t.cursor_pos()),
            FieldEditor::Choice(c) => Some(c.mark_column()),
            FieldEditor::Toggle(_) | FieldEditor::Action(_) => None,
        }
    }

    /// Emit the draw intents for this field
    pub fn show(
        &self,
        renderer: &mut dyn Renderer,
        position: usize,
        caption: &str,
        emphasis: Emphasis,
    ) {
        let (text, centered) = match self {
            FieldEditor::Action(_) => (caption.to_string(), true),
            _ => (self.display(), false),
        };

        renderer.draw_field(
            position,
            FieldView {
                caption,
                text: &text,
                centered,
            },
            emphasis,
        );

        if matches!(emphasis, Emphasis::Editing | Emphasis::Error) {
            if let Some(column) = self.cursor() {
                renderer.draw_cursor(position, column);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingRenderer;

    fn type_str(field: &mut TextField, s: &str) {
        for c in s.chars() {
            field.handle_input(Key::Char(c));
        }
    }

    #[test]
    fn test_text_insert_and_cursor() {
        let mut field = TextField::new("");
        type_str(&mut field, "br0");
        assert_eq!(field.value(), "br0");
        assert_eq!(field.cursor_pos(), 3);

        field.handle_input(Key::Left);
        field.handle_input(Key::Left);
        field.handle_input(Key::Char('x'));
        assert_eq!(field.value(), "bxr0");
        assert_eq!(field.cursor_pos(), 2);
    }

    #[test]
    fn test_text_cursor_clamps() {
        let mut field = TextField::new("ab");
        field.handle_input(Key::Left);
        assert_eq!(field.cursor_pos(), 0);

        field.begin_edit();
        field.handle_input(Key::Right);
        assert_eq!(field.cursor_pos(), 2);
    }

    #[test]
    fn test_text_backspace_and_delete() {
        let mut field = TextField::new("10.0.0.1");
        field.handle_input(Key::Backspace);
        assert_eq!(field.value(), "10.0.0.1");

        field.handle_input(Key::Delete);
        assert_eq!(field.value(), "0.0.0.1");
        assert_eq!(field.cursor_pos(), 0);

        field.begin_edit();
        field.handle_input(Key::Delete);
        assert_eq!(field.value(), "0.0.0.1");

        field.handle_input(Key::Backspace);
        assert_eq!(field.value(), "0.0.0.");
        assert_eq!(field.cursor_pos(), 6);
    }

    #[test]
    fn test_text_capacity() {
        let mut field = TextField::with_width("", 4);
        type_str(&mut field, "abcdef");
        assert_eq!(field.value(), "abcd");
        assert_eq!(field.cursor_pos(), 4);
    }

    #[test]
    fn test_text_ignores_other_keys() {
        let mut field = TextField::new("eth0");
        field.begin_edit();
        for key in [Key::Up, Key::Down, Key::Other, Key::Char('\n'), Key::Enter] {
            field.handle_input(key);
        }
        assert_eq!(field.value(), "eth0");
        assert_eq!(field.cursor_pos(), 4);
    }

    #[test]
    fn test_toggle() {
        let mut toggle = ToggleField::new(false);
        assert_eq!(toggle.display(), "[ ] OFF");
        toggle.toggle();
        assert!(toggle.value());
        assert_eq!(toggle.display(), "[X] ON");
    }

    #[test]
    fn test_choice_clamps() {
        let mut choice = ChoiceField::with_value("DOWN").unwrap();
        assert_eq!(choice.selected_index(), 1);

        choice.handle_input(Key::Right);
        assert_eq!(choice.value(), "down");

        choice.handle_input(Key::Left);
        choice.handle_input(Key::Left);
        assert_eq!(choice.value(), "up");
        assert_eq!(choice.display(), "(*) UP  ( ) DOWN");
        assert_eq!(choice.mark_column(), 1);
    }

    #[test]
    fn test_choice_mark_column() {
        let choice = ChoiceField::with_value("down").unwrap();
        assert_eq!(choice.display(), "( ) UP  (*) DOWN");
        assert_eq!(choice.display().find('*'), Some(choice.mark_column()));
    }

    #[test]
    fn test_choice_invalid() {
        let mut choice = ChoiceField::default();
        let err = choice.set_value("unknown").unwrap_err();
        assert_eq!(err.value, "unknown");
        assert_eq!(choice.value(), "up");
    }

    #[test]
    #[should_panic(expected = "invalid choice")]
    fn test_state_editor_rejects_bad_value() {
        FieldEditor::for_kind(FieldKind::StateBool, &FieldValue::Text("ignore".into()));
    }

    #[test]
    fn test_action_trigger() {
        assert_eq!(ActionTrigger.activate(), SubmitRequested);
        let editor = FieldEditor::for_kind(FieldKind::ApplyButton, &FieldValue::Action);
        assert_eq!(editor.value(), FieldValue::Action);
        assert!(!editor.has_session());
    }

    #[test]
    fn test_show_draws_cursor_only_while_editing() {
        let editor = FieldEditor::for_kind(FieldKind::BridgeName, &FieldValue::Text("br0".into()));
        let mut renderer = RecordingRenderer::default();

        editor.show(&mut renderer, 1, "bridge name", Emphasis::Selected);
        assert_eq!(renderer.cursor, None);

        editor.show(&mut renderer, 1, "bridge name", Emphasis::Editing);
        assert_eq!(renderer.cursor, Some((1, 0)));
        assert_eq!(renderer.fields[1].text, "br0");
    }

    #[test]
    fn test_show_apply_centered() {
        let editor = FieldEditor::for_kind(FieldKind::ApplyButton, &FieldValue::Action);
        let mut renderer = RecordingRenderer::default();

        editor.show(&mut renderer, 3, "apply", Emphasis::Normal);
        let drawn = renderer.field("apply").unwrap();
        assert!(drawn.centered);
        assert_eq!(drawn.text, "apply");
    }
}
