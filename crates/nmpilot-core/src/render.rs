//! Render capability
//!
//! The form emits draw intents through [`Renderer`]; the front end decides
//! what a field box, a cursor or a status line looks like.

/// How a field or message should stand out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    /// The field under the browsing cursor
    Selected,
    /// The field being edited
    Editing,
    /// Rejected input or a failed submission
    Error,
}

/// Content of one field row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldView<'a> {
    /// Field name shown on the box border
    pub caption: &'a str,
    /// Display encoding of the value
    pub text: &'a str,
    /// Center the text (action buttons)
    pub centered: bool,
}

/// Sink for draw intents; all calls are assumed to succeed
pub trait Renderer {
    fn clear(&mut self);

    /// Draw the field at `position` within the visible field list
    fn draw_field(&mut self, position: usize, view: FieldView<'_>, emphasis: Emphasis);

    /// Place the text cursor at `column` inside the field at `position`
    fn draw_cursor(&mut self, position: usize, column: usize);

    /// Draw the status line next to the form
    fn draw_status(&mut self, text: &str, emphasis: Emphasis);

    fn refresh(&mut self);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// A drawn field row
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) struct DrawnField {
        pub position: usize,
        pub caption: String,
        pub text: String,
        pub centered: bool,
        pub emphasis: Emphasis,
    }

    /// Renderer that records the last frame
    #[derive(Debug, Default)]
    pub(crate) struct RecordingRenderer {
        pub fields: Vec<DrawnField>,
        pub cursor: Option<(usize, usize)>,
        pub status: Option<(String, Emphasis)>,
        pub refreshes: usize,
    }

    impl RecordingRenderer {
        pub(crate) fn captions(&self) -> Vec<&str> {
            self.fields.iter().map(|f| f.caption.as_str()).collect()
        }

        pub(crate) fn field(&self, caption: &str) -> Option<&DrawnField> {
            self.fields.iter().find(|f| f.caption == caption)
        }
    }

    impl Renderer for RecordingRenderer {
        fn clear(&mut self) {
            self.fields.clear();
            self.cursor = None;
            self.status = None;
        }

        fn draw_field(&mut self, position: usize, view: FieldView<'_>, emphasis: Emphasis) {
            self.fields.push(DrawnField {
                position,
                caption: view.caption.to_string(),
                text: view.text.to_string(),
                centered: view.centered,
                emphasis,
            });
        }

        fn draw_cursor(&mut self, position: usize, column: usize) {
            self.cursor = Some((position, column));
        }

        fn draw_status(&mut self, text: &str, emphasis: Emphasis) {
            self.status = Some((text.to_string(), emphasis));
        }

        fn refresh(&mut self) {
            self.refreshes += 1;
        }
    }
}
