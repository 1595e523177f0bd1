//! Renderer capability over a ratatui frame
//!
//! Each field is a bordered box three rows high, stacked from the top of
//! the form area.

use nmpilot_core::{Emphasis, FieldView, Renderer};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::ui_ext::EmphasisExt;

/// Rows taken by one field box
pub const FIELD_HEIGHT: u16 = 3;

/// Draws form intents into a frame
pub struct FrameRenderer<'a, 'f> {
    frame: &'a mut Frame<'f>,
    form_area: Rect,
    status_area: Rect,
}

impl<'a, 'f> FrameRenderer<'a, 'f> {
    pub fn new(frame: &'a mut Frame<'f>, form_area: Rect, status_area: Rect) -> Self {
        Self {
            frame,
            form_area,
            status_area,
        }
    }

    /// Area of the field box at `position`, if it fits
    fn field_area(&self, position: usize) -> Option<Rect> {
        field_rect(self.form_area, position)
    }
}

/// Area of the field box at `position` inside `form_area`
pub fn field_rect(form_area: Rect, position: usize) -> Option<Rect> {
    let offset = u16::try_from(position).ok()?.checked_mul(FIELD_HEIGHT)?;
    if offset + FIELD_HEIGHT > form_area.height {
        return None;
    }
    Some(Rect::new(
        form_area.x,
        form_area.y + offset,
        form_area.width,
        FIELD_HEIGHT,
    ))
}

impl Renderer for FrameRenderer<'_, '_> {
    fn clear(&mut self) {
        self.frame.render_widget(Clear, self.form_area);
        self.frame.render_widget(Clear, self.status_area);
    }

    fn draw_field(&mut self, position: usize, view: FieldView<'_>, emphasis: Emphasis) {
        let Some(area) = self.field_area(position) else {
            return;
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(emphasis.color()));
        if !view.centered {
            block = block.title(Span::raw(format!(" {} ", view.caption)).fg(emphasis.color()));
        }

        let alignment = if view.centered {
            Alignment::Center
        } else {
            Alignment::Left
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            view.text.to_string(),
            emphasis.style(),
        )))
        .alignment(alignment)
        .block(block);

        self.frame.render_widget(paragraph, area);
    }

    fn draw_cursor(&mut self, position: usize, column: usize) {
        let Some(area) = self.field_area(position) else {
            return;
        };
        let column = u16::try_from(column).unwrap_or(u16::MAX);
        let x = (area.x + 1).saturating_add(column).min(area.right().saturating_sub(2));
        self.frame.set_cursor_position((x, area.y + 1));
    }

    fn draw_status(&mut self, text: &str, emphasis: Emphasis) {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            text.to_string(),
            emphasis.style(),
        )))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" result ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(emphasis.color())),
        );
        self.frame.render_widget(paragraph, self.status_area);
    }

    fn refresh(&mut self) {
        // ratatui flushes the buffer when the draw closure returns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_rect_stacks() {
        let area = Rect::new(2, 4, 30, 12);

        assert_eq!(field_rect(area, 0), Some(Rect::new(2, 4, 30, 3)));
        assert_eq!(field_rect(area, 3), Some(Rect::new(2, 13, 30, 3)));
        assert_eq!(field_rect(area, 4), None);
    }
}
