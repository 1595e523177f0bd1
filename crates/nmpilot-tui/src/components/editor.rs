//! Editor component - the edit form for one interface

use crate::action::Action;
use crate::audit;
use crate::components::Component;
use crate::frame_renderer::{FIELD_HEIGHT, FrameRenderer};
use crate::input::to_key;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use nmpilot_core::{BridgeSet, FormSession, SessionEvent, constants::fields, open_form};
use nmstate_rs::{InterfaceRecord, StateProvider};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::rc::Rc;

/// Width of the form column
const FORM_WIDTH: u16 = 24;

/// Interface edit screen
pub struct EditorComponent {
    session: FormSession,
    provider: Rc<dyn StateProvider>,
}

impl EditorComponent {
    pub fn new(record: &InterfaceRecord, bridges: BridgeSet, provider: Rc<dyn StateProvider>) -> Self {
        tracing::info!("Editing {}", record.name);
        Self {
            session: open_form(record, bridges),
            provider,
        }
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn interface_name(&self) -> &str {
        &self.session.record().name
    }
}

impl Component for EditorComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.session.is_browsing() && key.code == KeyCode::Char('q') {
            return Ok(Some(Action::Quit));
        }

        let event = self.session.handle_key(to_key(&key), self.provider.as_ref());

        if let Some(outcome) = self.session.take_outcome() {
            audit::audit_outcome(self.interface_name(), &outcome);
        }

        Ok(match event {
            SessionEvent::None => None,
            SessionEvent::Cancelled => Some(Action::Back),
            SessionEvent::ReloadRequested => {
                let status = self
                    .session
                    .status()
                    .map(|s| s.text())
                    .unwrap_or_default();
                Some(Action::Submitted(self.interface_name().to_string(), status))
            }
        })
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer
        ])
        .split(area);

        // Header
        let record = self.session.record();
        let header = Paragraph::new(Line::from(vec![
            Span::raw(" nmpilot ").bold().fg(Color::Cyan),
            Span::raw(format!("name: {}, type: {}", record.name, record.iface_type)).fg(Color::White),
        ]))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(header, layout[0]);

        let form_height = FIELD_HEIGHT * fields::ALL.len() as u16;
        let content = Layout::horizontal([
            Constraint::Length(FORM_WIDTH),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(layout[1]);
        let form_area = Layout::vertical([Constraint::Length(form_height), Constraint::Min(0)])
            .split(content[0])[0];
        let status_area = Layout::vertical([Constraint::Length(FIELD_HEIGHT), Constraint::Min(0)])
            .split(content[2])[0];

        let mut renderer = FrameRenderer::new(frame, form_area, status_area);
        self.session.render(&mut renderer);

        // Footer
        let footer = Paragraph::new(Line::from(vec![
            Span::raw(" ESC").fg(Color::Yellow),
            Span::raw(" - cancel, ").dim(),
            Span::raw("arrows").fg(Color::Yellow),
            Span::raw(" - navigation, ").dim(),
            Span::raw("Enter").fg(Color::Yellow),
            Span::raw(" - edit/save, ").dim(),
            Span::raw("q").fg(Color::Yellow),
            Span::raw(" - exit").dim(),
        ]))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(footer, layout[2]);

        Ok(())
    }
}
