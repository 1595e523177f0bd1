//! Interfaces component - list of ethernet interfaces with a detail pane

use crate::action::Action;
use crate::components::Component;
use crate::ui_ext::InterfaceStateExt;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use nmpilot_core::SelectableList;
use nmstate_rs::InterfaceRecord;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

/// Interface list screen
#[derive(Default)]
pub struct InterfacesComponent {
    interfaces: SelectableList<InterfaceRecord>,
    list_state: ListState,
    /// Last refresh failure
    error: Option<String>,
    /// Result of the last submission
    notice: Option<String>,
}

impl InterfacesComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the interface list, keeping the selection on the same name
    pub fn set_interfaces(&mut self, interfaces: Vec<InterfaceRecord>) {
        let selected = self.selected().map(|i| i.name.clone());
        self.interfaces.update_items(interfaces);
        if let Some(name) = selected {
            self.interfaces.select_where(|i| i.name == name);
        }
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }

    pub fn set_notice(&mut self, notice: String) {
        self.notice = Some(notice);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn selected(&self) -> Option<&InterfaceRecord> {
        self.interfaces.selected()
    }

    /// Look up an interface by name
    pub fn find(&self, name: &str) -> Option<&InterfaceRecord> {
        self.interfaces.items().iter().find(|i| i.name == name)
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

impl Component for InterfacesComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Ok(Some(Action::Quit)),
            KeyCode::Char('r') => Ok(Some(Action::Reload)),
            KeyCode::Up | KeyCode::Char('k') => {
                self.interfaces.select_prev();
                Ok(None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.interfaces.select_next();
                Ok(None)
            }
            KeyCode::Enter => {
                self.notice = None;
                Ok(self
                    .selected()
                    .map(|iface| Action::OpenEditor(iface.name.clone())))
            }
            _ => Ok(None),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

        // Header
        let mut header_spans = vec![
            Span::raw(" nmpilot ").bold().fg(Color::Cyan),
            Span::raw(format!("{} interface(s)", self.interfaces.len())).dim(),
        ];
        if let Some(error) = &self.error {
            header_spans.push(Span::raw("  ✗ ").fg(Color::Red));
            header_spans.push(Span::raw(error.clone()).fg(Color::Red));
        } else if let Some(notice) = &self.notice {
            header_spans.push(Span::raw("  ● ").fg(Color::Green));
            header_spans.push(Span::raw(notice.clone()).fg(Color::White));
        }
        let header = Paragraph::new(Line::from(header_spans)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(header, layout[0]);

        let content_layout = Layout::horizontal([
            Constraint::Percentage(40), // Interface list
            Constraint::Percentage(60), // Details
        ])
        .split(layout[1]);

        self.draw_list(frame, content_layout[0]);
        self.draw_details(frame, content_layout[1]);

        // Footer
        let footer = Paragraph::new(Line::from(vec![
            Span::raw(" [q]").fg(Color::Yellow),
            Span::raw(" quit").dim(),
            Span::raw("  "),
            Span::raw("[r]").fg(Color::Yellow),
            Span::raw(" reload").dim(),
            Span::raw("  "),
            Span::raw("[↑↓]").fg(Color::Yellow),
            Span::raw(" interfaces").dim(),
            Span::raw("  "),
            Span::raw("[Enter]").fg(Color::Yellow),
            Span::raw(" edit").dim(),
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

impl InterfacesComponent {
    fn draw_list(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .interfaces
            .iter_with_selection()
            .map(|(i, iface, selected)| {
                let (symbol, color) = iface.state.symbol_and_color();
                let style = if selected {
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                ListItem::new(Line::from(vec![
                    Span::raw(format!(" {} ", symbol)).fg(color),
                    Span::raw(format!("{}. {}", i, iface.name)).style(style),
                ]))
            })
            .collect();

        let items = if items.is_empty() {
            vec![ListItem::new(Line::from(
                Span::raw("  No ethernet interfaces").dim(),
            ))]
        } else {
            items
        };

        self.list_state
            .select((!self.interfaces.is_empty()).then(|| self.interfaces.selected_index()));

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Interfaces ")
                    .title_style(Style::default().fg(Color::Cyan).bold())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(Style::default().bg(Color::DarkGray));

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_details(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Details ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(iface) = self.selected() else {
            let msg = Paragraph::new(Line::from(Span::raw("No interface selected").dim()));
            frame.render_widget(msg, inner);
            return;
        };

        let lines: Vec<Line> = detail_rows(iface)
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::raw(format!(" {:<12}", label)).dim(),
                    Span::raw(value).fg(Color::White),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Label/value rows of the detail pane
fn detail_rows(iface: &InterfaceRecord) -> Vec<(&'static str, String)> {
    let addresses = if iface.ipv4.address.is_empty() {
        "-".to_string()
    } else {
        iface
            .ipv4
            .address
            .iter()
            .map(|a| format!("{}/{}", a.ip, a.prefix_length))
            .collect::<Vec<_>>()
            .join(", ")
    };

    vec![
        ("name:", iface.name.clone()),
        ("type:", iface.iface_type.clone()),
        ("state:", iface.state.to_string()),
        (
            "mac:",
            iface.mac_address.clone().unwrap_or_else(|| "-".to_string()),
        ),
        (
            "mtu:",
            iface.mtu.map_or_else(|| "-".to_string(), |m| m.to_string()),
        ),
        ("ipv4 dhcp:", (iface.ipv4.enabled && iface.ipv4.dhcp).to_string()),
        ("ipv4:", addresses),
        (
            "controller:",
            if iface.controller.is_empty() {
                "-".to_string()
            } else {
                iface.controller.clone()
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use nmstate_rs::Ipv4Config;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn component() -> InterfacesComponent {
        let mut c = InterfacesComponent::new();
        c.set_interfaces(vec![
            InterfaceRecord::ethernet("eth0"),
            InterfaceRecord::ethernet("eth1"),
        ]);
        c
    }

    #[test]
    fn test_navigation_and_open() {
        let mut c = component();

        c.handle_key_event(key(KeyCode::Up)).unwrap();
        assert_eq!(c.selected().unwrap().name, "eth0");

        c.handle_key_event(key(KeyCode::Down)).unwrap();
        c.handle_key_event(key(KeyCode::Down)).unwrap();
        assert_eq!(c.selected().unwrap().name, "eth1");

        let action = c.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, Some(Action::OpenEditor("eth1".to_string())));
    }

    #[test]
    fn test_quit_and_reload() {
        let mut c = component();
        assert_eq!(
            c.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::Quit)
        );
        assert_eq!(
            c.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::Quit)
        );
        assert_eq!(
            c.handle_key_event(key(KeyCode::Char('r'))).unwrap(),
            Some(Action::Reload)
        );
    }

    #[test]
    fn test_empty_list_does_not_open() {
        let mut c = InterfacesComponent::new();
        assert_eq!(c.handle_key_event(key(KeyCode::Enter)).unwrap(), None);
    }

    #[test]
    fn test_reload_keeps_selection_by_name() {
        let mut c = component();
        c.handle_key_event(key(KeyCode::Down)).unwrap();

        c.set_interfaces(vec![
            InterfaceRecord::ethernet("eth-new"),
            InterfaceRecord::ethernet("eth0"),
            InterfaceRecord::ethernet("eth1"),
        ]);
        assert_eq!(c.selected().unwrap().name, "eth1");
    }

    #[test]
    fn test_error_cleared_on_refresh() {
        let mut c = component();
        c.set_error("nmstatectl not found".to_string());
        assert_eq!(c.error(), Some("nmstatectl not found"));

        c.set_interfaces(vec![InterfaceRecord::ethernet("eth0")]);
        assert_eq!(c.error(), None);
    }

    #[test]
    fn test_detail_rows() {
        let mut iface = InterfaceRecord::ethernet("eth0");
        iface.ipv4 = Ipv4Config::manual("10.0.0.2", 24);
        iface.mtu = Some(1500);

        let rows = detail_rows(&iface);
        let value = |label: &str| {
            rows.iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!(value("ipv4:"), "10.0.0.2/24");
        assert_eq!(value("mtu:"), "1500");
        assert_eq!(value("mac:"), "-");
        assert_eq!(value("controller:"), "-");
        assert_eq!(value("ipv4 dhcp:"), "false");
    }
}
