//! Application state and main loop

use crate::action::Action;
use crate::components::{Component, EditorComponent, InterfacesComponent};
use crate::tui::{self, Tui};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use nmpilot_core::{BridgeSet, format_provider_error};
use nmstate_rs::StateProvider;
use std::rc::Rc;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Interfaces,
    Editor,
}

/// Main application state
pub struct App {
    /// Whether the application should quit
    should_quit: bool,
    view: View,
    provider: Rc<dyn StateProvider>,
    interfaces: InterfacesComponent,
    /// Bridges as last read from the provider
    bridges: BridgeSet,
    /// Edit form (created when editing an interface)
    editor: Option<EditorComponent>,
}

impl App {
    pub fn new(provider: Rc<dyn StateProvider>) -> Self {
        Self {
            should_quit: false,
            view: View::Interfaces,
            provider,
            interfaces: InterfacesComponent::new(),
            bridges: BridgeSet::default(),
            editor: None,
        }
    }

    /// Run the application
    pub fn run(&mut self) -> Result<()> {
        tui::install_panic_hook();
        let mut terminal = tui::init()?;

        let result = self.main_loop(&mut terminal);

        tui::restore()?;
        result
    }

    /// Main event loop; every key is handled to completion before the next read
    fn main_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        self.reload();

        loop {
            terminal.draw(|frame| {
                let area = frame.area();
                let result = match (self.view, &mut self.editor) {
                    (View::Editor, Some(editor)) => editor.draw(frame, area),
                    _ => self.interfaces.draw(frame, area),
                };
                if let Err(e) = result {
                    tracing::error!("Draw error: {}", e);
                }
            })?;

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = match (self.view, &mut self.editor) {
                        (View::Editor, Some(editor)) => editor.handle_key_event(key)?,
                        _ => self.interfaces.handle_key_event(key)?,
                    };
                    if let Some(action) = action {
                        self.handle_action(action);
                    }
                }
                Event::Resize(w, h) => self.handle_action(Action::Resize(w, h)),
                _ => {}
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle an action
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Back => {
                self.editor = None;
                self.view = View::Interfaces;
            }
            Action::OpenEditor(name) => match self.interfaces.find(&name) {
                Some(record) => {
                    self.editor = Some(EditorComponent::new(
                        record,
                        self.bridges.clone(),
                        Rc::clone(&self.provider),
                    ));
                    self.view = View::Editor;
                }
                None => tracing::warn!("Interface {} disappeared", name),
            },
            Action::Reload => self.reload(),
            Action::Submitted(iface, status) => {
                self.editor = None;
                self.view = View::Interfaces;
                self.reload();
                self.interfaces.set_notice(format!("{}: {}", iface, status));
            }
            Action::Resize(_w, _h) => {
                // Terminal will automatically resize on next draw
            }
        }
    }

    /// Re-read interfaces and bridges from the provider
    fn reload(&mut self) {
        tracing::info!("Reloading network state");

        let state = match self.provider.snapshot() {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("Failed to read network state: {}", e);
                self.interfaces.set_error(format_provider_error(&e));
                return;
            }
        };

        let ethernet = state.interfaces.into_iter().filter(|i| i.is_ethernet()).collect();
        self.interfaces.set_interfaces(ethernet);
        self.bridges = BridgeSet::new(state.bridges);
    }
}
