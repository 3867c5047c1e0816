use ratatui::Frame;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::env;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::Instant;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::form::{
    DeleteRequest, Field, FormController, FormError, Outcome, expand_upload_path,
};
use crate::image::ImageProtocol;
use crate::logging::FlashMessage;
use crate::storage::{Config, ParticipantStore};
use crate::ui;
use crate::ui::{Notice, Theme};

/// Application mode determines which keybindings are active
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Typing into the form fields
    #[default]
    Edit,
    /// Image path prompt (activated with F6)
    Upload,
    /// Delete confirmation dialog
    Confirm,
    /// Help overlay (activated with F1)
    Help,
}

/// Form action bound to a function key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Register,
    Search,
    Update,
    Delete,
    Upload,
    Clear,
}

impl Action {
    /// Map a key press in Edit mode to an action
    /// Function keys are primary, Ctrl letters are aliases
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::F(2) => Some(Action::Register),
            KeyCode::F(3) => Some(Action::Search),
            KeyCode::F(4) => Some(Action::Update),
            KeyCode::F(5) => Some(Action::Delete),
            KeyCode::F(6) => Some(Action::Upload),
            KeyCode::F(7) => Some(Action::Clear),
            KeyCode::Char('r') if ctrl => Some(Action::Register),
            KeyCode::Char('f') if ctrl => Some(Action::Search),
            KeyCode::Char('u') if ctrl => Some(Action::Update),
            KeyCode::Char('d') if ctrl => Some(Action::Delete),
            KeyCode::Char('o') if ctrl => Some(Action::Upload),
            KeyCode::Char('l') if ctrl => Some(Action::Clear),
            _ => None,
        }
    }
}

/// Main application state
///
/// Generic over the store so the key handling can run against any engine.
pub struct App<S: ParticipantStore> {
    /// Current interaction mode
    pub mode: AppMode,

    /// Store plus edit buffer
    form: FormController<S>,

    /// Application configuration
    pub config: Config,

    theme: Theme,

    /// Field receiving typed text
    pub focused: Field,

    /// Editor mirroring the focused field (cursor position, scrolling)
    editor: Input,

    /// Path typed in Upload mode
    upload_input: Input,

    /// Delete waiting for y/n (Confirm mode)
    pending_delete: Option<DeleteRequest>,

    /// Modal message from the last action, any key dismisses it
    pub notice: Option<Notice>,

    /// Terminal image support; None renders placeholders only
    image_protocol: Option<ImageProtocol>,

    /// Flash messages displayed in the hints bar
    pub flash_messages: Vec<FlashMessage>,

    /// Receiver for flash messages from logger
    flash_rx: Option<Receiver<FlashMessage>>,

    /// Scroll offset for help modal (0 = top)
    help_scroll: usize,

    /// Maximum scroll value for help modal (updated each frame)
    help_max_scroll: usize,

    /// Whether the last frame had room for every field
    form_fits: bool,

    /// Flag to request application exit
    pub should_quit: bool,
}

impl<S: ParticipantStore> App<S> {
    pub fn new(
        form: FormController<S>,
        config: Config,
        image_protocol: Option<ImageProtocol>,
        flash_rx: Option<Receiver<FlashMessage>>,
    ) -> Self {
        let (theme, notice) = match Theme::load(&config.general.theme) {
            Ok(t) => (t, None),
            Err(e) => {
                log::error!("Failed to load theme '{}': {}", config.general.theme, e);
                (
                    Theme::default(),
                    Some(Notice::new(ui::Severity::Error, "Configuration Error", e.to_string())),
                )
            }
        };

        let mut app = App {
            mode: AppMode::default(),
            form,
            config,
            theme,
            focused: Field::default(),
            editor: Input::default(),
            upload_input: Input::default(),
            pending_delete: None,
            notice,
            image_protocol,
            flash_messages: Vec::new(),
            flash_rx,
            help_scroll: 0,
            help_max_scroll: 0,
            form_fits: true,
            should_quit: false,
        };
        app.sync_editor();
        app
    }

    pub fn form(&self) -> &FormController<S> {
        &self.form
    }

    #[cfg(test)]
    pub fn form_mut(&mut self) -> &mut FormController<S> {
        &mut self.form
    }

    /// Consume the app and hand back the form (and with it the store)
    pub fn into_form(self) -> FormController<S> {
        self.form
    }

    /// Poll flash message receiver and add to queue
    pub fn poll_flash_messages(&mut self) {
        if let Some(rx) = &self.flash_rx {
            while let Ok(msg) = rx.try_recv() {
                self.flash_messages.push(msg);
            }
        }
    }

    /// Remove expired flash messages (based on config duration)
    pub fn prune_flash_messages(&mut self) {
        if self.flash_messages.is_empty() {
            return;
        }

        let now = Instant::now();
        let duration_ms = self.config.general.flash_message_duration_ms;
        self.flash_messages
            .retain(|msg| now.duration_since(msg.timestamp).as_millis() < duration_ms as u128);
    }

    /// Reload the editor from the buffer after the buffer changed underneath it
    fn sync_editor(&mut self) {
        let value = self.form.buffer().get(self.focused).to_string();
        self.editor = Input::new(value);
    }

    /// Move keyboard focus to another field
    pub fn focus(&mut self, field: Field) {
        self.focused = field;
        self.sync_editor();
    }

    /// Run one form action and report its result
    pub fn perform(&mut self, action: Action) {
        log::debug!("Action {:?}", action);
        let result = match action {
            Action::Register => self.form.register(),
            Action::Search => self.form.search(),
            Action::Update => self.form.update(),
            Action::Delete => match self.form.request_delete() {
                Ok(request) if self.config.general.confirm_delete => {
                    self.pending_delete = Some(request);
                    self.mode = AppMode::Confirm;
                    return;
                }
                Ok(request) => self.form.confirm_delete(request),
                Err(e) => Err(e),
            },
            Action::Upload => {
                self.upload_input = Input::default();
                self.mode = AppMode::Upload;
                return;
            }
            Action::Clear => Ok(self.form.clear()),
        };
        self.report(result);
    }

    /// Show the result of an action and refresh everything derived from the buffer
    fn report(&mut self, result: Result<Outcome, FormError>) {
        self.sync_editor();
        if let Some(protocol) = self.image_protocol.as_mut() {
            protocol.invalidate();
        }

        match result {
            Ok(outcome) => {
                if matches!(outcome, Outcome::Registered(_) | Outcome::Deleted(_)) {
                    self.focus(Field::StudentName);
                }
                self.notice = Notice::from_outcome(&outcome);
            }
            Err(e) => {
                log::log!(e.log_level(), "{}: {}", e.title(), e);
                self.notice = Some(Notice::from_error(&e));
            }
        }
    }

    /// Request application exit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Handle keyboard event based on current mode
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Quit works from every mode, including over a notice
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if (ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')))
            || key.code == KeyCode::F(10)
        {
            self.quit();
            return;
        }

        // A notice modal swallows the next key
        if self.notice.is_some() {
            self.notice = None;
            return;
        }

        match self.mode {
            AppMode::Edit => self.handle_edit_key(key),
            AppMode::Upload => self.handle_upload_key(key),
            AppMode::Confirm => self.handle_confirm_key(key),
            AppMode::Help => self.handle_help_key(key),
        }
    }

    /// Handle keys while typing into the form
    fn handle_edit_key(&mut self, key: KeyEvent) {
        if let Some(action) = Action::from_key(&key) {
            self.perform(action);
            return;
        }

        match key.code {
            KeyCode::F(1) => {
                self.help_scroll = 0;
                self.mode = AppMode::Help;
            }
            KeyCode::Tab | KeyCode::Down => self.focus(self.focused.next()),
            KeyCode::BackTab | KeyCode::Up => self.focus(self.focused.prev()),
            KeyCode::Enter => {
                if self.focused == Field::RegistrationId {
                    self.perform(Action::Search);
                } else {
                    self.focus(self.focused.next());
                }
            }
            _ if !self.form_fits => {
                log::debug!("Ignoring edit key, form is not visible");
            }
            _ => {
                // Delegate editing keys (characters, backspace, arrows, ...) to tui-input
                let event = Event::Key(key);
                if self.editor.handle_event(&event).is_some() {
                    let value = self.editor.value().to_string();
                    self.form.buffer_mut().set(self.focused, value);
                }
            }
        }
    }

    /// Handle keys in the image path prompt
    fn handle_upload_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Edit;
            }
            KeyCode::Enter => {
                self.mode = AppMode::Edit;
                let typed = self.upload_input.value().trim().to_string();
                if typed.is_empty() {
                    return;
                }

                let home = env::var_os("HOME").map(PathBuf::from);
                let path = expand_upload_path(&typed, home.as_deref());
                let result = self.form.upload(&path);
                self.report(result);
            }
            _ => {
                let event = Event::Key(key);
                self.upload_input.handle_event(&event);
            }
        }
    }

    /// Handle keys in the delete confirmation dialog
    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.mode = AppMode::Edit;
                if let Some(request) = self.pending_delete.take() {
                    let result = self.form.confirm_delete(request);
                    self.report(result);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                log::debug!("Delete cancelled");
                self.pending_delete = None;
                self.mode = AppMode::Edit;
            }
            _ => {}
        }
    }

    /// Handle keys in help mode (scroll, anything else closes)
    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.help_scroll = (self.help_scroll + 1).min(self.help_max_scroll);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.help_scroll = self.help_scroll.saturating_sub(1);
            }
            _ => {
                self.mode = AppMode::Edit;
            }
        }
    }

    /// Render the TUI
    pub fn draw(&mut self, frame: &mut Frame) {
        let size = frame.area();

        frame.render_widget(
            ratatui::widgets::Block::default().style(
                ratatui::prelude::Style::default()
                    .bg(self.theme.default_bg)
                    .fg(self.theme.default_fg),
            ),
            size,
        );

        let layout = ui::create_main_layout(size);
        self.form_fits = ui::layout::form_fits(layout.form);

        ui::render_title(frame, layout.title, &self.theme);

        ui::render_form(
            frame,
            layout.form,
            ui::FormRenderContext {
                buffer: self.form.buffer(),
                focused: self.focused,
                editor: &self.editor,
                show_cursor: self.mode == AppMode::Edit && self.notice.is_none(),
                theme: &self.theme,
            },
        );

        ui::render_divider(frame, layout.divider, &self.theme);

        let buffer = self.form.buffer();
        ui::render_image_panel(
            frame,
            layout.image,
            buffer.preview(),
            self.image_protocol.as_mut(),
            buffer.pending_image().map(<[u8]>::len),
            &self.theme,
        );

        ui::render_keyboard_hints(
            frame,
            layout.hints,
            self.mode,
            &self.flash_messages,
            &self.theme,
        );

        match self.mode {
            AppMode::Edit => {}
            AppMode::Upload => {
                ui::render_path_prompt(frame, size, &self.upload_input, &self.theme);
            }
            AppMode::Confirm => {
                if let Some(request) = &self.pending_delete {
                    ui::render_confirm_overlay(frame, size, request.id(), &self.theme);
                }
            }
            AppMode::Help => {
                (self.help_scroll, self.help_max_scroll) =
                    ui::render_help_overlay(frame, size, &self.theme, self.help_scroll);
            }
        }

        // Notice takes precedence over other overlays
        if let Some(notice) = &self.notice {
            ui::render_notice(frame, size, notice, &self.theme);
        }
    }
}
