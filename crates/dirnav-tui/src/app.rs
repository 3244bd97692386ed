use std::path::{Path, PathBuf};
use std::time::Instant;

use crossterm::event::{KeyEvent, MouseEvent};
use dirnav_core::action::ActionRegistry;
use dirnav_core::browser::Browser;
use dirnav_core::config::keymap::Keymap;
use dirnav_core::config::settings::Config;
use dirnav_core::event::Event;
use dirnav_core::service::{Dispatcher, Outcome};
use dirnav_core::CoreError;
use ratatui::layout::Rect;

use crate::input::{handle_key, handle_mouse, InputAction, InputState};

/// Application mode — determines how input is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// The search input has focus.
    Search,
    /// The rename/create name prompt is open.
    Prompt,
    Help,
}

/// The last notification shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// Returns the config directory: `./config` if present, else `~/.config/dirnav`.
fn config_dir() -> PathBuf {
    let local = PathBuf::from("config");
    if local.exists() {
        return local;
    }
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("dirnav")
}

/// Loads `config.toml` and `keymap.toml`, falling back to defaults.
///
/// A missing file is normal; a malformed one is logged and ignored.
pub fn load_settings() -> (Config, Keymap) {
    let dir = config_dir();
    let config = match Config::load(&dir.join("config.toml")) {
        Ok(config) => config,
        Err(CoreError::NotFound(_)) => Config::default(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring config.toml");
            Config::default()
        }
    };
    let keymap = match Keymap::load(&dir.join("keymap.toml")) {
        Ok(keymap) => keymap,
        Err(CoreError::NotFound(_)) => Keymap::default(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring keymap.toml");
            Keymap::default()
        }
    };
    (config, keymap)
}

/// Top-level application state.
///
/// Glues the core [`Browser`] to the terminal: routes input through the key
/// router, hands the browser's requests to the [`Dispatcher`] and turns its
/// events into the status line.
pub struct App {
    browser: Browser,
    dispatcher: Dispatcher,
    keymap: Keymap,
    registry: ActionRegistry,
    input: InputState,
    help_open: bool,
    status: Option<StatusLine>,
    should_quit: bool,
    show_permission_marker: bool,
    /// Inner area of the entry list, as laid out for the current frame.
    list_area: Rect,
}

impl App {
    /// Creates a new App rooted at the given directory. Nothing is listed until [`App::start`].
    pub fn new(
        start_dir: &Path,
        config: &Config,
        keymap: Keymap,
        dispatcher: Dispatcher,
    ) -> anyhow::Result<Self> {
        let browser = Browser::new(start_dir, config.list_options())?;
        Ok(Self {
            browser,
            dispatcher,
            keymap,
            registry: ActionRegistry::new(),
            input: InputState::new(config.double_tap_timeout()),
            help_open: false,
            status: None,
            should_quit: false,
            show_permission_marker: config.ui.show_permission_marker,
            list_area: Rect::default(),
        })
    }

    /// Issues the initial listing.
    pub fn start(&mut self) {
        let requests = self.browser.start();
        self.dispatcher.dispatch_all(requests);
    }

    pub fn mode(&self) -> AppMode {
        if self.help_open {
            AppMode::Help
        } else if self.browser.prompt().is_some() {
            AppMode::Prompt
        } else if self.browser.search().is_active() {
            AppMode::Search
        } else {
            AppMode::Normal
        }
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn action_registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn show_permission_marker(&self) -> bool {
        self.show_permission_marker
    }

    /// Records where the entry list is drawn; its height drives scroll sync.
    pub fn set_list_area(&mut self, area: Rect) {
        self.list_area = area;
        self.browser.set_viewport_height(usize::from(area.height));
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let (action, next) = handle_key(key, self.mode(), &self.input, &self.keymap, now);
        self.input = next;
        self.apply(action);
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if matches!(self.mode(), AppMode::Help | AppMode::Prompt) {
            return;
        }
        let offset = self.browser.scroll().offset();
        let (action, next) = handle_mouse(mouse, &self.input, self.list_area, offset, now);
        self.input = next;
        self.apply(action);
    }

    /// Feeds a completed service call back into the browser.
    pub fn handle_outcome(&mut self, outcome: Outcome) {
        let requests = self.browser.handle_outcome(outcome);
        self.dispatcher.dispatch_all(requests);
        self.drain_events();
    }

    fn apply(&mut self, action: InputAction) {
        match action {
            InputAction::Command(cmd) => {
                let requests = self.browser.handle_command(cmd);
                self.dispatcher.dispatch_all(requests);
                self.drain_events();
            }
            InputAction::EnterMode(AppMode::Help) => self.help_open = true,
            InputAction::EnterMode(_) => self.help_open = false,
            InputAction::Quit => self.should_quit = true,
            InputAction::None => {}
        }
    }

    fn drain_events(&mut self) {
        for event in self.browser.take_events() {
            self.status = Some(status_for(&event));
        }
    }
}

fn status_for(event: &Event) -> StatusLine {
    StatusLine {
        text: event.message(),
        is_error: event.is_error(),
    }
}
