use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use dirnav_core::action::Action;
use dirnav_core::config::keymap::Keymap;
use dirnav_core::event::Command;
use ratatui::layout::Rect;

use crate::app::AppMode;

/// Rows moved per mouse wheel notch.
const WHEEL_STEP: isize = 3;

/// Actions that can result from a key press or mouse event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Dispatch a core Command.
    Command(Command),
    /// Enter a new AppMode.
    EnterMode(AppMode),
    /// Quit the application.
    Quit,
    /// No action for this input.
    None,
}

/// Tracks state for multi-press sequences: the armed double-tap key and the
/// last click (for double-click detection).
///
/// Transitions return a new value; the caller keeps the latest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    armed: Option<(char, Instant)>,
    last_click: Option<(usize, Instant)>,
    timeout: Duration,
}

impl InputState {
    pub fn new(timeout: Duration) -> Self {
        Self {
            armed: None,
            last_click: None,
            timeout,
        }
    }

    /// The armed double-tap key, if it has not expired at `now`.
    pub fn armed_key(&self, now: Instant) -> Option<char> {
        self.armed
            .filter(|(_, at)| now.duration_since(*at) <= self.timeout)
            .map(|(c, _)| c)
    }

    fn disarmed(self) -> Self {
        Self {
            armed: None,
            ..self
        }
    }

    fn armed_with(self, c: char, now: Instant) -> Self {
        Self {
            armed: Some((c, now)),
            ..self
        }
    }

    fn with_click(self, click: Option<(usize, Instant)>) -> Self {
        Self {
            last_click: click,
            ..self
        }
    }
}

/// Maps a key event to an InputAction based on the current mode.
/// Returns the action and a new InputState (immutable pattern).
///
/// In Normal mode, character keys and `Ctrl` combos are resolved through the
/// `Keymap`; arrow keys are hardcoded. Search, Prompt and Help modes are
/// hardcoded.
pub fn handle_key(
    key: KeyEvent,
    mode: AppMode,
    state: &InputState,
    keymap: &Keymap,
    now: Instant,
) -> (InputAction, InputState) {
    match mode {
        AppMode::Normal => handle_normal_key(key, state, keymap, now),
        AppMode::Search => (handle_search_key(key), state.disarmed()),
        AppMode::Prompt => (handle_prompt_key(key), state.disarmed()),
        AppMode::Help => (handle_help_key(key), state.disarmed()),
    }
}

/// Converts an `Action` enum variant to the corresponding `InputAction`.
fn action_to_input_action(action: Action) -> InputAction {
    match action {
        Action::CursorDown => InputAction::Command(Command::CursorDown),
        Action::CursorUp => InputAction::Command(Command::CursorUp),
        Action::CursorTop => InputAction::Command(Command::CursorTop),
        Action::CursorBottom => InputAction::Command(Command::CursorBottom),
        Action::GoParent => InputAction::Command(Command::GoUp),
        Action::Open => InputAction::Command(Command::Enter),
        Action::Refresh => InputAction::Command(Command::Refresh),
        Action::Search => InputAction::Command(Command::FocusSearch),
        Action::Copy => InputAction::Command(Command::MarkCopySource),
        Action::Paste => InputAction::Command(Command::Paste),
        Action::Delete => InputAction::Command(Command::DeleteSelected),
        Action::Rename => InputAction::Command(Command::BeginRename),
        Action::NewFile => InputAction::Command(Command::BeginCreateFile),
        Action::NewDir => InputAction::Command(Command::BeginCreateDir),
        Action::Help => InputAction::EnterMode(AppMode::Help),
        Action::Quit => InputAction::Quit,
    }
}

fn lookup(keymap: &Keymap, key_str: &str) -> InputAction {
    keymap
        .action_for_key(key_str)
        .map(action_to_input_action)
        .unwrap_or(InputAction::None)
}

fn handle_normal_key(
    key: KeyEvent,
    state: &InputState,
    keymap: &Keymap,
    now: Instant,
) -> (InputAction, InputState) {
    let disarmed = state.disarmed();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        let action = match key.code {
            KeyCode::Char(c) => lookup(keymap, &format!("Ctrl+{}", c.to_ascii_lowercase())),
            _ => InputAction::None,
        };
        return (action, disarmed);
    }

    // Hardcoded keys: arrows (not remappable)
    let action = match key.code {
        KeyCode::Down => InputAction::Command(Command::CursorDown),
        KeyCode::Up => InputAction::Command(Command::CursorUp),
        KeyCode::Left => InputAction::Command(Command::GoUp),
        KeyCode::Right => InputAction::Command(Command::Enter),
        KeyCode::Enter => lookup(keymap, "Enter"),
        KeyCode::Char(c) => {
            if state.armed_key(now) == Some(c) {
                lookup(keymap, &format!("{c}{c}"))
            } else if keymap.is_double_tap_prefix(c) {
                tracing::trace!(key = %c, "double-tap armed");
                return (InputAction::None, state.armed_with(c, now));
            } else {
                lookup(keymap, &c.to_string())
            }
        }
        _ => InputAction::None,
    };

    (action, disarmed)
}

/// While the search input has focus only text editing, commit and blur apply.
fn handle_search_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::Command(Command::BlurSearch),
        KeyCode::Enter => InputAction::Command(Command::CommitSearch),
        KeyCode::Backspace => InputAction::Command(Command::SearchBackspace),
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::None,
        KeyCode::Char(c) => InputAction::Command(Command::SearchInput(c)),
        _ => InputAction::None,
    }
}

/// The name prompt edits text until Enter commits or Esc cancels.
fn handle_prompt_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::Command(Command::CancelPrompt),
        KeyCode::Enter => InputAction::Command(Command::CommitPrompt),
        KeyCode::Backspace => InputAction::Command(Command::PromptBackspace),
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::None,
        KeyCode::Char(c) => InputAction::Command(Command::PromptInput(c)),
        _ => InputAction::None,
    }
}

fn handle_help_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            InputAction::EnterMode(AppMode::Normal)
        }
        _ => InputAction::None,
    }
}

/// Maps a mouse event over the entry list to a pointer command.
///
/// `list_area` is the inner area the entries are drawn in and `offset` the
/// index of the first visible entry. A second left click on the same row
/// within the double-tap timeout activates it.
pub fn handle_mouse(
    mouse: MouseEvent,
    state: &InputState,
    list_area: Rect,
    offset: usize,
    now: Instant,
) -> (InputAction, InputState) {
    let disarmed = state.disarmed();
    let inside = mouse.column >= list_area.x
        && mouse.column < list_area.x.saturating_add(list_area.width)
        && mouse.row >= list_area.y
        && mouse.row < list_area.y.saturating_add(list_area.height);
    if !inside {
        return (InputAction::None, disarmed);
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let index = offset + usize::from(mouse.row - list_area.y);
            let is_double = state
                .last_click
                .is_some_and(|(i, at)| i == index && now.duration_since(at) <= state.timeout);
            if is_double {
                (
                    InputAction::Command(Command::PointerActivate(index)),
                    disarmed.with_click(None),
                )
            } else {
                (
                    InputAction::Command(Command::PointerSelect(index)),
                    disarmed.with_click(Some((index, now))),
                )
            }
        }
        MouseEventKind::ScrollDown => (
            InputAction::Command(Command::PointerScroll(WHEEL_STEP)),
            disarmed,
        ),
        MouseEventKind::ScrollUp => (
            InputAction::Command(Command::PointerScroll(-WHEEL_STEP)),
            disarmed,
        ),
        _ => (InputAction::None, disarmed),
    }
}
