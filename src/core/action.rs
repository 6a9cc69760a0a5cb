//! # Key Dispatch
//!
//! Every key press becomes a [`Key`], and `handle_key()` routes it through
//! the session's modes in a fixed order of precedence:
//!
//! ```text
//! Interrupt
//!   → FilterInput (captures everything)
//!   → q / Q / r
//!   → Help overlay
//!   → ?
//!   → StackBrowsing
//!   → o / n / /
//!   → FilterBrowsing
//!   → c
//!   → Normal navigation + overview keys
//! ```
//!
//! The result is an [`Effect`] telling the event loop what to do next. No
//! terminal I/O happens here.

use log::debug;

use super::error::ExploreError;
use super::overview::Page;
use super::state::{HelpPane, Mode, Session};
use crate::object::ObjectRef;

/// Terminal-independent key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    /// Ctrl+C.
    Interrupt,
}

/// What the event loop should do after a key.
#[derive(Debug)]
pub enum Effect {
    Continue,
    /// End the session with nothing selected.
    Quit,
    /// End the session handing back the selected object.
    Return(ObjectRef),
    /// Open the full-screen pager.
    Page(Page),
    /// Open the help text in the pager.
    PageHelp(HelpPane),
}

pub fn handle_key(session: &mut Session, key: Key) -> Result<Effect, ExploreError> {
    debug!("key {:?} in {:?}", key, session.mode());

    if key == Key::Interrupt {
        return Ok(Effect::Quit);
    }

    if session.mode() == Mode::FilterInput {
        handle_search_input(session, key);
        return Ok(Effect::Continue);
    }

    match key {
        Key::Char('q' | 'Q') => return Ok(Effect::Quit),
        Key::Char('r') => return return_selected(session),
        _ => {}
    }

    if session.mode() == Mode::Help {
        match key {
            Key::Char('?') | Key::Esc | Key::Backspace => {
                session.close_help();
                return Ok(Effect::Continue);
            }
            Key::Char('f') => return Ok(Effect::PageHelp(session.help_pane)),
            Key::Char('[' | ']' | '{' | '}') => {
                session.help_pane = session.help_pane.toggle();
                return Ok(Effect::Continue);
            }
            // Close help, then handle the key as usual.
            Key::Char('j' | 'k' | 'o' | 'n') | Key::Up | Key::Down => session.close_help(),
            _ => return Ok(Effect::Continue),
        }
    }

    if key == Key::Char('?') {
        session.set_mode(Mode::Help);
        return Ok(Effect::Continue);
    }

    if session.mode() == Mode::StackBrowsing {
        match key {
            Key::Char('o') | Key::Esc | Key::Backspace => session.set_mode(Mode::Normal),
            Key::Char(' ') | Key::Enter => {
                session.explorer.explore_selected_stack_object();
            }
            Key::Char('j') | Key::Down => session.explorer.stack_mut().move_down(),
            Key::Char('k') | Key::Up => session.explorer.stack_mut().move_up(),
            Key::Char('g') => session.explorer.stack_mut().move_top(),
            Key::Char('G') => session.explorer.stack_mut().move_bottom(),
            Key::Char('n') => session.set_mode(Mode::FilterBrowsing),
            Key::Char('/') => start_search(session),
            Key::Char('c') => session.explorer.update_filter(|f| f.clear_filters()),
            // Everything else would move the explorer under the open stack.
            _ => {}
        }
        return Ok(Effect::Continue);
    }

    match key {
        Key::Char('o') => {
            session.explorer.stack_mut().begin_browsing();
            session.set_mode(Mode::StackBrowsing);
            return Ok(Effect::Continue);
        }
        Key::Char('n') => {
            let next = match session.mode() {
                Mode::FilterBrowsing => Mode::Normal,
                _ => Mode::FilterBrowsing,
            };
            session.set_mode(next);
            return Ok(Effect::Continue);
        }
        Key::Char('/') => {
            start_search(session);
            return Ok(Effect::Continue);
        }
        _ => {}
    }

    if session.mode() == Mode::FilterBrowsing {
        match key {
            Key::Char(' ') | Key::Enter => {
                session.explorer.toggle_selected_filter()?;
                return Ok(Effect::Continue);
            }
            Key::Esc | Key::Backspace => {
                session.set_mode(Mode::Normal);
                return Ok(Effect::Continue);
            }
            _ => {}
        }
    }

    if key == Key::Char('c') {
        session.explorer.update_filter(|f| f.clear_filters());
        return Ok(Effect::Continue);
    }

    handle_normal(session, key)
}

fn handle_search_input(session: &mut Session, key: Key) {
    match key {
        Key::Enter => {
            session.explorer.update_filter(|f| f.end_search());
            session.set_mode(Mode::FilterBrowsing);
        }
        Key::Esc => {
            session.explorer.update_filter(|f| f.cancel_search());
            session.set_mode(Mode::FilterBrowsing);
        }
        Key::Backspace => session.explorer.update_filter(|f| f.backspace()),
        Key::Left => session.explorer.update_filter(|f| f.cursor_left()),
        Key::Right => session.explorer.update_filter(|f| f.cursor_right()),
        Key::Char(c) => session.explorer.update_filter(|f| f.add_char(c)),
        _ => {}
    }
}

fn start_search(session: &mut Session) {
    session.set_mode(Mode::FilterInput);
    session.explorer.update_filter(|f| f.start_search());
}

fn return_selected(session: &Session) -> Result<Effect, ExploreError> {
    session
        .explorer
        .selected_object()
        .and_then(|node| node.object())
        .map(|obj| Effect::Return(ObjectRef::clone(obj)))
        .ok_or(ExploreError::NothingSelected)
}

fn handle_normal(session: &mut Session, key: Key) -> Result<Effect, ExploreError> {
    let Session {
        explorer, overview, ..
    } = session;
    match key {
        Key::Char('k') | Key::Up => explorer.move_up(),
        Key::Char('j') | Key::Down => explorer.move_down(),
        Key::Char('g') => explorer.move_top(),
        Key::Char('G') => explorer.move_bottom(),
        Key::Char('l') | Key::Enter | Key::Right => explorer.explore_selected_object()?,
        Key::Char('h') | Key::Left => {
            explorer.explore_parent_obj();
        }
        Key::Char('[' | ']') => explorer.toggle_visibility(),
        Key::Char('+') => explorer.increase_width(),
        Key::Char('-' | '_') => explorer.decrease_width(),
        Key::Char('=') => explorer.reset_width(),
        Key::Char('{' | '}') => overview.toggle_preview(explorer.selected_object()),
        Key::Char('d') => overview.toggle_docstring(),
        Key::Char('p') => overview.toggle_value(),
        Key::Char('f') => {
            let node = explorer
                .selected_object()
                .ok_or(ExploreError::NothingSelected)?;
            return Ok(Effect::Page(overview.page_for(node)));
        }
        Key::Char('i') => return Ok(Effect::Page(explorer.inspect_selected()?)),
        _ => {}
    }
    Ok(Effect::Continue)
}
