//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates crossterm events into core `Key` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Single-threaded and blocking: wait for one event, dispatch it, redraw.
//!
//! - **Keys** go to the pager when one is open, otherwise to `handle_key()`.
//! - **Resize** updates the explorer's idea of the terminal width and
//!   redraws straight away.
//! - **Recoverable errors** turn the outer border red for
//!   `error_flash`, then the loop carries on.
//! - **Terminal errors** end the session and are returned to the caller.
//!
//! Every draw goes through [`Renderer`], which drops a redraw requested
//! while another one is still in flight instead of queueing it.

mod component;
mod components;
mod event;
mod highlight;
pub mod markdown;
mod ui;

use std::cell::Cell;
use std::io::{self, stdout};
use std::thread;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use log::{debug, info, warn};
use ratatui::DefaultTerminal;
use ratatui::widgets::ListState;

use crate::core::config::ResolvedConfig;
use crate::core::error::ExploreError;
use crate::core::{Effect, Session, handle_key};
use crate::object::ObjectRef;
use crate::tui::component::EventHandler;
use crate::tui::components::{PagerEvent, PagerState, help_page};
use crate::tui::event::{TuiEvent, read_event};

/// TUI-specific presentation state (not part of core exploration logic)
#[derive(Default)]
pub struct TuiState {
    pub explorer_list: ListState,
    pub stack_list: ListState,
    /// Full-screen pager (None = hidden)
    pub pager: Option<PagerState>,
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What the loop does after one event.
#[derive(Debug)]
enum Flow {
    Continue,
    Exit(Option<ObjectRef>),
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), Hide)?;
        info!("Terminal modes enabled (hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// Draw entry point with a reentrancy guard.
///
/// Resize events arrive through the main loop today, so only a redraw
/// triggered out of band (from inside a draw) ever hits the guard. Such a
/// redraw is dropped for that cycle, never queued.
#[derive(Default)]
struct Renderer {
    drawing: Cell<bool>,
}

/// Clears the in-progress flag when a draw ends, however it ends.
struct DrawPass<'a>(&'a Cell<bool>);

impl Drop for DrawPass<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Renderer {
    /// Run `draw` unless a draw is already in progress. Returns whether it ran.
    fn guarded<E>(&self, draw: impl FnOnce() -> Result<(), E>) -> Result<bool, E> {
        if self.drawing.replace(true) {
            debug!("redraw requested during a draw, skipped");
            return Ok(false);
        }
        let _pass = DrawPass(&self.drawing);
        draw()?;
        Ok(true)
    }

    fn draw(
        &self,
        terminal: &mut DefaultTerminal,
        session: &mut Session,
        tui: &mut TuiState,
    ) -> io::Result<bool> {
        self.guarded(|| {
            let size = terminal.size()?;
            session.explorer.set_terminal_width(size.width);
            terminal.draw(|f| ui::draw(f, session, tui))?;
            Ok(())
        })
    }
}

/// Explore `session` until the user quits or returns an object.
pub fn run(mut session: Session, config: &ResolvedConfig) -> Result<Option<ObjectRef>, ExploreError> {
    info!(
        "Exploring `{}` ({})",
        session.explorer.current_node().dotpath,
        session.explorer.current_node().type_name
    );
    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new()
        .map_err(ExploreError::from)
        .and_then(|_guard| event_loop(&mut terminal, &mut session, config));
    ratatui::restore();

    match &result {
        Ok(Some(obj)) => info!("Session ended, returning a {}", obj.type_name()),
        Ok(None) => info!("Session ended without a selection"),
        Err(e) => warn!("Session ended with an error: {e}"),
    }
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    session: &mut Session,
    config: &ResolvedConfig,
) -> Result<Option<ObjectRef>, ExploreError> {
    let renderer = Renderer::default();
    let mut tui = TuiState::new();
    renderer.draw(terminal, session, &mut tui)?;

    loop {
        let event = read_event()?;
        match dispatch(session, &mut tui, event) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit(selected)) => return Ok(selected),
            Err(e) if e.is_recoverable() => {
                session.raise_alert(&e);
                renderer.draw(terminal, session, &mut tui)?;
                thread::sleep(config.error_flash);
                session.clear_alert();
            }
            Err(e) => return Err(e),
        }
        renderer.draw(terminal, session, &mut tui)?;
    }
}

/// Route one event to the pager or the core. No terminal I/O.
fn dispatch(session: &mut Session, tui: &mut TuiState, event: TuiEvent) -> Result<Flow, ExploreError> {
    if let TuiEvent::Resize(width, height) = event {
        debug!("resized to {width}x{height}");
        session.explorer.set_terminal_width(width);
        return Ok(Flow::Continue);
    }

    if let Some(pager) = tui.pager.as_mut() {
        match pager.handle_event(&event) {
            Some(PagerEvent::Close) => tui.pager = None,
            Some(PagerEvent::Quit) => return Ok(Flow::Exit(None)),
            None => {}
        }
        return Ok(Flow::Continue);
    }

    let TuiEvent::Key(key) = event else {
        return Ok(Flow::Continue);
    };
    let flow = match handle_key(session, key)? {
        Effect::Continue => Flow::Continue,
        Effect::Quit => Flow::Exit(None),
        Effect::Return(obj) => Flow::Exit(Some(obj)),
        Effect::Page(page) => {
            debug!("opening pager: {}", page.title);
            tui.pager = Some(PagerState::new(page));
            Flow::Continue
        }
        Effect::PageHelp(pane) => {
            tui.pager = Some(PagerState::new(help_page(pane)));
            Flow::Continue
        }
    };
    Ok(flow)
}
