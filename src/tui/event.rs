use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::Key;

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    /// A key press, already translated for the core.
    Key(Key),
    /// The terminal changed size (columns, rows).
    Resize(u16, u16),
}

/// Block until the next event the explorer cares about.
pub fn read_event() -> io::Result<TuiEvent> {
    loop {
        if let Some(event) = translate(event::read()?) {
            return Ok(event);
        }
    }
}

fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => map_key(key_event).map(TuiEvent::Key),
        Event::Resize(cols, rows) => Some(TuiEvent::Resize(cols, rows)),
        _ => None,
    }
}

/// Translate a crossterm key event. Releases and repeats are dropped.
pub fn map_key(key_event: KeyEvent) -> Option<Key> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Key::Interrupt),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => Some(Key::Char(c)),
        (_, KeyCode::Char(_)) => None,
        (_, KeyCode::Enter) => Some(Key::Enter),
        (_, KeyCode::Esc) => Some(Key::Esc),
        (_, KeyCode::Backspace) => Some(Key::Backspace),
        (_, KeyCode::Up) => Some(Key::Up),
        (_, KeyCode::Down) => Some(Key::Down),
        (_, KeyCode::Left) => Some(Key::Left),
        (_, KeyCode::Right) => Some(Key::Right),
        (_, KeyCode::PageUp) => Some(Key::PageUp),
        (_, KeyCode::PageDown) => Some(Key::PageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_ctrl_c_is_interrupt() {
        let key = map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(key, Some(Key::Interrupt));
        // Plain `c` clears filters instead.
        let key = map_key(press(KeyCode::Char('c'), KeyModifiers::NONE));
        assert_eq!(key, Some(Key::Char('c')));
    }

    #[test]
    fn test_shifted_chars_pass_through() {
        let key = map_key(press(KeyCode::Char('G'), KeyModifiers::SHIFT));
        assert_eq!(key, Some(Key::Char('G')));
    }

    #[test]
    fn test_ctrl_and_alt_letters_are_dropped() {
        assert_eq!(map_key(press(KeyCode::Char('d'), KeyModifiers::CONTROL)), None);
        assert_eq!(map_key(press(KeyCode::Char('q'), KeyModifiers::ALT)), None);
        assert_eq!(
            map_key(press(KeyCode::Char('d'), KeyModifiers::NONE)),
            Some(Key::Char('d'))
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut release = press(KeyCode::Char('j'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn test_unmapped_keys_are_dropped() {
        assert_eq!(map_key(press(KeyCode::F(5), KeyModifiers::NONE)), None);
        assert_eq!(map_key(press(KeyCode::Tab, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_resize_is_forwarded() {
        assert_eq!(translate(Event::Resize(100, 40)), Some(TuiEvent::Resize(100, 40)));
        assert_eq!(translate(Event::FocusGained), None);
    }
}
