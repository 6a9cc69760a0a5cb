//! # Pager
//!
//! Full-screen, scrollable view over one [`Page`]: a long repr, a
//! docstring, highlighted source, an inspect report or the help text.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PagerState` lives in `TuiState` while the pager is open
//! - `Pager` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::Key;
use crate::core::overview::{Page, PageBody};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::highlight::highlight_code;
use crate::tui::markdown;

pub struct PagerState {
    title: String,
    content: Text<'static>,
    pub scroll_state: ScrollViewState,
}

/// Events emitted by the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerEvent {
    Close,
    /// Ctrl+C: leave the pager and the session.
    Quit,
}

impl PagerState {
    pub fn new(page: Page) -> Self {
        let content = match page.body {
            PageBody::Text(text) => Text::styled(text, Style::default().fg(Color::White)),
            PageBody::Markdown(doc) => markdown::render(&doc, Color::White),
            PageBody::Source { code, language } => Text::from(highlight_code(&code, &language)),
        };
        Self {
            title: page.title,
            content,
            scroll_state: ScrollViewState::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl EventHandler for PagerState {
    type Event = PagerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PagerEvent> {
        let TuiEvent::Key(key) = event else {
            return None;
        };
        match key {
            Key::Interrupt => return Some(PagerEvent::Quit),
            Key::Char('q' | 'f') | Key::Esc | Key::Backspace => return Some(PagerEvent::Close),
            Key::Char('j') | Key::Down | Key::Enter => self.scroll_state.scroll_down(),
            Key::Char('k') | Key::Up => self.scroll_state.scroll_up(),
            Key::Char(' ') | Key::PageDown => self.scroll_state.scroll_page_down(),
            Key::Char('b') | Key::PageUp => self.scroll_state.scroll_page_up(),
            Key::Char('g') => self.scroll_state.set_offset(Position::new(0, 0)),
            Key::Char('G') => self.scroll_state.scroll_to_bottom(),
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the pager.
pub struct Pager<'a> {
    state: &'a mut PagerState,
}

impl<'a> Pager<'a> {
    pub fn new(state: &'a mut PagerState) -> Self {
        Self { state }
    }
}

impl Component for Pager<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let underlined = Style::default().add_modifier(Modifier::UNDERLINED);
        let help = Line::from(vec![
            Span::styled("j/k", underlined),
            Span::raw(":scroll "),
            Span::styled("space", underlined),
            Span::raw(":page "),
            Span::styled("g/G", underlined),
            Span::raw(":top/bottom "),
            Span::styled("q", underlined),
            Span::raw(":close"),
        ])
        .style(Style::default().add_modifier(Modifier::DIM))
        .centered();
        let block = Block::bordered()
            .title(Span::styled(
                format!(" {} ", self.state.title()),
                Style::default().fg(Color::Cyan),
            ))
            .title_bottom(help)
            .border_style(Style::default().fg(Color::Blue));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // One column for the scrollbar.
        let content_width = inner.width.saturating_sub(1);
        let paragraph = Paragraph::new(self.state.content.clone()).wrap(Wrap { trim: false });
        let height = u16::try_from(paragraph.line_count(content_width)).unwrap_or(u16::MAX);

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::screen;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn long_page(lines: usize) -> Page {
        let text = (0..lines)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        Page {
            title: "root | repr".to_string(),
            body: PageBody::Text(text),
        }
    }

    fn key(k: Key) -> TuiEvent {
        TuiEvent::Key(k)
    }

    #[test]
    fn test_close_keys() {
        let mut state = PagerState::new(long_page(3));
        assert_eq!(state.handle_event(&key(Key::Char('q'))), Some(PagerEvent::Close));
        assert_eq!(state.handle_event(&key(Key::Esc)), Some(PagerEvent::Close));
        assert_eq!(state.handle_event(&key(Key::Interrupt)), Some(PagerEvent::Quit));
        assert_eq!(state.handle_event(&TuiEvent::Resize(10, 10)), None);
    }

    #[test]
    fn test_scrolls_after_render() {
        let mut state = PagerState::new(long_page(100));
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|f| Pager::new(&mut state).render(f, f.area()))
            .unwrap();
        assert!(screen(&terminal).contains("line 0"));

        assert_eq!(state.handle_event(&key(Key::Char('j'))), None);
        assert_eq!(state.handle_event(&key(Key::Down)), None);
        assert_eq!(state.scroll_state.offset().y, 2);

        state.handle_event(&key(Key::Char('g')));
        assert_eq!(state.scroll_state.offset().y, 0);
    }

    #[test]
    fn test_title_is_drawn() {
        let mut state = PagerState::new(long_page(1));
        assert_eq!(state.title(), "root | repr");
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal
            .draw(|f| Pager::new(&mut state).render(f, f.area()))
            .unwrap();
        assert!(screen(&terminal).contains("root | repr"));
    }
}
