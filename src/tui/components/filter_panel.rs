//! # Filter Panel
//!
//! One-line search box under the explorer pane, shown while filter
//! browsing or search input is open. Places the terminal cursor while
//! input is being received.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::filter::Filter;
use crate::tui::component::Component;

pub const FILTER_PANEL_HEIGHT: u16 = 3;

pub struct FilterPanel<'a> {
    filter: &'a Filter,
    hidden: usize,
}

impl<'a> FilterPanel<'a> {
    /// `hidden` is how many entries of the active view are filtered out.
    pub fn new(filter: &'a Filter, hidden: usize) -> Self {
        Self { filter, hidden }
    }
}

impl Component for FilterPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hint = |key: &'static str, what: &'static str| {
            [
                Span::styled(key, Style::default().add_modifier(Modifier::UNDERLINED)),
                Span::raw(what),
            ]
        };
        let mut bottom: Vec<Span> = Vec::new();
        if self.filter.receiving_input {
            bottom.extend(hint("enter", ":done "));
            bottom.extend(hint("esc", ":cancel"));
        } else {
            bottom.extend(hint("/", ":search "));
            bottom.extend(hint("space", ":toggle "));
            bottom.extend(hint("c", ":clear"));
        }

        let title = if self.hidden > 0 {
            format!("filter ({} hidden)", self.hidden)
        } else {
            "filter".to_string()
        };
        let block = Block::bordered()
            .title(Line::from(title).right_aligned())
            .title_bottom(
                Line::from(bottom)
                    .style(Style::default().add_modifier(Modifier::DIM))
                    .right_aligned(),
            )
            .border_style(Style::default().fg(Color::Cyan));

        let search_style = if self.filter.receiving_input {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC)
        };
        let line = Line::from(vec![
            Span::styled("/", Style::default().fg(Color::DarkGray)),
            Span::styled(self.filter.search_text().to_string(), search_style),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);

        if self.filter.receiving_input {
            let offset = u16::try_from(self.filter.cursor() + 1).unwrap_or(u16::MAX);
            let x = area
                .x
                .saturating_add(1)
                .saturating_add(offset)
                .min(area.right().saturating_sub(2));
            frame.set_cursor_position(Position::new(x, area.y + 1));
        }
    }
}
