//! # Stack View
//!
//! The navigation history as a tree, root first, current node last:
//!
//! ```text
//! root
//! └── b
//!     └── q          ← current
//! ```
//!
//! While it is open the stack cursor is highlighted; `space` jumps there.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState};

use super::truncate_str;
use crate::core::explorer::Explorer;
use crate::tui::component::Component;

pub struct StackView<'a> {
    explorer: &'a Explorer,
    list_state: &'a mut ListState,
}

impl<'a> StackView<'a> {
    pub fn new(explorer: &'a Explorer, list_state: &'a mut ListState) -> Self {
        Self {
            explorer,
            list_state,
        }
    }

    /// Rows needed to show every entry plus borders.
    pub fn height(explorer: &Explorer) -> u16 {
        u16::try_from(explorer.stack().depth() + 3).unwrap_or(u16::MAX)
    }
}

impl Component for StackView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let tree = self.explorer.tree();
        let stack = self.explorer.stack();
        let width = usize::from(area.width.saturating_sub(2));

        let nodes = stack
            .frames()
            .iter()
            .map(|frame| frame.node)
            .chain(std::iter::once(self.explorer.current()));
        let items: Vec<ListItem> = nodes
            .enumerate()
            .map(|(depth, id)| {
                let prefix = match depth {
                    0 => String::new(),
                    d => format!("{}└── ", "    ".repeat(d - 1)),
                };
                let name = truncate_str(
                    &tree.get(id).name,
                    width.saturating_sub(prefix.chars().count()),
                );
                ListItem::new(Line::from(vec![
                    Span::styled(prefix, Style::default().fg(Color::DarkGray)),
                    Span::styled(name, Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect();

        let subtitle = if area.width > 16 {
            Line::from(vec![
                Span::styled("space", Style::default().add_modifier(Modifier::UNDERLINED)),
                Span::raw(":select"),
            ])
            .right_aligned()
        } else {
            Line::default()
        };
        let block = Block::bordered()
            .title(Line::from("[stack]").right_aligned())
            .title_bottom(subtitle)
            .border_style(Style::default().fg(Color::LightBlue));

        self.list_state.select(Some(stack.cursor()));
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, self.list_state);
    }
}
