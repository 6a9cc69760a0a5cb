//! # Explorer Pane
//!
//! The left-hand list of the current node's public attributes, private
//! attributes or items. Names are colored by what they point at:
//!
//! ```text
//! module   blue          Type     magenta
//! method() cyan italic   {**map}  sea green
//! [*seq]   light red     broken   red, dim
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};

use super::truncate_str;
use crate::core::cached::CachedObject;
use crate::core::explorer::{Explorer, View};
use crate::object::ObjectKind;
use crate::tui::component::Component;

const MAPPING_COLOR: Color = Color::Rgb(32, 178, 170);

/// Transient render wrapper; the `ListState` persists in `TuiState`.
pub struct ExplorerPane<'a> {
    explorer: &'a Explorer,
    list_state: &'a mut ListState,
    /// Whether the selection highlight is drawn (off while the stack is open).
    focused: bool,
}

impl<'a> ExplorerPane<'a> {
    pub fn new(explorer: &'a Explorer, list_state: &'a mut ListState, focused: bool) -> Self {
        Self {
            explorer,
            list_state,
            focused,
        }
    }

    fn title(&self) -> Line<'static> {
        let active = self.explorer.view();
        let views: &[View] = if self.explorer.current_node().is_container() {
            &[View::Items, View::Public, View::Private]
        } else {
            &[View::Public, View::Private]
        };
        let mut spans = Vec::new();
        for view in views {
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            let style = if *view == active {
                Style::default().add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            spans.push(Span::styled(view.label(), style));
        }
        Line::from(spans).right_aligned()
    }

    fn subtitle(&self, count: usize) -> Line<'static> {
        let index = if count == 0 {
            0
        } else {
            self.explorer.selection() + 1
        };
        let magenta = Style::default().fg(Color::Magenta);
        let mut spans = Vec::new();
        let hidden = self.explorer.hidden_count();
        if hidden > 0 && !self.explorer.filter().browsing {
            spans.push(Span::styled(
                format!("+{hidden}"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::DIM | Modifier::ITALIC),
            ));
            spans.push(Span::styled(
                " filtered ",
                Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
            ));
        }
        spans.extend([
            Span::raw("("),
            Span::styled(index.to_string(), magenta),
            Span::raw("/"),
            Span::styled(count.to_string(), magenta),
            Span::raw(")"),
        ]);
        Line::from(spans).right_aligned()
    }
}

impl Component for ExplorerPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible = self.explorer.visible();
        let block = Block::bordered()
            .title(self.title())
            .title_bottom(self.subtitle(visible.len()))
            .style(Style::default().fg(Color::White));

        if visible.is_empty() {
            let empty = Paragraph::new(Span::styled(
                format!("No {} attributes", self.explorer.view().label()),
                Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
            ))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let filter = self.explorer.filter();
        let tree = self.explorer.tree();
        let inner_width = usize::from(area.width.saturating_sub(2));
        let items: Vec<ListItem> = visible
            .iter()
            .map(|&id| {
                let node = tree.get(id);
                let marker = filter
                    .browsing
                    .then(|| filter.is_excluded(&node.name));
                ListItem::new(entry_line(node, marker, inner_width))
            })
            .collect();

        self.list_state.select(Some(self.explorer.selection()));
        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        frame.render_stateful_widget(list, area, self.list_state);
    }
}

/// One list row. `excluded` is `Some` while filter browsing shows markers.
pub(crate) fn entry_line(
    node: &CachedObject,
    excluded: Option<bool>,
    width: usize,
) -> Line<'static> {
    let white = Style::default().fg(Color::White);
    let mut spans = Vec::new();
    let mut width = width;
    if let Some(excluded) = excluded {
        let (mark, style) = if excluded {
            ("[ ] ", Style::default().fg(Color::DarkGray))
        } else {
            ("[x] ", Style::default().fg(Color::Green))
        };
        spans.push(Span::styled(mark, style));
        width = width.saturating_sub(4);
    }

    if !node.is_accessible() {
        let style = Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::DIM | Modifier::ITALIC);
        spans.push(Span::styled(truncate_str(&node.name, width), style));
        return Line::from(spans);
    }

    let (open, close, style) = match node.kind {
        ObjectKind::Module => ("", "", Style::default().fg(Color::Blue)),
        ObjectKind::Type => ("", "", Style::default().fg(Color::Magenta)),
        ObjectKind::Callable => (
            "",
            "()",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ),
        ObjectKind::Mapping => ("{**", "}", Style::default().fg(MAPPING_COLOR)),
        ObjectKind::Sequence => ("[*", "]", Style::default().fg(Color::LightRed)),
        ObjectKind::Value if node.callable => (
            "",
            "()",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        ),
        ObjectKind::Value => ("", "", white),
    };
    let name = truncate_str(&node.name, width.saturating_sub(open.len() + close.len()));
    if !open.is_empty() {
        spans.push(Span::styled(open, white));
    }
    spans.push(Span::styled(name, style));
    if !close.is_empty() {
        spans.push(Span::styled(close, white));
    }
    Line::from(spans)
}
