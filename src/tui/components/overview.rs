//! # Overview Pane
//!
//! Right-hand side of the screen, describing the selected child:
//!
//! ```text
//! ┌preview | repr()───────────┐
//! │{"q": true, "r": null}     │   repr or highlighted source
//! └p:toggle f:fullscreen──────┘
//! ┌type()──────────┐┌len()────┐
//! │Inner           ││2        │
//! └────────────────┘└─────────┘
//! ┌docstring──────────────────┐
//! │...                        │   rendered as markdown
//! └d:toggle───────────────────┘
//! ```
//!
//! `d` keeps only the docstring, `p` keeps only the preview.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::cached::CachedObject;
use crate::core::overview::{ContentMode, Overview, PreviewMode};
use crate::tui::component::Component;
use crate::tui::highlight::highlight_code;
use crate::tui::markdown;

pub struct OverviewPane<'a> {
    node: Option<&'a CachedObject>,
    overview: Overview,
}

impl<'a> OverviewPane<'a> {
    pub fn new(node: Option<&'a CachedObject>, overview: Overview) -> Self {
        Self { node, overview }
    }
}

impl Component for OverviewPane<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(node) = self.node else {
            let empty = Paragraph::new(Span::styled(
                "nothing selected",
                Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
            ))
            .block(Block::bordered().title("preview"));
            frame.render_widget(empty, area);
            return;
        };

        match self.overview.content {
            ContentMode::Docstring => render_docstring(frame, area, node, true),
            ContentMode::Value => render_preview(frame, area, node, self.overview, true),
            ContentMode::All => {
                use Constraint::{Length, Min, Percentage};
                let [preview, info, doc] =
                    Layout::vertical([Percentage(40), Length(3), Min(3)]).areas(area);
                render_preview(frame, preview, node, self.overview, false);
                render_info(frame, info, node);
                render_docstring(frame, doc, node, false);
            }
        }
    }
}

fn hint(key: &'static str, what: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().add_modifier(Modifier::UNDERLINED)),
        Span::raw(what),
    ]
}

fn render_preview(
    frame: &mut Frame,
    area: Rect,
    node: &CachedObject,
    overview: Overview,
    expanded: bool,
) {
    let mode = overview.preview_for(node);
    let source = match mode {
        PreviewMode::Source => node.source(),
        PreviewMode::Repr => None,
    };

    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let mut title = vec![Span::styled("preview", italic), Span::raw(" | ")];
    if node.callable {
        let (on, off) = if source.is_some() {
            ("source", "repr()")
        } else {
            ("repr()", "source")
        };
        title.push(Span::styled(on, italic.fg(Color::Cyan)));
        title.push(Span::raw(" "));
        title.push(Span::styled(off, Style::default().add_modifier(Modifier::DIM)));
    } else {
        title.push(Span::styled("repr()", italic.fg(Color::Cyan)));
    }

    let mut bottom: Vec<Span> = Vec::new();
    bottom.extend(hint("p", if expanded { ":restore " } else { ":expand " }));
    bottom.extend(hint("f", ":fullscreen"));
    if node.callable {
        bottom.push(Span::raw(" "));
        bottom.extend(hint("{}", ":switch"));
    }

    let block = Block::bordered()
        .title(Line::from(title))
        .title_bottom(Line::from(bottom).style(Style::default().add_modifier(Modifier::DIM)))
        .style(Style::default().fg(Color::White));

    let body = match source {
        Some(code) => Text::from(highlight_code(code, node.source_language())),
        None => {
            let repr = node.repr();
            let style = if !node.is_accessible() {
                Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC)
            } else if repr.fallback || node.is_empty() {
                Style::default().add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };
            Text::styled(repr.text.clone(), style)
        }
    };
    frame.render_widget(
        Paragraph::new(body).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_info(frame: &mut Frame, area: Rect, node: &CachedObject) {
    let italic_cyan = Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC);
    let type_style = if node.is_accessible() {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default().fg(Color::Red)
    };
    let type_box = Paragraph::new(Span::styled(node.type_name.clone(), type_style))
        .block(Block::bordered().title(Span::styled("type()", italic_cyan)));

    match node.len() {
        Some(len) => {
            let width = u16::try_from(len.to_string().len() + 8).unwrap_or(u16::MAX);
            let [type_area, len_area] =
                Layout::horizontal([Constraint::Min(0), Constraint::Length(width)]).areas(area);
            frame.render_widget(type_box, type_area);
            let len_box = Paragraph::new(len.to_string())
                .block(Block::bordered().title(Span::styled("len()", italic_cyan)));
            frame.render_widget(len_box, len_area);
        }
        None => frame.render_widget(type_box, area),
    }
}

fn render_docstring(frame: &mut Frame, area: Rect, node: &CachedObject, expanded: bool) {
    let mut bottom: Vec<Span> = Vec::new();
    bottom.extend(hint("d", if expanded { ":restore" } else { ":expand" }));
    if expanded {
        bottom.push(Span::raw(" "));
        bottom.extend(hint("f", ":fullscreen"));
    }
    let block = Block::bordered()
        .title(Span::styled(
            "docstring",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .title_bottom(Line::from(bottom).style(Style::default().add_modifier(Modifier::DIM)))
        .style(Style::default().fg(Color::White));

    let body = match node.docstring() {
        Some(doc) => markdown::render(doc, Color::White),
        None => Text::styled(
            "None",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        ),
    };
    frame.render_widget(
        Paragraph::new(body).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
