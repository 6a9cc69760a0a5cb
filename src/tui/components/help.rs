//! # Help
//!
//! Key bindings and an about page, drawn in place of the overview while
//! help is open. `f` shows the same text in the pager via [`help_page`].

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::overview::{Page, PageBody};
use crate::core::state::HelpPane;
use crate::tui::component::Component;

pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("k ↑", "up"),
    ("j ↓", "down"),
    ("g", "go to top"),
    ("G", "go to bottom"),
    ("l → Enter", "select"),
    ("Space", "select"),
    ("h ←", "go back to parent object"),
    ("[ ]", "switch attribute type (public/private/items)"),
    ("{ }", "switch preview (repr/source)"),
    ("p", "toggle full preview"),
    ("d", "toggle full docstring"),
    ("n", "toggle filter view"),
    ("/", "open search filter"),
    ("Esc", "close"),
    ("c", "clear filters"),
    ("o", "toggle stack view"),
    ("f", "open fullscreen view"),
    ("i", "inspect the selected object"),
    ("+", "increase explorer layout"),
    ("- _", "decrease explorer layout"),
    ("=", "return explorer layout size to default"),
    ("r", "return the selected object"),
    ("?", "toggle help page"),
    ("q Q", "quit"),
];

const KEY_COLUMN: usize = 10;

fn about_lines() -> Vec<String> {
    vec![
        format!("objscope {}", env!("CARGO_PKG_VERSION")),
        String::new(),
        "Browse any object graph from the terminal.".to_string(),
        String::new(),
        "Attributes are resolved lazily, one level at a time. A getter that".to_string(),
        "fails only marks its own entry as inaccessible.".to_string(),
        String::new(),
        "Press r to hand the selected object back to the caller,".to_string(),
        "or q to leave with nothing.".to_string(),
    ]
}

/// Plain help text for `pane`, one entry per line.
pub fn help_text(pane: HelpPane) -> String {
    match pane {
        HelpPane::KeyBindings => KEY_BINDINGS
            .iter()
            .map(|(keys, action)| format!("{keys:>KEY_COLUMN$} - {action}"))
            .collect::<Vec<_>>()
            .join("\n"),
        HelpPane::About => about_lines().join("\n"),
    }
}

/// The help text as a pager page.
pub fn help_page(pane: HelpPane) -> Page {
    let name = match pane {
        HelpPane::KeyBindings => "key bindings",
        HelpPane::About => "about",
    };
    Page {
        title: format!("help | {name}"),
        body: PageBody::Text(help_text(pane)),
    }
}

pub struct HelpPanel {
    pane: HelpPane,
}

impl HelpPanel {
    pub fn new(pane: HelpPane) -> Self {
        Self { pane }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        match self.pane {
            HelpPane::KeyBindings => KEY_BINDINGS
                .iter()
                .map(|(keys, action)| {
                    Line::from(vec![
                        Span::styled(
                            format!("{keys:>KEY_COLUMN$} - "),
                            Style::default().fg(Color::White),
                        ),
                        Span::styled(*action, Style::default().fg(Color::Cyan)),
                    ])
                })
                .collect(),
            HelpPane::About => about_lines()
                .into_iter()
                .map(|l| Line::styled(l, Style::default().fg(Color::White)))
                .collect(),
        }
    }
}

impl Component for HelpPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let underlined = Style::default().add_modifier(Modifier::UNDERLINED);
        let dim = Style::default().add_modifier(Modifier::DIM);
        let (bindings, about) = match self.pane {
            HelpPane::KeyBindings => (underlined, dim),
            HelpPane::About => (dim, underlined),
        };
        let title = Line::from(vec![
            Span::styled("help", Style::default().add_modifier(Modifier::ITALIC)),
            Span::raw(" | "),
            Span::styled("key bindings", bindings),
            Span::raw(" "),
            Span::styled("about", about),
        ]);
        let bottom = Line::from(vec![
            Span::styled("f", underlined),
            Span::raw(":fullscreen "),
            Span::styled("[]", underlined),
            Span::raw(":switch pane "),
            Span::styled("?", underlined),
            Span::raw(":exit help"),
        ])
        .style(dim);
        let block = Block::bordered()
            .title(title)
            .title_bottom(bottom)
            .border_style(Style::default().fg(Color::Magenta));

        let mut lines = self.lines();
        let room = usize::from(area.height.saturating_sub(2));
        if lines.len() > room && room > 0 {
            lines.truncate(room - 1);
            lines.push(Line::from(format!("{:>KEY_COLUMN$}", "...")));
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::screen;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_every_binding_in_help_text() {
        let text = help_text(HelpPane::KeyBindings);
        assert_eq!(text.lines().count(), KEY_BINDINGS.len());
        assert!(text.contains("return the selected object"));
    }

    #[test]
    fn test_help_page_title() {
        assert_eq!(help_page(HelpPane::About).title, "help | about");
        let PageBody::Text(body) = help_page(HelpPane::About).body else {
            panic!("help pages are plain text");
        };
        assert!(body.contains("objscope"));
    }

    #[test]
    fn test_short_panel_is_cut_with_ellipsis() {
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|f| HelpPanel::new(HelpPane::KeyBindings).render(f, f.area()))
            .unwrap();
        let text = screen(&terminal);
        assert!(text.contains("up"));
        assert!(text.contains("..."), "{text}");
        assert!(!text.contains("quit"));
    }
}
