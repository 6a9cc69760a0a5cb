//! Screen layout: one outer frame around the explorer column and the
//! overview, or the pager on its own when one is open.
//!
//! ```text
//! ┌ root.b | Inner ───────────────────────────────────────┐
//! │┌─────public private┐┌preview | repr()────────────────┐│
//! ││q                  ││...                             ││
//! ││r                  │└────────────────────────────────┘│
//! │└──────────────(1/2)┘┌type()──────────────────────────┐│
//! │┌────────────[stack]┐└────────────────────────────────┘│
//! ││root               │┌docstring───────────────────────┐│
//! │└───────────────────┘└────────────────────────────────┘│
//! └ ?:help q:quit r:return ───────────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Block;

use crate::core::state::{BorderStyle, Mode, Session};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::filter_panel::FILTER_PANEL_HEIGHT;
use crate::tui::components::{
    ExplorerPane, FilterPanel, HelpPanel, OverviewPane, Pager, StackView,
};

pub fn draw(frame: &mut Frame, session: &Session, tui: &mut TuiState) {
    let area = frame.area();
    if let Some(pager) = tui.pager.as_mut() {
        Pager::new(pager).render(frame, area);
        return;
    }

    let explorer = &session.explorer;
    let shown = explorer
        .selected_object()
        .unwrap_or_else(|| explorer.current_node());

    let border = match session.border {
        BorderStyle::Normal => Style::default().fg(Color::Blue),
        BorderStyle::Alert => Style::default().fg(Color::Red),
    };
    let title = Line::from(vec![
        Span::raw(" "),
        Span::styled(shown.dotpath.clone(), Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled(
            shown.type_name.clone(),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw(" "),
    ]);
    let mut outer = Block::bordered()
        .title(title)
        .title_bottom(key_hints())
        .border_style(border);
    if session.border == BorderStyle::Alert
        && let Some(message) = &session.last_error
    {
        outer = outer.title_bottom(
            Line::from(Span::styled(
                format!(" {message} "),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        );
    }
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let pane_width = explorer.pane_width(area.width).min(inner.width);
    let [left, right] =
        Layout::horizontal([Constraint::Length(pane_width), Constraint::Min(0)]).areas(inner);

    draw_left(frame, left, session, tui);

    if session.mode() == Mode::Help {
        HelpPanel::new(session.help_pane).render(frame, right);
    } else {
        OverviewPane::new(explorer.selected_object(), session.overview).render(frame, right);
    }
}

fn draw_left(frame: &mut Frame, area: Rect, session: &Session, tui: &mut TuiState) {
    let explorer = &session.explorer;
    let mode = session.underlying_mode();

    let panel_height = match mode {
        Mode::StackBrowsing => StackView::height(explorer).min(area.height / 2),
        Mode::FilterBrowsing | Mode::FilterInput => FILTER_PANEL_HEIGHT,
        _ => 0,
    };
    let [list_area, panel_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(panel_height)]).areas(area);

    let focused = mode != Mode::StackBrowsing;
    ExplorerPane::new(explorer, &mut tui.explorer_list, focused).render(frame, list_area);

    match mode {
        Mode::StackBrowsing => {
            StackView::new(explorer, &mut tui.stack_list).render(frame, panel_area)
        }
        Mode::FilterBrowsing | Mode::FilterInput => {
            FilterPanel::new(explorer.filter(), explorer.hidden_count())
                .render(frame, panel_area)
        }
        _ => {}
    }
}

fn key_hints() -> Line<'static> {
    let underlined = Style::default().add_modifier(Modifier::UNDERLINED);
    Line::from(vec![
        Span::raw(" "),
        Span::styled("?", underlined),
        Span::raw(":help "),
        Span::styled("q", underlined),
        Span::raw(":quit "),
        Span::styled("r", underlined),
        Span::raw(":return "),
    ])
    .style(Style::default().fg(Color::White).add_modifier(Modifier::DIM))
}
