//! Syntax highlighting for source previews and fenced docstring code.
//!
//! syntect's default syntaxes and themes are loaded once, on first use.

use std::sync::LazyLock;

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const THEME: &str = "base16-ocean.dark";
const TAB: &str = "    ";

fn theme() -> Option<&'static Theme> {
    THEME_SET.themes.get(THEME)
}

/// Highlight `code` as `language` (a file extension or syntax token such
/// as `rs`, `py`, `json`).
///
/// Unknown languages come back as plain white lines.
pub fn highlight_code(code: &str, language: &str) -> Vec<Line<'static>> {
    let syntax = (!language.is_empty())
        .then(|| SYNTAX_SET.find_syntax_by_token(language))
        .flatten();
    let (Some(syntax), Some(theme)) = (syntax, theme()) else {
        return plain_lines(code);
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(code) {
        match highlighter.highlight_line(line, &SYNTAX_SET) {
            Ok(ranges) => {
                let spans: Vec<Span<'static>> = ranges
                    .into_iter()
                    .filter_map(|(hl_style, frag)| {
                        let content = frag.trim_end_matches(['\n', '\r']).replace('\t', TAB);
                        if content.is_empty() {
                            return None;
                        }
                        let fg = Color::Rgb(
                            hl_style.foreground.r,
                            hl_style.foreground.g,
                            hl_style.foreground.b,
                        );
                        Some(Span::styled(content, Style::default().fg(fg)))
                    })
                    .collect();
                lines.push(Line::from(spans));
            }
            Err(e) => {
                log::debug!("highlighting failed, falling back to plain text: {e}");
                return plain_lines(code);
            }
        }
    }
    lines
}

fn plain_lines(code: &str) -> Vec<Line<'static>> {
    let style = Style::default().fg(Color::White);
    code.lines()
        .map(|line| Line::from(Span::styled(line.replace('\t', TAB), style)))
        .collect()
}
