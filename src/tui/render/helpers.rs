use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders};

use crate::model::Priority;
use crate::tui::theme::Theme;
use crate::util::unicode;

pub(super) fn priority_symbol(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "\u{25BD}",
        Priority::Medium => "\u{25C6}",
        Priority::High => "\u{25B2}",
    }
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Truncate to `width` cells and pad the rest with spaces
pub(super) fn fit(text: &str, width: usize) -> String {
    let text = unicode::truncate_to_width(text, width);
    let pad = width.saturating_sub(unicode::display_width(&text));
    format!("{}{}", text, " ".repeat(pad))
}

/// Horizontal bar `width` cells wide, filled to `percent`
pub(super) fn bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(width - filled)
    )
}

/// Rounded panel with a title, in the theme colors
pub(super) fn panel<'a>(theme: &Theme, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.dim).bg(theme.background))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.background))
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(unicode::display_width(&fit("a long title here", 6)), 6);
        assert_eq!(fit("日本語", 4).chars().count(), 3);
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(50, 4), "\u{2588}\u{2588}\u{2591}\u{2591}");
        assert_eq!(bar(0, 3), "\u{2591}\u{2591}\u{2591}");
        assert_eq!(bar(250, 2), "\u{2588}\u{2588}");
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect_fixed(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect_fixed(40, 40, area), area);
    }
}
