use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::settings::ProfileField;
use crate::tui::app::{App, Mode, SettingsItem};

use super::helpers::{fit, panel};

const LABEL_W: usize = 18;
const VALUE_W: usize = 30;

impl SettingsItem {
    fn label(self) -> &'static str {
        match self {
            SettingsItem::Name => "Full name",
            SettingsItem::Phone => "Phone",
            SettingsItem::Avatar => "Avatar",
            SettingsItem::SaveProfile => "Save profile",
            SettingsItem::Theme => "Theme",
            SettingsItem::Density => "Layout density",
            SettingsItem::AdvancedMetrics => "Advanced metrics",
            SettingsItem::Export => "Export data",
            SettingsItem::ClearCache => "Clear cache",
        }
    }

    fn profile_field(self) -> Option<ProfileField> {
        match self {
            SettingsItem::Name => Some(ProfileField::Name),
            SettingsItem::Phone => Some(ProfileField::Phone),
            SettingsItem::Avatar => Some(ProfileField::Avatar),
            _ => None,
        }
    }
}

pub fn render_settings_view(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // account
            Constraint::Length(10), // profile
            Constraint::Length(5),  // preferences
            Constraint::Min(4),     // data
        ])
        .split(area);

    render_account(frame, app, chunks[0]);
    render_section(frame, app, chunks[1], "Profile", &SettingsItem::ALL[..4]);
    render_section(frame, app, chunks[2], "Preferences", &SettingsItem::ALL[4..7]);
    render_section(frame, app, chunks[3], "Data", &SettingsItem::ALL[7..]);
}

fn render_account(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let Some(user) = app.state.user() else {
        return;
    };
    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(
                format!(" {}", fit(label, LABEL_W)),
                Style::default().fg(theme.dim).bg(bg),
            ),
            Span::styled(value, Style::default().fg(theme.text_bright).bg(bg)),
        ])
    };
    let lines = vec![
        row("Username", user.username.clone()),
        row("Role", user.role.to_string()),
        row("Member since", user.created_at.format("%Y-%m-%d").to_string()),
    ];
    frame.render_widget(Paragraph::new(lines).block(panel(theme, "Account")), area);
}

fn render_section(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    items: &[SettingsItem],
) {
    let mut lines: Vec<Line> = Vec::new();
    for item in items {
        lines.push(item_line(app, *item));
        if let Some(field) = item.profile_field() {
            lines.push(error_line(app, field));
        }
    }
    frame.render_widget(Paragraph::new(lines).block(panel(&app.theme, title)), area);
}

fn error_line(app: &App, field: ProfileField) -> Line<'static> {
    match &app.settings.error {
        Some(e) if e.field() == Some(field) => Line::from(Span::styled(
            format!("   {}{}", " ".repeat(LABEL_W), e),
            Style::default().fg(app.theme.red).bg(app.theme.background),
        )),
        _ => Line::from(""),
    }
}

fn item_line(app: &App, item: SettingsItem) -> Line<'static> {
    let theme = &app.theme;
    let bg = theme.background;
    let selected = app.settings.item() == item;
    let editing = selected && app.mode == Mode::Profile;
    let row_bg = if selected { theme.selection_bg } else { bg };
    let form = &app.settings.form;
    let prefs = app.state.user().map(|u| u.preferences.clone()).unwrap_or_default();

    let value = match item {
        SettingsItem::Name => form.name.clone(),
        SettingsItem::Phone => form.phone.clone(),
        SettingsItem::Avatar => format!("\u{25C2} {} \u{25B8}", form.avatar),
        SettingsItem::SaveProfile => "Enter to save".to_string(),
        SettingsItem::Theme => app.state.ui.theme.label().to_string(),
        SettingsItem::Density => format!("\u{25C2} {} \u{25B8}", prefs.layout_density.label()),
        SettingsItem::AdvancedMetrics => {
            if prefs.advanced_metrics { "on" } else { "off" }.to_string()
        }
        SettingsItem::Export => format!("to {}", app.export_dir().display()),
        SettingsItem::ClearCache => "resets all data and signs out".to_string(),
    };
    let value = if editing {
        format!("{}\u{258C}", value)
    } else {
        value
    };

    let value_style = match item {
        SettingsItem::Name | SettingsItem::Phone => Style::default()
            .fg(theme.text_bright)
            .bg(if editing { theme.surface } else { row_bg }),
        SettingsItem::ClearCache => Style::default().fg(theme.red).bg(row_bg),
        SettingsItem::SaveProfile => Style::default().fg(theme.dim).bg(row_bg),
        _ => Style::default().fg(theme.highlight).bg(row_bg),
    };
    let mut label_style = Style::default().fg(theme.text).bg(row_bg);
    if selected {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }

    Line::from(vec![
        Span::styled(
            if selected { " \u{25B8} " } else { "   " },
            Style::default().fg(theme.selection_border).bg(row_bg),
        ),
        Span::styled(fit(item.label(), LABEL_W), label_style),
        Span::styled(fit(&value, VALUE_W.max(value.len())), value_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use super::*;
    use crate::ops::settings::ProfileError;

    fn settings(app: &App) -> String {
        render_to_string(90, 40, |frame, area| render_settings_view(frame, app, area))
    }

    fn on_settings() -> App {
        let mut app = app_signed_in("user@example.com", "user123");
        assert!(app.navigate(crate::model::View::Settings));
        app
    }

    #[test]
    fn shows_profile_and_preferences() {
        let app = on_settings();
        let out = settings(&app);
        assert!(out.contains("user@example.com"));
        assert!(out.contains("\u{25B8} Full name         Michael Chen"));
        assert!(out.contains("Theme             dark"));
        assert!(out.contains("Advanced metrics  off"));
        assert!(out.contains("Layout density    \u{25C2} normal \u{25B8}"));
    }

    #[test]
    fn profile_error_is_inline() {
        let mut app = on_settings();
        app.settings.error = Some(ProfileError::PhoneTooShort);
        let out = settings(&app);
        let lines: Vec<&str> = out.lines().collect();
        let phone = lines.iter().position(|l| l.contains("Phone ")).unwrap();
        assert!(lines[phone + 1].contains("Phone must be at least 10 characters"));
    }

    #[test]
    fn editing_shows_cursor() {
        let mut app = on_settings();
        app.mode = Mode::Profile;
        app.settings.form.name = "Mike".into();
        assert!(settings(&app).contains("Mike\u{258C}"));
    }
}
