use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};

use crate::model::{Density, ModalKind, NotificationLevel};
use crate::ops::settings::{self, AVATAR_OPTIONS};
use crate::tui::app::{App, Mode, SettingsItem};

use super::*;

pub(super) fn handle_settings(app: &mut App, key: KeyEvent) {
    let last = SettingsItem::ALL.len() - 1;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.settings.cursor = (app.settings.cursor + 1).min(last);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.settings.cursor = app.settings.cursor.saturating_sub(1);
        }
        KeyCode::Char('h') | KeyCode::Left => adjust(app, false),
        KeyCode::Char('l') | KeyCode::Right => adjust(app, true),
        KeyCode::Enter | KeyCode::Char(' ') => activate(app),
        KeyCode::Esc => {
            app.reset_settings_form();
        }
        _ => {}
    }
}

/// Left/Right on a choice row
fn adjust(app: &mut App, forward: bool) {
    match app.settings.item() {
        SettingsItem::Avatar => cycle_avatar(app, forward),
        SettingsItem::Density => {
            let Some(user) = app.state.user() else {
                return;
            };
            let mut prefs = user.preferences.clone();
            prefs.layout_density = cycle(&Density::ALL, prefs.layout_density, forward);
            settings::update_preferences(&mut app.state, prefs);
        }
        SettingsItem::Theme | SettingsItem::AdvancedMetrics => activate(app),
        _ => {}
    }
}

fn activate(app: &mut App) {
    match app.settings.item() {
        SettingsItem::Name => {
            app.settings.edit_original = app.settings.form.name.clone();
            app.mode = Mode::Profile;
        }
        SettingsItem::Phone => {
            app.settings.edit_original = app.settings.form.phone.clone();
            app.mode = Mode::Profile;
        }
        SettingsItem::Avatar => cycle_avatar(app, true),
        SettingsItem::SaveProfile => {
            match settings::update_profile(&mut app.state, &app.settings.form) {
                Ok(user) => {
                    app.settings.error = None;
                    app.settings.form = settings::ProfileForm::from_user(&user);
                }
                Err(e) => {
                    if e.field().is_none() {
                        app.state.notify(NotificationLevel::Error, e.to_string());
                    }
                    app.settings.error = Some(e);
                }
            }
        }
        SettingsItem::Theme => {
            settings::toggle_theme(&mut app.state);
        }
        SettingsItem::Density => adjust(app, true),
        SettingsItem::AdvancedMetrics => {
            let Some(user) = app.state.user() else {
                return;
            };
            let mut prefs = user.preferences.clone();
            prefs.advanced_metrics = !prefs.advanced_metrics;
            settings::update_preferences(&mut app.state, prefs);
        }
        SettingsItem::Export => {
            let dir = app.export_dir();
            if let Err(e) = settings::export_data(&mut app.state, &dir, Utc::now()) {
                tracing::error!("export failed: {}", e);
                app.state
                    .notify(NotificationLevel::Error, format!("Export failed: {}", e));
            }
        }
        SettingsItem::ClearCache => {
            open_confirm(app, ModalKind::ConfirmClearCache, None);
        }
    }
}

fn cycle_avatar(app: &mut App, forward: bool) {
    let current = app.settings.form.avatar.as_str();
    let next = match AVATAR_OPTIONS.iter().position(|a| *a == current) {
        Some(_) => cycle(&AVATAR_OPTIONS, current, forward),
        None => AVATAR_OPTIONS[0],
    };
    app.settings.form.avatar = next.to_string();
}

/// Typing into the name or phone field
pub(super) fn handle_profile_edit(app: &mut App, key: KeyEvent) {
    let item = app.settings.item();
    let buf = match item {
        SettingsItem::Name => &mut app.settings.form.name,
        SettingsItem::Phone => &mut app.settings.form.phone,
        _ => {
            app.mode = Mode::Navigate;
            return;
        }
    };
    match key.code {
        KeyCode::Enter | KeyCode::Tab => {
            app.mode = Mode::Navigate;
        }
        KeyCode::Esc => {
            *buf = std::mem::take(&mut app.settings.edit_original);
            app.mode = Mode::Navigate;
        }
        _ => {
            edit_text(buf, key);
        }
    }
}
