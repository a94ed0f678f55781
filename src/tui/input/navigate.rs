use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{ModalKind, ModalState, View};
use crate::ops::{auth, settings};
use crate::tui::app::{App, Mode, SearchTarget};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts ? and Esc
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    if handle_global(app, key) {
        return;
    }

    match app.view() {
        View::Kanban => handle_board(app, key),
        View::Settings => handle_settings(app, key),
        View::Dashboard => handle_dashboard(app, key),
        View::Users => handle_users(app, key),
        View::Reports | View::Login => {}
    }
}

/// Keys that work in every view. Returns true if consumed.
fn handle_global(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    match key.code {
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('b') => app.state.toggle_sidebar(),
        KeyCode::Char('t') => {
            settings::toggle_theme(&mut app.state);
        }
        KeyCode::Char('L') => {
            open_confirm(app, ModalKind::ConfirmLogout, None);
        }
        KeyCode::Tab | KeyCode::BackTab => {
            let items = auth::accessible_nav_items(app.state.user());
            let current = items.iter().position(|i| i.view == app.view());
            let len = items.len();
            if len > 0 {
                let next = match (current, key.code) {
                    (Some(i), KeyCode::BackTab) => (i + len - 1) % len,
                    (Some(i), _) => (i + 1) % len,
                    (None, _) => 0,
                };
                app.navigate(items[next].view);
            }
        }
        KeyCode::Char(c) => match auth::nav_item_by_key(c) {
            // Inaccessible views still go through the permission check so
            // the refusal is reported
            Some(item) => {
                app.navigate(item.view);
            }
            None => return false,
        },
        _ => return false,
    }
    true
}

/// Show a yes/no popup for `kind`
pub(super) fn open_confirm(app: &mut App, kind: ModalKind, task_id: Option<String>) {
    app.state.update_ui(|ui| ui.modal = Some(ModalState { kind, task_id }));
    app.mode = Mode::Confirm;
}

fn handle_dashboard(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('/') => {
            app.search_target = SearchTarget::Companies;
            app.search_input = app.company_query.clone();
            app.mode = Mode::Search;
        }
        KeyCode::Esc => app.company_query.clear(),
        // Dismiss the top smart alert
        KeyCode::Char('x') => {
            if let Some(id) = app.market.alerts.visible().first().map(|a| a.id) {
                app.market.alerts.dismiss(id);
            }
        }
        _ => {}
    }
}

fn handle_users(app: &mut App, key: KeyEvent) {
    let len = app.state.users.len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.users_cursor + 1 < len {
                app.users_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.users_cursor = app.users_cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.users_cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.users_cursor = len.saturating_sub(1),
        _ => {}
    }
}
