mod common;
mod confirm;
mod editor;
mod kanban;
mod login;
mod navigate;
mod search;
mod settings;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};
use crate::model::View;

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use common::*;
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use editor::*;
#[allow(unused_imports)]
use kanban::*;
#[allow(unused_imports)]
use login::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use search::*;
#[allow(unused_imports)]
use settings::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    let key = normalize_key(key);

    // Ctrl+Q quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
        app.should_quit = true;
        return;
    }

    if app.view() == View::Login {
        handle_login(app, key);
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Move => handle_move(app, key),
        Mode::Edit => handle_editor(app, key),
        Mode::Confirm => handle_confirm(app, key),
        Mode::Profile => handle_profile_edit(app, key),
    }
}
