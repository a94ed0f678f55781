use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::auth::{self, LoginField};
use crate::tui::app::App;

use super::*;

pub(super) fn handle_login(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.focus = match app.login.focus {
                LoginField::Username => LoginField::Password,
                LoginField::Password => LoginField::Username,
            };
        }
        KeyCode::Enter => submit_login(app),
        KeyCode::Esc => app.login.error = None,
        // F1-F3 fill in a demo account
        KeyCode::F(n @ 1..=3) => {
            let demo = auth::demo_credentials()[usize::from(n - 1)];
            app.login.username = demo.username.to_string();
            app.login.password = demo.password.to_string();
            app.login.focus = LoginField::Password;
            app.login.error = None;
        }
        _ => {
            let buf = match app.login.focus {
                LoginField::Username => &mut app.login.username,
                LoginField::Password => &mut app.login.password,
            };
            if edit_text(buf, key) {
                // Typing into a field clears its error
                if app
                    .login
                    .error
                    .as_ref()
                    .is_some_and(|e| e.field().is_none_or(|f| f == app.login.focus))
                {
                    app.login.error = None;
                }
            }
        }
    }
}

fn submit_login(app: &mut App) {
    let username = app.login.username.trim().to_string();
    let password = app.login.password.clone();
    match app.state.login(&username, &password) {
        Ok(_) => app.after_login(),
        Err(e) => {
            if let Some(field) = e.field() {
                app.login.focus = field;
            }
            app.login.error = Some(e);
        }
    }
}
