use crossterm::event::{KeyCode, KeyEvent};

use crate::model::ModalKind;
use crate::ops::{kanban, settings};
use crate::tui::app::{App, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            let modal = app.state.ui.modal.take();
            app.mode = Mode::Navigate;
            let Some(modal) = modal else {
                return;
            };
            match modal.kind {
                ModalKind::ConfirmDelete => {
                    if let Some(id) = modal.task_id
                        && kanban::delete_task(&mut app.state, &id).is_ok()
                    {
                        app.clamp_board();
                    }
                }
                ModalKind::ConfirmLogout => {
                    app.state.logout();
                    app.after_sign_out();
                }
                ModalKind::ConfirmClearCache => {
                    settings::clear_cache(&mut app.state);
                    app.after_sign_out();
                }
                ModalKind::TaskEditor => {}
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            kanban::close_modal(&mut app.state);
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
