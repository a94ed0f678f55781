use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::kanban;
use crate::tui::app::{App, BoardCursor, Mode, SearchTarget};

use super::*;

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search_input.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            let query = std::mem::take(&mut app.search_input).trim().to_string();
            app.mode = Mode::Navigate;
            match app.search_target {
                SearchTarget::Board => {
                    app.board_search = query;
                    jump_to_first_match(app);
                }
                SearchTarget::Companies => app.company_query = query,
            }
        }
        _ => {
            edit_text(&mut app.search_input, key);
        }
    }
}

/// Put the cursor on the first column that still has tasks
fn jump_to_first_match(app: &mut App) {
    let column = (0..kanban::columns().len())
        .find(|c| !app.column_tasks(*c).is_empty())
        .unwrap_or(0);
    app.board = BoardCursor { column, row: 0 };
}
