use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

/// Map a base symbol to its shifted counterpart (US keyboard layout).
pub(super) fn shift_symbol(c: char) -> Option<char> {
    match c {
        '`' => Some('~'),
        '1' => Some('!'),
        '2' => Some('@'),
        '3' => Some('#'),
        '4' => Some('$'),
        '5' => Some('%'),
        '6' => Some('^'),
        '7' => Some('&'),
        '8' => Some('*'),
        '9' => Some('('),
        '0' => Some(')'),
        '-' => Some('_'),
        '=' => Some('+'),
        '[' => Some('{'),
        ']' => Some('}'),
        '\\' => Some('|'),
        ';' => Some(':'),
        '\'' => Some('"'),
        ',' => Some('<'),
        '.' => Some('>'),
        '/' => Some('?'),
        _ => None,
    }
}

/// Normalize key events from terminals using the kitty keyboard protocol.
///
/// Kitty protocol sends `Char(lowercase) + SHIFT` instead of `Char(UPPERCASE) + SHIFT`,
/// and `Char(base_symbol) + SHIFT` instead of `Char(shifted_symbol)`.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        if c.is_ascii_lowercase() {
            key.code = KeyCode::Char(c.to_ascii_uppercase());
        } else if let Some(shifted) = shift_symbol(c) {
            key.code = KeyCode::Char(shifted);
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
    }
    key
}

/// Apply a key to a single-line text buffer with the cursor at the end.
/// Returns true if the key was consumed.
pub(super) fn edit_text(buf: &mut String, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('u') if ctrl => {
            buf.clear();
            true
        }
        KeyCode::Char('w') if ctrl => {
            unicode::pop_word(buf);
            true
        }
        KeyCode::Backspace if alt || ctrl => {
            unicode::pop_word(buf);
            true
        }
        KeyCode::Backspace => {
            unicode::pop_grapheme(buf);
            true
        }
        KeyCode::Char(c) if !ctrl && !alt => {
            buf.push(c);
            true
        }
        _ => false,
    }
}

/// Wrapping step through a list of options
pub(super) fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let Some(pos) = options.iter().position(|o| *o == current) else {
        return options.first().copied().unwrap_or(current);
    };
    let len = options.len();
    let next = if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    };
    options[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normalize_kitty_shift() {
        let k = normalize_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::SHIFT));
        assert_eq!(k.code, KeyCode::Char('L'));
        let k = normalize_key(KeyEvent::new(KeyCode::Char('/'), KeyModifiers::SHIFT));
        assert_eq!(k.code, KeyCode::Char('?'));
        assert!(!k.modifiers.contains(KeyModifiers::SHIFT));
    }

    #[test]
    fn test_edit_text_graphemes() {
        let mut buf = String::from("cafe\u{301}");
        assert!(edit_text(&mut buf, key(KeyCode::Backspace)));
        assert_eq!(buf, "caf");
        edit_text(&mut buf, key(KeyCode::Char('é')));
        assert_eq!(buf, "café");
        assert!(!edit_text(&mut buf, key(KeyCode::Enter)));
    }

    #[test]
    fn test_edit_text_word_delete() {
        let mut buf = String::from("hello big world");
        edit_text(&mut buf, KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(buf, "hello big ");
        edit_text(&mut buf, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(buf, "");
    }

    #[test]
    fn test_cycle_wraps() {
        let opts = [1, 2, 3];
        assert_eq!(cycle(&opts, 3, true), 1);
        assert_eq!(cycle(&opts, 1, false), 3);
        assert_eq!(cycle(&opts, 9, true), 1);
    }
}
