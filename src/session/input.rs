use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Logical commands the typer understands, independent of the input device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Up,
    Down,
    Confirm,
    Cancel,
}

impl Command {
    /// Map a terminal key press to a command. Vim-style `hjkl` are accepted too.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(Command::Left),
            KeyCode::Right | KeyCode::Char('l') => Some(Command::Right),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::Down),
            KeyCode::Enter => Some(Command::Confirm),
            KeyCode::Esc => Some(Command::Cancel),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_and_vim_keys() {
        assert_eq!(Command::from_key(&key(KeyCode::Left)), Some(Command::Left));
        assert_eq!(Command::from_key(&key(KeyCode::Char('l'))), Some(Command::Right));
        assert_eq!(Command::from_key(&key(KeyCode::Up)), Some(Command::Up));
        assert_eq!(Command::from_key(&key(KeyCode::Char('j'))), Some(Command::Down));
        assert_eq!(Command::from_key(&key(KeyCode::Enter)), Some(Command::Confirm));
        assert_eq!(Command::from_key(&key(KeyCode::Esc)), Some(Command::Cancel));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(Command::from_key(&key(KeyCode::Char('x'))), None);
        assert_eq!(Command::from_key(&key(KeyCode::Tab)), None);
        let ctrl_h = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::CONTROL);
        assert_eq!(Command::from_key(&ctrl_h), None);
    }
}
