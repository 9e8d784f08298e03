use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Esc,
    Home,
    End,
    Next,
    Prev,
    C,
    H,
    M,
    P,
    Q,
    R,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (m, _) if !normal_modifiers.contains(m) => None,
            (_, KeyCode::Char('w' | 'W') | KeyCode::Up) => Some(Command::Up),
            (_, KeyCode::Char('s' | 'S') | KeyCode::Down) => Some(Command::Down),
            (_, KeyCode::Char('a' | 'A') | KeyCode::Left) => Some(Command::Left),
            (_, KeyCode::Char('d' | 'D') | KeyCode::Right) => Some(Command::Right),
            (_, KeyCode::Enter) => Some(Command::Enter),
            (_, KeyCode::Char(' ')) => Some(Command::Space),
            (_, KeyCode::Esc) => Some(Command::Esc),
            (_, KeyCode::Home) => Some(Command::Home),
            (_, KeyCode::End) => Some(Command::End),
            (_, KeyCode::Tab) => Some(Command::Next),
            (_, KeyCode::BackTab) => Some(Command::Prev),
            (_, KeyCode::Char('c' | 'C')) => Some(Command::C),
            (_, KeyCode::Char('h' | 'H')) => Some(Command::H),
            (_, KeyCode::Char('m' | 'M')) => Some(Command::M),
            (_, KeyCode::Char('p' | 'P')) => Some(Command::P),
            (_, KeyCode::Char('q' | 'Q')) => Some(Command::Q),
            (_, KeyCode::Char('r' | 'R')) => Some(Command::R),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Command::Quit))]
    #[case(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE), Some(Command::C))]
    #[case(KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT), Some(Command::Q))]
    #[case(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE), Some(Command::Up))]
    #[case(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE), Some(Command::Left))]
    #[case(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT), Some(Command::Prev))]
    #[case(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::ALT), None)]
    #[case(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE), None)]
    fn test_from_key_event(#[case] ev: KeyEvent, #[case] cmd: Option<Command>) {
        assert_eq!(Command::from_key_event(ev), cmd);
    }
}
