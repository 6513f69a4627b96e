use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::session::{Action, SessionStep};

/// Translate a terminal key press into a session action for the current step
pub fn action_for(step: &SessionStep, key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    // AltGr arrives as Ctrl+Alt on Windows; Polish letters come through it
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::ALT);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match step {
        SessionStep::CollectingInput => match key.code {
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) if !ctrl => Some(Action::Char(c)),
            _ => None,
        },
        SessionStep::AwaitingExplanation { .. } => match key.code {
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Esc => Some(Action::Reset),
            _ => None,
        },
        SessionStep::Practicing => match key.code {
            KeyCode::Esc => Some(Action::Reset),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Tab => Some(Action::NextHint),
            KeyCode::BackTab => Some(Action::PrevHint),
            KeyCode::Char('t') if ctrl => Some(Action::ToggleHighlight),
            KeyCode::Char(c) if !ctrl => Some(Action::Char(c)),
            _ => None,
        },
        SessionStep::ReviewingResult => match key.code {
            KeyCode::Char('r') => Some(Action::Retry),
            KeyCode::Char('n') => Some(Action::Reset),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explain::RequestId;
    use crate::session::Explanation;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let steps = [
            SessionStep::CollectingInput,
            SessionStep::AwaitingExplanation {
                request: RequestId(1),
                explanation: Explanation::Pending,
            },
            SessionStep::Practicing,
            SessionStep::ReviewingResult,
        ];
        for step in &steps {
            assert_eq!(action_for(step, ctrl('c')), Some(Action::Quit));
        }
    }

    #[test]
    fn test_collecting_input_keys() {
        let step = SessionStep::CollectingInput;
        assert_eq!(action_for(&step, key(KeyCode::Char('r'))), Some(Action::Char('r')));
        assert_eq!(action_for(&step, key(KeyCode::Enter)), Some(Action::Submit));
        assert_eq!(action_for(&step, key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(action_for(&step, key(KeyCode::Tab)), None);
    }

    #[test]
    fn test_practicing_keys() {
        let step = SessionStep::Practicing;
        assert_eq!(action_for(&step, key(KeyCode::Char('r'))), Some(Action::Char('r')));
        assert_eq!(action_for(&step, key(KeyCode::Tab)), Some(Action::NextHint));
        assert_eq!(action_for(&step, key(KeyCode::BackTab)), Some(Action::PrevHint));
        assert_eq!(action_for(&step, ctrl('t')), Some(Action::ToggleHighlight));
        assert_eq!(action_for(&step, key(KeyCode::Esc)), Some(Action::Reset));
        assert_eq!(action_for(&step, ctrl('x')), None);
    }

    #[test]
    fn test_review_keys() {
        let step = SessionStep::ReviewingResult;
        assert_eq!(action_for(&step, key(KeyCode::Char('r'))), Some(Action::Retry));
        assert_eq!(action_for(&step, key(KeyCode::Char('n'))), Some(Action::Reset));
        assert_eq!(action_for(&step, key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(action_for(&step, key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_altgr_diacritics_are_typed() {
        let altgr = KeyEvent::new(
            KeyCode::Char('ą'),
            KeyModifiers::CONTROL | KeyModifiers::ALT,
        );
        assert_eq!(
            action_for(&SessionStep::CollectingInput, altgr),
            Some(Action::Char('ą'))
        );
        assert_eq!(
            action_for(&SessionStep::Practicing, altgr),
            Some(Action::Char('ą'))
        );

        let altgr_c = KeyEvent::new(
            KeyCode::Char('ć'),
            KeyModifiers::CONTROL | KeyModifiers::ALT,
        );
        assert_eq!(
            action_for(&SessionStep::Practicing, altgr_c),
            Some(Action::Char('ć'))
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let mut release = key(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        assert_eq!(action_for(&SessionStep::Practicing, release), None);
    }
}
