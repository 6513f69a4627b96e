//! Screen flow of the trainer as an explicit state machine.
//!
//! Every user intent arrives as an [`Action`]; anything the caller has to do
//! outside the machine (start a network request, exit) comes back as an
//! [`Effect`]. Explanation responses are matched against the request the
//! session is currently waiting for, so an answer that arrives after the
//! user moved on is dropped instead of being shown on the wrong screen.

use crate::explain::{ExplainError, RequestId};
use crate::hint::HintLevel;
use crate::markup::{parse_markup, MarkupSpan};
use crate::practice::Practice;

pub const EMPTY_RULE_MESSAGE: &str = "Proszę wpisać jakąś regułkę, aby zacząć zabawę!";
pub const EXPLANATION_FAILED_MESSAGE: &str = "Nie udało się pobrać wyjaśnienia od BrainBota.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Explanation {
    Pending,
    Ready(Vec<MarkupSpan>),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStep {
    CollectingInput,
    AwaitingExplanation {
        request: RequestId,
        explanation: Explanation,
    },
    Practicing,
    ReviewingResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Char(char),
    Backspace,
    Submit,
    NextHint,
    PrevHint,
    ToggleHighlight,
    Retry,
    Reset,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    RequestExplanation { request: RequestId, rule: String },
    Quit,
}

/// Defaults applied to every new practice run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub hint_level: HintLevel,
    pub highlight_errors: bool,
    /// When false the explanation step is skipped entirely
    pub explanations: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            hint_level: HintLevel::FirstLetter,
            highlight_errors: true,
            explanations: true,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    settings: SessionSettings,
    step: SessionStep,
    draft: String,
    error: Option<&'static str>,
    practice: Option<Practice>,
    quote: Option<&'static str>,
    next_request: u64,
}

impl Session {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            step: SessionStep::CollectingInput,
            draft: String::new(),
            error: None,
            practice: None,
            quote: None,
            next_request: 0,
        }
    }

    pub fn step(&self) -> &SessionStep {
        &self.step
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// User-facing message for the rule input screen
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn practice(&self) -> Option<&Practice> {
        self.practice.as_ref()
    }

    pub fn quote(&self) -> Option<&'static str> {
        self.quote
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Put `rule` in the draft and submit it, as if the user had typed it
    pub fn start_with_rule(&mut self, rule: &str) -> Effect {
        self.draft = rule.to_string();
        self.submit_rule()
    }

    pub fn apply(&mut self, action: Action) -> Effect {
        if action == Action::Quit {
            return Effect::Quit;
        }
        if action == Action::Reset {
            self.reset();
            return Effect::None;
        }

        match self.step {
            SessionStep::CollectingInput => match action {
                Action::Char(c) => self.draft.push(c),
                Action::Backspace => {
                    self.draft.pop();
                }
                Action::Submit => return self.submit_rule(),
                _ => {}
            },
            SessionStep::AwaitingExplanation { .. } => {
                if action == Action::Submit {
                    self.step = SessionStep::Practicing;
                }
            }
            SessionStep::Practicing => {
                let Some(practice) = self.practice.as_mut() else {
                    return Effect::None;
                };
                match action {
                    Action::Char(c) => practice.write(c),
                    Action::Backspace => practice.backspace(),
                    Action::NextHint => practice.next_hint_level(),
                    Action::PrevHint => practice.prev_hint_level(),
                    Action::ToggleHighlight => practice.toggle_highlight(),
                    Action::Submit => {
                        if practice.submit().is_some() {
                            self.quote = Some(Practice::motivational_quote(&mut rand::thread_rng()));
                            self.step = SessionStep::ReviewingResult;
                        }
                    }
                    _ => {}
                }
            }
            SessionStep::ReviewingResult => {
                if action == Action::Retry {
                    if let Some(practice) = self.practice.as_mut() {
                        practice.retry();
                    }
                    self.quote = None;
                    self.step = SessionStep::Practicing;
                }
            }
        }

        Effect::None
    }

    /// Deliver an explanation outcome. Returns false when the session is no
    /// longer waiting for `request` and the outcome was dropped.
    pub fn receive_explanation(
        &mut self,
        request: RequestId,
        outcome: Result<String, ExplainError>,
    ) -> bool {
        match &mut self.step {
            SessionStep::AwaitingExplanation {
                request: pending,
                explanation,
            } if *pending == request => {
                *explanation = match outcome {
                    Ok(text) => Explanation::Ready(parse_markup(&text)),
                    Err(_) => Explanation::Failed,
                };
                true
            }
            _ => {
                log::warn!("dropping stale explanation {:?}", request);
                false
            }
        }
    }

    fn submit_rule(&mut self) -> Effect {
        if self.draft.trim().is_empty() {
            self.error = Some(EMPTY_RULE_MESSAGE);
            return Effect::None;
        }

        self.error = None;
        let rule = std::mem::take(&mut self.draft);
        self.practice = Some(Practice::new(
            &rule,
            self.settings.hint_level,
            self.settings.highlight_errors,
        ));
        log::info!("rule accepted ({} chars)", rule.chars().count());

        if !self.settings.explanations {
            self.step = SessionStep::Practicing;
            return Effect::None;
        }

        self.next_request += 1;
        let request = RequestId(self.next_request);
        self.step = SessionStep::AwaitingExplanation {
            request,
            explanation: Explanation::Pending,
        };
        Effect::RequestExplanation { request, rule }
    }

    fn reset(&mut self) {
        self.step = SessionStep::CollectingInput;
        self.draft.clear();
        self.error = None;
        self.practice = None;
        self.quote = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn offline() -> Session {
        Session::new(SessionSettings {
            explanations: false,
            ..SessionSettings::default()
        })
    }

    fn type_str(session: &mut Session, s: &str) {
        for c in s.chars() {
            session.apply(Action::Char(c));
        }
    }

    #[test]
    fn test_starts_collecting_input() {
        let session = Session::new(SessionSettings::default());
        assert_eq!(session.step(), &SessionStep::CollectingInput);
        assert!(session.practice().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_blank_rule_is_rejected() {
        let mut session = Session::new(SessionSettings::default());
        type_str(&mut session, "   ");

        assert_eq!(session.apply(Action::Submit), Effect::None);
        assert_eq!(session.step(), &SessionStep::CollectingInput);
        assert_eq!(session.error(), Some(EMPTY_RULE_MESSAGE));
        assert_eq!(session.draft(), "   ");
    }

    #[test]
    fn test_submit_rule_requests_explanation() {
        let mut session = Session::new(SessionSettings::default());
        type_str(&mut session, "Woda wrze.");

        let effect = session.apply(Action::Submit);
        assert_matches!(
            effect,
            Effect::RequestExplanation { request: RequestId(1), ref rule } if rule == "Woda wrze."
        );
        assert_matches!(
            session.step(),
            SessionStep::AwaitingExplanation { explanation: Explanation::Pending, .. }
        );
        assert_eq!(session.practice().unwrap().rule(), "Woda wrze.");
        assert_eq!(session.draft(), "");
    }

    #[test]
    fn test_explanation_arrives() {
        let mut session = Session::new(SessionSettings::default());
        let Effect::RequestExplanation { request, .. } = session.start_with_rule("a b") else {
            panic!("expected a request");
        };

        assert!(session.receive_explanation(request, Ok("**A** to B".into())));
        assert_matches!(
            session.step(),
            SessionStep::AwaitingExplanation { explanation: Explanation::Ready(spans), .. }
                if spans[0] == MarkupSpan::Strong("A".into())
        );

        session.apply(Action::Submit);
        assert_eq!(session.step(), &SessionStep::Practicing);
    }

    #[test]
    fn test_explanation_failure_is_recoverable() {
        let mut session = Session::new(SessionSettings::default());
        let Effect::RequestExplanation { request, .. } = session.start_with_rule("a b") else {
            panic!("expected a request");
        };

        assert!(session.receive_explanation(request, Err(ExplainError::Status(500))));
        assert_matches!(
            session.step(),
            SessionStep::AwaitingExplanation { explanation: Explanation::Failed, .. }
        );
        session.apply(Action::Submit);
        assert_eq!(session.step(), &SessionStep::Practicing);
    }

    #[test]
    fn test_stale_explanation_after_reset_is_dropped() {
        let mut session = Session::new(SessionSettings::default());
        let Effect::RequestExplanation { request: first, .. } = session.start_with_rule("one") else {
            panic!("expected a request");
        };

        session.apply(Action::Reset);
        let Effect::RequestExplanation { request: second, .. } = session.start_with_rule("two")
        else {
            panic!("expected a request");
        };
        assert_ne!(first, second);

        assert!(!session.receive_explanation(first, Ok("old".into())));
        assert_matches!(
            session.step(),
            SessionStep::AwaitingExplanation { explanation: Explanation::Pending, .. }
        );
        assert!(session.receive_explanation(second, Ok("new".into())));
    }

    #[test]
    fn test_explanation_after_continuing_is_dropped() {
        let mut session = Session::new(SessionSettings::default());
        let Effect::RequestExplanation { request, .. } = session.start_with_rule("rule") else {
            panic!("expected a request");
        };
        session.apply(Action::Submit);

        assert!(!session.receive_explanation(request, Ok("late".into())));
        assert_eq!(session.step(), &SessionStep::Practicing);
    }

    #[test]
    fn test_offline_goes_straight_to_practice() {
        let mut session = offline();
        assert_eq!(session.start_with_rule("cat"), Effect::None);
        assert_eq!(session.step(), &SessionStep::Practicing);
    }

    #[test]
    fn test_practice_round_trip() {
        let mut session = offline();
        session.start_with_rule("big red dog");

        // blank answers do nothing
        session.apply(Action::Submit);
        assert_eq!(session.step(), &SessionStep::Practicing);

        type_str(&mut session, "big green dog");
        session.apply(Action::Submit);
        assert_eq!(session.step(), &SessionStep::ReviewingResult);
        assert!(session.quote().is_some());
        let result = *session.practice().unwrap().result().unwrap();
        assert_eq!(result.correct_count, 2);

        // typing on the review screen is ignored
        session.apply(Action::Char('x'));
        assert_eq!(session.practice().unwrap().input(), "big green dog");

        session.apply(Action::Retry);
        assert_eq!(session.step(), &SessionStep::Practicing);
        assert_eq!(session.practice().unwrap().input(), "");
        assert!(session.practice().unwrap().result().is_none());
        assert!(session.quote().is_none());
    }

    #[test]
    fn test_hint_and_highlight_actions() {
        let mut session = offline();
        session.start_with_rule("cat sat");

        session.apply(Action::NextHint);
        assert_eq!(session.practice().unwrap().hint_level(), HintLevel::EveryOther);
        session.apply(Action::PrevHint);
        session.apply(Action::PrevHint);
        assert_eq!(session.practice().unwrap().hint_level(), HintLevel::Zen);

        session.apply(Action::ToggleHighlight);
        assert!(!session.practice().unwrap().highlight_errors());
    }

    #[test]
    fn test_backspace_edits_draft_and_answer() {
        let mut session = offline();
        type_str(&mut session, "cax");
        session.apply(Action::Backspace);
        assert_eq!(session.draft(), "ca");
        type_str(&mut session, "t");
        session.apply(Action::Submit);

        type_str(&mut session, "cb");
        session.apply(Action::Backspace);
        assert_eq!(session.practice().unwrap().input(), "c");
    }

    #[test]
    fn test_reset_from_anywhere() {
        let mut session = offline();
        session.start_with_rule("cat");
        type_str(&mut session, "cat");
        session.apply(Action::Submit);
        assert_eq!(session.step(), &SessionStep::ReviewingResult);

        session.apply(Action::Reset);
        assert_eq!(session.step(), &SessionStep::CollectingInput);
        assert!(session.practice().is_none());
        assert_eq!(session.draft(), "");
        assert!(session.error().is_none());
    }

    #[test]
    fn test_successful_submit_clears_error() {
        let mut session = offline();
        session.apply(Action::Submit);
        assert!(session.error().is_some());
        session.start_with_rule("x");
        assert!(session.error().is_none());
    }

    #[test]
    fn test_quit_from_any_step() {
        let mut session = offline();
        assert_eq!(session.apply(Action::Quit), Effect::Quit);
        session.start_with_rule("x");
        assert_eq!(session.apply(Action::Quit), Effect::Quit);
    }
}
