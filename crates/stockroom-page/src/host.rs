//! Host capabilities
//!
//! Blocking dialogs and printing belong to whatever embeds the page. The
//! binder only reaches them through [`Host`].

use std::collections::VecDeque;

/// Capabilities the page borrows from its embedder
pub trait Host {
    /// Ask a blocking yes/no question (`window.confirm`)
    fn ask(&mut self, message: &str) -> bool;

    /// Open the print dialog (`window.print`); must not block
    fn print(&mut self);
}

/// Deterministic host for tests and headless runs
///
/// Answers come from a queue, then from the default answer. Every question
/// and print request is recorded.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHost {
    answers: VecDeque<bool>,
    default_answer: bool,
    questions: Vec<String>,
    print_requests: usize,
}

impl ScriptedHost {
    /// Host that declines every question unless answers are queued
    pub fn declining() -> Self {
        Self::default()
    }

    /// Host that accepts every question unless answers are queued
    pub fn accepting() -> Self {
        Self {
            default_answer: true,
            ..Self::default()
        }
    }

    /// Queue the answer for the next question
    pub fn enqueue_answer(&mut self, accepted: bool) {
        self.answers.push_back(accepted);
    }

    pub fn set_default_answer(&mut self, accepted: bool) {
        self.default_answer = accepted;
    }

    /// Questions asked so far, in order
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Drain recorded questions
    pub fn take_questions(&mut self) -> Vec<String> {
        std::mem::take(&mut self.questions)
    }

    pub fn print_requests(&self) -> usize {
        self.print_requests
    }
}

impl Host for ScriptedHost {
    fn ask(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        self.answers.pop_front().unwrap_or(self.default_answer)
    }

    fn print(&mut self) {
        self.print_requests += 1;
    }
}
