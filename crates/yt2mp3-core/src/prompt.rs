use crate::{Yt2Mp3Error, Yt2Mp3Result};

/// Line-oriented operator input.
pub trait Prompt {
    fn ask(&mut self, label: &str) -> Yt2Mp3Result<String>;

    /// Ask with `default` pre-filled as editable text.
    fn ask_with_default(&mut self, label: &str, default: &str) -> Yt2Mp3Result<String>;
}

/// `[Y/n]` answers: only an explicit "n" declines.
pub fn is_rejection(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("n")
}

/// Trimmed `value`, or `InvalidInput` when nothing is left.
pub fn require_non_empty(value: &str) -> Yt2Mp3Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Yt2Mp3Error::InvalidInput(
            "Input cannot be empty. Please try again.".to_string(),
        ));
    }
    Ok(value.to_string())
}

/// Asks until a non-blank answer arrives.
pub fn ask_non_empty<P: Prompt + ?Sized>(prompt: &mut P, label: &str) -> Yt2Mp3Result<String> {
    loop {
        match require_non_empty(&prompt.ask(label)?) {
            Err(Yt2Mp3Error::InvalidInput(msg)) => eprintln!("{msg}"),
            result => return result,
        }
    }
}

#[cfg(any(test, feature = "testing"))]
pub use scripted::ScriptedPrompt;

#[cfg(any(test, feature = "testing"))]
mod scripted {
    use std::collections::VecDeque;

    use super::Prompt;
    use crate::{Yt2Mp3Error, Yt2Mp3Result};

    /// Replays canned answers and records every label it was asked, plus
    /// the pre-filled text of each `ask_with_default` call.
    #[derive(Debug, Default)]
    pub struct ScriptedPrompt {
        answers: VecDeque<String>,
        pub asked: Vec<String>,
        pub defaults: Vec<(String, String)>,
    }

    impl ScriptedPrompt {
        pub fn new<I, S>(answers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                answers: answers.into_iter().map(Into::into).collect(),
                asked: Vec::new(),
                defaults: Vec::new(),
            }
        }

        pub fn remaining(&self) -> usize {
            self.answers.len()
        }

        fn next(&mut self, label: &str) -> Yt2Mp3Result<String> {
            self.asked.push(label.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| Yt2Mp3Error::Prompt(format!("no scripted answer for '{label}'")))
        }
    }

    impl Prompt for ScriptedPrompt {
        fn ask(&mut self, label: &str) -> Yt2Mp3Result<String> {
            self.next(label)
        }

        fn ask_with_default(&mut self, label: &str, default: &str) -> Yt2Mp3Result<String> {
            self.defaults.push((label.to_string(), default.to_string()));
            self.next(label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_n_rejects() {
        assert!(is_rejection("n"));
        assert!(is_rejection(" N "));
        assert!(!is_rejection(""));
        assert!(!is_rejection("y"));
        assert!(!is_rejection("no"));
        assert!(!is_rejection("nope"));
    }

    #[test]
    fn ask_non_empty_skips_blank_answers() {
        let mut prompt = ScriptedPrompt::new(["", "   ", " https://youtu.be/abc "]);
        let value = ask_non_empty(&mut prompt, "link").unwrap();
        assert_eq!(value, "https://youtu.be/abc");
        assert_eq!(prompt.asked.len(), 3);
    }

    #[test]
    fn require_non_empty_rejects_whitespace() {
        assert!(matches!(require_non_empty(" \t "), Err(Yt2Mp3Error::InvalidInput(_))));
        assert_eq!(require_non_empty("  /music ").unwrap(), "/music");
    }

    #[test]
    fn scripted_prompt_errors_when_exhausted() {
        let mut prompt = ScriptedPrompt::new(Vec::<String>::new());
        assert!(matches!(prompt.ask("x"), Err(Yt2Mp3Error::Prompt(_))));
    }
}
