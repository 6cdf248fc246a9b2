use crate::cheese_battle::output::DisplaySink;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ChoiceError {
    #[error("Input stream closed before a valid answer was given")]
    Closed,
    #[error("Empty range {min}..={max} offered for {prompt:?}")]
    EmptyRange {
        prompt: String,
        min: usize,
        max: usize,
    },
}

/// Blocking source of validated answers from a human player.
///
/// Implementations keep asking until the answer is valid; they only fail when
/// no answer can ever arrive.
pub trait ChoiceProvider {
    /// A whole number in `min..=max`.
    fn number(&mut self, prompt: &str, min: usize, max: usize) -> Result<usize, ChoiceError>;

    fn confirm(&mut self, prompt: &str) -> Result<bool, ChoiceError>;

    /// Free text whose trimmed length is within `min_len..=max_len`.
    fn text(&mut self, prompt: &str, min_len: usize, max_len: usize)
        -> Result<String, ChoiceError>;

    /// Block until the player acknowledges.
    fn pause(&mut self, prompt: &str) -> Result<(), ChoiceError>;
}

/// The two collaborators a running game talks to.
pub struct Io<'a> {
    pub choices: &'a mut dyn ChoiceProvider,
    pub display: &'a mut dyn DisplaySink,
}

impl<'a> Io<'a> {
    pub fn new(choices: &'a mut dyn ChoiceProvider, display: &'a mut dyn DisplaySink) -> Self {
        Io { choices, display }
    }

    pub fn say(&mut self, line: impl AsRef<str>) {
        self.display.line(line.as_ref());
    }

    /// Print a numbered menu and return the 0-based index picked.
    pub fn pick(&mut self, prompt: &str, options: &[String]) -> Result<usize, ChoiceError> {
        for (i, option) in options.iter().enumerate() {
            self.say(format!("{}) {}", i + 1, option));
        }
        let prompt = format!("{} [1-{}]: ", prompt, options.len());
        Ok(self.choices.number(&prompt, 1, options.len())? - 1)
    }
}
