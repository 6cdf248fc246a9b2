use crate::cheese_battle::{ChoiceError, ChoiceProvider, DisplaySink};
use std::io::{BufRead, Write};
use tracing::debug;

/// Prompts on `output` and reads answers line by line from `input`,
/// asking again until the answer is acceptable.
pub struct ConsoleChoices<I: BufRead, O: Write> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> ConsoleChoices<I, O> {
    pub fn new(input: I, output: O) -> Self {
        ConsoleChoices { input, output }
    }

    fn ask(&mut self, prompt: &str) -> Result<String, ChoiceError> {
        // A broken stdout should not stop the game, only hide the prompt
        let _ = write!(self.output, "{}", prompt);
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => Err(ChoiceError::Closed),
            Ok(_) => Ok(line.trim().to_string()),
        }
    }

    fn complain(&mut self, message: &str) {
        let _ = writeln!(self.output, "{}", message);
    }
}

impl<I: BufRead, O: Write> ChoiceProvider for ConsoleChoices<I, O> {
    fn number(&mut self, prompt: &str, min: usize, max: usize) -> Result<usize, ChoiceError> {
        if min > max {
            return Err(ChoiceError::EmptyRange {
                prompt: prompt.to_string(),
                min,
                max,
            });
        }
        loop {
            let answer = self.ask(prompt)?;
            match answer.parse::<usize>() {
                Ok(n) if (min..=max).contains(&n) => return Ok(n),
                _ => {
                    debug!("Rejected {:?} for range {}..={}", answer, min, max);
                    self.complain(&format!("Please enter a number from {} to {}.", min, max));
                }
            }
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, ChoiceError> {
        loop {
            match self.ask(prompt)?.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.complain("Please answer y or n."),
            }
        }
    }

    fn text(
        &mut self,
        prompt: &str,
        min_len: usize,
        max_len: usize,
    ) -> Result<String, ChoiceError> {
        loop {
            let answer = self.ask(prompt)?;
            let len = answer.chars().count();
            if (min_len..=max_len).contains(&len) {
                return Ok(answer);
            }
            self.complain(&format!(
                "Please enter between {} and {} characters.",
                min_len, max_len
            ));
        }
    }

    fn pause(&mut self, prompt: &str) -> Result<(), ChoiceError> {
        self.ask(prompt).map(|_| ())
    }
}

/// Writes lines to a terminal, or nowhere when output is turned off.
pub struct ConsoleDisplay<O: Write> {
    output: O,
    enabled: bool,
}

impl<O: Write> ConsoleDisplay<O> {
    pub fn new(output: O, enabled: bool) -> Self {
        ConsoleDisplay { output, enabled }
    }
}

impl<O: Write> DisplaySink for ConsoleDisplay<O> {
    fn line(&mut self, text: &str) {
        if self.enabled {
            let _ = writeln!(self.output, "{}", text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> ConsoleChoices<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleChoices::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn written(choices: &ConsoleChoices<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(choices.output.clone()).unwrap()
    }

    #[test]
    fn test_number_reprompts_until_in_range() {
        let mut choices = console("abc\n9\n 3 \n");
        assert_eq!(choices.number("Pick [1-4]: ", 1, 4), Ok(3));
        let out = written(&choices);
        assert_eq!(out.matches("Pick [1-4]: ").count(), 3);
        assert!(out.contains("Please enter a number from 1 to 4."));
    }

    #[test]
    fn test_number_rejects_empty_range() {
        let mut choices = console("1\n");
        assert!(matches!(
            choices.number("Pick: ", 3, 2),
            Err(ChoiceError::EmptyRange { min: 3, max: 2, .. })
        ));
    }

    #[test]
    fn test_closed_input() {
        let mut choices = console("");
        assert_eq!(choices.number("Pick: ", 0, 1), Err(ChoiceError::Closed));
        assert_eq!(choices.confirm("Sure? "), Err(ChoiceError::Closed));
    }

    #[test]
    fn test_confirm() {
        let mut choices = console("maybe\nY\nno\n");
        assert_eq!(choices.confirm("Again? "), Ok(true));
        assert_eq!(choices.confirm("Again? "), Ok(false));
        assert!(written(&choices).contains("Please answer y or n."));
    }

    #[test]
    fn test_text_length_bounds() {
        let mut choices = console("\nthis name is far too long to fit\nAda\n");
        assert_eq!(choices.text("Name: ", 1, 20), Ok("Ada".to_string()));
        assert_eq!(
            written(&choices)
                .matches("Please enter between 1 and 20 characters.")
                .count(),
            2
        );
    }

    #[test]
    fn test_pause_accepts_anything() {
        let mut choices = console("whatever\n");
        assert_eq!(choices.pause("Press enter"), Ok(()));
    }

    #[test]
    fn test_display_can_be_silenced() {
        let mut loud = ConsoleDisplay::new(Vec::new(), true);
        loud.line("hello");
        assert_eq!(loud.output, b"hello\n".to_vec());

        let mut quiet = ConsoleDisplay::new(Vec::new(), false);
        quiet.line("hello");
        assert!(quiet.output.is_empty());
    }
}
