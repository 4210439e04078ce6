use std::io::{self, BufRead, Write};

use super::{GeneratorError, Result};

/// Source of answers for inputs that were not passed on the command line
pub trait Prompt {
    /// Free-form question; an empty answer takes `default`
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String>;

    /// Pick one of `choices` by name or by index; an empty answer takes
    /// `choices[default]`
    fn choice(&mut self, question: &str, choices: &[&str], default: usize) -> Result<String>;
}

/// Asks on a writer and reads line answers from a reader
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self) -> Result<String> {
        self.output.flush().map_err(GeneratorError::Prompt)?;
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(GeneratorError::Prompt)?;
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompt for ConsolePrompt<R, W> {
    fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        let written = match default {
            Some(default) => write!(self.output, " {} [{}]:\n > ", question, default),
            None => write!(self.output, " {}:\n > ", question),
        };
        written.map_err(GeneratorError::Prompt)?;

        let answer = self.read_answer()?;
        if !answer.is_empty() {
            return Ok(answer);
        }
        default
            .map(str::to_string)
            .ok_or(GeneratorError::MissingInput("answer"))
    }

    fn choice(&mut self, question: &str, choices: &[&str], default: usize) -> Result<String> {
        let fallback = choices.get(default).copied().unwrap_or_default();
        let mut text = format!(" {} [{}]:\n", question, fallback);
        for (index, choice) in choices.iter().enumerate() {
            text.push_str(&format!("  [{}] {}\n", index, choice));
        }
        text.push_str(" > ");
        self.output
            .write_all(text.as_bytes())
            .map_err(GeneratorError::Prompt)?;

        let answer = self.read_answer()?;
        if answer.is_empty() {
            return Ok(fallback.to_string());
        }
        if let Some(choice) = answer
            .parse::<usize>()
            .ok()
            .and_then(|index| choices.get(index))
        {
            return Ok(choice.to_string());
        }
        Ok(answer)
    }
}

/// Never asks: takes defaults, fails where there is none
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractive;

impl Prompt for NonInteractive {
    fn ask(&mut self, _question: &str, default: Option<&str>) -> Result<String> {
        default
            .map(str::to_string)
            .ok_or(GeneratorError::MissingInput("answer"))
    }

    fn choice(&mut self, _question: &str, choices: &[&str], default: usize) -> Result<String> {
        choices
            .get(default)
            .map(|choice| choice.to_string())
            .ok_or(GeneratorError::MissingInput("choice"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(answers: &str) -> ConsolePrompt<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePrompt::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_reads_trimmed_line() {
        let mut p = prompt("  index \n");
        assert_eq!(p.ask("Operation", None).unwrap(), "index");
        assert!(String::from_utf8(p.output).unwrap().contains("Operation"));
    }

    #[test]
    fn test_ask_empty_answer_takes_default() {
        let mut p = prompt("\n");
        assert_eq!(p.ask("Version", Some("1")).unwrap(), "1");
    }

    #[test]
    fn test_ask_empty_answer_without_default_fails() {
        let mut p = prompt("");
        assert!(matches!(
            p.ask("Operation", None),
            Err(GeneratorError::MissingInput(_))
        ));
    }

    #[test]
    fn test_choice_by_index_name_or_default() {
        let choices = ["private", "public"];
        assert_eq!(prompt("1\n").choice("Type", &choices, 0).unwrap(), "public");
        assert_eq!(prompt("public\n").choice("Type", &choices, 0).unwrap(), "public");
        assert_eq!(prompt("\n").choice("Type", &choices, 0).unwrap(), "private");
    }

    #[test]
    fn test_non_interactive() {
        let mut p = NonInteractive;
        assert_eq!(p.ask("Version", Some("1")).unwrap(), "1");
        assert!(p.ask("Operation", None).is_err());
        assert_eq!(p.choice("Type", &["private", "public"], 0).unwrap(), "private");
    }
}
