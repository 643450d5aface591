use crate::ui::cli::drivers::PromptDriver;
use anyhow::{Result, anyhow, bail};
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
enum Answer {
    Select(usize),
    Bool(bool),
    Integer(u64),
    Number(f64),
    Text(String),
    Default,
}

/// Replays a fixed list of answers in order; a prompt of the wrong kind is an error.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    answers: RefCell<VecDeque<Answer>>,
    f64_bounds: RefCell<Vec<(Option<f64>, Option<f64>)>>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, answer: Answer) -> Self {
        self.answers.borrow_mut().push_back(answer);
        self
    }

    pub fn select(self, index: usize) -> Self {
        self.push(Answer::Select(index))
    }

    pub fn boolean(self, value: bool) -> Self {
        self.push(Answer::Bool(value))
    }

    pub fn integer(self, value: u64) -> Self {
        self.push(Answer::Integer(value))
    }

    pub fn number(self, value: f64) -> Self {
        self.push(Answer::Number(value))
    }

    pub fn text(self, value: &str) -> Self {
        self.push(Answer::Text(value.to_string()))
    }

    /// Takes whatever default the next prompt offers.
    pub fn accept_default(self) -> Self {
        self.push(Answer::Default)
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.borrow().is_empty()
    }

    /// Bounds passed to every `ask_f64` call so far.
    pub fn f64_bounds(&self) -> Vec<(Option<f64>, Option<f64>)> {
        self.f64_bounds.borrow().clone()
    }

    fn next(&self, title: &str) -> Result<Answer> {
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer left for '{title}'"))
    }
}

impl PromptDriver for ScriptedDriver {
    fn ask_select(&self, title: &str, _help: &str, options: &[String]) -> Result<usize> {
        match self.next(title)? {
            Answer::Select(i) => Ok(i),
            Answer::Default if !options.is_empty() => Ok(0),
            other => bail!("'{title}' expected a selection, script has {other:?}"),
        }
    }

    fn ask_bool(&self, title: &str, _help: &str, default: bool) -> Result<bool> {
        match self.next(title)? {
            Answer::Bool(b) => Ok(b),
            Answer::Default => Ok(default),
            other => bail!("'{title}' expected a boolean, script has {other:?}"),
        }
    }

    fn ask_string(&self, title: &str, _help: &str, default: &str) -> Result<String> {
        match self.next(title)? {
            Answer::Text(s) => Ok(s),
            Answer::Default => Ok(default.to_string()),
            other => bail!("'{title}' expected text, script has {other:?}"),
        }
    }

    fn ask_u64(
        &self,
        title: &str,
        _help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        let value = match self.next(title)? {
            Answer::Integer(v) => v,
            Answer::Default => default,
            other => bail!("'{title}' expected an integer, script has {other:?}"),
        };
        if min.is_some_and(|m| value < m) || max.is_some_and(|m| value > m) {
            bail!("'{title}' answer {value} outside {min:?}..={max:?}");
        }
        Ok(value)
    }

    fn ask_f64(
        &self,
        title: &str,
        _help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        self.f64_bounds.borrow_mut().push((min, max));
        let value = match self.next(title)? {
            Answer::Number(v) => v,
            Answer::Default => default,
            other => bail!("'{title}' expected a number, script has {other:?}"),
        };
        if min.is_some_and(|m| value < m) || max.is_some_and(|m| value > m) {
            bail!("'{title}' answer {value} outside {min:?}..={max:?}");
        }
        Ok(value)
    }
}
