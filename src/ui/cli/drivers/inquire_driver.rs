use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use inquire::{Confirm, CustomType, Select, Text, validator::Validation};
use std::fmt::Display;

pub struct InquireDriver;

fn range_message<T: Display>(min: Option<T>, max: Option<T>) -> Option<String> {
    match (min, max) {
        (Some(lo), Some(hi)) => Some(format!("Must be between {lo} and {hi}")),
        (Some(lo), None) => Some(format!("Must be ≥ {lo}")),
        (None, Some(hi)) => Some(format!("Must be ≤ {hi}")),
        (None, None) => None,
    }
}

fn within<T: PartialOrd>(x: &T, min: &Option<T>, max: &Option<T>) -> bool {
    min.as_ref().is_none_or(|lo| x >= lo) && max.as_ref().is_none_or(|hi| x <= hi)
}

impl PromptDriver for InquireDriver {
    fn ask_select(&self, title: &str, help: &str, options: &[String]) -> Result<usize> {
        let answer = Select::new(title, options.to_vec())
            .with_help_message(help)
            .raw_prompt()?;
        Ok(answer.index)
    }

    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        let mut q = CustomType::<u64>::new(title)
            .with_default(default)
            .with_help_message(help);

        if let Some(msg) = range_message(min, max) {
            q = q.with_validator(move |x: &u64| {
                if within(x, &min, &max) {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid(msg.clone().into()))
                }
            });
        }

        Ok(q.prompt()?)
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        let mut q = CustomType::<f64>::new(title)
            .with_default(default)
            .with_help_message(help);

        if let Some(msg) = range_message(min, max) {
            q = q.with_validator(move |x: &f64| {
                if x.is_finite() && within(x, &min, &max) {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid(msg.clone().into()))
                }
            });
        }

        Ok(q.prompt()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_messages() {
        assert_eq!(
            range_message(Some(0.0), Some(28.11)).as_deref(),
            Some("Must be between 0 and 28.11")
        );
        assert_eq!(range_message(Some(1u64), None).as_deref(), Some("Must be ≥ 1"));
        assert_eq!(range_message::<u64>(None, None), None);
    }

    #[test]
    fn within_bounds_is_inclusive() {
        assert!(within(&0.0, &Some(0.0), &Some(1.0)));
        assert!(within(&1.0, &Some(0.0), &Some(1.0)));
        assert!(!within(&1.5, &Some(0.0), &Some(1.0)));
        assert!(within(&7u64, &None, &None));
    }
}
