use anyhow::{Context, Result};
use serde_json::{Map, Value};
use strum::{EnumMessage, IntoEnumIterator};

use crate::core::FeatureVector;
use crate::presentation::SliderSpec;
use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::choices::{FieldKind, FieldSpec, UIChoice, specs_for_kind};

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

fn kind_label<K>(kind: K) -> String
where
    K: Copy + Into<&'static str> + EnumMessage,
{
    let label = kind.get_message().unwrap_or_else(|| kind.into());
    match kind.get_detailed_message() {
        Some(desc) if !desc.is_empty() => format!("{label}  {DIM_ITALIC}{desc}{RESET}"),
        _ => label.to_string(),
    }
}

/// Lets the user pick a variant of `C`, then prompts each of its params.
pub fn prompt_choice<C: UIChoice, D: PromptDriver>(driver: &D) -> Result<C> {
    let kinds: Vec<C::Kind> = C::Kind::iter().collect();
    let labels: Vec<String> = kinds.iter().map(|k| kind_label(*k)).collect();

    let index = driver.ask_select(C::prompt_label(), C::prompt_help().unwrap_or(""), &labels)?;
    let choice_kind = *kinds
        .get(index)
        .with_context(|| format!("selection {index} out of range"))?;

    let key: &'static str = choice_kind.into();
    let specs = specs_for_kind(&C::schema(), key)?;
    let defaults = C::default_params(choice_kind);

    let mut params = Map::new();
    for s in specs {
        let init = s.default.clone().or_else(|| defaults.get(&s.name).cloned());
        if let Some(val) = prompt_field(driver, &s, init)? {
            params.insert(s.name.clone(), val);
        }
    }
    C::from_parts(choice_kind, Value::Object(params))
}

/// Prompts one field; `None` means an optional field left blank.
fn prompt_field<D: PromptDriver>(
    driver: &D,
    s: &FieldSpec,
    init: Option<Value>,
) -> Result<Option<Value>> {
    let help = s.description.as_deref().unwrap_or("");
    let optional = !s.required && matches!(init, None | Some(Value::Null));

    if optional && s.kind != FieldKind::Boolean {
        let def_txt = match (&init, s.kind) {
            (Some(Value::Number(n)), _) => n.to_string(),
            (Some(Value::String(t)), _) => t.clone(),
            _ => String::new(),
        };
        let answer = driver.ask_string(&s.title, &format!("{help}\n(leave blank for none)"), &def_txt)?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        let value = match s.kind {
            FieldKind::Integer => Value::from(
                answer
                    .parse::<u64>()
                    .with_context(|| format!("invalid integer for {}", s.title))?,
            ),
            FieldKind::Number => Value::from(
                answer
                    .parse::<f64>()
                    .with_context(|| format!("invalid number for {}", s.title))?,
            ),
            _ => Value::String(answer.to_string()),
        };
        return Ok(Some(value));
    }

    let value = match s.kind {
        FieldKind::Boolean => {
            let def = init.and_then(|v| v.as_bool()).unwrap_or(false);
            Value::Bool(driver.ask_bool(&s.title, help, def)?)
        }
        FieldKind::String => {
            let def = init
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            Value::String(driver.ask_string(&s.title, help, &def)?)
        }
        FieldKind::Integer => {
            let def = init.and_then(|v| v.as_u64()).unwrap_or(0);
            Value::from(driver.ask_u64(
                &s.title,
                help,
                def,
                s.min.map(|x| x as u64),
                s.max.map(|x| x as u64),
            )?)
        }
        FieldKind::Number => {
            let def = init.and_then(|v| v.as_f64()).unwrap_or(0.0);
            Value::from(driver.ask_f64(&s.title, help, def, s.min, s.max)?)
        }
    };
    Ok(Some(value))
}

/// One bounded numeric prompt per feature, starting at the reference mean.
pub fn prompt_feature_vector<D: PromptDriver>(
    driver: &D,
    sliders: &[SliderSpec],
) -> Result<FeatureVector> {
    let mut vector = FeatureVector::new();
    for s in sliders {
        let help = format!("{}: {} to {}", s.feature, s.min, s.max);
        let value = driver
            .ask_f64(&s.label, &help, s.default, Some(s.min), Some(s.max))
            .with_context(|| format!("no value for {}", s.feature))?;
        vector.insert(s.feature.clone(), value);
    }
    Ok(vector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedDriver;
    use crate::ui::types::choices::{DiagnoseParams, SummarizeParams, TaskChoice};

    #[test]
    fn picks_kind_and_fills_params() {
        let driver = ScriptedDriver::new()
            .select(0)
            .boolean(false)
            .integer(4)
            .text("out/assessment.json");
        let choice: TaskChoice = prompt_choice(&driver).unwrap();
        assert_eq!(
            choice,
            TaskChoice::Diagnose(DiagnoseParams {
                show_chart: false,
                decimals: 4,
                export_path: Some("out/assessment.json".into()),
            })
        );
        assert!(driver.is_exhausted());
    }

    #[test]
    fn blank_optional_field_is_omitted() {
        let driver = ScriptedDriver::new().select(0).boolean(true).integer(2).text("  ");
        let choice: TaskChoice = prompt_choice(&driver).unwrap();
        match choice {
            TaskChoice::Diagnose(p) => assert_eq!(p.export_path, None),
            other => panic!("unexpected choice {other:?}"),
        }
    }

    #[test]
    fn second_kind_prompts_only_its_fields() {
        let driver = ScriptedDriver::new().select(1).integer(6);
        let choice: TaskChoice = prompt_choice(&driver).unwrap();
        assert_eq!(choice, TaskChoice::Summarize(SummarizeParams { decimals: 6 }));
        assert!(driver.is_exhausted());
    }

    #[test]
    fn out_of_range_selection_is_an_error() {
        let driver = ScriptedDriver::new().select(9);
        assert!(prompt_choice::<TaskChoice, _>(&driver).is_err());
    }

    #[test]
    fn feature_prompts_use_slider_bounds() {
        let sliders = vec![
            SliderSpec {
                feature: "radius_mean".into(),
                label: "Radius (mean)".into(),
                min: 0.0,
                max: 28.11,
                default: 14.1,
            },
            SliderSpec {
                feature: "texture_mean".into(),
                label: "Texture (mean)".into(),
                min: 0.0,
                max: 39.28,
                default: 19.3,
            },
        ];
        let driver = ScriptedDriver::new().number(17.5).accept_default();
        let v = prompt_feature_vector(&driver, &sliders).unwrap();
        assert_eq!(v.get("radius_mean"), Some(17.5));
        assert_eq!(v.get("texture_mean"), Some(19.3));
        assert_eq!(
            driver.f64_bounds(),
            vec![(Some(0.0), Some(28.11)), (Some(0.0), Some(39.28))]
        );
    }
}
