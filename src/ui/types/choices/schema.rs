use anyhow::{Context, Result, anyhow};
use schemars::Schema;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

/// One promptable field of a choice's `params` object.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Field specs of the `params` object for the variant tagged `kind_key`.
///
/// Variants without params (or with an empty params object) yield no fields.
/// Fields whose type cannot be prompted for are skipped.
pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;
    let branch = find_branch(root_obj, kind_key)?
        .ok_or_else(|| anyhow!("no branch found for type={kind_key}"))?;

    let Some(params) = branch
        .get("params")
        .and_then(Value::as_object)
        .and_then(|p| resolve_ref_obj(root_obj, p))
    else {
        return Ok(vec![]);
    };
    let Some(props) = params.get("properties").and_then(Value::as_object) else {
        return Ok(vec![]);
    };

    let required: Vec<&str> = params
        .get("required")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut out = Vec::with_capacity(props.len());
    for (name, field_schema) in props {
        let mut field = field_schema
            .as_object()
            .with_context(|| format!("field schema for '{name}' is not an object"))?;
        if field.contains_key("$ref") {
            field = resolve_ref_obj(root_obj, field)
                .ok_or_else(|| anyhow!("failed to resolve field $ref for '{name}'"))?;
        }
        if let Some(spec) = field_spec(name, field, required.contains(&name.as_str())) {
            out.push(spec);
        }
    }
    Ok(out)
}

/// Properties of the `oneOf`/`anyOf` branch whose `type` discriminant is `kind_key`.
fn find_branch<'a>(
    root_obj: &'a Map<String, Value>,
    kind_key: &str,
) -> Result<Option<&'a Map<String, Value>>> {
    let alts = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(Value::as_array)
        .context("missing oneOf/anyOf")?;

    for branch in alts {
        let obj = branch.as_object().context("branch is not object")?;
        let Some(props) = obj.get("properties").and_then(Value::as_object) else {
            continue;
        };
        if discriminant_matches(props, kind_key) {
            return Ok(Some(props));
        }
    }
    Ok(None)
}

fn field_spec(name: &str, field: &Map<String, Value>, required: bool) -> Option<FieldSpec> {
    let kind = detect_field_kind(field.get("type"))?;
    let number = |keys: [&str; 2]| keys.iter().find_map(|k| field.get(*k)).and_then(Value::as_f64);

    Some(FieldSpec {
        name: name.to_string(),
        title: field
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(name)
            .to_string(),
        description: field
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        required,
        kind,
        default: field.get("default").cloned(),
        min: number(["minimum", "exclusiveMinimum"]),
        max: number(["maximum", "exclusiveMaximum"]),
    })
}

fn discriminant_matches(props: &Map<String, Value>, kind_key: &str) -> bool {
    let Some(tag) = props.get("type").and_then(Value::as_object) else {
        return false;
    };
    if tag.get("const").and_then(Value::as_str) == Some(kind_key) {
        return true;
    }
    matches!(
        tag.get("enum").and_then(Value::as_array).map(Vec::as_slice),
        Some([only]) if only.as_str() == Some(kind_key)
    )
}

/// Resolve a local $ref like "#/$defs/DiagnoseParams" against the root object.
/// Objects without a $ref resolve to themselves.
fn resolve_ref_obj<'a>(
    root_obj: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    let Some(reference) = obj.get("$ref") else {
        return Some(obj);
    };
    let path = reference.as_str()?.strip_prefix("#/")?;
    path.split('/').try_fold(root_obj, |cur, raw_seg| {
        // JSON Pointer unescape (~1 => /, ~0 => ~)
        let seg = raw_seg.replace("~1", "/").replace("~0", "~");
        cur.get(&seg)?.as_object()
    })
}

fn kind_of(name: &str) -> Option<FieldKind> {
    match name {
        "string" => Some(FieldKind::String),
        "integer" => Some(FieldKind::Integer),
        "number" => Some(FieldKind::Number),
        "boolean" => Some(FieldKind::Boolean),
        _ => None,
    }
}

fn detect_field_kind(ty: Option<&Value>) -> Option<FieldKind> {
    match ty? {
        Value::String(s) => kind_of(s),
        // unions like ["integer", "null"] come from Option<T>
        Value::Array(arr) => arr.iter().filter_map(Value::as_str).find_map(kind_of),
        _ => None,
    }
}
