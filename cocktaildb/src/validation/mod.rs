use crate::error::{CocktailDbError, Result};
use crate::schema::Record;
use serde_json::Value;

/// Result of validating a creation payload
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Check a cocktail creation payload: non-empty `name`, `category` and
/// `instructions`, and an `ingredients` array (possibly empty) of
/// `{ name, quantity }` objects.
pub fn validate_cocktail(data: &Value) -> ValidationResult {
    let mut result = ValidationResult::default();

    let map = match data.as_object() {
        Some(m) => m,
        None => {
            result.errors.push("Cocktail must be a JSON object".into());
            return result;
        }
    };

    for field in ["name", "category", "instructions"] {
        check_non_empty_string(map.get(field), field, &mut result);
    }

    match map.get("ingredients") {
        None | Some(Value::Null) => result
            .errors
            .push("Required field 'ingredients' is missing".into()),
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                let entry = match item.as_object() {
                    Some(e) => e,
                    None => {
                        result
                            .errors
                            .push(format!("ingredients[{i}] must be an object"));
                        continue;
                    }
                };
                for field in ["name", "quantity"] {
                    if !matches!(entry.get(field), Some(Value::String(_))) {
                        result
                            .errors
                            .push(format!("ingredients[{i}].{field} must be a string"));
                    }
                }
            }
        }
        Some(other) => result.errors.push(format!(
            "Field 'ingredients' must be a list, got {}",
            type_name(other)
        )),
    }

    check_client_id(data, &mut result);
    result
}

/// Check an ingredient creation payload: non-empty `name` and `description`
/// (legacy spelling `desc` is accepted), and `is_alcoholic` as a real boolean.
pub fn validate_ingredient(data: &Value) -> ValidationResult {
    let mut result = ValidationResult::default();

    let map = match data.as_object() {
        Some(m) => m,
        None => {
            result.errors.push("Ingredient must be a JSON object".into());
            return result;
        }
    };

    check_non_empty_string(map.get("name"), "name", &mut result);

    let description = map.get("description").or_else(|| map.get("desc"));
    check_non_empty_string(description, "description", &mut result);

    match map.get("is_alcoholic") {
        Some(Value::Bool(_)) => {}
        None | Some(Value::Null) => result
            .errors
            .push("Required field 'is_alcoholic' is missing".into()),
        Some(other) => result.errors.push(format!(
            "Field 'is_alcoholic' must be a boolean, got {}",
            type_name(other)
        )),
    }

    check_client_id(data, &mut result);
    result
}

/// Validate a raw creation payload and convert it into the kind's typed
/// creation struct. Warnings are logged; errors reject the payload.
pub fn validate_and_prepare<K: Record>(data: &Value) -> Result<K::New> {
    let result = K::validate(data);

    for warning in &result.warnings {
        log::warn!("{}: {}", K::KIND, warning);
    }

    if !result.is_ok() {
        return Err(CocktailDbError::Validation(result.errors.join("; ")));
    }

    serde_json::from_value(data.clone())
        .map_err(|e| CocktailDbError::Validation(e.to_string()))
}

/// Convert a raw partial record into the kind's patch struct. Presence of
/// fields is not checked, only that the fields given have usable types.
pub fn prepare_patch<K: Record>(data: &Value) -> Result<K::Patch> {
    if !data.is_object() {
        return Err(CocktailDbError::Validation(format!(
            "{} update must be a JSON object",
            K::KIND
        )));
    }
    serde_json::from_value(data.clone())
        .map_err(|e| CocktailDbError::Validation(e.to_string()))
}

fn check_non_empty_string(value: Option<&Value>, field: &str, result: &mut ValidationResult) {
    match value {
        None | Some(Value::Null) => result
            .errors
            .push(format!("Required field '{field}' is missing")),
        Some(Value::String(s)) if s.is_empty() => result
            .errors
            .push(format!("Required field '{field}' is empty")),
        Some(Value::String(_)) => {}
        Some(other) => result.errors.push(format!(
            "Field '{field}' must be a string, got {}",
            type_name(other)
        )),
    }
}

fn check_client_id(data: &Value, result: &mut ValidationResult) {
    if data.get("id").is_some() {
        result
            .warnings
            .push("Field 'id' is assigned by the store; the supplied value is ignored".into());
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
