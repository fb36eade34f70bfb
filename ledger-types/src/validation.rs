//! Validation of transaction payloads.
//!
//! Incoming JSON is checked field by field so that every problem in a body is
//! reported at once, keyed by the offending field. The same content rules are
//! applied to typed requests through `validated()`, for callers that never
//! touch JSON.

use serde_json::{Map, Value};

use crate::dto::{CreateTransactionRequest, UpdateTransactionRequest};
use crate::error::ValidationErrors;

/// Maximum number of characters in a transaction's text.
pub const TEXT_MAX_CHARS: usize = 255;

pub const REQUIRED: &str = "This field is required.";
pub const NULL: &str = "This field may not be null.";
pub const BLANK: &str = "This field may not be blank.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const NOT_A_NUMBER: &str = "A valid number is required.";
pub const TOO_LONG: &str = "Ensure this field has no more than 255 characters.";
pub const NULL_CHARACTERS: &str = "Null characters are not allowed.";

/// Key used for errors that concern the body as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const TEXT: &str = "text";
const AMOUNT: &str = "amount";

/// Trims `text` and checks it is non-blank, short enough and free of NUL.
pub fn clean_text(text: &str) -> Result<String, &'static str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(BLANK);
    }
    // PostgreSQL text columns cannot hold NUL.
    if trimmed.contains('\0') {
        return Err(NULL_CHARACTERS);
    }
    if trimmed.chars().count() > TEXT_MAX_CHARS {
        return Err(TOO_LONG);
    }
    Ok(trimmed.to_string())
}

/// Checks `amount` is a finite number.
pub fn clean_amount(amount: f64) -> Result<f64, &'static str> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(NOT_A_NUMBER)
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    body.as_object().ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.add(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_kind(body)
            ),
        );
        errors
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn read_text(
    body: &Map<String, Value>,
    required: bool,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let result = match body.get(TEXT) {
        None if required => Err(REQUIRED),
        None => return None,
        Some(Value::Null) => Err(NULL),
        Some(Value::String(s)) => clean_text(s),
        Some(_) => Err(NOT_A_STRING),
    };

    result.map_err(|message| errors.add(TEXT, message)).ok()
}

fn read_amount(
    body: &Map<String, Value>,
    required: bool,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let result = match body.get(AMOUNT) {
        None if required => Err(REQUIRED),
        None => return None,
        Some(Value::Null) => Err(NULL),
        Some(Value::Number(n)) => n.as_f64().ok_or(NOT_A_NUMBER).and_then(clean_amount),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| NOT_A_NUMBER)
            .and_then(clean_amount),
        Some(_) => Err(NOT_A_NUMBER),
    };

    result.map_err(|message| errors.add(AMOUNT, message)).ok()
}

impl CreateTransactionRequest {
    /// Parses and validates a create payload.
    ///
    /// Both `text` and `amount` are required. Read-only and unknown fields
    /// are ignored.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let body = as_object(body)?;
        let mut errors = ValidationErrors::new();

        let text = read_text(body, true, &mut errors);
        let amount = read_amount(body, true, &mut errors);

        match (text, amount) {
            (Some(text), Some(amount)) if errors.is_empty() => Ok(Self { text, amount }),
            _ => Err(errors),
        }
    }

    /// Applies the content rules, returning the request with its text trimmed.
    pub fn validated(self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let text = clean_text(&self.text).map_err(|m| errors.add(TEXT, m)).ok();
        let amount = clean_amount(self.amount)
            .map_err(|m| errors.add(AMOUNT, m))
            .ok();

        match (text, amount) {
            (Some(text), Some(amount)) => Ok(Self { text, amount }),
            _ => Err(errors),
        }
    }
}

impl UpdateTransactionRequest {
    /// Parses and validates an update payload.
    ///
    /// Every field is optional, but a field that is present must be valid.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let body = as_object(body)?;
        let mut errors = ValidationErrors::new();

        let text = read_text(body, false, &mut errors);
        let amount = read_amount(body, false, &mut errors);

        errors.into_result()?;
        Ok(Self { text, amount })
    }

    /// Applies the content rules to whichever fields are set.
    pub fn validated(self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let text = match self.text {
            Some(text) => clean_text(&text).map_err(|m| errors.add(TEXT, m)).ok(),
            None => None,
        };
        let amount = match self.amount {
            Some(amount) => clean_amount(amount).map_err(|m| errors.add(AMOUNT, m)).ok(),
            None => None,
        };

        errors.into_result()?;
        Ok(Self { text, amount })
    }
}
