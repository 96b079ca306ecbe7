//! Shape checks for the status API response.

use serde_json::Value;

use crate::{errors::Error, Result};

pub const HOMEWORKS: &str = "homeworks";
pub const CURRENT_DATE: &str = "current_date";

/// Return the `homeworks` array of a response, in API order.
///
/// The response must be an object carrying both `homeworks` and `current_date`,
/// and `homeworks` must be an array (possibly empty).
pub fn extract_homeworks(response: &Value) -> Result<&[Value]> {
    let Some(obj) = response.as_object() else {
        return Err(Error::WrongType("не является словарем".to_string()));
    };
    let homeworks = obj.get(HOMEWORKS).ok_or(Error::MissingKey(HOMEWORKS))?;
    if !obj.contains_key(CURRENT_DATE) {
        return Err(Error::MissingKey(CURRENT_DATE));
    }
    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::WrongType(format!("\"{HOMEWORKS}\" не является списком")))
}

/// Server-reported time of the response, if it is a usable timestamp.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get(CURRENT_DATE).and_then(Value::as_i64)
}
