//! JSON text bridge over `serde_json`.

use crate::{from_value, to_value, CodingError, Decodable, Encodable, Value};

pub fn to_string<T: Encodable + ?Sized>(value: &T) -> Result<String, CodingError> {
    let json: serde_json::Value = to_value(value)?.into();
    Ok(serde_json::to_string(&json)?)
}

pub fn to_string_pretty<T: Encodable + ?Sized>(value: &T) -> Result<String, CodingError> {
    let json: serde_json::Value = to_value(value)?.into();
    Ok(serde_json::to_string_pretty(&json)?)
}

pub fn from_str<T: Decodable>(text: &str) -> Result<T, CodingError> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    from_value(&Value::from(json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_text_is_a_json_error() {
        let err = from_str::<i64>("{").unwrap_err();
        assert!(matches!(err.kind, crate::ErrorKind::Json(_)));
    }

    #[test]
    fn scalars_round_trip_through_text() {
        assert_eq!(to_string(&vec![1i32, 2]).unwrap(), "[1,2]");
        assert_eq!(from_str::<Vec<i32>>("[1,2]").unwrap(), vec![1, 2]);
    }
}
