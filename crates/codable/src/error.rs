use std::fmt;

/// Keys walked from the root value to the value being coded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodingPath(Vec<String>);

impl CodingPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CodingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        write!(f, "{}", self.0.join("."))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodingError {
    pub path: CodingPath,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    KeyNotFound { key: String },
    TypeMismatch { expected: &'static str, actual: &'static str },
    OutOfRange { value: String, target_type: &'static str },
    UnknownVariant { value: String, valid_variants: Vec<String> },
    InvalidEnumShape { found: usize },
    Custom(String),
    Json(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::KeyNotFound { key } => write!(f, "no value associated with key '{key}'"),
            ErrorKind::TypeMismatch { expected, actual } => {
                write!(f, "type mismatch: expected {expected}, found {actual}")
            }
            ErrorKind::OutOfRange { value, target_type } => {
                write!(f, "value '{value}' is out of range for {target_type}")
            }
            ErrorKind::UnknownVariant { value, valid_variants } => write!(
                f,
                "unknown variant '{value}', expected one of: {}",
                valid_variants.join(", ")
            ),
            ErrorKind::InvalidEnumShape { found } => write!(
                f,
                "expected an object with exactly one variant key, found {found} keys"
            ),
            ErrorKind::Custom(msg) => write!(f, "{msg}"),
            ErrorKind::Json(msg) => write!(f, "json error: {msg}"),
        }
    }
}

impl fmt::Display for CodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error coding {}: {}", self.path, self.kind)
    }
}

impl std::error::Error for CodingError {}

impl CodingError {
    pub fn new(path: CodingPath, kind: ErrorKind) -> Self {
        Self { path, kind }
    }

    pub fn key_not_found(path: &CodingPath, key: &str) -> Self {
        Self::new(
            path.clone(),
            ErrorKind::KeyNotFound {
                key: key.to_string(),
            },
        )
    }

    pub fn type_mismatch(path: &CodingPath, expected: &'static str, actual: &'static str) -> Self {
        Self::new(path.clone(), ErrorKind::TypeMismatch { expected, actual })
    }

    pub fn out_of_range(path: &CodingPath, value: impl fmt::Display, target_type: &'static str) -> Self {
        Self::new(
            path.clone(),
            ErrorKind::OutOfRange {
                value: value.to_string(),
                target_type,
            },
        )
    }

    pub fn unknown_variant(path: &CodingPath, value: &str, valid_variants: &[&str]) -> Self {
        Self::new(
            path.clone(),
            ErrorKind::UnknownVariant {
                value: value.to_string(),
                valid_variants: valid_variants.iter().map(|v| v.to_string()).collect(),
            },
        )
    }

    pub fn invalid_enum_shape(path: &CodingPath, found: usize) -> Self {
        Self::new(path.clone(), ErrorKind::InvalidEnumShape { found })
    }

    pub fn custom(path: &CodingPath, msg: impl Into<String>) -> Self {
        Self::new(path.clone(), ErrorKind::Custom(msg.into()))
    }
}

impl From<serde_json::Error> for CodingError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(CodingPath::root(), ErrorKind::Json(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path_and_kind() {
        let path = CodingPath::root().child("owner").child("age");
        let err = CodingError::type_mismatch(&path, "integer", "string");
        assert_eq!(
            err.to_string(),
            "error coding owner.age: type mismatch: expected integer, found string"
        );
    }

    #[test]
    fn root_path_is_named() {
        let err = CodingError::key_not_found(&CodingPath::root(), "id");
        assert_eq!(
            err.to_string(),
            "error coding <root>: no value associated with key 'id'"
        );
    }
}
