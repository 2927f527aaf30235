use std::collections::BTreeMap;
use std::marker::PhantomData;

use crate::error::{CodingError, CodingPath};
use crate::{CodingKey, Encodable, HelperCoder, Value};

/// Write side of a coding operation. Holds either a single value or the
/// entries of a keyed container.
#[derive(Debug, Default)]
pub struct Encoder {
    path: CodingPath,
    single: Option<Value>,
    keyed: Option<BTreeMap<String, Value>>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_path(path: CodingPath) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    pub fn encode<T: Encodable + ?Sized>(&mut self, value: &T) -> Result<(), CodingError> {
        value.encode(self)
    }

    /// Replace the encoded output with a single value.
    pub fn encode_value(&mut self, value: Value) {
        self.keyed = None;
        self.single = Some(value);
    }

    /// Keyed view of the output; repeated calls share the same entries.
    pub fn container<K: CodingKey>(&mut self) -> KeyedEncodingContainer<'_, K> {
        self.single = None;
        KeyedEncodingContainer {
            entries: self.keyed.get_or_insert_with(BTreeMap::new),
            path: self.path.clone(),
            _keys: PhantomData,
        }
    }

    pub fn into_value(self) -> Value {
        match (self.keyed, self.single) {
            (Some(entries), _) => Value::Object(entries),
            (None, Some(value)) => value,
            (None, None) => Value::Null,
        }
    }
}

#[derive(Debug)]
pub struct KeyedEncodingContainer<'a, K> {
    entries: &'a mut BTreeMap<String, Value>,
    path: CodingPath,
    _keys: PhantomData<K>,
}

impl<K: CodingKey> KeyedEncodingContainer<'_, K> {
    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    pub fn encode<T: Encodable + ?Sized>(&mut self, value: &T, key: K) -> Result<(), CodingError> {
        self.encode_nested(key, |encoder| value.encode(encoder))
    }

    pub fn encode_with<H: HelperCoder>(&mut self, value: &H::Coded, key: K) -> Result<(), CodingError> {
        self.encode_nested(key, |encoder| H::encode(value, encoder))
    }

    /// Run `body` against a fresh encoder and store its output under `key`.
    pub fn encode_nested<F>(&mut self, key: K, body: F) -> Result<(), CodingError>
    where
        F: FnOnce(&mut Encoder) -> Result<(), CodingError>,
    {
        let name = key.string_value();
        let mut encoder = Encoder::with_path(self.path.child(name));
        body(&mut encoder)?;
        self.entries.insert(name.to_string(), encoder.into_value());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum Keys {
        Inner,
        Count,
    }

    impl CodingKey for Keys {
        fn string_value(&self) -> &'static str {
            match self {
                Keys::Inner => "inner",
                Keys::Count => "count",
            }
        }
    }

    #[test]
    fn empty_encoder_yields_null() {
        assert_eq!(Encoder::new().into_value(), Value::Null);
    }

    #[test]
    fn container_collects_entries() {
        let mut encoder = Encoder::new();
        {
            let mut container = encoder.container::<Keys>();
            container.encode(&3i64, Keys::Count).unwrap();
        }
        {
            let mut container = encoder.container::<Keys>();
            container
                .encode_nested(Keys::Inner, |nested| {
                    nested.container::<Keys>();
                    Ok(())
                })
                .unwrap();
        }
        let value = encoder.into_value();
        assert_eq!(value.get("count"), Some(&Value::Int(3)));
        assert_eq!(value.get("inner"), Some(&Value::Object(BTreeMap::new())));
    }

    #[test]
    fn nested_errors_carry_the_key() {
        let mut encoder = Encoder::new();
        let mut container = encoder.container::<Keys>();
        let err = container
            .encode_nested(Keys::Inner, |nested| {
                Err(CodingError::custom(nested.coding_path(), "boom"))
            })
            .unwrap_err();
        assert_eq!(err.path.segments(), ["inner".to_string()]);
    }
}
