use std::collections::BTreeMap;
use std::marker::PhantomData;

use crate::error::{CodingError, CodingPath};
use crate::{CodingKey, Decodable, HelperCoder, Value};

/// Read side of a coding operation, positioned on one value of the tree.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    value: &'a Value,
    path: CodingPath,
}

impl<'a> Decoder<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self::with_path(value, CodingPath::root())
    }

    pub(crate) fn with_path(value: &'a Value, path: CodingPath) -> Self {
        Self { value, path }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    pub fn decode<T: Decodable>(&self) -> Result<T, CodingError> {
        T::decode(self)
    }

    /// Error for a value whose shape does not match `expected`.
    pub fn mismatch(&self, expected: &'static str) -> CodingError {
        CodingError::type_mismatch(&self.path, expected, self.value.kind_name())
    }

    /// View the current value as an object addressed by `K`.
    pub fn container<K: CodingKey>(&self) -> Result<KeyedDecodingContainer<'a, K>, CodingError> {
        match self.value {
            Value::Object(entries) => Ok(KeyedDecodingContainer {
                entries,
                path: self.path.clone(),
                _keys: PhantomData,
            }),
            _ => Err(self.mismatch("object")),
        }
    }
}

/// Object entries of a decoder, addressed by generated coding keys.
#[derive(Debug)]
pub struct KeyedDecodingContainer<'a, K> {
    entries: &'a BTreeMap<String, Value>,
    path: CodingPath,
    _keys: PhantomData<K>,
}

impl<'a, K: CodingKey> KeyedDecodingContainer<'a, K> {
    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    pub fn contains(&self, key: K) -> bool {
        self.entries.contains_key(key.string_value())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The only key of the object, as required for externally tagged enums.
    pub fn single_key(&self) -> Result<&'a str, CodingError> {
        let mut keys = self.entries.keys();
        match (keys.next(), keys.next()) {
            (Some(key), None) => Ok(key.as_str()),
            _ => Err(CodingError::invalid_enum_shape(&self.path, self.entries.len())),
        }
    }

    pub fn nested_decoder(&self, key: K) -> Result<Decoder<'a>, CodingError> {
        let name = key.string_value();
        match self.entries.get(name) {
            Some(value) => Ok(Decoder::with_path(value, self.path.child(name))),
            None => Err(CodingError::key_not_found(&self.path, name)),
        }
    }

    pub fn decode<T: Decodable>(&self, key: K) -> Result<T, CodingError> {
        let name = key.string_value();
        match self.entries.get(name) {
            Some(value) => T::decode(&Decoder::with_path(value, self.path.child(name))),
            None => T::decode_missing(&self.path, name),
        }
    }

    /// `None` when the key is absent or null.
    pub fn decode_if_present<T: Decodable>(&self, key: K) -> Result<Option<T>, CodingError> {
        let name = key.string_value();
        match self.entries.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::decode(&Decoder::with_path(value, self.path.child(name))).map(Some),
        }
    }

    pub fn decode_with<H: HelperCoder>(&self, key: K) -> Result<H::Coded, CodingError> {
        let decoder = self.nested_decoder(key)?;
        H::decode(&decoder)
    }

    pub fn decode_with_if_present<H: HelperCoder>(
        &self,
        key: K,
    ) -> Result<Option<H::Coded>, CodingError> {
        let name = key.string_value();
        match self.entries.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => H::decode(&Decoder::with_path(value, self.path.child(name))).map(Some),
        }
    }
}
