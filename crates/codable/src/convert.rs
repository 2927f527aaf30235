//! `Decodable`/`Encodable` for standard library types.

use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;

use crate::error::{CodingError, CodingPath};
use crate::{Decodable, Decoder, Encodable, Encoder, Value};

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Decodable for $ty {
                fn decode(decoder: &Decoder<'_>) -> Result<Self, CodingError> {
                    match decoder.value() {
                        Value::Int(n) => <$ty>::try_from(*n).map_err(|_| {
                            CodingError::out_of_range(decoder.coding_path(), n, stringify!($ty))
                        }),
                        Value::UInt(n) => <$ty>::try_from(*n).map_err(|_| {
                            CodingError::out_of_range(decoder.coding_path(), n, stringify!($ty))
                        }),
                        _ => Err(decoder.mismatch("integer")),
                    }
                }
            }

            impl Encodable for $ty {
                fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
                    let value = i64::try_from(*self)
                        .map(Value::Int)
                        .or_else(|_| u64::try_from(*self).map(Value::UInt))
                        .map_err(|_| CodingError::out_of_range(encoder.coding_path(), self, "u64"))?;
                    encoder.encode_value(value);
                    Ok(())
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Decodable for f64 {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, CodingError> {
        match decoder.value() {
            Value::Float(f) => Ok(*f),
            Value::Int(n) => Ok(*n as f64),
            Value::UInt(n) => Ok(*n as f64),
            _ => Err(decoder.mismatch("float")),
        }
    }
}

impl Encodable for f64 {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        encoder.encode_value(Value::Float(*self));
        Ok(())
    }
}

impl Decodable for f32 {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, CodingError> {
        f64::decode(decoder).map(|f| f as f32)
    }
}

impl Encodable for f32 {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        encoder.encode_value(Value::Float(*self as f64));
        Ok(())
    }
}

impl Decodable for bool {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, CodingError> {
        match decoder.value() {
            Value::Bool(b) => Ok(*b),
            _ => Err(decoder.mismatch("bool")),
        }
    }
}

impl Encodable for bool {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        encoder.encode_value(Value::Bool(*self));
        Ok(())
    }
}

impl Decodable for String {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, CodingError> {
        match decoder.value() {
            Value::String(s) => Ok(s.clone()),
            _ => Err(decoder.mismatch("string")),
        }
    }
}

impl Encodable for String {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        self.as_str().encode(encoder)
    }
}

impl Encodable for str {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        encoder.encode_value(Value::String(self.to_string()));
        Ok(())
    }
}

impl Decodable for char {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, CodingError> {
        let s = String::decode(decoder)?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(CodingError::custom(
                decoder.coding_path(),
                format!("expected a single character, found {s:?}"),
            )),
        }
    }
}

impl Encodable for char {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        encoder.encode_value(Value::String(self.to_string()));
        Ok(())
    }
}

impl Decodable for Value {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, CodingError> {
        Ok(decoder.value().clone())
    }
}

impl Encodable for Value {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        encoder.encode_value(self.clone());
        Ok(())
    }
}

impl<T: Decodable> Decodable for Option<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, CodingError> {
        match decoder.value() {
            Value::Null => Ok(None),
            _ => T::decode(decoder).map(Some),
        }
    }

    fn decode_missing(_path: &CodingPath, _key: &str) -> Result<Self, CodingError> {
        Ok(None)
    }
}

impl<T: Encodable> Encodable for Option<T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        match self {
            Some(value) => value.encode(encoder),
            None => {
                encoder.encode_value(Value::Null);
                Ok(())
            }
        }
    }
}

impl<T: Decodable> Decodable for Box<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, CodingError> {
        T::decode(decoder).map(Box::new)
    }
}

impl<T: Encodable + ?Sized> Encodable for Box<T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        (**self).encode(encoder)
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, CodingError> {
        match decoder.value() {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let path = decoder.coding_path().child(&index.to_string());
                    T::decode(&Decoder::with_path(item, path))
                })
                .collect(),
            _ => Err(decoder.mismatch("array")),
        }
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        self.as_slice().encode(encoder)
    }
}

impl<T: Encodable> Encodable for [T] {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        let items = self
            .iter()
            .map(crate::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        encoder.encode_value(Value::Array(items));
        Ok(())
    }
}

fn decode_entries<T: Decodable>(decoder: &Decoder<'_>) -> Result<Vec<(String, T)>, CodingError> {
    match decoder.value() {
        Value::Object(entries) => entries
            .iter()
            .map(|(key, value)| {
                let path = decoder.coding_path().child(key);
                T::decode(&Decoder::with_path(value, path)).map(|v| (key.clone(), v))
            })
            .collect(),
        _ => Err(decoder.mismatch("object")),
    }
}

fn encode_entries<'a, T, I>(entries: I, encoder: &mut Encoder) -> Result<(), CodingError>
where
    T: Encodable + 'a,
    I: Iterator<Item = (&'a String, &'a T)>,
{
    let object = entries
        .map(|(key, value)| crate::to_value(value).map(|v| (key.clone(), v)))
        .collect::<Result<BTreeMap<_, _>, _>>()?;
    encoder.encode_value(Value::Object(object));
    Ok(())
}

impl<T: Decodable> Decodable for BTreeMap<String, T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, CodingError> {
        decode_entries(decoder).map(|entries| entries.into_iter().collect())
    }
}

impl<T: Encodable> Encodable for BTreeMap<String, T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        encode_entries(self.iter(), encoder)
    }
}

impl<T: Decodable> Decodable for HashMap<String, T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, CodingError> {
        decode_entries(decoder).map(|entries| entries.into_iter().collect())
    }
}

impl<T: Encodable> Encodable for HashMap<String, T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        encode_entries(self.iter(), encoder)
    }
}

impl<T> Decodable for PhantomData<T> {
    fn decode(_decoder: &Decoder<'_>) -> Result<Self, CodingError> {
        Ok(PhantomData)
    }

    fn decode_missing(_path: &CodingPath, _key: &str) -> Result<Self, CodingError> {
        Ok(PhantomData)
    }
}

impl<T> Encodable for PhantomData<T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        encoder.encode_value(Value::Null);
        Ok(())
    }
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError> {
        (**self).encode(encoder)
    }
}
