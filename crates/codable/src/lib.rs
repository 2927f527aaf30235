//! Runtime for the `#[codable]` and `#[member_init]` attribute macros.
//!
//! Generated code implements [`Decodable`] and [`Encodable`] against the
//! keyed containers of [`Decoder`] and [`Encoder`], addressing members through
//! a generated [`CodingKey`] enum. Values travel as a format-independent
//! [`Value`] tree; [`json`] bridges that tree to JSON text.

pub mod convert;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
pub mod value;

pub use codable_derive::{codable, member_init};
pub use decoder::{Decoder, KeyedDecodingContainer};
pub use encoder::{Encoder, KeyedEncodingContainer};
pub use error::{CodingError, CodingPath, ErrorKind};
pub use value::Value;

/// Wire name of a coded member.
pub trait CodingKey: Copy {
    fn string_value(&self) -> &'static str;
}

/// Types that can be rebuilt from a [`Decoder`].
pub trait Decodable: Sized {
    fn decode(decoder: &Decoder<'_>) -> Result<Self, CodingError>;

    /// Called by keyed containers when `key` is absent.
    fn decode_missing(path: &CodingPath, key: &str) -> Result<Self, CodingError> {
        Err(CodingError::key_not_found(path, key))
    }
}

/// Types that can write themselves into an [`Encoder`].
pub trait Encodable {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), CodingError>;
}

/// Custom coding logic for a single member, selected with `#[coded_by(Helper)]`.
pub trait HelperCoder {
    type Coded;

    fn decode(decoder: &Decoder<'_>) -> Result<Self::Coded, CodingError>;
    fn encode(value: &Self::Coded, encoder: &mut Encoder) -> Result<(), CodingError>;
}

/// Encode a value into a [`Value`] tree.
pub fn to_value<T: Encodable + ?Sized>(value: &T) -> Result<Value, CodingError> {
    let mut encoder = Encoder::new();
    value.encode(&mut encoder)?;
    Ok(encoder.into_value())
}

/// Decode a value from a [`Value`] tree.
pub fn from_value<T: Decodable>(value: &Value) -> Result<T, CodingError> {
    T::decode(&Decoder::new(value))
}
