//! Text codec used by the object operations of a [`CipherEngine`](crate::engine::CipherEngine).
//!
//! The engine only ever sees text; an [`ObjectEncoder`] decides how a typed
//! value becomes that text and an [`ObjectDecoder`] turns it back. Encrypting,
//! hashing and verifying only need the encoder, so write-only types work too.
//! [`JsonCodec`] covers every serde type.
//!
//! Codec errors end up in logs, so they name the failure kind and position and
//! never echo the value being (de)serialized.

use std::borrow::Cow;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::{CipherError, Result};

/// Turns values of type `T` into text.
pub trait ObjectEncoder<T: ?Sized> {
    /// # Errors
    ///
    /// Returns [`CipherError::NonSerializable`] if `value` cannot be encoded.
    fn serialize(&self, value: &T) -> Result<String>;
}

/// Rebuilds values of type `T` from text.
pub trait ObjectDecoder<T> {
    /// # Errors
    ///
    /// Returns [`CipherError::Deserialization`] if `text` does not describe a `T`.
    fn deserialize(&self, text: &str) -> Result<T>;
}

/// Both directions for `T`; implemented for every encoder that is also a decoder.
pub trait ObjectCodec<T>: ObjectEncoder<T> + ObjectDecoder<T> {}

impl<T, C> ObjectCodec<T> for C where C: ObjectEncoder<T> + ObjectDecoder<T> {}

/// JSON codec backed by `serde_json`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl<T> ObjectEncoder<T> for JsonCodec
where
    T: Serialize + ?Sized,
{
    fn serialize(&self, value: &T) -> Result<String> {
        serde_json::to_string(value).map_err(|e| CipherError::NonSerializable { type_name: std::any::type_name::<T>(), message: redact(&e) })
    }
}

impl<T> ObjectDecoder<T> for JsonCodec
where
    T: DeserializeOwned,
{
    fn deserialize(&self, text: &str) -> Result<T> {
        serde_json::from_str(text).map_err(|e| CipherError::Deserialization { type_name: std::any::type_name::<T>(), message: redact(&e) })
    }
}

/// Describes a serde_json error without its message, which may quote input.
fn redact(error: &serde_json::Error) -> Cow<'static, str> {
    let kind = match error.classify() {
        Category::Io => "i/o error",
        Category::Syntax => "malformed json",
        Category::Data => "value does not match the expected shape",
        Category::Eof => "unexpected end of input",
    };

    match error.line() {
        0 => Cow::Borrowed(kind),
        line => Cow::Owned(format!("{kind} at line {line} column {}", error.column())),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Account {
        id: u32,
        tags: Vec<String>,
    }

    #[derive(Serialize)]
    struct AuditLine<'a> {
        actor: &'a str,
    }

    #[test]
    fn test_json_roundtrip() {
        let account = Account { id: 7, tags: vec!["a".into(), "b".into()] };
        let text = JsonCodec.serialize(&account).unwrap();
        assert_eq!(text, r#"{"id":7,"tags":["a","b"]}"#);

        let restored: Account = JsonCodec.deserialize(&text).unwrap();
        assert_eq!(restored, account);
    }

    fn roundtrip<C: ObjectCodec<Account>>(codec: &C, account: &Account) -> Account {
        codec.deserialize(&codec.serialize(account).unwrap()).unwrap()
    }

    #[test]
    fn test_json_is_full_codec() {
        let account = Account { id: 9, tags: Vec::new() };
        assert_eq!(roundtrip(&JsonCodec, &account), account);
    }

    #[test]
    fn test_serialize_only_type() {
        let text = JsonCodec.serialize(&AuditLine { actor: "ada" }).unwrap();
        assert_eq!(text, r#"{"actor":"ada"}"#);
    }

    #[test]
    fn test_non_string_map_keys_are_not_serializable() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], 1u8);

        let err = ObjectEncoder::<BTreeMap<Vec<u8>, u8>>::serialize(&JsonCodec, &map).unwrap_err();
        assert!(matches!(err, CipherError::NonSerializable { .. }));
    }

    #[test]
    fn test_deserialize_wrong_shape() {
        let err = ObjectDecoder::<Account>::deserialize(&JsonCodec, r#"{"id":"seven"}"#).unwrap_err();
        assert!(matches!(err, CipherError::Deserialization { .. }));
        assert!(err.is_integrity());
    }

    #[test]
    fn test_deserialize_error_omits_input() {
        let err = ObjectDecoder::<Account>::deserialize(&JsonCodec, r#"{"id":"123-45-6789","tags":[]}"#).unwrap_err();
        let message = err.to_string();
        assert!(!message.contains("123-45-6789"), "{message}");
        assert!(message.contains("value does not match the expected shape at line 1 column"), "{message}");

        let err = ObjectDecoder::<Account>::deserialize(&JsonCodec, r#"{"id": secret-token"#).unwrap_err();
        assert!(!err.to_string().contains("secret-token"));
    }
}
