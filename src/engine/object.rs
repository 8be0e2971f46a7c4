use super::CipherEngine;
use crate::codec::{ObjectDecoder, ObjectEncoder};
use crate::error::Result;
use crate::hash::HashResult;

impl CipherEngine {
    /// Serializes `value` with `codec` and encrypts the resulting text.
    ///
    /// # Errors
    ///
    /// [`CipherError::NonSerializable`](crate::error::CipherError::NonSerializable)
    /// from the codec, otherwise anything [`CipherEngine::encrypt_string`] returns.
    pub fn encrypt_object<T: ?Sized, C>(&self, value: &T, codec: &C) -> Result<String>
    where
        C: ObjectEncoder<T>,
    {
        self.encrypt_string(&codec.serialize(value)?)
    }

    /// Decrypts `ciphertext` and deserializes the text with `codec`.
    ///
    /// # Errors
    ///
    /// Anything [`CipherEngine::decrypt_string`] returns, then
    /// [`CipherError::Deserialization`](crate::error::CipherError::Deserialization).
    pub fn decrypt_object<T, C>(&self, ciphertext: &str, codec: &C) -> Result<T>
    where
        C: ObjectDecoder<T>,
    {
        codec.deserialize(&self.decrypt_string(ciphertext)?)
    }

    pub fn hash_object<T: ?Sized, C>(&self, value: &T, codec: &C, use_salt: bool) -> Result<HashResult>
    where
        C: ObjectEncoder<T>,
    {
        self.hash(&codec.serialize(value)?, use_salt)
    }

    pub fn verify_object<T: ?Sized, C>(&self, value: &T, codec: &C, hash_value: &str, salt: &str) -> Result<bool>
    where
        C: ObjectEncoder<T>,
    {
        self.verify(&codec.serialize(value)?, hash_value, salt)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::codec::JsonCodec;
    use crate::error::CipherError;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Address {
        street: String,
        zip: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Customer {
        name: String,
        ssn: String,
        addresses: Vec<Address>,
        phone_numbers: Vec<String>,
        last_login: Option<String>,
        birth_date: Option<String>,
    }

    fn customer() -> Customer {
        Customer {
            name: "Ada Lovelace".into(),
            ssn: "000-00-0000".into(),
            addresses: vec![
                Address { street: "12 St James's Square".into(), zip: "SW1Y 4JH".into() },
                Address { street: "Ockham Park".into(), zip: "GU23 6NP".into() },
            ],
            phone_numbers: vec!["555-0100".into(), "555-0199".into()],
            last_login: Some("2026-10-19T08:30:00Z".into()),
            birth_date: None,
        }
    }

    fn engine() -> CipherEngine {
        CipherEngine::new("$#%&(kjh565&*IKJ$#%&(kjh565&*IKJ", Some("1234567887654321")).unwrap()
    }

    #[test]
    fn test_object_roundtrip() {
        let engine = engine();
        let original = customer();

        let ciphertext = engine.encrypt_object(&original, &JsonCodec).unwrap();
        let restored: Customer = engine.decrypt_object(&ciphertext, &JsonCodec).unwrap();

        assert_eq!(restored, original);
        assert_eq!(restored.addresses.len(), 2);
        assert!(restored.birth_date.is_none());
    }

    #[test]
    fn test_object_matches_string_encryption() {
        let engine = engine();
        let original = customer();
        let json = serde_json::to_string(&original).unwrap();

        assert_eq!(engine.encrypt_object(&original, &JsonCodec).unwrap(), engine.encrypt_string(&json).unwrap());
    }

    #[test]
    fn test_non_serializable_value() {
        let mut map = BTreeMap::new();
        map.insert((1u8, 2u8), String::from("tuple keys are not valid json keys"));

        let err = engine().encrypt_object(&map, &JsonCodec).unwrap_err();
        assert!(matches!(err, CipherError::NonSerializable { .. }));
    }

    #[test]
    fn test_decrypt_into_wrong_type() {
        let engine = engine();
        let ciphertext = engine.encrypt_object(&customer(), &JsonCodec).unwrap();

        let err = engine.decrypt_object::<Vec<u32>, _>(&ciphertext, &JsonCodec).unwrap_err();
        assert!(matches!(err, CipherError::Deserialization { .. }));
    }

    #[test]
    fn test_decrypt_error_omits_plaintext() {
        #[derive(Serialize)]
        struct Record {
            ssn: String,
        }

        #[derive(Debug, Deserialize)]
        struct NumericRecord {
            #[allow(dead_code)]
            ssn: u32,
        }

        let engine = engine();
        let ciphertext = engine.encrypt_object(&Record { ssn: "123-45-6789".into() }, &JsonCodec).unwrap();

        let err = engine.decrypt_object::<NumericRecord, _>(&ciphertext, &JsonCodec).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, CipherError::Deserialization { .. }));
        assert!(!message.contains("123-45-6789"), "{message}");
    }

    #[test]
    fn test_serialize_only_values() {
        #[derive(Serialize)]
        struct Event<'a> {
            actor: &'a str,
            action: &'a str,
        }

        let engine = engine();
        let event = Event { actor: "ada", action: "login" };

        let ciphertext = engine.encrypt_object(&event, &JsonCodec).unwrap();
        assert_eq!(engine.decrypt_string(&ciphertext).unwrap(), r#"{"actor":"ada","action":"login"}"#);

        let hashed = engine.hash_object(&event, &JsonCodec, true).unwrap();
        assert!(engine.verify_object(&event, &JsonCodec, hashed.hash(), hashed.salt()).unwrap());

        // Unsized values go through the encoder by reference.
        let note = engine.hash_object("free-form note", &JsonCodec, false).unwrap();
        assert!(engine.verify_object("free-form note", &JsonCodec, note.hash(), "").unwrap());
    }

    #[test]
    fn test_hash_and_verify_object() {
        let engine = engine();
        let original = customer();

        let salted = engine.hash_object(&original, &JsonCodec, true).unwrap();
        assert!(engine.verify_object(&original, &JsonCodec, salted.hash(), salted.salt()).unwrap());

        let mut changed = original.clone();
        changed.phone_numbers.push("555-0123".into());
        assert!(!engine.verify_object(&changed, &JsonCodec, salted.hash(), salted.salt()).unwrap());

        let unsalted = engine.hash_object(&original, &JsonCodec, false).unwrap();
        assert!(!unsalted.is_salted());
        assert_eq!(unsalted.hash(), engine.hash_object(&original, &JsonCodec, false).unwrap().hash());
    }
}
