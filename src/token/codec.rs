//! Token encoding and fail-open decoding

use std::collections::BTreeMap;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{TokenError, TokenResult};
use super::position::SeekPosition;
use crate::observability::Logger;
use crate::value::Scalar;

/// Current wire format version
pub const TOKEN_VERSION: u8 = 1;

/// Default upper bound on encoded token length
pub const DEFAULT_MAX_TOKEN_LEN: usize = 4096;

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    v: u8,
    k: BTreeMap<String, WireValue>,
}

/// Externally tagged so the type survives the JSON round trip.
/// Floats travel as strings to keep NaN and infinities.
#[derive(Serialize, Deserialize)]
enum WireValue {
    #[serde(rename = "n")]
    Null,
    #[serde(rename = "b")]
    Bool(bool),
    #[serde(rename = "i")]
    Int(i64),
    #[serde(rename = "w")]
    UInt(u64),
    #[serde(rename = "f")]
    Float(String),
    #[serde(rename = "s")]
    Str(String),
    #[serde(rename = "u")]
    Id(Uuid),
    #[serde(rename = "t")]
    Timestamp(DateTime<Utc>),
}

impl From<&Scalar> for WireValue {
    fn from(value: &Scalar) -> Self {
        match value {
            Scalar::Null => WireValue::Null,
            Scalar::Bool(b) => WireValue::Bool(*b),
            Scalar::Int(i) => WireValue::Int(*i),
            Scalar::UInt(u) => WireValue::UInt(*u),
            // Debug is the shortest repr that parses back to the same bits
            Scalar::Float(f) => WireValue::Float(format!("{:?}", f)),
            Scalar::Str(s) => WireValue::Str(s.clone()),
            Scalar::Id(id) => WireValue::Id(*id),
            Scalar::Timestamp(ts) => WireValue::Timestamp(*ts),
        }
    }
}

impl TryFrom<WireValue> for Scalar {
    type Error = TokenError;

    fn try_from(value: WireValue) -> TokenResult<Self> {
        Ok(match value {
            WireValue::Null => Scalar::Null,
            WireValue::Bool(b) => Scalar::Bool(b),
            WireValue::Int(i) => Scalar::Int(i),
            WireValue::UInt(u) => Scalar::UInt(u),
            WireValue::Float(s) => Scalar::Float(
                s.parse()
                    .map_err(|_| TokenError::Malformed(format!("bad float literal '{}'", s)))?,
            ),
            WireValue::Str(s) => Scalar::Str(s),
            WireValue::Id(id) => Scalar::Id(id),
            WireValue::Timestamp(ts) => Scalar::Timestamp(ts),
        })
    }
}

/// Encodes seek positions into tokens and back.
///
/// Stateless apart from the length bound; safe to share across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCodec {
    max_token_len: usize,
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKEN_LEN)
    }
}

impl TokenCodec {
    pub fn new(max_token_len: usize) -> Self {
        Self { max_token_len }
    }

    pub fn max_token_len(&self) -> usize {
        self.max_token_len
    }

    /// Encodes a position.
    ///
    /// Fails if the result would exceed the length bound, since such a
    /// token would be rejected on the next request and silently restart
    /// pagination.
    pub fn encode(&self, position: &SeekPosition) -> TokenResult<String> {
        let envelope = Envelope {
            v: TOKEN_VERSION,
            k: position
                .values()
                .iter()
                .map(|(field, value)| (field.clone(), WireValue::from(value)))
                .collect(),
        };

        let json =
            serde_json::to_vec(&envelope).map_err(|e| TokenError::Serialize(e.to_string()))?;
        let token = URL_SAFE_NO_PAD.encode(json);

        if token.len() > self.max_token_len {
            return Err(TokenError::TooLong {
                len: token.len(),
                max: self.max_token_len,
            });
        }

        Ok(token)
    }

    /// Decodes a token, failing open.
    ///
    /// Any rejection is logged and returns `None` ("no prior position").
    pub fn decode(&self, token: &str) -> Option<SeekPosition> {
        match self.try_decode(token) {
            Ok(position) => Some(position),
            Err(err) => {
                let reason = err.to_string();
                Logger::warn(
                    "TOKEN_REJECTED",
                    &[("code", err.code()), ("reason", reason.as_str())],
                );
                None
            }
        }
    }

    /// Decodes a token, reporting why it was rejected.
    ///
    /// Surrounding whitespace is trimmed.
    pub fn try_decode(&self, token: &str) -> TokenResult<SeekPosition> {
        let token = token.trim();

        if token.is_empty() {
            return Err(TokenError::Empty);
        }

        if token.len() > self.max_token_len {
            return Err(TokenError::TooLong {
                len: token.len(),
                max: self.max_token_len,
            });
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        let envelope: Envelope =
            serde_json::from_slice(&bytes).map_err(|e| TokenError::Malformed(e.to_string()))?;

        if envelope.v != TOKEN_VERSION {
            return Err(TokenError::UnsupportedVersion(envelope.v));
        }

        envelope
            .k
            .into_iter()
            .map(|(field, value)| Scalar::try_from(value).map(|v| (field, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn codec() -> TokenCodec {
        TokenCodec::default()
    }

    fn raw_token(json: &str) -> String {
        URL_SAFE_NO_PAD.encode(json.as_bytes())
    }

    #[test]
    fn test_round_trip_all_scalar_types() {
        let ts = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let id = Uuid::new_v4();
        let position = SeekPosition::new()
            .with("null", Scalar::Null)
            .with("bool", true)
            .with("int", i64::MAX)
            .with("neg", i64::MIN)
            .with("wide", Scalar::UInt(u64::MAX))
            .with("float", 0.1f64)
            .with("str", "héllo \"world\"")
            .with("id", id)
            .with("ts", ts);

        let token = codec().encode(&position).unwrap();
        let decoded = codec().try_decode(&token).unwrap();

        assert_eq!(decoded, position);
    }

    #[test]
    fn test_integer_does_not_become_float() {
        let position = SeekPosition::new().with("n", 1i64);
        let decoded = codec().try_decode(&codec().encode(&position).unwrap()).unwrap();
        assert_eq!(decoded.get("n"), Some(&Scalar::Int(1)));

        let position = SeekPosition::new().with("n", 1.0f64);
        let decoded = codec().try_decode(&codec().encode(&position).unwrap()).unwrap();
        assert_eq!(decoded.get("n"), Some(&Scalar::Float(1.0)));
    }

    #[test]
    fn test_wide_integers_stay_exact() {
        let position = SeekPosition::new()
            .with("a", Scalar::UInt(u64::MAX))
            .with("b", Scalar::UInt(u64::MAX - 1));
        let decoded = codec().try_decode(&codec().encode(&position).unwrap()).unwrap();

        assert_eq!(decoded.get("a"), Some(&Scalar::UInt(u64::MAX)));
        assert_eq!(decoded.get("b"), Some(&Scalar::UInt(u64::MAX - 1)));

        let token = raw_token(r#"{"v":1,"k":{"_id":{"w":-1}}}"#);
        assert!(matches!(codec().try_decode(&token), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_non_finite_floats_survive() {
        let position = SeekPosition::new()
            .with("inf", f64::INFINITY)
            .with("ninf", f64::NEG_INFINITY)
            .with("nan", f64::NAN);

        let decoded = codec().try_decode(&codec().encode(&position).unwrap()).unwrap();

        assert_eq!(decoded.get("inf"), Some(&Scalar::Float(f64::INFINITY)));
        assert_eq!(decoded.get("ninf"), Some(&Scalar::Float(f64::NEG_INFINITY)));
        assert!(matches!(decoded.get("nan"), Some(Scalar::Float(f)) if f.is_nan()));
    }

    #[test]
    fn test_token_alphabet_is_url_safe() {
        let position = SeekPosition::new().with("s", "??>>~~\u{1F600}");
        let token = codec().encode(&position).unwrap();

        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let a = SeekPosition::new().with("b", 2).with("a", 1);
        let b = SeekPosition::new().with("a", 1).with("b", 2);
        assert_eq!(codec().encode(&a).unwrap(), codec().encode(&b).unwrap());
    }

    #[test]
    fn test_empty_position_round_trips() {
        let token = codec().encode(&SeekPosition::new()).unwrap();
        assert!(codec().try_decode(&token).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert_eq!(codec().try_decode(""), Err(TokenError::Empty));
        assert_eq!(codec().try_decode("  \n"), Err(TokenError::Empty));
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(matches!(
            codec().try_decode("not base64!!"),
            Err(TokenError::Encoding(_))
        ));
    }

    #[test]
    fn test_decode_rejects_foreign_json() {
        // a bare map, as a naive encoder would produce
        let token = raw_token(r#"{"_id":5}"#);
        assert!(matches!(codec().try_decode(&token), Err(TokenError::Malformed(_))));

        let token = raw_token(r#"{"v":1,"k":{"_id":{"x":5}}}"#);
        assert!(matches!(codec().try_decode(&token), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_decode_rejects_type_mismatch() {
        let token = raw_token(r#"{"v":1,"k":{"_id":{"i":5.5}}}"#);
        assert!(matches!(codec().try_decode(&token), Err(TokenError::Malformed(_))));

        let token = raw_token(r#"{"v":1,"k":{"x":{"f":"abc"}}}"#);
        assert!(matches!(codec().try_decode(&token), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_decode_rejects_truncated() {
        let token = codec()
            .encode(&SeekPosition::new().with("_id", 12345).with("name", "alice"))
            .unwrap();
        let truncated = &token[..token.len() / 2];
        assert!(codec().try_decode(truncated).is_err());
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let token = raw_token(r#"{"v":2,"k":{}}"#);
        assert_eq!(codec().try_decode(&token), Err(TokenError::UnsupportedVersion(2)));
    }

    #[test]
    fn test_length_bound() {
        let small = TokenCodec::new(16);
        let position = SeekPosition::new().with("name", "a fairly long value");

        assert!(matches!(small.encode(&position), Err(TokenError::TooLong { .. })));

        let token = codec().encode(&position).unwrap();
        assert!(matches!(small.try_decode(&token), Err(TokenError::TooLong { .. })));
    }

    #[test]
    fn test_decode_fails_open() {
        assert_eq!(codec().decode("%%%"), None);
        assert_eq!(codec().decode(""), None);

        let position = SeekPosition::new().with("_id", 3);
        let token = codec().encode(&position).unwrap();
        assert_eq!(codec().decode(&token), Some(position));
    }

    #[test]
    fn test_decode_trims_whitespace() {
        let position = SeekPosition::new().with("_id", 3);
        let token = format!("  {}\n", codec().encode(&position).unwrap());
        assert_eq!(codec().try_decode(&token), Ok(position));
    }
}
