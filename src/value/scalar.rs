//! Closed scalar type used for sort keys and seek positions

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A comparable field value.
///
/// Plain JSON deserializes to `Null`, `Bool`, `Int`, `UInt`, `Float` or `Str`.
/// `UInt` only holds integers above `i64::MAX`.
/// `Id` and `Timestamp` come from typed records or from decoded tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Id(Uuid),
    Timestamp(DateTime<Utc>),
}

impl Scalar {
    /// Converts a JSON value; arrays and objects are not scalars
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Scalar::Null),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Scalar::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Scalar::UInt(u))
                } else {
                    n.as_f64().map(Scalar::Float)
                }
            }
            Value::String(s) => Some(Scalar::Str(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Converts to plain JSON. Ids and timestamps become strings.
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(i) => Value::from(*i),
            Scalar::UInt(u) => Value::from(*u),
            Scalar::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Scalar::Str(s) => Value::String(s.clone()),
            Scalar::Id(id) => Value::String(id.to_string()),
            Scalar::Timestamp(ts) => Value::String(ts.to_rfc3339()),
        }
    }

    /// Name of the type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::UInt(_) => "uint",
            Scalar::Float(_) => "float",
            Scalar::Str(_) => "string",
            Scalar::Id(_) => "id",
            Scalar::Timestamp(_) => "timestamp",
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Scalar::Null => 0,
            Scalar::Bool(_) => 1,
            Scalar::Int(_) | Scalar::UInt(_) | Scalar::Float(_) => 2,
            Scalar::Str(_) => 3,
            Scalar::Id(_) => 4,
            Scalar::Timestamp(_) => 5,
        }
    }

    /// Total order over all scalars.
    ///
    /// Compares by type rank first, then by value within the rank.
    pub fn total_cmp(&self, other: &Scalar) -> Ordering {
        let rank = self.type_rank().cmp(&other.type_rank());
        if rank != Ordering::Equal {
            return rank;
        }

        match (self, other) {
            (Scalar::Null, Scalar::Null) => Ordering::Equal,
            (Scalar::Bool(a), Scalar::Bool(b)) => a.cmp(b),
            (Scalar::Float(a), Scalar::Float(b)) => cmp_float(*a, *b),
            (Scalar::Float(a), _) => match other.as_i128() {
                Some(b) => cmp_int_float(b, *a).reverse(),
                None => Ordering::Equal,
            },
            (_, Scalar::Float(b)) => match self.as_i128() {
                Some(a) => cmp_int_float(a, *b),
                None => Ordering::Equal,
            },
            (Scalar::Int(_) | Scalar::UInt(_), Scalar::Int(_) | Scalar::UInt(_)) => {
                self.as_i128().cmp(&other.as_i128())
            }
            (Scalar::Str(a), Scalar::Str(b)) => a.cmp(b),
            (Scalar::Id(a), Scalar::Id(b)) => a.cmp(b),
            (Scalar::Timestamp(a), Scalar::Timestamp(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }

    /// Equality under `total_cmp` (so `Int(1)` equals `Float(1.0)`)
    pub fn cmp_eq(&self, other: &Scalar) -> bool {
        self.total_cmp(other) == Ordering::Equal
    }

    /// Integer value widened so every `Int` and `UInt` fits
    fn as_i128(&self) -> Option<i128> {
        match self {
            Scalar::Int(i) => Some(i128::from(*i)),
            Scalar::UInt(u) => Some(i128::from(*u)),
            _ => None,
        }
    }
}

fn cmp_float(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

// 2^63 as f64; the first float above every i64.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

// 2^64 as f64; the first float above every u64.
const U64_UPPER: f64 = 18_446_744_073_709_551_616.0;

/// Exact comparison of an integer with a float, no rounding through f64.
///
/// `i` is always within `i64::MIN..=u64::MAX`.
fn cmp_int_float(i: i128, f: f64) -> Ordering {
    if f.is_nan() {
        return Ordering::Greater;
    }
    if f >= U64_UPPER {
        return Ordering::Less;
    }
    if f < -I64_UPPER {
        return Ordering::Greater;
    }

    let truncated = f.trunc();
    match i.cmp(&(truncated as i128)) {
        Ordering::Equal if f > truncated => Ordering::Less,
        Ordering::Equal if f < truncated => Ordering::Greater,
        ordering => ordering,
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::UInt(u) => write!(f, "{}", u),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Str(s) => write!(f, "{:?}", s),
            Scalar::Id(id) => write!(f, "{}", id),
            Scalar::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

/// Values that fit `i64` become `Int`, so equal numbers share one variant
impl From<u64> for Scalar {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Scalar::Int(i),
            Err(_) => Scalar::UInt(v),
        }
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v.into())
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

impl From<Uuid> for Scalar {
    fn from(v: Uuid) -> Self {
        Scalar::Id(v)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(v: DateTime<Utc>) -> Self {
        Scalar::Timestamp(v)
    }
}
