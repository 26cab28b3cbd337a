// SPDX-License-Identifier: Apache-2.0
//! Canonical computation-graph schema for braid tools.
//! Pure data (nets, operators, named arguments) with serde serialization.
//!
//! The schema is deliberately small: a [`NetDef`] is an ordered list of
//! [`OpDef`]s, and each operator carries an ordered list of [`Argument`]s.
//! Argument payloads form a closed set (see [`ArgValue`]); consumers
//! elsewhere assume exactly these seven shapes.

mod args;

pub use args::{
    get_argument, get_or_create_argument, has_argument, make_argument, make_message_argument,
    ArgError,
};

use serde::{Deserialize, Serialize};

/// One typed payload slot of an [`Argument`].
///
/// Closed set — do not extend. A serialized sub-message travels through
/// the `Bytes` slot; there is no dedicated nested-message slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ArgValue {
    /// Single float payload.
    Float(f32),
    /// Single integer payload.
    Int(i64),
    /// Single string payload.
    Str(String),
    /// Opaque byte payload (serialized sub-message).
    Bytes(Vec<u8>),
    /// Repeated float payload (input order preserved).
    Floats(Vec<f32>),
    /// Repeated integer payload (input order preserved).
    Ints(Vec<i64>),
    /// Repeated string payload (input order preserved).
    Strs(Vec<String>),
}

impl From<f32> for ArgValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ArgValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<u8>> for ArgValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<Vec<f32>> for ArgValue {
    fn from(v: Vec<f32>) -> Self {
        Self::Floats(v)
    }
}

impl From<Vec<i64>> for ArgValue {
    fn from(v: Vec<i64>) -> Self {
        Self::Ints(v)
    }
}

impl From<Vec<String>> for ArgValue {
    fn from(v: Vec<String>) -> Self {
        Self::Strs(v)
    }
}

/// Named argument attached to an operator.
///
/// Well-formed entries have at most one payload kind populated (enforced
/// by [`ArgValue`] being a sum type). Names are not guaranteed unique
/// within an operator; lookup returns the first match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Argument {
    /// Argument name. Empty names are legal and a later lookup hazard.
    pub name: String,
    /// Payload. `None` only for entries created by name alone.
    pub value: Option<ArgValue>,
}

impl Argument {
    /// Create an entry with only the name set (no payload).
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// Descriptor for one computational step in a net.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OpDef {
    /// Operator kind (e.g., "MatMul").
    pub op_type: String,
    /// Ordered input blob names.
    pub inputs: Vec<String>,
    /// Ordered output blob names.
    pub outputs: Vec<String>,
    /// Ordered argument list.
    pub args: Vec<Argument>,
}

/// A named computation graph: operators in execution order plus the blob
/// names crossing the graph boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NetDef {
    /// Net name.
    pub name: String,
    /// Operators in execution order.
    pub ops: Vec<OpDef>,
    /// Blob names the net consumes from its environment.
    pub external_inputs: Vec<String>,
    /// Blob names the net exposes to its environment.
    pub external_outputs: Vec<String>,
}
