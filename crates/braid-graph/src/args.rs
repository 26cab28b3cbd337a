// SPDX-License-Identifier: Apache-2.0
//! Construction and lookup of named operator arguments.
//!
//! Lookup is linear and first-match: with duplicate names present, later
//! duplicates are unreachable by name. Descriptors are single-writer
//! during construction; nothing here locks.

use serde::Serialize;
use thiserror::Error;

use crate::{ArgValue, Argument, OpDef};

/// Error type for argument operations.
#[derive(Debug, Error)]
pub enum ArgError {
    /// Required argument absent from the descriptor. This is the fatal
    /// tier: a miss indicates a configuration error, and the caller must
    /// abort the operation rather than substitute a default.
    #[error("argument `{0}` does not exist")]
    Missing(String),
    /// Sub-message payload failed to serialize (fatal tier).
    #[error("sub-message serialize error: {0}")]
    Serialize(String),
}

/// Wrap `value` into an argument named `name`.
///
/// Accepts exactly the closed payload set of [`ArgValue`]; repeated
/// values keep input order. `name` is not validated.
pub fn make_argument<V: Into<ArgValue>>(name: impl Into<String>, value: V) -> Argument {
    Argument {
        name: name.into(),
        value: Some(value.into()),
    }
}

/// Wrap a serializable sub-message into the opaque-bytes slot of an
/// argument named `name`.
pub fn make_message_argument<M: Serialize>(
    name: impl Into<String>,
    message: &M,
) -> Result<Argument, ArgError> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(message, &mut bytes)
        .map_err(|e| ArgError::Serialize(e.to_string()))?;
    Ok(make_argument(name, bytes))
}

/// True when `op` carries at least one argument named `name`.
pub fn has_argument(op: &OpDef, name: &str) -> bool {
    op.args.iter().any(|arg| arg.name == name)
}

/// First argument named `name` in `op`.
///
/// This is the required-argument contract: a miss is
/// [`ArgError::Missing`], never a default value. Callers wanting an
/// optional lookup pre-check with [`has_argument`] or use
/// [`get_or_create_argument`].
pub fn get_argument<'a>(op: &'a OpDef, name: &str) -> Result<&'a Argument, ArgError> {
    op.args
        .iter()
        .find(|arg| arg.name == name)
        .ok_or_else(|| ArgError::Missing(name.to_owned()))
}

/// First argument named `name` in `op`, mutable; optionally created.
///
/// Returns `None` only when the name is absent and `create_if_missing`
/// is false. A freshly created entry has its name set and no payload.
pub fn get_or_create_argument<'a>(
    op: &'a mut OpDef,
    name: &str,
    create_if_missing: bool,
) -> Option<&'a mut Argument> {
    if let Some(idx) = op.args.iter().position(|arg| arg.name == name) {
        return op.args.get_mut(idx);
    }
    if create_if_missing {
        op.args.push(Argument::named(name));
        op.args.last_mut()
    } else {
        None
    }
}
