//! The configuration store: lifecycle, typed access, finalization.
//!
//! A [`ConfigStore`] owns exactly one configuration instance for its whole
//! lifetime: created empty, populated by loader layers, finalized once the
//! layers are in, then queried and mutated until it is released. Release
//! happens implicitly on drop or explicitly via [`ConfigStore::release`];
//! either way the instance is freed exactly once, and any access afterwards
//! is a caller bug that panics rather than a recoverable error.

use std::collections::BTreeMap;

use crate::error::AccessError;
use crate::schema::{self, FieldDefault};
use crate::value::{Kind, Rgb, Value};

/// Raw slot state for one live configuration instance. Only set keys have
/// entries; absence of an entry is the store's presence signal.
#[derive(Debug, Default, Clone)]
struct Instance {
    slots: BTreeMap<&'static str, Value>,
    finalized: bool,
    /// Any assign/clear since the last finalize. Mutation after finalize is
    /// allowed, and a finalize that follows one may legitimately resolve
    /// dependent defaults again, so it is exempt from the repeat-finalize
    /// consistency check.
    mutated: bool,
}

/// Owns one configuration instance through create, load, finalize, and
/// release. All reads and writes go through the store; accessor handles are
/// just borrows of it, so a mutation is visible to every later read.
#[derive(Debug)]
pub struct ConfigStore {
    inner: Option<Instance>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// New empty store, nothing set, not finalized.
    pub fn new() -> Self {
        Self {
            inner: Some(Instance::default()),
        }
    }

    /// Free the owned instance. Idempotent: calling it on an already
    /// released store is a no-op. Dropping the store has the same effect.
    pub fn release(&mut self) {
        self.inner = None;
    }

    pub fn is_released(&self) -> bool {
        self.inner.is_none()
    }

    fn instance(&self) -> &Instance {
        self.inner
            .as_ref()
            .expect("configuration store accessed after release")
    }

    fn instance_mut(&mut self) -> &mut Instance {
        self.inner
            .as_mut()
            .expect("configuration store accessed after release")
    }

    /// Insert or override the raw slot for a recognized key. Infallible;
    /// kind agreement is the caller's contract.
    pub(crate) fn assign(&mut self, key: &'static str, value: Value) {
        let instance = self.instance_mut();
        instance.slots.insert(key, value);
        instance.mutated = true;
    }

    /// Remove the slot for a key, returning the field to absent.
    pub(crate) fn clear(&mut self, key: &'static str) {
        let instance = self.instance_mut();
        instance.slots.remove(key);
        instance.mutated = true;
    }

    pub fn is_finalized(&self) -> bool {
        self.instance().finalized
    }

    /// Resolve compiled-in defaults for every field no layer set, then mark
    /// the store queryable. Idempotent: a second call finds every
    /// defaultable slot already populated and changes nothing. Color fields
    /// whose documented default is absent stay absent.
    pub fn finalize(&mut self) {
        // A repeated finalize with no mutation in between must not move any
        // slot; checked in debug builds only, since a violation is an
        // implementation bug. Mutations reopen default resolution, so the
        // check does not apply across them.
        let before = if self.instance().finalized && !self.instance().mutated {
            Some(self.instance().slots.clone())
        } else {
            None
        };
        let instance = self.instance_mut();
        for field in schema::FIELDS {
            if instance.slots.contains_key(field.key) {
                continue;
            }
            match field.default {
                FieldDefault::Fixed(value) => {
                    instance.slots.insert(field.key, value);
                }
                FieldDefault::BackgroundFill => {
                    if let Some(background) = instance.slots.get("background").copied() {
                        instance.slots.insert(field.key, background);
                    }
                }
                FieldDefault::Absent => {}
            }
        }
        instance.finalized = true;
        instance.mutated = false;
        if let Some(before) = before {
            debug_assert_eq!(instance.slots, before, "finalize must be idempotent");
        }
    }

    /// Generic typed read keyed by a type witness. The witness kind must
    /// match the key's declared kind exactly; no coercion between kinds.
    pub fn get<T: FromConfig>(&self, key: &str) -> Result<T, AccessError> {
        let field =
            schema::field(key).ok_or_else(|| AccessError::KeyNotRecognized(key.to_string()))?;
        if field.kind != T::KIND {
            return Err(AccessError::TypeMismatch {
                key: key.to_string(),
                requested: T::KIND,
                declared: field.kind,
            });
        }
        let value = self
            .instance()
            .slots
            .get(field.key)
            .ok_or_else(|| AccessError::ValueUnset(key.to_string()))?;
        // Unreachable when slots are written through `set`, which parses
        // per the declared kind; kept so a bad raw assign surfaces as a
        // failure rather than a silent default.
        T::from_value(*value).ok_or_else(|| AccessError::TypeMismatch {
            key: key.to_string(),
            requested: T::KIND,
            declared: field.kind,
        })
    }

    /// Parse text per the key's declared kind and assign it, overriding any
    /// prior value. Empty text on a color key clears the field to absent —
    /// never to `#000000`.
    pub fn set(&mut self, key: &str, text: &str) -> Result<(), AccessError> {
        let field =
            schema::field(key).ok_or_else(|| AccessError::KeyNotRecognized(key.to_string()))?;
        if text.is_empty() && field.kind == Kind::Color {
            self.clear(field.key);
            return Ok(());
        }
        let value = Value::parse(field.kind, text).ok_or_else(|| AccessError::InvalidValue {
            key: key.to_string(),
            text: text.to_string(),
        })?;
        self.assign(field.key, value);
        Ok(())
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, AccessError> {
        self.get(key)
    }

    pub fn get_float(&self, key: &str) -> Result<f32, AccessError> {
        self.get(key)
    }

    /// Narrowing read for fields stored at the wider unsigned width.
    /// Truncation is unchecked: a field whose value can meaningfully exceed
    /// 255 should be read with [`ConfigStore::get_u32`] instead.
    pub fn get_u8(&self, key: &str) -> Result<u8, AccessError> {
        self.get(key)
    }

    pub fn get_u32(&self, key: &str) -> Result<u32, AccessError> {
        self.get(key)
    }

    pub fn get_color(&self, key: &str) -> Result<Rgb, AccessError> {
        self.get(key)
    }

    /// Currently-set keys and their values, in sorted key order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, Value)> + '_ {
        self.instance().slots.iter().map(|(k, v)| (*k, *v))
    }
}

/// Type witness for generic reads: maps a Rust type to the declared kind it
/// reads and converts the raw slot value.
pub trait FromConfig: Sized {
    const KIND: Kind;

    fn from_value(value: Value) -> Option<Self>;
}

impl FromConfig for bool {
    const KIND: Kind = Kind::Bool;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl FromConfig for f32 {
    const KIND: Kind = Kind::Float;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl FromConfig for u32 {
    const KIND: Kind = Kind::Uint;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Uint(n) => Some(n),
            _ => None,
        }
    }
}

/// Reads through the wider `uint` width and truncates to 8 bits.
/// The truncation is deliberate and unchecked.
impl FromConfig for u8 {
    const KIND: Kind = Kind::Uint;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Uint(n) => Some(n as u8),
            _ => None,
        }
    }
}

impl FromConfig for Rgb {
    const KIND: Kind = Kind::Color;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Color(c) => Some(c),
            _ => None,
        }
    }
}
