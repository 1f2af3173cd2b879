//! Recognized configuration keys: declared kind and default policy.
//!
//! Keys are byte-exact; no normalization happens anywhere in the store.
//! A key missing from this table is unrecognized for both reads and writes.

use crate::value::{Kind, Value};

/// Directive key naming another source to include. Handled by the loader,
/// never stored as a field and never exported.
pub const INCLUDE_KEY: &str = "config-file";

/// What finalization does for a field no layer has set.
#[derive(Debug, Clone, Copy)]
pub enum FieldDefault {
    /// Assign this compiled-in value.
    Fixed(Value),
    /// Copy the finalized `background` color when one is set; otherwise
    /// the field stays absent.
    BackgroundFill,
    /// The field stays absent. Finalization never invents colors.
    Absent,
}

/// One recognized configuration field.
#[derive(Debug)]
pub struct Field {
    pub key: &'static str,
    pub kind: Kind,
    pub default: FieldDefault,
}

/// The full recognized-field table.
pub const FIELDS: &[Field] = &[
    Field {
        key: "background",
        kind: Kind::Color,
        default: FieldDefault::Absent,
    },
    Field {
        key: "background-blur-radius",
        kind: Kind::Uint,
        default: FieldDefault::Fixed(Value::Uint(0)),
    },
    Field {
        key: "background-opacity",
        kind: Kind::Float,
        default: FieldDefault::Fixed(Value::Float(1.0)),
    },
    Field {
        key: "confirm-close-surface",
        kind: Kind::Bool,
        default: FieldDefault::Fixed(Value::Bool(true)),
    },
    Field {
        key: "cursor-color",
        kind: Kind::Color,
        default: FieldDefault::Absent,
    },
    Field {
        key: "cursor-style-blink",
        kind: Kind::Bool,
        default: FieldDefault::Fixed(Value::Bool(true)),
    },
    Field {
        key: "font-size",
        kind: Kind::Float,
        default: FieldDefault::Fixed(Value::Float(13.0)),
    },
    Field {
        key: "foreground",
        kind: Kind::Color,
        default: FieldDefault::Absent,
    },
    Field {
        key: "mouse-hide-while-typing",
        kind: Kind::Bool,
        default: FieldDefault::Fixed(Value::Bool(false)),
    },
    Field {
        key: "scrollback-limit",
        kind: Kind::Uint,
        default: FieldDefault::Fixed(Value::Uint(10_000)),
    },
    Field {
        key: "selection-background",
        kind: Kind::Color,
        default: FieldDefault::Absent,
    },
    Field {
        key: "unfocused-split-fill",
        kind: Kind::Color,
        default: FieldDefault::BackgroundFill,
    },
    Field {
        key: "unfocused-split-opacity",
        kind: Kind::Float,
        default: FieldDefault::Fixed(Value::Float(0.7)),
    },
    Field {
        key: "window-decoration",
        kind: Kind::Bool,
        default: FieldDefault::Fixed(Value::Bool(true)),
    },
    Field {
        key: "window-padding-x",
        kind: Kind::Uint,
        default: FieldDefault::Fixed(Value::Uint(2)),
    },
    Field {
        key: "window-padding-y",
        kind: Kind::Uint,
        default: FieldDefault::Fixed(Value::Uint(2)),
    },
];

/// Look up a recognized field by exact key.
pub fn field(key: &str) -> Option<&'static Field> {
    FIELDS.iter().find(|f| f.key == key)
}
