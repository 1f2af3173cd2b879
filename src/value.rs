//! Value kinds and their textual marshaling.
//!
//! The store supports a fixed set of value kinds. Each kind has one
//! canonical text form; [`Value::render`] output always re-parses to an
//! equal value, which is what makes exported configuration round-trip.

use serde::Serialize;
use std::fmt;

/// Declared kind of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Bool,
    Float,
    Uint,
    Color,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Float => write!(f, "float"),
            Self::Uint => write!(f, "uint"),
            Self::Color => write!(f, "color"),
        }
    }
}

/// Three-channel color record. A color field can also be absent entirely,
/// which is tracked by slot presence in the store, never by a sentinel
/// value here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB`, hex digits in either case.
    pub fn parse(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#').unwrap_or(text);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A raw configuration value as held in a store slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Bool(bool),
    Float(f32),
    Uint(u32),
    Color(Rgb),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Self::Bool(_) => Kind::Bool,
            Self::Float(_) => Kind::Float,
            Self::Uint(_) => Kind::Uint,
            Self::Color(_) => Kind::Color,
        }
    }

    /// Parse text into a value of the given kind. `None` on parse failure;
    /// a failure is never substituted with a default here. Empty text is a
    /// parse failure for every kind — clearing a color field to absent is
    /// handled above this layer, in the store's `set`.
    pub fn parse(kind: Kind, text: &str) -> Option<Self> {
        match kind {
            Kind::Bool => match text {
                "true" | "1" | "yes" => Some(Self::Bool(true)),
                "false" | "0" | "no" => Some(Self::Bool(false)),
                _ => None,
            },
            Kind::Float => text.parse::<f32>().ok().map(Self::Float),
            Kind::Uint => text.parse::<u32>().ok().map(Self::Uint),
            Kind::Color => Rgb::parse(text).map(Self::Color),
        }
    }

    /// Canonical text form, stable under re-parsing.
    pub fn render(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Uint(n) => n.to_string(),
            Self::Color(c) => c.to_string(),
        }
    }
}
