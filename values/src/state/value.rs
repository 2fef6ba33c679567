use alloc::borrow::Cow;
use alloc::format;
use alloc::rc::Rc;
use core::fmt;

use crate::{LightPtr, Type};

use super::Table;

/// A value stored in a [`State`](super::State) stack slot or table.
///
/// Conversions never see this type; they go through the
/// [`Stack`](crate::Stack) primitives only.
#[derive(Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(i64),
    Number(f64),
    String(Rc<[u8]>),
    Table(Table),
    LightUserdata(LightPtr),
}

impl Value {
    pub fn string(bytes: impl AsRef<[u8]>) -> Self {
        Value::String(Rc::from(bytes.as_ref()))
    }

    pub fn ty(&self) -> Type {
        match self {
            Value::Nil => Type::Nil,
            Value::Boolean(_) => Type::Boolean,
            Value::Integer(_) | Value::Number(_) => Type::Number,
            Value::String(_) => Type::String,
            Value::Table(_) => Type::Table,
            Value::LightUserdata(_) => Type::LightUserdata,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    /// String bytes, without number coercion.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(bytes) => Some(&bytes[..]),
            _ => None,
        }
    }

    pub(crate) fn to_integer(&self) -> Option<i64> {
        match *self {
            Value::Integer(n) => Some(n),
            Value::Number(n) => float_to_integer(n),
            _ => None,
        }
    }

    pub(crate) fn to_number(&self) -> Option<f64> {
        match *self {
            Value::Integer(n) => Some(n as f64),
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// String bytes, rendering numbers as text when `coerce` is set.
    pub(crate) fn to_bytes(&self, coerce: bool) -> Option<Cow<'_, [u8]>> {
        match self {
            Value::String(bytes) => Some(Cow::Borrowed(&bytes[..])),
            Value::Integer(n) if coerce => Some(Cow::Owned(format!("{n}").into_bytes())),
            Value::Number(n) if coerce => Some(Cow::Owned(number_text(*n).into_bytes())),
            _ => None,
        }
    }
}

fn float_to_integer(n: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !(-LIMIT..LIMIT).contains(&n) {
        return None;
    }
    let truncated = n as i64;
    (truncated as f64 == n).then_some(truncated)
}

/// `%.14g`, plus a trailing `.0` when the result would read as an integer.
fn number_text(n: f64) -> alloc::string::String {
    let mut text = significant_text(n);
    if text.bytes().all(|b| b == b'-' || b.is_ascii_digit()) {
        text.push_str(".0");
    }
    text
}

/// C's `%.14g`: 14 significant digits, no trailing zeros, exponent form
/// outside `1e-4..1e14`.
fn significant_text(n: f64) -> alloc::string::String {
    const DIGITS: i32 = 14;

    if n.is_nan() {
        return if n.is_sign_negative() { "-nan" } else { "nan" }.into();
    }
    if n.is_infinite() {
        return if n < 0.0 { "-inf" } else { "inf" }.into();
    }

    // The exponent comes from rounding to `DIGITS` first, as in C.
    let scientific = format!("{:.*e}", (DIGITS - 1) as usize, n);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or_default();

    if exponent < -4 || exponent >= DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.unsigned_abs())
    } else {
        let fixed = format!("{:.*}", (DIGITS - 1 - exponent) as usize, n);
        trim_fraction(&fixed).into()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a == b,
            (Value::LightUserdata(a), Value::LightUserdata(b)) => a == b,
            (a, b) => match (a.to_number(), b.to_number()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Boolean(v) => write!(f, "Boolean({v})"),
            Value::Integer(v) => write!(f, "Integer({v})"),
            Value::Number(v) => write!(f, "Number({v})"),
            Value::String(v) => write!(f, "String({:?})", alloc::string::String::from_utf8_lossy(v)),
            Value::Table(t) => write!(f, "{t:?}"),
            Value::LightUserdata(p) => write!(f, "{p:?}"),
        }
    }
}
