//! The primitive cell value stored in a [`TabularRecord`](crate::TabularRecord).
//!
//! # Design
//!
//! Outputs render every value as text (CSV cells, console tables), so
//! `Scalar` carries exactly the four primitives that have an unambiguous
//! textual form.  `Display` is the single rendering path: whatever it
//! produces is what lands in the file, so a value survives a write/read
//! round trip as its display string.
//!
//! Numeric types narrower than the stored width convert losslessly via
//! `From`, which keeps `record()` call sites free of casts:
//!
//! ```rust
//! use tablog_core::Scalar;
//!
//! assert_eq!(Scalar::from(3u32), Scalar::Int(3));
//! assert_eq!(Scalar::from(0.5f32), Scalar::Float(0.5));
//! ```

use std::fmt;

/// A single primitive value in a tabular record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s)   => f.write_str(s),
            Scalar::Int(i)   => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Bool(b)  => write!(f, "{b}"),
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<i32> for Scalar {
    #[inline]
    fn from(i: i32) -> Self {
        Scalar::Int(i as i64)
    }
}

impl From<i64> for Scalar {
    #[inline]
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<u32> for Scalar {
    #[inline]
    fn from(i: u32) -> Self {
        Scalar::Int(i as i64)
    }
}

impl From<usize> for Scalar {
    /// Epoch/step counters are usually `usize`.  Values beyond `i64::MAX`
    /// wrap, which no realistic counter reaches.
    #[inline]
    fn from(i: usize) -> Self {
        Scalar::Int(i as i64)
    }
}

impl From<f32> for Scalar {
    #[inline]
    fn from(x: f32) -> Self {
        Scalar::Float(x as f64)
    }
}

impl From<f64> for Scalar {
    #[inline]
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<bool> for Scalar {
    #[inline]
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}
