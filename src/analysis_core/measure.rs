//! Nullable decimal measure
//!
//! Every ratio in the reports is a `Measure`. A zero denominator yields an
//! undefined measure instead of a division fault, and any arithmetic that
//! touches an undefined operand stays undefined. Undefined is never zero.

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Measure(Option<Decimal>);

impl Measure {
    pub const UNDEFINED: Measure = Measure(None);

    pub fn defined(value: Decimal) -> Self {
        Measure(Some(value))
    }

    /// `numerator / denominator`, undefined when the denominator is zero
    pub fn ratio(numerator: Decimal, denominator: Decimal) -> Self {
        Measure(numerator.checked_div(denominator))
    }

    /// Division between two measures; undefined if either side is undefined or
    /// the divisor is zero
    pub fn checked_div(self, divisor: Measure) -> Self {
        match (self.0, divisor.0) {
            (Some(n), Some(d)) => Measure(n.checked_div(d)),
            _ => Measure::UNDEFINED,
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        self.0
    }

    pub fn is_defined(&self) -> bool {
        self.0.is_some()
    }

    pub fn is_undefined(&self) -> bool {
        self.0.is_none()
    }

    /// Descending order with undefined values last
    pub fn cmp_desc_nulls_last(&self, other: &Measure) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl From<Option<Decimal>> for Measure {
    fn from(value: Option<Decimal>) -> Self {
        Measure(value)
    }
}

impl Sub for Measure {
    type Output = Measure;

    fn sub(self, rhs: Measure) -> Measure {
        match (self.0, rhs.0) {
            (Some(a), Some(b)) => Measure(a.checked_sub(b)),
            _ => Measure::UNDEFINED,
        }
    }
}

impl Mul for Measure {
    type Output = Measure;

    fn mul(self, rhs: Measure) -> Measure {
        match (self.0, rhs.0) {
            (Some(a), Some(b)) => Measure(a.checked_mul(b)),
            _ => Measure::UNDEFINED,
        }
    }
}

/// Renders the normalized decimal, or nothing when undefined
impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value.normalize()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_zero_denominator_is_undefined_not_zero() {
        let m = Measure::ratio(d("100"), Decimal::ZERO);
        assert!(m.is_undefined());
        assert_ne!(m, Measure::defined(Decimal::ZERO));
    }

    #[test]
    fn test_ratio() {
        assert_eq!(Measure::ratio(d("240"), d("20")).value(), Some(d("12")));
    }

    #[test]
    fn test_undefined_propagates_through_arithmetic() {
        let undefined = Measure::UNDEFINED;
        let two = Measure::defined(d("2"));

        assert!((undefined * two).is_undefined());
        assert!((two * undefined).is_undefined());
        assert!((two - undefined).is_undefined());
        assert!((undefined - two).is_undefined());
        assert!(two.checked_div(undefined).is_undefined());
        assert!(two.checked_div(Measure::defined(Decimal::ZERO)).is_undefined());
        assert_eq!((two * two - two).value(), Some(d("2")));
    }

    #[test]
    fn test_desc_ordering_puts_undefined_last() {
        let mut values = vec![
            Measure::UNDEFINED,
            Measure::defined(d("1")),
            Measure::defined(d("-3")),
            Measure::UNDEFINED,
            Measure::defined(d("7.5")),
        ];
        values.sort_by(|a, b| a.cmp_desc_nulls_last(b));

        assert_eq!(values[0].value(), Some(d("7.5")));
        assert_eq!(values[1].value(), Some(d("1")));
        assert_eq!(values[2].value(), Some(d("-3")));
        assert!(values[3].is_undefined());
        assert!(values[4].is_undefined());
    }

    #[test]
    fn test_display() {
        assert_eq!(Measure::defined(d("10.000")).to_string(), "10");
        assert_eq!(Measure::defined(d("0.20")).to_string(), "0.2");
        assert_eq!(Measure::UNDEFINED.to_string(), "");
    }
}
