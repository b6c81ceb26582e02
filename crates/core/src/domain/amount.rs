use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Exact monetary amount held as integer cents.
///
/// Only strings of the form `<digits>.<two digits>` parse; there is no sign,
/// exponent or thousands separator. Amounts above `u64::MAX` cents
/// (184467440737095516.15) are rejected like any other malformed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    cents: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount must be digits, a decimal point, then exactly two digits")]
pub struct ParseAmountError;

impl Amount {
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub const fn cents(&self) -> u64 {
        self.cents
    }

    pub const fn is_whole_dollars(&self) -> bool {
        self.cents % 100 == 0
    }

    pub const fn is_multiple_of_quarter(&self) -> bool {
        self.cents % 25 == 0
    }

    /// One fifth of the amount, rounded up to a whole number.
    pub const fn fifth_rounded_up(&self) -> u64 {
        self.cents.div_ceil(500)
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, frac) = s.split_once('.').ok_or(ParseAmountError)?;
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) || frac.len() != 2 {
            return Err(ParseAmountError);
        }

        // Leading zeros are fine; anything past u64 cents is not.
        let whole = whole.trim_start_matches('0');
        let dollars = if whole.is_empty() {
            0
        } else {
            whole.parse::<u64>().map_err(|_| ParseAmountError)?
        };
        let frac: u64 = frac.parse().map_err(|_| ParseAmountError)?;

        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .map(Self::from_cents)
            .ok_or(ParseAmountError)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_fractional_digits() {
        assert_eq!("12.34".parse::<Amount>(), Ok(Amount::from_cents(1234)));
        assert_eq!("0.00".parse::<Amount>(), Ok(Amount::from_cents(0)));
        assert_eq!("007.50".parse::<Amount>(), Ok(Amount::from_cents(750)));
    }

    #[test]
    fn rejects_other_shapes() {
        for s in ["12", "12.3", "12.345", ".50", "12.", "-1.00", "1,00", " 1.00", "1.0a", "1e2.00"] {
            assert!(s.parse::<Amount>().is_err(), "{s:?} should not parse");
        }
    }

    #[test]
    fn rejects_overflow() {
        assert_eq!(
            "184467440737095516.15".parse::<Amount>(),
            Ok(Amount::from_cents(u64::MAX))
        );
        assert!("184467440737095516.16".parse::<Amount>().is_err());
        assert!("99999999999999999999.00".parse::<Amount>().is_err());
    }

    #[test]
    fn displays_canonically() {
        assert_eq!("007.05".parse::<Amount>().unwrap().to_string(), "7.05");
        assert_eq!(Amount::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn exact_decimal_checks() {
        let nine = "9.00".parse::<Amount>().unwrap();
        assert!(nine.is_whole_dollars());
        assert!(nine.is_multiple_of_quarter());

        let quarter = "9.25".parse::<Amount>().unwrap();
        assert!(!quarter.is_whole_dollars());
        assert!(quarter.is_multiple_of_quarter());

        let odd = "2.65".parse::<Amount>().unwrap();
        assert!(!odd.is_multiple_of_quarter());
    }

    #[test]
    fn fifth_rounds_up() {
        assert_eq!(Amount::from_cents(140).fifth_rounded_up(), 1);
        assert_eq!(Amount::from_cents(1225).fifth_rounded_up(), 3);
        assert_eq!(Amount::from_cents(1500).fifth_rounded_up(), 3);
        assert_eq!(Amount::from_cents(0).fifth_rounded_up(), 0);
    }
}
