use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A monetary amount held in integer cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    cents: i64,
}

impl Amount {
    pub const ZERO: Amount = Amount { cents: 0 };

    pub fn from_cents(cents: i64) -> Self {
        Amount { cents }
    }

    /// Rounds the value to 2 decimal places, half-up on the third decimal.
    pub fn from_decimal(value: f64) -> Self {
        Amount {
            cents: (value * 100.0 + 0.5).floor() as i64,
        }
    }

    pub fn cents(self) -> i64 {
        self.cents
    }

    /// Formats the amount with the Brazilian real prefix, e.g. `R$ 1.234,56`.
    pub fn to_brl_string(self) -> String {
        format!("R$ {}", self)
    }
}

impl std::fmt::Display for Amount {
    /// Comma as decimal separator and period as thousands separator, always 2 decimal places.
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let absolute_cents = self.cents.unsigned_abs();
        let integer_digits = (absolute_cents / 100).to_string();

        let mut grouped_digits = String::with_capacity(integer_digits.len() * 4 / 3);
        for (index, digit) in integer_digits.chars().enumerate() {
            if index > 0 && (integer_digits.len() - index) % 3 == 0 {
                grouped_digits.push('.');
            }
            grouped_digits.push(digit);
        }

        write!(
            formatter,
            "{sign}{grouped_digits},{:02}",
            absolute_cents % 100
        )
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, other: Amount) -> Amount {
        Amount {
            cents: self.cents + other.cents,
        }
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Amount) {
        self.cents += other.cents;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(amounts: I) -> Amount {
        amounts.fold(Amount::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_is_half_up_on_the_third_decimal() {
        assert_eq!(Amount::from_decimal(0.125).cents(), 13);
        assert_eq!(Amount::from_decimal(0.124).cents(), 12);
        assert_eq!(Amount::from_decimal(123.454).cents(), 12345);
        assert_eq!(Amount::from_decimal(50.0).cents(), 5000);
        assert_eq!(Amount::from_decimal(499.999).cents(), 50000);
    }

    #[test]
    fn amounts_use_decimal_comma_and_period_thousands() {
        assert_eq!(Amount::ZERO.to_string(), "0,00");
        assert_eq!(Amount::from_cents(5).to_string(), "0,05");
        assert_eq!(Amount::from_cents(12345).to_string(), "123,45");
        assert_eq!(Amount::from_cents(123456).to_string(), "1.234,56");
        assert_eq!(Amount::from_cents(5_512_345_00).to_string(), "5.512.345,00");
        assert_eq!(Amount::from_cents(-123456).to_string(), "-1.234,56");
        assert_eq!(Amount::from_cents(27048).to_brl_string(), "R$ 270,48");
    }

    #[test]
    fn totals_are_exact_sums_of_rounded_addends() {
        let total: Amount = [0.1, 0.2, 0.3]
            .into_iter()
            .map(Amount::from_decimal)
            .sum();

        assert_eq!(total, Amount::from_cents(60));
        assert_eq!(total.to_string(), "0,60");
    }
}
