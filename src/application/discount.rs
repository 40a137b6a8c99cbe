use crate::domain::money::{Percentage, Price};
use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Returns `price * (percentage / 100)`.
///
/// No validation: a negative price or a percentage outside `[0, 100]` yields whatever
/// the arithmetic gives, saturating at the `Decimal` bounds. Use [`checked_discount`]
/// for caller-supplied values.
pub fn discount(price: Price, percentage: Percentage) -> Decimal {
    // The factor is taken first so that for percentages in [0, 100] the product
    // never exceeds `price`.
    price.saturating_mul(percentage / HUNDRED)
}

/// Like [`discount`], but rejects a negative price or a percentage outside `[0, 100]`.
pub fn checked_discount(price: Price, percentage: Percentage) -> Result<Decimal> {
    if price < Decimal::ZERO {
        return Err(CheckoutError::invalid(format!(
            "Price must not be negative, got {price}"
        )));
    }
    if percentage < Decimal::ZERO || percentage > HUNDRED {
        return Err(CheckoutError::invalid(format!(
            "Percentage must be between 0 and 100, got {percentage}"
        )));
    }
    percentage
        .checked_div(HUNDRED)
        .and_then(|factor| price.checked_mul(factor))
        .ok_or_else(|| {
            CheckoutError::invalid(format!(
                "Discount of {percentage}% on {price} is out of range"
            ))
        })
}

/// The price left after the discount is taken off.
pub fn discounted_price(price: Price, percentage: Percentage) -> Result<Price> {
    Ok(price - checked_discount(price, percentage)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_discount_identities() {
        assert_eq!(discount(dec!(100), dec!(0)), dec!(0));
        assert_eq!(discount(dec!(100), dec!(100)), dec!(100));
        assert_eq!(discount(dec!(0), dec!(50)), dec!(0));
        assert_eq!(discount(dec!(200), dec!(25)), dec!(50));
    }

    #[test]
    fn test_discount_matches_formula() {
        for price in [dec!(0), dec!(0.01), dec!(19.99), dec!(1234.5678)] {
            for percentage in [dec!(0), dec!(12.5), dec!(33), dec!(99.99), dec!(100)] {
                assert_eq!(
                    discount(price, percentage),
                    price * percentage / dec!(100)
                );
            }
        }
    }

    #[test]
    fn test_unchecked_discount_passes_out_of_range_through() {
        assert_eq!(discount(dec!(-100), dec!(10)), dec!(-10));
        assert_eq!(discount(dec!(100), dec!(150)), dec!(150));
    }

    #[test]
    fn test_checked_discount_rejects_out_of_range() {
        assert!(matches!(
            checked_discount(dec!(-1), dec!(10)),
            Err(CheckoutError::InvalidInput(_))
        ));
        assert!(matches!(
            checked_discount(dec!(10), dec!(-0.5)),
            Err(CheckoutError::InvalidInput(_))
        ));
        assert!(matches!(
            checked_discount(dec!(10), dec!(100.01)),
            Err(CheckoutError::InvalidInput(_))
        ));
        assert_eq!(checked_discount(dec!(80), dec!(12.5)).unwrap(), dec!(10));
    }

    #[test]
    fn test_discount_on_largest_prices() {
        let half = checked_discount(Decimal::MAX, dec!(50)).unwrap();
        assert!(half > Decimal::ZERO && half < Decimal::MAX);
        assert_eq!(discount(Decimal::MAX, dec!(100)), Decimal::MAX);

        let price = dec!(1000000000000000000000000000);
        assert_eq!(checked_discount(price, dec!(100)).unwrap(), price);
        assert_eq!(discounted_price(price, dec!(100)).unwrap(), dec!(0));
    }

    #[test]
    fn test_unchecked_discount_saturates() {
        assert_eq!(discount(Decimal::MAX, dec!(200)), Decimal::MAX);
        assert_eq!(discount(Decimal::MIN, dec!(200)), Decimal::MIN);
    }

    #[test]
    fn test_discounted_price() {
        assert_eq!(discounted_price(dec!(200), dec!(25)).unwrap(), dec!(150));
        assert_eq!(discounted_price(dec!(9.99), dec!(100)).unwrap(), dec!(0));
        assert!(discounted_price(dec!(10), dec!(101)).is_err());
    }
}
