//! Margin requirements of a derivative order.
//!
//! With `price`, `quantity` and `margin` read from the order and `alpha` the
//! initial margin ratio applied to the quantity:
//!
//! - contract price requirement: `alpha(quantity) * price`
//! - index price requirement, long: `(margin - price * quantity) / (alpha(quantity) - quantity)`
//! - index price requirement, short: `(margin + price * quantity) / (alpha(quantity) + quantity)`
//! - order margin hold: `margin * (1 + fee) * remaining / quantity`
//!
//! All divisions truncate toward zero.

use {
    model::{
        error::OrderError,
        identity::Direction,
        market::DerivativeMarket,
        order::DerivativeOrder,
    },
    num::{BigInt, Zero},
    number::permyriad::{increment_by_scaled_permyriad, scale_permyriad},
};

/// `scale_permyriad(quantity, initialMarginRatio) * price`
pub fn contract_price_margin_requirement(
    order: &DerivativeOrder,
    market: &DerivativeMarket,
) -> BigInt {
    scale_permyriad(order.quantity(), market.initial_margin_ratio.as_big_int()) * order.price()
}

/// The index price at which the posted margin is exactly used up.
///
/// A long order is over-leveraged when the index price is below this value, a
/// short order when it is above.
pub fn index_price_margin_requirement(
    order: &DerivativeOrder,
    direction: Direction,
    market: &DerivativeMarket,
) -> Result<BigInt, OrderError> {
    let price = order.price();
    let quantity = order.quantity();
    let margin = order.margin();
    let pq = price * quantity;
    let alpha_quantity = scale_permyriad(quantity, market.initial_margin_ratio.as_big_int());

    let (numerator, denominator) = match direction {
        Direction::Long => (margin - pq, alpha_quantity - quantity),
        Direction::Short => (margin + pq, alpha_quantity + quantity),
    };

    if denominator.is_zero() {
        return Err(OrderError::DivisionByZero);
    }
    Ok(numerator / denominator)
}

/// Collateral locked for the unfilled part of an order, including the maker
/// transaction fee.
pub fn order_margin_hold(
    order: &DerivativeOrder,
    remaining_quantity: &BigInt,
    maker_tx_fee_permyriad: &BigInt,
) -> Result<BigInt, OrderError> {
    let original_quantity = order.quantity();
    if original_quantity.is_zero() {
        return Err(OrderError::DivisionByZero);
    }
    let scaled_margin = increment_by_scaled_permyriad(order.margin(), maker_tx_fee_permyriad);
    Ok(scaled_margin * remaining_quantity / original_quantity)
}

#[cfg(test)]
mod tests {
    use {super::*, crate::test_util, rstest::rstest};

    fn int(value: i64) -> BigInt {
        BigInt::from(value)
    }

    #[test]
    fn contract_price_requirement() {
        let order = test_util::order(100, 10, 150);
        let market = test_util::market(1000, 95);
        // scale(10, 1000) = 1, 1 * 100
        assert_eq!(contract_price_margin_requirement(&order, &market), int(100));

        let order = test_util::order(2_000, 35, 0);
        // scale(35, 1000) = 3, 3 * 2000
        assert_eq!(contract_price_margin_requirement(&order, &market), int(6_000));
    }

    #[test]
    fn long_index_price_requirement_truncates_toward_zero() {
        let order = test_util::order(100, 10, 150);
        let market = test_util::market(1000, 95);
        // (150 - 1000) / (1 - 10) = -850 / -9 = 94.44..
        assert_eq!(
            index_price_margin_requirement(&order, Direction::Long, &market),
            Ok(int(94))
        );
    }

    #[test]
    fn short_index_price_requirement() {
        let order = test_util::order(100, 10, 150);
        let market = test_util::market(1000, 95);
        // (150 + 1000) / (1 + 10) = 104.54..
        assert_eq!(
            index_price_margin_requirement(&order, Direction::Short, &market),
            Ok(int(104))
        );
    }

    #[rstest]
    #[case::positive_numerator(1_000, 1, 10, 5)]
    #[case::negative_numerator(90, 10, 100, 10)]
    #[case::large_ratio(500, 7, 30, 9_000)]
    fn long_requirement_sign_handling(
        #[case] margin: i64,
        #[case] quantity: i64,
        #[case] price: i64,
        #[case] initial_margin_ratio: i64,
    ) {
        let order = test_util::order(price, quantity, margin);
        let market = test_util::market(initial_margin_ratio, 0);
        let alpha = quantity * initial_margin_ratio / 10_000;
        let expected = (margin - price * quantity) / (alpha - quantity);
        assert_eq!(
            index_price_margin_requirement(&order, Direction::Long, &market),
            Ok(int(expected))
        );
    }

    #[test]
    fn zero_denominator_is_an_error() {
        // alpha(10) = 10 at a 100% margin ratio, so alpha - quantity = 0.
        let order = test_util::order(100, 10, 150);
        let market = test_util::market(10_000, 95);
        assert_eq!(
            index_price_margin_requirement(&order, Direction::Long, &market),
            Err(OrderError::DivisionByZero)
        );

        // Zero quantity makes both sides zero.
        let order = test_util::order(100, 0, 150);
        assert_eq!(
            index_price_margin_requirement(&order, Direction::Short, &market),
            Err(OrderError::DivisionByZero)
        );
    }

    #[test]
    fn margin_hold_scales_with_remaining_quantity() {
        let order = test_util::order(100, 10, 20_000);
        // 20000 * 1.0015 = 20030, * 4 / 10
        assert_eq!(
            order_margin_hold(&order, &int(4), &int(15)),
            Ok(int(8_012))
        );
        assert_eq!(order_margin_hold(&order, &int(10), &int(0)), Ok(int(20_000)));
        assert_eq!(order_margin_hold(&order, &int(0), &int(15)), Ok(int(0)));
    }

    #[test]
    fn margin_hold_truncates() {
        let order = test_util::order(100, 3, 100);
        // 100 * 1 / 3
        assert_eq!(order_margin_hold(&order, &int(1), &int(0)), Ok(int(33)));
    }

    #[test]
    fn margin_hold_of_zero_quantity_order_is_an_error() {
        let order = test_util::order(100, 0, 150);
        assert_eq!(
            order_margin_hold(&order, &int(1), &int(15)),
            Err(OrderError::DivisionByZero)
        );
    }
}
