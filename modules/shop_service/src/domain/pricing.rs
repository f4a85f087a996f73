//! Derived money figures, recomputed on every read

use crate::contract::OrderLine;
use rust_decimal::Decimal;

fn cents(value: Decimal) -> Decimal {
    value.round_dp(2)
}

pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    cents(unit_price * Decimal::from(quantity))
}

pub fn order_subtotal(lines: &[OrderLine]) -> Decimal {
    cents(
        lines
            .iter()
            .map(|line| line_total(line.unit_price, line.quantity))
            .sum(),
    )
}

/// Money a percentage discount takes off the subtotal
pub fn amount_saved(lines: &[OrderLine], rate: Decimal) -> Decimal {
    cents(order_subtotal(lines) * rate / Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn line(unit_price: &str, quantity: i32) -> OrderLine {
        OrderLine {
            id: 1,
            order_id: 1,
            product_id: 1,
            article_id: None,
            quantity,
            unit_price: dec(unit_price),
        }
    }

    #[test]
    fn line_total_multiplies_quantity() {
        assert_eq!(line_total(dec("49.90"), 3), dec("149.70"));
    }

    #[test]
    fn subtotal_sums_lines() {
        let lines = [line("49.90", 2), line("120.00", 1)];
        assert_eq!(order_subtotal(&lines), dec("219.80"));
        assert_eq!(order_subtotal(&[]), Decimal::ZERO);
    }

    #[test]
    fn amount_saved_applies_percentage() {
        let lines = [line("49.90", 2), line("120.00", 1)];
        assert_eq!(amount_saved(&lines, dec("10")), dec("21.98"));
        assert_eq!(amount_saved(&lines, dec("15.50")), dec("34.07"));
    }
}
