//! Shared traits and constants for wallet primitives.

use rust_decimal::Decimal;

/// Starting balance used when no persisted wallet exists.
pub const DEFAULT_STARTING_BALANCE: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Number of fractional digits shown for monetary amounts.
pub const DEFAULT_DISPLAY_PRECISION: u32 = 2;

/// Supplies a common contract for retrieving monetary amounts.
pub trait Amounted {
    fn amount(&self) -> Decimal;
}

/// Rounds `amount` to `precision` fractional digits, half away from zero.
pub fn round_for_display(amount: Decimal, precision: u32) -> Decimal {
    amount.round_dp_with_strategy(
        precision,
        rust_decimal::RoundingStrategy::MidpointAwayFromZero,
    )
}
