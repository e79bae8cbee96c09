//! Fixed-point scaling in units of 1/10000.
//!
//! Every quotient here truncates toward zero, also for negative operands.
//! Replicas must agree on that bit for bit, so do not swap in a flooring or
//! Euclidean division.

use {num::BigInt, std::sync::LazyLock};

/// 10000 permyriad make a whole.
pub static PERMYRIAD_BASE: LazyLock<BigInt> = LazyLock::new(|| BigInt::from(10_000));

/// `amount * permyriad / 10000`, truncated toward zero.
pub fn scale_permyriad(amount: &BigInt, permyriad: &BigInt) -> BigInt {
    (amount * permyriad) / &*PERMYRIAD_BASE
}

/// `amount + scale_permyriad(amount, permyriad)`, i.e. `amount * (1 + p/10000)`.
pub fn increment_by_scaled_permyriad(amount: &BigInt, permyriad: &BigInt) -> BigInt {
    amount + scale_permyriad(amount, permyriad)
}
