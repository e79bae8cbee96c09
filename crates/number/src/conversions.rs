//! Moves integers between `num` and the fixed 256-bit EVM representation.

use {
    alloy::primitives::U256,
    anyhow::{Result, ensure},
    num::{BigInt, BigUint, bigint::Sign},
};

pub fn big_uint_to_u256(input: &BigUint) -> Result<U256> {
    let bytes = input.to_bytes_be();
    ensure!(bytes.len() <= 32, "too large");
    Ok(U256::from_be_slice(&bytes))
}

pub fn big_int_to_u256(input: &BigInt) -> Result<U256> {
    ensure!(input.sign() != Sign::Minus, "negative");
    big_uint_to_u256(input.magnitude())
}

/// Encodes a non-negative integer as a 32-byte big-endian word, left padded
/// with zeros, the way the EVM lays out a `uint256`.
pub fn big_int_to_word(input: &BigInt) -> Result<[u8; 32]> {
    Ok(big_int_to_u256(input)?.to_be_bytes::<32>())
}

/// Reads a big-endian unsigned integer of any length.
pub fn big_uint_from_be_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}
