//! Canonical identifiers derived positionally from an order's asset data.
//!
//! Byte offsets and padding here define the identity of markets and
//! subaccounts across the ledger. Changing any of them re-keys every
//! position.

use {
    crate::error::OrderError,
    alloy::primitives::{Address, B256, FixedBytes, keccak256},
    num::{BigInt, BigUint, ToPrimitive},
    number::conversions::{big_int_to_word, big_uint_from_be_bytes},
    serde::{Deserialize, Serialize},
    strum::{Display, EnumString},
};

/// Length of the asset data prefix that names a market.
pub const MARKET_ID_LENGTH: usize = 20;

/// Length of the asset data prefix that encodes the order type nonce.
pub const ORDER_TYPE_WORD_LENGTH: usize = 32;

/// Order type nonces that are understood.
pub const RECOGNIZED_ORDER_TYPES: [u64; 2] = [0, 5];

pub type MarketId = FixedBytes<MARKET_ID_LENGTH>;
pub type SubaccountId = B256;

#[derive(
    Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

/// Where an order lives: its market, the maker's subaccount and the side.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderIdentity {
    pub direction: Direction,
    pub market_id: MarketId,
    pub subaccount_id: SubaccountId,
}

/// Market and direction of an order. An all-zero taker asset prefix marks a
/// long order on the maker asset market; anything else is short on the taker
/// asset market.
pub fn direction_and_market(
    maker_asset_data: &[u8],
    taker_asset_data: &[u8],
) -> (Direction, MarketId) {
    let maker = prefix(maker_asset_data, MARKET_ID_LENGTH);
    let taker = prefix(taker_asset_data, MARKET_ID_LENGTH);

    if taker == [0u8; MARKET_ID_LENGTH].as_slice() {
        (Direction::Long, left_padded(maker))
    } else {
        (Direction::Short, left_padded(taker))
    }
}

/// `keccak256(makerAddress (20 bytes) ++ takerFee as uint256 (32 bytes))`
pub fn subaccount_id(
    maker_address: &Address,
    taker_fee: &BigInt,
) -> Result<SubaccountId, OrderError> {
    let fee = big_int_to_word(taker_fee).map_err(|err| {
        OrderError::BadField(format!("takerFee {taker_fee} does not fit a uint256: {err}"))
    })?;
    let mut preimage = [0u8; 20 + 32];
    preimage[..20].copy_from_slice(maker_address.as_slice());
    preimage[20..].copy_from_slice(&fee);
    Ok(keccak256(preimage))
}

/// Decodes the order type nonce from the leading 32-byte big-endian word of
/// the maker fee asset data. The whole word must equal one of
/// [`RECOGNIZED_ORDER_TYPES`].
pub fn order_type(maker_fee_asset_data: &[u8]) -> Result<u64, OrderError> {
    let word = maker_fee_asset_data
        .get(..ORDER_TYPE_WORD_LENGTH)
        .ok_or(OrderError::UnrecognizedOrderType)?;
    let value: BigUint = big_uint_from_be_bytes(word);
    value
        .to_u64()
        .filter(|nonce| RECOGNIZED_ORDER_TYPES.contains(nonce))
        .ok_or(OrderError::UnrecognizedOrderType)
}

fn prefix(data: &[u8], len: usize) -> &[u8] {
    &data[..data.len().min(len)]
}

fn left_padded(bytes: &[u8]) -> MarketId {
    let mut id = [0u8; MARKET_ID_LENGTH];
    id[MARKET_ID_LENGTH - bytes.len()..].copy_from_slice(bytes);
    MarketId::from(id)
}
