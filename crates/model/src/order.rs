//! Contains the signed 0x v3 order in its wire form and its typed form, plus
//! the derivative view the margin checks operate on.

use {
    crate::{
        DomainSeparator,
        error::OrderError,
        hashed_eip712_message,
        identity::{self, OrderIdentity},
    },
    alloy::primitives::{Address, B256, Bytes, hex, keccak256},
    num::BigInt,
    number::{Amount, conversions::big_int_to_word},
    serde::{Deserialize, Serialize},
    std::{str::FromStr, sync::LazyLock},
};

/// keccak256 of the 0x v3 `Order` EIP-712 type.
static ORDER_TYPE_HASH: LazyLock<B256> = LazyLock::new(|| {
    keccak256(
        b"Order(address makerAddress,address takerAddress,address feeRecipientAddress,\
          address senderAddress,uint256 makerAssetAmount,uint256 takerAssetAmount,\
          uint256 makerFee,uint256 takerFee,uint256 expirationTimeSeconds,uint256 salt,\
          bytes makerAssetData,bytes takerAssetData,bytes makerFeeAssetData,\
          bytes takerFeeAssetData)",
    )
});

/// An order exactly as submitted: amounts as decimal strings, addresses and
/// byte blobs as hex strings. Nothing has been checked yet.
///
/// Submitters omit empty fields, so every key is optional. An omitted key
/// reads as its empty value: chain id 0 and empty byte blobs are valid, an
/// omitted amount, address or signature fails the typed conversion exactly
/// like an empty string does.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderPayload {
    #[serde(rename = "chainID", alias = "chainId")]
    pub chain_id: u64,
    pub exchange_address: String,
    pub maker_address: String,
    pub taker_address: String,
    pub fee_recipient_address: String,
    pub sender_address: String,
    pub maker_asset_amount: String,
    pub taker_asset_amount: String,
    pub maker_fee: String,
    pub taker_fee: String,
    pub expiration_time_seconds: String,
    pub salt: String,
    pub maker_asset_data: String,
    pub taker_asset_data: String,
    pub maker_fee_asset_data: String,
    pub taker_fee_asset_data: String,
    pub signature: String,
}

/// A fully parsed signed order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedOrder {
    pub chain_id: u64,
    pub exchange_address: Address,
    pub maker_address: Address,
    pub taker_address: Address,
    pub fee_recipient_address: Address,
    pub sender_address: Address,
    pub maker_asset_amount: Amount,
    pub taker_asset_amount: Amount,
    pub maker_fee: Amount,
    pub taker_fee: Amount,
    pub expiration_time_seconds: Amount,
    pub salt: Amount,
    pub maker_asset_data: Bytes,
    pub taker_asset_data: Bytes,
    pub maker_fee_asset_data: Bytes,
    pub taker_fee_asset_data: Bytes,
    pub signature: Bytes,
}

fn address(field: &'static str, value: &str) -> Result<Address, OrderError> {
    Address::from_str(value).map_err(|_| OrderError::InvalidAddress(field))
}

fn amount(field: &'static str, value: &str) -> Result<Amount, OrderError> {
    Amount::from_str(value).map_err(|_| OrderError::ParseFailure(field))
}

fn asset_data(field: &'static str, value: &str) -> Result<Bytes, OrderError> {
    hex::decode(value)
        .map(Bytes::from)
        .map_err(|err| OrderError::BadField(format!("{field} is not hex: {err}")))
}

impl TryFrom<&OrderPayload> for SignedOrder {
    type Error = OrderError;

    fn try_from(payload: &OrderPayload) -> Result<Self, Self::Error> {
        let signature = hex::decode(&payload.signature)
            .ok()
            .filter(|signature| !signature.is_empty())
            .ok_or(OrderError::InvalidSignature)?;

        Ok(Self {
            chain_id: payload.chain_id,
            exchange_address: address("exchangeAddress", &payload.exchange_address)?,
            maker_address: address("makerAddress", &payload.maker_address)?,
            taker_address: address("takerAddress", &payload.taker_address)?,
            fee_recipient_address: address("feeRecipientAddress", &payload.fee_recipient_address)?,
            sender_address: address("senderAddress", &payload.sender_address)?,
            maker_asset_amount: amount("makerAssetAmount", &payload.maker_asset_amount)?,
            taker_asset_amount: amount("takerAssetAmount", &payload.taker_asset_amount)?,
            maker_fee: amount("makerFee", &payload.maker_fee)?,
            taker_fee: amount("takerFee", &payload.taker_fee)?,
            expiration_time_seconds: amount(
                "expirationTimeSeconds",
                &payload.expiration_time_seconds,
            )?,
            salt: amount("salt", &payload.salt)?,
            maker_asset_data: asset_data("makerAssetData", &payload.maker_asset_data)?,
            taker_asset_data: asset_data("takerAssetData", &payload.taker_asset_data)?,
            maker_fee_asset_data: asset_data("makerFeeAssetData", &payload.maker_fee_asset_data)?,
            taker_fee_asset_data: asset_data("takerFeeAssetData", &payload.taker_fee_asset_data)?,
            signature: signature.into(),
        })
    }
}

impl From<&SignedOrder> for OrderPayload {
    fn from(order: &SignedOrder) -> Self {
        Self {
            chain_id: order.chain_id,
            exchange_address: order.exchange_address.to_string(),
            maker_address: order.maker_address.to_string(),
            taker_address: order.taker_address.to_string(),
            fee_recipient_address: order.fee_recipient_address.to_string(),
            sender_address: order.sender_address.to_string(),
            maker_asset_amount: order.maker_asset_amount.to_string(),
            taker_asset_amount: order.taker_asset_amount.to_string(),
            maker_fee: order.maker_fee.to_string(),
            taker_fee: order.taker_fee.to_string(),
            expiration_time_seconds: order.expiration_time_seconds.to_string(),
            salt: order.salt.to_string(),
            maker_asset_data: order.maker_asset_data.to_string(),
            taker_asset_data: order.taker_asset_data.to_string(),
            maker_fee_asset_data: order.maker_fee_asset_data.to_string(),
            taker_fee_asset_data: order.taker_fee_asset_data.to_string(),
            signature: order.signature.to_string(),
        }
    }
}

impl SignedOrder {
    /// Returns the value of hashStruct() over the order as defined by EIP-712.
    ///
    /// https://eips.ethereum.org/EIPS/eip-712#definition-of-hashstruct
    pub fn hash_struct(&self) -> Result<[u8; 32], OrderError> {
        let uint = |field: &str, value: &BigInt| {
            big_int_to_word(value).map_err(|err| {
                OrderError::HashComputationFailed(format!("{field} is not a uint256: {err}"))
            })
        };

        let mut hash_data = [0u8; 480];
        hash_data[0..32].copy_from_slice(ORDER_TYPE_HASH.as_slice());
        // Addresses are extended to 256 bits, the upper 12 bytes stay 0.
        hash_data[44..64].copy_from_slice(self.maker_address.as_slice());
        hash_data[76..96].copy_from_slice(self.taker_address.as_slice());
        hash_data[108..128].copy_from_slice(self.fee_recipient_address.as_slice());
        hash_data[140..160].copy_from_slice(self.sender_address.as_slice());
        hash_data[160..192].copy_from_slice(&uint(
            "makerAssetAmount",
            self.maker_asset_amount.as_big_int(),
        )?);
        hash_data[192..224].copy_from_slice(&uint(
            "takerAssetAmount",
            self.taker_asset_amount.as_big_int(),
        )?);
        hash_data[224..256].copy_from_slice(&uint("makerFee", self.maker_fee.as_big_int())?);
        hash_data[256..288].copy_from_slice(&uint("takerFee", self.taker_fee.as_big_int())?);
        hash_data[288..320].copy_from_slice(&uint(
            "expirationTimeSeconds",
            self.expiration_time_seconds.as_big_int(),
        )?);
        hash_data[320..352].copy_from_slice(&uint("salt", self.salt.as_big_int())?);
        hash_data[352..384].copy_from_slice(keccak256(&self.maker_asset_data).as_slice());
        hash_data[384..416].copy_from_slice(keccak256(&self.taker_asset_data).as_slice());
        hash_data[416..448].copy_from_slice(keccak256(&self.maker_fee_asset_data).as_slice());
        hash_data[448..480].copy_from_slice(keccak256(&self.taker_fee_asset_data).as_slice());
        Ok(keccak256(hash_data).0)
    }

    pub fn domain_separator(&self) -> DomainSeparator {
        DomainSeparator::new(self.chain_id, self.exchange_address)
    }

    /// The EIP-712 order hash the exchange contract signs and fills by.
    pub fn hash(&self) -> Result<B256, OrderError> {
        Ok(hashed_eip712_message(
            &self.domain_separator(),
            &self.hash_struct()?,
        ))
    }

    /// Direction and market derived from the asset data, subaccount from
    /// the maker address and taker fee.
    pub fn identity(&self) -> Result<OrderIdentity, OrderError> {
        let (direction, market_id) =
            identity::direction_and_market(&self.maker_asset_data, &self.taker_asset_data);
        let subaccount_id =
            identity::subaccount_id(&self.maker_address, self.taker_fee.as_big_int())?;
        Ok(OrderIdentity {
            direction,
            market_id,
            subaccount_id,
        })
    }
}

/// A signed order read as a derivative position: the maker asset amount is
/// the contract price, the taker asset amount the quantity and the maker fee
/// the posted margin.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DerivativeOrder(pub SignedOrder);

impl DerivativeOrder {
    pub fn signed(&self) -> &SignedOrder {
        &self.0
    }

    pub fn price(&self) -> &BigInt {
        &self.0.maker_asset_amount
    }

    pub fn quantity(&self) -> &BigInt {
        &self.0.taker_asset_amount
    }

    pub fn margin(&self) -> &BigInt {
        &self.0.maker_fee
    }

    pub fn expiration_time_seconds(&self) -> &Amount {
        &self.0.expiration_time_seconds
    }

    pub fn order_type(&self) -> Result<u64, OrderError> {
        identity::order_type(&self.0.maker_fee_asset_data)
    }
}

impl TryFrom<&OrderPayload> for DerivativeOrder {
    type Error = OrderError;

    fn try_from(payload: &OrderPayload) -> Result<Self, Self::Error> {
        SignedOrder::try_from(payload).map(Self)
    }
}

#[cfg(test)]
pub mod test_util {
    use super::*;

    /// A long BTC/USDT order: price 100, quantity 10, margin 150, type 0.
    pub fn payload() -> OrderPayload {
        OrderPayload {
            chain_id: 888,
            exchange_address: "0x1111111111111111111111111111111111111111".to_string(),
            maker_address: "0x2222222222222222222222222222222222222222".to_string(),
            taker_address: "0x0000000000000000000000000000000000000000".to_string(),
            fee_recipient_address: "0x3333333333333333333333333333333333333333".to_string(),
            sender_address: "0x0000000000000000000000000000000000000000".to_string(),
            maker_asset_amount: "100".to_string(),
            taker_asset_amount: "10".to_string(),
            maker_fee: "150".to_string(),
            taker_fee: "0".to_string(),
            expiration_time_seconds: "1700000000".to_string(),
            salt: "42".to_string(),
            maker_asset_data: format!("0x{}", "ab".repeat(32)),
            taker_asset_data: format!("0x{}", "00".repeat(32)),
            maker_fee_asset_data: format!("0x{}", "00".repeat(32)),
            taker_fee_asset_data: "0x".to_string(),
            signature: format!("0x{}02", "11".repeat(65)),
        }
    }
}
