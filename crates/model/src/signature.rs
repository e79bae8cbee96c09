use {
    serde::{Deserialize, Serialize},
    strum::{Display, FromRepr},
};

/// The signature scheme of a 0x v3 order, stored in the last byte of the
/// signature.
#[derive(
    Eq, PartialEq, Clone, Copy, Debug, Deserialize, Serialize, Hash, Display, FromRepr,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum SignatureType {
    Illegal = 0,
    Invalid = 1,
    Eip712 = 2,
    EthSign = 3,
    Wallet = 4,
    Validator = 5,
    PreSigned = 6,
    Eip1271Wallet = 7,
}

/// `r (32) ++ s (32) ++ v (1) ++ type (1)`
pub const ECDSA_SIGNATURE_LENGTH: usize = 66;

/// A validator address (20 bytes) followed by the type byte, at least.
pub const MIN_VALIDATOR_SIGNATURE_LENGTH: usize = 21;

impl SignatureType {
    /// Reads the scheme tag from the trailing byte. `None` for empty
    /// signatures and for tags outside the known set.
    pub fn from_signature(signature: &[u8]) -> Option<Self> {
        signature.last().copied().and_then(Self::from_repr)
    }

    /// Whether `signature` is well formed for this scheme.
    ///
    /// Only the shape is checked. ECDSA schemes are not recovered against
    /// the maker address and wallet/validator schemes would need on-chain
    /// state, so a `true` here does not prove who signed the order.
    pub fn accepts(&self, signature: &[u8]) -> bool {
        match self {
            Self::Illegal | Self::Invalid => false,
            // TODO: split into r, s, v and ecrecover against the maker once
            // the maker address check is wired into order validation.
            Self::Eip712 | Self::EthSign => signature.len() == ECDSA_SIGNATURE_LENGTH,
            Self::Validator => signature.len() >= MIN_VALIDATOR_SIGNATURE_LENGTH,
            Self::PreSigned | Self::Wallet | Self::Eip1271Wallet => true,
        }
    }
}

/// Format check of a raw order signature. Unknown tags are rejected.
pub fn is_valid_signature(signature: &[u8]) -> bool {
    let valid = SignatureType::from_signature(signature)
        .is_some_and(|signature_type| signature_type.accepts(signature));
    if !valid {
        tracing::debug!(len = signature.len(), tag = ?signature.last(), "rejected signature format");
    }
    valid
}
