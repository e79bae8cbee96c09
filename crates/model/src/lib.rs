//! Order and market models of the derivatives exchange together with the
//! pure derivations (identities, order type, order hash) performed on them.

pub mod error;
pub mod identity;
pub mod market;
pub mod order;
pub mod signature;

use {
    alloy::primitives::{Address, B256, keccak256},
    std::{fmt, sync::LazyLock},
};

/// The EIP-712 domain name of the 0x v3 exchange.
static DOMAIN_NAME: LazyLock<B256> = LazyLock::new(|| keccak256(b"0x Protocol"));

/// The EIP-712 domain version of the 0x v3 exchange.
static DOMAIN_VERSION: LazyLock<B256> = LazyLock::new(|| keccak256(b"3.0.0"));

/// The EIP-712 domain type used computing the domain separator.
static DOMAIN_TYPE_HASH: LazyLock<B256> = LazyLock::new(|| {
    keccak256(b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)")
});

#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct DomainSeparator(pub [u8; 32]);

impl fmt::Debug for DomainSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", B256::from(self.0))
    }
}

impl DomainSeparator {
    pub fn new(chain_id: u64, exchange_address: Address) -> Self {
        let mut encoded = [0u8; 160];
        encoded[0..32].copy_from_slice(DOMAIN_TYPE_HASH.as_slice());
        encoded[32..64].copy_from_slice(DOMAIN_NAME.as_slice());
        encoded[64..96].copy_from_slice(DOMAIN_VERSION.as_slice());
        encoded[120..128].copy_from_slice(&chain_id.to_be_bytes());
        encoded[140..160].copy_from_slice(exchange_address.as_slice());
        Self(keccak256(encoded).0)
    }
}

/// `keccak256(0x1901 ++ domainSeparator ++ structHash)`
pub fn hashed_eip712_message(domain_separator: &DomainSeparator, struct_hash: &[u8; 32]) -> B256 {
    let mut message = [0u8; 66];
    message[0..2].copy_from_slice(&[0x19, 0x01]);
    message[2..34].copy_from_slice(&domain_separator.0);
    message[34..66].copy_from_slice(struct_hash);
    keccak256(message)
}
