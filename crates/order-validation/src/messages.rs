//! Basic checks of the transaction messages that submit orders and manage
//! markets. These need no chain state and run before a message is executed.

use {
    model::{
        error::OrderError,
        market::{DerivativeMarket, Ticker},
        order::{OrderPayload, SignedOrder},
        signature::is_valid_signature,
    },
    serde::{Deserialize, Serialize},
};

/// Stateless validation of a message.
pub trait ValidateBasic {
    fn validate_basic(&self) -> Result<(), OrderError>;
}

fn require_sender(sender: &str) -> Result<(), OrderError> {
    if sender.is_empty() {
        return Err(OrderError::InvalidAddress("sender"));
    }
    Ok(())
}

fn require_field(value: &str, missing: &str) -> Result<(), OrderError> {
    if value.is_empty() {
        return Err(OrderError::BadField(missing.to_string()));
    }
    Ok(())
}

/// The order must parse, hash and carry a well formed signature.
fn check_order(order: Option<&OrderPayload>) -> Result<SignedOrder, OrderError> {
    let payload = order.ok_or(OrderError::MissingOrder)?;
    let order = SignedOrder::try_from(payload).map_err(|err| match err {
        OrderError::InvalidSignature => OrderError::InvalidSignature,
        err => OrderError::HashComputationFailed(err.to_string()),
    })?;
    order.hash()?;
    if !is_valid_signature(&order.signature) {
        return Err(OrderError::InvalidSignature);
    }
    Ok(order)
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpotOrder {
    pub sender: String,
    pub order: Option<OrderPayload>,
}

impl ValidateBasic for CreateSpotOrder {
    fn validate_basic(&self) -> Result<(), OrderError> {
        require_sender(&self.sender)?;
        let order = check_order(self.order.as_ref())?;
        if !order.taker_asset_amount.is_positive() {
            return Err(OrderError::InsufficientQuantity);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDerivativeOrder {
    pub sender: String,
    pub order: Option<OrderPayload>,
}

impl ValidateBasic for CreateDerivativeOrder {
    fn validate_basic(&self) -> Result<(), OrderError> {
        require_sender(&self.sender)?;
        check_order(self.order.as_ref())?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSpotMarket {
    pub sender: String,
    pub name: String,
    pub maker_asset_data: String,
    pub taker_asset_data: String,
}

impl ValidateBasic for RegisterSpotMarket {
    fn validate_basic(&self) -> Result<(), OrderError> {
        require_sender(&self.sender)?;
        self.name.parse::<Ticker>()?;
        require_field(&self.maker_asset_data, "no maker asset data specified")?;
        require_field(&self.taker_asset_data, "no taker asset data specified")
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDerivativeMarket {
    pub sender: String,
    pub market: DerivativeMarket,
}

impl ValidateBasic for RegisterDerivativeMarket {
    fn validate_basic(&self) -> Result<(), OrderError> {
        require_sender(&self.sender)?;
        self.market.ticker()?;
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspendDerivativeMarket {
    pub sender: String,
    pub market_id: String,
    pub exchange_address: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDerivativeMarket {
    pub sender: String,
    pub market_id: String,
    pub exchange_address: String,
}

fn check_derivative_market_reference(
    sender: &str,
    market_id: &str,
    exchange_address: &str,
) -> Result<(), OrderError> {
    require_sender(sender)?;
    require_field(market_id, "no derivative market ID specified")?;
    require_field(exchange_address, "no derivative exchange address specified")
}

impl ValidateBasic for SuspendDerivativeMarket {
    fn validate_basic(&self) -> Result<(), OrderError> {
        check_derivative_market_reference(&self.sender, &self.market_id, &self.exchange_address)
    }
}

impl ValidateBasic for ResumeDerivativeMarket {
    fn validate_basic(&self) -> Result<(), OrderError> {
        check_derivative_market_reference(&self.sender, &self.market_id, &self.exchange_address)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspendSpotMarket {
    pub sender: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSpotMarket {
    pub sender: String,
    pub name: String,
}

impl ValidateBasic for SuspendSpotMarket {
    fn validate_basic(&self) -> Result<(), OrderError> {
        require_sender(&self.sender)?;
        require_field(&self.name, "no trade pair name specified")
    }
}

impl ValidateBasic for ResumeSpotMarket {
    fn validate_basic(&self) -> Result<(), OrderError> {
        require_sender(&self.sender)?;
        require_field(&self.name, "no trade pair name specified")
    }
}
