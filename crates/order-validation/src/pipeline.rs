//! Accept or reject a derivative order against a market snapshot.
//!
//! The checks run in a fixed order and stop at the first failure:
//!
//! 1. the order type nonce is recognized
//! 2. the order has not expired (`expiration <= now` is expired)
//! 3. the margin covers the contract price requirement
//! 4. the index price is on the safe side of the index price requirement
//!
//! An accepted order comes back as a [`ValidatedOrder`] carrying the values
//! derived on the way. The input order itself is never modified, so running
//! the pipeline again on the same order yields the same result.

use {
    crate::margin::{contract_price_margin_requirement, index_price_margin_requirement},
    alloy::primitives::B256,
    model::{
        error::{OrderError, OverLeverageKind},
        identity::{Direction, MarketId, SubaccountId},
        market::DerivativeMarket,
        order::DerivativeOrder,
    },
    num::BigInt,
    serde::Serialize,
    serde_with::{DisplayFromStr, serde_as},
    tracing::instrument,
};

/// A derivative order that passed every check, with the values derived while
/// checking it.
#[serde_as]
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedOrder {
    pub order: DerivativeOrder,
    pub direction: Direction,
    pub order_type: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub index_price_requirement: BigInt,
}

impl ValidatedOrder {
    pub fn into_order(self) -> DerivativeOrder {
        self.order
    }
}

/// Everything the matching engine needs to place an accepted order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedOrder {
    pub hash: B256,
    pub market_id: MarketId,
    pub subaccount_id: SubaccountId,
    #[serde(flatten)]
    pub validated: ValidatedOrder,
}

/// Runs the derivative order checks for an order whose direction is already
/// known.
#[instrument(skip_all, fields(%direction, index_price = %market.index_price))]
pub fn validate(
    order: DerivativeOrder,
    direction: Direction,
    market: &DerivativeMarket,
    now: i64,
) -> Result<ValidatedOrder, OrderError> {
    let order_type = order.order_type().inspect_err(|_| {
        tracing::debug!(
            maker_fee_asset_data = %order.signed().maker_fee_asset_data,
            "rejected order with unrecognized type"
        );
    })?;

    let expiration = order.expiration_time_seconds();
    if expiration.as_big_int() <= &BigInt::from(now) {
        tracing::debug!(%expiration, now, "rejected expired order");
        return Err(OrderError::OrderExpired {
            expiration: expiration.clone(),
            current: now,
        });
    }

    let contract_requirement = contract_price_margin_requirement(&order, market);
    if order.margin() < &contract_requirement {
        tracing::debug!(
            margin = %order.margin(),
            requirement = %contract_requirement,
            "rejected order below contract price margin requirement"
        );
        return Err(OrderError::OverLeveragedOrder(
            OverLeverageKind::ContractPrice,
        ));
    }

    let index_price_requirement = index_price_margin_requirement(&order, direction, market)?;
    let index_price = market.index_price.as_big_int();
    let over_leveraged = match direction {
        Direction::Long if index_price < &index_price_requirement => {
            Some(OverLeverageKind::IndexPriceLong)
        }
        Direction::Short if index_price > &index_price_requirement => {
            Some(OverLeverageKind::IndexPriceShort)
        }
        _ => None,
    };
    if let Some(kind) = over_leveraged {
        tracing::debug!(
            requirement = %index_price_requirement,
            %kind,
            "rejected order outside index price margin requirement"
        );
        return Err(OrderError::OverLeveragedOrder(kind));
    }

    tracing::debug!(
        order_type,
        requirement = %index_price_requirement,
        "accepted derivative order"
    );
    Ok(ValidatedOrder {
        order,
        direction,
        order_type,
        index_price_requirement,
    })
}

/// Derives the order's identity and hash and runs [`validate`] with the
/// direction encoded in its asset data, or with `direction` when given.
///
/// Identity and hash are derived first. They need every fee, amount and the
/// salt to fit a uint256, so a negative `makerFee` or `salt` fails with
/// `HashComputationFailed` and a negative `takerFee` with `BadField` before
/// any order type, expiry or leverage verdict. [`validate`] alone accepts
/// signed amounts.
pub fn validate_derivative_order(
    order: DerivativeOrder,
    direction: Option<Direction>,
    market: &DerivativeMarket,
    now: i64,
) -> Result<AcceptedOrder, OrderError> {
    let identity = order.signed().identity()?;
    let hash = order.signed().hash()?;
    let direction = direction.unwrap_or(identity.direction);
    let span = tracing::debug_span!(
        "derivative_order",
        %hash,
        market_id = %identity.market_id,
    );
    let _guard = span.enter();

    let validated = validate(order, direction, market, now)?;
    Ok(AcceptedOrder {
        hash,
        market_id: identity.market_id,
        subaccount_id: identity.subaccount_id,
        validated,
    })
}
