pub mod arguments;

use {
    anyhow::{Context, Result},
    arguments::Arguments,
    model::{
        error::OrderError,
        identity::Direction,
        market::DerivativeMarket,
        order::{DerivativeOrder, OrderPayload},
    },
    number::Amount,
    order_validation::{AcceptedOrder, margin, validate_derivative_order},
    serde::{Serialize, de::DeserializeOwned},
    std::path::Path,
};

/// Outcome of checking one order, printed as JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<AcceptedOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_hold: Option<Amount>,
}

impl Report {
    fn rejected(err: OrderError) -> Self {
        Self {
            accepted: false,
            reason: Some(err.to_string()),
            order: None,
            margin_hold: None,
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

fn accept(
    payload: &OrderPayload,
    direction: Option<Direction>,
    market: &DerivativeMarket,
    now: i64,
) -> Result<AcceptedOrder, OrderError> {
    let order = DerivativeOrder::try_from(payload)?;
    validate_derivative_order(order, direction, market, now)
}

/// Loads the order and the market snapshot and runs them through the
/// derivative order checks. Only I/O and malformed JSON are errors, a
/// rejected order is a successful check with a negative report.
pub fn check(args: &Arguments) -> Result<Report> {
    let payload: OrderPayload = read_json(&args.order)?;
    let market: DerivativeMarket = read_json(&args.market)?;
    let now = args.now.unwrap_or_else(|| chrono::Utc::now().timestamp());

    let accepted = match accept(&payload, args.direction, &market, now) {
        Ok(accepted) => accepted,
        Err(err) => {
            tracing::info!(%err, "order rejected");
            return Ok(Report::rejected(err));
        }
    };

    let margin_hold = match &args.remaining_quantity {
        Some(remaining) => match margin::order_margin_hold(
            &accepted.validated.order,
            remaining,
            &args.maker_tx_fee_permyriad,
        ) {
            Ok(hold) => Some(Amount::from(hold)),
            Err(err) => return Ok(Report::rejected(err)),
        },
        None => None,
    };

    tracing::info!(hash = %accepted.hash, "order accepted");
    Ok(Report {
        accepted: true,
        reason: None,
        order: Some(accepted),
        margin_hold,
    })
}

/// Prints the report to stdout and returns whether the order was accepted.
pub fn run(args: &Arguments) -> Result<bool> {
    let report = check(args)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report.accepted)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        arguments::LoggingArguments,
        serde_json::{Value, json},
        std::path::PathBuf,
        tempfile::TempDir,
        tracing::level_filters::LevelFilter,
    };

    fn order_json() -> Value {
        json!({
            "chainID": 888,
            "exchangeAddress": "0x1111111111111111111111111111111111111111",
            "makerAddress": "0x2222222222222222222222222222222222222222",
            "takerAddress": "0x0000000000000000000000000000000000000000",
            "feeRecipientAddress": "0x3333333333333333333333333333333333333333",
            "senderAddress": "0x0000000000000000000000000000000000000000",
            "makerAssetAmount": "100",
            "takerAssetAmount": "10",
            "makerFee": "150",
            "takerFee": "0",
            "expirationTimeSeconds": "1700000000",
            "salt": "42",
            "makerAssetData": format!("0x{}", "ab".repeat(32)),
            "takerAssetData": format!("0x{}", "00".repeat(32)),
            "makerFeeAssetData": format!("0x{}", "00".repeat(32)),
            "takerFeeAssetData": "0x",
            "signature": format!("0x{}02", "11".repeat(65)),
        })
    }

    fn write(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, value.to_string()).unwrap();
        path
    }

    fn arguments(dir: &TempDir, order: Value, index_price: &str) -> Arguments {
        let market = json!({
            "ticker": "BTC/USDT",
            "initialMarginRatio": "1000",
            "indexPrice": index_price,
        });
        Arguments {
            logging: LoggingArguments {
                log_filter: "debug".to_string(),
                log_stderr_threshold: LevelFilter::ERROR,
                use_json_logs: false,
            },
            order: write(dir, "order.json", &order),
            market: write(dir, "market.json", &market),
            now: Some(1_600_000_000),
            direction: None,
            remaining_quantity: None,
            maker_tx_fee_permyriad: Amount::zero(),
        }
    }

    #[test]
    fn accepted_order_reports_derived_values() {
        observe::tracing::initialize_reentrant("debug");
        let dir = TempDir::new().unwrap();
        let mut args = arguments(&dir, order_json(), "95");
        args.remaining_quantity = Some(Amount::from(4_i64));
        args.maker_tx_fee_permyriad = Amount::from(1_000_i64);

        let report = check(&args).unwrap();
        assert!(report.accepted);
        // 150 * 1.1 = 165, * 4 / 10
        assert_eq!(report.margin_hold, Some(Amount::from(66_i64)));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["order"]["indexPriceRequirement"], json!("94"));
        assert_eq!(value["order"]["direction"], json!("long"));
        assert_eq!(value["marginHold"], json!("66"));
        assert!(value.get("reason").is_none());
    }

    #[test]
    fn rejection_is_a_report_not_an_error() {
        let dir = TempDir::new().unwrap();
        let report = check(&arguments(&dir, order_json(), "90")).unwrap();
        assert!(!report.accepted);
        assert_eq!(
            report.reason.as_deref(),
            Some("over leveraged order (index-price-long)")
        );
        assert!(report.order.is_none());
    }

    #[test]
    fn direction_can_be_overridden() {
        let dir = TempDir::new().unwrap();
        // The short requirement is 104, an index price of 105 is too high.
        let mut args = arguments(&dir, order_json(), "105");
        assert!(check(&args).unwrap().accepted);
        args.direction = Some(Direction::Short);
        let report = check(&args).unwrap();
        assert_eq!(
            report.reason.as_deref(),
            Some("over leveraged order (index-price-short)")
        );
    }

    #[test]
    fn malformed_amount_is_reported_with_its_field() {
        let dir = TempDir::new().unwrap();
        let mut order = order_json();
        order["makerFee"] = json!("1.5");
        let report = check(&arguments(&dir, order, "95")).unwrap();
        assert_eq!(report.reason.as_deref(), Some("failed to parse makerFee"));
    }

    #[test]
    fn unreadable_input_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut args = arguments(&dir, order_json(), "95");
        args.order = dir.path().join("missing.json");
        assert!(check(&args).is_err());

        std::fs::write(&args.market, "not json").unwrap();
        args.order = write(&dir, "order.json", &order_json());
        assert!(check(&args).is_err());
    }
}
