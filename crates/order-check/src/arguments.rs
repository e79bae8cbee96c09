use {
    clap::Parser,
    model::identity::Direction,
    number::Amount,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
    },
    tracing::level_filters::LevelFilter,
};

#[derive(Parser)]
pub struct LoggingArguments {
    #[clap(
        long,
        env,
        default_value = "warn,order_check=debug,order_validation=debug,model=debug"
    )]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,

    /// Emit log events as JSON lines.
    #[clap(long, env)]
    pub use_json_logs: bool,
}

impl LoggingArguments {
    pub fn observe_config(&self) -> observe::Config {
        let mut config = observe::Config::default().with_env_filter(&self.log_filter);
        if let Some(level) = self.log_stderr_threshold.into_level() {
            config = config.with_stderr_threshold(level);
        }
        if self.use_json_logs {
            config = config.with_json_format();
        }
        config
    }
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            use_json_logs,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

#[derive(Parser)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// JSON file holding the signed order as submitted.
    #[clap(long, env)]
    pub order: PathBuf,

    /// JSON file holding the market snapshot: ticker, initial margin ratio
    /// and index price.
    #[clap(long, env)]
    pub market: PathBuf,

    /// Unix timestamp in seconds to check expiration against. Defaults to
    /// the current time.
    #[clap(long, env)]
    pub now: Option<i64>,

    /// Validate as `long` or `short` instead of the direction encoded in the
    /// order's asset data.
    #[clap(long, env)]
    pub direction: Option<Direction>,

    /// Unfilled quantity of the order. When set, the margin hold for it is
    /// reported as well.
    #[clap(long, env)]
    pub remaining_quantity: Option<Amount>,

    /// Maker transaction fee in permyriad added on top of the margin hold.
    #[clap(long, env, default_value = "0")]
    pub maker_tx_fee_permyriad: Amount,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            order,
            market,
            now,
            direction,
            remaining_quantity,
            maker_tx_fee_permyriad,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "order: {}", order.display())?;
        writeln!(f, "market: {}", market.display())?;
        writeln!(f, "now: {now:?}")?;
        writeln!(f, "direction: {direction:?}")?;
        writeln!(f, "remaining_quantity: {remaining_quantity:?}")?;
        writeln!(f, "maker_tx_fee_permyriad: {maker_tx_fee_permyriad}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_arguments() {
        let args =
            Arguments::try_parse_from(["order-check", "--order", "o.json", "--market", "m.json"])
                .unwrap();
        assert_eq!(args.order, PathBuf::from("o.json"));
        assert_eq!(args.now, None);
        assert_eq!(args.direction, None);
        assert_eq!(args.maker_tx_fee_permyriad, Amount::zero());
        assert_eq!(args.logging.log_stderr_threshold, LevelFilter::ERROR);
        assert!(!args.logging.use_json_logs);
    }

    #[test]
    fn parses_overrides() {
        let args = Arguments::try_parse_from([
            "order-check",
            "--order",
            "o.json",
            "--market",
            "m.json",
            "--now",
            "1600000000",
            "--direction",
            "short",
            "--remaining-quantity",
            "4",
            "--maker-tx-fee-permyriad",
            "15",
        ])
        .unwrap();
        assert_eq!(args.now, Some(1_600_000_000));
        assert_eq!(args.direction, Some(Direction::Short));
        assert_eq!(args.remaining_quantity, Some(Amount::from(4_i64)));
        assert_eq!(args.maker_tx_fee_permyriad, Amount::from(15_i64));
        assert!(args.to_string().contains("direction: Some(Short)"));
    }

    #[test]
    fn logging_arguments_build_observe_config() {
        let args = Arguments::try_parse_from([
            "order-check",
            "--order",
            "o.json",
            "--market",
            "m.json",
            "--log-filter",
            "info",
            "--log-stderr-threshold",
            "warn",
            "--use-json-logs",
        ])
        .unwrap();
        assert_eq!(
            args.logging.observe_config(),
            observe::Config::default()
                .with_env_filter("info")
                .with_stderr_threshold(tracing::Level::WARN)
                .with_json_format()
        );

        let args =
            Arguments::try_parse_from(["order-check", "--order", "o.json", "--market", "m.json"])
                .unwrap();
        assert_eq!(
            args.logging.observe_config(),
            observe::Config::default()
                .with_env_filter("warn,order_check=debug,order_validation=debug,model=debug")
                .with_stderr_threshold(tracing::Level::ERROR)
        );
    }

    #[test]
    fn rejects_non_decimal_amounts() {
        assert!(
            Arguments::try_parse_from([
                "order-check",
                "--order",
                "o.json",
                "--market",
                "m.json",
                "--remaining-quantity",
                "1e3",
            ])
            .is_err()
        );
    }
}
