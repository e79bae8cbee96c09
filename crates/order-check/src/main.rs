use clap::Parser;

fn main() {
    let args = order_check::arguments::Arguments::parse();
    observe::tracing::initialize(&args.logging.observe_config());
    tracing::info!("running order-check with validated arguments:\n{}", args);
    match order_check::run(&args) {
        Ok(true) => (),
        Ok(false) => std::process::exit(1),
        Err(err) => {
            tracing::error!(?err, "order check failed");
            std::process::exit(2);
        }
    }
}
