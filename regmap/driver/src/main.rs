use clap::Parser;
use regmap_driver::{log_filter, run_to_completion, DriverConfig};

fn main() {
	let config = DriverConfig::parse();

	tracing_subscriber::fmt()
		.with_target(false)
		.with_env_filter(log_filter(config.reporting))
		.with_writer(std::io::stderr)
		.init();
	tracing::debug!(?config, "starting driver run");

	let outcomes = run_to_completion(&config, &mut std::io::stdout(), &mut std::io::stderr());
	let failed = outcomes.iter().filter(|outcome| !outcome.is_ok()).count();
	tracing::info!(devices = outcomes.len(), failed, "driver run complete");
}
