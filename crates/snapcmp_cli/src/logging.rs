use tracing_subscriber::EnvFilter;

/// Install the stderr log formatter; `RUST_LOG` overrides the default filter.
pub(crate) fn init(verbose: bool) {
	let fallback = if verbose { "snapcmp=debug" } else { "snapcmp=info" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

	// A subscriber may already be installed when embedded in tests.
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();
}
