use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // 二重初期化（テストなど）は無視する
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
