use std::time::Duration;

use anyhow::bail;
use clap::Parser;
use relay_client::{DEFAULT_BASE_URL, PollPolicy, RelayClient};
use tracing_subscriber::EnvFilter;

const SAMPLE_PROMPT: &str = "How do I print \"Hello world\" in Rust?";

#[derive(Debug, Parser)]
#[command(
    name = "relay-ask",
    version,
    about = "Send a prompt through the relay and wait for the answer"
)]
struct Args {
    #[arg(short, long)]
    prompt: Option<String>,

    #[arg(long, env = "RELAY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Seconds between status checks.
    #[arg(long, default_value_t = 3.0)]
    interval_secs: f64,

    /// Backoff multiplier (1.0 = fixed interval).
    #[arg(long, default_value_t = 1.0)]
    backoff: f64,

    /// Longest single delay when backing off.
    #[arg(long, default_value_t = 30.0)]
    max_interval_secs: f64,

    /// Give up after this many seconds.
    #[arg(long, default_value_t = 300.0)]
    max_wait_secs: f64,

    /// Limit for a single HTTP request.
    #[arg(long, default_value_t = 30.0)]
    request_timeout_secs: f64,

    #[arg(long, env = "RELAY_LOG", default_value = "warn")]
    log_level: String,
}

fn seconds(value: f64, flag: &str) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(value).map_err(|e| anyhow::anyhow!("--{flag}: {e}"))
}

/// Like `seconds`, but zero is rejected.
fn positive_seconds(value: f64, flag: &str) -> anyhow::Result<Duration> {
    let duration = seconds(value, flag)?;
    if duration.is_zero() {
        bail!("--{flag} must be greater than zero");
    }
    Ok(duration)
}

fn poll_policy(args: &Args) -> anyhow::Result<PollPolicy> {
    Ok(PollPolicy::fixed(
        positive_seconds(args.interval_secs, "interval-secs")?,
        seconds(args.max_wait_secs, "max-wait-secs")?,
    )
    .with_backoff(args.backoff, seconds(args.max_interval_secs, "max-interval-secs")?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let policy = poll_policy(&args)?;
    let request_timeout = positive_seconds(args.request_timeout_secs, "request-timeout-secs")?;
    let client = RelayClient::new(args.base_url)
        .with_policy(policy)
        .with_request_timeout(request_timeout);

    let prompt = args.prompt.unwrap_or_else(|| SAMPLE_PROMPT.to_string());
    let task_id = client.send_prompt(&prompt).await?;
    println!("[{task_id}] {prompt}");

    let response = client.wait_for_response(&task_id).await?;
    println!("--- [Response {task_id} Received] ---");
    println!("{response}");
    println!("--- [Response {task_id} End] ---\n");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("relay-ask").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = poll_policy(&parse(&["--interval-secs", "0"])).unwrap_err();
        assert!(err.to_string().contains("--interval-secs"));
    }

    #[test]
    fn negative_interval_is_rejected() {
        assert!(poll_policy(&parse(&["--interval-secs=-1"])).is_err());
    }

    #[test]
    fn zero_request_timeout_is_rejected() {
        assert!(positive_seconds(0.0, "request-timeout-secs").is_err());
    }

    #[test]
    fn default_flags_give_default_policy() {
        let policy = poll_policy(&parse(&[])).unwrap();
        assert_eq!(policy.interval, Duration::from_secs(3));
        assert_eq!(policy.max_wait, Duration::from_secs(300));
        assert_eq!(policy.max_interval, Duration::from_secs(30));
    }
}
