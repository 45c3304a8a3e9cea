use clap::Parser;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tollgate::config::LimiterConfig;
use tollgate::ratelimit::Limiter;
use tollgate::walkthrough::{self, Event, Schedule};

/// Replay the fixed-window walkthrough against a fresh limiter.
#[derive(Debug, Parser)]
#[command(name = "tollgate", version, about)]
struct Args {
    /// Requests allowed per window
    #[arg(long, default_value_t = 2)]
    count: u64,

    /// Window length in seconds
    #[arg(long, default_value_t = 1)]
    window_secs: u64,

    /// Print one JSON object per event instead of text
    #[arg(long)]
    json: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let config = LimiterConfig {
        count: args.count,
        window_secs: args.window_secs,
    };
    let limit = config.to_limit()?;
    let limiter = Limiter::new(limit);
    info!(limit = %limit, "Limiter initialized");

    if !args.json {
        println!("Fixed window limiter settings:");
        println!("requests limit - {}", limit.count());
        println!("duration in seconds - {}", config.window_secs);
        println!();
    }

    let json = args.json;
    let mut output_error = None;
    walkthrough::run(
        &limiter,
        &Schedule::default(),
        std::thread::sleep,
        |event| {
            if json {
                match serde_json::to_string(event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => {
                        output_error.get_or_insert(e);
                    }
                }
                return;
            }

            match event {
                Event::Step(step) => println!("is allowed request: {}", step.allowed),
                Event::Pause { duration } => {
                    println!();
                    println!("{}", pause_line(*duration));
                    println!();
                }
            }
        },
    );

    if let Some(e) = output_error {
        return Err(e.into());
    }

    Ok(())
}

/// Text shown while the walkthrough waits for the window to elapse.
fn pause_line(duration: Duration) -> String {
    if duration == Duration::from_secs(1) {
        "sleep one second".to_string()
    } else {
        format!("sleep {:?}", duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_line_one_second() {
        assert_eq!(pause_line(Duration::from_secs(1)), "sleep one second");
    }

    #[test]
    fn test_pause_line_other_windows() {
        assert_eq!(pause_line(Duration::from_secs(5)), "sleep 5s");
        assert_eq!(pause_line(Duration::from_millis(1500)), "sleep 1.5s");
    }
}
