use clap::Parser;
use cloud_detect::{detect_with_options, DetectOptions, ProviderId};
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Detect the cloud provider hosting this machine.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
struct Cli {
    /// Maximum time to wait for detection, in seconds. 0 uses the default.
    #[arg(short, long, default_value_t = 5)]
    timeout: u64,

    /// Print the supported providers and exit.
    #[arg(long)]
    list: bool,

    /// Log every check to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .try_init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list {
        for provider in ProviderId::all() {
            println!("{provider}");
        }
        return;
    }

    let provider = detect_with_options(DetectOptions::from_secs(cli.timeout)).await;
    println!("{provider}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging(false);
        init_logging(true);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["cloud-detect"]);
        assert_eq!(cli.timeout, 5);
        assert!(!cli.list);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["cloud-detect", "--timeout", "1", "--list", "-v"]);
        assert_eq!(cli.timeout, 1);
        assert!(cli.list);
        assert!(cli.verbose);
    }
}
