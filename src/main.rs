use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use krishi::{load_secrets_file, Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "krishi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Secrets file with KEY=value lines (defaults to ./.env when present)
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Answer with canned advice instead of calling the hosted API
    #[arg(long, global = true)]
    offline: bool,

    #[arg(long, global = true)]
    model: Option<String>,

    #[arg(long, global = true)]
    temperature: Option<f32>,

    #[arg(long, global = true)]
    max_output_tokens: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let secrets = match cli.env_file.as_deref() {
        Some(path) => load_secrets_file(path)?,
        None => {
            let default_path = PathBuf::from(".env");
            if default_path.is_file() {
                debug!("Loading secrets from {}", default_path.display());
                load_secrets_file(&default_path)?
            } else {
                HashMap::new()
            }
        }
    };

    let config = ContainerConfig::from_env(&secrets)?.with_overrides(
        cli.model,
        cli.temperature,
        cli.max_output_tokens,
        cli.offline,
    );

    let container = Container::new(config)?;

    if let Commands::Serve { port, public } = cli.command {
        let ip = if public {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        };
        return krishi::serve(Arc::new(container), SocketAddr::new(ip, port)).await;
    }

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn ask_requires_a_question() {
        assert!(Cli::try_parse_from(["krishi", "ask"]).is_err());
    }

    #[test]
    fn ask_fills_defaults() {
        let cli = Cli::try_parse_from(["krishi", "--offline", "ask", "-q", "When to irrigate?"])
            .unwrap();
        assert!(cli.offline);
        match cli.command {
            Commands::Ask { query } => {
                assert_eq!(query.district, "Samastipur");
                assert_eq!(query.crop_stage, "Vegetative");
                assert_eq!(query.question, "When to irrigate?");
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn serve_defaults_to_port_8501() {
        let cli = Cli::try_parse_from(["krishi", "serve"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { port: 8501, public: false }));
    }
}
