//! rconping CLI
//!
//! Run a console command or query server status from the command line.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rconping::{Config, Probe, RconClient, StatusClient};
use tracing_subscriber::{fmt, EnvFilter};

/// rconping CLI
#[derive(Parser, Debug)]
#[command(name = "rconping-cli")]
#[command(about = "Remote console and status ping client for game servers")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1", global = true)]
    host: String,

    /// Connect/read timeout in seconds
    #[arg(short, long, default_value = "5", global = true)]
    timeout: u64,

    /// Log protocol activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute one remote console command
    Rcon {
        /// Remote console port
        #[arg(short, long, default_value = "25575")]
        port: u16,

        /// Remote console password
        #[arg(long, default_value = "")]
        password: String,

        /// The command text (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        command: Vec<String>,
    },

    /// Query live server status
    Status {
        /// Game port
        #[arg(short, long, default_value = "25565")]
        port: u16,

        /// Print the status record as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing/logging
    let default_filter = if args.verbose { "info,rconping=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let builder = Config::builder().host(&args.host).timeout_secs(args.timeout);

    match args.command {
        Commands::Rcon {
            port,
            password,
            command,
        } => {
            let config = builder.rcon_port(port).rcon_password(password).build();
            let mut client = RconClient::new(config);

            match client.command(&command.join(" ")) {
                Ok(reply) => {
                    println!("{}", reply);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    tracing::error!("Command failed: {}", e);
                    eprintln!("error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Status { port, json } => {
            let config = builder.status_port(port).build();

            match StatusClient::new(config).probe() {
                Probe::Online(status) if json => match serde_json::to_string_pretty(&status) {
                    Ok(text) => {
                        println!("{}", text);
                        ExitCode::SUCCESS
                    }
                    Err(e) => {
                        eprintln!("error: {}", e);
                        ExitCode::FAILURE
                    }
                },
                Probe::Online(status) => {
                    println!("online");
                    println!("version:  {} (protocol {})", status.version_name, status.protocol);
                    println!("players:  {}/{}", status.players_online, status.players_max);
                    if !status.player_sample.is_empty() {
                        println!("sample:   {}", status.player_sample.join(", "));
                    }
                    println!("motd:     {}", status.motd);
                    ExitCode::SUCCESS
                }
                Probe::Unreachable => {
                    println!("offline");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
