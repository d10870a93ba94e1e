use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "studygate", version, about = "Study-mode navigation gate")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Study session control
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Check whether a URL would be allowed
    Check(commands::check::CheckArgs),
    /// Blocklist management
    Blocklist {
        #[command(subcommand)]
        action: commands::blocklist::BlocklistAction,
    },
    /// Completed study sessions
    History(commands::history::HistoryArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studygate=info,studygate_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Session { action } => commands::session::run(action),
        Commands::Check(args) => commands::check::run(args),
        Commands::Blocklist { action } => commands::blocklist::run(action),
        Commands::History(args) => commands::history::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
