use clap::{Parser, Subcommand};
use pg2graphql::error::Result;

mod cli;

#[derive(Parser)]
#[command(name = "pg2graphql")]
#[command(version = "0.1.0")]
#[command(about = "Turn PostgreSQL tables into GraphQL APIs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start GraphQL server
    Serve {
        /// Config file path
        #[arg(long, default_value = "pg2graphql.toml")]
        config: String,

        /// Server port (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Introspect the database and print the table snapshot as JSON
    Introspect {
        /// Config file path
        #[arg(long, default_value = "pg2graphql.toml")]
        config: String,

        /// Output file path (if not specified, outputs to stdout)
        #[arg(long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, port } => {
            cli::serve::run(config, port).await?;
        }
        Commands::Introspect { config, output } => {
            cli::introspect::run(config, output).await?;
        }
    }

    Ok(())
}
