use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "partner-authorization-docs")]
#[command(about = "Generate data and brand authorization documents for eligible partners")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run one generation batch and print its status
    Generate,
    /// Serve the HTTP trigger (default)
    Serve,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}
