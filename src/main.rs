use clap::Parser;
use env_logger::Env;
use partner_authorization_docs::cli::{Cli, Commands};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match cli.command() {
        Commands::Generate => {
            let message = partner_authorization_docs::generate_once().await?;
            println!("{}", message);
            Ok(())
        }
        Commands::Serve => partner_authorization_docs::run().await,
    }
}
