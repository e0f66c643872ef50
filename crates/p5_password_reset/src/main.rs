use std::{io, path::PathBuf, process};

use clap::Parser;
use p5_password_reset::{
    create_client, init_logging, load_env_file, Error, PasswordReset, ResetConfig, EMAIL_SUFFIX,
};
use tracing::error;

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// P5 password reset: set the shared dealer password on every @p5.local account
#[derive(Debug, Parser)]
#[command(name = "p5-password-reset", version)]
#[command(about = "Reset the password of every @p5.local account", long_about = None)]
struct Cli {
    /// Env file to load before reading SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY [default: .env]
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load the env file before logging so P5_RESET_LOG can come from it.
    let env_file = load_env_file(cli.env_file.as_deref());
    init_logging();

    if let Err(e) = run(env_file).await {
        error!("Error: {e}");
        process::exit(e.exit_code());
    }
}

async fn run(env_file: Result<Option<PathBuf>, Error>) -> Result<(), Error> {
    let env_file = env_file?;
    let config = ResetConfig::from_env()?;
    let client = create_client(&config)?;

    println!("🔐 P5 Password Reset");
    println!("====================");
    if let Some(path) = env_file {
        println!("   Env file: {}", path.display());
    }
    println!("   Service: {}", config.url);
    println!("   Accounts: *{}", EMAIL_SUFFIX);
    println!();

    let reset = PasswordReset::new(client);
    let mut stdout = io::stdout().lock();
    reset.run(&mut stdout).await?;

    Ok(())
}
