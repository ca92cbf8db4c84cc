//! Prints an Argon2id hash for the credential file.
//!
//! ```text
//! $ echo -n 's3cret' | salat-hash
//! $argon2id$v=19$m=19456,t=2,p=1$...
//! ```

use std::io::Read;

use anyhow::{Context, bail};
use clap::Parser;

use salat_auth::PasswordHasher;

#[derive(Debug, Parser)]
#[command(name = "salat-hash", version, about = "Hash a password for the credential file")]
struct Args {
    /// Password to hash. Read from stdin when omitted.
    #[arg(long)]
    password: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let password = match args.password {
        Some(password) => password,
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read password from stdin")?;
            input.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    if password.is_empty() {
        bail!("Refusing to hash an empty password");
    }

    let hash = PasswordHasher::new()
        .hash_password(&password)
        .map_err(|e| anyhow::anyhow!(e.message))?;
    println!("{hash}");
    Ok(())
}
