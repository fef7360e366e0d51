//! config command - print the effective configuration

use anyhow::Result;
use dirauth_core::AuthConfig;

pub fn execute(config: &AuthConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", config.to_toml()?);
    }

    if let Err(e) = config.validate() {
        eprintln!("warning: {}", e);
    }

    Ok(())
}
