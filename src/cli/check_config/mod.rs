//! Check-config command - prints the configuration the server would use

use crate::config::AppConfig;
use crate::infrastructure::user::MAX_MIN_AGE;

/// Load configuration, validate it and print it as JSON
pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    println!("{}", render(&config)?);

    Ok(())
}

fn render(config: &AppConfig) -> anyhow::Result<String> {
    if config.users.min_age > MAX_MIN_AGE {
        anyhow::bail!(
            "users.min_age is {} but must not exceed {}",
            config.users.min_age,
            MAX_MIN_AGE
        );
    }

    Ok(serde_json::to_string_pretty(config)?)
}
