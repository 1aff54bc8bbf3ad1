use anyhow::{Context, Result};
use snooze_infrastructure::ConfigService;

pub fn show(service: &ConfigService, base_url: Option<String>) -> Result<()> {
    let saved = service.get_config().context("Failed to load config.toml")?;
    let effective = saved
        .clone()
        .with_env_overrides()
        .with_base_url_override(base_url);

    println!("saved base_url:     {}", saved.base_url);
    println!("effective base_url: {}", effective.validated_base_url()?);
    Ok(())
}

pub fn set_base_url(service: &ConfigService, url: &str) -> Result<()> {
    service.set_base_url(url)?;
    println!("Saved base_url = {}", service.get_config()?.base_url);
    Ok(())
}
