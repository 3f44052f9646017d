use anyhow::Result;
use tessera_config::Settings;

pub fn show(settings: &Settings) -> Result<()> {
    print!("{}", settings.to_toml()?);
    Ok(())
}
