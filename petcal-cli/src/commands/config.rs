use anyhow::Result;
use owo_colors::OwoColorize;
use petcal_core::{EventStateStore, FileStore, PetcalConfig};

pub fn run(config: &PetcalConfig, store: &EventStateStore) -> Result<()> {
    let config_path = PetcalConfig::config_path()?;
    let state_path = FileStore::new(config.data_path()).path_for(store.key())?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", config.data_path().display());
    println!("  State:   {}", state_path.display());

    println!();
    println!("{}", "Settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {line}");
    }

    Ok(())
}
