use anyhow::Result;

use chronicle_core::{
    settings::{AudioSettings, Settings},
    Error, FileStore,
};

pub fn show(store: &FileStore) -> Result<()> {
    let settings = Settings::load(store);
    let audio = AudioSettings::load(store);

    println!("Settings:\n");
    for (key, value) in settings.entries() {
        println!("  {:<18} {}", key, value);
    }

    println!("\nAudio:\n");
    for (key, value) in audio.entries() {
        println!("  {:<18} {}", key, value);
    }

    Ok(())
}

/// Preference keys are tried first, then audio levels
pub fn set(store: &mut FileStore, key: &str, value: &str) -> Result<()> {
    let mut settings = Settings::load(store);
    match settings.set_by_name(key, value) {
        Ok(()) => settings.flush(store)?,
        Err(Error::UnknownSetting(_)) => {
            let mut audio = AudioSettings::load(store);
            audio.set_by_name(key, value)?;
            audio.flush(store)?;
        }
        Err(e) => return Err(e.into()),
    }

    tracing::debug!("Setting {} = {}", key, value);
    println!("Set {} = {}", key, value);
    Ok(())
}

pub fn reset(store: &mut FileStore) -> Result<()> {
    let mut settings = Settings::load(store);
    settings.reset_to_defaults();
    settings.flush(store)?;

    let mut audio = AudioSettings::load(store);
    audio.reset_to_defaults();
    audio.flush(store)?;

    println!("Settings restored to defaults");
    Ok(())
}
