//! File and clipboard I/O for the native CLI

use anyhow::{Context, Result};
use arboard::Clipboard;
use std::path::Path;

use filterman_core::{App, Format, FilterStore};

/// Put `text` on the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to copy to clipboard")?;
    Ok(())
}

/// Load a filter file for a one-shot command
pub fn load_store(path: &Path, format: Format) -> Result<FilterStore> {
    filterman_core::io::load(path, format)
        .with_context(|| format!("Failed to load filters from {}", path.display()))
}

pub fn save_store(store: &mut FilterStore, path: &Path, format: Format) -> Result<()> {
    filterman_core::io::save(store, path, format)
        .with_context(|| format!("Failed to save filters to {}", path.display()))
}

/// Load a file into the editor session at startup
pub fn open_in_app(app: &mut App, path: &Path) -> Result<()> {
    app.request_load(path, None)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(())
}
