use anyhow::{Context, Result};

pub fn copy_text(text: &str) -> Result<()> {
    let mut clip = arboard::Clipboard::new().context("Failed to open clipboard")?;
    clip.set_text(text.to_owned())
        .context("Failed to write clipboard")?;
    Ok(())
}

/// `None` when the clipboard is empty or holds no text.
pub fn read_text() -> Option<String> {
    let mut clip = arboard::Clipboard::new().ok()?;
    match clip.get_text() {
        Ok(t) if !t.trim().is_empty() => Some(t),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Clipboard read failed: {}", e);
            None
        }
    }
}
