use std::process::{Command, Stdio};

use arboard::Clipboard;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("could not start opener for {url}: {source}")]
    Spawn {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
}

/// Side effects that leave the application: browser tabs and the clipboard.
pub trait Launcher {
    /// Opens `url` in a new browsing context.
    fn open(&mut self, url: &str) -> Result<(), LaunchError>;
    fn copy(&mut self, text: &str) -> Result<(), LaunchError>;
}

/// Hands URLs to the desktop's default opener.
#[derive(Default)]
pub struct SystemLauncher {
    clipboard: Option<Clipboard>,
}

impl SystemLauncher {
    fn opener(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl Launcher for SystemLauncher {
    fn open(&mut self, url: &str) -> Result<(), LaunchError> {
        Self::opener(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn { url: url.to_string(), source })?;
        info!(%url, "opened external link");
        Ok(())
    }

    fn copy(&mut self, text: &str) -> Result<(), LaunchError> {
        if self.clipboard.is_none() {
            self.clipboard = Some(Clipboard::new()?);
        }
        if let Some(clipboard) = self.clipboard.as_mut() {
            clipboard.set_text(text.to_string())?;
        }
        Ok(())
    }
}
