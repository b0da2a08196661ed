//! Opening URLs in an external browsing surface
//!
//! The shell never renders web content itself. Every destination is handed
//! to a [`UrlLauncher`], which by default spawns the platform opener or a
//! browser command taken from the config file.

use anyhow::{bail, Context, Result};
use std::process::{Command, Stdio};

/// Placeholder substituted in a configured browser command
pub const URL_PLACEHOLDER: &str = "{url}";

/// Capability to show a URL to the user
pub trait UrlLauncher {
    fn launch(&mut self, url: &str) -> Result<()>;
}

/// Launches URLs through an external process
#[derive(Debug, Clone, Default)]
pub struct SystemLauncher {
    browser: Option<String>,
}

impl SystemLauncher {
    /// `browser` overrides the platform opener, e.g. `chromium --app={url}`
    pub fn new(browser: Option<String>) -> Self {
        Self {
            browser: browser.filter(|b| !b.trim().is_empty()),
        }
    }

    /// Program and arguments used to open `url`
    pub fn command_line(&self, url: &str) -> Vec<String> {
        match &self.browser {
            Some(browser) => {
                let mut parts: Vec<String> =
                    browser.split_whitespace().map(String::from).collect();
                if parts.iter().any(|p| p.contains(URL_PLACEHOLDER)) {
                    for part in &mut parts {
                        *part = part.replace(URL_PLACEHOLDER, url);
                    }
                } else {
                    parts.push(url.to_string());
                }
                parts
            }
            None => platform_opener(url),
        }
    }
}

impl UrlLauncher for SystemLauncher {
    fn launch(&mut self, url: &str) -> Result<()> {
        let parts = self.command_line(url);
        let Some((program, args)) = parts.split_first() else {
            bail!("Empty browser command");
        };

        log::info!("Opening {} with {}", url, program);

        // Detach from the terminal; the TUI owns stdin/stdout
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to run '{}'", program))?;

        log::debug!("Launcher pid {}", child.id());
        Ok(())
    }
}

/// Logs URLs instead of opening them
#[derive(Debug, Clone, Default)]
pub struct DryRunLauncher;

impl UrlLauncher for DryRunLauncher {
    fn launch(&mut self, url: &str) -> Result<()> {
        log::info!("Dry run: would open {}", url);
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn platform_opener(url: &str) -> Vec<String> {
    vec!["open".into(), url.into()]
}

#[cfg(target_os = "windows")]
fn platform_opener(url: &str) -> Vec<String> {
    vec![
        "cmd".into(),
        "/C".into(),
        "start".into(),
        String::new(),
        url.into(),
    ]
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_opener(url: &str) -> Vec<String> {
    vec!["xdg-open".into(), url.into()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_placeholder() {
        let launcher = SystemLauncher::new(Some("chromium --app={url}".into()));
        assert_eq!(
            launcher.command_line("https://yow.meshmapper.net"),
            vec!["chromium", "--app=https://yow.meshmapper.net"]
        );
    }

    #[test]
    fn test_browser_appends_url() {
        let launcher = SystemLauncher::new(Some("firefox --kiosk".into()));
        assert_eq!(
            launcher.command_line("https://meshmapper.net/"),
            vec!["firefox", "--kiosk", "https://meshmapper.net/"]
        );
    }

    #[test]
    fn test_blank_browser_uses_platform_opener() {
        let launcher = SystemLauncher::new(Some("   ".into()));
        let parts = launcher.command_line("https://wardrive.meshmapper.net");
        assert_eq!(parts.last().map(String::as_str), Some("https://wardrive.meshmapper.net"));
        assert_eq!(parts, platform_opener("https://wardrive.meshmapper.net"));
    }

    #[test]
    fn test_missing_program_is_error() {
        let mut launcher =
            SystemLauncher::new(Some("meshmapper-no-such-browser-binary".into()));
        assert!(launcher.launch("https://meshmapper.net/").is_err());
    }

    #[test]
    fn test_dry_run_never_fails() {
        assert!(DryRunLauncher.launch("https://meshmapper.net/").is_ok());
    }
}
