//! Desktop notifications
//!
//! Dispatch goes through `notify-send` (libnotify), so it only works in a
//! desktop session. Callers treat a failed notification as non-fatal.

// During coverage builds the stubbed dispatch leaves imports unused
#![cfg_attr(coverage, allow(unused_imports, dead_code))]

use crate::error::{BcvError, BcvResult};
use std::process::Command;

/// How long the notification stays on screen
pub const DISPLAY_TIME_MS: u32 = 10_000;

pub trait Notifier {
    fn notify(&self, title: &str, subtitle: &str, message: &str) -> BcvResult<()>;
}

/// `notify-send -a <title> -t <ms> <subtitle> <message>`
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    display_time_ms: u32,
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self {
            display_time_ms: DISPLAY_TIME_MS,
        }
    }
}

impl DesktopNotifier {
    pub fn new(display_time_ms: u32) -> Self {
        Self { display_time_ms }
    }

    fn command(&self, title: &str, subtitle: &str, message: &str) -> Command {
        let mut cmd = Command::new("notify-send");
        cmd.arg("-a")
            .arg(title)
            .arg("-t")
            .arg(self.display_time_ms.to_string())
            .arg(subtitle)
            .arg(message);
        cmd
    }
}

impl Notifier for DesktopNotifier {
    /// # Coverage Exclusion
    /// Spawns an external process - cannot unit test
    #[cfg(not(coverage))]
    fn notify(&self, title: &str, subtitle: &str, message: &str) -> BcvResult<()> {
        let status = self
            .command(title, subtitle, message)
            .status()
            .map_err(|e| BcvError::Notification(format!("failed to run notify-send: {}", e)))?;
        if !status.success() {
            return Err(BcvError::Notification(format!(
                "notify-send exited with {}",
                status
            )));
        }
        Ok(())
    }

    /// Stub for coverage builds
    #[cfg(coverage)]
    fn notify(&self, _title: &str, _subtitle: &str, _message: &str) -> BcvResult<()> {
        Ok(())
    }
}
