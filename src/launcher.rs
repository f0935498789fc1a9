use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use snafu::ResultExt;

use crate::error::{LaunchSnafu, Result};

/// Opens a URL in a new browsing context outside the slider window.
pub trait LinkOpener {
    fn open(&self, url: &str) -> Result<()>;
}

/// Hands URLs to the desktop's default handler. The handler starts with no
/// originating page, so no referrer goes along with the request.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl SystemOpener {
    /// Platform command that opens `url`.
    pub fn command(url: &str) -> Command {
        command_for(std::env::consts::OS, url)
    }
}

fn command_for(os: &str, url: &str) -> Command {
    let mut command = match os {
        // Straight to the URL handler; `cmd /C start` would re-parse `&`, `|` and `^`
        "windows" => {
            let mut c = Command::new("rundll32");
            c.arg("url.dll,FileProtocolHandler");
            c
        }
        "macos" => Command::new("open"),
        _ => Command::new("xdg-open"),
    };
    command
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    command
}

/// Spawns the handler and waits for it on a background thread, so it is reaped
/// without blocking the frame loop.
fn launch(mut command: Command, url: &str) -> Result<JoinHandle<Option<ExitStatus>>> {
    let mut child = command.spawn().context(LaunchSnafu { url })?;
    let pid = child.id();
    let url = url.to_string();
    tracing::info!(%url, pid, "opened image in external viewer");

    Ok(thread::spawn(move || match child.wait() {
        Ok(status) => {
            if !status.success() {
                tracing::warn!(%url, %status, "link handler failed");
            }
            Some(status)
        }
        Err(e) => {
            tracing::warn!(%url, pid, "could not wait for link handler: {e}");
            None
        }
    }))
}

impl LinkOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        launch(Self::command(url), url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const TRICKY_URL: &str = "https://x/a.png?w=1&h=2|more^caret";

    fn args(command: &Command) -> Vec<String> {
        command
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn url_is_last_argument_untouched() {
        let url = "https://example.com/a b.png?x=1&y=2";
        let command = SystemOpener::command(url);
        let last = command.get_args().last().expect("has args");
        assert_eq!(last, url);
    }

    #[test]
    fn windows_handler_bypasses_cmd() {
        let command = command_for("windows", TRICKY_URL);
        assert_eq!(command.get_program(), "rundll32");
        assert_eq!(args(&command), ["url.dll,FileProtocolHandler", TRICKY_URL]);
    }

    #[test]
    fn every_platform_passes_shell_metacharacters_verbatim() {
        for (os, program) in [("windows", "rundll32"), ("macos", "open"), ("linux", "xdg-open")] {
            let command = command_for(os, TRICKY_URL);
            assert_eq!(command.get_program(), program);
            assert_eq!(args(&command).last().map(String::as_str), Some(TRICKY_URL));
            assert!(!args(&command).iter().any(|a| a == "/C"));
        }
    }

    #[test]
    fn missing_handler_is_a_launch_error() {
        let err = launch(Command::new("/nonexistent/link-handler"), "a.png").expect_err("spawn fails");
        assert!(matches!(err, Error::Launch { ref url, .. } if url == "a.png"));
    }

    #[cfg(unix)]
    #[test]
    fn handlers_are_reaped() {
        let ok = launch(Command::new("true"), "a.png").expect("spawn true");
        assert!(ok.join().expect("reaper").expect("status").success());

        let mut failing = Command::new("sh");
        failing.args(["-c", "exit 3"]);
        let failed = launch(failing, "b.png").expect("spawn sh");
        assert_eq!(failed.join().expect("reaper").expect("status").code(), Some(3));

        let handles: Vec<_> = (0..5)
            .map(|_| launch(Command::new("true"), "c.png").expect("spawn true"))
            .collect();
        for handle in handles {
            handle.join().expect("reaper");
        }
        #[cfg(target_os = "linux")]
        assert_eq!(zombie_children(), 0);
    }

    /// Children of this process that exited but were never waited on.
    #[cfg(target_os = "linux")]
    fn zombie_children() -> usize {
        let me = std::process::id().to_string();
        std::fs::read_dir("/proc")
            .expect("procfs")
            .filter_map(|entry| std::fs::read_to_string(entry.ok()?.path().join("stat")).ok())
            .filter(|stat| {
                // Fields after the parenthesised command name: state, ppid, ...
                let Some((_, rest)) = stat.rsplit_once(')') else {
                    return false;
                };
                let mut fields = rest.split_whitespace();
                fields.next() == Some("Z") && fields.next() == Some(me.as_str())
            })
            .count()
    }
}
