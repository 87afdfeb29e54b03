//! Administrator elevation
//!
//! `netsh advfirewall` refuses to change rules from a non-elevated process.
//! The GUI checks for elevation at startup and, when missing, relaunches
//! itself through the UAC prompt and exits.
//!
//! # Environment Variables
//!
//! - `WFBLOCK_SKIP_ELEVATION`: skip the check entirely (testing, or when a
//!   wrapper already elevated the process).

use std::io;
use tracing::{info, warn};

/// Error type for privilege elevation operations
#[derive(Debug, thiserror::Error)]
pub enum ElevationError {
    /// Path of the running executable is unknown
    #[error("Cannot determine the executable path: {0}")]
    CurrentExe(io::Error),

    /// The elevated relaunch could not be started or was declined
    #[error("Elevated relaunch failed{}", .0.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    RelaunchFailed(Option<i32>),

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Command that never opens a console window of its own
pub fn hidden_command(program: &str) -> std::process::Command {
    #[allow(unused_mut)]
    let mut cmd = std::process::Command::new(program);
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }
    cmd
}

/// Checks whether the current process runs with administrator rights.
///
/// `net session` only succeeds for elevated processes. Builds for other
/// platforms have no firewall to elevate for and always report `true`.
pub fn is_elevated() -> bool {
    #[cfg(windows)]
    {
        hidden_command("net")
            .arg("session")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    #[cfg(not(windows))]
    {
        true
    }
}

/// Builds the PowerShell argument list that relaunches `exe` through UAC
pub fn relaunch_args(exe: &str, args: &[String]) -> Vec<String> {
    let quote = |s: &str| format!("'{}'", s.replace('\'', "''"));

    let mut command = format!("Start-Process -FilePath {} -Verb RunAs", quote(exe));
    if !args.is_empty() {
        let list: Vec<String> = args.iter().map(|a| quote(a)).collect();
        command.push_str(" -ArgumentList ");
        command.push_str(&list.join(","));
    }

    vec![
        "-NoProfile".to_string(),
        "-WindowStyle".to_string(),
        "Hidden".to_string(),
        "-Command".to_string(),
        command,
    ]
}

/// Relaunches the current executable elevated, with the same arguments.
///
/// Returns once the UAC prompt has been handed off; the caller should exit.
///
/// # Errors
///
/// Returns `Err` if the executable path is unknown, PowerShell cannot be
/// started, or the user declined the prompt.
pub fn relaunch_elevated() -> Result<(), ElevationError> {
    let exe = std::env::current_exe().map_err(ElevationError::CurrentExe)?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let exe = exe.to_string_lossy();

    info!("Relaunching {} as administrator", exe);
    let status = hidden_command("powershell")
        .args(relaunch_args(&exe, &args))
        .status()?;

    if status.success() {
        Ok(())
    } else {
        warn!("Elevated relaunch exited with {:?}", status.code());
        Err(ElevationError::RelaunchFailed(status.code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relaunch_args_without_arguments() {
        let args = relaunch_args("C:\\Tools\\wfblock.exe", &[]);
        assert_eq!(args[0], "-NoProfile");
        assert_eq!(
            args.last().unwrap(),
            "Start-Process -FilePath 'C:\\Tools\\wfblock.exe' -Verb RunAs"
        );
    }

    #[test]
    fn test_relaunch_args_quotes_arguments() {
        let args = relaunch_args(
            "C:\\Program Files\\wfblock.exe",
            &["block".to_string(), "--ports=3074 & 3080".to_string()],
        );
        assert_eq!(
            args.last().unwrap(),
            "Start-Process -FilePath 'C:\\Program Files\\wfblock.exe' -Verb RunAs \
             -ArgumentList 'block','--ports=3074 & 3080'"
        );
    }

    #[test]
    fn test_relaunch_args_escapes_single_quotes() {
        let args = relaunch_args("C:\\O'Neil\\wfblock.exe", &[]);
        assert!(args.last().unwrap().contains("'C:\\O''Neil\\wfblock.exe'"));
    }

    #[test]
    fn test_hidden_command_keeps_program() {
        let cmd = hidden_command("powershell");
        assert_eq!(cmd.get_program(), "powershell");
        assert_eq!(cmd.get_args().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_hidden_command_runs() {
        let status = hidden_command("true").status().unwrap();
        assert!(status.success());
    }

    #[cfg(not(windows))]
    #[test]
    fn test_non_windows_is_always_elevated() {
        assert!(is_elevated());
    }
}
