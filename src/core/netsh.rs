//! Firewall command adapter
//!
//! Builds the `netsh advfirewall firewall` invocations for the one rule this
//! tool manages, plus the `mmc.exe wf.msc` console launch, and runs them
//! through a [`CommandRunner`].
//!
//! Arguments are passed as separate argv entries without shell
//! interpretation. On Windows every spawned process gets `CREATE_NO_WINDOW`
//! so no console flashes up behind the GUI.

use crate::core::error::{Error, Result};
use crate::core::ports::PortRange;
use std::future::Future;
use tracing::{debug, warn};

/// Name of the firewall rule created, queried and deleted by this tool
pub const RULE_NAME: &str = "WarframePairBlockPort";

/// Default program used to manage the firewall
pub const DEFAULT_NETSH: &str = "netsh";

/// Default program and argument used to open the firewall console
pub const DEFAULT_CONSOLE: &str = "mmc.exe";
pub const CONSOLE_SNAP_IN: &str = "wf.msc";

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// One external invocation this tool knows how to make
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirewallCommand {
    /// Create the outbound UDP block rule over the given local ports
    AddBlockRule(PortRange),
    /// Make sure the rule is enabled
    EnableRule,
    /// Remove the rule
    DeleteRule,
    /// Query the rule; exit code 1 means it does not exist
    ShowRule,
    /// Open the Windows Defender Firewall console
    OpenConsole,
}

impl FirewallCommand {
    /// Whether running this command changes firewall configuration
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::AddBlockRule(_) | Self::EnableRule | Self::DeleteRule
        )
    }

    /// Short name used in log lines
    pub fn describe(&self) -> &'static str {
        match self {
            Self::AddBlockRule(_) => "add rule",
            Self::EnableRule => "enable rule",
            Self::DeleteRule => "delete rule",
            Self::ShowRule => "show rule",
            Self::OpenConsole => "open console",
        }
    }

    /// Argument vector, excluding the program itself
    pub fn args(&self) -> Vec<String> {
        let name = format!("name={RULE_NAME}");
        let firewall = |rest: &[&str]| -> Vec<String> {
            ["advfirewall", "firewall"]
                .iter()
                .chain(rest)
                .map(|s| (*s).to_string())
                .collect()
        };

        match self {
            Self::AddBlockRule(range) => {
                let localport = format!("localport={}", range.to_netsh_arg());
                firewall(&[
                    "add",
                    "rule",
                    &name,
                    "protocol=UDP",
                    "dir=out",
                    &localport,
                    "action=block",
                ])
            }
            Self::EnableRule => firewall(&["set", "rule", &name, "new", "enable=yes"]),
            Self::DeleteRule => firewall(&["delete", "rule", &name]),
            Self::ShowRule => firewall(&["show", "rule", &name, "dir=out"]),
            Self::OpenConsole => vec![CONSOLE_SNAP_IN.to_string()],
        }
    }
}

/// Seam between the action flows and the processes they start
pub trait CommandRunner {
    /// Runs the command to completion.
    ///
    /// Returns the exit code (`None` when the process ended without one),
    /// or `Err` when the process could not be started.
    fn run(&self, command: &FirewallCommand) -> impl Future<Output = Result<Option<i32>>> + Send;

    /// Starts the command as a detached, unawaited unit of work.
    ///
    /// Nothing is reported back to the caller; failures are only logged.
    fn launch_detached(&self, command: &FirewallCommand);
}

/// Runs commands against the real operating system
#[derive(Debug, Clone)]
pub struct SystemRunner {
    netsh: String,
    console: String,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_NETSH, DEFAULT_CONSOLE)
    }
}

impl SystemRunner {
    pub fn new(netsh: impl Into<String>, console: impl Into<String>) -> Self {
        Self {
            netsh: netsh.into(),
            console: console.into(),
        }
    }

    pub fn from_config(config: &crate::config::AppConfig) -> Self {
        Self::new(config.netsh_program.clone(), config.console_program.clone())
    }

    /// Program that executes the given command
    pub fn program_for(&self, command: &FirewallCommand) -> &str {
        match command {
            FirewallCommand::OpenConsole => &self.console,
            _ => &self.netsh,
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &FirewallCommand) -> impl Future<Output = Result<Option<i32>>> + Send {
        let program = self.program_for(command).to_string();
        let args = command.args();
        let what = command.describe();

        async move {
            debug!("Running {} {}", program, args.join(" "));

            let mut cmd = tokio::process::Command::new(&program);
            cmd.args(&args)
                .stdin(std::process::Stdio::null())
                .stdout(std::process::Stdio::piped())
                .stderr(std::process::Stdio::piped());
            #[cfg(windows)]
            cmd.creation_flags(CREATE_NO_WINDOW);

            let output = cmd
                .output()
                .await
                .map_err(|source| Error::Spawn { program, source })?;

            if !output.status.success() {
                // netsh reports most errors on stdout
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                debug!(
                    "{} exited with {:?}: {} {}",
                    what,
                    output.status.code(),
                    stdout.trim(),
                    stderr.trim()
                );
            }

            Ok(output.status.code())
        }
    }

    fn launch_detached(&self, command: &FirewallCommand) {
        let program = self.program_for(command).to_string();
        let args = command.args();

        let spawned = std::thread::Builder::new()
            .name("wfblock-detached".to_string())
            .spawn(move || {
                let mut cmd = std::process::Command::new(&program);
                cmd.args(&args);
                #[cfg(windows)]
                {
                    use std::os::windows::process::CommandExt;
                    cmd.creation_flags(CREATE_NO_WINDOW);
                }

                match cmd.status() {
                    Ok(status) if status.success() => debug!("{} exited", program),
                    Ok(status) => warn!("{} exited with {:?}", program, status.code()),
                    Err(e) => warn!("Failed to launch {}: {}", program, e),
                }
            });

        if let Err(e) = spawned {
            warn!("Failed to start detached launch thread: {e}");
        }
    }
}

/// Runs a command and turns anything other than a clean exit into an error
pub async fn run_checked<R: CommandRunner>(runner: &R, command: &FirewallCommand) -> Result<()> {
    match runner.run(command).await? {
        Some(0) => Ok(()),
        exit_code => Err(Error::CommandFailed {
            command: format!("netsh {}", command.describe()),
            exit_code,
        }),
    }
}
