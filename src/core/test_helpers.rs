//! Shared test utilities for core module tests
//!
//! Provides an in-memory firewall that stands in for netsh, so action flows
//! can be exercised without spawning processes or touching the real
//! firewall. This module is only compiled in test mode.

use crate::core::error::{Error, Result};
use crate::core::netsh::{CommandRunner, FirewallCommand};
use crate::core::ports::PortRange;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

/// Mutex for tests that need exclusive access to environment variables.
///
/// ```ignore
/// let _guard = ENV_VAR_MUTEX.lock().unwrap();
/// unsafe {
///     std::env::set_var("WFBLOCK_NETSH", "true");
/// }
/// // ... test with custom env state ...
/// unsafe {
///     std::env::remove_var("WFBLOCK_NETSH");
/// }
/// ```
pub static ENV_VAR_MUTEX: Mutex<()> = Mutex::new(());

#[derive(Debug, Default)]
pub struct MockFirewall {
    pub rule_exists: bool,
    pub rule_enabled: bool,
    pub last_range: Option<PortRange>,
    pub calls: Vec<FirewallCommand>,
    pub detached: Vec<FirewallCommand>,
    exits: HashMap<&'static str, Option<i32>>,
    spawn_failures: HashSet<&'static str>,
}

/// Simulated firewall that records every command it receives.
///
/// Without overrides it behaves like netsh: `show` exits 1 when the rule is
/// missing and 0 when present, `add` creates an enabled rule, `delete`
/// exits 1 when there is nothing to delete.
#[derive(Debug, Default)]
pub struct MockRunner {
    state: Mutex<MockFirewall>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the rule already present and enabled
    pub fn blocked() -> Self {
        let runner = Self::default();
        {
            let mut state = runner.state();
            state.rule_exists = true;
            state.rule_enabled = true;
        }
        runner
    }

    /// Forces a fixed exit code for a command, skipping the simulation
    pub fn with_exit(self, command: FirewallCommand, code: Option<i32>) -> Self {
        self.state().exits.insert(command.describe(), code);
        self
    }

    /// Makes a command fail to spawn
    pub fn with_spawn_failure(self, command: FirewallCommand) -> Self {
        self.state().spawn_failures.insert(command.describe());
        self
    }

    pub fn state(&self) -> MutexGuard<'_, MockFirewall> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<FirewallCommand> {
        self.state().calls.clone()
    }

    pub fn mutating_calls(&self) -> Vec<FirewallCommand> {
        self.calls()
            .into_iter()
            .filter(FirewallCommand::is_mutating)
            .collect()
    }

    pub fn count(&self, command: &FirewallCommand) -> usize {
        self.calls().iter().filter(|c| *c == command).count()
    }

    fn simulate(&self, command: &FirewallCommand) -> Result<Option<i32>> {
        let mut state = self.state();
        state.calls.push(command.clone());

        let key = command.describe();
        if state.spawn_failures.contains(key) {
            return Err(Error::Spawn {
                program: "netsh".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
            });
        }
        if let Some(code) = state.exits.get(key) {
            return Ok(*code);
        }

        let code = match command {
            FirewallCommand::AddBlockRule(range) => {
                state.rule_exists = true;
                state.rule_enabled = true;
                state.last_range = Some(*range);
                0
            }
            FirewallCommand::EnableRule if state.rule_exists => {
                state.rule_enabled = true;
                0
            }
            FirewallCommand::DeleteRule if state.rule_exists => {
                state.rule_exists = false;
                state.rule_enabled = false;
                0
            }
            FirewallCommand::ShowRule if state.rule_exists => 0,
            FirewallCommand::OpenConsole => 0,
            FirewallCommand::EnableRule
            | FirewallCommand::DeleteRule
            | FirewallCommand::ShowRule => 1,
        };
        Ok(Some(code))
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &FirewallCommand) -> impl Future<Output = Result<Option<i32>>> + Send {
        let result = self.simulate(command);
        async move { result }
    }

    fn launch_detached(&self, command: &FirewallCommand) {
        self.state().detached.push(command.clone());
    }
}
