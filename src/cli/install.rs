//! Running the package installer on the collected arguments.

use std::process::Command;

/// The external installer, e.g. `pip` or `python3 -m pip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installer {
    program: String,
    args: Vec<String>,
}

impl Installer {
    /// Splits an installer command line on whitespace.
    pub fn parse(command: &str) -> anyhow::Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let Some(program) = parts.next() else {
            anyhow::bail!("Installer command must not be empty");
        };
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Builds `<installer> install <args...>`.
    fn command(&self, requirements: &[String]) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg("install").args(requirements);
        command
    }

    /// Runs the installer and waits for it to finish.
    pub fn install(&self, requirements: &[String]) -> anyhow::Result<()> {
        // Arguments may carry tokens, so only the program is logged.
        tracing::debug!("Running {} install", self.program);

        let status = self
            .command(requirements)
            .status()
            .map_err(|e| {
                anyhow::anyhow!("Error installing requirements: failed to run {}: {e}", self.program)
            })?;

        if !status.success() {
            anyhow::bail!("Error installing requirements ({status})");
        }
        Ok(())
    }
}
