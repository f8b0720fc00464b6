//! Command handlers

pub mod auth;
pub mod posts;

/// Fail the command with a form-level error message.
pub fn fail(message: &str) -> anyhow::Result<()> {
    anyhow::bail!("{}", message)
}
