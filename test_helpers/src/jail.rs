//! Helpers for running configuration tests inside a `figment::Jail`.
//!
//! A jail isolates the working directory and environment for the duration of
//! a closure. [`with_jail`] propagates the closure's output as an
//! `anyhow::Result` so tests can use `?` on both sides of the jail boundary.

use anyhow::{Result, anyhow};
use camino::Utf8Path;

/// Runs `f` inside a [`figment::Jail`] and returns its output.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure produced no output"))
}

/// Writes a TOML configuration file into the jail and returns its path.
///
/// # Errors
///
/// Returns the jail's I/O error if the file cannot be created.
pub fn write_config<'a>(
    jail: &mut figment::Jail,
    name: &'a str,
    contents: &str,
) -> figment::error::Result<&'a Utf8Path> {
    jail.create_file(name, contents)?;
    Ok(Utf8Path::new(name))
}

/// Converts a displayable error into a [`figment::Error`] so it can cross
/// the jail boundary.
#[must_use]
pub fn jail_error(err: &dyn std::fmt::Display) -> figment::Error {
    figment::Error::from(err.to_string())
}
