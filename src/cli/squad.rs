//! Squad code commands

use anyhow::{Context, Result};

use sixtysix::squad::{SquadCode, MAX_SQUAD_MEMBERS};

/// Generate a new invite code
pub fn code_command() -> Result<()> {
    let code = SquadCode::generate().context("Failed to generate squad code")?;
    println!("{}", code);
    println!("Share it with up to {} friends.", MAX_SQUAD_MEMBERS - 1);
    Ok(())
}

/// Validate an invite code
pub fn check_command(input: &str) -> Result<()> {
    let code = SquadCode::parse(input)?;
    println!("{} is a valid squad code.", code);
    Ok(())
}
