//! Squad join codes and membership limits
//!
//! Squads themselves live in the remote store; this module only owns the
//! parts decided on the device.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code alphabet without look-alike characters (no I, O, 0, 1)
pub const SQUAD_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const SQUAD_CODE_LEN: usize = 6;
pub const MAX_SQUAD_MEMBERS: usize = 8;

#[derive(Debug, Error)]
pub enum SquadError {
    #[error("Squad codes are 6 characters, got {0}")]
    InvalidLength(usize),

    #[error("Squad codes can't contain '{0}'")]
    InvalidChar(char),

    #[error("Squad is full (max 8 members)")]
    Full,

    #[error("Already a member")]
    AlreadyMember,

    #[error("Failed to read system randomness: {0}")]
    Random(#[from] getrandom::Error),
}

/// A validated, upper-case squad code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SquadCode(String);

impl SquadCode {
    /// Generate a random code
    pub fn generate() -> Result<Self, SquadError> {
        let mut bytes = [0u8; SQUAD_CODE_LEN];
        getrandom::getrandom(&mut bytes)?;
        // 256 is a multiple of the alphabet size, so this stays uniform
        let code = bytes
            .iter()
            .map(|b| SQUAD_CODE_ALPHABET[*b as usize % SQUAD_CODE_ALPHABET.len()] as char)
            .collect();
        Ok(Self(code))
    }

    /// Parse user input: surrounding whitespace is ignored, case is folded
    pub fn parse(input: &str) -> Result<Self, SquadError> {
        let code = input.trim().to_ascii_uppercase();
        let len = code.chars().count();
        if len != SQUAD_CODE_LEN {
            return Err(SquadError::InvalidLength(len));
        }
        if let Some(bad) = code
            .chars()
            .find(|c| !c.is_ascii() || !SQUAD_CODE_ALPHABET.contains(&(*c as u8)))
        {
            return Err(SquadError::InvalidChar(bad));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SquadCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SquadCode {
    type Err = SquadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SquadCode {
    type Error = SquadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SquadCode> for String {
    fn from(code: SquadCode) -> Self {
        code.0
    }
}

/// Check whether a user may join a squad with `member_count` members
pub fn check_join(member_count: usize, already_member: bool) -> Result<(), SquadError> {
    if member_count >= MAX_SQUAD_MEMBERS {
        return Err(SquadError::Full);
    }
    if already_member {
        return Err(SquadError::AlreadyMember);
    }
    Ok(())
}
