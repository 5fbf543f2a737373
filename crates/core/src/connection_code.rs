//! TV pairing codes and connectivity state.
//!
//! A TV pairs with the back-office by typing a five-digit code shown in the
//! console. Codes are unique per TV (enforced by `uq_tvs_connection_code`).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of digits in a connection code.
pub const CODE_LENGTH: usize = 5;

const CODE_MIN: u32 = 10_000;
const CODE_MAX: u32 = 99_999;

/// Generate a random five-digit code that never starts with zero.
pub fn generate_connection_code() -> String {
    rand::rng().random_range(CODE_MIN..=CODE_MAX).to_string()
}

/// Require exactly five ASCII digits.
pub fn validate_connection_code(code: &str) -> Result<(), CoreError> {
    if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "Connection code must be exactly {CODE_LENGTH} digits"
        )));
    }
    Ok(())
}

pub const CONNECTIVITY_ONLINE: &str = "online";
pub const CONNECTIVITY_OFFLINE: &str = "offline";

/// Whether a TV is currently connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TvConnectivity {
    Online,
    #[default]
    Offline,
}

impl TvConnectivity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => CONNECTIVITY_ONLINE,
            Self::Offline => CONNECTIVITY_OFFLINE,
        }
    }
}
