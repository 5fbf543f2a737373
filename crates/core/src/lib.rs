//! Domain rules for the signage back-office.
//!
//! Content eligibility, rotation planning and field validation. No I/O;
//! the repositories and the API layer both build on these types.

pub mod cep;
pub mod connection_code;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod ids;
pub mod layout;
pub mod rotation;
pub mod status;
pub mod types;
pub mod user;
