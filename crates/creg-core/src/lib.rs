//! # creg-core: Foundational Types for the Contract Registry
//!
//! This crate is the leaf of the contract registry workspace. It holds the
//! small primitives every other crate leans on when matching messages
//! against contracts.
//!
//! ## Key Design Principles
//!
//! 1. **Case-insensitive names.** Property names in contracts and messages
//!    match regardless of case. `CiKey` carries the original spelling for
//!    display and compares on a folded form, so any standard map keyed by
//!    it becomes case-insensitive.
//!
//! 2. **Lenient date-time parsing.** Messages carry dates in whatever shape
//!    their producers emit. [`temporal::parse_date_time`] accepts RFC 3339,
//!    naive date-times and bare dates, normalizing to UTC.
//!
//! 3. **UTC-only rendering.** [`Timestamp`] always renders as
//!    `YYYY-MM-DDTHH:MM:SSZ`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `creg-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod key;
pub mod temporal;

pub use error::CregError;
pub use identity::{parse_guid, Guid};
pub use key::CiKey;
pub use temporal::{parse_date_time, Timestamp};
