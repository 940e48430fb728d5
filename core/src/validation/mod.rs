//! Certificate checks for solved flow networks and matchings

pub mod correctness;

pub use self::correctness::{verify_flow, verify_matching, VerificationError};
