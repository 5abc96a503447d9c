//! Plain-text state store for a personal productivity planner.
//!
//! The whole planner state lives in one markdown document: key/value
//! sections for settings and preferences, pipe tables for everything else.
//! [`persistence::Store`] reads and writes that file atomically and keeps a
//! snapshot per day.

pub mod domain;
pub mod error;
pub mod persistence;

pub use domain::{validate, AppState, ValidationError};
pub use error::{StoreError, StoreResult};
pub use persistence::{decode, encode, IntegrityReport, Store, StoreConfig};
