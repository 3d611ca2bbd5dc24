//! Mutable effect state and its structural checks.

pub mod store;
pub mod validate;

pub use store::{EffectStateStore, WriteOutcome, WriteRejection};
pub use validate::{IssueKind, RepairReport, ValidationIssue, repair, validate};
