pub mod classify;

pub use classify::{FailurePolicy, Outcome, Verdict};
