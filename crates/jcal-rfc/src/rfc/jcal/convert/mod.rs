//! Property and component conversion between native trees and jCal.
//!
//! A [`Converter`] carries the numeric policy snapshot and the diagnostics
//! recorded while converting. It holds no other state, so one converter may
//! be reused for any number of documents.

mod component;
mod property;

use jcal_core::policy::{NumericPolicy, numeric_policy};

use super::diagnostics::{Diagnostic, Diagnostics};

/// Converts native calendar trees to jCal and back.
#[derive(Debug, Clone)]
pub struct Converter {
    policy: NumericPolicy,
    diagnostics: Diagnostics,
}

impl Converter {
    /// Creates a converter using the current process-wide numeric policy.
    ///
    /// The policy is read once; replacing it afterwards does not affect this
    /// converter.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(numeric_policy())
    }

    #[must_use]
    pub fn with_policy(policy: NumericPolicy) -> Self {
        Self {
            policy,
            diagnostics: Diagnostics::default(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> NumericPolicy {
        self.policy
    }

    /// Diagnostics recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.as_slice()
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}
