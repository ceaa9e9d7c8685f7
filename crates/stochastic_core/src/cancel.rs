//! Cooperative cancellation.
//!
//! The scenario pipeline polls an [`AbortCheck`] at well-defined points:
//! before each scenario and inside bounded numerical loops. Nothing is
//! interrupted pre-emptively.
//!
//! # Examples
//!
//! ```rust
//! use stochastic_core::cancel::{AbortCheck, CancellationToken, NeverAbort};
//!
//! let token = CancellationToken::new();
//! let observer = token.clone();
//! assert!(!observer.should_abort());
//!
//! token.cancel();
//! assert!(observer.should_abort());
//!
//! assert!(!NeverAbort.should_abort());
//! let always = || true;
//! assert!(always.should_abort());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::types::DistributionError;

/// Poll-based abort predicate.
pub trait AbortCheck {
    /// Returns `true` when the current operation should unwind.
    fn should_abort(&self) -> bool;

    /// Converts a positive poll into [`DistributionError::Cancelled`].
    #[inline]
    fn check(&self) -> Result<(), DistributionError> {
        if self.should_abort() {
            Err(DistributionError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl<F> AbortCheck for F
where
    F: Fn() -> bool,
{
    #[inline]
    fn should_abort(&self) -> bool {
        self()
    }
}

/// Predicate that never fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeverAbort;

impl AbortCheck for NeverAbort {
    #[inline]
    fn should_abort(&self) -> bool {
        false
    }
}

/// Cloneable cancellation flag.
///
/// All clones observe the same flag; cancelling is irreversible.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token in the non-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl AbortCheck for CancellationToken {
    #[inline]
    fn should_abort(&self) -> bool {
        self.is_cancelled()
    }
}

/// Fires after a fixed number of polls.
///
/// Useful for exercising the cancellation paths of long-running loops.
#[derive(Debug)]
pub struct AbortAfter {
    remaining: std::cell::Cell<usize>,
}

impl AbortAfter {
    /// Creates a predicate that returns `false` for the first `polls` calls.
    pub fn new(polls: usize) -> Self {
        Self {
            remaining: std::cell::Cell::new(polls),
        }
    }
}

impl AbortCheck for AbortAfter {
    fn should_abort(&self) -> bool {
        let remaining = self.remaining.get();
        if remaining == 0 {
            true
        } else {
            self.remaining.set(remaining - 1);
            false
        }
    }
}
