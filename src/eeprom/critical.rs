#![allow(unsafe_code)]

//! Interrupt-free sections around multi-byte device access.
//!
//! An ISR that touches the EEPROM while main-line code is halfway through a
//! multi-byte field would see (or produce) a torn value. Every multi-byte
//! accessor therefore runs inside [`InterruptFree::run`], which masks
//! interrupts for the duration of the closure and restores the previous
//! interrupt state on every exit path, including unwinding.

use core::marker::PhantomData;

use critical_section::{CriticalSection, RestoreState};

/// Scoped interrupt mask.
///
/// Acquired on construction, released on drop. The guard is only created by
/// [`InterruptFree::run`], so acquisitions and releases always nest.
pub struct InterruptFree {
    state: RestoreState,
    // Releasing on another core/thread would unbalance the mask.
    _not_send: PhantomData<*mut ()>,
}

impl core::fmt::Debug for InterruptFree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InterruptFree").finish_non_exhaustive()
    }
}

impl InterruptFree {
    fn enter() -> Self {
        // SAFETY: the matching release happens in `Drop`, and the guard never
        // leaves `run`, so it is dropped in LIFO order with any nested guard.
        let state = unsafe { critical_section::acquire() };
        Self {
            state,
            _not_send: PhantomData,
        }
    }

    /// Runs `f` with interrupts masked.
    ///
    /// Nested calls are allowed; the innermost exit restores the state the
    /// outer section established, the outermost exit restores the state from
    /// before the first call.
    pub fn run<R>(f: impl FnOnce(CriticalSection<'_>) -> R) -> R {
        let guard = Self::enter();
        // SAFETY: interrupts stay masked for as long as `guard` lives, which
        // outlives the token handed to `f`.
        let cs = unsafe { CriticalSection::new() };
        let result = f(cs);
        drop(guard);
        result
    }
}

impl Drop for InterruptFree {
    fn drop(&mut self) {
        // SAFETY: `state` came from the `acquire` in `enter`, and each guard is
        // dropped exactly once.
        unsafe { critical_section::release(self.state) }
    }
}
