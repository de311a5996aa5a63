//! crates/scopelog/src/nesting.rs
//! Thread-local nesting depth driving scope indentation.
//!
//! Each thread owns an independent counter that starts at `-1` ("no active
//! scope"). [`enter`] increments it and returns a [`DepthGuard`] whose drop
//! decrements it again, so the counter balances on every exit path including
//! early returns and unwinding.

use std::cell::Cell;
use std::marker::PhantomData;

/// Depth reported while no scope is active on the calling thread.
pub const NO_SCOPE: i32 = -1;

thread_local! {
    static DEPTH: Cell<i32> = const { Cell::new(NO_SCOPE) };
}

/// Returns the calling thread's nesting depth.
///
/// Threads whose local storage has already been torn down report
/// [`NO_SCOPE`].
pub fn current_depth() -> i32 {
    DEPTH.try_with(Cell::get).unwrap_or(NO_SCOPE)
}

/// Enters a nested scope on the calling thread.
pub fn enter() -> DepthGuard {
    let depth = DEPTH
        .try_with(|cell| {
            let depth = cell.get().saturating_add(1);
            cell.set(depth);
            depth
        })
        .unwrap_or(NO_SCOPE);

    DepthGuard {
        depth,
        _thread_bound: PhantomData,
    }
}

/// Holds one level of nesting on the thread that created it.
///
/// The guard is neither `Send` nor `Sync`: it must be dropped on the thread
/// whose counter it incremented.
#[must_use = "dropping the guard immediately leaves the scope"]
#[derive(Debug)]
pub struct DepthGuard {
    depth: i32,
    _thread_bound: PhantomData<*const ()>,
}

impl DepthGuard {
    /// Returns the depth this guard entered, `0` for an outermost scope.
    #[must_use]
    pub const fn depth(&self) -> i32 {
        self.depth
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        let _ = DEPTH.try_with(|cell| cell.set(cell.get().saturating_sub(1).max(NO_SCOPE)));
    }
}
