//! Callback types shared by the generators.
//!
//! Long-running generators accept an optional progress callback. The callback
//! may receive a status text and answers whether the caller wants to cancel.
//! Only the pocketing stage honours cancellation; every other stage polls the
//! callback purely for progress reporting.
//!
//! ## Usage
//!
//! ```rust
//! use millpath_core::types::Progress;
//!
//! let progress = |text: Option<&str>| {
//!     if let Some(text) = text {
//!         println!("{text}");
//!     }
//!     false
//! };
//! assert!(!progress.update(Some("Generating pocketing polygons ...")));
//! ```

use std::cell::Cell;

/// A boxed progress callback receiving an optional status text.
///
/// Returning `true` requests cancellation.
pub type ProgressCallback = Box<dyn Fn(Option<&str>) -> bool>;

/// Progress and cancellation hook polled by the generators.
pub trait Progress {
    /// Report progress, optionally with a status text.
    ///
    /// Returns `true` if the caller wants the current operation cancelled.
    fn update(&self, text: Option<&str>) -> bool;

    /// Poll without a status text.
    fn tick(&self) -> bool {
        self.update(None)
    }
}

impl<F> Progress for F
where
    F: Fn(Option<&str>) -> bool,
{
    fn update(&self, text: Option<&str>) -> bool {
        self(text)
    }
}

/// Poll an optional progress callback; `None` never cancels.
pub fn poll(progress: Option<&dyn Progress>) -> bool {
    progress.is_some_and(|p| p.tick())
}

/// Progress callback that cancels after a fixed number of polls.
///
/// Useful for exercising cancellation paths deterministically.
#[derive(Debug)]
pub struct CancelAfter {
    remaining: Cell<usize>,
    polls: Cell<usize>,
}

impl CancelAfter {
    /// Allow `polls` calls to succeed, then request cancellation.
    pub fn new(polls: usize) -> Self {
        Self {
            remaining: Cell::new(polls),
            polls: Cell::new(0),
        }
    }

    /// Number of times the callback has been polled.
    pub fn polls(&self) -> usize {
        self.polls.get()
    }
}

impl Progress for CancelAfter {
    fn update(&self, _text: Option<&str>) -> bool {
        self.polls.set(self.polls.get() + 1);
        match self.remaining.get() {
            0 => true,
            n => {
                self.remaining.set(n - 1);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_closure_progress() {
        let seen = RefCell::new(Vec::new());
        let progress = |text: Option<&str>| {
            seen.borrow_mut().push(text.map(str::to_string));
            false
        };
        assert!(!progress.update(Some("working")));
        assert!(!progress.tick());
        assert_eq!(
            *seen.borrow(),
            vec![Some("working".to_string()), None]
        );
    }

    #[test]
    fn test_boxed_callback() {
        let callback: ProgressCallback = Box::new(|_| true);
        assert!(poll(Some(&callback)));
        assert!(!poll(None));
    }

    #[test]
    fn test_cancel_after() {
        let cancel = CancelAfter::new(2);
        assert!(!cancel.tick());
        assert!(!cancel.tick());
        assert!(cancel.tick());
        assert_eq!(cancel.polls(), 3);
    }
}
