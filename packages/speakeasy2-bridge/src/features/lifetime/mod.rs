//! Resource-lifetime tracking
//!
//! Every sub-resource a request acquires (weight buffers, neighbor lists,
//! decoded matrices) is pushed onto an [`UnwindStack`] right after it is
//! built. From there it leaves in exactly one of three ways:
//!
//! - [`UnwindStack::take`]: ownership moves to the caller, registration removed
//! - [`UnwindStack::release`]: dropped now (consumed inner resource)
//! - [`UnwindStack::unwind`]: dropped with everything else, newest first
//!
//! Only the top entry can be taken or released, so acquisition and release
//! order always mirror each other. A stack that goes out of scope with
//! entries still registered unwinds them itself.

use std::any::Any;
use std::marker::PhantomData;

use tracing::trace;

use crate::errors::{Result, Se2Error};

struct Entry {
    label: &'static str,
    resource: Box<dyn Any>,
}

/// Typed handle to a registered resource.
///
/// Not `Clone`: taking or releasing consumes it, so a resource cannot be
/// handed out twice.
#[must_use = "a registered resource must be taken or released"]
pub struct Slot<T> {
    depth: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({})", self.depth)
    }
}

/// LIFO register of acquired-but-not-yet-owned resources
#[derive(Default)]
pub struct UnwindStack {
    entries: Vec<Entry>,
}

impl UnwindStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `resource`; it is now owned by the stack.
    pub fn push<T: 'static>(&mut self, label: &'static str, resource: T) -> Slot<T> {
        let depth = self.entries.len();
        trace!(label, depth, "unwind: register");
        self.entries.push(Entry {
            label,
            resource: Box::new(resource),
        });
        Slot {
            depth,
            _marker: PhantomData,
        }
    }

    pub fn get<T: 'static>(&self, slot: &Slot<T>) -> Result<&T> {
        self.entries
            .get(slot.depth)
            .and_then(|e| e.resource.downcast_ref::<T>())
            .ok_or_else(|| stale(slot.depth))
    }

    pub fn get_mut<T: 'static>(&mut self, slot: &Slot<T>) -> Result<&mut T> {
        self.entries
            .get_mut(slot.depth)
            .and_then(|e| e.resource.downcast_mut::<T>())
            .ok_or_else(|| stale(slot.depth))
    }

    /// Transfer ownership of the top resource to the caller.
    pub fn take<T: 'static>(&mut self, slot: Slot<T>) -> Result<T> {
        let entry = self.pop_top(slot.depth)?;
        trace!(label = entry.label, depth = slot.depth, "unwind: transfer");
        entry
            .resource
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| stale(slot.depth))
    }

    /// Drop the top resource now.
    pub fn release<T: 'static>(&mut self, slot: Slot<T>) -> Result<()> {
        let entry = self.pop_top(slot.depth)?;
        trace!(label = entry.label, depth = slot.depth, "unwind: release");
        drop(entry);
        Ok(())
    }

    /// Drop every registered resource, newest first. Returns how many were
    /// released.
    pub fn unwind(&mut self) -> usize {
        let count = self.entries.len();
        while let Some(entry) = self.entries.pop() {
            trace!(label = entry.label, depth = self.entries.len(), "unwind: free");
            drop(entry);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels from oldest to newest
    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.label).collect()
    }

    fn pop_top(&mut self, depth: usize) -> Result<Entry> {
        if depth + 1 != self.entries.len() {
            return Err(Se2Error::internal(format!(
                "unwind stack: slot {} is not on top (depth {})",
                depth,
                self.entries.len()
            )));
        }
        self.entries.pop().ok_or_else(|| stale(depth))
    }
}

impl Drop for UnwindStack {
    fn drop(&mut self) {
        self.unwind();
    }
}

impl std::fmt::Debug for UnwindStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnwindStack")
            .field("entries", &self.labels())
            .finish()
    }
}

fn stale(depth: usize) -> Se2Error {
    Se2Error::internal(format!("unwind stack: no live resource at depth {}", depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records its name into a shared log when dropped
    struct Probe {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Drop for Probe {
        fn drop(&mut self) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn probe(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Probe {
        Probe {
            name,
            log: Rc::clone(log),
        }
    }

    #[test]
    fn test_unwind_releases_in_reverse_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut stack = UnwindStack::new();
        let _a = stack.push("a", probe("a", &log));
        let _b = stack.push("b", probe("b", &log));
        let _c = stack.push("c", probe("c", &log));

        assert_eq!(stack.unwind(), 3);
        assert_eq!(*log.borrow(), vec!["c", "b", "a"]);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_take_transfers_without_release() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut stack = UnwindStack::new();
        let slot = stack.push("owned", probe("owned", &log));

        let owned = stack.take(slot).unwrap();
        assert!(stack.is_empty());
        assert_eq!(stack.unwind(), 0);
        assert!(log.borrow().is_empty());

        drop(owned);
        assert_eq!(*log.borrow(), vec!["owned"]);
    }

    #[test]
    fn test_release_drops_exactly_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut stack = UnwindStack::new();
        let base = stack.push("base", probe("base", &log));
        let tmp = stack.push("tmp", probe("tmp", &log));

        stack.release(tmp).unwrap();
        assert_eq!(*log.borrow(), vec!["tmp"]);

        let base = stack.take(base).unwrap();
        drop(stack);
        assert_eq!(*log.borrow(), vec!["tmp"]);
        drop(base);
        assert_eq!(*log.borrow(), vec!["tmp", "base"]);
    }

    #[test]
    fn test_only_top_can_leave() {
        let mut stack = UnwindStack::new();
        let below = stack.push("below", 1u32);
        let _above = stack.push("above", 2u32);

        let err = stack.take(below).unwrap_err();
        assert_eq!(err.kind, crate::errors::ErrorKind::Internal);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_get_mut_edits_in_place() {
        let mut stack = UnwindStack::new();
        let slot = stack.push("list", vec![1, 2]);
        stack.get_mut(&slot).unwrap().push(3);

        assert_eq!(stack.get(&slot).unwrap(), &vec![1, 2, 3]);
        assert_eq!(stack.take(slot).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_stale_slot_after_unwind() {
        let mut stack = UnwindStack::new();
        let slot = stack.push("gone", 5i64);
        stack.unwind();

        assert!(stack.get(&slot).is_err());
    }

    #[test]
    fn test_drop_unwinds_remaining() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut stack = UnwindStack::new();
            let _x = stack.push("x", probe("x", &log));
            let _y = stack.push("y", probe("y", &log));
        }
        assert_eq!(*log.borrow(), vec!["y", "x"]);
    }

    #[test]
    fn test_labels() {
        let mut stack = UnwindStack::new();
        let _w = stack.push("weights", vec![0.5f64]);
        let _n = stack.push("neighbor list", ());
        assert_eq!(stack.labels(), vec!["weights", "neighbor list"]);
    }
}
