//! A per-thread microtask queue.
//!
//! Work queued here runs at the next checkpoint, after the current
//! synchronous turn has finished. The host loop calls
//! [`perform_microtask_checkpoint`] at the end of every turn; tests call it
//! wherever they need to wait out a debounce.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

type Microtask = Box<dyn FnOnce()>;

thread_local! {
    static QUEUE: RefCell<VecDeque<Microtask>> = RefCell::new(VecDeque::new());
    static DRAINING: Cell<bool> = const { Cell::new(false) };
}

/// Queue `task` to run at the next checkpoint on this thread.
pub fn queue_microtask(task: impl FnOnce() + 'static) {
    QUEUE.with(|queue| queue.borrow_mut().push_back(Box::new(task)));
}

/// Run queued tasks until the queue is empty, including tasks queued by the
/// tasks being run. Returns how many ran.
///
/// Calling this from inside a running task does nothing and returns 0; the
/// outer checkpoint picks the new work up.
pub fn perform_microtask_checkpoint() -> usize {
    if DRAINING.with(|draining| draining.replace(true)) {
        return 0;
    }
    let mut ran = 0;
    // The queue borrow ends before the task runs so tasks may queue more work.
    while let Some(task) = QUEUE.with(|queue| queue.borrow_mut().pop_front()) {
        task();
        ran += 1;
    }
    DRAINING.with(|draining| draining.set(false));
    ran
}

/// Number of tasks waiting for the next checkpoint.
pub fn pending_microtasks() -> usize {
    QUEUE.with(|queue| queue.borrow().len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_runs_in_fifo_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = Rc::clone(&log);
            queue_microtask(move || log.borrow_mut().push(i));
        }
        assert_eq!(pending_microtasks(), 3);
        assert!(log.borrow().is_empty());
        assert_eq!(perform_microtask_checkpoint(), 3);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        assert_eq!(pending_microtasks(), 0);
    }

    #[test]
    fn test_drains_tasks_queued_while_draining() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let outer = Rc::clone(&log);
        queue_microtask(move || {
            outer.borrow_mut().push("outer");
            let inner = Rc::clone(&outer);
            queue_microtask(move || inner.borrow_mut().push("inner"));
        });
        assert_eq!(perform_microtask_checkpoint(), 2);
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_nested_checkpoint_is_noop() {
        let nested = Rc::new(Cell::new(usize::MAX));
        let seen = Rc::clone(&nested);
        queue_microtask(move || seen.set(perform_microtask_checkpoint()));
        queue_microtask(|| {});
        assert_eq!(perform_microtask_checkpoint(), 2);
        assert_eq!(nested.get(), 0);
    }

    #[test]
    fn test_empty_checkpoint() {
        assert_eq!(perform_microtask_checkpoint(), 0);
    }
}
