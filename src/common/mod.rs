pub mod constants;
pub mod sort_order;
pub mod value;

pub use constants::*;
pub use sort_order::SortOrder;
pub use value::Value;

/// Spawn a fire-and-forget task on a new thread.
///
/// Used for background index creation; the caller never joins the thread and
/// failures inside `op` must be handled (logged) by `op` itself.
pub(crate) fn async_task<OP>(op: OP)
where
    OP: FnOnce() + Send + 'static,
{
    std::thread::spawn(op);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_async_task_runs_detached() {
        let flag = Arc::new(AtomicBool::new(false));
        let flag_clone = Arc::clone(&flag);
        async_task(move || {
            flag_clone.store(true, Ordering::Relaxed);
        });

        awaitility::at_most(Duration::from_millis(500)).until(|| flag.load(Ordering::Relaxed));
    }
}
