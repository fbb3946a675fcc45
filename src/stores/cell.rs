//! State container with explicit change notification.
//!
//! Each store owns a plain data struct inside a `StateCell`. Mutation goes
//! through `update`, which bumps a revision broadcast over a watch channel;
//! views subscribe to the channel and re-read a snapshot when it ticks.
//! Single-writer discipline is by convention — all mutation funnels through
//! the store's action methods.

use std::sync::Mutex;

use tokio::sync::watch;

pub struct StateCell<T> {
    state: Mutex<T>,
    revision: watch::Sender<u64>,
}

impl<T: Clone> StateCell<T> {
    pub fn new(initial: T) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Mutex::new(initial),
            revision,
        }
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> T {
        self.state.lock().expect("state lock poisoned").clone()
    }

    /// Read a projection of the state without cloning the whole struct.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.lock().expect("state lock poisoned"))
    }

    /// Mutate the state and notify subscribers. The closure's return value
    /// passes through.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = {
            let mut state = self.state.lock().expect("state lock poisoned");
            f(&mut state)
        };
        self.revision.send_modify(|rev| *rev += 1);
        result
    }

    /// Subscribe to change notifications. The receiver yields the revision
    /// counter; the value itself is re-read via `get`.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default, PartialEq, Debug)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn get_returns_a_snapshot() {
        let cell = StateCell::new(Counter { value: 1 });
        let snapshot = cell.get();
        cell.update(|c| c.value = 2);
        assert_eq!(snapshot.value, 1);
        assert_eq!(cell.get().value, 2);
    }

    #[test]
    fn update_passes_the_closure_result_through() {
        let cell = StateCell::new(Counter::default());
        let previous = cell.update(|c| {
            let old = c.value;
            c.value += 1;
            old
        });
        assert_eq!(previous, 0);
        assert_eq!(cell.get().value, 1);
    }

    #[tokio::test]
    async fn subscribers_see_each_update() {
        let cell = StateCell::new(Counter::default());
        let mut rx = cell.subscribe();
        assert_eq!(*rx.borrow(), 0);

        cell.update(|c| c.value = 5);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 1);
        assert_eq!(cell.get().value, 5);
    }

    #[test]
    fn update_without_subscribers_does_not_fail() {
        let cell = StateCell::new(Counter::default());
        cell.update(|c| c.value = 9);
        assert_eq!(cell.get().value, 9);
    }
}
