use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// One mutex per repertoire.
///
/// Sync and undo hold the repertoire's mutex for their whole run, so a run
/// never observes a ledger another run is still writing or undoing.
#[derive(Debug, Default)]
pub struct RepertoireLocks {
    locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl RepertoireLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mutex guarding `repertoire_id`, created on first use
    pub fn get(&self, repertoire_id: i64) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        locks
            .entry(repertoire_id)
            .or_insert_with(|| {
                debug!("Creating lock for repertoire {}", repertoire_id);
                Arc::new(Mutex::new(()))
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_same_repertoire_shares_a_lock() {
        let locks = RepertoireLocks::new();
        assert!(Arc::ptr_eq(&locks.get(1), &locks.get(1)));
        assert!(!Arc::ptr_eq(&locks.get(1), &locks.get(2)));

        let first = locks.get(1);
        let _guard = first.lock();
        assert!(locks.get(1).try_lock().is_none());
        assert!(locks.get(2).try_lock().is_some());
    }

    #[test]
    fn test_runs_on_one_repertoire_do_not_overlap() {
        let locks = Arc::new(RepertoireLocks::new());
        let active = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let active = Arc::clone(&active);
                thread::spawn(move || {
                    let lock = locks.get(7);
                    let _guard = lock.lock();
                    assert_eq!(active.fetch_add(1, Ordering::SeqCst), 0);
                    thread::yield_now();
                    active.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
