//! Handle audit ledger
//!
//! Counts every handle the native side exports, takes back, or releases,
//! per element type and per handle kind.
//!
//! The ledger is thread-local. Handles never leave the thread that created
//! them, so each thread's ledger balances on its own, and tests (one thread
//! each) see only their own traffic.
//!
//! Counters are deterministic and queryable in tests but do not affect
//! behavior.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

/// What a handle points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandleKind {
    /// A single object
    Object,
    /// A native vector of objects
    Vector,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleKind::Object => write!(f, "object"),
            HandleKind::Vector => write!(f, "vector"),
        }
    }
}

/// Handle lifecycle event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleEvent {
    /// The native side handed a new handle to the host
    Exported,
    /// The native side took a handle back without freeing it
    /// (constructor argument, vector push)
    Reclaimed,
    /// The object behind a handle was freed
    Released,
}

/// Per-type handle counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HandleCounts {
    pub exported: u64,
    pub reclaimed: u64,
    pub released: u64,
}

impl HandleCounts {
    /// Handles exported and not yet reclaimed or released
    pub fn live(&self) -> u64 {
        self.exported
            .saturating_sub(self.reclaimed)
            .saturating_sub(self.released)
    }

    fn apply(&mut self, event: HandleEvent) {
        match event {
            HandleEvent::Exported => self.exported += 1,
            HandleEvent::Reclaimed => self.reclaimed += 1,
            HandleEvent::Released => self.released += 1,
        }
    }
}

type LedgerKey = (&'static str, HandleKind);

thread_local! {
    static LEDGER: RefCell<BTreeMap<LedgerKey, HandleCounts>> = RefCell::new(BTreeMap::new());
}

/// Records a handle event for the current thread
///
/// Events arriving after the thread's ledger has been torn down (an `Owned`
/// dropped from another thread-local destructor) are not counted.
pub fn record(type_name: &'static str, kind: HandleKind, event: HandleEvent) {
    let _ = LEDGER.try_with(|ledger| {
        ledger
            .borrow_mut()
            .entry((type_name, kind))
            .or_default()
            .apply(event);
    });
}

/// Returns the counters for one element type and kind
pub fn counts(type_name: &'static str, kind: HandleKind) -> HandleCounts {
    LEDGER.with(|ledger| {
        ledger
            .borrow()
            .get(&(type_name, kind))
            .copied()
            .unwrap_or_default()
    })
}

/// Copies the whole ledger of the current thread
pub fn snapshot() -> AuditSnapshot {
    LEDGER.with(|ledger| AuditSnapshot {
        entries: ledger
            .borrow()
            .iter()
            .map(|(&(type_name, kind), &counts)| (type_name, kind, counts))
            .collect(),
    })
}

/// Clears the ledger of the current thread
pub fn reset() {
    LEDGER.with(|ledger| ledger.borrow_mut().clear());
}

/// Point-in-time copy of the ledger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditSnapshot {
    entries: Vec<(&'static str, HandleKind, HandleCounts)>,
}

impl AuditSnapshot {
    /// Returns all entries, ordered by type name then kind
    pub fn entries(&self) -> &[(&'static str, HandleKind, HandleCounts)] {
        &self.entries
    }

    /// Live handles across every type and kind
    pub fn total_live(&self) -> u64 {
        self.entries.iter().map(|(_, _, counts)| counts.live()).sum()
    }

    /// Live handles of one type, objects and vectors together
    pub fn live_for(&self, type_name: &str) -> u64 {
        self.entries
            .iter()
            .filter(|(name, _, _)| *name == type_name)
            .map(|(_, _, counts)| counts.live())
            .sum()
    }

    /// Types that still have live handles
    pub fn leaked(&self) -> Vec<(&'static str, HandleKind, u64)> {
        self.entries
            .iter()
            .filter(|(_, _, counts)| counts.live() > 0)
            .map(|&(name, kind, counts)| (name, kind, counts.live()))
            .collect()
    }

    /// Checks if every exported handle was accounted for
    pub fn is_balanced(&self) -> bool {
        self.total_live() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_counts_exports_minus_returns() {
        reset();
        record("Probe", HandleKind::Object, HandleEvent::Exported);
        record("Probe", HandleKind::Object, HandleEvent::Exported);
        record("Probe", HandleKind::Object, HandleEvent::Exported);
        record("Probe", HandleKind::Object, HandleEvent::Reclaimed);
        record("Probe", HandleKind::Object, HandleEvent::Released);

        let counts = counts("Probe", HandleKind::Object);
        assert_eq!(counts.exported, 3);
        assert_eq!(counts.live(), 1);
    }

    #[test]
    fn test_kinds_are_counted_separately() {
        reset();
        record("Probe", HandleKind::Vector, HandleEvent::Exported);
        record("Probe", HandleKind::Object, HandleEvent::Exported);
        record("Probe", HandleKind::Object, HandleEvent::Released);

        let snapshot = snapshot();
        assert_eq!(snapshot.live_for("Probe"), 1);
        assert_eq!(snapshot.leaked(), vec![("Probe", HandleKind::Vector, 1)]);
        assert!(!snapshot.is_balanced());
    }

    #[test]
    fn test_reset_clears_ledger() {
        record("Probe", HandleKind::Object, HandleEvent::Exported);
        reset();
        assert!(snapshot().entries().is_empty());
        assert!(snapshot().is_balanced());
    }

    #[test]
    fn test_ledger_is_per_thread() {
        reset();
        record("Probe", HandleKind::Object, HandleEvent::Exported);
        let other = std::thread::spawn(|| snapshot().total_live())
            .join()
            .unwrap();
        assert_eq!(other, 0);
        assert_eq!(snapshot().total_live(), 1);
    }
}
