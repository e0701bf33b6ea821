use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One row of the attendance sheet. Serializes to exactly the
/// `{name, present}` shape the backend expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub name: String,
    pub present: bool,
}

/// Ordered present/absent sheet for one group, one per roster entry.
///
/// Every mutation returns a fresh ledger; the original is never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<AttendanceRecord>,
}

impl Ledger {
    /// Derive the initial sheet from the authoritative roster and the
    /// names identified across one batch.
    ///
    /// One record per roster entry, in roster order. Presence is exact
    /// string membership — no case folding, duplicates in the identified
    /// list carry no extra weight.
    pub fn reconcile(roster: &[String], identified_names: &[String]) -> Self {
        let identified: HashSet<&str> = identified_names.iter().map(String::as_str).collect();
        Self {
            records: roster
                .iter()
                .map(|name| AttendanceRecord {
                    name: name.clone(),
                    present: identified.contains(name.as_str()),
                })
                .collect(),
        }
    }

    /// Flip one record's presence, leaving every other record alone.
    /// Returns `None` when the index is out of range.
    pub fn toggle(&self, index: usize) -> Option<Ledger> {
        if index >= self.records.len() {
            return None;
        }
        let mut next = self.clone();
        next.records[index].present = !next.records[index].present;
        Some(next)
    }

    /// Force one record to a given presence. A no-op clone when the record
    /// already matches, a single toggle otherwise.
    pub fn set_present(&self, index: usize, present: bool) -> Option<Ledger> {
        let record = self.records.get(index)?;
        if record.present == present {
            Some(self.clone())
        } else {
            self.toggle(index)
        }
    }

    /// Index of the record for an exactly-matching name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name == name)
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn present_count(&self) -> usize {
        self.records.iter().filter(|r| r.present).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    // --- Reconcile ---

    #[test]
    fn test_reconcile_one_record_per_roster_entry_in_order() {
        let ledger = Ledger::reconcile(&roster(&["Alice", "Bob", "Carol"]), &roster(&["Bob"]));
        assert_eq!(ledger.len(), 3);
        assert_eq!(
            ledger.records(),
            &[
                AttendanceRecord {
                    name: "Alice".to_string(),
                    present: false,
                },
                AttendanceRecord {
                    name: "Bob".to_string(),
                    present: true,
                },
                AttendanceRecord {
                    name: "Carol".to_string(),
                    present: false,
                },
            ]
        );
    }

    #[test]
    fn test_reconcile_duplicate_identifications_count_once() {
        let ledger = Ledger::reconcile(
            &roster(&["Alice", "Bob"]),
            &roster(&["Bob", "Bob", "Bob"]),
        );
        assert_eq!(ledger.present_count(), 1);
        assert!(ledger.records()[1].present);
    }

    #[rstest]
    #[case::case_mismatch("alice", false)]
    #[case::whitespace("Alice ", false)]
    #[case::exact("Alice", true)]
    fn test_reconcile_exact_string_match_only(#[case] identified: &str, #[case] present: bool) {
        let ledger = Ledger::reconcile(&roster(&["Alice"]), &roster(&[identified]));
        assert_eq!(ledger.records()[0].present, present);
    }

    #[test]
    fn test_reconcile_unknown_identified_names_are_dropped() {
        let ledger = Ledger::reconcile(&roster(&["Alice"]), &roster(&["Mallory"]));
        assert_eq!(ledger.len(), 1);
        assert!(!ledger.records()[0].present);
    }

    #[test]
    fn test_reconcile_empty_roster_yields_empty_ledger() {
        let ledger = Ledger::reconcile(&[], &roster(&["Bob"]));
        assert!(ledger.is_empty());
    }

    // --- Toggle ---

    #[test]
    fn test_toggle_flips_only_target() {
        let ledger = Ledger::reconcile(&roster(&["Alice", "Bob", "Carol"]), &roster(&["Bob"]));
        let toggled = ledger.toggle(0).unwrap();
        assert!(toggled.records()[0].present);
        assert!(toggled.records()[1].present);
        assert!(!toggled.records()[2].present);
        // Original snapshot untouched
        assert!(!ledger.records()[0].present);
    }

    #[test]
    fn test_toggle_twice_restores_original() {
        let ledger = Ledger::reconcile(&roster(&["Alice", "Bob"]), &roster(&["Bob"]));
        let round_trip = ledger.toggle(1).unwrap().toggle(1).unwrap();
        assert_eq!(round_trip, ledger);
    }

    #[test]
    fn test_toggle_out_of_range_is_none() {
        let ledger = Ledger::reconcile(&roster(&["Alice"]), &[]);
        assert!(ledger.toggle(1).is_none());
    }

    #[test]
    fn test_toggles_are_order_independent() {
        let ledger = Ledger::reconcile(&roster(&["Alice", "Bob", "Carol"]), &[]);
        let a_then_c = ledger.toggle(0).unwrap().toggle(2).unwrap();
        let c_then_a = ledger.toggle(2).unwrap().toggle(0).unwrap();
        assert_eq!(a_then_c, c_then_a);
    }

    // --- set_present ---

    #[rstest]
    #[case::already_present(true, true)]
    #[case::flip_to_present(false, true)]
    #[case::flip_to_absent(true, false)]
    #[case::already_absent(false, false)]
    fn test_set_present_is_idempotent(#[case] initial: bool, #[case] target: bool) {
        let identified = if initial { roster(&["Alice"]) } else { vec![] };
        let ledger = Ledger::reconcile(&roster(&["Alice"]), &identified);
        let once = ledger.set_present(0, target).unwrap();
        let twice = once.set_present(0, target).unwrap();
        assert_eq!(once.records()[0].present, target);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_position_finds_exact_name() {
        let ledger = Ledger::reconcile(&roster(&["Alice", "Bob"]), &[]);
        assert_eq!(ledger.position("Bob"), Some(1));
        assert_eq!(ledger.position("bob"), None);
    }
}
