//! Property-based tests for whitelist and affected-list invariants.

use hidguardian_config::prelude::*;
use proptest::prelude::*;

fn guardian(
    table: StaticProcessTable,
) -> hidguardian_config::Result<HidGuardian<MemoryRegistry, StaticProcessTable>> {
    HidGuardian::new(MemoryRegistry::new(), table, GuardianSettings::default())
}

fn vid_pid_id() -> impl Strategy<Value = String> {
    ("[0-9A-F]{4}", "[0-9A-F]{4}").prop_map(|(vid, pid)| format!(r"HID\VID_{vid}&PID_{pid}"))
}

proptest! {
    #[test]
    fn test_whitelist_insert_then_remove_restores(
        existing in proptest::collection::btree_set(1u32..50_000, 0..8),
        pid in 50_000u32..100_000,
    ) {
        let g = guardian(StaticProcessTable::new(1))?;
        for p in &existing {
            g.insert_to_whitelist(*p)?;
        }
        let before = g.whitelist()?;

        g.insert_to_whitelist(pid)?;
        prop_assert!(g.whitelist()?.contains(&pid));
        prop_assert!(g.remove_from_whitelist(pid)?);

        prop_assert_eq!(g.whitelist()?, before);
    }

    #[test]
    fn test_affected_insert_twice_sorted_unique(
        batch in proptest::collection::vec(vid_pid_id(), 0..10),
    ) {
        let g = guardian(StaticProcessTable::new(1))?;
        g.insert_to_affected(&batch)?;
        let stored = g.insert_to_affected(&batch)?;

        let mut expected = batch.clone();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(&stored, &expected);
        prop_assert!(stored.windows(2).all(|w| matches!(w, [a, b] if a < b)));
        prop_assert_eq!(g.affected()?, stored);
    }

    #[test]
    fn test_affected_invalid_entry_rejects_batch(
        initial in proptest::collection::vec(vid_pid_id(), 1..5),
        valid in proptest::collection::vec(vid_pid_id(), 0..5),
        invalid in "[a-z ]{0,12}",
        position in 0usize..6,
    ) {
        let g = guardian(StaticProcessTable::new(1))?;
        g.insert_to_affected(&initial)?;
        let before = g.affected()?;

        let mut batch = valid;
        let at = position.min(batch.len());
        batch.insert(at, invalid);

        let insert = g.insert_to_affected(&batch);
        prop_assert!(insert.is_err_and(|e| e.is_rejected_input()));
        let remove = g.remove_from_affected(&batch);
        prop_assert!(remove.is_err_and(|e| e.is_rejected_input()));
        prop_assert_eq!(g.affected()?, before);
    }

    #[test]
    fn test_clear_keep_current_retains_only_current(
        current in 1u32..1_000,
        others in proptest::collection::btree_set(1_000u32..10_000, 0..10),
    ) {
        let g = guardian(StaticProcessTable::new(current).with_running(others.iter().copied()))?;
        g.add_current_process_to_whitelist()?;
        for p in &others {
            g.insert_to_whitelist(*p)?;
        }

        let removed = g.clear_whitelist(ClearWhitelistOptions::keep_current())?;
        prop_assert_eq!(removed, others.len());
        prop_assert_eq!(g.whitelist()?, vec![current]);
    }
}
