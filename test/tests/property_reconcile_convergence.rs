/// PROPERTY-BASED TESTS: Reconciliation convergence
///
/// After any sequence of host edits, once all messages are delivered:
/// 1. Every host record has a renderer id
/// 2. Live order equals host order
/// 3. Every live object has exactly one cleanup callback
/// 4. Another pass changes nothing
use proptest::prelude::*;

use nvsync_shared::{Attributes, CollectionKind, ObjectSource};
use nvsync_test::TestHarness;

#[derive(Clone, Debug)]
enum Edit {
    AddUrl,
    AddPath,
    Remove(usize),
    Move(usize, usize),
}

fn edit_strategy() -> impl Strategy<Value = (Edit, bool)> {
    let edit = prop_oneof![
        3 => Just(Edit::AddUrl),
        2 => Just(Edit::AddPath),
        2 => (0usize..8).prop_map(Edit::Remove),
        2 => (0usize..8, 0usize..8).prop_map(|(from, to)| Edit::Move(from, to)),
    ];
    // whether to deliver messages right after the edit
    (edit, any::<bool>())
}

fn apply(harness: &mut TestHarness, kind: CollectionKind, edit: &Edit, serial: usize) {
    let handles: Vec<_> = harness
        .host
        .collection(kind)
        .iter()
        .map(|record| record.handle().clone())
        .collect();

    match edit {
        Edit::AddUrl => {
            let source = ObjectSource::Url {
                url: format!("https://example.org/{}-{}.nii.gz", kind, serial),
            };
            harness
                .host
                .add(kind, source, "remote", Attributes::new())
                .unwrap();
        }
        Edit::AddPath => {
            let source = ObjectSource::Path {
                name: format!("{}-{}.gii", kind, serial),
                data: vec![1, 2, 3, serial as u8],
            };
            harness
                .host
                .add(kind, source, "local", Attributes::new())
                .unwrap();
        }
        Edit::Remove(index) => {
            if let Some(handle) = handles.get(*index) {
                harness.host.remove_record(handle).unwrap();
            }
        }
        Edit::Move(from, to) => {
            if let Some(handle) = handles.get(*from) {
                if *to < handles.len() {
                    harness.host.move_record(handle, *to).unwrap();
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_collection_converges(
        edits in prop::collection::vec(edit_strategy(), 1..16),
        mesh in any::<bool>(),
    ) {
        let kind = if mesh { CollectionKind::Mesh } else { CollectionKind::Volume };
        let mut harness = TestHarness::new();

        for (serial, (edit, deliver)) in edits.iter().enumerate() {
            apply(&mut harness, kind, edit, serial);
            if *deliver {
                harness.exchange();
            }
        }
        harness.exchange();

        let host_ids = harness.host_ids(kind);
        prop_assert!(host_ids.iter().all(|id| !id.is_empty()));
        prop_assert_eq!(&host_ids, &harness.live_ids(kind));

        let bound = harness.session.reconciler(kind).unwrap().bound_count();
        prop_assert_eq!(bound, host_ids.len());

        let report = harness.session.reconcile(kind);
        prop_assert!(!report.has_changes());
        prop_assert!(report.syncs.is_empty());
        prop_assert_eq!(&harness.live_ids(kind), &host_ids);

        prop_assert!(harness.client_errors.is_empty());
        prop_assert!(harness.host_errors.is_empty());
    }
}
