use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;
use tessera_memo::{Capacity, Memo, MemoOptions};

fn hashed(_: &Memo<(u16, u16), u64>, &(a, b): &(u16, u16)) -> u64 {
    u64::from(a).wrapping_mul(31).wrapping_add(u64::from(b))
}

#[test]
fn test_labelled_options_build_bounded_memo() {
    let options = MemoOptions::new()
        .capacity(Capacity::bounded(4).unwrap())
        .label("pairs");
    let memo = Memo::with_options(options, hashed);

    for a in 0..10 {
        memo.invoke((a, a));
    }

    let info = memo.info();
    assert_eq!(info.size, 4);
    assert_eq!(info.capacity, Some(4));
    assert_eq!(info.evictions, 6);
    assert!(format!("{memo:?}").contains("pairs"));
}

proptest! {
    #[test]
    fn prop_unbounded_computes_once_per_key(keys in prop::collection::vec((0u16..32, 0u16..32), 1..200)) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let memo = Memo::unbounded(move |memo: &Memo<(u16, u16), u64>, key: &(u16, u16)| {
            counter.fetch_add(1, Ordering::SeqCst);
            hashed(memo, key)
        });

        let mut previous_len = 0;
        for key in &keys {
            let first = memo.invoke(*key);
            prop_assert_eq!(first, memo.invoke(*key));
            prop_assert!(memo.len() >= previous_len);
            previous_len = memo.len();
        }

        let distinct: HashSet<_> = keys.iter().collect();
        prop_assert_eq!(calls.load(Ordering::SeqCst), distinct.len());
        prop_assert_eq!(memo.len(), distinct.len());
        prop_assert_eq!(memo.info().evictions, 0);
    }

    #[test]
    fn prop_bounded_never_exceeds_capacity(limit in 1usize..8, keys in prop::collection::vec((0u16..16, 0u16..4), 1..120)) {
        let memo = Memo::bounded(limit, hashed).unwrap();

        for key in &keys {
            let value = memo.invoke(*key);
            prop_assert_eq!(value, hashed(&memo, key));
            prop_assert!(memo.len() <= limit);
            prop_assert!(memo.contains(key));
        }
    }
}
