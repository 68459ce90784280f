#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::LruCache;

// Fuzz arbitrary operation sequences on LruCache
//
// First byte picks the capacity; then each pair of bytes is (op, key).
// After every op the size bound and index/list correspondence must hold.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 32) + 1;
    let mut cache: LruCache<u8, u32> = LruCache::new(capacity);

    for (step, chunk) in rest.chunks_exact(2).enumerate() {
        let op = chunk[0] % 7;
        let key = chunk[1];

        match op {
            0 | 1 => {
                // put
                let was_present = cache.contains(&key);
                let len_before = cache.len();
                cache.put(key, step as u32);
                assert_eq!(cache.peek_mru().map(|(k, _)| *k), Some(key));
                if was_present {
                    assert_eq!(cache.len(), len_before);
                }
            },
            2 => {
                // get
                let expected = cache.peek(&key).copied();
                assert_eq!(cache.get(&key).copied(), expected);
                if expected.is_some() {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            },
            3 => {
                // touch
                let present = cache.contains(&key);
                assert_eq!(cache.touch(&key), present);
            },
            4 => {
                // remove
                let present = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), present);
                assert!(!cache.contains(&key));
            },
            5 => {
                // pop_lru
                let victim = cache.peek_lru().map(|(k, _)| *k);
                assert_eq!(cache.pop_lru().map(|(k, _)| k), victim);
            },
            _ => {
                if key == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            },
        }

        assert!(cache.len() <= capacity);
        assert!(cache.check_invariants().is_ok());
    }
});
