#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::RecencyList;

// Fuzz arbitrary operation sequences on RecencyList, including stale
// handles, and validate the sentinel-bounded chain after each step.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u8> = RecencyList::new();
    let mut ids = Vec::new();

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 5;
        let arg = chunk[1];

        match op {
            0 => {
                let id = list.push_front(arg);
                assert_eq!(list.front_id(), Some(id));
                ids.push(id);
            },
            1 if !ids.is_empty() => {
                let id = ids[usize::from(arg) % ids.len()];
                if list.move_to_front(id) {
                    assert_eq!(list.front_id(), Some(id));
                }
            },
            2 if !ids.is_empty() => {
                let id = ids[usize::from(arg) % ids.len()];
                let len = list.len();
                if list.remove(id).is_some() {
                    assert_eq!(list.len(), len - 1);
                }
            },
            3 => {
                let back = list.back().copied();
                assert_eq!(list.pop_back(), back);
            },
            4 if arg == 0 => {
                list.clear();
                ids.clear();
            },
            _ => {},
        }

        assert_eq!(list.iter().count(), list.len());
        assert!(list.check_invariants().is_ok());
    }
});
