// ==============================================
// END-TO-END SCENARIOS (integration)
// ==============================================
//
// Walk-throughs with several key/value instantiations, checking traversal
// order after each step.

use lrukit::LruCache;

fn snapshot<K: Clone, V: Clone>(cache: &LruCache<K, V>) -> Vec<(K, V)> {
    cache.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

mod int_keys_string_values {
    use super::*;

    fn seeded() -> LruCache<i32, String> {
        let mut cache = LruCache::new(3);
        cache.put(1, "hello".to_string());
        cache.put(2, "world".to_string());
        cache.put(3, "golang".to_string());
        cache
    }

    #[test]
    fn insertion_order_is_most_recent_first() {
        let cache = seeded();
        assert_eq!(
            snapshot(&cache),
            vec![
                (3, "golang".to_string()),
                (2, "world".to_string()),
                (1, "hello".to_string()),
            ]
        );
    }

    #[test]
    fn get_moves_hit_to_front() {
        let mut cache = seeded();
        assert_eq!(cache.get(&2).map(String::as_str), Some("world"));
        assert_eq!(
            snapshot(&cache),
            vec![
                (2, "world".to_string()),
                (3, "golang".to_string()),
                (1, "hello".to_string()),
            ]
        );
    }

    #[test]
    fn put_at_capacity_evicts_least_recent() {
        let mut cache = seeded();
        cache.get(&2);
        cache.put(4, "generics".to_string());
        assert_eq!(
            snapshot(&cache),
            vec![
                (4, "generics".to_string()),
                (2, "world".to_string()),
                (3, "golang".to_string()),
            ]
        );
        assert_eq!(cache.get(&1), None);
        assert_eq!(
            cache.to_string(),
            "Cache (capacity: 3, size: 3): [4:generics][2:world][3:golang]"
        );
    }
}

mod str_keys_int_values {
    use super::*;

    #[test]
    fn overwrite_keeps_size_and_reorders() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("a", 99);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(snapshot(&cache), vec![("b", 2), ("a", 99)]);
    }

    #[test]
    fn dictionary_cache_display() {
        let mut cache = LruCache::new(3);
        cache.put("en", "hello");
        cache.put("es", "hola");
        cache.put("fr", "bonjour");
        assert_eq!(
            cache.to_string(),
            "Cache (capacity: 3, size: 3): [fr:bonjour][es:hola][en:hello]"
        );
    }
}

mod struct_values {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct User {
        id: u32,
        name: &'static str,
        age: u8,
    }

    #[test]
    fn touched_user_survives_eviction() {
        let alice = User {
            id: 1,
            name: "Alice",
            age: 25,
        };
        let bob = User {
            id: 2,
            name: "Bob",
            age: 30,
        };
        let charlie = User {
            id: 3,
            name: "Charlie",
            age: 35,
        };

        let mut cache: LruCache<String, User> = LruCache::new(2);
        cache.put("user1".to_string(), alice.clone());
        cache.put("user2".to_string(), bob);

        assert_eq!(cache.get(&"user1".to_string()), Some(&alice));
        cache.put("user3".to_string(), charlie.clone());

        assert!(!cache.contains(&"user2".to_string()));
        assert_eq!(
            snapshot(&cache),
            vec![("user3".to_string(), charlie), ("user1".to_string(), alice)]
        );
        assert_eq!(cache.peek_lru().map(|(_, u)| u.id), Some(1));
        assert_eq!(
            cache.peek(&"user3".to_string()).map(|u| (u.name, u.age)),
            Some(("Charlie", 35))
        );
    }
}

mod int_cache {
    use super::*;

    #[test]
    fn get_promotes_older_entry() {
        let mut cache = LruCache::new(2);
        cache.put(10, 100);
        cache.put(20, 200);
        assert_eq!(cache.get(&10), Some(&100));
        cache.put(30, 300);
        assert_eq!(snapshot(&cache), vec![(30, 300), (10, 100)]);
        assert!(cache.check_invariants().is_ok());
    }
}
