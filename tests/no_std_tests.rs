#![no_std]
extern crate alloc;
extern crate lfu_cache;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use lfu_cache::config::LfuCacheConfig;
use lfu_cache::LfuCache;

fn make_lfu<K: core::hash::Hash + Eq + Clone, V>(cap: usize) -> LfuCache<K, V> {
    let config = LfuCacheConfig { capacity: cap };
    LfuCache::init(config, None)
}

#[test]
fn test_lfu_in_no_std() {
    let mut cache = make_lfu(2);

    // Using String as it requires the alloc crate
    let key1 = String::from("key1");
    let key2 = String::from("key2");

    cache.put(key1.clone(), 1);
    cache.put(key2.clone(), 2);

    // Access key1 multiple times to increase its frequency
    cache.get(&key1);
    cache.get(&key1);

    // Add a new item, which should evict key2 (lower frequency)
    let key3 = String::from("key3");
    assert_eq!(cache.put(key3.clone(), 3), Some((key2.clone(), 2)));

    assert_eq!(*cache.get(&key1).unwrap(), 1);
    assert!(cache.get(&key2).is_none());
    assert_eq!(*cache.get(&key3).unwrap(), 3);
}

#[test]
fn test_tie_break_in_no_std() {
    let mut cache = make_lfu(4);

    let keys: Vec<String> = (0..6).map(|i| format!("key{i}")).collect();

    for (i, key) in keys.iter().enumerate().take(4) {
        cache.put(key.clone(), i);
    }

    // key0 moves up; key1 is now the oldest frequency-1 entry
    cache.get(&keys[0]);

    let evicted = cache.put(keys[4].clone(), 4).map(|(key, _)| key);
    assert_eq!(evicted.as_deref(), Some("key1"));

    let evicted = cache.put(keys[5].clone(), 5).map(|(key, _)| key);
    assert_eq!(evicted.as_deref(), Some("key2"));

    assert_eq!(cache.len(), 4);
    assert_eq!(*cache.get(&keys[0]).unwrap(), 0);
}

#[test]
fn test_borrowed_str_lookup_in_no_std() {
    let mut cache: LfuCache<String, u32> = make_lfu(2);
    cache.put(String::from("alpha"), 1);

    assert!(cache.contains("alpha"));
    assert_eq!(cache.peek("alpha"), Some(&1));
    assert_eq!(cache.get_mut("alpha").map(|v| core::mem::replace(v, 7)), Some(1));
    assert_eq!(cache.remove("alpha"), Some(7));
    assert!(cache.is_empty());
}

#[test]
fn test_complex_types_in_no_std() {
    let mut cache = make_lfu(2);

    let key1 = Vec::<u8>::from([1, 2, 3]);
    let value1 = Vec::<i32>::from([10, 20, 30]);

    let key2 = Vec::<u8>::from([4, 5, 6]);
    let value2 = Vec::<i32>::from([40, 50, 60]);

    cache.put(key1.clone(), value1.clone());
    cache.put(key2.clone(), value2.clone());

    assert_eq!(*cache.get(&key1).unwrap(), value1);
    assert_eq!(*cache.get(&key2).unwrap(), value2);

    cache.clear();
    assert!(cache.get(&key1).is_none());
}
