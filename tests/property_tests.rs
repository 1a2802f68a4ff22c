//! Property Tests for the LFU Cache
//!
//! Random operation sequences are run against both `LfuCache` and a naive
//! reference model that scans every entry to pick its victim. Every return
//! value, every evicted entry and every recorded frequency must agree.

use lfu_cache::LfuCache;
use proptest::prelude::*;

/// A single public operation applied to both caches.
#[derive(Debug, Clone)]
enum Op {
    Get(u8),
    GetMut(u8),
    Put(u8, u32),
    Remove(u8),
    Peek(u8),
    Pop,
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let key = 0u8..12;
    prop_oneof![
        6 => key.clone().prop_map(Op::Get),
        1 => key.clone().prop_map(Op::GetMut),
        6 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        2 => key.clone().prop_map(Op::Remove),
        1 => key.prop_map(Op::Peek),
        1 => Just(Op::Pop),
        1 => Just(Op::Clear),
    ]
}

/// Reference model: linear scans, explicit touch timestamps.
struct Model {
    capacity: usize,
    clock: u64,
    entries: Vec<ModelEntry>,
}

struct ModelEntry {
    key: u8,
    value: u32,
    frequency: u64,
    last_touch: u64,
}

impl Model {
    fn new(capacity: usize) -> Self {
        Model {
            capacity,
            clock: 0,
            entries: Vec::new(),
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn position(&self, key: u8) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    fn victim(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.frequency, e.last_touch))
            .map(|(i, _)| i)
    }

    fn touch(&mut self, index: usize) {
        let now = self.tick();
        let entry = &mut self.entries[index];
        entry.frequency = entry.frequency.saturating_add(1);
        entry.last_touch = now;
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let index = self.position(key)?;
        self.touch(index);
        Some(self.entries[index].value)
    }

    fn put(&mut self, key: u8, value: u32) -> Option<(u8, u32)> {
        if self.capacity == 0 {
            return None;
        }
        if let Some(index) = self.position(key) {
            let old = std::mem::replace(&mut self.entries[index].value, value);
            self.touch(index);
            return Some((key, old));
        }
        let evicted = if self.entries.len() >= self.capacity {
            self.pop()
        } else {
            None
        };
        let now = self.tick();
        self.entries.push(ModelEntry {
            key,
            value,
            frequency: 1,
            last_touch: now,
        });
        evicted
    }

    fn remove(&mut self, key: u8) -> Option<u32> {
        let index = self.position(key)?;
        Some(self.entries.remove(index).value)
    }

    fn pop(&mut self) -> Option<(u8, u32)> {
        let index = self.victim()?;
        let entry = self.entries.remove(index);
        Some((entry.key, entry.value))
    }

    fn min_frequency(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.frequency).min()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_matches_reference_model(
        capacity in 0usize..6,
        ops in prop::collection::vec(arb_op(), 1..200),
    ) {
        let mut cache: LfuCache<u8, u32> = LfuCache::new(capacity);
        let mut model = Model::new(capacity);

        for op in ops {
            match op {
                Op::Get(k) => {
                    prop_assert_eq!(cache.get(&k).copied(), model.get(k));
                }
                Op::GetMut(k) => {
                    let actual = cache.get_mut(&k).map(|v| {
                        *v = v.wrapping_add(1);
                        *v
                    });
                    let expected = model.get(k).map(|v| v.wrapping_add(1));
                    if let (Some(index), Some(v)) = (model.position(k), expected) {
                        model.entries[index].value = v;
                    }
                    prop_assert_eq!(actual, expected);
                }
                Op::Put(k, v) => {
                    prop_assert_eq!(cache.put(k, v), model.put(k, v));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(cache.remove(&k), model.remove(k));
                }
                Op::Peek(k) => {
                    let expected = model.position(k).map(|i| model.entries[i].value);
                    prop_assert_eq!(cache.peek(&k).copied(), expected);
                }
                Op::Pop => {
                    prop_assert_eq!(cache.pop(), model.pop());
                }
                Op::Clear => {
                    cache.clear();
                    model.entries.clear();
                }
            }

            #[cfg(debug_assertions)]
            cache.debug_validate_invariants();

            prop_assert_eq!(cache.len(), model.entries.len());
            prop_assert!(cache.len() <= capacity);
            prop_assert_eq!(cache.min_frequency(), model.min_frequency());
            for entry in &model.entries {
                prop_assert_eq!(cache.frequency(&entry.key), Some(entry.frequency));
            }
            let expected_victim = model.victim().map(|i| {
                let entry = &model.entries[i];
                (entry.key, entry.value)
            });
            prop_assert_eq!(cache.peek_lfu().map(|(k, v)| (*k, *v)), expected_victim);
        }
    }

    #[test]
    fn prop_distinct_keys_within_capacity_never_evict(
        capacity in 1usize..32,
        touches in prop::collection::vec(0usize..32, 0..100),
    ) {
        let mut cache = LfuCache::new(capacity);
        for key in 0..capacity {
            prop_assert_eq!(cache.put(key, key), None);
        }
        for key in touches {
            let key = key % capacity;
            prop_assert_eq!(cache.get(&key), Some(&key));
            prop_assert_eq!(cache.put(key, key), Some((key, key)));
        }
        prop_assert_eq!(cache.len(), capacity);
        prop_assert_eq!(cache.lfu_metrics().core.evictions, 0);
    }

    #[test]
    fn prop_frequency_counts_every_touch(
        gets in 0u64..50,
        overwrites in 0u64..50,
    ) {
        let mut cache = LfuCache::new(1);
        cache.put("key", 0u64);
        for _ in 0..gets {
            cache.get(&"key");
        }
        for i in 0..overwrites {
            cache.put("key", i);
        }
        prop_assert_eq!(cache.frequency(&"key"), Some(1 + gets + overwrites));
    }
}
