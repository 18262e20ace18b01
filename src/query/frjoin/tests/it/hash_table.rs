// Copyright 2021 Datafuse Labs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use frjoin_query_expression::Scalar;
use frjoin_query_expression::Tuple;
use frjoin_query_frjoin::JoinHashTable;
use frjoin_query_frjoin::JoinKey;
use frjoin_query_frjoin::MAX_PREALLOCATED_VALUES;
use frjoin_query_frjoin::ValueGroup;
use pretty_assertions::assert_eq;

fn key(v: i64) -> JoinKey {
    JoinKey::new(vec![Scalar::from(v)])
}

fn row(v: &str) -> Tuple {
    Tuple::new(vec![Scalar::from(v)])
}

#[test]
fn test_value_group_grows_past_capacity() {
    let mut group = ValueGroup::with_capacity(1);
    assert!(group.is_empty());
    for v in ["a", "b", "c"] {
        group.append(row(v));
    }
    assert_eq!(group.len(), 3);
    assert_eq!(group.values(), &[row("a"), row("b"), row("c")]);

    let collected = (&group).into_iter().cloned().collect::<Vec<_>>();
    assert_eq!(collected, group.iter().cloned().collect::<Vec<_>>());
}

#[test]
fn test_value_group_capacity_is_clamped() {
    let group = ValueGroup::with_capacity(usize::MAX);
    assert!(group.is_empty());

    let mut group = ValueGroup::with_capacity(0);
    group.append(row("x"));
    assert_eq!(group.len(), 1);
    assert!(MAX_PREALLOCATED_VALUES >= 1000);
}

#[test]
fn test_hash_table_put_keeps_insertion_order() {
    let mut table = JoinHashTable::with_capacity(4, 1000);
    assert!(table.is_empty());

    table.put(key(1), row("a1"));
    table.put(key(2), row("b1"));
    table.put(key(1), row("a2"));
    table.put(key(1), row("a1"));

    assert_eq!(table.len(), 2);
    assert_eq!(table.num_values(), 4);
    assert!(table.contains_key(&key(2)));
    assert!(!table.contains_key(&key(3)));
    assert_eq!(table.get(&key(3)), None);

    // Duplicates are kept, in arrival order.
    let group = table.get(&key(1)).unwrap();
    assert_eq!(group.values(), &[row("a1"), row("a2"), row("a1")]);

    let mut keys = table.keys().cloned().collect::<Vec<_>>();
    keys.sort();
    assert_eq!(keys, vec![key(1), key(2)]);

    let total = table.iter().map(|(_, group)| group.len()).sum::<usize>();
    assert_eq!(total, table.num_values());
}

#[test]
fn test_hash_table_composite_keys() {
    let mut table = JoinHashTable::with_capacity(0, 1);
    let k = |a: i64, b: &str| JoinKey::new(vec![Scalar::from(a), Scalar::from(b)]);

    table.put(k(1, "x"), row("v1"));
    table.put(k(1, "y"), row("v2"));
    table.put(k(1, "x"), row("v3"));

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(&k(1, "x")).map(ValueGroup::len), Some(2));
    assert_eq!(table.get(&k(1, "y")).map(ValueGroup::len), Some(1));
    assert_eq!(table.get(&key(1)), None);
}
