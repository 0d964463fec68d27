//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 嵌套泛型集成测试：容器的元素类型本身是容器。

#[path = "../common/mod.rs"]
mod common;

use common::{round_trip, setup_engine, Nested};
use oxpack::{Engine, Persist, Shape};
use std::collections::{BTreeMap, HashMap, HashSet};

fn levels() -> Vec<HashMap<String, Vec<i32>>> {
    let mut first = HashMap::new();
    first.insert("evens".to_string(), vec![0, 2, 4]);
    first.insert("odds".to_string(), vec![1, 3]);
    let mut second = HashMap::new();
    second.insert("negative".to_string(), vec![-1, i32::MIN]);
    vec![first, HashMap::new(), second]
}

#[test]
fn test_nested_member_round_trip() {
    let engine = setup_engine();
    let data = Nested { levels: levels() };
    assert_eq!(round_trip(&engine, &data), data);
}

#[test]
fn test_nested_root_round_trip() {
    let engine = Engine::new();
    let data = levels();
    let back: Vec<HashMap<String, Vec<i32>>> = round_trip(&engine, &data);
    assert_eq!(back, data);
}

/// 每一层的序列化器都被缓存并共享
#[test]
fn test_nested_serializers_are_shared() {
    let engine = Engine::new();
    let shape = <Vec<HashMap<String, Vec<i32>>>>::shape();
    assert_eq!(shape.cache_key(), "list<map<string,list<int>>>");

    let outer = engine.resolve(&shape).unwrap();
    let again = engine.resolve(&shape).unwrap();
    assert!(std::sync::Arc::ptr_eq(&outer, &again));

    let inner = engine.resolve(&Shape::list(i32::shape())).unwrap();
    let direct = engine.resolve(&<Vec<i32>>::shape()).unwrap();
    assert!(std::sync::Arc::ptr_eq(&inner, &direct));
}

#[test]
fn test_deeply_nested_containers() {
    let engine = Engine::new();
    let mut data: BTreeMap<String, Vec<HashSet<Option<i64>>>> = BTreeMap::new();
    data.insert(
        "a".to_string(),
        vec![
            [Some(1), None, Some(-5)].into_iter().collect(),
            HashSet::new(),
        ],
    );
    data.insert("b".to_string(), vec![]);
    assert_eq!(round_trip(&engine, &data), data);
}

#[test]
fn test_nested_option_elements() {
    let engine = Engine::new();
    let data: Vec<Option<Vec<Option<String>>>> = vec![
        Some(vec![Some("x".to_string()), None]),
        None,
        Some(vec![]),
    ];
    assert_eq!(round_trip(&engine, &data), data);
}
