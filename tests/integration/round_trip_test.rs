//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 往返集成测试：各种成员形态经过序列化和反序列化后保持相等。

#[path = "../common/mod.rs"]
mod common;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use common::{round_trip, setup_engine, Color, Holder, Node, Primitives, Temporals, TestStruct};
use oxpack::{Engine, SerializerError, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

#[test]
fn test_primitives_round_trip() {
    let engine = setup_engine();
    let data = Primitives::sample();
    assert_eq!(round_trip(&engine, &data), data);
}

/// 所有可空成员为空
#[test]
fn test_primitive_defaults_round_trip() {
    let engine = setup_engine();
    let data = Primitives::default();
    let back = round_trip(&engine, &data);
    assert_eq!(back, data);
    assert_eq!(back.boxed_int, None);
    assert_eq!(back.color, None);
}

#[test]
fn test_extreme_primitive_values() {
    let engine = setup_engine();
    let data = Primitives {
        int_value: i32::MIN,
        long_value: i64::MIN,
        short_value: i16::MAX,
        byte_value: i8::MIN,
        char_value: '\u{FFFD}',
        float_value: f32::MAX,
        double_value: f64::MIN_POSITIVE,
        boxed_int: Some(i32::MAX),
        boxed_long: Some(i64::MIN),
        boxed_float: Some(f32::INFINITY),
        boxed_double: Some(f64::NEG_INFINITY),
        ..Primitives::default()
    };
    assert_eq!(round_trip(&engine, &data), data);
}

/// 时间值按毫秒精度往返
#[test]
fn test_temporals_round_trip() {
    let engine = setup_engine();
    let data = Temporals::sample();
    let back = round_trip(&engine, &data);
    assert_eq!(back, data);
    assert_eq!(back.zoned.offset(), data.zoned.offset());
}

#[test]
fn test_temporals_with_present_optional() {
    let engine = setup_engine();
    let data = Temporals {
        missing_date: Some(Utc.timestamp_millis_opt(-86_400_001).unwrap()),
        zoned: FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(1969, 7, 20, 20, 17, 40)
            .unwrap(),
        ..Temporals::sample()
    };
    assert_eq!(round_trip(&engine, &data), data);
}

/// 毫秒以下的精度无法写入，报错而不是截断
#[test]
fn test_sub_millisecond_date_is_rejected() {
    let engine = setup_engine();
    let precise: DateTime<Utc> = Utc.timestamp_nanos(1_700_000_123_456_789);
    let err = engine.serialize(&precise).unwrap_err();
    assert!(matches!(err.root_cause(), SerializerError::TypeMismatch { .. }));

    let data = Temporals {
        zoned: precise.fixed_offset(),
        ..Temporals::sample()
    };
    let err = engine.serialize(&data).unwrap_err();
    assert!(matches!(err.root_cause(), SerializerError::TypeMismatch { .. }));

    let whole: DateTime<Utc> = Utc.timestamp_opt(1_700_000_000, 123_000_000).unwrap();
    assert_eq!(round_trip(&engine, &whole), whole);
}

/// 本地日期只支持四位年份
#[test]
fn test_local_date_year_range() {
    let engine = setup_engine();
    let last = Temporals {
        local_date: NaiveDate::from_ymd_opt(9999, 12, 31).unwrap(),
        ..Temporals::sample()
    };
    assert_eq!(round_trip(&engine, &last), last);

    let beyond = Temporals {
        local_date: NaiveDate::from_ymd_opt(10000, 1, 1).unwrap(),
        ..Temporals::sample()
    };
    let err = engine.serialize(&beyond).unwrap_err();
    assert!(matches!(err.root_cause(), SerializerError::TypeMismatch { .. }));

    let far: NaiveDate = NaiveDate::from_ymd_opt(12345, 6, 7).unwrap();
    assert!(engine.serialize(&far).is_err());
}

#[test]
fn test_local_values_as_roots() {
    let engine = Engine::new();
    let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let time = NaiveTime::from_hms_milli_opt(12, 0, 0, 1).unwrap();
    assert_eq!(round_trip(&engine, &date), date);
    assert_eq!(round_trip(&engine, &time), time);
    assert_eq!(round_trip(&engine, &date.and_time(time)), date.and_time(time));
}

fn sample_holder() -> Holder {
    let mut ordered = BTreeMap::new();
    ordered.insert(3, Color::Blue);
    ordered.insert(-1, Color::Red);

    let mut anything = HashMap::new();
    anything.insert("flag".to_string(), Value::Bool(true));
    anything.insert("count".to_string(), Value::Int(12));
    anything.insert("none".to_string(), Value::Null);

    let mut inner = HashMap::new();
    inner.insert("primes".to_string(), vec![2, 3, 5, 7]);
    inner.insert("empty".to_string(), vec![]);

    Holder {
        numbers: vec![1, -1, i32::MAX],
        unique: ["a", "b", "c"].iter().map(|s| s.to_string()).collect(),
        lookup: [("one".to_string(), 1i64), ("big".to_string(), i64::MAX)]
            .into_iter()
            .collect(),
        ordered,
        fixed: [1, -2, 3],
        anything,
        nested: vec![inner, HashMap::new()],
        child: Some(TestStruct {
            id: 9,
            name: "child".to_string(),
            tags: vec!["c".to_string()],
        }),
        children: vec![TestStruct::default(), TestStruct {
            id: 2,
            name: "second".to_string(),
            tags: vec![],
        }],
    }
}

#[test]
fn test_containers_round_trip() {
    let engine = setup_engine();
    let data = sample_holder();
    assert_eq!(round_trip(&engine, &data), data);
}

#[test]
fn test_empty_containers_round_trip() {
    let engine = setup_engine();
    let data = Holder::default();
    let back = round_trip(&engine, &data);
    assert_eq!(back, data);
    assert!(back.child.is_none());
}

/// 自引用类型
#[test]
fn test_linked_nodes_round_trip() {
    let engine = setup_engine();
    let mut head = Node::default();
    for value in (1..=20).rev() {
        head = Node {
            value,
            next: Some(Box::new(head)),
        };
    }
    let back = round_trip(&engine, &head);
    assert_eq!(back, head);
}

/// 根值可以是容器
#[test]
fn test_root_containers() {
    let engine = Engine::new();

    let list = vec!["x".to_string(), "y".to_string()];
    let value = engine.deserialize_value(&engine.serialize(&list).unwrap()).unwrap();
    assert_eq!(
        value,
        Value::List(vec![Value::from("x"), Value::from("y")])
    );

    let mut map = HashMap::new();
    map.insert(1i32, "one".to_string());
    map.insert(2i32, "two".to_string());
    let back: HashMap<i32, String> = round_trip(&engine, &map);
    assert_eq!(back, map);

    let set: HashSet<i64> = [1, 2, 3].into_iter().collect();
    assert_eq!(round_trip(&engine, &set), set);

    let ordered: BTreeSet<String> = ["b", "a"].iter().map(|s| s.to_string()).collect();
    assert_eq!(round_trip(&engine, &ordered), ordered);

    let queue: VecDeque<bool> = [true, false, true].into_iter().collect();
    assert_eq!(round_trip(&engine, &queue), queue);
}

/// 大量Map往返
#[test]
fn test_many_maps_round_trip() {
    let engine = setup_engine();
    let maps: Vec<HashMap<String, i64>> = (0..500)
        .map(|i| {
            (0..i % 7)
                .map(|j| (format!("key-{}-{}", i, j), (i * j) as i64 - 100))
                .collect()
        })
        .collect();
    let back: Vec<HashMap<String, i64>> = round_trip(&engine, &maps);
    assert_eq!(back, maps);
}

#[test]
fn test_string_roots() {
    let engine = Engine::new();
    let long = "z".repeat(200);
    for text in ["", "a", "plain", "SãoVicente", "日本", long.as_str()] {
        let owned = text.to_string();
        assert_eq!(round_trip(&engine, &owned), owned);
    }
}
