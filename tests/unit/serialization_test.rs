//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了对象序列化的单元测试。

#[path = "../common/mod.rs"]
mod common;

use common::{setup_engine, Color, Employee, Person, TestStruct};
use oxpack::codec::PrimitiveEncoder;
use oxpack::{Composite, Engine, Value};

/// 测试对象序列化的字节布局
///
/// 根对象先写存在标志和类型名，成员按名称排序后依次写入。
#[test]
fn test_object_wire_layout() {
    let engine = setup_engine();
    let data = TestStruct {
        id: 7,
        name: "ok".to_string(),
        tags: vec!["a".to_string(), "b".to_string()],
    };

    let bytes = engine.serialize(&data).unwrap();

    let mut expected = PrimitiveEncoder::new();
    expected.write_byte(0x01);
    expected.write_string(Some(TestStruct::TYPE_NAME));
    // id
    expected.write_byte(0x07);
    // name
    expected.write_bytes(&[b'o', b'k' | 0x80]);
    // tags: 存在标志、个数、两个单字符字符串
    expected.write_bytes(&[0x01, 0x02, 0x82, b'a', 0x82, b'b']);
    assert_eq!(bytes, expected.into_bytes());

    let back: TestStruct = engine.deserialize(&bytes).unwrap();
    assert_eq!(back, data);
}

/// 测试序列化和反序列化的往返
#[test]
fn test_serialization_roundtrip() {
    let engine = setup_engine();
    let data = TestStruct {
        id: 1,
        name: "test".to_string(),
        tags: vec!["tag1".to_string(), "tag2".to_string()],
    };

    let bytes = engine.serialize(&data).unwrap();
    let decoded: TestStruct = engine.deserialize(&bytes).unwrap();

    assert_eq!(data, decoded);
}

/// 测试同一个值两次序列化结果相同
#[test]
fn test_serialization_is_deterministic() {
    let engine = setup_engine();
    let data = TestStruct {
        id: -3,
        name: "same".to_string(),
        tags: vec![],
    };
    assert_eq!(
        engine.serialize(&data).unwrap(),
        engine.serialize(&data).unwrap()
    );
}

/// 测试不同引擎之间的互操作
#[test]
fn test_bytes_are_portable_between_engines() {
    let writer = Engine::new();
    let reader = Engine::new();
    reader.register::<TestStruct>();

    let data = TestStruct {
        id: 99,
        name: "portable".to_string(),
        tags: vec!["x".to_string()],
    };
    let bytes = writer.serialize(&data).unwrap();
    let back: TestStruct = reader.deserialize(&bytes).unwrap();
    assert_eq!(back, data);
}

/// 测试祖先成员并入后代类型，跳过和重命名生效
#[test]
fn test_base_members_are_spliced() {
    let engine = setup_engine();
    let descriptor = Employee::type_descriptor();
    let mut names: Vec<&str> = descriptor.members().iter().map(|m| m.name()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["age", "badge", "company", "name"]);

    let employee = Employee {
        badge: 1_000_000_007,
        person: Person {
            name: "Ana".to_string(),
            age: 41,
        },
        session: Some("not persisted".to_string()),
        employer: "Acme".to_string(),
    };
    let back: Employee = engine.deserialize(&engine.serialize(&employee).unwrap()).unwrap();
    assert_eq!(back.person, employee.person);
    assert_eq!(back.badge, employee.badge);
    assert_eq!(back.employer, "Acme");
    assert_eq!(back.session, None);
}

/// 测试枚举作为根值时写入其完全限定名
#[test]
fn test_enum_root_writes_type_name() {
    let engine = setup_engine();
    let bytes = engine.serialize(&Color::Green).unwrap();

    let mut expected = PrimitiveEncoder::new();
    expected.write_byte(0x01);
    expected.write_string(Some(<Color as oxpack::PersistEnum>::TYPE_NAME));
    expected.write_byte(0x02);
    assert_eq!(bytes, expected.into_bytes());

    let back: Color = engine.deserialize(&bytes).unwrap();
    assert_eq!(back, Color::Green);
}

/// 测试动态值可以取回具体类型
#[test]
fn test_dynamic_value_downcast() {
    let engine = setup_engine();
    let data = TestStruct {
        id: 5,
        name: "dyn".to_string(),
        tags: vec![],
    };
    let value = engine
        .deserialize_value(&engine.serialize(&data).unwrap())
        .unwrap();
    assert_eq!(value.type_name(), Some(TestStruct::TYPE_NAME));
    assert_eq!(value.downcast_ref::<TestStruct>(), Some(&data));
    assert_eq!(value, Value::Object(Box::new(data)));
}

/// 测试缓存的成员计划和序列化器被复用
#[test]
fn test_plans_are_cached() {
    let engine = setup_engine();
    let data = TestStruct::default();
    engine.serialize(&data).unwrap();
    let first = engine.metrics().snapshot();
    engine.serialize(&data).unwrap();
    let second = engine.metrics().snapshot();

    assert_eq!(first.plans_built, second.plans_built);
    assert!(second.plan_cache_hits > first.plan_cache_hits);
    assert_eq!(second.objects_written, first.objects_written + 1);
}
