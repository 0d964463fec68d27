//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 并发集成测试：多个线程共享同一个引擎，缓存在首次使用时并发填充。

#[path = "../common/mod.rs"]
mod common;

use common::{setup_engine, Color, Holder, Primitives, TestStruct};
use oxpack::{Engine, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const ITERATIONS: usize = 200;

/// 测试冷缓存下的并发序列化
#[test]
fn test_concurrent_round_trips_on_cold_engine() {
    let engine = Arc::new(setup_engine());

    thread::scope(|scope| {
        for t in 0..THREADS {
            let engine = Arc::clone(&engine);
            scope.spawn(move || {
                for i in 0..ITERATIONS {
                    let data = TestStruct {
                        id: (t * ITERATIONS + i) as i32,
                        name: format!("thread-{}", t),
                        tags: vec![format!("{}", i)],
                    };
                    let bytes = engine.serialize(&data).unwrap();
                    let back: TestStruct = engine.deserialize(&bytes).unwrap();
                    assert_eq!(back, data);

                    let primitives = Primitives::sample();
                    let bytes = engine.serialize(&primitives).unwrap();
                    let back: Primitives = engine.deserialize(&bytes).unwrap();
                    assert_eq!(back, primitives);
                }
            });
        }
    });

    let snapshot = engine.metrics().snapshot();
    assert_eq!(
        snapshot.objects_written,
        (THREADS * ITERATIONS * 2) as u64
    );
    assert_eq!(snapshot.objects_read, snapshot.objects_written);
}

/// 所有线程拿到同一个成员计划
#[test]
fn test_concurrent_plan_publication() {
    let engine = Arc::new(Engine::new());
    engine.register::<Holder>();

    let encoded: Vec<Vec<u8>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let engine = Arc::clone(&engine);
                scope.spawn(move || engine.serialize(&Holder::default()).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(encoded.windows(2).all(|pair| pair[0] == pair[1]));
    let descriptor = <Holder as oxpack::Composite>::type_descriptor();
    let first = engine.plan_for(&descriptor).unwrap();
    let second = engine.plan_for(&descriptor).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

/// 并发读写混合值
#[test]
fn test_concurrent_polymorphic_values() {
    let engine = Arc::new(setup_engine());

    thread::scope(|scope| {
        for t in 0..THREADS {
            let engine = Arc::clone(&engine);
            scope.spawn(move || {
                let mut map: HashMap<String, Value> = HashMap::new();
                map.insert("thread".to_string(), Value::Long(t as i64));
                map.insert("color".to_string(), oxpack::Persist::to_value(&Color::Green));
                map.insert(
                    "list".to_string(),
                    Value::List((0..t as i32).map(Value::Int).collect()),
                );
                for _ in 0..ITERATIONS {
                    let bytes = engine.serialize(&map).unwrap();
                    let back: HashMap<String, Value> = engine.deserialize(&bytes).unwrap();
                    assert_eq!(back, map);
                }
            });
        }
    });
}
