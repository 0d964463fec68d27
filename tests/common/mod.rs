//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了测试的通用工具函数和测试类型。

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use oxpack::{Engine, Persist, Value};
use std::collections::{BTreeMap, HashMap, HashSet};

pub fn setup_logging() {
    oxpack::telemetry::init_logging("oxpack=debug");
}

/// 创建注册了所有测试类型的引擎
pub fn setup_engine() -> Engine {
    setup_logging();
    let engine = Engine::new();
    engine
        .register::<TestStruct>()
        .register::<Primitives>()
        .register::<Temporals>()
        .register::<Holder>()
        .register::<Nested>()
        .register::<Node>()
        .register::<Employee>()
        .register_enum::<Color>();
    engine
}

/// 序列化再反序列化
pub fn round_trip<T: Persist>(engine: &Engine, value: &T) -> T {
    let bytes = engine.serialize(value).expect("serialize");
    engine.deserialize(&bytes).expect("deserialize")
}

#[derive(Persist, Clone, Debug, Default, PartialEq)]
pub struct TestStruct {
    pub id: i32,
    pub name: String,
    pub tags: Vec<String>,
}

#[derive(Persist, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Green,
    Blue,
}

#[derive(Persist, Clone, Debug, Default, PartialEq)]
pub struct Primitives {
    pub int_value: i32,
    pub long_value: i64,
    pub short_value: i16,
    pub byte_value: i8,
    pub char_value: char,
    pub bool_value: bool,
    pub float_value: f32,
    pub double_value: f64,
    pub boxed_int: Option<i32>,
    pub boxed_long: Option<i64>,
    pub boxed_short: Option<i16>,
    pub boxed_byte: Option<i8>,
    pub boxed_char: Option<char>,
    pub boxed_bool: Option<bool>,
    pub boxed_float: Option<f32>,
    pub boxed_double: Option<f64>,
    pub text: String,
    pub optional_text: Option<String>,
    pub color: Option<Color>,
}

impl Primitives {
    pub fn sample() -> Self {
        Self {
            int_value: -42,
            long_value: 4_000_000_000,
            short_value: -2,
            byte_value: 0x7F,
            char_value: 'ã',
            bool_value: true,
            float_value: 125.758,
            double_value: 6546874.16513154644,
            boxed_int: Some(i32::MIN),
            boxed_long: Some(i64::MAX),
            boxed_short: None,
            boxed_byte: Some(-1),
            boxed_char: Some('€'),
            boxed_bool: Some(false),
            boxed_float: None,
            boxed_double: Some(-0.5),
            text: "SãoVicente €".to_string(),
            optional_text: None,
            color: Some(Color::Blue),
        }
    }
}

#[derive(Persist, Clone, Debug, PartialEq)]
pub struct Temporals {
    pub date: DateTime<Utc>,
    pub zoned: DateTime<FixedOffset>,
    pub local_date_time: NaiveDateTime,
    pub local_date: NaiveDate,
    pub local_time: NaiveTime,
    pub missing_date: Option<DateTime<Utc>>,
}

impl Default for Temporals {
    fn default() -> Self {
        Self {
            date: DateTime::<Utc>::UNIX_EPOCH,
            zoned: DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
            local_date_time: NaiveDateTime::default(),
            local_date: NaiveDate::default(),
            local_time: NaiveTime::default(),
            missing_date: None,
        }
    }
}

impl Temporals {
    pub fn sample() -> Self {
        let offset = FixedOffset::east_opt(5 * 3600 + 1800).expect("offset");
        Self {
            date: Utc.timestamp_millis_opt(1_700_000_123_456).unwrap(),
            zoned: offset
                .with_ymd_and_hms(2023, 11, 14, 22, 13, 20)
                .unwrap(),
            local_date_time: NaiveDate::from_ymd_opt(2024, 2, 29)
                .unwrap()
                .and_hms_milli_opt(23, 59, 58, 125)
                .unwrap(),
            local_date: NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
            local_time: NaiveTime::from_hms_micro_opt(7, 5, 3, 250).unwrap(),
            missing_date: None,
        }
    }
}

/// 各种容器成员
#[derive(Persist, Clone, Debug, Default, PartialEq)]
pub struct Holder {
    pub numbers: Vec<i32>,
    pub unique: HashSet<String>,
    pub lookup: HashMap<String, i64>,
    pub ordered: BTreeMap<i32, Color>,
    pub fixed: [i16; 3],
    pub anything: HashMap<String, Value>,
    pub nested: Vec<HashMap<String, Vec<i32>>>,
    pub child: Option<TestStruct>,
    pub children: Vec<TestStruct>,
}

#[derive(Persist, Clone, Debug, Default, PartialEq)]
pub struct Nested {
    pub levels: Vec<HashMap<String, Vec<i32>>>,
}

/// 自引用的链表节点
#[derive(Persist, Clone, Debug, Default, PartialEq)]
pub struct Node {
    pub value: i32,
    pub next: Option<Box<Node>>,
}

#[derive(Persist, Clone, Debug, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i32,
}

/// 通过 `base` 字段继承 `Person` 的成员
#[derive(Persist, Clone, Debug, Default, PartialEq)]
pub struct Employee {
    pub badge: i64,
    #[persist(base)]
    pub person: Person,
    #[persist(skip)]
    pub session: Option<String>,
    #[persist(rename = "company")]
    pub employer: String,
}
