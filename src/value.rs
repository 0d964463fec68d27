//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了动态值模型，是对象图在编码层之间传递的统一表示。

use crate::introspect::{EnumDescriptor, Persistable};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// 动态值
///
/// 浮点数按位模式比较（线上传输的就是位模式），Set和Map的比较忽略元素顺序。
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Int(i32),
    Long(i64),
    Short(i16),
    Byte(i8),
    /// 只允许基本多文种平面内的字符
    Char(char),
    Bool(bool),
    Float(f32),
    Double(f64),
    String(String),
    /// 带时间点语义的日期，精度为毫秒
    Date(DateTime<Utc>),
    ZonedDateTime(DateTime<FixedOffset>),
    LocalDateTime(NaiveDateTime),
    LocalDate(NaiveDate),
    LocalTime(NaiveTime),
    Enum(EnumValue),
    List(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Object(Box<dyn Persistable>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// 值的种类名称，用于错误信息
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Short(_) => "short",
            Value::Byte(_) => "byte",
            Value::Char(_) => "char",
            Value::Bool(_) => "bool",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::ZonedDateTime(_) => "zdt",
            Value::LocalDateTime(_) => "ldt",
            Value::LocalDate(_) => "ld",
            Value::LocalTime(_) => "lt",
            Value::Enum(_) => "enum",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
        }
    }

    /// 组合对象的类型名，非对象返回 `None`
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Value::Object(object) => Some(object.type_name()),
            Value::Enum(value) => Some(value.descriptor().name()),
            _ => None,
        }
    }

    /// 按键查找Map中的值
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// 以具体类型借用对象值
    pub fn downcast_ref<T: Persistable>(&self) -> Option<&T> {
        match self {
            Value::Object(object) => object.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }
}

/// 判断两个序列是否为同一多重集合
fn same_elements<T, F>(left: &[T], right: &[T], eq: F) -> bool
where
    F: Fn(&T, &T) -> bool,
{
    if left.len() != right.len() {
        return false;
    }
    let mut used = vec![false; right.len()];
    left.iter().all(|a| {
        match right
            .iter()
            .enumerate()
            .position(|(i, b)| !used[i] && eq(a, b))
        {
            Some(index) => {
                used[index] = true;
                true
            }
            None => false,
        }
    })
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::ZonedDateTime(a), Value::ZonedDateTime(b)) => {
                a == b && a.offset() == b.offset()
            }
            (Value::LocalDateTime(a), Value::LocalDateTime(b)) => a == b,
            (Value::LocalDate(a), Value::LocalDate(b)) => a == b,
            (Value::LocalTime(a), Value::LocalTime(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => same_elements(a, b, |x, y| x == y),
            (Value::Map(a), Value::Map(b)) => same_elements(a, b, |x, y| x == y),
            (Value::Object(a), Value::Object(b)) => a.eq_dyn(b.as_ref()),
            _ => false,
        }
    }
}

impl Eq for Value {}

/// 与顺序无关的哈希组合
fn unordered_hash<'a, I, T>(items: I) -> u64
where
    I: Iterator<Item = &'a T>,
    T: Hash + 'a,
{
    items.fold(0u64, |acc, item| {
        let mut hasher = DefaultHasher::new();
        item.hash(&mut hasher);
        acc.wrapping_add(hasher.finish())
    })
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Int(v) => v.hash(state),
            Value::Long(v) => v.hash(state),
            Value::Short(v) => v.hash(state),
            Value::Byte(v) => v.hash(state),
            Value::Char(v) => v.hash(state),
            Value::Bool(v) => v.hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::Double(v) => v.to_bits().hash(state),
            Value::String(v) => v.hash(state),
            Value::Date(v) => v.hash(state),
            Value::ZonedDateTime(v) => {
                v.timestamp_millis().hash(state);
                v.offset().local_minus_utc().hash(state);
            }
            Value::LocalDateTime(v) => v.hash(state),
            Value::LocalDate(v) => v.hash(state),
            Value::LocalTime(v) => v.hash(state),
            Value::Enum(v) => v.hash(state),
            Value::List(items) => items.hash(state),
            Value::Set(items) => unordered_hash(items.iter()).hash(state),
            Value::Map(entries) => unordered_hash(entries.iter()).hash(state),
            // 对象只按类型名参与哈希，相等性由 eq_dyn 判定
            Value::Object(object) => object.type_name().hash(state),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Value::Enum(value)
    }
}

/// 枚举常量的动态表示
#[derive(Clone)]
pub struct EnumValue {
    descriptor: Arc<EnumDescriptor>,
    ordinal: u32,
}

impl EnumValue {
    pub fn new(descriptor: Arc<EnumDescriptor>, ordinal: u32) -> Self {
        Self {
            descriptor,
            ordinal,
        }
    }

    pub fn descriptor(&self) -> &Arc<EnumDescriptor> {
        &self.descriptor
    }

    /// 声明顺序中的位置，从0开始
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    /// 常量名
    pub fn name(&self) -> Option<&str> {
        self.descriptor.variant(self.ordinal)
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal == other.ordinal && self.descriptor.name() == other.descriptor.name()
    }
}

impl Eq for EnumValue {}

impl Hash for EnumValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.name().hash(state);
        self.ordinal.hash(state);
    }
}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}::{}", self.descriptor.name(), name),
            None => write!(f, "{}#{}", self.descriptor.name(), self.ordinal),
        }
    }
}
