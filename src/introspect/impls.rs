//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块为标准库和chrono类型实现 `Persist`。

use super::shape::{PrimitiveKind, Shape, TemporalKind};
use super::Persist;
use crate::error::{Result, SerializerError};
use crate::value::Value;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;

macro_rules! impl_primitive {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl Persist for $ty {
            fn shape() -> Shape {
                Shape::Primitive {
                    kind: PrimitiveKind::$kind,
                    nullable: false,
                }
            }

            fn to_value(&self) -> Value {
                Value::$variant(*self)
            }

            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(SerializerError::mismatch(
                        PrimitiveKind::$kind.alias(),
                        other.kind_name(),
                    )),
                }
            }
        }
    };
}

impl_primitive!(i32, Int, Int);
impl_primitive!(i64, Long, Long);
impl_primitive!(i16, Short, Short);
impl_primitive!(i8, Byte, Byte);
impl_primitive!(bool, Bool, Bool);
impl_primitive!(f32, Float, Float);
impl_primitive!(f64, Double, Double);
impl_primitive!(char, Char, Char);

impl Persist for u8 {
    fn shape() -> Shape {
        Shape::Primitive {
            kind: PrimitiveKind::Byte,
            nullable: false,
        }
    }

    fn to_value(&self) -> Value {
        Value::Byte(*self as i8)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Byte(v) => Ok(v as u8),
            other => Err(SerializerError::mismatch("byte", other.kind_name())),
        }
    }
}

impl Persist for String {
    fn shape() -> Shape {
        Shape::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(SerializerError::mismatch("string", other.kind_name())),
        }
    }
}

macro_rules! impl_temporal {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl Persist for $ty {
            fn shape() -> Shape {
                Shape::Temporal(TemporalKind::$kind)
            }

            fn to_value(&self) -> Value {
                Value::$variant(*self)
            }

            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(SerializerError::mismatch(
                        TemporalKind::$kind.alias(),
                        other.kind_name(),
                    )),
                }
            }
        }
    };
}

impl_temporal!(DateTime<Utc>, Date, Date);
impl_temporal!(DateTime<FixedOffset>, ZonedDateTime, ZonedDateTime);
impl_temporal!(NaiveDateTime, LocalDateTime, LocalDateTime);
impl_temporal!(NaiveDate, LocalDate, LocalDate);
impl_temporal!(NaiveTime, LocalTime, LocalTime);

impl<T: Persist> Persist for Option<T> {
    fn shape() -> Shape {
        T::shape().nullable()
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Persist> Persist for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: Value) -> Result<Self> {
        T::from_value(value).map(Box::new)
    }
}

impl Persist for Value {
    fn shape() -> Shape {
        Shape::Any
    }

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

/// 取出List的元素
fn list_items(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(SerializerError::mismatch("list", other.kind_name())),
    }
}

fn set_items(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Set(items) => Ok(items),
        other => Err(SerializerError::mismatch("set", other.kind_name())),
    }
}

fn map_entries(value: Value) -> Result<Vec<(Value, Value)>> {
    match value {
        Value::Map(entries) => Ok(entries),
        other => Err(SerializerError::mismatch("map", other.kind_name())),
    }
}

impl<T: Persist> Persist for Vec<T> {
    fn shape() -> Shape {
        Shape::list(T::shape())
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Persist::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        list_items(value)?.into_iter().map(T::from_value).collect()
    }
}

impl<T: Persist> Persist for VecDeque<T> {
    fn shape() -> Shape {
        Shape::list(T::shape())
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Persist::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        list_items(value)?.into_iter().map(T::from_value).collect()
    }
}

impl<T: Persist, const N: usize> Persist for [T; N] {
    fn shape() -> Shape {
        Shape::Array(Box::new(T::shape()))
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Persist::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        let items: Vec<T> = list_items(value)?
            .into_iter()
            .map(T::from_value)
            .collect::<Result<_>>()?;
        let found = items.len();
        items
            .try_into()
            .map_err(|_| SerializerError::mismatch(format!("array of {}", N), format!("{} elements", found)))
    }
}

impl<T: Persist + Eq + Hash> Persist for HashSet<T> {
    fn shape() -> Shape {
        Shape::set(T::shape())
    }

    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(Persist::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        set_items(value)?.into_iter().map(T::from_value).collect()
    }
}

impl<T: Persist + Ord> Persist for BTreeSet<T> {
    fn shape() -> Shape {
        Shape::set(T::shape())
    }

    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(Persist::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        set_items(value)?.into_iter().map(T::from_value).collect()
    }
}

impl<K: Persist + Eq + Hash, V: Persist> Persist for HashMap<K, V> {
    fn shape() -> Shape {
        Shape::map(K::shape(), V::shape())
    }

    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }

    fn from_value(value: Value) -> Result<Self> {
        map_entries(value)?
            .into_iter()
            .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
            .collect()
    }
}

impl<K: Persist + Ord, V: Persist> Persist for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::map(K::shape(), V::shape())
    }

    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }

    fn from_value(value: Value) -> Result<Self> {
        map_entries(value)?
            .into_iter()
            .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
            .collect()
    }
}
