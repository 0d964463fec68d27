//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了容器序列化器：元素个数作为变长int写入，随后按迭代顺序写入元素。

use super::{SerializerKind, TypePair};
use crate::codec::{PrimitiveDecoder, PrimitiveEncoder};
use crate::engine::Engine;
use crate::error::{Result, SerializerError};
use crate::value::Value;
use ahash::RandomState;
use std::collections::{HashMap, HashSet};

/// 写入List或Set的元素
pub(crate) fn write_elements(
    engine: &Engine,
    kind: &SerializerKind,
    pair: &TypePair,
    encoder: &mut PrimitiveEncoder,
    value: &Value,
) -> Result<()> {
    let items = match (kind, value) {
        (SerializerKind::Set(_), Value::Set(items)) => items,
        (SerializerKind::List(_), Value::List(items)) => items,
        (SerializerKind::Set(_), other) => {
            return Err(SerializerError::mismatch("set", other.kind_name()))
        }
        (_, other) => return Err(SerializerError::mismatch("list", other.kind_name())),
    };
    write_count(encoder, items.len())?;
    for item in items {
        pair.serializer().write(engine, encoder, item)?;
    }
    Ok(())
}

/// 写入Map的键值对，每对先写键后写值
pub(crate) fn write_entries(
    engine: &Engine,
    key: &TypePair,
    value_pair: &TypePair,
    encoder: &mut PrimitiveEncoder,
    value: &Value,
) -> Result<()> {
    let entries = match value {
        Value::Map(entries) => entries,
        other => return Err(SerializerError::mismatch("map", other.kind_name())),
    };
    write_count(encoder, entries.len())?;
    for (k, v) in entries {
        key.serializer().write(engine, encoder, k)?;
        value_pair.serializer().write(engine, encoder, v)?;
    }
    Ok(())
}

pub(crate) fn read_list(
    engine: &Engine,
    pair: &TypePair,
    decoder: &mut PrimitiveDecoder<'_>,
) -> Result<Value> {
    let count = read_count(engine, decoder)?;
    let mut items = Vec::with_capacity(count.min(decoder.remaining()));
    for _ in 0..count {
        items.push(pair.serializer().read(engine, decoder)?);
    }
    Ok(Value::List(items))
}

/// 读取Set；重复元素只保留一个
pub(crate) fn read_set(
    engine: &Engine,
    pair: &TypePair,
    decoder: &mut PrimitiveDecoder<'_>,
) -> Result<Value> {
    let count = read_count(engine, decoder)?;
    let capacity = count.min(decoder.remaining());
    let mut seen: HashSet<Value, RandomState> =
        HashSet::with_capacity_and_hasher(capacity, RandomState::new());
    let mut items = Vec::with_capacity(capacity);
    for _ in 0..count {
        let item = pair.serializer().read(engine, decoder)?;
        if seen.insert(item.clone()) {
            items.push(item);
        }
    }
    Ok(Value::Set(items))
}

/// 读取Map；键重复时后写入的值生效
pub(crate) fn read_map(
    engine: &Engine,
    key: &TypePair,
    value: &TypePair,
    decoder: &mut PrimitiveDecoder<'_>,
) -> Result<Value> {
    let count = read_count(engine, decoder)?;
    let capacity = count.min(decoder.remaining());
    let mut index: HashMap<Value, usize, RandomState> =
        HashMap::with_capacity_and_hasher(capacity, RandomState::new());
    let mut entries: Vec<(Value, Value)> = Vec::with_capacity(capacity);
    for _ in 0..count {
        let k = key.serializer().read(engine, decoder)?;
        let v = value.serializer().read(engine, decoder)?;
        match index.get(&k) {
            Some(&position) => entries[position].1 = v,
            None => {
                index.insert(k.clone(), entries.len());
                entries.push((k, v));
            }
        }
    }
    Ok(Value::Map(entries))
}

fn write_count(encoder: &mut PrimitiveEncoder, len: usize) -> Result<()> {
    let count = i32::try_from(len)
        .map_err(|_| SerializerError::mismatch("at most i32::MAX elements", len.to_string()))?;
    encoder.write_var_int(count, true);
    Ok(())
}

fn read_count(engine: &Engine, decoder: &mut PrimitiveDecoder<'_>) -> Result<usize> {
    let offset = decoder.position();
    let count = decoder.read_var_int(true)?;
    let limit = engine.config().max_collection_length;
    if count < 0 || count as usize > limit {
        return Err(SerializerError::Decode(format!(
            "collection length {} at offset {} outside 0..={}",
            count, offset, limit
        )));
    }
    Ok(count as usize)
}
