//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了对象图序列化器：多态槽的类型名编码，以及按成员计划遍历组合对象。

use super::{read_presence, Serializer};
use crate::codec::{PrimitiveDecoder, PrimitiveEncoder, ABSENT, PRESENT};
use crate::engine::Engine;
use crate::error::{Result, SerializerError};
use crate::introspect::{MemberDescriptor, Persistable, Shape, TypeDescriptor, TypeIdentifier};
use crate::registry::BuiltinType;
use crate::value::Value;
use std::sync::Arc;

/// 成员计划中的一项
#[derive(Debug)]
struct PlanEntry {
    member: MemberDescriptor,
    serializer: Arc<Serializer>,
}

/// 一个具体组合类型的成员计划
///
/// 成员（含祖先成员）按名称字典序排列，写入端和读取端无需传输计划即可对齐。
/// 计划发布后不可变。
#[derive(Debug)]
pub struct MemberPlan {
    type_name: String,
    entries: Vec<PlanEntry>,
}

impl MemberPlan {
    /// 为类型构造计划，成员序列化器由引擎解析
    pub(crate) fn build(engine: &Engine, descriptor: &TypeDescriptor) -> Result<Self> {
        let mut entries = Vec::with_capacity(descriptor.members().len());
        for member in descriptor.members() {
            let serializer = engine.resolve(member.shape())?;
            entries.push(PlanEntry {
                member: member.clone(),
                serializer,
            });
        }
        entries.sort_by(|a, b| a.member.name().cmp(b.member.name()));
        Ok(Self {
            type_name: descriptor.name().to_string(),
            entries,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// 计划中的成员名，按遍历顺序
    pub fn member_names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.member.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按计划顺序写入实例的所有成员
    pub(crate) fn write(
        &self,
        engine: &Engine,
        encoder: &mut PrimitiveEncoder,
        instance: &dyn Persistable,
    ) -> Result<()> {
        for entry in &self.entries {
            let value = entry.member.get(instance.as_any()).map_err(|e| {
                SerializerError::serialization(
                    format!(
                        "cannot read member {} of {}",
                        entry.member.name(),
                        self.type_name
                    ),
                    e,
                )
            })?;
            entry.serializer.write(engine, encoder, &value)?;
        }
        Ok(())
    }

    /// 按计划顺序读取成员并写入实例
    pub(crate) fn read_into(
        &self,
        engine: &Engine,
        decoder: &mut PrimitiveDecoder<'_>,
        instance: &mut dyn Persistable,
    ) -> Result<()> {
        for entry in &self.entries {
            let value = entry.serializer.read(engine, decoder)?;
            entry
                .member
                .set(instance.as_any_mut(), value)
                .map_err(|e| {
                    SerializerError::deserialization(
                        format!(
                            "cannot assign member {} of {}",
                            entry.member.name(),
                            self.type_name
                        ),
                        e,
                    )
                })?;
        }
        Ok(())
    }
}

/// 写入多态槽：存在标志、运行时类型名、负载
pub(crate) fn write(engine: &Engine, encoder: &mut PrimitiveEncoder, value: &Value) -> Result<()> {
    if value.is_null() {
        encoder.write_byte(ABSENT);
        return Ok(());
    }
    encoder.write_byte(PRESENT);
    match value {
        Value::Object(instance) => {
            let descriptor = instance.descriptor();
            let name = engine
                .registry()
                .alias_for(&TypeIdentifier::Composite(Arc::clone(&descriptor)))?;
            encoder.write_string(Some(&name));
            let plan = engine.plan_for(&descriptor)?;
            plan.write(engine, encoder, instance.as_ref())?;
            engine.metrics().record_object_written();
            Ok(())
        }
        Value::Enum(constant) => {
            let descriptor = Arc::clone(constant.descriptor());
            let name = engine
                .registry()
                .alias_for(&TypeIdentifier::Enum(Arc::clone(&descriptor)))?;
            encoder.write_string(Some(&name));
            let serializer = engine.resolve(&Shape::Enum {
                descriptor,
                nullable: false,
            })?;
            serializer.write(engine, encoder, value)
        }
        other => {
            let builtin = BuiltinType::of_value(other)
                .ok_or_else(|| SerializerError::mismatch("object", other.kind_name()))?;
            encoder.write_string(Some(builtin.alias()));
            let serializer = engine.resolver().for_builtin(builtin, engine.metrics())?;
            serializer.write(engine, encoder, other)
        }
    }
}

/// 读取多态槽
pub(crate) fn read(engine: &Engine, decoder: &mut PrimitiveDecoder<'_>) -> Result<Value> {
    if !read_presence(decoder)? {
        return Ok(Value::Null);
    }
    let offset = decoder.position();
    let name = decoder.read_string()?.ok_or_else(|| {
        SerializerError::Decode(format!("missing type name at offset {}", offset))
    })?;
    match engine.registry().type_for(&name)? {
        TypeIdentifier::Builtin(BuiltinType::Enum) => Err(SerializerError::Decode(format!(
            "enum value at offset {} lacks a concrete enum type",
            offset
        ))),
        TypeIdentifier::Builtin(builtin) => engine
            .resolver()
            .for_builtin(builtin, engine.metrics())?
            .read(engine, decoder),
        TypeIdentifier::Enum(descriptor) => engine
            .resolve(&Shape::Enum {
                descriptor,
                nullable: false,
            })?
            .read(engine, decoder),
        TypeIdentifier::Composite(descriptor) => {
            let plan = engine.plan_for(&descriptor)?;
            let mut instance = descriptor.instantiate().map_err(|source| {
                SerializerError::deserialization(
                    format!("cannot instantiate {}", name),
                    SerializerError::Construction {
                        type_name: name.clone(),
                        source,
                    },
                )
            })?;
            plan.read_into(engine, decoder, instance.as_mut())?;
            engine.metrics().record_object_read();
            Ok(Value::Object(instance))
        }
    }
}
