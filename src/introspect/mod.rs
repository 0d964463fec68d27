//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了内省协作方的契约：类型描述符、成员形态和值转换特征。
//!
//! 描述符由 `#[derive(Persist)]` 在编译期生成，引擎只通过这里的接口访问成员和构造实例。

pub mod descriptor;
pub mod impls;
pub mod loader;
pub mod shape;

pub use descriptor::{Constructor, EnumDescriptor, MemberDescriptor, TypeDescriptor};
pub use loader::{TypeCatalog, TypeIdentifier, TypeLoader};
pub use shape::{PrimitiveKind, Shape, TemporalKind};

use crate::error::{Result, SerializerError};
use crate::value::{EnumValue, Value};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 可作为成员持久化的类型
///
/// 每个实现给出声明形态，并在静态类型与动态值之间双向转换。
pub trait Persist: Sized + 'static {
    /// 声明形态
    fn shape() -> Shape;

    /// 转换为动态值
    fn to_value(&self) -> Value;

    /// 从动态值恢复
    fn from_value(value: Value) -> Result<Self>;
}

/// 组合类型实例的对象安全句柄
pub trait Persistable: Any + Send + Sync + fmt::Debug {
    /// 完全限定类型名
    fn type_name(&self) -> &'static str;

    fn descriptor(&self) -> Arc<TypeDescriptor>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn clone_boxed(&self) -> Box<dyn Persistable>;

    /// 与另一个实例比较，类型不同时为false
    fn eq_dyn(&self, other: &dyn Persistable) -> bool;
}

impl Clone for Box<dyn Persistable> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// 组合类型的静态信息
pub trait Composite: Persistable + Sized {
    const TYPE_NAME: &'static str;

    /// 进程内唯一的描述符
    fn type_descriptor() -> Arc<TypeDescriptor>;
}

/// 无字段枚举
pub trait PersistEnum: Sized + 'static {
    const TYPE_NAME: &'static str;

    fn enum_descriptor() -> Arc<EnumDescriptor>;

    /// 声明顺序中的位置
    fn ordinal(&self) -> u32;

    fn from_ordinal(ordinal: u32) -> Option<Self>;
}

/// 从动态值取出组合类型实例
pub fn object_from_value<T: Composite>(value: Value) -> Result<T> {
    match value {
        Value::Object(object) => {
            let found = object.type_name();
            object
                .into_any()
                .downcast::<T>()
                .map(|boxed| *boxed)
                .map_err(|_| SerializerError::mismatch(T::TYPE_NAME, found))
        }
        other => Err(SerializerError::mismatch(T::TYPE_NAME, other.kind_name())),
    }
}

/// 从动态值取出枚举常量
pub fn enum_from_value<E: PersistEnum>(value: Value) -> Result<E> {
    match value {
        Value::Enum(constant) => {
            if constant.descriptor().name() != E::TYPE_NAME {
                return Err(SerializerError::mismatch(
                    E::TYPE_NAME,
                    constant.descriptor().name(),
                ));
            }
            E::from_ordinal(constant.ordinal()).ok_or_else(|| {
                SerializerError::Decode(format!(
                    "ordinal {} out of range for enum {}",
                    constant.ordinal(),
                    E::TYPE_NAME
                ))
            })
        }
        other => Err(SerializerError::mismatch(E::TYPE_NAME, other.kind_name())),
    }
}

/// 枚举常量的动态值
pub fn enum_to_value<E: PersistEnum>(constant: &E) -> Value {
    Value::Enum(EnumValue::new(E::enum_descriptor(), constant.ordinal()))
}
