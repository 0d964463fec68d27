//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了类型加载器：按完全限定名找到可加载的类型。

use super::descriptor::{EnumDescriptor, TypeDescriptor};
use super::{Composite, PersistEnum};
use crate::error::IntrospectionError;
use crate::registry::BuiltinType;
use ahash::RandomState;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// 类型标识
#[derive(Debug, Clone)]
pub enum TypeIdentifier {
    Builtin(BuiltinType),
    Enum(Arc<EnumDescriptor>),
    Composite(Arc<TypeDescriptor>),
}

impl TypeIdentifier {
    /// 类型的线上名称：内置类型为别名，其余为完全限定名
    pub fn name(&self) -> &str {
        match self {
            TypeIdentifier::Builtin(builtin) => builtin.alias(),
            TypeIdentifier::Enum(descriptor) => descriptor.name(),
            TypeIdentifier::Composite(descriptor) => descriptor.name(),
        }
    }
}

/// 类型加载器特征
///
/// 反序列化时遇到注册表中没有的类型名，引擎会委托给加载器。
pub trait TypeLoader: Send + Sync {
    /// 按完全限定名加载类型
    ///
    /// # 返回值
    ///
    /// 运行环境中不存在该类型时返回 `TypeNotFound`
    fn load_type(&self, name: &str) -> Result<TypeIdentifier, IntrospectionError>;
}

/// 默认类型加载器
///
/// 通过显式注册填充的类型目录，可以在多个引擎之间共享。
#[derive(Debug, Default)]
pub struct TypeCatalog {
    types: DashMap<String, TypeIdentifier, RandomState>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册组合类型
    pub fn register<T: Composite>(&self) -> &Self {
        self.register_descriptor(T::type_descriptor())
    }

    /// 注册枚举类型
    pub fn register_enum<E: PersistEnum>(&self) -> &Self {
        let descriptor = E::enum_descriptor();
        debug!(type_name = descriptor.name(), "catalog registered enum");
        self.types
            .insert(descriptor.name().to_string(), TypeIdentifier::Enum(descriptor));
        self
    }

    /// 注册手写的类型描述符
    pub fn register_descriptor(&self, descriptor: Arc<TypeDescriptor>) -> &Self {
        debug!(type_name = descriptor.name(), "catalog registered type");
        self.types.insert(
            descriptor.name().to_string(),
            TypeIdentifier::Composite(descriptor),
        );
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeLoader for TypeCatalog {
    fn load_type(&self, name: &str) -> Result<TypeIdentifier, IntrospectionError> {
        self.types
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| IntrospectionError::TypeNotFound(name.to_string()))
    }
}

impl<L: TypeLoader + ?Sized> TypeLoader for Arc<L> {
    fn load_type(&self, name: &str) -> Result<TypeIdentifier, IntrospectionError> {
        (**self).load_type(name)
    }
}
