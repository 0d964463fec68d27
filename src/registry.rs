//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了类型注册表：类型别名与类型标识之间的双向映射。

use crate::error::{Result, SerializerError};
use crate::introspect::{TypeIdentifier, TypeLoader};
use crate::value::Value;
use ahash::RandomState;
use dashmap::DashMap;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// 内置类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Int,
    Long,
    Short,
    Byte,
    Char,
    Bool,
    Float,
    Double,
    String,
    Date,
    ZonedDateTime,
    LocalDateTime,
    LocalDate,
    LocalTime,
    Enum,
    List,
    Set,
    Map,
}

lazy_static! {
    /// 内置类型与别名，顺序即注册顺序
    static ref BUILTIN_ALIASES: Vec<(BuiltinType, &'static str)> = BuiltinType::VARIANTS
        .iter()
        .map(|builtin| (*builtin, builtin.alias()))
        .collect();

    static ref TYPE_BY_ALIAS: HashMap<&'static str, BuiltinType> = BUILTIN_ALIASES
        .iter()
        .map(|(builtin, alias)| (*alias, *builtin))
        .collect();
}

impl BuiltinType {
    const VARIANTS: [BuiltinType; 18] = [
        BuiltinType::Int,
        BuiltinType::Long,
        BuiltinType::Short,
        BuiltinType::Byte,
        BuiltinType::Char,
        BuiltinType::Bool,
        BuiltinType::Float,
        BuiltinType::Double,
        BuiltinType::String,
        BuiltinType::Date,
        BuiltinType::ZonedDateTime,
        BuiltinType::LocalDateTime,
        BuiltinType::LocalDate,
        BuiltinType::LocalTime,
        BuiltinType::Enum,
        BuiltinType::List,
        BuiltinType::Set,
        BuiltinType::Map,
    ];

    /// 所有内置类型及其别名
    pub fn all() -> &'static [(BuiltinType, &'static str)] {
        &BUILTIN_ALIASES
    }

    /// 线上别名
    pub fn alias(self) -> &'static str {
        match self {
            BuiltinType::Int => "int",
            BuiltinType::Long => "long",
            BuiltinType::Short => "short",
            BuiltinType::Byte => "byte",
            BuiltinType::Char => "char",
            BuiltinType::Bool => "bool",
            BuiltinType::Float => "float",
            BuiltinType::Double => "double",
            BuiltinType::String => "string",
            BuiltinType::Date => "date",
            BuiltinType::ZonedDateTime => "zdt",
            BuiltinType::LocalDateTime => "ldt",
            BuiltinType::LocalDate => "ld",
            BuiltinType::LocalTime => "lt",
            BuiltinType::Enum => "enum",
            BuiltinType::List => "list",
            BuiltinType::Set => "set",
            BuiltinType::Map => "map",
        }
    }

    /// 按别名查找内置类型
    pub fn from_alias(alias: &str) -> Option<BuiltinType> {
        TYPE_BY_ALIAS.get(alias).copied()
    }

    /// 动态值的运行时内置类型；组合对象返回 `None`
    pub fn of_value(value: &Value) -> Option<BuiltinType> {
        Some(match value {
            Value::Int(_) => BuiltinType::Int,
            Value::Long(_) => BuiltinType::Long,
            Value::Short(_) => BuiltinType::Short,
            Value::Byte(_) => BuiltinType::Byte,
            Value::Char(_) => BuiltinType::Char,
            Value::Bool(_) => BuiltinType::Bool,
            Value::Float(_) => BuiltinType::Float,
            Value::Double(_) => BuiltinType::Double,
            Value::String(_) => BuiltinType::String,
            Value::Date(_) => BuiltinType::Date,
            Value::ZonedDateTime(_) => BuiltinType::ZonedDateTime,
            Value::LocalDateTime(_) => BuiltinType::LocalDateTime,
            Value::LocalDate(_) => BuiltinType::LocalDate,
            Value::LocalTime(_) => BuiltinType::LocalTime,
            Value::Enum(_) => BuiltinType::Enum,
            Value::List(_) => BuiltinType::List,
            Value::Set(_) => BuiltinType::Set,
            Value::Map(_) => BuiltinType::Map,
            Value::Null | Value::Object(_) => return None,
        })
    }
}

/// 类型注册表
///
/// 内置别名在构造时写入且不可变；用户类型在首次出现时加入，并在引擎生命周期内只增不删。
pub struct TypeRegistry {
    types: DashMap<String, TypeIdentifier, RandomState>,
    loader: Arc<dyn TypeLoader>,
}

impl TypeRegistry {
    /// 创建注册表并写入所有内置别名
    pub fn new(loader: Arc<dyn TypeLoader>) -> Self {
        let registry = Self {
            types: DashMap::with_hasher(RandomState::new()),
            loader,
        };
        for (builtin, alias) in BuiltinType::all() {
            registry.register_builtin(*builtin, alias);
        }
        registry
    }

    /// 注册内置类型别名，重复调用无副作用
    pub fn register_builtin(&self, builtin: BuiltinType, alias: &str) {
        self.types
            .entry(alias.to_string())
            .or_insert(TypeIdentifier::Builtin(builtin));
    }

    /// 类型的线上名称
    ///
    /// 内置类型返回别名；其余返回完全限定名，并记住反向映射，
    /// 之后对同一名称的 `type_for` 不再经过加载器。
    ///
    /// # 返回值
    ///
    /// 用户类型使用内置别名作为名称时返回 `ReservedName`
    pub fn alias_for(&self, ty: &TypeIdentifier) -> Result<String> {
        if !matches!(ty, TypeIdentifier::Builtin(_)) {
            self.memoize(ty.clone())?;
        }
        Ok(ty.name().to_string())
    }

    /// 记住用户类型的名称映射
    ///
    /// 内置别名保留给内置类型，不能被用户类型占用。
    pub fn memoize(&self, ty: TypeIdentifier) -> Result<()> {
        let user_type = !matches!(ty, TypeIdentifier::Builtin(_));
        if user_type && BuiltinType::from_alias(ty.name()).is_some() {
            return Err(SerializerError::ReservedName(ty.name().to_string()));
        }
        if self.types.contains_key(ty.name()) {
            return Ok(());
        }
        let name = ty.name().to_string();
        debug!(type_name = %name, "memoized type name");
        self.types.entry(name).or_insert(ty);
        Ok(())
    }

    /// 按名称解析类型
    ///
    /// # 返回值
    ///
    /// 加载器也无法解析时返回 `UnknownType`，调用方不应重试
    pub fn type_for(&self, name: &str) -> Result<TypeIdentifier> {
        if let Some(entry) = self.types.get(name) {
            trace!(type_name = name, "type registry hit");
            return Ok(entry.value().clone());
        }
        let loaded = self.loader.load_type(name).map_err(|e| {
            debug!(type_name = name, error = %e, "type loader failed");
            SerializerError::UnknownType(name.to_string())
        })?;
        debug!(type_name = name, "type loaded");
        Ok(self
            .types
            .entry(name.to_string())
            .or_insert(loaded)
            .value()
            .clone())
    }

    /// 是否已知该名称（不经过加载器）
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// 已知名称数量，包括内置别名
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
