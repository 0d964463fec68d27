//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了序列化器解析引擎：按声明形态递归地构造并缓存序列化器。

use super::{Serializer, SerializerKind, TypePair};
use crate::error::{Result, SerializerError};
use crate::introspect::Shape;
use crate::metrics::EngineMetrics;
use crate::registry::BuiltinType;
use ahash::RandomState;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// 多态委托序列化器的缓存键前缀
const DELEGATE_PREFIX: &str = "delegate:";

/// 序列化器解析引擎
///
/// 缓存按形态键索引，只增不删。序列化器在锁外构造，再以 `entry().or_insert` 发布，
/// 并发构造同一形态时只有第一个结果被保留。
pub struct SerializerResolver {
    cache: DashMap<String, Arc<Serializer>, RandomState>,
}

impl Default for SerializerResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SerializerResolver {
    pub fn new() -> Self {
        Self {
            cache: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// 解析声明形态对应的序列化器
    ///
    /// # 参数
    ///
    /// * `shape` - 成员的声明形态，可以是任意嵌套的容器
    /// * `metrics` - 记录解析和缓存命中次数
    ///
    /// # 返回值
    ///
    /// 无法归类的泛型形态返回 `UnsupportedShape`，且不会进入缓存
    pub fn resolve(&self, shape: &Shape, metrics: &EngineMetrics) -> Result<Arc<Serializer>> {
        let key = shape.cache_key();
        if let Some(cached) = self.cache.get(&key) {
            trace!(shape = %key, "serializer cache hit");
            metrics.record_serializer_cache_hit();
            return Ok(Arc::clone(cached.value()));
        }
        let built = Arc::new(self.build(shape, metrics)?);
        debug!(shape = %key, serializer = %built.describe(), "resolved serializer");
        metrics.record_serializer_resolved();
        Ok(self.publish(key, built))
    }

    /// 多态槽中内置运行时类型的委托序列化器
    ///
    /// 委托序列化器不写存在标志（多态槽已经写过），容器元素按通用基类型处理。
    /// 枚举需要具体描述符，不在这里提供。
    pub fn for_builtin(&self, builtin: BuiltinType, metrics: &EngineMetrics) -> Result<Arc<Serializer>> {
        let key = format!("{}{}", DELEGATE_PREFIX, builtin.alias());
        if let Some(cached) = self.cache.get(&key) {
            metrics.record_serializer_cache_hit();
            return Ok(Arc::clone(cached.value()));
        }
        let kind = match builtin {
            BuiltinType::Int => SerializerKind::Int,
            BuiltinType::Long => SerializerKind::Long,
            BuiltinType::Short => SerializerKind::Short,
            BuiltinType::Byte => SerializerKind::Byte,
            BuiltinType::Char => SerializerKind::Char,
            BuiltinType::Bool => SerializerKind::Boolean,
            BuiltinType::Float => SerializerKind::Float,
            BuiltinType::Double => SerializerKind::Double,
            BuiltinType::String => SerializerKind::String,
            BuiltinType::Date => SerializerKind::Date,
            BuiltinType::ZonedDateTime => SerializerKind::ZonedDateTime,
            BuiltinType::LocalDateTime => SerializerKind::LocalDateTime,
            BuiltinType::LocalDate => SerializerKind::LocalDate,
            BuiltinType::LocalTime => SerializerKind::LocalTime,
            BuiltinType::List => SerializerKind::List(Arc::new(self.pair(&Shape::Any, metrics)?)),
            BuiltinType::Set => SerializerKind::Set(Arc::new(self.pair(&Shape::Any, metrics)?)),
            BuiltinType::Map => SerializerKind::Map {
                key: Arc::new(self.pair(&Shape::Any, metrics)?),
                value: Arc::new(self.pair(&Shape::Any, metrics)?),
            },
            BuiltinType::Enum => {
                return Err(SerializerError::UnsupportedShape(
                    "enum delegate requires a concrete enum type".to_string(),
                ))
            }
        };
        metrics.record_serializer_resolved();
        Ok(self.publish(key, Arc::new(Serializer::new(kind, false))))
    }

    /// 已缓存的序列化器数量
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn publish(&self, key: String, built: Arc<Serializer>) -> Arc<Serializer> {
        Arc::clone(self.cache.entry(key).or_insert(built).value())
    }

    fn pair(&self, element: &Shape, metrics: &EngineMetrics) -> Result<TypePair> {
        let serializer = self.resolve(element, metrics)?;
        Ok(TypePair::new(element.clone(), serializer))
    }

    fn build(&self, shape: &Shape, metrics: &EngineMetrics) -> Result<Serializer> {
        Ok(match shape {
            Shape::Primitive { kind, nullable } => Serializer::new((*kind).into(), *nullable),
            Shape::String => Serializer::new(SerializerKind::String, true),
            Shape::Temporal(kind) => Serializer::new((*kind).into(), true),
            Shape::Enum {
                descriptor,
                nullable,
            } => Serializer::new(SerializerKind::Enum(Arc::clone(descriptor)), *nullable),
            Shape::Object { .. } | Shape::Any => Serializer::new(SerializerKind::Object, true),
            Shape::List(element) | Shape::Array(element) => Serializer::new(
                SerializerKind::List(Arc::new(self.pair(element, metrics)?)),
                true,
            ),
            Shape::Set(element) => Serializer::new(
                SerializerKind::Set(Arc::new(self.pair(element, metrics)?)),
                true,
            ),
            Shape::Map(key, value) => Serializer::new(
                SerializerKind::Map {
                    key: Arc::new(self.pair(key, metrics)?),
                    value: Arc::new(self.pair(value, metrics)?),
                },
                true,
            ),
            Shape::Parameterized { .. } => {
                return Err(SerializerError::UnsupportedShape(shape.cache_key()))
            }
        })
    }
}
