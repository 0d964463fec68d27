//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了序列化引擎：持有类型注册表、序列化器缓存和成员计划缓存，
//! 并提供顶层的序列化和反序列化入口。

use crate::codec::{PrimitiveDecoder, PrimitiveEncoder};
use crate::config::EngineConfig;
use crate::error::{Result, SerializerError};
use crate::introspect::{
    Composite, Persist, PersistEnum, Shape, TypeCatalog, TypeDescriptor, TypeIdentifier,
    TypeLoader,
};
use crate::metrics::EngineMetrics;
use crate::registry::TypeRegistry;
use crate::serialization::{object, MemberPlan, Serializer, SerializerResolver};
use crate::value::Value;
use ahash::RandomState;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, instrument, trace, warn};

/// 序列化引擎
///
/// 所有缓存在构造时为空，首次遇到某个类型时填充，之后在引擎生命周期内只增不删。
/// 引擎可以通过 `Arc` 在线程间共享；每次调用的编码缓冲区只属于该调用。
pub struct Engine {
    config: EngineConfig,
    registry: TypeRegistry,
    resolver: SerializerResolver,
    plans: DashMap<String, Arc<MemberPlan>, RandomState>,
    metrics: EngineMetrics,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// 使用默认配置和空的类型目录创建引擎
    pub fn new() -> Self {
        Self::build(EngineConfig::default(), Arc::new(TypeCatalog::new()))
    }

    /// 使用指定配置创建引擎
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        Self::with_type_loader(config, Arc::new(TypeCatalog::new()))
    }

    /// 使用指定配置和类型加载器创建引擎
    ///
    /// # 参数
    ///
    /// * `config` - 引擎配置，构造前先验证
    /// * `loader` - 反序列化时解析未知类型名的加载器
    pub fn with_type_loader(config: EngineConfig, loader: Arc<dyn TypeLoader>) -> Result<Self> {
        config.validate().map_err(SerializerError::Config)?;
        Ok(Self::build(config, loader))
    }

    fn build(config: EngineConfig, loader: Arc<dyn TypeLoader>) -> Self {
        debug!(
            initial_buffer_capacity = config.initial_buffer_capacity,
            max_collection_length = config.max_collection_length,
            max_depth = config.max_depth,
            "creating serializer engine"
        );
        Self {
            config,
            registry: TypeRegistry::new(loader),
            resolver: SerializerResolver::new(),
            plans: DashMap::with_hasher(RandomState::new()),
            metrics: EngineMetrics::new(),
        }
    }

    /// 注册组合类型，使其可以在反序列化时按名称解析
    ///
    /// 名称与内置别名冲突的类型不会注册，写入该类型时返回 `ReservedName`。
    pub fn register<T: Composite>(&self) -> &Self {
        self.remember(TypeIdentifier::Composite(T::type_descriptor()));
        self
    }

    /// 注册枚举类型
    pub fn register_enum<E: PersistEnum>(&self) -> &Self {
        self.remember(TypeIdentifier::Enum(E::enum_descriptor()));
        self
    }

    fn remember(&self, ty: TypeIdentifier) {
        if let Err(e) = self.registry.memoize(ty) {
            warn!(error = %e, "type not registered");
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &SerializerResolver {
        &self.resolver
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    /// 序列化静态类型的值
    pub fn serialize<T: Persist>(&self, value: &T) -> Result<Vec<u8>> {
        self.serialize_value(&value.to_value())
    }

    /// 反序列化为静态类型
    pub fn deserialize<T: Persist>(&self, bytes: &[u8]) -> Result<T> {
        T::from_value(self.deserialize_value(bytes)?)
    }

    /// 序列化动态值
    ///
    /// 根值总是经由多态对象序列化器写入：存在标志、类型名、负载。
    ///
    /// # 返回值
    ///
    /// 根值为空时返回 `NullArgument`
    #[instrument(skip(self, value), level = "debug", fields(kind = value.kind_name()))]
    pub fn serialize_value(&self, value: &Value) -> Result<Vec<u8>> {
        if value.is_null() {
            return Err(SerializerError::NullArgument);
        }
        let mut encoder = PrimitiveEncoder::with_capacity(self.config.initial_buffer_capacity);
        object::write(self, &mut encoder, value)?;
        self.metrics.record_bytes_written(encoder.len());
        trace!(bytes = encoder.len(), "serialized root value");
        Ok(encoder.into_bytes())
    }

    /// 反序列化动态值
    #[instrument(skip(self, bytes), level = "debug", fields(len = bytes.len()))]
    pub fn deserialize_value(&self, bytes: &[u8]) -> Result<Value> {
        let mut decoder = PrimitiveDecoder::new(bytes);
        let value = object::read(self, &mut decoder)?;
        if !decoder.is_exhausted() {
            if self.config.reject_trailing_bytes {
                return Err(SerializerError::Decode(format!(
                    "{} trailing bytes after root value",
                    decoder.remaining()
                )));
            }
            warn!(
                trailing = decoder.remaining(),
                "ignoring trailing bytes after root value"
            );
        }
        self.metrics.record_bytes_read(decoder.position());
        Ok(value)
    }

    /// 解析声明形态对应的序列化器
    pub fn resolve(&self, shape: &Shape) -> Result<Arc<Serializer>> {
        self.resolver.resolve(shape, &self.metrics)
    }

    /// 获取类型的成员计划，首次使用时构造
    ///
    /// 计划在锁外构造并整体发布，其他线程不会看到构造到一半的计划。
    pub fn plan_for(&self, descriptor: &TypeDescriptor) -> Result<Arc<MemberPlan>> {
        if let Some(plan) = self.plans.get(descriptor.name()) {
            self.metrics.record_plan_cache_hit();
            return Ok(Arc::clone(plan.value()));
        }
        let plan = Arc::new(MemberPlan::build(self, descriptor)?);
        for member in descriptor.members() {
            self.memoize_shape(member.shape());
        }
        debug!(
            type_name = descriptor.name(),
            members = ?plan.member_names(),
            "built member plan"
        );
        self.metrics.record_plan_built();
        Ok(Arc::clone(
            self.plans
                .entry(descriptor.name().to_string())
                .or_insert(plan)
                .value(),
        ))
    }

    /// 记住成员形态中出现的组合类型和枚举类型
    fn memoize_shape(&self, shape: &Shape) {
        match shape {
            Shape::Object { type_name, descriptor } => {
                if !self.registry.contains(type_name) {
                    self.remember(TypeIdentifier::Composite(descriptor()));
                }
            }
            Shape::Enum { descriptor, .. } => {
                self.remember(TypeIdentifier::Enum(Arc::clone(descriptor)));
            }
            Shape::List(element) | Shape::Set(element) | Shape::Array(element) => {
                self.memoize_shape(element)
            }
            Shape::Map(key, value) => {
                self.memoize_shape(key);
                self.memoize_shape(value);
            }
            Shape::Parameterized { arguments, .. } => {
                arguments.iter().for_each(|a| self.memoize_shape(a))
            }
            Shape::Primitive { .. } | Shape::String | Shape::Temporal(_) | Shape::Any => {}
        }
    }
}
