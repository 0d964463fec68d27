//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了序列化引擎的运行时指标。

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// 引擎指标收集器
///
/// 计数器只增不减，使用宽松内存序；快照中的各项之间不保证一致。
#[derive(Debug, Default)]
pub struct EngineMetrics {
    plans_built: AtomicU64,
    plan_cache_hits: AtomicU64,
    serializers_resolved: AtomicU64,
    serializer_cache_hits: AtomicU64,
    objects_written: AtomicU64,
    objects_read: AtomicU64,
    bytes_written: AtomicU64,
    bytes_read: AtomicU64,
}

/// 指标快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub plans_built: u64,
    pub plan_cache_hits: u64,
    pub serializers_resolved: u64,
    pub serializer_cache_hits: u64,
    pub objects_written: u64,
    pub objects_read: u64,
    pub bytes_written: u64,
    pub bytes_read: u64,
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_plan_built(&self) {
        self.plans_built.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_plan_cache_hit(&self) {
        self.plan_cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_serializer_resolved(&self) {
        self.serializers_resolved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_serializer_cache_hit(&self) {
        self.serializer_cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一个写入的组合对象（包括嵌套对象）
    pub fn record_object_written(&self) {
        self.objects_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_object_read(&self) {
        self.objects_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bytes_written(&self, bytes: usize) {
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn record_bytes_read(&self, bytes: usize) {
        self.bytes_read.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// 获取当前指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            plans_built: self.plans_built.load(Ordering::Relaxed),
            plan_cache_hits: self.plan_cache_hits.load(Ordering::Relaxed),
            serializers_resolved: self.serializers_resolved.load(Ordering::Relaxed),
            serializer_cache_hits: self.serializer_cache_hits.load(Ordering::Relaxed),
            objects_written: self.objects_written.load(Ordering::Relaxed),
            objects_read: self.objects_read.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
        }
    }
}
