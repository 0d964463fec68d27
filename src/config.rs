//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了序列化引擎的配置结构和解析逻辑。

use crate::error::{Result, SerializerError};
use serde::Deserialize;
use std::path::Path;

/// 编码缓冲区初始容量上限（64MB）
pub const MAX_INITIAL_BUFFER_CAPACITY: usize = 64 * 1024 * 1024;

/// 引擎配置
///
/// 所有字段都有默认值，TOML中缺失的字段取默认值。
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// 编码缓冲区初始容量（字节）
    pub initial_buffer_capacity: usize,
    /// 解码时允许的最大容器元素个数
    pub max_collection_length: usize,
    /// 根值之后还有剩余字节时是否报错
    pub reject_trailing_bytes: bool,
    /// 容器与对象的最大嵌套深度，读写两端都检查
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_buffer_capacity: 2048,
            max_collection_length: 16 * 1024 * 1024,
            reject_trailing_bytes: false,
            max_depth: 256,
        }
    }
}

impl EngineConfig {
    /// 验证配置
    ///
    /// # 返回值
    ///
    /// 配置有效返回Ok，否则返回错误描述
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.initial_buffer_capacity == 0 {
            return Err("initial_buffer_capacity cannot be zero".to_string());
        }

        if self.initial_buffer_capacity > MAX_INITIAL_BUFFER_CAPACITY {
            return Err(format!(
                "initial_buffer_capacity cannot exceed {} bytes",
                MAX_INITIAL_BUFFER_CAPACITY
            ));
        }

        if self.max_collection_length == 0 {
            return Err("max_collection_length cannot be zero".to_string());
        }

        if self.max_depth == 0 {
            return Err("max_depth cannot be zero".to_string());
        }

        Ok(())
    }

    /// 从TOML文本解析配置
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(text).map_err(|e| SerializerError::Config(e.to_string()))?;
        config.validate().map_err(SerializerError::Config)?;
        Ok(config)
    }

    /// 从TOML文件加载配置
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
