//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了序列化引擎的错误类型和处理机制。

use thiserror::Error;

/// 序列化引擎错误类型枚举
///
/// 所有错误都同步地传递给 `serialize`/`deserialize` 的调用者，引擎内部不做任何重试。
#[derive(Error, Debug)]
pub enum SerializerError {
    /// 字节流格式错误或被截断
    #[error("Decode error: {0}")]
    Decode(String),

    /// 字节流中的类型名无法解析
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// 解析引擎无法归类的泛型形态
    #[error("Unsupported shape: {0}")]
    UnsupportedShape(String),

    /// 用户类型的名称与内置别名冲突
    #[error("Type name {0} is reserved for a builtin type")]
    ReservedName(String),

    /// 目标类型无法实例化
    #[error("Construction error for {type_name}: {source}")]
    Construction {
        type_name: String,
        #[source]
        source: IntrospectionError,
    },

    /// 顶层值为空
    #[error("Cannot serialize a null root value")]
    NullArgument,

    /// 写入对象时内省协作方失败
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Box<SerializerError>,
    },

    /// 读取对象时内省或构造协作方失败
    #[error("Deserialization error: {message}")]
    Deserialization {
        message: String,
        #[source]
        source: Box<SerializerError>,
    },

    /// 值与序列化器的形态不匹配
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// 内省协作方错误
    #[error("Introspection error: {0}")]
    Introspection(#[from] IntrospectionError),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SerializerError {
    /// 创建类型不匹配错误
    pub fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        SerializerError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// 包装为序列化错误，保留原始原因
    pub fn serialization(message: impl Into<String>, source: SerializerError) -> Self {
        SerializerError::Serialization {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// 包装为反序列化错误，保留原始原因
    pub fn deserialization(message: impl Into<String>, source: SerializerError) -> Self {
        SerializerError::Deserialization {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// 沿包装链找到最初的错误
    pub fn root_cause(&self) -> &SerializerError {
        match self {
            SerializerError::Serialization { source, .. }
            | SerializerError::Deserialization { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// 是否为字节流解码错误
    pub fn is_decode(&self) -> bool {
        matches!(self.root_cause(), SerializerError::Decode(_))
    }
}

/// 内省协作方错误
///
/// 由类型加载器和类型描述符返回，引擎会将其包装为 [`SerializerError`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntrospectionError {
    /// 运行环境中不存在该类型
    #[error("type not found: {0}")]
    TypeNotFound(String),

    /// 类型没有零参数的构造路径
    #[error("type {0} has no default constructor")]
    NoDefaultConstructor(String),

    /// 目标实例不是期望的类型
    #[error("target is not an instance of {0}")]
    TargetMismatch(String),
}

/// 序列化操作结果类型别名
pub type Result<T> = std::result::Result<T, SerializerError>;
