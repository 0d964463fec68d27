//! oxpack - 紧凑的二进制对象图序列化库
//!
//! 将基础类型、字符串、时间、枚举、容器和嵌套组合对象编码为紧凑的自描述字节流，
//! 并从字节流还原等价的值。组合类型的成员描述由 `#[derive(Persist)]` 在编译期生成。
//!
//! ```ignore
//! use oxpack::{Engine, Persist};
//!
//! #[derive(Persist, Clone, Debug, Default, PartialEq)]
//! struct Item {
//!     id: i32,
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! let engine = Engine::new();
//! engine.register::<Item>();
//! let bytes = engine.serialize(&item)?;
//! let back: Item = engine.deserialize(&bytes)?;
//! ```

#![doc(html_root_url = "https://docs.rs/oxpack/0.1.2")]

extern crate self as oxpack;

pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod introspect;
pub mod metrics;
pub mod registry;
pub mod serialization;
pub mod telemetry;
pub mod value;

// Re-export commonly used items
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{IntrospectionError, Result, SerializerError};
pub use introspect::{
    Composite, Persist, PersistEnum, Persistable, Shape, TypeCatalog, TypeDescriptor,
    TypeIdentifier, TypeLoader,
};
pub use metrics::MetricsSnapshot;
pub use oxpack_macros::Persist;
pub use value::{EnumValue, Value};

/// oxpack 版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
