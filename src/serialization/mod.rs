//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了序列化器变体：每个序列化器绑定一种值形态，负责该形态的读写。

pub mod collection;
pub mod enumeration;
pub mod object;
pub mod primitive;
pub mod resolver;
pub mod temporal;

pub use object::MemberPlan;
pub use resolver::SerializerResolver;

use crate::codec::{PrimitiveDecoder, PrimitiveEncoder, ABSENT, PRESENT};
use crate::engine::Engine;
use crate::error::{Result, SerializerError};
use crate::introspect::{EnumDescriptor, PrimitiveKind, Shape, TemporalKind};
use crate::value::Value;
use std::sync::Arc;

/// 序列化器变体
#[derive(Debug, Clone)]
pub enum SerializerKind {
    Int,
    Long,
    Short,
    Byte,
    Char,
    Boolean,
    Float,
    Double,
    String,
    Date,
    ZonedDateTime,
    LocalDateTime,
    LocalDate,
    LocalTime,
    Enum(Arc<EnumDescriptor>),
    List(Arc<TypePair>),
    Set(Arc<TypePair>),
    Map {
        key: Arc<TypePair>,
        value: Arc<TypePair>,
    },
    /// 多态对象，具体类型在写入时确定
    Object,
}

impl From<PrimitiveKind> for SerializerKind {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Int => SerializerKind::Int,
            PrimitiveKind::Long => SerializerKind::Long,
            PrimitiveKind::Short => SerializerKind::Short,
            PrimitiveKind::Byte => SerializerKind::Byte,
            PrimitiveKind::Char => SerializerKind::Char,
            PrimitiveKind::Bool => SerializerKind::Boolean,
            PrimitiveKind::Float => SerializerKind::Float,
            PrimitiveKind::Double => SerializerKind::Double,
        }
    }
}

impl From<TemporalKind> for SerializerKind {
    fn from(kind: TemporalKind) -> Self {
        match kind {
            TemporalKind::Date => SerializerKind::Date,
            TemporalKind::ZonedDateTime => SerializerKind::ZonedDateTime,
            TemporalKind::LocalDateTime => SerializerKind::LocalDateTime,
            TemporalKind::LocalDate => SerializerKind::LocalDate,
            TemporalKind::LocalTime => SerializerKind::LocalTime,
        }
    }
}

/// 元素类型与已解析的序列化器
///
/// 存入容器序列化器之前，序列化器必须已完全解析。
#[derive(Debug)]
pub struct TypePair {
    element_type: Shape,
    serializer: Arc<Serializer>,
}

impl TypePair {
    pub fn new(element_type: Shape, serializer: Arc<Serializer>) -> Self {
        Self {
            element_type,
            serializer,
        }
    }

    pub fn element_type(&self) -> &Shape {
        &self.element_type
    }

    pub fn serializer(&self) -> &Arc<Serializer> {
        &self.serializer
    }
}

/// 序列化器
///
/// 构造后不可变。可空的序列化器在负载前写一个存在标志字节；
/// 字符串、枚举和对象各自编码空值，不受该标志控制。
#[derive(Debug, Clone)]
pub struct Serializer {
    kind: SerializerKind,
    nullable: bool,
}

impl Serializer {
    pub fn new(kind: SerializerKind, nullable: bool) -> Self {
        Self { kind, nullable }
    }

    pub fn kind(&self) -> &SerializerKind {
        &self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// 写入一个值
    ///
    /// 对象和容器各占一层嵌套，超过 `max_depth` 时报错。
    pub fn write(&self, engine: &Engine, encoder: &mut PrimitiveEncoder, value: &Value) -> Result<()> {
        if !self.is_nesting() {
            return self.write_value(engine, encoder, value);
        }
        let limit = engine.config().max_depth;
        let depth = encoder.enter_nested();
        let result = if depth > limit {
            Err(SerializerError::mismatch(
                format!("nesting depth at most {}", limit),
                format!("depth {}", depth),
            ))
        } else {
            self.write_value(engine, encoder, value)
        };
        encoder.leave_nested();
        result
    }

    fn write_value(&self, engine: &Engine, encoder: &mut PrimitiveEncoder, value: &Value) -> Result<()> {
        match &self.kind {
            SerializerKind::String => primitive::write_string(encoder, value),
            SerializerKind::Enum(descriptor) => {
                enumeration::write(descriptor, self.nullable, encoder, value)
            }
            SerializerKind::Object => object::write(engine, encoder, value),
            _ => {
                if value.is_null() {
                    if !self.nullable {
                        return Err(SerializerError::mismatch(self.describe(), "null"));
                    }
                    encoder.write_byte(ABSENT);
                    return Ok(());
                }
                if self.nullable {
                    encoder.write_byte(PRESENT);
                }
                self.write_payload(engine, encoder, value)
            }
        }
    }

    /// 读取一个值
    pub fn read(&self, engine: &Engine, decoder: &mut PrimitiveDecoder<'_>) -> Result<Value> {
        if !self.is_nesting() {
            return self.read_value(engine, decoder);
        }
        let limit = engine.config().max_depth;
        let offset = decoder.position();
        let depth = decoder.enter_nested();
        let result = if depth > limit {
            Err(SerializerError::Decode(format!(
                "nesting depth exceeds {} at offset {}",
                limit, offset
            )))
        } else {
            self.read_value(engine, decoder)
        };
        decoder.leave_nested();
        result
    }

    fn read_value(&self, engine: &Engine, decoder: &mut PrimitiveDecoder<'_>) -> Result<Value> {
        match &self.kind {
            SerializerKind::String => primitive::read_string(decoder),
            SerializerKind::Enum(descriptor) => {
                enumeration::read(descriptor, self.nullable, decoder)
            }
            SerializerKind::Object => object::read(engine, decoder),
            _ => {
                if self.nullable && !read_presence(decoder)? {
                    return Ok(Value::Null);
                }
                self.read_payload(engine, decoder)
            }
        }
    }

    fn write_payload(&self, engine: &Engine, encoder: &mut PrimitiveEncoder, value: &Value) -> Result<()> {
        match &self.kind {
            SerializerKind::Date
            | SerializerKind::ZonedDateTime
            | SerializerKind::LocalDateTime
            | SerializerKind::LocalDate
            | SerializerKind::LocalTime => temporal::write(&self.kind, encoder, value),
            SerializerKind::List(pair) | SerializerKind::Set(pair) => {
                collection::write_elements(engine, &self.kind, pair, encoder, value)
            }
            SerializerKind::Map { key, value: entry } => {
                collection::write_entries(engine, key, entry, encoder, value)
            }
            _ => primitive::write(&self.kind, encoder, value),
        }
    }

    fn read_payload(&self, engine: &Engine, decoder: &mut PrimitiveDecoder<'_>) -> Result<Value> {
        match &self.kind {
            SerializerKind::Date
            | SerializerKind::ZonedDateTime
            | SerializerKind::LocalDateTime
            | SerializerKind::LocalDate
            | SerializerKind::LocalTime => temporal::read(&self.kind, decoder),
            SerializerKind::List(pair) => collection::read_list(engine, pair, decoder),
            SerializerKind::Set(pair) => collection::read_set(engine, pair, decoder),
            SerializerKind::Map { key, value } => collection::read_map(engine, key, value, decoder),
            _ => primitive::read(&self.kind, decoder),
        }
    }

    fn is_nesting(&self) -> bool {
        matches!(
            self.kind,
            SerializerKind::Object
                | SerializerKind::List(_)
                | SerializerKind::Set(_)
                | SerializerKind::Map { .. }
        )
    }

    /// 序列化器的简短描述，用于错误信息
    pub fn describe(&self) -> String {
        match &self.kind {
            SerializerKind::Int => "int".to_string(),
            SerializerKind::Long => "long".to_string(),
            SerializerKind::Short => "short".to_string(),
            SerializerKind::Byte => "byte".to_string(),
            SerializerKind::Char => "char".to_string(),
            SerializerKind::Boolean => "bool".to_string(),
            SerializerKind::Float => "float".to_string(),
            SerializerKind::Double => "double".to_string(),
            SerializerKind::String => "string".to_string(),
            SerializerKind::Date => "date".to_string(),
            SerializerKind::ZonedDateTime => "zdt".to_string(),
            SerializerKind::LocalDateTime => "ldt".to_string(),
            SerializerKind::LocalDate => "ld".to_string(),
            SerializerKind::LocalTime => "lt".to_string(),
            SerializerKind::Enum(descriptor) => format!("enum {}", descriptor.name()),
            SerializerKind::List(pair) => format!("list<{:?}>", pair.element_type()),
            SerializerKind::Set(pair) => format!("set<{:?}>", pair.element_type()),
            SerializerKind::Map { key, value } => {
                format!("map<{:?},{:?}>", key.element_type(), value.element_type())
            }
            SerializerKind::Object => "object".to_string(),
        }
    }
}

/// 读取存在标志
///
/// 只接受 `0x00` 和 `0x01`，其它值说明字节流已损坏。
pub(crate) fn read_presence(decoder: &mut PrimitiveDecoder<'_>) -> Result<bool> {
    let offset = decoder.position();
    match decoder.read_byte()? {
        ABSENT => Ok(false),
        PRESENT => Ok(true),
        other => Err(SerializerError::Decode(format!(
            "invalid null flag 0x{:02X} at offset {}",
            other, offset
        ))),
    }
}
