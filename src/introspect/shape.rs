//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了成员声明类型的泛型形态。

use super::descriptor::{EnumDescriptor, TypeDescriptor};
use std::fmt;
use std::sync::Arc;

/// 基础数值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Int,
    Long,
    Short,
    Byte,
    Char,
    Bool,
    Float,
    Double,
}

impl PrimitiveKind {
    pub fn alias(self) -> &'static str {
        match self {
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }
}

/// 时间类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalKind {
    /// 带时区语义的时间点
    Date,
    ZonedDateTime,
    LocalDateTime,
    LocalDate,
    LocalTime,
}

impl TemporalKind {
    pub fn alias(self) -> &'static str {
        match self {
            TemporalKind::Date => "date",
            TemporalKind::ZonedDateTime => "zdt",
            TemporalKind::LocalDateTime => "ldt",
            TemporalKind::LocalDate => "ld",
            TemporalKind::LocalTime => "lt",
        }
    }
}

/// 成员的声明形态
///
/// 解析引擎按形态递归地构造序列化器。组合类型通过函数指针引用描述符，
/// 因此自引用类型的形态可以在描述符初始化之前构造。
#[derive(Clone)]
pub enum Shape {
    /// 基础数值；`nullable` 对应可空的装箱形式
    Primitive { kind: PrimitiveKind, nullable: bool },
    String,
    /// 时间值总是可空
    Temporal(TemporalKind),
    Enum {
        descriptor: Arc<EnumDescriptor>,
        nullable: bool,
    },
    /// 声明为某个组合类型；运行时按多态槽处理
    Object {
        type_name: &'static str,
        descriptor: fn() -> Arc<TypeDescriptor>,
    },
    /// 通用基类型
    Any,
    List(Box<Shape>),
    Set(Box<Shape>),
    Map(Box<Shape>, Box<Shape>),
    Array(Box<Shape>),
    /// 无法归类为List、Set或Map的用户泛型
    Parameterized { raw: String, arguments: Vec<Shape> },
}

impl Shape {
    pub fn list(element: Shape) -> Self {
        Shape::List(Box::new(element))
    }

    pub fn set(element: Shape) -> Self {
        Shape::Set(Box::new(element))
    }

    pub fn map(key: Shape, value: Shape) -> Self {
        Shape::Map(Box::new(key), Box::new(value))
    }

    /// 转换为可空形式
    pub fn nullable(self) -> Self {
        match self {
            Shape::Primitive { kind, .. } => Shape::Primitive {
                kind,
                nullable: true,
            },
            Shape::Enum { descriptor, .. } => Shape::Enum {
                descriptor,
                nullable: true,
            },
            other => other,
        }
    }

    /// 序列化器缓存键
    ///
    /// 所有组合类型和通用基类型共用同一个多态序列化器，数组与列表共用列表序列化器。
    pub fn cache_key(&self) -> String {
        match self {
            Shape::Primitive { kind, nullable } => {
                if *nullable {
                    format!("{}?", kind.alias())
                } else {
                    kind.alias().to_string()
                }
            }
            Shape::String => "string".to_string(),
            Shape::Temporal(kind) => kind.alias().to_string(),
            Shape::Enum {
                descriptor,
                nullable,
            } => {
                if *nullable {
                    format!("enum:{}?", descriptor.name())
                } else {
                    format!("enum:{}", descriptor.name())
                }
            }
            Shape::Object { .. } | Shape::Any => "object".to_string(),
            Shape::List(element) | Shape::Array(element) => {
                format!("list<{}>", element.cache_key())
            }
            Shape::Set(element) => format!("set<{}>", element.cache_key()),
            Shape::Map(key, value) => format!("map<{},{}>", key.cache_key(), value.cache_key()),
            Shape::Parameterized { raw, arguments } => {
                let arguments: Vec<String> = arguments.iter().map(Shape::cache_key).collect();
                format!("{}<{}>", raw, arguments.join(","))
            }
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Object { type_name, .. } => write!(f, "Object({})", type_name),
            other => f.write_str(&other.cache_key()),
        }
    }
}
