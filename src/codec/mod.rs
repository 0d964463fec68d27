//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了基础二进制编解码：变长整数、定长数值和紧凑字符串编码。
//!
//! 变长整数每字节携带7位负载，第8位 (0x80) 表示后面还有字节。
//! `optimize_positive` 标志不写入字节流，由调用点静态决定，读写两端必须一致。

pub mod decoder;
pub mod encoder;

pub use decoder::PrimitiveDecoder;
pub use encoder::{int_length, long_length, PrimitiveEncoder};

/// 字符串长度头中表示UTF-8编码的位
pub(crate) const UTF8_FLAG: u8 = 0x80;
/// 字符串长度头中表示后续还有字节的位
pub(crate) const UTF8_MORE_FLAG: u8 = 0x40;
/// 空字符串引用
pub(crate) const NULL_STRING: u8 = UTF8_FLAG;
/// 长度为0的字符串
pub(crate) const EMPTY_STRING: u8 = 1 | UTF8_FLAG;

/// 值存在标志
pub const PRESENT: u8 = 0x01;
/// 值缺失标志
pub const ABSENT: u8 = 0x00;
