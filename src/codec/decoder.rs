//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了基础类型解码器，从有界字节游标中读取。

use super::{UTF8_FLAG, UTF8_MORE_FLAG};
use crate::error::{Result, SerializerError};

/// 基础类型解码器
///
/// 读取超出缓冲区边界是致命的解码错误，不返回部分结果。
#[derive(Debug, Clone)]
pub struct PrimitiveDecoder<'a> {
    buffer: &'a [u8],
    position: usize,
    depth: usize,
}

impl<'a> PrimitiveDecoder<'a> {
    /// 创建读取整个字节切片的解码器
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
            depth: 0,
        }
    }

    /// 进入一层嵌套，返回进入后的深度
    pub(crate) fn enter_nested(&mut self) -> usize {
        self.depth += 1;
        self.depth
    }

    pub(crate) fn leave_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// 当前读取位置
    pub fn position(&self) -> usize {
        self.position
    }

    /// 剩余未读字节数
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = *self.buffer.get(self.position).ok_or_else(|| {
            SerializerError::Decode(format!(
                "unexpected end of data at offset {}",
                self.position
            ))
        })?;
        self.position += 1;
        Ok(byte)
    }

    /// 读取指定数量的原始字节
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self
            .position
            .checked_add(count)
            .filter(|&end| end <= self.buffer.len())
            .ok_or_else(|| {
                SerializerError::Decode(format!(
                    "need {} bytes at offset {}, only {} left",
                    count,
                    self.position,
                    self.remaining()
                ))
            })?;
        let bytes = &self.buffer[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// 读取1-5字节的变长int
    ///
    /// `optimize_positive` 必须与写入时一致，该标志不在字节流中传输。
    pub fn read_var_int(&mut self, optimize_positive: bool) -> Result<i32> {
        let mut result: u32 = 0;
        for index in 0..5 {
            let byte = self.read_byte()?;
            result |= ((byte & 0x7F) as u32) << (7 * index);
            if byte & 0x80 == 0 {
                break;
            }
        }
        Ok(if optimize_positive {
            result as i32
        } else {
            ((result >> 1) as i32) ^ -((result & 1) as i32)
        })
    }

    /// 读取1-9字节的变长long
    pub fn read_var_long(&mut self, optimize_positive: bool) -> Result<i64> {
        let mut result: u64 = 0;
        let mut index = 0;
        loop {
            let byte = self.read_byte()?;
            if index == 8 {
                result |= (byte as u64) << 56;
                break;
            }
            result |= ((byte & 0x7F) as u64) << (7 * index);
            if byte & 0x80 == 0 {
                break;
            }
            index += 1;
        }
        Ok(if optimize_positive {
            result as i64
        } else {
            ((result >> 1) as i64) ^ -((result & 1) as i64)
        })
    }

    pub fn read_short(&mut self) -> Result<i16> {
        let bytes = self.read_bytes(2)?;
        Ok(i16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_char(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_fixed_long(&mut self) -> Result<i64> {
        let bytes = self.read_bytes(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(i64::from_be_bytes(raw))
    }

    pub fn read_float(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_var_int(true)? as u32))
    }

    pub fn read_double(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_var_long(true)? as u64))
    }

    pub fn read_boolean(&mut self) -> Result<bool> {
        Ok(self.read_byte()? == 1)
    }

    /// 读取字符串，或空值
    ///
    /// 第一个字节最高位为0时是ASCII快速路径，否则为带长度头的UTF-8编码。
    pub fn read_string(&mut self) -> Result<Option<String>> {
        let first = self.read_byte()?;
        if first & UTF8_FLAG == 0 {
            return self.read_ascii(first).map(Some);
        }
        let char_count = self.read_utf8_length(first)?;
        match char_count {
            0 => return Ok(None),
            1 => return Ok(Some(String::new())),
            _ => {}
        }
        let char_count = (char_count - 1) as usize;
        if char_count > self.remaining() {
            return Err(SerializerError::Decode(format!(
                "string of {} chars exceeds remaining {} bytes",
                char_count,
                self.remaining()
            )));
        }

        let mut units = Vec::with_capacity(char_count);
        for _ in 0..char_count {
            let byte = self.read_byte()?;
            let unit = match byte >> 4 {
                0..=7 => byte as u16,
                12 | 13 => {
                    let second = self.read_byte()?;
                    ((byte as u16 & 0x1F) << 6) | (second as u16 & 0x3F)
                }
                14 => {
                    let second = self.read_byte()?;
                    let third = self.read_byte()?;
                    ((byte as u16 & 0x0F) << 12)
                        | ((second as u16 & 0x3F) << 6)
                        | (third as u16 & 0x3F)
                }
                _ => {
                    return Err(SerializerError::Decode(format!(
                        "invalid string lead byte 0x{:02X} at offset {}",
                        byte,
                        self.position - 1
                    )))
                }
            };
            units.push(unit);
        }
        String::from_utf16(&units)
            .map(Some)
            .map_err(|e| SerializerError::Decode(format!("invalid UTF-16 sequence: {}", e)))
    }

    fn read_utf8_length(&mut self, first: u8) -> Result<u32> {
        let mut result = (first & 0x3F) as u32;
        if first & UTF8_MORE_FLAG == 0 {
            return Ok(result);
        }
        let mut shift = 6;
        for _ in 0..4 {
            let byte = self.read_byte()?;
            result |= ((byte & 0x7F) as u32) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
        }
        Ok(result)
    }

    fn read_ascii(&mut self, first: u8) -> Result<String> {
        let mut text = String::new();
        let mut byte = first;
        loop {
            if byte & 0x80 != 0 {
                text.push((byte & 0x7F) as char);
                return Ok(text);
            }
            text.push(byte as char);
            byte = self.read_byte()?;
        }
    }
}
