//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了基础类型编码器，写入可增长的内存缓冲区。

use super::{NULL_STRING, EMPTY_STRING, UTF8_FLAG, UTF8_MORE_FLAG};

/// 基础类型编码器
///
/// 负责变长整数、定长整数、浮点数、布尔值和字符串的二进制编码。
/// 多字节定长数值统一使用大端字节序。
#[derive(Debug, Default, Clone)]
pub struct PrimitiveEncoder {
    buffer: Vec<u8>,
    depth: usize,
}

impl PrimitiveEncoder {
    /// 创建空的编码器
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            depth: 0,
        }
    }

    /// 创建具有初始容量的编码器
    ///
    /// # 参数
    ///
    /// * `capacity` - 缓冲区初始容量（字节）
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
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

    /// 已写入的字节数
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// 已写入的字节
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// 取出缓冲区
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn write_byte(&mut self, value: u8) {
        self.buffer.push(value);
    }

    /// 写入原始字节，不写长度
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// 写入1-5字节的变长int
    ///
    /// # 参数
    ///
    /// * `value` - 要写入的值
    /// * `optimize_positive` - 为true时小正数更紧凑（负数占5字节）；为false时先做zig-zag变换
    ///
    /// # 返回值
    ///
    /// 返回写入的字节数
    pub fn write_var_int(&mut self, value: i32, optimize_positive: bool) -> usize {
        let mut bits = if optimize_positive {
            value as u32
        } else {
            ((value << 1) ^ (value >> 31)) as u32
        };
        let mut written = 1;
        while bits >> 7 != 0 {
            self.write_byte((bits & 0x7F) as u8 | 0x80);
            bits >>= 7;
            written += 1;
        }
        self.write_byte(bits as u8);
        written
    }

    /// 写入1-9字节的变长long
    ///
    /// 前8个字节各携带7位负载，第9个字节（如果需要）携带剩余的完整8位。
    pub fn write_var_long(&mut self, value: i64, optimize_positive: bool) -> usize {
        let mut bits = if optimize_positive {
            value as u64
        } else {
            ((value << 1) ^ (value >> 63)) as u64
        };
        for written in 1..9 {
            if bits >> 7 == 0 {
                self.write_byte(bits as u8);
                return written;
            }
            self.write_byte((bits & 0x7F) as u8 | 0x80);
            bits >>= 7;
        }
        self.write_byte(bits as u8);
        9
    }

    /// 写入2字节short（大端）
    pub fn write_short(&mut self, value: i16) {
        self.write_bytes(&value.to_be_bytes());
    }

    /// 写入2字节char（UTF-16码元，大端）
    pub fn write_char(&mut self, value: u16) {
        self.write_bytes(&value.to_be_bytes());
    }

    /// 写入8字节定长long（大端）
    pub fn write_fixed_long(&mut self, value: i64) {
        self.write_bytes(&value.to_be_bytes());
    }

    /// 以32位整数位模式写入float
    pub fn write_float(&mut self, value: f32) -> usize {
        self.write_var_int(value.to_bits() as i32, true)
    }

    /// 以64位整数位模式写入double
    pub fn write_double(&mut self, value: f64) -> usize {
        self.write_var_long(value.to_bits() as i64, true)
    }

    pub fn write_boolean(&mut self, value: bool) {
        self.write_byte(u8::from(value));
    }

    /// 写入字符串，或空值
    ///
    /// 长度在 `[2, 64)` 之间的纯ASCII字符串直接写入原始字节，并在最后一个字节上置最高位；
    /// 其余字符串写入UTF-8长度头，再逐个写入UTF-16码元（ASCII为1字节，其它为2-3字节）。
    pub fn write_string(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            self.write_byte(NULL_STRING);
            return;
        };
        let units: Vec<u16> = value.encode_utf16().collect();
        let char_count = units.len();
        if char_count == 0 {
            self.write_byte(EMPTY_STRING);
            return;
        }

        let ascii = char_count > 1 && char_count < 64 && units.iter().all(|&c| c <= 0x7F);
        if ascii {
            self.buffer.extend(units.iter().map(|&c| c as u8));
            let last = self.buffer.len() - 1;
            self.buffer[last] |= 0x80;
            return;
        }

        self.write_utf8_length(char_count as u32 + 1);
        for &c in &units {
            if c <= 0x007F {
                self.write_byte(c as u8);
            } else if c > 0x07FF {
                self.write_byte((0xE0 | (c >> 12) & 0x0F) as u8);
                self.write_byte((0x80 | (c >> 6) & 0x3F) as u8);
                self.write_byte((0x80 | c & 0x3F) as u8);
            } else {
                self.write_byte((0xC0 | (c >> 6) & 0x1F) as u8);
                self.write_byte((0x80 | c & 0x3F) as u8);
            }
        }
    }

    /// 写入已知只含ASCII字符的字符串
    ///
    /// 非ASCII内容会被破坏，调用者负责保证输入。
    pub fn write_ascii(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            self.write_byte(NULL_STRING);
            return;
        };
        let bytes = value.as_bytes();
        match bytes.len() {
            0 => self.write_byte(EMPTY_STRING),
            1 => {
                self.write_byte(2 | UTF8_FLAG);
                self.write_byte(bytes[0]);
            }
            _ => {
                self.write_bytes(bytes);
                let last = self.buffer.len() - 1;
                self.buffer[last] |= 0x80;
            }
        }
    }

    /// 写入字符串长度头
    ///
    /// 第一个字节的第8位表示UTF-8，第7位表示后面还有字节，低6位携带负载；
    /// 之后每个字节携带7位负载，第8位为续位。
    fn write_utf8_length(&mut self, value: u32) {
        if value >> 6 == 0 {
            self.write_byte(value as u8 | UTF8_FLAG);
            return;
        }
        self.write_byte((value & 0x3F) as u8 | UTF8_MORE_FLAG | UTF8_FLAG);
        let mut rest = value >> 6;
        for _ in 0..3 {
            if rest >> 7 == 0 {
                break;
            }
            self.write_byte((rest & 0x7F) as u8 | 0x80);
            rest >>= 7;
        }
        self.write_byte(rest as u8);
    }
}

/// 变长int编码后的字节数
pub fn int_length(value: i32, optimize_positive: bool) -> usize {
    let bits = if optimize_positive {
        value as u32
    } else {
        ((value << 1) ^ (value >> 31)) as u32
    };
    match bits {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        0x20_0000..=0x0FFF_FFFF => 4,
        _ => 5,
    }
}

/// 变长long编码后的字节数
pub fn long_length(value: i64, optimize_positive: bool) -> usize {
    let bits = if optimize_positive {
        value as u64
    } else {
        ((value << 1) ^ (value >> 63)) as u64
    };
    let significant = 64 - bits.leading_zeros() as usize;
    if significant <= 7 {
        1
    } else {
        std::cmp::min((significant + 6) / 7, 9)
    }
}
