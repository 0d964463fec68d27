//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了基础数值和字符串序列化器的负载编码。

use super::SerializerKind;
use crate::codec::{PrimitiveDecoder, PrimitiveEncoder};
use crate::error::{Result, SerializerError};
use crate::value::Value;

/// 写入基础数值负载
///
/// 整数族统一使用 `optimize_positive = true`。
pub(crate) fn write(kind: &SerializerKind, encoder: &mut PrimitiveEncoder, value: &Value) -> Result<()> {
    match (kind, value) {
        (SerializerKind::Int, Value::Int(v)) => {
            encoder.write_var_int(*v, true);
        }
        (SerializerKind::Long, Value::Long(v)) => {
            encoder.write_var_long(*v, true);
        }
        (SerializerKind::Short, Value::Short(v)) => encoder.write_short(*v),
        (SerializerKind::Byte, Value::Byte(v)) => encoder.write_byte(*v as u8),
        (SerializerKind::Char, Value::Char(c)) => {
            let unit = u16::try_from(*c as u32).map_err(|_| {
                SerializerError::mismatch("char in the basic multilingual plane", format!("{:?}", c))
            })?;
            encoder.write_char(unit);
        }
        (SerializerKind::Boolean, Value::Bool(v)) => encoder.write_boolean(*v),
        (SerializerKind::Float, Value::Float(v)) => {
            encoder.write_float(*v);
        }
        (SerializerKind::Double, Value::Double(v)) => {
            encoder.write_double(*v);
        }
        (kind, value) => {
            return Err(SerializerError::mismatch(
                format!("{:?}", kind),
                value.kind_name(),
            ))
        }
    }
    Ok(())
}

/// 读取基础数值负载
pub(crate) fn read(kind: &SerializerKind, decoder: &mut PrimitiveDecoder<'_>) -> Result<Value> {
    Ok(match kind {
        SerializerKind::Int => Value::Int(decoder.read_var_int(true)?),
        SerializerKind::Long => Value::Long(decoder.read_var_long(true)?),
        SerializerKind::Short => Value::Short(decoder.read_short()?),
        SerializerKind::Byte => Value::Byte(decoder.read_byte()? as i8),
        SerializerKind::Char => {
            let unit = decoder.read_char()?;
            let c = char::from_u32(unit as u32).ok_or_else(|| {
                SerializerError::Decode(format!("lone surrogate 0x{:04X} is not a char", unit))
            })?;
            Value::Char(c)
        }
        SerializerKind::Boolean => Value::Bool(decoder.read_boolean()?),
        SerializerKind::Float => Value::Float(decoder.read_float()?),
        SerializerKind::Double => Value::Double(decoder.read_double()?),
        other => {
            return Err(SerializerError::Decode(format!(
                "{:?} is not a primitive serializer",
                other
            )))
        }
    })
}

pub(crate) fn write_string(encoder: &mut PrimitiveEncoder, value: &Value) -> Result<()> {
    match value {
        Value::Null => encoder.write_string(None),
        Value::String(s) => encoder.write_string(Some(s)),
        other => return Err(SerializerError::mismatch("string", other.kind_name())),
    }
    Ok(())
}

pub(crate) fn read_string(decoder: &mut PrimitiveDecoder<'_>) -> Result<Value> {
    Ok(decoder
        .read_string()?
        .map(Value::String)
        .unwrap_or(Value::Null))
}
