//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了枚举序列化器：序号加一作为变长int写入，0保留给空值。

use crate::codec::{PrimitiveDecoder, PrimitiveEncoder};
use crate::error::{Result, SerializerError};
use crate::introspect::EnumDescriptor;
use crate::value::{EnumValue, Value};
use std::sync::Arc;

/// 空枚举的哨兵值
const NULL_ORDINAL: i32 = 0;

pub(crate) fn write(
    descriptor: &Arc<EnumDescriptor>,
    nullable: bool,
    encoder: &mut PrimitiveEncoder,
    value: &Value,
) -> Result<()> {
    match value {
        Value::Null if nullable => {
            encoder.write_var_int(NULL_ORDINAL, true);
            Ok(())
        }
        Value::Enum(constant) if constant.descriptor().name() == descriptor.name() => {
            if constant.ordinal() as usize >= descriptor.len() {
                return Err(SerializerError::mismatch(
                    format!("ordinal below {} for {}", descriptor.len(), descriptor.name()),
                    constant.ordinal().to_string(),
                ));
            }
            encoder.write_var_int(constant.ordinal() as i32 + 1, true);
            Ok(())
        }
        Value::Enum(constant) => Err(SerializerError::mismatch(
            descriptor.name(),
            constant.descriptor().name(),
        )),
        other => Err(SerializerError::mismatch(descriptor.name(), other.kind_name())),
    }
}

pub(crate) fn read(
    descriptor: &Arc<EnumDescriptor>,
    nullable: bool,
    decoder: &mut PrimitiveDecoder<'_>,
) -> Result<Value> {
    let raw = decoder.read_var_int(true)?;
    if raw == NULL_ORDINAL && nullable {
        return Ok(Value::Null);
    }
    let ordinal = raw - 1;
    if ordinal < 0 || ordinal as usize >= descriptor.len() {
        return Err(SerializerError::Decode(format!(
            "ordinal {} out of range for enum {} with {} constants",
            ordinal,
            descriptor.name(),
            descriptor.len()
        )));
    }
    Ok(Value::Enum(EnumValue::new(
        Arc::clone(descriptor),
        ordinal as u32,
    )))
}
