//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了时间类型序列化器的负载编码。

use super::SerializerKind;
use crate::codec::{PrimitiveDecoder, PrimitiveEncoder};
use crate::error::{Result, SerializerError};
use crate::value::Value;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// 本地日期格式
pub const LOCAL_DATE_FORMAT: &str = "%Y%m%d";
/// 本地日期时间格式
pub const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
/// 本地时间格式
pub const LOCAL_TIME_FORMAT: &str = "%H:%M:%S%.f";

pub(crate) fn write(kind: &SerializerKind, encoder: &mut PrimitiveEncoder, value: &Value) -> Result<()> {
    match (kind, value) {
        (SerializerKind::Date, Value::Date(v)) => {
            let millis = whole_millis(v.timestamp_millis(), v.timestamp_subsec_nanos())?;
            encoder.write_var_long(millis, true);
        }
        (SerializerKind::ZonedDateTime, Value::ZonedDateTime(v)) => {
            let millis = whole_millis(v.timestamp_millis(), v.timestamp_subsec_nanos())?;
            encoder.write_var_long(millis, true);
            encoder.write_string(Some(&zone_id(v.offset())));
        }
        (SerializerKind::LocalDateTime, Value::LocalDateTime(v)) => {
            four_digit_year(v.year())?;
            encoder.write_string(Some(&v.format(LOCAL_DATE_TIME_FORMAT).to_string()));
        }
        (SerializerKind::LocalDate, Value::LocalDate(v)) => {
            four_digit_year(v.year())?;
            encoder.write_string(Some(&v.format(LOCAL_DATE_FORMAT).to_string()));
        }
        (SerializerKind::LocalTime, Value::LocalTime(v)) => {
            encoder.write_string(Some(&v.format(LOCAL_TIME_FORMAT).to_string()));
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

pub(crate) fn read(kind: &SerializerKind, decoder: &mut PrimitiveDecoder<'_>) -> Result<Value> {
    match kind {
        SerializerKind::Date => {
            let millis = decoder.read_var_long(true)?;
            Ok(Value::Date(instant(millis)?))
        }
        SerializerKind::ZonedDateTime => {
            let millis = decoder.read_var_long(true)?;
            let zone = required_string(decoder, "zone")?;
            let offset = parse_zone(&zone)?;
            Ok(Value::ZonedDateTime(instant(millis)?.with_timezone(&offset)))
        }
        SerializerKind::LocalDateTime => {
            let text = required_string(decoder, "local date-time")?;
            NaiveDateTime::parse_from_str(&text, LOCAL_DATE_TIME_FORMAT)
                .map(Value::LocalDateTime)
                .map_err(|e| SerializerError::Decode(format!("bad local date-time {:?}: {}", text, e)))
        }
        SerializerKind::LocalDate => {
            let text = required_string(decoder, "local date")?;
            NaiveDate::parse_from_str(&text, LOCAL_DATE_FORMAT)
                .map(Value::LocalDate)
                .map_err(|e| SerializerError::Decode(format!("bad local date {:?}: {}", text, e)))
        }
        SerializerKind::LocalTime => {
            let text = required_string(decoder, "local time")?;
            NaiveTime::parse_from_str(&text, LOCAL_TIME_FORMAT)
                .map(Value::LocalTime)
                .map_err(|e| SerializerError::Decode(format!("bad local time {:?}: {}", text, e)))
        }
        other => Err(SerializerError::Decode(format!(
            "{:?} is not a temporal serializer",
            other
        ))),
    }
}

/// 时间点以毫秒写入，带亚毫秒部分的值无法还原
fn whole_millis(millis: i64, subsec_nanos: u32) -> Result<i64> {
    if subsec_nanos % 1_000_000 != 0 {
        return Err(SerializerError::mismatch(
            "millisecond precision",
            format!("{} ns past the second", subsec_nanos),
        ));
    }
    Ok(millis)
}

/// 日期文本只容纳四位年份
fn four_digit_year(year: i32) -> Result<()> {
    if !(0..=9999).contains(&year) {
        return Err(SerializerError::mismatch(
            "year within 0..=9999",
            year.to_string(),
        ));
    }
    Ok(())
}

fn instant(millis: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| SerializerError::Decode(format!("epoch millis {} out of range", millis)))
}

fn required_string(decoder: &mut PrimitiveDecoder<'_>, what: &str) -> Result<String> {
    decoder
        .read_string()?
        .ok_or_else(|| SerializerError::Decode(format!("missing {} string", what)))
}

/// 时区标识：UTC为 `Z`，其余为 `±HH:MM`，带秒偏移时为 `±HH:MM:SS`
pub fn zone_id(offset: &FixedOffset) -> String {
    let total = offset.local_minus_utc();
    if total == 0 {
        return "Z".to_string();
    }
    let sign = if total < 0 { '-' } else { '+' };
    let abs = total.unsigned_abs();
    let (hours, minutes, seconds) = (abs / 3600, abs / 60 % 60, abs % 60);
    if seconds == 0 {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
    }
}

/// 解析时区标识；只支持固定偏移
pub fn parse_zone(zone: &str) -> Result<FixedOffset> {
    let invalid = || SerializerError::Decode(format!("unsupported time zone {:?}", zone));
    if matches!(zone, "Z" | "UTC" | "GMT") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }
    let sign = match zone.chars().next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Err(invalid()),
    };
    let parts: Vec<&str> = zone[1..].split(':').collect();
    let two_digits = |p: &&str| p.len() == 2 && p.bytes().all(|b| b.is_ascii_digit());
    if parts.len() < 2 || parts.len() > 3 || !parts.iter().all(two_digits) {
        return Err(invalid());
    }
    let mut seconds = 0i32;
    for (part, scale) in parts.iter().zip([3600, 60, 1]) {
        let n: i32 = part.parse().map_err(|_| invalid())?;
        seconds += n * scale;
    }
    FixedOffset::east_opt(sign * seconds).ok_or_else(invalid)
}
