//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了基础编解码器的单元测试。

use oxpack::codec::{int_length, long_length, PrimitiveDecoder, PrimitiveEncoder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 测试随机整数在两种编码模式下的往返
#[test]
fn test_random_var_int_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);
    let values: Vec<i32> = (0..2_000).map(|_| rng.gen()).collect();

    for optimize_positive in [true, false] {
        let mut encoder = PrimitiveEncoder::new();
        for &value in &values {
            let written = encoder.write_var_int(value, optimize_positive);
            assert_eq!(written, int_length(value, optimize_positive));
        }
        let bytes = encoder.into_bytes();
        let mut decoder = PrimitiveDecoder::new(&bytes);
        for &value in &values {
            assert_eq!(decoder.read_var_int(optimize_positive).unwrap(), value);
        }
        assert!(decoder.is_exhausted());
    }
}

/// 测试随机长整数的往返，并检查最大长度
#[test]
fn test_random_var_long_round_trip() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut values: Vec<i64> = (0..2_000).map(|_| rng.gen()).collect();
    values.extend([i64::MIN, i64::MAX, -1, 0, 1]);

    for optimize_positive in [true, false] {
        let mut encoder = PrimitiveEncoder::new();
        for &value in &values {
            let written = encoder.write_var_long(value, optimize_positive);
            assert!(written <= 9);
            assert_eq!(written, long_length(value, optimize_positive));
        }
        let bytes = encoder.into_bytes();
        let mut decoder = PrimitiveDecoder::new(&bytes);
        for &value in &values {
            assert_eq!(decoder.read_var_long(optimize_positive).unwrap(), value);
        }
    }
}

/// 测试zigzag让小的负数保持短编码
#[test]
fn test_zigzag_keeps_small_negatives_short() {
    assert_eq!(int_length(-1, false), 1);
    assert_eq!(int_length(-1, true), 5);
    assert_eq!(long_length(-1, false), 1);
    assert_eq!(long_length(-1, true), 9);
}

/// 测试字符串的各种编码路径
#[test]
fn test_string_encodings() {
    let long_ascii = "x".repeat(63);
    let longer_ascii = "y".repeat(64);
    let cases: Vec<Option<&str>> = vec![
        None,
        Some(""),
        Some("a"),
        Some("ab"),
        Some("hello world"),
        Some(long_ascii.as_str()),
        Some(longer_ascii.as_str()),
        Some("SãoVicente"),
        Some("€uro"),
        Some("日本語のテキスト"),
        Some("emoji 😀 surrogate"),
    ];

    let mut encoder = PrimitiveEncoder::new();
    for case in &cases {
        encoder.write_string(*case);
    }
    let bytes = encoder.into_bytes();
    let mut decoder = PrimitiveDecoder::new(&bytes);
    for case in &cases {
        assert_eq!(decoder.read_string().unwrap().as_deref(), *case);
    }
    assert!(decoder.is_exhausted());
}

/// 测试null与空字符串的固定编码
#[test]
fn test_null_and_empty_string_markers() {
    let mut encoder = PrimitiveEncoder::new();
    encoder.write_string(None);
    encoder.write_string(Some(""));
    assert_eq!(encoder.as_bytes(), &[0x80, 0x81]);
}

/// 测试短ASCII字符串使用快速路径
#[test]
fn test_ascii_fast_path_marks_last_byte() {
    let mut encoder = PrimitiveEncoder::new();
    encoder.write_string(Some("ok"));
    assert_eq!(encoder.as_bytes(), &[b'o', b'k' | 0x80]);
}

/// 测试随机Unicode字符串往返
#[test]
fn test_random_unicode_round_trip() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..200 {
        let len = rng.gen_range(0..120);
        let text: String = (0..len).map(|_| rng.gen::<char>()).collect();
        let mut encoder = PrimitiveEncoder::new();
        encoder.write_string(Some(&text));
        let bytes = encoder.into_bytes();
        let mut decoder = PrimitiveDecoder::new(&bytes);
        assert_eq!(decoder.read_string().unwrap().as_deref(), Some(text.as_str()));
    }
}

/// 测试定长数值的往返
#[test]
fn test_fixed_width_values() {
    let mut encoder = PrimitiveEncoder::new();
    encoder.write_short(-12345);
    encoder.write_char(0x20AC);
    encoder.write_fixed_long(i64::MIN + 3);
    encoder.write_float(f32::NAN);
    encoder.write_double(-0.0);
    encoder.write_boolean(true);

    let bytes = encoder.into_bytes();
    let mut decoder = PrimitiveDecoder::new(&bytes);
    assert_eq!(decoder.read_short().unwrap(), -12345);
    assert_eq!(decoder.read_char().unwrap(), 0x20AC);
    assert_eq!(decoder.read_fixed_long().unwrap(), i64::MIN + 3);
    assert!(decoder.read_float().unwrap().is_nan());
    assert_eq!(decoder.read_double().unwrap().to_bits(), (-0.0f64).to_bits());
    assert!(decoder.read_boolean().unwrap());
    assert!(decoder.is_exhausted());
}

/// 测试截断的输入返回解码错误
#[test]
fn test_truncated_input_is_decode_error() {
    let mut encoder = PrimitiveEncoder::new();
    encoder.write_var_long(i64::MAX, true);
    encoder.write_string(Some("truncated text €"));
    let bytes = encoder.into_bytes();

    for cut in 0..bytes.len() {
        let mut decoder = PrimitiveDecoder::new(&bytes[..cut]);
        let result = decoder
            .read_var_long(true)
            .and_then(|_| decoder.read_string());
        assert!(result.unwrap_err().is_decode(), "cut at {}", cut);
    }
}
