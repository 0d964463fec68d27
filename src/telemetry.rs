//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了日志初始化辅助函数。

use std::sync::Once;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// 初始化日志输出
///
/// 进程内只生效一次；如果应用已经设置了全局 subscriber，则不做任何事。
/// 环境变量 `RUST_LOG` 存在时优先于 `default_filter`。
///
/// # 参数
///
/// * `default_filter` - 默认过滤规则，例如 `"oxpack=debug"`
pub fn init_logging(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        tracing_subscriber::fmt()
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(filter)
            .try_init()
            .ok();
    });
}
