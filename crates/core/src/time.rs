use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

// =========================================================================
// 全局时钟控制 (测试回放用)
// =========================================================================

/// 全局模拟时间 (0 表示使用系统真实时间)
/// 使用 AtomicI64 保证线程安全
static MOCK_TIME: AtomicI64 = AtomicI64::new(0);

pub struct Clock;

impl Clock {
    /// 获取当前时间戳 (毫秒)
    ///
    /// 逻辑：如果设置了模拟时间，返回模拟时间；否则返回系统真实时间。
    #[inline]
    pub fn now_ms() -> i64 {
        let mock = MOCK_TIME.load(Ordering::Relaxed);
        if mock > 0 {
            mock
        } else {
            Utc::now().timestamp_millis()
        }
    }

    /// 获取当前 UTC 时间对象
    pub fn now() -> DateTime<Utc> {
        Self::from_timestamp_ms(Self::now_ms())
    }

    /// 时间戳 (ms) -> DateTime<Utc>
    pub fn from_timestamp_ms(ms: i64) -> DateTime<Utc> {
        let seconds = ms / 1000;
        let nsecs = ((ms % 1000) * 1_000_000) as u32;
        DateTime::from_timestamp(seconds, nsecs).unwrap_or_default()
    }

    // -----------------------------------------------------------------
    // 测试专用方法
    // -----------------------------------------------------------------

    /// 设置模拟时间，此后 now() 固定返回该时刻
    pub fn set_mock_time(timestamp_ms: i64) {
        MOCK_TIME.store(timestamp_ms, Ordering::Relaxed);
    }

    /// 重置为系统真实时间
    pub fn reset() {
        MOCK_TIME.store(0, Ordering::Relaxed);
    }
}

// =========================================================================
// 单元测试
// =========================================================================
