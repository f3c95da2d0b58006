//! 时间工具函数 — 业务时区
//!
//! 日期/时间解析在 `shared::date`；这里是 handler 层的业务时区判断。

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

/// 当前业务时区的本地时间 (日期 + 时刻)
pub fn now_local(tz: Tz) -> (NaiveDate, NaiveTime) {
    let now = chrono::Utc::now().with_timezone(&tz);
    (now.date_naive(), now.time())
}

/// 判断日期/时间是否已经过去 (业务时区)
///
/// 同一天按时刻比较，未来的日期永远不算过去。
pub fn is_past(date: NaiveDate, time: NaiveTime, tz: Tz) -> bool {
    let (today, now) = now_local(tz);
    date < today || (date == today && time <= now)
}
