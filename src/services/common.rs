//! 公共常量和辅助函数

use chrono::Utc;
use chrono_tz::Asia::Shanghai;

// ==================== 行情 API 常量 ====================

/// 新浪实时行情 API（指数简版与个股盘口）
pub const SINA_REALTIME_API: &str = "http://hq.sinajs.cn";
/// 新浪请求必须携带的 Referer
pub const SINA_REFERER: &str = "https://finance.sina.com.cn";
/// 腾讯实时行情 API
pub const TENCENT_REALTIME_API: &str = "http://qt.gtimg.cn";
/// 新浪 K线 API
pub const SINA_KLINE_API: &str =
    "https://quotes.sina.cn/cn/api/json_v2.php/CN_MarketDataService.getKLineData";

/// 三大指数：数据源键 → 名称
pub const HEADLINE_INDICES: [(&str, &str); 3] = [
    ("s_sh000001", "上证指数"),
    ("s_sz399001", "深证成指"),
    ("s_sz399006", "创业板指"),
];

/// 获取北京时间字符串（ISO 8601 格式，带+08:00时区）
pub fn get_beijing_time() -> String {
    Utc::now().with_timezone(&Shanghai).to_rfc3339()
}

/// 获取北京时间 HH:MM:SS
pub fn get_beijing_clock() -> String {
    Utc::now()
        .with_timezone(&Shanghai)
        .format("%H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_beijing_time() {
        let time = get_beijing_time();
        println!("  当前北京时间: {}", time);
        assert!(time.contains("+08:00"));
    }

    #[test]
    fn test_get_beijing_clock() {
        let clock = get_beijing_clock();
        assert_eq!(clock.len(), 8);
        assert_eq!(clock.matches(':').count(), 2);
    }
}
