//! 证券代码标准化
//!
//! 把裸代码映射为带市场前缀的代码。这是一个全函数：不校验代码形状，
//! 无效代码会在解码阶段以“未找到”报告。

use crate::models::{InstrumentCode, Market};

/// 标准化股票代码，如 600519 -> sh600519
///
/// - 已带 sh/sz 前缀的原样保留（大写前缀先转为小写）
/// - 以 5 或 6 开头的归入上海
/// - 其余归入深圳
pub fn normalize(input: &str) -> InstrumentCode {
    let symbol = input.trim();

    if let Some((market, rest)) = split_prefix(symbol) {
        return InstrumentCode::new(market, rest);
    }

    if symbol.starts_with('5') || symbol.starts_with('6') {
        InstrumentCode::new(Market::Sh, symbol)
    } else {
        InstrumentCode::new(Market::Sz, symbol)
    }
}

fn split_prefix(symbol: &str) -> Option<(Market, &str)> {
    let head = symbol.get(..2)?;
    let rest = &symbol[2..];
    match head {
        "sh" | "SH" => Some((Market::Sh, rest)),
        "sz" | "SZ" => Some((Market::Sz, rest)),
        _ => None,
    }
}

/// 标准化并去重，保留首次出现的顺序
pub fn normalize_all<'a, I>(inputs: I) -> Vec<InstrumentCode>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut codes: Vec<InstrumentCode> = Vec::new();
    for input in inputs {
        let code = normalize(input);
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_shanghai() {
        let test_cases = vec![
            ("600519", "sh600519"),
            ("601318", "sh601318"),
            ("510300", "sh510300"),
        ];

        for (input, expected) in &test_cases {
            let result = normalize(input).to_string();
            println!("  {} -> {} (期望: {})", input, result, expected);
            assert_eq!(result, *expected);
        }
    }

    #[test]
    fn test_normalize_shenzhen() {
        let test_cases = vec![
            ("000001", "sz000001"),
            ("300750", "sz300750"),
            ("159915", "sz159915"),
            ("", "sz"),
            ("abc", "szabc"),
        ];

        for (input, expected) in &test_cases {
            assert_eq!(normalize(input).to_string(), *expected);
        }
    }

    #[test]
    fn test_normalize_prefixed_passthrough() {
        assert_eq!(normalize("sh000001").to_string(), "sh000001");
        assert_eq!(normalize("sz600000").to_string(), "sz600000");
        assert_eq!(normalize("SH600519").to_string(), "sh600519");
        assert_eq!(normalize(" 600519 ").to_string(), "sh600519");
    }

    #[test]
    fn test_normalize_idempotent() {
        for input in ["600519", "000001", "sh601988", "SZ300059", "5", "x"] {
            let once = normalize(input);
            let twice = normalize(&once.to_string());
            assert_eq!(once, twice, "{} 二次标准化结果不一致", input);
        }
    }

    #[test]
    fn test_normalize_all_dedup() {
        let codes = normalize_all(["600519", "sh600519", "000001", "600519"]);
        let rendered: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        assert_eq!(rendered, vec!["sh600519", "sz000001"]);
    }
}
