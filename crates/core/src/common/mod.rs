use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// K 线时间周期枚举，定义单根 K 线覆盖的时间跨度。
///
/// # Invariants
/// - 文本形式 (`Display`) 与 `FromStr` 可互相还原。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeFrame {
    // 1分钟
    #[serde(rename = "1m")]
    Minute1,
    // 5分钟
    #[serde(rename = "5m")]
    Minute5,
    // 15分钟 (盘中形态判断的默认周期)
    #[serde(rename = "15m")]
    Minute15,
    // 1小时
    #[serde(rename = "1h")]
    Hour1,
    // 1日
    #[serde(rename = "1d")]
    Day1,
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "minute1" => Ok(TimeFrame::Minute1),
            "5m" | "minute5" => Ok(TimeFrame::Minute5),
            "15m" | "minute15" => Ok(TimeFrame::Minute15),
            "1h" | "hour" | "hour1" => Ok(TimeFrame::Hour1),
            "1d" | "day" | "day1" => Ok(TimeFrame::Day1),
            _ => Err(format!("Unknown TimeFrame: {}", s)),
        }
    }
}

impl std::fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeFrame::Minute1 => write!(f, "1m"),
            TimeFrame::Minute5 => write!(f, "5m"),
            TimeFrame::Minute15 => write!(f, "15m"),
            TimeFrame::Hour1 => write!(f, "1h"),
            TimeFrame::Day1 => write!(f, "1d"),
        }
    }
}

/// # Summary
/// 从交易对代码中提取基础资产符号。
///
/// # Logic
/// 1. 交易对代码形如 `KRW-BTC`，计价货币在前。
/// 2. 取第一个 `-` 之后的部分；不含 `-` 时原样返回。
///
/// # Arguments
/// * `ticker`: 交易对代码。
///
/// # Returns
/// 基础资产符号，例如 `BTC`。
pub fn asset_symbol(ticker: &str) -> &str {
    ticker.split_once('-').map_or(ticker, |(_, asset)| asset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_round_trip_labels() {
        for tf in [
            TimeFrame::Minute1,
            TimeFrame::Minute5,
            TimeFrame::Minute15,
            TimeFrame::Hour1,
            TimeFrame::Day1,
        ] {
            assert_eq!(tf.to_string().parse::<TimeFrame>(), Ok(tf));
        }
        assert_eq!("minute15".parse::<TimeFrame>(), Ok(TimeFrame::Minute15));
        assert!("2w".parse::<TimeFrame>().is_err());
    }

    #[test]
    fn test_asset_symbol() {
        assert_eq!(asset_symbol("KRW-BTC"), "BTC");
        assert_eq!(asset_symbol("ETH"), "ETH");
    }
}
