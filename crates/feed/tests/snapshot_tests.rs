use scout_core::common::TimeFrame;
use scout_core::market::error::MarketError;
use scout_core::market::port::{FeeProvider, MarketDataProvider};
use scout_feed::SnapshotProvider;
use std::io::Write;

const SNAPSHOT: &str = r#"{
  "instruments": {
    "KRW-ETH": {
      "daily": [
        { "time": "2025-01-01T00:00:00Z", "open": 100.0, "high": 106.0, "low": 99.0, "close": 105.0, "volume": 10.0, "value": 1000000.0 },
        { "time": "2025-01-02T00:00:00Z", "open": 105.0, "high": 107.0, "low": 104.0, "close": 106.0, "volume": 10.0 },
        { "time": "2025-01-03T00:00:00Z", "open": 106.0, "high": 108.0, "low": 105.0, "close": 107.0, "volume": 4.0 }
      ],
      "intraday": {
        "15m": [
          { "time": "2025-01-03T00:00:00Z", "open": 106.0, "high": 106.5, "low": 105.5, "close": 106.2, "volume": 1.0 },
          { "time": "2025-01-03T00:15:00Z", "open": 106.2, "high": 106.9, "low": 106.0, "close": 106.8, "volume": 1.0 }
        ]
      },
      "fee": { "withdrawal_fee": 0.01, "reference_price": 5000000.0 }
    },
    "KRW-ADA": {
      "daily": []
    }
  }
}"#;

fn provider() -> anyhow::Result<SnapshotProvider> {
    Ok(SnapshotProvider::from_json(SNAPSHOT)?)
}

#[tokio::test]
async fn test_daily_candles_keep_most_recent() -> anyhow::Result<()> {
    let provider = provider()?;

    let series = provider.fetch_daily_candles("KRW-ETH", 2).await?;
    assert_eq!(series.len(), 2);
    assert_eq!(series.last().map(|c| c.close()), Some(107.0));

    // 缺省成交额按 close × volume 估算
    let yesterday = series.yesterday().map(|c| c.traded_value());
    assert_eq!(yesterday, Some(1060.0));

    let all = provider.fetch_daily_candles("KRW-ETH", 100).await?;
    assert_eq!(all.len(), 3);
    assert_eq!(all.as_slice()[0].traded_value(), 1_000_000.0);
    Ok(())
}

#[tokio::test]
async fn test_intraday_by_timeframe() -> anyhow::Result<()> {
    let provider = provider()?;

    let series = provider
        .fetch_intraday_candles("KRW-ETH", TimeFrame::Minute15, 30)
        .await?;
    assert_eq!(series.len(), 2);

    let missing = provider
        .fetch_intraday_candles("KRW-ETH", TimeFrame::Hour1, 30)
        .await;
    assert!(matches!(missing, Err(MarketError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_unknown_ticker_and_missing_data_are_not_found() -> anyhow::Result<()> {
    let provider = provider()?;

    assert!(matches!(
        provider.fetch_daily_candles("KRW-DOGE", 2).await,
        Err(MarketError::NotFound(_))
    ));
    assert!(matches!(
        provider.fetch_daily_candles("KRW-ADA", 2).await,
        Err(MarketError::NotFound(_))
    ));
    assert!(matches!(
        provider.fetch_fee_info("KRW-ADA").await,
        Err(MarketError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_fee_and_instrument_listing() -> anyhow::Result<()> {
    let provider = provider()?;

    let fee = provider.fetch_fee_info("KRW-ETH").await?;
    assert_eq!(fee.withdrawal_fee, 0.01);
    assert_eq!(fee.reference_price, 5_000_000.0);

    assert_eq!(provider.list_instruments().await?, vec!["KRW-ADA", "KRW-ETH"]);
    Ok(())
}

#[test]
fn test_malformed_candle_rejects_snapshot() {
    // high 低于 close
    let text = r#"{ "instruments": { "KRW-BAD": { "daily": [
        { "time": "2025-01-01T00:00:00Z", "open": 100.0, "high": 101.0, "low": 99.0, "close": 102.0, "volume": 1.0 }
    ] } } }"#;
    assert!(matches!(
        SnapshotProvider::from_json(text),
        Err(MarketError::Parse(msg)) if msg.contains("KRW-BAD")
    ));
}

#[test]
fn test_out_of_order_candles_reject_snapshot() {
    let text = r#"{ "instruments": { "KRW-BAD": { "daily": [
        { "time": "2025-01-02T00:00:00Z", "open": 100.0, "high": 101.0, "low": 99.0, "close": 100.0, "volume": 1.0 },
        { "time": "2025-01-01T00:00:00Z", "open": 100.0, "high": 101.0, "low": 99.0, "close": 100.0, "volume": 1.0 }
    ] } } }"#;
    assert!(matches!(
        SnapshotProvider::from_json(text),
        Err(MarketError::Parse(_))
    ));
}

#[test]
fn test_unknown_timeframe_and_bad_json_reject_snapshot() {
    let text = r#"{ "instruments": { "KRW-ETH": { "intraday": { "3m": [] } } } }"#;
    assert!(matches!(
        SnapshotProvider::from_json(text),
        Err(MarketError::Parse(_))
    ));
    assert!(matches!(
        SnapshotProvider::from_json("{ not json"),
        Err(MarketError::Parse(_))
    ));
}

#[tokio::test]
async fn test_load_from_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(SNAPSHOT.as_bytes())?;

    let provider = SnapshotProvider::load(file.path()).await?;
    assert_eq!(provider.list_instruments().await?.len(), 2);

    let dir = tempfile::tempdir()?;
    let missing = SnapshotProvider::load(dir.path().join("absent.json")).await;
    assert!(matches!(missing, Err(MarketError::NotFound(_))));
    Ok(())
}
