use std::sync::Arc;

use scout_core::config::AppConfig;
use scout_core::market::port::MarketDataProvider;
use scout_core::scan::entity::DailyPicks;
use scout_feed::SnapshotProvider;
use scout_scanner::TickerScanner;
use scout_signal::PatternClassifier;
use scout_signal::risk::{self, Slot};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// # Summary
/// 分层加载应用配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 作为底层。
/// 2. 叠加可选的 `scout.toml`。
/// 3. 叠加 `SCOUT__` 前缀的环境变量 (如 `SCOUT__SCANNER__FAST_EMA=7`)。
fn load_config() -> Result<AppConfig, config::ConfigError> {
    config::Config::builder()
        .add_source(config::Config::try_from(&AppConfig::default())?)
        .add_source(config::File::with_name("scout").required(false))
        .add_source(config::Environment::with_prefix("SCOUT").separator("__"))
        .build()?
        .try_deserialize()
}

/// # Summary
/// 对每日选出的交易对做盘中形态判断，并记录买入时将使用的资金。
async fn review_picks(
    picks: &DailyPicks,
    market: &dyn MarketDataProvider,
    config: &AppConfig,
) {
    let classifier = PatternClassifier::new(config.classifier.clone());
    let slots = [
        (picks.primary.as_deref(), Slot::Primary),
        (picks.secondary.as_deref(), Slot::Secondary),
    ];

    for (ticker, slot) in slots {
        let Some(ticker) = ticker else {
            continue;
        };
        let series = match market
            .fetch_intraday_candles(
                ticker,
                config.feed.intraday_timeframe,
                config.feed.intraday_count,
            )
            .await
        {
            Ok(series) => series,
            Err(e) => {
                warn!(ticker, error = %e, "Intraday candles unavailable");
                continue;
            }
        };

        match classifier.evaluate(&series) {
            Ok(signal) => {
                let allocation = risk::allocate(config.risk.quote_balance, slot, &config.risk);
                info!(
                    ticker,
                    ?slot,
                    decision = %signal.decision,
                    pattern = ?signal.pattern,
                    support = signal.support,
                    resistance = signal.resistance,
                    allocation = ?allocation,
                    "Pick reviewed"
                );
            }
            Err(e) => warn!(ticker, error = %e, "Cannot classify intraday series"),
        }
    }
}

/// # Summary
/// 应用入口：装配快照数据源、扫描器与分类器，执行一次每日扫描。
///
/// # Logic
/// 1. 初始化非阻塞日志 (默认 `info`，可由 `RUST_LOG` 覆盖)。
/// 2. 加载配置与行情快照。
/// 3. 执行每日选股，再对选出的交易对做盘中形态判断。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .init();
    info!("Scout starting...");

    // 2. 配置与数据源
    let config = load_config()?;
    let snapshot = Arc::new(SnapshotProvider::load(&config.feed.snapshot_path).await?);

    // 3. 每日选股
    let scanner = TickerScanner::new(snapshot.clone(), snapshot.clone(), config.scanner.clone());
    let picks = scanner.select_daily_tickers().await?;
    info!(
        regime = %picks.regime,
        primary = picks.primary.as_deref().unwrap_or("-"),
        secondary = picks.secondary.as_deref().unwrap_or("-"),
        "Daily picks"
    );

    // 4. 盘中形态判断
    review_picks(&picks, snapshot.as_ref(), &config).await;

    info!("Scout finished");
    Ok(())
}
