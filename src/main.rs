//! 命令列入口
//!
//! 用法：`fulfill [info.dat] [orders.dat] [config.json]`

use anyhow::Context;
use fulfill::{load_files, logging, simulate, TextReport};
use fulfill_core::SimulationConfig;

const DEFAULT_INFO_PATH: &str = "info.dat";
const DEFAULT_ORDERS_PATH: &str = "orders.dat";

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let info_path = args.next().unwrap_or_else(|| DEFAULT_INFO_PATH.to_string());
    let orders_path = args.next().unwrap_or_else(|| DEFAULT_ORDERS_PATH.to_string());

    let config = match args.next() {
        Some(path) => SimulationConfig::from_json_file(&path)
            .with_context(|| format!("無法載入配置 {}", path))?,
        None => SimulationConfig::default(),
    };
    tracing::debug!(?config, "使用模擬配置");

    let input = load_files(&info_path, &orders_path)?;
    let (outcome, rollups) = simulate(input, config).context("模擬失敗")?;

    print!("{}", TextReport::new(&outcome, &rollups));
    Ok(())
}
