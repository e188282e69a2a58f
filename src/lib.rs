//! # Fulfill
//!
//! 訂單履約模擬：讀取輸入檔、逐小時排程、產生文字報表

pub mod loader;
pub mod logging;
pub mod report;

pub use loader::{load_files, InputTables};
pub use report::TextReport;

use fulfill_calc::{RollupCalculator, RollupReport, Scheduler, SimulationOutcome};
use fulfill_core::SimulationConfig;

/// 執行完整模擬並產生彙總
pub fn simulate(
    input: InputTables,
    config: SimulationConfig,
) -> fulfill_core::Result<(SimulationOutcome, RollupReport)> {
    config.validate()?;

    let InputTables {
        system,
        catalog,
        orders,
    } = input;

    let scheduler = Scheduler::new(catalog, config);
    let outcome = scheduler.run(system, orders)?;
    let rollups =
        RollupCalculator::summarize(&outcome.orders, scheduler.catalog(), scheduler.config())?;

    Ok((outcome, rollups))
}
