//! 文字報表

use fulfill_calc::{RollupReport, SimulationEvent, SimulationOutcome};
use fulfill_core::{ModelId, Order};
use std::fmt;

/// 完整的模擬報表（訂單表、逐小時事件、客戶銷售、近十二個月統計）
pub struct TextReport<'a> {
    pub outcome: &'a SimulationOutcome,
    pub rollups: &'a RollupReport,
}

impl<'a> TextReport<'a> {
    pub fn new(outcome: &'a SimulationOutcome, rollups: &'a RollupReport) -> Self {
        Self { outcome, rollups }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", OrderTable(&self.outcome.orders))?;
        for event in &self.outcome.events {
            write!(f, "{}", EventLine(event))?;
        }
        write_sales(f, self.rollups)?;
        write_twelve_month(f, self.rollups)
    }
}

/// 依優先順序排列的訂單表
pub struct OrderTable<'a>(pub &'a [Order]);

impl fmt::Display for OrderTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Orders found : {}", self.0.len())?;
        writeln!(
            f,
            "{:>15} {:>15}  {:>15}  {:>15}",
            "Customer", "Quantity", "Model", "Timestamp"
        )?;
        for order in self.0 {
            writeln!(
                f,
                "{:>14}  {:>14}  {:>14}  {:>14}",
                order.customer, order.quantity, order.model, order.timestamp
            )?;
        }
        Ok(())
    }
}

/// 單一事件的輸出行
pub struct EventLine<'a>(pub &'a SimulationEvent);

impl fmt::Display for EventLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            SimulationEvent::NoOrdersPlaced { day, .. } => {
                writeln!(f, "No orders placed on {}", day)?;
                writeln!(f, "Prepare models for storing in stock")
            }
            SimulationEvent::Replenished { hour, model, units } => {
                writeln!(f, "Stocked {} items of Model {} at {}", units, model, hour)
            }
            SimulationEvent::SoldFromStock {
                hour,
                customer,
                model,
                ..
            } => writeln!(f, "Sold Model {} from stock to {} at {}", model, customer, hour),
            SimulationEvent::Started {
                hour,
                customer,
                model,
                quantity,
                ..
            } => writeln!(
                f,
                "Started processing order of {} items of  Model {} by {} at {}",
                quantity, model, customer, hour
            ),
            SimulationEvent::Completed {
                hour,
                customer,
                model,
                quantity,
                ..
            } => writeln!(
                f,
                "Completed Order of {} items of  Model {} by {} at {}",
                quantity, model, customer, hour
            ),
            SimulationEvent::WaitingForWorkers { .. } => {
                writeln!(f, "Not enough workers available, waiting")
            }
        }
    }
}

fn write_sales(f: &mut fmt::Formatter<'_>, rollups: &RollupReport) -> fmt::Result {
    writeln!(f, "====================================")?;
    writeln!(f, "======= Sold Items Statistics ======")?;
    writeln!(f, "====================================")?;
    for summary in &rollups.sales_by_customer {
        writeln!(f, "Customer name: {}", summary.customer)?;
        for model in ModelId::ALL {
            writeln!(
                f,
                "Model {} items sold: {}",
                model,
                summary.units_sold(model)
            )?;
        }
    }
    Ok(())
}

fn write_twelve_month(f: &mut fmt::Formatter<'_>, rollups: &RollupReport) -> fmt::Result {
    writeln!(f, "============================================")?;
    writeln!(f, "======= Last Twelve Months Statistics ======")?;
    writeln!(f, "============================================")?;
    writeln!(f, "Margin : {} euro", rollups.twelve_month.margin.normalize())?;
    writeln!(f, "Revenue: {} euro", rollups.twelve_month.revenue.normalize())
}
