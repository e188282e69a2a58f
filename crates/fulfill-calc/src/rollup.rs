//! 銷售統計彙總

use fulfill_core::{Catalog, FulfillError, ModelId, Order, SimulationConfig};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::priority::PriorityCalculator;

/// 單一客戶的各型號銷售筆數
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSalesSummary {
    pub customer: String,
    units: [u32; 4],
}

impl CustomerSalesSummary {
    fn new(customer: String) -> Self {
        Self {
            customer,
            units: [0; 4],
        }
    }

    /// 某型號的銷售筆數（每筆訂單計 1，不乘數量）
    pub fn units_sold(&self, model: ModelId) -> u32 {
        self.units[model.index()]
    }
}

/// 近十二個月營收與毛利
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TwelveMonthRollup {
    pub revenue: Decimal,
    pub margin: Decimal,
}

/// 報表彙總
#[derive(Debug, Clone, Serialize)]
pub struct RollupReport {
    pub sales_by_customer: Vec<CustomerSalesSummary>,
    pub twelve_month: TwelveMonthRollup,
}

/// 彙總計算器
pub struct RollupCalculator;

impl RollupCalculator {
    /// 對最終訂單產生全部彙總
    ///
    /// 客戶統計依最終（優先順序）訂單計算；十二個月統計另行依時間排序。
    pub fn summarize(
        final_orders: &[Order],
        catalog: &Catalog,
        config: &SimulationConfig,
    ) -> fulfill_core::Result<RollupReport> {
        let sales_by_customer = Self::sales_by_customer(final_orders, config.max_customers)?;

        let mut chronological = final_orders.to_vec();
        PriorityCalculator::sort_by_timestamp(&mut chronological);
        let twelve_month =
            Self::twelve_month_rollup(&chronological, catalog, config.twelve_month_window)?;

        Ok(RollupReport {
            sales_by_customer,
            twelve_month,
        })
    }

    /// 各客戶銷售統計，依客戶首次出現的順序排列
    pub fn sales_by_customer(
        orders: &[Order],
        max_customers: Option<usize>,
    ) -> fulfill_core::Result<Vec<CustomerSalesSummary>> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut summaries: Vec<CustomerSalesSummary> = Vec::new();

        for order in orders {
            let position = match index.get(order.customer.as_str()) {
                Some(&position) => position,
                None => {
                    if let Some(limit) = max_customers {
                        if summaries.len() >= limit {
                            return Err(FulfillError::CustomerLimitExceeded(limit));
                        }
                    }
                    summaries.push(CustomerSalesSummary::new(order.customer.clone()));
                    index.insert(order.customer.as_str(), summaries.len() - 1);
                    summaries.len() - 1
                }
            };
            summaries[position].units[order.model.index()] += 1;
        }

        Ok(summaries)
    }

    /// 近十二個月營收與毛利
    ///
    /// 訂單須已依時間遞增排序；從最新一筆往回累加，
    /// 遇到早於 `最新時間 - window` 的訂單即停止。
    pub fn twelve_month_rollup(
        chronological_orders: &[Order],
        catalog: &Catalog,
        window: i64,
    ) -> fulfill_core::Result<TwelveMonthRollup> {
        let mut rollup = TwelveMonthRollup::default();

        let Some(latest) = chronological_orders.last() else {
            return Ok(rollup);
        };
        let cutoff = latest.timestamp.saturating_sub(window);

        for order in chronological_orders.iter().rev() {
            if order.timestamp < cutoff {
                break;
            }
            let model = catalog.lookup(order.model)?;
            let quantity = Decimal::from(order.quantity);
            rollup.revenue += model.unit_price * quantity;
            rollup.margin += model.unit_margin() * quantity;
        }

        Ok(rollup)
    }
}
