//! 訂單簿

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::order::{Order, RawOrder};
use crate::stats::DemandStats;
use crate::{FulfillError, Result};

/// 訂單清單及載入時的需求統計
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderBook {
    pub orders: Vec<Order>,
    pub demand_stats: DemandStats,
}

impl OrderBook {
    /// 載入原始訂單，按出現順序累計需求統計
    ///
    /// 設定上限時，超出上限回報 `InputTruncated` 而不是靜默丟棄。
    pub fn load(raw_orders: Vec<RawOrder>, max_orders: Option<usize>) -> Result<Self> {
        if let Some(limit) = max_orders {
            if raw_orders.len() > limit {
                return Err(FulfillError::InputTruncated {
                    limit,
                    received: raw_orders.len(),
                });
            }
        }

        let mut demand_stats = DemandStats::new();
        let mut orders = Vec::with_capacity(raw_orders.len());
        for raw in raw_orders {
            demand_stats.record(raw.model);
            orders.push(Order::from_raw(raw)?);
        }

        tracing::debug!("載入訂單 {} 筆", orders.len());

        Ok(Self {
            orders,
            demand_stats,
        })
    }

    /// 確認每筆訂單的型號都在目錄中
    pub fn validate_against(&self, catalog: &Catalog) -> Result<()> {
        for order in &self.orders {
            catalog.lookup(order.model)?;
        }
        Ok(())
    }

    pub fn into_parts(self) -> (Vec<Order>, DemandStats) {
        (self.orders, self.demand_stats)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ModelId, ModelSpec};
    use rust_decimal::Decimal;

    fn raw_orders() -> Vec<RawOrder> {
        vec![
            RawOrder::new(1, ModelId::A, 5, "X"),
            RawOrder::new(2, ModelId::B, 3, "Y"),
            RawOrder::new(2, ModelId::A, 1, "Z"),
        ]
    }

    #[test]
    fn test_load_accumulates_stats() {
        let book = OrderBook::load(raw_orders(), None).unwrap();

        assert_eq!(book.len(), 3);
        assert_eq!(book.demand_stats.count(ModelId::A), 2);
        assert_eq!(book.demand_stats.count(ModelId::B), 1);
        assert_eq!(book.demand_stats.total(), 3);
        assert_eq!(book.orders[1].customer, "Y");
    }

    #[test]
    fn test_load_reports_truncation() {
        let err = OrderBook::load(raw_orders(), Some(2)).unwrap_err();
        assert!(matches!(
            err,
            FulfillError::InputTruncated {
                limit: 2,
                received: 3
            }
        ));

        assert!(OrderBook::load(raw_orders(), Some(3)).is_ok());
    }

    #[test]
    fn test_validate_against_catalog() {
        let catalog = Catalog::new(vec![ModelSpec::new(
            ModelId::A,
            Decimal::ONE,
            Decimal::from(3),
            2,
            1,
        )])
        .unwrap();
        let book = OrderBook::load(raw_orders(), None).unwrap();

        assert!(matches!(
            book.validate_against(&catalog),
            Err(FulfillError::UnknownModel(_))
        ));
    }
}
