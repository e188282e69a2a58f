//! 成品庫存模型

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, ModelId};
use crate::config::StockDepletion;
use crate::{FulfillError, Result};

/// 庫位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSlot {
    /// 型號
    pub model: ModelId,

    /// 現有數量
    pub quantity: u32,
}

/// 成品庫存
///
/// 庫位依寫入順序排列，寫入游標即為庫位數量；
/// `occupied_space` 恆等於所有庫位的 `space_required × quantity` 總和。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stock {
    slots: Vec<StockSlot>,

    occupied_space: u32,

    /// 庫位數量上限
    max_slots: Option<usize>,
}

impl Stock {
    /// 創建空庫存
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置庫位數量上限
    pub fn with_max_slots(mut self, max_slots: Option<usize>) -> Self {
        self.max_slots = max_slots;
        self
    }

    /// 寫入游標（下一個庫位的位置）
    pub fn cursor(&self) -> usize {
        self.slots.len()
    }

    pub fn occupied_space(&self) -> u32 {
        self.occupied_space
    }

    pub fn slots(&self) -> &[StockSlot] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 某型號的現有總數量
    pub fn on_hand(&self, model: ModelId) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.model == model)
            .map(|s| s.quantity)
            .sum()
    }

    /// 嘗試以庫存出貨一個單位
    ///
    /// 從前往後找第一個相符且數量為正的庫位；找不到回傳 `false`。
    /// `SharedPool` 模式下扣減的是頂端庫位，而非命中的庫位。
    pub fn try_fulfill(
        &mut self,
        model: ModelId,
        catalog: &Catalog,
        depletion: StockDepletion,
    ) -> Result<bool> {
        let Some(matched) = self
            .slots
            .iter()
            .position(|s| s.model == model && s.quantity > 0)
        else {
            return Ok(false);
        };

        let target = match depletion {
            StockDepletion::SharedPool => self.slots.len() - 1,
            StockDepletion::MatchedSlot => matched,
        };

        let space = catalog.lookup(self.slots[target].model)?.space_required;
        let slot = &mut self.slots[target];
        slot.quantity -= 1;
        self.occupied_space -= space;

        if slot.quantity == 0 {
            self.slots.remove(target);
        }

        Ok(true)
    }

    /// 在寫入游標處追加新生產的成品，回傳實際入庫數量
    ///
    /// 逐單位檢查倉儲容量，空間不足時提前停止（不視為錯誤）。
    pub fn append_built(
        &mut self,
        model: ModelId,
        quantity: u32,
        catalog: &Catalog,
        storage_capacity: u32,
    ) -> Result<u32> {
        let space = catalog.lookup(model)?.space_required;

        if quantity == 0 {
            return Ok(0);
        }

        if let Some(limit) = self.max_slots {
            if self.slots.len() >= limit {
                tracing::warn!("庫位已達上限 {}，型號 {} 不入庫", limit, model);
                return Ok(0);
            }
        }

        let mut built = 0;
        for _ in 0..quantity {
            match self.reserve_space(space, storage_capacity) {
                Ok(()) => built += 1,
                Err(e @ FulfillError::CapacityExhausted { .. }) => {
                    tracing::warn!("型號 {} 停止入庫：{}", model, e);
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        if built > 0 {
            self.slots.push(StockSlot {
                model,
                quantity: built,
            });
        }

        Ok(built)
    }

    fn reserve_space(&mut self, space: u32, storage_capacity: u32) -> Result<()> {
        let remaining = storage_capacity.saturating_sub(self.occupied_space);
        if space > remaining {
            return Err(FulfillError::CapacityExhausted {
                required: space,
                remaining,
            });
        }
        self.occupied_space += space;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ModelSpec;
    use rust_decimal::Decimal;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            ModelSpec::new(ModelId::A, Decimal::from(1), Decimal::from(3), 2, 1),
            ModelSpec::new(ModelId::B, Decimal::from(2), Decimal::from(5), 3, 2),
        ])
        .unwrap()
    }

    fn space_sum(stock: &Stock, catalog: &Catalog) -> u32 {
        stock
            .slots()
            .iter()
            .map(|s| catalog.lookup(s.model).unwrap().space_required * s.quantity)
            .sum()
    }

    #[test]
    fn test_empty_stock_cannot_fulfill() {
        let catalog = catalog();
        let mut stock = Stock::new();

        assert!(!stock
            .try_fulfill(ModelId::A, &catalog, StockDepletion::SharedPool)
            .unwrap());
        assert_eq!(stock.occupied_space(), 0);
        assert_eq!(stock.cursor(), 0);
    }

    #[test]
    fn test_append_built_one_slot_per_call() {
        let catalog = catalog();
        let mut stock = Stock::new();

        assert_eq!(stock.append_built(ModelId::A, 3, &catalog, 100).unwrap(), 3);
        assert_eq!(stock.append_built(ModelId::B, 2, &catalog, 100).unwrap(), 2);

        assert_eq!(stock.cursor(), 2);
        assert_eq!(stock.occupied_space(), 3 + 4);
        assert_eq!(stock.on_hand(ModelId::A), 3);
        assert_eq!(stock.occupied_space(), space_sum(&stock, &catalog));
    }

    #[test]
    fn test_append_built_stops_at_capacity() {
        let catalog = catalog();
        let mut stock = Stock::new();

        // 每個 B 佔 2，容量 5 只能放 2 個
        assert_eq!(stock.append_built(ModelId::B, 10, &catalog, 5).unwrap(), 2);
        assert_eq!(stock.occupied_space(), 4);
        assert_eq!(stock.append_built(ModelId::A, 10, &catalog, 5).unwrap(), 1);
        assert_eq!(stock.occupied_space(), 5);
        assert_eq!(stock.append_built(ModelId::A, 1, &catalog, 5).unwrap(), 0);
        assert_eq!(stock.cursor(), 2);
    }

    #[test]
    fn test_append_built_respects_slot_limit() {
        let catalog = catalog();
        let mut stock = Stock::new().with_max_slots(Some(1));

        assert_eq!(stock.append_built(ModelId::A, 1, &catalog, 100).unwrap(), 1);
        assert_eq!(stock.append_built(ModelId::B, 1, &catalog, 100).unwrap(), 0);
        assert_eq!(stock.cursor(), 1);
    }

    #[test]
    fn test_shared_pool_depletes_top_slot() {
        let catalog = catalog();
        let mut stock = Stock::new();
        stock.append_built(ModelId::A, 2, &catalog, 100).unwrap();
        stock.append_built(ModelId::B, 1, &catalog, 100).unwrap();

        // 命中 A，但扣的是頂端的 B
        assert!(stock
            .try_fulfill(ModelId::A, &catalog, StockDepletion::SharedPool)
            .unwrap());
        assert_eq!(stock.on_hand(ModelId::A), 2);
        assert_eq!(stock.on_hand(ModelId::B), 0);
        assert_eq!(stock.cursor(), 1);
        assert_eq!(stock.occupied_space(), 2);
        assert_eq!(stock.occupied_space(), space_sum(&stock, &catalog));
    }

    #[test]
    fn test_matched_slot_depletion() {
        let catalog = catalog();
        let mut stock = Stock::new();
        stock.append_built(ModelId::A, 1, &catalog, 100).unwrap();
        stock.append_built(ModelId::B, 1, &catalog, 100).unwrap();

        assert!(stock
            .try_fulfill(ModelId::A, &catalog, StockDepletion::MatchedSlot)
            .unwrap());
        assert_eq!(stock.on_hand(ModelId::A), 0);
        assert_eq!(stock.on_hand(ModelId::B), 1);
        assert_eq!(stock.occupied_space(), 2);

        // A 已售完
        assert!(!stock
            .try_fulfill(ModelId::A, &catalog, StockDepletion::MatchedSlot)
            .unwrap());
        assert_eq!(stock.occupied_space(), space_sum(&stock, &catalog));
    }

    #[test]
    fn test_unknown_model_is_fatal() {
        let catalog = catalog();
        let mut stock = Stock::new();

        assert!(matches!(
            stock.append_built(ModelId::D, 1, &catalog, 100),
            Err(FulfillError::UnknownModel(_))
        ));
    }
}
