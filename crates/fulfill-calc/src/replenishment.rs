//! 空檔補貨計畫

use fulfill_core::{Catalog, DemandStats, ModelId, SimulationState, Stock, SystemState};

/// 補貨計畫
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplenishmentPlan {
    /// 剩餘空間可容納的平均尺寸產品數
    pub available_units: u32,

    /// 各型號計畫生產數（依目錄順序）
    pub allocations: Vec<(ModelId, u32)>,
}

impl ReplenishmentPlan {
    pub fn total_units(&self) -> u32 {
        self.allocations.iter().map(|(_, units)| units).sum()
    }
}

/// 補貨計畫器
pub struct ReplenishmentPlanner;

impl ReplenishmentPlanner {
    /// 依需求組合分配剩餘倉儲空間
    ///
    /// `units = available_units × floor(count × 100 / total) / 100`，全程整數運算。
    /// 重複計入的需求會讓佔比超過 100%，超出的部分由倉儲容量截斷。
    /// 需求總數為 0 時不分配。
    pub fn plan(
        stats: &DemandStats,
        system: &SystemState,
        stock: &Stock,
        catalog: &Catalog,
    ) -> ReplenishmentPlan {
        let free_space = system
            .storage_capacity
            .saturating_sub(stock.occupied_space());
        let available_units = match system.average_product_size {
            0 => 0,
            size => free_space / size,
        };

        let allocations = catalog
            .iter()
            .map(|model| {
                let units = stats
                    .share_percent(model.id)
                    .map(|percent| {
                        let units = u64::from(available_units).saturating_mul(percent) / 100;
                        u32::try_from(units).unwrap_or(u32::MAX)
                    })
                    .unwrap_or(0);
                (model.id, units)
            })
            .collect();

        ReplenishmentPlan {
            available_units,
            allocations,
        }
    }

    /// 計算補貨計畫並入庫，回傳各型號實際入庫數量
    pub fn replenish(
        state: &mut SimulationState,
        catalog: &Catalog,
    ) -> fulfill_core::Result<Vec<(ModelId, u32)>> {
        let plan = Self::plan(&state.demand_stats, &state.system, &state.stock, catalog);

        if state.demand_stats.total() == 0 {
            tracing::debug!("無需求統計，略過補貨");
        }

        let mut built = Vec::with_capacity(plan.allocations.len());
        for (model, units) in plan.allocations {
            let added =
                state
                    .stock
                    .append_built(model, units, catalog, state.system.storage_capacity)?;
            if added > 0 {
                tracing::debug!("補貨：型號 {} 計畫 {} 入庫 {}", model, units, added);
            }
            built.push((model, added));
        }

        Ok(built)
    }
}
