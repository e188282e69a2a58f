//! # Fulfill Calculation Engine
//!
//! 訂單排程與資源分配引擎

pub mod priority;
pub mod replenishment;
pub mod rollup;
pub mod scheduler;

// Re-export 主要類型
pub use priority::PriorityCalculator;
pub use replenishment::{ReplenishmentPlan, ReplenishmentPlanner};
pub use rollup::{CustomerSalesSummary, RollupCalculator, RollupReport, TwelveMonthRollup};
pub use scheduler::Scheduler;

use fulfill_core::{ModelId, Order, SimulationState};
use uuid::Uuid;

/// 模擬結果
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// 依優先順序排列的最終訂單
    pub orders: Vec<Order>,

    /// 逐小時事件
    pub events: Vec<SimulationEvent>,

    /// 模擬經過的小時數
    pub hours_elapsed: u32,

    /// 結束時的系統狀態
    pub state: SimulationState,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl SimulationOutcome {
    /// 某類事件的數量
    pub fn count_events(&self, predicate: impl Fn(&SimulationEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

/// 排程事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationEvent {
    /// 某天沒有訂單
    NoOrdersPlaced { hour: u32, day: i64 },

    /// 空檔補貨入庫
    Replenished {
        hour: u32,
        model: ModelId,
        units: u32,
    },

    /// 由庫存出貨
    SoldFromStock {
        hour: u32,
        order_id: Uuid,
        customer: String,
        model: ModelId,
    },

    /// 開始生產
    Started {
        hour: u32,
        order_id: Uuid,
        customer: String,
        model: ModelId,
        quantity: u32,
    },

    /// 生產完工
    Completed {
        hour: u32,
        order_id: Uuid,
        customer: String,
        model: ModelId,
        quantity: u32,
    },

    /// 工時不足，等待
    WaitingForWorkers {
        hour: u32,
        order_id: Uuid,
        required: u32,
        available: u32,
    },
}

impl SimulationEvent {
    pub fn hour(&self) -> u32 {
        match self {
            SimulationEvent::NoOrdersPlaced { hour, .. }
            | SimulationEvent::Replenished { hour, .. }
            | SimulationEvent::SoldFromStock { hour, .. }
            | SimulationEvent::Started { hour, .. }
            | SimulationEvent::Completed { hour, .. }
            | SimulationEvent::WaitingForWorkers { hour, .. } => *hour,
        }
    }

    pub fn order_id(&self) -> Option<Uuid> {
        match self {
            SimulationEvent::SoldFromStock { order_id, .. }
            | SimulationEvent::Started { order_id, .. }
            | SimulationEvent::Completed { order_id, .. }
            | SimulationEvent::WaitingForWorkers { order_id, .. } => Some(*order_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let id = Uuid::new_v4();
        let started = SimulationEvent::Started {
            hour: 4,
            order_id: id,
            customer: "X".to_string(),
            model: ModelId::A,
            quantity: 2,
        };
        let gap = SimulationEvent::NoOrdersPlaced { hour: 1, day: 7 };

        assert_eq!(started.hour(), 4);
        assert_eq!(started.order_id(), Some(id));
        assert_eq!(gap.hour(), 1);
        assert_eq!(gap.order_id(), None);
    }
}
