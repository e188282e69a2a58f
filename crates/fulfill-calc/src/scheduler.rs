//! 逐小時排程器

use fulfill_core::{
    Catalog, DemandCounting, FulfillError, Order, OrderBook, RawOrder, ReplenishmentLatch,
    SimulationConfig, SimulationState, Stock, StockFulfillment, SystemInfo, SystemState,
};

use crate::priority::PriorityCalculator;
use crate::replenishment::ReplenishmentPlanner;
use crate::{SimulationEvent, SimulationOutcome};

/// 排程器
pub struct Scheduler {
    /// 產品目錄
    catalog: Catalog,

    /// 模擬配置
    config: SimulationConfig,
}

impl Scheduler {
    /// 創建新的排程器
    pub fn new(catalog: Catalog, config: SimulationConfig) -> Self {
        Self { catalog, config }
    }

    /// 主模擬入口：載入訂單、排定優先順序、逐小時排程
    pub fn run(
        &self,
        system_info: SystemInfo,
        raw_orders: Vec<RawOrder>,
    ) -> fulfill_core::Result<SimulationOutcome> {
        tracing::info!(
            "開始模擬：訂單 {} 筆，倉儲容量 {}，工人 {}",
            raw_orders.len(),
            system_info.storage_capacity,
            system_info.number_of_workers
        );

        let start_time = std::time::Instant::now();

        let book = OrderBook::load(raw_orders, self.config.max_orders)?;
        book.validate_against(&self.catalog)?;
        let (mut orders, demand_stats) = book.into_parts();

        PriorityCalculator::priority_order(&mut orders, &self.catalog)?;

        let stock = Stock::new().with_max_slots(self.config.max_stock_slots);
        let mut state = SimulationState::new(
            SystemState::new(system_info, &self.catalog),
            stock,
            demand_stats,
        );

        let mut events = Vec::new();
        let hours_elapsed = self.process(&mut orders, &mut state, &mut events)?;

        tracing::info!(
            "模擬完成：{} 小時，耗時 {:?}",
            hours_elapsed,
            start_time.elapsed()
        );

        Ok(SimulationOutcome {
            orders,
            events,
            hours_elapsed,
            state,
            calculation_time_ms: Some(start_time.elapsed().as_millis()),
        })
    }

    /// 逐小時處理已排序的訂單，直到全部完成；回傳經過的小時數
    ///
    /// 每小時都依優先順序重新掃描所有訂單。
    pub fn process(
        &self,
        orders: &mut [Order],
        state: &mut SimulationState,
        events: &mut Vec<SimulationEvent>,
    ) -> fulfill_core::Result<u32> {
        self.check_feasible(orders, &state.system)?;

        let total = orders.len();
        let mut completed = orders.iter().filter(|o| o.is_completed()).count();
        let mut latch_open = true;
        let mut hour: u32 = 1;

        while completed < total {
            if hour > self.config.max_hours {
                tracing::error!("超過最大模擬小時數 {}", self.config.max_hours);
                return Err(FulfillError::SchedulingDeadlock {
                    hour,
                    pending: total - completed,
                });
            }

            completed += self.step_hour(hour, orders, state, &mut latch_open, events)?;

            if self.config.replenishment_latch == ReplenishmentLatch::FirstPass {
                latch_open = false;
            }
            hour += 1;
        }

        Ok(hour - 1)
    }

    /// 單小時掃描，回傳本小時完成的訂單數
    fn step_hour(
        &self,
        hour: u32,
        orders: &mut [Order],
        state: &mut SimulationState,
        latch_open: &mut bool,
        events: &mut Vec<SimulationEvent>,
    ) -> fulfill_core::Result<usize> {
        let mut completed = 0;

        for i in 0..orders.len() {
            let model = orders[i].model;
            let man_hours = self.catalog.lookup(model)?.man_hours;

            if self.config.demand_counting == DemandCounting::EveryPass {
                state.demand_stats.record_repeat(model);
            }

            // 空檔補貨（與優先順序中的前一筆比較）
            let previous_timestamp = orders[i.saturating_sub(1)].timestamp;
            let timestamp = orders[i].timestamp;
            if *latch_open && timestamp.saturating_sub(previous_timestamp) > 1 {
                // 某天補不進任何產品後，之後的空檔日也補不進
                for day in previous_timestamp + 1..timestamp {
                    if self.replenish_for_idle_day(hour, day, state, events)? == 0 {
                        break;
                    }
                }
                if self.config.replenishment_latch == ReplenishmentLatch::FirstGap {
                    *latch_open = false;
                }
            }

            let order = &mut orders[i];

            let stock_eligible = match self.config.stock_fulfillment {
                StockFulfillment::SkipOrder => true,
                StockFulfillment::CompleteOrder => order.is_pending(),
            };
            if stock_eligible
                && state
                    .stock
                    .try_fulfill(model, &self.catalog, self.config.stock_depletion)?
            {
                tracing::debug!(
                    "第 {} 小時：{} 的型號 {} 由庫存出貨",
                    hour,
                    order.customer,
                    model
                );
                events.push(SimulationEvent::SoldFromStock {
                    hour,
                    order_id: order.id,
                    customer: order.customer.clone(),
                    model,
                });
                if self.config.stock_fulfillment == StockFulfillment::CompleteOrder {
                    order.complete_from_stock();
                    completed += 1;
                }
                continue;
            }

            if order.is_in_progress() {
                if order.is_due(hour) {
                    order.complete();
                    state.system.release_workers(man_hours);
                    completed += 1;
                    tracing::debug!(
                        "第 {} 小時：完成 {} 的 {} 件型號 {}",
                        hour,
                        order.customer,
                        order.quantity,
                        model
                    );
                    events.push(SimulationEvent::Completed {
                        hour,
                        order_id: order.id,
                        customer: order.customer.clone(),
                        model,
                        quantity: order.quantity,
                    });
                }
            } else if order.is_pending() {
                if state.system.try_acquire_workers(man_hours) {
                    order.start(hour, man_hours);
                    tracing::debug!(
                        "第 {} 小時：開始生產 {} 的 {} 件型號 {}",
                        hour,
                        order.customer,
                        order.quantity,
                        model
                    );
                    events.push(SimulationEvent::Started {
                        hour,
                        order_id: order.id,
                        customer: order.customer.clone(),
                        model,
                        quantity: order.quantity,
                    });
                } else {
                    tracing::warn!(
                        "第 {} 小時：工時不足（需要 {}，可用 {}），{} 等待",
                        hour,
                        man_hours,
                        state.system.available_worker_hours,
                        order.customer
                    );
                    events.push(SimulationEvent::WaitingForWorkers {
                        hour,
                        order_id: order.id,
                        required: man_hours,
                        available: state.system.available_worker_hours,
                    });
                }
            }
        }

        Ok(completed)
    }

    /// 空檔日補貨，回傳實際入庫的總數
    fn replenish_for_idle_day(
        &self,
        hour: u32,
        day: i64,
        state: &mut SimulationState,
        events: &mut Vec<SimulationEvent>,
    ) -> fulfill_core::Result<u32> {
        tracing::debug!("第 {} 天沒有訂單，準備庫存", day);
        events.push(SimulationEvent::NoOrdersPlaced { hour, day });

        let built = ReplenishmentPlanner::replenish(state, &self.catalog)?;
        let mut total = 0;
        for (model, units) in built.into_iter().filter(|(_, units)| *units > 0) {
            total += units;
            events.push(SimulationEvent::Replenished { hour, model, units });
        }
        Ok(total)
    }

    /// 需要的工時超過整個工時池的訂單永遠無法完成
    fn check_feasible(&self, orders: &[Order], system: &SystemState) -> fulfill_core::Result<()> {
        let mut infeasible = 0;
        for order in orders.iter().filter(|o| !o.is_completed()) {
            let man_hours = self.catalog.lookup(order.model)?.man_hours;
            if man_hours > system.total_worker_hours {
                tracing::error!(
                    "{} 的型號 {} 需要 {} 工時，超過工時池 {}",
                    order.customer,
                    order.model,
                    man_hours,
                    system.total_worker_hours
                );
                infeasible += 1;
            }
        }

        if infeasible > 0 {
            return Err(FulfillError::SchedulingDeadlock {
                hour: 0,
                pending: infeasible,
            });
        }
        Ok(())
    }

    /// 獲取產品目錄引用
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 獲取配置引用
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
