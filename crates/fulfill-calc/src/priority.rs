//! 訂單優先順序

use fulfill_core::{Catalog, Order};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashMap;

/// 優先順序計算器
pub struct PriorityCalculator;

impl PriorityCalculator {
    /// 同一下單時間的訂單依數量遞減、再依單位毛利遞減排序
    ///
    /// 不同時間的訂單保持原本的相對位置：每組同時間訂單只在自己
    /// 原有的位置之間重新排列，組內排序是穩定的。
    pub fn priority_order(orders: &mut [Order], catalog: &Catalog) -> fulfill_core::Result<()> {
        let margins = orders
            .iter()
            .map(|o| catalog.lookup(o.model).map(|m| m.unit_margin()))
            .collect::<fulfill_core::Result<Vec<Decimal>>>()?;

        // 依時間分組，記錄各組佔用的位置（遞增）
        let mut group_index: HashMap<i64, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (position, order) in orders.iter().enumerate() {
            let index = *group_index.entry(order.timestamp).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[index].push(position);
        }

        let mut permutation: Vec<usize> = (0..orders.len()).collect();
        for positions in groups.iter().filter(|g| g.len() > 1) {
            let mut members = positions.clone();
            members.sort_by(|&a, &b| Self::compare(&orders[a], margins[a], &orders[b], margins[b]));
            for (&slot, source) in positions.iter().zip(members) {
                permutation[slot] = source;
            }
        }

        let reordered: Vec<Order> = permutation.iter().map(|&i| orders[i].clone()).collect();
        orders.clone_from_slice(&reordered);

        tracing::debug!(
            "優先順序排序完成：{} 筆訂單，{} 個時間組",
            orders.len(),
            groups.len()
        );
        Ok(())
    }

    /// 依下單時間遞增的完整排序（穩定），供近十二個月統計使用
    pub fn sort_by_timestamp(orders: &mut [Order]) {
        orders.sort_by_key(|o| o.timestamp);
    }

    fn compare(a: &Order, margin_a: Decimal, b: &Order, margin_b: Decimal) -> Ordering {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| margin_b.cmp(&margin_a))
    }
}
