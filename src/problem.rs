//! 优化问题的整体定义。
//!
//! 背包问题由物品目录和容量组成，是所有算子和优化方法共同操作的对象。

use crate::data::Catalog;
use crate::error::Error;
use crate::representation::Candidate;

/// 有界背包问题：在容量限制下选取物品，使总价值最大
///
/// 每种物品可以选取零个或多个。
#[derive(Debug, Clone)]
pub struct Knapsack {
    catalog: Catalog,
    capacity: u64,
}

impl Knapsack {
    pub fn new(catalog: Catalog, capacity: u64) -> Result<Self, Error> {
        if capacity == 0 {
            return Err("背包容量必须为正数".into());
        }
        Ok(Self { catalog, capacity })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// 候选解是否满足容量约束
    pub fn fits(&self, candidate: &Candidate) -> bool {
        candidate.volume() <= self.capacity
    }
}
