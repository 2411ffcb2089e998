//! 内部数据结构的表示和定义：候选解（个体）与种群（世代）。

use crate::data::Catalog;
use itertools::Itertools;
use serde::Serialize;

/// 候选解，即一个个体
///
/// 用每种物品的数量向量来表示，体积和价值在构造时一次性算出，此后不再变化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    counts: Vec<u64>,
    volume: u64,
    cost: u64,
}

impl Candidate {
    pub fn new(counts: Vec<u64>, catalog: &Catalog) -> Self {
        assert_eq!(counts.len(), catalog.len(), "数量向量的长度必须等于物品目录的长度");
        let mut volume = 0;
        let mut cost = 0;
        for (count, item) in counts.iter().zip(catalog.items()) {
            volume += count * item.volume;
            cost += count * item.cost;
        }
        Self {
            counts,
            volume,
            cost,
        }
    }

    /// 空候选解，所有数量均为零
    pub fn zero(catalog: &Catalog) -> Self {
        Self::new(vec![0; catalog.len()], catalog)
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn volume(&self) -> u64 {
        self.volume
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }
}

/// 种群，即一个世代
///
/// 每一代整体替换，只有迁移时才允许单个候选解跨种群移动。
#[derive(Debug, Clone, Default)]
pub struct Population {
    candidates: Vec<Candidate>,
}

impl Population {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// 适应度，定义为所有成员价值的算术平均值
    pub fn fitness(&self) -> f64 {
        if self.candidates.is_empty() {
            return 0.0;
        }
        let total: u64 = self.candidates.iter().map(|x| x.cost()).sum();
        total as f64 / self.candidates.len() as f64
    }

    /// 价值最高的成员
    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.iter().max_by_key(|x| x.cost())
    }

    /// 价值最高的前 n 个成员的副本，按价值降序排列
    ///
    /// 排序是稳定的，价值相同的成员保持原有顺序。
    pub fn top(&self, n: usize) -> Vec<Candidate> {
        self.candidates
            .iter()
            .sorted_by(|a, b| b.cost().cmp(&a.cost()))
            .take(n)
            .cloned()
            .collect()
    }

    pub fn push(&mut self, candidate: Candidate) {
        self.candidates.push(candidate);
    }

    pub fn remove(&mut self, index: usize) -> Candidate {
        self.candidates.remove(index)
    }
}
