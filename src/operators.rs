//! 算子的实现：随机构造、杂交和变异。
//!
//! 所有算子都接受一个显式的随机数生成器，测试时可以注入固定种子来复现结果。

use crate::problem::Knapsack;
use crate::representation::{Candidate, Population};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 杂交产生不可行后代时的最大重试次数
pub const CROSSOVER_RETRIES: usize = 10;

/// 随机构造一个可行的候选解
///
/// 反复从仍然放得下的物品中均匀随机挑选一种：若它是唯一放得下的物品，
/// 取能放下的最大数量；否则在 1 和最大数量之间均匀随机取。直到没有物品
/// 放得下为止。若一开始就没有物品放得下，返回全零候选解。
pub fn random_candidate(rng: &mut impl Rng, problem: &Knapsack) -> Candidate {
    let items = problem.catalog().items();
    let mut counts = vec![0; items.len()];
    let mut remaining = problem.capacity();
    loop {
        let eligible: Vec<_> = items.iter().filter(|x| x.volume <= remaining).collect();
        let Some(&&item) = eligible.choose(rng) else {
            break;
        };
        let max_quantity = remaining / item.volume;
        let quantity = if eligible.len() == 1 {
            max_quantity
        } else {
            rng.random_range(1..=max_quantity)
        };
        counts[item.id] += quantity;
        remaining -= quantity * item.volume;
    }
    Candidate::new(counts, problem.catalog())
}

/// 变异：不对现有个体做扰动，而是整体替换为一个新的随机候选解
///
/// 变异概率因此控制的是注入全新遗传物质的频率。
pub fn mutate(rng: &mut impl Rng, problem: &Knapsack) -> Candidate {
    random_candidate(rng, problem)
}

/// 两个双亲中价值较高的一个，价值相同时取前者
pub fn better_parent<'a>(first: &'a Candidate, second: &'a Candidate) -> &'a Candidate {
    if second.cost() > first.cost() {
        second
    } else {
        first
    }
}

/// 杂交方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrossoverKind {
    /// 逐位等概率地取自双亲之一
    UniformRandom,
    /// 逐位取双亲数量的向下取整平均值
    Averaging,
}

impl CrossoverKind {
    /// 由两个可行的双亲产生一个后代
    ///
    /// 后代超出容量时，均匀随机杂交会用同一对双亲重试至多
    /// [`CROSSOVER_RETRIES`] 次；平均值杂交对固定双亲是确定性的，只检查
    /// 一次。重试耗尽后回退为价值较高的双亲，绝不返回不可行的新个体。
    pub fn child(
        self,
        rng: &mut impl Rng,
        first: &Candidate,
        second: &Candidate,
        problem: &Knapsack,
    ) -> Candidate {
        match self {
            Self::UniformRandom => {
                for _ in 0..CROSSOVER_RETRIES {
                    let counts = first
                        .counts()
                        .iter()
                        .zip(second.counts())
                        .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
                        .collect();
                    let child = Candidate::new(counts, problem.catalog());
                    if problem.fits(&child) {
                        return child;
                    }
                }
            }
            Self::Averaging => {
                let counts = first
                    .counts()
                    .iter()
                    .zip(second.counts())
                    .map(|(&a, &b)| (a + b) / 2)
                    .collect();
                let child = Candidate::new(counts, problem.catalog());
                if problem.fits(&child) {
                    return child;
                }
            }
        }
        better_parent(first, second).clone()
    }
}

/// 从种群中均匀随机抽取两个不同的个体作为双亲
///
/// 种群规模必须不小于 2。
pub fn sample_parents<'a>(
    rng: &mut impl Rng,
    population: &'a Population,
) -> (&'a Candidate, &'a Candidate) {
    let n = population.len();
    let first = rng.random_range(0..n);
    let mut second = rng.random_range(0..n - 1);
    if second >= first {
        second += 1;
    }
    (
        &population.candidates()[first],
        &population.candidates()[second],
    )
}
