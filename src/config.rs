//! 配置文件的定义与校验。

use crate::error::Error;
use crate::operators::CrossoverKind;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

/// 背包本身的配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnapsackConfig {
    /// 背包的最大容量
    pub capacity: u64,
}

/// 单种群遗传算法的参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// 从上一代原样保留的最优个体数量
    pub alpha: usize,
    /// 最大演化代数
    pub max_generations: usize,
    /// 每一代的个体数量
    pub max_specimen: usize,
    /// 杂交方式
    pub crossover: CrossoverKind,
    /// 杂交概率
    pub crossover_probability: f64,
    /// 变异概率
    pub mutation_probability: f64,
    /// 收敛阈值：相邻两代适应度之差小于它即认为收敛
    pub epsilon: f64,
}

impl GeneticConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_specimen < 2 {
            return Err("种群规模必须不小于 2".into());
        }
        if self.alpha > self.max_specimen {
            return Err(format!(
                "保留的最优个体数量 {} 不能超过种群规模 {}",
                self.alpha, self.max_specimen
            )
            .into());
        }
        for (name, value) in [
            ("杂交概率", self.crossover_probability),
            ("变异概率", self.mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name}必须在 0 和 1 之间，当前为 {value}").into());
            }
        }
        Ok(())
    }

    /// 按原程序给出的范围随机抽取一组参数，用于多种群模式下各个种群的
    /// 独立配置
    pub fn random(rng: &mut impl Rng) -> Self {
        let crossover = if rng.random_bool(0.5) {
            CrossoverKind::UniformRandom
        } else {
            CrossoverKind::Averaging
        };
        Self {
            alpha: 2,
            max_generations: rng.random_range(500..=1000),
            max_specimen: rng.random_range(50..=200),
            crossover,
            crossover_probability: rng.random_range(85..=99) as f64 / 100.0,
            mutation_probability: rng.random_range(3..=6) as f64 / 100.0,
            epsilon: 0.05,
        }
    }
}

/// 多种群（岛屿模型）的参数
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IslandsConfig {
    /// 种群数量
    pub n_populations: usize,
    /// 两轮迁移之间每个种群演化的代数
    pub migration_delay: usize,
    /// 每个个体在一轮迁移中被移动的概率
    pub migration_probability: f64,
    /// 最大迁移轮数
    pub n_migration_rounds: usize,
    /// 收敛阈值：相邻两轮总体适应度之差小于它即认为收敛
    pub epsilon: f64,
    /// 各个种群的参数；缺省时按原程序的范围随机抽取
    pub engines: Option<Vec<GeneticConfig>>,
}

impl IslandsConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.n_populations == 0 {
            return Err("种群数量必须为正数".into());
        }
        if self.migration_delay == 0 {
            return Err("迁移间隔必须为正数".into());
        }
        if self.n_migration_rounds == 0 {
            return Err("迁移轮数必须为正数".into());
        }
        if !(0.0..=1.0).contains(&self.migration_probability) {
            return Err(format!(
                "迁移概率必须在 0 和 1 之间，当前为 {}",
                self.migration_probability
            )
            .into());
        }
        if let Some(engines) = &self.engines {
            if engines.len() != self.n_populations {
                return Err(format!(
                    "提供了 {} 组种群参数，但种群数量为 {}",
                    engines.len(),
                    self.n_populations
                )
                .into());
            }
            for engine in engines {
                engine.validate()?;
            }
        }
        Ok(())
    }
}

/// 优化方法的配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "algorithm")]
pub enum MetaheuristicConfig {
    Genetic(GeneticConfig),
    Islands(IslandsConfig),
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationConfig {
    /// 随机数种子；缺省时从系统熵源取
    pub seed: Option<u64>,
    pub metaheuristic: MetaheuristicConfig,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: Option<String>,
    pub info: Option<BTreeMap<String, String>>,
    pub knapsack: KnapsackConfig,
    pub optimization: OptimizationConfig,
}
