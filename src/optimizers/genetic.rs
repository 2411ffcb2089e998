//! 遗传算法

use super::{Optimizer, Solved};
use crate::config::GeneticConfig;
use crate::error::Error;
use crate::interface::{Interface, Message};
use crate::operators::{better_parent, mutate, random_candidate, sample_parents};
use crate::problem::Knapsack;
use crate::representation::{Candidate, Population};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// 每隔多少代向用户报告一次进度
pub const PROGRESS_INTERVAL: usize = 100;

/// 单种群演化引擎
///
/// 持有当前种群作为跨代的可变状态，可以分多次推进，因此多种群协调器能够
/// 反复要求"再演化 N 代"。首次推进时才创建第 0 代。
pub struct GeneticEngine<'a> {
    config: GeneticConfig,
    problem: &'a Knapsack,
    rng: StdRng,
    population: Population,
    epoch: usize,
}

impl<'a> GeneticEngine<'a> {
    pub fn new(config: GeneticConfig, problem: &'a Knapsack, rng: StdRng) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            problem,
            rng,
            population: Population::default(),
            epoch: 0,
        })
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn fitness(&self) -> f64 {
        self.population.fitness()
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.population.best()
    }

    /// 若尚无种群，随机构造 max_specimen 个个体作为第 0 代
    pub fn initialize(&mut self) {
        if self.population.is_empty() {
            let candidates = (0..self.config.max_specimen)
                .map(|_| random_candidate(&mut self.rng, self.problem))
                .collect();
            self.population = Population::new(candidates);
        }
    }

    /// 由当前种群产生下一代，返回两代适应度之差的绝对值
    ///
    /// 先产生 2 × max_specimen 个临时个体：每个个体以变异概率整体替换为
    /// 新的随机解，否则抽取两个不同的双亲，以杂交概率杂交，不杂交时取
    /// 价值较高的双亲。再补上上一代的 alpha 个最优个体，按价值稳定降序
    /// 排序后保留前 max_specimen 个。
    pub fn advance(&mut self) -> f64 {
        self.initialize();
        let GeneticConfig {
            alpha,
            max_specimen,
            crossover,
            crossover_probability,
            mutation_probability,
            ..
        } = self.config.clone();
        let mut pool = Vec::with_capacity(2 * max_specimen + alpha);
        for _ in 0..2 * max_specimen {
            // 迁移可能使种群暂时不足两个个体，此时无法抽取双亲
            if self.population.len() < 2
                || self.rng.random::<f64>() <= mutation_probability
            {
                pool.push(mutate(&mut self.rng, self.problem));
                continue;
            }
            let (first, second) = sample_parents(&mut self.rng, &self.population);
            let child = if self.rng.random::<f64>() <= crossover_probability {
                crossover.child(&mut self.rng, first, second, self.problem)
            } else {
                better_parent(first, second).clone()
            };
            pool.push(child);
        }
        pool.extend(self.population.top(alpha));
        pool.sort_by(|a, b| b.cost().cmp(&a.cost()));
        pool.truncate(max_specimen);
        let next = Population::new(pool);
        let delta = (next.fitness() - self.population.fitness()).abs();
        self.population = next;
        self.epoch += 1;
        delta
    }

    /// 最多推进 generations 代，适应度变化小于 epsilon 时提前停止
    ///
    /// 返回是否因收敛而停止。
    pub fn evolve(&mut self, generations: usize) -> bool {
        self.initialize();
        for _ in 0..generations {
            let delta = self.advance();
            if delta < self.config.epsilon {
                return true;
            }
        }
        false
    }

    /// 迁出指定位置的个体
    pub fn emigrate(&mut self, index: usize) -> Candidate {
        self.population.remove(index)
    }

    /// 迁入一个个体
    pub fn immigrate(&mut self, candidate: Candidate) {
        self.population.push(candidate);
    }
}

impl Optimizer for GeneticConfig {
    fn solve(
        &self,
        problem: &Knapsack,
        rng: &mut StdRng,
        interface: &dyn Interface,
    ) -> Result<Solved, Error> {
        let mut engine = GeneticEngine::new(self.clone(), problem, StdRng::from_rng(rng))?;
        interface.post(Message::Parameters {
            island: None,
            config: self.clone(),
        });
        engine.initialize();
        let mut best = engine
            .best()
            .cloned()
            .unwrap_or_else(|| Candidate::zero(problem.catalog()));
        interface.post(Message::Progress {
            epoch: 0,
            fitness: engine.fitness(),
            best_cost: best.cost(),
        });
        let start = Instant::now();
        let mut converged = None;
        while engine.epoch() < self.max_generations {
            let delta = engine.advance();
            if engine.epoch() == 1 {
                interface.post(Message::Elapsed {
                    time: start.elapsed().as_micros(),
                });
            }
            if let Some(current) = engine.best() {
                if current.cost() > best.cost() {
                    best = current.clone();
                    interface.post(Message::BetterSolution {
                        candidate: best.clone(),
                        save: false,
                    });
                }
            }
            if engine.epoch() % PROGRESS_INTERVAL == 0 {
                interface.post(Message::Progress {
                    epoch: engine.epoch(),
                    fitness: engine.fitness(),
                    best_cost: best.cost(),
                });
            }
            if delta < self.epsilon {
                converged = Some(delta);
                break;
            }
        }
        if let Some(delta) = converged {
            interface.post(Message::Converged {
                epoch: engine.epoch(),
                delta,
            });
        }
        interface.post(Message::BetterSolution {
            candidate: best.clone(),
            save: true,
        });
        Ok(Solved {
            best,
            fitness: engine.fitness(),
            epochs: engine.epoch(),
        })
    }
}
