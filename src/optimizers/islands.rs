//! 多种群（岛屿模型）遗传算法
//!
//! 若干个独立配置的演化引擎各自演化，每隔固定代数做一轮概率性迁移，把
//! 个体从一个种群移动到另一个随机选定的种群。各引擎在一轮之内互不依赖，
//! 用线程并行推进，回合边界同步后再做迁移。

use super::{Optimizer, Solved};
use crate::config::{GeneticConfig, IslandsConfig};
use crate::error::Error;
use crate::interface::{Interface, Message};
use crate::optimizers::genetic::GeneticEngine;
use crate::problem::Knapsack;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;

impl IslandsConfig {
    /// 一轮迁移
    ///
    /// 先在冻结的成员名单上决定所有（个体，目的地）移动，再统一执行，
    /// 避免在遍历的同时修改种群导致漏掉或重复访问个体。执行时按记录的
    /// 逆序移除，保证先前记下的序号仍然有效。
    pub fn migrate(&self, engines: &mut [GeneticEngine], rng: &mut StdRng) {
        let n = engines.len();
        if n < 2 {
            return;
        }
        let mut moves = vec![];
        for (home, engine) in engines.iter().enumerate() {
            for index in 0..engine.population().len() {
                if rng.random::<f64>() <= self.migration_probability {
                    let mut destination = rng.random_range(0..n - 1);
                    if destination >= home {
                        destination += 1;
                    }
                    moves.push((home, index, destination));
                }
            }
        }
        for &(home, index, destination) in moves.iter().rev() {
            let candidate = engines[home].emigrate(index);
            engines[destination].immigrate(candidate);
        }
    }
}

impl Optimizer for IslandsConfig {
    fn solve(
        &self,
        problem: &Knapsack,
        rng: &mut StdRng,
        interface: &dyn Interface,
    ) -> Result<Solved, Error> {
        self.validate()?;
        let configs = match &self.engines {
            Some(engines) => engines.clone(),
            None => (0..self.n_populations)
                .map(|_| GeneticConfig::random(rng))
                .collect(),
        };
        let mut engines = vec![];
        for (island, config) in configs.into_iter().enumerate() {
            interface.post(Message::Parameters {
                island: Some(island),
                config: config.clone(),
            });
            engines.push(GeneticEngine::new(config, problem, StdRng::from_rng(rng))?);
        }
        let delay = self.migration_delay;
        let mut fitness = 0.0;
        let mut last_fitness = None;
        let mut rounds = 0;
        for round in 1..=self.n_migration_rounds {
            thread::scope(|scope| {
                for engine in engines.iter_mut() {
                    scope.spawn(move || {
                        engine.evolve(delay);
                    });
                }
            });
            self.migrate(&mut engines, rng);
            fitness = engines.iter().map(|x| x.fitness()).sum::<f64>() / engines.len() as f64;
            interface.post(Message::MigrationRound { round, fitness });
            rounds = round;
            if let Some(last) = last_fitness {
                let delta: f64 = fitness - last;
                if delta.abs() < self.epsilon {
                    interface.post(Message::Converged {
                        epoch: round,
                        delta: delta.abs(),
                    });
                    break;
                }
            }
            last_fitness = Some(fitness);
        }
        let best = engines
            .iter()
            .filter_map(|x| x.best())
            .max_by_key(|x| x.cost())
            .cloned()
            .ok_or("多种群求解结束时没有任何个体")?;
        interface.post(Message::BetterSolution {
            candidate: best.clone(),
            save: true,
        });
        Ok(Solved {
            best,
            fitness,
            epochs: rounds,
        })
    }
}
