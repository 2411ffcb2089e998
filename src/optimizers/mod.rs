//! 优化方法接口，以及若干优化方法的实现
//!

use crate::error::Error;
use crate::interface::Interface;
use crate::problem::Knapsack;
use crate::representation::Candidate;
use rand::rngs::StdRng;
use serde::Serialize;

pub mod genetic;
pub mod islands;

/// 优化结果
#[derive(Debug, Clone, Serialize)]
pub struct Solved {
    /// 搜索到的最优候选解
    pub best: Candidate,
    /// 结束时活跃种群的适应度
    pub fitness: f64,
    /// 实际执行的代数（多种群模式下为迁移轮数）
    pub epochs: usize,
}

/// 优化方法的统一接口
///
/// 随机数生成器由调用方提供，测试时注入固定种子即可复现整个求解过程。
pub trait Optimizer {
    fn solve(
        &self,
        problem: &Knapsack,
        rng: &mut StdRng,
        interface: &dyn Interface,
    ) -> Result<Solved, Error>;
}
