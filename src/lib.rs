//! rucksack 是使用 Rust 实现的有界背包问题的遗传算法求解器。给定一组物品
//! 类型（每种有体积和价值，可以选取零个或多个）和一个容量固定的背包，
//! 在不超过容量的前提下搜索总价值最大的装包方式。
//!
//! 核心是演化引擎：随机构造可行个体、逐代做选择、杂交、变异和精英保留，
//! 直到代数耗尽或适应度收敛；此外还支持多个种群并行演化、定期互相迁移
//! 个体的岛屿模型。rucksack 同名命令行程序是其外围：读入物品目录和方案
//! 配置文件，运行求解并输出结果。

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod interface;
pub mod operators;
pub mod optimizers;
pub mod problem;
pub mod representation;

pub use error::Error;
pub use interface::{Interface, Message};
