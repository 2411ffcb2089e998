//! 输出接口的抽象层
//!
//! 定义了一个特征，指定了所有在演化计算的过程中需要向用户反馈的数据。
//! 命令行界面只需要实现 post 方法，就可向用户报告各种用户数据；将来如果
//! 有别的界面，实现方式可以很不一样。

use crate::config::GeneticConfig;
use crate::representation::Candidate;
use serde::Serialize;
use serde_with::skip_serializing_none;

/// 向用户反馈的消息类型
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[skip_serializing_none]
pub enum Message {
    Parameters {
        island: Option<usize>,
        config: GeneticConfig,
    },
    Progress {
        epoch: usize,
        fitness: f64,
        best_cost: u64,
    },
    BetterSolution {
        candidate: Candidate,
        save: bool,
    },
    MigrationRound {
        round: usize,
        fitness: f64,
    },
    Converged {
        epoch: usize,
        delta: f64,
    },
    Elapsed {
        time: u128,
    },
}

/// 定义了向用户报告消息的接口，用于统一各种输出方式
pub trait Interface {
    fn post(&self, message: Message);
}
