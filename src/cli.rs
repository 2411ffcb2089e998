//! 命令行界面的实现。

use crate::config::Config;
use crate::data::{Catalog, Item};
use crate::error::Error;
use crate::interface::{Interface, Message};
use chrono::Local;
use clap::{Parser, Subcommand};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{create_dir_all, read_to_string, write, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// 命令行参数的定义
#[derive(Parser, Clone)]
#[command(name = "rucksack")]
#[command(author, version, about, long_about)]
#[command(propagate_version = true)]
pub struct CommandLineArgs {
    #[command(subcommand)]
    pub command: Command,
    /// 方案文件，默认为 config.yaml
    pub config: Option<PathBuf>,
    /// 物品目录，默认为 items.txt
    #[arg(short, long, value_name = "FILE")]
    pub items: Option<PathBuf>,
    /// 线程数，默认为 1
    #[arg(short, long)]
    pub threads: Option<usize>,
}

/// 命令行中所有可用的子命令
#[derive(Subcommand, Clone)]
pub enum Command {
    /// 只做随机构造并评测物品目录，不运行优化
    Evaluate,
    /// 基于方案文件中的配置求解背包问题
    Optimize,
    /// 随机生成一组物品和参数，相当于原程序的随机初始条件模式
    Generate {
        /// 物品类型的数量
        #[arg(short, long, default_value_t = 8)]
        n_items: usize,
    },
}

/// 通过命令行来使用 rucksack 的入口，实现了界面特征
pub struct CommandLine {
    pub args: CommandLineArgs,
    pub output_dir: PathBuf,
}

impl CommandLine {
    pub fn new(args: CommandLineArgs, maybe_output_dir: Option<PathBuf>) -> Self {
        let output_dir = maybe_output_dir.unwrap_or_else(|| {
            let time = Local::now().format("%m-%d+%H_%M_%S").to_string();
            PathBuf::from(format!("output-{time}"))
        });
        create_dir_all(output_dir.clone()).unwrap();
        Self { args, output_dir }
    }

    /// 读取方案文件和物品目录
    pub fn prepare(&self) -> Result<(Config, Catalog), Error> {
        let config_path = self
            .args
            .config
            .clone()
            .unwrap_or(PathBuf::from("config.yaml"));
        let config_content = read_to_string(&config_path)
            .map_err(|_| format!("文件 {} 不存在", config_path.display()))?;
        let config: Config =
            serde_yaml::from_str(&config_content).map_err(|x| format!("方案文件无效：{x}"))?;
        let items_path = self.args.items.clone().unwrap_or(PathBuf::from("items.txt"));
        let catalog = Self::read_catalog(&items_path)?;
        Ok((config, catalog))
    }

    /// 从制表符分隔的文本文件中读取物品目录，每行为（编号，体积，价值）
    pub fn read_catalog(path: &Path) -> Result<Catalog, Error> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|_| format!("文件 {} 不存在", path.display()))?;
        let mut items = vec![];
        for record in reader.deserialize() {
            let item: Item = record.map_err(|x| format!("物品目录无效：{x}"))?;
            items.push(item);
        }
        Catalog::new(items)
    }

    /// 把物品目录写成制表符分隔的文本文件
    pub fn write_catalog(path: &Path, catalog: &Catalog) {
        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_path(path)
            .unwrap();
        for item in catalog.items() {
            writer.serialize(item).unwrap();
        }
        writer.flush().unwrap();
    }

    /// 为并行运行的每个线程生成各自的输出目录
    pub fn child(&self, index: usize) -> CommandLine {
        let child_dir = self.output_dir.join(format!("{index}"));
        CommandLine::new(self.args.clone(), Some(child_dir))
    }
}

impl Interface for CommandLine {
    fn post(&self, message: Message) {
        let mut writer: Box<dyn Write> = if self.args.threads.is_some() {
            let log_path = self.output_dir.join("log.txt");
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
                .expect("Failed to open file");
            Box::new(file)
        } else {
            Box::new(std::io::stdout())
        };
        let result = match message {
            Message::Parameters { island, config } => {
                let prefix = match island {
                    Some(island) => format!("第 {island} 号种群："),
                    None => String::new(),
                };
                writeln!(
                    &mut writer,
                    "{}种群规模 {}，保留 {} 个最优个体，杂交方式 {:?}，杂交概率 {:.2}，变异概率 {:.2}",
                    prefix,
                    config.max_specimen,
                    config.alpha,
                    config.crossover,
                    config.crossover_probability,
                    config.mutation_probability
                )
            }
            Message::Progress {
                epoch,
                fitness,
                best_cost,
            } => writeln!(
                &mut writer,
                "已演化 {epoch} 代，平均适应度为 {fitness:.2}，当前最优价值为 {best_cost}"
            ),
            Message::MigrationRound { round, fitness } => writeln!(
                &mut writer,
                "已完成 {round} 轮迁移，总体平均适应度为 {fitness:.2}"
            ),
            Message::Converged { epoch, delta } => writeln!(
                &mut writer,
                "演化在第 {epoch} 代收敛，适应度变化为 {delta:.3e}"
            ),
            Message::Elapsed { time } => writeln!(&mut writer, "演化一代用时：{time} μs"),
            Message::BetterSolution { candidate, save } => {
                let time = Local::now();
                let mut result = writeln!(
                    &mut writer,
                    "{} 系统搜索到了一个更好的解，价值为 {}，体积为 {}，数量为 {:?}",
                    time.format("%H:%M:%S"),
                    candidate.cost(),
                    candidate.volume(),
                    candidate.counts()
                );
                if save {
                    let path = self.output_dir.join("best.yaml");
                    let content = serde_yaml::to_string(&candidate).unwrap();
                    write(&path, content).unwrap();
                    let appendix =
                        writeln!(&mut writer, "最优解保存于 {} 中", path.display());
                    result = result.and(appendix);
                }
                result
            }
        };
        result.unwrap();
    }
}
