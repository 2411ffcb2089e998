//! rucksack: 遗传算法背包求解器［命令行版］
//!
//! 用户提供物品目录和方案配置文件，本程序用遗传算法在容量限制下搜索
//! 总价值最大的装包方式，支持单种群和多种群（岛屿模型）两种模式。

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rucksack::cli::{Command, CommandLine, CommandLineArgs};
use rucksack::config::{
    Config, GeneticConfig, KnapsackConfig, MetaheuristicConfig, OptimizationConfig,
};
use rucksack::data::{Catalog, Item};
use rucksack::error::Error;
use rucksack::interface::{Interface, Message};
use rucksack::operators::{random_candidate, CrossoverKind};
use rucksack::optimizers::{Optimizer, Solved};
use rucksack::problem::Knapsack;
use rucksack::representation::Population;
use std::fs::write;
use std::thread;

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn run_optimization(
    config: &Config,
    catalog: Catalog,
    seed: Option<u64>,
    cli: &CommandLine,
) -> Result<Solved, Error> {
    let knapsack = Knapsack::new(catalog, config.knapsack.capacity)?;
    let mut rng = make_rng(seed);
    match &config.optimization.metaheuristic {
        MetaheuristicConfig::Genetic(genetic) => genetic.solve(&knapsack, &mut rng, cli),
        MetaheuristicConfig::Islands(islands) => islands.solve(&knapsack, &mut rng, cli),
    }
}

/// 原程序的随机初始条件模式：随机抽取物品和参数并保存
fn generate(args: CommandLineArgs, n_items: usize) -> Result<(), Error> {
    let cli = CommandLine::new(args, None);
    let mut rng = StdRng::from_os_rng();
    let items = (0..n_items)
        .map(|id| Item {
            id,
            volume: rng.random_range(1..=20),
            cost: rng.random_range(1..=20),
        })
        .collect();
    let catalog = Catalog::new(items)?;
    let genetic = GeneticConfig {
        alpha: 2,
        max_generations: rng.random_range(1000..=3000),
        max_specimen: rng.random_range(500..=2000),
        crossover: if rng.random_bool(0.5) {
            CrossoverKind::UniformRandom
        } else {
            CrossoverKind::Averaging
        },
        crossover_probability: rng.random_range(85..=99) as f64 / 100.0,
        mutation_probability: rng.random_range(3..=6) as f64 / 100.0,
        epsilon: 0.05,
    };
    let config = Config {
        version: None,
        info: None,
        knapsack: KnapsackConfig {
            capacity: rng.random_range(50..=300),
        },
        optimization: OptimizationConfig {
            seed: None,
            metaheuristic: MetaheuristicConfig::Genetic(genetic.clone()),
        },
    };
    CommandLine::write_catalog(&cli.output_dir.join("items.txt"), &catalog);
    let content = serde_yaml::to_string(&config).unwrap();
    write(cli.output_dir.join("config.yaml"), content).unwrap();
    let volumes: Vec<_> = catalog.items().iter().map(|x| x.volume).collect();
    let costs: Vec<_> = catalog.items().iter().map(|x| x.cost).collect();
    println!("物品体积：{volumes:?}");
    println!("物品价值：{costs:?}");
    println!("最大容量：{}", config.knapsack.capacity);
    println!("保留的最优个体数量：{}", genetic.alpha);
    println!("适应度精度：{}", genetic.epsilon);
    println!("最大演化代数：{}", genetic.max_generations);
    println!("种群规模：{}", genetic.max_specimen);
    println!("杂交概率：{}%", genetic.crossover_probability * 100.0);
    println!("变异概率：{}%", genetic.mutation_probability * 100.0);
    println!("初始条件已保存在 {} 中", cli.output_dir.display());
    Ok(())
}

fn main() -> Result<(), Error> {
    let args = CommandLineArgs::parse();
    match args.command.clone() {
        Command::Generate { n_items } => generate(args, n_items)?,
        Command::Evaluate => {
            let cli = CommandLine::new(args, None);
            let (config, catalog) = cli.prepare()?;
            let knapsack = Knapsack::new(catalog, config.knapsack.capacity)?;
            let mut rng = make_rng(config.optimization.seed);
            let candidates = (0..1000)
                .map(|_| random_candidate(&mut rng, &knapsack))
                .collect();
            let population = Population::new(candidates);
            cli.post(Message::Progress {
                epoch: 0,
                fitness: population.fitness(),
                best_cost: population.best().map(|x| x.cost()).unwrap_or(0),
            });
            if let Some(best) = population.best() {
                cli.post(Message::BetterSolution {
                    candidate: best.clone(),
                    save: true,
                });
            }
        }
        Command::Optimize => {
            let threads = args.threads.unwrap_or(1);
            if threads == 1 {
                let cli = CommandLine::new(args, None);
                let (config, catalog) = cli.prepare()?;
                run_optimization(&config, catalog, config.optimization.seed, &cli)?;
            } else {
                let parent = CommandLine::new(args, None);
                let (config, catalog) = parent.prepare()?;
                let mut handles = vec![];
                for index in 0..threads {
                    let cli = parent.child(index);
                    let config = config.clone();
                    let catalog = catalog.clone();
                    let handle = thread::spawn(move || {
                        let seed = config.optimization.seed.map(|x| x + index as u64);
                        run_optimization(&config, catalog, seed, &cli).unwrap()
                    });
                    handles.push(handle);
                }
                let mut results: Vec<_> =
                    handles.into_iter().map(|x| x.join().unwrap()).collect();
                results.sort_by(|a, b| b.best.cost().cmp(&a.best.cost()));
                for (rank, solved) in results.iter().enumerate() {
                    println!(
                        "第 {} 名：价值 {}，体积 {}，数量 {:?}",
                        rank + 1,
                        solved.best.cost(),
                        solved.best.volume(),
                        solved.best.counts()
                    );
                }
            }
        }
    }
    Ok(())
}
