use rand::rngs::StdRng;
use rand::SeedableRng;
use rucksack::cli::CommandLine;
use rucksack::config::{GeneticConfig, IslandsConfig};
use rucksack::data::{Catalog, Item};
use rucksack::interface::{Interface, Message};
use rucksack::operators::{better_parent, random_candidate, CrossoverKind};
use rucksack::optimizers::genetic::GeneticEngine;
use rucksack::optimizers::Optimizer;
use rucksack::problem::Knapsack;
use rucksack::representation::Candidate;

/// 测试时丢弃所有消息的界面
struct Silent;

impl Interface for Silent {
    fn post(&self, _: Message) {}
}

fn item(id: usize, volume: u64, cost: u64) -> Item {
    Item { id, volume, cost }
}

/// 文档给出的第一个场景，最优解为 (2, 1, 2)，价值 108
fn scenario_1() -> Knapsack {
    let catalog = Catalog::new(vec![item(0, 7, 12), item(1, 3, 2), item(2, 20, 41)]).unwrap();
    Knapsack::new(catalog, 58).unwrap()
}

/// 文档给出的第二个场景，最优解为 (0, 0, 3)，价值 150
fn scenario_2() -> Knapsack {
    let catalog = Catalog::new(vec![item(0, 12, 40), item(1, 20, 60), item(2, 15, 50)]).unwrap();
    Knapsack::new(catalog, 45).unwrap()
}

fn genetic_config() -> GeneticConfig {
    GeneticConfig {
        alpha: 2,
        max_generations: 300,
        max_specimen: 200,
        crossover: CrossoverKind::UniformRandom,
        crossover_probability: 0.9,
        mutation_probability: 0.1,
        epsilon: 0.0,
    }
}

#[test]
fn random_construction_is_feasible() {
    let problem = scenario_1();
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..1000 {
        let candidate = random_candidate(&mut rng, &problem);
        assert!(candidate.volume() <= problem.capacity());
        assert_eq!(candidate.counts().len(), 3);
    }
}

#[test]
fn degenerate_catalog_yields_zero_candidate() {
    let catalog = Catalog::new(vec![item(0, 100, 5), item(1, 200, 7)]).unwrap();
    let problem = Knapsack::new(catalog, 50).unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    let candidate = random_candidate(&mut rng, &problem);
    assert_eq!(candidate.counts(), &[0, 0]);
    assert_eq!(candidate.volume(), 0);
    assert_eq!(candidate.cost(), 0);
}

#[test]
fn crossover_returns_feasible_child_or_parent() {
    let problem = scenario_1();
    let mut rng = StdRng::seed_from_u64(3);
    for kind in [CrossoverKind::UniformRandom, CrossoverKind::Averaging] {
        for _ in 0..200 {
            let first = random_candidate(&mut rng, &problem);
            let second = random_candidate(&mut rng, &problem);
            let child = kind.child(&mut rng, &first, &second, &problem);
            assert!(
                problem.fits(&child) || child == first || child == second,
                "后代既不可行也不是双亲之一"
            );
        }
    }
}

#[test]
fn crossover_fallback_prefers_first_parent_on_tie() {
    let catalog = Catalog::new(vec![item(0, 4, 10), item(1, 4, 10)]).unwrap();
    let problem = Knapsack::new(catalog, 8).unwrap();
    let first = Candidate::new(vec![2, 0], problem.catalog());
    let second = Candidate::new(vec![0, 2], problem.catalog());
    assert_eq!(first.cost(), second.cost());
    assert_eq!(*better_parent(&first, &second), first);
}

#[test]
fn averaging_crossover_floors_counts() {
    let catalog = Catalog::new(vec![item(0, 1, 1), item(1, 1, 1)]).unwrap();
    let problem = Knapsack::new(catalog, 100).unwrap();
    let first = Candidate::new(vec![3, 0], problem.catalog());
    let second = Candidate::new(vec![0, 1], problem.catalog());
    let mut rng = StdRng::seed_from_u64(4);
    let child = CrossoverKind::Averaging.child(&mut rng, &first, &second, &problem);
    assert_eq!(child.counts(), &[1, 0]);
}

#[test]
fn advance_keeps_population_size() {
    let problem = scenario_1();
    let config = genetic_config();
    let mut engine =
        GeneticEngine::new(config.clone(), &problem, StdRng::seed_from_u64(5)).unwrap();
    engine.initialize();
    assert_eq!(engine.population().len(), config.max_specimen);
    for _ in 0..20 {
        engine.advance();
        assert_eq!(engine.population().len(), config.max_specimen);
    }
}

#[test]
fn elitism_never_degrades_best_cost() {
    let problem = scenario_1();
    let mut engine =
        GeneticEngine::new(genetic_config(), &problem, StdRng::seed_from_u64(6)).unwrap();
    engine.initialize();
    let mut best = engine.best().unwrap().cost();
    for _ in 0..50 {
        engine.advance();
        let current = engine.best().unwrap().cost();
        assert!(current >= best, "最优价值从 {best} 退化到了 {current}");
        best = current;
    }
}

#[test]
fn evolution_is_deterministic_under_fixed_seed() {
    let problem = scenario_1();
    let run = |seed: u64| {
        let mut engine =
            GeneticEngine::new(genetic_config(), &problem, StdRng::seed_from_u64(seed)).unwrap();
        engine.initialize();
        for _ in 0..30 {
            engine.advance();
        }
        let counts: Vec<Vec<u64>> = engine
            .population()
            .candidates()
            .iter()
            .map(|x| x.counts().to_vec())
            .collect();
        (counts, engine.fitness())
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn solver_finds_documented_optimum_in_scenario_1() {
    let problem = scenario_1();
    let mut rng = StdRng::seed_from_u64(8);
    let solved = genetic_config().solve(&problem, &mut rng, &Silent).unwrap();
    assert_eq!(solved.best.cost(), 108);
    assert_eq!(solved.best.counts(), &[2, 1, 2]);
    assert_eq!(solved.best.volume(), 57);
}

#[test]
fn solver_finds_documented_optimum_in_scenario_2() {
    let problem = scenario_2();
    let mut rng = StdRng::seed_from_u64(9);
    let solved = genetic_config().solve(&problem, &mut rng, &Silent).unwrap();
    assert_eq!(solved.best.cost(), 150);
    assert_eq!(solved.best.counts(), &[0, 0, 3]);
    assert_eq!(solved.best.volume(), 45);
}

#[test]
fn large_epsilon_terminates_before_generation_budget() {
    let problem = scenario_1();
    let config = GeneticConfig {
        epsilon: 1e9,
        ..genetic_config()
    };
    let mut rng = StdRng::seed_from_u64(10);
    let solved = config.solve(&problem, &mut rng, &Silent).unwrap();
    assert!(solved.epochs < config.max_generations);
}

#[test]
fn migration_conserves_candidates() {
    let problem = scenario_1();
    let config = IslandsConfig {
        n_populations: 3,
        migration_delay: 5,
        migration_probability: 0.5,
        n_migration_rounds: 10,
        epsilon: 0.0,
        engines: None,
    };
    let mut rng = StdRng::seed_from_u64(11);
    let mut engines: Vec<_> = (0..3)
        .map(|index| {
            let genetic = GeneticConfig {
                max_specimen: 20 + 10 * index,
                ..genetic_config()
            };
            GeneticEngine::new(genetic, &problem, StdRng::seed_from_u64(100 + index as u64))
                .unwrap()
        })
        .collect();
    for engine in engines.iter_mut() {
        engine.evolve(3);
    }
    let total_before: usize = engines.iter().map(|x| x.population().len()).sum();
    config.migrate(&mut engines, &mut rng);
    let total_after: usize = engines.iter().map(|x| x.population().len()).sum();
    assert_eq!(total_before, total_after);
}

#[test]
fn islands_solver_finds_documented_optimum() {
    let problem = scenario_1();
    let config = IslandsConfig {
        n_populations: 4,
        migration_delay: 20,
        migration_probability: 0.05,
        n_migration_rounds: 10,
        epsilon: 0.0,
        engines: Some(vec![genetic_config(); 4]),
    };
    let mut rng = StdRng::seed_from_u64(12);
    let solved = config.solve(&problem, &mut rng, &Silent).unwrap();
    assert_eq!(solved.best.cost(), 108);
}

#[test]
fn invalid_configurations_are_rejected() {
    let problem = scenario_1();
    let bad_alpha = GeneticConfig {
        alpha: 300,
        ..genetic_config()
    };
    assert!(GeneticEngine::new(bad_alpha, &problem, StdRng::seed_from_u64(13)).is_err());
    let bad_probability = GeneticConfig {
        mutation_probability: 1.5,
        ..genetic_config()
    };
    assert!(bad_probability.validate().is_err());
    let tiny_population = GeneticConfig {
        max_specimen: 1,
        ..genetic_config()
    };
    assert!(tiny_population.validate().is_err());
    let mismatched = IslandsConfig {
        n_populations: 3,
        migration_delay: 5,
        migration_probability: 0.1,
        n_migration_rounds: 5,
        epsilon: 0.0,
        engines: Some(vec![genetic_config(); 2]),
    };
    assert!(mismatched.validate().is_err());
}

#[test]
fn invalid_catalogs_are_rejected() {
    assert!(Catalog::new(vec![]).is_err());
    assert!(Catalog::new(vec![item(1, 5, 5)]).is_err());
    assert!(Catalog::new(vec![item(0, 0, 5)]).is_err());
    assert!(Catalog::new(vec![item(0, 5, 0)]).is_err());
    let catalog = Catalog::new(vec![item(0, 5, 5)]).unwrap();
    assert!(Knapsack::new(catalog, 0).is_err());
}

#[test]
fn catalog_reads_from_tab_separated_file() {
    let path = std::env::temp_dir().join("rucksack_test_items.txt");
    std::fs::write(&path, "0\t7\t12\n1\t3\t2\n2\t20\t41\n").unwrap();
    let catalog = CommandLine::read_catalog(&path).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.items()[2], item(2, 20, 41));
    std::fs::remove_file(&path).unwrap();
}
