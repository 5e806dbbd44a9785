extern crate treap_forest;

use clap::builder::RangedU64ValueParser;
use clap::{value_parser, Arg, ArgMatches, Command};
use log::debug;
use std::error::Error;
use treap_forest::{Config, Forest, Treap, DEFAULT_CHUNK_SIZE};

fn make_options_parser() -> Command {
    Command::new("treap-demo")
        .about("Walks through merge, split, implicit keys, range max, and iteration on a treap")
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_name("SEED")
                .help("Seed for node priorities; omit for a random shape")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("chunk-size")
                .short('c')
                .long("chunk-size")
                .value_name("SLOTS")
                .help("Number of node slots the arena reserves at a time")
                .default_value("1024")
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..)),
        )
}

fn config_from_matches(matches: &ArgMatches) -> Config {
    Config {
        chunk_size: matches
            .get_one::<usize>("chunk-size")
            .copied()
            .unwrap_or(DEFAULT_CHUNK_SIZE),
        seed: matches.get_one::<u64>("seed").copied(),
    }
}

fn keys(forest: &Forest<i64>, tree: &Treap) -> String {
    forest
        .iter(tree)
        .map(|key| key.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let mut forest = Forest::try_with_config(config)?;

    println!("Test 1: Insertion and Merge");
    let mut root = forest.make_node(10);
    for key in vec![20, 5, 15] {
        forest.insert(&mut root, key);
    }
    forest.validate(&root)?;
    println!("Tree after inserting keys 10, 20, 5, 15:");
    println!(
        "Root: {}, Size: {}",
        forest.root_key(&root).copied().unwrap_or_default(),
        forest.size(&root),
    );

    println!("\nTest 2: Split by Key");
    let (left, right) = forest.split(root, &15);
    let left_max = forest.key(forest.last(&left)).map(|key| *key).unwrap_or(-1);
    let right_min = forest.key(forest.begin(&right)).map(|key| *key).unwrap_or(-1);
    println!("After split by key 15:");
    println!("Left subtree max: {}", left_max);
    println!("Right subtree min: {}", right_min);
    forest.destroy(left);
    forest.destroy(right);

    println!("\nTest 3: Merge with Implicit Key");
    let mut left_tree = forest.make_node(1);
    forest.push_back(&mut left_tree, 2);
    let right_tree = forest.make_node(3);
    let merged = forest.merge_implicit(left_tree, right_tree);
    forest.validate_sequence(&merged)?;
    println!("After merging two implicit trees:");
    println!("Sequence: {}", keys(&forest, &merged));
    println!(
        "Root of merged tree: {}",
        forest.root_key(&merged).copied().unwrap_or_default(),
    );

    println!("\nTest 4: Split by Size");
    let (small_left, small_right) = forest.split_by_size(merged, 1);
    println!("After split by size 1:");
    println!(
        "Left subtree size: {}, Right subtree size: {}",
        forest.size(&small_left),
        forest.size(&small_right),
    );
    forest.destroy(small_left);
    forest.destroy(small_right);

    println!("\nTest 5: Range Max");
    let mut test_tree = forest.make_node(50);
    for key in vec![30, 70] {
        forest.insert(&mut test_tree, key);
    }
    match forest.range_max(&test_tree) {
        Some(max) => println!("Max value in the tree: {}", max),
        None => println!("Max value in the tree: none"),
    }
    forest.destroy(test_tree);

    println!("\nTest 6: Tree Iterator");
    let mut iter_tree = forest.make_node(10);
    for key in vec![5, 15] {
        forest.insert(&mut iter_tree, key);
    }
    println!("Iterating over the tree:");
    let mut cursor = forest.begin(&iter_tree);
    let mut line = Vec::new();
    while cursor != forest.end() {
        line.push(forest.key(cursor)?.to_string());
        forest.advance(&mut cursor)?;
    }
    println!("{}", line.join(" "));
    forest.destroy(iter_tree);

    debug!("{} nodes left in the forest", forest.node_count());
    Ok(())
}

fn main() {
    if std::env::var("TREAP_LOG").is_ok() {
        let env = env_logger::Env::new()
            .filter("TREAP_LOG")
            .write_style("TREAP_LOG_STYLE");
        env_logger::init_from_env(env);
    }

    let config = config_from_matches(&make_options_parser().get_matches());
    debug!("demo configuration: {:?}", config);

    if let Err(err) = run(config) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
