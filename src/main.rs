use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use metnet::{MetabolicNetwork, NameTable, NetworkOptions, NetworkType, ParseState, Rename};
use tracing_subscriber::EnvFilter;

// See also `clap_cargo::style::CLAP_STYLING`
pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

#[derive(Debug, Parser)]
#[command(
    name = "metnet",
    about = "Reachability analysis of metabolic networks.",
    long_about = "Builds a metabolic network from reaction equations and answers reachability questions on it.
The reaction files contain one reaction per line, in the format:

R1: A + B => C
R2: C <=> D

`=>` marks an irreversible reaction and `<=>` a reversible one.
Lines starting with `#` are ignored.",
    styles = CLAP_STYLING,
)]
struct Cli {
    /// The paths to the files with the reaction equations.
    #[arg(short, long = "reactions", num_args = 1.., required = true)]
    data: Vec<PathBuf>,

    /// The topology of the network to build.
    #[arg(long, value_enum, default_value_t)]
    network_type: NetworkType,

    /// Whether to represent each reversible reaction `R` by two vertices, `R` and `R_b`.
    #[arg(long)]
    split_reversible: bool,

    /// A tab-separated file mapping identifiers to names, used to print the results.
    #[arg(long)]
    names: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Prints every vertex with its successors.
    Show,
    /// Lists the vertices reachable from a vertex, with their distances.
    Reachable { start: String },
    /// Finds the shortest path between two vertices.
    Path { start: String, end: String },
    /// Lists the metabolites producible from the given metabolites.
    Produce {
        #[arg(num_args = 1.., required = true)]
        seeds: Vec<String>,
    },
    /// Finds the reactions needed to produce a metabolite from the given metabolites.
    ProductPath {
        target: String,
        #[arg(num_args = 1.., required = true)]
        seeds: Vec<String>,
    },
    /// Lists the metabolites that are only consumed, and those that are only produced.
    Boundary,
}

/// Prints a result, renamed through the name table if one was given.
fn show<T: Rename + std::fmt::Debug>(label: &str, result: T, names: Option<&NameTable>) {
    match names {
        Some(names) => println!("{label}: {:?}", names.rename(&result)),
        None => println!("{label}: {result:?}"),
    }
}

fn run_cli(args: Cli) -> Result<()> {
    let mut parse_state = ParseState::default();
    for path in &args.data {
        parse_state
            .parse_data_file(path)
            .with_context(|| format!("Failed to parse {path:?}"))?;
    }
    let options = NetworkOptions::builder()
        .network_type(args.network_type)
        .split_reversible(args.split_reversible)
        .build();
    let network = MetabolicNetwork::from_reactions(options, parse_state.reactions());

    let names = args
        .names
        .as_deref()
        .map(NameTable::load_from_file)
        .transpose()
        .context("Failed to load the name table")?;
    let names = names.as_ref();

    match args.command {
        Command::Show => {
            network.print_graph();
            let (vertices, edges) = network.size();
            println!("{vertices} vertices, {edges} edges");
        }
        Command::Reachable { start } => {
            show("reachable", network.reachable_with_dist(&start)?, names);
        }
        Command::Path { start, end } => match network.shortest_path(&start, &end)? {
            Some(path) => show("path", path, names),
            None => println!("{end} is not reachable from {start}"),
        },
        Command::Produce { seeds } => {
            show("produced", network.all_produced_metabolites(&seeds)?, names);
        }
        Command::ProductPath { target, seeds } => {
            match network.shortest_path_product(&seeds, &target)? {
                Some(path) => show("reactions", path, names),
                None => println!(
                    "{target} cannot be produced from {}",
                    seeds.iter().join(", ")
                ),
            }
        }
        Command::Boundary => {
            show("initial", network.initial_metabolites(), names);
            show("final", network.final_metabolites(), names);
        }
    }
    Ok(())
}

pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    run_cli(Cli::parse())
}
