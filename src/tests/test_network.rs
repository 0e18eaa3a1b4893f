use std::path::Path;

use crate::{MalformedReason, MetabolicNetwork, NetworkError, NetworkOptions, NetworkType, NodeType};

const LINEAR_PATH: &str = "data/test_models/linear.txt";

fn options(network_type: NetworkType, split_reversible: bool) -> NetworkOptions {
    NetworkOptions::builder()
        .network_type(network_type)
        .split_reversible(split_reversible)
        .build()
}

fn build(network_type: NetworkType, split_reversible: bool, lines: &[&str]) -> MetabolicNetwork {
    MetabolicNetwork::from_lines(options(network_type, split_reversible), lines.iter().copied())
        .unwrap()
}

#[test]
pub fn test_default_options() {
    let options = NetworkOptions::builder().build();
    assert_eq!(options.network_type, NetworkType::MetaboliteReaction);
    assert!(!options.split_reversible);
    assert_eq!(options, NetworkOptions::default());
}

/// A + B => C: substrates point to the reaction, the reaction points to the product.
#[test]
pub fn test_irreversible_wiring() {
    let network = build(NetworkType::MetaboliteReaction, false, &["R1: A + B => C"]);
    assert_eq!(network.successors("A"), vec!["R1"]);
    assert_eq!(network.successors("B"), vec!["R1"]);
    assert_eq!(network.successors("R1"), vec!["C"]);
    assert!(network.successors("C").is_empty());
    assert_eq!(network.size(), (4, 3));
    assert!(!network.is_bidirectional());
}

/// R1: A <=> B, split into R1 and R1_b.
#[test]
pub fn test_reversible_split() {
    let network = build(NetworkType::MetaboliteReaction, true, &["R1: A <=> B"]);
    assert!(network.contains("R1"));
    assert!(network.contains("R1_b"));
    assert_eq!(network.successors("A"), vec!["R1"]);
    assert_eq!(network.successors("R1"), vec!["B"]);
    assert_eq!(network.successors("B"), vec!["R1_b"]);
    assert_eq!(network.successors("R1_b"), vec!["A"]);
    assert_eq!(network.size(), (4, 4));
    assert_eq!(
        network.nodes_of_type(NodeType::Reaction).unwrap(),
        ["R1", "R1_b"]
    );
    assert!(!network.is_bidirectional());
}

/// R1: A <=> B without splitting wires a single vertex both ways.
#[test]
pub fn test_reversible_unsplit() {
    let network = build(NetworkType::MetaboliteReaction, false, &["R1: A <=> B"]);
    assert!(!network.contains("R1_b"));
    assert_eq!(network.successors("A"), vec!["R1"]);
    assert_eq!(network.successors("B"), vec!["R1"]);
    assert_eq!(network.successors("R1"), vec!["A", "B"]);
    assert_eq!(network.predecessors("R1"), vec!["A", "B"]);
    assert!(network.is_bidirectional());
}

#[test]
pub fn test_node_types() {
    let network = build(
        NetworkType::MetaboliteReaction,
        false,
        &["R1: A + B => C", "R2: C => D", "R3: A => D"],
    );
    assert_eq!(
        network.nodes_of_type(NodeType::Metabolite).unwrap(),
        ["A", "B", "C", "D"]
    );
    assert_eq!(
        network.nodes_of_type(NodeType::Reaction).unwrap(),
        ["R1", "R2", "R3"]
    );
    assert_eq!(network.metabolite_vertices(), vec!["A", "B", "C", "D"]);
    assert_eq!(network.reaction_vertices(), vec!["R1", "R2", "R3"]);
}

/// A metabolite-metabolite projection links substrates to products.
#[test]
pub fn test_metabolite_projection() {
    let network = build(
        NetworkType::MetaboliteMetabolite,
        false,
        &["R1: A + B => C", "R2: C => D"],
    );
    assert_eq!(network.network_type(), NetworkType::MetaboliteMetabolite);
    assert_eq!(network.successors("A"), vec!["C"]);
    assert_eq!(network.successors("B"), vec!["C"]);
    assert_eq!(network.successors("C"), vec!["D"]);
    assert!(network.successors("D").is_empty());
    assert!(!network.contains("R1"));
    assert_eq!(network.size(), (4, 3));
    assert_eq!(network.nodes_of_type(NodeType::Metabolite), None);
    assert_eq!(network.metabolite_vertices(), vec!["A", "B", "C", "D"]);
    assert!(network.reaction_vertices().is_empty());
}

#[test]
pub fn test_metabolite_projection_drops_self_edges() {
    let network = build(NetworkType::MetaboliteMetabolite, false, &["R1: A => A + B"]);
    assert_eq!(network.successors("A"), vec!["B"]);
}

/// A reaction-reaction projection links a reaction to the consumers of its products.
#[test]
pub fn test_reaction_projection() {
    let network = build(
        NetworkType::ReactionReaction,
        false,
        &["R1: A + B => C", "R2: C => D", "R3: C + D => E", "R4: E => E"],
    );
    assert_eq!(network.successors("R1"), vec!["R2", "R3"]);
    assert_eq!(network.successors("R2"), vec!["R3"]);
    assert_eq!(network.successors("R3"), vec!["R4"]);
    assert!(network.successors("R4").is_empty());
    assert!(!network.contains("A"));
    assert_eq!(network.reaction_vertices(), vec!["R1", "R2", "R3", "R4"]);
}

/// In split mode the backward vertex takes part in the reaction projection.
#[test]
pub fn test_reaction_projection_split() {
    let network = build(
        NetworkType::ReactionReaction,
        true,
        &["R1: A <=> B", "R2: B => C"],
    );
    assert_eq!(network.successors("R1"), vec!["R1_b", "R2"]);
    assert!(network.successors("R1_b").contains(&"R1"));
}

/// A malformed line fails the whole build.
#[test]
pub fn test_malformed_line() {
    let result = MetabolicNetwork::from_lines(NetworkOptions::default(), ["R1 A => B"]);
    assert!(matches!(
        result,
        Err(NetworkError::MalformedInput {
            line: 1,
            reason: MalformedReason::MissingSeparator,
            ..
        })
    ));

    let result = MetabolicNetwork::parse(NetworkOptions::default(), "R1: A => B\nR2: B C\n");
    assert!(matches!(
        result,
        Err(NetworkError::MalformedInput {
            line: 2,
            reason: MalformedReason::InvalidEquation,
            ..
        })
    ));
}

/// Blank and comment lines are not reactions when the lines are given directly.
#[test]
pub fn test_lines_are_not_filtered() {
    let result = MetabolicNetwork::from_lines(
        NetworkOptions::default(),
        ["R1: A => B", "", "# R2: B => C"],
    );
    assert!(matches!(
        result,
        Err(NetworkError::MalformedInput {
            line: 2,
            reason: MalformedReason::MissingSeparator,
            ..
        })
    ));
}

/// Metabolite names with spaces become single vertices.
#[test]
pub fn test_spaced_metabolite_names() {
    let network = build(
        NetworkType::MetaboliteReaction,
        false,
        &["R1: D-Glucose 6-phosphate + ATP => ADP"],
    );
    assert_eq!(
        network.metabolite_vertices(),
        vec!["D-Glucose 6-phosphate", "ATP", "ADP"]
    );
    assert_eq!(network.predecessors("R1"), vec!["D-Glucose 6-phosphate", "ATP"]);
    assert_eq!(network.size(), (4, 3));
}

#[test]
pub fn test_load_from_file() {
    let network = MetabolicNetwork::load_from_file(
        options(NetworkType::MetaboliteReaction, false),
        Path::new(LINEAR_PATH),
    )
    .unwrap();
    assert_eq!(network.reaction_vertices(), vec!["R1", "R2"]);
    assert_eq!(network.size(), (6, 5));
    assert_eq!(network.graph().predecessors("R1"), vec!["A", "B"]);
}

#[test]
pub fn test_load_missing_file() {
    let result = MetabolicNetwork::load_from_file(
        NetworkOptions::default(),
        Path::new("data/test_models/missing.txt"),
    );
    assert!(matches!(result, Err(NetworkError::Io { .. })));
}

/// Graph queries go through to the underlying graph.
#[test]
pub fn test_graph_queries() {
    let network = build(
        NetworkType::MetaboliteReaction,
        false,
        &["R1: A + B => C", "R2: C => D"],
    );
    assert_eq!(
        network.shortest_path("A", "D").unwrap(),
        Some(vec!["A".to_owned(), "R1".to_owned(), "C".to_owned(), "R2".to_owned(), "D".to_owned()])
    );
    let reachable = network.reachable_with_dist("B").unwrap();
    assert_eq!(reachable.last(), Some(&("D".to_owned(), 4)));
}
