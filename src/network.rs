//! Construction of metabolic networks from reaction equations.
use std::{fmt::Display, ops::Deref, path::Path};

use bon::Builder;
use tracing::{debug, info, warn};

use crate::{
    error::NetworkError,
    graph::Graph,
    parsers::ParseState,
    reaction::ReactionEquation,
    utils::FxIndexMap,
};

/// The shape of the graph built from the reactions.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum NetworkType {
    /// A bipartite graph: substrates point to reactions, reactions point to products.
    #[default]
    MetaboliteReaction,
    /// Metabolites only: `A -> B` if some reaction consumes `A` and produces `B`.
    MetaboliteMetabolite,
    /// Reactions only: `R1 -> R2` if some product of `R1` is consumed by `R2`.
    ReactionReaction,
}

impl Display for NetworkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            NetworkType::MetaboliteReaction => "metabolite-reaction",
            NetworkType::MetaboliteMetabolite => "metabolite-metabolite",
            NetworkType::ReactionReaction => "reaction-reaction",
        })
    }
}

/// The category of a vertex in a bipartite network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Metabolite,
    Reaction,
}

/// How a network is built from its reactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Builder)]
pub struct NetworkOptions {
    #[builder(default)]
    pub network_type: NetworkType,
    /// Whether a reversible reaction `R` becomes two vertices, `R` and `R_b`.
    #[builder(default)]
    pub split_reversible: bool,
}

/// A metabolic network: a directed graph whose vertices are metabolites and/or reactions.
///
/// The network is built once from a batch of reactions and is read-only afterwards.
/// Graph queries are available through `Deref<Target = Graph>`.
#[derive(Clone, Debug)]
pub struct MetabolicNetwork {
    graph: Graph,
    options: NetworkOptions,
    /// The vertices of each category. Only filled for bipartite networks.
    node_types: FxIndexMap<NodeType, Vec<String>>,
    /// Set when a reversible reaction was wired in both directions through a single vertex.
    bidirectional: bool,
}

impl Deref for MetabolicNetwork {
    type Target = Graph;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

impl MetabolicNetwork {
    fn empty(options: NetworkOptions) -> MetabolicNetwork {
        let mut node_types = FxIndexMap::default();
        if options.network_type == NetworkType::MetaboliteReaction {
            node_types.insert(NodeType::Metabolite, Vec::new());
            node_types.insert(NodeType::Reaction, Vec::new());
        }
        MetabolicNetwork {
            graph: Graph::new(),
            options,
            node_types,
            bidirectional: false,
        }
    }

    /// Builds a network from already parsed reactions.
    pub fn from_reactions(options: NetworkOptions, reactions: &[ReactionEquation]) -> MetabolicNetwork {
        let mut bipartite = MetabolicNetwork::empty(NetworkOptions {
            network_type: NetworkType::MetaboliteReaction,
            ..options
        });
        for reaction in reactions {
            bipartite.add_reaction(reaction);
        }

        let network = match options.network_type {
            NetworkType::MetaboliteReaction => bipartite,
            NetworkType::MetaboliteMetabolite | NetworkType::ReactionReaction => {
                bipartite.into_projection(options)
            }
        };

        let (vertices, edges) = network.size();
        info!(
            "Built {} network from {} reactions: {vertices} vertices, {edges} edges",
            options.network_type,
            reactions.len()
        );
        network
    }

    /// Builds a network from reaction lines, such as `R1: A + B => C`.
    ///
    /// Every line is parsed before the first vertex is added,
    /// so a malformed line never leaves a partially built network behind.
    pub fn from_lines<'a>(
        options: NetworkOptions,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Result<MetabolicNetwork, NetworkError> {
        let mut parse_state = ParseState::default();
        parse_state.parse_lines(lines)?;
        Ok(Self::from_reactions(options, parse_state.reactions()))
    }

    /// Builds a network from a block of text with one reaction per line.
    pub fn parse(options: NetworkOptions, text: &str) -> Result<MetabolicNetwork, NetworkError> {
        Self::from_lines(options, text.lines())
    }

    /// Builds a network from a file of reaction lines.
    pub fn load_from_file(options: NetworkOptions, path: &Path) -> Result<MetabolicNetwork, NetworkError> {
        let mut parse_state = ParseState::default();
        parse_state.parse_data_file(path)?;
        Ok(Self::from_reactions(options, parse_state.reactions()))
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn options(&self) -> NetworkOptions {
        self.options
    }

    pub fn network_type(&self) -> NetworkType {
        self.options.network_type
    }

    pub fn split_reversible(&self) -> bool {
        self.options.split_reversible
    }

    /// Whether some reversible reaction was stored as a single vertex wired both ways.
    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    /// The vertices registered under a category, in insertion order.
    /// `None` if the network's topology has no such category.
    pub fn nodes_of_type(&self, node_type: NodeType) -> Option<&[String]> {
        self.node_types.get(&node_type).map(Vec::as_slice)
    }

    /// The metabolite vertices of the network.
    /// In a metabolite-metabolite projection every vertex is a metabolite,
    /// and a reaction-reaction projection has none.
    pub fn metabolite_vertices(&self) -> Vec<&str> {
        match self.options.network_type {
            NetworkType::MetaboliteReaction => self
                .nodes_of_type(NodeType::Metabolite)
                .unwrap_or_default()
                .iter()
                .map(String::as_str)
                .collect(),
            NetworkType::MetaboliteMetabolite => self.graph.vertices().collect(),
            NetworkType::ReactionReaction => Vec::new(),
        }
    }

    /// The reaction vertices of the network, see [`MetabolicNetwork::metabolite_vertices`].
    pub fn reaction_vertices(&self) -> Vec<&str> {
        match self.options.network_type {
            NetworkType::MetaboliteReaction => self
                .nodes_of_type(NodeType::Reaction)
                .unwrap_or_default()
                .iter()
                .map(String::as_str)
                .collect(),
            NetworkType::MetaboliteMetabolite => Vec::new(),
            NetworkType::ReactionReaction => self.graph.vertices().collect(),
        }
    }

    /// Adds a vertex and records its category.
    /// A vertex keeps the category it was first registered with.
    fn add_vertex_type(&mut self, vertex: &str, node_type: NodeType) {
        if self.graph.contains(vertex) {
            if self
                .nodes_of_type(node_type)
                .is_some_and(|nodes| !nodes.iter().any(|node| node == vertex))
            {
                warn!("{vertex} is used both as a metabolite and as a reaction");
            }
            return;
        }
        self.graph.add_vertex(vertex);
        if let Some(nodes) = self.node_types.get_mut(&node_type) {
            nodes.push(vertex.to_owned());
        }
    }

    /// Adds the vertices and edges of a single reaction to a bipartite network.
    fn add_reaction(&mut self, reaction: &ReactionEquation) {
        let name = reaction.name.as_str();
        self.add_vertex_type(name, NodeType::Reaction);
        let backward = (reaction.reversible && self.options.split_reversible).then(|| {
            let backward = reaction.backward_name();
            self.add_vertex_type(&backward, NodeType::Reaction);
            backward
        });
        for metabolite in reaction.metabolites() {
            self.add_vertex_type(metabolite, NodeType::Metabolite);
        }

        match (reaction.reversible, backward) {
            (false, _) => {
                for substrate in &reaction.substrates {
                    self.graph.add_edge(substrate, name);
                }
                for product in &reaction.products {
                    self.graph.add_edge(name, product);
                }
            }
            (true, Some(backward)) => {
                for substrate in &reaction.substrates {
                    self.graph.add_edge(substrate, name);
                    self.graph.add_edge(&backward, substrate);
                }
                for product in &reaction.products {
                    self.graph.add_edge(product, &backward);
                    self.graph.add_edge(name, product);
                }
            }
            (true, None) => {
                self.bidirectional = true;
                for metabolite in reaction.metabolites() {
                    self.graph.add_edge(metabolite, name);
                    self.graph.add_edge(name, metabolite);
                }
            }
        }
        debug!("Added reaction {name}");
    }

    /// Collapses a bipartite network into the projection requested by `options`.
    ///
    /// For every vertex of the kept category, each vertex two steps away becomes
    /// a direct successor. Self-edges are dropped.
    fn into_projection(self, options: NetworkOptions) -> MetabolicNetwork {
        let kept = match options.network_type {
            NetworkType::MetaboliteMetabolite => NodeType::Metabolite,
            _ => NodeType::Reaction,
        };

        let mut graph = Graph::new();
        for vertex in self.nodes_of_type(kept).unwrap_or_default() {
            graph.add_vertex(vertex);
            for middle in self.successors(vertex) {
                for next in self.successors(middle) {
                    if next != vertex {
                        graph.add_edge(vertex, next);
                    }
                }
            }
        }

        MetabolicNetwork {
            graph,
            options,
            node_types: FxIndexMap::default(),
            bidirectional: self.bidirectional,
        }
    }
}
