mod error;
pub use error::{MalformedReason, NetworkError};
mod graph;
pub use graph::Graph;
mod names;
pub use names::{NameTable, Rename, METABOLITE_PREFIX};
mod network;
pub use network::{MetabolicNetwork, NetworkOptions, NetworkType, NodeType};
mod parsers;
pub use parsers::{parse_reaction_line, ParseState};
mod potential;
mod reaction;
pub use reaction::ReactionEquation;
#[cfg(test)]
mod tests;
mod utils;
pub use utils::BACKWARD_SUFFIX;
