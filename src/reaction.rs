use derive_new::new;
use itertools::chain;
use smallvec::SmallVec;

use crate::utils::BACKWARD_SUFFIX;

/// Most reactions have few substrates and products, so sides are stored inline.
pub const SIDE_CAPACITY: usize = 4;

/// One side of a reaction equation, in the order it was written.
pub type Side = SmallVec<[String; SIDE_CAPACITY]>;

/// A single parsed reaction equation.
///
/// The record only lives between parsing and network construction;
/// once built, the reaction is fully described by the network's edges.
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct ReactionEquation {
    /// The reaction identifier, as written before the `": "` separator.
    pub name: String,
    /// The metabolites on the left-hand side.
    pub substrates: Side,
    /// The metabolites on the right-hand side.
    pub products: Side,
    /// Whether the equation used the `<=>` arrow.
    pub reversible: bool,
}

impl ReactionEquation {
    /// The identifier of the backward vertex used when reversible reactions are split.
    pub fn backward_name(&self) -> String {
        format!("{}{BACKWARD_SUFFIX}", self.name)
    }

    /// All metabolites of the reaction, substrates first.
    pub fn metabolites(&self) -> impl Iterator<Item = &str> + '_ {
        chain!(self.substrates.iter(), self.products.iter()).map(String::as_str)
    }
}
