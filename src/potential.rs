//! Metabolic potential: which metabolites a network can produce from a starting set.
//!
//! A reaction fires only when *all* of its substrates are available.
//! This is what separates the closure computed here from plain graph reachability,
//! where a single available predecessor is enough.
use itertools::Itertools;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::{
    error::NetworkError,
    network::{MetabolicNetwork, NetworkType},
    utils::{FxIndexMap, FxIndexSet},
};

const ACTIVATION_UNSUPPORTED: &str =
    "reaction activation needs a metabolite-reaction network with split reversible reactions";

impl MetabolicNetwork {
    /// Whether "all predecessors available" means "all substrates available".
    ///
    /// This fails for projections, and for reversible reactions stored as a single
    /// vertex, whose products are also predecessors.
    pub fn supports_activation(&self) -> bool {
        self.network_type() == NetworkType::MetaboliteReaction
            && (self.split_reversible() || !self.is_bidirectional())
    }

    /// The reactions whose substrates are all in `active_metabolites`.
    /// Reactions with no substrates are never active.
    ///
    /// Returns `None` if the network does not support activation,
    /// see [`MetabolicNetwork::supports_activation`].
    pub fn active_reactions<S: AsRef<str>>(&self, active_metabolites: &[S]) -> Option<Vec<String>> {
        if !self.supports_activation() {
            return None;
        }
        let active: FxHashSet<&str> = active_metabolites.iter().map(AsRef::as_ref).collect();
        Some(self.active_among(&active))
    }

    fn active_among(&self, active: &FxHashSet<&str>) -> Vec<String> {
        self.reaction_vertices()
            .into_iter()
            .filter(|reaction| {
                let substrates = self.predecessors(reaction);
                !substrates.is_empty() && substrates.iter().all(|s| active.contains(s))
            })
            .map(str::to_owned)
            .collect()
    }

    /// The metabolites produced by the given reactions, without duplicates, in first-seen order.
    pub fn produced_metabolites<S: AsRef<str>>(&self, active_reactions: &[S]) -> Vec<String> {
        active_reactions
            .iter()
            .flat_map(|reaction| self.successors(reaction.as_ref()))
            .unique()
            .map(str::to_owned)
            .collect()
    }

    /// Every metabolite producible from `initial_metabolites`, the initial ones included.
    ///
    /// Repeatedly fires the active reactions until no new metabolite appears.
    /// The initial metabolites come first, followed by the produced ones in discovery order.
    pub fn all_produced_metabolites<S: AsRef<str>>(
        &self,
        initial_metabolites: &[S],
    ) -> Result<Vec<String>, NetworkError> {
        if !self.supports_activation() {
            return Err(NetworkError::UnsupportedOperation(ACTIVATION_UNSUPPORTED));
        }

        let mut metabolites: FxIndexSet<String> = initial_metabolites
            .iter()
            .map(|m| m.as_ref().to_owned())
            .collect();
        for iteration in 1.. {
            let available: FxHashSet<&str> = metabolites.iter().map(String::as_str).collect();
            let reactions = self.active_among(&available);
            let produced = self.produced_metabolites(&reactions);

            let known = metabolites.len();
            metabolites.extend(produced);
            debug!(
                "Closure iteration {iteration}: {} active reactions, {} new metabolites",
                reactions.len(),
                metabolites.len() - known
            );
            if metabolites.len() == known {
                break;
            }
        }
        Ok(metabolites.into_iter().collect())
    }

    /// Finds the reactions needed to produce `target` from `initial_metabolites`.
    ///
    /// Each metabolite's path is the union of its producing reaction's substrates' paths,
    /// followed by the reaction itself. The first derivation found wins.
    /// Returns an empty path if the target is already available,
    /// and `None` if it can never be produced.
    pub fn shortest_path_product<S: AsRef<str>>(
        &self,
        initial_metabolites: &[S],
        target: &str,
    ) -> Result<Option<Vec<String>>, NetworkError> {
        if !self.supports_activation() {
            return Err(NetworkError::UnsupportedOperation(ACTIVATION_UNSUPPORTED));
        }
        if initial_metabolites.iter().any(|m| m.as_ref() == target) {
            return Ok(Some(Vec::new()));
        }

        // The reactions used to first produce each available metabolite.
        let mut paths: FxIndexMap<String, Vec<String>> = initial_metabolites
            .iter()
            .map(|m| (m.as_ref().to_owned(), Vec::new()))
            .collect();
        let initial: FxHashSet<&str> = initial_metabolites.iter().map(AsRef::as_ref).collect();
        let mut reactions = self.active_among(&initial);

        loop {
            let mut grew = false;
            for reaction in &reactions {
                let substrates = self.predecessors(reaction);
                for product in self.successors(reaction) {
                    if paths.contains_key(product) {
                        continue;
                    }
                    let mut path: FxIndexSet<String> = FxIndexSet::default();
                    for substrate in &substrates {
                        path.extend(paths[*substrate].iter().cloned());
                    }
                    path.insert(reaction.clone());
                    let path = path.into_iter().collect_vec();

                    if product == target {
                        return Ok(Some(path));
                    }
                    paths.insert(product.to_owned(), path);
                    grew = true;
                }
            }
            if !grew {
                return Ok(None);
            }
            let available: FxHashSet<&str> = paths.keys().map(String::as_str).collect();
            reactions = self.active_among(&available);
        }
    }

    /// Metabolites that are produced but never consumed.
    pub fn final_metabolites(&self) -> Vec<String> {
        self.metabolite_vertices()
            .into_iter()
            .filter(|m| self.in_degree(m) > 0 && self.out_degree(m) == 0)
            .map(str::to_owned)
            .collect()
    }

    /// Metabolites that are consumed but never produced.
    pub fn initial_metabolites(&self) -> Vec<String> {
        self.metabolite_vertices()
            .into_iter()
            .filter(|m| self.out_degree(m) > 0 && self.in_degree(m) == 0)
            .map(str::to_owned)
            .collect()
    }
}
