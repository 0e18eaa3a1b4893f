//! Human-readable names for metabolite and reaction identifiers.
use std::{fs, path::Path};

use tracing::warn;

use crate::{
    error::{MalformedReason, NetworkError},
    utils::{FxIndexMap, BACKWARD_SUFFIX},
};

/// Identifiers starting with this prefix name metabolites, as in KEGG's `cpd:C00022`.
pub const METABOLITE_PREFIX: &str = "cpd:";

/// A dictionary from identifiers to their (lower-cased) names.
#[derive(Debug, Default, Clone)]
pub struct NameTable {
    metabolites: FxIndexMap<String, Vec<String>>,
    reactions: FxIndexMap<String, Vec<String>>,
}

impl NameTable {
    pub fn new() -> NameTable {
        NameTable::default()
    }

    /// Registers the names of an identifier.
    /// The first registration of an identifier wins; returns whether this one was kept.
    pub fn insert<S: AsRef<str>>(&mut self, id: &str, names: impl IntoIterator<Item = S>) -> bool {
        if self.metabolites.contains_key(id) || self.reactions.contains_key(id) {
            return false;
        }
        let names = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        let table = if id.starts_with(METABOLITE_PREFIX) {
            &mut self.metabolites
        } else {
            &mut self.reactions
        };
        table.insert(id.to_owned(), names);
        true
    }

    /// Parses a table with one identifier per line:
    /// ```ignore
    /// cpd:C00022<TAB>Pyruvate;Pyruvic acid
    /// ```
    /// Blank lines and lines starting with `#` are skipped.
    pub fn parse_str(text: &str) -> Result<NameTable, NetworkError> {
        let mut table = NameTable::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let Some((id, names)) = line.split_once('\t') else {
                return Err(NetworkError::MalformedInput {
                    line: idx + 1,
                    content: line.to_owned(),
                    reason: MalformedReason::MissingTab,
                });
            };
            let id = id.trim();
            if !table.insert(id, names.split(';')) {
                warn!("Ignoring duplicate names for {id} on line {}", idx + 1);
            }
        }
        Ok(table)
    }

    pub fn load_from_file(path: &Path) -> Result<NameTable, NetworkError> {
        let text = fs::read_to_string(path).map_err(|source| NetworkError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::parse_str(&text)
    }

    pub fn len(&self) -> usize {
        self.metabolites.len() + self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find_by_name<'t>(table: &'t FxIndexMap<String, Vec<String>>, name: &str) -> Option<&'t str> {
        let name = name.to_lowercase();
        table
            .iter()
            .find(|(_, names)| names.contains(&name))
            .map(|(id, _)| id.as_str())
    }

    /// The identifier of the metabolite with the given name, ignoring case.
    pub fn find_metabolite(&self, name: &str) -> Option<&str> {
        Self::find_by_name(&self.metabolites, name)
    }

    /// The identifier of the reaction with the given name, ignoring case.
    pub fn find_reaction(&self, name: &str) -> Option<&str> {
        Self::find_by_name(&self.reactions, name)
    }

    /// The first name of an identifier.
    ///
    /// The backward half of a split reaction (`R_b`) is named like `R`.
    /// Falls back to the identifier itself when it has no name.
    pub fn find_idname<'t>(&'t self, id: &'t str) -> &'t str {
        let id = id.strip_suffix(BACKWARD_SUFFIX).unwrap_or(id);
        self.metabolites
            .get(id)
            .or_else(|| self.reactions.get(id))
            .and_then(|names| names.first())
            .map_or(id, String::as_str)
    }

    /// Returns a copy of `result` with every identifier replaced by its name.
    pub fn rename<T: Rename>(&self, result: &T) -> T {
        result.rename(self)
    }
}

/// Values whose identifiers can be replaced by names.
/// Renaming never modifies the original value.
pub trait Rename {
    fn rename(&self, names: &NameTable) -> Self;
}

impl Rename for String {
    fn rename(&self, names: &NameTable) -> String {
        names.find_idname(self).to_owned()
    }
}

/// Distances and other counts are kept as they are.
impl Rename for usize {
    fn rename(&self, _: &NameTable) -> usize {
        *self
    }
}

impl<T: Rename> Rename for Vec<T> {
    fn rename(&self, names: &NameTable) -> Vec<T> {
        self.iter().map(|item| item.rename(names)).collect()
    }
}

impl<T: Rename> Rename for Option<T> {
    fn rename(&self, names: &NameTable) -> Option<T> {
        self.as_ref().map(|item| item.rename(names))
    }
}

impl<A: Rename, B: Rename> Rename for (A, B) {
    fn rename(&self, names: &NameTable) -> (A, B) {
        (self.0.rename(names), self.1.rename(names))
    }
}
