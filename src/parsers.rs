use crate::{
    error::{MalformedReason, NetworkError},
    reaction::{ReactionEquation, Side},
};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_until},
    character::complete::multispace0,
    combinator::{all_consuming, map, value, verify},
    multi::separated_list1,
    IResult, Parser,
};
use std::{fs, path::Path};
use tracing::{debug, warn};

/// Accumulates reactions parsed from one or more sources.
#[derive(Default, Debug)]
pub struct ParseState {
    reactions: Vec<ReactionEquation>,
}

/// Parses the reaction name, up to the first `": "`.
/// The separator includes the space so that identifiers like `rn:R00200` stay whole.
fn reaction_name(data: &str) -> IResult<&str, &str> {
    let (rem, (name, _)) = (take_until(": "), tag(": ")).parse(data)?;
    Ok((rem, name.trim()))
}

/// Parses one identifier: the text up to the next `+`, trimmed.
/// Identifiers may hold spaces, `=` or `<`, but not an arrow.
fn metabolite(data: &str) -> IResult<&str, &str> {
    map(
        verify(take_till(|c: char| c == '+'), |id: &str| {
            !id.trim().is_empty() && !id.contains("=>")
        }),
        str::trim,
    )
    .parse(data)
}

/// Parses one half of an equation:
/// ```ignore
/// D-Glucose 6-phosphate + cpd:C00001
/// ```
/// A blank half is accepted and yields no metabolites.
fn equation_side(data: &str) -> IResult<&str, Side> {
    alt((
        value(Side::new(), all_consuming(multispace0)),
        map(
            all_consuming(separated_list1(tag("+"), metabolite)),
            |ids: Vec<&str>| ids.into_iter().map(str::to_owned).collect(),
        ),
    ))
    .parse(data)
}

/// Splits an equation at its arrow, returning the left side and whether the reaction is reversible.
/// `<=>` is looked for first, since it contains `=>`.
fn arrow(data: &str) -> IResult<&str, (&str, bool)> {
    alt((
        (take_until("<=>"), value(true, tag("<=>"))),
        (take_until("=>"), value(false, tag("=>"))),
    ))
    .parse(data)
}

/// Parses a full equation, of the form:
/// ```ignore
/// A + B <=> C
/// ```
fn equation(data: &str) -> IResult<&str, (Side, bool, Side)> {
    let (rhs, (lhs, reversible)) = arrow(data)?;
    let (_, substrates) = equation_side(lhs)?;
    let (rem, products) = equation_side(rhs)?;
    Ok((rem, (substrates, reversible, products)))
}

/// Parses a line of the form:
/// ```ignore
/// R1: A + B => C
/// ```
/// `line_no` is only used for error reporting.
pub fn parse_reaction_line(line: &str, line_no: usize) -> Result<ReactionEquation, NetworkError> {
    let malformed = |reason| NetworkError::MalformedInput {
        line: line_no,
        content: line.trim_end().to_owned(),
        reason,
    };

    let (rest, name) =
        reaction_name(line).map_err(|_| malformed(MalformedReason::MissingSeparator))?;
    if name.is_empty() {
        warn!("Reaction on line {line_no} has an empty name");
    }
    let (_, (substrates, reversible, products)) =
        equation(rest).map_err(|_| malformed(MalformedReason::InvalidEquation))?;

    if substrates.is_empty() || products.is_empty() {
        warn!("Reaction {name} on line {line_no} has an empty side");
    }
    debug!(
        "Parsed reaction {name}: {} substrates, {} products, reversible: {reversible}",
        substrates.len(),
        products.len()
    );
    Ok(ReactionEquation::new(
        name.to_owned(),
        substrates,
        products,
        reversible,
    ))
}

/// Whether a file line carries no reaction: blank, or a `#` comment.
fn is_skipped(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

impl ParseState {
    /// Parses a block of text, one reaction per line.
    /// Every line must be a reaction, see [`ParseState::parse_lines`].
    pub fn parse_str(&mut self, text: &str) -> Result<&mut Self, NetworkError> {
        self.parse_lines(text.lines())
    }

    /// Parses a sequence of lines. Line numbers in errors are 1-based positions in the sequence.
    ///
    /// Blank and comment lines are not skipped here: they lack the separator and are rejected.
    /// Stops at the first malformed line; reactions parsed from earlier
    /// calls are kept, reactions from this batch are not.
    pub fn parse_lines<'a>(
        &mut self,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Result<&mut Self, NetworkError> {
        self.parse_numbered(lines.into_iter().enumerate())
    }

    fn parse_numbered<'a>(
        &mut self,
        lines: impl Iterator<Item = (usize, &'a str)>,
    ) -> Result<&mut Self, NetworkError> {
        let parsed = lines
            .map(|(idx, line)| parse_reaction_line(line, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;
        self.reactions.extend(parsed);
        Ok(self)
    }

    /// Parses a data file of reaction lines.
    /// Blank lines and lines starting with `#` are skipped; errors report the line in the file.
    pub fn parse_data_file(&mut self, reactions_path: &Path) -> Result<&mut Self, NetworkError> {
        let text = fs::read_to_string(reactions_path).map_err(|source| NetworkError::Io {
            path: reactions_path.to_owned(),
            source,
        })?;
        debug!("Read {reactions_path:?}");
        self.parse_numbered(text.lines().enumerate().filter(|(_, line)| !is_skipped(line)))
    }

    /// The reactions parsed so far, in input order.
    pub fn reactions(&self) -> &[ReactionEquation] {
        &self.reactions
    }

    pub fn into_reactions(self) -> Vec<ReactionEquation> {
        self.reactions
    }
}
