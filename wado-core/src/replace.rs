use rand::Rng;
use std::collections::BTreeMap;

use crate::records::Thing;

/// What the candidates should be turned into.
///
/// Both forms are keyed by a sorted map so the bag is always built in
/// ascending type order, whatever order the targets were given in.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplacementTargets {
    /// Exactly this many of each type.
    Counts(BTreeMap<i16, usize>),
    /// This fraction of the candidate pool, rounded, for each type.
    Weights(BTreeMap<i16, f64>),
}

impl ReplacementTargets {
    pub fn counts(targets: impl IntoIterator<Item = (i16, usize)>) -> Self {
        ReplacementTargets::Counts(targets.into_iter().collect())
    }

    pub fn weights(targets: impl IntoIterator<Item = (i16, f64)>) -> Self {
        ReplacementTargets::Weights(targets.into_iter().collect())
    }

    /// Flatten the targets into the multiset of values to hand out.
    pub fn bag(&self, candidate_count: usize) -> Vec<i16> {
        let mut bag = Vec::new();
        match self {
            ReplacementTargets::Counts(counts) => {
                for (&kind, &count) in counts {
                    bag.extend(std::iter::repeat(kind).take(count));
                }
            }
            ReplacementTargets::Weights(weights) => {
                for (&kind, &weight) in weights {
                    let count = (candidate_count as f64 * weight).round().max(0.0) as usize;
                    bag.extend(std::iter::repeat(kind).take(count));
                }
            }
        }
        bag
    }
}

/// Overwrite the type of randomly chosen candidates with values drawn from
/// the target bag, without replacement on either side.
///
/// Each step draws a candidate index and then a bag index from `rng`. The
/// pass stops as soon as either pool runs dry; running out is never an
/// error. Returns the number of things changed.
pub fn replace_kinds<R: Rng + ?Sized>(
    things: &mut [Thing],
    mut candidates: Vec<usize>,
    targets: &ReplacementTargets,
    rng: &mut R,
) -> usize {
    let mut bag = targets.bag(candidates.len());
    let mut replaced = 0usize;

    while !candidates.is_empty() && !bag.is_empty() {
        let candidate = candidates.remove(rng.gen_range(0..candidates.len()));
        let kind = bag.remove(rng.gen_range(0..bag.len()));
        things[candidate].kind = kind;
        replaced += 1;
    }

    replaced
}
