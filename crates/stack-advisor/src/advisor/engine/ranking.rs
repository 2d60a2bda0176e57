use super::{RankedCandidate, ScoredCandidate};

/// Orders survivors by descending score. The sort is stable, so ties keep catalog order.
pub(crate) fn rank(mut survivors: Vec<ScoredCandidate>) -> Vec<RankedCandidate> {
    survivors.sort_by(|left, right| right.score.cmp(&left.score));

    survivors
        .into_iter()
        .enumerate()
        .map(|(index, scored)| RankedCandidate {
            rank: index + 1,
            candidate: scored.candidate,
            score: scored.score,
            components: scored.components,
        })
        .collect()
}
