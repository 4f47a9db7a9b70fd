//! Ranking primitives shared by the suppression passes.

use std::cmp::Ordering;

/// Transient (score, original index) pair built once per call.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScoredIndex {
    /// Confidence score, possibly decayed during Soft-NMS.
    pub score: f32,
    /// Index into the caller's input slices.
    pub index: usize,
}

/// Sorts pairs by descending score.
///
/// The sort must be stable: equal scores keep their original relative order,
/// and that tie-break is an observable part of the greedy NMS contract.
pub(crate) fn sort_scores_desc(pairs: &mut [ScoredIndex]) {
    pairs.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Ordering used by the Soft-NMS max scan: higher score wins, and among
/// equal scores the higher original index wins. The index tie-break is
/// inherited from the reference implementation and kept literal so that the
/// output on score ties does not silently change.
pub(crate) fn cmp_score_then_index(a: &ScoredIndex, b: &ScoredIndex) -> Ordering {
    a.score.total_cmp(&b.score).then_with(|| a.index.cmp(&b.index))
}
