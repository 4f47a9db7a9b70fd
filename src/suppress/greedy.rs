//! Greedy NMS with an adaptive overlap threshold, plus the class-aware
//! batched variant.

use crate::geometry::{iou, BBox};
use crate::suppress::rank::{sort_scores_desc, ScoredIndex};
use crate::trace::{trace_event, trace_span};
use crate::util::error::check_aligned;
use crate::util::BoxNmsResult;

/// Parameters for greedy suppression.
#[derive(Clone, Copy, Debug)]
pub struct NmsParams {
    /// Only boxes scoring strictly above this value enter the candidate list.
    pub score_threshold: f32,
    /// Overlap tolerance: a candidate is dropped once its IoU with any
    /// already-kept box exceeds the current adaptive threshold.
    pub nms_threshold: f32,
    /// Adaptive decay factor. After each kept box, while `eta < 1` and the
    /// current tolerance is above 0.5, the tolerance is multiplied by `eta`.
    pub eta: f32,
    /// Keep at most this many top-scoring candidates before the greedy pass;
    /// 0 means no cap.
    pub top_k: usize,
}

impl Default for NmsParams {
    fn default() -> Self {
        Self {
            score_threshold: 0.0,
            nms_threshold: 0.3,
            eta: 1.0,
            top_k: 0,
        }
    }
}

/// Runs greedy non-maximum suppression over scored boxes.
///
/// Candidates are ranked by descending score (stable on ties), optionally
/// truncated to `top_k`, then accepted greedily: a box is kept when its
/// overlap with every previously kept box stays at or below the adaptive
/// threshold. Returns the kept original indices in selection order.
pub fn nms_boxes(bboxes: &[BBox], scores: &[f32], params: NmsParams) -> BoxNmsResult<Vec<usize>> {
    nms_boxes_limited(bboxes, scores, params, usize::MAX)
}

/// [`nms_boxes`] with an explicit cap on the number of kept boxes.
///
/// The pass stops as soon as `limit` boxes have been kept. The public entry
/// point passes `usize::MAX`.
pub fn nms_boxes_limited(
    bboxes: &[BBox],
    scores: &[f32],
    params: NmsParams,
    limit: usize,
) -> BoxNmsResult<Vec<usize>> {
    check_aligned("scores", bboxes.len(), scores.len())?;
    let _span = trace_span!("nms_boxes", boxes = bboxes.len()).entered();

    let mut ranked: Vec<ScoredIndex> = scores
        .iter()
        .enumerate()
        .filter(|&(_, &score)| score > params.score_threshold)
        .map(|(index, &score)| ScoredIndex { score, index })
        .collect();
    sort_scores_desc(&mut ranked);
    if params.top_k > 0 && ranked.len() > params.top_k {
        ranked.truncate(params.top_k);
    }

    let mut kept: Vec<usize> = Vec::new();
    let mut adaptive_threshold = params.nms_threshold;
    for candidate in &ranked {
        if kept.len() >= limit {
            break;
        }
        let keep = kept
            .iter()
            .all(|&idx| iou(&bboxes[candidate.index], &bboxes[idx]) <= adaptive_threshold);
        if keep {
            kept.push(candidate.index);
            if params.eta < 1.0 && adaptive_threshold > 0.5 {
                adaptive_threshold *= params.eta;
            }
        }
    }

    trace_event!("nms_kept", count = kept.len());
    Ok(kept)
}

/// Runs greedy NMS per class over a single mixed-class candidate set.
///
/// Each box is translated by `class_id * (max_coord + 1)` along both axes,
/// where `max_coord` is the largest corner coordinate across all boxes. The
/// translation puts every class in a disjoint coordinate region, so one
/// shared greedy pass can only ever suppress within a class.
pub fn nms_boxes_batched(
    bboxes: &[BBox],
    scores: &[f32],
    class_ids: &[i32],
    params: NmsParams,
) -> BoxNmsResult<Vec<usize>> {
    check_aligned("scores", bboxes.len(), scores.len())?;
    check_aligned("class_ids", bboxes.len(), class_ids.len())?;

    let mut max_coord = 0.0f32;
    for bbox in bboxes {
        max_coord = max_coord
            .max(bbox.x)
            .max(bbox.y)
            .max(bbox.x + bbox.width)
            .max(bbox.y + bbox.height);
    }

    let shifted: Vec<BBox> = bboxes
        .iter()
        .zip(class_ids)
        .map(|(bbox, &class_id)| bbox.translated(class_id as f32 * (max_coord + 1.0)))
        .collect();

    nms_boxes(&shifted, scores, params)
}
