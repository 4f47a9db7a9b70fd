//! Soft-NMS: iterative max extraction with score decay instead of hard
//! suppression.

use crate::geometry::{iou, BBox};
use crate::suppress::rank::{cmp_score_then_index, ScoredIndex};
use crate::trace::{trace_event, trace_span};
use crate::util::error::check_aligned;
use crate::util::BoxNmsResult;

/// Score decay applied to boxes overlapping a kept box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SoftNmsMethod {
    /// Multiply the score by `1 - IoU`, only when the overlap exceeds
    /// `nms_threshold`.
    #[default]
    Linear,
    /// Multiply the score by `exp(-IoU² / sigma)` regardless of the overlap
    /// threshold.
    Gaussian,
}

/// Parameters for Soft-NMS.
#[derive(Clone, Copy, Debug)]
pub struct SoftNmsParams {
    /// Boxes whose (possibly decayed) score drops below this value stop
    /// competing; the pass ends when the running maximum falls below it.
    pub score_threshold: f32,
    /// Overlap threshold gating the linear decay.
    pub nms_threshold: f32,
    /// Maximum number of boxes to keep; 0 means keep as many as qualify.
    pub top_k: usize,
    /// Gaussian decay scale.
    pub sigma: f32,
    /// Decay method.
    pub method: SoftNmsMethod,
}

impl Default for SoftNmsParams {
    fn default() -> Self {
        Self {
            score_threshold: 0.0,
            nms_threshold: 0.3,
            top_k: 0,
            sigma: 0.5,
            method: SoftNmsMethod::Linear,
        }
    }
}

/// Kept boxes with their decayed scores, both in selection order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SoftNmsResult {
    /// Original indices of the kept boxes.
    pub indices: Vec<usize>,
    /// Score each kept box had at the moment it was selected.
    pub scores: Vec<f32>,
}

/// Runs Soft-NMS over scored boxes.
///
/// Each round extracts the remaining maximum-score box (ties prefer the
/// higher original index), freezes it, and decays the scores of every
/// still-competing box by its overlap with the extracted one. The pass ends
/// once `top_k` boxes are kept or the running maximum drops below
/// `score_threshold`.
pub fn soft_nms_boxes(
    bboxes: &[BBox],
    scores: &[f32],
    params: SoftNmsParams,
) -> BoxNmsResult<SoftNmsResult> {
    check_aligned("scores", bboxes.len(), scores.len())?;
    let _span = trace_span!("soft_nms_boxes", boxes = bboxes.len()).entered();

    let top_k = if params.top_k == 0 {
        scores.len()
    } else {
        params.top_k.min(scores.len())
    };

    let mut working: Vec<ScoredIndex> = scores
        .iter()
        .enumerate()
        .map(|(index, &score)| ScoredIndex { score, index })
        .collect();

    let mut out = SoftNmsResult::default();
    let mut start = 0usize;
    while out.indices.len() < top_k {
        let Some(best) = working[start..]
            .iter()
            .enumerate()
            .max_by(|&(_, a), &(_, b)| cmp_score_then_index(a, b))
            .map(|(offset, _)| start + offset)
        else {
            break;
        };
        if working[best].score < params.score_threshold {
            break;
        }

        out.indices.push(working[best].index);
        out.scores.push(working[best].score);
        working.swap(start, best);
        let kept_box = bboxes[working[start].index];
        start += 1;

        for other in working[start..].iter_mut() {
            // Boxes already below the threshold are out of the running and
            // are not decayed further.
            if other.score < params.score_threshold {
                continue;
            }
            let overlap = iou(&bboxes[other.index], &kept_box);
            match params.method {
                SoftNmsMethod::Linear => {
                    if overlap > params.nms_threshold {
                        other.score *= 1.0 - overlap;
                    }
                }
                SoftNmsMethod::Gaussian => {
                    other.score *= (-(overlap * overlap) / params.sigma).exp();
                }
            }
        }
    }

    trace_event!("soft_nms_kept", count = out.indices.len());
    Ok(out)
}
