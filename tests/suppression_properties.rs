//! Randomized property tests shared across the suppression passes.

use boxnms::{
    nms_boxes, nms_boxes_batched, soft_nms_boxes, BBox, NmsParams, SoftNmsMethod, SoftNmsParams,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Clustered random boxes: a handful of anchor points with jittered
/// duplicates around each, mimicking detector output.
fn random_boxes(rng: &mut StdRng, clusters: usize, per_cluster: usize) -> (Vec<BBox>, Vec<f32>) {
    let mut boxes = Vec::with_capacity(clusters * per_cluster);
    let mut scores = Vec::with_capacity(clusters * per_cluster);
    for _ in 0..clusters {
        let cx = rng.random_range(0.0f32..500.0);
        let cy = rng.random_range(0.0f32..500.0);
        for _ in 0..per_cluster {
            let jx = rng.random_range(-4.0f32..4.0);
            let jy = rng.random_range(-4.0f32..4.0);
            let w = rng.random_range(20.0f32..40.0);
            let h = rng.random_range(20.0f32..40.0);
            boxes.push(BBox::new(cx + jx, cy + jy, w, h));
            scores.push(rng.random_range(0.0f32..1.0));
        }
    }
    (boxes, scores)
}

#[test]
fn kept_indices_are_valid_and_unique() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let (boxes, scores) = random_boxes(&mut rng, 8, 6);
        let kept = nms_boxes(
            &boxes,
            &scores,
            NmsParams {
                score_threshold: 0.2,
                nms_threshold: 0.5,
                ..NmsParams::default()
            },
        )
        .unwrap();

        let mut seen = vec![false; boxes.len()];
        for &idx in &kept {
            assert!(idx < boxes.len());
            assert!(!seen[idx], "index {idx} returned twice");
            seen[idx] = true;
        }
        let qualifying = scores.iter().filter(|&&s| s > 0.2).count();
        assert!(kept.len() <= qualifying);
    }
}

#[test]
fn top_k_is_never_exceeded() {
    let mut rng = StdRng::seed_from_u64(11);
    let (boxes, scores) = random_boxes(&mut rng, 10, 5);
    for top_k in [1usize, 3, 7, 20] {
        let kept = nms_boxes(
            &boxes,
            &scores,
            NmsParams {
                score_threshold: 0.1,
                nms_threshold: 0.5,
                top_k,
                ..NmsParams::default()
            },
        )
        .unwrap();
        assert!(kept.len() <= top_k);
    }
}

#[test]
fn second_pass_over_survivors_is_identity() {
    let mut rng = StdRng::seed_from_u64(23);
    let params = NmsParams {
        score_threshold: 0.2,
        nms_threshold: 0.4,
        ..NmsParams::default()
    };
    for _ in 0..10 {
        let (boxes, scores) = random_boxes(&mut rng, 6, 8);
        let kept = nms_boxes(&boxes, &scores, params).unwrap();

        let survivor_boxes: Vec<BBox> = kept.iter().map(|&i| boxes[i]).collect();
        let survivor_scores: Vec<f32> = kept.iter().map(|&i| scores[i]).collect();
        let again = nms_boxes(&survivor_boxes, &survivor_scores, params).unwrap();

        // Survivors are already mutually compatible and sorted by score, so
        // the second pass keeps every one of them in place.
        assert_eq!(again, (0..kept.len()).collect::<Vec<_>>());
    }
}

#[test]
fn raising_the_overlap_tolerance_never_keeps_fewer_boxes() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..10 {
        let (boxes, scores) = random_boxes(&mut rng, 8, 6);
        let mut previous = 0usize;
        for nms_threshold in [0.1f32, 0.3, 0.5, 0.7, 0.9] {
            let kept = nms_boxes(
                &boxes,
                &scores,
                NmsParams {
                    score_threshold: 0.2,
                    nms_threshold,
                    ..NmsParams::default()
                },
            )
            .unwrap();
            assert!(kept.len() >= previous);
            previous = kept.len();
        }
    }
}

#[test]
fn batched_pass_matches_independent_per_class_passes() {
    // With a constant threshold (eta = 1) the coordinate-offset trick must
    // give exactly the union of plain NMS run on each class alone.
    let mut rng = StdRng::seed_from_u64(43);
    let params = NmsParams {
        score_threshold: 0.2,
        nms_threshold: 0.4,
        ..NmsParams::default()
    };
    for _ in 0..10 {
        let (boxes, scores) = random_boxes(&mut rng, 8, 6);
        let classes: Vec<i32> = (0..boxes.len()).map(|i| (i % 3) as i32).collect();

        let mut batched = nms_boxes_batched(&boxes, &scores, &classes, params).unwrap();
        batched.sort_unstable();

        let mut merged = Vec::new();
        for class in 0..3i32 {
            let members: Vec<usize> = (0..boxes.len()).filter(|&i| classes[i] == class).collect();
            let class_boxes: Vec<BBox> = members.iter().map(|&i| boxes[i]).collect();
            let class_scores: Vec<f32> = members.iter().map(|&i| scores[i]).collect();
            for local in nms_boxes(&class_boxes, &class_scores, params).unwrap() {
                merged.push(members[local]);
            }
        }
        merged.sort_unstable();

        assert_eq!(batched, merged);
    }
}

#[test]
fn soft_nms_kept_scores_respect_the_threshold() {
    let mut rng = StdRng::seed_from_u64(59);
    for method in [SoftNmsMethod::Linear, SoftNmsMethod::Gaussian] {
        let (boxes, scores) = random_boxes(&mut rng, 8, 6);
        let out = soft_nms_boxes(
            &boxes,
            &scores,
            SoftNmsParams {
                score_threshold: 0.3,
                nms_threshold: 0.4,
                method,
                ..SoftNmsParams::default()
            },
        )
        .unwrap();

        let mut seen = vec![false; boxes.len()];
        assert_eq!(out.indices.len(), out.scores.len());
        for (&idx, &score) in out.indices.iter().zip(&out.scores) {
            assert!(idx < boxes.len());
            assert!(!seen[idx]);
            seen[idx] = true;
            assert!(score >= 0.3);
        }
    }
}
