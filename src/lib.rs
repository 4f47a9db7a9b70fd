//! BoxNMS is a CPU-first non-maximum suppression library for object detection.
//!
//! This crate provides the classic greedy NMS pass with an adaptive overlap
//! threshold, a class-aware batched variant, and Soft-NMS with linear or
//! Gaussian score decay. All entry points are pure functions over
//! caller-owned slices; optional instrumentation is available via the
//! `tracing` feature.

pub mod geometry;
pub mod suppress;
pub mod util;

mod trace;

pub use geometry::{iou, BBox};
pub use suppress::greedy::{nms_boxes, nms_boxes_batched, nms_boxes_limited, NmsParams};
pub use suppress::soft::{soft_nms_boxes, SoftNmsMethod, SoftNmsParams, SoftNmsResult};
pub use util::{BoxNmsError, BoxNmsResult};
