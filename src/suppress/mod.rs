//! Suppression passes over scored candidate boxes.
//!
//! The greedy module implements hard NMS (standard and class-aware batched);
//! the soft module implements Soft-NMS with linear and Gaussian score decay.

pub mod greedy;
pub mod soft;

pub(crate) mod rank;
