//! Domain layer - Core vocabulary and pure orchestration logic.

pub mod foundation;
pub mod orchestration;
