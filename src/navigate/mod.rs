//! Directional navigation: candidate scoring and the engine.
//!
//! [`score`] holds the pure geometry — which candidates qualify for a
//! direction and how they rank — and [`engine`] ties the registries, pause
//! flag, input mode, and accelerator together behind [`Navigator`](engine::Navigator).

pub mod engine;
pub mod score;
