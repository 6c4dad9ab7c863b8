//! glowscenes — the catalogue of decorative overlay widgets
//!
//! Every widget is a [`glowcore::Scene`] plus a clock. [`catalogue`] maps
//! stable ids to window descriptors and builds a ready-to-run
//! [`glowcore::AnimationState`] for any of them.

pub mod catalogue;
pub mod motifs;
pub mod widgets;

pub use catalogue::{build, Descriptor, Variant, WindowSize};
