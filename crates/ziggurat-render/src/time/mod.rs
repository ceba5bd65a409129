//! Time subsystem.
//!
//! Provides the animation clock behind the `time` value bound once per draw.
//! Intended usage:
//! - one `AnimClock` per clock domain (usually one per tile layer set)
//! - read `seconds()` when filling the per-draw uniforms

mod anim_clock;

pub use anim_clock::AnimClock;
