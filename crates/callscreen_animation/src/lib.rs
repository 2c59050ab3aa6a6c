//! Callscreen Animation System
//!
//! Spring physics, looped choreographies, and the answer-button animation
//! table.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Choreographies**: Data-driven step sequences (parallel tracks, delays)
//! - **Driver**: One running choreography at a time, reset to rest on every switch
//! - **Scheduler**: Ticks every on-screen driver from the host frame clock
//!
//! ```
//! use callscreen_animation::{AnimationDriver, AnimationKind};
//!
//! let mut driver = AnimationDriver::with_kind(AnimationKind::Pulse);
//! driver.tick(300.0);
//! assert!(driver.values().scale > 1.0);
//!
//! driver.set_kind(AnimationKind::Glow);
//! assert!(driver.values().is_at_rest());
//! ```

pub mod choreography;
pub mod driver;
pub mod easing;
pub mod motion;
pub mod presets;
pub mod scheduler;
pub mod spring;

pub use choreography::{Choreography, ChoreographyPlayer, Step, Track};
pub use driver::AnimationDriver;
pub use easing::Easing;
pub use motion::{Channel, ChannelSet, MotionValues};
pub use presets::{AnimationKind, BackgroundMotion, KindApplicability, Surface};
pub use scheduler::{DriverId, MotionScheduler};
pub use spring::{Spring, SpringConfig};
