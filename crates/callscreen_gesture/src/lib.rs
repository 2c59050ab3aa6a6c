//! Callscreen Answer Surfaces
//!
//! Layout metrics for the five answer styles and the controller that decides
//! when an interaction commits.
//!
//! The controller is pure: it consumes [`callscreen_core::Event`]s and frame
//! ticks and returns ordered [`Effect`]s (haptics, then the intent). The host
//! session forwards them to its [`CallActions`] and [`HapticFeedback`].
//!
//! ```
//! use callscreen_core::{Event, Target};
//! use callscreen_gesture::{Capabilities, CommitController, ControllerConfig, Effect, Intent};
//! use callscreen_theme::{AnswerStyle, AnswerStyleType};
//!
//! let style = AnswerStyle { kind: AnswerStyleType::Ios, ..AnswerStyle::default() };
//! let mut controller =
//!     CommitController::new(&style, ControllerConfig::default(), Capabilities::default());
//!
//! controller.handle(&Event::pointer_down(Target::SliderThumb));
//! controller.handle(&Event::pointer_up(Target::SliderThumb, 180.0, 0.0));
//!
//! // Nothing is emitted until the thumb reaches the far rail
//! assert!(controller.tick(100.0).is_empty());
//! let effects = controller.tick(100.0);
//! assert_eq!(effects.last(), Some(&Effect::Emit(Intent::Answer)));
//! ```

pub mod actions;
pub mod controller;
pub mod layout;
pub mod style;

pub use actions::{
    CallActions, Capabilities, Effect, Effects, HapticFeedback, HapticKind, Intent, NoHaptics,
};
pub use controller::{CommitController, ControllerConfig, ControllerState};
pub use layout::{button_metrics, corner_radius, Affordance, AnswerLayout, ColorRole, SliderMetrics};
pub use style::LayoutStyle;
