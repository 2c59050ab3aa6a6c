//! Callscreen Core
//!
//! Foundational primitives shared by the call screen engine:
//!
//! - **Colors**: RGBA colors parsed from the string forms stored in themes
//! - **Geometry**: Points used for gradient vectors and pointer positions
//! - **Input Events**: Pointer, tap and media events coming from the presentation layer
//! - **State Machines**: Flat statecharts driving the answer gesture
//!
//! # Example
//!
//! ```rust
//! use callscreen_core::fsm::{StateMachine, Transition};
//! use callscreen_core::events::event_types;
//!
//! const IDLE: u32 = 0;
//! const DRAGGING: u32 = 1;
//!
//! let mut fsm = StateMachine::new(
//!     IDLE,
//!     vec![
//!         Transition::new(IDLE, event_types::POINTER_DOWN, DRAGGING),
//!         Transition::new(DRAGGING, event_types::POINTER_UP, IDLE),
//!     ],
//! );
//!
//! fsm.send(event_types::POINTER_DOWN);
//! assert!(fsm.is_in(DRAGGING));
//! ```

pub mod color;
pub mod events;
pub mod fsm;
pub mod geometry;

pub use color::{Color, ColorParseError};
pub use events::{Event, EventData, EventType, Target};
pub use fsm::{EventId, StateId, StateMachine, StateMachineBuilder, Transition};
pub use geometry::Point;
