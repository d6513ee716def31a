//! Inertial drag-scroll engine for the timeline strip
//!
//! Turns discrete wheel and pointer input into frame-synchronised
//! horizontal motion with momentum, friction decay, edge bounce and eased
//! programmatic navigation.
//!
//! # Layout
//!
//! ## Atoms
//! - `timing` - progress, easing and interpolation
//! - `config` - tuning (re-exported from chronicle-core) plus validation
//! - `input` - wheel impulses and drag sampling
//! - `physics` - per-tick integration and the boundary policy
//! - `animation` - eased tween towards a target
//!
//! ## Contracts
//! - `host` - the scrolled surface, the global pointer surface and events
//! - `scheduler` - frame requests with cancellable handles
//!
//! ## Engine
//! - `engine` - [`InertialScroller`], combining the atoms over one state
//!
//! # Usage
//!
//! ```ignore
//! use chronicle_tui::scroll::{FrameQueue, InertialScroller, InputEvent, Surface};
//!
//! let mut scroller = InertialScroller::new(&config, pointer, FrameQueue::new());
//! scroller.attach(Some(strip));
//!
//! // Forward input as it arrives
//! scroller.handle_event(Surface::Host, &InputEvent::Wheel { delta_x: 0.0, delta_y: 3.0 });
//!
//! // Once per display frame
//! scroller.run_frame(elapsed_ms);
//! ```

pub mod config;
pub mod input;
pub mod physics;
pub mod timing;

pub mod animation;
pub mod host;
pub mod scheduler;

pub mod engine;

pub use animation::{ScrollTween, TweenFrame};
pub use config::{ScrollConfigExt, SmoothScrollConfig};
pub use engine::InertialScroller;
pub use host::{
    Bounded, Disposition, EventKind, EventTarget, InputEvent, ListenerId, ListenerMode,
    ListenerRegistry, PointerSurface, Rect, ScrollHost, Surface,
};
pub use input::{DragSample, DragSession};
pub use physics::{BoundaryPolicy, Edge, ScrollState, TickOutcome};
pub use scheduler::{FrameHandle, FrameQueue, FrameScheduler};
