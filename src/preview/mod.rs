//! Live preview of generated components.
//!
//! The pieces, bottom-up:
//! - [`transform`]: ordered text passes around transpilation
//! - [`ComponentRuntime`]: the boundary behind which untrusted code runs
//! - [`attempt_render`]: one pass of the render pipeline against a runtime
//! - [`RenderSurface`] and [`PreviewHost`]: both ends of the readiness
//!   handshake, as timer-free state machines
//! - [`PreviewLink`]: a single ordered channel driving a host/surface pair

pub mod config;
pub mod host;
pub mod link;
pub mod message;
pub mod pipeline;
pub mod runtime;
pub mod surface;
pub mod transform;

pub use config::{PreviewConfig, ResendSchedule, RetryPolicy};
pub use host::{HostTimer, PreviewHost};
pub use link::{Clock, Delivery, Direction, PreviewLink, SystemClock, VirtualClock};
pub use message::{PreviewMessage, SurfaceId};
pub use pipeline::{Attempt, attempt_render};
pub use runtime::{ComponentRuntime, Dependencies, RuntimeError, SlotValue};
pub use surface::{Effect, RenderSurface, SurfaceState, SurfaceTimer};
