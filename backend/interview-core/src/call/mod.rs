//! Interview call flow.
//!
//! [`CallMachine`] is the pure state machine; [`CallController`] runs it as
//! an actor next to the voice SDK, the session store and the camera, and
//! hands out [`CallHandle`]s for the UI side.

pub mod camera;
pub mod clock;
pub mod controller;
pub mod machine;
pub mod store;
pub mod transcript;
pub mod voice;

pub use camera::{Camera, MediaDevices, MediaStream};
pub use clock::{Stopwatch, format_countdown, format_hms};
pub use controller::{CallController, CallHandle};
pub use machine::{CallEffect, CallMachine};
pub use store::SessionStore;
pub use voice::VoiceClient;
