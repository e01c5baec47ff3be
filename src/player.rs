//! Simulated playback for the "now playing" widget.
//!
//! Nothing here touches audio. `PlaybackSimulator` advances a fake position
//! through a fixed catalog on a recurring tick and pushes what changed to a
//! `RenderSink`.

mod simulator;
mod sink;
mod timing;
mod track;

pub use simulator::*;
pub use sink::RenderSink;
pub use timing::*;
pub use track::Track;
