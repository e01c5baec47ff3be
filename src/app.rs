//! Application module: the state the runtime drives and the UI draws.
//!
//! `App` lives in `app::model` and bundles the pretend player, the generated
//! scene and the wall clock text, plus the timers that keep them moving.

mod model;

pub use model::*;
