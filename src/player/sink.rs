/// Display surfaces the simulator pushes to.
///
/// Every method defaults to a no-op, so a sink only implements the surfaces
/// it actually has. `()` is the sink with no surfaces at all.
pub trait RenderSink {
    /// Title of the current track.
    fn title(&mut self, _title: &str) {}
    /// Artist of the current track.
    fn artist(&mut self, _artist: &str) {}
    /// Progress through the current track, clamped to `0.0..=100.0`.
    fn progress(&mut self, _percent: f64) {}
    /// Playing/paused indicator. Called again even when unchanged.
    fn playing(&mut self, _playing: bool) {}
}

impl RenderSink for () {}
