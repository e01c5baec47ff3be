use std::time::Duration;

/// One entry of the playback catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub artist: String,
    pub duration: Duration,
}

impl Track {
    pub fn new(name: impl Into<String>, artist: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            duration,
        }
    }
}
