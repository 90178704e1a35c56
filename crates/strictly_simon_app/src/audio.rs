//! Audio cues for pad presses and wrong answers.

use std::io::Write;

use serde::{Deserialize, Serialize};
use strictly_simon::Cue;
use tracing::{debug, warn};

/// Plays audio cues. Failures are logged, never propagated.
pub trait CuePlayer {
    /// Plays `cue` without blocking game flow.
    fn play(&self, cue: Cue);
}

/// Rings the terminal bell for every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl CuePlayer for TerminalBell {
    fn play(&self, cue: Cue) {
        debug!(%cue, "Ringing terminal bell");
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            warn!(error = %e, %cue, "Failed to ring terminal bell");
        }
    }
}

/// Logs cues without making a sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCues;

impl CuePlayer for SilentCues {
    fn play(&self, cue: Cue) {
        debug!(%cue, "Cue (silent)");
    }
}

/// Which cue player the app uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AudioMode {
    /// Terminal bell.
    #[default]
    Bell,
    /// No sound.
    Silent,
}

impl AudioMode {
    /// Builds the cue player for this mode.
    pub fn player(self) -> Box<dyn CuePlayer + Send + Sync> {
        match self {
            AudioMode::Bell => Box::new(TerminalBell),
            AudioMode::Silent => Box::new(SilentCues),
        }
    }
}

impl<P: CuePlayer + ?Sized> CuePlayer for Box<P> {
    fn play(&self, cue: Cue) {
        (**self).play(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_mode_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            audio: AudioMode,
        }
        let parsed: Wrapper = toml::from_str("audio = \"silent\"").expect("valid toml");
        assert_eq!(parsed.audio, AudioMode::Silent);
        assert_eq!(AudioMode::default().to_string(), "bell");
    }
}
