use crate::flow::Cue;
use std::io::{self, Write};

const BELL: &str = "\x07";

/// Terminal-bell stand-in for sound effects. Off unless the user turns it on.
#[derive(Debug, Default, Clone, Copy)]
pub struct SoundManager {
    pub enabled: bool,
}

impl SoundManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    fn bells(cue: Cue) -> usize {
        match cue {
            Cue::Correct { .. } | Cue::Incorrect { .. } => 1,
            Cue::Complete => 2,
            // clicks would ring on every key press
            Cue::Click | Cue::None => 0,
        }
    }

    pub fn play_to(&self, cue: Cue, out: &mut impl Write) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let count = Self::bells(cue);
        if count == 0 {
            return Ok(());
        }
        out.write_all(BELL.repeat(count).as_bytes())?;
        out.flush()
    }

    pub fn play(&self, cue: Cue) {
        let _ = self.play_to(cue, &mut io::stdout());
    }
}
