use std::fmt;

/// Session clock, advanced by the 1-second schedule rather than by wall
/// time, so a paused or stopped loop stops the clock with it.
pub struct GameClock {
    minutes: u32,
    seconds: u8,
}

impl GameClock {
    pub fn new() -> Self {
        GameClock { minutes: 0, seconds: 0 }
    }

    pub fn reset(&mut self) {
        self.minutes = 0;
        self.seconds = 0;
    }

    pub fn tick(&mut self) {
        if self.seconds == 59 {
            self.minutes += 1;
            self.seconds = 0;
        } else {
            self.seconds += 1;
        }
    }
}

impl fmt::Display for GameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}
