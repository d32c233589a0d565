use std::time::Duration;

pub const SIM_FPS: u32 = 60;
pub const DT: f32 = 1.0 / SIM_FPS as f32;
const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);

/// Most updates run for one host frame; the rest of a long stall is dropped.
pub const MAX_SUBSTEPS: u32 = 8;

/// Fixed-rate update accumulator.
///
/// The host feeds it real elapsed time; it answers how many fixed `dt`
/// updates to run before the next draw.
#[derive(Debug, Default)]
pub struct FixedStep {
    accum: Duration,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of one update, in seconds.
    #[inline]
    pub fn dt(&self) -> f32 {
        DT
    }

    /// Add `elapsed` and return the number of whole updates now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accum += elapsed;
        let mut tics = 0;
        while self.accum >= TIC {
            self.accum -= TIC;
            tics += 1;
            if tics == MAX_SUBSTEPS {
                self.accum = Duration::ZERO;
                break;
            }
        }
        tics
    }
}
