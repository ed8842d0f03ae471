use std::{
    thread::sleep,
    time::{Duration, Instant},
};

/// Keeps the driver loop from printing generations faster than `max_fps`.
pub struct GenerationPacer {
    target_frametime: Duration,
    frame_timer: Instant,
    frametime_smoothed: f64,
}

impl GenerationPacer {
    /// `max_fps == 0` disables the limit.
    pub fn new(max_fps: f64) -> Self {
        let target_frametime = if max_fps > 0. {
            Duration::from_secs_f64(1. / max_fps)
        } else {
            Duration::ZERO
        };
        Self {
            target_frametime,
            frame_timer: Instant::now(),
            frametime_smoothed: 0.,
        }
    }

    /// Smoothed number of generations per second, `0` before the first
    /// [`GenerationPacer::delay`].
    pub fn fps(&self) -> f64 {
        if self.frametime_smoothed > 0. {
            1. / self.frametime_smoothed
        } else {
            0.
        }
    }

    pub fn target_frametime(&self) -> Duration {
        self.target_frametime
    }

    /// Sleeps for the rest of the current frame.
    pub fn delay(&mut self) {
        let before_wait = self.frame_timer.elapsed();

        if self.target_frametime > before_wait {
            sleep(self.target_frametime - before_wait);
        }

        let after_wait = self.frame_timer.elapsed();
        let frametime = after_wait.as_secs_f64();
        self.frametime_smoothed += (frametime - self.frametime_smoothed) * 0.1;

        self.frame_timer = Instant::now();
    }
}
