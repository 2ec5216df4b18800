use std::time::{Duration, Instant};

pub struct Timeline {
    start_time: Instant,
    previous_frame_time: Instant,
    previous_frame_duration: Duration,
}

impl Timeline {
    pub fn new() -> Timeline {
        let now = Instant::now();
        Timeline {
            start_time: now,
            previous_frame_time: now,
            previous_frame_duration: Duration::from_secs(0),
        }
    }

    /// Notify the timeline that we've ended the current frame and are
    /// proceeding to the next. Returns the duration of the finished frame
    /// in fractional seconds.
    pub fn next_frame(&mut self) -> f32 {
        let now = Instant::now();
        self.previous_frame_duration = now.duration_since(self.previous_frame_time);
        self.previous_frame_time = now;
        self.previous_frame_seconds()
    }

    /// Duration of the last frame in fractional seconds.
    pub fn previous_frame_seconds(&self) -> f32 {
        as_seconds(self.previous_frame_duration)
    }

    /// Time since the timeline was created, in fractional seconds.
    pub fn total_seconds(&self) -> f32 {
        as_seconds(Instant::now().duration_since(self.start_time))
    }
}

fn as_seconds(duration: Duration) -> f32 {
    duration.as_secs() as f32 + (f64::from(duration.subsec_nanos()) * 1e-9) as f32
}
