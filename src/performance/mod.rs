//! # Frame Timing
//!
//! [`FrameClock`] measures the time between frames for the per-frame
//! updates and keeps a rolling window of frame times for FPS reporting.
//!
//! ## Usage
//!
//! ```no_run
//! use scenecore::performance::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! loop {
//!     let delta_time = clock.tick();
//!     // ... update camera and motion with delta_time ...
//!     # break;
//! }
//! log::info!("{:.1} fps", clock.metrics().fps);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frame time statistics over the current window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
    /// Frames per second derived from the average frame time
    pub fps: f32,
    /// Average frame time in milliseconds
    pub frame_time_ms: f32,
    pub min_frame_time_ms: f32,
    pub max_frame_time_ms: f32,
    /// Frames recorded since creation or the last reset
    pub frame_count: u64,
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: 0.0,
            max_frame_time_ms: 0.0,
            frame_count: 0,
        }
    }
}

/// Measures delta time between frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Ring buffer of recent frame times
    frame_times: VecDeque<Duration>,
    max_samples: usize,
    last_frame: Option<Instant>,
    /// Simulated time, the sum of all recorded frame times
    elapsed: Duration,
    metrics: FrameMetrics,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Keeps about two seconds of history at 60 fps
    pub fn new() -> Self {
        Self::with_window(120)
    }

    pub fn with_window(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            last_frame: None,
            elapsed: Duration::ZERO,
            metrics: FrameMetrics::default(),
        }
    }

    /// Marks the start of a frame and returns the seconds since the previous
    /// one. The first call returns `0.0`.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let frame_time = match self.last_frame.replace(now) {
            Some(previous) => now.duration_since(previous),
            None => return 0.0,
        };
        self.record(frame_time);
        frame_time.as_secs_f32()
    }

    /// Records a frame of known length, for fixed-step loops
    pub fn record(&mut self, frame_time: Duration) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);
        self.elapsed += frame_time;
        self.metrics.frame_count += 1;
        self.update_metrics();
    }

    fn update_metrics(&mut self) {
        let total: Duration = self.frame_times.iter().sum();
        let average_ms = total.as_secs_f32() * 1000.0 / self.frame_times.len() as f32;

        self.metrics.frame_time_ms = average_ms;
        self.metrics.fps = if average_ms > 0.0 {
            1000.0 / average_ms
        } else {
            0.0
        };

        if let (Some(min_time), Some(max_time)) =
            (self.frame_times.iter().min(), self.frame_times.iter().max())
        {
            self.metrics.min_frame_time_ms = min_time.as_secs_f32() * 1000.0;
            self.metrics.max_frame_time_ms = max_time.as_secs_f32() * 1000.0;
        }
    }

    /// Seconds of recorded frame time, the clock the debouncer runs on
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn metrics(&self) -> &FrameMetrics {
        &self.metrics
    }

    /// Frame times in milliseconds, oldest first
    pub fn frame_time_history(&self) -> Vec<f32> {
        self.frame_times
            .iter()
            .map(|duration| duration.as_secs_f32() * 1000.0)
            .collect()
    }

    pub fn reset(&mut self) {
        self.frame_times.clear();
        self.last_frame = None;
        self.elapsed = Duration::ZERO;
        self.metrics = FrameMetrics::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.metrics().frame_count, 0);
        assert!(clock.tick() >= 0.0);
        assert_eq!(clock.metrics().frame_count, 1);
    }

    #[test]
    fn test_metrics_from_recorded_frames() {
        let mut clock = FrameClock::new();
        clock.record(Duration::from_millis(10));
        clock.record(Duration::from_millis(30));

        let metrics = clock.metrics();
        assert!((metrics.frame_time_ms - 20.0).abs() < 1e-3);
        assert!((metrics.fps - 50.0).abs() < 1e-2);
        assert!((metrics.min_frame_time_ms - 10.0).abs() < 1e-3);
        assert!((metrics.max_frame_time_ms - 30.0).abs() < 1e-3);
        assert!((clock.elapsed_secs() - 0.04).abs() < 1e-9);
    }

    #[test]
    fn test_window_drops_oldest_frames() {
        let mut clock = FrameClock::with_window(2);
        clock.record(Duration::from_millis(100));
        clock.record(Duration::from_millis(10));
        clock.record(Duration::from_millis(10));

        assert_eq!(clock.frame_time_history().len(), 2);
        assert!((clock.metrics().max_frame_time_ms - 10.0).abs() < 1e-3);
        assert_eq!(clock.metrics().frame_count, 3);
        // Elapsed time is not windowed
        assert!((clock.elapsed_secs() - 0.12).abs() < 1e-9);

        clock.reset();
        assert_eq!(clock.elapsed_secs(), 0.0);
        assert_eq!(*clock.metrics(), FrameMetrics::default());
    }
}
