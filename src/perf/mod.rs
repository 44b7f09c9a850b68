/// Performance measurement utilities
/// Frame stages are timed and reported through the log facade, since
/// stdout belongs to the game screen
use std::time::{Duration, Instant};

pub struct PerfTimer {
    name: &'static str,
    start: Instant,
    report: bool,
}

impl PerfTimer {
    /// Timer that logs its elapsed time at trace level when dropped
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
            report: true,
        }
    }

    /// Timer that only measures
    #[inline]
    pub fn silent() -> Self {
        Self {
            name: "",
            start: Instant::now(),
            report: false,
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        if self.report {
            log::trace!("[PERF] {}: {}μs", self.name, self.elapsed().as_micros());
        }
    }
}

/// Running totals over rendered frames
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    pub frames: u64,
    pub rays_cast: u64,
    pub rays_hit: u64,
    pub cast_time: Duration,
    pub frame_time: Duration,
    pub last_frame: Duration,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cast(&mut self, rays: usize, hits: usize, elapsed: Duration) {
        self.rays_cast += rays as u64;
        self.rays_hit += hits as u64;
        self.cast_time += elapsed;
    }

    pub fn record_frame(&mut self, elapsed: Duration) {
        self.frames += 1;
        self.frame_time += elapsed;
        self.last_frame = elapsed;
    }

    pub fn average_frame_time(&self) -> Option<Duration> {
        u32::try_from(self.frames)
            .ok()
            .filter(|&frames| frames > 0)
            .map(|frames| self.frame_time / frames)
    }

    pub fn rays_per_second(&self) -> f64 {
        let secs = self.cast_time.as_secs_f64();
        if secs > 0.0 {
            self.rays_cast as f64 / secs
        } else {
            0.0
        }
    }

    pub fn log_summary(&self) {
        log::info!("========== FRAME SUMMARY ==========");
        log::info!("Frames:          {:12}", self.frames);
        log::info!("Rays cast:       {:12}", self.rays_cast);
        log::info!(
            "Hit ratio:       {:11.1}%",
            if self.rays_cast > 0 {
                self.rays_hit as f64 / self.rays_cast as f64 * 100.0
            } else {
                0.0
            }
        );
        if let Some(average) = self.average_frame_time() {
            log::info!("Avg frame:       {:10.2}ms", average.as_secs_f64() * 1000.0);
        }
        log::info!("Rays/second:     {:12.0}", self.rays_per_second());
        log::info!("===================================");
    }
}

/// Time the rest of the enclosing scope
#[macro_export]
macro_rules! perf_scope {
    ($name:expr) => {
        let _timer = $crate::perf::PerfTimer::new($name);
    };
}
