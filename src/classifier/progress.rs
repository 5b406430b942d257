//! Progress reporting across concurrent training tasks.
//!
//! The orchestrator trains two sub-classifiers in parallel; each gets an
//! independent [`ProgressChannel`] contributing a fixed share of the overall
//! progress. The combined value is monotonically non-decreasing and reaches
//! exactly 1.0 once every channel has completed, including channels whose
//! task short-circuits immediately.

use std::sync::Arc;

use parking_lot::Mutex;

struct ChannelState {
    weight: f64,
    fraction: f64,
}

struct ProgressInner {
    callback: Box<dyn Fn(f64) + Send + Sync>,
    // The total is recomputed from the per-channel fractions on every
    // report rather than accumulated from deltas, so a fully completed set
    // of channels lands on the exact sum of their weights.
    channels: Mutex<Vec<ChannelState>>,
    emitted: Mutex<f64>,
}

impl ProgressInner {
    fn report(&self, slot: usize, fraction: f64) {
        let fraction = fraction.clamp(0.0, 1.0);
        let total = {
            let mut channels = self.channels.lock();
            let state = &mut channels[slot];
            // Regressions are ignored to keep the combined value monotonic.
            if fraction <= state.fraction {
                return;
            }
            state.fraction = fraction;
            channels
                .iter()
                .map(|state| state.weight * state.fraction)
                .sum::<f64>()
                .min(1.0)
        };

        let mut emitted = self.emitted.lock();
        if total <= *emitted {
            return;
        }
        *emitted = total;
        (self.callback)(total);
    }
}

/// Aggregates progress from several channels into one callback.
pub struct Progress {
    inner: Arc<ProgressInner>,
}

impl Progress {
    /// Create a new aggregate reporter wrapping `callback`.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        Progress {
            inner: Arc::new(ProgressInner {
                callback: Box::new(callback),
                channels: Mutex::new(Vec::new()),
                emitted: Mutex::new(0.0),
            }),
        }
    }

    /// Create a child channel contributing `weight` of the total.
    ///
    /// Weights across all channels should sum to 1.
    pub fn channel(&self, weight: f64) -> ProgressChannel {
        let slot = {
            let mut channels = self.inner.channels.lock();
            channels.push(ChannelState {
                weight,
                fraction: 0.0,
            });
            channels.len() - 1
        };
        ProgressChannel {
            inner: Arc::clone(&self.inner),
            slot,
        }
    }
}

/// One task's view of the aggregate progress.
pub struct ProgressChannel {
    inner: Arc<ProgressInner>,
    slot: usize,
}

impl ProgressChannel {
    /// Report this task's own progress as a fraction in `[0, 1]`.
    pub fn report(&self, fraction: f64) {
        self.inner.report(self.slot, fraction);
    }

    /// Report this task as complete.
    pub fn complete(&self) {
        self.report(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex as PMutex;

    fn recording() -> (Arc<PMutex<Vec<f64>>>, Progress) {
        let seen = Arc::new(PMutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let progress = Progress::new(move |p| sink.lock().push(p));
        (seen, progress)
    }

    #[test]
    fn test_two_channels_reach_one() {
        let (seen, progress) = recording();
        let a = progress.channel(0.5);
        let b = progress.channel(0.5);

        a.report(0.5);
        b.report(0.5);
        a.complete();
        b.complete();

        let seen = seen.lock();
        assert_eq!(*seen.last().unwrap(), 1.0);
        for window in seen.windows(2) {
            assert!(window[1] >= window[0], "progress must be monotonic");
        }
    }

    #[test]
    fn test_uneven_epoch_fractions_still_end_at_one() {
        let (seen, progress) = recording();
        let a = progress.channel(0.5);
        let b = progress.channel(0.5);

        let epochs = 150;
        for epoch in 0..epochs {
            a.report((epoch + 1) as f64 / epochs as f64);
        }
        b.complete();

        assert_eq!(*seen.lock().last().unwrap(), 1.0);
    }

    #[test]
    fn test_short_circuit_channel_still_completes() {
        let (seen, progress) = recording();
        let slow = progress.channel(0.5);
        let skipped = progress.channel(0.5);

        skipped.complete();
        slow.report(1.0);

        assert_eq!(*seen.lock().last().unwrap(), 1.0);
    }

    #[test]
    fn test_regressions_are_ignored() {
        let (seen, progress) = recording();
        let channel = progress.channel(1.0);

        channel.report(0.8);
        channel.report(0.3);
        channel.report(0.8);

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], 0.8);
    }

    #[test]
    fn test_repeated_complete_is_idempotent() {
        let (seen, progress) = recording();
        let channel = progress.channel(1.0);
        channel.complete();
        channel.complete();
        assert_eq!(seen.lock().as_slice(), &[1.0]);
    }
}
