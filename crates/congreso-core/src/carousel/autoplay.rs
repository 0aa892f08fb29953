// ── Autoplay timer ──
//
// Repeating tick source for carousels. The callback runs on a spawned
// task; hosts usually forward it into their own event channel.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Shortest interval the timer runs at; shorter ones are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Handle to a running autoplay loop. Dropping it stops the loop.
pub struct AutoplayTimer {
    paused: watch::Sender<bool>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl AutoplayTimer {
    /// Start invoking `on_tick` every `interval`, first after one interval.
    pub fn start<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let interval = interval.max(MIN_INTERVAL);
        let cancel = CancellationToken::new();
        let (paused, mut paused_rx) = watch::channel(false);
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                if *paused_rx.borrow_and_update() {
                    tokio::select! {
                        () = token.cancelled() => break,
                        changed = paused_rx.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            // A resumed timer waits a full interval again.
                            ticker.reset();
                            continue;
                        }
                    }
                }

                tokio::select! {
                    () = token.cancelled() => break,
                    _ = ticker.tick() => {
                        trace!("autoplay tick");
                        on_tick();
                    }
                    changed = paused_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            paused,
            cancel,
            handle,
        }
    }

    pub fn pause(&self) {
        self.paused.send_replace(true);
    }

    pub fn resume(&self) {
        self.paused.send_replace(false);
    }

    pub fn is_paused(&self) -> bool {
        *self.paused.borrow()
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled() || self.handle.is_finished()
    }
}

impl Drop for AutoplayTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting(interval: Duration) -> (AutoplayTimer, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let timer = AutoplayTimer::start(interval, move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (timer, count)
    }

    async fn wait_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_every_interval() {
        let (_timer, count) = counting(Duration::from_secs(5));

        wait_ms(4_900).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        wait_ms(10_600).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_and_resume() {
        let (timer, count) = counting(Duration::from_secs(5));

        wait_ms(5_500).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        timer.pause();
        assert!(timer.is_paused());
        wait_ms(20_000).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        timer.resume();
        wait_ms(4_000).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        wait_ms(1_500).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_runs_at_the_floor() {
        let (timer, count) = counting(Duration::ZERO);

        wait_ms(10).await;
        assert!(!timer.is_stopped());
        assert!(count.load(Ordering::SeqCst) >= 5);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_and_drop_cancel_the_loop() {
        let (timer, count) = counting(Duration::from_secs(1));
        wait_ms(1_500).await;
        timer.stop();
        wait_ms(10_000).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(timer.is_stopped());

        let (timer, count) = counting(Duration::from_secs(1));
        drop(timer);
        wait_ms(10_000).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
