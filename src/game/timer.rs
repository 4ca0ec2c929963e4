use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// A cancellable repeating timer. Each tick posts a copy of the message to
/// the given channel; starting again replaces any timer still running.
#[derive(Debug, Default)]
pub struct Countdown {
    handle: Option<JoinHandle<()>>,
}

impl Countdown {
    pub fn new() -> Countdown {
        Countdown { handle: None }
    }

    pub fn start<M: Clone + Send + 'static>(
        &mut self,
        ticks: u32,
        period: Duration,
        sender: UnboundedSender<M>,
        message: M,
    ) {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            for _ in 0..ticks {
                sleep(period).await;
                if sender.send(message.clone()).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[tokio::test]
    async fn emits_the_requested_number_of_ticks() {
        let (tx, mut rx) = unbounded_channel();
        let mut countdown = Countdown::new();
        countdown.start(3, Duration::from_millis(5), tx, ());

        let mut ticks = 0;
        while rx.recv().await.is_some() {
            ticks += 1;
        }
        assert_eq!(ticks, 3);
    }

    #[tokio::test]
    async fn restarting_replaces_the_previous_timer() {
        let (tx, mut rx) = unbounded_channel();
        let mut countdown = Countdown::new();
        countdown.start(10, Duration::from_millis(50), tx.clone(), "slow");
        countdown.start(2, Duration::from_millis(5), tx, "fast");

        sleep(Duration::from_millis(100)).await;
        let mut seen = Vec::new();
        while let Ok(message) = rx.try_recv() {
            seen.push(message);
        }
        assert_eq!(seen, vec!["fast", "fast"]);
    }

    #[tokio::test]
    async fn cancel_stops_pending_ticks() {
        let (tx, mut rx) = unbounded_channel();
        let mut countdown = Countdown::new();
        countdown.start(5, Duration::from_millis(20), tx, ());
        countdown.cancel();
        assert!(!countdown.is_running());

        sleep(Duration::from_millis(60)).await;
        assert!(rx.try_recv().is_err());
    }
}
