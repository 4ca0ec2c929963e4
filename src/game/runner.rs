use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tracing::warn;

use crate::game::session::{Effect, Event, GameSession, SessionSummary, SessionView};
use crate::game::timer::Countdown;
use crate::models::difficulty::Difficulty;
use crate::models::puzzle::Puzzle;
use crate::services::puzzle_service::PuzzleSource;

#[derive(Clone, Copy, Debug)]
pub struct RunnerConfig {
    pub tick_period: Duration,
    pub advance_delay: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            tick_period: Duration::from_secs(1),
            advance_delay: Duration::from_millis(1500),
        }
    }
}

/// What a connected player is allowed to do to their session.
#[derive(Clone, Debug)]
pub enum PlayerAction {
    SelectDifficulty(Difficulty),
    SubmitAnswer(i64),
    Retry,
    Quit,
    Reset,
}

#[derive(Clone, Debug)]
enum RunnerMsg {
    PuzzleReady(Puzzle),
    PuzzleFailed,
    Tick,
    AdvanceDue,
}

/// Client-side grip on a running session: actions go in, state snapshots
/// come out on the watch channel. Final scores arrive on `summaries`.
pub struct SessionHandle {
    actions: UnboundedSender<PlayerAction>,
    pub views: watch::Receiver<SessionView>,
    pub summaries: UnboundedReceiver<SessionSummary>,
}

impl SessionHandle {
    /// Returns false once the runner has shut down.
    pub fn dispatch(&self, action: PlayerAction) -> bool {
        self.actions.send(action).is_ok()
    }

    pub fn select_difficulty(&self, difficulty: Difficulty) -> bool {
        self.dispatch(PlayerAction::SelectDifficulty(difficulty))
    }

    /// Answer inputs arrive as free text. Non-numeric input is rejected
    /// here and never reaches the session, so it costs no lifeline.
    pub fn submit_answer(&self, input: &str) -> bool {
        match input.trim().parse::<i64>() {
            Ok(answer) => self.dispatch(PlayerAction::SubmitAnswer(answer)),
            Err(_) => false,
        }
    }

    pub fn retry(&self) -> bool {
        self.dispatch(PlayerAction::Retry)
    }

    pub fn quit(&self) -> bool {
        self.dispatch(PlayerAction::Quit)
    }

    pub fn reset(&self) -> bool {
        self.dispatch(PlayerAction::Reset)
    }

    pub fn snapshot(&self) -> SessionView {
        self.views.borrow().clone()
    }
}

struct SessionRunner<S> {
    session: GameSession,
    source: Arc<S>,
    config: RunnerConfig,
    countdown: Countdown,
    advance: Countdown,
    internal_tx: UnboundedSender<RunnerMsg>,
    views: watch::Sender<SessionView>,
    summaries: UnboundedSender<SessionSummary>,
}

/// Drive one game session on its own task. The runner owns the state
/// machine and everything around it (puzzle fetches, the clock); it stops
/// when the handle is dropped.
pub fn spawn_session<S>(source: Arc<S>, config: RunnerConfig) -> SessionHandle
where
    S: PuzzleSource + Send + Sync + 'static,
{
    let (action_tx, mut action_rx) = unbounded_channel();
    let (internal_tx, mut internal_rx) = unbounded_channel();
    let (summary_tx, summary_rx) = unbounded_channel();

    let session = GameSession::new();
    let (view_tx, view_rx) = watch::channel(session.view());

    let mut runner = SessionRunner {
        session,
        source,
        config,
        countdown: Countdown::new(),
        advance: Countdown::new(),
        internal_tx,
        views: view_tx,
        summaries: summary_tx,
    };

    tokio::spawn(async move {
        loop {
            tokio::select! {
                action = action_rx.recv() => match action {
                    Some(action) => runner.step(action_event(action)),
                    None => break,
                },
                // The runner keeps its own sender, so this arm never closes.
                Some(message) = internal_rx.recv() => {
                    runner.step(internal_event(message));
                }
            }
        }
    });

    SessionHandle {
        actions: action_tx,
        views: view_rx,
        summaries: summary_rx,
    }
}

fn action_event(action: PlayerAction) -> Event {
    match action {
        PlayerAction::SelectDifficulty(difficulty) => Event::DifficultySelected(difficulty),
        PlayerAction::SubmitAnswer(answer) => Event::AnswerSubmitted(answer),
        PlayerAction::Retry => Event::RetryRequested,
        PlayerAction::Quit => Event::Quit,
        PlayerAction::Reset => Event::Reset,
    }
}

fn internal_event(message: RunnerMsg) -> Event {
    match message {
        RunnerMsg::PuzzleReady(puzzle) => Event::PuzzleLoaded(puzzle),
        RunnerMsg::PuzzleFailed => Event::PuzzleLoadFailed,
        RunnerMsg::Tick => Event::TimerTick,
        RunnerMsg::AdvanceDue => Event::AdvanceDue,
    }
}

impl<S> SessionRunner<S>
where
    S: PuzzleSource + Send + Sync + 'static,
{
    fn step(&mut self, event: Event) {
        for effect in self.session.apply(event) {
            self.perform(effect);
        }
        let _ = self.views.send(self.session.view());
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::LoadPuzzle => {
                let source = Arc::clone(&self.source);
                let feedback = self.internal_tx.clone();
                tokio::spawn(async move {
                    let message = match source.fetch_puzzle().await {
                        Ok(puzzle) => RunnerMsg::PuzzleReady(puzzle),
                        Err(err) => {
                            warn!("puzzle fetch failed: {err}");
                            RunnerMsg::PuzzleFailed
                        }
                    };
                    let _ = feedback.send(message);
                });
            }
            Effect::StartTimer(seconds) => {
                self.countdown.start(
                    seconds,
                    self.config.tick_period,
                    self.internal_tx.clone(),
                    RunnerMsg::Tick,
                );
            }
            Effect::CancelTimer => self.countdown.cancel(),
            Effect::ScheduleAdvance => {
                self.advance.start(
                    1,
                    self.config.advance_delay,
                    self.internal_tx.clone(),
                    RunnerMsg::AdvanceDue,
                );
            }
            Effect::ReportScore(summary) => {
                let _ = self.summaries.send(summary);
            }
        }
    }
}
