use crate::game::scoring::points_earned;
use crate::models::difficulty::Difficulty;
use crate::models::puzzle::Puzzle;

/// Where a session currently stands. `Resolved` keeps the outcome of the
/// last answer so the client can show feedback before moving on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Active,
    Resolved(Resolution),
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Correct { earned: i64 },
    Incorrect,
    TimedOut,
}

#[derive(Clone, Debug)]
pub enum Event {
    DifficultySelected(Difficulty),
    PuzzleLoaded(Puzzle),
    PuzzleLoadFailed,
    RetryRequested,
    AnswerSubmitted(i64),
    TimerTick,
    AdvanceDue,
    Quit,
    Reset,
}

/// Side effects requested by a transition. The session itself never does
/// IO; the runner carries these out.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadPuzzle,
    StartTimer(u32),
    CancelTimer,
    ScheduleAdvance,
    ReportScore(SessionSummary),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionSummary {
    pub difficulty: Difficulty,
    pub score: i64,
    pub puzzles_solved: u32,
    pub time_remaining: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionView {
    pub phase: Phase,
    pub difficulty: Option<Difficulty>,
    pub question: Option<String>,
    pub score: i64,
    pub lifelines: u32,
    pub time_remaining: u32,
    pub puzzles_solved: u32,
    pub fetch_failed: bool,
}

#[derive(Clone, Debug)]
pub struct GameSession {
    phase: Phase,
    difficulty: Option<Difficulty>,
    puzzle: Option<Puzzle>,
    score: i64,
    lifelines: u32,
    time_remaining: u32,
    puzzles_solved: u32,
    fetch_failed: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession::new()
    }
}

impl GameSession {
    pub fn new() -> GameSession {
        GameSession {
            phase: Phase::Idle,
            difficulty: None,
            puzzle: None,
            score: 0,
            lifelines: 0,
            time_remaining: 0,
            puzzles_solved: 0,
            fetch_failed: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Feed one event through the machine. Events that make no sense in the
    /// current phase (stale ticks, late fetch results) are dropped.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match (self.phase, event) {
            (Phase::Idle, Event::DifficultySelected(difficulty)) => {
                self.difficulty = Some(difficulty);
                self.score = 0;
                self.lifelines = difficulty.lifelines();
                self.time_remaining = 0;
                self.puzzles_solved = 0;
                self.begin_loading()
            }
            (Phase::Loading, Event::PuzzleLoaded(puzzle)) => {
                let budget = self
                    .difficulty
                    .map(|difficulty| difficulty.time_budget())
                    .unwrap_or_default();
                self.puzzle = Some(puzzle);
                self.time_remaining = budget;
                self.phase = Phase::Active;
                vec![Effect::StartTimer(budget)]
            }
            (Phase::Loading, Event::PuzzleLoadFailed) => {
                self.fetch_failed = true;
                vec![]
            }
            (Phase::Loading, Event::RetryRequested) if self.fetch_failed => self.begin_loading(),
            (Phase::Active, Event::AnswerSubmitted(answer)) => {
                let solved = self
                    .puzzle
                    .as_ref()
                    .is_some_and(|puzzle| puzzle.solution == answer);
                if solved {
                    let earned = self
                        .difficulty
                        .map(|difficulty| points_earned(difficulty, self.time_remaining))
                        .unwrap_or_default();
                    self.score += earned;
                    self.puzzles_solved += 1;
                    self.phase = Phase::Resolved(Resolution::Correct { earned });
                    vec![Effect::CancelTimer, Effect::ScheduleAdvance]
                } else {
                    self.resolve_miss(Resolution::Incorrect)
                }
            }
            (Phase::Active, Event::TimerTick) => {
                self.time_remaining = self.time_remaining.saturating_sub(1);
                if self.time_remaining == 0 {
                    self.resolve_miss(Resolution::TimedOut)
                } else {
                    vec![]
                }
            }
            (Phase::Resolved(Resolution::Correct { .. }), Event::AdvanceDue) => {
                self.begin_loading()
            }
            (
                Phase::Resolved(Resolution::Incorrect) | Phase::Resolved(Resolution::TimedOut),
                Event::RetryRequested,
            ) => self.begin_loading(),
            (Phase::Active | Phase::Loading | Phase::Resolved(_), Event::Quit) => {
                self.end_session()
            }
            (Phase::Ended, Event::Reset) => {
                *self = GameSession::new();
                vec![]
            }
            _ => vec![],
        }
    }

    fn begin_loading(&mut self) -> Vec<Effect> {
        self.phase = Phase::Loading;
        self.puzzle = None;
        self.fetch_failed = false;
        vec![Effect::LoadPuzzle]
    }

    fn resolve_miss(&mut self, outcome: Resolution) -> Vec<Effect> {
        self.lifelines = self.lifelines.saturating_sub(1);
        if self.lifelines == 0 {
            self.end_session()
        } else {
            self.phase = Phase::Resolved(outcome);
            vec![Effect::CancelTimer]
        }
    }

    fn end_session(&mut self) -> Vec<Effect> {
        self.phase = Phase::Ended;
        let mut effects = vec![Effect::CancelTimer];
        // A session that never scored leaves no trace on the leaderboard.
        if self.score > 0 {
            if let Some(difficulty) = self.difficulty {
                effects.push(Effect::ReportScore(SessionSummary {
                    difficulty,
                    score: self.score,
                    puzzles_solved: self.puzzles_solved,
                    time_remaining: self.time_remaining,
                }));
            }
        }
        effects
    }

    /// Snapshot for clients. The solution stays server-side, only the
    /// question URL is exposed.
    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase,
            difficulty: self.difficulty,
            question: self
                .puzzle
                .as_ref()
                .map(|puzzle| puzzle.question.clone()),
            score: self.score,
            lifelines: self.lifelines,
            time_remaining: self.time_remaining,
            puzzles_solved: self.puzzles_solved,
            fetch_failed: self.fetch_failed,
        }
    }
}
