use std::time::{Duration, Instant};

use crate::passage::Passage;
use crate::scoring::{self, Score};

pub const DEFAULT_DURATION_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// Final numbers of a finished session
#[derive(Debug, Clone, PartialEq)]
pub struct Results {
    pub wpm: f64,
    pub accuracy: u8,
    pub correct_words: usize,
    pub mistakes: usize,
    pub total_typed: usize,
    pub elapsed: Duration,
}

/// One typing attempt.
///
/// Every mutation takes the current instant from the caller, and the
/// countdown is always derived from `now - started_at` rather than
/// decremented, so late or skipped ticks never make it drift.
#[derive(Debug, Clone)]
pub struct Session {
    duration: Duration,
    phase: Phase,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    remaining_secs: u64,
    input: String,
    score: Score,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_DURATION_SECS))
    }
}

impl Session {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            phase: Phase::Idle,
            started_at: None,
            ended_at: None,
            remaining_secs: ceil_secs(duration),
            input: String::new(),
            score: Score::compute(&[], ""),
        }
    }

    /// Idle -> Running. Returns false if the session was not idle.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }

        self.phase = Phase::Running;
        self.started_at = Some(now);
        self.remaining_secs = ceil_secs(self.duration);
        true
    }

    /// Any key press starts an idle session.
    pub fn press_key(&mut self, now: Instant) -> bool {
        self.start(now)
    }

    /// Replace the whole input and rescore it. Returns true if this call
    /// started the session.
    pub fn set_input(&mut self, value: String, passage: &Passage, now: Instant) -> bool {
        if self.phase == Phase::Finished {
            return false;
        }

        let started = !value.is_empty() && self.start(now);

        self.score = Score::compute(passage.words(), &value);
        self.input = value;
        started
    }

    pub fn type_char(&mut self, c: char, passage: &Passage, now: Instant) -> bool {
        let mut value = self.input.clone();
        value.push(c);
        self.set_input(value, passage, now)
    }

    pub fn backspace(&mut self, passage: &Passage, now: Instant) -> bool {
        let mut value = self.input.clone();
        if value.pop().is_none() {
            return false;
        }
        self.set_input(value, passage, now)
    }

    /// Recompute the countdown. Returns true only on the tick that finishes
    /// the session; ticks outside Running do nothing.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(started_at) = self.started_at else {
            return false;
        };
        if self.phase != Phase::Running {
            return false;
        }

        let elapsed = now.saturating_duration_since(started_at);
        let remaining = self.duration.saturating_sub(elapsed);
        self.remaining_secs = self.remaining_secs.min(ceil_secs(remaining));

        if remaining.is_zero() {
            return self.finish(now);
        }

        false
    }

    /// Running -> Finished. Returns false if the session was not running.
    pub fn finish(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        self.phase = Phase::Finished;
        self.ended_at = Some(now);
        self.remaining_secs = 0;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.duration);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn has_started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn has_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<Instant> {
        self.ended_at
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn mistakes(&self) -> usize {
        self.score.mistakes
    }

    pub fn total_typed(&self) -> usize {
        self.score.total_typed
    }

    pub fn accuracy(&self) -> u8 {
        self.score.accuracy
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started_at) => self
                .ended_at
                .unwrap_or(now)
                .saturating_duration_since(started_at),
            None => Duration::ZERO,
        }
    }

    pub fn results(&self) -> Option<Results> {
        let ended_at = self.ended_at?;
        let elapsed = self.elapsed(ended_at);

        Some(Results {
            wpm: scoring::wpm(self.score.correct_words, elapsed.as_secs_f64()),
            accuracy: self.score.accuracy,
            correct_words: self.score.correct_words,
            mistakes: self.score.mistakes,
            total_typed: self.score.total_typed,
            elapsed,
        })
    }
}

fn ceil_secs(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}
