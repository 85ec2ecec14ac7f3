//! Delay counter and parked statement sequences.
//!
//! Every multi-statement execution (alias expansion, event hooks, `exec`)
//! shares one countdown. A sequence runs statements while the countdown is
//! zero; once a statement pushes it above zero, the rest of the sequence is
//! parked here and resumed from the host's tick once the countdown drains.
//! Top-level input is never held back by the countdown.

use std::collections::VecDeque;
use std::time::Duration;

/// Outcome of a delay request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DelayRequest {
    /// Zero, negative or NaN: nothing happened.
    Ignored,
    /// Added to the countdown as requested.
    Accepted(f64),
    /// Above the ceiling: the ceiling was added instead.
    Clamped { requested: f64, applied: f64 },
}

/// Remaining statements of a suspended sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSequence {
    pub statements: VecDeque<String>,
    /// Alias expansion depth the statements were produced at.
    pub depth: usize,
}

#[derive(Debug, Clone)]
pub struct Sequencer {
    remaining: f64,
    ceiling: f64,
    parked: VecDeque<PendingSequence>,
}

impl Sequencer {
    pub fn new(ceiling: f64) -> Self {
        Self {
            remaining: 0.0,
            ceiling,
            parked: VecDeque::new(),
        }
    }

    /// Add `seconds` to the countdown.
    ///
    /// Each request is clamped to the ceiling on its own; the accumulated
    /// total is not.
    pub fn request_delay(&mut self, seconds: f64) -> DelayRequest {
        if seconds.is_nan() || seconds <= 0.0 {
            return DelayRequest::Ignored;
        }
        if seconds > self.ceiling {
            self.remaining += self.ceiling;
            return DelayRequest::Clamped {
                requested: seconds,
                applied: self.ceiling,
            };
        }
        self.remaining += seconds;
        DelayRequest::Accepted(seconds)
    }

    /// Count down by the time elapsed since the last tick, stopping at zero.
    pub fn advance(&mut self, elapsed: Duration) {
        self.remaining = (self.remaining - elapsed.as_secs_f64()).max(0.0);
    }

    /// Seconds left before parked sequences may continue.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    pub fn is_waiting(&self) -> bool {
        self.remaining > 0.0
    }

    /// Suspend a sequence until the countdown drains.
    pub fn park(&mut self, sequence: PendingSequence) {
        log::debug!(
            "Parking {} statements ({:.2}s remaining)",
            sequence.statements.len(),
            self.remaining
        );
        self.parked.push_back(sequence);
    }

    /// The oldest parked sequence, if the countdown has drained.
    pub fn pop_ready(&mut self) -> Option<PendingSequence> {
        if self.is_waiting() {
            return None;
        }
        self.parked.pop_front()
    }

    /// Take every parked sequence out, leaving the queue empty.
    pub fn take_parked(&mut self) -> VecDeque<PendingSequence> {
        std::mem::take(&mut self.parked)
    }

    /// Put previously taken sequences back behind anything parked since.
    pub fn restore_parked(&mut self, rest: VecDeque<PendingSequence>) {
        self.parked.extend(rest);
    }

    pub fn parked_len(&self) -> usize {
        self.parked.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.parked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(statements: &[&str]) -> PendingSequence {
        PendingSequence {
            statements: statements.iter().map(|s| s.to_string()).collect(),
            depth: 0,
        }
    }

    #[test]
    fn non_positive_is_ignored() {
        let mut s = Sequencer::new(59.0);
        assert_eq!(s.request_delay(0.0), DelayRequest::Ignored);
        assert_eq!(s.request_delay(-3.0), DelayRequest::Ignored);
        assert_eq!(s.request_delay(f64::NAN), DelayRequest::Ignored);
        assert!(!s.is_waiting());
    }

    #[test]
    fn over_ceiling_is_clamped() {
        let mut s = Sequencer::new(59.0);
        assert_eq!(
            s.request_delay(70.0),
            DelayRequest::Clamped {
                requested: 70.0,
                applied: 59.0
            }
        );
        assert_eq!(s.remaining(), 59.0);
    }

    #[test]
    fn requests_accumulate_past_ceiling() {
        let mut s = Sequencer::new(59.0);
        assert_eq!(s.request_delay(30.0), DelayRequest::Accepted(30.0));
        assert_eq!(s.request_delay(30.0), DelayRequest::Accepted(30.0));
        assert_eq!(s.remaining(), 60.0);
    }

    #[test]
    fn advance_floors_at_zero() {
        let mut s = Sequencer::new(59.0);
        s.request_delay(1.0);
        s.advance(Duration::from_millis(400));
        assert!((s.remaining() - 0.6).abs() < 1e-9);
        s.advance(Duration::from_secs(5));
        assert_eq!(s.remaining(), 0.0);
        assert!(!s.is_waiting());
    }

    #[test]
    fn pop_ready_waits_for_countdown() {
        let mut s = Sequencer::new(59.0);
        s.request_delay(2.0);
        s.park(seq(&["print a"]));
        assert!(s.pop_ready().is_none());
        s.advance(Duration::from_secs(2));
        assert_eq!(s.pop_ready(), Some(seq(&["print a"])));
        assert!(!s.has_pending());
    }

    #[test]
    fn take_and_restore_keep_new_work_first() {
        let mut s = Sequencer::new(59.0);
        s.park(seq(&["old"]));
        let rest = s.take_parked();
        s.park(seq(&["new"]));
        s.restore_parked(rest);
        assert_eq!(s.parked_len(), 2);
        assert_eq!(s.pop_ready(), Some(seq(&["new"])));
        assert_eq!(s.pop_ready(), Some(seq(&["old"])));
    }
}
