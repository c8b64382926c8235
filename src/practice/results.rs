// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scored results for auto-advance sessions.

use std::fmt;

use crate::music::Note;

/// Outcome of one timed note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Pass when the last detected note matches the target
    pub fn judge(detected: Option<Note>, target: Note) -> Self {
        if detected == Some(target) {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::Fail => write!(f, "fail"),
        }
    }
}

/// One row of the results log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    /// 1-based phrase (or problem) number
    pub phrase_number: usize,
    /// First note of the phrase or triple
    pub base_note: Note,
    pub target_note: Note,
    pub detected_note: Option<Note>,
    pub verdict: Verdict,
}

impl fmt::Display for ResultEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detected = self
            .detected_note
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{:>3}  {:<2} {:<2} {:<2} {}",
            self.phrase_number, self.base_note, self.target_note, detected, self.verdict
        )
    }
}

/// Ordered, in-memory log of scored notes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsLog {
    entries: Vec<ResultEntry>,
}

impl ResultsLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ResultEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ResultEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ResultEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pass_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.verdict == Verdict::Pass)
            .count()
    }

    pub fn fail_count(&self) -> usize {
        self.len() - self.pass_count()
    }

    /// Fraction of passes, `None` before anything is scored
    pub fn accuracy(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.pass_count() as f64 / self.len() as f64)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(detected: Option<Note>, target: Note) -> ResultEntry {
        ResultEntry {
            phrase_number: 1,
            base_note: Note::C,
            target_note: target,
            detected_note: detected,
            verdict: Verdict::judge(detected, target),
        }
    }

    #[test]
    fn test_verdict_judge() {
        assert_eq!(Verdict::judge(Some(Note::Cs), Note::Cs), Verdict::Pass);
        assert_eq!(Verdict::judge(Some(Note::D), Note::Cs), Verdict::Fail);
        assert_eq!(Verdict::judge(None, Note::Cs), Verdict::Fail);
    }

    #[test]
    fn test_results_log_counts() {
        let mut log = ResultsLog::new();
        assert_eq!(log.accuracy(), None);

        log.push(entry(Some(Note::Cs), Note::Cs));
        log.push(entry(Some(Note::D), Note::Cs));
        log.push(entry(None, Note::C));
        log.push(entry(Some(Note::C), Note::C));

        assert_eq!(log.len(), 4);
        assert_eq!(log.pass_count(), 2);
        assert_eq!(log.fail_count(), 2);
        assert_eq!(log.accuracy(), Some(0.5));
        assert_eq!(log.last().map(|e| e.verdict), Some(Verdict::Pass));

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_entry_display() {
        let row = entry(Some(Note::D), Note::Cs);
        assert_eq!(row.to_string(), "  1  C  C# D  fail");
        let row = entry(None, Note::Cs);
        assert_eq!(row.to_string(), "  1  C  C# -  fail");
    }
}
