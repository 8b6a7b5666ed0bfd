//! Dictionary matcher
//!
//! Walks the trie from every position past the window cursor and reports
//! every dictionary hit, not only the longest, to a [`MatchCollector`]. It
//! then decides how much of the window is settled.
//!
//! Both resolution policies refine the leftmost-longest cover of the text,
//! and each step of that cover depends only on what starts at the step's
//! position: the longest word that ends on a run boundary, or else the
//! letter/digit run or single character there. A position is open when more
//! input could still change that: its trie walk ran into the window edge on
//! a node with children, a hit ending at the edge finishes on a letter or
//! digit, or its letter/digit run touches the edge. The resolved cut is the
//! last step boundary reached before an open position.

use std::sync::Arc;

use crate::chars::{self, CharClass};
use crate::dictionary::{Dictionary, Entry};
use crate::window::Window;

/// Receives candidate matches as the matcher finds them
pub trait MatchCollector {
    /// A dictionary word covers window positions `[start, end)`
    fn collect(&mut self, entry: &Entry, start: usize, end: usize);
}

/// Outcome of one scan, in window-local positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Cursor the scan started from
    pub from: usize,
    /// `[from, resolved)` is settled and can be drained
    pub resolved: usize,
    /// Valid characters in the window during the scan
    pub valid: usize,
    /// The cut was imposed because the window filled up without one
    pub forced: bool,
}

impl Resolution {
    /// Characters that must be kept and rescanned after the next refill
    pub fn pending(&self) -> usize {
        self.valid - self.resolved
    }

    /// Whether the scan settled anything
    pub fn is_progress(&self) -> bool {
        self.resolved > self.from
    }
}

/// Leftmost-longest step from one position
#[derive(Debug, Clone, Copy)]
struct Step {
    /// Where the step ends if the window edge were the end of input
    end: usize,
    /// No further input can change `end`
    settled: bool,
}

/// Trie-driven scanner over a [`Window`]
#[derive(Debug)]
pub struct Matcher {
    dictionary: Arc<Dictionary>,
    /// Step from each scanned position, indexed from the cursor
    steps: Vec<Step>,
}

impl Matcher {
    /// Create a matcher over `dictionary`
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self {
            dictionary,
            steps: Vec::new(),
        }
    }

    /// The dictionary being matched
    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    /// Scan `window` from its cursor, reporting matches to `collector`
    pub fn scan<C: MatchCollector + ?Sized>(
        &mut self,
        window: &Window,
        collector: &mut C,
    ) -> Resolution {
        let text = window.chars();
        let len = text.len();
        let from = window.cursor();
        let open_ended = !window.is_final();
        let trie = self.dictionary.trie();

        self.steps.clear();
        for start in from..len {
            let mut step = Step {
                end: start + 1,
                settled: true,
            };

            let class = CharClass::of(text[start]);
            let run_start = class.is_alphanumeric()
                && (start == from || !CharClass::of(text[start - 1]).is_alphanumeric());
            if run_start {
                step.end = chars::run_end(text, start, len);
                if step.end == len && open_ended {
                    step.settled = false;
                }
            }

            let mut longest = None;
            let mut node = trie.root();
            let mut end = start;
            while end < len {
                match trie.step(node, text[end]) {
                    Some(next) => {
                        node = next;
                        end += 1;
                        if let Some(entry) = self.dictionary.entry_at(node) {
                            collector.collect(entry, start, end);
                            if end == len {
                                longest = Some(end);
                                if open_ended && CharClass::of(text[end - 1]).is_alphanumeric() {
                                    step.settled = false;
                                }
                            } else if !splits_run(text, end) {
                                longest = Some(end);
                            }
                        }
                    }
                    None => break,
                }
            }
            if end == len && open_ended && trie.has_children(node) {
                step.settled = false;
            }
            if let Some(word_end) = longest {
                step.end = word_end;
            }

            self.steps.push(step);
        }

        let mut resolved = from;
        while let Some(step) = self.steps.get(resolved - from) {
            if !step.settled {
                break;
            }
            resolved = step.end;
        }

        let mut forced = false;
        if resolved == from && open_ended && window.is_full() {
            if let Some(step) = self.steps.first() {
                resolved = step.end;
                forced = true;
                log::debug!(
                    "window of {} chars at offset {} has no settled cut; forcing one at {}",
                    window.capacity(),
                    window.offset(),
                    resolved
                );
            }
        }

        Resolution {
            from,
            resolved,
            valid: len,
            forced,
        }
    }
}

/// Whether a boundary at `at` would fall strictly inside a letter/digit run
fn splits_run(text: &[char], at: usize) -> bool {
    at > 0
        && at < text.len()
        && CharClass::of(text[at - 1]).is_alphanumeric()
        && CharClass::of(text[at]).is_alphanumeric()
}
