//! Disambiguation of candidate matches
//!
//! The collector buffers the matcher's candidates for one scan and turns the
//! settled region into a gap-free, non-overlapping token sequence. Characters
//! no chosen word covers become fallback tokens: letter/digit runs coalesce,
//! anything else stands alone.
//!
//! Letter/digit runs are atomic. A dictionary word may contain a run or avoid
//! it, but a word that would cut a run in two is never chosen.

use std::sync::Arc;

use smallvec::{smallvec, SmallVec};

use crate::chars::{self, CharClass};
use crate::config::Mode;
use crate::dictionary::{Entry, WordType};
use crate::matcher::MatchCollector;
use crate::token::{Token, TokenType};

/// A dictionary hit awaiting disambiguation; positions are window-local
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Matched word
    pub word: Arc<str>,
    /// First covered position
    pub start: usize,
    /// One past the last covered position
    pub end: usize,
    /// Dictionary type of the word
    pub word_type: WordType,
}

#[derive(Debug, Clone, Copy)]
enum Piece {
    Word(usize),
    Run { start: usize, end: usize },
    Single(usize),
}

/// Candidate buffer plus the selected resolution policy
#[derive(Debug)]
pub struct Collector {
    mode: Mode,
    candidates: Vec<Candidate>,
}

impl MatchCollector for Collector {
    fn collect(&mut self, entry: &Entry, start: usize, end: usize) {
        self.candidates.push(Candidate {
            word: entry.word_arc(),
            start,
            end,
            word_type: entry.word_type(),
        });
    }
}

impl Collector {
    /// Create a collector resolving with `mode`
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            candidates: Vec::new(),
        }
    }

    /// The resolution policy
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Discard buffered candidates
    pub fn clear(&mut self) {
        self.candidates.clear();
    }

    /// Resolve `text[from..to]` into tokens with window-local offsets.
    ///
    /// Candidates that leave the region are ignored. The buffer is emptied
    /// either way, since the matcher rescans everything past `to`.
    pub fn finalize(&mut self, text: &[char], from: usize, to: usize) -> Vec<Token> {
        let mut candidates = std::mem::take(&mut self.candidates);
        let tokens = if from < to {
            self.resolve(&candidates, text, from, to)
        } else {
            Vec::new()
        };
        candidates.clear();
        self.candidates = candidates;
        tokens
    }

    fn resolve(&self, candidates: &[Candidate], text: &[char], from: usize, to: usize) -> Vec<Token> {
        // Matcher order is (start, end) ascending, so each list is shortest first.
        let mut by_start: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); to - from];
        for (index, candidate) in candidates.iter().enumerate() {
            if candidate.start >= from
                && candidate.end <= to
                && !splits_run(text, from, to, candidate.start)
                && !splits_run(text, from, to, candidate.end)
            {
                by_start[candidate.start - from].push(index);
            }
        }

        let mut tokens = Vec::new();
        for piece in longest_first(candidates, &by_start, text, from, to) {
            match piece {
                Piece::Word(index) => match self.mode {
                    Mode::MaxWordLength => tokens.push(word_token(&candidates[index])),
                    Mode::MostWords => {
                        for part in finest_tiling(candidates, &by_start, from, index) {
                            tokens.push(word_token(&candidates[part]));
                        }
                    }
                },
                Piece::Run { start, end } => tokens.push(run_token(text, start, end)),
                Piece::Single(position) => tokens.push(single_token(text[position], position)),
            }
        }
        tokens
    }
}

/// Whether a boundary at `at` would fall strictly inside a letter/digit run
fn splits_run(text: &[char], from: usize, to: usize, at: usize) -> bool {
    at > from
        && at < to
        && CharClass::of(text[at - 1]).is_alphanumeric()
        && CharClass::of(text[at]).is_alphanumeric()
}

/// Leftmost-longest cover of `[from, to)`
fn longest_first(
    candidates: &[Candidate],
    by_start: &[SmallVec<[usize; 4]>],
    text: &[char],
    from: usize,
    to: usize,
) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut position = from;

    while position < to {
        if let Some(&index) = by_start[position - from].last() {
            pieces.push(Piece::Word(index));
            position = candidates[index].end;
        } else if CharClass::of(text[position]).is_alphanumeric() {
            let end = chars::run_end(text, position, to);
            pieces.push(Piece::Run {
                start: position,
                end,
            });
            position = end;
        } else {
            pieces.push(Piece::Single(position));
            position += 1;
        }
    }
    pieces
}

/// Split one chosen word into the most dictionary words that tile it exactly.
///
/// Ties go to the shorter word at the leftmost differing position.
fn finest_tiling(
    candidates: &[Candidate],
    by_start: &[SmallVec<[usize; 4]>],
    from: usize,
    word: usize,
) -> SmallVec<[usize; 4]> {
    let start = candidates[word].start;
    let end = candidates[word].end;
    let width = end - start;

    // best[i]: (word count, first word) of the finest tiling of [start + i, end)
    let mut best: SmallVec<[Option<(usize, usize)>; 16]> = smallvec![None; width + 1];
    best[width] = Some((0, word));

    for offset in (0..width).rev() {
        for &index in &by_start[start + offset - from] {
            let part_end = candidates[index].end;
            if part_end > end {
                break;
            }
            if let Some((count, _)) = best[part_end - start] {
                let improves = best[offset].map_or(true, |(current, _)| count + 1 > current);
                if improves {
                    best[offset] = Some((count + 1, index));
                }
            }
        }
    }

    let mut parts = SmallVec::new();
    let mut offset = 0;
    while offset < width {
        match best[offset] {
            Some((_, index)) => {
                parts.push(index);
                offset = candidates[index].end - start;
            }
            None => return smallvec![word],
        }
    }
    parts
}

fn word_token(candidate: &Candidate) -> Token {
    Token::new(
        candidate.word.as_ref(),
        candidate.start,
        candidate.end,
        TokenType::from(candidate.word_type),
    )
}

fn run_token(text: &[char], start: usize, end: usize) -> Token {
    let run = &text[start..end];
    let letters = run
        .iter()
        .filter(|&&ch| CharClass::of(ch) == CharClass::Letter)
        .count();
    let token_type = if letters == run.len() {
        TokenType::Letter
    } else if letters == 0 {
        TokenType::Numeral
    } else {
        TokenType::Alphanumeric
    };
    Token::new(run.iter().collect::<String>(), start, end, token_type)
}

fn single_token(ch: char, position: usize) -> Token {
    let token_type = match CharClass::of(ch) {
        CharClass::Whitespace => TokenType::Whitespace,
        CharClass::Punctuation => TokenType::Punctuation,
        _ => TokenType::Character,
    };
    Token::new(ch.to_string(), position, position + 1, token_type)
}
