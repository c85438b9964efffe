//! Key-length estimation for polyalphabetic ciphertext.
//!
//! `estimate` takes the split whose columns look most like English (average
//! IC closest to `ENGLISH_IC`); `decide` adds Kasiski examination and
//! prefers the shortest English-like split. Both are statistical and get
//! unreliable as the columns shrink towards one or two letters.

use std::fmt;
use itertools::Itertools;
use rayon::prelude::*;
use crate::config::Config;
use crate::dist::{average_ic_for_key_length,average_ic_at,known::ENGLISH_IC};
use crate::error::{Error,Maybe};
use crate::kasiski;
use crate::utils::FirstBest;

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct KeyLengthCandidate {
    pub length: usize,
    pub average_ic: f64,
    //distance from English IC, lower is better
    pub score: f64,
}

impl fmt::Display for KeyLengthCandidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:>3}: average IC {:.4}, score {:.4}", self.length, self.average_ic, self.score)
    }
}

fn candidate(length: usize, average_ic: f64) -> KeyLengthCandidate {
    KeyLengthCandidate {
        length,
        average_ic,
        score: (average_ic - ENGLISH_IC).abs(),
    }
}

pub fn key_len_score(letters: &[u8], length: usize) -> Maybe<KeyLengthCandidate> {
    Ok(candidate(length, average_ic_for_key_length(letters, length)?))
}

pub fn key_len_score_at(letters: &[u8], positions: &[usize], length: usize) -> Maybe<KeyLengthCandidate> {
    Ok(candidate(length, average_ic_at(letters, positions, length)?))
}

fn scan_with<F>(n: usize, max: usize, score: F) -> Maybe<Vec<KeyLengthCandidate>>
where F: Fn(usize) -> Maybe<KeyLengthCandidate> + Sync + Send {
    if max == 0 {
        return Err(Error::InvalidParameter("maximum key length must be positive"));
    }
    if n < 2 {
        return Err(Error::InsufficientData { needed: 2, found: n });
    }
    (1..=max)
    .into_par_iter()
    .map(score)
    .collect()
}

/// Scores every length in `1..=max`. The result is in ascending length
/// order no matter how the work was scheduled.
pub fn scan(letters: &[u8], max: usize) -> Maybe<Vec<KeyLengthCandidate>> {
    scan_with(letters.len(), max, |length| key_len_score(letters, length))
}

pub fn scan_at(letters: &[u8], positions: &[usize], max: usize) -> Maybe<Vec<KeyLengthCandidate>> {
    scan_with(letters.len(), max, |length| key_len_score_at(letters, positions, length))
}

fn first_best(candidates: &[KeyLengthCandidate]) -> Maybe<KeyLengthCandidate> {
    candidates
    .iter()
    .cloned()
    .first_min_by_score(|c| c.score)
    .ok_or(Error::InvalidParameter("no key length candidates"))
}

pub fn estimate(letters: &[u8], max: usize) -> Maybe<KeyLengthCandidate> {
    first_best(&scan(letters, max)?)
}

#[derive(Debug,Clone,PartialEq)]
pub struct Decision {
    pub chosen: KeyLengthCandidate,
    //plain minimum-score candidate, what `estimate` would return
    pub best: KeyLengthCandidate,
    pub kasiski: kasiski::Report,
    pub candidates: Vec<KeyLengthCandidate>,
}

//Ascending candidates; see `decide`
fn choose(candidates: &[KeyLengthCandidate], hint: Option<usize>, margin: f64) -> Option<KeyLengthCandidate> {
    let english: Vec<KeyLengthCandidate> =
        candidates
        .iter()
        .cloned()
        .filter(|c| c.average_ic >= ENGLISH_IC - margin)
        .collect();
    if english.is_empty() {
        return candidates.iter().cloned().first_max_by_score(|c| c.average_ic);
    }
    hint
    .and_then(|h| english.iter().cloned().find(|c| h % c.length == 0))
    .or_else(|| english.first().cloned())
}

/// Combines IC scoring with Kasiski examination.
///
/// Every multiple of the real period splits the text into English-like
/// columns, while a length sharing only part of the period mixes
/// alphabets and pulls the average IC down. So a length counts as
/// English-like when its average IC is within `config.ic_margin` of
/// `ENGLISH_IC`, and the shortest such length that divides the Kasiski
/// period hint is chosen, or failing that the shortest English-like
/// length. If no length qualifies, the highest average IC wins.
pub fn decide(letters: &[u8], config: &Config) -> Maybe<Decision> {
    let positions: Vec<usize> = (0..letters.len()).collect();
    decide_at(letters, &positions, config)
}

/// `decide` for letters whose key positions are given explicitly.
pub fn decide_at(letters: &[u8], positions: &[usize], config: &Config) -> Maybe<Decision> {
    let candidates = scan_at(letters, positions, config.max_key_length)?;
    let kasiski = kasiski::examine_at(letters, positions, config)?;
    let hint = kasiski.period_hint(config.max_key_length);
    let best = first_best(&candidates)?;
    let chosen = choose(&candidates, hint, config.ic_margin).unwrap_or(best);

    debug!("Key length: best {} (score {:.4}), chosen {} (average IC {:.4}), kasiski gcd {:?}, hint {:?}",
        best.length, best.score, chosen.length, chosen.average_ic, kasiski.gcd, hint);

    Ok(Decision { chosen, best, kasiski, candidates })
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Key length {} chosen (lowest score at {})", self.chosen.length, self.best.length)?;
        write!(f, "{}", self.candidates.iter().format("\n"))
    }
}
