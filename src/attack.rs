//! Ciphertext-only attacks built on the frequency statistics in `dist`.

use std::fmt;
use rayon::prelude::*;
use crate::alphabet::{self,Segmented,SIZE};
use crate::config::Config;
use crate::crypto::affine::{self,AffineKey};
use crate::crypto::substitution::{self,SubstitutionKey};
use crate::crypto::vigenere::{self,KeySchedule,VigenereKey};
use crate::dist::{self,Counts,Percentages,known::{ENGLISH,ENGLISH_BY_RANK}};
use crate::error::{Error,Maybe};
use crate::keylen::{self,Decision};
use crate::utils::{columns,columns_at,FirstBest};

pub const PROBABILISTIC_NOTE: &str =
    "Statistical estimate: results are probabilistic and degrade as the \
     ciphertext gets shorter or the key length approaches the text length.";

/// Correlation of a column, rotated back by `shift`, with English:
/// `sum over letters of count[letter] * english[letter - shift]`.
pub fn mutual_index(counts: &Counts, shift: u8) -> f64 {
    (0..SIZE as u8)
    .map(|l| counts.get(l) as f64 * ENGLISH.rotated(l, SIZE as u8 - shift % SIZE as u8).0)
    .sum()
}

/// The most English-looking shift for one column. Ties go to the
/// smallest shift.
pub fn best_shift(column: &[u8]) -> (u8,f64) {
    let counts = dist::count_frequencies(column);
    (0..SIZE as u8)
    .map(|s| (s, mutual_index(&counts, s)))
    .first_max_by_score(|&(_,score)| score)
    .unwrap_or((0,0.0))
}

fn key_from_columns(columns: Vec<Vec<u8>>) -> Maybe<VigenereKey> {
    let shifts: Vec<u8> =
        columns
        .par_iter()
        .map(|column| best_shift(column).0)
        .collect();
    VigenereKey::from_shifts(shifts)
}

fn check_recoverable(letters: &[u8], key_length: usize) -> Maybe<()> {
    if key_length == 0 {
        return Err(Error::InvalidParameter("key length must be positive"));
    }
    if letters.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(())
}

pub fn recover_vigenere_key(letters: &[u8], key_length: usize) -> Maybe<VigenereKey> {
    check_recoverable(letters, key_length)?;
    key_from_columns(columns(letters, key_length))
}

/// Key recovery where letter `i` was enciphered at key position
/// `positions[i]`.
pub fn recover_vigenere_key_at(letters: &[u8], positions: &[usize], key_length: usize)
    -> Maybe<VigenereKey> {
    check_recoverable(letters, key_length)?;
    if positions.len() != letters.len() {
        return Err(Error::InvalidParameter("one key position per letter is required"));
    }
    key_from_columns(columns_at(letters, positions, key_length))
}

#[derive(Debug,Clone,PartialEq)]
pub struct CaesarBreak {
    pub shift: u8,
    pub plaintext: String,
}

pub fn break_caesar(ct: &str) -> Maybe<CaesarBreak> {
    let letters = alphabet::normalize(ct);
    if letters.is_empty() {
        return Err(Error::EmptyInput);
    }
    let (shift,score) = best_shift(&letters);
    debug!("Caesar: shift {} (score {:.2})", shift, score);
    Ok(CaesarBreak { shift, plaintext: crate::crypto::caesar::decrypt(ct, i64::from(shift)) })
}

#[derive(Debug,Clone,PartialEq)]
pub struct AffineBreak {
    pub key: AffineKey,
    pub plaintext: String,
}

//Correlation of a candidate plaintext with English
fn english_score(letters: &[u8]) -> f64 {
    let counts = dist::count_frequencies(letters);
    (0..SIZE as u8).map(|l| counts.get(l) as f64 * ENGLISH.get(l).0).sum()
}

pub fn break_affine(ct: &str) -> Maybe<AffineBreak> {
    let letters = alphabet::normalize(ct);
    if letters.is_empty() {
        return Err(Error::EmptyInput);
    }
    let scored: Vec<(AffineKey,f64)> =
        AffineKey::all()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|key| (key, english_score(&affine::decrypt_letters(&letters, &key))))
        .collect();
    let (key,score) =
        scored
        .into_iter()
        .first_max_by_score(|&(_,score)| score)
        .ok_or(Error::EmptyInput)?;
    debug!("Affine: key {} (score {:.2})", key, score);
    Ok(AffineBreak { key, plaintext: affine::decrypt(ct, &key) })
}

#[derive(Debug,Clone,PartialEq)]
pub struct SubstitutionBreak {
    //plain -> cipher, covering only the letters seen in the ciphertext
    pub key: SubstitutionKey,
    pub plaintext: String,
    pub frequencies: Percentages,
}

/// First-order frequency attack: the i-th most common ciphertext letter
/// is taken to stand for the i-th most common English letter. Expect to
/// refine the result by hand on anything shorter than a few hundred letters.
pub fn attack_substitution(ct: &str) -> Maybe<SubstitutionBreak> {
    let counts = dist::count_frequencies(&alphabet::normalize(ct));
    let frequencies = dist::percentages(&counts)?;
    let observed = counts.iter().filter(|&(_,c)| c > 0).count();
    let ranked = dist::rank_by_frequency(&counts);
    let key = SubstitutionKey::from_pairs(
        ENGLISH_BY_RANK
        .iter()
        .cloned()
        .zip(ranked)
        .take(observed)
    )?;
    trace!("Substitution guess: {}", key);
    Ok(SubstitutionBreak {
        plaintext: substitution::decrypt(ct, &key),
        key,
        frequencies,
    })
}

#[derive(Debug,Clone,PartialEq)]
pub struct Diagnostics {
    pub frequencies: Percentages,
    pub index_of_coincidence: f64,
    //carries the Kasiski report
    pub decision: Decision,
    pub note: &'static str,
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Letter frequencies (%):\n{}", self.frequencies)?;
        writeln!(f, "Index of coincidence: {:.4}", self.index_of_coincidence)?;
        writeln!(f, "{}", self.decision.kasiski)?;
        writeln!(f, "{}", self.decision)?;
        write!(f, "{}", self.note)
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct VigenereBreak {
    pub key: VigenereKey,
    pub plaintext: String,
    pub diagnostics: Diagnostics,
}

pub fn break_vigenere(ct: &str, config: &Config) -> Maybe<VigenereBreak> {
    let segmented = Segmented::split(ct);
    let letters = &segmented.letters;
    let positions = config.schedule.key_positions(&segmented);
    let frequencies = dist::percentages(&dist::count_frequencies(letters))?;
    let index_of_coincidence = dist::index_of_coincidence(letters)?;
    let decision = keylen::decide_at(letters, &positions, config)?;

    let key =
        recover_vigenere_key_at(letters, &positions, decision.chosen.length)?
        .minimal_period();
    info!("Vigenere: key {} of length {}", key, key.len());

    let plaintext = match config.schedule {
        KeySchedule::PerLetter =>
            segmented.restore(&vigenere::decrypt_letters(letters, &key))?,
        KeySchedule::PerCharacter =>
            vigenere::decrypt(ct, &key, KeySchedule::PerCharacter),
    };

    Ok(VigenereBreak {
        key,
        plaintext,
        diagnostics: Diagnostics {
            frequencies,
            index_of_coincidence,
            decision,
            note: PROBABILISTIC_NOTE,
        },
    })
}
