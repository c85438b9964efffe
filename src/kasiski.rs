//! Kasiski examination: repeated n-grams in a Vigenère ciphertext tend to
//! sit a multiple of the key length apart.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;
use counter::Counter;
use itertools::Itertools;
use crate::alphabet;
use crate::config::Config;
use crate::error::{Error,Maybe};
use crate::utils::gcd;

pub const DEFAULT_NGRAM_LEN: usize = 3;

#[derive(Debug,Clone,PartialEq,Eq)]
pub struct Repeat {
    pub ngram: String,
    pub positions: Vec<usize>,
}

impl Repeat {
    pub fn distances(&self) -> impl Iterator<Item=usize> + '_ {
        self.positions.windows(2).map(|w| w[1] - w[0])
    }
}

/// Start positions of every window of length `n`, overlapping windows
/// included.
pub fn find_repeats(letters: &[u8], n: usize) -> Maybe<BTreeMap<String,Vec<usize>>> {
    if n == 0 {
        return Err(Error::InvalidParameter("n-gram length must be positive"));
    }
    let mut positions: BTreeMap<String,Vec<usize>> = BTreeMap::new();
    for (i,window) in letters.windows(n).enumerate() {
        positions
        .entry(alphabet::to_text(window))
        .or_insert_with(Vec::new)
        .push(i);
    }
    Ok(positions)
}

/// The n-grams seen at least twice, ordered by first occurrence.
pub fn repeats(letters: &[u8], n: usize) -> Maybe<Vec<Repeat>> {
    Ok(
        find_repeats(letters, n)?
        .into_iter()
        .filter(|(_,positions)| positions.len() > 1)
        .map(|(ngram,positions)| Repeat { ngram, positions })
        .sorted_by_key(|r| r.positions[0])
        .collect()
    )
}

//Adjacent occurrences only, not every pair
pub fn distances(repeats: &[Repeat]) -> Vec<usize> {
    repeats.iter().flat_map(|r| r.distances()).collect()
}

pub fn fold_gcd(distances: &[usize]) -> Maybe<usize> {
    distances
    .iter()
    .cloned()
    .reduce(gcd)
    .ok_or(Error::NoRepeatsFound)
}

pub fn candidate_key_length(letters: &[u8], n: usize) -> Maybe<usize> {
    fold_gcd(&distances(&repeats(letters, n)?))
}

/// How many distances each factor in 2..=max divides, most common first.
pub fn factor_tally(distances: &[usize], max: usize) -> Vec<(usize,usize)> {
    let tally: Counter<usize> =
        distances
        .iter()
        .flat_map(|&d| (2..=d.min(max)).filter(move |f| d % f == 0))
        .collect();
    tally
    .iter()
    .map(|(&f,&c)| (f,c))
    .sorted_by(|(f1,c1),(f2,c2)| c2.cmp(c1).then(f1.cmp(f2)))
    .collect()
}

#[derive(Debug,Clone,PartialEq)]
pub struct Report {
    pub ngram_len: usize,
    pub scanned: usize,
    pub repeats: usize,
    pub distances: Vec<usize>,
    pub gcd: Option<usize>,
    pub factors: Vec<(usize,usize)>,
}

impl Report {
    /// The factor most over-represented among the distances, weighing each
    /// factor's count by the factor itself: a random distance is divisible
    /// by f one time in f. Ties go to the smaller factor.
    pub fn dominant_factor(&self) -> Option<usize> {
        self.factors
        .iter()
        .max_by_key(|&&(factor,count)| (factor * count, Reverse(factor)))
        .map(|&(factor,_)| factor)
    }

    /// The GCD when it is a usable key length, otherwise the dominant
    /// factor. Chance repeats in English often collapse the GCD to 1.
    pub fn period_hint(&self, max: usize) -> Option<usize> {
        match self.gcd {
            Some(g) if g >= 2 && g <= max => Some(g),
            _ => self.dominant_factor(),
        }
    }
}

pub fn examine(letters: &[u8], config: &Config) -> Maybe<Report> {
    let positions: Vec<usize> = (0..letters.len()).collect();
    examine_at(letters, &positions, config)
}

/// Like `examine`, with distances measured in key positions rather than
/// letter indices.
pub fn examine_at(letters: &[u8], positions: &[usize], config: &Config) -> Maybe<Report> {
    if positions.len() != letters.len() {
        return Err(Error::InvalidParameter("one key position per letter is required"));
    }
    let scanned = letters.len().min(config.scan_limit);
    if scanned < letters.len() {
        debug!("Kasiski scan truncated to {} of {} letters", scanned, letters.len());
    }
    let found: Vec<Repeat> =
        repeats(&letters[..scanned], config.ngram_len)?
        .into_iter()
        .map(|r| Repeat {
            positions: r.positions.iter().map(|&i| positions[i]).collect(),
            ngram: r.ngram,
        })
        .collect();
    let distances = distances(&found);
    let gcd = match fold_gcd(&distances) {
        Ok(g) => Some(g),
        Err(Error::NoRepeatsFound) => None,
        Err(e) => return Err(e),
    };
    trace!("Kasiski: {} repeated {}-grams, gcd {:?}", found.len(), config.ngram_len, gcd);
    Ok(Report {
        ngram_len: config.ngram_len,
        scanned,
        repeats: found.len(),
        factors: factor_tally(&distances, config.max_key_length),
        distances,
        gcd,
    })
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Kasiski ({}-grams over {} letters): {} repeats",
            self.ngram_len, self.scanned, self.repeats)?;
        writeln!(f, "  distances: [{}]", self.distances.iter().join(", "))?;
        match self.gcd {
            Some(g) => writeln!(f, "  gcd: {}", g)?,
            None => writeln!(f, "  gcd: none found")?,
        }
        write!(f, "  common factors: {}",
            self.factors.iter().take(5).map(|(factor,count)| format!("{} (x{})", factor, count)).join(", "))
    }
}
