//! The fixed A-Z alphabet. Every other module talks in indices 0..26,
//! and this is the only place that decides about case and which
//! characters count as letters.

use crate::error::{Error,Maybe};

pub const SIZE: usize = 26;

pub const LETTERS: [char; SIZE] = [
    'A','B','C','D','E','F','G','H','I','J','K','L','M',
    'N','O','P','Q','R','S','T','U','V','W','X','Y','Z'
];

pub fn index_of(letter: char) -> Maybe<u8> {
    let upper = letter.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Ok(upper as u8 - b'A')
    } else {
        Err(Error::InvalidSymbol(letter))
    }
}

pub fn symbol_at(index: usize) -> Maybe<char> {
    LETTERS
    .get(index)
    .cloned()
    .ok_or(Error::InvalidIndex(index))
}

pub fn normalize(text: &str) -> Vec<u8> {
    text
    .chars()
    .filter_map(|c| index_of(c).ok())
    .collect()
}

//indices come from normalize or from mod-26 arithmetic,
//so they are always in range
pub fn letter(index: u8) -> char {
    LETTERS[index as usize % SIZE]
}

pub fn to_text(letters: &[u8]) -> String {
    letters.iter().map(|&i| letter(i)).collect()
}

pub fn normalize_str(text: &str) -> String {
    to_text(&normalize(text))
}

/// A text split into its letters and the non-letters that sat between
/// them, so a transformed letter sequence can be put back into the
/// original layout.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct Segmented {
    pub letters: Vec<u8>,
    //character index of each letter in the source text
    pub positions: Vec<usize>,
    gaps: Vec<(usize,char)>,
    len: usize,
}

impl Segmented {
    pub fn split(text: &str) -> Segmented {
        let mut letters = Vec::with_capacity(text.len());
        let mut positions = Vec::with_capacity(text.len());
        let mut gaps = Vec::new();
        let mut len = 0;
        for (pos,c) in text.chars().enumerate() {
            match index_of(c) {
                Ok(i) => {
                    letters.push(i);
                    positions.push(pos);
                }
                Err(_) => gaps.push((pos,c)),
            }
            len = pos + 1;
        }
        Segmented { letters, positions, gaps, len }
    }

    /// Fails if `letters` is not as long as the letter sequence this
    /// layout was split from.
    pub fn restore(&self, letters: &[u8]) -> Maybe<String> {
        if letters.len() != self.letters.len() {
            return Err(Error::InvalidParameter(
                "letter count does not match the segmented layout"
            ));
        }
        let mut out = String::with_capacity(self.len);
        let mut gaps = self.gaps.iter().peekable();
        let mut letters = letters.iter();
        for pos in 0..self.len {
            match gaps.peek() {
                Some(&&(gpos,c)) if gpos == pos => {
                    out.push(c);
                    gaps.next();
                }
                _ => if let Some(&i) = letters.next() {
                    out.push(letter(i));
                }
            }
        }
        Ok(out)
    }
}
