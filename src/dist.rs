use std::fmt;
use std::ops::Index;
use counter::Counter;
use itertools::Itertools;
use crate::alphabet::{SIZE,LETTERS};
use crate::error::{Error,Maybe};
use crate::utils::{columns,columns_at,fcmp,Average};

#[derive(Debug,Clone,Copy,PartialEq,PartialOrd)]
pub struct Percent(pub f64);

pub trait Weight: Copy {
    fn weight(self) -> f64;
}

impl Weight for usize {
    fn weight(self) -> f64 { self as f64 }
}

impl Weight for Percent {
    fn weight(self) -> f64 { self.0 }
}

/// One value per letter of the alphabet. Letters that never occur are
/// stored as zero rather than left out, so every table has all 26 entries.
#[derive(Debug,Clone,PartialEq)]
pub struct FrequencyTable<V> {
    values: [V; SIZE]
}

pub type Counts = FrequencyTable<usize>;
pub type Percentages = FrequencyTable<Percent>;

impl<V> FrequencyTable<V> {
    pub const fn new(values: [V; SIZE]) -> Self {
        FrequencyTable { values }
    }
}

impl<V: Weight> FrequencyTable<V> {
    pub fn get(&self, index: u8) -> V {
        self.values[index as usize % SIZE]
    }

    pub fn iter(&self) -> impl Iterator<Item=(char,V)> + '_ {
        LETTERS.iter().cloned().zip(self.values.iter().cloned())
    }

    pub fn total(&self) -> f64 {
        self.values.iter().map(|v| v.weight()).sum()
    }

    //Index shifted by `shift` with wraparound
    pub fn rotated(&self, index: u8, shift: u8) -> V {
        self.get(((index as usize + shift as usize) % SIZE) as u8)
    }
}

impl<V> Index<u8> for FrequencyTable<V> {
    type Output = V;
    fn index(&self, index: u8) -> &V {
        &self.values[index as usize % SIZE]
    }
}

impl<V: Weight> fmt::Display for FrequencyTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rows = self.iter().map(|(c,v)| format!("  {}: {:.2}", c, v.weight()));
        write!(f, "{}", rows.format("\n"))
    }
}

pub fn count_frequencies(letters: &[u8]) -> Counts {
    let counter = letters.iter().cloned().collect::<Counter<u8>>();
    let mut values = [0; SIZE];
    for (i,slot) in values.iter_mut().enumerate() {
        *slot = counter.get(&(i as u8)).cloned().unwrap_or(0);
    }
    FrequencyTable::new(values)
}

pub fn percentages(counts: &Counts) -> Maybe<Percentages> {
    let total = counts.total();
    if total == 0.0 {
        return Err(Error::EmptyInput);
    }
    let mut values = [Percent(0.0); SIZE];
    for (i,slot) in values.iter_mut().enumerate() {
        *slot = Percent(100.0 * counts.values[i] as f64 / total);
    }
    Ok(FrequencyTable::new(values))
}

/// Letters ordered by descending value; equal values stay in
/// alphabetical order.
pub fn rank_by_frequency<V: Weight>(table: &FrequencyTable<V>) -> Vec<char> {
    table
    .iter()
    .sorted_by(|(_,v1),(_,v2)| fcmp(v2.weight(), v1.weight()))
    .map(|(c,_)| c)
    .collect()
}

pub fn index_of_coincidence(letters: &[u8]) -> Maybe<f64> {
    let n = letters.len();
    if n < 2 {
        return Err(Error::InsufficientData { needed: 2, found: n });
    }
    let coincidences: usize =
        count_frequencies(letters)
        .values
        .iter()
        .map(|&c| c * c.saturating_sub(1))
        .sum();
    Ok(coincidences as f64 / (n * (n-1)) as f64)
}

//Short columns are degenerate, not fatal to the average
fn average_ic(columns: &[Vec<u8>]) -> f64 {
    columns
    .iter()
    .map(|column| index_of_coincidence(column).unwrap_or(0.0))
    .average()
}

pub fn average_ic_for_key_length(letters: &[u8], key_length: usize) -> Maybe<f64> {
    if key_length == 0 {
        return Err(Error::InvalidParameter("key length must be positive"));
    }
    Ok(average_ic(&columns(letters, key_length)))
}

/// Average IC when letter `i` sits at key position `positions[i]`, as it
/// does when non-letters also advance the key.
pub fn average_ic_at(letters: &[u8], positions: &[usize], key_length: usize) -> Maybe<f64> {
    if key_length == 0 {
        return Err(Error::InvalidParameter("key length must be positive"));
    }
    if positions.len() != letters.len() {
        return Err(Error::InvalidParameter("one key position per letter is required"));
    }
    Ok(average_ic(&columns_at(letters, positions, key_length)))
}

pub mod known {
    use super::{FrequencyTable,Percent,Percentages};

    pub const ENGLISH_IC: f64 = 0.068;

    pub const ENGLISH: Percentages = FrequencyTable::new([
        Percent(8.17),  // A
        Percent(1.29),  // B
        Percent(2.78),  // C
        Percent(4.25),  // D
        Percent(12.70), // E
        Percent(2.23),  // F
        Percent(2.02),  // G
        Percent(6.09),  // H
        Percent(6.97),  // I
        Percent(0.15),  // J
        Percent(0.77),  // K
        Percent(4.03),  // L
        Percent(2.41),  // M
        Percent(6.75),  // N
        Percent(7.51),  // O
        Percent(1.93),  // P
        Percent(0.10),  // Q
        Percent(5.99),  // R
        Percent(6.33),  // S
        Percent(9.06),  // T
        Percent(2.76),  // U
        Percent(0.98),  // V
        Percent(2.36),  // W
        Percent(0.15),  // X
        Percent(1.97),  // Y
        Percent(0.07),  // Z
    ]);

    //Canonical ranking, kept apart from the percentages above
    pub const ENGLISH_BY_RANK: [char; 26] = [
        'E','T','A','O','I','N','S','H','R','D','L','C','U',
        'M','W','F','G','Y','P','B','V','K','J','X','Q','Z'
    ];
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::normalize;
    use crate::utils::approx_equal;

    #[test]
    fn count_keeps_all_letters_test() {
        let counts = count_frequencies(&normalize("Hello World"));
        assert_eq!(counts.iter().count(), 26);
        assert_eq!(counts.get(11), 3);
        assert_eq!(counts.get(25), 0);
        assert_eq!(counts.total(), 10.0);
    }

    #[test]
    fn percentages_test() {
        let p = percentages(&count_frequencies(&normalize("AABC"))).unwrap();
        assert!(approx_equal(p.get(0).0, 50.0));
        assert!(approx_equal(p.get(2).0, 25.0));
        assert!((p.total() - 100.0).abs() < 1e-9);
        assert_eq!(
            percentages(&count_frequencies(&[])),
            Err(Error::EmptyInput)
        );
    }

    #[test]
    fn reference_table_test() {
        assert!((known::ENGLISH.total() - 100.0).abs() < 0.5);
        let ranked = rank_by_frequency(&known::ENGLISH);
        assert_eq!(&ranked[..3], &['E','T','A']);
    }

    #[test]
    fn rank_ties_are_alphabetical_test() {
        let uniform: Vec<u8> = (0..26).collect();
        let ranked = rank_by_frequency(&count_frequencies(&uniform));
        assert_eq!(ranked, LETTERS.to_vec());

        let ranked = rank_by_frequency(&count_frequencies(&normalize("ZZYYBA")));
        assert_eq!(&ranked[..4], &['Y','Z','A','B']);
    }

    #[test]
    fn ic_bounds_test() {
        assert_eq!(index_of_coincidence(&normalize("AAAAAAA")), Ok(1.0));
        let uniform: Vec<u8> = (0..26).cycle().take(26*40).collect();
        let ic = index_of_coincidence(&uniform).unwrap();
        assert!((ic - 1.0/26.0).abs() < 0.002);
        assert!(ic >= 0.0 && ic <= 1.0);
        assert_eq!(index_of_coincidence(&normalize("AB")), Ok(0.0));
    }

    #[test]
    fn ic_needs_two_letters_test() {
        assert_eq!(
            index_of_coincidence(&normalize("A")),
            Err(Error::InsufficientData { needed: 2, found: 1 })
        );
        assert!(index_of_coincidence(&[]).is_err());
    }

    #[test]
    fn exact_ic_test() {
        let samples: Vec<u8> = (0..5).cycle().take(50).collect();
        assert!((index_of_coincidence(&samples).unwrap() - 0.183_673_469_387_755).abs() < 1e-12);
    }

    #[test]
    fn average_ic_tolerates_short_columns_test() {
        //columns at width 3: "AA", "A", "B"
        let letters = normalize("AABA");
        let third = average_ic_for_key_length(&letters, 3).unwrap();
        assert!((third - 1.0/3.0).abs() < 1e-12);
        let whole = average_ic_for_key_length(&letters, 1).unwrap();
        assert!((whole - 0.5).abs() < 1e-12);
        assert_eq!(average_ic_for_key_length(&letters, 10), Ok(0.0));
        assert!(average_ic_for_key_length(&letters, 0).is_err());
    }

    #[test]
    fn average_ic_at_follows_positions_test() {
        //"AB AB" with the space taking a key position puts A,B in
        //column 0 and B,A in column 1
        let letters = normalize("ABAB");
        assert_eq!(average_ic_at(&letters, &[0,1,3,4], 2), Ok(0.0));
        //packed, the same width pairs like letters up
        assert_eq!(average_ic_at(&letters, &[0,1,2,3], 2), Ok(1.0));
        assert_eq!(average_ic_at(&letters, &[0,1,2,3], 2), average_ic_for_key_length(&letters, 2));
        assert!(average_ic_at(&letters, &[0,1], 2).is_err());
    }
}
