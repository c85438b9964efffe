use crate::crypto::vigenere::KeySchedule;
use crate::kasiski::DEFAULT_NGRAM_LEN;

pub const DEFAULT_MAX_KEY_LENGTH: usize = 20;
pub const DEFAULT_SCAN_LIMIT: usize = 100_000;
pub const DEFAULT_IC_MARGIN: f64 = 0.005;

/// Knobs for the Vigenère attack. The alphabet size is fixed at 26 and
/// is not configurable.
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Config {
    pub max_key_length: usize,
    pub ngram_len: usize,
    //letters fed to the Kasiski scan at most
    pub scan_limit: usize,
    pub schedule: KeySchedule,
    //how far below English IC a split's average IC may fall and still
    //count as English-like
    pub ic_margin: f64,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            max_key_length: DEFAULT_MAX_KEY_LENGTH,
            ngram_len: DEFAULT_NGRAM_LEN,
            scan_limit: DEFAULT_SCAN_LIMIT,
            schedule: KeySchedule::PerLetter,
            ic_margin: DEFAULT_IC_MARGIN,
        }
    }
}

impl Config {
    pub fn with_max_key_length(mut self, max_key_length: usize) -> Config {
        self.max_key_length = max_key_length;
        self
    }

    pub fn with_ngram_len(mut self, ngram_len: usize) -> Config {
        self.ngram_len = ngram_len;
        self
    }

    pub fn with_scan_limit(mut self, scan_limit: usize) -> Config {
        self.scan_limit = scan_limit;
        self
    }

    pub fn with_schedule(mut self, schedule: KeySchedule) -> Config {
        self.schedule = schedule;
        self
    }

    pub fn with_ic_margin(mut self, ic_margin: f64) -> Config {
        self.ic_margin = ic_margin;
        self
    }
}
