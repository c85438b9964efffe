//Name lookups for the command line

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Cipher {
    Caesar,
    Affine,
    Substitution,
    Vigenere,
}

pub mod ciphers {
    use super::Cipher;
    use crate::error::{Error,Maybe};

    pub const BY_NAME: [(&str,Cipher);4] = [
        ("caesar", Cipher::Caesar),
        ("affine", Cipher::Affine),
        ("substitution", Cipher::Substitution),
        ("vigenere", Cipher::Vigenere),
    ];

    pub fn by_name(lookup: &str) -> Maybe<Cipher> {
        BY_NAME
        .iter()
        .find(|(n,_)| *n == lookup)
        .map(|&(_,c)| c)
        .ok_or(Error::InvalidParameter("unknown cipher name"))
    }

    pub fn names() -> Vec<&'static str> {
        BY_NAME.iter().map(|&(n,_)| n).collect()
    }
}

pub mod schedules {
    use crate::crypto::vigenere::KeySchedule;
    use crate::error::{Error,Maybe};

    pub const BY_NAME: [(&str,KeySchedule);2] = [
        ("per-letter", KeySchedule::PerLetter),
        ("per-character", KeySchedule::PerCharacter),
    ];

    pub fn by_name(lookup: &str) -> Maybe<KeySchedule> {
        BY_NAME
        .iter()
        .find(|(n,_)| *n == lookup)
        .map(|&(_,s)| s)
        .ok_or(Error::InvalidParameter("unknown key schedule"))
    }

    pub fn names() -> Vec<&'static str> {
        BY_NAME.iter().map(|&(n,_)| n).collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::vigenere::KeySchedule;

    #[test]
    fn lookup_test() {
        assert_eq!(ciphers::by_name("affine"), Ok(Cipher::Affine));
        assert!(ciphers::by_name("enigma").is_err());
        assert_eq!(ciphers::names().len(), 4);
        assert_eq!(schedules::by_name("per-character"), Ok(KeySchedule::PerCharacter));
        assert_eq!(schedules::names(), vec!["per-letter","per-character"]);
    }
}
