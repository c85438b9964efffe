use crate::alphabet::{self,SIZE};

//Every primitive uppercases letters and copies anything else through.
pub fn transform(text: &str, mut f: impl FnMut(u8) -> u8) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match alphabet::index_of(c) {
            Ok(i) => out.push(alphabet::letter(f(i))),
            Err(_) => out.push(c),
        }
    }
    out
}

pub fn add(x: u8, k: u8) -> u8 {
    ((x as usize + k as usize) % SIZE) as u8
}

pub fn sub(x: u8, k: u8) -> u8 {
    ((x as usize + SIZE - k as usize % SIZE) % SIZE) as u8
}


pub mod caesar {
    use super::{transform,add,sub};

    pub fn reduce(shift: i64) -> u8 {
        shift.rem_euclid(26) as u8
    }

    pub fn encrypt(text: &str, shift: i64) -> String {
        let k = reduce(shift);
        transform(text, |x| add(x,k))
    }

    pub fn decrypt(text: &str, shift: i64) -> String {
        let k = reduce(shift);
        transform(text, |x| sub(x,k))
    }
}


pub mod affine {
    use std::fmt;
    use itertools::iproduct;
    use super::transform;
    use crate::alphabet::SIZE;
    use crate::error::{Error,Maybe};

    pub const MULTIPLIERS: [u8; 12] = [1,3,5,7,9,11,15,17,19,21,23,25];

    pub fn mod_inverse(a: i64) -> Maybe<u8> {
        let a = a.rem_euclid(SIZE as i64);
        (1..SIZE as i64)
        .find(|x| (a * x) % SIZE as i64 == 1)
        .map(|x| x as u8)
        .ok_or(Error::NonInvertibleKey(a))
    }

    /// `E(x) = a*x + b (mod 26)`. Only keys whose `a` is invertible mod 26
    /// can be constructed.
    #[derive(Debug,Clone,Copy,PartialEq,Eq)]
    pub struct AffineKey {
        a: u8,
        b: u8,
        a_inv: u8,
    }

    impl AffineKey {
        pub fn new(a: i64, b: i64) -> Maybe<AffineKey> {
            let a_inv = mod_inverse(a).map_err(|_| Error::NonInvertibleKey(a))?;
            Ok(AffineKey {
                a: a.rem_euclid(SIZE as i64) as u8,
                b: b.rem_euclid(SIZE as i64) as u8,
                a_inv,
            })
        }

        /// All 312 valid keys, `a` ascending then `b` ascending.
        pub fn all() -> impl Iterator<Item=AffineKey> {
            iproduct!(MULTIPLIERS.iter(), 0..SIZE as i64)
            .filter_map(|(&a,b)| AffineKey::new(i64::from(a), b).ok())
        }

        fn forward(&self, x: u8) -> u8 {
            ((self.a as usize * x as usize + self.b as usize) % SIZE) as u8
        }

        fn backward(&self, y: u8) -> u8 {
            ((self.a_inv as usize * (y as usize + SIZE - self.b as usize)) % SIZE) as u8
        }
    }

    impl fmt::Display for AffineKey {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a={}, b={}", self.a, self.b)
        }
    }

    pub fn encrypt(text: &str, key: &AffineKey) -> String {
        transform(text, |x| key.forward(x))
    }

    pub fn decrypt(text: &str, key: &AffineKey) -> String {
        transform(text, |y| key.backward(y))
    }

    pub fn decrypt_letters(letters: &[u8], key: &AffineKey) -> Vec<u8> {
        letters.iter().map(|&y| key.backward(y)).collect()
    }
}


pub mod substitution {
    use std::fmt;
    use itertools::Itertools;
    use super::transform;
    use crate::alphabet::{self,SIZE};
    use crate::error::{Error,Maybe};

    /// A plain -> cipher letter mapping. It may be partial; letters with no
    /// entry are left as they are.
    #[derive(Debug,Clone,PartialEq,Eq,Default)]
    pub struct SubstitutionKey {
        map: [Option<u8>; SIZE]
    }

    impl SubstitutionKey {
        /// Fails on non-letters and on anything that would make the
        /// mapping non-injective.
        pub fn from_pairs(pairs: impl IntoIterator<Item=(char,char)>) -> Maybe<SubstitutionKey> {
            let mut map = [None; SIZE];
            let mut used = [false; SIZE];
            for (from,to) in pairs {
                let (f,t) = (alphabet::index_of(from)?, alphabet::index_of(to)?);
                if map[f as usize].is_some() {
                    return Err(Error::InvalidKey(format!("{} is mapped twice", from)));
                }
                if used[t as usize] {
                    return Err(Error::InvalidKey(format!("{} is a target twice", to)));
                }
                map[f as usize] = Some(t);
                used[t as usize] = true;
            }
            Ok(SubstitutionKey { map })
        }

        /// `cipher_alphabet[i]` is the image of the i-th letter.
        pub fn from_alphabet(cipher_alphabet: &str) -> Maybe<SubstitutionKey> {
            let letters: Vec<char> = cipher_alphabet.chars().collect();
            if letters.len() != SIZE {
                return Err(Error::InvalidKey(
                    format!("expected 26 letters, got {}", letters.len())
                ));
            }
            SubstitutionKey::from_pairs(alphabet::LETTERS.iter().cloned().zip(letters))
        }

        pub fn get(&self, plain: char) -> Option<char> {
            alphabet::index_of(plain)
            .ok()
            .and_then(|i| self.map[i as usize])
            .map(alphabet::letter)
        }

        pub fn len(&self) -> usize {
            self.map.iter().filter(|m| m.is_some()).count()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        pub fn pairs(&self) -> impl Iterator<Item=(char,char)> + '_ {
            self.map
            .iter()
            .enumerate()
            .filter_map(|(i,m)| m.map(|t| (alphabet::letter(i as u8), alphabet::letter(t))))
        }

        pub fn apply(&self, x: u8) -> u8 {
            self.map[x as usize % SIZE].unwrap_or(x)
        }
    }

    pub fn invert(key: &SubstitutionKey) -> SubstitutionKey {
        let mut map = [None; SIZE];
        for (from,to) in key.map.iter().enumerate() {
            if let Some(t) = to {
                map[*t as usize] = Some(from as u8);
            }
        }
        SubstitutionKey { map }
    }

    impl fmt::Display for SubstitutionKey {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "{}", self.pairs().map(|(p,c)| format!("{}->{}", p, c)).join(" "))
        }
    }

    pub fn encrypt(text: &str, key: &SubstitutionKey) -> String {
        transform(text, |x| key.apply(x))
    }

    pub fn decrypt(text: &str, key: &SubstitutionKey) -> String {
        let inverse = invert(key);
        transform(text, |y| inverse.apply(y))
    }
}


pub mod vigenere {
    use std::fmt;
    use super::{add,sub};
    use crate::alphabet::{self,Segmented,SIZE};
    use crate::error::{Error,Maybe};
    use crate::utils::divisors;

    /// Which characters move the key forward. Either way, non-letters
    /// are copied through unchanged, so word boundaries survive.
    #[derive(Debug,Clone,Copy,PartialEq,Eq)]
    pub enum KeySchedule {
        /// Only letters consume a key position, so the ciphertext columns
        /// line up with the normalized text.
        PerLetter,
        /// Every character consumes a key position, spaces included.
        PerCharacter,
    }

    impl KeySchedule {
        /// The key position of each letter of `text`, in letter order.
        pub fn key_positions(self, text: &Segmented) -> Vec<usize> {
            match self {
                KeySchedule::PerLetter => (0..text.letters.len()).collect(),
                KeySchedule::PerCharacter => text.positions.clone(),
            }
        }
    }

    #[derive(Debug,Clone,PartialEq,Eq)]
    pub struct VigenereKey(Vec<u8>);

    impl VigenereKey {
        pub fn parse(key: &str) -> Maybe<VigenereKey> {
            let shifts: Maybe<Vec<u8>> =
                key
                .chars()
                .map(|c| alphabet::index_of(c)
                    .map_err(|_| Error::InvalidKey(format!("{:?} is not a letter", c))))
                .collect();
            VigenereKey::from_shifts(shifts?)
        }

        pub fn from_shifts(shifts: Vec<u8>) -> Maybe<VigenereKey> {
            if shifts.is_empty() {
                return Err(Error::InvalidKey(String::from("key is empty")));
            }
            if let Some(&bad) = shifts.iter().find(|&&s| s as usize >= SIZE) {
                return Err(Error::InvalidIndex(bad as usize));
            }
            Ok(VigenereKey(shifts))
        }

        pub fn len(&self) -> usize {
            self.0.len()
        }

        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }

        /// The shortest key that repeats into this one, e.g. LEMONLEMON
        /// becomes LEMON.
        pub fn minimal_period(&self) -> VigenereKey {
            let n = self.0.len();
            let period =
                divisors(n)
                .find(|&p| (p..n).all(|i| self.0[i] == self.0[i % p]))
                .unwrap_or(n);
            VigenereKey(self.0[..period].to_vec())
        }
    }

    impl fmt::Display for VigenereKey {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "{}", alphabet::to_text(&self.0))
        }
    }

    pub fn transform(text: &str, key: &VigenereKey, schedule: KeySchedule,
                     comb: impl Fn(u8,u8) -> u8) -> String {
        let keylen = key.len();
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        for c in text.chars() {
            match alphabet::index_of(c) {
                Ok(x) => {
                    out.push(alphabet::letter(comb(x, key.0[pos % keylen])));
                    pos += 1;
                }
                Err(_) => {
                    out.push(c);
                    if schedule == KeySchedule::PerCharacter {
                        pos += 1;
                    }
                }
            }
        }
        out
    }

    pub fn encrypt(pt: &str, key: &VigenereKey, schedule: KeySchedule) -> String {
        transform(pt, key, schedule, add)
    }

    pub fn decrypt(ct: &str, key: &VigenereKey, schedule: KeySchedule) -> String {
        transform(ct, key, schedule, sub)
    }

    pub fn decrypt_letters(ct: &[u8], key: &VigenereKey) -> Vec<u8> {
        let keylen = key.len();
        ct
        .iter()
        .enumerate()
        .map(|(i,&c)| sub(c, key.0[i % keylen]))
        .collect()
    }
}
