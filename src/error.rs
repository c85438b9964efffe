use std::error;

pub type Maybe<T> = Result<T,Error>;

#[derive(Debug,Display,Clone,PartialEq,Eq)]
pub enum Error {
    #[display(fmt = "Symbol {:?} is not a letter of the A-Z alphabet.", _0)]
    InvalidSymbol(char),
    #[display(fmt = "Index {} is outside the alphabet range 0..26.", _0)]
    InvalidIndex(usize),
    #[display(fmt = "Input contains no letters.")]
    EmptyInput,
    #[display(fmt = "Need at least {} letters, found {}.", needed, found)]
    InsufficientData { needed: usize, found: usize },
    #[display(fmt = "Multiplier {} shares a factor with 26 and has no inverse.", _0)]
    NonInvertibleKey(i64),
    #[display(fmt = "No repeated sequences found. Try a longer ciphertext.")]
    NoRepeatsFound,
    #[display(fmt = "Invalid key: {}", _0)]
    InvalidKey(String),
    #[display(fmt = "Function input out of range: {}", _0)]
    InvalidParameter(&'static str),
}

impl error::Error for Error {}


#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_test() {
        let e = Error::InsufficientData { needed: 2, found: 1 };
        assert_eq!(e.to_string(), "Need at least 2 letters, found 1.");
        assert_eq!(
            Error::NonInvertibleKey(4).to_string(),
            "Multiplier 4 shares a factor with 26 and has no inverse."
        );
    }
}
