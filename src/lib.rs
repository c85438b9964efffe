//! Classical cipher primitives (Caesar, affine, substitution, Vigenère)
//! and the statistical attacks that break them: letter frequencies,
//! index of coincidence and Kasiski examination.

#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate log;

pub mod alphabet;
pub mod attack;
pub mod builtin;
pub mod config;
pub mod crypto;
pub mod dist;
pub mod error;
pub mod kasiski;
pub mod keylen;
mod utils;

#[cfg(test)]
mod tests;

pub use crate::config::Config;
pub use crate::error::{Error,Maybe};
