#[macro_use]
extern crate log;

mod cli;

use std::process;
use clap::ArgMatches;
use classicrack::attack;
use classicrack::builtin::{ciphers,schedules,Cipher};
use classicrack::config::Config;
use classicrack::crypto::{caesar,affine,substitution,vigenere};
use classicrack::crypto::affine::AffineKey;
use classicrack::crypto::substitution::SubstitutionKey;
use classicrack::crypto::vigenere::VigenereKey;
use cli::GetArg;

type Outcome<T> = Result<T,String>;

fn affine_key(raw: &str) -> Outcome<AffineKey> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [a,b] => {
            let a = a.parse().map_err(|_| format!("Bad affine multiplier {:?}",a))?;
            let b = b.parse().map_err(|_| format!("Bad affine offset {:?}",b))?;
            AffineKey::new(a,b).map_err(|e| e.to_string())
        }
        _ => Err(format!("Affine keys look like a,b; got {:?}",raw))
    }
}

fn keyed(matches: &ArgMatches, decrypting: bool) -> Outcome<String> {
    let text = cli::read_input(matches.get("input_file")?)?;
    let raw_key = matches.get("key")?;
    let schedule = schedules::by_name(matches.get("schedule")?).map_err(|e| e.to_string())?;
    let cipher = ciphers::by_name(matches.get("cipher")?).map_err(|e| e.to_string())?;
    debug!("{:?} with key {:?}, decrypting: {}", cipher, raw_key, decrypting);
    let out = match cipher {
        Cipher::Caesar => {
            let k = matches.get_parsed::<i64>("key")?;
            if decrypting { caesar::decrypt(&text,k) } else { caesar::encrypt(&text,k) }
        }
        Cipher::Affine => {
            let k = affine_key(raw_key)?;
            if decrypting { affine::decrypt(&text,&k) } else { affine::encrypt(&text,&k) }
        }
        Cipher::Substitution => {
            let k = SubstitutionKey::from_alphabet(raw_key).map_err(|e| e.to_string())?;
            if decrypting { substitution::decrypt(&text,&k) } else { substitution::encrypt(&text,&k) }
        }
        Cipher::Vigenere => {
            let k = VigenereKey::parse(raw_key).map_err(|e| e.to_string())?;
            if decrypting {
                vigenere::decrypt(&text,&k,schedule)
            } else {
                vigenere::encrypt(&text,&k,schedule)
            }
        }
    };
    Ok(out)
}

fn crack(matches: &ArgMatches) -> Outcome<String> {
    let text = cli::read_input(matches.get("input_file")?)?;
    let cipher = ciphers::by_name(matches.get("cipher")?).map_err(|e| e.to_string())?;
    let config = Config::default()
        .with_max_key_length(matches.get_parsed("max_key_length")?)
        .with_ngram_len(matches.get_parsed("ngram")?)
        .with_scan_limit(matches.get_parsed("scan_limit")?)
        .with_ic_margin(matches.get_parsed("ic_margin")?)
        .with_schedule(schedules::by_name(matches.get("schedule")?).map_err(|e| e.to_string())?);
    let show_diagnostics = matches.is_present("diagnostics");

    let report = match cipher {
        Cipher::Caesar => {
            let found = attack::break_caesar(&text).map_err(|e| e.to_string())?;
            format!("Key: {}\n\n{}", found.shift, found.plaintext)
        }
        Cipher::Affine => {
            let found = attack::break_affine(&text).map_err(|e| e.to_string())?;
            format!("Key: {}\n\n{}", found.key, found.plaintext)
        }
        Cipher::Substitution => {
            let found = attack::attack_substitution(&text).map_err(|e| e.to_string())?;
            let mut out = format!("Key: {}\n\n{}", found.key, found.plaintext);
            if show_diagnostics {
                out.push_str(&format!("\n\nLetter frequencies (%):\n{}", found.frequencies));
            }
            out
        }
        Cipher::Vigenere => {
            let found = attack::break_vigenere(&text,&config).map_err(|e| e.to_string())?;
            let mut out = format!("Key: {}\n\n{}", found.key, found.plaintext);
            if show_diagnostics {
                out.push_str(&format!("\n\n{}", found.diagnostics));
            }
            out
        }
    };
    Ok(report)
}

fn run(matches: &ArgMatches) -> Outcome<()> {
    let (out,sub) = match matches.subcommand() {
        ("encrypt", Some(sub)) => (keyed(sub,false)?, sub),
        ("decrypt", Some(sub)) => (keyed(sub,true)?, sub),
        ("crack", Some(sub)) => (crack(sub)?, sub),
        (other, _) => return Err(format!("Unknown subcommand {:?}",other)),
    };
    cli::write_output(sub.value_of("output_file"), &out)
}

fn main() {
    env_logger::init();
    let matches = cli::args();
    if let Err(e) = run(&matches) {
        error!("{}", e);
        eprintln!("classicrack: {}", e);
        process::exit(1);
    }
}
