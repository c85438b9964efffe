use clap::{Arg,App,AppSettings,ArgMatches,SubCommand};
use classicrack::builtin::{ciphers,schedules};
use std::fs;
use std::io::{self,Read};

fn input_arg() -> Arg<'static,'static> {
    Arg::with_name("input_file")
        .value_name("INPUT_FILE")
        .help("Sets the input file to use, - for stdin")
        .required(true)
        .index(1)
}

fn output_arg() -> Arg<'static,'static> {
    Arg::with_name("output_file")
        .short("o")
        .long("output-file")
        .value_name("OUTPUT_FILE")
        .help("Writes the result here instead of stdout")
}

fn schedule_arg() -> Arg<'static,'static> {
    Arg::with_name("schedule")
        .long("schedule")
        .value_name("SCHEDULE")
        .help("Sets whether non-letters advance the Vigenere key")
        .possible_values(&schedules::names())
        .default_value("per-letter")
}

fn keyed(name: &'static str, about: &'static str) -> App<'static,'static> {
    SubCommand::with_name(name)
        .about(about)
        .arg(input_arg())
        .arg(output_arg())
        .arg(Arg::with_name("cipher")
            .short("c")
            .long("cipher")
            .value_name("CIPHER")
            .possible_values(&ciphers::names())
            .required(true)
        )
        .arg(Arg::with_name("key")
            .short("k")
            .long("key")
            .value_name("KEY")
            .help("Shift for caesar, a,b for affine, a 26-letter alphabet for substitution, a word for vigenere")
            .required(true)
        )
        .arg(schedule_arg())
}

pub fn args() -> ArgMatches<'static> {
    App::new("classicrack")
    .version("0.1")
    .about("Encrypts with and breaks classical substitution ciphers")
    .setting(AppSettings::SubcommandRequiredElseHelp)
    .subcommand(keyed("encrypt", "Encrypts the input with a known key"))
    .subcommand(keyed("decrypt", "Decrypts the input with a known key"))
    .subcommand(SubCommand::with_name("crack")
        .about("Recovers the key from ciphertext alone")
        .arg(input_arg())
        .arg(output_arg())
        .arg(Arg::with_name("cipher")
            .short("c")
            .long("cipher")
            .value_name("CIPHER")
            .possible_values(&ciphers::names())
            .default_value("vigenere")
        )
        .arg(Arg::with_name("max_key_length")
            .short("m")
            .long("max-key-length")
            .value_name("N")
            .help("Sets the longest Vigenere key length to try")
            .default_value("20")
        )
        .arg(Arg::with_name("ngram")
            .short("n")
            .long("ngram")
            .value_name("N")
            .help("Sets the n-gram length for Kasiski examination")
            .default_value("3")
        )
        .arg(Arg::with_name("scan_limit")
            .long("scan-limit")
            .value_name("LETTERS")
            .help("Caps how many letters the Kasiski scan reads")
            .default_value("100000")
        )
        .arg(Arg::with_name("ic_margin")
            .long("ic-margin")
            .value_name("IC")
            .help("Sets how far below English IC a key length may score and still count")
            .default_value("0.005")
        )
        .arg(schedule_arg())
        .arg(Arg::with_name("diagnostics")
            .short("d")
            .long("diagnostics")
            .help("Prints frequency, IC and Kasiski statistics")
        )
    )
    .get_matches()
}

pub trait GetArg<'a> {
    fn get(&self,argname:&str) -> Result<&str,String>;
    fn get_parsed<T: std::str::FromStr>(&self,argname:&str) -> Result<T,String>;
}

impl<'a> GetArg<'a> for ArgMatches<'a> {
    fn get(&self,argname:&str) -> Result<&str,String> {
        self.value_of(argname)
        .ok_or(format!("Failed to resolve argument {}",argname))
    }

    fn get_parsed<T: std::str::FromStr>(&self,argname:&str) -> Result<T,String> {
        let raw = self.get(argname)?;
        raw.parse()
        .map_err(|_| format!("Failed to parse argument {} from {:?}",argname,raw))
    }
}

pub fn read_input(path: &str) -> Result<String,String> {
    let mut buf = String::new();
    let read = if path == "-" {
        io::stdin().read_to_string(&mut buf).map(|_| ())
    } else {
        fs::File::open(path).and_then(|mut f| f.read_to_string(&mut buf)).map(|_| ())
    };
    read.map_err(|e| format!("Failed to read {}: {}",path,e))?;
    Ok(buf)
}

pub fn write_output(path: Option<&str>, text: &str) -> Result<(),String> {
    match path {
        Some(p) => fs::write(p, text).map_err(|e| format!("Failed to write {}: {}",p,e)),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}
