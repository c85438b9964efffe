use crate::alphabet::{self,normalize};
use crate::attack;
use crate::config::Config;
use crate::crypto::{caesar,affine,substitution,vigenere};
use crate::crypto::affine::AffineKey;
use crate::crypto::substitution::SubstitutionKey;
use crate::crypto::vigenere::{KeySchedule,VigenereKey};
use crate::dist;
use crate::error::Error;
use crate::kasiski;
use crate::keylen;

pub const SAMPLE_TEXT: &str = "The lighthouse keeper had kept the same routine for nearly forty years. Every evening, just before the sun went down behind the western cliffs, he climbed the narrow iron stairs to the lantern room and trimmed the wick, polished the great glass lens, and wound the clockwork that turned the light. The ships that passed the headland at night never saw him, but they trusted the steady beam that swept across the dark water, and that was enough for him. In the winter the storms came in from the north, and the waves broke against the rocks with such force that the whole tower seemed to tremble. On those nights he did not sleep at all. He sat beside the stove with a pot of tea and a battered book of sea stories, listening to the wind and the rain, and every hour he went up the stairs again to make certain that the flame was still burning. When the spring arrived the sea grew calm, the gulls returned to the ledges, and the keeper planted potatoes and beans in the small garden behind the cottage. His daughter wrote to him from the city twice a month, telling him about her work at the hospital and asking when he would finally retire and come to live with her. He always answered that he would think about it, and he always meant it, but the light still needed tending, and there was nobody else who knew the old machine as well as he did.\n\nAt the far end of the valley there was a small farm that had belonged to the same family for as long as anyone in the village could remember. The farmhouse was built of grey stone, and a tall ash tree stood beside the gate, casting a wide shadow across the yard in the late afternoon. Every autumn the harvest was gathered by hand, and neighbours came from the nearby farms to help carry the sacks of grain and apples into the barn. In the evening they sat together at a long table, ate bread and cheese, and talked about the weather, the price of cattle at the market, and the state of the roads. The old farmer was a patient man who rarely raised his voice. He taught his grandchildren to plant seeds at the right time, to care for the animals, and to watch the sky for signs of rain. He said that the land was not something a man could own; it was a trust that passed from one generation to the next, and each of them had a duty to leave it a little better than they had found it. Years later, after he had passed away, his granddaughter returned to the valley with a plan to restore the orchard and to teach the local children what he had once taught her. She planted new trees along the eastern wall, repaired the roof of the barn, and opened the farm to anyone who wanted to learn.";

const SCENARIO: &str = "HELLOHOWAREYOUHOWAREYOUDOING";

#[test]
fn caesar_end_to_end_test() {
    let pt = "Hello world this is a secret message";
    let ct = caesar::encrypt(pt, 3);
    assert_eq!(ct, "KHOOR ZRUOG WKLV LV D VHFUHW PHVVDJH");
    assert_eq!(caesar::decrypt(&ct, 3), "HELLO WORLD THIS IS A SECRET MESSAGE");
}

#[test]
fn vigenere_end_to_end_test() {
    let key = VigenereKey::parse("QWERTY").unwrap();
    let ct = vigenere::encrypt(SCENARIO, &key, KeySchedule::PerLetter);
    assert_eq!(vigenere::decrypt(&ct, &key, KeySchedule::PerLetter), SCENARIO);
    //one pass gives columns of four or five letters, too few to
    //correlate; six passes are enough
    let long = vigenere::encrypt(&SCENARIO.repeat(6), &key, KeySchedule::PerLetter);
    let recovered = attack::recover_vigenere_key(&normalize(&long), 6).unwrap();
    assert_eq!(recovered.to_string(), "QWERTY");
}

#[test]
fn vigenere_short_key_recovery_is_unreliable_test() {
    let key = VigenereKey::parse("QWERTY").unwrap();
    let ct = vigenere::encrypt(SCENARIO, &key, KeySchedule::PerLetter);
    let guess = attack::recover_vigenere_key(&normalize(&ct), 6).unwrap();
    assert_eq!(guess.len(), 6);
    assert_ne!(guess, key);
}

#[test]
fn affine_end_to_end_test() {
    let key = AffineKey::new(5, 8).unwrap();
    let ct = affine::encrypt("HELLO HOW ARE YOU", &key);
    assert_eq!(affine::decrypt(&ct, &key), "HELLO HOW ARE YOU");
    assert_eq!(AffineKey::new(4, 8), Err(Error::NonInvertibleKey(4)));
}

#[test]
fn substitution_attack_end_to_end_test() {
    let key = SubstitutionKey::from_alphabet("OPQRSTUVWXYZABCDEFGHIJKLMN").unwrap();
    let ct = substitution::encrypt(SAMPLE_TEXT, &key);
    let found = attack::attack_substitution(&ct).unwrap();
    for &letter in &['E','T','A'] {
        assert_eq!(found.key.get(letter), key.get(letter), "letter {}", letter);
    }
    //first-order only: the rest of the key needs refining by hand
    assert_ne!(found.key, key);
    assert_ne!(found.plaintext, SAMPLE_TEXT.to_uppercase());
}

#[test]
fn substitution_attack_short_text_test() {
    let key = SubstitutionKey::from_alphabet("OPQRSTUVWXYZABCDEFGHIJKLMN").unwrap();
    let pt = "HELLO WORLD THIS IS A SECRET MESSAGE.";
    let ct = substitution::encrypt(pt, &key);
    assert_eq!(ct, "VSZZC KCFZR HVWG WG O GSQFSH ASGGOUS.");
    let found = attack::attack_substitution(&ct).unwrap();
    assert_eq!(found.key.len(), 14);
    assert_ne!(found.plaintext, pt);
}

#[test]
fn round_trip_test() {
    let texts = ["", "abc xyz", "Attack at dawn!", SAMPLE_TEXT];
    let vkey = VigenereKey::parse("LIGHTHOUSE").unwrap();
    let skey = SubstitutionKey::from_alphabet("ZYXWVUTSRQPONMLKJIHGFEDCBA").unwrap();
    let akey = AffineKey::new(7, 3).unwrap();
    for text in texts.iter() {
        let upper = text.to_uppercase();
        assert_eq!(caesar::decrypt(&caesar::encrypt(text, 11), 11), upper);
        assert_eq!(affine::decrypt(&affine::encrypt(text, &akey), &akey), upper);
        assert_eq!(substitution::decrypt(&substitution::encrypt(text, &skey), &skey), upper);
        for &schedule in &[KeySchedule::PerLetter, KeySchedule::PerCharacter] {
            let ct = vigenere::encrypt(text, &vkey, schedule);
            assert_eq!(vigenere::decrypt(&ct, &vkey, schedule), upper);
        }
        let ct = vigenere::encrypt(text, &vkey, KeySchedule::PerLetter);
        assert_eq!(
            alphabet::normalize_str(&vigenere::decrypt(&ct, &vkey, KeySchedule::PerLetter)),
            alphabet::normalize_str(text)
        );
    }
}

#[test]
fn sample_statistics_test() {
    let letters = normalize(SAMPLE_TEXT);
    let ic = dist::index_of_coincidence(&letters).unwrap();
    assert!(ic > 0.06 && ic < 0.08, "IC was {}", ic);
    let ranked = dist::rank_by_frequency(&dist::count_frequencies(&letters));
    assert_eq!(&ranked[..3], &['E','T','A']);
}

#[test]
fn kasiski_on_repeated_plaintext_test() {
    let key = VigenereKey::parse("LEMON").unwrap();
    let ct = vigenere::encrypt(&SCENARIO.repeat(6), &key, KeySchedule::PerLetter);
    assert_eq!(kasiski::candidate_key_length(&normalize(&ct), 3), Ok(5));
}

#[test]
fn key_length_then_key_test() {
    let key = VigenereKey::parse("LIGHTHOUSE").unwrap();
    let letters = normalize(&vigenere::encrypt(SAMPLE_TEXT, &key, KeySchedule::PerLetter));
    let decision = keylen::decide(&letters, &Config::default()).unwrap();
    assert_eq!(decision.chosen.length, 10);
    assert_eq!(attack::recover_vigenere_key(&letters, decision.chosen.length), Ok(key));
}

#[test]
fn full_break_test() {
    for word in &["LEMON","QWERTY","KEY","CRYPTANALYSIS"] {
        let key = VigenereKey::parse(word).unwrap();
        let ct = vigenere::encrypt(SAMPLE_TEXT, &key, KeySchedule::PerLetter);
        let found = attack::break_vigenere(&ct, &Config::default()).unwrap();
        assert_eq!(found.key, key);
        assert_eq!(found.plaintext, SAMPLE_TEXT.to_uppercase());
        assert_eq!(found.diagnostics.decision.candidates.len(), 20);
    }
}

#[test]
fn full_break_is_deterministic_test() {
    let key = VigenereKey::parse("SECRET").unwrap();
    let ct = vigenere::encrypt(SAMPLE_TEXT, &key, KeySchedule::PerLetter);
    let first = attack::break_vigenere(&ct, &Config::default()).unwrap();
    let second = attack::break_vigenere(&ct, &Config::default()).unwrap();
    assert_eq!(first, second);
}
