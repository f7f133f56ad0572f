//! Typo model
//!
//! One Bernoulli trial per chunk decides whether it gets corrupted; if so a
//! uniformly chosen eligible character is replaced with a plausible
//! neighbor:
//! - Latin letters and digits: an adjacent QWERTY key (case preserved)
//! - Common Chinese characters: a homophone that is easy to mistype
//! - Other CJK ideographs, kana and hangul: an adjacent code point
//!
//! Characters with no substitute (spaces, punctuation, emoji) are never
//! picked.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;

use chat_behavior_config::constants::typo::MIN_TYPO_LENGTH;

/// A single-character corruption of a chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typo {
    /// Corrupted text
    pub text: String,
    /// Character index (not byte offset) of the replaced character
    pub position: usize,
    pub original: char,
    pub replacement: char,
}

/// Keys adjacent on a QWERTY layout
static KEYBOARD_NEIGHBORS: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('q', "wa"),
        ('w', "qeas"),
        ('e', "wrsd"),
        ('r', "etdf"),
        ('t', "ryfg"),
        ('y', "tugh"),
        ('u', "yihj"),
        ('i', "uojk"),
        ('o', "ipkl"),
        ('p', "ol"),
        ('a', "qwsz"),
        ('s', "awedxz"),
        ('d', "serfcx"),
        ('f', "drtgvc"),
        ('g', "ftyhbv"),
        ('h', "gyujnb"),
        ('j', "huikmn"),
        ('k', "jiolm"),
        ('l', "kop"),
        ('z', "asx"),
        ('x', "zsdc"),
        ('c', "xdfv"),
        ('v', "cfgb"),
        ('b', "vghn"),
        ('n', "bhjm"),
        ('m', "njk"),
        ('1', "2q"),
        ('2', "13w"),
        ('3', "24e"),
        ('4', "35r"),
        ('5', "46t"),
        ('6', "57y"),
        ('7', "68u"),
        ('8', "79i"),
        ('9', "80o"),
        ('0', "9p"),
    ])
});

/// Frequently confused Chinese homophones
static HOMOPHONES: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('的', "得地"),
        ('得', "的地"),
        ('地', "的得"),
        ('在', "再"),
        ('再', "在"),
        ('做', "作"),
        ('作', "做"),
        ('已', "以"),
        ('以', "已"),
        ('那', "哪"),
        ('哪', "那"),
        ('他', "她它"),
        ('她', "他它"),
        ('它', "他她"),
        ('是', "事试"),
        ('吗', "嘛吧"),
        ('吧', "把巴"),
        ('个', "各"),
        ('这', "着"),
        ('么', "吗"),
        ('会', "回汇"),
        ('想', "像相"),
        ('象', "像"),
        ('像', "象相"),
        ('到', "道倒"),
        ('道', "到"),
        ('有', "又友"),
        ('又', "有"),
        ('和', "合何"),
        ('就', "旧"),
        ('很', "狠恨"),
        ('时', "是十"),
        ('候', "后"),
        ('后', "候"),
        ('心', "新"),
        ('天', "田"),
        ('今', "金"),
        ('明', "名"),
        ('试', "是式"),
        ('息', "西"),
    ])
});

/// Contiguous scripts where an adjacent code point is another valid
/// character of the same kind
const ADJACENT_RANGES: [(u32, u32); 4] = [
    (0x4E00, 0x9FFF), // CJK unified ideographs
    (0x3041, 0x3096), // Hiragana
    (0x30A1, 0x30FA), // Katakana
    (0xAC00, 0xD7A3), // Hangul syllables
];

/// Probabilistic typo injector; holds no state
#[derive(Debug, Clone, Copy, Default)]
pub struct TypoInjector;

impl TypoInjector {
    pub fn new() -> Self {
        Self
    }

    /// Roll once against `rate`; on success corrupt one eligible character.
    ///
    /// `rate` is clamped to `[0, 1]`; `0` never corrupts and `1` always
    /// corrupts an eligible chunk. Chunks shorter than `MIN_TYPO_LENGTH`
    /// characters or without any eligible character come back untouched.
    pub fn inject_typo<R: Rng + ?Sized>(&self, text: &str, rate: f64, rng: &mut R) -> Option<Typo> {
        if !rng.gen_bool(clamp_probability(rate)) {
            return None;
        }

        let chars: Vec<char> = text.chars().collect();
        if chars.len() < MIN_TYPO_LENGTH {
            return None;
        }

        let eligible: Vec<usize> = chars
            .iter()
            .enumerate()
            .filter(|(_, c)| has_substitute(**c))
            .map(|(i, _)| i)
            .collect();
        let position = *eligible.choose(rng)?;

        let original = chars[position];
        let replacement = substitute(original, rng)?;

        let mut corrupted = chars;
        corrupted[position] = replacement;

        Some(Typo {
            text: corrupted.into_iter().collect(),
            position,
            original,
            replacement,
        })
    }

    /// Independent trial deciding whether a typo gets recalled
    pub fn should_recall_typo<R: Rng + ?Sized>(&self, recall_rate: f64, rng: &mut R) -> bool {
        rng.gen_bool(clamp_probability(recall_rate))
    }
}

/// Map any float onto a valid probability; NaN counts as 0
fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Whether `c` can be replaced by a different character
pub fn has_substitute(c: char) -> bool {
    KEYBOARD_NEIGHBORS.contains_key(&c.to_ascii_lowercase())
        || HOMOPHONES.contains_key(&c)
        || adjacent_range(c).is_some()
}

fn adjacent_range(c: char) -> Option<(u32, u32)> {
    let code = c as u32;
    ADJACENT_RANGES
        .into_iter()
        .find(|(lo, hi)| (*lo..=*hi).contains(&code))
}

/// Pick a replacement for `c`; always differs from `c`
fn substitute<R: Rng + ?Sized>(c: char, rng: &mut R) -> Option<char> {
    if let Some(neighbors) = KEYBOARD_NEIGHBORS.get(&c.to_ascii_lowercase()) {
        let options: Vec<char> = neighbors.chars().collect();
        let picked = *options.choose(rng)?;
        return Some(if c.is_ascii_uppercase() {
            picked.to_ascii_uppercase()
        } else {
            picked
        });
    }

    if let Some(homophones) = HOMOPHONES.get(&c) {
        let options: Vec<char> = homophones.chars().collect();
        return options.choose(rng).copied();
    }

    let (lo, hi) = adjacent_range(c)?;
    let code = c as u32;
    let next = if code == lo {
        code + 1
    } else if code == hi || rng.gen_bool(0.5) {
        code - 1
    } else {
        code + 1
    };
    char::from_u32(next)
}
