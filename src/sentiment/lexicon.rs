//! Lexicon-based sentiment scorer
//!
//! Each known word carries a valence on a -4..4 scale. Valences are adjusted for
//! preceding intensifiers and negations, for shouting in caps, for a contrastive
//! "but" and for exclamation marks, then summed and squashed into [-1, 1] with
//! `s / sqrt(s^2 + 15)`.

use crate::sentiment::SentimentScorer;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

const NORMALIZATION_ALPHA: f64 = 15.0;
const BOOST_INCREMENT: f64 = 0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const NEGATION_WINDOW: usize = 3;

static VALENCES: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        // positive
        ("good", 1.9),
        ("great", 3.1),
        ("excellent", 2.7),
        ("amazing", 2.8),
        ("wonderful", 2.7),
        ("fantastic", 2.6),
        ("superb", 3.1),
        ("outstanding", 3.0),
        ("brilliant", 2.8),
        ("love", 3.2),
        ("loved", 2.9),
        ("loving", 2.9),
        ("lovely", 2.8),
        ("like", 1.5),
        ("liked", 1.8),
        ("best", 3.2),
        ("better", 1.9),
        ("nice", 1.8),
        ("cool", 1.3),
        ("fun", 2.3),
        ("happy", 2.7),
        ("glad", 2.0),
        ("joy", 2.8),
        ("beautiful", 2.9),
        ("perfect", 2.7),
        ("awesome", 3.1),
        ("incredible", 1.7),
        ("delightful", 2.9),
        ("pleasant", 2.3),
        ("satisfied", 1.8),
        ("recommend", 1.5),
        ("impressive", 2.3),
        ("success", 2.7),
        ("successful", 2.8),
        ("win", 2.8),
        ("helpful", 1.8),
        ("useful", 1.9),
        ("reliable", 1.7),
        ("thanks", 1.9),
        ("thank", 1.5),
        ("well", 1.1),
        ("interesting", 1.7),
        ("agree", 1.5),
        ("enjoy", 2.2),
        ("enjoyed", 2.3),
        ("yes", 1.7),
        ("wow", 2.8),
        ("congrats", 2.4),
        ("congratulations", 2.9),
        ("support", 1.7),
        ("smart", 1.7),
        ("clear", 1.6),
        ("easy", 1.9),
        ("fine", 0.8),
        ("okay", 0.9),
        ("ok", 0.9),
        // negative
        ("bad", -2.5),
        ("terrible", -2.1),
        ("awful", -2.0),
        ("horrible", -2.5),
        ("poor", -2.1),
        ("worst", -3.1),
        ("worse", -2.1),
        ("hate", -2.7),
        ("hated", -3.2),
        ("dislike", -1.6),
        ("disappointing", -2.2),
        ("disappointed", -1.9),
        ("failure", -2.3),
        ("failed", -2.3),
        ("fail", -2.5),
        ("sad", -2.1),
        ("unhappy", -1.8),
        ("angry", -2.3),
        ("annoyed", -1.6),
        ("annoying", -1.7),
        ("frustrated", -2.4),
        ("frustrating", -1.9),
        ("problem", -1.7),
        ("problems", -1.7),
        ("broken", -2.0),
        ("wrong", -2.1),
        ("useless", -1.8),
        ("waste", -1.8),
        ("scam", -2.5),
        ("fake", -2.1),
        ("boring", -1.3),
        ("slow", -0.9),
        ("difficult", -1.5),
        ("confusing", -1.3),
        ("garbage", -2.3),
        ("trash", -1.6),
        ("pathetic", -2.2),
        ("mediocre", -1.0),
        ("stupid", -2.4),
        ("ugly", -2.3),
        ("no", -1.2),
        ("sucks", -1.5),
        ("ridiculous", -1.3),
        ("disagree", -1.6),
        ("problematic", -1.5),
        ("mess", -1.5),
        ("pain", -2.3),
        ("worry", -1.9),
        ("lame", -1.8),
    ]
    .into_iter()
    .collect()
});

static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("absolutely", BOOST_INCREMENT),
        ("completely", BOOST_INCREMENT),
        ("extremely", BOOST_INCREMENT),
        ("incredibly", BOOST_INCREMENT),
        ("really", BOOST_INCREMENT),
        ("so", BOOST_INCREMENT),
        ("totally", BOOST_INCREMENT),
        ("very", BOOST_INCREMENT),
        ("barely", -BOOST_INCREMENT),
        ("hardly", -BOOST_INCREMENT),
        ("slightly", -BOOST_INCREMENT),
        ("somewhat", -BOOST_INCREMENT),
        ("marginally", -BOOST_INCREMENT),
    ]
    .into_iter()
    .collect()
});

static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "never", "no", "none", "nope", "nothing", "nowhere", "neither", "nor",
        "without", "cannot", "isnt", "dont", "doesnt", "didnt", "cant", "wont",
        "wasnt", "arent", "shouldnt", "wouldnt", "couldnt",
    ]
    .into_iter()
    .collect()
});

/// Default scorer backed by a small built-in word list
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }
}

struct Token {
    word: String,
    shouted: bool,
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|raw| {
            let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric());
            if trimmed.is_empty() {
                return None;
            }
            let shouted = trimmed.chars().count() > 1
                && trimmed.chars().any(|c| c.is_alphabetic())
                && trimmed
                    .chars()
                    .filter(|c| c.is_alphabetic())
                    .all(|c| c.is_uppercase());
            let word = trimmed
                .to_lowercase()
                .chars()
                .filter(|c| *c != '\'' && *c != '\u{2019}')
                .collect();
            Some(Token { word, shouted })
        })
        .collect()
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(word)
}

impl SentimentScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        // Caps only count as emphasis when the text is not shouted throughout
        let mixed_case = tokens.iter().any(|t| !t.shouted);
        let but_at = tokens.iter().position(|t| t.word == "but");

        let mut sum = 0.0;
        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = VALENCES.get(token.word.as_str()) else {
                continue;
            };
            let mut valence = base;
            if token.shouted && mixed_case {
                valence += CAPS_INCREMENT * base.signum();
            }

            let window = &tokens[i.saturating_sub(NEGATION_WINDOW)..i];
            for prev in window.iter().rev() {
                if let Some(&boost) = BOOSTERS.get(prev.word.as_str()) {
                    valence += boost * base.signum();
                }
            }
            if window.iter().any(|prev| is_negation(&prev.word)) {
                valence *= NEGATION_SCALAR;
            }

            if let Some(b) = but_at {
                valence *= if i < b { 0.5 } else { 1.5 };
            }

            sum += valence;
        }

        if sum != 0.0 {
            let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
            sum += exclamations as f64 * EXCLAMATION_INCREMENT * sum.signum();
        }

        normalize(sum)
    }
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}
