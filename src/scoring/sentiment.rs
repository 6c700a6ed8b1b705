use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{clamp_score, round2};

lazy_static! {
    static ref WORD: Regex = Regex::new(r"[a-z']+").expect("word pattern is valid");
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// A word matches when it starts with one of these stems.
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    pub positive_base: f64,
    pub neutral_base: f64,
    pub negative_base: f64,
    /// Points added (positive) or removed (negative) at 100% confidence.
    pub confidence_span: f64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        let words = |list: &[&str]| list.iter().map(|w| w.to_string()).collect();
        Self {
            positive_words: words(&[
                "happy", "good", "great", "excited", "joy", "love", "nice", "positive", "awesome",
                "fantastic", "calm", "grateful",
            ]),
            negative_words: words(&[
                "sad", "bad", "angry", "hate", "upset", "stress", "anxious", "depress", "tired",
                "worried", "lonely", "exhausted",
            ]),
            positive_base: 75.0,
            neutral_base: 50.0,
            negative_base: 25.0,
            confidence_span: 25.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentReport {
    pub sentiment: Sentiment,
    /// Share of words that hit a keyword list, as a percentage.
    pub confidence: f64,
    pub mood_score: i32,
    pub recommendations: Vec<String>,
}

fn matches_any(word: &str, stems: &[String]) -> bool {
    stems.iter().any(|stem| word.starts_with(stem.as_str()))
}

pub fn analyze(text: &str, config: &SentimentConfig) -> SentimentReport {
    let lower = text.to_lowercase();
    let words: Vec<&str> = WORD.find_iter(&lower).map(|m| m.as_str()).collect();

    let positive = words.iter().filter(|w| matches_any(w, &config.positive_words)).count();
    let negative = words.iter().filter(|w| matches_any(w, &config.negative_words)).count();
    let matched = positive + negative;

    if matched == 0 {
        return report(Sentiment::Neutral, 0.0, config);
    }

    let confidence = (matched as f64 / words.len() as f64 * 100.0).min(100.0);
    let sentiment = match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    };
    report(sentiment, confidence, config)
}

fn report(sentiment: Sentiment, confidence: f64, config: &SentimentConfig) -> SentimentReport {
    SentimentReport {
        sentiment,
        confidence: round2(confidence),
        mood_score: mood_score(sentiment, confidence, config),
        recommendations: recommendations(sentiment),
    }
}

pub fn mood_score(sentiment: Sentiment, confidence: f64, config: &SentimentConfig) -> i32 {
    let adjustment = config.confidence_span * confidence.clamp(0.0, 100.0) / 100.0;
    let score = match sentiment {
        Sentiment::Positive => config.positive_base + adjustment,
        Sentiment::Neutral => config.neutral_base,
        Sentiment::Negative => config.negative_base - adjustment,
    };
    clamp_score(score)
}

pub fn recommendations(sentiment: Sentiment) -> Vec<String> {
    let lines: &[&str] = match sentiment {
        Sentiment::Positive => &[
            "Keep up the positive mindset with regular exercise and social connections",
            "Practice gratitude and maintain your current healthy habits",
            "Consider sharing your positivity with others who might need support",
        ],
        Sentiment::Negative => &[
            "Consider talking to a trusted friend, family member, or mental health professional",
            "Try relaxation techniques like deep breathing or meditation",
            "Engage in physical activity, even a short walk can help improve mood",
            "Ensure you're getting adequate sleep and nutrition",
        ],
        Sentiment::Neutral => &[
            "Engage in activities that bring you joy and fulfillment",
            "Connect with friends and family for social support",
            "Try mindfulness or meditation practices",
            "Consider exploring new hobbies or interests",
        ],
    };
    lines.iter().map(|s| s.to_string()).collect()
}
