//! Text to sign-language lookup.
//!
//! Maps free text to a pre-recorded ISL GIF when a known phrase matches,
//! falling back to per-letter fingerspelling assets otherwise.

use std::path::Path;

use serde::Serialize;

/// Public URL prefix under which the GIF assets are served.
const PUBLIC_PREFIX: &str = "/static/text_to_sign/ISL_Gifs";

/// Subdirectory of the assets dir holding the GIF files.
const GIF_SUBDIR: &str = "ISL_Gifs";

/// Phrases with a dedicated sign-language GIF.
const PHRASES: &[&str] = &[
    "any questions", "are you angry", "are you busy", "are you hungry", "are you sick", "be careful",
    "can we meet tomorrow", "did you book tickets", "did you finish homework", "do you go to office", "do you have money",
    "do you want something to drink", "do you want tea or coffee", "do you watch TV", "dont worry", "flower is beautiful",
    "good afternoon", "good evening", "good morning", "good night", "good question", "had your lunch", "happy journey",
    "hello what is your name", "how many people are there in your family", "i am a clerk", "i am bore doing nothing",
    "i am fine", "i am sorry", "i am thinking", "i am tired", "i dont understand anything", "i go to a theatre", "i love to shop",
    "i had to say something but i forgot", "i have headache", "i like pink colour", "i live in nagpur", "lets go for lunch", "my mother is a homemaker",
    "my name is john", "nice to meet you", "no smoking please", "open the door", "please call me later",
    "please clean the room", "please give me your pen", "please use dustbin dont throw garbage", "please wait for sometime", "shall I help you",
    "shall we go together tommorow", "sign language interpreter", "sit down", "stand up", "take care", "there was traffic jam", "wait I am thinking",
    "what are you doing", "what is the problem", "what is todays date", "what is your father do", "what is your job",
    "what is your mobile number", "what is your name", "whats up", "when is your interview", "when we will go", "where do you stay",
    "where is the bathroom", "where is the police station", "you are wrong",
    "address", "agra", "ahemdabad", "good night", "all", "april", "assam", "august", "australia", "badoda", "banana", "banaras", "banglore",
    "bihar", "bridge", "cat", "chandigarh", "chennai", "christmas", "church", "clinic", "coconut", "crocodile", "dasara",
    "deaf", "december", "deer", "delhi", "dollar", "duck", "febuary", "friday", "fruits", "glass", "grapes", "gujrat", "hello",
    "hindu", "hyderabad", "india", "january", "jesus", "job", "july", "karnataka", "kerala", "krishna", "litre", "mango",
    "may", "mile", "monday", "mumbai", "museum", "muslim", "nagpur", "october", "orange", "pakistan", "pass", "police station",
    "post office", "pune", "punjab", "rajasthan", "ram", "restaurant", "saturday", "september", "shop", "sleep", "southafrica",
    "story", "sunday", "tamil nadu", "temperature", "temple", "thursday", "toilet", "tomato", "town", "tuesday", "usa", "village",
    "voice", "wednesday", "weight",
];

/// A phrase matched to a single GIF.
#[derive(Debug, Serialize)]
pub struct GifMatch {
    pub text: String,
    pub matched_phrase: String,
    pub status: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub gif_path: String,
    pub message: String,
}

/// One fingerspelled letter with the asset that renders it, if any.
#[derive(Debug, Serialize)]
pub struct LetterEntry {
    pub letter: char,
    pub path: Option<String>,
    pub format: Option<&'static str>,
}

/// Letter-by-letter spelling fallback.
#[derive(Debug, Serialize)]
pub struct SpellOut {
    pub text: String,
    pub status: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub letters: Vec<LetterEntry>,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TextToSignResponse {
    Gif(GifMatch),
    Spell(SpellOut),
}

/// Lowercase, trim and strip ASCII punctuation.
fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}

/// Find the phrase the normalized text refers to, if any.
///
/// Exact matches win. Otherwise candidates are scanned longest-first and
/// the first containment in either direction is taken, so that longer
/// phrases are preferred over substrings of themselves.
fn match_phrase(text: &str) -> Option<&'static str> {
    // An empty string is contained in every phrase; treat it as no match.
    if text.is_empty() {
        return None;
    }
    if let Some(exact) = PHRASES.iter().find(|p| normalize(p) == text) {
        return Some(exact);
    }
    let mut by_length: Vec<&'static str> = PHRASES.to_vec();
    by_length.sort_by_key(|p| std::cmp::Reverse(p.len()));
    by_length.into_iter().find(|p| {
        let phrase = normalize(p);
        text.contains(&phrase) || phrase.contains(text)
    })
}

/// Resolve text to either a phrase GIF or a fingerspelling plan.
pub fn lookup(assets_dir: &Path, raw_text: &str) -> TextToSignResponse {
    let text = normalize(raw_text);

    if let Some(phrase) = match_phrase(&text) {
        let gif_file = assets_dir.join(GIF_SUBDIR).join(format!("{phrase}.gif"));
        if gif_file.exists() {
            return TextToSignResponse::Gif(GifMatch {
                text: raw_text.to_string(),
                matched_phrase: phrase.to_string(),
                status: "success",
                kind: "gif",
                gif_path: format!("{PUBLIC_PREFIX}/{phrase}.gif"),
                message: format!("Found sign language GIF for: {phrase}"),
            });
        }
    }

    let letters = text
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|letter| {
            let gif = assets_dir.join(GIF_SUBDIR).join(format!("{letter}.gif"));
            let jpg = assets_dir.join(GIF_SUBDIR).join(format!("{letter}.jpg"));
            if gif.exists() {
                LetterEntry {
                    letter,
                    path: Some(format!("{PUBLIC_PREFIX}/{letter}.gif")),
                    format: Some("gif"),
                }
            } else if jpg.exists() {
                LetterEntry {
                    letter,
                    path: Some(format!("{PUBLIC_PREFIX}/{letter}.jpg")),
                    format: Some("jpg"),
                }
            } else {
                LetterEntry {
                    letter,
                    path: None,
                    format: None,
                }
            }
        })
        .collect();

    TextToSignResponse::Spell(SpellOut {
        text: raw_text.to_string(),
        status: "spell",
        kind: "letters",
        letters,
        message: format!("No GIF found. Will spell out: {text}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets_with(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let gifs = dir.path().join(GIF_SUBDIR);
        std::fs::create_dir_all(&gifs).unwrap();
        for file in files {
            std::fs::write(gifs.join(file), b"stub").unwrap();
        }
        dir
    }

    #[test]
    fn test_exact_phrase_resolves_to_gif() {
        let dir = assets_with(&["hello.gif"]);
        match lookup(dir.path(), "Hello!") {
            TextToSignResponse::Gif(m) => {
                assert_eq!(m.matched_phrase, "hello");
                assert_eq!(m.gif_path, "/static/text_to_sign/ISL_Gifs/hello.gif");
                assert_eq!(m.status, "success");
            }
            other => panic!("expected gif match, got {other:?}"),
        }
    }

    #[test]
    fn test_longest_phrase_wins_over_substring() {
        let dir = assets_with(&["hello what is your name.gif", "hello.gif"]);
        match lookup(dir.path(), "hello what is your name please") {
            TextToSignResponse::Gif(m) => {
                assert_eq!(m.matched_phrase, "hello what is your name");
            }
            other => panic!("expected gif match, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_gif_file_falls_back_to_spelling() {
        let dir = assets_with(&[]);
        match lookup(dir.path(), "hello") {
            TextToSignResponse::Spell(s) => {
                assert_eq!(s.letters.len(), 5);
                assert_eq!(s.status, "spell");
            }
            other => panic!("expected spelling, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_text_spells_alphabetic_chars_in_order() {
        let dir = assets_with(&["x.gif", "y.jpg"]);
        match lookup(dir.path(), "xyzxyz") {
            TextToSignResponse::Spell(s) => {
                assert_eq!(s.letters.len(), 6);
                let spelled: String = s.letters.iter().map(|l| l.letter).collect();
                assert_eq!(spelled, "xyzxyz");
                assert_eq!(s.letters[0].format, Some("gif"));
                assert_eq!(s.letters[1].format, Some("jpg"));
                assert_eq!(s.letters[2].format, None);
                assert!(s.letters[2].path.is_none());
            }
            other => panic!("expected spelling, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  Don't Worry!! "), "dont worry");
    }

    #[test]
    fn test_punctuation_only_input_matches_no_phrase() {
        let dir = assets_with(&["how many people are there in your family.gif"]);
        match lookup(dir.path(), "!!!") {
            TextToSignResponse::Spell(s) => assert!(s.letters.is_empty()),
            other => panic!("expected spelling, got {other:?}"),
        }
    }
}
