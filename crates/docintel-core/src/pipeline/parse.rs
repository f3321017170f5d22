//! Heuristic parsing of free-text LLM output into facts and questions

use super::Question;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMBERED_ITEM_RE: Regex = Regex::new(r"^\d+[.)]\s*(.+)$").unwrap();
}

const BULLET_MARKERS: [char; 3] = ['-', '•', '*'];

/// Lines starting with these words are prompt echoes, never numbered facts
const HEADER_WORDS: [&str; 3] = ["Extract", "Facts", "Key"];

/// Parse a fact-extraction response.
///
/// Bulleted lines win, then `N.`/`N)` numbered lines; if nothing matched the
/// whole response becomes a single fact.
pub fn parse_facts(response: &str) -> Vec<String> {
    let mut facts = Vec::new();

    for line in response.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with(BULLET_MARKERS) {
            let fact = line
                .trim_start_matches(|c| BULLET_MARKERS.contains(&c) || c == ' ')
                .trim();
            if !fact.is_empty() {
                facts.push(fact.to_string());
            }
        } else if !HEADER_WORDS.iter().any(|w| line.starts_with(w)) {
            if let Some(caps) = NUMBERED_ITEM_RE.captures(line) {
                facts.push(caps[1].trim().to_string());
            }
        }
    }

    if facts.is_empty() {
        vec![response.to_string()]
    } else {
        facts
    }
}

/// Parse a question-generation response.
///
/// `Q:`/`Question:` opens a question, `Type:` tags the pending one, and a bare
/// line containing `?` opens a question only while none has been seen yet.
pub fn parse_questions(response: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut current: Option<String> = None;
    let mut current_type: Option<String> = None;

    for line in response.split('\n') {
        let line = line.trim();

        if line.starts_with("Q:") || line.starts_with("Question:") {
            flush(&mut questions, current.as_deref(), current_type.as_deref());
            current = Some(after_colon(line).to_string());
            current_type = None;
        } else if line.starts_with("Type:") {
            current_type = Some(after_colon(line).to_lowercase());
        } else if !line.is_empty() && current.is_none() && line.contains('?') {
            current = Some(line.to_string());
        }
    }
    flush(&mut questions, current.as_deref(), current_type.as_deref());

    if questions.is_empty() {
        vec![Question::general(response)]
    } else {
        questions
    }
}

fn after_colon(line: &str) -> &str {
    line.split_once(':').map(|(_, rest)| rest.trim()).unwrap_or("")
}

fn flush(questions: &mut Vec<Question>, text: Option<&str>, kind: Option<&str>) {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return;
    };
    let kind = kind
        .filter(|k| !k.is_empty())
        .unwrap_or(Question::GENERAL);
    questions.push(Question::new(text, kind));
}
