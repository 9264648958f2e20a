use crate::random::{choose, RandomSource};

pub const MAX_RESPONSE_CHARS: usize = 300;
// A sentence end must sit past this position to be used as the cut point
pub const MIN_RETAINED_CHARS: usize = 200;
// Cleaned text must be longer than this to count as a reply
pub const MIN_RESPONSE_CHARS: usize = 10;

const ARTIFACT_LABELS: &[&str] = &["Freuda:", "Usuario:", "AI:", "Assistant:"];

const EMPATHY_MARKERS: &[&str] = &["entiendo", "comprendo", "escucho"];
const PRESENCE_MARKER: &str = "aquí";

const EMPATHY_STARTERS: &[&str] = &[
    "Entiendo que ",
    "Puedo percibir que ",
    "Me parece que ",
    "Escucho en tus palabras que ",
];

pub const SUPPORTIVE_ENDINGS: &[&str] = &[
    " ¿Cómo te sientes al respecto?",
    " ¿Qué piensas sobre esto?",
    " ¿Te gustaría explorar esto más?",
    " Estoy aquí para acompañarte.",
];

/// Removes prompt echoes and role labels, flattens newlines and bounds the
/// length of raw generated text.
pub fn clean_response(raw: &str, user_message: &str) -> String {
    let mut text = raw;

    if let Some(idx) = text.find(user_message) {
        text = text[idx + user_message.len()..].trim();
    }

    let text = strip_artifact_label(text).trim();
    let text = collapse_newlines(text);
    truncate_response(text.trim())
}

fn strip_artifact_label(text: &str) -> &str {
    for label in ARTIFACT_LABELS {
        let len = label.len();
        if text.is_char_boundary(len) && text[..len].eq_ignore_ascii_case(label) {
            return &text[len..];
        }
    }
    text
}

fn collapse_newlines(text: &str) -> String {
    text.split('\n')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_response(text: &str) -> String {
    let cut = match text.char_indices().nth(MAX_RESPONSE_CHARS) {
        Some((byte_idx, _)) => byte_idx,
        None => return text.to_string(),
    };
    let truncated = text[..cut].trim();

    let sentence_end = truncated
        .char_indices()
        .enumerate()
        .filter(|(_, (_, c))| matches!(c, '.' | '?' | '!'))
        .last();

    match sentence_end {
        Some((pos, (byte_idx, c))) if pos > MIN_RETAINED_CHARS => {
            truncated[..byte_idx + c.len_utf8()].to_string()
        }
        _ => truncated.to_string(),
    }
}

pub fn is_substantial(text: &str) -> bool {
    text.chars().count() > MIN_RESPONSE_CHARS
}

/// Adds an empathetic opener when the text has no empathy marker, and an
/// inviting closer when it neither asks anything nor offers presence.
pub fn enhance_response(text: &str, random: &dyn RandomSource) -> String {
    let lower = text.to_lowercase();
    let mut response = if EMPATHY_MARKERS.iter().any(|m| lower.contains(m)) {
        text.to_string()
    } else {
        format!("{}{}", choose(random, EMPATHY_STARTERS), lowercase_first(text))
    };

    if !response.contains('?') && !response.to_lowercase().contains(PRESENCE_MARKER) {
        response.push_str(choose(random, SUPPORTIVE_ENDINGS));
    }

    response
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::{FixedIndex, Scripted};

    #[test]
    fn strips_leading_label_case_insensitively() {
        assert_eq!(clean_response("Freuda: Hola, te escucho", "x"), "Hola, te escucho");
        assert_eq!(clean_response("freuda:Hola", "x"), "Hola");
        assert_eq!(clean_response("ASSISTANT: Hola", "x"), "Hola");
    }

    #[test]
    fn only_one_leading_label_is_removed() {
        assert_eq!(clean_response("AI: Usuario: hola", "x"), "Usuario: hola");
        assert_eq!(clean_response("Dice Freuda: hola", "x"), "Dice Freuda: hola");
    }

    #[test]
    fn drops_echoed_user_message() {
        let raw = "Usuario: me siento mal\nFreuda: Lo siento mucho, cuéntame más.";
        assert_eq!(clean_response(raw, "me siento mal"), "Lo siento mucho, cuéntame más.");
    }

    #[test]
    fn collapses_newline_runs() {
        assert_eq!(clean_response("uno\n\n\ndos\ntres\n", "x"), "uno dos tres");
    }

    #[test]
    fn short_text_is_left_alone() {
        let text = "Todo bien.";
        assert_eq!(clean_response(text, "x"), text);
        assert!(!is_substantial(text));
        assert!(is_substantial("Todo muy bien."));
    }

    #[test]
    fn long_text_ends_at_last_sentence_past_minimum() {
        let first = "a".repeat(240);
        let raw = format!("{first}. {}", "b".repeat(200));
        let cleaned = clean_response(&raw, "zzz");
        assert_eq!(cleaned, format!("{first}."));
        assert!(cleaned.chars().count() <= MAX_RESPONSE_CHARS);
    }

    #[test]
    fn long_text_without_late_sentence_end_is_hard_cut() {
        let raw = format!("Hola. {}", "é".repeat(400));
        let cleaned = clean_response(&raw, "zzz");
        assert_eq!(cleaned.chars().count(), MAX_RESPONSE_CHARS);
        assert!(cleaned.starts_with("Hola. "));
    }

    #[test]
    fn cleaned_output_never_exceeds_maximum() {
        for n in [0, 10, 299, 300, 301, 1000] {
            let raw = "palabra ".repeat(n);
            assert!(clean_response(&raw, "zzz").chars().count() <= MAX_RESPONSE_CHARS);
        }
    }

    #[test]
    fn adds_opener_and_lowercases_first_letter() {
        let enhanced = enhance_response("Eso suena difícil. ¿Qué pasó?", &FixedIndex(1));
        assert_eq!(enhanced, "Puedo percibir que eso suena difícil. ¿Qué pasó?");
    }

    #[test]
    fn keeps_text_with_empathy_marker() {
        let enhanced = enhance_response("Comprendo lo que dices. ¿Desde cuándo?", &FixedIndex(0));
        assert_eq!(enhanced, "Comprendo lo que dices. ¿Desde cuándo?");
    }

    #[test]
    fn appends_closer_without_question_or_presence() {
        let enhanced = enhance_response("Entiendo tu situación", &FixedIndex(0));
        assert_eq!(enhanced, "Entiendo tu situación ¿Cómo te sientes al respecto?");
    }

    #[test]
    fn presence_marker_suppresses_closer() {
        let enhanced = enhance_response("Te escucho, sigo AQUÍ contigo.", &FixedIndex(0));
        assert_eq!(enhanced, "Te escucho, sigo AQUÍ contigo.");
    }

    #[test]
    fn opener_and_closer_pick_independently() {
        let enhanced = enhance_response("Eso suena difícil.", &Scripted::new(&[2, 3]));
        assert_eq!(enhanced, "Me parece que eso suena difícil. Estoy aquí para acompañarte.");
    }
}
