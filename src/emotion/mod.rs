pub mod fallback;
pub mod prompts;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// Emotional themes, in keyword table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Depression,
    Anxiety,
    Stress,
    Loneliness,
    Anger,
    Fear,
    SelfEsteem,
    Relationships,
    Work,
    Sleep,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Depression => "depression",
            Category::Anxiety => "anxiety",
            Category::Stress => "stress",
            Category::Loneliness => "loneliness",
            Category::Anger => "anger",
            Category::Fear => "fear",
            Category::SelfEsteem => "self_esteem",
            Category::Relationships => "relationships",
            Category::Work => "work",
            Category::Sleep => "sleep",
        }
    }
}

/// Lowercase trigger substrings per category.
pub struct KeywordTable {
    entries: &'static [(Category, &'static [&'static str])],
}

pub static KEYWORD_TABLE: KeywordTable = KeywordTable {
    entries: &[
        (
            Category::Depression,
            &[
                "depresión", "deprimido", "deprimida", "triste", "tristeza", "melancolía",
                "sin energía", "sin ganas", "vacío", "desesperanza", "sin sentido",
            ],
        ),
        (
            Category::Anxiety,
            &[
                "ansiedad", "ansioso", "ansiosa", "nervioso", "nerviosa", "preocupación",
                "pánico", "miedo", "temor", "inquietud", "agitación", "tensión",
            ],
        ),
        (
            Category::Stress,
            &[
                "estrés", "estresado", "estresada", "agobiado", "agobiada", "abrumado",
                "abrumada", "presión", "sobrecargado", "sobrecargada",
            ],
        ),
        (
            Category::Loneliness,
            &[
                "solo", "sola", "soledad", "aislado", "aislada", "abandonado", "abandonada",
                "incomprendido", "incomprendida", "desconectado", "desconectada",
            ],
        ),
        (
            Category::Anger,
            &[
                "enojado", "enojada", "enfadado", "enfadada", "ira", "rabia", "furioso",
                "furiosa", "molesto", "molesta", "irritado", "irritada",
            ],
        ),
        (
            Category::Fear,
            &[
                "miedo", "temor", "asustado", "asustada", "terror", "pánico", "fobia",
                "inseguridad", "vulnerabilidad",
            ],
        ),
        (
            Category::SelfEsteem,
            &[
                "autoestima", "inseguro", "insegura", "no valgo", "inútil", "fracaso",
                "no sirvo", "no soy suficiente", "me odio",
            ],
        ),
        (
            Category::Relationships,
            &[
                "relación", "pareja", "familia", "amigos", "conflicto", "ruptura",
                "divorcio", "problemas familiares", "soledad social",
            ],
        ),
        (
            Category::Work,
            &[
                "trabajo", "laboral", "jefe", "compañeros", "burnout", "agotamiento",
                "presión laboral", "desempleo", "estrés laboral",
            ],
        ),
        (
            Category::Sleep,
            &[
                "sueño", "insomnio", "no puedo dormir", "pesadillas", "cansado",
                "cansada", "agotado", "agotada", "fatiga",
            ],
        ),
    ],
};

impl KeywordTable {
    /// Plain substring search over the lowercased message. No tokenizing,
    /// so "triste" also matches inside "tristemente".
    pub fn detect(&self, message: &str) -> EmotionalContext {
        let lower = message.to_lowercase();
        let categories = self
            .entries
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
            .map(|(category, _)| *category)
            .collect();
        EmotionalContext(categories)
    }
}

pub fn detect_emotional_context(message: &str) -> EmotionalContext {
    KEYWORD_TABLE.detect(message)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmotionalContext(BTreeSet<Category>);

impl EmotionalContext {
    pub fn contains(&self, category: Category) -> bool {
        self.0.contains(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Category> for EmotionalContext {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        EmotionalContext(iter.into_iter().collect())
    }
}
