use serde::Serialize;

/// Which document a classified link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    Exam,
    AnswerKey,
    EssayTheme,
}

impl DocKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Exam => "exam",
            DocKind::AnswerKey => "answer_key",
            DocKind::EssayTheme => "essay_theme",
        }
    }
}

/// One expected document slot for a year: a filename key, a human-readable
/// description for diagnostics, and the normalized keywords that must all
/// appear in the callout text introducing its link group.
pub struct Category {
    pub key: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
}

/// The callout-driven catalog, in extraction order. The blue notebook is the
/// canonical print variant; regular and re-application use "Caderno 1" on
/// day 1 and "Caderno 7" on day 2, while the digital application never
/// carries a notebook number.
pub const CATALOG: &[Category] = &[
    Category {
        key: "regular_d1",
        description: "1º Dia - Caderno 1 - Azul - Aplicação Regular",
        keywords: &["1 dia", "caderno 1", "azul", "aplicacao regular"],
    },
    Category {
        key: "regular_d2",
        description: "2º Dia - Caderno 7 - Azul - Aplicação Regular",
        keywords: &["2 dia", "caderno 7", "azul", "aplicacao regular"],
    },
    Category {
        key: "digital_d1",
        description: "1º Dia - Caderno Azul - Aplicação Digital",
        keywords: &["1 dia", "caderno", "azul", "aplicacao digital"],
    },
    Category {
        key: "digital_d2",
        description: "2º Dia - Caderno Azul - Aplicação Digital",
        keywords: &["2 dia", "caderno", "azul", "aplicacao digital"],
    },
    Category {
        key: "reaplicacao_d1",
        description: "1º Dia - Caderno 1 - Azul - Reaplicação/PPL",
        keywords: &["1 dia", "caderno 1", "azul", "reaplicacao ppl"],
    },
    Category {
        key: "reaplicacao_d2",
        description: "2º Dia - Caderno 7 - Azul - Reaplicação/PPL",
        keywords: &["2 dia", "caderno 7", "azul", "reaplicacao ppl"],
    },
];

/// The re-application essay theme has no exam/answer-key pair and no callout;
/// it is found by a direct anchor-text search over the whole year scope.
pub const ESSAY_THEME_LABEL: &str = "Tema da Redação";
pub const ESSAY_THEME_KEY: &str = "reaplicacao_redacao";

/// One classified download link for a year.
#[derive(Debug, Clone, Serialize)]
pub struct LinkRecord {
    pub year: String,
    pub category_key: String,
    pub kind: DocKind,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    #[test]
    fn keywords_are_already_normalized() {
        for category in CATALOG {
            for kw in category.keywords {
                assert_eq!(normalize(kw), *kw, "keyword not in normalized form");
            }
        }
    }

    #[test]
    fn descriptions_match_their_keywords() {
        // Every category's own description must satisfy its keyword set,
        // otherwise the locator could never find the callout it names.
        for category in CATALOG {
            let normalized = normalize(category.description);
            for kw in category.keywords {
                assert!(
                    normalized.contains(kw),
                    "{}: '{}' missing from '{}'",
                    category.key,
                    kw,
                    normalized
                );
            }
        }
    }
}
