//! Assessment matrix: the CV 7991 structure every generated test must follow.
//!
//! This is configuration data. Nothing in the service checks a generated test
//! against it; the matrix is rendered into the system instruction and the
//! model is trusted to comply.

use serde::Serialize;

/// Cognitive levels named by the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CognitiveLevel {
    Recognition,
    Comprehension,
    SimpleApplication,
    Application,
    HighApplication,
}

impl CognitiveLevel {
    pub fn label(self) -> &'static str {
        match self {
            CognitiveLevel::Recognition => "Recognition",
            CognitiveLevel::Comprehension => "Comprehension",
            CognitiveLevel::SimpleApplication => "Simple Application",
            CognitiveLevel::Application => "Application",
            CognitiveLevel::HighApplication => "High Application",
        }
    }
}

/// One numbered section inside a part, e.g. "Section II: 2 Error ID".
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatrixSection {
    pub questions: u32,
    pub task: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatrixPart {
    pub label: char,
    pub name: &'static str,
    pub points: f32,
    pub questions: u32,
    pub sections: &'static [MatrixSection],
    /// Extra constraints stated verbatim to the model.
    pub rules: &'static [&'static str],
    /// Cognitive levels stated for the part; empty when the part names none.
    pub levels: &'static [CognitiveLevel],
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CognitiveShare {
    pub level: CognitiveLevel,
    pub percent: u8,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatrixConfig {
    pub curriculum: &'static str,
    pub total_points: f32,
    pub parts: &'static [MatrixPart],
    pub cognitive_distribution: &'static [CognitiveShare],
}

impl MatrixConfig {
    pub fn total_questions(&self) -> u32 {
        self.parts.iter().map(|p| p.questions).sum()
    }

    pub fn points_sum(&self) -> f32 {
        self.parts.iter().map(|p| p.points).sum()
    }
}

use CognitiveLevel::*;

pub const MOET_MATRIX: MatrixConfig = MatrixConfig {
    curriculum: "Vietnamese MoET General Education Curriculum for English (CV 7991/BGDĐT-GDTrH)",
    total_points: 10.0,
    parts: &[
        MatrixPart {
            label: 'A',
            name: "LISTENING",
            points: 2.0,
            questions: 10,
            sections: &[
                MatrixSection {
                    questions: 5,
                    task: "\"I. Listen to ...\" Multiple Choice questions (A/B/C)",
                },
                MatrixSection {
                    questions: 5,
                    task: "\"II. Listen and fill into the gaps with one word / no more than two/three words\" Gap-filling questions",
                },
            ],
            rules: &[
                "Must create TWO INDEPENDENT listening tasks with DIFFERENT TOPICS.",
                "You MUST provide two distinct Listening Scripts (Script I and Script II).",
            ],
            levels: &[Recognition, Comprehension],
        },
        MatrixPart {
            label: 'B',
            name: "LANGUAGE FOCUS",
            points: 3.0,
            questions: 15,
            sections: &[
                MatrixSection {
                    questions: 10,
                    task: "MCQ: 2 Pronunciation, 3 Vocab, 3 Grammar, 1 Communication",
                },
                MatrixSection {
                    questions: 2,
                    task: "Error ID",
                },
                MatrixSection {
                    questions: 3,
                    task: "Verb Forms",
                },
            ],
            rules: &[],
            levels: &[],
        },
        MatrixPart {
            label: 'C',
            name: "READING",
            points: 2.4,
            questions: 12,
            sections: &[
                MatrixSection {
                    questions: 1,
                    task: "Sign/Picture interpretation question",
                },
                MatrixSection {
                    questions: 5,
                    task: "Cloze test questions",
                },
                MatrixSection {
                    questions: 6,
                    task: "Reading Comprehension questions",
                },
            ],
            rules: &[
                "The 6 Reading Comprehension questions MUST be Multiple Choice (A, B, C) where students choose the correct answer, NOT open-ended questions.",
            ],
            levels: &[Recognition, Comprehension, SimpleApplication],
        },
        MatrixPart {
            label: 'D',
            name: "WRITING",
            points: 2.6,
            questions: 9,
            sections: &[
                MatrixSection {
                    questions: 3,
                    task: "Reordering/Arrangement questions",
                },
                MatrixSection {
                    questions: 5,
                    task: "Sentence Rewriting questions (same meaning)",
                },
                MatrixSection {
                    questions: 1,
                    task: "Paragraph writing task (80-100 words)",
                },
            ],
            rules: &[],
            levels: &[Comprehension, Application, HighApplication],
        },
    ],
    cognitive_distribution: &[
        CognitiveShare {
            level: Recognition,
            percent: 40,
        },
        CognitiveShare {
            level: Comprehension,
            percent: 45,
        },
        CognitiveShare {
            level: Application,
            percent: 15,
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_points_add_up_to_total() {
        assert!((MOET_MATRIX.points_sum() - MOET_MATRIX.total_points).abs() < 1e-4);
    }

    #[test]
    fn test_sections_match_part_question_counts() {
        for part in MOET_MATRIX.parts {
            let in_sections: u32 = part.sections.iter().map(|s| s.questions).sum();
            assert_eq!(in_sections, part.questions, "part {}", part.label);
        }
        assert_eq!(MOET_MATRIX.total_questions(), 46);
    }

    #[test]
    fn test_cognitive_distribution_is_complete() {
        let total: u32 = MOET_MATRIX
            .cognitive_distribution
            .iter()
            .map(|s| s.percent as u32)
            .sum();
        assert_eq!(total, 100);
    }
}
