// Prompt text for the Generation module.
// The matrix rules are rendered from `matrix::MOET_MATRIX`; only the fixed
// framing and the output schema live here as literals.

use crate::generation::matrix::MatrixConfig;

const ROLE_PREAMBLE: &str = "You are an expert Educational Assessment AI specializing in the";

const TASK_STATEMENT: &str = "Your task is to generate high-quality, pedagogically valid English tests \
based ONLY on provided learning materials.";

const CLOSING_RULES: &str = "NO MEMORIZATION QUESTIONS.\n\
All content must align with Global Success curriculum standards for secondary schools.";

/// The JSON object the model must return. Keys must match `GeneratedTest`.
pub const OUTPUT_SCHEMA: &str = r#"The output must be a valid JSON object containing exactly these keys, all strings:
{
  "title": "Full test title",
  "testPaper": "Markdown formatted test content with standard Vietnamese MoET heading. Ensure Part A and Part C follow the specific section structures defined above.",
  "listeningScript": "Markdown formatted scripts labeled Script I and Script II",
  "answerKey": "Markdown formatted key",
  "markingRubric": "Markdown formatted rubric",
  "matrixReport": "Markdown table following CV 7991 format"
}"#;

/// Renders the fixed system instruction for test generation.
pub fn build_system_instruction(matrix: &MatrixConfig) -> String {
    let mut out = format!("{ROLE_PREAMBLE} {}.\n{TASK_STATEMENT}\n\n", matrix.curriculum);
    out.push_str("STRICT MATRIX REQUIREMENTS:\n");

    for part in matrix.parts {
        out.push_str(&format!(
            "- PART {} – {} ({:.1} pts): {} questions total.\n",
            part.label, part.name, part.points, part.questions
        ));
        for rule in part.rules {
            out.push_str(&format!("  * {rule}\n"));
        }
        for (index, section) in part.sections.iter().enumerate() {
            out.push_str(&format!(
                "  * Section {}: {} {}.\n",
                roman(index + 1),
                section.questions,
                section.task
            ));
        }
        if !part.levels.is_empty() {
            let levels: Vec<&str> = part.levels.iter().map(|l| l.label()).collect();
            out.push_str(&format!("  * Levels: {}.\n", levels.join(", ")));
        }
        out.push('\n');
    }

    let shares: Vec<String> = matrix
        .cognitive_distribution
        .iter()
        .map(|s| format!("{} (~{}%)", s.level.label(), s.percent))
        .collect();
    out.push_str(&format!("COGNITIVE BALANCE: {}.\n", shares.join(", ")));
    out.push_str(CLOSING_RULES);
    out.push_str("\n\n");
    out.push_str(OUTPUT_SCHEMA);
    out
}

fn roman(n: usize) -> &'static str {
    match n {
        1 => "I",
        2 => "II",
        3 => "III",
        4 => "IV",
        _ => "V",
    }
}

/// Material analysis prompt. Replace `{content}` before sending.
pub const METADATA_PROMPT_TEMPLATE: &str = r#"Analyze this content and extract:
1. Main Topics
2. Core Vocabulary
3. Target Grammar Structures

Return a brief JSON object with this EXACT schema:
{
  "main_topics": ["Television"],
  "core_vocabulary": ["channel", "programme"],
  "grammar_structures": ["Present perfect"]
}

Content:
{content}"#;
