// src/matching/extraction.rs
//
// Skill extraction is an injected capability so the scorer and provisioner
// never depend on how skills were obtained. The mock extractor stands in
// for a real resume-parsing collaborator and can be swapped without
// touching anything downstream.

use async_trait::async_trait;
use rand::Rng;
use regex::RegexBuilder;

use crate::common::helpers::truncate_preview;
use crate::common::MatchError;
use crate::matching::models::CvFile;

/// Skill list plus a short human-readable preview of the CV content.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub skills: Vec<String>,
    pub preview: String,
}

#[async_trait]
pub trait SkillExtractor: Send + Sync {
    async fn extract(&self, file: &CvFile) -> Result<Extraction, MatchError>;
}

// ============================================================================
// Mock Extraction
// ============================================================================

/// Fixed skill-set table the mock extractor draws from.
pub const MOCK_SKILL_SETS: [&[&str]; 8] = [
    &["React", "TypeScript", "Node.js", "GraphQL", "AWS", "Docker"],
    &["Python", "Django", "PostgreSQL", "REST APIs", "Docker", "AWS"],
    &["Figma", "UI/UX", "Prototyping", "User Research", "Design Systems"],
    &["JavaScript", "Vue.js", "CSS", "HTML", "Git", "Webpack"],
    &["SQL", "Python", "Tableau", "Power BI", "Data Analysis", "Statistics"],
    &["Java", "Spring Boot", "Microservices", "Docker", "Kubernetes"],
    &["Google Analytics", "SEO", "SEM", "Content Marketing", "HubSpot"],
    &["Sketch", "InVision", "Principle", "Wireframing", "Usability Testing"],
];

fn mock_skill_row() -> Vec<String> {
    let idx = rand::thread_rng().gen_range(0..MOCK_SKILL_SETS.len());
    MOCK_SKILL_SETS[idx].iter().map(|s| s.to_string()).collect()
}

fn mock_preview(file_name: &str, skills: &[String]) -> String {
    let head: Vec<&str> = skills.iter().take(3).map(String::as_str).collect();
    format!(
        "Extracted content from {}... This CV contains skills in {}...",
        file_name,
        head.join(", ")
    )
}

/// Picks a random row from the fixed skill-set table. Never reads the file
/// bytes.
#[derive(Debug, Default)]
pub struct MockSkillExtractor;

#[async_trait]
impl SkillExtractor for MockSkillExtractor {
    async fn extract(&self, file: &CvFile) -> Result<Extraction, MatchError> {
        let skills = mock_skill_row();
        let preview = mock_preview(&file.name, &skills);
        Ok(Extraction { skills, preview })
    }
}

// ============================================================================
// Keyword Extraction
// ============================================================================

const SKILL_PATTERNS: [&str; 10] = [
    r"\b(React|Angular|Vue|JavaScript|TypeScript|Node\.js|Express|Django|Flask|Spring|Laravel)\b",
    r"\b(Python|Java|C\+\+|C#|Go|Rust|PHP|Ruby|Swift|Kotlin)\b",
    r"\b(HTML|CSS|SCSS|SASS|Bootstrap|Tailwind|Material-UI)\b",
    r"\b(SQL|MySQL|PostgreSQL|MongoDB|Redis|Elasticsearch)\b",
    r"\b(AWS|Azure|GCP|Docker|Kubernetes|Jenkins|Git|GitHub|GitLab)\b",
    r"\b(Figma|Sketch|Adobe XD|InVision|Zeplin|Prototyping)\b",
    r"\b(UI/UX|User Experience|User Interface|Design Systems)\b",
    r"\b(Machine Learning|AI|Data Science|TensorFlow|PyTorch|NLP)\b",
    r"\b(Agile|Scrum|Kanban|JIRA|Confluence|Trello)\b",
    r"\b(REST|GraphQL|API|Microservices|Serverless)\b",
];

const PREVIEW_CHARS: usize = 200;

/// Extracts skills from CV text with a keyword pattern table, normalizing
/// common variants and deduplicating while preserving first-seen order.
/// Falls back to a mock table row when nothing is found, so demo uploads
/// always produce something scoreable.
pub struct TextSkillExtractor {
    patterns: Vec<regex::Regex>,
}

impl TextSkillExtractor {
    pub fn new() -> Self {
        let patterns = SKILL_PATTERNS
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .expect("skill pattern is a valid regex")
            })
            .collect();
        Self { patterns }
    }

    fn extract_from_text(&self, text: &str) -> Vec<String> {
        let mut skills: Vec<String> = Vec::new();
        for pattern in &self.patterns {
            for found in pattern.find_iter(text) {
                let skill = normalize_skill(found.as_str());
                if !skills.iter().any(|s| s.eq_ignore_ascii_case(&skill)) {
                    skills.push(skill);
                }
            }
        }
        skills
    }
}

impl Default for TextSkillExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_skill(raw: &str) -> String {
    let lower = raw.to_lowercase();
    match lower.as_str() {
        "react" => "React".to_string(),
        "angular" => "Angular".to_string(),
        "vue" => "Vue".to_string(),
        "node.js" | "nodejs" => "Node.js".to_string(),
        "ui/ux" | "user experience" | "user interface" => "UI/UX".to_string(),
        _ => raw.to_string(),
    }
}

#[async_trait]
impl SkillExtractor for TextSkillExtractor {
    async fn extract(&self, file: &CvFile) -> Result<Extraction, MatchError> {
        let text = String::from_utf8_lossy(&file.bytes);
        let skills = self.extract_from_text(&text);

        if skills.is_empty() {
            let skills = mock_skill_row();
            let preview = mock_preview(&file.name, &skills);
            return Ok(Extraction { skills, preview });
        }

        let preview = truncate_preview(text.trim(), PREVIEW_CHARS);
        Ok(Extraction { skills, preview })
    }
}
