//! Job-description analyzer: keyword and regex extraction plus research tips.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::JobDescription;

pub const SKILL_KEYWORDS: &[&str] = &[
  "javascript", "typescript", "react", "vue", "angular", "node.js", "python",
  "java", "c++", "c#", "go", "rust", "swift", "kotlin", "php", "ruby",
  "html", "css", "sass", "bootstrap", "tailwind", "sql", "mongodb",
  "postgresql", "mysql", "redis", "docker", "kubernetes", "aws", "azure",
  "gcp", "git", "jenkins", "terraform", "ansible", "microservices",
  "rest", "graphql", "websockets", "oauth", "jwt", "testing", "jest",
  "cypress", "selenium", "agile", "scrum", "kanban", "jira", "confluence",
  "figma", "sketch", "adobe", "photoshop", "illustrator", "ux", "ui",
  "design thinking", "user research", "wireframing", "prototyping",
];

/// Checked in order; the first industry with a keyword hit wins.
pub const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
  ("Technology", &["tech", "software", "saas", "startup", "ai", "ml"]),
  ("Finance", &["finance", "banking", "fintech", "investment", "trading"]),
  ("Healthcare", &["healthcare", "medical", "pharma", "biotech", "health"]),
  ("Retail", &["retail", "ecommerce", "e-commerce", "shopping", "consumer"]),
  ("Education", &["education", "edtech", "learning", "university", "school"]),
  ("Marketing", &["marketing", "advertising", "digital marketing", "seo", "sem"]),
];

pub const DEFAULT_INDUSTRY: &str = "Technology";
pub const DEFAULT_TITLE: &str = "Software Engineer";
pub const DEFAULT_COMPANY: &str = "TechCorp";
pub const EXPERIENCE_NOT_SPECIFIED: &str = "Not specified";

static EXPERIENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
  [
    r"(\d+)\+?\s*years?\s*(of\s*)?experience",
    r"(\d+)\+?\s*years?\s*in",
    r"minimum\s*(\d+)\s*years?",
    r"at least\s*(\d+)\s*years?",
  ]
  .iter()
  .filter_map(|p| Regex::new(p).ok())
  .collect()
});

static COMPANY_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"at\s+([A-Z][a-zA-Z\s&]+)").ok());

/// Parse a raw job posting. Never fails; missing pieces get their documented defaults.
#[instrument(level = "debug", skip(description), fields(text_len = description.len()))]
pub fn parse(description: &str) -> JobDescription {
  let lower = description.to_lowercase();
  let job = JobDescription {
    title: extract_title(description),
    company: extract_company(description),
    skills: extract_skills(&lower),
    experience: extract_experience(&lower),
    description: description.to_string(),
    industry: determine_industry(&lower).to_string(),
  };
  debug!(target: "interview", title = %job.title, company = %job.company, skills = job.skills.len(), industry = %job.industry, "Parsed job description");
  job
}

fn extract_skills(lower: &str) -> Vec<String> {
  SKILL_KEYWORDS
    .iter()
    .filter(|skill| lower.contains(skill.replace('.', "").as_str()))
    .map(|s| s.to_string())
    .collect()
}

fn extract_experience(lower: &str) -> String {
  EXPERIENCE_PATTERNS
    .iter()
    .find_map(|re| re.captures(lower))
    .and_then(|caps| caps.get(1).map(|m| format!("{}+ years", m.as_str())))
    .unwrap_or_else(|| EXPERIENCE_NOT_SPECIFIED.to_string())
}

fn determine_industry(lower: &str) -> &'static str {
  INDUSTRY_KEYWORDS
    .iter()
    .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
    .map(|(name, _)| *name)
    .unwrap_or(DEFAULT_INDUSTRY)
}

fn extract_title(description: &str) -> String {
  let first = description.lines().next().unwrap_or("").trim();
  if first.chars().count() < 100 {
    first.to_string()
  } else {
    DEFAULT_TITLE.to_string()
  }
}

fn extract_company(description: &str) -> String {
  COMPANY_PATTERN
    .as_ref()
    .and_then(|re| re.captures(description))
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str().trim().to_string())
    .filter(|s| !s.is_empty())
    .unwrap_or_else(|| DEFAULT_COMPANY.to_string())
}

/// Preparation tips derived from a parsed posting.
pub fn research_tips(job: &JobDescription) -> Vec<String> {
  let top_skills: Vec<&str> = job.skills.iter().take(5).map(|s| s.as_str()).collect();
  let mut tips = vec![
    format!("Research {}'s recent news, product launches, and company culture", job.company),
    format!("Study the {} industry trends and challenges", job.industry),
    format!("Prepare examples demonstrating your experience with: {}", top_skills.join(", ")),
    "Review the job requirements and match them to your background".to_string(),
    "Prepare questions about the team structure and growth opportunities".to_string(),
  ];

  let extra: &[&str] = match job.industry.as_str() {
    "Finance" => &["Understand regulatory compliance requirements", "Study fintech trends and security protocols"],
    "Healthcare" => &["Learn about HIPAA and patient data privacy", "Research healthcare technology trends"],
    "Retail" => &["Understand e-commerce trends and customer experience", "Study omnichannel retail strategies"],
    _ => &[],
  };
  tips.extend(extra.iter().map(|s| s.to_string()));
  tips
}
