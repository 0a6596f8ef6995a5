//! Prompt Composer: renders the fixed README prompt from a [`RepositoryInfo`].
//!
//! Pure and deterministic. Values are inserted verbatim, so repository text
//! (description, file heads) reaches the model unescaped.

use std::collections::BTreeMap;

use crate::model::{KeyFile, RepositoryInfo};

/// Rendered when the language mapping is empty.
pub const NO_LANGUAGES: &str = "Not available";
/// Rendered when no key file could be read.
pub const NO_KEY_FILES: &str = "No key files analyzed";
/// Rendered when the repository declares no license.
pub const NO_LICENSE: &str = "None";

/// Sections the generated README must contain, in order.
pub const README_SECTIONS: [&str; 8] = [
    "Project Title with Badges",
    "Description",
    "Features",
    "Installation",
    "Usage",
    "Project Structure",
    "Contributing",
    "License",
];

/// Render the prompt for one repository and the user's extra instructions.
pub fn compose(info: &RepositoryInfo, instructions: &str) -> String {
    let sections = README_SECTIONS
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert technical writer. Generate a comprehensive README.md file for this GitHub repository:

Repository: {repo_name}
Description: {repo_description}
Owner: {repo_owner}
Stars: {stars}
Forks: {forks}
Languages: {languages}
License: {license}

Project Structure:
{structure}

Key Files Content:
{key_files}

Additional Instructions: {additional_instructions}

Include these sections:
{sections}

Make it professional and engaging. Use markdown formatting:",
        repo_name = info.name,
        repo_description = info.description,
        repo_owner = info.owner,
        stars = info.stars,
        forks = info.forks,
        languages = language_summary(&info.languages),
        license = info.license.as_deref().unwrap_or(NO_LICENSE),
        structure = info.structure.join("\n"),
        key_files = key_files_blob(&info.key_files),
        additional_instructions = instructions,
        sections = sections,
    )
}

/// `"Python (80.0%), Shell (20.0%)"`, or `"Not available"` when empty.
pub fn language_summary(languages: &BTreeMap<String, f64>) -> String {
    if languages.is_empty() {
        return NO_LANGUAGES.to_string();
    }
    languages
        .iter()
        .map(|(name, pct)| format!("{name} ({pct:.1}%)"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn key_files_blob(key_files: &[KeyFile]) -> String {
    if key_files.is_empty() {
        return NO_KEY_FILES.to_string();
    }
    key_files
        .iter()
        .map(|f| format!("File: {}\n\n{}\n", f.name, f.excerpt))
        .collect::<Vec<_>>()
        .join("\n")
}
