//! Terminal rendering of the session: summary panel, structure listing,
//! warnings, preview and error messages. Every function returns a `String`
//! so the output can be asserted on in tests.

use readme_gen_core::model::{GeneratedReadme, RepositoryInfo};
use readme_gen_core::ReadmeError;

const RULE: &str = "----------------------------------------";

/// Repository name, description, owner, counts and language metrics.
pub fn summary_panel(info: &RepositoryInfo) -> String {
    let mut out = String::new();
    out.push_str("Repository Information\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("{}\n", info.name));
    out.push_str(&format!("{}\n", info.description));
    out.push_str(&format!("Owner: {}\n", info.owner));
    out.push_str(&format!("Stars: {} | Forks: {}\n", info.stars, info.forks));
    if let Some(license) = &info.license {
        out.push_str(&format!("License: {license}\n"));
    }
    if !info.url.is_empty() {
        out.push_str(&format!("URL: {}\n", info.url));
    }

    if info.languages.is_empty() {
        out.push_str("No language data available\n");
    } else {
        out.push_str("Languages Used:\n");
        for (lang, pct) in &info.languages {
            out.push_str(&format!("  {lang}: {pct:.1}%\n"));
        }
    }
    out
}

pub fn structure_listing(info: &RepositoryInfo) -> String {
    let mut out = String::from("Project Structure\n");
    out.push_str(RULE);
    out.push('\n');
    for line in &info.structure {
        out.push_str(line);
        out.push('\n');
    }
    out
}

pub fn preview(readme: &GeneratedReadme) -> String {
    format!("Generated README\n{RULE}\n{}\n{RULE}\n", readme.content.trim_end())
}

/// Non-fatal warnings, one line each.
pub fn warnings(warnings: &[ReadmeError]) -> String {
    warnings
        .iter()
        .map(|w| format!("[WARN] {w}\n"))
        .collect()
}

/// Inline message for a fatal error: the concrete kind and detail, plus
/// troubleshooting hints when the repository step failed.
pub fn error_message(err: &ReadmeError) -> String {
    if err.is_repository_failure() {
        format!(
            "[ERROR] Repository Analysis Failed\n\
             Error Type: {}\n\
             Details: {}\n\
             \n\
             Common Solutions:\n\
             1. Verify the repository exists and is public\n\
             2. Check for typos in the URL\n\
             3. Add a GitHub token in secrets.toml\n\
             4. Try again later if rate limited\n",
            err.kind(),
            err
        )
    } else {
        format!("[ERROR] {}: {}\n", err.kind(), err)
    }
}
