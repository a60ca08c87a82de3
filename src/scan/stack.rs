// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Technology-stack classification tables.
//!
//! Maps file extensions to languages and marker files to frameworks.
//! The same classification feeds the structure scanner and the feature
//! mapper's source/non-source split.

use std::path::Path;

/// Broad classification of a repository path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Source code in a recognized language.
    Source,
    /// Documentation (markdown, plain text, licenses).
    Docs,
    /// Build manifests, lockfiles and tool configuration.
    Config,
    /// Everything else (assets, binaries, unknown extensions).
    Other,
}

/// Extensions recognized as source code, with their language names.
const LANGUAGES: &[(&str, &str)] = &[
    ("rs", "Rust"),
    ("py", "Python"),
    ("js", "JavaScript"),
    ("jsx", "JavaScript"),
    ("ts", "TypeScript"),
    ("tsx", "TypeScript"),
    ("go", "Go"),
    ("java", "Java"),
    ("kt", "Kotlin"),
    ("c", "C"),
    ("h", "C"),
    ("cpp", "C++"),
    ("cc", "C++"),
    ("hpp", "C++"),
    ("cs", "C#"),
    ("rb", "Ruby"),
    ("php", "PHP"),
    ("swift", "Swift"),
    ("scala", "Scala"),
    ("sh", "Shell"),
    ("sql", "SQL"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("scss", "CSS"),
    ("vue", "Vue"),
];

/// Marker files that identify frameworks or toolchains.
const FRAMEWORK_MARKERS: &[(&str, &str)] = &[
    ("Cargo.toml", "Rust (Cargo)"),
    ("package.json", "Node.js"),
    ("pyproject.toml", "Python (PEP 517)"),
    ("requirements.txt", "Python (pip)"),
    ("go.mod", "Go modules"),
    ("pom.xml", "Java (Maven)"),
    ("build.gradle", "Java (Gradle)"),
    ("Gemfile", "Ruby (Bundler)"),
    ("composer.json", "PHP (Composer)"),
    ("Dockerfile", "Docker"),
    ("docker-compose.yml", "Docker Compose"),
    ("Makefile", "Make"),
    ("CMakeLists.txt", "CMake"),
];

/// File names treated as configuration even without a marker entry.
const CONFIG_NAMES: &[&str] = &[
    ".gitignore",
    ".gitattributes",
    ".editorconfig",
    "Cargo.lock",
    "package-lock.json",
    "yarn.lock",
    "go.sum",
    "tsconfig.json",
];

const CONFIG_EXTENSIONS: &[&str] = &["toml", "yml", "yaml", "json", "ini", "cfg", "lock"];

const DOC_EXTENSIONS: &[&str] = &["md", "markdown", "txt", "rst", "adoc"];

const DOC_STEMS: &[&str] = &["README", "CHANGELOG", "LICENSE", "CONTRIBUTING", "NOTICE"];

/// Look up the language for a file extension.
pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, lang)| *lang)
}

/// Look up the framework a marker file identifies.
pub fn framework_for_marker(file_name: &str) -> Option<&'static str> {
    FRAMEWORK_MARKERS
        .iter()
        .find(|(name, _)| *name == file_name)
        .map(|(_, fw)| *fw)
}

/// Classify a repository-relative path.
pub fn classify_path(path: &Path) -> PathKind {
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_ascii_uppercase())
        .unwrap_or_default();

    if DOC_STEMS.contains(&stem.as_str()) {
        return PathKind::Docs;
    }

    if framework_for_marker(&file_name).is_some() || CONFIG_NAMES.contains(&file_name.as_str()) {
        return PathKind::Config;
    }

    let ext = path
        .extension()
        .map(|s| s.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if DOC_EXTENSIONS.contains(&ext.as_str()) {
        return PathKind::Docs;
    }
    if language_for_extension(&ext).is_some() {
        return PathKind::Source;
    }
    if CONFIG_EXTENSIONS.contains(&ext.as_str()) {
        return PathKind::Config;
    }

    PathKind::Other
}
