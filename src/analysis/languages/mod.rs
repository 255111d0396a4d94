//! Language-specific analyzer implementations.

mod javascript;
mod python;

pub use javascript::JavaScriptAnalyzer;
pub use python::PythonAnalyzer;

use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, Ordering};

use super::LanguageAnalyzer;

/// Static storage for the Python analyzer.
static PYTHON_ANALYZER: OnceCell<PythonAnalyzer> = OnceCell::new();

/// Static storage for the JavaScript analyzer.
static JAVASCRIPT_ANALYZER: OnceCell<JavaScriptAnalyzer> = OnceCell::new();

/// Whether analyzers have been registered.
static REGISTERED: AtomicBool = AtomicBool::new(false);

/// Register all available language analyzers.
///
/// This is idempotent - calling it multiple times is safe.
pub fn register_analyzers() {
    if REGISTERED.swap(true, Ordering::SeqCst) {
        return; // Already registered
    }

    PYTHON_ANALYZER.get_or_init(PythonAnalyzer::new);
    JAVASCRIPT_ANALYZER.get_or_init(JavaScriptAnalyzer::new);
}

/// Get an analyzer by language ID.
///
/// Returns None if the language is not supported.
pub fn get_analyzer(lang_id: &str) -> Option<&'static dyn LanguageAnalyzer> {
    register_analyzers();

    match lang_id {
        "python" => PYTHON_ANALYZER
            .get()
            .map(|a| a as &'static dyn LanguageAnalyzer),
        "javascript" => JAVASCRIPT_ANALYZER
            .get()
            .map(|a| a as &'static dyn LanguageAnalyzer),
        _ => None,
    }
}

/// Get an analyzer for the given file extension (without dot).
pub fn analyzer_for_extension(ext: &str) -> Option<&'static dyn LanguageAnalyzer> {
    register_analyzers();

    match ext {
        "py" => PYTHON_ANALYZER
            .get()
            .map(|a| a as &'static dyn LanguageAnalyzer),
        "js" | "jsx" | "mjs" | "cjs" => JAVASCRIPT_ANALYZER
            .get()
            .map(|a| a as &'static dyn LanguageAnalyzer),
        _ => None,
    }
}

/// Get all registered language IDs.
pub fn registered_languages() -> Vec<&'static str> {
    vec!["python", "javascript"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_analyzer_by_id() {
        assert_eq!(get_analyzer("python").unwrap().language_id(), "python");
        assert_eq!(
            get_analyzer("javascript").unwrap().language_id(),
            "javascript"
        );
        assert!(get_analyzer("cobol").is_none());
    }

    #[test]
    fn test_analyzer_for_extension() {
        assert_eq!(
            analyzer_for_extension("py").unwrap().language_id(),
            "python"
        );
        assert_eq!(
            analyzer_for_extension("mjs").unwrap().language_id(),
            "javascript"
        );
        assert!(analyzer_for_extension("go").is_none());
    }
}
