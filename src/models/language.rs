//! Language label to source file name mapping.
//!
//! The judge reports languages as `"<Lang> (<compiler/version>)"`, e.g.
//! `"C++14 (GCC 5.4.1)"`. The label is reduced to its language part and
//! looked up in [`LANGUAGE_TABLE`]; the first matching entry wins.

/// Base name of every archived source file.
pub const MAIN_FILE_STEM: &str = "Main";

/// Extension used when no table entry matches.
pub const FALLBACK_EXTENSION: &str = "txt";

/// How a table entry matches a canonical language name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageMatcher {
    /// Name must equal the string
    Exact(&'static str),
    /// Name must start with the string
    Prefix(&'static str),
}

impl LanguageMatcher {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            LanguageMatcher::Exact(s) => name == *s,
            LanguageMatcher::Prefix(s) => name.starts_with(s),
        }
    }
}

use LanguageMatcher::{Exact, Prefix};

/// Ordered (matcher, extension) table.
pub const LANGUAGE_TABLE: &[(LanguageMatcher, &str)] = &[
    (Prefix("C++"), "cpp"),
    (Prefix("Bash"), "sh"),
    (Exact("C"), "c"),
    (Exact("C#"), "cs"),
    (Exact("Clojure"), "clj"),
    (Prefix("Common Lisp"), "lisp"),
    (Exact("D"), "d"),
    (Exact("Fortran"), "f08"),
    (Exact("Go"), "go"),
    (Exact("Haskell"), "hs"),
    (Exact("JavaScript"), "js"),
    (Exact("Java"), "java"),
    (Exact("OCaml"), "ml"),
    (Exact("Pascal"), "pas"),
    (Exact("Perl"), "pl"),
    (Exact("PHP"), "php"),
    (Prefix("Python"), "py"),
    (Exact("Ruby"), "rb"),
    (Exact("Scala"), "scala"),
    (Exact("Scheme"), "scm"),
    (Exact("Text"), "txt"),
    (Exact("Visual Basic"), "vb"),
    (Exact("Objective-C"), "m"),
    (Exact("Swift"), "swift"),
    (Exact("Rust"), "rs"),
    (Exact("Sed"), "sed"),
    (Exact("Awk"), "awk"),
    (Exact("Brainfuck"), "bf"),
    (Exact("Standard ML"), "sml"),
    (Prefix("PyPy"), "py"),
    (Exact("Crystal"), "cr"),
    (Exact("F#"), "fs"),
    (Exact("Unlambda"), "unl"),
    (Exact("Lua"), "lua"),
    (Exact("LuaJIT"), "lua"),
    (Exact("MoonScript"), "moon"),
    (Exact("Ceylon"), "ceylon"),
    (Exact("Julia"), "jl"),
    (Exact("Octave"), "m"),
    (Exact("Nim"), "nim"),
    (Exact("TypeScript"), "ts"),
    (Exact("Perl6"), "p6"),
    (Exact("Kotlin"), "kt"),
    (Exact("COBOL"), "cob"),
];

/// Reduce a language label to its language part.
///
/// `"C++14 (GCC 5.4.1)"` becomes `"C++14"`: everything before the first
/// `(`, minus one trailing whitespace character.
pub fn canonical_language(label: &str) -> &str {
    let head = label.split('(').next().unwrap_or(label);
    head.strip_suffix(char::is_whitespace).unwrap_or(head)
}

/// Look up the extension for a language label.
pub fn extension_for(label: &str) -> Option<&'static str> {
    let name = canonical_language(label);
    LANGUAGE_TABLE
        .iter()
        .find(|(matcher, _)| matcher.matches(name))
        .map(|(_, ext)| *ext)
}

/// File name for archived source code, e.g. `Main.cpp`.
///
/// Unknown labels fall back to `Main.txt` with a warning.
pub fn language_to_file_name(label: &str) -> String {
    let ext = extension_for(label).unwrap_or_else(|| {
        log::warn!("Unknown language '{}', archiving as .{}", label, FALLBACK_EXTENSION);
        FALLBACK_EXTENSION
    });
    format!("{}.{}", MAIN_FILE_STEM, ext)
}
