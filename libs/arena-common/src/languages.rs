// Language selector tables: judge runtime ids and starter templates.
// Unknown names always resolve to the JavaScript entries.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "javascript";
pub const JAVASCRIPT_RUNTIME_ID: u32 = 63;

/// Judge0 runtime ids keyed by selector name
const RUNTIME_IDS: &[(&str, u32)] = &[
    ("javascript", 63), // Node.js
    ("python", 71),     // Python 3
    ("java", 62),
    ("cpp", 54), // GCC 9.2.0
    ("c", 50),   // GCC 9.2.0
    ("csharp", 51),
    ("go", 60),
    ("rust", 73),
    ("php", 68),
    ("ruby", 72),
    ("kotlin", 78),
    ("swift", 83),
    ("typescript", 74),
];

/// Languages offered by the selector, in display order
const SELECTOR: &[(&str, &str)] = &[
    ("javascript", "JavaScript"),
    ("python", "Python"),
    ("java", "Java"),
    ("cpp", "C++"),
    ("c", "C"),
];

const JAVASCRIPT_TEMPLATE: &str = r#"// JavaScript Solution
function solve() {
    // Write your solution here
    console.log("Hello, World!");
}

solve();"#;

const PYTHON_TEMPLATE: &str = r#"# Python Solution
def solve():
    # Write your solution here
    print("Hello, World!")

solve()"#;

const PYTHON3_TEMPLATE: &str = r#"# Python 3 Solution
def solve():
    # Write your solution here
    print("Hello, World!")

solve()"#;

const JAVA_TEMPLATE: &str = r#"// Java Solution
public class Main {
    public static void main(String[] args) {
        // Write your solution here
        System.out.println("Hello, World!");
    }
}"#;

const CPP_TEMPLATE: &str = r#"// C++ Solution
#include <iostream>
using namespace std;

int main() {
    // Write your solution here
    cout << "Hello, World!" << endl;
    return 0;
}"#;

const C_TEMPLATE: &str = r#"// C Solution
#include <stdio.h>

int main() {
    // Write your solution here
    printf("Hello, World!\n");
    return 0;
}"#;

const TEMPLATES: &[(&str, &str)] = &[
    ("javascript", JAVASCRIPT_TEMPLATE),
    ("python", PYTHON_TEMPLATE),
    ("java", JAVA_TEMPLATE),
    ("cpp", CPP_TEMPLATE),
    ("c", C_TEMPLATE),
    ("python3", PYTHON3_TEMPLATE),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub name: String,
    pub label: String,
    pub runtime_id: u32,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn lookup<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    let key = normalize(name);
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, value)| *value)
}

/// Runtime id for a selector name, falling back to Node.js
pub fn runtime_id(language: &str) -> u32 {
    lookup(RUNTIME_IDS, language).unwrap_or(JAVASCRIPT_RUNTIME_ID)
}

/// Starter source for a selector name, falling back to JavaScript
pub fn starter_template(language: &str) -> &'static str {
    lookup(TEMPLATES, language).unwrap_or(JAVASCRIPT_TEMPLATE)
}

/// Whether the name has its own runtime entry
pub fn is_known(language: &str) -> bool {
    lookup(RUNTIME_IDS, language).is_some()
}

/// Reverse lookup used for display
pub fn name_for_runtime(runtime_id: u32) -> Option<&'static str> {
    RUNTIME_IDS
        .iter()
        .find(|(_, id)| *id == runtime_id)
        .map(|(name, _)| *name)
}

pub fn supported_languages() -> Vec<LanguageInfo> {
    SELECTOR
        .iter()
        .map(|(name, label)| LanguageInfo {
            name: name.to_string(),
            label: label.to_string(),
            runtime_id: runtime_id(name),
        })
        .collect()
}

/// Every language with a runtime id, selector or not
pub fn all_runtimes() -> impl Iterator<Item = (&'static str, u32)> {
    RUNTIME_IDS.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_runtime_ids() {
        assert_eq!(runtime_id("javascript"), 63);
        assert_eq!(runtime_id("python"), 71);
        assert_eq!(runtime_id("cpp"), 54);
        assert_eq!(runtime_id("typescript"), 74);
    }

    #[test]
    fn test_unknown_language_falls_back_to_javascript() {
        assert_eq!(runtime_id("unknown-lang"), runtime_id("javascript"));
        assert_eq!(runtime_id(""), JAVASCRIPT_RUNTIME_ID);
        assert!(!is_known("brainfuck"));
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        assert_eq!(runtime_id("  Python "), 71);
        assert_eq!(runtime_id("RUST"), 73);
        assert!(starter_template("Java").contains("public class Main"));
    }

    #[test]
    fn test_templates() {
        assert!(starter_template("cpp").contains("#include <iostream>"));
        assert!(starter_template("c").contains("printf(\"Hello, World!\\n\")"));
        assert!(starter_template("python3").starts_with("# Python 3 Solution"));
        // go has a runtime but no template
        assert_eq!(starter_template("go"), starter_template("javascript"));
        assert_eq!(starter_template("nope"), JAVASCRIPT_TEMPLATE);
    }

    #[test]
    fn test_selector_order() {
        let names: Vec<String> = supported_languages().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["javascript", "python", "java", "cpp", "c"]);
        assert_eq!(supported_languages()[3].label, "C++");
        assert_eq!(supported_languages()[3].runtime_id, 54);
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(name_for_runtime(62), Some("java"));
        assert_eq!(name_for_runtime(1), None);
        assert_eq!(all_runtimes().count(), 13);
    }
}
