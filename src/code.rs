// College Code Generator
//
// A college code is a slug derived from the free-text college name:
//   "Zulekha Nursing College, Mangalore - MANGALORE - Karnataka"
//     → "zulekha-nursing-college-mangalore-mangalore-karnataka"
//
// The substitutions are order-sensitive. Moving a step changes the output
// for names that mix commas, dots and hyphens, so the table below is the
// single source of truth for the pipeline.

use regex::Regex;
use std::sync::LazyLock;

// ============================================================================
// SUBSTITUTION TABLE
// ============================================================================

/// One `{pattern, replacement}` step of the pipeline
struct Substitution {
    pattern: &'static str,
    replacement: &'static str,
}

/// Applied strictly top to bottom, each as a global replace
const STEPS: [Substitution; 7] = [
    // comma followed by any whitespace
    Substitution { pattern: r",\s*", replacement: "-" },
    // ".-" artifacts
    Substitution { pattern: r"\.-", replacement: "-" },
    // " - ", "- ", " -", "-"
    Substitution { pattern: r"\s*-\s*", replacement: "-" },
    // whitespace runs
    Substitution { pattern: r"\s+", replacement: "-" },
    // leftover commas
    Substitution { pattern: r",", replacement: "-" },
    // leftover dots
    Substitution { pattern: r"\.", replacement: "-" },
    // single pass: "---" becomes "--", not "-"
    Substitution { pattern: r"--", replacement: "-" },
];

static COMPILED: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    STEPS
        .iter()
        .map(|step| {
            let re = Regex::new(step.pattern)
                .unwrap_or_else(|e| panic!("invalid code pattern {:?}: {}", step.pattern, e));
            (re, step.replacement)
        })
        .collect()
});

// ============================================================================
// GENERATOR
// ============================================================================

/// Derive the college code for a name.
///
/// Pure and total: every input produces a code, the same input always
/// produces the same code. There is no trimming of leading/trailing
/// hyphens and no uniqueness check; two names may share a code.
pub fn generate_code(name: &str) -> String {
    let mut code = name.to_string();

    for (re, replacement) in COMPILED.iter() {
        code = re.replace_all(&code, *replacement).into_owned();
    }

    code.to_lowercase()
}
