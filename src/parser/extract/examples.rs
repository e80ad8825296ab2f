//! Usage examples: an ordered list of independent pattern rules.
//!
//! Every rule scans the whole block text and every accepted candidate is
//! kept, so overlapping rules can surface the same pair more than once.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::entry::Example;
use crate::parser::normalize::normalize;

// "Ejemplo:" and friends introduce examples; treat them as clause breaks
static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:Ejemplos?\s*:|Ej\.\s*:?)").unwrap());

pub struct ExampleRule {
    pub name: &'static str,
    re: Regex,
}

impl ExampleRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        ExampleRule {
            name,
            re: Regex::new(pattern).unwrap(),
        }
    }

    /// Raw (source, translation) pairs, normalized but not yet validated.
    pub fn candidates(&self, text: &str) -> Vec<(String, String)> {
        self.re
            .captures_iter(text)
            .filter_map(|caps| {
                let source = caps.get(1)?.as_str();
                let translation = caps.get(2)?.as_str();
                Some((normalize(source), normalize(translation)))
            })
            .collect()
    }
}

pub static EXAMPLE_RULES: LazyLock<Vec<ExampleRule>> = LazyLock::new(|| {
    vec![
        ExampleRule::new("colon", r"([^:;.]+):\s*([^;.]+)"),
        ExampleRule::new(
            "quoted",
            r#"["“«]([^"”»]+)["”»]\s*=\s*["“«]([^"”»]+)["”»]"#,
        ),
        ExampleRule::new("equals", r"([^.!?:=]+?)\s*=\s*([^.!?;]+)"),
        ExampleRule::new("particle", r"([^.;]+?\b(?:kë|ha)\b[^:;.]+?):\s*([^;.]+)"),
    ]
});

pub fn extract(text: &str) -> Vec<Example> {
    let scan = LABEL_RE.replace_all(text, ". ");
    let mut examples = Vec::new();
    for rule in EXAMPLE_RULES.iter() {
        for (source, translation) in rule.candidates(&scan) {
            if let Some(mut example) = Example::accept(source, translation, None) {
                example.context = context_for(text, &example.source);
                examples.push(example);
            }
        }
    }
    examples
}

/// Text leading up to `source` within its clause, if any.
fn context_for(text: &str, source: &str) -> Option<String> {
    let re = Regex::new(&format!(r"([^.;]+){}", regex::escape(source))).ok()?;
    let caps = re.captures(text)?;
    let lead = LABEL_RE.replace_all(&caps[1], "");
    let context = normalize(&lead)
        .trim_end_matches([':', '=', ',', ' '])
        .to_string();
    if context.is_empty() {
        None
    } else {
        Some(context)
    }
}
