use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_FRONT_MATTER_KEYWORDS: &[&str] = &[
    "índice",
    "contenido",
    "tabla",
    "apéndice",
    "appendix",
    "bibliografía",
    "referencias",
    "abreviaturas",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub db_path: String,
    pub max_line_chars: usize,
    pub max_line_tokens: usize,
    pub front_matter_keywords: Vec<String>,
    pub front_matter_scan_lines: usize,
    pub chunk_size: usize,
}

impl Settings {
    /// Defaults, then an optional `lexicon.toml`, then `LEXICON_*` env vars.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("db_path", "data/lexicon.sqlite")?
            .set_default("max_line_chars", 100)?
            .set_default("max_line_tokens", 50)?
            .set_default(
                "front_matter_keywords",
                DEFAULT_FRONT_MATTER_KEYWORDS
                    .iter()
                    .map(|k| k.to_string())
                    .collect::<Vec<_>>(),
            )?
            .set_default("front_matter_scan_lines", 6)?
            .set_default("chunk_size", 500)?
            .add_source(File::with_name("lexicon").required(false))
            .add_source(
                Environment::with_prefix("LEXICON")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("front_matter_keywords"),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            max_line_chars: self.max_line_chars,
            max_line_tokens: self.max_line_tokens,
            front_matter_keywords: self
                .front_matter_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            front_matter_scan_lines: self.front_matter_scan_lines,
            chunk_size: self.chunk_size.max(1),
        }
    }
}

/// Thresholds and keyword lists handed to the parser stages.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub max_line_chars: usize,
    pub max_line_tokens: usize,
    pub front_matter_keywords: Vec<String>,
    pub front_matter_scan_lines: usize,
    pub chunk_size: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            max_line_chars: 100,
            max_line_tokens: 50,
            front_matter_keywords: DEFAULT_FRONT_MATTER_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            front_matter_scan_lines: 6,
            chunk_size: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_file_or_env() {
        let s = Settings::load().unwrap();
        assert_eq!(s.db_path, "data/lexicon.sqlite");
        assert_eq!(s.max_line_chars, 100);
        assert!(s.front_matter_keywords.iter().any(|k| k == "índice"));
    }

    #[test]
    fn pipeline_options_lowercase_keywords() {
        let s = Settings {
            db_path: String::new(),
            max_line_chars: 80,
            max_line_tokens: 40,
            front_matter_keywords: vec!["ÍNDICE".into()],
            front_matter_scan_lines: 3,
            chunk_size: 0,
        };
        let opts = s.pipeline_options();
        assert_eq!(opts.front_matter_keywords, vec!["índice".to_string()]);
        assert_eq!(opts.chunk_size, 1);
        assert_eq!(opts.max_line_chars, 80);
    }
}
