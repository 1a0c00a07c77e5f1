//! Part-of-speech tagging stage
//!
//! Runs the TreeTagger script of the working language over every OCR text
//! file and stores the tokens as `<stem>_pos.json`:
//!
//! ```json
//! [{"word": "Et", "pos": "KON", "lemma": "et"}]
//! ```

use crate::batch::{BatchReport, BatchRunner, TaskOutcome};
use crate::config::TaggerParams;
use crate::fsutil::{list_files, list_region_dirs};
use crate::process::run_command;
use crate::{PipelineError, PipelineResult};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One tagged token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Surface form
    pub word: String,
    /// Part-of-speech tag
    pub pos: String,
    /// Lemma, as printed by the tagger
    pub lemma: String,
}

// (two-letter code, accepted aliases, tagger name)
const LANGUAGES: [(&str, &[&str], &str); 4] = [
    ("en", &["eng"], "english"),
    ("es", &["spa"], "spanish"),
    ("de", &["deu", "ger"], "german"),
    ("fr", &["fra", "fre"], "french"),
];

/// Two-letter code and tagger name of a language given in two- or
/// three-letter form
pub fn language(code: &str) -> Option<(&'static str, &'static str)> {
    let code = code.to_ascii_lowercase();
    LANGUAGES
        .iter()
        .find(|(short, aliases, _)| *short == code || aliases.contains(&code.as_str()))
        .map(|(short, _, name)| (*short, *name))
}

/// Tagger script for `lang`, if the configuration lists its model
pub fn tagger_program(params: &TaggerParams, lang: &str) -> PipelineResult<String> {
    let (short, name) =
        language(lang).ok_or_else(|| PipelineError::UnsupportedLanguage(lang.to_string()))?;
    if !params.languages.iter().any(|l| l == short) {
        return Err(PipelineError::UnsupportedLanguage(lang.to_string()));
    }
    Ok(format!("{}{}", params.command_prefix, name))
}

/// Parse tab-separated `word pos lemma` lines
///
/// Lines with fewer than three fields are ignored.
pub fn parse_tagger_output(text: &str) -> Vec<TaggedToken> {
    text.lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let word = fields.next()?.trim();
            let pos = fields.next()?.trim();
            let lemma = fields.next()?.trim();
            (!word.is_empty()).then(|| TaggedToken {
                word: word.to_string(),
                pos: pos.to_string(),
                lemma: lemma.to_string(),
            })
        })
        .collect()
}

/// Output path for the tags of `text_file`: `<stem>_pos.json`
pub fn tags_path(text_file: &Path) -> PipelineResult<PathBuf> {
    let stem = text_file
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| PipelineError::InvalidPath(text_file.to_path_buf()))?;
    Ok(text_file.with_file_name(format!("{}_pos.json", stem)))
}

/// Tag one text file, returning the JSON file written
pub fn tag_file(text_file: &Path, program: &str) -> PipelineResult<PathBuf> {
    let mut cmd = Command::new(program);
    cmd.arg(text_file);
    let output = run_command(&mut cmd)?;

    let tokens = parse_tagger_output(&String::from_utf8_lossy(&output.stdout));
    if tokens.is_empty() {
        warn!("{}: tagger produced no tokens", text_file.display());
    }

    let path = tags_path(text_file)?;
    let json = serde_json::to_string_pretty(&tokens).map_err(|source| PipelineError::Encode {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, json)?;
    debug!("{}: {} token(s)", path.display(), tokens.len());
    Ok(path)
}

/// Tag the text files of every page under `out_root`
///
/// # Errors
///
/// Fails before starting if the language has no tagger model.
pub fn tag_stage(
    runner: &BatchRunner,
    out_root: &Path,
    params: &TaggerParams,
    lang: &str,
) -> PipelineResult<BatchReport> {
    let program = tagger_program(params, lang)?;
    let dirs = list_region_dirs(out_root)?;
    Ok(runner.run("tag", &dirs, |dir| {
        let texts = list_files(dir, "txt")?;
        for text in &texts {
            tag_file(text, &program)?;
        }
        Ok(if texts.is_empty() {
            TaskOutcome::Skipped
        } else {
            TaskOutcome::Done
        })
    }))
}
