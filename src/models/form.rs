//! IGT fields of a linguistic form record
//!
//! A form's interlinear display is built from up to four fields, in order:
//! phonetic transcription, transcription (prefixed with its grammaticality
//! judgement), morpheme break and morpheme gloss. Empty fields are skipped.

use serde::{Deserialize, Serialize};
use super::block::{Block, Line};

pub const PHONETIC_TRANSCRIPTION_CLASS: &str = "igt-phonetic-transcription";
pub const TRANSCRIPTION_CLASS: &str = "igt-transcription";
pub const MORPHEME_BREAK_CLASS: &str = "igt-morpheme-break";
pub const MORPHEME_GLOSS_CLASS: &str = "igt-morpheme-gloss";

/// The interlinear fields of a form, as sent by the server
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FormIgt {
    pub phonetic_transcription: Option<String>,
    pub grammaticality: String,
    pub transcription: String,
    pub morpheme_break: String,
    pub morpheme_gloss: String,
}

impl FormIgt {
    /// Build the block of lines to align
    pub fn to_block(&self) -> Block {
        let mut block = Block::new();

        if let Some(phonetic) = self.phonetic_transcription.as_deref() {
            if !phonetic.is_empty() {
                block.push(Line::with_class(phonetic, PHONETIC_TRANSCRIPTION_CLASS));
            }
        }

        if !self.transcription.is_empty() {
            let text = format!("{}{}", self.grammaticality, self.transcription);
            block.push(Line::with_class(text, TRANSCRIPTION_CLASS));
        }

        if !self.morpheme_break.is_empty() {
            block.push(Line::with_class(self.morpheme_break.as_str(), MORPHEME_BREAK_CLASS));
        }

        if !self.morpheme_gloss.is_empty() {
            block.push(Line::with_class(self.morpheme_gloss.as_str(), MORPHEME_GLOSS_CLASS));
        }

        block
    }
}
