//! Text normalization: raw extracted text into sentence-bound segments.
//!
//! Unicode sentence boundaries are a reasonable base but extracted legal
//! prose is full of false terminators: abbreviations ("Art. 28", "para. 3"),
//! clause numbering like "1.2.", and the hard line breaks PDF extraction
//! leaves mid-sentence. Boundary chunks ending in such tokens, or in no
//! terminal punctuation at all, are rejoined with their successor before
//! segments are cut.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::Segment;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::EngineError;

lazy_static! {
    // Trailing tokens whose period does not end a sentence.
    static ref NON_TERMINAL: Regex = Regex::new(
        r"(?ix)
        (?:
            \b(?:art|arts|no|nos|para|paras|sec|secs|cl|cf|approx|etc|mr|mrs|ms|dr|inc|ltd|gmbh|vs?)\.
          | \be\.g\. | \bi\.e\.
          | \b\d+(?:\.\d+)*\.
          | \([a-z0-9]{1,3}\)
        )\s*$"
    )
    .unwrap();
}

/// Split raw contract text into ordered, offset-preserving segments.
///
/// Pure function. Fails only when the input is blank after trimming.
pub fn normalize(raw_text: &str) -> Result<Vec<Segment>, EngineError> {
    if raw_text.trim().is_empty() {
        return Err(EngineError::EmptyInput);
    }

    // Byte spans of sentence chunks, with false splits rejoined.
    let mut spans: Vec<(usize, usize)> = Vec::new();
    for (start, chunk) in raw_text.split_sentence_bound_indices() {
        if chunk.trim().is_empty() {
            continue;
        }
        let end = start + chunk.len();
        match spans.last_mut() {
            Some(span) if continues_sentence(raw_text[span.0..span.1].trim_end()) => {
                span.1 = end;
            }
            _ => spans.push((start, end)),
        }
    }

    let mut segments = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        let slice = &raw_text[start..end];
        let trimmed = slice.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lead = slice.len() - slice.trim_start().len();
        let start_offset = start + lead;
        let end_offset = start_offset + trimmed.len();
        let sentence_index = segments.len();
        segments.push(Segment {
            id: sentence_index as u32,
            text: squash_whitespace(trimmed),
            start_offset,
            end_offset,
            sentence_index,
        });
    }

    Ok(segments)
}

/// True when the chunk ending here does not actually end a sentence: the
/// trailing token is a known abbreviation or numbering, or there is no
/// terminal punctuation at all (a line break inside a sentence).
fn continues_sentence(chunk: &str) -> bool {
    !chunk.ends_with(['.', '!', '?']) || NON_TERMINAL.is_match(chunk)
}

/// Collapse internal whitespace runs (newlines from PDF extraction, mostly)
/// into single spaces.
fn squash_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn splits_plain_sentences_with_offsets() {
        let raw = "The Processor shall process data. The Controller gives instructions.";
        let segments = normalize(raw).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "The Processor shall process data.");
        assert_eq!(segments[0].start_offset, 0);
        assert_eq!(&raw[segments[1].start_offset..segments[1].end_offset], segments[1].text);
        assert_eq!(segments[1].sentence_index, 1);
    }

    #[test]
    fn legal_abbreviations_do_not_terminate() {
        let raw = "Pursuant to Art. 28 of the Regulation, the Processor assists the Controller. A second sentence follows.";
        let segments = normalize(raw).unwrap();
        assert_eq!(segments.len(), 2);
        assert!(segments[0].text.contains("Art. 28"));
    }

    #[test]
    fn clause_numbering_does_not_terminate() {
        let raw = "The following applies under clause 1.2. The Processor shall delete data on request.";
        let segments = normalize(raw).unwrap();
        assert_eq!(segments.len(), 1);
        assert!(segments[0].text.contains("1.2. The Processor"));
    }

    #[test]
    fn internal_whitespace_is_squashed_but_offsets_kept() {
        let raw = "The Processor\nshall  implement\nsecurity measures.";
        let segments = normalize(raw).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "The Processor shall implement security measures.");
        assert_eq!(segments[0].start_offset, 0);
        assert_eq!(segments[0].end_offset, raw.len());
    }

    #[test]
    fn line_breaks_inside_sentences_do_not_split() {
        let raw = "The Processor shall notify\nthe Controller of any breach. The Controller\nmay audit the Processor.";
        let segments = normalize(raw).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(
            segments[0].text,
            "The Processor shall notify the Controller of any breach."
        );
        assert_eq!(
            segments[1].text,
            "The Controller may audit the Processor."
        );
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(matches!(normalize(""), Err(EngineError::EmptyInput)));
        assert!(matches!(normalize("   \n\t  "), Err(EngineError::EmptyInput)));
    }

    proptest! {
        #[test]
        fn offsets_always_map_back_into_the_input(raw in "\\PC{0,200}") {
            match normalize(&raw) {
                Err(EngineError::EmptyInput) => prop_assert!(raw.trim().is_empty()),
                Err(_) => prop_assert!(false, "unexpected error kind"),
                Ok(segments) => {
                    for (i, seg) in segments.iter().enumerate() {
                        prop_assert!(seg.start_offset < seg.end_offset);
                        prop_assert!(seg.end_offset <= raw.len());
                        prop_assert_eq!(seg.sentence_index, i);
                        let slice = &raw[seg.start_offset..seg.end_offset];
                        prop_assert_eq!(squash_whitespace(slice.trim()), seg.text.clone());
                    }
                }
            }
        }
    }
}
