//! Editing commands for page documents.

use showroom_core::{
    models::{Asset, Block, Document, Inline, Mark},
    AppError,
};
use std::collections::BTreeSet;
use std::ops::Range;

/// One user edit on a document
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    InsertBlock { index: usize, block: Block },
    RemoveBlock { index: usize },
    MoveBlock { from: usize, to: usize },
    /// Turn a text block into a heading of `level`, or back into a
    /// paragraph with `level == 0`
    SetHeading { index: usize, level: u8 },
    /// Toggle `mark` over a character range of a text block
    ToggleMark {
        index: usize,
        range: Range<usize>,
        mark: Mark,
    },
    /// Insert an image block referencing a picked asset
    InsertImage { index: usize, asset: Asset },
}

fn out_of_range(index: usize, len: usize) -> AppError {
    AppError::InvalidInput(format!(
        "Block index {} out of range (document has {} blocks)",
        index, len
    ))
}

/// Apply `command` to `doc`. On error the document is left unchanged.
pub fn apply(doc: &mut Document, command: EditCommand) -> Result<(), AppError> {
    let len = doc.blocks.len();
    match command {
        EditCommand::InsertBlock { index, block } => {
            if index > len {
                return Err(out_of_range(index, len));
            }
            doc.blocks.insert(index, block);
        }
        EditCommand::RemoveBlock { index } => {
            if index >= len {
                return Err(out_of_range(index, len));
            }
            doc.blocks.remove(index);
        }
        EditCommand::MoveBlock { from, to } => {
            if from >= len {
                return Err(out_of_range(from, len));
            }
            if to >= len {
                return Err(out_of_range(to, len));
            }
            let block = doc.blocks.remove(from);
            doc.blocks.insert(to, block);
        }
        EditCommand::SetHeading { index, level } => {
            let block = doc.blocks.get_mut(index).ok_or_else(|| out_of_range(index, len))?;
            set_heading(block, level)?;
        }
        EditCommand::ToggleMark { index, range, mark } => {
            let block = doc.blocks.get_mut(index).ok_or_else(|| out_of_range(index, len))?;
            let inlines = block.inlines_mut().ok_or_else(|| {
                AppError::InvalidInput("Marks can only be applied to text blocks".to_string())
            })?;
            toggle_mark(inlines, range, mark)?;
        }
        EditCommand::InsertImage { index, asset } => {
            if index > len {
                return Err(out_of_range(index, len));
            }
            if !asset.is_image() {
                return Err(AppError::InvalidInput(format!(
                    "{} is not an image",
                    asset.name
                )));
            }
            doc.blocks.insert(
                index,
                Block::Image {
                    url: asset.url,
                    alt: asset.name,
                },
            );
        }
    }
    Ok(())
}

fn set_heading(block: &mut Block, level: u8) -> Result<(), AppError> {
    if level > 6 {
        return Err(AppError::InvalidInput(format!(
            "Heading level must be between 1 and 6, got {}",
            level
        )));
    }
    let inlines = match block {
        Block::Paragraph { inlines } | Block::Heading { inlines, .. } | Block::Quote { inlines } => {
            std::mem::take(inlines)
        }
        Block::List { .. } | Block::Image { .. } => {
            return Err(AppError::InvalidInput(
                "Only text blocks can become headings".to_string(),
            ))
        }
    };
    *block = if level == 0 {
        Block::Paragraph { inlines }
    } else {
        Block::Heading { level, inlines }
    };
    Ok(())
}

/// Toggle `mark` on the text runs covering `range` (in characters). If every
/// covered text run already carries the mark it is removed, otherwise it is
/// added. Links are left untouched.
pub fn toggle_mark(inlines: &mut Vec<Inline>, range: Range<usize>, mark: Mark) -> Result<(), AppError> {
    let total: usize = inlines.iter().map(|i| i.as_str().chars().count()).sum();
    if range.start >= range.end || range.end > total {
        return Err(AppError::InvalidInput(format!(
            "Invalid range {}..{} for text of length {}",
            range.start, range.end, total
        )));
    }

    let mut pieces: Vec<(Inline, bool)> = Vec::with_capacity(inlines.len() + 2);
    let mut offset = 0;
    for inline in inlines.drain(..) {
        let len = inline.as_str().chars().count();
        let (start, end) = (offset, offset + len);
        offset = end;

        match inline {
            Inline::Text { text, marks } if start < range.end && range.start < end => {
                let cut_a = range.start.saturating_sub(start);
                let cut_b = range.end.min(end) - start;
                let (before, rest) = split_chars(&text, cut_a);
                let (inside, after) = split_chars(&rest, cut_b - cut_a);
                for (part, selected) in [(before, false), (inside, true), (after, false)] {
                    if !part.is_empty() {
                        pieces.push((
                            Inline::Text {
                                text: part,
                                marks: marks.clone(),
                            },
                            selected,
                        ));
                    }
                }
            }
            other => pieces.push((other, false)),
        }
    }

    let all_marked = pieces.iter().filter(|(_, selected)| *selected).all(|(inline, _)| {
        matches!(inline, Inline::Text { marks, .. } if marks.contains(&mark))
    });

    for (inline, selected) in pieces.iter_mut() {
        if let (true, Inline::Text { marks, .. }) = (*selected, inline) {
            if all_marked {
                marks.remove(&mark);
            } else {
                marks.insert(mark);
            }
        }
    }

    *inlines = merge_runs(pieces.into_iter().map(|(inline, _)| inline));
    Ok(())
}

fn split_chars(text: &str, at: usize) -> (String, String) {
    let byte = text
        .char_indices()
        .nth(at)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    (text[..byte].to_string(), text[byte..].to_string())
}

/// Join neighbouring text runs carrying the same marks.
fn merge_runs(inlines: impl Iterator<Item = Inline>) -> Vec<Inline> {
    let mut merged: Vec<Inline> = Vec::new();
    for inline in inlines {
        if let (
            Some(Inline::Text {
                text: prev,
                marks: prev_marks,
            }),
            Inline::Text { text, marks },
        ) = (merged.last_mut(), &inline)
        {
            if prev_marks == marks {
                prev.push_str(text);
                continue;
            }
        }
        merged.push(inline);
    }
    merged
}

/// Marks present on every character of `range`, for toolbar state.
pub fn active_marks(inlines: &[Inline], range: Range<usize>) -> BTreeSet<Mark> {
    let mut active: Option<BTreeSet<Mark>> = None;
    let mut offset = 0;
    for inline in inlines {
        let len = inline.as_str().chars().count();
        let (start, end) = (offset, offset + len);
        offset = end;
        if len == 0 || end <= range.start || start >= range.end {
            continue;
        }
        let marks = match inline {
            Inline::Text { marks, .. } => marks.clone(),
            Inline::Link { .. } => BTreeSet::new(),
        };
        active = Some(match active {
            None => marks,
            Some(acc) => acc.intersection(&marks).copied().collect(),
        });
    }
    active.unwrap_or_default()
}
