//! Fenced-code extraction strategies.
//!
//! Fences are found by a single left-to-right scan that pairs each opening
//! fence with the next closing fence, so a closing fence is never mistaken
//! for the start of another block. The first non-blank block in document
//! order wins, whatever its info string. [`STRATEGIES`] only decides which
//! strategy is credited with it.

use once_cell::sync::Lazy;
use regex::Regex;

const FENCE: &str = "```";

/// Opening fence: three backticks, optional info string, end of line.
static OPENING_FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```([\w+#.-]*)[ \t]*\r?\n").expect("static fence pattern")
});

/// One paired fenced block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    /// Info string after the opening fence (`python`, `js`, ...). Empty for bare fences.
    pub info: &'a str,
    /// Text between the fences, untrimmed.
    pub body: &'a str,
}

/// Scan `text` for complete fenced blocks, in document order.
///
/// An opening fence without a closing one ends the scan.
pub fn fenced_blocks(text: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while let Some(caps) = OPENING_FENCE_RE.captures_at(text, cursor) {
        let (Some(open), Some(info)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let body_start = open.end();
        let Some(close_offset) = text[body_start..].find(FENCE) else {
            break;
        };
        let body_end = body_start + close_offset;

        blocks.push(FencedBlock {
            info: info.as_str(),
            body: &text[body_start..body_end],
        });
        cursor = body_end + FENCE.len();
    }

    blocks
}

pub trait ExtractionStrategy {
    fn name(&self) -> &'static str;

    /// Whether this strategy accepts `block`.
    fn accepts(&self, block: &FencedBlock<'_>) -> bool;
}

/// A fence annotated with a language tag, e.g. ```` ```python ````.
pub struct AnnotatedFence;

impl ExtractionStrategy for AnnotatedFence {
    fn name(&self) -> &'static str {
        "annotated_fence"
    }

    fn accepts(&self, block: &FencedBlock<'_>) -> bool {
        !block.info.is_empty()
    }
}

/// A fence with no annotation.
pub struct BareFence;

impl ExtractionStrategy for BareFence {
    fn name(&self) -> &'static str {
        "bare_fence"
    }

    fn accepts(&self, block: &FencedBlock<'_>) -> bool {
        block.info.is_empty()
    }
}

pub const STRATEGIES: &[&dyn ExtractionStrategy] = &[&AnnotatedFence, &BareFence];

/// Code found by a strategy, with the strategy's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub code: String,
    pub strategy: &'static str,
}

/// Take the first non-blank fenced block in `text`, credited to the first
/// strategy in [`STRATEGIES`] that accepts it.
pub fn extract_code(text: &str) -> Option<Extracted> {
    fenced_blocks(text).iter().find_map(|block| {
        let code = block.body.trim();
        if code.is_empty() {
            return None;
        }
        STRATEGIES
            .iter()
            .find(|strategy| strategy.accepts(block))
            .map(|strategy| Extracted {
                code: code.to_string(),
                strategy: strategy.name(),
            })
    })
}
