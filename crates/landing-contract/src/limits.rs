//! # Length Caps
//!
//! Two-tier length policy for user-authored text. A value longer than its
//! soft cap is kept verbatim and flagged; a value longer than its hard limit
//! is rejected. Lengths are Unicode scalar values (code points), measured on
//! the trimmed text.
//!
//! These thresholds are part of the content contract. Changing one requires
//! bumping [`crate::CONTRACT_VERSION`].

/// A soft cap and hard limit for one kind of text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthCap {
    /// Human name used in issue messages.
    pub label: &'static str,
    /// Longest length that produces no issue.
    pub soft: usize,
    /// Longest length that is accepted at all.
    pub hard: usize,
}

/// Outcome of checking one value against a cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthVerdict {
    Within,
    OverSoft { len: usize },
    OverHard { len: usize },
}

impl LengthCap {
    /// Check `text` against this cap.
    pub fn check(&self, text: &str) -> LengthVerdict {
        let len = code_points(text);
        if len > self.hard {
            LengthVerdict::OverHard { len }
        } else if len > self.soft {
            LengthVerdict::OverSoft { len }
        } else {
            LengthVerdict::Within
        }
    }
}

pub const HEADLINE: LengthCap = LengthCap {
    label: "headline",
    soft: 90,
    hard: 108,
};

pub const SUBHEAD: LengthCap = LengthCap {
    label: "subhead",
    soft: 180,
    hard: 216,
};

pub const BENEFIT_BODY: LengthCap = LengthCap {
    label: "benefit body",
    soft: 400,
    hard: 480,
};

pub const QUOTE: LengthCap = LengthCap {
    label: "quote",
    soft: 300,
    hard: 360,
};

/// Number of Unicode code points in `text`.
pub fn code_points(text: &str) -> usize {
    text.chars().count()
}

/// Cut `text` to at most `max` code points, ending in an ellipsis when cut.
///
/// Used only for the meta description, which follows search-snippet length
/// conventions rather than the authored-content contract.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if code_points(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let kept: String = text.chars().take(max - 1).collect();
    format!("{}\u{2026}", kept.trim_end())
}
