//! Heading rules.
//!
//! Each rule inspects one line and either decides its fate or passes it on
//! to the next rule in the chain. The classifier runs rules in order and the
//! first decision wins.

use regex::Regex;

use super::config::OutlineConfig;
use super::normalize::collapse_whitespace;
use crate::model::{HeadingCandidate, HeadingLevel, Line};

/// Document-wide facts available to every rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Dominant body text size, `None` when the document has no body text
    pub baseline: Option<f32>,
    /// Inference thresholds
    pub config: &'a OutlineConfig,
}

impl<'a> RuleContext<'a> {
    /// Create a rule context.
    pub fn new(baseline: Option<f32>, config: &'a OutlineConfig) -> Self {
        Self { baseline, config }
    }
}

/// Decision a rule makes about a line.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The line is a heading.
    Heading(HeadingCandidate),
    /// The line is body text; later rules are not consulted.
    Body,
}

/// One step of the heading rule chain.
pub trait HeadingRule: Send + Sync {
    /// Short name used in debug logs.
    fn name(&self) -> &str;

    /// Classify a line, or return `None` to defer to the next rule.
    fn evaluate(&self, line: &Line, ctx: &RuleContext<'_>) -> Option<Verdict>;
}

/// Lines that start with a decimal section number such as `2.1`.
///
/// The level is the number of integer groups. The number and any trailing
/// period are stripped from the heading text. A number with nothing after
/// it (a bare page number, say) is body text.
#[derive(Debug, Clone)]
pub struct NumberedHeadingRule {
    pattern: Regex,
}

impl NumberedHeadingRule {
    /// Create the rule.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^([0-9]+(?:\.[0-9]+)*)(\.)?")
                .expect("section number pattern is valid"),
        }
    }

    /// Split a section number off the front of `text`.
    ///
    /// Returns the level and the remaining text, or `None` if `text` is not
    /// numbered.
    pub fn split_number<'t>(&self, text: &'t str) -> Option<(u32, &'t str)> {
        let text = text.trim();
        let caps = self.pattern.captures(text)?;
        let number = caps.get(1)?;
        let rest = &text[caps.get(0)?.end()..];

        // The number must end at a period, whitespace or the end of text,
        // so "1.2Background" and "2.5kg" are not split into a shorter number.
        let terminated =
            caps.get(2).is_some() || rest.is_empty() || rest.starts_with(char::is_whitespace);
        if !terminated {
            return None;
        }

        let level = number.as_str().split('.').count() as u32;
        Some((level, rest.trim()))
    }
}

impl Default for NumberedHeadingRule {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadingRule for NumberedHeadingRule {
    fn name(&self) -> &str {
        "numbered"
    }

    fn evaluate(&self, line: &Line, ctx: &RuleContext<'_>) -> Option<Verdict> {
        let (level, rest) = self.split_number(line.text())?;

        if let (Some(ratio), Some(baseline)) = (ctx.config.numbered_min_size_ratio, ctx.baseline) {
            if line.max_font_size() <= baseline * ratio {
                return None;
            }
        }

        if rest.is_empty() {
            return Some(Verdict::Body);
        }

        let level = HeadingLevel::new(level)?;
        Some(Verdict::Heading(HeadingCandidate::new(
            level,
            collapse_whitespace(rest),
            line.page().saturating_add(1),
        )))
    }
}

/// Short, bold lines set noticeably larger than body text.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmphasizedHeadingRule;

impl HeadingRule for EmphasizedHeadingRule {
    fn name(&self) -> &str {
        "emphasized"
    }

    fn evaluate(&self, line: &Line, ctx: &RuleContext<'_>) -> Option<Verdict> {
        let baseline = ctx.baseline?;
        let config = ctx.config;

        let large = line.max_font_size() > baseline * (1.0 + config.size_margin);
        let short = line.word_count() < config.max_heading_words;

        if large && short && line.is_bold() {
            Some(Verdict::Heading(HeadingCandidate::new(
                HeadingLevel::H1,
                collapse_whitespace(line.text()),
                line.page().saturating_add(1),
            )))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, TextFragment};

    fn line(text: &str, size: f32, bold: bool) -> Line {
        Line::from_fragments(vec![TextFragment::new(
            text,
            size,
            BoundingBox::new(50.0, 100.0, 300.0, 100.0 + size),
            2,
        )
        .with_bold(bold)])
    }

    fn heading(verdict: Option<Verdict>) -> HeadingCandidate {
        match verdict {
            Some(Verdict::Heading(candidate)) => candidate,
            other => panic!("expected heading, got {:?}", other),
        }
    }

    // ==================== Numbered ====================

    #[test]
    fn test_numbered_levels() {
        let rule = NumberedHeadingRule::new();
        let config = OutlineConfig::default();
        let ctx = RuleContext::new(Some(11.0), &config);

        let h = heading(rule.evaluate(&line("2.1 Data Collection", 11.0, false), &ctx));
        assert_eq!(h.level.get(), 2);
        assert_eq!(h.text, "Data Collection");
        assert_eq!(h.page, 3);

        let h = heading(rule.evaluate(&line("1. Introduction", 11.0, false), &ctx));
        assert_eq!(h.level, HeadingLevel::H1);
        assert_eq!(h.text, "Introduction");

        let h = heading(rule.evaluate(&line("3.2.1.4 Deep  Section", 11.0, false), &ctx));
        assert_eq!(h.level.get(), 4);
        assert_eq!(h.text, "Deep Section");
    }

    #[test]
    fn test_numbered_trailing_period() {
        let rule = NumberedHeadingRule::new();
        assert_eq!(rule.split_number("2.1. Methods"), Some((2, "Methods")));
        assert_eq!(rule.split_number("  4 Results "), Some((1, "Results")));
        assert_eq!(rule.split_number("3.Scope"), Some((1, "Scope")));
    }

    #[test]
    fn test_not_numbered() {
        let rule = NumberedHeadingRule::new();
        assert_eq!(rule.split_number("A.1 Appendix"), None);
        assert_eq!(rule.split_number("12abc"), None);
        assert_eq!(rule.split_number("1.2Background"), None);
        assert_eq!(rule.split_number("2.5kg of flour"), None);
        assert_eq!(rule.split_number("Introduction"), None);
        assert_eq!(rule.split_number(""), None);

        let config = OutlineConfig::default();
        let ctx = RuleContext::new(Some(11.0), &config);
        assert_eq!(rule.evaluate(&line("A.1 Appendix", 11.0, false), &ctx), None);
        assert_eq!(rule.evaluate(&line("1.2Background", 11.0, false), &ctx), None);
    }

    #[test]
    fn test_bare_number_is_body() {
        let rule = NumberedHeadingRule::new();
        let config = OutlineConfig::default();
        let ctx = RuleContext::new(Some(11.0), &config);

        assert_eq!(rule.split_number("3.1"), Some((2, "")));
        assert_eq!(rule.evaluate(&line("3.1", 20.0, true), &ctx), Some(Verdict::Body));
        assert_eq!(rule.evaluate(&line("17", 11.0, false), &ctx), Some(Verdict::Body));
    }

    #[test]
    fn test_numbered_min_size_ratio() {
        let rule = NumberedHeadingRule::new();
        let config = OutlineConfig::default().with_numbered_min_size_ratio(0.9);
        let ctx = RuleContext::new(Some(12.0), &config);

        // 10pt is not above 0.9 * 12pt: defer to later rules.
        assert_eq!(rule.evaluate(&line("1 Footnote text", 10.0, false), &ctx), None);
        assert!(matches!(
            rule.evaluate(&line("1 Scope", 12.0, false), &ctx),
            Some(Verdict::Heading(_))
        ));

        // Unknown baseline skips the size check.
        let ctx = RuleContext::new(None, &config);
        assert!(matches!(
            rule.evaluate(&line("1 Footnote text", 10.0, false), &ctx),
            Some(Verdict::Heading(_))
        ));
    }

    // ==================== Emphasized ====================

    #[test]
    fn test_emphasized_heading() {
        let rule = EmphasizedHeadingRule;
        let config = OutlineConfig::default();
        let ctx = RuleContext::new(Some(11.0), &config);

        let h = heading(rule.evaluate(&line("Executive  Summary", 14.0, true), &ctx));
        assert_eq!(h.level, HeadingLevel::H1);
        assert_eq!(h.text, "Executive Summary");
        assert_eq!(h.page, 3);
    }

    #[test]
    fn test_emphasized_requires_all_conditions() {
        let rule = EmphasizedHeadingRule;
        let config = OutlineConfig::default();
        let ctx = RuleContext::new(Some(11.0), &config);

        // Not bold.
        assert_eq!(rule.evaluate(&line("Executive Summary", 14.0, false), &ctx), None);
        // 13.2 is exactly 1.2 * 11: not strictly larger.
        assert_eq!(rule.evaluate(&line("Executive Summary", 13.2, true), &ctx), None);
        // Five words is not fewer than five.
        assert_eq!(
            rule.evaluate(&line("One two three four five", 14.0, true), &ctx),
            None
        );
        assert!(rule
            .evaluate(&line("One two three four", 14.0, true), &ctx)
            .is_some());
    }

    #[test]
    fn test_last_page_index_does_not_overflow() {
        let config = OutlineConfig::default();
        let ctx = RuleContext::new(Some(11.0), &config);
        let last = |text: &str| {
            Line::from_fragments(vec![TextFragment::new(
                text,
                16.0,
                BoundingBox::new(50.0, 100.0, 300.0, 116.0),
                u32::MAX,
            )
            .with_bold(true)])
        };

        let numbered = heading(NumberedHeadingRule::new().evaluate(&last("1 Scope"), &ctx));
        assert_eq!(numbered.page, u32::MAX);
        let emphasized = heading(EmphasizedHeadingRule.evaluate(&last("Scope"), &ctx));
        assert_eq!(emphasized.page, u32::MAX);
    }

    #[test]
    fn test_emphasized_without_baseline() {
        let rule = EmphasizedHeadingRule;
        let config = OutlineConfig::default();
        let ctx = RuleContext::new(None, &config);
        assert_eq!(rule.evaluate(&line("Summary", 30.0, true), &ctx), None);
    }
}
