//! Rule-chain heading classification.

use super::boilerplate::BoilerplateSet;
use super::rules::{EmphasizedHeadingRule, HeadingRule, NumberedHeadingRule, RuleContext, Verdict};
use crate::model::{HeadingCandidate, Line};

/// Runs heading rules over lines, first decision wins.
pub struct HeadingClassifier {
    rules: Vec<Box<dyn HeadingRule>>,
}

impl HeadingClassifier {
    /// Classifier with no rules; every line is body text.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule to the end of the chain.
    pub fn with_rule(mut self, rule: impl HeadingRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Names of the rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Classify one line.
    pub fn classify_line(&self, line: &Line, ctx: &RuleContext<'_>) -> Option<HeadingCandidate> {
        for rule in &self.rules {
            match rule.evaluate(line, ctx) {
                Some(Verdict::Heading(candidate)) => {
                    log::trace!("Rule '{}' matched: {:?}", rule.name(), candidate.text);
                    return Some(candidate);
                }
                Some(Verdict::Body) => return None,
                None => continue,
            }
        }
        None
    }

    /// Classify every non-boilerplate line, in document order.
    pub fn classify(
        &self,
        pages: &[Vec<Line>],
        boilerplate: &BoilerplateSet,
        ctx: &RuleContext<'_>,
    ) -> Vec<HeadingCandidate> {
        pages
            .iter()
            .flatten()
            .filter(|line| !line.is_blank() && !boilerplate.contains(line))
            .filter_map(|line| self.classify_line(line, ctx))
            .collect()
    }
}

impl Default for HeadingClassifier {
    /// Numbered headings first, then emphasized ones.
    fn default() -> Self {
        Self::empty()
            .with_rule(NumberedHeadingRule::new())
            .with_rule(EmphasizedHeadingRule)
    }
}

impl std::fmt::Debug for HeadingClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadingClassifier")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, HeadingLevel, TextFragment};
    use crate::outline::OutlineConfig;

    fn line(text: &str, size: f32, bold: bool, page: u32) -> Line {
        Line::from_fragments(vec![TextFragment::new(
            text,
            size,
            BoundingBox::new(50.0, 100.0, 300.0, 100.0 + size),
            page,
        )
        .with_bold(bold)])
    }

    struct AllCaps;

    impl HeadingRule for AllCaps {
        fn name(&self) -> &str {
            "all-caps"
        }

        fn evaluate(&self, line: &Line, _ctx: &RuleContext<'_>) -> Option<Verdict> {
            let text = line.text().trim();
            let letters = text.chars().any(|c| c.is_alphabetic());
            if letters && text.chars().all(|c| !c.is_lowercase()) {
                Some(Verdict::Heading(HeadingCandidate::new(
                    HeadingLevel::new(2)?,
                    text,
                    line.page() + 1,
                )))
            } else {
                None
            }
        }
    }

    #[test]
    fn test_default_chain_order() {
        let classifier = HeadingClassifier::default();
        assert_eq!(classifier.rule_names(), vec!["numbered", "emphasized"]);
    }

    #[test]
    fn test_numbered_rule_wins() {
        let classifier = HeadingClassifier::default();
        let config = OutlineConfig::default();
        let ctx = RuleContext::new(Some(11.0), &config);

        // Would also satisfy the emphasized rule, but numbering decides the level.
        let h = classifier
            .classify_line(&line("3.1 Scope", 16.0, true, 0), &ctx)
            .unwrap();
        assert_eq!(h.level.get(), 2);
        assert_eq!(h.text, "Scope");
    }

    #[test]
    fn test_body_verdict_stops_chain() {
        let classifier = HeadingClassifier::default();
        let config = OutlineConfig::default();
        let ctx = RuleContext::new(Some(11.0), &config);

        // Large, bold and short, but a bare number.
        assert_eq!(classifier.classify_line(&line("12", 20.0, true, 0), &ctx), None);
    }

    #[test]
    fn test_malformed_numbering_falls_through() {
        let classifier = HeadingClassifier::default();
        let config = OutlineConfig::default();
        let ctx = RuleContext::new(Some(11.0), &config);

        let h = classifier
            .classify_line(&line("A.1 Appendix", 14.0, true, 0), &ctx)
            .unwrap();
        assert_eq!(h.level, HeadingLevel::H1);
        assert_eq!(h.text, "A.1 Appendix");

        assert_eq!(
            classifier.classify_line(&line("A.1 Appendix", 11.0, false, 0), &ctx),
            None
        );
    }

    #[test]
    fn test_custom_rule_extends_chain() {
        let classifier = HeadingClassifier::default().with_rule(AllCaps);
        let config = OutlineConfig::default();
        let ctx = RuleContext::new(Some(11.0), &config);

        let h = classifier
            .classify_line(&line("TERMS AND CONDITIONS OF SALE", 11.0, false, 4), &ctx)
            .unwrap();
        assert_eq!(h.level.get(), 2);
        assert_eq!(h.page, 5);
    }

    #[test]
    fn test_empty_classifier() {
        let classifier = HeadingClassifier::empty();
        let config = OutlineConfig::default();
        let ctx = RuleContext::new(Some(11.0), &config);
        assert_eq!(classifier.classify_line(&line("1 Intro", 11.0, false, 0), &ctx), None);
    }

    #[test]
    fn test_classify_skips_boilerplate() {
        let pages: Vec<Vec<Line>> = (0..3)
            .map(|p| {
                vec![
                    line("1 Company Confidential", 11.0, false, p),
                    line(&format!("{} Chapter", p + 2), 11.0, false, p),
                ]
            })
            .collect();
        let config = OutlineConfig::default();
        let boilerplate = BoilerplateSet::detect(&pages, &config);
        let ctx = RuleContext::new(Some(11.0), &config);

        let candidates = HeadingClassifier::default().classify(&pages, &boilerplate, &ctx);
        let texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Chapter", "Chapter", "Chapter"]);
        assert_eq!(
            candidates.iter().map(|c| c.page).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }
}
