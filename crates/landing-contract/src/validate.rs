//! # Content Validator
//!
//! Checks a raw document against the content contract and reports every
//! finding as data. It never mutates its input and never fails: absent
//! fields, wrong types, and garbage all become `ValidationIssue`s.
//!
//! Passes, in order:
//!
//! 1. Value types, via the embedded JSON Schema. A document with type errors
//!    stops here, since field-level rules cannot be read reliably.
//! 2. Required fields: a non-blank `hero.headline`, and renderable content in
//!    at least one of `benefits`, `options`, or `proof`.
//! 3. Link hygiene on every recognized URL field.
//! 4. Soft/hard length caps.
//! 5. Degradation signals: non-embeddable demo video, theme colors.

use serde_json::Value;

use crate::issue::{IssueCode, IssueReport};
use crate::limits::{self, LengthCap, LengthVerdict};
use crate::link::{self, LinkClass, LinkProblem};
use crate::raw::{list, text, RawContent};
use crate::schema::ShapeSchema;
use crate::theme::ThemePalette;
use crate::video::VideoResolver;

/// Result of one validation pass.
#[derive(Debug)]
pub(crate) struct Validated {
    pub report: IssueReport,
    /// The document read into typed form, when its shape allowed it.
    pub content: Option<RawContent>,
}

#[derive(Debug)]
pub(crate) struct ContentValidator {
    shape: ShapeSchema,
    palette: ThemePalette,
    video: VideoResolver,
}

impl ContentValidator {
    pub fn new(shape: ShapeSchema, palette: ThemePalette, video: VideoResolver) -> Self {
        Self {
            shape,
            palette,
            video,
        }
    }

    pub fn validate(&self, raw: &Value) -> Validated {
        let mut report = IssueReport::default();

        if !self.shape.check(raw, &mut report) {
            return Validated {
                report,
                content: None,
            };
        }

        let content: RawContent = match serde_json::from_value(raw.clone()) {
            Ok(content) => content,
            Err(e) => {
                report.error(
                    IssueCode::InvalidDocument,
                    None,
                    format!("document could not be read: {e}"),
                );
                return Validated {
                    report,
                    content: None,
                };
            }
        };

        check_required(&content, &mut report);
        self.check_links(&content, &mut report);
        check_lengths(&content, &mut report);
        self.check_theme(&content, &mut report);

        Validated {
            report,
            content: Some(content),
        }
    }

    fn check_links(&self, c: &RawContent, report: &mut IssueReport) {
        use LinkClass::{Hard, Soft};

        if let Some(meta) = &c.meta {
            check_link(report, Soft, "/meta/ogImage", text(&meta.og_image));
        }
        if let Some(hero) = &c.hero {
            check_link(report, Hard, "/hero/schedulerUrl", text(&hero.scheduler_url));
        }
        if let Some(options) = &c.options {
            for (i, card) in list(&options.cards).iter().enumerate() {
                let field = format!("/options/cards/{i}/ctaUrl");
                check_link(report, Hard, &field, text(&card.cta_url));
            }
        }
        if let Some(proof) = &c.proof {
            if let Some(demo) = text(&proof.demo_url) {
                if let Some(url) = check_link(report, Soft, "/proof/demoUrl", Some(demo)) {
                    if self.video.video_id(&url).is_none() {
                        report.warn(
                            IssueCode::VideoNotEmbeddable,
                            Some("/proof/demoUrl"),
                            format!("'{demo}' is not a recognized embeddable video; it will render as a link"),
                        );
                    }
                }
            }
            for (i, t) in list(&proof.testimonials).iter().enumerate() {
                let field = format!("/proof/testimonials/{i}/link");
                check_link(report, Soft, &field, text(&t.link));
            }
        }
        if let Some(social) = &c.social {
            for (i, item) in list(&social.items).iter().enumerate() {
                check_link(report, Soft, &format!("/social/items/{i}/url"), text(&item.url));
                check_link(
                    report,
                    Soft,
                    &format!("/social/items/{i}/logoUrl"),
                    text(&item.logo_url),
                );
            }
        }
        if let Some(secondary) = &c.secondary {
            check_link(report, Hard, "/secondary/ctaUrl", text(&secondary.cta_url));
        }
        if let Some(seller) = &c.seller {
            check_link(report, Soft, "/seller/website", text(&seller.website));
        }
        if let Some(footer) = &c.footer {
            for (i, l) in list(&footer.links).iter().enumerate() {
                check_link(report, Soft, &format!("/footer/links/{i}/url"), text(&l.url));
            }
        }
        if let Some(brand) = &c.brand {
            check_link(report, Soft, "/brand/logoUrl", text(&brand.logo_url));
        }
    }

    fn check_theme(&self, c: &RawContent, report: &mut IssueReport) {
        let resolved = self.palette.resolve(c.theme.as_ref());
        for rejected in &resolved.rejected {
            report.warn(
                IssueCode::InvalidColor,
                Some(format!("/theme/{}", rejected.field).as_str()),
                format!(
                    "'{}' is not a #rgb or #rrggbb color; the default is used",
                    rejected.value
                ),
            );
        }
        if let Some(adj) = &resolved.adjustment {
            report.warn(
                IssueCode::LowContrast,
                Some("/theme/text"),
                format!(
                    "text {} on background {} has contrast {:.2}:1, below {:.1}:1; text color replaced with {}",
                    adj.original,
                    adj.background,
                    adj.ratio,
                    self.palette.min_ratio(),
                    adj.replacement
                ),
            );
        }
    }
}

fn check_required(c: &RawContent, report: &mut IssueReport) {
    if c.headline().is_none() {
        report.error(
            IssueCode::Required,
            Some("/hero/headline"),
            "a hero headline is required",
        );
    }

    let has_group = c.benefits.as_ref().is_some_and(|b| b.is_renderable())
        || c.options.as_ref().is_some_and(|o| o.is_renderable())
        || c.proof.as_ref().is_some_and(|p| p.is_renderable());
    if !has_group {
        report.error(
            IssueCode::MissingContentGroup,
            None,
            "at least one of benefits, options, or proof must have content",
        );
    }
}

/// Check one optional URL field. Returns the parsed URL when it passes.
fn check_link(
    report: &mut IssueReport,
    class: LinkClass,
    field: &str,
    value: Option<&str>,
) -> Option<url::Url> {
    let value = value?;
    let problem = match link::parse_https(value) {
        Ok(url) => return Some(url),
        Err(problem) => problem,
    };
    let code = match problem {
        LinkProblem::Insecure(_) => IssueCode::InsecureUrl,
        LinkProblem::Unparseable(_) => IssueCode::InvalidUrl,
    };
    let message = problem.describe(value);
    match class {
        LinkClass::Hard => report.error(code, Some(field), message),
        LinkClass::Soft => report.warn(code, Some(field), format!("{message}; link dropped")),
    }
    None
}

fn check_lengths(c: &RawContent, report: &mut IssueReport) {
    if let Some(hero) = &c.hero {
        check_length(report, limits::HEADLINE, "/hero/headline", text(&hero.headline));
        check_length(report, limits::SUBHEAD, "/hero/subhead", text(&hero.subhead));
    }
    if let Some(benefits) = &c.benefits {
        check_length(
            report,
            limits::BENEFIT_BODY,
            "/benefits/primary",
            text(&benefits.primary),
        );
        for (i, item) in list(&benefits.items).iter().enumerate() {
            let field = format!("/benefits/items/{i}/body");
            check_length(report, limits::BENEFIT_BODY, &field, text(&item.body));
        }
    }
    if let Some(proof) = &c.proof {
        for (i, t) in list(&proof.testimonials).iter().enumerate() {
            let field = format!("/proof/testimonials/{i}/quote");
            check_length(report, limits::QUOTE, &field, text(&t.quote));
        }
    }
    if let Some(secondary) = &c.secondary {
        check_length(
            report,
            limits::HEADLINE,
            "/secondary/headline",
            text(&secondary.headline),
        );
    }
}

fn check_length(report: &mut IssueReport, cap: LengthCap, field: &str, value: Option<&str>) {
    let Some(value) = value else { return };
    match cap.check(value) {
        LengthVerdict::Within => {}
        LengthVerdict::OverSoft { len } => report.warn(
            IssueCode::LengthSoftCap,
            Some(field),
            format!(
                "{} is {len} characters, over the recommended {}",
                cap.label, cap.soft
            ),
        ),
        LengthVerdict::OverHard { len } => report.error(
            IssueCode::LengthHardLimit,
            Some(field),
            format!(
                "{} is {len} characters, over the limit of {}",
                cap.label, cap.hard
            ),
        ),
    }
}
