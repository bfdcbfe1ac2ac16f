//! # Normalizer
//!
//! Rewrites a validated [`RawContent`] into [`NormalizedContent`]. Pure and
//! deterministic: the same input always yields an identical tree.
//!
//! - Text is trimmed; blank text is absent.
//! - Items with no renderable content are dropped; a section left with
//!   nothing to render is omitted.
//! - Soft links that fail hygiene are dropped. Accepted links take their
//!   canonical spelling.
//! - Theme tokens fall back to configured defaults, and low-contrast text is
//!   replaced.
//! - Only the meta description is truncated. Everything else passes through
//!   at its authored length; over-long text is the validator's concern.

use thiserror::Error;

use crate::limits::truncate_with_ellipsis;
use crate::link::canonical_https;
use crate::normalized::{
    BenefitItem, Benefits, Brand, DemoVideo, Footer, FooterLink, Hero, Meta, NormalizedContent,
    OptionCard, Options, Proof, Secondary, Seller, Social, SocialItem, Testimonial, Theme,
};
use crate::raw::{
    list, text, RawBenefits, RawBrand, RawContent, RawFooter, RawHero, RawMeta, RawOptions,
    RawProof, RawSecondary, RawSeller, RawSocial,
};
use crate::theme::ThemePalette;
use crate::video::VideoResolver;
use crate::CONTRACT_VERSION;

/// The normalizer was handed content validation should have rejected.
#[derive(Error, Debug)]
pub enum ContractError {
    #[error("normalize called on content without a hero headline")]
    MissingHeadline,
}

fn owned(field: &Option<String>) -> Option<String> {
    text(field).map(str::to_string)
}

fn soft_link(field: &Option<String>) -> Option<String> {
    text(field).and_then(canonical_https)
}

#[derive(Debug)]
pub(crate) struct Normalizer {
    palette: ThemePalette,
    video: VideoResolver,
    meta_description_max: usize,
}

impl Normalizer {
    pub fn new(palette: ThemePalette, video: VideoResolver, meta_description_max: usize) -> Self {
        Self {
            palette,
            video,
            meta_description_max,
        }
    }

    pub fn normalize(&self, raw: &RawContent) -> Result<NormalizedContent, ContractError> {
        let hero = raw
            .hero
            .as_ref()
            .and_then(normalize_hero)
            .ok_or(ContractError::MissingHeadline)?;
        let benefits = raw.benefits.as_ref().and_then(normalize_benefits);

        Ok(NormalizedContent {
            contract_version: CONTRACT_VERSION,
            meta: self.derive_meta(raw.meta.as_ref(), &hero, benefits.as_ref()),
            hero,
            benefits,
            options: raw.options.as_ref().and_then(normalize_options),
            proof: raw.proof.as_ref().and_then(|p| self.normalize_proof(p)),
            social: raw.social.as_ref().and_then(normalize_social),
            secondary: raw.secondary.as_ref().and_then(normalize_secondary),
            seller: raw.seller.as_ref().and_then(normalize_seller),
            footer: raw.footer.as_ref().and_then(normalize_footer),
            brand: raw.brand.as_ref().and_then(normalize_brand),
            theme: self.normalize_theme(raw),
        })
    }

    /// Title falls back to the headline; description to the subhead, then
    /// the primary benefit.
    fn derive_meta(&self, meta: Option<&RawMeta>, hero: &Hero, benefits: Option<&Benefits>) -> Meta {
        let title = meta
            .and_then(|m| owned(&m.title))
            .unwrap_or_else(|| hero.headline.clone());
        let description = meta
            .and_then(|m| owned(&m.description))
            .or_else(|| hero.subhead.clone())
            .or_else(|| benefits.and_then(|b| b.primary.clone()))
            .map(|d| truncate_with_ellipsis(&d, self.meta_description_max));
        Meta {
            title,
            description,
            og_image: meta.and_then(|m| soft_link(&m.og_image)),
        }
    }

    fn normalize_proof(&self, raw: &RawProof) -> Option<Proof> {
        let demo = text(&raw.demo_url)
            .and_then(|u| crate::link::parse_https(u).ok())
            .map(|url| DemoVideo {
                embed_url: self.video.embed_url(&url),
                url: url.into(),
            });
        let testimonials: Vec<Testimonial> = list(&raw.testimonials)
            .iter()
            .filter_map(|t| {
                Some(Testimonial {
                    quote: owned(&t.quote)?,
                    author: owned(&t.author),
                    role: owned(&t.role),
                    company: owned(&t.company),
                    link: soft_link(&t.link),
                })
            })
            .collect();
        if demo.is_none() && testimonials.is_empty() {
            return None;
        }
        Some(Proof {
            heading: owned(&raw.heading),
            demo,
            testimonials,
        })
    }

    fn normalize_theme(&self, raw: &RawContent) -> Theme {
        let resolved = self.palette.resolve(raw.theme.as_ref());
        Theme {
            primary: resolved.primary.to_hex(),
            background: resolved.background.to_hex(),
            text: resolved.text.to_hex(),
            accent: resolved.accent.to_hex(),
            font_heading: resolved.font_heading,
            font_body: resolved.font_body,
        }
    }
}

fn normalize_hero(raw: &RawHero) -> Option<Hero> {
    Some(Hero {
        eyebrow: owned(&raw.eyebrow),
        headline: owned(&raw.headline)?,
        subhead: owned(&raw.subhead),
        cta_label: owned(&raw.cta_label),
        // A hard link: validation already rejected anything but https.
        scheduler_url: text(&raw.scheduler_url).and_then(canonical_https),
    })
}

fn normalize_benefits(raw: &RawBenefits) -> Option<Benefits> {
    let items: Vec<BenefitItem> = list(&raw.items)
        .iter()
        .filter(|i| i.is_renderable())
        .map(|i| BenefitItem {
            title: owned(&i.title),
            body: owned(&i.body),
        })
        .collect();
    let primary = owned(&raw.primary);
    if primary.is_none() && items.is_empty() {
        return None;
    }
    Some(Benefits {
        heading: owned(&raw.heading),
        primary,
        items,
    })
}

fn normalize_options(raw: &RawOptions) -> Option<Options> {
    let cards: Vec<OptionCard> = list(&raw.cards)
        .iter()
        .filter_map(|c| {
            Some(OptionCard {
                name: owned(&c.name)?,
                price: owned(&c.price),
                description: owned(&c.description),
                features: list(&c.features)
                    .iter()
                    .map(|f| f.trim())
                    .filter(|f| !f.is_empty())
                    .map(str::to_string)
                    .collect(),
                cta_label: owned(&c.cta_label),
                cta_url: text(&c.cta_url).and_then(canonical_https),
                highlighted: c.highlighted.unwrap_or(false),
            })
        })
        .collect();
    if cards.is_empty() {
        return None;
    }
    Some(Options {
        heading: owned(&raw.heading),
        cards,
    })
}

fn normalize_social(raw: &RawSocial) -> Option<Social> {
    let items: Vec<SocialItem> = list(&raw.items)
        .iter()
        .map(|i| SocialItem {
            name: owned(&i.name),
            url: soft_link(&i.url),
            logo_url: soft_link(&i.logo_url),
        })
        .filter(|i| i.name.is_some() || i.url.is_some())
        .collect();
    if items.is_empty() {
        return None;
    }
    Some(Social {
        heading: owned(&raw.heading),
        items,
    })
}

fn normalize_secondary(raw: &RawSecondary) -> Option<Secondary> {
    let section = Secondary {
        headline: owned(&raw.headline),
        body: owned(&raw.body),
        cta_label: owned(&raw.cta_label),
        cta_url: text(&raw.cta_url).and_then(canonical_https),
    };
    let populated = section.headline.is_some()
        || section.body.is_some()
        || section.cta_label.is_some()
        || section.cta_url.is_some();
    populated.then_some(section)
}

fn normalize_seller(raw: &RawSeller) -> Option<Seller> {
    let section = Seller {
        name: owned(&raw.name),
        website: soft_link(&raw.website),
        email: owned(&raw.email),
        phone: owned(&raw.phone),
    };
    let populated = section.name.is_some()
        || section.website.is_some()
        || section.email.is_some()
        || section.phone.is_some();
    populated.then_some(section)
}

fn normalize_footer(raw: &RawFooter) -> Option<Footer> {
    let links: Vec<FooterLink> = list(&raw.links)
        .iter()
        .filter_map(|l| {
            Some(FooterLink {
                label: owned(&l.label)?,
                url: soft_link(&l.url)?,
            })
        })
        .collect();
    let text = owned(&raw.text);
    if text.is_none() && links.is_empty() {
        return None;
    }
    Some(Footer { text, links })
}

fn normalize_brand(raw: &RawBrand) -> Option<Brand> {
    let section = Brand {
        name: owned(&raw.name),
        logo_url: soft_link(&raw.logo_url),
    };
    (section.name.is_some() || section.logo_url.is_some()).then_some(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use serde_json::{json, Value};

    fn normalizer() -> Normalizer {
        Normalizer::new(
            ThemePalette::from_config(&PipelineConfig::default()).unwrap(),
            VideoResolver::new().unwrap(),
            160,
        )
    }

    fn normalize(raw: Value) -> NormalizedContent {
        let content: RawContent = serde_json::from_value(raw).unwrap();
        normalizer().normalize(&content).unwrap()
    }

    fn base() -> Value {
        json!({
            "hero": {"headline": "Close your books in a day"},
            "benefits": {"primary": "Reconcile every account automatically."}
        })
    }

    #[test]
    fn missing_headline_is_contract_violation() {
        let content: RawContent = serde_json::from_value(json!({"benefits": {"primary": "x"}})).unwrap();
        assert!(matches!(
            normalizer().normalize(&content),
            Err(ContractError::MissingHeadline)
        ));
    }

    #[test]
    fn text_is_trimmed() {
        let mut raw = base();
        raw["hero"]["headline"] = json!("  Close your books  ");
        let n = normalize(raw);
        assert_eq!(n.hero.headline, "Close your books");
    }

    #[test]
    fn over_soft_text_is_kept_verbatim() {
        let long = "w".repeat(100);
        let mut raw = base();
        raw["hero"]["headline"] = json!(long.clone());
        assert_eq!(normalize(raw).hero.headline, long);
    }

    #[test]
    fn empty_option_cards_elide_section() {
        let mut raw = base();
        raw["options"] = json!({"heading": "Plans", "cards": []});
        let n = normalize(raw);
        assert!(n.options.is_none());
        let v = serde_json::to_value(&n).unwrap();
        assert!(v.get("options").is_none());
    }

    #[test]
    fn unnamed_cards_are_dropped() {
        let mut raw = base();
        raw["options"] = json!({"cards": [{"price": "$9"}, {"name": "Pro", "features": [" a ", " "]}]});
        let options = normalize(raw).options.unwrap();
        assert_eq!(options.cards.len(), 1);
        assert_eq!(options.cards[0].name, "Pro");
        assert_eq!(options.cards[0].features, vec!["a".to_string()]);
    }

    #[test]
    fn empty_sections_are_absent() {
        let mut raw = base();
        raw["seller"] = json!({"name": "  ", "email": null});
        raw["social"] = json!({"heading": "Trusted by", "items": [{"logoUrl": "https://cdn.x.io/a.png"}]});
        raw["footer"] = json!({"links": [{"label": "Privacy"}]});
        raw["brand"] = json!({});
        raw["secondary"] = json!({"headline": ""});
        let v = serde_json::to_value(normalize(raw)).unwrap();
        for key in ["seller", "social", "footer", "brand", "secondary", "options", "proof"] {
            assert!(v.get(key).is_none(), "{key} should be elided");
        }
    }

    #[test]
    fn insecure_soft_links_are_dropped() {
        let mut raw = base();
        raw["seller"] = json!({"name": "Acme", "website": "http://acme.example"});
        let seller = normalize(raw).seller.unwrap();
        assert_eq!(seller.name.as_deref(), Some("Acme"));
        assert!(seller.website.is_none());
    }

    #[test]
    fn accepted_links_use_canonical_spelling() {
        let mut raw = base();
        raw["seller"] = json!({"website": "https://Acme.example"});
        assert_eq!(
            normalize(raw).seller.unwrap().website.as_deref(),
            Some("https://acme.example/")
        );
    }

    #[test]
    fn vimeo_demo_resolves_to_embed() {
        let mut raw = base();
        raw["proof"] = json!({"demoUrl": "https://vimeo.com/album/42/video/123456789"});
        let demo = normalize(raw).proof.unwrap().demo.unwrap();
        assert_eq!(
            demo.embed_url.as_deref(),
            Some("https://player.vimeo.com/video/123456789")
        );
    }

    #[test]
    fn other_demo_stays_a_link() {
        let mut raw = base();
        raw["proof"] = json!({"demoUrl": "https://example.com/watch?v=abc"});
        let demo = normalize(raw).proof.unwrap().demo.unwrap();
        assert_eq!(demo.url, "https://example.com/watch?v=abc");
        assert!(demo.embed_url.is_none());
    }

    #[test]
    fn meta_is_derived_and_truncated() {
        let mut raw = base();
        raw["hero"]["subhead"] = json!("s".repeat(200));
        let meta = normalize(raw).meta;
        assert_eq!(meta.title, "Close your books in a day");
        let description = meta.description.unwrap();
        assert_eq!(description.chars().count(), 160);
        assert!(description.ends_with('\u{2026}'));
    }

    #[test]
    fn meta_description_falls_back_to_primary_benefit() {
        let meta = normalize(base()).meta;
        assert_eq!(
            meta.description.as_deref(),
            Some("Reconcile every account automatically.")
        );
    }

    #[test]
    fn explicit_meta_wins() {
        let mut raw = base();
        raw["meta"] = json!({"title": "Acme Close", "description": "Month-end, done."});
        let meta = normalize(raw).meta;
        assert_eq!(meta.title, "Acme Close");
        assert_eq!(meta.description.as_deref(), Some("Month-end, done."));
    }

    #[test]
    fn theme_defaults_and_contrast_correction() {
        let n = normalize(base());
        assert_eq!(n.theme.primary, "#2563eb");
        assert_eq!(n.theme.font_body, "Inter");

        let mut raw = base();
        raw["theme"] = json!({"text": "#CCC", "background": "#FFF", "accent": "#F00"});
        let theme = normalize(raw).theme;
        assert_eq!(theme.text, "#111827");
        assert_eq!(theme.background, "#ffffff");
        assert_eq!(theme.accent, "#ff0000");
    }

    #[test]
    fn contract_version_is_stamped() {
        assert_eq!(normalize(base()).contract_version, CONTRACT_VERSION);
    }

    #[test]
    fn normalization_is_deterministic() {
        let raw = base();
        assert_eq!(normalize(raw.clone()), normalize(raw));
    }
}
