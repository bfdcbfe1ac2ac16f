//! # Raw Content
//!
//! The caller's document, read into explicit structs once its value types
//! have been checked. Every field is optional: an absent key and an explicit
//! `null` both read as `None`, and blank strings are treated as absent by
//! [`text`]. Unknown keys are ignored.

use serde::Deserialize;

use crate::link;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContent {
    pub meta: Option<RawMeta>,
    pub hero: Option<RawHero>,
    pub benefits: Option<RawBenefits>,
    pub options: Option<RawOptions>,
    pub proof: Option<RawProof>,
    pub social: Option<RawSocial>,
    pub secondary: Option<RawSecondary>,
    pub seller: Option<RawSeller>,
    pub footer: Option<RawFooter>,
    pub brand: Option<RawBrand>,
    pub theme: Option<RawTheme>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub og_image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHero {
    pub eyebrow: Option<String>,
    pub headline: Option<String>,
    pub subhead: Option<String>,
    pub cta_label: Option<String>,
    pub scheduler_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBenefits {
    pub heading: Option<String>,
    /// The primary operational benefit statement.
    pub primary: Option<String>,
    pub items: Option<Vec<RawBenefitItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBenefitItem {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOptions {
    pub heading: Option<String>,
    pub cards: Option<Vec<RawOptionCard>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOptionCard {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub highlighted: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProof {
    pub heading: Option<String>,
    pub demo_url: Option<String>,
    pub testimonials: Option<Vec<RawTestimonial>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTestimonial {
    pub quote: Option<String>,
    pub author: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSocial {
    pub heading: Option<String>,
    pub items: Option<Vec<RawSocialItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSocialItem {
    pub name: Option<String>,
    pub url: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSecondary {
    pub headline: Option<String>,
    pub body: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSeller {
    pub name: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFooter {
    pub text: Option<String>,
    pub links: Option<Vec<RawFooterLink>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFooterLink {
    pub label: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBrand {
    pub name: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTheme {
    pub primary: Option<String>,
    pub background: Option<String>,
    pub text: Option<String>,
    pub accent: Option<String>,
    pub font_heading: Option<String>,
    pub font_body: Option<String>,
}

/// Trimmed text, or `None` when absent or blank.
pub fn text(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Elements of an optional list; absent reads as empty.
pub fn list<T>(field: &Option<Vec<T>>) -> &[T] {
    field.as_deref().unwrap_or(&[])
}

impl RawContent {
    /// The hero headline, if present and non-blank.
    pub fn headline(&self) -> Option<&str> {
        self.hero.as_ref().and_then(|h| text(&h.headline))
    }
}

// Renderability predicates. The normalizer keeps exactly the items these
// accept, so the validator's content-group check and the normalizer's
// section elision never disagree.

impl RawBenefitItem {
    pub fn is_renderable(&self) -> bool {
        text(&self.title).is_some() || text(&self.body).is_some()
    }
}

impl RawBenefits {
    pub fn is_renderable(&self) -> bool {
        text(&self.primary).is_some() || list(&self.items).iter().any(RawBenefitItem::is_renderable)
    }
}

impl RawOptionCard {
    pub fn is_renderable(&self) -> bool {
        text(&self.name).is_some()
    }
}

impl RawOptions {
    pub fn is_renderable(&self) -> bool {
        list(&self.cards).iter().any(RawOptionCard::is_renderable)
    }
}

impl RawTestimonial {
    pub fn is_renderable(&self) -> bool {
        text(&self.quote).is_some()
    }
}

impl RawProof {
    pub fn is_renderable(&self) -> bool {
        list(&self.testimonials)
            .iter()
            .any(RawTestimonial::is_renderable)
            || text(&self.demo_url).is_some_and(|u| link::parse_https(u).is_ok())
    }
}
