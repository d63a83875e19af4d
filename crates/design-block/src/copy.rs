//! Marketing copy shown around the QR code, and the static fallback table.

use std::fmt;

/// Maximum number of bullets rendered under the QR code.
pub const MAX_BULLETS: usize = 3;

/// What the QR code is used for. Drives the copy prompt and fallback copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purpose {
    Website,
    StoreLocation,
    Reviews,
    SocialProfile,
    PaymentLink,
    MenuCatalog,
    ProductInfo,
    CallContact,
}

impl Purpose {
    pub const ALL: [Purpose; 8] = [
        Purpose::Website,
        Purpose::StoreLocation,
        Purpose::Reviews,
        Purpose::SocialProfile,
        Purpose::PaymentLink,
        Purpose::MenuCatalog,
        Purpose::ProductInfo,
        Purpose::CallContact,
    ];

    /// Prompt context used when no purpose was chosen.
    pub const GENERAL: &'static str = "General business use";

    pub fn label(self) -> &'static str {
        match self {
            Purpose::Website => "Website / Landing Page",
            Purpose::StoreLocation => "Store Location (Maps)",
            Purpose::Reviews => "Reviews",
            Purpose::SocialProfile => "Social Profile",
            Purpose::PaymentLink => "Payment Link",
            Purpose::MenuCatalog => "Menu / Catalog",
            Purpose::ProductInfo => "Product Info",
            Purpose::CallContact => "Call / Contact",
        }
    }

    /// Match a display label (case-insensitive) or a short slug.
    pub fn from_label(s: &str) -> Option<Self> {
        let needle = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|p| {
            p.label().to_lowercase() == needle || p.slug() == needle
        })
    }

    pub fn slug(self) -> &'static str {
        match self {
            Purpose::Website => "website",
            Purpose::StoreLocation => "location",
            Purpose::Reviews => "reviews",
            Purpose::SocialProfile => "social",
            Purpose::PaymentLink => "payment",
            Purpose::MenuCatalog => "menu",
            Purpose::ProductInfo => "product",
            Purpose::CallContact => "contact",
        }
    }

    /// Label for prompts, falling back to [`Purpose::GENERAL`].
    pub fn context(purpose: Option<Purpose>) -> &'static str {
        purpose.map_or(Self::GENERAL, Purpose::label)
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Headline plus up to three bullet lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyBlock {
    pub title: String,
    pub bullets: Vec<String>,
}

impl CopyBlock {
    pub fn new(title: impl Into<String>, bullets: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            title: title.into(),
            bullets: bullets.into_iter().map(Into::into).take(MAX_BULLETS).collect(),
        }
    }

    /// Non-empty title and between one and three non-empty bullets.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.bullets.is_empty()
            && self.bullets.len() <= MAX_BULLETS
            && self.bullets.iter().all(|b| !b.trim().is_empty())
    }

    /// Static copy keyed by purpose. Never fails.
    pub fn fallback(purpose: Option<Purpose>) -> Self {
        let (title, bullets): (&str, [&str; 3]) = match purpose {
            Some(Purpose::Website) => (
                "Visit Our Website — Scan to Explore",
                [
                    "Discover our latest products and services",
                    "Read customer stories and reviews",
                    "Get exclusive online-only offers",
                ],
            ),
            Some(Purpose::StoreLocation) => (
                "Find Us Easily — Scan for Directions",
                [
                    "Opens directly in Google Maps",
                    "Get turn-by-turn navigation",
                    "See our hours and parking info",
                ],
            ),
            Some(Purpose::Reviews) => (
                "Love Our Service? Share Your Feedback",
                [
                    "Takes less than 30 seconds",
                    "Help others discover us",
                    "We read and value every review",
                ],
            ),
            Some(Purpose::SocialProfile) => (
                "Follow Us — Scan to Connect",
                [
                    "Stay updated with our latest news",
                    "Exclusive content for followers",
                    "Join our growing community",
                ],
            ),
            Some(Purpose::PaymentLink) => (
                "Quick & Easy Payment — Scan to Pay",
                [
                    "Secure and instant processing",
                    "Multiple payment methods supported",
                    "Get a digital receipt instantly",
                ],
            ),
            Some(Purpose::MenuCatalog) => (
                "Browse Our Full Menu — Scan Here",
                [
                    "See all items with photos and prices",
                    "Check daily specials and new arrivals",
                    "Dietary info and allergen details included",
                ],
            ),
            Some(Purpose::ProductInfo) => (
                "Learn More About This Product",
                [
                    "Full specs and feature comparison",
                    "Watch demo videos",
                    "Check availability and pricing",
                ],
            ),
            Some(Purpose::CallContact) => (
                "Get in Touch — Scan to Call Us",
                [
                    "Connect directly with our team",
                    "No typing needed, one-tap call",
                    "Available during business hours",
                ],
            ),
            None => (
                "Scan to Discover More",
                [
                    "Quick and easy — just point your camera",
                    "No app download required",
                    "Works on any smartphone",
                ],
            ),
        };
        Self::new(title, bullets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fallback_is_complete() {
        for purpose in Purpose::ALL.into_iter().map(Some).chain([None]) {
            let copy = CopyBlock::fallback(purpose);
            assert!(copy.is_complete(), "{purpose:?}");
            assert_eq!(copy.bullets.len(), 3);
        }
    }

    #[test]
    fn fallbacks_are_distinct() {
        let titles: std::collections::HashSet<_> = Purpose::ALL
            .into_iter()
            .map(|p| CopyBlock::fallback(Some(p)).title)
            .chain([CopyBlock::fallback(None).title])
            .collect();
        assert_eq!(titles.len(), 9);
    }

    #[test]
    fn purpose_lookup_by_label_and_slug() {
        assert_eq!(Purpose::from_label("menu / catalog"), Some(Purpose::MenuCatalog));
        assert_eq!(Purpose::from_label("reviews"), Some(Purpose::Reviews));
        assert_eq!(Purpose::from_label("contact"), Some(Purpose::CallContact));
        assert_eq!(Purpose::from_label("unknown"), None);
        assert_eq!(Purpose::context(None), "General business use");
    }

    #[test]
    fn new_truncates_bullets() {
        let copy = CopyBlock::new("Title", ["a", "b", "c", "d"]);
        assert_eq!(copy.bullets, vec!["a", "b", "c"]);
    }

    #[test]
    fn incomplete_copy_is_detected() {
        assert!(!CopyBlock::new("", ["a"]).is_complete());
        assert!(!CopyBlock::new("Title", Vec::<String>::new()).is_complete());
        assert!(!CopyBlock::new("Title", ["  "]).is_complete());
    }
}
