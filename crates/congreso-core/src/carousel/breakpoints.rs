// ── Viewport breakpoints ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Width thresholds (in px) separating the three viewport tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    pub tablet_min_width: u32,
    pub desktop_min_width: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            tablet_min_width: 768,
            desktop_min_width: 1024,
        }
    }
}

impl Breakpoints {
    pub fn tier(&self, width_px: u32) -> ViewportTier {
        if width_px >= self.desktop_min_width {
            ViewportTier::Desktop
        } else if width_px >= self.tablet_min_width {
            ViewportTier::Tablet
        } else {
            ViewportTier::Mobile
        }
    }

    /// A width that falls inside `tier`.
    pub fn representative_width(&self, tier: ViewportTier) -> u32 {
        match tier {
            ViewportTier::Mobile => 0,
            ViewportTier::Tablet => self.tablet_min_width,
            ViewportTier::Desktop => self.desktop_min_width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ViewportTier {
    Mobile,
    Tablet,
    Desktop,
}

/// Items shown per view for each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsiveItems {
    pub mobile: usize,
    pub tablet: usize,
    pub desktop: usize,
}

/// How many items a carousel shows at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemsPerView {
    Fixed(usize),
    Responsive(ResponsiveItems),
}

impl Default for ItemsPerView {
    fn default() -> Self {
        Self::Fixed(4)
    }
}

impl ItemsPerView {
    pub fn responsive(mobile: usize, tablet: usize, desktop: usize) -> Self {
        Self::Responsive(ResponsiveItems {
            mobile,
            tablet,
            desktop,
        })
    }

    /// Item count for `tier`, never below one.
    pub fn for_tier(&self, tier: ViewportTier) -> usize {
        let n = match (self, tier) {
            (Self::Fixed(n), _) => *n,
            (Self::Responsive(r), ViewportTier::Mobile) => r.mobile,
            (Self::Responsive(r), ViewportTier::Tablet) => r.tablet,
            (Self::Responsive(r), ViewportTier::Desktop) => r.desktop,
        };
        n.max(1)
    }

    pub fn resolve(&self, width_px: u32, breakpoints: &Breakpoints) -> usize {
        self.for_tier(breakpoints.tier(width_px))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_tier_table() {
        let ipv = ItemsPerView::responsive(1, 2, 4);
        let bp = Breakpoints::default();
        assert_eq!(ipv.resolve(1280, &bp), 4);
        assert_eq!(ipv.resolve(800, &bp), 2);
        assert_eq!(ipv.resolve(400, &bp), 1);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let bp = Breakpoints::default();
        assert_eq!(bp.tier(1024), ViewportTier::Desktop);
        assert_eq!(bp.tier(1023), ViewportTier::Tablet);
        assert_eq!(bp.tier(768), ViewportTier::Tablet);
        assert_eq!(bp.tier(767), ViewportTier::Mobile);
    }

    #[test]
    fn fixed_ignores_width_and_floors_at_one() {
        let bp = Breakpoints::default();
        assert_eq!(ItemsPerView::Fixed(3).resolve(200, &bp), 3);
        assert_eq!(ItemsPerView::Fixed(0).resolve(2000, &bp), 1);
        assert_eq!(ItemsPerView::default(), ItemsPerView::Fixed(4));
    }
}
