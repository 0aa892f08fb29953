//! Screen identifiers, tab order and the content keys behind each screen.

use std::fmt;

use congreso_api::endpoints;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Home,
    Speakers,
    Workshops,
}

impl ScreenId {
    /// Tab-bar order.
    pub const ALL: [ScreenId; 3] = [Self::Home, Self::Speakers, Self::Workshops];

    pub fn number(self) -> u8 {
        match self {
            Self::Home => 1,
            Self::Speakers => 2,
            Self::Workshops => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Home),
            2 => Some(Self::Speakers),
            3 => Some(Self::Workshops),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn position(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Inicio",
            Self::Speakers => "Disertantes",
            Self::Workshops => "Talleres",
        }
    }

    /// Cache keys this screen renders; `r` revalidates exactly these.
    pub fn content_keys(self) -> &'static [&'static str] {
        match self {
            Self::Home => &[endpoints::HOME_HERO],
            Self::Speakers => &[endpoints::SPEAKERS_SECTION, endpoints::SPEAKERS],
            Self::Workshops => &[endpoints::WORKSHOPS],
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tab_order_wraps_both_ways() {
        assert_eq!(ScreenId::Workshops.next(), ScreenId::Home);
        assert_eq!(ScreenId::Home.prev(), ScreenId::Workshops);
        assert_eq!(ScreenId::Home.next(), ScreenId::Speakers);
    }

    #[test]
    fn number_keys_round_trip() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(id.number()), Some(id));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(4), None);
    }

    #[test]
    fn every_screen_has_content_keys() {
        for id in ScreenId::ALL {
            assert!(!id.content_keys().is_empty(), "{id}");
        }
        assert!(ScreenId::Speakers.content_keys().contains(&endpoints::SPEAKERS));
    }
}
