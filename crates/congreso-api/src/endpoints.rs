//! Content keys used by the site's sections.
//!
//! Each key is the backend-relative path + query the CMS expects. Keys are
//! also the cache identity, so two sections asking for the same constant
//! share a single request.

/// Hero block of the home page (title, description, event date, background).
pub const HOME_HERO: &str = "/api/home-page?populate[HomeSection][populate]=*";

/// General home settings, including the congress logo.
pub const HOME_GENERAL: &str = "/api/home-page?populate[HomeGeneral][populate]=*";

/// Introduction block below the hero.
pub const HOME_INTRO: &str = "/api/home-page?populate[IntroSectionHome][populate]=*";

/// Global SEO settings.
pub const SEO_SETTINGS: &str = "/api/seo-setting?populate=*";

/// Site configuration: colors, navigation, footer.
pub const CONFIGURATION: &str = "/api/configuracion?populate[logo][populate]=*&populate[main_navigation][populate]=*&populate[footer][populate]=*";

/// Heading block of the speakers section.
pub const SPEAKERS_SECTION: &str = "/api/home-page?populate[DisertantesSection][populate]=*";

/// Speaker list with avatar and country.
pub const SPEAKERS: &str = "/api/Disertantes?populate[avatar][populate]=*&populate[pai][populate]=*";

/// Heading block of the workshops page.
pub const WORKSHOPS_PAGE: &str = "/api/talleres-page?populate=*";

/// Workshop list.
pub const WORKSHOPS: &str = "/api/talleres?populate=*";

/// Registration cost table.
pub const COSTS: &str = "/api/home-page?populate[CostosSection][populate]=*";

/// Programme teaser on the home page.
pub const PROGRAMME_SECTION: &str = "/api/home-page?populate[programa_section][populate]=*";

/// Full agenda page.
pub const PROGRAMME: &str = "/api/pagina-de-programa?populate[Agenda][populate]=*";

/// Venue block.
pub const VENUE: &str = "/api/home-page?populate[sede_congreso_section][populate]=*";

/// Sponsor logos.
pub const SPONSORS: &str = "/api/home-page?populate[Auspiciantes][populate][AuspiciantesSection][populate][Auspiciante][populate][auspiciante][populate]=*";
