// DOM hooks and frontend-only tuning.
//
// Motion tuning lives in `folio_core::constants`; everything here is about
// finding elements and translating browser events.
// Element ids
pub const CANVAS_ID: &str = "hero-canvas";
pub const CURSOR_ID: &str = "cursor";
pub const CURSOR_FOLLOWER_ID: &str = "cursor-follower";
pub const NAV_ID: &str = "nav";
pub const CONTACT_FORM_ID: &str = "contact-form";

// Selectors for the page's animated targets
pub const HERO_SELECTOR: &str = ".hero";
pub const HERO_CONTENT_SELECTOR: &str = ".hero__content";
pub const HERO_LABEL_SELECTOR: &str = ".hero__label";
pub const HERO_LINE_SELECTOR: &str = ".line";
pub const HERO_SUB_SELECTOR: &str = ".hero__sub";
pub const HERO_ACTIONS_SELECTOR: &str = ".hero__actions";
pub const HERO_STATS_SELECTOR: &str = ".hero__stats";
pub const HERO_SCROLL_HINT_SELECTOR: &str = ".hero__scroll-hint";
pub const STAT_COUNTER_SELECTOR: &str = ".stat__num";
pub const SPLIT_TEXT_SELECTOR: &str = ".split-text";
pub const REVEAL_UP_SELECTOR: &str = ".reveal-up";
pub const REVEAL_SCALE_SELECTOR: &str = ".reveal-scale";
pub const ABOUT_IMAGE_SELECTOR: &str = ".about__image";
pub const ABOUT_IMAGE_BG_SELECTOR: &str = ".about__image-bg";
pub const SKILLS_SELECTOR: &str = ".skills";
pub const SKILL_CARD_SELECTOR: &str = ".skill-card";
pub const SKILL_FILL_SELECTOR: &str = ".skill-card__fill";
pub const PROJECT_CARD_SELECTOR: &str = ".project-card";
pub const SECTION_TAG_SELECTOR: &str = ".section-tag";
pub const CONTACT_SELECTOR: &str = ".contact";
pub const CONTACT_CHILDREN_SELECTOR: &str = ".contact__grid > *";

// Interaction hooks
pub const HOVER_SELECTOR: &str = "a, button, .skill-card, .project-card, .magnetic";
pub const HOVER_CLASS: &str = "hovered";
pub const MAGNETIC_SELECTOR: &str = ".magnetic";
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const STRIP_SELECTOR: &str = ".projects__horizontal";

// Data attributes
pub const COUNTER_TARGET_ATTR: &str = "data-target";
pub const FILL_WIDTH_ATTR: &str = "data-width";
pub const TARGET_ID_ATTR: &str = "data-motion-id";

// Split text markup
pub const SPLIT_WORD_CLASS: &str = "word";
pub const SPLIT_CHAR_CLASS: &str = "char";

// Wheel normalisation (WheelEvent.deltaMode)
pub const WHEEL_LINE_HEIGHT_PX: f64 = 16.0;

// Projects strip
pub const STRIP_WHEEL_MULTIPLIER: f64 = 1.5; // vertical wheel -> horizontal scroll
pub const STRIP_DRAG_MULTIPLIER: f64 = 2.0;
pub const STRIP_CURSOR_IDLE: &str = "grab";
pub const STRIP_CURSOR_DRAGGING: &str = "grabbing";

// Particle canvas is composited over the page background
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 0.0];
