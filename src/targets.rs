//! Resolves the page's elements into the motion core's target table.

use crate::constants::*;
use crate::dom::DomScene;
use crate::style::parse_number;
use folio_core::{PageTargets, SkillCard, SplitText, TargetId};

fn attr_number(scene: &DomScene, target: TargetId, attr: &str) -> Option<f32> {
    scene
        .element(target)
        .and_then(|el| el.get_attribute(attr))
        .and_then(|v| parse_number(&v))
}

pub fn resolve(scene: &mut DomScene) -> PageTargets {
    let stat_counters = scene
        .select_all(STAT_COUNTER_SELECTOR)
        .into_iter()
        .map(|id| (id, attr_number(scene, id, COUNTER_TARGET_ATTR).unwrap_or(0.0)))
        .collect();

    let split_texts = scene
        .select_all(SPLIT_TEXT_SELECTOR)
        .into_iter()
        .map(|host| SplitText {
            host,
            chars: scene.split_chars(host),
        })
        .collect();

    let skill_cards = scene
        .select_all(SKILL_CARD_SELECTOR)
        .into_iter()
        .map(|card| {
            let fill = scene.select_within(card, SKILL_FILL_SELECTOR);
            let width_percent = fill
                .and_then(|f| attr_number(scene, f, FILL_WIDTH_ATTR))
                .unwrap_or(0.0);
            SkillCard {
                card,
                fill,
                width_percent,
            }
        })
        .collect();

    let contact_form = scene.by_id(CONTACT_FORM_ID);
    let submit_button = contact_form.and_then(|form| scene.select_within(form, "button"));

    let targets = PageTargets {
        body: scene.body(),
        nav: scene.by_id(NAV_ID),
        cursor: scene.by_id(CURSOR_ID),
        cursor_follower: scene.by_id(CURSOR_FOLLOWER_ID),
        hero: scene.select(HERO_SELECTOR),
        hero_content: scene.select(HERO_CONTENT_SELECTOR),
        hero_label: scene.select(HERO_LABEL_SELECTOR),
        hero_lines: scene.select_all(HERO_LINE_SELECTOR),
        hero_sub: scene.select(HERO_SUB_SELECTOR),
        hero_actions: scene.select(HERO_ACTIONS_SELECTOR),
        hero_stats: scene.select(HERO_STATS_SELECTOR),
        hero_scroll_hint: scene.select(HERO_SCROLL_HINT_SELECTOR),
        stat_counters,
        split_texts,
        reveal_up: scene.select_all(REVEAL_UP_SELECTOR),
        reveal_scale: scene.select_all(REVEAL_SCALE_SELECTOR),
        about_image: scene.select(ABOUT_IMAGE_SELECTOR),
        about_image_bg: scene.select(ABOUT_IMAGE_BG_SELECTOR),
        skills: scene.select(SKILLS_SELECTOR),
        skill_cards,
        project_cards: scene.select_all(PROJECT_CARD_SELECTOR),
        section_tags: scene.select_all(SECTION_TAG_SELECTOR),
        contact: scene.select(CONTACT_SELECTOR),
        contact_children: scene.select_all(CONTACT_CHILDREN_SELECTOR),
        submit_button,
    };
    log::info!(
        "[targets] resolved {} hero lines, {} counters, {} split texts, {} skill cards, {} project cards",
        targets.hero_lines.len(),
        targets.stat_counters.len(),
        targets.split_texts.len(),
        targets.skill_cards.len(),
        targets.project_cards.len()
    );
    targets
}
