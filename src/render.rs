//! Maps activities onto display strings.
//!
//! Rendering never fails: missing upstream fields become empty text.

use crate::models::{Activity, ActivityCard, CategoryResult, RenderedView};

pub const CATEGORIES: [&str; 7] = [
    "education",
    "recreational",
    "social",
    "charity",
    "cooking",
    "relaxation",
    "busywork",
];

const ANIMATION_STEP_SECS: f64 = 0.1;

pub fn category_label(kind: &str) -> &str {
    match kind {
        "education" => "Education",
        "recreational" => "Recreational",
        "social" => "Social",
        "charity" => "Charity",
        "cooking" => "Cooking",
        "relaxation" => "Relaxation",
        "busywork" => "Busywork",
        other => other,
    }
}

pub fn price_tier(price: f64) -> &'static str {
    if price == 0.0 {
        "Free"
    } else if price <= 0.3 {
        "Nearly free"
    } else if price <= 0.6 {
        "Cheap"
    } else {
        "Expensive"
    }
}

pub fn accessibility_tier(accessibility: f64) -> &'static str {
    if accessibility <= 0.3 {
        "Easy"
    } else if accessibility <= 0.6 {
        "Neither easy nor hard"
    } else {
        "Hard"
    }
}

pub fn participants_label(count: i64) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} participante{suffix}")
}

pub fn render_card(activity: &Activity, index: Option<usize>) -> ActivityCard {
    ActivityCard {
        type_label: category_label(&activity.kind).to_string(),
        participants: activity
            .participants
            .map(participants_label)
            .unwrap_or_default(),
        title: activity.activity.clone(),
        description: activity.activity.clone(),
        price: activity
            .price
            .map(|p| price_tier(p).to_string())
            .unwrap_or_default(),
        accessibility: activity
            .accessibility
            .map(|a| accessibility_tier(a).to_string())
            .unwrap_or_default(),
        animation_delay: index.map(|i| i as f64 * ANIMATION_STEP_SECS),
    }
}

pub fn render_single(activity: &Activity) -> RenderedView {
    RenderedView::Single {
        card: render_card(activity, None),
    }
}

pub fn render_list(activities: &[Activity], category: &str) -> RenderedView {
    RenderedView::List {
        heading: format!("Actividades de {}", category_label(category)),
        cards: activities
            .iter()
            .enumerate()
            .map(|(index, activity)| render_card(activity, Some(index)))
            .collect(),
    }
}

pub fn render_category(result: &CategoryResult, category: &str) -> RenderedView {
    match result {
        CategoryResult::One(activity) => render_single(activity),
        CategoryResult::Many(activities) => render_list(activities, category),
    }
}
