//! Static category style table used for marker icons and cluster gradients.

use serde::Serialize;

use super::entity::LocatedEntity;

/// Color used for categories missing from the table.
pub const DEFAULT_CATEGORY_COLOR: &str = "#000";

const ESSENTIALS: &str = "#015BC3";
const SHELTER: &str = "#4D03CD";
const MEDICAL: &str = "#CC0000";
const ANIMALS: &str = "#DB5D02";

/// Icon and color for one category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    pub icon: &'static str,
    pub color: &'static str,
}

const fn style(icon: &'static str, color: &'static str) -> CategoryStyle {
    CategoryStyle { icon, color }
}

static CATEGORY_STYLES: &[(&str, CategoryStyle)] = &[
    // Resources
    ("Food & Water", style("fa-solid fa-burger", ESSENTIALS)),
    ("Clothing & Personal Items", style("fa-solid fa-tshirt", ESSENTIALS)),
    ("Hygiene & Sanitation", style("fa-solid fa-bath", ESSENTIALS)),
    ("Financial Support", style("fa-solid fa-money-bill-wave", ESSENTIALS)),
    ("Shelters & Housing Assistance", style("fa-solid fa-home", SHELTER)),
    ("Transportation Assistance", style("fa-solid fa-car-side", SHELTER)),
    ("Legal Aid", style("fa-solid fa-gavel", SHELTER)),
    ("Medical Aid & First Aid", style("fa-solid fa-briefcase-medical", MEDICAL)),
    ("Mental Health Support", style("fa-solid fa-people-group", MEDICAL)),
    ("Animal Boarding", style("fa-solid fa-dog", ANIMALS)),
    ("Veterinary Care & Pet Food", style("fa-solid fa-paw", ANIMALS)),
    // Donations
    ("Clothing & Bedding", style("fa-solid fa-tshirt", ESSENTIALS)),
    ("Hygiene & Sanitation Supplies", style("fa-solid fa-bath", ESSENTIALS)),
    ("Emergency Supplies", style("fa-solid fa-home", SHELTER)),
    ("Medical Supplies", style("fa-solid fa-briefcase-medical", MEDICAL)),
    ("Pet Supplies", style("fa-solid fa-dog", ANIMALS)),
    ("Monetary Donations (Essentials)", style("fa-solid fa-money-bill-wave", ESSENTIALS)),
    (
        "Monetary Donations (Shelter & Support Services)",
        style("fa-solid fa-money-bill-wave", SHELTER),
    ),
    (
        "Monetary Donations (Medical & Health)",
        style("fa-solid fa-money-bill-wave", MEDICAL),
    ),
    (
        "Monetary Donations (Animal Support)",
        style("fa-solid fa-money-bill-wave", ANIMALS),
    ),
    // Volunteering
    ("Food & Water Distribution", style("fa-solid fa-burger", ESSENTIALS)),
    ("Clothing & Supplies Distribution", style("fa-solid fa-tshirt", ESSENTIALS)),
    ("Donation Sorting & Packing", style("fa-solid fa-box-open", ESSENTIALS)),
    ("Shelter Assistance", style("fa-solid fa-home", SHELTER)),
    ("Transportation & Delivery Support", style("fa-solid fa-car-side", SHELTER)),
    ("Medical Aid Support", style("fa-solid fa-briefcase-medical", MEDICAL)),
    ("Animal Shelter Assistance", style("fa-solid fa-dog", ANIMALS)),
    ("Animal Rescue & Transport", style("fa-solid fa-paw", ANIMALS)),
    ("Pet Supply Distribution", style("fa-solid fa-bowl-food", ANIMALS)),
];

/// Style for a category label, if known.
pub fn category_style(category: &str) -> Option<CategoryStyle> {
    CATEGORY_STYLES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, style)| *style)
}

pub fn category_color(category: &str) -> &'static str {
    category_style(category)
        .map(|s| s.color)
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}

/// Distinct colors of every member category, in first-appearance order.
pub fn cluster_colors<'a, I>(members: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a LocatedEntity>,
{
    let mut colors: Vec<&'static str> = Vec::new();
    for entity in members {
        for category in &entity.types {
            let color = category_color(category);
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
    }
    colors
}
