use crate::pipeline::reference::ACTIVITY_KEYWORDS;

/// Extract canonical activity labels from the free-text activity description.
/// Labels come out in keyword-table order.
pub fn parse_activities(nature_activite: &str) -> Vec<String> {
    if nature_activite.is_empty() {
        return Vec::new();
    }

    let upper = nature_activite.to_uppercase();
    ACTIVITY_KEYWORDS
        .iter()
        .filter(|(keyword, _)| upper.contains(keyword))
        .map(|(_, label)| label.to_string())
        .collect()
}
