use crate::domain::shopping_list::{
    entities::{Category, CategoryGrouping},
    value_objects::UncategorizedPolicy,
};

pub const UNCATEGORIZED_HEADING: &str = "UNCATEGORIZED";

/// Renders the reply text for a grouping.
///
/// Categories follow `Category::DISPLAY_ORDER`; each non-empty category is
/// its name, one ingredient per line, then a blank line. Labels outside the
/// display order only appear when `policy` is `Surface`.
pub fn render_message(grouping: &CategoryGrouping, policy: UncategorizedPolicy) -> String {
    let mut message = String::new();

    for category in Category::DISPLAY_ORDER {
        if let Some(items) = grouping.items(category.display_name())
            && !items.is_empty()
        {
            push_section(&mut message, category.display_name(), items);
        }
    }

    if policy == UncategorizedPolicy::Surface {
        let stray = grouping.uncategorized();
        if !stray.is_empty() {
            push_section(&mut message, UNCATEGORIZED_HEADING, &stray);
        }
    }

    message
}

fn push_section<S: AsRef<str>>(message: &mut String, heading: &str, items: &[S]) {
    message.push_str(heading);
    message.push('\n');
    for item in items {
        message.push_str(item.as_ref());
        message.push('\n');
    }
    message.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shopping_list::entities::CategoryLabel;

    fn grouping(entries: &[(&str, &str)]) -> CategoryGrouping {
        let mut grouping = CategoryGrouping::new();
        for (label, item) in entries {
            grouping.insert(CategoryLabel::from_model_label(label), item.to_string());
        }
        grouping
    }

    #[test]
    fn test_render_recipe_example() {
        let grouping = grouping(&[
            ("PRODUCE", "Flour"),
            ("MEAT_FISH", "Chicken breast"),
            ("SPICES", "Salt"),
        ]);

        assert_eq!(
            render_message(&grouping, UncategorizedPolicy::Drop),
            "PRODUCE\nFlour\n\nMEAT AND FISH\nChicken breast\n\nSPICES\nSalt\n\n"
        );
    }

    #[test]
    fn test_render_order_ignores_insertion_order() {
        let grouping = grouping(&[
            ("SPICES", "Cumin"),
            ("DAIRY", "Butter"),
            ("OTHER", "Rice"),
            ("PRODUCE", "Garlic"),
            ("MEAT_FISH", "Salmon"),
            ("DAIRY", "Milk"),
        ]);

        assert_eq!(
            render_message(&grouping, UncategorizedPolicy::Drop),
            "PRODUCE\nGarlic\n\nMEAT AND FISH\nSalmon\n\nDAIRY\nButter\nMilk\n\nOTHER\nRice\n\nSPICES\nCumin\n\n"
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let grouping = grouping(&[("DAIRY", "Butter"), ("PRODUCE", "Leek")]);
        let first = render_message(&grouping, UncategorizedPolicy::Drop);
        let second = render_message(&grouping, UncategorizedPolicy::Drop);
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_unknown_label_is_dropped() {
        let grouping = grouping(&[("BAKERY", "Sourdough"), ("DAIRY", "Butter")]);
        let message = render_message(&grouping, UncategorizedPolicy::Drop);

        assert_eq!(message, "DAIRY\nButter\n\n");
        assert!(!message.contains("Sourdough"));
        assert_eq!(grouping.len(), 2);
    }

    #[test]
    fn test_unknown_label_is_surfaced() {
        let grouping = grouping(&[
            ("BAKERY", "Sourdough"),
            ("DAIRY", "Butter"),
            ("FROZEN", "Peas"),
        ]);

        assert_eq!(
            render_message(&grouping, UncategorizedPolicy::Surface),
            "DAIRY\nButter\n\nUNCATEGORIZED\nSourdough\nPeas\n\n"
        );
    }

    #[test]
    fn test_empty_grouping_renders_nothing() {
        assert_eq!(
            render_message(&CategoryGrouping::new(), UncategorizedPolicy::Surface),
            ""
        );
    }
}
