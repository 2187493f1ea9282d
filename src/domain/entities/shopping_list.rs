//! Shopping list lines and their plain-text rendering.

use std::fmt::Write as _;

/// First line of every exported shopping list.
pub const SHOPPING_LIST_HEADER: &str = "Shopping list";

/// File name offered to the client for the exported list.
pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// Total amount of one ingredient (name + unit) across every recipe in a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

impl ShoppingListItem {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>, amount: i64) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        }
    }
}

/// Renders the list as a header followed by one `"<name> - <amount> (<unit>)"`
/// line per item. Every line is newline-terminated and items keep their order.
pub fn render_shopping_list(items: &[ShoppingListItem]) -> String {
    let mut out = String::with_capacity(SHOPPING_LIST_HEADER.len() + 1 + items.len() * 32);
    out.push_str(SHOPPING_LIST_HEADER);
    out.push('\n');

    for item in items {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{} - {} ({})",
            item.name, item.amount, item.measurement_unit
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_is_header_only() {
        assert_eq!(render_shopping_list(&[]), "Shopping list\n");
    }

    #[test]
    fn test_line_format() {
        let items = vec![ShoppingListItem::new("Sugar", "g", 150)];

        assert_eq!(
            render_shopping_list(&items),
            "Shopping list\nSugar - 150 (g)\n"
        );
    }

    #[test]
    fn test_items_keep_order() {
        let items = vec![
            ShoppingListItem::new("Eggs", "pcs", 3),
            ShoppingListItem::new("Flour", "g", 500),
            ShoppingListItem::new("Milk", "ml", 250),
        ];

        let rendered = render_shopping_list(&items);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Shopping list",
                "Eggs - 3 (pcs)",
                "Flour - 500 (g)",
                "Milk - 250 (ml)"
            ]
        );
    }
}
