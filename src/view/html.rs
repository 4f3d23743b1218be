//! HTML rendering of the page model.

use super::page::{ListRow, Page, Visibility};
use super::SELECTORS;

/// Escapes text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn display_style(visibility: Visibility, shown: &str) -> String {
    match visibility {
        Visibility::Shown => format!("display: {}", shown),
        Visibility::Hidden => "display: none".to_string(),
    }
}

/// Strips the leading `#` or `.` from a locator.
fn locator_name(selector: &str) -> &str {
    selector.trim_start_matches(['#', '.'])
}

impl ListRow {
    /// Inner markup of the row's `<li>`.
    pub fn inner_html(&self) -> String {
        format!(
            "<strong>{}: </strong> <em>{} Calories</em> \
             <a href=\"#\" class=\"secondary-content\"><i class=\"edit-item fa fa-pencil\"></i></a>",
            escape_html(&self.name),
            self.calories
        )
    }

    pub fn outer_html(&self) -> String {
        format!(
            "<li class=\"{}\" id=\"{}\">{}</li>",
            self.class,
            escape_html(&self.id),
            self.inner_html()
        )
    }
}

impl Page {
    /// Renders the form, the item list and the total as an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str("<form>\n");
        html.push_str(&format!(
            "  <input type=\"text\" id=\"{}\" value=\"{}\">\n",
            locator_name(SELECTORS.item_name_input),
            escape_html(&self.name_input)
        ));
        html.push_str(&format!(
            "  <input type=\"number\" id=\"{}\" value=\"{}\">\n",
            locator_name(SELECTORS.item_calories_input),
            escape_html(&self.calories_input)
        ));
        for (selector, label, visibility) in [
            (SELECTORS.add_btn, "Add Meal", self.add_btn),
            (SELECTORS.update_btn, "Update Meal", self.update_btn),
            (SELECTORS.delete_btn, "Delete Meal", self.delete_btn),
            (SELECTORS.back_btn, "Back", self.back_btn),
        ] {
            html.push_str(&format!(
                "  <button class=\"{}\" style=\"{}\">{}</button>\n",
                locator_name(selector),
                display_style(visibility, "inline"),
                label
            ));
        }
        html.push_str("</form>\n");

        html.push_str(&format!(
            "<h3>Total Calories: <span class=\"{}\">{}</span></h3>\n",
            locator_name(SELECTORS.total_calories),
            escape_html(&self.total_calories)
        ));

        html.push_str(&format!(
            "<ul id=\"{}\" class=\"collection\" style=\"{}\">\n",
            locator_name(SELECTORS.item_list),
            display_style(self.list, "block")
        ));
        for row in &self.rows {
            html.push_str("  ");
            html.push_str(&row.outer_html());
            html.push('\n');
        }
        html.push_str("</ul>\n");

        html
    }
}
