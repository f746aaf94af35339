//! View model for a `<select>` control populated from the server.
//!
//! Every refresh replaces the full option set; there is no merging and no
//! cache. A control may reserve a leading placeholder option, which
//! survives every replacement.

use crate::view::escape::escape_html;

/// One `<option>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    /// Option whose value equals its label, the common case for course
    /// names.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            value: name.clone(),
            label: name,
        }
    }
}

/// State of one select control.
#[derive(Debug, Clone)]
pub struct SelectControl {
    element_id: String,
    /// Label of the leading empty-valued option, if the control has one.
    placeholder: Option<String>,
    options: Vec<SelectOption>,
}

impl SelectControl {
    /// Create a control with no placeholder.
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            placeholder: None,
            options: Vec::new(),
        }
    }

    /// Create a control whose first option is always an empty-valued
    /// placeholder such as "Select a course".
    pub fn with_placeholder(element_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            placeholder: Some(label.into()),
            options: Vec::new(),
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Options below the placeholder.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Total rendered options, placeholder included.
    pub fn option_count(&self) -> usize {
        self.options.len() + usize::from(self.placeholder.is_some())
    }

    /// Discard the current options and install the new set.
    pub fn replace_options(&mut self, options: impl IntoIterator<Item = SelectOption>) {
        self.options = options.into_iter().collect();
    }

    /// Render the full option list, placeholder first.
    pub fn render_html(&self) -> String {
        let mut html = String::new();
        if let Some(placeholder) = &self.placeholder {
            html.push_str(&format!(
                "<option value=\"\">{}</option>",
                escape_html(placeholder)
            ));
        }
        for option in &self.options {
            html.push_str(&format!(
                "<option value=\"{}\">{}</option>",
                escape_html(&option.value),
                escape_html(&option.label),
            ));
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_discards_previous_options() {
        let mut select = SelectControl::with_placeholder("courseToAdd", "Select a course");
        select.replace_options([SelectOption::named("Old course")]);
        select.replace_options([SelectOption::named("Algorithms")]);

        assert_eq!(select.option_count(), 2);
        assert_eq!(select.options()[0].label, "Algorithms");
    }

    #[test]
    fn placeholder_survives_every_replacement() {
        let mut select = SelectControl::with_placeholder("courseToAdd", "Select a course");
        select.replace_options([SelectOption::named("Algorithms")]);
        select.replace_options(Vec::new());

        assert_eq!(select.placeholder(), Some("Select a course"));
        assert_eq!(select.option_count(), 1);
    }

    #[test]
    fn control_without_placeholder_renders_options_only() {
        let mut select = SelectControl::new("degreeCourse");
        select.replace_options([SelectOption::named("Computer Science")]);

        assert_eq!(select.option_count(), 1);
        assert_eq!(
            select.render_html(),
            "<option value=\"Computer Science\">Computer Science</option>"
        );
    }

    #[test]
    fn render_places_placeholder_first() {
        let mut select = SelectControl::with_placeholder("courseToAdd", "Select a course");
        select.replace_options([SelectOption::named("Algorithms")]);

        let html = select.render_html();
        assert!(html.starts_with("<option value=\"\">Select a course</option>"));
        assert!(html.ends_with("<option value=\"Algorithms\">Algorithms</option>"));
    }

    #[test]
    fn option_labels_are_escaped() {
        let mut select = SelectControl::new("degreeCourse");
        select.replace_options([SelectOption::named("A<B>&C")]);

        let html = select.render_html();
        assert!(html.contains("A&lt;B&gt;&amp;C"));
    }
}
