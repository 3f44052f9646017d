use tabled::{
    Table, Tabled,
    settings::{Panel, Remove, Style, object::Rows},
};

#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub header:      Option<String>,
    pub footer:      Option<String>,
    pub hide_header: bool,
}

impl Layout {
    pub fn titled(header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            ..Self::default()
        }
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn hide_header(mut self) -> Self {
        self.hide_header = true;
        self
    }
}

pub fn render<T: Tabled>(rows: impl IntoIterator<Item = T>, layout: Layout) -> Table {
    let mut table = Table::new(rows);
    // Column names first, before a panel takes row 0.
    if layout.hide_header {
        table.with(Remove::row(Rows::first()));
    }
    if let Some(header) = layout.header {
        table.with(Panel::header(header));
    }
    if let Some(footer) = layout.footer {
        table.with(Panel::footer(footer));
    }

    table.with(Style::blank());
    table
}

/// Two-column key/value listing.
#[derive(Debug, Clone, Tabled)]
pub struct Field {
    pub field: &'static str,
    pub value: String,
}

impl Field {
    pub fn new(field: &'static str, value: impl ToString) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_panels() {
        let rows = [Field::new("hits", 3), Field::new("misses", 1)];
        let text = render(rows, Layout::titled("cache").footer("done")).to_string();

        assert!(text.contains("cache"));
        assert!(text.contains("field"));
        assert!(text.contains("misses"));
        assert!(text.trim_end().ends_with("done"));
    }

    #[test]
    fn test_hide_header_drops_column_names() {
        let text = render([Field::new("size", 2)], Layout::default().hide_header()).to_string();

        assert!(!text.contains("field"));
        assert!(text.contains("size"));
    }
}
