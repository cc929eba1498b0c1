use std::fmt;

/// Rendered in place of any field that could not be resolved from the markup.
pub const NOT_AVAILABLE: &str = "n/a";

/// Path of one listing page, appended to the configured origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageTarget(String);

impl PageTarget {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn url(&self, origin: &str) -> String {
        format!("{}{}", origin, self.0)
    }
}

impl fmt::Display for PageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One listing item pulled out of a page. `None` means the field was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealRecord {
    pub store: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub votes: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub timestamp: Option<String>,
    pub replies: Option<String>,
    pub views: Option<String>,
}

impl DealRecord {
    pub fn store_or_na(&self) -> &str {
        or_na(&self.store)
    }

    pub fn title_or_na(&self) -> &str {
        or_na(&self.title)
    }

    pub fn url_or_na(&self) -> &str {
        or_na(&self.url)
    }
}

/// Borrow a resolved field, falling back to the absent marker.
pub fn or_na(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(NOT_AVAILABLE)
}

/// A label and the number of deals grouped under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyEntry {
    pub label: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_target_joins_origin_without_normalising() {
        let target = PageTarget::new("/hot-deals-f9/2");
        assert_eq!(
            target.url("https://forums.redflagdeals.com"),
            "https://forums.redflagdeals.com/hot-deals-f9/2"
        );
    }

    #[test]
    fn absent_fields_render_as_marker() {
        let deal = DealRecord {
            title: Some("Widget".into()),
            ..Default::default()
        };
        assert_eq!(deal.title_or_na(), "Widget");
        assert_eq!(deal.store_or_na(), NOT_AVAILABLE);
        assert_eq!(or_na(&deal.views), "n/a");
    }
}
