use std::collections::{BTreeSet, HashMap};

use crate::models::{DealRecord, TallyEntry};

/// Count labels and sort descending by count. Tie order is unspecified.
fn tally<'a, I>(labels: I) -> Vec<TallyEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut entries: Vec<TallyEntry> = counts
        .into_iter()
        .map(|(label, count)| TallyEntry {
            label: label.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Deals per category. Deals without a category are not counted.
pub fn category_tally(deals: &[DealRecord]) -> Vec<TallyEntry> {
    tally(deals.iter().filter_map(|deal| deal.category.as_deref()))
}

/// Deals per store. Deals whose store could not be resolved are not counted.
pub fn store_tally(deals: &[DealRecord]) -> Vec<TallyEntry> {
    tally(deals.iter().filter_map(|deal| deal.store.as_deref()))
}

/// The `limit` busiest stores; `None` or an oversized limit returns them all.
pub fn top_stores(deals: &[DealRecord], limit: Option<usize>) -> Vec<TallyEntry> {
    let mut stores = store_tally(deals);
    if let Some(limit) = limit {
        stores.truncate(limit);
    }
    stores
}

/// Distinct category labels in alphabetical order.
pub fn category_labels(deals: &[DealRecord]) -> Vec<String> {
    deals
        .iter()
        .filter_map(|deal| deal.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Deals whose category matches `label` ignoring case, in document order.
/// Deals without a title are skipped.
pub fn filter_by_category<'a>(deals: &'a [DealRecord], label: &str) -> Vec<&'a DealRecord> {
    let wanted = label.to_lowercase();
    deals
        .iter()
        .filter(|deal| deal.title.is_some())
        .filter(|deal| {
            deal.category
                .as_deref()
                .is_some_and(|category| category.to_lowercase() == wanted)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(title: &str, store: Option<&str>, category: Option<&str>) -> DealRecord {
        DealRecord {
            title: Some(title.to_string()),
            store: store.map(str::to_string),
            category: category.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn category_tally_skips_absent_categories() {
        let deals = vec![
            deal("a", None, Some("Electronics")),
            deal("b", None, Some("Electronics")),
            deal("c", None, None),
        ];
        let tally = category_tally(&deals);
        assert_eq!(
            tally,
            vec![TallyEntry {
                label: "Electronics".into(),
                count: 2
            }]
        );
    }

    #[test]
    fn empty_labels_are_counted() {
        let deals = vec![
            deal("a", Some(""), Some("")),
            deal("b", None, Some("")),
            deal("c", None, None),
        ];
        assert_eq!(
            category_tally(&deals),
            vec![TallyEntry {
                label: String::new(),
                count: 2
            }]
        );
        assert_eq!(store_tally(&deals).len(), 1);
    }

    #[test]
    fn category_tally_sorts_descending() {
        let deals = vec![
            deal("a", None, Some("Food")),
            deal("b", None, Some("Tech")),
            deal("c", None, Some("Tech")),
            deal("d", None, Some("Home")),
            deal("e", None, Some("Tech")),
            deal("f", None, Some("Home")),
        ];
        let counts: Vec<(String, usize)> = category_tally(&deals)
            .into_iter()
            .map(|e| (e.label, e.count))
            .collect();
        assert_eq!(
            counts,
            vec![("Tech".into(), 3), ("Home".into(), 2), ("Food".into(), 1)]
        );
    }

    #[test]
    fn store_tally_skips_unresolved_stores() {
        let deals = vec![
            deal("a", Some("Costco"), None),
            deal("b", None, None),
            deal("c", Some("Costco"), None),
            deal("d", Some("Amazon"), None),
        ];
        let tally = store_tally(&deals);
        assert_eq!(tally.len(), 2);
        assert_eq!(tally[0].label, "Costco");
        assert_eq!(tally[0].count, 2);
        assert_eq!(tally.iter().map(|e| e.count).sum::<usize>(), 3);
    }

    #[test]
    fn top_stores_truncates() {
        let deals = vec![
            deal("a", Some("Costco"), None),
            deal("b", Some("Costco"), None),
            deal("c", Some("Amazon"), None),
        ];
        assert_eq!(top_stores(&deals, Some(1)).len(), 1);
        assert_eq!(top_stores(&deals, Some(1))[0].label, "Costco");
        assert_eq!(top_stores(&deals, Some(10)).len(), 2);
        assert_eq!(top_stores(&deals, None).len(), 2);
        assert!(top_stores(&deals, Some(0)).is_empty());
    }

    #[test]
    fn filter_is_case_insensitive_and_keeps_order() {
        let deals = vec![
            deal("first", None, Some("Tech")),
            deal("second", None, Some("tech")),
            deal("third", None, Some("Food")),
        ];
        let titles: Vec<&str> = filter_by_category(&deals, "TECH")
            .into_iter()
            .map(|d| d.title_or_na())
            .collect();
        assert_eq!(titles, ["first", "second"]);
    }

    #[test]
    fn filter_requires_title() {
        let mut untitled = deal("x", None, Some("Tech"));
        untitled.title = None;
        let deals = vec![untitled, deal("titled", None, Some("Tech"))];
        let matches = filter_by_category(&deals, "tech");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title.as_deref(), Some("titled"));
    }

    #[test]
    fn category_labels_are_sorted_and_distinct() {
        let deals = vec![
            deal("a", None, Some("Tech")),
            deal("b", None, Some("Apparel")),
            deal("c", None, Some("Tech")),
            deal("d", None, None),
        ];
        assert_eq!(category_labels(&deals), ["Apparel", "Tech"]);
    }

    #[test]
    fn aggregation_is_pure() {
        let deals = vec![deal("a", Some("X"), Some("Y")), deal("b", Some("X"), Some("Y"))];
        assert_eq!(store_tally(&deals), store_tally(&deals));
        assert_eq!(category_tally(&deals), category_tally(&deals));
    }
}
