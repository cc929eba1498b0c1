use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::fetch_cache::DocumentSet;
use crate::models::DealRecord;

lazy_static! {
    static ref LISTING: Selector = selector("ul.topics li.row.topic");
    static ref RETAILER: Selector = selector(".topictitle_retailer");
    static ref TOPIC_TITLE: Selector = selector(".topictitle");
    static ref TITLE_LINK: Selector = selector("a.topic_title_link");
    static ref VOTES: Selector = selector(".total_count");
    static ref AUTHOR: Selector = selector(".thread_meta_author");
    static ref CATEGORY: Selector = selector(".thread_category a");
    static ref FIRST_POST_TIME: Selector = selector(".first-post-time");
    static ref REPLIES: Selector = selector(".posts");
    static ref VIEWS: Selector = selector(".views");
    static ref BRACKETED: Regex = Regex::new(r"\[(.*?)\]").expect("valid store pattern");
}

const STICKY_CLASS: &str = "sticky";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// One way of finding the store name on a listing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreResolver {
    /// Dedicated retailer field.
    RetailerField,
    /// `[Store]` token inside the topic title.
    BracketedTitle,
}

/// Resolvers in the order they are tried.
pub const STORE_RESOLVERS: [StoreResolver; 2] =
    [StoreResolver::RetailerField, StoreResolver::BracketedTitle];

impl StoreResolver {
    pub fn resolve(self, node: ElementRef<'_>) -> Option<String> {
        match self {
            StoreResolver::RetailerField => field_text(node, &RETAILER),
            StoreResolver::BracketedTitle => {
                let title = field_text(node, &TOPIC_TITLE)?;
                bracketed_store(&title)
            }
        }
    }
}

/// Extract the first `[NAME]` token from a title.
pub fn bracketed_store(title: &str) -> Option<String> {
    BRACKETED
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn resolve_store(node: ElementRef<'_>) -> Option<String> {
    STORE_RESOLVERS
        .iter()
        .find_map(|resolver| resolver.resolve(node))
}

/// Trimmed text of the first matching descendant. `None` only when the
/// descendant is missing; an empty node yields `Some("")`.
fn field_text(node: ElementRef<'_>, selector: &Selector) -> Option<String> {
    node.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn is_sticky(node: &ElementRef<'_>) -> bool {
    node.value().classes().any(|class| class == STICKY_CLASS)
}

/// Listing nodes of a document, pinned announcements excluded.
pub fn listing_nodes(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.select(&LISTING).filter(|node| !is_sticky(node))
}

pub fn extract_deal(origin: &str, node: ElementRef<'_>) -> DealRecord {
    let title_link = node.select(&TITLE_LINK).next();
    let url = title_link
        .and_then(|link| link.value().attr("href"))
        .map(|href| format!("{}{}", origin, href.trim()));

    DealRecord {
        store: resolve_store(node),
        title: field_text(node, &TITLE_LINK),
        url,
        votes: field_text(node, &VOTES),
        author: field_text(node, &AUTHOR),
        category: field_text(node, &CATEGORY),
        timestamp: field_text(node, &FIRST_POST_TIME),
        replies: field_text(node, &REPLIES),
        views: field_text(node, &VIEWS),
    }
}

pub fn extract_document(origin: &str, document: &Html) -> Vec<DealRecord> {
    listing_nodes(document)
        .map(|node| extract_deal(origin, node))
        .collect()
}

/// Every deal across the page set, in page order then document order.
pub fn extract_deals(origin: &str, documents: &DocumentSet) -> Vec<DealRecord> {
    documents
        .iter()
        .flat_map(|(_, document)| extract_document(origin, document))
        .collect()
}
