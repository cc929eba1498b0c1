//! Plain-text rendering for the terminal menu.

use std::fmt::Write as _;

use crate::models::{or_na, DealRecord, TallyEntry};

const WIDE: usize = 100;
const NARROW: usize = 37;
const STORES: usize = 42;

fn banner(out: &mut String, title: &str, width: usize) {
    let rule = "-".repeat(width);
    let _ = writeln!(out, "{rule}\n{title:^width$}\n{rule}");
}

pub fn latest_deals(deals: &[DealRecord]) -> String {
    let mut out = String::from("\n");
    banner(&mut out, "***  Latest Deals  ***", WIDE);

    for (i, deal) in deals.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n[Deal #{}]\n    Store: {}\n  Product: {}\n    Votes: {}\n Username: {}\n Category: {}\nTimestamp: {}\n  Replies: {}\n    Views: {}\n      URL: {}\n",
            i + 1,
            deal.store_or_na(),
            deal.title_or_na(),
            or_na(&deal.votes),
            or_na(&deal.author),
            or_na(&deal.category),
            or_na(&deal.timestamp),
            or_na(&deal.replies),
            or_na(&deal.views),
            deal.url_or_na(),
        );
        let _ = writeln!(out, "{}", "-".repeat(WIDE));
    }
    out
}

pub fn categories(tally: &[TallyEntry]) -> String {
    let mut out = String::from("\n");
    banner(&mut out, "***  Deals by Category  ***", NARROW);
    for entry in tally {
        let _ = writeln!(out, "{:>25}: {:2} deals", entry.label, entry.count);
    }
    let _ = writeln!(out, "{}", "-".repeat(NARROW));
    out
}

pub fn top_stores(stores: &[TallyEntry]) -> String {
    let mut out = String::from("\n");
    banner(&mut out, &format!("***  Top {} Stores  ***", stores.len()), STORES);
    for (i, entry) in stores.iter().enumerate() {
        let rank = format!("[#{}]", i + 1);
        let _ = writeln!(out, "{:>5} {:25} :{:2} deals", rank, entry.label, entry.count);
    }
    let _ = writeln!(out, "{}", "-".repeat(STORES));
    out
}

/// Numbered category list shown before a log export.
pub fn category_picker(labels: &[String]) -> String {
    let mut out = String::from("\n");
    banner(&mut out, "***  List of Categories  ***", NARROW);
    for (i, label) in labels.iter().enumerate() {
        let number = format!("[#{}]", i + 1);
        let _ = writeln!(out, "{:>5} {}", number, label);
    }
    let _ = writeln!(out, "{}", "-".repeat(NARROW));
    out
}

pub fn menu() -> String {
    let rule = "=".repeat(NARROW);
    let mut out = String::new();
    let _ = writeln!(out, "\n{rule}\n{:^width$}\n{rule}", "*** Hot Deals Reader ***", width = NARROW);
    out.push_str(
        " 1. Display Latest Deals\n 2. Analyze Deals by Category\n 3. Find Top Stores\n 4. Log Deal Information\n 5. QUIT\n",
    );
    let _ = writeln!(out, "{}", "-".repeat(NARROW));
    out
}
