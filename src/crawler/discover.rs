//! Link discovery
//!
//! Feeds the raw anchors of a page through resolution, classification and
//! the extension filter, and queues the survivors in page order.

use crate::crawler::frontier::{DiscoveredLink, Frontier};
use crate::url::{resolve_link, CrawlScope, ExtensionFilter};

/// Queues every valid, unseen candidate link
///
/// Candidates are handled in order, so the frontier sees links in the order
/// they appear on the page.
///
/// # Returns
///
/// The number of links that were added to the frontier
pub fn discover_links<I, S>(
    candidates: I,
    scope: &CrawlScope,
    filter: &ExtensionFilter,
    frontier: &mut Frontier,
) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut added = 0;

    for candidate in candidates {
        let raw = candidate.as_ref();

        let url = match resolve_link(raw, scope) {
            Ok(url) => url,
            Err(reason) => {
                tracing::trace!("Skipping link {:?}: {:?}", raw, reason);
                continue;
            }
        };

        if filter.is_excluded(&url) {
            tracing::trace!("Skipping excluded file type: {}", url);
            continue;
        }

        if frontier.enqueue(DiscoveredLink::new(raw, url)) {
            added += 1;
        }
    }

    added
}
