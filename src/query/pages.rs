//! Page-by-page cursor behind the infinite character list.

use log::{info, warn};

use crate::api::{FetchError, Page};

/// Cursor over a paginated listing, filled strictly in page order.
#[derive(Clone, Debug, PartialEq)]
pub struct Paginator<T> {
	pages: Vec<Vec<T>>,
	next: Option<u32>,
	in_flight: Option<u32>,
	error: Option<FetchError>,
}

/// Coarse state of the listing, for the list view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListStatus {
	/// The first page is on its way.
	Loading,
	/// The first page failed; nothing to show.
	Error,
	/// At least one page is loaded.
	Ready,
}

impl<T> Default for Paginator<T> {
	fn default() -> Self {
		Self {
			pages: Vec::new(),
			next: Some(1),
			in_flight: None,
			error: None,
		}
	}
}

impl<T> Paginator<T> {
	/// Cursor positioned before page 1.
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether another page can be requested.
	pub fn has_more(&self) -> bool {
		self.next.is_some()
	}

	/// Whether a page request is outstanding.
	pub fn is_fetching(&self) -> bool {
		self.in_flight.is_some()
	}

	/// Loaded pages, in order.
	pub fn pages(&self) -> &[Vec<T>] {
		&self.pages
	}

	/// Every loaded record, in listing order.
	pub fn items(&self) -> impl Iterator<Item = &T> {
		self.pages.iter().flatten()
	}

	/// Failure of the most recent page request.
	pub fn error(&self) -> Option<&FetchError> {
		self.error.as_ref()
	}

	/// Claims the next page for fetching. Returns `None` while a page is already in
	/// flight or once the listing is exhausted.
	pub fn begin_next(&mut self) -> Option<u32> {
		if self.in_flight.is_some() {
			return None;
		}
		let page = self.next?;
		self.in_flight = Some(page);
		Some(page)
	}

	/// Applies the outcome of a page request. Outcomes for any page other than the
	/// one in flight are dropped.
	pub fn complete(&mut self, page: u32, result: Result<Page<T>, FetchError>) {
		if self.in_flight != Some(page) {
			warn!("dropping unexpected listing page {}", page);
			return;
		}
		self.in_flight = None;

		match result {
			Ok(body) => {
				self.error = None;
				self.next = match body.next_page() {
					Some(next) if next > page => Some(next),
					Some(next) => {
						warn!("listing page {} points back to page {}", page, next);
						None
					}
					None => None,
				};
				info!(
					"listing page {} loaded ({} records, more: {})",
					page,
					body.results.len(),
					self.next.is_some()
				);
				self.pages.push(body.results);
			}
			Err(err) => {
				warn!("listing page {} failed: {}", page, err);
				self.error = Some(err);
			}
		}
	}

	/// `Error` only when nothing could be loaded at all; a failed later page keeps
	/// the rows already shown.
	pub fn status(&self) -> ListStatus {
		if !self.pages.is_empty() {
			ListStatus::Ready
		} else if self.error.is_some() {
			ListStatus::Error
		} else {
			ListStatus::Loading
		}
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;
	use crate::api::testing::{ScriptedGateway, entity};
	use crate::api::{Entity, Gateway};

	fn page(next: Option<&str>, ids: &[u32]) -> Page<Entity> {
		Page {
			count: 4,
			next: next.map(String::from),
			previous: None,
			results: ids.iter().map(|&id| entity(id, "Someone", None, &[])).collect(),
		}
	}

	/// Mimics the list view: keep triggering "load more" until the cursor refuses.
	fn drain(gateway: &ScriptedGateway, pager: &mut Paginator<Entity>) {
		while let Some(number) = pager.begin_next() {
			let result = block_on(gateway.list_entities(number));
			pager.complete(number, result);
			if pager.error().is_some() {
				break;
			}
		}
	}

	#[test]
	fn stops_after_last_page() {
		let gateway = ScriptedGateway::default()
			.with_page(1, page(Some("https://sw-api.starnavi.io/people/?page=2"), &[1, 2]))
			.with_page(2, page(None, &[3, 4]));
		let mut pager = Paginator::new();
		drain(&gateway, &mut pager);

		assert_eq!(gateway.page_calls(), vec![1, 2]);
		assert!(!pager.has_more());
		assert!(!pager.is_fetching());
		assert_eq!(pager.begin_next(), None);
		let ids: Vec<_> = pager.items().map(|e| e.id).collect();
		assert_eq!(ids, [1, 2, 3, 4]);
		assert_eq!(pager.status(), ListStatus::Ready);
	}

	#[test]
	fn one_request_at_a_time() {
		let mut pager: Paginator<Entity> = Paginator::new();
		assert_eq!(pager.status(), ListStatus::Loading);
		assert_eq!(pager.begin_next(), Some(1));
		assert!(pager.is_fetching());
		assert_eq!(pager.begin_next(), None);
	}

	#[test]
	fn unexpected_page_is_ignored() {
		let mut pager = Paginator::new();
		pager.begin_next();
		pager.complete(3, Ok(page(None, &[9])));

		assert!(pager.is_fetching());
		assert!(pager.pages().is_empty());
		assert!(pager.has_more());
	}

	#[test]
	fn first_page_failure_is_an_error_and_retries_same_page() {
		let mut pager: Paginator<Entity> = Paginator::new();
		let number = pager.begin_next().unwrap();
		pager.complete(number, Err(FetchError::Transport("offline".into())));

		assert_eq!(pager.status(), ListStatus::Error);
		assert_eq!(pager.begin_next(), Some(1));
	}

	#[test]
	fn later_failure_keeps_loaded_rows() {
		let mut pager = Paginator::new();
		pager.begin_next();
		pager.complete(1, Ok(page(Some("https://sw-api.starnavi.io/people/?page=2"), &[1])));
		pager.begin_next();
		pager.complete(2, Err(FetchError::Transport("offline".into())));

		assert_eq!(pager.status(), ListStatus::Ready);
		assert!(pager.error().is_some());
		assert_eq!(pager.begin_next(), Some(2));
	}

	#[test]
	fn backwards_link_ends_listing() {
		let mut pager = Paginator::new();
		pager.begin_next();
		pager.complete(1, Ok(page(Some("https://sw-api.starnavi.io/people/?page=1"), &[1])));

		assert!(!pager.has_more());
	}
}
