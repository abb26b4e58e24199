//! Paginated, retry-tolerant retrieval of shelter records.
//!
//! Offset pagination with a trailing-page heuristic: the server reports
//! the offset it stopped at (`lastOffset`); a page that advanced the
//! cursor by less than the page size is the final page. A final page
//! that is exactly full therefore costs one extra request, which comes
//! back empty and ends the sequence.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::transport::{HttpTransport, ListingTransport, PageQuery};
use crate::types::{PetsResponse, RawPet};

/// Records requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 200;
/// Attempts per page before giving up on a non-success service status.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Service status code that means success.
const STATUS_OK: &str = "100";

/// Client for one listing-service account.
#[derive(Debug, Clone)]
pub struct PetFinder<T = HttpTransport> {
    api_key: String,
    transport: T,
    page_size: u32,
    max_retries: u32,
}

impl PetFinder<HttpTransport> {
    /// Create a client talking to the production service.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_transport(api_key, HttpTransport::new())
    }
}

impl<T: ListingTransport> PetFinder<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(api_key: impl Into<String>, transport: T) -> Self {
        Self {
            api_key: api_key.into(),
            transport,
            page_size: DEFAULT_PAGE_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Override the page size.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Override the per-page retry budget.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Lazily iterate one shelter's records with the given listing
    /// status (`"A"` adoptable, `"X"` adopted).
    ///
    /// Every call starts a fresh sequence from offset zero; sequences
    /// share no cursor state. The first error item is also the last
    /// item of the sequence.
    pub fn shelter_pets(&self, shelter_id: &str, status: &str) -> Pets<'_, T> {
        Pets {
            client: self,
            query: PageQuery {
                shelter_id: shelter_id.to_string(),
                status: status.to_string(),
                offset: 0,
                count: self.page_size,
            },
            buffered: Vec::new().into_iter(),
            done: false,
        }
    }
}

/// Lazy sequence of raw records, one shelter and status per instance.
pub struct Pets<'a, T: ListingTransport> {
    client: &'a PetFinder<T>,
    query: PageQuery,
    buffered: std::vec::IntoIter<RawPet>,
    done: bool,
}

impl<T: ListingTransport> Iterator for Pets<'_, T> {
    type Item = Result<RawPet>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pet) = self.buffered.next() {
                return Some(Ok(pet));
            }
            if self.done {
                return None;
            }
            if let Err(err) = self.fetch_page() {
                self.done = true;
                return Some(Err(err));
            }
        }
    }
}

impl<T: ListingTransport> Pets<'_, T> {
    /// Fetch the page at the current offset and advance the cursor.
    fn fetch_page(&mut self) -> Result<()> {
        let page = self.request_with_retry()?;
        let last_offset = page.last_offset.unwrap_or(self.query.offset);
        let pets = page.pets.pets;

        if pets.is_empty() {
            debug!(offset = self.query.offset, "empty page, sequence complete");
            self.done = true;
            return Ok(());
        }
        if last_offset.saturating_sub(self.query.offset) < self.query.count {
            // Short page: this was the final one.
            self.done = true;
        } else {
            self.query.offset = last_offset;
        }
        self.buffered = pets.into_iter();
        Ok(())
    }

    /// Request one page, retrying non-success service statuses at the
    /// same offset. Transport and decode failures abort immediately.
    fn request_with_retry(&self) -> Result<PetsResponse> {
        let mut last_message = String::new();
        for attempt in 1..=self.client.max_retries {
            debug!(offset = self.query.offset, attempt, "requesting shelter page");
            let body = self
                .client
                .transport
                .get_page(&self.client.api_key, &self.query)?;
            let page: PetsResponse = quick_xml::de::from_str(&body)?;
            let status = &page.header.status;
            if status.code == STATUS_OK {
                return Ok(page);
            }
            warn!(
                code = %status.code,
                message = %status.message,
                "service returned non-success status, retrying"
            );
            last_message = status.message.clone();
        }
        Err(Error::Protocol {
            attempts: self.client.max_retries,
            message: last_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Transport that replays a script of canned responses and records
    /// the offset of every request it receives.
    struct ScriptedTransport {
        responses: RefCell<VecDeque<Result<String>>>,
        offsets: RefCell<Vec<u32>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                offsets: RefCell::new(Vec::new()),
            }
        }

        fn offsets(&self) -> Vec<u32> {
            self.offsets.borrow().clone()
        }
    }

    impl ListingTransport for &ScriptedTransport {
        fn get_page(&self, _api_key: &str, query: &PageQuery) -> Result<String> {
            self.offsets.borrow_mut().push(query.offset);
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("script exhausted")
        }
    }

    fn page(code: &str, message: &str, last_offset: u32, pet_names: &[&str]) -> String {
        let pets: String = pet_names
            .iter()
            .map(|n| format!("<pet><name>{n}</name><animal>Dog</animal></pet>"))
            .collect();
        format!(
            "<petfinder>\
               <header><status><code>{code}</code><message>{message}</message></status></header>\
               <lastOffset>{last_offset}</lastOffset>\
               <pets>{pets}</pets>\
             </petfinder>"
        )
    }

    fn names(pets: Vec<Result<RawPet>>) -> Vec<String> {
        pets.into_iter()
            .map(|p| p.unwrap().name.unwrap())
            .collect()
    }

    #[test]
    fn test_short_page_terminates_immediately() {
        let transport = ScriptedTransport::new(vec![Ok(page("100", "", 1, &["Rex"]))]);
        let client = PetFinder::with_transport("key", &transport).page_size(2);

        let pets: Vec<_> = client.shelter_pets("NJ333", "A").collect();
        assert_eq!(names(pets), vec!["Rex"]);
        assert_eq!(transport.offsets(), vec![0]);
    }

    #[test]
    fn test_full_final_page_costs_one_empty_probe() {
        let transport = ScriptedTransport::new(vec![
            Ok(page("100", "", 2, &["Rex", "Fido"])),
            Ok(page("100", "", 2, &[])),
        ]);
        let client = PetFinder::with_transport("key", &transport).page_size(2);

        let pets: Vec<_> = client.shelter_pets("NJ333", "A").collect();
        assert_eq!(names(pets), vec!["Rex", "Fido"]);
        assert_eq!(transport.offsets(), vec![0, 2]);
    }

    #[test]
    fn test_multiple_pages_in_order() {
        let transport = ScriptedTransport::new(vec![
            Ok(page("100", "", 2, &["a", "b"])),
            Ok(page("100", "", 3, &["c"])),
        ]);
        let client = PetFinder::with_transport("key", &transport).page_size(2);

        let pets: Vec<_> = client.shelter_pets("NJ333", "A").collect();
        assert_eq!(names(pets), vec!["a", "b", "c"]);
        assert_eq!(transport.offsets(), vec![0, 2]);
    }

    #[test]
    fn test_retry_then_success() {
        let transport = ScriptedTransport::new(vec![
            Ok(page("300", "invalid request", 0, &[])),
            Ok(page("300", "invalid request", 0, &[])),
            Ok(page("100", "", 1, &["Rex"])),
        ]);
        let client = PetFinder::with_transport("key", &transport).page_size(2);

        let pets: Vec<_> = client.shelter_pets("NJ333", "A").collect();
        assert_eq!(names(pets), vec!["Rex"]);
        // All three attempts hit the same offset.
        assert_eq!(transport.offsets(), vec![0, 0, 0]);
    }

    #[test]
    fn test_success_on_final_attempt_is_a_success() {
        let mut script: Vec<Result<String>> = (0..4)
            .map(|_| Ok(page("300", "flaky", 0, &[])))
            .collect();
        script.push(Ok(page("100", "", 1, &["Rex"])));
        let transport = ScriptedTransport::new(script);
        let client = PetFinder::with_transport("key", &transport).page_size(2);

        let pets: Vec<_> = client.shelter_pets("NJ333", "A").collect();
        assert_eq!(names(pets), vec!["Rex"]);
    }

    #[test]
    fn test_retries_exhausted_raises_protocol_error() {
        let script: Vec<Result<String>> = (0..5)
            .map(|_| Ok(page("300", "shelter opted out", 0, &[])))
            .collect();
        let transport = ScriptedTransport::new(script);
        let client = PetFinder::with_transport("key", &transport).page_size(2);

        let mut pets = client.shelter_pets("NJ333", "A");
        match pets.next() {
            Some(Err(Error::Protocol { attempts, message })) => {
                assert_eq!(attempts, 5);
                assert_eq!(message, "shelter opted out");
            }
            other => panic!("expected protocol error, got {other:?}"),
        }
        assert!(pets.next().is_none());
        assert_eq!(transport.offsets().len(), 5);
    }

    #[test]
    fn test_transport_failure_is_not_retried() {
        let transport = ScriptedTransport::new(vec![Err(Error::Transport(
            "service returned HTTP 503".to_string(),
        ))]);
        let client = PetFinder::with_transport("key", &transport);

        let mut pets = client.shelter_pets("NJ333", "A");
        assert!(matches!(pets.next(), Some(Err(Error::Transport(_)))));
        assert!(pets.next().is_none());
        assert_eq!(transport.offsets(), vec![0]);
    }

    #[test]
    fn test_malformed_body_aborts_fetch() {
        let transport = ScriptedTransport::new(vec![Ok("this is not xml <".to_string())]);
        let client = PetFinder::with_transport("key", &transport);

        let mut pets = client.shelter_pets("NJ333", "A");
        assert!(matches!(pets.next(), Some(Err(Error::Decode(_)))));
        assert!(pets.next().is_none());
    }

    #[test]
    fn test_sequences_are_restartable() {
        let transport = ScriptedTransport::new(vec![
            Ok(page("100", "", 1, &["Rex"])),
            Ok(page("100", "", 1, &["Rex"])),
        ]);
        let client = PetFinder::with_transport("key", &transport).page_size(2);

        let first: Vec<_> = client.shelter_pets("NJ333", "A").collect();
        let second: Vec<_> = client.shelter_pets("NJ333", "A").collect();
        assert_eq!(names(first), names(second));
        // Both sequences started from offset zero.
        assert_eq!(transport.offsets(), vec![0, 0]);
    }
}
