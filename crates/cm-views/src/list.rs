//! Contact list view with client-side filtering

use cm_contacts::ContactService;
use cm_core::Contact;
use tracing::debug;

/// All contacts plus the subset matching the name filter
pub struct ContactList {
    service: ContactService,
    list_filter: String,
    contacts: Vec<Contact>,
    filtered_contacts: Vec<Contact>,
    error_message: Option<String>,
}

impl ContactList {
    pub const PAGE_TITLE: &'static str = "Contact List";

    /// Empty list; call [`ContactList::load`] to fetch
    pub fn new(service: ContactService) -> Self {
        Self {
            service,
            list_filter: String::new(),
            contacts: Vec::new(),
            filtered_contacts: Vec::new(),
            error_message: None,
        }
    }

    pub fn page_title(&self) -> &'static str {
        Self::PAGE_TITLE
    }

    /// Fetch the collection once; the filter then works on this copy
    pub async fn load(&mut self) {
        match self.service.get_contacts().await {
            Ok(contacts) => {
                debug!("Loaded {} contacts", contacts.len());
                self.contacts = contacts;
                self.filtered_contacts = self.perform_filter(&self.list_filter);
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    pub fn list_filter(&self) -> &str {
        &self.list_filter
    }

    /// Update the filter text and recompute the visible contacts
    pub fn set_list_filter(&mut self, value: impl Into<String>) {
        self.list_filter = value.into();
        self.filtered_contacts = self.perform_filter(&self.list_filter);
    }

    /// Contacts whose name contains `filter_by`, ignoring case
    pub fn perform_filter(&self, filter_by: &str) -> Vec<Contact> {
        if filter_by.is_empty() {
            return self.contacts.clone();
        }

        let filter_by = filter_by.to_lowercase();
        self.contacts
            .iter()
            .filter(|contact| contact.name().to_lowercase().contains(&filter_by))
            .cloned()
            .collect()
    }

    /// Everything fetched by the last successful load
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Contacts matching the current filter
    pub fn filtered_contacts(&self) -> &[Contact] {
        &self.filtered_contacts
    }

    /// Message of the last failed load
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::service_for;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample() -> Vec<Contact> {
        vec![
            Contact::new("Ada Lovelace").with_id(1),
            Contact::new("Grace Hopper").with_id(2),
            Contact::new("Alan Turing").with_id(3),
            Contact { id: 4, ..Contact::blank() },
        ]
    }

    async fn loaded_list() -> (MockServer, ContactList) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/contacts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample()))
            .expect(1)
            .mount(&server)
            .await;

        let mut list = ContactList::new(service_for(&server));
        list.load().await;
        (server, list)
    }

    #[tokio::test]
    async fn test_load_shows_everything() {
        let (_server, list) = loaded_list().await;
        assert_eq!(list.page_title(), "Contact List");
        assert_eq!(list.contacts(), sample().as_slice());
        assert_eq!(list.filtered_contacts(), sample().as_slice());
        assert!(list.error_message().is_none());
    }

    #[tokio::test]
    async fn test_filter_is_case_insensitive() {
        let (_server, mut list) = loaded_list().await;

        list.set_list_filter("HOPP");
        assert_eq!(list.filtered_contacts(), &[Contact::new("Grace Hopper").with_id(2)]);

        list.set_list_filter("al");
        let ids: Vec<u64> = list.filtered_contacts().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3]);

        list.set_list_filter("a");
        let ids: Vec<u64> = list.filtered_contacts().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_empty_filter_is_identity() {
        let (_server, mut list) = loaded_list().await;
        list.set_list_filter("turing");
        list.set_list_filter("");
        assert_eq!(list.filtered_contacts(), list.contacts());
    }

    #[tokio::test]
    async fn test_filter_makes_no_requests() {
        // `expect(1)` on the list mock fails the test if filtering refetches
        let (server, mut list) = loaded_list().await;
        for filter in ["g", "gr", "gra", ""] {
            list.set_list_filter(filter);
        }
        server.verify().await;
    }

    #[tokio::test]
    async fn test_load_failure_is_captured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/contacts"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "store offline" })),
            )
            .mount(&server)
            .await;

        let mut list = ContactList::new(service_for(&server));
        list.load().await;
        assert_eq!(
            list.error_message(),
            Some("Backend returned code 500: store offline")
        );
        assert!(list.filtered_contacts().is_empty());
    }
}
