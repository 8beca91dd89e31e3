//! Read-only contact detail view

use cm_contacts::ContactService;
use cm_core::Contact;

/// Read-only view of a single saved contact
pub struct ContactDetail {
    service: ContactService,
    page_title: String,
    contact: Option<Contact>,
    error_message: Option<String>,
}

impl ContactDetail {
    pub fn new(service: ContactService) -> Self {
        Self {
            service,
            page_title: "Contact Detail".to_string(),
            contact: None,
            error_message: None,
        }
    }

    /// Fetch contact `id`; id `0` is rejected without a request
    pub async fn load(&mut self, id: u64) {
        if id == cm_core::model::NEW_CONTACT_ID {
            self.error_message = Some(format!("Invalid contact id: {}", id));
            return;
        }

        match self.service.get_contact(id).await {
            Ok(contact) => {
                self.page_title = format!("Contact Detail: {}", contact.name());
                self.contact = Some(contact);
            }
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    /// `Contact Detail: {name}` once loaded
    pub fn page_title(&self) -> &str {
        &self.page_title
    }

    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }

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

    #[tokio::test]
    async fn test_load_sets_title() {
        let server = MockServer::start().await;
        let grace = Contact::new("Grace Hopper").with_id(2);
        Mock::given(method("GET"))
            .and(path("/api/contacts/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&grace))
            .mount(&server)
            .await;

        let mut detail = ContactDetail::new(service_for(&server));
        detail.load(2).await;
        assert_eq!(detail.page_title(), "Contact Detail: Grace Hopper");
        assert_eq!(detail.contact(), Some(&grace));
        assert!(detail.error_message().is_none());
    }

    #[tokio::test]
    async fn test_unsaved_id_is_rejected_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut detail = ContactDetail::new(service_for(&server));
        detail.load(0).await;
        assert_eq!(detail.error_message(), Some("Invalid contact id: 0"));
        assert!(detail.contact().is_none());
    }

    #[tokio::test]
    async fn test_missing_contact_reports_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/contacts/8"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "error": "Contact with id=8 not found" })),
            )
            .mount(&server)
            .await;

        let mut detail = ContactDetail::new(service_for(&server));
        detail.load(8).await;
        assert_eq!(
            detail.error_message(),
            Some("Backend returned code 404: Contact with id=8 not found")
        );
        assert_eq!(detail.page_title(), "Contact Detail");
    }
}
