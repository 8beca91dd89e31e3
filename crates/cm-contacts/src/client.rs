//! REST client for the `contacts` resource

use cm_core::{ClientConfig, Contact};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{Result, ServiceError};

/// Path of the contacts resource below the base URL
const CONTACTS_PATH: &str = "api/contacts";

/// Client for contact CRUD operations
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ContactService {
    client: Client,
    contacts_url: String,
}

/// Create payload: the server assigns the id, so it is always sent as `null`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewContact<'a> {
    id: Option<u64>,
    contact_name: &'a Option<String>,
    contact_address: &'a Option<String>,
    contact_phone: &'a Option<String>,
    contact_email: &'a Option<String>,
}

impl<'a> From<&'a Contact> for NewContact<'a> {
    fn from(contact: &'a Contact) -> Self {
        Self {
            id: None,
            contact_name: &contact.contact_name,
            contact_address: &contact.contact_address,
            contact_phone: &contact.contact_phone,
            contact_email: &contact.contact_email,
        }
    }
}

impl ContactService {
    /// Create a new contact service client
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ServiceError::transport)?;

        let contacts_url = format!("{}/{}", config.base_url.trim_end_matches('/'), CONTACTS_PATH);

        info!("Contact service initialized for: {}", contacts_url);

        Ok(Self {
            client,
            contacts_url,
        })
    }

    /// Fetch every contact in backend order
    pub async fn get_contacts(&self) -> Result<Vec<Contact>> {
        debug!("Fetching contacts from: {}", self.contacts_url);

        let response = self.send(self.client.get(&self.contacts_url)).await?;
        let contacts: Vec<Contact> = decode(response).await?;

        debug!("Fetched {} contacts", contacts.len());
        Ok(contacts)
    }

    /// Fetch a contact by id
    ///
    /// Id `0` yields a blank contact without touching the network.
    pub async fn get_contact(&self, id: u64) -> Result<Contact> {
        if id == cm_core::model::NEW_CONTACT_ID {
            return Ok(Contact::blank());
        }

        let url = self.contact_url(id);
        debug!("Fetching contact: {}", url);

        let response = self.send(self.client.get(&url)).await?;
        decode(response).await
    }

    /// Create a contact and return the record with its assigned id
    pub async fn create_contact(&self, contact: &Contact) -> Result<Contact> {
        debug!("Creating contact: {}", contact.name());

        let request = self
            .client
            .post(&self.contacts_url)
            .header(CONTENT_TYPE, json_content_type())
            .json(&NewContact::from(contact));

        let response = self.send(request).await?;
        let created: Contact = decode(response).await?;

        info!("Created contact: {}", created.id);
        Ok(created)
    }

    /// Replace a contact
    ///
    /// The response body is ignored: on success the input record is handed
    /// back unchanged.
    pub async fn update_contact(&self, contact: Contact) -> Result<Contact> {
        let url = self.contact_url(contact.id);
        debug!("Updating contact: {}", url);

        let request = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, json_content_type())
            .json(&contact);

        self.send(request).await?;

        info!("Updated contact: {}", contact.id);
        Ok(contact)
    }

    /// Delete a contact
    pub async fn delete_contact(&self, id: u64) -> Result<()> {
        let url = self.contact_url(id);
        debug!("Deleting contact: {}", url);

        let request = self
            .client
            .delete(&url)
            .header(CONTENT_TYPE, json_content_type());

        self.send(request).await?;

        info!("Deleted contact: {}", id);
        Ok(())
    }

    fn contact_url(&self, id: u64) -> String {
        format!("{}/{}", self.contacts_url, id)
    }

    /// Send a request and turn failures into [`ServiceError`]
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(ServiceError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ServiceError::backend(status, &error_text));
        }

        Ok(response)
    }
}

fn json_content_type() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response.json().await.map_err(ServiceError::transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> ContactService {
        ContactService::new(&ClientConfig::new(server.uri())).unwrap()
    }

    fn ada() -> Contact {
        Contact::new("Ada Lovelace")
            .with_id(1)
            .with_address("12 St James's Square")
            .with_phone("555-0100")
            .with_email("ada@example.com")
    }

    #[tokio::test]
    async fn test_get_contacts_keeps_backend_order() {
        let server = MockServer::start().await;
        let contacts = vec![
            Contact::new("Zed").with_id(3),
            Contact::new("Ada").with_id(1),
        ];
        Mock::given(method("GET"))
            .and(path("/api/contacts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&contacts))
            .expect(1)
            .mount(&server)
            .await;

        let fetched = service_for(&server).get_contacts().await.unwrap();
        assert_eq!(fetched, contacts);
    }

    #[tokio::test]
    async fn test_get_contact_zero_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let contact = service_for(&server).get_contact(0).await.unwrap();
        assert_eq!(contact, Contact::blank());
    }

    #[tokio::test]
    async fn test_get_contact_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/contacts/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ada()))
            .expect(1)
            .mount(&server)
            .await;

        let contact = service_for(&server).get_contact(1).await.unwrap();
        assert_eq!(contact, ada());
    }

    #[tokio::test]
    async fn test_create_contact_clears_id() {
        let server = MockServer::start().await;
        let mut expected_body = serde_json::to_value(ada()).unwrap();
        expected_body["id"] = serde_json::Value::Null;

        Mock::given(method("POST"))
            .and(path("/api/contacts"))
            .and(header("content-type", "application/json"))
            .and(body_json(&expected_body))
            .respond_with(ResponseTemplate::new(201).set_body_json(ada().with_id(12)))
            .expect(1)
            .mount(&server)
            .await;

        let created = service_for(&server).create_contact(&ada()).await.unwrap();
        assert_eq!(created.id, 12);
    }

    #[tokio::test]
    async fn test_update_contact_returns_input() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/contacts/1"))
            .and(header("content-type", "application/json"))
            .and(body_json(ada()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(Contact::new("Someone Else").with_id(1)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let updated = service_for(&server).update_contact(ada()).await.unwrap();
        assert_eq!(updated, ada());
    }

    #[tokio::test]
    async fn test_delete_contact() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/contacts/1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        service_for(&server).delete_contact(1).await.unwrap();
    }

    #[tokio::test]
    async fn test_backend_error_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/contacts/42"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "error": "Contact with id=42 not found" })),
            )
            .mount(&server)
            .await;

        let err = service_for(&server).get_contact(42).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Backend returned code 404: Contact with id=42 not found"
        );
    }

    #[tokio::test]
    async fn test_transport_error_is_normalized() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let service = ContactService::new(&ClientConfig::new(format!("http://{}", addr))).unwrap();

        let err = service.get_contacts().await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_)));
        assert!(err.to_string().starts_with("An error occurred: "));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/contacts"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = service_for(&server).get_contacts().await.unwrap_err();
        assert!(matches!(err, ServiceError::Transport(_)));
    }

    #[test]
    fn test_contacts_url_trims_trailing_slash() {
        let service = ContactService::new(&ClientConfig::new("http://localhost:3000/")).unwrap();
        assert_eq!(service.contacts_url, "http://localhost:3000/api/contacts");
        assert_eq!(service.contact_url(5), "http://localhost:3000/api/contacts/5");
    }
}
