//! Mock Persistence Service
//!
//! Session-scoped record store behind the whole API. Six collections load
//! from the storage abstraction (or from seed data on first access), are
//! mutated in place by CRUD calls, and are re-serialized wholesale back into
//! storage after every mutation. Every operation suspends for a configurable
//! artificial latency to imitate a network round trip, then performs its
//! read-modify-write as a single synchronous block under the collection
//! lock, so calls issued in the same tick can never lose each other's
//! updates. Returned values are always fresh copies; callers cannot mutate
//! store state through a held reference.

pub mod error;
pub mod models;
pub mod seed;
pub mod storage;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use rand::distr::{Alphanumeric, SampleString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use error::{StoreError, StoreResult};
use models::{
    AuthSession, ContactSubmission, Feedback, NewEnquiry, NewFeedback, NewService, Photo,
    PortfolioCategory, ProfileUpdate, Role, Service, SiteContent, SiteContentPatch, User,
    UserRecord,
};
use storage::SessionStorage;

// Storage keys, one per collection
const USERS_KEY: &str = "studio_users";
const PORTFOLIO_KEY: &str = "studio_portfolio";
const SERVICES_KEY: &str = "studio_services";
const CONTACTS_KEY: &str = "studio_contacts";
const FEEDBACK_KEY: &str = "studio_feedback";
const SITE_CONTENT_KEY: &str = "studio_site_content";

/// Default simulated round-trip latency in milliseconds
const DEFAULT_LATENCY_MS: u64 = 300;

/// Length of the opaque session token
const SESSION_TOKEN_LEN: usize = 48;

// ============================================================================
// Configuration
// ============================================================================

/// Store construction parameters. `from_env` is the composition root's
/// entry; tests build the struct directly with zero latency.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub latency: Duration,
    pub admin_email: String,
    pub admin_password: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            admin_email: "contact@prstudio.co.in".to_string(),
            admin_password: "admin123".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            latency: std::env::var("API_LATENCY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.latency),
            admin_email: std::env::var("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
        }
    }
}

// ============================================================================
// Store
// ============================================================================

pub struct StudioStore {
    storage: Arc<dyn SessionStorage>,
    latency: Duration,
    /// Monotonic id source, seeded past the highest id found in loaded data.
    /// Ids are assigned once and never reused after deletion.
    next_id: AtomicU64,
    /// Issued session tokens. Deliberately not persisted: tokens live as
    /// long as the session, like the browser tab that holds them.
    sessions: RwLock<HashMap<String, u64>>,
    users: RwLock<Vec<UserRecord>>,
    portfolio: RwLock<Vec<PortfolioCategory>>,
    services: RwLock<Vec<Service>>,
    contacts: RwLock<Vec<ContactSubmission>>,
    feedback: RwLock<Vec<Feedback>>,
    site_content: RwLock<SiteContent>,
}

/// Load a collection from storage, falling back to (and writing back) the
/// seed when the key is absent or holds a payload that no longer parses.
fn load_or_seed<T>(
    storage: &dyn SessionStorage,
    key: &str,
    seed: impl FnOnce() -> T,
) -> T
where
    T: Serialize + DeserializeOwned,
{
    if let Some(raw) = storage.get(key) {
        match serde_json::from_str(&raw) {
            Ok(value) => return value,
            Err(e) => {
                tracing::warn!("Discarding unreadable '{}' payload: {}", key, e);
            }
        }
    }
    let initial = seed();
    match serde_json::to_string(&initial) {
        Ok(raw) => storage.set(key, raw),
        Err(e) => tracing::error!("Failed to serialize seed for '{}': {}", key, e),
    }
    initial
}

impl StudioStore {
    pub fn new(storage: Arc<dyn SessionStorage>, config: &StoreConfig) -> Self {
        let users = load_or_seed(storage.as_ref(), USERS_KEY, || seed::initial_users(config));
        let portfolio = load_or_seed(storage.as_ref(), PORTFOLIO_KEY, seed::initial_portfolio);
        let services = load_or_seed(storage.as_ref(), SERVICES_KEY, seed::initial_services);
        let contacts = load_or_seed(storage.as_ref(), CONTACTS_KEY, Vec::new);
        let feedback = load_or_seed(storage.as_ref(), FEEDBACK_KEY, seed::initial_feedback);
        let site_content =
            load_or_seed(storage.as_ref(), SITE_CONTENT_KEY, seed::initial_site_content);

        let highest = users
            .iter()
            .map(|u| u.id)
            .chain(portfolio.iter().flat_map(|c| c.photos.iter().map(|p| p.id)))
            .chain(services.iter().map(|s| s.id))
            .chain(contacts.iter().map(|c: &ContactSubmission| c.id))
            .chain(feedback.iter().map(|f| f.id))
            .max()
            .unwrap_or(0);

        tracing::debug!(
            users = users.len(),
            categories = portfolio.len(),
            services = services.len(),
            next_id = highest + 1,
            "Session store initialized"
        );

        Self {
            storage,
            latency: config.latency,
            next_id: AtomicU64::new(highest + 1),
            sessions: RwLock::new(HashMap::new()),
            users: RwLock::new(users),
            portfolio: RwLock::new(portfolio),
            services: RwLock::new(services),
            contacts: RwLock::new(contacts),
            feedback: RwLock::new(feedback),
            site_content: RwLock::new(site_content),
        }
    }

    /// Simulated network round trip. Happens before the mutation block, so
    /// the read-modify-write itself is never split by an await point.
    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Serialize the whole collection back into storage. No batching: N
    /// rapid mutations cause N full rewrites, matching the session-storage
    /// write model.
    fn persist<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value)?;
        self.storage.set(key, raw);
        Ok(())
    }

    fn issue_token() -> String {
        Alphanumeric.sample_string(&mut rand::rng(), SESSION_TOKEN_LEN)
    }

    async fn open_session(&self, user_id: u64) -> String {
        let token = Self::issue_token();
        self.sessions.write().await.insert(token.clone(), user_id);
        token
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    /// Exact email + password match against the simulated store. The
    /// failure is the same for an unknown email and a wrong password.
    pub async fn login(&self, email: &str, password: &str) -> StoreResult<AuthSession> {
        self.round_trip().await;
        let user = {
            let users = self.users.read().await;
            users
                .iter()
                .find(|u| u.email == email && u.password == password)
                .map(UserRecord::public)
                .ok_or(StoreError::Unauthorized)?
        };
        let token = self.open_session(user.id).await;
        Ok(AuthSession { user, token })
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> StoreResult<AuthSession> {
        self.round_trip().await;
        let record = {
            let mut users = self.users.write().await;
            if users.iter().any(|u| u.email == email) {
                return Err(StoreError::Conflict("Email already in use"));
            }
            let record = UserRecord {
                id: self.allocate_id(),
                email: email.to_string(),
                name: name.to_string(),
                role: Role::User,
                phone: None,
                created_at: Some(Utc::now()),
                password: password.to_string(),
            };
            users.push(record.clone());
            self.persist(USERS_KEY, &*users)?;
            record
        };
        let token = self.open_session(record.id).await;
        Ok(AuthSession {
            user: record.public(),
            token,
        })
    }

    /// Admin registration only works while the admin slot is empty. The
    /// admin-exists check comes first: a second admin attempt is Forbidden
    /// even when its email would otherwise be free.
    pub async fn register_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> StoreResult<AuthSession> {
        self.round_trip().await;
        let record = {
            let mut users = self.users.write().await;
            if users.iter().any(|u| u.role == Role::Admin) {
                return Err(StoreError::Forbidden("Admin account already exists"));
            }
            if users.iter().any(|u| u.email == email) {
                return Err(StoreError::Conflict("Email already in use"));
            }
            let record = UserRecord {
                id: self.allocate_id(),
                email: email.to_string(),
                name: name.to_string(),
                role: Role::Admin,
                phone: None,
                created_at: Some(Utc::now()),
                password: password.to_string(),
            };
            users.push(record.clone());
            self.persist(USERS_KEY, &*users)?;
            record
        };
        let token = self.open_session(record.id).await;
        Ok(AuthSession {
            user: record.public(),
            token,
        })
    }

    /// Resolve a bearer token to its account. No latency: this backs the
    /// route-level auth gate, not a mock API call.
    pub async fn verify_token(&self, token: &str) -> Option<User> {
        let user_id = *self.sessions.read().await.get(token)?;
        let users = self.users.read().await;
        users.iter().find(|u| u.id == user_id).map(UserRecord::public)
    }

    // ------------------------------------------------------------------
    // Portfolio & photos
    // ------------------------------------------------------------------

    /// Category list with photos omitted (gallery pages fetch photos per
    /// category on demand).
    pub async fn portfolio(&self) -> Vec<PortfolioCategory> {
        self.round_trip().await;
        self.portfolio
            .read()
            .await
            .iter()
            .map(|c| PortfolioCategory {
                photos: Vec::new(),
                ..c.clone()
            })
            .collect()
    }

    /// Photos of one category. An unknown category yields an empty list
    /// rather than an error, matching the read contract.
    pub async fn photos_by_category(&self, category: &str) -> Vec<Photo> {
        self.round_trip().await;
        self.portfolio
            .read()
            .await
            .iter()
            .find(|c| c.id == category)
            .map(|c| c.photos.clone())
            .unwrap_or_default()
    }

    /// Store an uploaded image as an inline data URL so the photo record is
    /// self-contained across the storage round trip (there is no file store
    /// behind this service).
    pub async fn upload_photo(
        &self,
        bytes: &[u8],
        mime_type: &str,
        category: &str,
    ) -> StoreResult<Photo> {
        self.round_trip().await;
        let mut portfolio = self.portfolio.write().await;
        let target = portfolio
            .iter_mut()
            .find(|c| c.id == category)
            .ok_or(StoreError::NotFound("Category"))?;
        let photo = Photo {
            id: self.allocate_id(),
            url: format!("data:{};base64,{}", mime_type, BASE64.encode(bytes)),
        };
        target.photos.push(photo.clone());
        self.persist(PORTFOLIO_KEY, &*portfolio)?;
        Ok(photo)
    }

    /// Remove a photo wherever it lives. Succeeds even when the id is
    /// absent; dropping the record also drops its inline payload, which is
    /// the only resource a photo owns here.
    pub async fn delete_photo(&self, photo_id: u64) -> StoreResult<()> {
        self.round_trip().await;
        let mut portfolio = self.portfolio.write().await;
        for category in portfolio.iter_mut() {
            category.photos.retain(|p| {
                if p.id == photo_id && p.url.starts_with("data:") {
                    tracing::debug!(photo_id, bytes = p.url.len(), "Releasing inline photo payload");
                }
                p.id != photo_id
            });
        }
        self.persist(PORTFOLIO_KEY, &*portfolio)
    }

    // ------------------------------------------------------------------
    // Site content
    // ------------------------------------------------------------------

    pub async fn site_content(&self) -> SiteContent {
        self.round_trip().await;
        self.site_content.read().await.clone()
    }

    /// Merge semantics: provided fields overwrite, missing fields are kept.
    pub async fn update_site_content(&self, patch: SiteContentPatch) -> StoreResult<SiteContent> {
        self.round_trip().await;
        let mut content = self.site_content.write().await;
        if let Some(about_intro) = patch.about_intro {
            content.about_intro = about_intro;
        }
        if let Some(title) = patch.home_hero_title {
            content.home_hero_title = title;
        }
        if let Some(subtitle) = patch.home_hero_subtitle {
            content.home_hero_subtitle = subtitle;
        }
        self.persist(SITE_CONTENT_KEY, &*content)?;
        Ok(content.clone())
    }

    // ------------------------------------------------------------------
    // Contact submissions (append-only)
    // ------------------------------------------------------------------

    pub async fn submit_enquiry(&self, enquiry: NewEnquiry) -> StoreResult<ContactSubmission> {
        self.round_trip().await;
        let mut contacts = self.contacts.write().await;
        let submission = ContactSubmission {
            id: self.allocate_id(),
            name: enquiry.name,
            phone: enquiry.phone,
            email: enquiry.email,
            message: enquiry.message,
            timestamp: Utc::now(),
        };
        contacts.push(submission.clone());
        self.persist(CONTACTS_KEY, &*contacts)?;
        Ok(submission)
    }

    pub async fn contact_submissions(&self) -> Vec<ContactSubmission> {
        self.round_trip().await;
        self.contacts.read().await.clone()
    }

    // ------------------------------------------------------------------
    // Feedback
    // ------------------------------------------------------------------

    pub async fn submit_feedback(&self, entry: NewFeedback) -> StoreResult<Feedback> {
        self.round_trip().await;
        let mut feedback = self.feedback.write().await;
        let created = Feedback {
            id: self.allocate_id(),
            name: entry.name,
            rating: entry.rating,
            review: entry.review,
            timestamp: Utc::now(),
        };
        feedback.push(created.clone());
        self.persist(FEEDBACK_KEY, &*feedback)?;
        Ok(created)
    }

    pub async fn feedback(&self) -> Vec<Feedback> {
        self.round_trip().await;
        self.feedback.read().await.clone()
    }

    /// Idempotent: deleting an unknown id leaves the collection unchanged
    /// and still succeeds.
    pub async fn delete_feedback(&self, feedback_id: u64) -> StoreResult<()> {
        self.round_trip().await;
        let mut feedback = self.feedback.write().await;
        feedback.retain(|f| f.id != feedback_id);
        self.persist(FEEDBACK_KEY, &*feedback)
    }

    // ------------------------------------------------------------------
    // Services
    // ------------------------------------------------------------------

    pub async fn services(&self) -> Vec<Service> {
        self.round_trip().await;
        self.services.read().await.clone()
    }

    pub async fn add_service(&self, fields: NewService) -> StoreResult<Service> {
        self.round_trip().await;
        let mut services = self.services.write().await;
        let created = Service {
            id: self.allocate_id(),
            final_price: Service::final_price_for(fields.base_price, fields.discount),
            name: fields.name,
            base_price: fields.base_price,
            discount: fields.discount,
            description: fields.description,
        };
        services.push(created.clone());
        self.persist(SERVICES_KEY, &*services)?;
        Ok(created)
    }

    /// Replace the record with the matching id. The derived price is always
    /// recomputed here; whatever the caller put in `final_price` is ignored.
    pub async fn update_service(&self, service: Service) -> StoreResult<Service> {
        self.round_trip().await;
        let mut services = self.services.write().await;
        let slot = services
            .iter_mut()
            .find(|s| s.id == service.id)
            .ok_or(StoreError::NotFound("Service"))?;
        let updated = Service {
            final_price: Service::final_price_for(service.base_price, service.discount),
            ..service
        };
        *slot = updated.clone();
        self.persist(SERVICES_KEY, &*services)?;
        Ok(updated)
    }

    pub async fn delete_service(&self, service_id: u64) -> StoreResult<()> {
        self.round_trip().await;
        let mut services = self.services.write().await;
        services.retain(|s| s.id != service_id);
        self.persist(SERVICES_KEY, &*services)
    }

    // ------------------------------------------------------------------
    // User management
    // ------------------------------------------------------------------

    pub async fn update_profile(
        &self,
        user_id: u64,
        update: ProfileUpdate,
    ) -> StoreResult<User> {
        self.round_trip().await;
        let mut users = self.users.write().await;
        let record = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(StoreError::NotFound("User"))?;
        if let Some(email) = update.email {
            record.email = email;
        }
        if let Some(phone) = update.phone {
            record.phone = Some(phone);
        }
        let public = record.public();
        self.persist(USERS_KEY, &*users)?;
        Ok(public)
    }

    /// All accounts, passwords stripped.
    pub async fn all_users(&self) -> Vec<User> {
        self.round_trip().await;
        self.users
            .read()
            .await
            .iter()
            .map(UserRecord::public)
            .collect()
    }

    /// Collection sizes for the health endpoint.
    pub async fn collection_counts(&self) -> HashMap<&'static str, usize> {
        let mut counts = HashMap::new();
        counts.insert("users", self.users.read().await.len());
        counts.insert("categories", self.portfolio.read().await.len());
        counts.insert("services", self.services.read().await.len());
        counts.insert("enquiries", self.contacts.read().await.len());
        counts.insert("feedback", self.feedback.read().await.len());
        counts
    }
}

// ============================================================================
// Tests
// ============================================================================
