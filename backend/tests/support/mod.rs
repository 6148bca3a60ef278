//! In-memory fakes and wiring helpers for HTTP surface tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use backend::domain::ports::{
    BlobSink, HotelRepository, HotelRepositoryError, MenuRepository, MenuRepositoryError,
    MenuWithHotel, OtpRepository, OtpRepositoryError, PageWindow, PushDeliveryError,
    PushTransport, SmsRelay, SmsRelayError, SubscriptionRepository, SubscriptionRepositoryError,
};
use backend::domain::{
    AuthService, Hotel, HotelId, MenuNotifier, MenuPublishService, MenuRecord, MobileNumber,
    NotificationPayload, OneTimeCode, OtpCode, PushRegistry, PushSubscription, TokenCodec,
    WebPushSubscription,
};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::rate_limit::RateLimiter;
use backend::inbound::http::state::HttpState;
use backend::outbound::media::DataUriBlobSink;
use backend::server::AppDependencies;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_VAPID_KEY: &str = "BIntegrationTestPublicKey";

/// Hotel store over a mutexed vector.
#[derive(Default)]
pub struct InMemoryHotels {
    rows: Mutex<Vec<Hotel>>,
}

#[async_trait]
impl HotelRepository for InMemoryHotels {
    async fn insert(&self, hotel: &Hotel) -> Result<(), HotelRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        if rows
            .iter()
            .any(|row| row.mobile_number == hotel.mobile_number)
        {
            return Err(HotelRepositoryError::DuplicateMobileNumber);
        }
        rows.push(hotel.clone());
        Ok(())
    }

    async fn update_profile(&self, hotel: &Hotel) -> Result<(), HotelRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        if let Some(row) = rows.iter_mut().find(|row| row.id == hotel.id) {
            *row = hotel.clone();
        }
        Ok(())
    }

    async fn find_by_mobile_number(
        &self,
        mobile_number: &MobileNumber,
    ) -> Result<Option<Hotel>, HotelRepositoryError> {
        let rows = self.rows.lock().expect("lock");
        Ok(rows
            .iter()
            .find(|row| &row.mobile_number == mobile_number)
            .cloned())
    }

    async fn find_by_id(&self, id: &HotelId) -> Result<Option<Hotel>, HotelRepositoryError> {
        let rows = self.rows.lock().expect("lock");
        Ok(rows.iter().find(|row| &row.id == id).cloned())
    }
}

/// One-time code store keyed by mobile number.
#[derive(Default)]
pub struct InMemoryOtps {
    rows: Mutex<Vec<OneTimeCode>>,
}

#[async_trait]
impl OtpRepository for InMemoryOtps {
    async fn upsert(&self, code: &OneTimeCode) -> Result<(), OtpRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        rows.retain(|row| row.mobile_number != code.mobile_number);
        rows.push(code.clone());
        Ok(())
    }

    async fn consume(
        &self,
        mobile_number: &MobileNumber,
        code: &OtpCode,
        issued_after: DateTime<Utc>,
    ) -> Result<bool, OtpRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        let before = rows.len();
        rows.retain(|row| {
            !(&row.mobile_number == mobile_number
                && &row.code == code
                && row.created_at >= issued_after)
        });
        Ok(rows.len() < before)
    }
}

/// Menu store that joins hotel display fields from [`InMemoryHotels`].
pub struct InMemoryMenus {
    rows: Mutex<Vec<MenuRecord>>,
    hotels: Arc<InMemoryHotels>,
}

impl InMemoryMenus {
    pub fn new(hotels: Arc<InMemoryHotels>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            hotels,
        }
    }

    pub fn count(&self) -> usize {
        self.rows.lock().expect("lock").len()
    }

    fn join(&self, record: MenuRecord) -> MenuWithHotel {
        let hotels = self.hotels.rows.lock().expect("lock");
        let hotel = hotels.iter().find(|hotel| hotel.id == record.hotel_id);
        MenuWithHotel {
            hotel_name: hotel.map(|h| h.hotel_name.clone()).unwrap_or_default(),
            contact_name: hotel.map(|h| h.name.clone()).unwrap_or_default(),
            record,
        }
    }
}

fn page<T>(mut rows: Vec<T>, window: PageWindow) -> Vec<T> {
    let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
    if offset >= rows.len() {
        return Vec::new();
    }
    rows.drain(..offset);
    rows.truncate(limit);
    rows
}

#[async_trait]
impl MenuRepository for InMemoryMenus {
    async fn latest_for_hotel(
        &self,
        hotel_id: &HotelId,
    ) -> Result<Option<MenuRecord>, MenuRepositoryError> {
        let rows = self.rows.lock().expect("lock");
        Ok(rows
            .iter()
            .filter(|row| &row.hotel_id == hotel_id)
            .max_by_key(|row| row.date)
            .cloned())
    }

    async fn insert(&self, record: &MenuRecord) -> Result<(), MenuRepositoryError> {
        self.rows.lock().expect("lock").push(record.clone());
        Ok(())
    }

    async fn update_content(
        &self,
        id: &backend::domain::MenuId,
        image_url: &str,
        note: &str,
    ) -> Result<(), MenuRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        if let Some(row) = rows.iter_mut().find(|row| &row.id == id) {
            row.image_url = image_url.to_owned();
            row.note = note.to_owned();
        }
        Ok(())
    }

    async fn history_for_hotel(
        &self,
        hotel_id: &HotelId,
        window: PageWindow,
    ) -> Result<Vec<MenuRecord>, MenuRepositoryError> {
        let rows = self.rows.lock().expect("lock");
        let mut mine: Vec<MenuRecord> = rows
            .iter()
            .filter(|row| &row.hotel_id == hotel_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(page(mine, window))
    }

    async fn dated_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        window: PageWindow,
    ) -> Result<Vec<MenuWithHotel>, MenuRepositoryError> {
        let matching: Vec<MenuRecord> = {
            let rows = self.rows.lock().expect("lock");
            let mut matching: Vec<MenuRecord> = rows
                .iter()
                .filter(|row| row.date >= start && row.date < end)
                .cloned()
                .collect();
            matching.sort_by(|a, b| b.date.cmp(&a.date));
            matching
        };
        Ok(page(matching, window)
            .into_iter()
            .map(|record| self.join(record))
            .collect())
    }

    async fn latest_per_hotel(
        &self,
        window: PageWindow,
    ) -> Result<Vec<MenuWithHotel>, MenuRepositoryError> {
        let latest: Vec<MenuRecord> = {
            let rows = self.rows.lock().expect("lock");
            let mut latest: Vec<MenuRecord> = Vec::new();
            for row in rows.iter() {
                match latest.iter_mut().find(|kept| kept.hotel_id == row.hotel_id) {
                    Some(kept) if kept.date < row.date => *kept = row.clone(),
                    Some(_) => {}
                    None => latest.push(row.clone()),
                }
            }
            latest.sort_by(|a, b| b.date.cmp(&a.date));
            latest
        };
        Ok(page(latest, window)
            .into_iter()
            .map(|record| self.join(record))
            .collect())
    }
}

/// Subscription store enforcing the `(hotel_id, endpoint)` upsert.
#[derive(Default)]
pub struct InMemorySubscriptions {
    rows: Mutex<Vec<PushSubscription>>,
}

impl InMemorySubscriptions {
    pub fn count(&self) -> usize {
        self.rows.lock().expect("lock").len()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.rows
            .lock()
            .expect("lock")
            .iter()
            .map(|row| row.subscription.endpoint.clone())
            .collect()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptions {
    async fn upsert(
        &self,
        subscription: &PushSubscription,
    ) -> Result<PushSubscription, SubscriptionRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        if let Some(row) = rows.iter_mut().find(|row| {
            row.hotel_id == subscription.hotel_id
                && row.subscription.endpoint == subscription.subscription.endpoint
        }) {
            row.subscription = subscription.subscription.clone();
            return Ok(row.clone());
        }
        rows.push(subscription.clone());
        Ok(subscription.clone())
    }

    async fn delete_by_endpoint(
        &self,
        hotel_id: &HotelId,
        endpoint: &str,
    ) -> Result<(), SubscriptionRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        rows.retain(|row| {
            !(&row.hotel_id == hotel_id && row.subscription.endpoint == endpoint)
        });
        Ok(())
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<(), SubscriptionRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        rows.retain(|row| &row.id != id);
        Ok(())
    }

    async fn list_for_hotel(
        &self,
        hotel_id: &HotelId,
    ) -> Result<Vec<PushSubscription>, SubscriptionRepositoryError> {
        let rows = self.rows.lock().expect("lock");
        Ok(rows
            .iter()
            .filter(|row| &row.hotel_id == hotel_id)
            .cloned()
            .collect())
    }
}

/// Transport that records deliveries and reports configured endpoints gone.
#[derive(Default)]
pub struct RecordingTransport {
    gone_endpoints: Mutex<HashSet<String>>,
    delivered: Mutex<Vec<String>>,
}

impl RecordingTransport {
    pub fn mark_gone(&self, endpoint: &str) {
        self.gone_endpoints
            .lock()
            .expect("lock")
            .insert(endpoint.to_owned());
    }

    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().expect("lock").clone()
    }
}

#[async_trait]
impl PushTransport for RecordingTransport {
    async fn deliver(
        &self,
        subscription: &WebPushSubscription,
        _payload: &NotificationPayload,
    ) -> Result<(), PushDeliveryError> {
        if self
            .gone_endpoints
            .lock()
            .expect("lock")
            .contains(&subscription.endpoint)
        {
            return Err(PushDeliveryError::Gone);
        }
        self.delivered
            .lock()
            .expect("lock")
            .push(subscription.endpoint.clone());
        Ok(())
    }
}

/// Relay that drops every message.
pub struct NullSmsRelay;

#[async_trait]
impl SmsRelay for NullSmsRelay {
    async fn send(&self, _to: &MobileNumber, _message: &str) -> Result<(), SmsRelayError> {
        Ok(())
    }
}

/// Fully wired in-memory application for one test.
pub struct Harness {
    pub deps: AppDependencies,
    pub codec: TokenCodec,
    pub hotels: Arc<InMemoryHotels>,
    pub menus: Arc<InMemoryMenus>,
    pub subscriptions: Arc<InMemorySubscriptions>,
    pub transport: Arc<RecordingTransport>,
}

/// Build the app dependencies over fresh in-memory stores.
pub fn harness() -> Harness {
    harness_with_limit(10)
}

/// Same as [`harness`] with a custom OTP rate-limit ceiling.
pub fn harness_with_limit(max_otp_requests: u32) -> Harness {
    let hotels = Arc::new(InMemoryHotels::default());
    let menus = Arc::new(InMemoryMenus::new(Arc::clone(&hotels)));
    let subscriptions = Arc::new(InMemorySubscriptions::default());
    let transport = Arc::new(RecordingTransport::default());
    let codec = TokenCodec::new(TEST_SECRET);

    let hotels_port: Arc<dyn HotelRepository> = hotels.clone();
    let menus_port: Arc<dyn MenuRepository> = menus.clone();
    let subscriptions_port: Arc<dyn SubscriptionRepository> = subscriptions.clone();
    let transport_port: Arc<dyn PushTransport> = transport.clone();
    let blobs: Arc<dyn BlobSink> = Arc::new(DataUriBlobSink);

    let notifier = Arc::new(MenuNotifier::new(
        Arc::clone(&hotels_port),
        Arc::clone(&subscriptions_port),
        transport_port,
    ));
    let publisher = Arc::new(MenuPublishService::new(
        Arc::clone(&menus_port),
        blobs,
        notifier,
    ));
    let auth = Arc::new(AuthService::new(
        Arc::clone(&hotels_port),
        Arc::new(InMemoryOtps::default()),
        Arc::new(NullSmsRelay),
        codec.clone(),
        Duration::from_secs(500),
    ));
    let registry = Arc::new(PushRegistry::new(
        Arc::clone(&hotels_port),
        Arc::clone(&subscriptions_port),
    ));

    let state = HttpState {
        auth,
        publisher,
        registry,
        hotels: hotels_port,
        menus: menus_port,
        vapid_public_key: TEST_VAPID_KEY.to_owned(),
    };

    let deps = AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(state),
        token_codec: web::Data::new(codec.clone()),
        rate_limiter: web::Data::new(RateLimiter::new(
            Duration::from_secs(900),
            max_otp_requests,
        )),
    };

    Harness {
        deps,
        codec,
        hotels,
        menus,
        subscriptions,
        transport,
    }
}

/// Build a multipart upload body with an optional image part.
pub fn multipart_body(boundary: &str, image: Option<&[u8]>, note: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(image) = image {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"menuImage\"; \
                 filename=\"menu.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(image);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(note) = note {
        body.extend_from_slice(
            format!("--{boundary}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\n{note}\r\n")
                .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

/// Poll `condition` until it holds or roughly two seconds elapse.
pub async fn wait_until<F>(condition: F) -> bool
where
    F: Fn() -> bool,
{
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    condition()
}
