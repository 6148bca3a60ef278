//! Menu publish workflow.
//!
//! The core decision: an upload either replaces today's record in place or
//! creates a new one, based on local calendar-day equality against the
//! hotel's most recent record. The read-then-decide sequence is not guarded
//! by a transaction; two concurrent uploads for one hotel on one day may
//! race (both create, or one update is lost). Accepted as-is; a compound
//! `(hotel_id, day)` constraint with a conditional upsert would remove it.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::domain::menu::{MenuId, MenuRecord, same_local_day};
use crate::domain::notify::MenuNotifier;
use crate::domain::ports::{
    BlobSink, BlobUpload, MenuRepository, MenuRepositoryError, StorageKind,
};
use crate::domain::{Error, HotelId};

/// Uploaded image bytes plus their declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Raw image bytes.
    pub bytes: Vec<u8>,
    /// Declared MIME type, e.g. `image/jpeg`.
    pub content_type: String,
}

/// Whether the upload replaced today's record or created a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishAction {
    /// A new record was created for a fresh calendar day.
    Created,
    /// Today's existing record was replaced in place.
    Updated,
}

/// Result of a publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// The record as persisted.
    pub record: MenuRecord,
    /// Update-in-place versus fresh record.
    pub action: PublishAction,
    /// Remote media store versus inline data URI.
    pub storage: StorageKind,
}

fn map_menu_error(error: MenuRepositoryError) -> Error {
    match error {
        MenuRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("menu repository unavailable: {message}"))
        }
        MenuRepositoryError::Query { message } => {
            Error::internal(format!("menu repository error: {message}"))
        }
    }
}

/// Publishes daily menus and triggers the notification fan-out.
pub struct MenuPublishService {
    menus: Arc<dyn MenuRepository>,
    blobs: Arc<dyn BlobSink>,
    notifier: Arc<MenuNotifier>,
}

impl MenuPublishService {
    /// Build the service over its collaborator ports.
    pub fn new(
        menus: Arc<dyn MenuRepository>,
        blobs: Arc<dyn BlobSink>,
        notifier: Arc<MenuNotifier>,
    ) -> Self {
        Self {
            menus,
            blobs,
            notifier,
        }
    }

    /// Publish today's menu for a hotel.
    ///
    /// Stores the image, then either updates today's existing record or
    /// creates a new one, and finally spawns the fan-out on a detached task
    /// so its outcome can never affect this call's result.
    pub async fn publish(
        &self,
        hotel_id: HotelId,
        image: ImageUpload,
        note: String,
    ) -> Result<PublishOutcome, Error> {
        let now = Utc::now();

        let todays_record = self
            .menus
            .latest_for_hotel(&hotel_id)
            .await
            .map_err(map_menu_error)?
            .filter(|record| same_local_day(record.date, now));

        let stored = self
            .blobs
            .store(BlobUpload {
                bytes: image.bytes,
                content_type: image.content_type,
                file_name: format!("menu_{hotel_id}_{}", now.timestamp_millis()),
            })
            .await
            .map_err(|error| Error::internal(format!("image storage failed: {error}")))?;

        let outcome = match todays_record {
            Some(mut record) => {
                record.image_url.clone_from(&stored.url);
                record.note.clone_from(&note);
                self.menus
                    .update_content(&record.id, &stored.url, &note)
                    .await
                    .map_err(map_menu_error)?;
                PublishOutcome {
                    record,
                    action: PublishAction::Updated,
                    storage: stored.kind,
                }
            }
            None => {
                let record = MenuRecord {
                    id: MenuId::random(),
                    hotel_id,
                    image_url: stored.url,
                    note,
                    date: now,
                };
                self.menus.insert(&record).await.map_err(map_menu_error)?;
                PublishOutcome {
                    record,
                    action: PublishAction::Created,
                    storage: stored.kind,
                }
            }
        };

        // Fire-and-forget: the upload response must not block on, or fail
        // because of, notification delivery.
        let notifier = Arc::clone(&self.notifier);
        let _detached = tokio::spawn(async move {
            let summary = notifier.notify_menu_updated(hotel_id).await;
            debug!(%hotel_id, ?summary, "detached fan-out finished");
        });

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockBlobSink, MockHotelRepository, MockMenuRepository, MockPushTransport,
        MockSubscriptionRepository, StoredBlob,
    };
    use chrono::Duration;
    use rstest::rstest;

    /// Notifier whose hotel lookup misses, so detached fan-outs abort fast.
    fn quiet_notifier() -> Arc<MenuNotifier> {
        let mut hotels = MockHotelRepository::new();
        hotels.expect_find_by_id().returning(|_| Ok(None));
        Arc::new(MenuNotifier::new(
            Arc::new(hotels),
            Arc::new(MockSubscriptionRepository::new()),
            Arc::new(MockPushTransport::new()),
        ))
    }

    fn remote_sink() -> MockBlobSink {
        let mut blobs = MockBlobSink::new();
        blobs.expect_store().returning(|upload| {
            Ok(StoredBlob {
                url: format!("https://media.example/menus/{}", upload.file_name),
                kind: StorageKind::Remote,
            })
        });
        blobs
    }

    fn image() -> ImageUpload {
        ImageUpload {
            bytes: vec![0xFF, 0xD8, 0xFF],
            content_type: "image/jpeg".to_owned(),
        }
    }

    fn record_dated(hotel_id: HotelId, date: chrono::DateTime<Utc>) -> MenuRecord {
        MenuRecord {
            id: MenuId::random(),
            hotel_id,
            image_url: "https://media.example/menus/old".to_owned(),
            note: "yesterday's".to_owned(),
            date,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn same_day_upload_updates_in_place() {
        let hotel_id = HotelId::random();
        let existing = record_dated(hotel_id, Utc::now());
        let existing_id = existing.id;

        let mut menus = MockMenuRepository::new();
        menus
            .expect_latest_for_hotel()
            .returning(move |_| Ok(Some(existing.clone())));
        menus
            .expect_update_content()
            .withf(move |id, url, note| {
                *id == existing_id && url.starts_with("https://media.example/") && note == "lunch"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));
        // No insert expectation: a second record on the same day is a bug.

        let service = MenuPublishService::new(
            Arc::new(menus),
            Arc::new(remote_sink()),
            quiet_notifier(),
        );
        let outcome = service
            .publish(hotel_id, image(), "lunch".to_owned())
            .await
            .expect("publish succeeds");

        assert_eq!(outcome.action, PublishAction::Updated);
        assert_eq!(outcome.record.id, existing_id);
        assert_eq!(outcome.record.note, "lunch");
    }

    #[rstest]
    #[tokio::test]
    async fn day_rollover_creates_a_new_record() {
        let hotel_id = HotelId::random();
        let yesterday = record_dated(hotel_id, Utc::now() - Duration::days(1));
        let old_id = yesterday.id;

        let mut menus = MockMenuRepository::new();
        menus
            .expect_latest_for_hotel()
            .returning(move |_| Ok(Some(yesterday.clone())));
        menus
            .expect_insert()
            .withf(move |record| record.id != old_id && record.note == "dinner")
            .times(1)
            .returning(|_| Ok(()));

        let service = MenuPublishService::new(
            Arc::new(menus),
            Arc::new(remote_sink()),
            quiet_notifier(),
        );
        let outcome = service
            .publish(hotel_id, image(), "dinner".to_owned())
            .await
            .expect("publish succeeds");

        assert_eq!(outcome.action, PublishAction::Created);
        assert_ne!(outcome.record.id, old_id);
    }

    #[rstest]
    #[tokio::test]
    async fn first_upload_ever_creates_a_record() {
        let hotel_id = HotelId::random();
        let mut menus = MockMenuRepository::new();
        menus.expect_latest_for_hotel().returning(|_| Ok(None));
        menus.expect_insert().times(1).returning(|_| Ok(()));

        let service = MenuPublishService::new(
            Arc::new(menus),
            Arc::new(remote_sink()),
            quiet_notifier(),
        );
        let outcome = service
            .publish(hotel_id, image(), String::new())
            .await
            .expect("publish succeeds");

        assert_eq!(outcome.action, PublishAction::Created);
        assert_eq!(outcome.storage, StorageKind::Remote);
    }

    #[rstest]
    #[tokio::test]
    async fn storage_failure_surfaces_before_any_write() {
        let hotel_id = HotelId::random();
        let mut menus = MockMenuRepository::new();
        menus.expect_latest_for_hotel().returning(|_| Ok(None));
        // No insert/update expectations: storage failed first.

        let mut blobs = MockBlobSink::new();
        blobs.expect_store().returning(|_| {
            Err(crate::domain::ports::BlobSinkError::upload(
                "credentials rejected",
            ))
        });

        let service =
            MenuPublishService::new(Arc::new(menus), Arc::new(blobs), quiet_notifier());
        let error = service
            .publish(hotel_id, image(), String::new())
            .await
            .expect_err("publish must fail");

        assert_eq!(error.code(), crate::domain::ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn inline_storage_kind_is_reported() {
        let hotel_id = HotelId::random();
        let mut menus = MockMenuRepository::new();
        menus.expect_latest_for_hotel().returning(|_| Ok(None));
        menus.expect_insert().returning(|_| Ok(()));

        let mut blobs = MockBlobSink::new();
        blobs.expect_store().returning(|upload| {
            Ok(StoredBlob {
                url: format!("data:{};base64,AAAA", upload.content_type),
                kind: StorageKind::Inline,
            })
        });

        let service =
            MenuPublishService::new(Arc::new(menus), Arc::new(blobs), quiet_notifier());
        let outcome = service
            .publish(hotel_id, image(), String::new())
            .await
            .expect("publish succeeds");

        assert_eq!(outcome.storage, StorageKind::Inline);
        assert!(outcome.record.image_url.starts_with("data:image/jpeg;base64,"));
    }
}
