//! PostgreSQL-backed `SubscriptionRepository` implementation using Diesel.
//!
//! Subscribe is an upsert on the `(hotel_id, endpoint)` unique index, which
//! is what makes repeat subscriptions idempotent.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{SubscriptionRepository, SubscriptionRepositoryError};
use crate::domain::{HotelId, PushSubscription, SubscriptionKeys, WebPushSubscription};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPushSubscriptionRow, PushSubscriptionRow, PushSubscriptionUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::push_subscriptions;

/// Diesel-backed implementation of the subscription repository port.
#[derive(Clone)]
pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> SubscriptionRepositoryError {
    map_pool_error(error, SubscriptionRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> SubscriptionRepositoryError {
    map_diesel_error(
        error,
        SubscriptionRepositoryError::query,
        SubscriptionRepositoryError::connection,
    )
}

fn expiration_to_timestamp(expiration_ms: Option<i64>) -> Option<DateTime<Utc>> {
    expiration_ms.and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}

fn row_to_subscription(row: PushSubscriptionRow) -> PushSubscription {
    let PushSubscriptionRow {
        id,
        hotel_id,
        endpoint,
        expiration_time,
        p256dh,
        auth,
        created_at,
    } = row;
    PushSubscription {
        id,
        hotel_id: HotelId::from_uuid(hotel_id),
        subscription: WebPushSubscription {
            endpoint,
            expiration_time: expiration_time.map(|t| t.timestamp_millis()),
            keys: SubscriptionKeys { p256dh, auth },
        },
        created_at,
    }
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn upsert(
        &self,
        subscription: &PushSubscription,
    ) -> Result<PushSubscription, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let expiration_time = expiration_to_timestamp(subscription.subscription.expiration_time);
        let row = NewPushSubscriptionRow {
            id: subscription.id,
            hotel_id: *subscription.hotel_id.as_uuid(),
            endpoint: subscription.subscription.endpoint.as_str(),
            expiration_time,
            p256dh: subscription.subscription.keys.p256dh.as_str(),
            auth: subscription.subscription.keys.auth.as_str(),
            created_at: subscription.created_at,
        };
        let update = PushSubscriptionUpdate {
            expiration_time: Some(expiration_time),
            p256dh: subscription.subscription.keys.p256dh.as_str(),
            auth: subscription.subscription.keys.auth.as_str(),
        };

        let stored = diesel::insert_into(push_subscriptions::table)
            .values(&row)
            .on_conflict((push_subscriptions::hotel_id, push_subscriptions::endpoint))
            .do_update()
            .set(&update)
            .returning(PushSubscriptionRow::as_returning())
            .get_result::<PushSubscriptionRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(row_to_subscription(stored))
    }

    async fn delete_by_endpoint(
        &self,
        hotel_id: &HotelId,
        endpoint: &str,
    ) -> Result<(), SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::delete(
            push_subscriptions::table.filter(
                push_subscriptions::hotel_id
                    .eq(hotel_id.as_uuid())
                    .and(push_subscriptions::endpoint.eq(endpoint)),
            ),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel)
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<(), SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::delete(push_subscriptions::table.filter(push_subscriptions::id.eq(id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn list_for_hotel(
        &self,
        hotel_id: &HotelId,
    ) -> Result<Vec<PushSubscription>, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<PushSubscriptionRow> = push_subscriptions::table
            .filter(push_subscriptions::hotel_id.eq(hotel_id.as_uuid()))
            .order(push_subscriptions::created_at.asc())
            .select(PushSubscriptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(row_to_subscription).collect())
    }
}
