//! PostgreSQL-backed `OtpRepository` implementation using Diesel.
//!
//! The table is keyed by mobile number, so issuing a code is a single
//! upsert and consuming one is a single conditional DELETE. The DELETE is
//! what makes codes single-use: only one concurrent verification can see a
//! positive row count.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{OtpRepository, OtpRepositoryError};
use crate::domain::{MobileNumber, OneTimeCode, OtpCode};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::OneTimeCodeRow;
use super::pool::{DbPool, PoolError};
use super::schema::one_time_codes;

/// Diesel-backed implementation of the one-time code repository port.
#[derive(Clone)]
pub struct DieselOtpRepository {
    pool: DbPool,
}

impl DieselOtpRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> OtpRepositoryError {
    map_pool_error(error, OtpRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> OtpRepositoryError {
    map_diesel_error(
        error,
        OtpRepositoryError::query,
        OtpRepositoryError::connection,
    )
}

#[async_trait]
impl OtpRepository for DieselOtpRepository {
    async fn upsert(&self, code: &OneTimeCode) -> Result<(), OtpRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = OneTimeCodeRow {
            mobile_number: code.mobile_number.as_ref(),
            code: code.code.as_ref(),
            created_at: code.created_at,
        };

        diesel::insert_into(one_time_codes::table)
            .values(&row)
            .on_conflict(one_time_codes::mobile_number)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn consume(
        &self,
        mobile_number: &MobileNumber,
        code: &OtpCode,
        issued_after: DateTime<Utc>,
    ) -> Result<bool, OtpRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let deleted = diesel::delete(
            one_time_codes::table.filter(
                one_time_codes::mobile_number
                    .eq(mobile_number.as_ref())
                    .and(one_time_codes::code.eq(code.as_ref()))
                    .and(one_time_codes::created_at.ge(issued_after)),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel)?;

        Ok(deleted > 0)
    }
}
