//! PostgreSQL-backed `HotelRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{HotelRepository, HotelRepositoryError};
use crate::domain::{Hotel, HotelId, MobileNumber, Role};

use super::error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{HotelProfileUpdate, HotelRow, NewHotelRow};
use super::pool::{DbPool, PoolError};
use super::schema::hotels;

/// Diesel-backed implementation of the hotel repository port.
#[derive(Clone)]
pub struct DieselHotelRepository {
    pool: DbPool,
}

impl DieselHotelRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> HotelRepositoryError {
    map_pool_error(error, HotelRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> HotelRepositoryError {
    if is_unique_violation(&error) {
        return HotelRepositoryError::DuplicateMobileNumber;
    }
    map_diesel_error(
        error,
        HotelRepositoryError::query,
        HotelRepositoryError::connection,
    )
}

/// Convert a database row into the domain hotel.
fn row_to_hotel(row: HotelRow) -> Result<Hotel, HotelRepositoryError> {
    let HotelRow {
        id,
        mobile_number,
        name,
        hotel_name,
        role,
        created_at,
    } = row;

    let mobile_number = MobileNumber::new(mobile_number)
        .map_err(|err| HotelRepositoryError::query(err.to_string()))?;
    let role = if role == "hotel" {
        Role::Hotel
    } else {
        Role::Unknown
    };

    Ok(Hotel {
        id: HotelId::from_uuid(id),
        mobile_number,
        name,
        hotel_name,
        role,
        created_at,
    })
}

#[async_trait]
impl HotelRepository for DieselHotelRepository {
    async fn insert(&self, hotel: &Hotel) -> Result<(), HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = NewHotelRow {
            id: *hotel.id.as_uuid(),
            mobile_number: hotel.mobile_number.as_ref(),
            name: hotel.name.as_str(),
            hotel_name: hotel.hotel_name.as_str(),
            role: hotel.role.as_str(),
            created_at: hotel.created_at,
        };

        diesel::insert_into(hotels::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn update_profile(&self, hotel: &Hotel) -> Result<(), HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::update(hotels::table.filter(hotels::id.eq(hotel.id.as_uuid())))
            .set(&HotelProfileUpdate {
                name: hotel.name.as_str(),
                hotel_name: hotel.hotel_name.as_str(),
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn find_by_mobile_number(
        &self,
        mobile_number: &MobileNumber,
    ) -> Result<Option<Hotel>, HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = hotels::table
            .filter(hotels::mobile_number.eq(mobile_number.as_ref()))
            .select(HotelRow::as_select())
            .first::<HotelRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_hotel).transpose()
    }

    async fn find_by_id(&self, id: &HotelId) -> Result<Option<Hotel>, HotelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = hotels::table
            .filter(hotels::id.eq(id.as_uuid()))
            .select(HotelRow::as_select())
            .first::<HotelRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_hotel).transpose()
    }
}
