//! PostgreSQL-backed `MenuRepository` implementation using Diesel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MenuRepository, MenuRepositoryError, MenuWithHotel, PageWindow};
use crate::domain::{HotelId, MenuId, MenuRecord};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{HotelRow, MenuRecordRow, NewMenuRecordRow};
use super::pool::{DbPool, PoolError};
use super::schema::{hotels, menu_records};

/// Diesel-backed implementation of the menu repository port.
#[derive(Clone)]
pub struct DieselMenuRepository {
    pool: DbPool,
}

impl DieselMenuRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> MenuRepositoryError {
    map_pool_error(error, MenuRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> MenuRepositoryError {
    map_diesel_error(
        error,
        MenuRepositoryError::query,
        MenuRepositoryError::connection,
    )
}

fn row_to_record(row: MenuRecordRow) -> MenuRecord {
    let MenuRecordRow {
        id,
        hotel_id,
        image_url,
        note,
        date,
    } = row;
    MenuRecord {
        id: MenuId::from_uuid(id),
        hotel_id: HotelId::from_uuid(hotel_id),
        image_url,
        note,
        date,
    }
}

fn joined_to_domain(record: MenuRecordRow, hotel: HotelRow) -> MenuWithHotel {
    MenuWithHotel {
        record: row_to_record(record),
        hotel_name: hotel.hotel_name,
        contact_name: hotel.name,
    }
}

#[async_trait]
impl MenuRepository for DieselMenuRepository {
    async fn latest_for_hotel(
        &self,
        hotel_id: &HotelId,
    ) -> Result<Option<MenuRecord>, MenuRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = menu_records::table
            .filter(menu_records::hotel_id.eq(hotel_id.as_uuid()))
            .order(menu_records::date.desc())
            .select(MenuRecordRow::as_select())
            .first::<MenuRecordRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(row_to_record))
    }

    async fn insert(&self, record: &MenuRecord) -> Result<(), MenuRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = NewMenuRecordRow {
            id: *record.id.as_uuid(),
            hotel_id: *record.hotel_id.as_uuid(),
            image_url: record.image_url.as_str(),
            note: record.note.as_str(),
            date: record.date,
        };

        diesel::insert_into(menu_records::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn update_content(
        &self,
        id: &MenuId,
        image_url: &str,
        note: &str,
    ) -> Result<(), MenuRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::update(menu_records::table.filter(menu_records::id.eq(id.as_uuid())))
            .set((
                menu_records::image_url.eq(image_url),
                menu_records::note.eq(note),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn history_for_hotel(
        &self,
        hotel_id: &HotelId,
        window: PageWindow,
    ) -> Result<Vec<MenuRecord>, MenuRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<MenuRecordRow> = menu_records::table
            .filter(menu_records::hotel_id.eq(hotel_id.as_uuid()))
            .order(menu_records::date.desc())
            .offset(window.offset)
            .limit(window.limit)
            .select(MenuRecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }

    async fn dated_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        window: PageWindow,
    ) -> Result<Vec<MenuWithHotel>, MenuRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<(MenuRecordRow, HotelRow)> = menu_records::table
            .inner_join(hotels::table)
            .filter(
                menu_records::date
                    .ge(start)
                    .and(menu_records::date.lt(end)),
            )
            .order(menu_records::date.desc())
            .offset(window.offset)
            .limit(window.limit)
            .select((MenuRecordRow::as_select(), HotelRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows
            .into_iter()
            .map(|(record, hotel)| joined_to_domain(record, hotel))
            .collect())
    }

    async fn latest_per_hotel(
        &self,
        window: PageWindow,
    ) -> Result<Vec<MenuWithHotel>, MenuRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        // DISTINCT ON requires the sort to lead with hotel_id, so the
        // newest-first ordering and the page window are applied in memory.
        // Tenant counts here are small enough for that to hold up.
        let rows: Vec<(MenuRecordRow, HotelRow)> = menu_records::table
            .inner_join(hotels::table)
            .distinct_on(menu_records::hotel_id)
            .order((menu_records::hotel_id.asc(), menu_records::date.desc()))
            .select((MenuRecordRow::as_select(), HotelRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let mut joined: Vec<MenuWithHotel> = rows
            .into_iter()
            .map(|(record, hotel)| joined_to_domain(record, hotel))
            .collect();
        joined.sort_by(|a, b| b.record.date.cmp(&a.record.date));

        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
        Ok(joined.into_iter().skip(offset).take(limit).collect())
    }
}
