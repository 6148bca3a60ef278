//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the SQL migrations exactly; Diesel uses
//! them for compile-time query validation. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Hotel accounts, keyed by UUID with a unique mobile number.
    hotels (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login identity.
        mobile_number -> Varchar,
        /// Contact person name; empty until provided.
        name -> Varchar,
        /// Display name shown to subscribers; empty until provided.
        hotel_name -> Varchar,
        /// Account role string; `hotel` for rows created by this system.
        role -> Varchar,
        /// Account creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One active login code per mobile number.
    one_time_codes (mobile_number) {
        /// Primary key: the number the code was issued to.
        mobile_number -> Varchar,
        /// The five-digit code.
        code -> Varchar,
        /// Issue timestamp; verification applies the TTL cutoff here.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Published daily menus, at most one per hotel per local day.
    menu_records (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning hotel.
        hotel_id -> Uuid,
        /// Media-store URL or inline `data:` URI.
        image_url -> Text,
        /// Free-text note.
        note -> Text,
        /// Publication instant.
        date -> Timestamptz,
    }
}

diesel::table! {
    /// Web-push subscriptions, unique per `(hotel_id, endpoint)`.
    push_subscriptions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Hotel whose menu updates this subscriber follows.
        hotel_id -> Uuid,
        /// Push-service delivery URL.
        endpoint -> Text,
        /// Optional expiry supplied by the push service.
        expiration_time -> Nullable<Timestamptz>,
        /// Client public key for payload encryption.
        p256dh -> Varchar,
        /// Shared authentication secret.
        auth -> Varchar,
        /// First-subscribed timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(menu_records -> hotels (hotel_id));
diesel::joinable!(push_subscriptions -> hotels (hotel_id));

diesel::allow_tables_to_appear_in_same_query!(hotels, menu_records, push_subscriptions);
