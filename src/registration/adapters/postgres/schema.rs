//! Diesel schema for registration persistence.

diesel::table! {
    /// Directory account records.
    users (id) {
        /// Internal account identifier.
        id -> Uuid,
        /// Unique identifying username.
        #[max_length = 150]
        username -> Varchar,
        /// Notification address.
        #[max_length = 254]
        email -> Varchar,
        /// Argon2 credential hash.
        password_hash -> Text,
        /// Whether the account may sign in.
        is_active -> Bool,
        /// Join timestamp the activation window is measured from.
        joined_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registration profile records, one per in-flight account.
    registration_profiles (id) {
        /// Internal profile identifier.
        id -> Uuid,
        /// Owning account identifier (unique).
        user_id -> Uuid,
        /// Pending activation token or the consumed sentinel.
        #[max_length = 64]
        activation_key -> Varchar,
        /// Whether activation has reached its terminal success state.
        activated -> Bool,
    }
}

diesel::joinable!(registration_profiles -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, registration_profiles);
