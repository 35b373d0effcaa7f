//! Diesel schema for project persistence.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Insertion sequence used for listing order.
        seq -> Int8,
        /// Trimmed project name.
        #[max_length = 255]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
