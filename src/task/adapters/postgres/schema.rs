//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Insertion sequence used for listing order.
        seq -> Int8,
        /// Owning project; cascades on project deletion.
        project_id -> Uuid,
        /// Trimmed task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task category (`bug`, `feature`, `chore`).
        #[max_length = 20]
        category -> Varchar,
        /// Workflow status (`TODO`, `DOING`, `DONE`).
        #[max_length = 20]
        status -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
