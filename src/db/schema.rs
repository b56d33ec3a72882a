//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `missing_products` table (open requests awaiting a supplier)
/// - `product_history` table (received requests with their response time)
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Open requests
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS missing_products (
    id INTEGER PRIMARY KEY NOT NULL,
    product_name TEXT NOT NULL,
    supplier_name TEXT NOT NULL,
    priority TEXT NOT NULL DEFAULT 'medium', -- low | medium | high
    requested_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_missing_products_requested_at ON missing_products(requested_at);

-- ---------------------------------------------------------------------------
-- Received requests (append-only)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS product_history (
    id INTEGER PRIMARY KEY NOT NULL,
    product_name TEXT NOT NULL,
    supplier_name TEXT NOT NULL,
    requested_at TEXT NOT NULL, -- RFC3339
    received_at TEXT NOT NULL, -- RFC3339
    response_time_days INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_product_history_received_at ON product_history(received_at);
"#;
