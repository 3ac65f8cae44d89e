//! Fee ledger schema.
//!
//! Creates the enums, reference tables (students, fee heads), the invoice
//! and payment tables, the per-month receipt counter and the idempotency
//! key store.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: REFERENCE DATA
        // ============================================================
        db.execute_unprepared(STUDENTS_SQL).await?;
        db.execute_unprepared(FEE_HEADS_SQL).await?;

        // ============================================================
        // PART 3: INVOICES
        // ============================================================
        db.execute_unprepared(INVOICES_SQL).await?;
        db.execute_unprepared(INVOICE_ITEMS_SQL).await?;

        // ============================================================
        // PART 4: PAYMENTS
        // ============================================================
        db.execute_unprepared(PAYMENTS_SQL).await?;
        db.execute_unprepared(RECEIPTS_SEQUENCE_SQL).await?;
        db.execute_unprepared(IDEMPOTENCY_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE invoice_status AS ENUM ('UNPAID', 'PARTIAL', 'PAID', 'VOID');

CREATE TYPE payment_mode AS ENUM ('CASH', 'CARD', 'UPI', 'BANK', 'OTHER');
";

const STUDENTS_SQL: &str = r"
CREATE TABLE students (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    roll_number VARCHAR(50) NOT NULL UNIQUE,
    class_label VARCHAR(50) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_students_class ON students(class_label, roll_number);
";

const FEE_HEADS_SQL: &str = r"
CREATE TABLE fee_heads (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(100) NOT NULL UNIQUE,
    default_amount NUMERIC(12, 2) NOT NULL CHECK (default_amount >= 0),
    active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const INVOICES_SQL: &str = r"
CREATE TABLE invoices (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    student_id UUID NOT NULL REFERENCES students(id),
    class_label VARCHAR(50) NOT NULL,
    period VARCHAR(7) NOT NULL CHECK (period ~ '^[0-9]{4}-(0[1-9]|1[0-2])$'),
    billed_total NUMERIC(12, 2) NOT NULL DEFAULT 0 CHECK (billed_total >= 0),
    paid_total NUMERIC(12, 2) NOT NULL DEFAULT 0 CHECK (paid_total >= 0),
    balance NUMERIC(12, 2) NOT NULL DEFAULT 0,
    status invoice_status NOT NULL DEFAULT 'UNPAID',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT uq_invoices_student_period UNIQUE (student_id, period),
    CONSTRAINT chk_invoices_balance CHECK (balance = billed_total - paid_total)
);

CREATE INDEX idx_invoices_class_period ON invoices(class_label, period);
CREATE INDEX idx_invoices_period ON invoices(period);
CREATE INDEX idx_invoices_created ON invoices(created_at DESC);
";

const INVOICE_ITEMS_SQL: &str = r"
CREATE TABLE invoice_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    invoice_id UUID NOT NULL REFERENCES invoices(id) ON DELETE CASCADE,
    head_id UUID NOT NULL REFERENCES fee_heads(id),
    head_name VARCHAR(100) NOT NULL,
    amount NUMERIC(12, 2) NOT NULL CHECK (amount >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT uq_invoice_items_head UNIQUE (invoice_id, head_id)
);

CREATE INDEX idx_invoice_items_head ON invoice_items(head_id);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    invoice_id UUID NOT NULL REFERENCES invoices(id),
    amount NUMERIC(12, 2) NOT NULL CHECK (amount > 0),
    mode payment_mode NOT NULL,
    txn_ref VARCHAR(255),
    paid_on TIMESTAMPTZ NOT NULL,
    receipt_number VARCHAR(32) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT uq_payments_txn_ref UNIQUE (txn_ref),
    CONSTRAINT uq_payments_receipt_number UNIQUE (receipt_number),
    CONSTRAINT chk_payments_txn_ref_required CHECK (mode = 'CASH' OR txn_ref IS NOT NULL)
);

CREATE INDEX idx_payments_invoice ON payments(invoice_id, paid_on);
";

const RECEIPTS_SEQUENCE_SQL: &str = r"
CREATE TABLE receipts_sequence (
    year_month VARCHAR(7) PRIMARY KEY,
    next_number BIGINT NOT NULL CHECK (next_number >= 2),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const IDEMPOTENCY_SQL: &str = r"
CREATE TABLE idempotency (
    key VARCHAR(255) PRIMARY KEY,
    payment_id UUID NOT NULL REFERENCES payments(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS idempotency;
DROP TABLE IF EXISTS receipts_sequence;
DROP TABLE IF EXISTS payments;
DROP TABLE IF EXISTS invoice_items;
DROP TABLE IF EXISTS invoices;
DROP TABLE IF EXISTS fee_heads;
DROP TABLE IF EXISTS students;
DROP TYPE IF EXISTS payment_mode;
DROP TYPE IF EXISTS invoice_status;
";
