//! `SeaORM` entity definitions.

pub mod fee_heads;
pub mod idempotency;
pub mod invoice_items;
pub mod invoices;
pub mod payments;
pub mod receipts_sequence;
pub mod sea_orm_active_enums;
pub mod students;
