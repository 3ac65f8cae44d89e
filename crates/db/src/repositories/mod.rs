//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every mutation runs inside one database transaction; multi-query reads
//! run inside one read-only snapshot.

mod error;
mod snapshot;

pub mod fee_head;
pub mod invoice;
pub mod ledger;
pub mod payment;
pub mod receipt;
pub mod report;
pub mod sequence;
pub mod student;

pub use fee_head::FeeHeadRepository;
pub use invoice::{
    InvoiceItemView, InvoiceList, InvoiceListFilter, InvoiceListItem, InvoiceRepoError,
    InvoiceRepository, InvoiceView,
};
pub use ledger::{LedgerError, LedgerRepository};
pub use payment::{PaymentRecordError, PaymentRepository, PaymentView, RecordedPayment};
pub use receipt::{ReceiptError, ReceiptRepository, ReceiptView};
pub use report::{ReportQueryError, ReportRepository};
pub use sequence::ReceiptSequenceRepository;
pub use student::StudentRepository;

/// Converts an unexpected database error into an `AppError`.
pub use error::database_error;
