//! Invoice repository: generation, listing and voiding.

use chrono::{DateTime, Utc};
use feeledger_core::billing::{
    BillingError, BillingPeriod, FeeHeadInfo, GenerationPlan, GenerationSummary, HeadResolver,
    ResolvedHead,
};
use feeledger_core::invoice::{
    InvoiceAggregator, InvoiceError, InvoiceStatus, InvoiceTotals, UnknownStatus,
};
use feeledger_shared::AppError;
use feeledger_shared::types::{
    FeeHeadId, InvoiceId, InvoiceItemId, OffsetPage, StudentId, round_money,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Set, Statement,
    TransactionTrait, Value,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::error::{database_error, unique_violation};
use super::fee_head::head_info;
use crate::entities::{fee_heads, invoice_items, invoices, students};

/// Error types for invoice operations.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceRepoError {
    /// Generation request rejected.
    #[error(transparent)]
    Billing(#[from] BillingError),

    /// Invoice state change rejected.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    /// A concurrent generation run created the same invoice first.
    #[error("Invoice already exists for student {student_id} in {period}")]
    Conflict {
        /// Student.
        student_id: StudentId,
        /// Period.
        period: BillingPeriod,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<InvoiceRepoError> for AppError {
    fn from(err: InvoiceRepoError) -> Self {
        match err {
            InvoiceRepoError::Billing(e) => e.into(),
            InvoiceRepoError::Invoice(e) => e.into(),
            InvoiceRepoError::Conflict { .. } => Self::AlreadyExists(err.to_string()),
            InvoiceRepoError::Database(e) => database_error(&e),
        }
    }
}

/// An invoice as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceView {
    /// Invoice id.
    pub id: InvoiceId,
    /// Billed student.
    pub student_id: StudentId,
    /// Class at generation time.
    pub class_label: String,
    /// `YYYY-MM`.
    pub period: String,
    /// Sum of items.
    pub billed_total: Decimal,
    /// Sum of payments.
    pub paid_total: Decimal,
    /// `billed_total - paid_total`.
    pub balance: Decimal,
    /// Current status.
    pub status: InvoiceStatus,
    /// Generation time.
    pub created_at: DateTime<Utc>,
    /// Last change.
    pub updated_at: DateTime<Utc>,
    /// When the invoice was voided.
    pub voided_at: Option<DateTime<Utc>>,
}

impl From<invoices::Model> for InvoiceView {
    fn from(model: invoices::Model) -> Self {
        Self {
            id: InvoiceId::from_uuid(model.id),
            student_id: StudentId::from_uuid(model.student_id),
            class_label: model.class_label,
            period: model.period,
            billed_total: round_money(model.billed_total),
            paid_total: round_money(model.paid_total),
            balance: round_money(model.balance),
            status: model.status.into(),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            voided_at: model.voided_at.map(|at| at.with_timezone(&Utc)),
        }
    }
}

/// One line of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceItemView {
    /// Item id.
    pub id: InvoiceItemId,
    /// Fee head id.
    pub head_id: FeeHeadId,
    /// Head name at generation time.
    pub head_name: String,
    /// Amount billed.
    pub amount: Decimal,
}

impl From<invoice_items::Model> for InvoiceItemView {
    fn from(model: invoice_items::Model) -> Self {
        Self {
            id: InvoiceItemId::from_uuid(model.id),
            head_id: FeeHeadId::from_uuid(model.head_id),
            head_name: model.head_name,
            amount: round_money(model.amount),
        }
    }
}

/// Reads the stored totals of an invoice row.
pub(crate) fn totals_of(model: &invoices::Model) -> InvoiceTotals {
    InvoiceTotals {
        billed_total: model.billed_total,
        paid_total: model.paid_total,
        balance: model.balance,
        status: model.status.into(),
    }
}

/// Filter options for listing invoices.
#[derive(Debug, Clone, Default)]
pub struct InvoiceListFilter {
    /// Filter by class label.
    pub class_label: Option<String>,
    /// Filter by period.
    pub period: Option<BillingPeriod>,
    /// Filter by status.
    pub status: Option<InvoiceStatus>,
    /// Case-insensitive substring of the student's name or roll number.
    pub search: Option<String>,
}

/// An invoice row of a listing, joined with its student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceListItem {
    /// Invoice id.
    pub id: InvoiceId,
    /// Student id.
    pub student_id: StudentId,
    /// Student name.
    pub student_name: String,
    /// Student roll number.
    pub roll_number: String,
    /// Class label.
    pub class_label: String,
    /// `YYYY-MM`.
    pub period: String,
    /// Billed total.
    pub billed_total: Decimal,
    /// Paid total.
    pub paid_total: Decimal,
    /// Balance.
    pub balance: Decimal,
    /// Status.
    pub status: InvoiceStatus,
    /// Generation time.
    pub created_at: DateTime<Utc>,
}

/// A page of invoices with totals over the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceList {
    /// Rows of this page.
    pub items: Vec<InvoiceListItem>,
    /// Rows matching the filter.
    pub total: u64,
    /// Sum of billed totals over matching rows.
    pub billed_sum: Decimal,
    /// Sum of paid totals over matching rows.
    pub paid_sum: Decimal,
    /// Sum of balances over matching rows.
    pub balance_sum: Decimal,
    /// Page size applied.
    pub limit: u64,
    /// Offset applied.
    pub offset: u64,
}

#[derive(Debug, FromQueryResult)]
struct InvoiceListRow {
    id: Uuid,
    student_id: Uuid,
    student_name: String,
    roll_number: String,
    class_label: String,
    period: String,
    billed_total: Decimal,
    paid_total: Decimal,
    balance: Decimal,
    status: String,
    created_at: chrono::DateTime<chrono::FixedOffset>,
}

#[derive(Debug, FromQueryResult)]
struct InvoiceListTotalsRow {
    total: i64,
    billed_sum: Decimal,
    paid_sum: Decimal,
    balance_sum: Decimal,
}

/// Escapes `LIKE` wildcards so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Builds the shared `WHERE` clause and its bind values.
fn list_conditions(filter: &InvoiceListFilter) -> (String, Vec<Value>) {
    let mut conditions = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(class_label) = &filter.class_label {
        values.push(class_label.clone().into());
        conditions.push(format!("i.class_label = ${}", values.len()));
    }
    if let Some(period) = &filter.period {
        values.push(period.to_string().into());
        conditions.push(format!("i.period = ${}", values.len()));
    }
    if let Some(status) = &filter.status {
        values.push(status.as_str().into());
        conditions.push(format!("i.status = CAST(${} AS invoice_status)", values.len()));
    }
    if let Some(search) = &filter.search {
        values.push(like_pattern(search).into());
        let n = values.len();
        conditions.push(format!("(s.name ILIKE ${n} OR s.roll_number ILIKE ${n})"));
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, values)
}

/// Invoice repository.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Generates (or regenerates) the invoices of a class for one period.
    ///
    /// Runs in a single transaction: either every student of the class is
    /// billed or nothing changes. Existing invoices keep their `paid_total`;
    /// their items are replaced and totals recomputed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An override head is unknown, inactive, duplicated or negative
    /// - There is no active head to bill
    /// - The class has no students
    /// - Database operation fails
    pub async fn generate_invoices(
        &self,
        plan: GenerationPlan,
    ) -> Result<GenerationSummary, InvoiceRepoError> {
        let txn = self.db.begin().await?;

        let available: Vec<FeeHeadInfo> = fee_heads::Entity::find()
            .order_by_asc(fee_heads::Column::Name)
            .all(&txn)
            .await?
            .into_iter()
            .map(head_info)
            .collect();
        let heads = HeadResolver::resolve(&available, plan.overrides.as_deref())?;
        let billed_total = HeadResolver::billed_total(&heads);

        let class_students = students::Entity::find()
            .filter(students::Column::ClassLabel.eq(plan.class_label.as_str()))
            .order_by_asc(students::Column::RollNumber)
            .all(&txn)
            .await?;
        if class_students.is_empty() {
            return Err(BillingError::NoStudents(plan.class_label).into());
        }

        let mut summary = GenerationSummary::default();
        for student in class_students {
            let created = Self::upsert_invoice(&txn, &plan, &student, &heads, billed_total).await?;
            if created {
                summary.created += 1;
            } else {
                summary.updated += 1;
            }
        }

        txn.commit().await?;

        info!(
            class = %plan.class_label,
            period = %plan.period,
            strategy = plan.strategy.as_str(),
            heads = heads.len(),
            created = summary.created,
            updated = summary.updated,
            "Invoices generated"
        );

        Ok(summary)
    }

    /// Writes one student's invoice. Returns true if it was created.
    async fn upsert_invoice(
        txn: &DatabaseTransaction,
        plan: &GenerationPlan,
        student: &students::Model,
        heads: &[ResolvedHead],
        billed_total: Decimal,
    ) -> Result<bool, InvoiceRepoError> {
        let now = Utc::now();
        let period = plan.period.to_string();

        let existing = invoices::Entity::find()
            .filter(invoices::Column::StudentId.eq(student.id))
            .filter(invoices::Column::Period.eq(period.as_str()))
            .lock_exclusive()
            .one(txn)
            .await?;

        let (invoice_id, created) = match existing {
            Some(invoice) => {
                let totals = InvoiceAggregator::recompute_from(
                    invoice.status.into(),
                    billed_total,
                    invoice.paid_total,
                );
                let invoice_id = invoice.id;
                let mut active: invoices::ActiveModel = invoice.into();
                active.class_label = Set(plan.class_label.clone());
                active.billed_total = Set(totals.billed_total);
                active.paid_total = Set(totals.paid_total);
                active.balance = Set(totals.balance);
                active.status = Set(totals.status.into());
                active.updated_at = Set(now.into());
                active.update(txn).await?;

                invoice_items::Entity::delete_many()
                    .filter(invoice_items::Column::InvoiceId.eq(invoice_id))
                    .exec(txn)
                    .await?;
                (invoice_id, false)
            }
            None => {
                let totals = InvoiceAggregator::new_invoice(billed_total);
                let invoice_id = InvoiceId::new().into_inner();
                invoices::ActiveModel {
                    id: Set(invoice_id),
                    student_id: Set(student.id),
                    class_label: Set(plan.class_label.clone()),
                    period: Set(period),
                    billed_total: Set(totals.billed_total),
                    paid_total: Set(totals.paid_total),
                    balance: Set(totals.balance),
                    status: Set(totals.status.into()),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                    voided_at: Set(None),
                }
                .insert(txn)
                .await
                .map_err(|e| match unique_violation(&e) {
                    Some(_) => InvoiceRepoError::Conflict {
                        student_id: StudentId::from_uuid(student.id),
                        period: plan.period,
                    },
                    None => e.into(),
                })?;
                (invoice_id, true)
            }
        };

        let items: Vec<invoice_items::ActiveModel> = heads
            .iter()
            .map(|head| invoice_items::ActiveModel {
                id: Set(InvoiceItemId::new().into_inner()),
                invoice_id: Set(invoice_id),
                head_id: Set(head.head_id.into_inner()),
                head_name: Set(head.name.clone()),
                amount: Set(head.amount),
                created_at: Set(now.into()),
            })
            .collect();
        invoice_items::Entity::insert_many(items).exec(txn).await?;

        Ok(created)
    }

    /// Lists invoices matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_invoices(
        &self,
        filter: &InvoiceListFilter,
        page: OffsetPage,
    ) -> Result<InvoiceList, InvoiceRepoError> {
        let backend = self.db.get_database_backend();
        let (where_clause, values) = list_conditions(filter);

        let totals_sql = format!(
            r"
SELECT
    COUNT(*) AS total,
    COALESCE(SUM(i.billed_total), 0) AS billed_sum,
    COALESCE(SUM(i.paid_total), 0) AS paid_sum,
    COALESCE(SUM(i.balance), 0) AS balance_sum
FROM invoices i
JOIN students s ON s.id = i.student_id
{where_clause}
"
        );
        let totals = InvoiceListTotalsRow::find_by_statement(Statement::from_sql_and_values(
            backend,
            totals_sql,
            values.clone(),
        ))
        .one(&self.db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("invoice totals returned no row".into()))?;

        let mut page_values = values;
        page_values.push(i64::try_from(page.limit).unwrap_or(i64::MAX).into());
        let limit_param = page_values.len();
        page_values.push(i64::try_from(page.offset).unwrap_or(i64::MAX).into());
        let offset_param = page_values.len();

        let rows_sql = format!(
            r"
SELECT
    i.id, i.student_id, s.name AS student_name, s.roll_number, i.class_label, i.period,
    i.billed_total, i.paid_total, i.balance, i.status::text AS status, i.created_at
FROM invoices i
JOIN students s ON s.id = i.student_id
{where_clause}
ORDER BY i.created_at DESC, s.name ASC, i.id ASC
LIMIT ${limit_param} OFFSET ${offset_param}
"
        );
        let rows = InvoiceListRow::find_by_statement(Statement::from_sql_and_values(
            backend,
            rows_sql,
            page_values,
        ))
        .all(&self.db)
        .await?;

        let items = rows
            .into_iter()
            .map(|row| {
                let status: InvoiceStatus = row
                    .status
                    .parse()
                    .map_err(|e: UnknownStatus| DbErr::Type(e.to_string()))?;
                Ok(InvoiceListItem {
                    id: InvoiceId::from_uuid(row.id),
                    student_id: StudentId::from_uuid(row.student_id),
                    student_name: row.student_name,
                    roll_number: row.roll_number,
                    class_label: row.class_label,
                    period: row.period,
                    billed_total: round_money(row.billed_total),
                    paid_total: round_money(row.paid_total),
                    balance: round_money(row.balance),
                    status,
                    created_at: row.created_at.with_timezone(&Utc),
                })
            })
            .collect::<Result<Vec<_>, DbErr>>()?;

        Ok(InvoiceList {
            items,
            total: totals.total.unsigned_abs(),
            billed_sum: round_money(totals.billed_sum),
            paid_sum: round_money(totals.paid_sum),
            balance_sum: round_money(totals.balance_sum),
            limit: page.limit,
            offset: page.offset,
        })
    }

    /// Voids an invoice that has no payments.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The invoice does not exist
    /// - The invoice is already void or has payments
    /// - Database operation fails
    pub async fn void_invoice(&self, invoice_id: InvoiceId) -> Result<InvoiceView, InvoiceRepoError> {
        let txn = self.db.begin().await?;

        let invoice = invoices::Entity::find_by_id(invoice_id.into_inner())
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(InvoiceError::NotFound(invoice_id))?;

        let totals = InvoiceAggregator::void(invoice_id, &totals_of(&invoice))?;

        let now = Utc::now();
        let mut active: invoices::ActiveModel = invoice.into();
        active.status = Set(totals.status.into());
        active.updated_at = Set(now.into());
        active.voided_at = Set(Some(now.into()));
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        info!(invoice_id = %invoice_id, "Invoice voided");

        Ok(updated.into())
    }
}
