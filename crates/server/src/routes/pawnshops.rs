//! Pawnshop intake route handlers.
//!
//! The intake form posts flat, hyphenated inputs. Several of them are
//! conditional follow-ups to another choice (an "other" purpose, a flexi
//! duration, bank details), and they are folded into the record's text
//! fields here before the record reaches the store.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use ngantri_core::{IntakeRecord, IntakeRecordId, NewIntakeRecord};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{OptionalStaff, RequireStaff};
use crate::models::CurrentStaff;
use crate::state::AppState;

/// Purpose choice whose text comes from the free-form "other" input.
const PURPOSE_OTHER: &str = "Lain-lain";

/// Loan amount choice whose value comes from the requested-amount input.
const LOAN_AMOUNT_REQUEST: &str = "Permintaan";

// =============================================================================
// Form Types
// =============================================================================

/// Raw intake form inputs.
///
/// Every input is optional on the wire; missing ones become empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IntakeForm {
    pub nama_lengkap: String,
    pub asal_barang_jaminan: String,
    pub status_transaksi: String,
    pub tujuan_transaksi: String,
    pub tujuan_transaksi_lain_lain: String,
    pub cara_pembayaran: String,
    pub fitur_yang_diinginkan: String,
    pub lama_fleksi: String,
    pub pengambilan_uang_nama_bank: String,
    pub pengambilan_uang_no_rek: String,
    pub pengambilan_uang_an: String,
    pub kelebihan_lelang: String,
    pub top_up_tabungan_emas_nama_bank: String,
    pub top_up_tabungan_emas_no_rek: String,
    pub top_up_tabungan_emas_an: String,
    pub besar_pinjaman: String,
    pub besar_pinjaman_permintaan: String,
    pub barang_jaminan: String,
    pub alamat: String,
    pub nomor_hp: String,
}

impl IntakeForm {
    /// Transaction purpose, replaced by the "other" text when it applies.
    #[must_use]
    pub fn transaction_purpose(&self) -> String {
        if self.tujuan_transaksi == PURPOSE_OTHER || !self.tujuan_transaksi_lain_lain.is_empty() {
            self.tujuan_transaksi_lain_lain.clone()
        } else {
            self.tujuan_transaksi.clone()
        }
    }

    /// Desired feature, suffixed with the flexi duration when one is given.
    #[must_use]
    pub fn desired_feature(&self) -> String {
        if self.lama_fleksi.is_empty() {
            self.fitur_yang_diinginkan.clone()
        } else {
            format!("{} {}", self.fitur_yang_diinginkan, self.lama_fleksi)
        }
    }

    /// Bank account the loan is paid out to.
    #[must_use]
    pub fn disbursement(&self) -> String {
        bank_details(
            &self.pengambilan_uang_no_rek,
            &self.pengambilan_uang_an,
            &self.pengambilan_uang_nama_bank,
        )
    }

    /// Auction surplus choice followed by the gold savings top-up account.
    #[must_use]
    pub fn auction_surplus(&self) -> String {
        format!(
            "{} Top Up Tabungan Emas: {}",
            self.kelebihan_lelang,
            bank_details(
                &self.top_up_tabungan_emas_no_rek,
                &self.top_up_tabungan_emas_an,
                &self.top_up_tabungan_emas_nama_bank,
            )
        )
    }

    /// Loan amount, spelling out the requested sum when one was asked for.
    #[must_use]
    pub fn loan_amount(&self) -> String {
        if self.besar_pinjaman == LOAN_AMOUNT_REQUEST {
            format!("Permintaan sebesar {}", self.besar_pinjaman_permintaan)
        } else {
            self.besar_pinjaman.clone()
        }
    }

    /// Fold the raw inputs into a record ready for the store.
    #[must_use]
    pub fn into_record(self) -> NewIntakeRecord {
        NewIntakeRecord {
            transaction_purpose: Some(self.transaction_purpose()),
            desired_feature: Some(self.desired_feature()),
            disbursement: Some(self.disbursement()),
            auction_surplus: Some(self.auction_surplus()),
            loan_amount: Some(self.loan_amount()),
            full_name: self.nama_lengkap,
            collateral_origin: Some(self.asal_barang_jaminan),
            transaction_status: Some(self.status_transaksi),
            payment_method: self.cara_pembayaran,
            collateral_item: self.barang_jaminan,
            address: self.alamat,
            phone: self.nomor_hp,
        }
    }
}

fn bank_details(account_number: &str, holder: &str, bank: &str) -> String {
    format!("Nomor Rekening: {account_number}, Atas Nama: {holder}, Bank: {bank}")
}

// =============================================================================
// Templates
// =============================================================================

/// Intake form page template.
#[derive(Template, WebTemplate)]
#[template(path = "pawnshops/form.html")]
pub struct FormTemplate {
    pub staff: Option<CurrentStaff>,
}

/// Intake record list template.
#[derive(Template, WebTemplate)]
#[template(path = "pawnshops/list.html")]
pub struct ListTemplate {
    pub staff: Option<CurrentStaff>,
    pub records: Vec<RecordRow>,
}

/// Intake record detail template.
#[derive(Template, WebTemplate)]
#[template(path = "pawnshops/detail.html")]
pub struct DetailTemplate {
    pub staff: Option<CurrentStaff>,
    pub record: IntakeRecord,
    pub submitted_at: String,
}

/// One row of the intake list.
pub struct RecordRow {
    pub id: IntakeRecordId,
    pub full_name: String,
    pub collateral_item: String,
    pub phone: String,
    pub submitted_at: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the intake form.
pub async fn form(OptionalStaff(staff): OptionalStaff) -> impl IntoResponse {
    FormTemplate { staff }
}

/// Store a submitted intake form and send the customer on to take a number.
#[instrument(skip(state, form))]
pub async fn process(
    State(state): State<AppState>,
    Form(form): Form<IntakeForm>,
) -> Result<Redirect> {
    state.pawnshops().add(&form.into_record()).await?;
    Ok(Redirect::to("/queues/request"))
}

/// List every intake record (staff only).
#[instrument(skip(state, staff))]
pub async fn index(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
) -> Result<ListTemplate> {
    let calendar = state.calendar();
    let records = state
        .pawnshops()
        .list()
        .await?
        .into_iter()
        .map(|record| RecordRow {
            id: record.id,
            submitted_at: calendar.local(record.created_at).format("%d-%m-%Y %H:%M").to_string(),
            full_name: record.full_name,
            collateral_item: record.collateral_item,
            phone: record.phone,
        })
        .collect();

    Ok(ListTemplate {
        staff: Some(staff),
        records,
    })
}

/// A record id that does not parse names no record.
fn parse_record_id(raw_id: &str) -> Result<IntakeRecordId> {
    raw_id
        .parse()
        .map(IntakeRecordId::new)
        .map_err(|_| AppError::NotFound(format!("intake record {raw_id}")))
}

/// Show one intake record (staff only).
#[instrument(skip(state, staff))]
pub async fn show(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(raw_id): Path<String>,
) -> Result<DetailTemplate> {
    let record = state.pawnshops().get(parse_record_id(&raw_id)?).await?;
    let submitted_at = state
        .calendar()
        .local(record.created_at)
        .format("%d-%m-%Y %H:%M")
        .to_string();

    Ok(DetailTemplate {
        staff: Some(staff),
        record,
        submitted_at,
    })
}
