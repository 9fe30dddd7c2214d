//! Intake record storage against `PostgreSQL`.
//!
//! Ignored by default; set `NGANTRI_TEST_DATABASE_URL` and run with
//! `--ignored`.

#![allow(clippy::unwrap_used)]

use ngantri_core::{IntakeRecordId, NewIntakeRecord};
use ngantri_integration_tests::test_pool;
use ngantri_server::db::{PawnshopRepository, RepositoryError};
use ngantri_server::routes::pawnshops::IntakeForm;

fn sample() -> NewIntakeRecord {
    NewIntakeRecord {
        full_name: "Dewi Lestari".to_string(),
        collateral_origin: Some("Milik sendiri".to_string()),
        transaction_status: Some("Gadai baru".to_string()),
        transaction_purpose: Some("Modal usaha".to_string()),
        payment_method: "Transfer".to_string(),
        desired_feature: Some("Fleksi 30 hari".to_string()),
        disbursement: Some("Nomor Rekening: 123, Atas Nama: Dewi, Bank: BCA".to_string()),
        auction_surplus: None,
        loan_amount: Some("Permintaan sebesar 2.000.000".to_string()),
        collateral_item: "Cincin emas".to_string(),
        address: "Jl. Sudirman 5, Jakarta".to_string(),
        phone: "08111222333".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires NGANTRI_TEST_DATABASE_URL"]
async fn test_record_round_trips() {
    let pool = test_pool().await.unwrap();
    let store = PawnshopRepository::new(&pool);

    let submitted = sample();
    let stored = store.add(&submitted).await.unwrap();
    assert_eq!(stored.full_name, submitted.full_name);
    assert_eq!(stored.collateral_origin, submitted.collateral_origin);
    assert_eq!(stored.transaction_status, submitted.transaction_status);
    assert_eq!(stored.transaction_purpose, submitted.transaction_purpose);
    assert_eq!(stored.payment_method, submitted.payment_method);
    assert_eq!(stored.desired_feature, submitted.desired_feature);
    assert_eq!(stored.disbursement, submitted.disbursement);
    assert_eq!(stored.auction_surplus, submitted.auction_surplus);
    assert_eq!(stored.loan_amount, submitted.loan_amount);
    assert_eq!(stored.collateral_item, submitted.collateral_item);
    assert_eq!(stored.address, submitted.address);
    assert_eq!(stored.phone, submitted.phone);

    let fetched = store.get(stored.id).await.unwrap();
    assert_eq!(fetched, stored);
}

#[tokio::test]
#[ignore = "requires NGANTRI_TEST_DATABASE_URL"]
async fn test_list_contains_added_records_in_id_order() {
    let pool = test_pool().await.unwrap();
    let store = PawnshopRepository::new(&pool);

    let first = store.add(&sample()).await.unwrap();
    let second = store.add(&sample()).await.unwrap();
    assert!(second.id > first.id);

    let ids: Vec<_> = store.list().await.unwrap().iter().map(|r| r.id).collect();
    let first_pos = ids.iter().position(|id| *id == first.id).unwrap();
    let second_pos = ids.iter().position(|id| *id == second.id).unwrap();
    assert!(first_pos < second_pos);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
#[ignore = "requires NGANTRI_TEST_DATABASE_URL"]
async fn test_missing_record_is_not_found() {
    let pool = test_pool().await.unwrap();
    let store = PawnshopRepository::new(&pool);

    let result = store.get(IntakeRecordId::new(i32::MAX)).await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
#[ignore = "requires NGANTRI_TEST_DATABASE_URL"]
async fn test_submitted_form_is_stored_merged() {
    let pool = test_pool().await.unwrap();
    let store = PawnshopRepository::new(&pool);

    let form = IntakeForm {
        nama_lengkap: "Rudi".to_string(),
        tujuan_transaksi: "Lain-lain".to_string(),
        tujuan_transaksi_lain_lain: "Biaya berobat".to_string(),
        besar_pinjaman: "Permintaan".to_string(),
        besar_pinjaman_permintaan: "750.000".to_string(),
        ..IntakeForm::default()
    };

    let stored = store.add(&form.into_record()).await.unwrap();
    let fetched = store.get(stored.id).await.unwrap();
    assert_eq!(fetched.transaction_purpose.as_deref(), Some("Biaya berobat"));
    assert_eq!(
        fetched.loan_amount.as_deref(),
        Some("Permintaan sebesar 750.000")
    );
}
