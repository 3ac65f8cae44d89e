use super::*;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = InvoiceId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
    assert_eq!(InvoiceId::from(uuid), id);
    assert_eq!(Uuid::from(id), uuid);
}

#[test]
fn test_typed_ids_are_time_ordered() {
    let first = PaymentId::new();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let second = PaymentId::new();
    assert!(first < second);
}

#[test]
fn test_typed_id_display_and_parse() {
    let id = StudentId::new();
    let parsed = StudentId::from_str(&id.to_string()).unwrap();
    assert_eq!(parsed, id);
    assert!(StudentId::from_str("not-a-uuid").is_err());
}

#[test]
fn test_typed_id_serializes_transparently() {
    let uuid = Uuid::new_v4();
    let id = FeeHeadId::from_uuid(uuid);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{uuid}\""));
}
