// Integration tests for local account and emergency contact storage

use pulse_vital::core::account::{login, register, Registration};
use pulse_vital::core::store::{EMERGENCY_KEY, USER_KEY};
use pulse_vital::core::{EmergencyContact, LocalStore};
use pulse_vital::PulseError;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> LocalStore {
    LocalStore::open(dir.path().join("store.json"))
}

#[test]
fn test_register_then_login_from_fresh_handle() {
    let dir = TempDir::new().unwrap();
    register(
        &store_in(&dir),
        &Registration {
            name: "Gerardo".to_string(),
            email: "gerardo@example.com".to_string(),
            age: "41".to_string(),
            password: "pulse".to_string(),
        },
    )
    .unwrap();

    let user = login(&store_in(&dir), "gerardo@example.com", "pulse").unwrap();
    assert_eq!(user.name, "Gerardo");
}

#[test]
fn test_records_use_fixed_keys() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store
        .save_emergency_contact(&EmergencyContact {
            name: "Ana".to_string(),
            relationship: "Sister".to_string(),
            phone: "555-123-4567".to_string(),
        })
        .unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains(EMERGENCY_KEY));
    assert!(!raw.contains(USER_KEY));
}

#[test]
fn test_logout_then_login_fails() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    register(
        &store,
        &Registration {
            name: "A".to_string(),
            email: "a@b.co".to_string(),
            age: "20".to_string(),
            password: "x".to_string(),
        },
    )
    .unwrap();

    assert!(store.clear_user().unwrap());
    assert!(matches!(login(&store, "a@b.co", "x"), Err(PulseError::Auth(_))));
}
