mod common;

use anyhow::Result;
use massage_admin::session::{ROLE_KEY, TOKEN_KEY};
use massage_admin::{FileStore, Role, SessionError, SessionGate, SessionState, SessionStore};

#[test]
fn session_survives_restart() -> Result<()> {
    let dir = common::temp_config_dir()?;

    let mut first = SessionGate::new(FileStore::in_dir(&dir));
    first.initialize()?;
    first.login("tok-123", Role::Admin)?;
    drop(first);

    let mut restarted = SessionGate::new(FileStore::in_dir(&dir));
    restarted.initialize()?;
    assert!(restarted.is_authenticated()?);
    assert!(restarted.has_role(Role::Admin)?);
    assert!(!restarted.has_role(Role::Staff)?);

    std::fs::remove_dir_all(dir)?;
    Ok(())
}

#[test]
fn partial_file_is_cleared_on_startup() -> Result<()> {
    let dir = common::temp_config_dir()?;
    let store = FileStore::in_dir(&dir);
    store.set(TOKEN_KEY, "abc")?;

    let mut gate = SessionGate::new(store.clone());
    gate.initialize()?;

    assert_eq!(gate.state(), &SessionState::Anonymous);
    assert_eq!(store.get(TOKEN_KEY)?, None);
    assert_eq!(store.get(ROLE_KEY)?, None);
    assert!(!store.path().exists());

    std::fs::remove_dir_all(dir)?;
    Ok(())
}

#[test]
fn logout_in_one_process_is_seen_by_another() -> Result<()> {
    let dir = common::temp_config_dir()?;

    let mut tab_a = SessionGate::new(FileStore::in_dir(&dir));
    tab_a.initialize()?;
    tab_a.login("tok-123", Role::Admin)?;

    let mut tab_b = SessionGate::new(FileStore::in_dir(&dir));
    tab_b.initialize()?;
    assert!(tab_b.is_authenticated()?);

    tab_b.logout()?;

    assert!(!tab_a.is_authenticated()?);
    assert_eq!(tab_a.state(), &SessionState::Anonymous);
    assert!(!tab_a.has_role(Role::Admin)?);

    std::fs::remove_dir_all(dir)?;
    Ok(())
}

#[test]
fn corrupt_file_surfaces_store_error() -> Result<()> {
    let dir = common::temp_config_dir()?;
    let store = FileStore::in_dir(&dir);
    std::fs::write(store.path(), "{ not json")?;

    let mut gate = SessionGate::new(store);
    let err = gate.initialize().unwrap_err();
    assert!(matches!(err, SessionError::StoreUnavailable(_)));
    assert_eq!(gate.state(), &SessionState::Anonymous);

    std::fs::remove_dir_all(dir)?;
    Ok(())
}

#[test]
fn store_file_keeps_only_gate_keys() -> Result<()> {
    let dir = common::temp_config_dir()?;
    let store = FileStore::in_dir(&dir);

    let mut gate = SessionGate::new(store.clone());
    gate.initialize()?;
    gate.login("t1", Role::Admin)?;
    gate.login("t2", Role::Staff)?;

    let document = store.load()?;
    assert_eq!(document.entries.len(), 2);
    assert_eq!(document.entries.get(TOKEN_KEY).map(String::as_str), Some("t2"));
    assert_eq!(document.entries.get(ROLE_KEY).map(String::as_str), Some("staff"));

    gate.logout()?;
    assert!(store.load()?.entries.is_empty());

    std::fs::remove_dir_all(dir)?;
    Ok(())
}
