mod common;

use anyhow::Result;
use massage_admin::config::AppConfig;
use massage_admin::routes::{menu, navigate, Navigation, RouteTable};
use massage_admin::{FileStore, Role, SessionGate, SessionStore, Verdict};

#[test]
fn guarded_navigation_across_role_changes() -> Result<()> {
    let dir = common::temp_config_dir()?;
    let table = RouteTable::standard(&AppConfig::default().routes);
    let mut gate = SessionGate::new(FileStore::in_dir(&dir));

    // Before startup finishes nothing is trusted
    assert_eq!(
        navigate(&mut gate, &table, "/customers")?,
        Navigation::Redirect { to: "/login".to_string(), verdict: Verdict::RedirectToLogin }
    );

    gate.initialize()?;
    gate.login("tok-staff", Role::Staff)?;
    assert_eq!(
        navigate(&mut gate, &table, "/customers")?,
        Navigation::Redirect { to: "/".to_string(), verdict: Verdict::RedirectToDefault }
    );
    assert_eq!(menu(&mut gate, &table)?.len(), 1);

    gate.login("tok-admin", Role::Admin)?;
    assert!(matches!(navigate(&mut gate, &table, "/customers")?, Navigation::Render(_)));

    // Another process wipes the session file
    FileStore::in_dir(&dir).clear_all()?;
    assert_eq!(
        navigate(&mut gate, &table, "/customers")?,
        Navigation::Redirect { to: "/login".to_string(), verdict: Verdict::RedirectToLogin }
    );

    std::fs::remove_dir_all(dir)?;
    Ok(())
}
