use tripsmith::config::{load_settings, resolve_state_root, save_settings, Settings};
use tripsmith::i18n::Language;

// Environment mutation is process-global; this file keeps all env-touching
// assertions in one test so nothing races.
#[test]
fn environment_overrides_win_over_the_settings_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut settings = Settings::default();
    settings.language = Language::Zh;
    settings.provider.api_base = "https://file.example/v1".to_string();
    save_settings(dir.path(), &settings).expect("save");

    std::env::set_var("TRIPSMITH_API_BASE", "https://env.example/v1");
    let loaded = load_settings(dir.path()).expect("load");
    std::env::remove_var("TRIPSMITH_API_BASE");

    assert_eq!(loaded.language, Language::Zh);
    assert_eq!(loaded.provider.api_base, "https://env.example/v1");

    std::env::set_var("TRIPSMITH_STATE_ROOT", dir.path());
    let root = resolve_state_root().expect("state root");
    std::env::remove_var("TRIPSMITH_STATE_ROOT");
    assert_eq!(root, dir.path());
}
