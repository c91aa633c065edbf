#![cfg(test)]

use std::sync::Arc;

use serde_json::json;
use tempfile::tempdir;

use crate::component_system::loader::ComponentRegistry;
use crate::kernel::bootstrap::Framing;
use crate::storage::config::ConfigData;
use crate::storage::provider::{ConfigComponent, FileConfigProvider};
use crate::storage::settings::FramingSettings;
use crate::tests::integration::common::{write_component, CallLog, MockComponent};

#[tokio::test]
async fn test_config_file_feeds_components() {
    let temp = tempdir().unwrap();
    let base = temp.path();
    let components = base.join("components");
    write_component(&components, "config", "config", &[]);
    write_component(&components, "test-component", "test-component", &[]);
    write_component(&components, "other", "other", &[]);

    let config_path = base.join("config.json");
    std::fs::write(&config_path, r#"{ "test-component": { "test": "test" } }"#).unwrap();
    let provider = FileConfigProvider::from_file(&config_path).await.unwrap();

    let log = CallLog::new();
    let test_component = MockComponent::new("test-component", &log).accepting_config();
    let other = MockComponent::new("other", &log).accepting_config();

    let mut registry = ComponentRegistry::new();
    registry
        .register(components.join("config/index.js"), ConfigComponent::new(provider))
        .unwrap();
    registry
        .register(components.join("test-component/index.js"), test_component.clone())
        .unwrap();
    registry
        .register(components.join("other/index.js"), other.clone())
        .unwrap();

    let settings_path = base.join("framing.json");
    std::fs::write(&settings_path, r#"{ "useConfig": true, "searchModulesDirectories": false }"#).unwrap();
    let mut settings = FramingSettings::from_file(&settings_path).await.unwrap();
    settings.base_dir = base.to_path_buf();

    let mut framing = Framing::from_settings(settings);
    framing.set_loader(Arc::new(registry));
    let report = framing.run(None).await.unwrap();

    assert_eq!(report.initialized.first().map(String::as_str), Some("config"));
    assert_eq!(
        test_component.configs(),
        vec![Some(ConfigData::new().with("test", json!("test")))]
    );
    assert_eq!(other.configs(), vec![Some(ConfigData::new())]);
}
