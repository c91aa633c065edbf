#![cfg(test)]

use std::sync::Arc;

use tempfile::tempdir;

use crate::component_system::loader::ComponentRegistry;
use crate::execution::error::ExecutionError;
use crate::initialization::plan::read_plan;
use crate::kernel::bootstrap::Framing;
use crate::kernel::error::Error;
use crate::tests::integration::common::{write_component, Behavior, CallLog, MockComponent};

/// Registry serving a mock for every `<dir>/<folder>/index.js` under `base`.
fn registry(base: &std::path::Path, components: &[(&str, MockComponent)]) -> Arc<ComponentRegistry> {
    let mut registry = ComponentRegistry::new();
    for (relative, component) in components {
        registry
            .register(base.join(relative).join("index.js"), component.clone())
            .unwrap();
    }
    Arc::new(registry)
}

#[tokio::test]
async fn test_discover_and_run_every_root() {
    let temp = tempdir().unwrap();
    let base = temp.path();
    write_component(&base.join("components"), "server", "server", &["session-store"]);
    write_component(&base.join("components"), "session-store", "session-store", &["shared"]);
    write_component(&base.join("components"), "real-time-comm", "real-time-comm", &["shared"]);
    write_component(&base.join("framing_modules"), "shared", "shared", &[]);

    let log = CallLog::new();
    let loader = registry(
        base,
        &[
            ("components/server", MockComponent::new("server", &log).with_hook()),
            (
                "components/session-store",
                MockComponent::new("session-store", &log).behavior(Behavior::ReadyLater),
            ),
            (
                "components/real-time-comm",
                MockComponent::new("real-time-comm", &log).behavior(Behavior::Deferred),
            ),
            ("framing_modules/shared", MockComponent::new("shared", &log).behavior(Behavior::ReadyLater)),
        ],
    );

    let mut framing = Framing::new();
    framing.set_base_dir(base).set_loader(loader);
    let report = framing.run(None).await.expect("run succeeds");

    assert_eq!(report.len(), 4);
    assert_eq!(log.count("init:shared"), 1);
    assert!(log.position("init:shared") < log.position("init:session-store"));
    assert!(log.position("init:session-store") < log.position("init:server"));
    assert!(log.position("init:shared") < log.position("init:real-time-comm"));
    assert_eq!(log.events().last().map(String::as_str), Some("hook:server"));
}

#[tokio::test]
async fn test_run_single_entry_point() {
    let temp = tempdir().unwrap();
    let base = temp.path();
    write_component(&base.join("components"), "web", "web", &["store"]);
    write_component(&base.join("components"), "worker", "worker", &["store"]);
    write_component(&base.join("components"), "store", "store", &[]);

    let log = CallLog::new();
    let loader = registry(
        base,
        &[
            ("components/web", MockComponent::new("web", &log)),
            ("components/worker", MockComponent::new("worker", &log)),
            ("components/store", MockComponent::new("store", &log)),
        ],
    );

    let mut framing = Framing::new();
    framing
        .set_base_dir(base)
        .search_modules_directories(false)
        .set_loader(loader);
    let report = framing.run(Some("worker")).await.unwrap();

    assert_eq!(report.initialized, vec!["store", "worker"]);
    assert_eq!(log.count("init:web"), 0);
}

#[tokio::test]
async fn test_failed_run_reports_component() {
    let temp = tempdir().unwrap();
    let base = temp.path();
    write_component(&base.join("components"), "app", "app", &["db"]);
    write_component(&base.join("components"), "db", "db", &[]);

    let log = CallLog::new();
    let loader = registry(
        base,
        &[
            ("components/app", MockComponent::new("app", &log)),
            ("components/db", MockComponent::new("db", &log).behavior(Behavior::Fail("refused".into()))),
        ],
    );

    let mut framing = Framing::new();
    framing.set_base_dir(base).set_loader(loader);
    let err = framing.run(None).await.unwrap_err();

    let aggregate = match err {
        Error::Execution(ExecutionError::Initialization(aggregate)) => aggregate,
        other => panic!("expected an initialization error, got {:?}", other),
    };
    assert_eq!(aggregate.report(), "db::db\n  refused\n");
    assert_eq!(aggregate.stranded, vec!["app"]);
}

#[tokio::test]
async fn test_plan_round_trip_runs() {
    let temp = tempdir().unwrap();
    let base = temp.path();
    write_component(&base.join("components"), "app", "app", &["db"]);
    write_component(&base.join("components"), "db", "db", &[]);

    let log = CallLog::new();
    let loader = registry(
        base,
        &[
            ("components/app", MockComponent::new("app", &log)),
            ("components/db", MockComponent::new("db", &log)),
        ],
    );

    let mut framing = Framing::new();
    framing.set_base_dir(base).set_loader(loader);

    let mut plan = Vec::new();
    framing.write_plan(None, &mut plan).await.unwrap();
    let path = read_plan(plan.as_slice()).unwrap();
    assert_eq!(path.names(), vec!["db", "app"]);

    let report = framing.run_path(&path).await.unwrap();
    assert_eq!(report.initialized, vec!["db", "app"]);
}
