//! Migrations dispatch against a real HTTP server.

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tempfile::TempDir;

use gencli::application::services::{DispatchRequest, MigrationsService};
use gencli::application::ApplicationError;
use gencli::domain::{Command, Invocation};
use gencli::infrastructure::traits::ReqwestHttpClient;
use gencli::util::testing::{init_test_setup, write_project_config};

type Seen = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

fn spawn_server(app: Router) -> SocketAddr {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    rx.recv().unwrap()
}

fn recording_server(status: StatusCode) -> (SocketAddr, Seen) {
    let seen: Seen = Arc::default();
    let app = Router::new()
        .route(
            "/{task}",
            get(
                move |State(seen): State<Seen>,
                      Path(task): Path<String>,
                      Query(query): Query<HashMap<String, String>>| async move {
                    seen.lock().unwrap().push((task, query));
                    status
                },
            ),
        )
        .with_state(seen.clone());
    (spawn_server(app), seen)
}

fn project_with_port(port: u16) -> TempDir {
    let wd = TempDir::new().unwrap();
    write_project_config(
        wd.path(),
        "index.json",
        &format!(r#"{{"migrations": {{"serverPort": "{port}"}}}}"#),
    );
    wd
}

fn service(wd: &TempDir, timeout: Duration) -> MigrationsService {
    MigrationsService::new(
        Arc::new(ReqwestHttpClient::new(timeout)),
        "127.0.0.1",
        wd.path().join("config/index"),
    )
}

fn request(sub: &str, flags: &[(&str, &str)], wd: &TempDir) -> DispatchRequest {
    DispatchRequest {
        invocation: Invocation {
            command: Command::Migrations,
            sub_command: sub.to_string(),
        },
        flags: flags
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
        working_dir: wd.path().to_path_buf(),
    }
}

#[test]
fn given_server_returns_200_when_seeding_then_query_forwarded() {
    init_test_setup();
    let (addr, seen) = recording_server(StatusCode::OK);
    let wd = project_with_port(addr.port());

    service(&wd, Duration::from_secs(5))
        .run(&request(
            "seed",
            &[("seedFolder", "fixtures"), ("seedFile", "base"), ("unrelated", "x")],
            &wd,
        ))
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "seed");
    let expected: HashMap<String, String> = [
        ("seedFolder".to_string(), "fixtures".to_string()),
        ("seedFile".to_string(), "base".to_string()),
    ]
    .into();
    assert_eq!(seen[0].1, expected);
}

#[test]
fn given_absent_optional_arguments_when_syncing_then_no_query() {
    init_test_setup();
    let (addr, seen) = recording_server(StatusCode::OK);
    let wd = project_with_port(addr.port());

    service(&wd, Duration::from_secs(5))
        .run(&request("insertStaticData", &[], &wd))
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].0, "insertStaticData");
    assert!(seen[0].1.is_empty());
}

#[test]
fn given_server_returns_500_when_syncing_then_unexpected_status() {
    init_test_setup();
    let (addr, _) = recording_server(StatusCode::INTERNAL_SERVER_ERROR);
    let wd = project_with_port(addr.port());

    let err = service(&wd, Duration::from_secs(5))
        .run(&request("sync", &[], &wd))
        .unwrap_err();
    assert!(matches!(err, ApplicationError::UnexpectedStatus { code: 500 }));
}

#[test]
fn given_non_200_success_status_when_syncing_then_unexpected_status() {
    init_test_setup();
    let (addr, _) = recording_server(StatusCode::NO_CONTENT);
    let wd = project_with_port(addr.port());

    let err = service(&wd, Duration::from_secs(5))
        .run(&request("generateBackup", &[], &wd))
        .unwrap_err();
    assert_eq!(err.to_string(), "Execution error: unexpected status code 204");
}

#[test]
fn given_slow_server_when_syncing_then_times_out() {
    init_test_setup();
    let app = Router::new().route(
        "/{task}",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            StatusCode::OK
        }),
    );
    let addr = spawn_server(app);
    let wd = project_with_port(addr.port());

    let err = service(&wd, Duration::from_secs(1))
        .run(&request("sync", &[], &wd))
        .unwrap_err();
    assert!(
        matches!(err, ApplicationError::Transport { .. }),
        "unexpected error: {err}"
    );
}
