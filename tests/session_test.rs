use plotpick::error::{FailureKind, SessionError, UserInputError};
use plotpick::request::DatasetHandle;
use plotpick::results::{DisplayUnit, GraphOutcome, NO_DATA_TEXT};
use plotpick::session::{Phase, SessionState};
use serde_json::json;

mod common;
use common::{sample_csv, FakeBackend, Reply};

fn session_with_dataset() -> (tempfile::TempDir, SessionState) {
    let (dir, path) = sample_csv();
    let mut session = SessionState::new();
    session
        .set_dataset(DatasetHandle::open(&path).unwrap())
        .unwrap();
    (dir, session)
}

#[test]
fn test_fetch_then_generate_end_to_end() {
    let backend = FakeBackend::happy();
    let (_dir, mut session) = session_with_dataset();

    assert_eq!(session.fetch_catalog(&backend).unwrap(), 3);
    assert_eq!(session.phase(), Phase::Composing);
    assert_eq!(session.file_id(), Some("42"));
    assert_eq!(session.columns(), ["Region", "Age", "Sales"]);
    assert_eq!(
        session.catalog()[2].columns,
        vec!["Age".to_string(), "Sales".to_string()]
    );

    let first = session.add_selection();
    session.update_selection(first, "Bar Chart (Region vs Sales)").unwrap();
    let second = session.add_selection();
    session.update_selection(second, "Histogram (Age)").unwrap();

    assert_eq!(session.generate(&backend).unwrap(), 2);
    assert_eq!(session.phase(), Phase::Composing);
    assert!(session.generated_at().is_some());

    assert_eq!(
        backend.last_graphs().unwrap(),
        json!([
            {"graph_type": "Bar Chart", "columns_selected": {"x_axis": "Region", "y_axis": "Sales"}},
            {"graph_type": "Histogram", "columns_selected": {"x_axis": "Age", "y_axis": null}}
        ])
    );

    let units = session.display_units();
    assert_eq!(units.len(), 2);
    match &units[0] {
        DisplayUnit::Chart(card) => {
            assert_eq!(card.title, "Bar Chart");
            assert_eq!(card.axis_text(), "X-Axis: Region | Y-Axis: Sales");
            assert_eq!(card.alt_text, "Bar Chart Graph");
        }
        other => panic!("expected a chart, got {:?}", other),
    }
    assert_eq!(
        units[1],
        DisplayUnit::Failed {
            message: "Column 'Weight' not found".to_string()
        }
    );
}

#[test]
fn test_no_dataset_never_reaches_backend() {
    let backend = FakeBackend::happy();
    let mut session = SessionState::new();

    let err = session.fetch_catalog(&backend).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Input(UserInputError::NoDataset)
    ));
    assert_eq!(err.kind(), FailureKind::UserInput);
    assert_eq!(backend.catalog_calls(), 0);
    assert_eq!(session.phase(), Phase::Idle);
}

#[test]
fn test_empty_selection_list_never_reaches_backend() {
    let backend = FakeBackend::happy();
    let (_dir, mut session) = session_with_dataset();
    session.fetch_catalog(&backend).unwrap();

    let err = session.generate(&backend).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Input(UserInputError::NoSelections)
    ));
    assert_eq!(backend.generate_calls(), 0);
    assert_eq!(session.phase(), Phase::Composing);
}

#[test]
fn test_generate_before_catalog_is_rejected() {
    let backend = FakeBackend::happy();
    let (_dir, mut session) = session_with_dataset();
    session.add_selection();

    let err = session.generate(&backend).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Input(UserInputError::CatalogNotLoaded)
    ));
    assert_eq!(backend.generate_calls(), 0);
}

#[test]
fn test_empty_slot_is_sent_as_blank_graph() {
    let backend = FakeBackend::happy();
    let (_dir, mut session) = session_with_dataset();
    session.fetch_catalog(&backend).unwrap();
    session.add_selection();

    session.generate(&backend).unwrap();
    assert_eq!(
        backend.last_graphs().unwrap(),
        json!([{"graph_type": "", "columns_selected": {"x_axis": "", "y_axis": null}}])
    );
}

#[test]
fn test_busy_rejects_second_request() {
    let (_dir, mut session) = session_with_dataset();
    let request = session.begin_catalog_fetch().unwrap();
    assert_eq!(request.file.file_name(), "sales.csv");
    assert!(session.is_busy());

    let err = session.begin_catalog_fetch().unwrap_err();
    assert_eq!(err.kind(), FailureKind::Busy);
    let err = session.begin_generate().unwrap_err();
    assert_eq!(err.kind(), FailureKind::Busy);

    let (_other_dir, other) = sample_csv();
    let err = session
        .set_dataset(DatasetHandle::open(&other).unwrap())
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Busy);
}

#[test]
fn test_semantic_generate_failure_keeps_previous_results() {
    let backend = FakeBackend::happy();
    let (_dir, mut session) = session_with_dataset();
    session.fetch_catalog(&backend).unwrap();
    let slot = session.add_selection();
    session.update_selection(slot, "Histogram (Age)").unwrap();
    session.generate(&backend).unwrap();
    let before: Vec<GraphOutcome> = session.results().unwrap().to_vec();

    backend.set_generate(Reply::Json(json!({"error": "No file uploaded."})));
    let err = session.generate(&backend).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Semantic);
    assert!(err.to_string().contains("No file uploaded."));
    assert_eq!(session.results().unwrap(), before.as_slice());
    assert_eq!(session.phase(), Phase::Composing);
}

#[test]
fn test_transport_failure_keeps_catalog() {
    let backend = FakeBackend::happy();
    let (_dir, mut session) = session_with_dataset();
    session.fetch_catalog(&backend).unwrap();

    backend.set_catalog(Reply::Network("connection refused".into()));
    let err = session.fetch_catalog(&backend).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Transport);
    assert_eq!(session.catalog().len(), 3);
    assert_eq!(session.phase(), Phase::Composing);
}

#[test]
fn test_failed_first_fetch_returns_to_idle() {
    let backend = FakeBackend::new(
        Reply::Json(json!({"error": "Unsupported file format"})),
        Reply::Json(json!({"graphs": []})),
    );
    let (_dir, mut session) = session_with_dataset();

    let err = session.fetch_catalog(&backend).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Semantic);
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.catalog().is_empty());
}

#[test]
fn test_refetch_clears_results_but_keeps_selections() {
    let backend = FakeBackend::happy();
    let (_dir, mut session) = session_with_dataset();
    session.fetch_catalog(&backend).unwrap();
    let slot = session.add_selection();
    session.update_selection(slot, "Histogram (Age)").unwrap();
    session.generate(&backend).unwrap();
    assert!(session.results().is_some());

    session.fetch_catalog(&backend).unwrap();
    assert!(session.results().is_none());
    assert_eq!(session.selections().len(), 1);
}

#[test]
fn test_empty_results_render_placeholder() {
    let backend = FakeBackend::new(
        Reply::Json(common::sample_catalog()),
        Reply::Json(json!({"graphs": []})),
    );
    let (_dir, mut session) = session_with_dataset();
    session.fetch_catalog(&backend).unwrap();
    session.add_selection();
    assert_eq!(session.generate(&backend).unwrap(), 0);

    let units = session.display_units();
    assert_eq!(units, vec![DisplayUnit::NoData]);
    assert_eq!(units[0].lines(), vec![NO_DATA_TEXT.to_string()]);
}
