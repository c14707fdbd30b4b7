//! End-to-end node evaluation over real grid stream files
//!
//! Builds fixture streams in a temp directory and drives a `ReadNode`
//! through the pull-based evaluator the way a host would.

use std::path::Path;
use tempfile::TempDir;
use vdbread::{
    node, write_grids, AttrValue, CompressionMethod, Evaluated, Evaluator, Grid, GridClass,
    GridCollection, GridValueType, ReadNode, StreamMetadata, VdbError,
};

fn fixture_grids(names: &[&str]) -> GridCollection {
    let mut grids = GridCollection::new();
    for name in names {
        grids.push(Grid::new(
            *name,
            GridClass::FogVolume,
            GridValueType::Float,
            0.1,
            vec![0u8; 256],
        ));
    }
    grids
}

fn write_fixture(dir: &Path, file_name: &str, names: &[&str]) {
    let metadata = StreamMetadata::new().with_compression(CompressionMethod::Zstd);
    let bytes = write_grids(&fixture_grids(names), &metadata).unwrap();
    std::fs::write(dir.join(file_name), bytes).unwrap();
}

fn evaluator_for(template: &Path) -> Evaluator {
    let mut eval = Evaluator::new(Box::new(ReadNode::default()));
    eval.set_input(
        node::FILE_PATH,
        AttrValue::String(template.to_str().unwrap().to_string()),
    );
    eval
}

#[tokio::test]
async fn resolves_and_loads_sequence_frame() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "smoke.0007.vdb", &["density", "temperature", "vel"]);

    let mut eval = evaluator_for(&dir.path().join("smoke.0001.vdb"));
    eval.set_input(node::SEQUENCE, AttrValue::Boolean(true));
    eval.set_input(node::TIME, AttrValue::Frame(7.0));

    let resolved = eval.evaluate(node::RESOLVED_PATH).await.unwrap();
    match resolved.value() {
        Some(AttrValue::String(path)) => assert!(path.ends_with("smoke.0007.vdb")),
        other => panic!("unexpected resolved path: {:?}", other),
    }

    let grids = eval.evaluate(node::OUT_GRIDS).await.unwrap();
    match grids.value() {
        Some(AttrValue::Grids(g)) => {
            assert_eq!(g.len(), 3);
            assert_eq!(g.joined_names(), "density temperature vel");
        }
        other => panic!("unexpected grids output: {:?}", other),
    }

    // The name list is published as a side effect of the grids plug; the
    // node does not compute it on direct request.
    assert!(matches!(
        eval.output(node::GRID_NAMES),
        Some(AttrValue::String(s)) if s == "density temperature vel"
    ));
    assert!(matches!(
        eval.evaluate(node::GRID_NAMES).await.unwrap(),
        Evaluated::Unhandled
    ));
}

#[tokio::test]
async fn time_change_redirects_to_new_frame() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "smoke.0001.vdb", &["density"]);
    write_fixture(dir.path(), "smoke.0002.vdb", &["density", "heat"]);

    let mut eval = evaluator_for(&dir.path().join("smoke.0001.vdb"));
    eval.set_input(node::SEQUENCE, AttrValue::Boolean(true));
    eval.set_input(node::TIME, AttrValue::Frame(1.0));

    let first = eval.evaluate(node::OUT_GRIDS).await.unwrap();
    match first.value() {
        Some(AttrValue::Grids(g)) => assert_eq!(g.len(), 1),
        other => panic!("unexpected grids output: {:?}", other),
    }
    assert!(eval.is_clean(node::OUT_GRIDS));

    eval.set_input(node::TIME, AttrValue::Frame(2.0));
    assert!(!eval.is_clean(node::OUT_GRIDS));

    let second = eval.evaluate(node::OUT_GRIDS).await.unwrap();
    match second.value() {
        Some(AttrValue::Grids(g)) => assert_eq!(g.joined_names(), "density heat"),
        other => panic!("unexpected grids output: {:?}", other),
    }
}

#[tokio::test]
async fn non_sequence_template_loads_verbatim() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "static_cloud.vdb", &["density"]);

    let mut eval = evaluator_for(&dir.path().join("static_cloud.vdb"));
    eval.set_input(node::TIME, AttrValue::Frame(250.0));

    let resolved = eval.evaluate(node::RESOLVED_PATH).await.unwrap();
    match resolved.value() {
        Some(AttrValue::String(path)) => assert!(path.ends_with("static_cloud.vdb")),
        other => panic!("unexpected resolved path: {:?}", other),
    }

    let grids = eval.evaluate(node::OUT_GRIDS).await.unwrap();
    assert!(grids.value().is_some());
}

#[tokio::test]
async fn zero_grid_stream_leaves_outputs_unset() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "empty.vdb", &[]);

    let mut eval = evaluator_for(&dir.path().join("empty.vdb"));

    // A readable stream with zero grids is neither a value nor a failure;
    // both data outputs stay unset.
    let result = eval.evaluate(node::OUT_GRIDS).await.unwrap();
    assert!(matches!(result, Evaluated::Unset));
    assert!(eval.output(node::OUT_GRIDS).is_none());
    assert!(eval.output(node::GRID_NAMES).is_none());
    assert!(eval.is_clean(node::OUT_GRIDS));
}

#[tokio::test]
async fn missing_frame_file_is_a_failure() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path(), "smoke.0001.vdb", &["density"]);

    let mut eval = evaluator_for(&dir.path().join("smoke.0001.vdb"));
    eval.set_input(node::SEQUENCE, AttrValue::Boolean(true));
    eval.set_input(node::TIME, AttrValue::Frame(99.0));

    let result = eval.evaluate(node::OUT_GRIDS).await;
    assert!(matches!(result, Err(VdbError::Unreadable(_))));
    assert!(!eval.is_clean(node::OUT_GRIDS));

    // The resolved-path plug still answers; resolution itself never fails.
    let resolved = eval.evaluate(node::RESOLVED_PATH).await.unwrap();
    match resolved.value() {
        Some(AttrValue::String(path)) => assert!(path.ends_with("smoke.0099.vdb")),
        other => panic!("unexpected resolved path: {:?}", other),
    }
}

#[tokio::test]
async fn empty_template_is_a_failure() {
    let mut eval = Evaluator::new(Box::new(ReadNode::default()));

    let result = eval.evaluate(node::OUT_GRIDS).await;
    assert!(matches!(result, Err(VdbError::MissingInput(_))));

    // The resolved-path plug has no such guard.
    let resolved = eval.evaluate(node::RESOLVED_PATH).await.unwrap();
    assert!(matches!(
        resolved.value(),
        Some(AttrValue::String(s)) if s.is_empty()
    ));
}

#[tokio::test]
async fn unknown_plug_is_unhandled() {
    let mut eval = Evaluator::new(Box::new(ReadNode::default()));
    let result = eval.evaluate("visibility").await.unwrap();
    assert!(matches!(result, Evaluated::Unhandled));
}
