// Array lifecycle tests against the filesystem engine: create, open in
// both modes, is-open tracking, close, and schema round-trips.

use lattice_array::{Array, OpenOptions};
use lattice_core::{
    ArrayType, Attribute, Datatype, Dimension, Domain, Encryption, EngineConfig, OpenMode,
    SchemaOptions,
};
use lattice_engine::{Context, EngineError};

fn quickstart_schema(sparse: bool) -> lattice_core::ArraySchema {
    let domain = Domain::new(vec![
        Dimension::new("rows", (1, 4), 4, Datatype::Int32).unwrap(),
        Dimension::new("cols", (1, 4), 4, Datatype::Int32).unwrap(),
    ])
    .unwrap();
    lattice_core::ArraySchema::new(
        domain,
        vec![
            Attribute::new("a", Datatype::Int32).unwrap(),
            Attribute::new("b", Datatype::Int32).unwrap(),
        ],
        SchemaOptions {
            sparse,
            ..SchemaOptions::default()
        },
    )
    .unwrap()
}

fn fs_ctx() -> Context {
    Context::new(EngineConfig::default()).unwrap()
}

#[tokio::test]
async fn test_create_then_open_read() {
    let dir = tempfile::tempdir().unwrap();
    let uri = dir.path().join("dense").to_string_lossy().to_string();
    let ctx = fs_ctx();

    Array::create(&uri, &quickstart_schema(false), Encryption::None, &ctx)
        .await
        .unwrap();

    let mut array = Array::open(&uri, "r", OpenOptions::default(), &ctx)
        .await
        .unwrap();
    assert!(array.is_open().unwrap());
    assert_eq!(array.mode(), OpenMode::Read);
    assert_eq!(array.uri(), uri);

    array.close().unwrap();
    assert!(!array.is_open().unwrap());
}

#[tokio::test]
async fn test_schema_roundtrips_through_create_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let uri = dir.path().join("sparse").to_string_lossy().to_string();
    let ctx = fs_ctx();

    Array::create(&uri, &quickstart_schema(true), Encryption::None, &ctx)
        .await
        .unwrap();

    let array = Array::open(&uri, "r", OpenOptions::default(), &ctx)
        .await
        .unwrap();
    let schema = array.schema().unwrap();
    assert_eq!(schema.array_type(), ArrayType::Sparse);
    assert_eq!(schema.attribute_count(), 2);
    assert_eq!(schema.domain().ndim(), 2);
    assert_eq!(schema.domain().dimensions()[0].name(), "rows");
}

#[tokio::test]
async fn test_mode_string_parsing_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let uri = dir.path().join("modes").to_string_lossy().to_string();
    let ctx = fs_ctx();

    Array::create(&uri, &quickstart_schema(false), Encryption::None, &ctx)
        .await
        .unwrap();

    for mode in ["r", "", "x"] {
        let mut array = Array::open(&uri, mode, OpenOptions::default(), &ctx)
            .await
            .unwrap();
        assert_eq!(array.mode(), OpenMode::Read, "mode string {mode:?}");
        array.close().unwrap();
    }

    for mode in ["w", "write"] {
        let mut array = Array::open(&uri, mode, OpenOptions::default(), &ctx)
            .await
            .unwrap();
        assert_eq!(array.mode(), OpenMode::Write, "mode string {mode:?}");
        array.close().unwrap();
    }
}

#[tokio::test]
async fn test_close_invalidates_cached_schema() {
    let dir = tempfile::tempdir().unwrap();
    let uri = dir.path().join("cache").to_string_lossy().to_string();
    let ctx = fs_ctx();

    Array::create(&uri, &quickstart_schema(false), Encryption::None, &ctx)
        .await
        .unwrap();

    let mut array = Array::open(&uri, "r", OpenOptions::default(), &ctx)
        .await
        .unwrap();
    assert!(array.schema().is_some());
    array.close().unwrap();
    assert!(array.schema().is_none());
}

#[tokio::test]
async fn test_double_close_reports_engine_error() {
    let dir = tempfile::tempdir().unwrap();
    let uri = dir.path().join("double").to_string_lossy().to_string();
    let ctx = fs_ctx();

    Array::create(&uri, &quickstart_schema(false), Encryption::None, &ctx)
        .await
        .unwrap();

    let mut array = Array::open(&uri, "r", OpenOptions::default(), &ctx)
        .await
        .unwrap();
    array.close().unwrap();
    match array.close() {
        Err(EngineError::Engine(message)) => {
            assert!(message.contains("not open"), "unexpected: {message}")
        }
        other => panic!("expected Engine error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reopen_requires_a_fresh_open() {
    let dir = tempfile::tempdir().unwrap();
    let uri = dir.path().join("reopen").to_string_lossy().to_string();
    let ctx = fs_ctx();

    Array::create(&uri, &quickstart_schema(false), Encryption::None, &ctx)
        .await
        .unwrap();

    let mut first = Array::open(&uri, "r", OpenOptions::default(), &ctx)
        .await
        .unwrap();
    first.close().unwrap();

    let second = Array::open(&uri, "w", OpenOptions::default(), &ctx)
        .await
        .unwrap();
    assert!(second.is_open().unwrap());
    assert_eq!(second.mode(), OpenMode::Write);
}

#[tokio::test]
async fn test_create_on_existing_uri_fails() {
    let dir = tempfile::tempdir().unwrap();
    let uri = dir.path().join("exists").to_string_lossy().to_string();
    let ctx = fs_ctx();

    Array::create(&uri, &quickstart_schema(false), Encryption::None, &ctx)
        .await
        .unwrap();
    match Array::create(&uri, &quickstart_schema(false), Encryption::None, &ctx).await {
        Err(EngineError::Engine(message)) => {
            assert!(message.contains("already exists"), "unexpected: {message}")
        }
        other => panic!("expected Engine error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_open_missing_array_fails() {
    let dir = tempfile::tempdir().unwrap();
    let uri = dir.path().join("nowhere").to_string_lossy().to_string();
    let ctx = fs_ctx();

    match Array::open(&uri, "r", OpenOptions::default(), &ctx).await {
        Err(EngineError::Engine(message)) => {
            assert!(message.contains("does not exist"), "unexpected: {message}")
        }
        other => panic!("expected Engine error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_encryption_key_not_implemented() {
    let dir = tempfile::tempdir().unwrap();
    let uri = dir.path().join("enc").to_string_lossy().to_string();
    let ctx = fs_ctx();
    let key = Encryption::Aes256Gcm { key: vec![0; 32] };

    // Rejected regardless of whether the URI or schema would be valid.
    match Array::create(&uri, &quickstart_schema(false), key.clone(), &ctx).await {
        Err(EngineError::NotImplemented(_)) => {}
        other => panic!("expected NotImplemented, got {other:?}"),
    }

    let options = OpenOptions {
        encryption: key,
        ..OpenOptions::default()
    };
    match Array::open(&uri, "r", options, &ctx).await {
        Err(EngineError::NotImplemented(_)) => {}
        other => panic!("expected NotImplemented, got {other:?}"),
    }
}

#[tokio::test]
async fn test_attribute_filter_not_implemented() {
    let ctx = fs_ctx();
    let options = OpenOptions {
        attribute_filter: Some(vec!["a".to_string()]),
        ..OpenOptions::default()
    };
    match Array::open("anywhere", "r", options, &ctx).await {
        Err(EngineError::NotImplemented(what)) => {
            assert!(what.contains("attribute"), "unexpected: {what}")
        }
        other => panic!("expected NotImplemented, got {other:?}"),
    }
}
