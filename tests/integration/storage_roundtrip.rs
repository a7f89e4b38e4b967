#![allow(missing_docs)]

use std::fs::File;
use std::path::PathBuf;

use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tempfile::TempDir;
use widebench::{generate, ErrorKind, ParquetStore, ProjectionSpec, SyntheticTable, TableStore};

fn written_table(
    columns: usize,
    rows: usize,
    chunk_size: u64,
) -> (TempDir, PathBuf, SyntheticTable) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("table.parquet");
    let mut rng = ChaCha8Rng::seed_from_u64(0xBEEF);
    let table = generate(&mut rng, columns, rows).expect("generate");
    ParquetStore::new()
        .write(&table, &path, chunk_size)
        .expect("write");
    (dir, path, table)
}

#[test]
fn full_read_round_trips_schema_and_values() {
    let (_dir, path, table) = written_table(12, 777, 100);
    let read = ParquetStore::new().read(&path, None).expect("read").value;

    assert_eq!(read.num_columns(), 12);
    assert_eq!(read.num_rows(), 777);
    for (i, field) in read.schema().fields().iter().enumerate() {
        assert_eq!(field.name(), &format!("c_{i}"));
        assert_eq!(field.data_type(), &DataType::Float64);
        assert!(!field.is_nullable());
    }
    for i in 0..12 {
        assert_eq!(read.column(i), table.batch().column(i), "column {i}");
    }
}

#[test]
fn repeated_reads_yield_identical_tables() {
    let (_dir, path, _table) = written_table(8, 300, 64);
    let store = ParquetStore::new();
    let first = store.read(&path, None).expect("first").value;
    for _ in 0..3 {
        assert_eq!(store.read(&path, None).expect("again").value, first);
    }
    let projected = store.read(&path, Some(&[7, 2][..])).expect("projected").value;
    assert_eq!(
        store.read(&path, Some(&[7, 2][..])).expect("projected again").value,
        projected
    );
}

#[test]
fn projection_preserves_request_order_and_duplicates() {
    let (_dir, path, table) = written_table(10, 50, 20);
    let read = ParquetStore::new()
        .read(&path, Some(&[9, 0, 4, 0][..]))
        .expect("projected read")
        .value;

    assert_eq!(read.num_columns(), 4);
    let names: Vec<&str> = read
        .schema_ref()
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .collect();
    assert_eq!(names, vec!["c_9", "c_0", "c_4", "c_0"]);
    for (position, source) in [9usize, 0, 4, 0].into_iter().enumerate() {
        assert_eq!(read.column(position), table.batch().column(source));
    }
}

#[test]
fn reference_scenario_hundred_columns() {
    let (_dir, path, _table) = written_table(100, 5000, 1000);
    let store = ParquetStore::new();

    let metadata = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
        .unwrap()
        .metadata()
        .clone();
    assert_eq!(metadata.num_row_groups(), 5);
    for rg in metadata.row_groups() {
        assert!(rg.num_rows() <= 1000);
        for column in rg.columns() {
            assert!(column.dictionary_page_offset().is_none());
        }
    }

    let all = store.read(&path, None).expect("read all").value;
    assert_eq!((all.num_columns(), all.num_rows()), (100, 5000));

    let projected = store
        .read(&path, Some(ProjectionSpec::default().indices()))
        .expect("read projection")
        .value;
    assert_eq!(projected, all);
}

#[test]
fn projection_past_last_column_is_a_decode_error() {
    let (_dir, path, _table) = written_table(50, 10, 10);
    let err = ParquetStore::new()
        .read(&path, Some(ProjectionSpec::default().indices()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.to_string().contains("column index 50 out of range for 50 columns"));
}

#[test]
fn missing_artifact_is_an_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let err = ParquetStore::new()
        .read(&dir.path().join("absent.parquet"), None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn garbage_artifact_is_a_decode_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("garbage.parquet");
    std::fs::write(&path, b"not a parquet file").unwrap();
    let err = ParquetStore::new().read(&path, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn unwritable_artifact_is_an_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let table = generate(&mut rng, 2, 2).unwrap();
    let err = ParquetStore::new()
        .write(&table, &dir.path().join("missing").join("t.parquet"), 10)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn statistics_can_be_disabled() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("nostats.parquet");
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let table = generate(&mut rng, 3, 40).unwrap();
    ParquetStore::new()
        .with_statistics(false)
        .write(&table, &path, 10)
        .unwrap();

    let read = ParquetStore::new().read(&path, None).unwrap().value;
    assert_eq!(read.num_rows(), 40);
    for i in 0..3 {
        assert_eq!(read.column(i), table.batch().column(i));
    }
}
