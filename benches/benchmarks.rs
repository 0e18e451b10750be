//! Criterion benchmarks for dbc-utils core operations.
//!
//! Benchmarks cover:
//! - Header parsing (DbcHeader::parse)
//! - Schema loading (xml::parse_schema_tree + Schema::from_tree)
//! - Full table decode (reader::decode) for plain and localized layouts
//! - SQL emission (sql::emit)

use byteorder::{ByteOrder, LittleEndian};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use dbc::wdbc::constants::*;
use dbc::wdbc::header::DbcHeader;
use dbc::wdbc::schema::Schema;
use dbc::wdbc::{reader, sql, xml};

// ---------------------------------------------------------------------------
// Synthetic file builders (mirrors integration test helpers)
// ---------------------------------------------------------------------------

const PLAIN_SCHEMA: &str = r#"<file>
    <name>Spell</name>
    <version>3.3.5a</version>
    <format>
        <primary>id</primary>
        <int>duration</int>
        <uint nullValues="0" refersTo="SpellIcon.id">icon</uint>
        <float>speed</float>
        <string>description</string>
    </format>
</file>"#;

const LOCALIZED_SCHEMA: &str = r#"<file>
    <name>ChrClasses</name>
    <version>3.3.5a</version>
    <format>
        <primary>id</primary>
        <localized_string>name</localized_string>
    </format>
</file>"#;

fn load(text: &str) -> Schema {
    let tree = xml::parse_schema_tree(text).unwrap();
    Schema::from_tree(&tree).unwrap()
}

/// Build a DBC file of `rows` records, each `columns` little-endian words
/// produced by `word(row, column)`.
fn build_dbc(rows: u32, columns: u32, pool: &[u8], word: impl Fn(u32, u32) -> u32) -> Vec<u8> {
    let record_size = columns * 4;
    let mut buf = vec![0u8; SIZE_DBC_HEADER + (rows * record_size) as usize];
    buf[..4].copy_from_slice(DBC_MAGIC);
    LittleEndian::write_u32(&mut buf[DBC_ROW_COUNT..], rows);
    LittleEndian::write_u32(&mut buf[DBC_COLUMN_COUNT..], columns);
    LittleEndian::write_u32(&mut buf[DBC_RECORD_SIZE..], record_size);
    LittleEndian::write_u32(&mut buf[DBC_STRING_BLOCK_SIZE..], pool.len() as u32);
    for row in 0..rows {
        for col in 0..columns {
            let at = SIZE_DBC_HEADER + (row * record_size + col * 4) as usize;
            LittleEndian::write_u32(&mut buf[at..], word(row, col));
        }
    }
    buf.extend_from_slice(pool);
    buf
}

const POOL: &[u8] = b"\0Fireball\0Hurls a fiery ball that causes Fire damage.\0";

fn plain_dbc(rows: u32) -> Vec<u8> {
    build_dbc(rows, 5, POOL, |row, col| match col {
        0 => row,
        2 => row % 3,
        3 => 1.5f32.to_bits(),
        4 => 10,
        _ => row * 100,
    })
}

fn localized_dbc(rows: u32) -> Vec<u8> {
    build_dbc(rows, 18, POOL, |row, col| match col {
        0 => row,
        1 | 3 => 1,
        17 => 0xFF01FE,
        _ => 0,
    })
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_header(c: &mut Criterion) {
    let data = plain_dbc(16);
    c.bench_function("header_parse", |b| {
        b.iter(|| DbcHeader::parse(black_box(&data)).unwrap())
    });
}

fn bench_schema(c: &mut Criterion) {
    c.bench_function("schema_load", |b| b.iter(|| load(black_box(PLAIN_SCHEMA))));
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let plain = load(PLAIN_SCHEMA);
    let localized = load(LOCALIZED_SCHEMA);

    for rows in [100u32, 10_000] {
        let data = plain_dbc(rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("plain", rows), &data, |b, data| {
            b.iter(|| reader::decode(&plain, black_box(data)).unwrap())
        });

        let data = localized_dbc(rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("localized", rows), &data, |b, data| {
            b.iter(|| reader::decode(&localized, black_box(data)).unwrap())
        });
    }
    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");
    let plain = load(PLAIN_SCHEMA);
    for rows in [100u32, 10_000] {
        let table = reader::decode(&plain, &plain_dbc(rows)).unwrap();
        group.throughput(Throughput::Elements(u64::from(rows)));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, table| {
            b.iter(|| sql::emit(black_box(table)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_header, bench_schema, bench_decode, bench_emit);
criterion_main!(benches);
