use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;
use tdv_processor::analyzers::ClimateAnalyzer;
use tdv_processor::readers::{IngestStats, ObservationReader};
use tempfile::NamedTempFile;

fn write_tdv_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write temp file");
    }
    file
}

#[test]
fn test_single_file_end_to_end() {
    let file = write_tdv_file(&[
        "TN\t1420000000000\tdn2kqyvvu2qp\t50.0\t0.0\t40.0\t1.0\t101000.0\t283.0",
        "TN\t1420003600000\tdn2kqyvvu2qp\t48.0\t1.0\t60.0\t0.0\t101500.0\t293.15",
        "WA\t1420007200000\tc22zsvz1bg36\t70.0\t1.0\t80.0\t0.0\t99800.0\t263.15",
    ]);

    let reader = ObservationReader::new();
    let mut analyzer = ClimateAnalyzer::new();
    let stats = reader.ingest_file(file.path(), &mut analyzer).unwrap();

    assert_eq!(stats.records_ingested, 3);
    assert_eq!(stats.malformed_lines, 0);
    assert_eq!(analyzer.total_records(), 3);
    assert_eq!(analyzer.region_codes(), ["TN", "WA"]);

    let tennessee = analyzer.region("TN").unwrap();
    assert_eq!(tennessee.record_count, 2);
    assert_eq!(tennessee.lightning_strikes, 1);
    assert_eq!(tennessee.snow_records, 1);
    assert!((tennessee.average_humidity() - 49.0).abs() < 1e-9);
    // 283.0 K is 49.73 F, 293.15 K is 68.0 F
    assert!((tennessee.min_temperature - 49.73).abs() < 0.01);
    assert!((tennessee.max_temperature - 68.0).abs() < 0.01);

    let washington = analyzer.region("WA").unwrap();
    assert_eq!(washington.record_count, 1);
    // 263.15 K is 14.0 F
    assert!((washington.max_temperature - 14.0).abs() < 0.01);

    let report = analyzer.report();
    assert!(report.starts_with("States found: TN WA\n"));
    assert!(report.contains("-- State: TN --"));
    assert!(report.contains("-- State: WA --"));
    assert!(report.contains("Number of Records: 2"));
    assert!(report.contains("Average Humidity: 49.0%"));
}

#[test]
fn test_multiple_files_merge_regions() {
    let first = write_tdv_file(&[
        "TN\t1420000000000\tdn2kqyvvu2qp\t50.0\t0.0\t40.0\t0.0\t101000.0\t283.0",
        "WA\t1420003600000\tc22zsvz1bg36\t70.0\t0.0\t80.0\t0.0\t99800.0\t263.15",
    ]);
    let second = write_tdv_file(&[
        "WA\t1420007200000\tc22zsvz1bg36\t72.0\t1.0\t90.0\t1.0\t99850.0\t265.0",
        "OR\t1420010800000\tc20g82p3bubh\t65.0\t0.0\t75.0\t0.0\t100100.0\t270.0",
    ]);

    let reader = ObservationReader::new();
    let mut analyzer = ClimateAnalyzer::new();
    let mut totals = IngestStats::default();

    totals.merge(&reader.ingest_file(first.path(), &mut analyzer).unwrap());
    totals.merge(&reader.ingest_file(second.path(), &mut analyzer).unwrap());

    assert_eq!(totals.records_ingested, 4);
    assert_eq!(analyzer.total_records(), 4);
    assert_eq!(analyzer.region_codes(), ["TN", "WA", "OR"]);

    // WA accumulates across both files
    let washington = analyzer.region("WA").unwrap();
    assert_eq!(washington.record_count, 2);
    assert_eq!(washington.snow_records, 1);
    assert_eq!(washington.lightning_strikes, 1);
}

#[test]
fn test_malformed_lines_are_counted_and_skipped() {
    let file = write_tdv_file(&[
        "TN\t1420000000000\tdn2kqyvvu2qp\t50.0\t0.0\t40.0\t0.0\t101000.0\t283.0",
        "not a tdv line",
        "TN\t1420003600000\tdn2kqyvvu2qp",
        "TN\t1420007200000\tdn2kqyvvu2qp\tdamp\t0.0\t40.0\t0.0\t101000.0\t283.0",
        "WA\t1420010800000\tc22zsvz1bg36\t70.0\t0.0\t80.0\t0.0\t99800.0\t263.15",
    ]);

    let reader = ObservationReader::new();
    let mut analyzer = ClimateAnalyzer::new();
    let stats = reader.ingest_file(file.path(), &mut analyzer).unwrap();

    assert_eq!(stats.records_ingested, 2);
    assert_eq!(stats.malformed_lines, 3);
    assert_eq!(analyzer.total_records(), 2);
    assert_eq!(analyzer.region_codes(), ["TN", "WA"]);
}

#[test]
fn test_malformed_only_file_then_good_file() {
    let bad = write_tdv_file(&["garbage", "TN\t1420000000000"]);
    let good = write_tdv_file(&[
        "CO\t1420000000000\t9xj64j1zcqrn\t30.0\t1.0\t20.0\t0.0\t84000.0\t266.0",
    ]);

    let reader = ObservationReader::new();
    let mut analyzer = ClimateAnalyzer::new();

    let bad_stats = reader.ingest_file(bad.path(), &mut analyzer).unwrap();
    assert_eq!(bad_stats.records_ingested, 0);
    assert_eq!(bad_stats.malformed_lines, 2);
    assert!(analyzer.is_empty());

    let good_stats = reader.ingest_file(good.path(), &mut analyzer).unwrap();
    assert_eq!(good_stats.records_ingested, 1);
    assert_eq!(analyzer.region_codes(), ["CO"]);
}

#[test]
fn test_missing_file_is_an_error() {
    let reader = ObservationReader::new();
    let mut analyzer = ClimateAnalyzer::new();
    let result = reader.ingest_file(Path::new("/nonexistent/run.tdv"), &mut analyzer);

    assert!(result.is_err());
    assert!(analyzer.is_empty());
}

#[test]
fn test_mmap_path_matches_buffered() {
    let file = write_tdv_file(&[
        "TN\t1420000000000\tdn2kqyvvu2qp\t50.0\t0.0\t40.0\t1.0\t101000.0\t283.0",
        "TN\t1420003600000\tdn2kqyvvu2qp\t48.0\t1.0\t60.0\t0.0\t101500.0\t293.15",
        "WA\t1420007200000\tc22zsvz1bg36\t70.0\t1.0\t80.0\t0.0\t99800.0\t263.15",
        "malformed",
    ]);

    let mut buffered = ClimateAnalyzer::new();
    let buffered_stats = ObservationReader::new()
        .ingest_file(file.path(), &mut buffered)
        .unwrap();

    let mut mapped = ClimateAnalyzer::new();
    let mapped_stats = ObservationReader::with_mmap(true)
        .ingest_file(file.path(), &mut mapped)
        .unwrap();

    assert_eq!(buffered_stats.records_ingested, mapped_stats.records_ingested);
    assert_eq!(buffered_stats.malformed_lines, mapped_stats.malformed_lines);
    assert_eq!(buffered.report(), mapped.report());
}

#[test]
fn test_report_lists_regions_in_discovery_order() {
    let file = write_tdv_file(&[
        "AZ\t1420000000000\t9tbqhyw0hv2g\t20.0\t0.0\t10.0\t0.0\t92000.0\t290.0",
        "NM\t1420003600000\t9whpjw1ys9rn\t25.0\t0.0\t15.0\t0.0\t85000.0\t288.0",
        "AZ\t1420007200000\t9tbqhyw0hv2g\t22.0\t0.0\t12.0\t0.0\t92100.0\t291.0",
        "CO\t1420010800000\t9xj64j1zcqrn\t30.0\t0.0\t20.0\t0.0\t84000.0\t280.0",
    ]);

    let reader = ObservationReader::new();
    let mut analyzer = ClimateAnalyzer::new();
    reader.ingest_file(file.path(), &mut analyzer).unwrap();

    assert!(analyzer.report().starts_with("States found: AZ NM CO\n"));
}
