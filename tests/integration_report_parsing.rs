//! Integration tests for report parsing through the public API
//!
//! These tests write realistic reports to disk and run them through the
//! processor the same way the CLI does.

use compliance_verifier::config::StandardMapping;
use compliance_verifier::{
    ExtractedRecord, Grid, KnowledgeTables, LineClassifier, ReportProcessor, ReportSummary,
    StandardsTable, TestOutcome, VerifierConfig, VerifierError, extract_battery_profile,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BENCH_REPORT: &str = "\
=== ECU Validation Bench ===
Operator: QA-2
GPS Lock --> Passed --> Lat:12.9 Lon:77.5
LTE Attach --> Failed --> no carrier after 90s
Flash CRC --> success after retry
1: CAN_WAKEUP: \"PASS\"
2: IMU_SELFTEST: \"FAIL\"
Watchdog is passed
CAN Bus Test Failed
Vibration Sweep Passed
end of log
";

/// Test parsing a mixed bench log from disk
///
/// Purpose: Validate every line shape plus standards enrichment end to end
#[test]
fn test_bench_report_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ecu_bench.log");
    fs::write(&path, BENCH_REPORT).unwrap();

    let processor = ReportProcessor::new(VerifierConfig::default()).unwrap();
    let report = processor.process_path(&path).unwrap();

    assert_eq!(report.records.len(), 8);
    assert_eq!(report.unmatched_lines, 3);

    let summary = ReportSummary::from_records(&report.records);
    assert_eq!(summary.passed.len(), 5);
    assert_eq!(summary.failed.len(), 3);
    assert!(summary.other.is_empty());

    let standards: Vec<_> = report
        .records
        .iter()
        .filter_map(|record| match record {
            ExtractedRecord::Test(test) => Some(test.standard_or_sentinel().to_string()),
            ExtractedRecord::Profile(_) => None,
        })
        .collect();
    assert_eq!(standards[0], "NMEA 0183");
    assert_eq!(standards[1], "Not found");
    assert_eq!(standards[3], "ISO 11898");
    assert_eq!(standards[7], "IEC 60068-2-6");
}

/// Test a cycler CSV export with preamble rows on disk
#[test]
fn test_battery_csv_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pack_cycle.csv");
    fs::write(
        &path,
        "Channel,4\n\
         Record,Time,Voltage,Current,Ah\n\
         1,00:00:00,48.20,0.00,0.000\n\
         2,00:30:00,47.10,-20.50,10.250\n\
         3,01:00:00,45.95,-21.75,20.500\n\
         4,01:00:05,OVL,-21.75,20.510\n",
    )
    .unwrap();

    let processor = ReportProcessor::new(VerifierConfig::default()).unwrap();
    let report = processor.process_path(&path).unwrap();

    assert_eq!(report.records.len(), 1);
    let ExtractedRecord::Profile(profile) = &report.records[0] else {
        panic!("Expected a battery profile record");
    };

    let details = profile.details();
    let rendered: Vec<(&str, &str)> = details
        .iter()
        .map(|(label, value)| (*label, value.as_str()))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("Duration", "01:00:00"),
            ("Start Voltage", "48.20"),
            ("End Voltage", "45.95"),
            ("Max Current", "21.75"),
            ("Total Capacity", "20.50"),
        ]
    );

    let json = serde_json::to_value(&report.records[0]).unwrap();
    assert_eq!(json["kind"], "profile");
    assert_eq!(json["test_name"], "Battery Charge/Discharge Profile");
    assert_eq!(json["details"]["Max Current"], "21.75");
}

/// Test a cycler workbook export checked in under tests/data
#[test]
fn test_battery_workbook_from_disk() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/cycler_export.xlsx");

    let processor = ReportProcessor::new(VerifierConfig::default()).unwrap();
    let report = processor.process_path(&path).unwrap();

    assert_eq!(report.records.len(), 1);
    let ExtractedRecord::Profile(profile) = &report.records[0] else {
        panic!("Expected a battery profile record");
    };
    assert_eq!(profile.duration, "01:00:00");
    assert_eq!(profile.start_voltage, 48.2);
    assert_eq!(profile.end_voltage, 45.95);
    assert_eq!(profile.max_current, 21.75);
    assert_eq!(profile.total_capacity, 20.5);
}

/// Test that a grid without the header falls back to line parsing
#[test]
fn test_grid_without_header_uses_line_fallback() {
    let grid: Grid = vec![
        vec!["Step".into(), "Result".into()],
        vec!["CAN Bus Test".into(), "Failed".into()],
    ];
    assert!(extract_battery_profile(&grid).is_none());

    let processor = ReportProcessor::new(VerifierConfig::default()).unwrap();
    let report = processor
        .process(b"Step,Result\nCAN Bus Test,Failed\n", "steps.csv")
        .unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].test_name(), "CAN Bus Test");
    assert_eq!(report.records[0].result_label(), "FAIL");
}

/// Test that substituting the standards table changes precedence
#[test]
fn test_injected_standards_precedence() {
    let line = "CAN Vibration Endurance Passed";

    let default = LineClassifier::new(StandardsTable::default()).unwrap();
    let record = default.classify_line(line).unwrap();
    assert_eq!(record.standard.as_deref(), Some("ISO 11898"));

    let vibration_first = LineClassifier::new(StandardsTable::new(vec![
        StandardMapping::new("vibration", "IEC 60068-2-6"),
        StandardMapping::new("can", "ISO 11898"),
    ]))
    .unwrap();
    let record = vibration_first.classify_line(line).unwrap();
    assert_eq!(record.standard.as_deref(), Some("IEC 60068-2-6"));
    assert_eq!(record.result, TestOutcome::Pass);
}

/// Test configuration and knowledge base files loaded from disk
#[test]
fn test_config_and_tables_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.json");
    let tables_path = temp_dir.path().join("tables.json");

    fs::write(
        &config_path,
        r#"{
            "standards": [{"keyword": "esd", "standard": "ISO 10605"}],
            "summary_fallback_phrase": null,
            "knowledge_base_path": "tables.json"
        }"#,
    )
    .unwrap();
    fs::write(
        &tables_path,
        r#"{
            "procedures": [{
                "key": "electrostatic discharge (esd) test",
                "name": "ESD Test",
                "standard": "Based on ISO 10605",
                "description": "Contact and air discharge."
            }],
            "components": [{
                "part_number": "PESD2CANFD27V-TR",
                "attributes": [["Manufacturer", "Nexperia"], ["Bus Type", "CAN"]]
            }]
        }"#,
    )
    .unwrap();

    let config = VerifierConfig::discover(Some(&config_path)).unwrap();
    let processor = ReportProcessor::new(config).unwrap();
    let report = processor
        .process(b"ESD Contact 8kV Passed\nTest Summary\n", "esd.txt")
        .unwrap();
    assert_eq!(report.records.len(), 1);
    match &report.records[0] {
        ExtractedRecord::Test(test) => assert_eq!(test.standard.as_deref(), Some("ISO 10605")),
        other => panic!("Expected test record, got {:?}", other),
    }

    let tables = KnowledgeTables::load(Some(&tables_path)).unwrap();
    assert_eq!(
        tables.procedures.find_procedure("esd").unwrap().name,
        "ESD Test"
    );
    assert!(tables.components.lookup("pesd2canfd27v-tr").is_some());
}

/// Test that a corrupt PDF surfaces one error and no records
#[test]
fn test_corrupt_pdf_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scan.pdf");
    fs::write(&path, b"\x00\x01 definitely not a pdf").unwrap();

    let processor = ReportProcessor::new(VerifierConfig::default()).unwrap();
    assert!(matches!(
        processor.process_path(&path),
        Err(VerifierError::Pdf(_))
    ));
}
