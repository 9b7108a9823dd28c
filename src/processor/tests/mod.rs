//! Test modules for the report processor

pub mod error_handling;

use crate::config::VerifierConfig;
use crate::processor::ReportProcessor;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// Processor with default configuration
pub fn default_processor() -> ReportProcessor {
    ReportProcessor::new(VerifierConfig::default()).unwrap()
}

/// Cycler export with a preamble above the header row
pub const BATTERY_CSV: &str = "\
Cycler,Arbin BT2000
Cell,B-0042
Step,TIME,VOLTAGE,CURRENT,AH
1,0,12.60,2.50,0.00
2,1800,12.10,-5.25,1.40
3,3600,11.80,4.00,2.75
";

/// Plain text bench log mixing every line shape with noise
pub const BENCH_LOG: &str = "\
Bench run 2024-03-02, DUT serial 0042
GPS Lock --> Passed --> Lat:12.9 Lon:77.5
Firmware --> v2.3.1
12: CAN_BUS_LOAD: \"OK\"
Memory check is success
CAN Bus Test Failed
system nominal
";

/// Single-sheet cycler export: preamble row, header, three samples
pub const CYCLER_XLSX: &[u8] = include_bytes!("../../../tests/data/cycler_export.xlsx");

/// Build a PDF with one page per entry, each line drawn as its own text object
pub fn pdf_document(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 720 - 20 * i as i64;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new("Td", vec![72.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
