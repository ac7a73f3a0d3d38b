//! Integration tests for whole-sheet scanning on synthetic images.
//!
//! These exercise the full pipeline end to end: segmentation, bubble
//! location, scoring, decision, assembly, and annotation. Bubbles are
//! painted where the engine itself reports their rectangles, so the tests
//! stay valid if the calibrated geometry constants change.

use image::{Rgb, RgbImage};
use markscan::{Choice, QUESTION_COUNT, QuestionResult, Rect, ScanError, Scanner, scan_sheet};

fn white_sheet(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
}

fn paint_black(image: &mut RgbImage, rect: &Rect) {
    for y in rect.y0..rect.y1.min(image.height()) {
        for x in rect.x0..rect.x1.min(image.width()) {
            image.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }
}

/// Bubble rectangle the engine reports for (column, row, option) on a
/// blank sheet of the given size.
fn bubble_rect_on_blank(width: u32, height: u32, column: usize, row: usize, option: usize) -> Rect {
    let blank = white_sheet(width, height);
    let scan = scan_sheet(&blank).expect("blank sheet scans");
    scan.columns[column].rows[row].bubbles[option].rect
}

#[test]
fn test_blank_sheet_all_questions_blank() {
    let sheet = white_sheet(850, 1100);
    let scan = scan_sheet(&sheet).expect("scan succeeds");

    assert_eq!(scan.results.len(), QUESTION_COUNT);
    let numbers: Vec<u32> = scan.results.iter().map(|r| r.question_number).collect();
    assert_eq!(numbers, (1..=100).collect::<Vec<u32>>());
    assert!(scan.results.iter().all(|r| r.selected_option.is_none()));
}

#[test]
fn test_single_filled_bubble_detected() {
    let (w, h) = (850, 1100);
    // Option C of question 1 (column 0, row 0)
    let rect = bubble_rect_on_blank(w, h, 0, 0, 2);

    let mut sheet = white_sheet(w, h);
    paint_black(&mut sheet, &rect);
    let scan = scan_sheet(&sheet).expect("scan succeeds");

    assert_eq!(scan.results[0].question_number, 1);
    assert_eq!(scan.results[0].selected_option, Some(Choice::C));
    for result in &scan.results[1..] {
        assert_eq!(
            result.selected_option, None,
            "question {} unexpectedly marked",
            result.question_number
        );
    }
}

#[test]
fn test_filled_bubble_in_last_column() {
    let (w, h) = (850, 1100);
    // Column 3 uses the wide-label layout; question 76 is its first row
    let rect = bubble_rect_on_blank(w, h, 3, 0, 4);

    let mut sheet = white_sheet(w, h);
    paint_black(&mut sheet, &rect);
    let scan = scan_sheet(&sheet).expect("scan succeeds");

    assert_eq!(scan.results[75].question_number, 76);
    assert_eq!(scan.results[75].selected_option, Some(Choice::E));
    assert_eq!(
        scan.results.iter().filter(|r| r.selected_option.is_some()).count(),
        1
    );
}

#[test]
fn test_tie_goes_to_earlier_letter() {
    let (w, h) = (850, 1100);
    let rect_b = bubble_rect_on_blank(w, h, 0, 0, 1);
    let rect_d = bubble_rect_on_blank(w, h, 0, 0, 3);

    let mut sheet = white_sheet(w, h);
    paint_black(&mut sheet, &rect_b);
    paint_black(&mut sheet, &rect_d);
    let scan = scan_sheet(&sheet).expect("scan succeeds");

    assert_eq!(scan.results[0].selected_option, Some(Choice::B));
}

#[test]
fn test_short_image_falls_back_and_completes() {
    // Far too short for 20 projection peaks: the uniform fallback must
    // still deliver 25 bands per column and a complete result list
    let sheet = white_sheet(480, 420);
    let scan = scan_sheet(&sheet).expect("scan succeeds");

    assert_eq!(scan.results.len(), QUESTION_COUNT);
    for report in &scan.columns {
        assert_eq!(report.rows.len(), 25);
        for pair in report.rows.windows(2) {
            assert!(pair[0].band.y1 <= pair[1].band.y0);
        }
    }
}

#[test]
fn test_identical_input_identical_output() {
    let (w, h) = (850, 1100);
    let rect = bubble_rect_on_blank(w, h, 1, 10, 0);
    let mut sheet = white_sheet(w, h);
    paint_black(&mut sheet, &rect);

    let first = scan_sheet(&sheet).expect("scan succeeds");
    let second = scan_sheet(&sheet).expect("scan succeeds");

    assert_eq!(first.results, second.results);
    assert_eq!(first.annotated, second.annotated);
}

#[test]
fn test_invalid_image_rejected() {
    let tiny = white_sheet(20, 20);
    assert!(matches!(scan_sheet(&tiny), Err(ScanError::InvalidImage)));
}

#[test]
fn test_annotated_image_matches_input_dimensions() {
    let sheet = white_sheet(600, 800);
    let scan = scan_sheet(&sheet).expect("scan succeeds");
    assert_eq!(scan.annotated.dimensions(), sheet.dimensions());
}

#[test]
fn test_save_annotated_writes_file() {
    let sheet = white_sheet(480, 640);
    let scan = scan_sheet(&sheet).expect("scan succeeds");

    let path = std::env::temp_dir().join("markscan_annotated_test.png");
    scan.save_annotated(&path).expect("save succeeds");
    assert!(path.exists());
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_result_wire_format() {
    let blank = QuestionResult {
        question_number: 7,
        selected_option: None,
    };
    assert_eq!(
        serde_json::to_value(blank).unwrap(),
        serde_json::json!({ "numeropregunta": 7, "opcionseleccionada": null })
    );

    let marked = QuestionResult {
        question_number: 42,
        selected_option: Some(Choice::C),
    };
    assert_eq!(
        serde_json::to_value(marked).unwrap(),
        serde_json::json!({ "numeropregunta": 42, "opcionseleccionada": "C" })
    );
}

#[test]
fn test_custom_threshold_is_respected() {
    let (w, h) = (850, 1100);
    let rect = bubble_rect_on_blank(w, h, 0, 0, 0);
    let mut sheet = white_sheet(w, h);
    paint_black(&mut sheet, &rect);

    // An impossible threshold turns every row blank
    let strict = Scanner::with_config(markscan::ScanConfig {
        fill_accept_percent: 101.0,
        ..Default::default()
    });
    let scan = strict.scan(&sheet).expect("scan succeeds");
    assert!(scan.results.iter().all(|r| r.selected_option.is_none()));
}
