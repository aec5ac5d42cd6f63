//! End-to-end batch over files on disk.

#![allow(clippy::unwrap_used)]

use img_triage_adapters::FsImageSource;
use img_triage_core::{Analyzer, NoProgress, Pipeline, QualityConfig};
use img_triage_test_support::SyntheticImageBuilder;

#[test]
fn test_batch_over_directory() {
    let temp = tempfile::tempdir().unwrap();
    let images = [
        ("01_sharp.png", SyntheticImageBuilder::sharp_image()),
        ("02_black.png", SyntheticImageBuilder::underexposed_image()),
        ("03_ramp.png", SyntheticImageBuilder::color_ramp(64, 64)),
    ];
    for (name, info) in &images {
        info.image.save(temp.path().join(name)).unwrap();
    }
    std::fs::write(temp.path().join("04_corrupt.png"), b"garbage").unwrap();

    let source = FsImageSource::new(vec![temp.path().to_path_buf()], false);
    let analyzer = Analyzer::new(QualityConfig::default()).unwrap();
    let outcome = Pipeline::new(analyzer).run(&source, &NoProgress);

    assert_eq!(outcome.skipped, 1);
    let report = outcome.report;
    let rows = report.rows();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].image.ends_with("01_sharp.png"));
    assert!(!rows[0].verdict.blur);
    assert!(rows[1].verdict.low_brightness);
    assert!(!rows[2].verdict.grayscale);
    assert_eq!(report.counters().total, 3);
}
