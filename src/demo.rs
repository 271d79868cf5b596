//! Ready-made outputs used by the command-line tool

use std::path::{Path, PathBuf};

use crate::csv_data::read_csv;
use crate::error::{Error, Result};
use crate::export::SaveOptions;
use crate::figure::{Figure, Preset};
use crate::row;
use crate::stylesheet::HouseStyle;
use crate::table::Table;

/// Evenly spaced samples over `[start, end]`
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![start],
        _ => (0..count)
            .map(|i| start + (end - start) * i as f64 / (count - 1) as f64)
            .collect(),
    }
}

/// Write the sample chart and two sample tables into `out_dir`
pub fn write_example(out_dir: &Path, house: &HouseStyle) -> Result<Vec<PathBuf>> {
    let (mut figure, id) = Figure::single(Preset::Medium);
    let axes = figure.axes_mut(id)?;
    let x = linspace(0.0, 1.0, 100);
    for power in 1..=8 {
        let y: Vec<f64> = x.iter().map(|v| v.powi(power)).collect();
        axes.plot(&x, &y).label(format!("y = x^{}", power));
    }
    axes.set_xlabel("arbitrary units");

    let options = SaveOptions::new().with_house_style(house.clone());
    let mut written = figure.save(out_dir.join("example"), options)?;

    let mut simple = Table::new(out_dir.join("table"), ["column1", "column2"], "small");
    simple.add(["foo", "bar"]);
    simple.add(["baz", "bing"]);
    let files = simple.finish()?;
    written.extend([files.csv, files.html, files.js]);

    let mut grouped = Table::new(
        out_dir.join("headers"),
        vec![
            vec!["A".to_string()],
            vec!["B".to_string(), "Group 1".to_string()],
            vec!["C".to_string(), "Group 1".to_string()],
            vec!["D".to_string(), "Group 2".to_string()],
            vec!["E".to_string(), "Group 2".to_string()],
        ],
        "",
    );
    grouped.add(row![1, 2, 3, 4, 5]);
    grouped.add(row!["a", "b", "c", "d", "e"]);
    let files = grouped.finish()?;
    written.extend([files.csv, files.html, files.js]);

    Ok(written)
}

/// Plot every CSV column against the first one
pub fn plot_csv(
    csv: &Path,
    output: &Path,
    preset: Preset,
    has_header: bool,
    options: SaveOptions,
) -> Result<Vec<PathBuf>> {
    let data = read_csv(csv, has_header)?;
    let (x, series) = data
        .columns
        .split_first()
        .ok_or_else(|| Error::EmptyCsv(csv.to_path_buf()))?;

    let (mut figure, id) = Figure::single(preset);
    let axes = figure.axes_mut(id)?;
    for (index, ys) in series.iter().enumerate() {
        let line = axes.plot(x, ys);
        if let Some(label) = data.header.as_ref().and_then(|h| h.get(index + 1)) {
            line.label(label.clone());
        }
    }
    if let Some(label) = data.header.as_ref().and_then(|h| h.first()) {
        axes.set_xlabel(label.clone());
    }
    figure.save(output, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_csv_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("empty.csv");
        std::fs::write(&csv, "").unwrap();
        let result = plot_csv(
            &csv,
            &dir.path().join("chart.svg"),
            Preset::Small,
            false,
            SaveOptions::new(),
        );
        assert!(matches!(result, Err(Error::EmptyCsv(_))));
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
