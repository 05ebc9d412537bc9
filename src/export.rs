//! 계산이 끝난 포집량 표를 입력 파일 옆에 `_OUTDATA.csv`로 내보낸다.

use std::path::{Path, PathBuf};

use crate::units::TimeUnit;
use crate::uptake::UptakeSeries;

/// 내보내기 오류.
#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Csv(e) => write!(f, "결과 csv 기록 오류: {e}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        ExportError::Csv(value)
    }
}

/// `<입력>.csv` → `<입력>_OUTDATA.csv`
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}_OUTDATA.csv"))
}

/// `<입력>.csv` → `<입력>.<ext>` (그림 파일 경로)
pub fn figure_path(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}

/// 주석이 달린 결과 표를 csv로 기록한다.
pub fn write_series(
    series: &UptakeSeries,
    time_unit: TimeUnit,
    path: &Path,
) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "Index",
        time_unit.axis_label(),
        "Pressure (psi)",
        "Pressure (bar)",
        "Cylinder volume (mL)",
        "Cylinder volume (L)",
        "Delta_V (L)",
        "Gas uptake (mol of gas)",
        "Gas uptake (mol of gas / mol of water)",
    ])?;
    for p in &series.points {
        writer.write_record([
            p.index.to_string(),
            format!("{:.6}", p.time),
            format!("{:.6}", p.pressure_psi),
            format!("{:.6}", p.pressure_bar),
            format!("{:.6}", p.volume_ml),
            format!("{:.6}", p.volume_l),
            format!("{:.6}", p.delta_v_l),
            format!("{:.8}", p.gas_mol),
            format!("{:.8}", p.uptake_per_mol_water),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
