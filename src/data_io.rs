//! 원시 로그 파일 입출력: 폴더의 csv 목록 조회와 2열 (압력, 체적) 파싱.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};

use crate::uptake::RawSample;

/// 데이터 파일 처리 중 발생 가능한 오류.
#[derive(Debug)]
pub enum DataIoError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// csv 파싱 오류
    Csv(csv::Error),
    /// 폴더에 csv 파일이 없음
    NoCsvFiles(PathBuf),
    /// 파일에 샘플이 없음
    EmptyFile(PathBuf),
    /// 숫자 두 열로 해석할 수 없는 행
    BadRecord { line: usize, content: String },
}

impl std::fmt::Display for DataIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataIoError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            DataIoError::Csv(e) => write!(f, "csv 파싱 오류: {e}"),
            DataIoError::NoCsvFiles(dir) => {
                write!(f, "폴더에 csv 파일이 없습니다: {}", dir.display())
            }
            DataIoError::EmptyFile(p) => write!(f, "파일에 샘플이 없습니다: {}", p.display()),
            DataIoError::BadRecord { line, content } => {
                write!(f, "{line}행을 (압력, 체적) 숫자 쌍으로 읽을 수 없습니다: {content}")
            }
        }
    }
}

impl std::error::Error for DataIoError {}

impl From<std::io::Error> for DataIoError {
    fn from(value: std::io::Error) -> Self {
        DataIoError::Io(value)
    }
}

impl From<csv::Error> for DataIoError {
    fn from(value: csv::Error) -> Self {
        DataIoError::Csv(value)
    }
}

/// 폴더의 csv 파일 목록을 이름순으로 반환한다.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>, DataIoError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .collect();
    if files.is_empty() {
        return Err(DataIoError::NoCsvFiles(dir.to_path_buf()));
    }
    files.sort();
    Ok(files)
}

/// 헤더 없는 2열 로그 파일을 읽는다. LabVIEW 출력이 콤마 또는 공백으로
/// 구분되므로 첫 줄을 보고 구분자를 정한다.
pub fn read_samples(path: &Path) -> Result<Vec<RawSample>, DataIoError> {
    let content = fs::read_to_string(path)?;
    let delimiter = sniff_delimiter(&content);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut samples = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // 공백 구분 파일에서 연속 공백이 만드는 빈 필드는 무시한다.
        let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }
        let line = record.position().map_or(i + 1, |p| p.line() as usize);
        let bad = || DataIoError::BadRecord {
            line,
            content: record.iter().collect::<Vec<_>>().join(" "),
        };
        if fields.len() < 2 {
            return Err(bad());
        }
        let pressure_psi: f64 = fields[0].parse().map_err(|_| bad())?;
        let volume_ml: f64 = fields[1].parse().map_err(|_| bad())?;
        samples.push(RawSample {
            pressure_psi,
            volume_ml,
        });
    }

    if samples.is_empty() {
        return Err(DataIoError::EmptyFile(path.to_path_buf()));
    }
    Ok(samples)
}

fn sniff_delimiter(content: &str) -> u8 {
    match content.lines().find(|l| !l.trim().is_empty()) {
        Some(line) if line.contains(',') => b',',
        _ => b' ',
    }
}
