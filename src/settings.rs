use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clathrate::ClathrateType;
use crate::eos::EosVariant;
use crate::plot::{OutputFormat, PlotType};
use crate::units::TimeUnit;

/// 실행당 한 번 읽는 실험 설정. settings.toml에 보관한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// 원시 csv 파일이 있는 폴더
    pub directory: PathBuf,
    /// 데이터 수집 주기 [ms] (LabVIEW에서 설정한 값)
    pub frequency_ms: u64,
    /// 실험 온도 [K]
    pub temperature_k: f64,
    /// 대상 기체 임계 온도 [K]
    pub tc_k: f64,
    /// 대상 기체 임계 압력 [bar]
    pub pc_bar: f64,
    /// 이심 인자 (Peng-Robinson에서만 사용)
    pub omega: f64,
    /// 시간축 단위 (h, m, s)
    pub time_unit: TimeUnit,
    /// 상태방정식 (rk, pr)
    pub eos: EosVariant,
    /// 실험에 사용한 물 질량 [g]
    pub water_mass_g: f64,
    /// 클라스레이트 구조 (그래프 주석선 전용)
    pub clathrate_type: ClathrateType,
    /// 그래프 종류 (line, scatter)
    pub plot_type: PlotType,
    /// 그림 파일 형식 (png, svg)
    pub output_format: OutputFormat,
    /// 그래프 제목(입력 파일명) 표시 여부
    pub include_title: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("./"),
            frequency_ms: 60_000,
            temperature_k: 276.3,
            tc_k: 304.1,
            pc_bar: 73.8,
            omega: 0.239,
            time_unit: TimeUnit::Hours,
            eos: EosVariant::RedlichKwong,
            water_mass_g: 30.0,
            clathrate_type: ClathrateType::SI,
            plot_type: PlotType::Line,
            output_format: OutputFormat::Png,
            include_title: true,
        }
    }
}

/// 첫 실행 시 생성하는 기본 설정 파일 내용. 기본값은 `Settings::default()`와 같다.
const DEFAULT_SETTINGS_TOML: &str = r#"# settings.toml — gas_uptake_toolbox 실험 설정
# 프로그램을 실행하는 폴더에 이 파일이 있어야 한다.

# 원시 csv 파일이 있는 폴더
directory = "./"

# 데이터 수집 주기 [ms] (LabVIEW에서 설정한 값)
frequency_ms = 60000

# 실험 온도 [K]
temperature_k = 276.3

# 대상 기체의 임계 온도 [K]
tc_k = 304.1

# 대상 기체의 임계 압력 [bar]
pc_bar = 73.8

# 이심 인자 (eos = "pr" 일 때만 사용)
omega = 0.239

# 시간축 단위 ("h", "m", "s")
time_unit = "h"

# 상태방정식 ("rk" = Redlich-Kwong, "pr" = Peng-Robinson)
eos = "rk"

# 실험에 사용한 물 질량 [g]
water_mass_g = 30.0

# 클라스레이트 구조 ("sI", "sII", "sH", "SCS-I", "TS-I", "HS-I", "none")
clathrate_type = "sI"

# 그래프 종류 ("line", "scatter")
plot_type = "line"

# 그림 파일 형식 ("png", "svg")
output_format = "png"

# 그래프 제목(입력 파일명) 표시 여부
include_title = true
"#;

/// 설정 로드/검증 시 발생 가능한 오류.
#[derive(Debug)]
pub enum SettingsError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 파싱 오류
    Parse(toml::de::Error),
    /// 0 이하이면 안 되는 값
    NonPositive { name: &'static str, value: f64 },
    /// 데이터 폴더가 존재하지 않음
    MissingDirectory(PathBuf),
    /// 설정 파일이 없어 기본 파일을 새로 만듦
    ScaffoldCreated(PathBuf),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "설정 파일 입출력 오류: {e}"),
            SettingsError::Parse(e) => write!(f, "설정 파싱 오류: {e}"),
            SettingsError::NonPositive { name, value } => {
                write!(f, "{name} 값은 양수여야 합니다 (입력: {value})")
            }
            SettingsError::MissingDirectory(p) => {
                write!(f, "지정한 데이터 폴더가 없습니다: {}", p.display())
            }
            SettingsError::ScaffoldCreated(p) => write!(
                f,
                "설정 파일이 없어 {} 을(를) 새로 만들었습니다. 값을 실험 조건에 맞게 수정한 뒤 다시 실행하세요.",
                p.display()
            ),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(value: std::io::Error) -> Self {
        SettingsError::Io(value)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(value: toml::de::Error) -> Self {
        SettingsError::Parse(value)
    }
}

impl Settings {
    /// 수치 조건을 검증한다. 실린더 물성은 EOS 단계에서 한 번 더 확인한다.
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_positive("frequency_ms", self.frequency_ms as f64)?;
        check_positive("temperature_k", self.temperature_k)?;
        check_positive("tc_k", self.tc_k)?;
        check_positive("pc_bar", self.pc_bar)?;
        check_positive("water_mass_g", self.water_mass_g)?;
        if !self.directory.is_dir() {
            return Err(SettingsError::MissingDirectory(self.directory.clone()));
        }
        Ok(())
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), SettingsError> {
    if value <= 0.0 {
        return Err(SettingsError::NonPositive { name, value });
    }
    Ok(())
}

/// settings.toml을 로드한다. 파일이 없으면 주석이 달린 기본 파일을 만들고
/// 사용자가 값을 검토하도록 중단한다 (설정값이 실험 조건에 종속적이라
/// 기본값으로 계속 진행하면 엉뚱한 결과가 나온다).
pub fn load_or_scaffold(path: &Path) -> Result<Settings, SettingsError> {
    if !path.exists() {
        fs::write(path, DEFAULT_SETTINGS_TOML)?;
        return Err(SettingsError::ScaffoldCreated(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaffold_template_matches_defaults() {
        let parsed: Settings = toml::from_str(DEFAULT_SETTINGS_TOML).expect("기본 템플릿 파싱");
        let defaults = Settings::default();
        assert_eq!(parsed.frequency_ms, defaults.frequency_ms);
        assert_eq!(parsed.temperature_k, defaults.temperature_k);
        assert_eq!(parsed.tc_k, defaults.tc_k);
        assert_eq!(parsed.pc_bar, defaults.pc_bar);
        assert_eq!(parsed.omega, defaults.omega);
        assert_eq!(parsed.time_unit, defaults.time_unit);
        assert_eq!(parsed.eos, defaults.eos);
        assert_eq!(parsed.clathrate_type, defaults.clathrate_type);
        assert_eq!(parsed.plot_type, defaults.plot_type);
        assert_eq!(parsed.output_format, defaults.output_format);
        assert_eq!(parsed.include_title, defaults.include_title);
    }

    #[test]
    fn non_positive_temperature_rejected() {
        let settings = Settings {
            temperature_k: 0.0,
            ..Settings::default()
        };
        match settings.validate() {
            Err(SettingsError::NonPositive { name, .. }) => assert_eq!(name, "temperature_k"),
            other => panic!("양수 검증이 동작해야 함: {other:?}"),
        }
    }
}
