//! 파일 선택부터 그림/결과 내보내기까지 한 번의 실행 흐름을 담당한다.

use std::path::PathBuf;

use log::{info, warn};

use crate::data_io::{self, DataIoError};
use crate::eos::{self, EosError, EosResult, GasProperties};
use crate::export::{self, ExportError};
use crate::plot::{self, PlotError, PlotOptions, PlotType};
use crate::settings::{Settings, SettingsError};
use crate::ui_cli;
use crate::units;
use crate::uptake::{self, PipelineError, PipelineInput, UptakeSeries};

/// 실행 중 발생 가능한 오류. 복구는 하지 않고 어느 단계에서 실패했는지만 전달한다.
#[derive(Debug)]
pub enum AppError {
    /// 표준 입출력 오류
    Io(std::io::Error),
    /// 설정 로드/검증 오류
    Settings(SettingsError),
    /// 데이터 파일 오류
    DataIo(DataIoError),
    /// EOS 풀이 오류
    Eos(EosError),
    /// 파이프라인 오류
    Pipeline(PipelineError),
    /// 그래프 렌더링 오류
    Plot(PlotError),
    /// 결과 내보내기 오류
    Export(ExportError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Settings(e) => write!(f, "설정 오류: {e}"),
            AppError::DataIo(e) => write!(f, "데이터 파일 오류: {e}"),
            AppError::Eos(e) => write!(f, "상태방정식 풀이 오류: {e}"),
            AppError::Pipeline(e) => write!(f, "데이터 정제 오류: {e}"),
            AppError::Plot(e) => write!(f, "그래프 오류: {e}"),
            AppError::Export(e) => write!(f, "내보내기 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<SettingsError> for AppError {
    fn from(value: SettingsError) -> Self {
        AppError::Settings(value)
    }
}

impl From<DataIoError> for AppError {
    fn from(value: DataIoError) -> Self {
        AppError::DataIo(value)
    }
}

impl From<EosError> for AppError {
    fn from(value: EosError) -> Self {
        AppError::Eos(value)
    }
}

impl From<PipelineError> for AppError {
    fn from(value: PipelineError) -> Self {
        AppError::Pipeline(value)
    }
}

impl From<PlotError> for AppError {
    fn from(value: PlotError) -> Self {
        AppError::Plot(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        AppError::Export(value)
    }
}

/// 설정을 요약해 보여준다. 잘못 입력한 실험 조건을 실행 전에 눈으로 확인시키는 용도.
fn echo_settings(settings: &Settings, water_mol: f64) {
    info!("원시 csv 폴더: {}", settings.directory.display());
    info!("데이터 수집 주기: {} ms", settings.frequency_ms);
    info!("실험 온도: {} K", settings.temperature_k);
    info!(
        "임계 물성: Tc = {} K, Pc = {} bar, omega = {}",
        settings.tc_k, settings.pc_bar, settings.omega
    );
    info!("상태방정식: {:?}, 시간 단위: {:?}", settings.eos, settings.time_unit);
    info!(
        "물 질량: {} g ({water_mol:.4} mol), 클라스레이트: {:?}",
        settings.water_mass_g, settings.clathrate_type
    );
}

/// 한 개 파일에 대한 전체 실행 흐름.
/// `file_override`가 있으면 대화형 파일 선택을 건너뛴다.
pub fn run(settings: &Settings, file_override: Option<PathBuf>) -> Result<(), AppError> {
    let water_mol = uptake::water_mass_to_mol(settings.water_mass_g);
    echo_settings(settings, water_mol);

    // 1. 입력 파일 결정
    let input_file = match file_override {
        Some(f) => f,
        None => {
            let files = data_io::list_csv_files(&settings.directory)?;
            ui_cli::pick_file(&files)?
        }
    };

    // 2. 원시 샘플 읽기
    let samples = data_io::read_samples(&input_file)?;
    info!("샘플 {}개를 읽었습니다.", samples.len());

    // 3. 기준 압력(원시 0번 샘플)에서 z를 한 번 계산
    let reference_pressure_bar = units::psi_to_bar(samples[0].pressure_psi);
    info!(
        "기록된 기준 압력: {reference_pressure_bar:.4} bar — 의도한 실험 압력인지 확인하세요."
    );
    let gas = GasProperties {
        tc_k: settings.tc_k,
        pc_bar: settings.pc_bar,
        omega: settings.omega,
    };
    let eos_result = eos::solve(
        settings.eos,
        &gas,
        settings.temperature_k,
        reference_pressure_bar,
    )?;
    match eos_result {
        EosResult::RedlichKwong { z, rho_mol_per_l } => {
            info!("Redlich-Kwong: z = {z:.6}, rho = {rho_mol_per_l:.4} mol/L");
        }
        EosResult::PengRobinson {
            z,
            rho_mol_per_l,
            fugacity_coeff,
        } => {
            info!(
                "Peng-Robinson: z = {z:.6}, rho = {rho_mol_per_l:.4} mol/L, phi = {fugacity_coeff:.4}"
            );
        }
    }

    // 4. 포집량 계열 계산
    let series = uptake::process(&PipelineInput {
        samples: &samples,
        interval_ms: settings.frequency_ms,
        time_unit: settings.time_unit,
        temp_k: settings.temperature_k,
        z: eos_result.z(),
        water_mol,
    })?;
    info!("포집량 계열 {}점을 계산했습니다.", series.points.len());

    // 5. 선택적 구간 자르기
    let times = series.times();
    let series = match ui_cli::ask_trim_window(
        settings.time_unit,
        times[0],
        times[times.len() - 1],
    )? {
        Some((start, end)) => match series.trim_window(start, end) {
            Some(trimmed) => {
                info!("구간을 잘라 {}점이 남았습니다.", trimmed.points.len());
                trimmed
            }
            None => {
                warn!("지정한 구간에 샘플이 없어 전체 계열을 그대로 사용합니다.");
                series
            }
        },
        None => series,
    };

    // 6. 그래프 종류별 마무리 입력과 렌더링
    let (plot_series, line_width) = match settings.plot_type {
        PlotType::Line => (series.clone(), ui_cli::ask_line_width()?),
        PlotType::Scatter => {
            let dots = ui_cli::ask_scatter_dots(series.points.len())?;
            (series.downsample(dots), 2)
        }
    };

    let figure_file = export::figure_path(&input_file, settings.output_format.extension());
    plot::render(
        &plot_series,
        &figure_file,
        &PlotOptions {
            plot_type: settings.plot_type,
            format: settings.output_format,
            time_unit: settings.time_unit,
            clathrate: settings.clathrate_type,
            title: settings
                .include_title
                .then(|| input_file.display().to_string()),
            line_width,
        },
    )?;
    info!("그래프를 저장했습니다: {}", figure_file.display());

    // 7. 전체(다운샘플 전) 계열을 csv로 내보내기
    let out_file = export::output_path(&input_file);
    export::write_series(&series, settings.time_unit, &out_file)?;
    info!("결과 표를 저장했습니다: {}", out_file.display());

    Ok(())
}

/// 파이프라인만 실행해 계열을 얻는다 (그래프/프롬프트 없는 경로, 테스트에서도 사용).
pub fn compute_series(
    settings: &Settings,
    samples: &[uptake::RawSample],
) -> Result<(EosResult, UptakeSeries), AppError> {
    let reference_pressure_bar = units::psi_to_bar(samples[0].pressure_psi);
    let gas = GasProperties {
        tc_k: settings.tc_k,
        pc_bar: settings.pc_bar,
        omega: settings.omega,
    };
    let eos_result = eos::solve(
        settings.eos,
        &gas,
        settings.temperature_k,
        reference_pressure_bar,
    )?;
    let series = uptake::process(&PipelineInput {
        samples,
        interval_ms: settings.frequency_ms,
        time_unit: settings.time_unit,
        temp_k: settings.temperature_k,
        z: eos_result.z(),
        water_mol: uptake::water_mass_to_mol(settings.water_mass_g),
    })?;
    Ok((eos_result, series))
}
