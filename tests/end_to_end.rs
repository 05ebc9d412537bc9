//! 임시 폴더에 로그 파일을 만들어 읽기 → EOS → 파이프라인 → 내보내기 →
//! 그래프 저장까지 한 번에 확인한다.

use std::fs;
use std::path::PathBuf;

use gas_uptake_toolbox::clathrate::ClathrateType;
use gas_uptake_toolbox::data_io;
use gas_uptake_toolbox::eos::EosVariant;
use gas_uptake_toolbox::export;
use gas_uptake_toolbox::plot::{self, OutputFormat, PlotOptions, PlotType};
use gas_uptake_toolbox::settings::Settings;
use gas_uptake_toolbox::units::TimeUnit;
use gas_uptake_toolbox::{app, uptake};

/// 진동 구간과 기록 누락(체적 0.0)을 모두 포함한 로그.
const COMMA_LOG: &str = "725.0,10.0\n724.8,10.5\n724.6,11.0\n724.4,9.8\n724.2,0.0\n724.0,9.0\n723.8,8.5\n";

fn test_settings(directory: PathBuf) -> Settings {
    Settings {
        directory,
        ..Settings::default()
    }
}

#[test]
fn comma_log_round_trip() {
    let dir = tempfile::tempdir().expect("임시 폴더");
    let log_path = dir.path().join("run01.csv");
    fs::write(&log_path, COMMA_LOG).expect("로그 기록");

    let files = data_io::list_csv_files(dir.path()).expect("목록 조회");
    assert_eq!(files, vec![log_path.clone()]);

    let samples = data_io::read_samples(&log_path).expect("로그 읽기");
    assert_eq!(samples.len(), 7);

    let settings = test_settings(dir.path().to_path_buf());
    let (eos_result, series) = app::compute_series(&settings, &samples).expect("계열 계산");
    assert!(eos_result.z() > 0.0);

    // 진동 [10.0, 10.5, 11.0] 절단 + 체적 0.0 한 점 제거
    assert_eq!(series.truncated_count, 3);
    assert_eq!(series.zero_removed_count, 1);
    assert_eq!(series.points.len(), 3);
    assert_eq!(series.points[0].volume_ml, 9.8);
    // 기준 샘플 이후 체적이 줄어드니 포집량은 0에서 증가한다.
    assert_eq!(series.points[0].uptake_per_mol_water, 0.0);
    assert!(series.points[2].uptake_per_mol_water > series.points[1].uptake_per_mol_water);

    // 결과 표 내보내기
    let out_path = export::output_path(&log_path);
    assert_eq!(out_path.file_name().unwrap(), "run01_OUTDATA.csv");
    export::write_series(&series, TimeUnit::Hours, &out_path).expect("내보내기");
    let exported = fs::read_to_string(&out_path).expect("결과 읽기");
    let lines: Vec<&str> = exported.lines().collect();
    assert_eq!(lines.len(), 1 + series.points.len());
    assert!(lines[0].starts_with("Index,Time (h),Pressure (psi)"));

    // 그래프 저장 (svg)
    let figure = export::figure_path(&log_path, "svg");
    plot::render(
        &series,
        &figure,
        &PlotOptions {
            plot_type: PlotType::Line,
            format: OutputFormat::Svg,
            time_unit: TimeUnit::Hours,
            clathrate: ClathrateType::SI,
            title: Some("run01.csv".to_string()),
            line_width: 2,
        },
    )
    .expect("그래프 렌더링");
    assert!(figure.exists());
}

#[test]
fn space_delimited_log_is_read() {
    let dir = tempfile::tempdir().expect("임시 폴더");
    let log_path = dir.path().join("run02.csv");
    fs::write(&log_path, "725.0 10.0\n724.0 9.5\n723.0 9.0\n").expect("로그 기록");

    let samples = data_io::read_samples(&log_path).expect("로그 읽기");
    assert_eq!(samples.len(), 3);
    assert_eq!(samples[0].pressure_psi, 725.0);
    assert_eq!(samples[2].volume_ml, 9.0);
}

#[test]
fn malformed_row_is_reported_with_line_number() {
    let dir = tempfile::tempdir().expect("임시 폴더");
    let log_path = dir.path().join("broken.csv");
    fs::write(&log_path, "725.0,10.0\nabc,def\n").expect("로그 기록");

    match data_io::read_samples(&log_path) {
        Err(data_io::DataIoError::BadRecord { line, .. }) => assert_eq!(line, 2),
        other => panic!("행 번호가 붙은 오류여야 함: {other:?}"),
    }
}

#[test]
fn peng_robinson_path_reports_fugacity() {
    let dir = tempfile::tempdir().expect("임시 폴더");
    let settings = Settings {
        eos: EosVariant::PengRobinson,
        ..test_settings(dir.path().to_path_buf())
    };
    let samples = vec![
        uptake::RawSample {
            pressure_psi: 725.19,
            volume_ml: 10.0,
        },
        uptake::RawSample {
            pressure_psi: 725.0,
            volume_ml: 9.5,
        },
    ];
    let (eos_result, series) = app::compute_series(&settings, &samples).expect("계열 계산");
    match eos_result {
        gas_uptake_toolbox::eos::EosResult::PengRobinson { fugacity_coeff, .. } => {
            assert!(fugacity_coeff > 0.0);
        }
        other => panic!("PR 결과여야 함: {other:?}"),
    }
    assert_eq!(series.points.len(), 2);
}
