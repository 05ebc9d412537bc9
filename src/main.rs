use std::path::PathBuf;

use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use gas_uptake_toolbox::{app, settings};

/// 가스 포집 실험의 압력/체적 로그를 포집량 곡선으로 변환하는 도구.
#[derive(Debug, Parser)]
#[command(name = "gas_uptake_toolbox", version)]
struct Args {
    /// 설정 파일 경로
    #[arg(long, default_value = "settings.toml")]
    settings: PathBuf,
    /// 처리할 csv 파일. 지정하면 대화형 파일 선택을 건너뛴다.
    #[arg(long)]
    file: Option<PathBuf>,
}

/// 엔트리 포인트. 설정을 로드한 뒤 실행 흐름을 넘긴다.
fn main() {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let settings = settings::load_or_scaffold(&args.settings)?;
    app::run(&settings, args.file)?;
    Ok(())
}
