//! 대화형 입력 처리: 파일 선택 표, 구간 자르기, 산점도 점 개수 등.

use std::io::{self, Write};
use std::path::PathBuf;

use prettytable::{row, Table};

use crate::units::TimeUnit;

/// 표준 입출력 오류만 발생한다. 잘못된 입력은 오류 대신 재입력을 받는다.
pub type UiResult<T> = Result<T, io::Error>;

fn read_line(prompt: &str) -> UiResult<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_f64(prompt: &str) -> UiResult<f64> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("숫자를 입력하세요."),
        }
    }
}

fn read_yes_no(prompt: &str) -> UiResult<bool> {
    loop {
        let s = read_line(prompt)?;
        match s.trim() {
            "y" | "Y" => return Ok(true),
            "n" | "N" => return Ok(false),
            _ => println!("y 또는 n을 입력하세요."),
        }
    }
}

/// csv 파일 목록을 번호 표로 보여주고 하나를 고르게 한다.
pub fn pick_file(files: &[PathBuf]) -> UiResult<PathBuf> {
    let mut table = Table::new();
    table.add_row(row!["번호", "파일명"]);
    for (i, file) in files.iter().enumerate() {
        table.add_row(row![i, file.display()]);
    }
    table.printstd();

    loop {
        let s = read_line("사용할 파일 번호를 입력: ")?;
        if let Ok(n) = s.trim().parse::<usize>() {
            if let Some(file) = files.get(n) {
                println!("선택한 파일: {}", file.display());
                return Ok(file.clone());
            }
        }
        println!("목록에 있는 번호를 입력하세요.");
    }
}

/// 시간 구간 자르기 여부를 묻고, 자른다면 [시작, 끝] 구간을 반환한다.
/// 시작 시점은 이후 0으로 재기준된다.
pub fn ask_trim_window(unit: TimeUnit, t_first: f64, t_last: f64) -> UiResult<Option<(f64, f64)>> {
    println!(
        "현재 계열의 시간 범위: {t_first:.3} ~ {t_last:.3} ({})",
        unit.axis_label()
    );
    if !read_yes_no("데이터 구간을 잘라내시겠습니까? (y/n): ")? {
        return Ok(None);
    }
    loop {
        let start = read_f64("시작 시간: ")?;
        let end = read_f64("끝 시간: ")?;
        if end > start {
            return Ok(Some((start, end)));
        }
        println!("끝 시간은 시작 시간보다 커야 합니다.");
    }
}

/// 산점도에 표시할 점 개수를 묻는다. 전체 샘플 수를 넘으면 재입력.
pub fn ask_scatter_dots(available: usize) -> UiResult<usize> {
    loop {
        let s = read_line("산점도에 표시할 점 개수 (권장 20): ")?;
        if let Ok(n) = s.trim().parse::<usize>() {
            if n >= 1 && n <= available {
                return Ok(n);
            }
        }
        println!("1 이상 {available} 이하의 정수를 입력하세요.");
    }
}

/// 선 그래프 두께 [px]를 묻는다.
pub fn ask_line_width() -> UiResult<u32> {
    let w = read_f64("선 두께 (권장 2): ")?;
    Ok(w.round().max(1.0) as u32)
}
