//! 포집량 곡선을 plotters로 그려 png/svg 파일로 저장한다.
//! 클라스레이트 구조가 지정되면 이론 최대 포집량을 가로 점선으로 주석한다.

use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use serde::{Deserialize, Serialize};

use crate::clathrate::ClathrateType;
use crate::units::TimeUnit;
use crate::uptake::UptakeSeries;

const Y_AXIS_LABEL: &str = "Gas uptake (mol of gas / mol of water)";
const ANNOTATION_TEXT: &str = "Theoretical maximum value of gas uptake";

/// 그래프 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotType {
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "scatter")]
    Scatter,
}

/// 그림 파일 형식. pdf는 plotters에 백엔드가 없어 지원하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[serde(rename = "png")]
    Png,
    #[serde(rename = "svg")]
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

/// 렌더링 옵션.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub plot_type: PlotType,
    pub format: OutputFormat,
    pub time_unit: TimeUnit,
    pub clathrate: ClathrateType,
    /// 제목으로 쓰는 입력 파일명. None이면 제목을 그리지 않는다.
    pub title: Option<String>,
    /// 선 그래프 두께 [px]
    pub line_width: u32,
}

/// 그래프 렌더링 오류. plotters 백엔드 오류는 문자열로 눌러 담는다.
#[derive(Debug)]
pub enum PlotError {
    Render(String),
}

impl std::fmt::Display for PlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlotError::Render(msg) => write!(f, "그래프 렌더링 오류: {msg}"),
        }
    }
}

impl std::error::Error for PlotError {}

/// 포집량 계열을 그림 파일로 저장한다.
pub fn render(series: &UptakeSeries, path: &Path, opts: &PlotOptions) -> Result<(), PlotError> {
    match opts.format {
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
            draw_on_area(&root, series, opts)
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, (1024, 768)).into_drawing_area();
            draw_on_area(&root, series, opts)
        }
    }
}

fn draw_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    series: &UptakeSeries,
    opts: &PlotOptions,
) -> Result<(), PlotError>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    let err = |e: &dyn std::fmt::Display| PlotError::Render(e.to_string());

    let times = series.times();
    let x_min = times.first().copied().unwrap_or(0.0);
    let x_last = times.last().copied().unwrap_or(0.0);
    // 샘플이 한 점뿐이면 축 범위가 퇴화하므로 살짝 벌린다.
    let x_max = if x_last > x_min { x_last } else { x_min + 1.0 };

    let y_max = plot_y_max(series, opts.clathrate);

    root.fill(&WHITE).map_err(|e| err(&e))?;

    let mut builder = ChartBuilder::on(root);
    builder.margin(15).x_label_area_size(50).y_label_area_size(70);
    if let Some(title) = &opts.title {
        builder.caption(title, ("sans-serif", 24));
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| err(&e))?;

    chart
        .configure_mesh()
        .x_desc(opts.time_unit.axis_label())
        .y_desc(Y_AXIS_LABEL)
        .draw()
        .map_err(|e| err(&e))?;

    match opts.plot_type {
        PlotType::Line => {
            chart
                .draw_series(LineSeries::new(
                    series
                        .points
                        .iter()
                        .map(|p| (p.time, p.uptake_per_mol_water)),
                    BLACK.stroke_width(opts.line_width),
                ))
                .map_err(|e| err(&e))?;
        }
        PlotType::Scatter => {
            chart
                .draw_series(series.points.iter().map(|p| {
                    Circle::new((p.time, p.uptake_per_mol_water), 3, BLACK.filled())
                }))
                .map_err(|e| err(&e))?;
        }
    }

    if let Some(max_uptake) = opts.clathrate.theoretical_max() {
        chart
            .draw_series(DashedLineSeries::new(
                [(x_min, max_uptake), (x_max, max_uptake)],
                8,
                4,
                BLACK.stroke_width(1),
            ))
            .map_err(|e| err(&e))?;
        let text_x = x_min + 0.05 * (x_max - x_min);
        let text_y = max_uptake + 0.015 * y_max;
        chart
            .draw_series(std::iter::once(Text::new(
                ANNOTATION_TEXT,
                (text_x, text_y),
                ("sans-serif", 13),
            )))
            .map_err(|e| err(&e))?;
    }

    root.present().map_err(|e| err(&e))?;
    Ok(())
}

/// y축 상한: 구조가 지정되면 조회표 값, 아니면 계열 최대치의 1.4배.
fn plot_y_max(series: &UptakeSeries, clathrate: ClathrateType) -> f64 {
    if let Some(y_max) = clathrate.plot_y_max() {
        return y_max;
    }
    let from_data = 1.4 * series.max_uptake();
    if !(from_data > 0.0) {
        return 1.0;
    }
    let rounded = (from_data * 100.0).round() / 100.0;
    // 소수 둘째 자리 반올림이 상한을 0으로 눌러버리면 원값을 그대로 쓴다.
    if rounded > 0.0 { rounded } else { from_data }
}
