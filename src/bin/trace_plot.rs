use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render an orrery age trace CSV (star scale and orbit expansion vs. age)"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/trace.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 900)]
    height: u32,
}

#[derive(Debug, Clone)]
struct Row {
    age: f64,
    stage: String,
    star_scale: f64,
    expansion_factor: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let (rows, lifespan, red_giant_end) = read_rows(&cli.input)?;
    if rows.is_empty() {
        return Err(anyhow::anyhow!("No usable rows in the provided trace CSV"));
    }
    log::debug!("plotting {} trace rows from {}", rows.len(), cli.input);

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let (age_min, age_max) = padded_range(rows.iter().map(|r| r.age));
    let (_, scale_max) = padded_range(rows.iter().map(|r| r.star_scale));
    let (_, expansion_max) = padded_range(rows.iter().map(|r| r.expansion_factor));

    let (upper, lower) = root.split_vertically(cli.height / 2);

    {
        let mut chart = ChartBuilder::on(&upper)
            .margin(20)
            .caption("Star scale by age".to_string(), caption_font.clone())
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(age_min..age_max, 0.0..scale_max)?;

        chart
            .configure_mesh()
            .x_desc("Age (BY)")
            .y_desc("Scale")
            .label_style(label_font.clone())
            .draw()?;

        shade_window(&mut chart, lifespan, red_giant_end, scale_max)?;

        for pair in rows.windows(2) {
            let color = stage_color(&pair[1].stage);
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(pair[0].age, pair[0].star_scale), (pair[1].age, pair[1].star_scale)],
                ShapeStyle::from(&color).stroke_width(2),
            )))?;
        }
    }

    {
        let mut chart = ChartBuilder::on(&lower)
            .margin(20)
            .caption("Orbit expansion by age".to_string(), caption_font)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(age_min..age_max, 0.0..expansion_max)?;

        chart
            .configure_mesh()
            .x_desc("Age (BY)")
            .y_desc("Expansion factor")
            .label_style(label_font)
            .draw()?;

        shade_window(&mut chart, lifespan, red_giant_end, expansion_max)?;

        chart.draw_series(std::iter::once(PathElement::new(
            rows.iter()
                .map(|r| (r.age, r.expansion_factor))
                .collect::<Vec<_>>(),
            ShapeStyle::from(&BLUE).stroke_width(2),
        )))?;
    }

    root.present()?;
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

/// Read rows plus the lifespan markers of the first usable row.
fn read_rows(path: &str) -> anyhow::Result<(Vec<Row>, f64, f64)> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
    };
    let age_idx = column("age")?;
    let stage_idx = column("stage")?;
    let scale_idx = column("star_scale")?;
    let expansion_idx = column("expansion_factor")?;
    let lifespan_idx = column("lifespan")?;
    let rge_idx = column("red_giant_end")?;

    let parse = |r: &csv::StringRecord, idx: usize| -> f64 {
        r.get(idx).unwrap_or("").parse().unwrap_or(f64::NAN)
    };

    let mut rows = Vec::new();
    let mut lifespan = f64::NAN;
    let mut red_giant_end = f64::NAN;
    for rec in rdr.records() {
        let r = rec?;
        let row = Row {
            age: parse(&r, age_idx),
            stage: r.get(stage_idx).unwrap_or("").to_string(),
            star_scale: parse(&r, scale_idx),
            expansion_factor: parse(&r, expansion_idx),
        };
        if row.age.is_finite() && row.star_scale.is_finite() && row.expansion_factor.is_finite() {
            if rows.is_empty() {
                lifespan = parse(&r, lifespan_idx);
                red_giant_end = parse(&r, rge_idx);
            }
            rows.push(row);
        }
    }
    Ok((rows, lifespan, red_giant_end))
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < 1e-9 {
        return (min - 0.5, max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

fn shade_window<DB: DrawingBackend>(
    chart: &mut ChartContext<DB, Cartesian2d<plotters::coord::types::RangedCoordf64, plotters::coord::types::RangedCoordf64>>,
    lifespan: f64,
    red_giant_end: f64,
    y_max: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if !(lifespan.is_finite() && red_giant_end.is_finite()) {
        return Ok(());
    }
    chart.draw_series(std::iter::once(Rectangle::new(
        [(lifespan, 0.0), (red_giant_end, y_max)],
        RGBColor(204, 34, 0).mix(0.12).filled(),
    )))?;
    Ok(())
}

fn stage_color(stage: &str) -> RGBColor {
    match stage {
        "Main Sequence" => RGBColor(230, 170, 20),
        "Red Giant" => RGBColor(204, 34, 0),
        "Supernova" => RGBColor(120, 60, 200),
        _ => RGBColor(90, 90, 90),
    }
}
