use crate::Polynomial;

/// `num` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, num: usize) -> impl Iterator<Item = f64> {
    let step = if num > 1 {
        (end - start) / (num - 1) as f64
    } else {
        0.0
    };
    (0..num).map(move |i| start + i as f64 * step)
}

/// Interleaved `[x₀, p(x₀), x₁, p(x₁), …]` samples, as taken by the regression.
pub fn sample(poly: &Polynomial, xs: &[f64]) -> Vec<f64> {
    xs.iter().flat_map(|&x| [x, poly.get_y(x)]).collect()
}

pub fn init_test_logger() {
    use std::io::Write as _;
    let _ = env_logger::builder()
        .is_test(true)
        .filter_module("unicool", log::LevelFilter::Trace)
        .format(|buf, record| {
            let level_style = buf.default_level_style(record.level());
            let dim = anstyle::Style::new().dimmed();
            let module = record.module_path().unwrap_or("unicool");
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {dim}{}:{}{dim:#} {}",
                record.level(),
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init();
}
