use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub report: Report,
    pub metrics: Metrics,
}

/// Where trade logs come from and where workbooks go.
#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    /// Directory scanned for input `.csv` trade logs.
    pub data_dir: String,
    /// Directory the generated workbooks are written into.
    pub output_dir: String,
}

/// Parameters of the metrics engine.
#[derive(Debug, Clone, Deserialize)]
pub struct Metrics {
    /// Base capital seeding every equity curve and CAR computation.
    pub starting_capital: f64,
    /// Sort each group's trades by open date before the drawdown pass.
    /// false reproduces the legacy reports, which consume trades in input
    /// file order.
    pub sorted_drawdown: bool,
}
