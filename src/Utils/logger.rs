use crate::Utils::settings_parser::ConfigError;
use crate::datastructures::ordered_sequence::OrderedSequence;
use chrono::Local;
use csv::Writer;
use simplelog::*;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// maps "debug" | "info" | "warn" | "error" to a level filter
pub fn level_from_str(loglevel: &str) -> Result<LevelFilter, ConfigError> {
    match loglevel {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        other => Err(ConfigError::InvalidValue {
            key: "loglevel".to_string(),
            value: other.to_string(),
        }),
    }
}

/// Terminal logger, plus a `log_<date>_<time>.txt` file logger when `log_to_file` is set.
/// Returns the log file name. A logger installed earlier stays in place.
pub fn init_logging(log_option: LevelFilter, log_to_file: bool) -> io::Result<Option<PathBuf>> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    let mut log_file = None;
    if log_to_file {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = PathBuf::from(format!("log_{}.txt", date_and_time));
        loggers.push(WriteLogger::new(
            log_option,
            Config::default(),
            File::create(&name)?,
        ));
        log_file = Some(name);
    }
    match CombinedLogger::init(loggers) {
        Ok(()) => {
            log::info!("logging started with level {}", log_option);
            Ok(log_file)
        }
        Err(_) => Ok(None),
    }
}

/// writes the two sample columns under the headers `x_label`, `y_label`
pub fn save_samples_to_csv(
    xs: &OrderedSequence<f64>,
    ys: &OrderedSequence<f64>,
    x_label: &str,
    y_label: &str,
    filename: &Path,
) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record([x_label, y_label])?;
    for (x, y) in xs.iter().zip(ys.iter()) {
        writer.write_record([x.to_string(), y.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Tabled)]
struct SampleRow {
    x: f64,
    y: f64,
}

/// pretty table of the sampled points
pub fn samples_table(xs: &OrderedSequence<f64>, ys: &OrderedSequence<f64>) -> String {
    let rows: Vec<SampleRow> = xs
        .iter()
        .zip(ys.iter())
        .map(|(&x, &y)| SampleRow { x, y })
        .collect();
    let mut table = Table::new(&rows);
    table.with(Style::modern_rounded());
    table.to_string()
}
