#![allow(non_snake_case)]
use RustedCalc::Examples::calc_examples::calc_examples;
use RustedCalc::Utils::logger::init_logging;
use RustedCalc::Utils::settings_parser::CalcSettings;
use std::path::Path;

fn main() {
    // optional settings file as the first argument
    let settings = match std::env::args().nth(1) {
        Some(path) => match CalcSettings::from_file(Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => CalcSettings::default(),
    };
    match init_logging(settings.loglevel, settings.log_to_file) {
        Ok(Some(log_file)) => log::info!("logging to {}", log_file.display()),
        Ok(None) => {}
        Err(e) => eprintln!("cannot create log file: {}", e),
    }

    let example = 2;
    match example {
        0..=5 => calc_examples(example),
        _ => {
            for example in 0..=5 {
                calc_examples(example);
            }
        }
    }
}
