// SPDX-License-Identifier: MPL-2.0
use iced_studio::app::{self, paths, Flags};
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
iced_studio [OPTIONS] [FILE]

Options:
  --lang <LOCALE>       UI language, e.g. en-US or fr
  --data-dir <DIR>      Directory holding the generation history
  --config-dir <DIR>    Directory holding settings.toml
  -h, --help            Print this help
";

struct Args {
    lang: Option<String>,
    data_dir: Option<String>,
    config_dir: Option<String>,
    file_path: Option<String>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = Args {
        lang: args.opt_value_from_str("--lang")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        file_path: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    };
    Ok(Some(parsed))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("iced_studio=info"))
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    paths::init_cli_overrides(args.data_dir.clone(), args.config_dir.clone());

    let flags = Flags {
        lang: args.lang,
        file_path: args.file_path,
        data_dir: args.data_dir.map(PathBuf::from),
        config_dir: args.config_dir.map(PathBuf::from),
    };

    match app::run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Application error: {err}");
            ExitCode::FAILURE
        }
    }
}
