mod bootstrap;

use bootstrap::{AppConfig, init_logging};
use std::{borrow::Cow, env, fmt::Display, fs, process};
use tripsplit_application::{TripId, TripService};
use tripsplit_domain::Trip;
use tripsplit_infrastructure::{JsonFileTripStore, JsonTripCodec, UuidIdGenerator};
use tripsplit_presentation::SettlementPresenter;

type CliResult<T> = Result<T, Cow<'static, str>>;

const USAGE: &str = "\
Usage:
  tripsplit report <trip.json>
  tripsplit svg <trip.json> <out.svg>
  tripsplit share <trip.json>
  tripsplit open <token>
  tripsplit save <trip.json> [id]
  tripsplit load <id>";

enum Command {
    Report { path: String },
    Svg { path: String, output: String },
    Share { path: String },
    Open { token: String },
    Save { path: String, id: Option<String> },
    Load { id: String },
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let command = parse_command(env::args().skip(1).collect())?;
    let config = AppConfig::from_env().map_err(cli_error)?;

    let codec = JsonTripCodec::new(config.default_trip_duration);
    let store = JsonFileTripStore::new(config.data_dir, codec);
    let service = TripService::new(&codec, &store, &UuidIdGenerator);

    match command {
        Command::Report { path } => {
            let trip = open_file(&service, &path)?;
            print!("{}", SettlementPresenter::render_text(&trip));
        }
        Command::Svg { path, output } => {
            let trip = open_file(&service, &path)?;
            let svg = SettlementPresenter::render(&trip)
                .report_svg()
                .ok_or("Failed to assemble the SVG report")?;
            fs::write(&output, svg).map_err(|err| format!("Failed to write '{output}': {err}"))?;
            tracing::info!(output = %output, "Wrote SVG report");
        }
        Command::Share { path } => {
            let trip = open_file(&service, &path)?;
            println!("{}", service.share(&trip).map_err(cli_error)?);
        }
        Command::Open { token } => {
            let trip = service.open_shared(&token).map_err(cli_error)?;
            print!("{}", SettlementPresenter::render_text(&trip));
        }
        Command::Save { path, id } => {
            let trip = open_file(&service, &path)?;
            let saved = service
                .save(id.as_deref().map(TripId::from), &trip)
                .map_err(cli_error)?;
            println!("{}", saved.id);
        }
        Command::Load { id } => {
            let trip = service.load(&TripId::from(id.as_str())).map_err(cli_error)?;
            print!("{}", SettlementPresenter::render_text(&trip));
        }
    }

    Ok(())
}

fn parse_command(args: Vec<String>) -> CliResult<Command> {
    let mut args = args.into_iter();
    let Some(name) = args.next() else {
        return Err(USAGE.into());
    };
    let rest: Vec<String> = args.collect();

    let command = match (name.as_str(), rest.as_slice()) {
        ("report", [path]) => Command::Report { path: path.clone() },
        ("svg", [path, output]) => Command::Svg {
            path: path.clone(),
            output: output.clone(),
        },
        ("share", [path]) => Command::Share { path: path.clone() },
        ("open", [token]) => Command::Open {
            token: token.clone(),
        },
        ("save", [path]) => Command::Save {
            path: path.clone(),
            id: None,
        },
        ("save", [path, id]) => Command::Save {
            path: path.clone(),
            id: Some(id.clone()),
        },
        ("load", [id]) => Command::Load { id: id.clone() },
        ("report" | "svg" | "share" | "open" | "save" | "load", _) => {
            return Err(format!("Wrong number of arguments for '{name}'\n{USAGE}").into());
        }
        _ => return Err(format!("Unknown command '{name}'\n{USAGE}").into()),
    };
    Ok(command)
}

fn open_file(service: &TripService<'_>, path: &str) -> CliResult<Trip> {
    let content =
        fs::read_to_string(path).map_err(|err| format!("Failed to read '{path}': {err}"))?;
    service
        .open(&content)
        .map_err(|err| format!("Failed to open '{path}': {err}").into())
}

fn cli_error(err: impl Display) -> Cow<'static, str> {
    Cow::Owned(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_save_with_and_without_id() {
        assert!(matches!(
            parse_command(args(&["save", "trip.json"])),
            Ok(Command::Save { id: None, .. })
        ));
        assert!(matches!(
            parse_command(args(&["save", "trip.json", "weekend"])),
            Ok(Command::Save { id: Some(id), .. }) if id == "weekend"
        ));
    }

    #[test]
    fn parses_svg_output_path() {
        assert!(matches!(
            parse_command(args(&["svg", "trip.json", "out.svg"])),
            Ok(Command::Svg { path, output }) if path == "trip.json" && output == "out.svg"
        ));
    }

    #[rstest]
    #[case::no_command(&[], "Usage:")]
    #[case::unknown(&["split", "trip.json"], "Unknown command 'split'")]
    #[case::missing_argument(&["svg", "trip.json"], "Wrong number of arguments for 'svg'")]
    #[case::extra_argument(&["load", "a", "b"], "Wrong number of arguments for 'load'")]
    fn rejects_bad_invocations(#[case] raw: &[&str], #[case] message: &str) {
        let Err(err) = parse_command(args(raw)) else {
            panic!("expected an error for {raw:?}");
        };
        assert!(err.starts_with(message), "{err}");
    }
}
