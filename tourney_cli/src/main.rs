//! Command-line front end for the tourney engine.
//!
//! Each invocation loads the snapshot, runs one command and saves the new
//! state if the command changed anything.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Error};
use log::info;
use pico_args::Arguments;
use tourney::KnockoutTiePolicy;
use tourney_cli::{
    commands::{execute, parse_command},
    config::CliConfig,
    logging, store,
};

const HELP: &str = "\
Run knockout brackets and round-robin leagues for 1v1 or 2v2 tournaments

USAGE:
  tourney_cli [OPTIONS] [COMMAND]

OPTIONS:
  --state       PATH       Snapshot file  [default: env TOURNEY_STATE_FILE or tourney.json]
  --tie-policy  POLICY     Level knockout scores: home|reject  [default: env KNOCKOUT_TIE_POLICY or home]

FLAGS:
  -h, --help               Print help information

COMMANDS:
  show                               Overview of the active format  [default]
  players                            List players and teams with ids
  add-player NAME                    Add a player
  remove-player ID                   Remove a player
  add-team ID ID                     Pair two players into a 2v2 team
  remove-team ID                     Remove a team
  format 1v1|2v2                     Switch the active format
  bracket                            Draw a new bracket
  league                             Schedule a new league
  score ROUND MATCH HOME AWAY        Enter a knockout score
  assign ROUND MATCH home|away ID|-  Put a competitor in a bracket slot (- empties it)
  league-score MATCH_ID HOME AWAY    Enter a league score
  table                              Standings (league, else knockout)
  reset                              Clear the active format's bracket and league

ENVIRONMENT:
  TOURNEY_STATE_FILE       Snapshot file
  KNOCKOUT_TIE_POLICY      home|reject
  POINTS_FOR_WIN           League points for a win  [default: 3]
  POINTS_FOR_DRAW          League points for a draw  [default: 1]
  POINTS_FOR_LOSS          League points for a loss  [default: 0]
  RUST_LOG                 Log filter  [default: info]
";

struct Args {
    state_file: Option<PathBuf>,
    tie_policy: Option<KnockoutTiePolicy>,
    command: Vec<String>,
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        state_file: pargs.opt_value_from_str("--state")?,
        tie_policy: pargs.opt_value_from_str("--tie-policy")?,
        command: pargs
            .finish()
            .into_iter()
            .map(|word| {
                word.into_string()
                    .map_err(|w| anyhow::anyhow!("Argument is not valid UTF-8: {:?}", w))
            })
            .collect::<Result<_, _>>()?,
    };

    logging::init();

    let config = CliConfig::from_env(args.state_file, args.tie_policy)?;
    config.validate()?;

    let command = parse_command(&args.command)?;
    let state = store::load(&config.state_file)
        .with_context(|| format!("Failed to load {}", config.state_file.display()))?;

    let started = Instant::now();
    let outcome = match execute(&command, &state, &config.settings) {
        Ok(outcome) => outcome,
        Err(e) => {
            logging::log_rejected(command.name(), &e.to_string());
            return Err(e.into());
        }
    };
    logging::log_command(command.name(), started.elapsed(), outcome.state.is_some());

    if let Some(next) = &outcome.state {
        let snapshot = store::save(&config.state_file, next)
            .with_context(|| format!("Failed to save {}", config.state_file.display()))?;
        info!(
            "Saved {} at {}",
            config.state_file.display(),
            snapshot.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    println!("{}", outcome.output);
    Ok(())
}
