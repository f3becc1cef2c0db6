use std::{path::PathBuf, time::Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    load_settings, load_settings_from, HttpSubmitClient, SelectionController, SubmitBlocked,
    SubmitPhase,
};
use shared::domain::MAX_GAMES;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
struct GameArg(Vec<u8>);

fn parse_game(raw: &str) -> Result<GameArg, String> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<u8>()
                .map_err(|err| format!("'{}' is not a number: {err}", part.trim()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(GameArg)
}

/// Builds up to five games and submits them in one request.
#[derive(Parser, Debug)]
struct Args {
    /// Name sent as `fullName`.
    #[arg(long)]
    name: String,
    /// Six comma-separated numbers, e.g. `--game 4,8,15,16,23,42`. Repeatable.
    #[arg(long = "game", value_parser = parse_game)]
    games: Vec<GameArg>,
    /// Number of randomly drawn games to add after the explicit ones.
    #[arg(long, default_value_t = 0)]
    random: usize,
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file; defaults to `lotto.toml` in the working directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the request body instead of sending it.
    #[arg(long)]
    dry_run: bool,
}

fn build_games(
    controller: &mut SelectionController,
    games: &[GameArg],
    random: usize,
) -> Result<()> {
    if games.len() + random > MAX_GAMES {
        bail!(
            "at most {MAX_GAMES} games per submission, asked for {}",
            games.len() + random
        );
    }

    let now = Instant::now();
    for (position, GameArg(numbers)) in games.iter().enumerate() {
        for &number in numbers {
            controller
                .toggle_number(number, now)
                .with_context(|| format!("game {}: cannot pick {number}", position + 1))?;
        }
        if controller.commit_game().is_none() {
            bail!(
                "game {}: needs exactly 6 distinct numbers, got {}",
                position + 1,
                controller.state().current().len()
            );
        }
    }

    for _ in 0..random {
        controller.randomize();
        controller
            .commit_game()
            .context("random game could not be added")?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => load_settings_from(path),
        None => load_settings(),
    };
    if let Some(server_url) = args.server_url.clone() {
        settings.server_url = server_url;
    }

    let mut controller = SelectionController::new(settings.submit_label.clone());
    build_games(&mut controller, &args.games, args.random)?;
    controller.set_full_name(args.name.clone());

    for row in controller.view(Instant::now()).games {
        println!("{}", row.label);
    }

    if args.dry_run {
        let request = controller.state().submit_request();
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    let client = HttpSubmitClient::new(&settings).context("invalid server settings")?;
    tracing::info!(
        endpoint = %client.endpoint(),
        games = controller.state().games().len(),
        "submitting games"
    );
    let phase = match controller.submit(&client).await {
        Ok(phase) => phase.clone(),
        Err(SubmitBlocked::NoGames) => bail!("nothing to submit; pass --game or --random"),
        Err(SubmitBlocked::MissingName) => bail!(shared::error::MSG_MISSING_NAME),
        Err(SubmitBlocked::AlreadySubmitting) => bail!("a submission is already in flight"),
    };

    match phase {
        SubmitPhase::Redirecting { target } => {
            let url = client
                .resolve_redirect(&target)
                .with_context(|| format!("server returned unusable redirect '{target}'"))?;
            tracing::info!(%url, "submission accepted");
            println!("Submitted. Continue at {url}");
            Ok(())
        }
        _ => {
            let message = controller
                .view(Instant::now())
                .error
                .unwrap_or_else(|| shared::error::MSG_SUBMIT_FAILED.to_string());
            tracing::warn!(%message, "submission did not go through");
            bail!(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_game() {
        assert_eq!(
            parse_game("4, 8,15,16,23,42"),
            Ok(GameArg(vec![4, 8, 15, 16, 23, 42]))
        );
        assert!(parse_game("4,eight").is_err());
    }

    #[test]
    fn builds_explicit_and_random_games() {
        let mut controller = SelectionController::default();
        build_games(
            &mut controller,
            &[GameArg(vec![42, 23, 16, 15, 8, 4])],
            2,
        )
        .expect("games");

        let games = controller.state().games();
        assert_eq!(games.len(), 3);
        assert_eq!(games[0].numbers(), &[4, 8, 15, 16, 23, 42]);
        assert!(controller.state().current().is_empty());
    }

    #[test]
    fn rejects_short_or_oversized_requests() {
        let mut controller = SelectionController::default();
        let err = build_games(&mut controller, &[GameArg(vec![1, 2, 3])], 0)
            .expect_err("short game");
        assert!(err.to_string().contains("exactly 6"));

        let mut controller = SelectionController::default();
        let err = build_games(&mut controller, &[GameArg(vec![1, 2, 3, 4, 5, 6, 7])], 0)
            .expect_err("seven numbers");
        assert!(format!("{err:#}").contains("Maximum of 6 numbers per game."));

        let mut controller = SelectionController::default();
        assert!(build_games(&mut controller, &[], 6).is_err());
    }
}
