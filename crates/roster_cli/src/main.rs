//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire the roster core from `ROSTER_*` environment settings.
//! - Print a deterministic dashboard summary for quick local sanity checks.

use log::error;
use roster_core::{core_version, Roster, RosterConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("roster: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = RosterConfig::from_env()?;
    let roster = Roster::open(&config)?;
    let overview = roster.dashboard()?;

    println!("roster_core version={}", core_version());
    println!(
        "teams={} players={} average_rating={:.2}",
        overview.stats.total_teams, overview.stats.total_players, overview.stats.average_rating
    );
    for (sport, count) in &overview.team_stats.teams_by_sport {
        println!("sport {sport}: {count}");
    }
    if let Some(oldest) = &overview.team_stats.oldest_team {
        println!("oldest team: {oldest}");
    }
    for (rank, player) in overview.top_players.iter().enumerate() {
        println!(
            "top #{} {} ({:.1})",
            rank + 1,
            player.full_name(),
            player.rating
        );
    }
    println!("free agents: {}", overview.free_agents.len());
    Ok(())
}
