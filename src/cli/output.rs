//! Output formatting utilities for CLI.

// Averages over game counts are intentionally lossy
#![allow(clippy::cast_precision_loss)]

use dendrophile::arena::MatchResult;
use dendrophile::Team;
use serde::Serialize;

/// Format a match result as human-readable text.
pub(super) fn format_text(result: &MatchResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Match Result (seed: {})\n", result.seed));
    match result.winner {
        Some(team) if result.won_by_points => {
            output.push_str(&format!("  Winner: Team {team} (victory points)\n"));
        }
        Some(team) => output.push_str(&format!("  Winner: Team {team} (round limit)\n")),
        None => output.push_str("  Winner: Draw\n"),
    }
    output.push_str(&format!("  Rounds: {}\n\n", result.rounds));

    for stats in &result.teams {
        output.push_str(&format!(
            "  Team {}: {} VP ({:.0} bullets donated), {:.0} bullets, {} trees alive ({} planted), {} gardeners hired",
            stats.team,
            stats.victory_points,
            stats.bullets_donated,
            stats.bullets,
            stats.trees_alive,
            stats.trees_planted,
            stats.gardeners_hired,
        ));
        if stats.recovered_faults > 0 {
            output.push_str(&format!(" [{} faults]", stats.recovered_faults));
        }
        output.push('\n');
    }

    output
}

/// Tournament statistics for aggregated results.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct TournamentStats {
    /// Total matches played.
    pub(super) games_played: u64,
    /// Win count per team (A, B).
    pub(super) wins: [u64; 2],
    /// Draw count.
    pub(super) draws: u64,
    /// Matches ended by reaching the victory-point target.
    pub(super) won_by_points: u64,
    /// Total victory points per team.
    total_points: [u64; 2],
    /// Total trees planted per team.
    total_trees_planted: [u64; 2],
    /// Total recovered faults per team.
    total_faults: [u64; 2],
    /// Total rounds across all matches.
    total_rounds: u64,
}

impl TournamentStats {
    /// Add a match result to the stats.
    pub(super) fn add_result(&mut self, result: &MatchResult) {
        self.games_played += 1;
        self.total_rounds += u64::from(result.rounds);
        if result.won_by_points {
            self.won_by_points += 1;
        }

        match result.winner {
            Some(Team::A) => self.wins[0] += 1,
            Some(Team::B) => self.wins[1] += 1,
            Some(Team::Neutral) | None => self.draws += 1,
        }

        for (i, stats) in result.teams.iter().enumerate() {
            self.total_points[i] += u64::from(stats.victory_points);
            self.total_trees_planted[i] += u64::from(stats.trees_planted);
            self.total_faults[i] += u64::from(stats.recovered_faults);
        }
    }

    /// Merge another thread's stats into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.draws += other.draws;
        self.won_by_points += other.won_by_points;
        self.total_rounds += other.total_rounds;
        for i in 0..2 {
            self.wins[i] += other.wins[i];
            self.total_points[i] += other.total_points[i];
            self.total_trees_planted[i] += other.total_trees_planted[i];
            self.total_faults[i] += other.total_faults[i];
        }
    }

    fn per_game(&self, total: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        total as f64 / self.games_played as f64
    }

    /// Get win rate for a team (0.0-1.0).
    pub(super) fn win_rate(&self, team: usize) -> f64 {
        self.per_game(self.wins[team])
    }

    /// Get average victory points for a team.
    pub(super) fn avg_points(&self, team: usize) -> f64 {
        self.per_game(self.total_points[team])
    }

    /// Get average trees planted for a team.
    pub(super) fn avg_trees_planted(&self, team: usize) -> f64 {
        self.per_game(self.total_trees_planted[team])
    }

    /// Get average match length.
    pub(super) fn avg_rounds(&self) -> f64 {
        self.per_game(self.total_rounds)
    }
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Total matches played.
    games_played: u64,
    /// Per-team statistics.
    teams: Vec<JsonTournamentTeam>,
    /// Number of draws.
    draws: u64,
    /// Matches ended by victory points.
    won_by_points: u64,
    /// Average match length in rounds.
    avg_rounds: f64,
}

/// JSON-serializable per-team tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentTeam {
    /// Team name.
    team: Team,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average victory points.
    avg_points: f64,
    /// Average trees planted.
    avg_trees_planted: f64,
    /// Total recovered faults.
    faults: u64,
}

impl JsonTournamentResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &TournamentStats) -> Self {
        let teams = [Team::A, Team::B]
            .into_iter()
            .enumerate()
            .map(|(i, team)| JsonTournamentTeam {
                team,
                wins: stats.wins[i],
                win_rate: stats.win_rate(i),
                avg_points: stats.avg_points(i),
                avg_trees_planted: stats.avg_trees_planted(i),
                faults: stats.total_faults[i],
            })
            .collect();

        Self {
            games_played: stats.games_played,
            teams,
            draws: stats.draws,
            won_by_points: stats.won_by_points,
            avg_rounds: stats.avg_rounds(),
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Tournament Results ({} matches)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for (i, team) in [Team::A, Team::B].into_iter().enumerate() {
        output.push_str(&format!(
            "  Team {team}: {:.1}% ({} wins)\n",
            stats.win_rate(i) * 100.0,
            stats.wins[i]
        ));
    }
    output.push_str(&format!(
        "  Draws: {} ({:.1}%)\n\n",
        stats.draws,
        stats.per_game(stats.draws) * 100.0
    ));

    output.push_str("Averages:\n");
    for (i, team) in [Team::A, Team::B].into_iter().enumerate() {
        output.push_str(&format!(
            "  Team {team}: {:.1} VP, {:.1} trees planted, {} faults\n",
            stats.avg_points(i),
            stats.avg_trees_planted(i),
            stats.total_faults[i]
        ));
    }

    output.push_str(&format!(
        "\nWon on points: {} of {}\n",
        stats.won_by_points, stats.games_played
    ));
    output.push_str(&format!("Average Match Length: {:.0} rounds\n", stats.avg_rounds()));

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats) -> String {
    let mut output = String::new();

    output.push_str("team,wins,win_rate,avg_points,avg_trees_planted,faults\n");

    for (i, team) in [Team::A, Team::B].into_iter().enumerate() {
        output.push_str(&format!(
            "{},{},{:.4},{:.2},{:.2},{}\n",
            team,
            stats.wins[i],
            stats.win_rate(i),
            stats.avg_points(i),
            stats.avg_trees_planted(i),
            stats.total_faults[i]
        ));
    }

    output
}
