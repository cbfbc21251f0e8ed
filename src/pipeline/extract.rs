//! Candidate extraction: grand-slam events from play-by-play, and the
//! baseline universe of threshold-run innings from boxscores.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::model::{DropCounts, Event, Game, QualifyingInning, Side};

use super::aggregate::post_event_production;
use super::bases::BaseState;
use super::notation::{format_inning, parse_inning};

/// True when the event is a bases-loaded home run driving in exactly four
/// runs — the strict grand-slam predicate.
pub fn is_grand_slam(event: &Event) -> bool {
    event.home_run && event.rbi == 4 && BaseState::decode(event.on_base.as_deref()).loaded()
}

/// Index games by id for event joins.
pub fn index_games(games: &[Game]) -> HashMap<&str, &Game> {
    games.iter().map(|g| (g.game_id.as_str(), g)).collect()
}

/// Scan the event table for qualifying grand slams, enrich each with the
/// post-event aggregates of its game. Rows that cannot be placed (bad label,
/// extra inning, unknown game, un-sideable team) are dropped and counted.
pub fn scan_grand_slams(
    events: &[Event],
    games: &HashMap<&str, &Game>,
    drops: &mut DropCounts,
) -> Vec<QualifyingInning> {
    let mut out = Vec::new();
    for event in events.iter().filter(|e| is_grand_slam(e)) {
        let Some((inning_no, half)) = event.inning.as_deref().and_then(parse_inning) else {
            drops.unparseable_inning += 1;
            debug!(
                game_id = %event.game_id,
                label = event.inning.as_deref().unwrap_or("<missing>"),
                "grand slam with unparseable inning label dropped"
            );
            continue;
        };
        if inning_no > 9 {
            // Extra innings are excluded by design, not approximated.
            drops.extra_inning += 1;
            debug!(game_id = %event.game_id, inning_no, "grand slam in an extra inning dropped");
            continue;
        }
        let Some(game) = games.get(event.game_id.as_str()) else {
            drops.missing_game += 1;
            warn!(game_id = %event.game_id, "grand slam without a matching game record dropped");
            continue;
        };
        let Some(side) = game.side_of(&event.team) else {
            drops.side_mismatch += 1;
            warn!(
                game_id = %event.game_id,
                team = %event.team,
                "event team matches neither side of its game; dropped"
            );
            continue;
        };
        let production = post_event_production(game, side, inning_no);
        out.push(QualifyingInning {
            game_id: event.game_id.clone(),
            date: game.date,
            team: event.team.clone(),
            team_name: event.team.clone(),
            side,
            inning_label: format_inning(inning_no, half),
            inning_no,
            runs_in_inning: game.runs(side, inning_no),
            batter_id: event.batter_id.clone(),
            home_team_id: game.home_team_id.clone(),
            away_team_id: game.away_team_id.clone(),
            ballpark: game.ballpark.clone(),
            is_grand_slam: true,
            post_inning_runs: production.post_runs,
            remaining_off_innings: production.countable_innings,
            team_total_runs: production.team_total,
            opponent_total_runs: production.opponent_total,
            post_run_rate: production.run_rate(),
        });
    }
    out
}

/// Scan every game's boxscore for innings whose run count exactly equals the
/// configured threshold — the comparison universe. Rows start untagged; the
/// grand-slam tag is applied afterwards by key membership.
pub fn scan_baseline(
    games: &[Game],
    config: &AnalysisConfig,
    drops: &mut DropCounts,
) -> Vec<QualifyingInning> {
    let mut out = Vec::new();
    for game in games {
        for side in [Side::Visitor, Side::Home] {
            let Some(team) = game.team_id(side) else {
                drops.side_mismatch += 1;
                warn!(
                    game_id = %game.game_id,
                    ?side,
                    "game record missing the team id for this side; innings skipped"
                );
                continue;
            };
            let team = team.to_owned();
            for inning_no in 1..=9u8 {
                let Some(runs) = game.runs(side, inning_no) else {
                    continue;
                };
                if runs != config.baseline_threshold {
                    continue;
                }
                let production = post_event_production(game, side, inning_no);
                out.push(QualifyingInning {
                    game_id: game.game_id.clone(),
                    date: game.date,
                    team: team.clone(),
                    team_name: team.clone(),
                    side,
                    inning_label: format_inning(inning_no, side.scoring_half()),
                    inning_no,
                    runs_in_inning: Some(runs),
                    batter_id: None,
                    home_team_id: game.home_team_id.clone(),
                    away_team_id: game.away_team_id.clone(),
                    ballpark: game.ballpark.clone(),
                    is_grand_slam: false,
                    post_inning_runs: production.post_runs,
                    remaining_off_innings: production.countable_innings,
                    team_total_runs: production.team_total,
                    opponent_total_runs: production.opponent_total,
                    post_run_rate: production.run_rate(),
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slam_event(game_id: &str, team: &str, inning: &str) -> Event {
        Event {
            game_id: game_id.into(),
            team: team.into(),
            inning: Some(inning.into()),
            on_base: Some("123".into()),
            hits: 1,
            home_run: true,
            rbi: 4,
            batter_id: Some("batter-1".into()),
            ..Default::default()
        }
    }

    fn make_game(game_id: &str) -> Game {
        Game {
            game_id: game_id.into(),
            home_team_id: Some("H".into()),
            away_team_id: Some("V".into()),
            visitor_innings: [Some(0), Some(4), Some(0), Some(0), Some(1), Some(2), Some(0), Some(0), Some(0)],
            home_innings: [Some(0), Some(0), Some(0), Some(4), Some(0), Some(0), Some(0), Some(0), None],
            ..Default::default()
        }
    }

    #[test]
    fn grand_slam_predicate_requires_all_three_conditions() {
        let slam = slam_event("g1", "V", "2T");
        assert!(is_grand_slam(&slam));

        let mut no_hr = slam.clone();
        no_hr.home_run = false;
        assert!(!is_grand_slam(&no_hr));

        let mut three_rbi = slam.clone();
        three_rbi.rbi = 3;
        assert!(!is_grand_slam(&three_rbi));

        let mut not_loaded = slam.clone();
        not_loaded.on_base = Some("12".into());
        assert!(!is_grand_slam(&not_loaded));

        let mut no_state = slam;
        no_state.on_base = None;
        assert!(!is_grand_slam(&no_state));
    }

    #[test]
    fn scan_enriches_a_valid_slam() {
        let games = vec![make_game("g1")];
        let index = index_games(&games);
        let events = vec![slam_event("g1", "V", "2T")];
        let mut drops = DropCounts::default();

        let slams = scan_grand_slams(&events, &index, &mut drops);
        assert_eq!(slams.len(), 1);
        assert_eq!(drops.total(), 0);

        let slam = &slams[0];
        assert!(slam.is_grand_slam);
        assert_eq!(slam.side, Side::Visitor);
        assert_eq!(slam.inning_label, "2T");
        assert_eq!(slam.runs_in_inning, Some(4));
        assert_eq!(slam.post_inning_runs, 3);
        assert_eq!(slam.remaining_off_innings, 7);
        assert_eq!(slam.team_total_runs, 7);
        assert_eq!(slam.opponent_total_runs, 4);
        assert_eq!(slam.batter_id.as_deref(), Some("batter-1"));
    }

    #[test]
    fn extra_inning_and_unparseable_slams_are_counted_not_kept() {
        let games = vec![make_game("g1")];
        let index = index_games(&games);
        let events = vec![
            slam_event("g1", "V", "10T"),
            {
                let mut e = slam_event("g1", "V", "2T");
                e.inning = None;
                e
            },
            {
                let mut e = slam_event("g1", "V", "2T");
                e.inning = Some("??".into());
                e
            },
        ];
        let mut drops = DropCounts::default();

        let slams = scan_grand_slams(&events, &index, &mut drops);
        assert!(slams.is_empty());
        assert_eq!(drops.extra_inning, 1);
        assert_eq!(drops.unparseable_inning, 2);
    }

    #[test]
    fn unknown_game_and_stranger_team_are_dropped() {
        let games = vec![make_game("g1")];
        let index = index_games(&games);
        let events = vec![
            slam_event("missing", "V", "2T"),
            slam_event("g1", "D", "2T"),
        ];
        let mut drops = DropCounts::default();

        let slams = scan_grand_slams(&events, &index, &mut drops);
        assert!(slams.is_empty());
        assert_eq!(drops.missing_game, 1);
        assert_eq!(drops.side_mismatch, 1);
    }

    #[test]
    fn baseline_matches_threshold_exactly() {
        let mut game = make_game("g1");
        game.visitor_innings[2] = Some(5); // 5-run inning must not qualify
        let config = AnalysisConfig::default();
        let mut drops = DropCounts::default();

        let baseline = scan_baseline(&[game], &config, &mut drops);
        let labels: Vec<&str> = baseline.iter().map(|b| b.inning_label.as_str()).collect();
        assert_eq!(labels, ["2T", "4B"]);
        assert!(baseline.iter().all(|b| b.runs_in_inning == Some(4)));
        assert!(baseline.iter().all(|b| !b.is_grand_slam));
        assert_eq!(baseline[0].team, "V");
        assert_eq!(baseline[1].team, "H");
    }

    #[test]
    fn baseline_skips_sides_without_a_team_id() {
        let mut game = make_game("g1");
        game.away_team_id = None;
        let config = AnalysisConfig::default();
        let mut drops = DropCounts::default();

        let baseline = scan_baseline(&[game], &config, &mut drops);
        // Only the home side's 4-run 4th survives.
        assert_eq!(baseline.len(), 1);
        assert_eq!(baseline[0].side, Side::Home);
        assert_eq!(drops.side_mismatch, 1);
    }

    #[test]
    fn baseline_respects_a_custom_threshold() {
        let game = make_game("g1");
        let config = AnalysisConfig {
            baseline_threshold: 2,
            ..Default::default()
        };
        let mut drops = DropCounts::default();

        let baseline = scan_baseline(&[game], &config, &mut drops);
        assert_eq!(baseline.len(), 1);
        assert_eq!(baseline[0].inning_label, "6T");
    }
}
