//! Attribution of the next run after a grand-slam trigger.
//!
//! For each trigger that re-ignited (post-event runs at or above the
//! configured minimum), walk the game's best-effort order to the first
//! same-team event with positive RBI in a later half-inning, then classify how the run
//! was produced: a direct home run when the bases were empty, otherwise the
//! reaching-base method of the most advanced runner, resolved by a fixed
//! priority chain with an explicit unclassified terminal.

use std::collections::HashMap;

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::model::{AttributionRecord, Event, Game, Mechanism, PlayType};

use super::aggregate::post_event_production;
use super::bases::BaseState;
use super::extract::is_grand_slam;
use super::notation::{format_inning, parse_inning};
use super::sequence::{sequence_game, SequencedEvent};

/// An event on which a runner could have reached base.
fn reached_base(event: &Event) -> bool {
    event.hits > 0 || event.walk || event.hit_by_pitch || event.reached_on_error
}

/// Classify a reaching event by fixed priority:
/// home run > triple > double > single > walk > HBP > error > unclassified.
pub fn classify_mechanism(event: &Event) -> Mechanism {
    if event.home_run {
        Mechanism::HomeRun
    } else if event.triple {
        Mechanism::Triple
    } else if event.double {
        Mechanism::Double
    } else if event.single {
        Mechanism::Single
    } else if event.walk {
        Mechanism::Walk
    } else if event.hit_by_pitch {
        Mechanism::HitByPitch
    } else if event.reached_on_error {
        Mechanism::ReachedOnError
    } else {
        Mechanism::Unclassified
    }
}

/// Describe the scoring play itself (not the runner's reaching method).
pub fn classify_scoring_play(event: &Event) -> PlayType {
    if event.home_run {
        PlayType::HomeRun
    } else if event.triple {
        PlayType::Triple
    } else if event.double {
        PlayType::Double
    } else if event.single {
        PlayType::Single
    } else if event.walk {
        PlayType::Walk
    } else if event.hit_by_pitch {
        PlayType::HitByPitch
    } else if event.sac_fly {
        PlayType::SacrificeFly
    } else if event.sac_bunt {
        PlayType::SacrificeBunt
    } else {
        PlayType::Other
    }
}

/// Resolve one attribution record per re-igniting grand slam. Triggers with
/// insufficient post-event production, or with no subsequent scoring event,
/// yield no record — both are valid, non-error outcomes.
pub fn resolve_attributions<'a>(
    events: &'a [Event],
    games: &HashMap<&str, &Game>,
    config: &AnalysisConfig,
) -> Vec<AttributionRecord> {
    let mut out = Vec::new();
    // One best-effort order per game, built lazily.
    let mut orders: HashMap<&'a str, Vec<SequencedEvent<'a>>> = HashMap::new();

    for (arrival, trigger) in events.iter().enumerate() {
        if !is_grand_slam(trigger) {
            continue;
        }
        let Some((trigger_no, trigger_half)) =
            trigger.inning.as_deref().and_then(parse_inning)
        else {
            continue;
        };
        if trigger_no > 9 {
            continue;
        }
        let Some(game) = games.get(trigger.game_id.as_str()) else {
            continue;
        };
        let Some(side) = game.side_of(&trigger.team) else {
            continue;
        };

        // Independent re-ignition gate from the boxscore.
        let production = post_event_production(game, side, trigger_no);
        if production.post_runs < config.reignition_min_runs {
            debug!(
                game_id = %trigger.game_id,
                post_runs = production.post_runs,
                "trigger below the re-ignition minimum; skipped"
            );
            continue;
        }

        let order = orders
            .entry(trigger.game_id.as_str())
            .or_insert_with(|| sequence_game(events, &trigger.game_id));
        let trigger_key = super::sequence::order_key(trigger_no, trigger_half);
        let trigger_position = (trigger_key, arrival);

        // The aftermath starts in the next half-inning: runs driven in after
        // the slam but within the trigger inning belong to the trigger
        // inning itself, consistent with the post-event totals above.
        let Some(scoring) = order.iter().find(|s| {
            s.event.team == trigger.team && s.order_key() > trigger_key && s.event.rbi > 0
        }) else {
            debug!(game_id = %trigger.game_id, "no subsequent scoring event for the trigger team");
            continue;
        };

        let state = BaseState::decode(scoring.event.on_base.as_deref());
        let mechanism = if state.empty() {
            // Nobody on: the batter produced the run directly.
            Mechanism::HomeRun
        } else {
            let runner = state.most_advanced();
            match find_reaching_event(order, &trigger.team, trigger_position, scoring) {
                Some(reaching) => {
                    debug!(
                        game_id = %trigger.game_id,
                        ?runner,
                        reaching_arrival = reaching.arrival,
                        "classified scoring runner's reaching event"
                    );
                    classify_mechanism(reaching.event)
                }
                None => {
                    debug!(
                        game_id = %trigger.game_id,
                        ?runner,
                        "runner on base but no reaching event found; no record"
                    );
                    continue;
                }
            }
        };

        out.push(AttributionRecord {
            game_id: trigger.game_id.clone(),
            trigger_inning: format_inning(trigger_no, trigger_half),
            scoring_inning: format_inning(scoring.inning_no, scoring.half),
            mechanism,
            scoring_play: classify_scoring_play(scoring.event),
        });
    }
    out
}

/// Find the event that put the scoring runner on base.
///
/// Scans the scoring half-inning from its start up to and including the
/// scoring event. When that half-inning contains no reaching event, the
/// runner carried over from earlier in the best-effort order, so the scan
/// widens back to just after the trigger. Events at or before the trigger
/// itself are never candidates.
fn find_reaching_event<'s, 'a>(
    order: &'s [SequencedEvent<'a>],
    team: &str,
    trigger_position: (u32, usize),
    scoring: &SequencedEvent<'a>,
) -> Option<&'s SequencedEvent<'a>> {
    let scoring_position = scoring.position();
    let same_half = order.iter().find(|s| {
        s.event.team == team
            && s.order_key() == scoring.order_key()
            && s.position() > trigger_position
            && s.arrival <= scoring.arrival
            && reached_base(s.event)
    });
    if same_half.is_some() {
        return same_half;
    }
    order.iter().find(|s| {
        s.event.team == team
            && s.position() > trigger_position
            && s.position() <= scoring_position
            && reached_base(s.event)
    })
}

/// Deterministic (mechanism, count) tallies in classification priority
/// order; mechanisms that never occurred are omitted.
pub fn mechanism_counts(records: &[AttributionRecord]) -> Vec<(Mechanism, usize)> {
    Mechanism::PRIORITY
        .iter()
        .filter_map(|mechanism| {
            let count = records.iter().filter(|r| r.mechanism == *mechanism).count();
            (count > 0).then_some((*mechanism, count))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extract::index_games;

    fn event(game_id: &str, team: &str, inning: &str) -> Event {
        Event {
            game_id: game_id.into(),
            team: team.into(),
            inning: Some(inning.into()),
            ..Default::default()
        }
    }

    fn slam(game_id: &str, team: &str, inning: &str) -> Event {
        Event {
            on_base: Some("123".into()),
            hits: 1,
            home_run: true,
            rbi: 4,
            ..event(game_id, team, inning)
        }
    }

    /// Visitor scores 4 in the 5th, then keeps scoring: post runs 3.
    fn reignited_game(game_id: &str) -> Game {
        Game {
            game_id: game_id.into(),
            home_team_id: Some("H".into()),
            away_team_id: Some("V".into()),
            visitor_innings: [Some(0), Some(0), Some(0), Some(0), Some(4), Some(1), Some(2), Some(0), Some(0)],
            home_innings: [Some(0); 9],
            ..Default::default()
        }
    }

    #[test]
    fn sacrifice_fly_scores_the_runner_who_singled() {
        // Trigger 5T; a single, then a walk, later in the same half; the
        // sacrifice fly in the 6th scores the runner who reached on the
        // single. Mechanism must be the reaching method, not the fly.
        let games = vec![reignited_game("g1")];
        let index = index_games(&games);

        let single = Event {
            hits: 1,
            single: true,
            ..event("g1", "V", "5T")
        };
        let walk = Event {
            walk: true,
            ..event("g1", "V", "5T")
        };
        let sac_fly = Event {
            on_base: Some("3".into()),
            sac_fly: true,
            rbi: 1,
            ..event("g1", "V", "6B")
        };
        let events = vec![slam("g1", "V", "5T"), single, walk, sac_fly];

        let records = resolve_attributions(&events, &index, &AnalysisConfig::default());
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.trigger_inning, "5T");
        assert_eq!(record.scoring_inning, "6B");
        assert_eq!(record.mechanism, Mechanism::Single);
        assert_eq!(record.scoring_play, PlayType::SacrificeFly);
    }

    #[test]
    fn same_half_rbi_events_belong_to_the_trigger_inning() {
        // Trigger 5T with a single and an RBI single still in the 5th; the
        // first scoring event of the aftermath is the RBI double in the 6th,
        // which drives in the runner who walked.
        let games = vec![reignited_game("g1")];
        let index = index_games(&games);

        let rally_single = Event {
            hits: 1,
            single: true,
            ..event("g1", "V", "5T")
        };
        let rally_rbi_single = Event {
            on_base: Some("1".into()),
            hits: 1,
            single: true,
            rbi: 1,
            ..event("g1", "V", "5T")
        };
        let walk = Event {
            walk: true,
            ..event("g1", "V", "6T")
        };
        let rbi_double = Event {
            on_base: Some("1".into()),
            hits: 1,
            double: true,
            rbi: 1,
            ..event("g1", "V", "6T")
        };
        let events = vec![
            slam("g1", "V", "5T"),
            rally_single,
            rally_rbi_single,
            walk,
            rbi_double,
        ];

        let records = resolve_attributions(&events, &index, &AnalysisConfig::default());
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.scoring_inning, "6T");
        assert_eq!(record.mechanism, Mechanism::Walk);
        assert_eq!(record.scoring_play, PlayType::Double);
    }

    #[test]
    fn slam_never_counts_as_the_reaching_event() {
        // Multi-RBI trigger inning: the runner scored by the 6th-inning fly
        // carried over from the 5th. The reaching event is the post-slam
        // single, never the slam itself.
        let games = vec![reignited_game("g1")];
        let index = index_games(&games);

        let rally_rbi_single = Event {
            on_base: Some("1".into()),
            hits: 1,
            single: true,
            rbi: 1,
            ..event("g1", "V", "5T")
        };
        let carried_runner = Event {
            on_base: Some("3".into()),
            sac_fly: true,
            rbi: 1,
            ..event("g1", "V", "6T")
        };
        let events = vec![slam("g1", "V", "5T"), rally_rbi_single, carried_runner];

        let records = resolve_attributions(&events, &index, &AnalysisConfig::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scoring_inning, "6T");
        assert_eq!(records[0].mechanism, Mechanism::Single);
    }

    #[test]
    fn empty_bases_attribute_a_direct_home_run() {
        let games = vec![reignited_game("g1")];
        let index = index_games(&games);

        let solo_hr = Event {
            hits: 1,
            home_run: true,
            rbi: 1,
            ..event("g1", "V", "6T")
        };
        let events = vec![slam("g1", "V", "5T"), solo_hr];

        let records = resolve_attributions(&events, &index, &AnalysisConfig::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mechanism, Mechanism::HomeRun);
        assert_eq!(records[0].scoring_play, PlayType::HomeRun);
    }

    #[test]
    fn reaching_event_found_within_the_scoring_half_first() {
        let games = vec![reignited_game("g1")];
        let index = index_games(&games);

        // In the 7th: a double, then a single drives the runner in. The
        // runner's reaching method is the double, even though a walk
        // happened back in the 5th.
        let stale_walk = Event {
            walk: true,
            ..event("g1", "V", "5T")
        };
        let double = Event {
            hits: 1,
            double: true,
            ..event("g1", "V", "7T")
        };
        let scoring_single = Event {
            on_base: Some("2".into()),
            hits: 1,
            single: true,
            rbi: 1,
            ..event("g1", "V", "7T")
        };
        let events = vec![slam("g1", "V", "5T"), stale_walk, double, scoring_single];

        let records = resolve_attributions(&events, &index, &AnalysisConfig::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mechanism, Mechanism::Double);
        assert_eq!(records[0].scoring_inning, "7T");
    }

    #[test]
    fn no_reignition_yields_no_record() {
        // Post runs after the 5th total 1 (< 3): not a re-ignition case.
        let mut game = reignited_game("g1");
        game.visitor_innings = [Some(0), Some(0), Some(0), Some(0), Some(4), Some(1), Some(0), Some(0), Some(0)];
        let games = vec![game];
        let index = index_games(&games);

        let scoring = Event {
            hits: 1,
            single: true,
            rbi: 1,
            ..event("g1", "V", "6T")
        };
        let events = vec![slam("g1", "V", "5T"), scoring];

        let records = resolve_attributions(&events, &index, &AnalysisConfig::default());
        assert!(records.is_empty());
    }

    #[test]
    fn no_subsequent_scoring_event_yields_no_record() {
        let games = vec![reignited_game("g1")];
        let index = index_games(&games);

        // Only opponent events follow the slam.
        let opponent = Event {
            hits: 1,
            single: true,
            rbi: 2,
            ..event("g1", "H", "5B")
        };
        let events = vec![slam("g1", "V", "5T"), opponent];

        let records = resolve_attributions(&events, &index, &AnalysisConfig::default());
        assert!(records.is_empty());
    }

    #[test]
    fn runner_on_base_without_any_reaching_event_yields_no_record() {
        let games = vec![reignited_game("g1")];
        let index = index_games(&games);

        // A runner shows on base at the scoring event but no event since the
        // trigger explains how they reached.
        let ghost_runner = Event {
            on_base: Some("2".into()),
            sac_fly: true,
            rbi: 1,
            ..event("g1", "V", "6T")
        };
        let events = vec![slam("g1", "V", "5T"), ghost_runner];

        let records = resolve_attributions(&events, &index, &AnalysisConfig::default());
        assert!(records.is_empty());
    }

    #[test]
    fn extra_inning_triggers_are_skipped() {
        let games = vec![reignited_game("g1")];
        let index = index_games(&games);
        let events = vec![slam("g1", "V", "10T")];

        let records = resolve_attributions(&events, &index, &AnalysisConfig::default());
        assert!(records.is_empty());
    }

    #[test]
    fn mechanism_priority_prefers_the_bigger_hit() {
        let loaded_triple = Event {
            hits: 1,
            single: true,
            triple: true,
            ..Default::default()
        };
        assert_eq!(classify_mechanism(&loaded_triple), Mechanism::Triple);

        let walk_only = Event {
            walk: true,
            ..Default::default()
        };
        assert_eq!(classify_mechanism(&walk_only), Mechanism::Walk);

        let nothing = Event::default();
        assert_eq!(classify_mechanism(&nothing), Mechanism::Unclassified);
    }

    #[test]
    fn mechanism_counts_follow_priority_order() {
        let record = |mechanism| AttributionRecord {
            game_id: "g1".into(),
            trigger_inning: "5T".into(),
            scoring_inning: "6T".into(),
            mechanism,
            scoring_play: PlayType::Other,
        };
        let records = vec![
            record(Mechanism::Walk),
            record(Mechanism::HomeRun),
            record(Mechanism::Walk),
            record(Mechanism::Single),
        ];
        let counts = mechanism_counts(&records);
        assert_eq!(
            counts,
            vec![
                (Mechanism::HomeRun, 1),
                (Mechanism::Single, 1),
                (Mechanism::Walk, 2),
            ]
        );
    }
}
