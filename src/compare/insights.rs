use crate::db::models::Player;

use super::trend::{regression_slope, stat_line, INSIGHT_TREND_THRESHOLD};

/// A total must be more than this multiple of the other to name a leader.
const TOTAL_LEAD_FACTOR: f64 = 1.2;
/// Same, for per-match consistency.
const CONSISTENCY_LEAD_FACTOR: f64 = 1.15;

/// score + assists + rebounds
pub fn total(player: &Player) -> u64 {
    player.score as u64 + player.assists as u64 + player.rebounds as u64
}

/// Total per match played, 0 when no matches are recorded.
pub fn consistency_ratio(player: &Player) -> f64 {
    if player.matches == 0 {
        return 0.0;
    }
    total(player) as f64 / player.matches as f64
}

/// Wins as a percentage of matches, 0 when no matches are recorded.
/// Not capped: `wins > matches` yields a rate above 100.
pub fn win_rate(player: &Player) -> f64 {
    if player.matches == 0 {
        return 0.0;
    }
    100.0 * player.wins as f64 / player.matches as f64
}

/// Which of two values leads by strictly more than `factor`, if either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lead {
    First,
    Second,
}

fn lead_by_factor(a: f64, b: f64, factor: f64) -> Option<Lead> {
    if a > b * factor {
        Some(Lead::First)
    } else if b > a * factor {
        Some(Lead::Second)
    } else {
        None
    }
}

/// Build the ordered list of comparative observations for two players.
///
/// Steps run in a fixed order and player 1 precedes player 2 within a step:
/// overall total, consistency, win rate, trend, specialization. The first
/// step always yields one sentence, the others may yield none.
pub fn generate_insights(p1: &Player, p2: &Player) -> Vec<String> {
    let mut insights = Vec::with_capacity(8);

    // Overall
    let (t1, t2) = (total(p1), total(p2));
    match lead_by_factor(t1 as f64, t2 as f64, TOTAL_LEAD_FACTOR) {
        Some(Lead::First) => insights.push(overall_sentence(p1, t1, t2)),
        Some(Lead::Second) => insights.push(overall_sentence(p2, t2, t1)),
        None => insights.push("Both players have comparable overall performance".to_string()),
    }

    // Consistency
    let (r1, r2) = (consistency_ratio(p1), consistency_ratio(p2));
    match lead_by_factor(r1, r2, CONSISTENCY_LEAD_FACTOR) {
        Some(Lead::First) => insights.push(consistency_sentence(p1, r1, r2)),
        Some(Lead::Second) => insights.push(consistency_sentence(p2, r2, r1)),
        None => {}
    }

    // Win rate
    let (w1, w2) = (win_rate(p1), win_rate(p2));
    if w1 > w2 {
        insights.push(win_rate_sentence(p1, w1, w2));
    } else if w2 > w1 {
        insights.push(win_rate_sentence(p2, w2, w1));
    }

    // Trend
    for player in [p1, p2] {
        if let Some(sentence) = trend_sentence(player) {
            insights.push(sentence);
        }
    }

    // Specialization
    for player in [p1, p2] {
        if let Some(sentence) = specialization_sentence(player) {
            insights.push(sentence);
        }
    }

    insights
}

fn overall_sentence(leader: &Player, lead: u64, other: u64) -> String {
    format!(
        "{} has significantly higher overall performance ({} vs {} total)",
        leader.name, lead, other
    )
}

fn consistency_sentence(leader: &Player, lead: f64, other: f64) -> String {
    format!(
        "{} shows better consistency ({:.1} vs {:.1} per match)",
        leader.name, lead, other
    )
}

fn win_rate_sentence(leader: &Player, lead: f64, other: f64) -> String {
    format!(
        "{} has a higher win rate ({:.1}% vs {:.1}%)",
        leader.name, lead, other
    )
}

fn trend_sentence(player: &Player) -> Option<String> {
    let slope = regression_slope(&stat_line(player));
    if slope > INSIGHT_TREND_THRESHOLD {
        Some(format!(
            "{} is showing an improving performance trend",
            player.name
        ))
    } else if slope < -INSIGHT_TREND_THRESHOLD {
        Some(format!("{} is showing a declining performance trend", player.name))
    } else {
        None
    }
}

/// Scorer when score is the strict maximum, playmaker when assists is.
///
/// A profile led by rebounds, or any tie for the top value, produces no
/// sentence. There is deliberately no "rebounder" branch.
fn specialization_sentence(player: &Player) -> Option<String> {
    let (s, a, r) = (player.score, player.assists, player.rebounds);
    if s > a && s > r {
        Some(format!("{} is primarily a scorer", player.name))
    } else if a > s && a > r {
        Some(format!("{} excels as a playmaker", player.name))
    } else {
        None
    }
}
