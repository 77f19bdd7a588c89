use tracing::debug;

use super::similarity::ratio;
use super::types::{CommandTable, Intent, MatchReport, NoMatch};
use super::utterance::Utterance;

pub const DEFAULT_SAFETY_THRESHOLD: f64 = 0.70;
pub const DEFAULT_NEAR_MISS_FLOOR: f64 = 0.40;

/// Maps a noisy utterance to at most one intent.
///
/// Pure: the result depends only on the utterance, the table and the threshold.
/// Holds no state between calls, so one resolver can be shared freely.
#[derive(Debug, Clone)]
pub struct CommandResolver {
    table: CommandTable,
    safety_threshold: f64,
    near_miss_floor: f64,
}

impl CommandResolver {
    pub fn new(table: CommandTable, safety_threshold: f64) -> Self {
        Self {
            table,
            safety_threshold,
            near_miss_floor: DEFAULT_NEAR_MISS_FLOOR,
        }
    }

    pub fn with_near_miss_floor(mut self, floor: f64) -> Self {
        self.near_miss_floor = floor;
        self
    }

    pub fn safety_threshold(&self) -> f64 {
        self.safety_threshold
    }

    /// Global maximum over every (token, alias) pair.
    ///
    /// Tie-break: tokens in utterance order, then intents in `Intent::ALL` order,
    /// then aliases in table order. Only a strictly higher score replaces the
    /// current best, so the first pair reaching the maximum wins.
    pub fn evaluate(&self, utterance: &Utterance) -> Option<MatchReport> {
        let mut best: Option<MatchReport> = None;

        for token in utterance.tokens() {
            for (intent, aliases) in self.table.iter() {
                for alias in aliases {
                    let score = ratio(token, alias);
                    let better = match &best {
                        Some(b) => score > b.score,
                        None => score > 0.0,
                    };
                    if better {
                        best = Some(MatchReport {
                            intent,
                            score,
                            token: token.clone(),
                            alias: alias.clone(),
                        });
                    }
                }
            }
        }

        best
    }

    /// Resolve a cleaned utterance. Below the safety threshold only the best
    /// score comes back, however close it came.
    pub fn resolve_utterance(&self, utterance: &Utterance) -> Result<MatchReport, NoMatch> {
        let Some(best) = self.evaluate(utterance) else {
            return Err(NoMatch { best_score: None });
        };

        if best.score >= self.safety_threshold {
            Ok(best)
        } else {
            if best.score > self.near_miss_floor {
                debug!(
                    "Ignored: best match {} was only {}% ('{}' vs '{}')",
                    best.intent,
                    (best.score * 100.0) as u32,
                    best.token,
                    best.alias
                );
            }
            Err(NoMatch { best_score: Some(best.score) })
        }
    }

    /// Raw text in, intent out.
    pub fn resolve(&self, utterance: &str) -> Option<Intent> {
        self.resolve_utterance(&Utterance::clean(utterance)).ok().map(|m| m.intent)
    }
}

impl Default for CommandResolver {
    fn default() -> Self {
        Self::new(CommandTable::default(), DEFAULT_SAFETY_THRESHOLD)
    }
}
