use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::Interval;

/// One symbol's open interest and its percentage change per interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
    pub symbol: String,
    #[serde(default)]
    pub current_open_interest: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_changes")]
    pub changes: HashMap<String, Option<f64>>,
}

impl CoinRecord {
    pub fn change(&self, interval: Interval) -> Option<f64> {
        self.changes.get(interval.label()).copied().flatten()
    }
}

/// The backend has shipped `changes` in three shapes over time: a plain
/// label -> number map, a label -> detail object map, and a list of detail
/// objects carrying their own `interval` label.
#[derive(Deserialize)]
#[serde(untagged)]
enum ChangesRepr {
    Plain(HashMap<String, Option<f64>>),
    Detailed(HashMap<String, Option<ChangeDetail>>),
    Listed(Vec<ListedChange>),
}

#[derive(Deserialize)]
struct ChangeDetail {
    #[serde(default)]
    ratio: Option<f64>,
}

#[derive(Deserialize)]
struct ListedChange {
    interval: String,
    #[serde(default)]
    ratio: Option<f64>,
}

fn deserialize_changes<'de, D>(
    deserializer: D,
) -> Result<HashMap<String, Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<ChangesRepr>::deserialize(deserializer)?;

    let changes = match repr {
        None => HashMap::new(),
        Some(ChangesRepr::Plain(map)) => map,
        Some(ChangesRepr::Detailed(map)) => map
            .into_iter()
            .map(|(interval, detail)| {
                (interval, detail.and_then(|d| d.ratio))
            })
            .collect(),
        Some(ChangesRepr::Listed(items)) => items
            .into_iter()
            .map(|item| (item.interval, item.ratio))
            .collect(),
    };

    Ok(changes)
}
