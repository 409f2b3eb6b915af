use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::types::KeywordSnapshot;

/// How many competitors `top_competitors` keeps.
pub const TOP_COMPETITORS: usize = 10;

/// An app that ranks for one or more of the tracked keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Competitor {
    pub app_id: String,
    /// Number of ranking lists the app appeared in
    pub keyword_count: u32,
    /// 1-based search position per keyword
    pub positions: BTreeMap<String, u32>,
}

/// Aggregate the ranking lists of several keywords into the apps that rank
/// for the most of them.
///
/// Each snapshot's `apps` are read in search order. Apps without an `app_id`
/// and the app being optimized (`own_app_id`) are skipped. The result is
/// sorted by `keyword_count` descending, ties keep first-seen order, and is
/// cut to `limit` entries.
pub fn top_competitors(
    snapshots: &[KeywordSnapshot],
    own_app_id: Option<&str>,
    limit: usize,
) -> Vec<Competitor> {
    let mut competitors: Vec<Competitor> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for snap in snapshots {
        let keyword = snap.keyword.trim();
        for (position, app) in snap.apps.iter().enumerate() {
            let Some(app_id) = app.app_id.as_deref() else {
                continue;
            };
            if Some(app_id) == own_app_id {
                continue;
            }

            let slot = *index.entry(app_id.to_string()).or_insert_with(|| {
                competitors.push(Competitor {
                    app_id: app_id.to_string(),
                    keyword_count: 0,
                    positions: BTreeMap::new(),
                });
                competitors.len() - 1
            });
            let competitor = &mut competitors[slot];
            competitor.keyword_count += 1;
            competitor.positions.insert(keyword.to_string(), position as u32 + 1);
        }
    }

    // Stable sort keeps first-seen order among equal counts
    competitors.sort_by(|a, b| b.keyword_count.cmp(&a.keyword_count));
    competitors.truncate(limit);

    tracing::debug!(
        keywords = snapshots.len(),
        competitors = competitors.len(),
        "top competitors aggregated"
    );
    competitors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::AppMetadata;
    use chrono::{TimeZone, Utc};

    fn snapshot(keyword: &str, app_ids: &[&str]) -> KeywordSnapshot {
        KeywordSnapshot {
            keyword: keyword.to_string(),
            competitors_count: None,
            apps: app_ids
                .iter()
                .map(|id| AppMetadata {
                    app_id: Some(id.to_string()),
                    title: format!("App {}", id),
                    min_installs: 1_000,
                    max_installs: 5_000,
                    rating: 4.0,
                    updated: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
                })
                .collect(),
            suggest_score: None,
            rank: None,
        }
    }

    #[test]
    fn test_counts_keywords_per_app() {
        let snapshots = vec![
            snapshot("photo editor", &["com.a", "com.b", "com.c"]),
            snapshot("collage maker", &["com.c", "com.a"]),
            snapshot("photo filter", &["com.a"]),
        ];
        let top = top_competitors(&snapshots, None, TOP_COMPETITORS);

        let ids: Vec<_> = top.iter().map(|c| c.app_id.as_str()).collect();
        assert_eq!(ids, vec!["com.a", "com.c", "com.b"]);
        assert_eq!(top[0].keyword_count, 3);
        assert_eq!(top[0].positions["photo editor"], 1);
        assert_eq!(top[0].positions["collage maker"], 2);
        assert_eq!(top[1].positions["collage maker"], 1);
        assert_eq!(top[2].keyword_count, 1);
    }

    #[test]
    fn test_excludes_own_app() {
        let snapshots = vec![snapshot("photo editor", &["com.mine", "com.b"])];
        let top = top_competitors(&snapshots, Some("com.mine"), TOP_COMPETITORS);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].app_id, "com.b");
        // Position is the search position, counting the excluded app
        assert_eq!(top[0].positions["photo editor"], 2);
    }

    #[test]
    fn test_keeps_only_limit() {
        let ids: Vec<String> = (0..15).map(|i| format!("com.app{}", i)).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let snapshots = vec![snapshot("photo editor", &id_refs)];

        let top = top_competitors(&snapshots, None, TOP_COMPETITORS);
        assert_eq!(top.len(), 10);
        // All tied at one keyword, so search order is kept
        assert_eq!(top[0].app_id, "com.app0");
        assert_eq!(top[9].app_id, "com.app9");
    }

    #[test]
    fn test_apps_without_id_are_skipped() {
        let mut snap = snapshot("photo editor", &["com.a", "com.b"]);
        snap.apps[0].app_id = None;
        let top = top_competitors(&[snap], None, TOP_COMPETITORS);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].app_id, "com.b");
    }

    #[test]
    fn test_empty_input() {
        assert!(top_competitors(&[], Some("com.mine"), TOP_COMPETITORS).is_empty());
    }
}
