use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{vector::JoinedChunk, ScoredArticle};

/// Collapse chunk hits into one entry per article. The article score is the
/// maximum of its chunk scores: one strong passage surfaces the whole
/// article. Output is sorted by descending score; the sort is stable, so
/// equal scores keep first-seen order and repeated identical requests rank
/// identically.
pub fn dedupe_ranked(joined: Vec<JoinedChunk>) -> Vec<ScoredArticle> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, ScoredArticle> = HashMap::new();

    for chunk in joined {
        let article_id = chunk.article.id.clone();
        match grouped.get_mut(&article_id) {
            Some(entry) => {
                if chunk.score > entry.score {
                    entry.score = chunk.score;
                }
                entry.chunk_hits += 1;
            }
            None => {
                order.push(article_id.clone());
                grouped.insert(
                    article_id,
                    ScoredArticle {
                        article: chunk.article,
                        score: chunk.score,
                        chunk_hits: 1,
                    },
                );
            }
        }
    }

    let mut ranked: Vec<ScoredArticle> = order
        .into_iter()
        .filter_map(|id| grouped.remove(&id))
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::storage::types::article::Article;
    use std::collections::HashMap;

    fn article(id: &str) -> Article {
        let mut article = Article::new(
            format!("Article {id}"),
            "abstract".to_string(),
            vec!["Doe J".to_string()],
            Utc::now(),
            HashMap::new(),
        );
        article.id = id.to_string();
        article
    }

    fn hit(id: &str, score: f32) -> JoinedChunk {
        JoinedChunk {
            article: article(id),
            score,
        }
    }

    #[test]
    fn duplicate_hits_keep_max_score() {
        let ranked = dedupe_ranked(vec![hit("a", 0.6), hit("b", 0.7), hit("a", 0.9)]);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].article.id, "a");
        assert!((ranked[0].score - 0.9).abs() < f32::EPSILON);
        assert_eq!(ranked[0].chunk_hits, 2);
        assert_eq!(ranked[1].chunk_hits, 1);
    }

    #[test]
    fn output_is_sorted_descending() {
        let ranked = dedupe_ranked(vec![hit("a", 0.77), hit("b", 0.91), hit("c", 0.88)]);

        let ids: Vec<&str> = ranked.iter().map(|r| r.article.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        for window in ranked.windows(2) {
            assert!(window[0].score >= window[1].score);
        }
    }

    #[test]
    fn equal_scores_keep_first_seen_order() {
        let ranked = dedupe_ranked(vec![hit("x", 0.5), hit("y", 0.5), hit("z", 0.5)]);

        let ids: Vec<&str> = ranked.iter().map(|r| r.article.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }

    #[test]
    fn later_weaker_hit_does_not_lower_score() {
        let ranked = dedupe_ranked(vec![hit("a", 0.9), hit("a", 0.6)]);

        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].score - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(dedupe_ranked(Vec::new()).is_empty());
    }
}
