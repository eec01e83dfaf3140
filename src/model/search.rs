//! Fuzzy ranking of a materialised collection against a typed query

use std::cmp::Reverse;

use frizbee::{Config, match_list};

use super::items::{AsItemRef, Displayable, ItemRef};
use super::menu::Listing;

/// How a search result maps back onto its source collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ranking {
    /// Blank query: the source itself, in its own order
    PassThrough,
    /// Every source position exactly once, best match first
    Ranked(Vec<Scored>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scored {
    /// Position in the source collection
    pub index: usize,
    /// Similarity from 0 to 100, higher is closer
    pub score: u8,
}

impl Ranking {
    /// Source position shown at result position `position`.
    pub fn source_index(&self, position: usize) -> Option<usize> {
        match self {
            Ranking::PassThrough => Some(position),
            Ranking::Ranked(scored) => scored.get(position).map(|s| s.index),
        }
    }
}

/// Ordered, borrowed view of a source collection produced by a search.
#[derive(Clone, Debug)]
pub struct SearchResultList<'a, T> {
    source: &'a [T],
    ranking: Ranking,
}

impl<'a, T> SearchResultList<'a, T> {
    pub fn len(&self) -> usize {
        match &self.ranking {
            Ranking::PassThrough => self.source.len(),
            Ranking::Ranked(scored) => scored.len(),
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, position: usize) -> Option<&'a T> {
        self.ranking
            .source_index(position)
            .and_then(|index| self.source.get(index))
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        (0..self.len()).filter_map(|position| self.get(position))
    }

    #[cfg(test)]
    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    pub fn into_ranking(self) -> Ranking {
        self.ranking
    }
}

impl<T: AsItemRef> Listing for SearchResultList<'_, T> {
    fn item(&self, index: usize) -> Option<ItemRef<'_>> {
        self.get(index).map(AsItemRef::as_item_ref)
    }
}

pub struct SearchIndex {
    config: Config,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self {
            config: Config {
                prefilter: false,
                max_typos: None,
                ..Config::default()
            },
        }
    }
}

impl SearchIndex {
    /// Rank every item of `items` against `query`.
    ///
    /// Nothing is filtered out: a blank query passes the source through and
    /// any other query reorders it by descending score, ties keeping source
    /// order. Items are matched by position, so equal search texts stay
    /// distinct results.
    pub fn search<'a, T: Displayable>(&self, query: &str, items: &'a [T]) -> SearchResultList<'a, T> {
        let query = query.trim();
        if query.is_empty() {
            return SearchResultList {
                source: items,
                ranking: Ranking::PassThrough,
            };
        }

        let texts: Vec<String> = items.iter().map(Displayable::search_text).collect();
        let mut scored = self.score_all(query, &texts);
        scored.sort_by_key(|s| (Reverse(s.score), s.index));

        tracing::debug!(
            query,
            items = items.len(),
            best = ?scored.first().map(|s| s.score),
            "Search ranked"
        );

        SearchResultList {
            source: items,
            ranking: Ranking::Ranked(scored),
        }
    }

    fn score_all(&self, query: &str, texts: &[String]) -> Vec<Scored> {
        let mut raw = vec![0u32; texts.len()];
        let haystacks: Vec<&str> = texts.iter().map(String::as_str).collect();
        for entry in match_list(query, &haystacks, &self.config) {
            if let Some(slot) = raw.get_mut(entry.index as usize) {
                *slot = entry.score as u32;
            }
        }

        // a query matched against itself scores the maximum
        let needle = [query];
        let perfect = match_list(query, &needle[..], &self.config)
            .first()
            .map(|entry| entry.score as u32)
            .unwrap_or(0)
            .max(1);

        raw.into_iter()
            .enumerate()
            .map(|(index, score)| Scored {
                index,
                score: (score.saturating_mul(100) / perfect).min(100) as u8,
            })
            .collect()
    }
}
