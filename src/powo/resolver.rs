//! Accepted-name selection for a single query.
use crate::error::LookupFailure;
use crate::powo::client::{NameSearch, SearchReply};
use crate::taxon::normalizer::genus_species_key;
use log::warn;
use reqwest::StatusCode;
use serde::Deserialize;

/// One search hit, with missing fields already defaulted to empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub author: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Genus and species agree with the query.
    Exact,
    /// No hit agreed, the first one was taken.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedMatch {
    pub name: String,
    pub author: String,
    pub kind: MatchKind,
}

pub type MatchOutcome = std::result::Result<AcceptedMatch, LookupFailure>;

// `results` is mandatory; a body without it is not a search response.
#[derive(Deserialize, Debug)]
struct SearchResponse {
    results: Vec<SearchHit>,
}

#[derive(Deserialize, Debug)]
struct SearchHit {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

impl From<SearchHit> for Candidate {
    fn from(hit: SearchHit) -> Self {
        Candidate {
            name: hit.name.unwrap_or_default(),
            author: hit.author.unwrap_or_default(),
        }
    }
}

/// Turns a raw reply into the ordered candidate list.
pub fn parse_reply(reply: &SearchReply) -> std::result::Result<Vec<Candidate>, LookupFailure> {
    if reply.status != StatusCode::OK {
        return Err(LookupFailure::HttpStatus(reply.status.as_u16()));
    }
    let response: SearchResponse =
        serde_json::from_str(&reply.body).map_err(|e| LookupFailure::Parse(e.to_string()))?;
    if response.results.is_empty() {
        return Err(LookupFailure::EmptyResults);
    }
    Ok(response.results.into_iter().map(Candidate::from).collect())
}

/// Picks the first candidate whose genus+species key equals the query's,
/// otherwise the first candidate. `None` only for an empty list.
pub fn select_candidate<'a>(
    query: &str,
    candidates: &'a [Candidate],
) -> Option<(&'a Candidate, MatchKind)> {
    let query_key = genus_species_key(query);
    candidates
        .iter()
        .find(|c| genus_species_key(&c.name) == query_key)
        .map(|c| (c, MatchKind::Exact))
        .or_else(|| candidates.first().map(|c| (c, MatchKind::Fallback)))
}

/// Resolves one raw name against the search service. The unmodified name is
/// sent as the search term; failures of any kind come back as `Err`.
pub async fn resolve<S>(search: &S, name: &str) -> MatchOutcome
where
    S: NameSearch + ?Sized,
{
    let candidates = search
        .search(name)
        .await
        .and_then(|reply| parse_reply(&reply));

    let outcome = candidates.and_then(|candidates| {
        select_candidate(name, &candidates)
            .map(|(best, kind)| AcceptedMatch {
                name: best.name.clone(),
                author: best.author.clone(),
                kind,
            })
            .ok_or(LookupFailure::EmptyResults)
    });

    if let Err(failure) = &outcome {
        warn!("[POWO] {} for '{}' ({})", failure, name, failure.category());
    }
    outcome
}
