//! Sequential resolution of a name list.
use crate::error::LookupFailure;
use crate::powo::client::NameSearch;
use crate::powo::resolver::{MatchKind, MatchOutcome, resolve};
use crate::throttle::Throttle;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::collections::BTreeMap;

/// An input name joined with its lookup outcome. Position in the result
/// vector is the only link back to the input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub raw_name: String,
    pub outcome: MatchOutcome,
}

impl ResultRow {
    pub fn accepted_name(&self) -> Option<&str> {
        self.outcome.as_ref().ok().map(|m| m.name.as_str())
    }

    pub fn author(&self) -> Option<&str> {
        self.outcome.as_ref().ok().map(|m| m.author.as_str())
    }
}

/// Resolves every name in order, one request at a time, pausing after each.
/// The returned vector has exactly one row per input name.
pub async fn run<S, T>(names: Vec<String>, search: &S, throttle: &T) -> Vec<ResultRow>
where
    S: NameSearch + ?Sized,
    T: Throttle + ?Sized,
{
    let total = names.len();
    let pb = progress_bar(total as u64);
    let mut rows = Vec::with_capacity(total);

    for (index, raw_name) in names.into_iter().enumerate() {
        info!("Checking {}/{}: {}", index + 1, total, raw_name);
        pb.set_message(raw_name.clone());

        let outcome = resolve(search, &raw_name).await;
        rows.push(ResultRow { raw_name, outcome });

        throttle.pause().await;
        pb.inc(1);
    }

    pb.finish_with_message("Name checking complete.");
    rows
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
    {
        pb.set_style(style.progress_chars("##-"));
    }
    pb
}

/// Counts per outcome, for the end-of-run report.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub exact: usize,
    pub fallback: usize,
    pub failures: BTreeMap<&'static str, usize>,
}

impl RunSummary {
    pub fn from_rows(rows: &[ResultRow]) -> Self {
        let mut summary = RunSummary {
            total: rows.len(),
            ..Default::default()
        };
        for row in rows {
            match &row.outcome {
                Ok(m) if m.kind == MatchKind::Exact => summary.exact += 1,
                Ok(_) => summary.fallback += 1,
                Err(failure) => *summary.failures.entry(failure.category()).or_insert(0) += 1,
            }
        }
        summary
    }

    pub fn failed(&self) -> usize {
        self.failures.values().sum()
    }

    pub fn failures_for(&self, failure: &LookupFailure) -> usize {
        self.failures.get(failure.category()).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::powo::client::SearchReply;
    use crate::powo::resolver::AcceptedMatch;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers from a fixed table; unknown queries get a transport error.
    struct TableSearch {
        replies: HashMap<String, (u16, String)>,
        seen: Mutex<Vec<String>>,
    }

    impl TableSearch {
        fn new(entries: &[(&str, u16, &str)]) -> Self {
            Self {
                replies: entries
                    .iter()
                    .map(|(q, status, body)| (q.to_string(), (*status, body.to_string())))
                    .collect(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl NameSearch for TableSearch {
        async fn search(&self, query: &str) -> Result<SearchReply, LookupFailure> {
            self.seen.lock().unwrap().push(query.to_string());
            match self.replies.get(query) {
                Some((status, body)) => Ok(SearchReply {
                    status: StatusCode::from_u16(*status).unwrap(),
                    body: body.clone(),
                }),
                None => Err(LookupFailure::Transport("operation timed out".to_string())),
            }
        }
    }

    #[derive(Default)]
    struct CountingThrottle {
        pauses: AtomicUsize,
    }

    #[async_trait]
    impl Throttle for CountingThrottle {
        async fn pause(&self) {
            self.pauses.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn matched_and_unmatched_rows_keep_input_order() {
        let search = TableSearch::new(&[
            (
                "Rosa canina L.",
                200,
                r#"{"results":[{"name":"Rosa indica","author":"L."},{"name":"Rosa canina","author":"L."}]}"#,
            ),
            ("Unknownia fakeia", 200, r#"{"results":[]}"#),
        ]);
        let throttle = CountingThrottle::default();

        let rows = run(names(&["Rosa canina L.", "Unknownia fakeia"]), &search, &throttle).await;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].raw_name, "Rosa canina L.");
        assert_eq!(rows[0].accepted_name(), Some("Rosa canina"));
        assert_eq!(rows[0].author(), Some("L."));
        assert_eq!(rows[1].raw_name, "Unknownia fakeia");
        assert_eq!(rows[1].accepted_name(), None);
        assert_eq!(rows[1].author(), None);
    }

    #[tokio::test]
    async fn every_row_is_throttled_even_on_failure() {
        let search = TableSearch::new(&[("Bellis perennis", 500, "oops")]);
        let throttle = CountingThrottle::default();
        let input = names(&["Bellis perennis", "Not in table", "", "Bellis perennis"]);

        let rows = run(input.clone(), &search, &throttle).await;

        assert_eq!(throttle.pauses.load(Ordering::SeqCst), 4);
        assert_eq!(
            rows.iter().map(|r| r.raw_name.clone()).collect::<Vec<_>>(),
            input
        );
        assert!(rows.iter().all(|r| r.outcome.is_err()));
        assert_eq!(*search.seen.lock().unwrap(), input);
    }

    #[tokio::test]
    async fn empty_input_gives_empty_output() {
        let search = TableSearch::new(&[]);
        let throttle = CountingThrottle::default();
        let rows = run(Vec::new(), &search, &throttle).await;
        assert!(rows.is_empty());
        assert_eq!(throttle.pauses.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn summary_counts_each_outcome() {
        let matched = |kind| {
            Ok(AcceptedMatch {
                name: "Rosa canina".to_string(),
                author: "L.".to_string(),
                kind,
            })
        };
        let rows = vec![
            ResultRow { raw_name: "a".into(), outcome: matched(MatchKind::Exact) },
            ResultRow { raw_name: "b".into(), outcome: matched(MatchKind::Fallback) },
            ResultRow { raw_name: "c".into(), outcome: Err(LookupFailure::EmptyResults) },
            ResultRow { raw_name: "d".into(), outcome: Err(LookupFailure::HttpStatus(404)) },
            ResultRow { raw_name: "e".into(), outcome: Err(LookupFailure::HttpStatus(500)) },
        ];
        let summary = RunSummary::from_rows(&rows);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.exact, 1);
        assert_eq!(summary.fallback, 1);
        assert_eq!(summary.failed(), 3);
        assert_eq!(summary.failures_for(&LookupFailure::HttpStatus(0)), 2);
        assert_eq!(summary.failures_for(&LookupFailure::EmptyResults), 1);
        assert_eq!(summary.failures_for(&LookupFailure::Parse(String::new())), 0);
    }
}
