use std::path::PathBuf;

use fs_err as fs;
use futures::future::try_join_all;
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{CachePolicy, Fetcher};
use crate::model::{Match, Player, Tournament, TournamentSummary};
use crate::scraper::{decklist, pairings, standings, tournament_list, Html};

/// Query for completed Pocket tournaments; `&page=N` is appended for pages
/// past the first.
const COMPLETED_TOURNAMENTS_PATH: &str =
    "/tournaments/completed?game=POCKET&format=STANDARD&platform=all&type=online&time=all";

fn standings_path(tournament_id: &str) -> String {
    format!("/tournament/{tournament_id}/standings?players")
}

fn pairings_path(tournament_id: &str) -> String {
    format!("/tournament/{tournament_id}/pairings")
}

fn decklist_path(tournament_id: &str, player_id: &str) -> String {
    format!("/tournament/{tournament_id}/player/{player_id}/decklist")
}

/// Counters for one crawl run.
#[derive(Debug, Default, Clone)]
pub struct CrawlReport {
    pub pages: u32,
    pub written: u32,
    pub skipped_existing: u32,
    pub abandoned: u32,
    pub failed: u32,
}

#[derive(Debug)]
enum TournamentOutcome {
    Written { players: usize, matches: usize },
    AlreadyExists,
    NoDecklists,
}

/// Walks the completed-tournaments listing page by page and persists one
/// JSON artifact per tournament.
///
/// Within a page, standings and decklist fetches fan out concurrently;
/// pages themselves are strictly sequential since each page's pagination
/// indicator decides whether another follows. A tournament that fails only
/// stops its own processing, not the crawl.
pub struct Crawler {
    fetcher: Fetcher,
    config: Config,
}

impl Crawler {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Fetcher::new(&config)?;
        fs::create_dir_all(&config.output_dir)?;
        Ok(Self { fetcher, config })
    }

    /// Crawl every listing page, starting from the first.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<CrawlReport> {
        let mut report = CrawlReport::default();
        let mut page = 1;
        loop {
            let (current_page, max_page) = self.crawl_page(page, &mut report).await?;
            report.pages += 1;
            if current_page >= max_page {
                break;
            }
            page = current_page + 1;
        }

        info!(
            pages = report.pages,
            written = report.written,
            skipped = report.skipped_existing,
            abandoned = report.abandoned,
            failed = report.failed,
            "crawl finished"
        );
        Ok(report)
    }

    /// Process one listing page; returns its pagination indicators.
    async fn crawl_page(&self, page: u32, report: &mut CrawlReport) -> Result<(u32, u32)> {
        // The listing changes between runs, so it is never served from cache.
        let path = if page <= 1 {
            COMPLETED_TOURNAMENTS_PATH.to_string()
        } else {
            format!("{COMPLETED_TOURNAMENTS_PATH}&page={page}")
        };
        let document = self.fetcher.get_document(&path, CachePolicy::Bypass).await?;
        let list = tournament_list::parse_tournament_page(&document)?;
        info!(
            page = list.current_page,
            max = list.max_page,
            tournaments = list.tournaments.len(),
            "extracting completed tournaments page"
        );

        let standings_docs = try_join_all(list.tournaments.iter().map(|tournament| {
            let path = standings_path(&tournament.id);
            async move { self.fetcher.get_document(&path, CachePolicy::Use).await }
        }))
        .await?;

        for (summary, standings_doc) in list.tournaments.iter().zip(&standings_docs) {
            match self.process_tournament(summary, standings_doc).await {
                Ok(TournamentOutcome::Written { players, matches }) => {
                    report.written += 1;
                    info!(tournament_id = %summary.id, players, matches, "tournament written");
                }
                Ok(TournamentOutcome::AlreadyExists) => {
                    report.skipped_existing += 1;
                    info!(tournament_id = %summary.id, "skipping, already in output");
                }
                Ok(TournamentOutcome::NoDecklists) => {
                    report.abandoned += 1;
                    info!(tournament_id = %summary.id, "skipping, no decklist detected");
                }
                Err(e) => {
                    report.failed += 1;
                    error!(tournament_id = %summary.id, error = %e, "tournament extraction failed");
                }
            }
        }

        Ok((list.current_page, list.max_page))
    }

    fn artifact_path(&self, tournament_id: &str) -> PathBuf {
        self.config.output_dir.join(format!("{tournament_id}.json"))
    }

    /// Assemble and persist one tournament, unless an artifact already
    /// exists or no player has a decklist.
    async fn process_tournament(
        &self,
        summary: &TournamentSummary,
        standings_doc: &Html,
    ) -> Result<TournamentOutcome> {
        let artifact = self.artifact_path(&summary.id);
        if artifact.exists() {
            return Ok(TournamentOutcome::AlreadyExists);
        }

        let players = self.extract_players(standings_doc, &summary.id).await?;
        if players.is_empty() {
            return Ok(TournamentOutcome::NoDecklists);
        }

        let matches = self.extract_matches(&summary.id).await?;

        let tournament = Tournament {
            id: summary.id.clone(),
            name: summary.name.clone(),
            date: summary.date,
            organizer: summary.organizer.clone(),
            format: summary.format.clone(),
            nb_players: summary.nb_players,
            players,
            matches,
        };

        fs::write(&artifact, serde_json::to_string_pretty(&tournament)?)?;
        Ok(TournamentOutcome::Written {
            players: tournament.players.len(),
            matches: tournament.matches.len(),
        })
    }

    /// Roster with decklists. Players whose standings row has no decklist
    /// link are dropped entirely; the rest keep their standings order.
    async fn extract_players(
        &self,
        standings_doc: &Html,
        tournament_id: &str,
    ) -> Result<Vec<Player>> {
        let rows = standings::parse_standings(standings_doc)?;
        let paths: Vec<Option<String>> = rows
            .iter()
            .map(|row| {
                row.has_decklist
                    .then(|| decklist_path(tournament_id, &row.id))
            })
            .collect();
        let documents = self.fetcher.fetch_all(&paths, CachePolicy::Use).await?;

        let mut players = Vec::new();
        for (row, document) in rows.into_iter().zip(documents) {
            let Some(document) = document else {
                continue;
            };
            players.push(Player {
                id: row.id,
                name: row.name,
                placing: row.placing,
                country: row.country,
                decklist: decklist::parse_decklist(&document)?,
            });
        }
        Ok(players)
    }

    /// Matches from the current pairings page plus all linked previous
    /// rounds, previous rounds first.
    async fn extract_matches(&self, tournament_id: &str) -> Result<Vec<Match>> {
        let current = self
            .fetcher
            .get_document(&pairings_path(tournament_id), CachePolicy::Use)
            .await?;
        let previous_paths = pairings::previous_pairings_paths(&current)?;
        let mut documents = try_join_all(previous_paths.into_iter().map(|path| async move {
            self.fetcher.get_document(&path, CachePolicy::Use).await
        }))
        .await?;
        documents.push(current);

        let mut matches = Vec::new();
        for document in &documents {
            matches.extend(pairings::parse_pairings(document, tournament_id)?);
        }
        Ok(matches)
    }
}
