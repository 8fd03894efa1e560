//! Report lifecycle.
//!
//! `Idle → Loading → Loaded`, with ServerSide navigation re-entering
//! `Loading` while a page is in flight and any fetch error landing in
//! `Failed`. `update` is pure: it mutates the controller and returns the
//! commands the executors should run, so every transition is testable
//! without a browser.

use crate::config::{ExportScope, ReportConfig};
use crate::error::ReportError;
use crate::messages::{Command, ExportJob, ExportSummary, Message, ReportView};
use crate::models::{Contribution, Fundraiser, ReportPage};
use crate::network::data_source::{FetchRequest, FetchTarget, FetchedReport};
use crate::pagination::{Navigation, PaginationController, PaginationMode};
use crate::render::TableRenderer;
use crate::toast::ToastKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportStatus {
    Idle,
    Loading,
    Loaded,
    Failed(ReportError),
}

pub struct ReportController {
    fundraiser_id: String,
    fundraiser: Fundraiser,
    mode: PaginationMode,
    page_size: usize,
    export_scope: ExportScope,
    renderer: TableRenderer,
    pagination: Option<PaginationController>,
    status: ReportStatus,
    next_seq: u64,
    // Sequence number of the only fetch whose response is still wanted.
    pending_seq: Option<u64>,
    last_target: FetchTarget,
    exporting: bool,
}

impl ReportController {
    /// `fallback` supplies fundraiser metadata until (or unless) the server
    /// sends its own.
    pub fn new(config: &ReportConfig, fundraiser_id: impl Into<String>, fallback: Fundraiser) -> Self {
        let mode = config.mode;
        Self {
            fundraiser_id: fundraiser_id.into().trim().to_string(),
            fundraiser: fallback,
            mode,
            page_size: config.page_size,
            export_scope: config.export_scope,
            renderer: TableRenderer::new(config.locale_format()),
            pagination: None,
            status: ReportStatus::Idle,
            next_seq: 0,
            pending_seq: None,
            last_target: initial_target(mode),
            exporting: false,
        }
    }

    pub fn status(&self) -> &ReportStatus {
        &self.status
    }

    pub fn pagination(&self) -> Option<&PaginationController> {
        self.pagination.as_ref()
    }

    pub fn fundraiser(&self) -> &Fundraiser {
        &self.fundraiser
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// What the table should currently show, once anything has loaded.
    pub fn view(&self) -> Option<ReportView> {
        let pagination = self.pagination.as_ref()?;
        Some(ReportView {
            rows: self.renderer.render(pagination.current_items()),
            page_label: pagination.page_summary().label(),
            controls: pagination.controls(),
            export_enabled: !self.exporting,
        })
    }

    pub fn update(&mut self, msg: Message) -> Vec<Command> {
        match msg {
            Message::LoadReport => {
                let target = initial_target(self.mode);
                self.begin_fetch(target)
            }

            Message::Retry => {
                if !matches!(self.status, ReportStatus::Failed(_)) {
                    log::debug!("retry ignored in state {:?}", self.status);
                    return Vec::new();
                }
                self.begin_fetch(self.last_target)
            }

            Message::NextPage => self.navigate(|p| p.go_to_next()),
            Message::PreviousPage => self.navigate(|p| p.go_to_previous()),
            Message::GoToPage(n) => self.navigate(|p| p.go_to_page(n)),

            Message::ExportRequested => self.request_export(),

            Message::ReportFetched { seq, result } => {
                if self.pending_seq != Some(seq) {
                    log::debug!(
                        "discarding stale response #{} (waiting for {:?})",
                        seq,
                        self.pending_seq
                    );
                    return Vec::new();
                }
                self.pending_seq = None;
                match result.and_then(|report| self.install(report)) {
                    Ok(()) => {
                        self.status = ReportStatus::Loaded;
                        self.render_commands()
                    }
                    Err(err) => self.fail(err),
                }
            }

            Message::ExportFinished(result) => {
                self.exporting = false;
                match result {
                    Ok(ExportSummary { filename, rows }) => {
                        log::info!("report export finished: {} ({} rows)", filename, rows);
                        vec![Command::Notify {
                            kind: ToastKind::Success,
                            text: format!("Report saved as {}", filename),
                        }]
                    }
                    Err(err) => {
                        log::error!("report export failed: {}", err);
                        vec![Command::Notify {
                            kind: ToastKind::Error,
                            text: err.user_message(),
                        }]
                    }
                }
            }
        }
    }

    fn begin_fetch(&mut self, target: FetchTarget) -> Vec<Command> {
        self.last_target = target;
        if self.fundraiser_id.is_empty() {
            return self.fail(ReportError::InvalidInput("fundraiser id is empty".to_string()));
        }

        self.next_seq += 1;
        let seq = self.next_seq;
        if let Some(superseded) = self.pending_seq.replace(seq) {
            log::debug!("fetch #{} superseded by #{}", superseded, seq);
        }
        self.status = ReportStatus::Loading;

        vec![Command::Fetch(FetchRequest {
            seq,
            fundraiser_id: self.fundraiser_id.clone(),
            target,
        })]
    }

    fn navigate<F>(&mut self, step: F) -> Vec<Command>
    where
        F: FnOnce(&mut PaginationController) -> Result<Navigation, ReportError>,
    {
        if matches!(self.status, ReportStatus::Idle | ReportStatus::Failed(_)) {
            log::debug!("navigation ignored in state {:?}", self.status);
            return Vec::new();
        }
        let Some(pagination) = self.pagination.as_mut() else {
            return Vec::new();
        };

        match step(pagination) {
            Ok(Navigation::Moved) => self.render_commands(),
            Ok(Navigation::Fetch(page)) => self.begin_fetch(FetchTarget::Page(page)),
            Err(ReportError::OutOfRange { requested }) => {
                log::debug!("page {} is out of range", requested);
                vec![Command::SetControls(pagination.controls())]
            }
            Err(err) => {
                log::warn!("navigation failed: {}", err);
                vec![Command::Notify {
                    kind: ToastKind::Error,
                    text: err.user_message(),
                }]
            }
        }
    }

    fn request_export(&mut self) -> Vec<Command> {
        if self.status != ReportStatus::Loaded {
            return vec![Command::Notify {
                kind: ToastKind::Info,
                text: "The report has not finished loading yet.".to_string(),
            }];
        }
        if self.exporting {
            return vec![Command::Notify {
                kind: ToastKind::Info,
                text: "The report is already being exported.".to_string(),
            }];
        }
        let Some(pagination) = self.pagination.as_ref() else {
            return Vec::new();
        };

        let contributions: Vec<Contribution> = match self.export_scope {
            ExportScope::AllHeld => pagination.held_items().to_vec(),
            ExportScope::CurrentPage => pagination.current_items().to_vec(),
        };
        self.exporting = true;
        vec![Command::Export(ExportJob {
            fundraiser: self.fundraiser.clone(),
            contributions,
        })]
    }

    fn install(&mut self, report: FetchedReport) -> Result<(), ReportError> {
        match report {
            FetchedReport::All { fundraiser, items } => {
                self.adopt_fundraiser(fundraiser);
                self.pagination = Some(PaginationController::client_side(self.page_size, items)?);
            }
            FetchedReport::Page { fundraiser, page } => {
                self.adopt_fundraiser(fundraiser);
                self.install_page(page)?;
            }
        }
        Ok(())
    }

    fn install_page(&mut self, page: ReportPage) -> Result<(), ReportError> {
        match self.pagination.as_mut() {
            Some(pagination) => pagination.replace_page(page),
            None => {
                self.pagination = Some(PaginationController::server_side(self.page_size, page)?);
                Ok(())
            }
        }
    }

    fn adopt_fundraiser(&mut self, fundraiser: Option<Fundraiser>) {
        if let Some(mut fundraiser) = fundraiser {
            if fundraiser.id.is_empty() {
                fundraiser.id = self.fundraiser_id.clone();
            }
            self.fundraiser = fundraiser;
        }
    }

    fn fail(&mut self, err: ReportError) -> Vec<Command> {
        log::warn!("report failed to load: {}", err);
        let text = err.user_message();
        self.status = ReportStatus::Failed(err);
        vec![
            Command::ShowFailure(text.clone()),
            Command::Notify {
                kind: ToastKind::Error,
                text,
            },
        ]
    }

    fn render_commands(&self) -> Vec<Command> {
        self.view().map(Command::Render).into_iter().collect()
    }
}

fn initial_target(mode: PaginationMode) -> FetchTarget {
    match mode {
        PaginationMode::ClientSide => FetchTarget::All,
        PaginationMode::ServerSide => FetchTarget::Page(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::ControlState;

    fn contributions(n: usize) -> Vec<Contribution> {
        (0..n)
            .map(|i| Contribution {
                reference: format!("R{}", i),
                contributor_name: format!("Donor {}", i),
                amount: "500".to_string(),
                date: "2024-05-01".to_string(),
                time: "09:15:00".to_string(),
                timestamp: "2024-05-01 09:15:00".to_string(),
            })
            .collect()
    }

    fn page(number: u32, has_prev: bool, has_next: bool) -> ReportPage {
        ReportPage {
            items: contributions(2),
            page_number: number,
            has_prev,
            has_next,
            prev_page_number: has_prev.then(|| number - 1),
            next_page_number: has_next.then(|| number + 1),
        }
    }

    fn config(mode: PaginationMode) -> ReportConfig {
        ReportConfig {
            mode,
            ..ReportConfig::default()
        }
    }

    fn controller(mode: PaginationMode) -> ReportController {
        let fallback = Fundraiser {
            name: "Harambee".to_string(),
            ..Default::default()
        };
        ReportController::new(&config(mode), "42", fallback)
    }

    fn only_fetch(commands: &[Command]) -> FetchRequest {
        match commands {
            [Command::Fetch(request)] => request.clone(),
            other => panic!("expected a single fetch, got {:?}", other),
        }
    }

    fn only_render(commands: &[Command]) -> ReportView {
        match commands {
            [Command::Render(view)] => view.clone(),
            other => panic!("expected a single render, got {:?}", other),
        }
    }

    fn loaded_client_side(items: usize) -> ReportController {
        let mut ctl = controller(PaginationMode::ClientSide);
        let request = only_fetch(&ctl.update(Message::LoadReport));
        ctl.update(Message::ReportFetched {
            seq: request.seq,
            result: Ok(FetchedReport::All {
                fundraiser: None,
                items: contributions(items),
            }),
        });
        ctl
    }

    #[test]
    fn load_fetches_everything_in_client_side_mode() {
        let mut ctl = controller(PaginationMode::ClientSide);
        assert_eq!(ctl.status(), &ReportStatus::Idle);

        let request = only_fetch(&ctl.update(Message::LoadReport));
        assert_eq!(request.target, FetchTarget::All);
        assert_eq!(request.fundraiser_id, "42");
        assert_eq!(ctl.status(), &ReportStatus::Loading);
    }

    #[test]
    fn twenty_three_contributions_page_through_locally() {
        let mut ctl = controller(PaginationMode::ClientSide);
        let request = only_fetch(&ctl.update(Message::LoadReport));
        let view = only_render(&ctl.update(Message::ReportFetched {
            seq: request.seq,
            result: Ok(FetchedReport::All {
                fundraiser: None,
                items: contributions(23),
            }),
        }));
        assert_eq!(ctl.status(), &ReportStatus::Loaded);
        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.page_label, "Page 1 of 3");

        only_render(&ctl.update(Message::NextPage));
        let view = only_render(&ctl.update(Message::NextPage));
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.rows[0].reference, "R20");
        assert_eq!(view.page_label, "Page 3 of 3");
        assert_eq!(
            view.controls,
            ControlState {
                prev_enabled: true,
                next_enabled: false
            }
        );
        assert_eq!(ctl.status(), &ReportStatus::Loaded);
    }

    #[test]
    fn out_of_range_only_refreshes_controls() {
        let mut ctl = loaded_client_side(5);
        let commands = ctl.update(Message::NextPage);
        assert_eq!(commands, vec![Command::SetControls(ControlState::default())]);
        assert_eq!(ctl.update(Message::GoToPage(4)).len(), 1);
        assert_eq!(ctl.pagination().unwrap().current_page(), 1);
    }

    #[test]
    fn empty_report_renders_one_empty_page() {
        let ctl = loaded_client_side(0);
        let view = ctl.view().unwrap();
        assert!(view.rows.is_empty());
        assert_eq!(view.page_label, "Page 1 of 1");
        assert_eq!(view.controls, ControlState::default());
    }

    #[test]
    fn server_side_last_page_issues_no_fetch() {
        let mut ctl = controller(PaginationMode::ServerSide);
        let request = only_fetch(&ctl.update(Message::LoadReport));
        assert_eq!(request.target, FetchTarget::Page(1));
        ctl.update(Message::ReportFetched {
            seq: request.seq,
            result: Ok(FetchedReport::Page {
                fundraiser: None,
                page: page(5, true, false),
            }),
        });

        let commands = ctl.update(Message::NextPage);
        assert!(commands.iter().all(|c| !matches!(c, Command::Fetch(_))));
        assert_eq!(
            commands,
            vec![Command::SetControls(ControlState {
                prev_enabled: true,
                next_enabled: false
            })]
        );
        assert_eq!(ctl.view().unwrap().page_label, "Page 5");
    }

    #[test]
    fn superseded_page_response_is_discarded() {
        let mut ctl = controller(PaginationMode::ServerSide);
        let first = only_fetch(&ctl.update(Message::LoadReport));
        ctl.update(Message::ReportFetched {
            seq: first.seq,
            result: Ok(FetchedReport::Page {
                fundraiser: None,
                page: page(1, false, true),
            }),
        });

        let to_two = only_fetch(&ctl.update(Message::GoToPage(2)));
        let to_three = only_fetch(&ctl.update(Message::GoToPage(3)));
        assert_eq!(to_three.target, FetchTarget::Page(3));
        assert!(to_three.seq > to_two.seq);

        // Page 3 arrives first and wins; the late page 2 is dropped.
        let view = only_render(&ctl.update(Message::ReportFetched {
            seq: to_three.seq,
            result: Ok(FetchedReport::Page {
                fundraiser: None,
                page: page(3, true, true),
            }),
        }));
        assert_eq!(view.page_label, "Page 3");

        let late = ctl.update(Message::ReportFetched {
            seq: to_two.seq,
            result: Ok(FetchedReport::Page {
                fundraiser: None,
                page: page(2, true, true),
            }),
        });
        assert!(late.is_empty());
        assert_eq!(ctl.pagination().unwrap().current_page(), 3);
        assert_eq!(ctl.status(), &ReportStatus::Loaded);
    }

    #[test]
    fn early_superseded_response_is_discarded_too() {
        let mut ctl = controller(PaginationMode::ServerSide);
        let first = only_fetch(&ctl.update(Message::LoadReport));
        ctl.update(Message::ReportFetched {
            seq: first.seq,
            result: Ok(FetchedReport::Page {
                fundraiser: None,
                page: page(1, false, true),
            }),
        });
        let to_two = only_fetch(&ctl.update(Message::GoToPage(2)));
        let to_three = only_fetch(&ctl.update(Message::GoToPage(3)));

        let early = ctl.update(Message::ReportFetched {
            seq: to_two.seq,
            result: Ok(FetchedReport::Page {
                fundraiser: None,
                page: page(2, true, true),
            }),
        });
        assert!(early.is_empty());
        assert_eq!(ctl.status(), &ReportStatus::Loading);

        ctl.update(Message::ReportFetched {
            seq: to_three.seq,
            result: Ok(FetchedReport::Page {
                fundraiser: None,
                page: page(3, true, true),
            }),
        });
        assert_eq!(ctl.pagination().unwrap().current_page(), 3);
        assert_eq!(ctl.status(), &ReportStatus::Loaded);
    }

    #[test]
    fn stale_failure_does_not_fail_the_report() {
        let mut ctl = controller(PaginationMode::ServerSide);
        let first = only_fetch(&ctl.update(Message::LoadReport));
        let second = only_fetch(&ctl.update(Message::LoadReport));

        let stale = ctl.update(Message::ReportFetched {
            seq: first.seq,
            result: Err(ReportError::NetworkFailure("reset".to_string())),
        });
        assert!(stale.is_empty());
        assert_eq!(ctl.status(), &ReportStatus::Loading);

        ctl.update(Message::ReportFetched {
            seq: second.seq,
            result: Ok(FetchedReport::Page {
                fundraiser: None,
                page: page(1, false, false),
            }),
        });
        assert_eq!(ctl.status(), &ReportStatus::Loaded);
    }

    #[test]
    fn failure_then_retry_reloads() {
        let mut ctl = controller(PaginationMode::ClientSide);
        let request = only_fetch(&ctl.update(Message::LoadReport));
        let commands = ctl.update(Message::ReportFetched {
            seq: request.seq,
            result: Err(ReportError::NetworkFailure("offline".to_string())),
        });
        assert!(matches!(ctl.status(), ReportStatus::Failed(ReportError::NetworkFailure(_))));
        assert!(matches!(commands[0], Command::ShowFailure(_)));
        assert!(matches!(
            commands[1],
            Command::Notify {
                kind: ToastKind::Error,
                ..
            }
        ));

        // Navigation and export are unavailable while failed.
        assert!(ctl.update(Message::NextPage).is_empty());

        let retry = only_fetch(&ctl.update(Message::Retry));
        assert_eq!(retry.target, FetchTarget::All);
        assert!(retry.seq > request.seq);
        ctl.update(Message::ReportFetched {
            seq: retry.seq,
            result: Ok(FetchedReport::All {
                fundraiser: None,
                items: contributions(3),
            }),
        });
        assert_eq!(ctl.status(), &ReportStatus::Loaded);
    }

    #[test]
    fn retry_repeats_the_failed_page() {
        let mut ctl = controller(PaginationMode::ServerSide);
        let first = only_fetch(&ctl.update(Message::LoadReport));
        ctl.update(Message::ReportFetched {
            seq: first.seq,
            result: Ok(FetchedReport::Page {
                fundraiser: None,
                page: page(1, false, true),
            }),
        });
        let next = only_fetch(&ctl.update(Message::NextPage));
        ctl.update(Message::ReportFetched {
            seq: next.seq,
            result: Err(ReportError::NotFound("42".to_string())),
        });

        let retry = only_fetch(&ctl.update(Message::Retry));
        assert_eq!(retry.target, FetchTarget::Page(2));
    }

    #[test]
    fn retry_outside_failure_is_ignored() {
        let mut ctl = loaded_client_side(3);
        assert!(ctl.update(Message::Retry).is_empty());
    }

    #[test]
    fn empty_fundraiser_id_fails_without_fetching() {
        let mut ctl = ReportController::new(
            &config(PaginationMode::ClientSide),
            "   ",
            Fundraiser::default(),
        );
        let commands = ctl.update(Message::LoadReport);
        assert!(commands.iter().all(|c| !matches!(c, Command::Fetch(_))));
        assert!(matches!(ctl.status(), ReportStatus::Failed(ReportError::InvalidInput(_))));
    }

    #[test]
    fn server_metadata_replaces_fallback() {
        let mut ctl = controller(PaginationMode::ClientSide);
        assert_eq!(ctl.fundraiser().name, "Harambee");
        let request = only_fetch(&ctl.update(Message::LoadReport));
        ctl.update(Message::ReportFetched {
            seq: request.seq,
            result: Ok(FetchedReport::All {
                fundraiser: Some(Fundraiser {
                    name: "School Fees".to_string(),
                    ..Default::default()
                }),
                items: Vec::new(),
            }),
        });
        assert_eq!(ctl.fundraiser().name, "School Fees");
        assert_eq!(ctl.fundraiser().id, "42");
    }

    #[test]
    fn export_uses_all_held_contributions_by_default() {
        let mut ctl = loaded_client_side(23);
        ctl.update(Message::NextPage);
        match ctl.update(Message::ExportRequested).as_slice() {
            [Command::Export(job)] => {
                assert_eq!(job.contributions.len(), 23);
                assert_eq!(job.fundraiser.name, "Harambee");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(ctl.is_exporting());
    }

    #[test]
    fn export_can_be_limited_to_the_current_page() {
        let cfg = ReportConfig {
            export_scope: ExportScope::CurrentPage,
            ..config(PaginationMode::ClientSide)
        };
        let mut ctl = ReportController::new(&cfg, "42", Fundraiser::default());
        let request = only_fetch(&ctl.update(Message::LoadReport));
        ctl.update(Message::ReportFetched {
            seq: request.seq,
            result: Ok(FetchedReport::All {
                fundraiser: None,
                items: contributions(23),
            }),
        });
        ctl.update(Message::GoToPage(3));
        match ctl.update(Message::ExportRequested).as_slice() {
            [Command::Export(job)] => assert_eq!(job.contributions.len(), 3),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn export_requires_a_loaded_report() {
        let mut ctl = controller(PaginationMode::ClientSide);
        ctl.update(Message::LoadReport);
        assert!(matches!(
            ctl.update(Message::ExportRequested).as_slice(),
            [Command::Notify {
                kind: ToastKind::Info,
                ..
            }]
        ));
        assert!(!ctl.is_exporting());
    }

    #[test]
    fn second_export_while_running_is_refused() {
        let mut ctl = loaded_client_side(2);
        ctl.update(Message::ExportRequested);
        assert!(matches!(
            ctl.update(Message::ExportRequested).as_slice(),
            [Command::Notify {
                kind: ToastKind::Info,
                ..
            }]
        ));
    }

    #[test]
    fn navigation_during_export_keeps_export_disabled() {
        let mut ctl = loaded_client_side(23);
        assert!(ctl.view().unwrap().export_enabled);
        ctl.update(Message::ExportRequested);

        let view = only_render(&ctl.update(Message::NextPage));
        assert!(!view.export_enabled);

        ctl.update(Message::ExportFinished(Ok(ExportSummary {
            filename: "Fundraiser_Report_Harambee.pdf".to_string(),
            rows: 23,
        })));
        assert!(ctl.view().unwrap().export_enabled);
    }

    #[test]
    fn export_failure_keeps_the_report_loaded() {
        let mut ctl = loaded_client_side(23);
        ctl.update(Message::NextPage);
        ctl.update(Message::ExportRequested);
        let commands = ctl.update(Message::ExportFinished(Err(ReportError::ExportFailure(
            "backend refused".to_string(),
        ))));
        assert!(matches!(
            commands.as_slice(),
            [Command::Notify {
                kind: ToastKind::Error,
                ..
            }]
        ));
        assert_eq!(ctl.status(), &ReportStatus::Loaded);
        assert!(!ctl.is_exporting());
        assert_eq!(ctl.pagination().unwrap().current_page(), 2);
    }

    #[test]
    fn finished_export_is_announced() {
        let mut ctl = loaded_client_side(2);
        ctl.update(Message::ExportRequested);
        let commands = ctl.update(Message::ExportFinished(Ok(ExportSummary {
            filename: "Fundraiser_Report_Harambee.pdf".to_string(),
            rows: 2,
        })));
        assert_eq!(
            commands,
            vec![Command::Notify {
                kind: ToastKind::Success,
                text: "Report saved as Fundraiser_Report_Harambee.pdf".to_string(),
            }]
        );
    }
}
