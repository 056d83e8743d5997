//! Workstation flow: search → (copies, validity) → print, with a single
//! pending-request slot.

use crate::core::composer::{LabelRequest, compose};
use crate::core::history::{HistoryRepository, HistoryStore};
use crate::core::printer::{LabelCounter, PrintTrigger};
use crate::core::reference::ReferenceIndex;
use crate::core::render::{LabelSize, render_html};
use crate::core::resolver::ResolverPolicy;
use crate::core::validity;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult, ValidityError};
use crate::models::destination::Destination;
use crate::models::history::{HistoryEntry, NewHistoryEntry};
use crate::models::label::{LabelBatch, PendingPrintRequest};
use crate::ui::messages::warning;
use chrono::{DateTime, Local, NaiveDate, Utc};
use rusqlite::Connection;
use std::fs;
use std::num::IntErrorKind;
use std::path::PathBuf;

/// Largest batch a single print may request.
pub const MAX_COPIES: usize = 500;

/// Parse the copy count typed by the operator; anything below 1 or
/// non-numeric falls back to 1. Counts above [`MAX_COPIES`] are rejected.
pub fn parse_copies(input: &str) -> AppResult<usize> {
    let input = input.trim();
    match input.parse::<i64>() {
        Ok(n) if n < 1 => Ok(1),
        Ok(n) => match usize::try_from(n) {
            Ok(n) if n <= MAX_COPIES => Ok(n),
            _ => Err(AppError::TooManyCopies(input.to_string())),
        },
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
            Err(AppError::TooManyCopies(input.to_string()))
        }
        Err(_) => Ok(1),
    }
}

/// Collaborators used by a print execution.
pub struct PrintPipeline<'a, R: HistoryRepository> {
    pub history: &'a mut HistoryStore<R>,
    pub printer: &'a mut dyn PrintTrigger,
    pub counter: Option<&'a mut dyn LabelCounter>,
    pub audit: Option<&'a Connection>,
    pub label_size: LabelSize,
    pub output_file: PathBuf,
    pub counter_category: String,
}

/// Result of a completed print.
#[derive(Debug)]
pub struct PrintOutcome {
    pub batch: LabelBatch,
    pub entry: HistoryEntry,
    pub page: PathBuf,
    pub counter_total: Option<i64>,
}

pub struct LabelSession {
    index: ReferenceIndex,
    policy: ResolverPolicy,
    pending: Option<PendingPrintRequest>,
}

impl LabelSession {
    pub fn new(index: ReferenceIndex, policy: ResolverPolicy) -> Self {
        Self {
            index,
            policy,
            pending: None,
        }
    }

    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    pub fn pending(&self) -> Option<&PendingPrintRequest> {
        self.pending.as_ref()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Look up and resolve a scanned barcode, replacing any pending request.
    /// On failure nothing stays pending.
    pub fn search(
        &mut self,
        barcode: &str,
        matricula: &str,
        mode: Destination,
    ) -> AppResult<&PendingPrintRequest> {
        self.pending = None;

        let barcode = barcode.trim();
        let matricula = matricula.trim();
        if matricula.is_empty() {
            return Err(AppError::MissingMatricula);
        }
        if barcode.is_empty() {
            return Err(AppError::MissingBarcode);
        }

        let product = self
            .index
            .lookup_product(barcode)
            .ok_or_else(|| AppError::ProductNotFound(barcode.to_string()))?;
        let addresses = self.index.lookup_addresses(&product.coddv);
        let target = self.policy.resolve(addresses, mode)?;

        Ok(self.pending.insert(PendingPrintRequest {
            product: product.clone(),
            target,
            barcode: barcode.to_string(),
            matricula: matricula.to_string(),
            destination: mode,
        }))
    }

    /// Validate raw validity input (any separators are ignored).
    pub fn confirm_validity(&self, raw: &str, today: NaiveDate) -> Result<String, ValidityError> {
        validity::validate(&validity::extract_digits(raw), today)
    }

    /// Consume the pending request: compose, record history, render, print,
    /// then bump the label counter. Counter failures are logged and ignored.
    pub fn execute_print<R: HistoryRepository>(
        &mut self,
        copies: usize,
        validity: Option<&str>,
        pipe: &mut PrintPipeline<'_, R>,
        now: DateTime<Local>,
    ) -> AppResult<PrintOutcome> {
        if copies > MAX_COPIES {
            return Err(AppError::TooManyCopies(copies.to_string()));
        }
        let req = self.pending.take().ok_or(AppError::NoPendingRequest)?;

        let batch = compose(
            &LabelRequest {
                product: &req.product,
                address: &req.target,
                scanned_barcode: &req.barcode,
                matricula: &req.matricula,
                copies,
                validity,
            },
            now.naive_local(),
        );

        let entry = pipe.history.append(
            NewHistoryEntry {
                desc: req.product.desc.clone(),
                coddv: req.product.coddv.clone(),
                barcode: req.barcode.clone(),
                matricula: req.matricula.clone(),
                address: req.target.source_record.endereco.clone(),
                kind: req.destination.as_str().to_string(),
                validity: validity.map(str::to_string),
                timestamp: now.with_timezone(&Utc),
            },
            now.with_timezone(&Utc),
        )?;

        let page = render_html(&batch, pipe.label_size);
        if let Some(conn) = pipe.audit {
            for failure in &page.barcode_failures {
                ttlog_quiet(conn, "barcode", &req.product.coddv, failure);
            }
        }

        if let Some(parent) = pipe.output_file.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&pipe.output_file, &page.html)?;

        pipe.printer.print(&pipe.output_file)?;

        if let Some(conn) = pipe.audit {
            ttlog_quiet(
                conn,
                "print",
                &req.barcode,
                &format!(
                    "{} label(s) for {} ({}) at {}",
                    batch.total_count(),
                    req.product.coddv,
                    req.destination,
                    req.target.source_record.endereco
                ),
            );
        }

        let counter_total = match pipe.counter.as_deref_mut() {
            Some(counter) => match counter.increment(batch.total_count(), &pipe.counter_category) {
                Ok(total) => Some(total),
                Err(e) => {
                    warning(format!("Failed to update label counter: {}", e));
                    if let Some(conn) = pipe.audit {
                        ttlog_quiet(conn, "counter_error", &pipe.counter_category, &e.to_string());
                    }
                    None
                }
            },
            None => None,
        };

        Ok(PrintOutcome {
            batch,
            entry,
            page: pipe.output_file.clone(),
            counter_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::MemoryRepository;
    use crate::models::address::AddressRecord;
    use crate::models::product::Product;
    use chrono::TimeZone;
    use std::path::Path;

    #[derive(Default)]
    struct RecordingPrinter {
        pages: Vec<PathBuf>,
    }

    impl PrintTrigger for RecordingPrinter {
        fn print(&mut self, page: &Path) -> AppResult<()> {
            self.pages.push(page.to_path_buf());
            Ok(())
        }
    }

    struct FailingCounter;

    impl LabelCounter for FailingCounter {
        fn increment(&mut self, _amount: usize, _category: &str) -> AppResult<i64> {
            Err(AppError::Counter("offline".into()))
        }
    }

    #[derive(Default)]
    struct TallyCounter {
        total: i64,
    }

    impl LabelCounter for TallyCounter {
        fn increment(&mut self, amount: usize, _category: &str) -> AppResult<i64> {
            self.total += amount as i64;
            Ok(self.total)
        }
    }

    fn session() -> LabelSession {
        let index = ReferenceIndex::build(
            vec![
                Product::new("7891000100103", "621412", "Leite"),
                Product::new("7890000000002", "5", "Sem endereco"),
            ],
            vec![
                AddressRecord::new("621412", "PULMÃO", "PG06.001.019.934"),
                AddressRecord::new("621412", "SEPARACAO", "M205.001"),
            ],
        );
        LabelSession::new(index, ResolverPolicy::default())
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap()
    }

    #[test]
    fn end_to_end_buffer_two_copies() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = HistoryStore::open(MemoryRepository::default()).unwrap();
        let mut printer = RecordingPrinter::default();
        let mut counter = TallyCounter::default();

        let mut s = session();
        s.search("7891000100103", "4411", Destination::Buffer).unwrap();

        let mut pipe = PrintPipeline {
            history: &mut history,
            printer: &mut printer,
            counter: Some(&mut counter),
            audit: None,
            label_size: LabelSize::default(),
            output_file: dir.path().join("out/labels.html"),
            counter_category: "mercadoria".into(),
        };
        let out = s.execute_print(2, None, &mut pipe, now()).unwrap();

        assert_eq!(out.batch.total_count(), 2);
        assert_eq!(out.batch.labels[0], out.batch.labels[1]);
        assert_eq!(out.batch.labels[0].headline, "934");
        assert_eq!(out.batch.labels[0].cod_formatted, "62141-2");
        assert_eq!(out.counter_total, Some(2));
        assert!(out.page.exists());
        assert!(s.pending().is_none());

        assert_eq!(printer.pages.len(), 1);
        assert_eq!(history.entries().len(), 1);
        let e = &history.entries()[0];
        assert_eq!(e.validity, None);
        assert_eq!(e.kind, "pulmao");
        assert_eq!(e.address, "PG06.001.019.934");
    }

    #[test]
    fn validity_adds_one_label_to_counter() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = HistoryStore::open(MemoryRepository::default()).unwrap();
        let mut printer = RecordingPrinter::default();
        let mut counter = TallyCounter::default();

        let mut s = session();
        s.search("7891000100103", "4411", Destination::Picking).unwrap();
        let validity = s.confirm_validity("01/26", now().date_naive()).unwrap();

        let mut pipe = PrintPipeline {
            history: &mut history,
            printer: &mut printer,
            counter: Some(&mut counter),
            audit: None,
            label_size: LabelSize::default(),
            output_file: dir.path().join("labels.html"),
            counter_category: "mercadoria".into(),
        };
        let out = s.execute_print(1, Some(&validity), &mut pipe, now()).unwrap();

        assert_eq!(out.batch.total_count(), 2);
        assert_eq!(out.counter_total, Some(2));
        assert_eq!(history.entries()[0].validity.as_deref(), Some("01/26"));
        assert_eq!(history.entries()[0].kind, "separacao");
    }

    #[test]
    fn counter_failure_does_not_undo_history_or_print() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = HistoryStore::open(MemoryRepository::default()).unwrap();
        let mut printer = RecordingPrinter::default();
        let mut counter = FailingCounter;

        let mut s = session();
        s.search("7891000100103", "4411", Destination::Buffer).unwrap();

        let mut pipe = PrintPipeline {
            history: &mut history,
            printer: &mut printer,
            counter: Some(&mut counter),
            audit: None,
            label_size: LabelSize::default(),
            output_file: dir.path().join("labels.html"),
            counter_category: "mercadoria".into(),
        };
        let out = s.execute_print(1, None, &mut pipe, now()).unwrap();

        assert_eq!(out.counter_total, None);
        assert_eq!(printer.pages.len(), 1);
        assert_eq!(history.entries().len(), 1);
    }

    #[test]
    fn failed_search_clears_pending_request() {
        let mut s = session();
        s.search("7891000100103", "4411", Destination::Buffer).unwrap();
        assert!(s.pending().is_some());

        let err = s.search("0000", "4411", Destination::Buffer).unwrap_err();
        assert!(matches!(err, AppError::ProductNotFound(_)));
        assert!(s.pending().is_none());

        let err = s.search("7890000000002", "4411", Destination::Buffer).unwrap_err();
        assert!(matches!(err, AppError::NoAddressOfType(Destination::Buffer)));
        assert!(s.pending().is_none());
    }

    #[test]
    fn search_requires_matricula_and_barcode() {
        let mut s = session();
        assert!(matches!(
            s.search("7891000100103", "  ", Destination::Buffer),
            Err(AppError::MissingMatricula)
        ));
        assert!(matches!(
            s.search("", "4411", Destination::Buffer),
            Err(AppError::MissingBarcode)
        ));
    }

    #[test]
    fn new_search_overwrites_pending() {
        let mut s = session();
        s.search("7891000100103", "1", Destination::Buffer).unwrap();
        s.search("7891000100103", "2", Destination::Picking).unwrap();

        let p = s.pending().unwrap();
        assert_eq!(p.matricula, "2");
        assert_eq!(p.destination, Destination::Picking);
    }

    #[test]
    fn print_without_search_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = HistoryStore::open(MemoryRepository::default()).unwrap();
        let mut printer = RecordingPrinter::default();

        let mut pipe = PrintPipeline {
            history: &mut history,
            printer: &mut printer,
            counter: None,
            audit: None,
            label_size: LabelSize::default(),
            output_file: dir.path().join("labels.html"),
            counter_category: "mercadoria".into(),
        };
        let err = session().execute_print(1, None, &mut pipe, now()).unwrap_err();
        assert!(matches!(err, AppError::NoPendingRequest));
        assert!(printer.pages.is_empty());
    }

    #[test]
    fn copies_parsing_falls_back_to_one() {
        assert_eq!(parse_copies("3").unwrap(), 3);
        assert_eq!(parse_copies(" 12 ").unwrap(), 12);
        assert_eq!(parse_copies("0").unwrap(), 1);
        assert_eq!(parse_copies("-2").unwrap(), 1);
        assert_eq!(parse_copies("abc").unwrap(), 1);
        assert_eq!(parse_copies("").unwrap(), 1);
        assert_eq!(parse_copies("500").unwrap(), MAX_COPIES);
    }

    #[test]
    fn scanned_ean_as_copies_is_rejected() {
        let err = parse_copies("7891000100103").unwrap_err();
        assert!(matches!(err, AppError::TooManyCopies(ref s) if s == "7891000100103"));
        assert!(matches!(
            parse_copies("501"),
            Err(AppError::TooManyCopies(_))
        ));
        assert!(matches!(
            parse_copies("99999999999999999999999"),
            Err(AppError::TooManyCopies(_))
        ));
    }

    #[test]
    fn oversized_batch_keeps_pending_request() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = HistoryStore::open(MemoryRepository::default()).unwrap();
        let mut printer = RecordingPrinter::default();

        let mut s = session();
        s.search("7891000100103", "4411", Destination::Buffer).unwrap();

        let mut pipe = PrintPipeline {
            history: &mut history,
            printer: &mut printer,
            counter: None,
            audit: None,
            label_size: LabelSize::default(),
            output_file: dir.path().join("labels.html"),
            counter_category: "mercadoria".into(),
        };
        let err = s
            .execute_print(7_891_000_100_103, None, &mut pipe, now())
            .unwrap_err();
        assert!(matches!(err, AppError::TooManyCopies(_)));
        assert!(s.pending().is_some());
        assert!(pipe.history.entries().is_empty());
        assert!(!dir.path().join("labels.html").exists());

        let out = s.execute_print(MAX_COPIES, None, &mut pipe, now()).unwrap();
        assert_eq!(out.batch.total_count(), MAX_COPIES);
    }
}
