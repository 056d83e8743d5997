use chrono::{Datelike, Local};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{ARROZ, LEITE, NO_ADDRESS, Workstation};

/// MMAA twelve months from today.
fn validity_in_a_year() -> (String, String) {
    let today = Local::now().date_naive();
    let mm = today.month();
    let yy = (today.year() + 1) % 100;
    (format!("{mm:02}{yy:02}"), format!("{mm:02}/{yy:02}"))
}

#[test]
fn test_print_buffer_two_copies() {
    let ws = Workstation::new();

    ws.cmd()
        .args(["print", LEITE, "--mat", "4411", "--dest", "pulmao", "--copies", "2"])
        .assert()
        .success()
        .stdout(contains("934"))
        .stdout(contains("62141-2"))
        .stdout(contains("+2 labels"));

    let history = ws.history();
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["coddv"], "621412");
    assert_eq!(entries[0]["address"], "PG06.001.019.934");
    assert_eq!(entries[0]["type"], "pulmao");
    assert!(entries[0]["validity"].is_null());

    let page = ws.label_page();
    assert_eq!(page.matches("class=\"label-badge\"").count(), 2);
    assert_eq!(page.matches("<svg").count(), 2);
}

#[test]
fn test_print_picking_uses_first_address() {
    let ws = Workstation::new();

    ws.cmd()
        .args(["print", LEITE, "--mat", "4411", "--dest", "separacao"])
        .assert()
        .success()
        .stdout(contains("205"));

    let history = ws.history();
    assert_eq!(history[0]["address"], "M205.001");
    assert_eq!(history[0]["type"], "separacao");
}

#[test]
fn test_print_with_validity_adds_one_label() {
    let ws = Workstation::new();
    let (raw, normalized) = validity_in_a_year();

    ws.cmd()
        .args(["print", ARROZ, "--mat", "77", "--copies", "3", "--validity", &raw])
        .assert()
        .success()
        .stdout(contains("+4 labels"));

    assert_eq!(ws.history()[0]["validity"], normalized.as_str());

    let page = ws.label_page();
    assert_eq!(page.matches("class=\"label-badge\"").count(), 4);
    assert_eq!(page.matches("<svg").count(), 3);
    assert!(page.contains(&normalized));

    ws.cmd()
        .args(["counter", "--category", "mercadoria"])
        .assert()
        .success()
        .stdout(contains("mercadoria: 4"));
}

#[test]
fn test_print_unknown_barcode_fails() {
    let ws = Workstation::new();

    ws.cmd()
        .args(["print", "0000000000000", "--mat", "4411"])
        .assert()
        .failure()
        .stderr(contains("Product not found"));

    assert!(ws.history().as_array().unwrap().is_empty());
}

#[test]
fn test_print_without_address_of_type_fails() {
    let ws = Workstation::new();

    ws.cmd()
        .args(["print", NO_ADDRESS, "--mat", "4411"])
        .assert()
        .failure()
        .stderr(contains("no PULMÃO address"));

    ws.cmd()
        .args(["print", ARROZ, "--mat", "4411", "--dest", "separacao"])
        .assert()
        .failure()
        .stderr(contains("no SEPARAÇÃO address"));
}

#[test]
fn test_print_requires_matricula() {
    let ws = Workstation::new();

    ws.cmd()
        .args(["print", LEITE])
        .assert()
        .failure()
        .stderr(contains("matricula"));
}

#[test]
fn test_print_rejects_invalid_validity() {
    let ws = Workstation::new();

    ws.cmd()
        .args(["print", LEITE, "--mat", "4411", "--validity", "1324"])
        .assert()
        .failure()
        .stderr(contains("Invalid month"));

    ws.cmd()
        .args(["print", LEITE, "--mat", "4411", "--validity", "126"])
        .assert()
        .failure()
        .stderr(contains("4 digits"));

    assert!(ws.history().as_array().unwrap().is_empty());
    assert!(ws.label_page().is_empty());
}

#[test]
fn test_print_rejects_barcode_as_copies() {
    let ws = Workstation::new();

    ws.cmd()
        .args(["print", LEITE, "--mat", "4411", "--copies", LEITE])
        .assert()
        .failure()
        .stderr(contains("Too many copies: 7891000100103 (maximum 500)"));

    assert!(ws.history().as_array().unwrap().is_empty());
    assert!(ws.label_page().is_empty());
}

#[test]
fn test_cli_rejects_unknown_destination_and_field() {
    let ws = Workstation::new();

    ws.cmd()
        .args(["print", LEITE, "--mat", "4411", "--dest", "doca"])
        .assert()
        .failure()
        .stderr(contains("invalid value 'doca'"));

    ws.cmd()
        .args(["history", "--search", "x", "--field", "endereco"])
        .assert()
        .failure()
        .stderr(contains("invalid value 'endereco'"));

    assert!(ws.history().as_array().unwrap().is_empty());
}

#[test]
fn test_lookup_does_not_record_history() {
    let ws = Workstation::new();

    ws.cmd()
        .args(["lookup", LEITE, "--dest", "pulmao"])
        .assert()
        .success()
        .stdout(contains("Large number: 934"))
        .stdout(contains("Short addr  : PG06.001.019"))
        .stdout(contains("M205.001"));

    assert!(ws.history().as_array().unwrap().is_empty());
}

#[test]
fn test_history_filters() {
    let ws = Workstation::new();

    ws.cmd()
        .args(["print", LEITE, "--mat", "4411"])
        .assert()
        .success();
    ws.cmd()
        .args(["print", ARROZ, "--mat", "9000"])
        .assert()
        .success();

    ws.cmd()
        .args(["history"])
        .assert()
        .success()
        .stdout(contains("2 record(s)"));

    ws.cmd()
        .args(["history", "--search", "arroz", "--field", "descricao"])
        .assert()
        .success()
        .stdout(contains("Arroz").and(contains("Leite").not()))
        .stdout(contains("1 record(s)"));

    ws.cmd()
        .args(["history", "--search", "4411", "--field", "coddv"])
        .assert()
        .success()
        .stdout(contains("No records found."));
}

#[test]
fn test_log_records_prints() {
    let ws = Workstation::new();

    ws.cmd()
        .args(["print", LEITE, "--mat", "4411"])
        .assert()
        .success();

    ws.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("load"))
        .stdout(contains("1 label(s) for 621412"));
}

#[test]
fn test_skipped_address_is_reported() {
    let ws = Workstation::new();

    ws.cmd()
        .args(["lookup", LEITE])
        .assert()
        .success()
        .stderr(contains("1 address(es) without CODDV"));
}
