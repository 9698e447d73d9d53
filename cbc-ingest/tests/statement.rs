//! End-to-end parse of a CBC export, header row included.

use std::io::Cursor;

use cbc_ingest::{ParseError, TransactionKind, parse_statement};
use chrono::NaiveDate;

const HEADER: &str = "Numéro de compte;Nom de la rubrique;Nom;Devise;Numéro de l'extrait;Date;\
Description;Valeur;Montant;Solde;crédit;débit;numéro de compte contrepartie;BIC contrepartie;\
Nom contrepartie;Adresse contrepartie;communication structurée;Communication libre";

fn export(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out.push('\n');
    out
}

#[test]
fn test_parses_full_export() {
    let text = export(&[
        "BE68539007547034;Compte à vue;JEAN DUPONT;EUR;2024-001;15/03/2024;VIREMENT EN EUROS;\
         15/03/2024;-250,00;1750,00;;250,00;BE71096123456769;GKCCBEBB;ACME SPRL;RUE HAUTE 1 BRUXELLES;;facture 42",
        "BE68539007547034;Compte à vue;JEAN DUPONT;EUR;2024-001;16/03/2024;\
         PAIEMENT PAR BANCONTACT LE 16/03 A 12:41 HEURES CHEZ BOULANGERIE DUPAIN AVEC CARTE 6703 12XX XXXX 1234 5;\
         16/03/2024;-4,20;1745,80;;4,20;;;;;;",
        "BE68539007547034;Compte à vue;JEAN DUPONT;EUR;2024-002;20/03/2024;SALAIRE;\
         20/03/2024;2000,00;3745,80;2000,00;;BE05001234567890;BBRUBEBB;EMPLOYEUR SA;;;",
    ]);

    let statement = parse_statement(Cursor::new(text)).unwrap();
    assert_eq!(statement.account_id, "BE68539007547034");
    assert_eq!(statement.currency, "EUR");
    assert_eq!(statement.lines.len(), 3);

    let transfer = &statement.lines[0];
    assert_eq!(transfer.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    assert_eq!(transfer.amount, -250.0);
    assert_eq!(transfer.kind, TransactionKind::Debit);
    assert_eq!(transfer.payee, "ACME SPRL - BE71096123456769");
    assert_eq!(transfer.memo, "VIREMENT EN EUROS");
    assert_eq!(transfer.id, "2024-001");

    let card = &statement.lines[1];
    assert_eq!(card.payee, "CHEZ BOULANGERIE DUPAIN");
    assert_eq!(card.kind, TransactionKind::Debit);

    let salary = &statement.lines[2];
    assert_eq!(salary.amount, 2000.0);
    assert_eq!(salary.kind, TransactionKind::Credit);
    assert_eq!(salary.payee, "EMPLOYEUR SA - BE05001234567890");
    assert_eq!(salary.refnum, "2024-002");
}

#[test]
fn test_repeated_header_rows_are_skipped() {
    let row = "BE68539007547034;Compte à vue;JEAN DUPONT;EUR;2024-001;15/03/2024;VIREMENT;\
               15/03/2024;-1,00;99,00;;1,00;BE71096123456769;;;;;";
    let text = format!("{HEADER}\n{row}\n{HEADER}\n{row}\n");

    let statement = parse_statement(Cursor::new(text)).unwrap();
    assert_eq!(statement.lines.len(), 2);
}

#[test]
fn test_mixed_accounts_abort_the_file() {
    let text = export(&[
        "BE68539007547034;;JEAN DUPONT;EUR;2024-001;15/03/2024;VIREMENT;15/03/2024;-1,00;99,00;;1,00;;;;;;",
        "BE99999999999999;;JEAN DUPONT;EUR;2024-001;15/03/2024;VIREMENT;15/03/2024;-1,00;99,00;;1,00;;;;;;",
    ]);

    let err = parse_statement(Cursor::new(text)).unwrap_err();
    match err {
        ParseError::AccountMismatch {
            line,
            found,
            expected,
        } => {
            assert_eq!(line, 3);
            assert_eq!(found, "BE99999999999999");
            assert_eq!(expected, "BE68539007547034");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_short_row_aborts_with_line_number() {
    let text = export(&[
        "BE68539007547034;;JEAN DUPONT;EUR;2024-001;15/03/2024;VIREMENT;15/03/2024;-1,00;99,00;;1,00;;;;;;",
        "BE68539007547034;EUR;oops",
    ]);

    let err = parse_statement(Cursor::new(text)).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("line 3"), "message was: {msg}");
    assert!(msg.contains("found 3"), "message was: {msg}");
    assert!(msg.contains("expected 18"), "message was: {msg}");
}

#[test]
fn test_header_only_input_is_empty() {
    let err = parse_statement(Cursor::new(export(&[]))).unwrap_err();
    assert!(matches!(err, ParseError::EmptyStatement));
}

#[test]
fn test_statement_serializes_to_json() {
    let text = export(&[
        "BE68539007547034;;JEAN DUPONT;EUR;2024-001;15/03/2024;VIREMENT;15/03/2024;-1,00;99,00;;1,00;;;;;;",
    ]);
    let statement = parse_statement(Cursor::new(text)).unwrap();

    let json = serde_json::to_value(&statement).unwrap();
    assert_eq!(json["account_id"], "BE68539007547034");
    assert_eq!(json["lines"][0]["kind"], "DEBIT");
    assert_eq!(json["lines"][0]["date"], "2024-03-15");
}
