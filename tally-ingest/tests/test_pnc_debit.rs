use tally_core::Money;
use tally_ingest::parsers::pnc_debit::parse_debit_statement;
use tally_ingest::statement::StatementPeriod;
use tally_ingest::text::{Fragment, Page};

fn frag(x: f64, y: f64, text: &str) -> Fragment {
    Fragment {
        x,
        y,
        text: text.to_string(),
    }
}

fn period() -> StatementPeriod {
    StatementPeriod::from_file_name("Statement_Mar_0297_2023.pdf").unwrap()
}

/// Balance Summary page: the label, nine layout fragments, then the
/// deposits and deductions totals at offsets +10 and +11.
fn summary_page(positive: &str, negative: &str) -> Page {
    let mut page = vec![frag(5.0, 5.0, "Balance Summary")];
    for i in 0..9 {
        page.push(frag(5.0, 10.0 + i as f64, "summary layout"));
    }
    page.push(frag(5.0, 30.0, positive));
    page.push(frag(5.0, 31.0, negative));
    page
}

fn activity_page() -> Page {
    vec![
        frag(10.0, 10.0, "Activity Detail"),
        frag(10.0, 20.0, "Deposits and Other Additions"),
        frag(10.0, 30.0, "Date"),
        frag(10.0, 40.0, "03/14"),
        frag(30.0, 40.0, "50.00"),
        frag(50.0, 40.0, "Coffee"),
        frag(10.0, 50.0, "03/15"),
        frag(30.0, 50.0, "12.34"),
        frag(50.0, 50.0, "Parking"),
        // Wrapped description line: trailing column, between the two entries.
        frag(50.0, 55.0, "garage"),
        frag(10.0, 60.0, "Online and Electronic Banking Deductions"),
        frag(10.0, 70.0, "Date"),
        frag(10.0, 80.0, "03/20"),
        frag(30.0, 80.0, "20.00"),
        frag(50.0, 80.0, "Electric Bill"),
        frag(10.0, 90.0, "Checks and Substitute Checks"),
        frag(10.0, 100.0, "Check"),
        frag(10.0, 110.0, "number"),
        frag(10.0, 120.0, "1041"),
        frag(30.0, 120.0, "15.00"),
        frag(50.0, 120.0, "03/18"),
        frag(10.0, 130.0, "Daily Balance Detail"),
    ]
}

#[test]
fn test_full_statement_extraction() {
    // Deposits: 50.00 + 12.34; deductions: 20.00 + check 15.00.
    let pages = vec![summary_page("62.34", "35.00"), activity_page()];

    let txns = parse_debit_statement(&pages, &period()).unwrap();
    assert_eq!(txns.len(), 4);

    assert_eq!(txns[0].value, Money::from_cents(5000));
    assert_eq!(txns[0].date.save(), "03/14/2023");
    assert_eq!(txns[0].description, "Coffee");

    assert_eq!(txns[1].value, Money::from_cents(1234));
    assert_eq!(txns[1].date.save(), "03/15/2023");
    assert_eq!(txns[1].description, "Parking garage");

    assert_eq!(txns[2].value, Money::from_cents(-2000));
    assert_eq!(txns[2].description, "Electric Bill");

    assert_eq!(txns[3].value, Money::from_cents(-1500));
    assert_eq!(txns[3].date.save(), "03/18/2023");
    assert_eq!(txns[3].description, "Check #1041");
}

#[test]
fn test_section_continues_across_pages() {
    let page1 = vec![
        frag(10.0, 10.0, "Activity Detail"),
        frag(10.0, 20.0, "Deposits and Other Additions"),
        frag(10.0, 30.0, "Date"),
        frag(10.0, 40.0, "03/14"),
        frag(30.0, 40.0, "50.00"),
        frag(50.0, 40.0, "Payroll"),
        frag(10.0, 50.0, "Deposits and Other Additions - continued on next page"),
    ];
    let page2 = vec![
        frag(10.0, 5.0, "Account Number:"),
        frag(10.0, 20.0, "03/15"),
        frag(30.0, 20.0, "12.34"),
        frag(50.0, 20.0, "Refund"),
        frag(10.0, 30.0, "Daily Balance Detail"),
    ];
    let pages = vec![summary_page("62.34", "0.00"), page1, page2];

    let txns = parse_debit_statement(&pages, &period()).unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[1].description, "Refund");
    assert_eq!(txns[1].value, Money::from_cents(1234));
}

#[test]
fn test_one_cent_mismatch_rejects_statement() {
    let pages = vec![summary_page("62.35", "35.00"), activity_page()];

    let err = parse_debit_statement(&pages, &period()).unwrap_err();
    assert!(err.to_string().contains("does not match"), "{err}");
}

#[test]
fn test_column_header_mismatch_is_fatal() {
    let pages = vec![
        summary_page("50.00", "0.00"),
        vec![
            frag(10.0, 10.0, "Activity Detail"),
            frag(10.0, 20.0, "Deposits and Other Additions"),
            frag(10.0, 30.0, "Amount"),
        ],
    ];

    let err = parse_debit_statement(&pages, &period()).unwrap_err();
    assert!(err.to_string().contains("expected \"Date\""), "{err}");
}

#[test]
fn test_data_row_before_section_is_fatal() {
    let pages = vec![
        summary_page("50.00", "0.00"),
        vec![
            frag(10.0, 10.0, "Activity Detail"),
            frag(10.0, 20.0, "03/14"),
            frag(30.0, 20.0, "50.00"),
        ],
    ];

    let err = parse_debit_statement(&pages, &period()).unwrap_err();
    assert!(err.to_string().contains("before any section label"), "{err}");
}

#[test]
fn test_overlong_description_is_fatal() {
    let pages = vec![
        summary_page("50.00", "0.00"),
        vec![
            frag(10.0, 10.0, "Activity Detail"),
            frag(10.0, 20.0, "Deposits and Other Additions"),
            frag(10.0, 30.0, "Date"),
            frag(10.0, 40.0, "03/14"),
            frag(30.0, 40.0, "50.00"),
            frag(50.0, 40.0, &"x".repeat(61)),
            frag(10.0, 50.0, "Daily Balance Detail"),
        ],
    ];

    let err = parse_debit_statement(&pages, &period()).unwrap_err();
    assert!(err.to_string().contains("description too long"), "{err}");
}

#[test]
fn test_missing_summary_is_fatal() {
    let pages = vec![activity_page()];

    let err = parse_debit_statement(&pages, &period()).unwrap_err();
    assert!(err.to_string().contains("Balance Summary"), "{err}");
}
