use std::io::Write;
use std::process::Command;
use std::path::Path;
use anyhow::Result;
use tempfile::NamedTempFile;

fn run_cli(arguments: &[&str]) -> Result<Vec<String>> {
    let binary_path = env!("CARGO_BIN_EXE_spending-insights-engine");
    let samples = Path::new("samples");

    let output = Command::new(binary_path)
        .arg(samples.join("transactions.csv"))
        .arg("--categories")
        .arg(samples.join("categories.csv"))
        .args(arguments)
        .output()?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout)?;

    Ok(stdout.lines().map(str::to_string).collect())
}

#[test]
fn test_cli_summarizes_leap_february() -> Result<()> {
    let lines = run_cli(&["--month", "2024-02", "--group", "Twint=description:twint"])?;

    assert_eq!(lines[0], "period,February 2024");
    assert_eq!(lines[1], "imported,\"5 inserted, 1 duplicates skipped, 1 errors (6 rows processed)\"");
    assert_eq!(lines[2], "total_income,CHF 2'500.00");
    assert_eq!(lines[3], "total_out,CHF 58.00");
    assert_eq!(lines[4], "burn_rate,CHF 2.00");
    assert_eq!(lines[5], "unassigned,2");
    assert_eq!(lines[6], "category,spent,bar_percent");
    assert!(lines[7].starts_with("Groceries,CHF 42.50,"));
    assert_eq!(lines[8], "Unassigned,CHF 15.50,36.47");
    assert_eq!(lines[9], "group,total,count,average");
    assert_eq!(lines[10], "Twint,CHF 15.50,2,CHF 7.75");

    Ok(())
}

#[test]
fn test_cli_lists_month_newest_first() -> Result<()> {
    let lines = run_cli(&["--month", "2024-02"])?;

    let header = lines.iter()
        .position(|line| line == "booked_at,description,merchant,category,amount")
        .ok_or_else(|| anyhow::anyhow!("list header missing"))?;
    let rows = &lines[header + 1..];

    assert_eq!(rows, [
        "2024-02-15,Twint payment,,Unassigned,-CHF 3.50",
        "2024-02-10,TWINT payment,,Unassigned,-CHF 12.00",
        "2024-02-03,Card payment,Coop Supermarkt,Groceries,-CHF 42.50",
        "2024-02-01,Salary February,Employer AG,Income,+CHF 2'500.00"
    ]);

    Ok(())
}

#[test]
fn test_cli_applies_search_category_and_sort() -> Result<()> {
    let lines = run_cli(&["--all-time", "--search", "ag", "--sort", "amount", "--reverse"])?;

    let header = lines.iter()
        .position(|line| line == "booked_at,description,merchant,category,amount")
        .ok_or_else(|| anyhow::anyhow!("list header missing"))?;
    let rows = &lines[header + 1..];

    assert_eq!(rows, [
        "2024-03-01,Rent March,Immo AG,Rent,-CHF 1'800.00",
        "2024-02-01,Salary February,Employer AG,Income,+CHF 2'500.00"
    ]);

    let lines = run_cli(&["--all-time", "--category", "Groceries"])?;
    assert_eq!(lines.last().map(String::as_str), Some("2024-02-03,Card payment,Coop Supermarkt,Groceries,-CHF 42.50"));

    Ok(())
}

#[test]
fn test_cli_all_time_rate_spans_first_to_last_record() -> Result<()> {
    let lines = run_cli(&["--all-time"])?;

    assert_eq!(lines[0], "period,All Time");
    assert_eq!(lines[3], "total_out,CHF 1'858.00");
    assert_eq!(lines[4], "burn_rate,CHF 61.93");

    Ok(())
}

#[test]
fn test_cli_survives_totals_beyond_decimal_range() -> Result<()> {
    let mut snapshot = NamedTempFile::new()?;
    writeln!(snapshot, "id,booked_at,amount,description,purpose,merchant,iban,category,category_color")?;
    writeln!(snapshot, "huge-1,2024-02-01,-50000000000000000000000000000.0,Huge,,,,,")?;
    writeln!(snapshot, "huge-2,2024-02-02,-50000000000000000000000000000.0,Huge,,,,,")?;
    snapshot.flush()?;

    let output = Command::new(env!("CARGO_BIN_EXE_spending-insights-engine"))
        .arg(snapshot.path())
        .args(["--all-time", "--group", "Huge=description:huge"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.lines().any(|line| line.starts_with("imported,\"2 inserted")));
    assert!(stdout.lines().any(|line| line.starts_with("Huge,CHF 79'228'162'514'264'337'593'543'950'335.00,2,")));

    Ok(())
}
